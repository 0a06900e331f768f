//! Feature detection: profiles + directives → ordered feature list.

mod detect;
mod types;


pub use detect::detect_features;
pub use types::{Feature, FeatureRole, Operation};
