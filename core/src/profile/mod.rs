//! Profile reconstruction: chaining, metrics, and closure validation.

mod chain;
mod types;


pub use chain::chain_profiles;
pub use types::Profile;
