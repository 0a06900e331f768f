pub mod annotations;
pub mod builder;
pub mod config;
pub mod convert;
pub mod drawing;
pub mod error;
pub mod features;
pub mod geometry;
pub mod kernel;
pub mod profile;

pub fn version() -> &'static str {
    "0.1.0"
}
