//! Pipeline error taxonomy.
//!
//! A conversion run collects every diagnostic into one ordered log.
//! Failures on the base feature (or anything that leaves zero features)
//! are terminal; failures on secondary features are logged and skipped.

use crate::kernel::KernelOpError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConvertError {
    /// The drawing source could not be read or was corrupt.
    #[error("failed to load drawing source: {0}")]
    Load(String),

    /// The drawing yielded zero curve entities.
    #[error("no geometric entities found in drawing")]
    NoGeometry,

    /// Chaining produced no profiles at all.
    #[error("no valid profiles detected from {edge_count} edges")]
    NoProfile { edge_count: usize },

    /// The builder was handed an empty feature list.
    #[error("no features to build")]
    NoFeatures,

    /// A profile required to be closed was not.
    #[error("profile not closed (gap: {gap:.3}mm, tolerance: {tolerance}mm)")]
    ClosureValidation { gap: f64, tolerance: f64 },

    /// A profile has too few edges to bound any area.
    #[error("profile has only {edge_count} edges (minimum {min_edges} required)")]
    DegenerateProfile { edge_count: usize, min_edges: usize },

    /// Loft/sweep directives need more profiles than the drawing provided.
    #[error("{operation} requires at least {required} profiles, found {found}")]
    InsufficientProfiles {
        operation: &'static str,
        required: usize,
        found: usize,
    },

    /// A feature carried an operation the builder has no handling for.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// The operation is recognized but deliberately not built (loft/sweep
    /// under the reject policy).
    #[error("{operation} is not supported by the model builder: {detail}")]
    UnsupportedOperation {
        operation: &'static str,
        detail: &'static str,
    },

    /// Profile sampling produced fewer than 3 usable sketch points.
    #[error("sketch creation failed: {0}")]
    SketchCreation(String),

    /// A revolve feature carried parameters outside the accepted range.
    #[error("revolve failed: {0}")]
    InvalidRevolve(String),

    /// The geometry kernel reported a failure.
    #[error("kernel operation failed: {0}")]
    Kernel(#[from] KernelOpError),
}
