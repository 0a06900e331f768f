use crate::geometry::Point2D;
use serde::{Deserialize, Serialize};

/// Role of a feature within one job.
///
/// Exactly one base feature exists per job; everything else is a boolean
/// modification applied against the base solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureRole {
    Base,
    Secondary,
}

/// Build operation with its operation-specific parameters.
///
/// A sum type so revolve-only fields (angle, axis) and loft/sweep-only
/// fields (section/path profiles) cannot coexist by construction.
/// Profile references are indices into the job's profile list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    Extrude {
        depth: f64,
    },
    Cut {
        depth: f64,
    },
    Add {
        depth: f64,
    },
    Revolve {
        angle_deg: f64,
        /// Anchor of the vertical revolve axis; `None` means the default
        /// Y axis through the origin.
        axis: Option<Point2D>,
    },
    Loft {
        /// Annotated depth, used when the operation is degraded to a
        /// plain extrusion.
        depth: f64,
        section_profiles: Vec<usize>,
    },
    Sweep {
        /// Annotated depth, used when the operation is degraded to a
        /// plain extrusion.
        depth: f64,
        path_profile: usize,
    },
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Extrude { .. } => "extrude",
            Operation::Cut { .. } => "cut",
            Operation::Add { .. } => "add",
            Operation::Revolve { .. } => "revolve",
            Operation::Loft { .. } => "loft",
            Operation::Sweep { .. } => "sweep",
        }
    }

    /// Linear depth for every operation except revolve.
    pub fn depth(&self) -> Option<f64> {
        match self {
            Operation::Extrude { depth }
            | Operation::Cut { depth }
            | Operation::Add { depth }
            | Operation::Loft { depth, .. }
            | Operation::Sweep { depth, .. } => Some(*depth),
            Operation::Revolve { .. } => None,
        }
    }
}

/// One entry of the ordered feature list.
///
/// Created once by feature detection, consumed exactly once by the model
/// builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Index of the driving profile in the job's profile list.
    pub profile: usize,
    pub operation: Operation,
    pub role: FeatureRole,
}

impl Feature {
    pub fn base(profile: usize, operation: Operation) -> Self {
        Self { profile, operation, role: FeatureRole::Base }
    }

    pub fn secondary(profile: usize, operation: Operation) -> Self {
        Self { profile, operation, role: FeatureRole::Secondary }
    }
}
