//! Free-text annotation parsing into typed build directives.
//!
//! Annotations arrive as loose text placed near the geometry ("DEPTH: 25",
//! "REVOLVE", "AXIS: (5, 0)"). Extraction folds every annotation entity in
//! document order into one immutable [`AnnotationSet`]; later entities
//! overwrite earlier singleton values (last wins), while dimension values
//! accumulate. Malformed text is ignored per entry, never an error.

mod extract;


pub use extract::AnnotationExtractor;

use crate::geometry::Point2D;
use serde::{Deserialize, Serialize};

/// Operation keyword recognized in annotation text.
///
/// `extrude` is the implicit default and therefore has no directive:
/// an absent `operation` means extrude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationDirective {
    Revolve,
    Loft,
    Sweep,
    Cut,
    Add,
}

/// Typed directives distilled from one job's annotations.
///
/// Built once by [`AnnotationExtractor::extract`], read-only afterwards.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnnotationSet {
    /// Extrusion depth in mm ("DEPTH: 25", "D=25", "EXTRUDE 25").
    pub depth: Option<f64>,
    pub operation: Option<OperationDirective>,
    /// Revolve sweep in degrees ("ANGLE: 180").
    pub revolve_angle: Option<f64>,
    /// Revolve axis anchor: the vertical line through this XY point.
    pub axis: Option<Point2D>,
    /// A text entity contained "BASE".
    pub base_feature_marker: bool,
    /// Numeric dimension texts, in document order. Collected for
    /// diagnostics; not consumed by feature detection.
    pub dimension_values: Vec<f64>,
}
