//! Kernel abstraction layer for solid-geometry operations.
//!
//! The reconstruction pipeline never talks to a concrete CAD kernel
//! directly; it goes through [`GeometryKernel`] so the implementation can
//! be swapped (Truck today, another kernel or a test double tomorrow)
//! without touching the pipeline.

mod truck;


pub use truck::TruckKernel;

use crate::geometry::{Point2D, Point3D};
use std::path::Path;
use thiserror::Error;

/// Errors surfaced by kernel operations.
///
/// Every kernel capability may fail; failures must come back as values,
/// never as panics, so the builder can skip secondary features.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum KernelOpError {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("operation failed: {0}")]
    OperationFailed(String),

    #[error("export failed: {0}")]
    ExportFailed(String),
}

/// Result type for kernel operations.
pub type KernelResult<T> = Result<T, KernelOpError>;

/// Abstract interface over the solid-modeling kernel.
///
/// The seven operations the pipeline needs: two sketch constructors, the
/// two sweep operations, the two booleans, and export. Angles are in
/// degrees at this boundary because that is what annotations carry.
pub trait GeometryKernel: Send + Sync {
    /// Planar sketch ready to be swept into a solid.
    type Sketch;

    /// The kernel's solid representation.
    type Solid;

    /// Build a planar sketch from a polygonal outline.
    ///
    /// `closed` indicates whether the outline already returns to its first
    /// point; when false the kernel closes it with a final segment.
    fn sketch_from_polygon(&self, points: &[Point2D], closed: bool) -> KernelResult<Self::Sketch>;

    /// Build a circular sketch directly, preserving cylindrical topology.
    fn sketch_from_circle(&self, center: Point2D, radius: f64) -> KernelResult<Self::Sketch>;

    /// Extrude a sketch along the sketch-plane normal, starting `z_start`
    /// above the sketch plane and sweeping by `depth`.
    ///
    /// Boolean tools pass a negative `z_start` and an enlarged depth so
    /// they pierce both faces of the solid they modify; tools flush with
    /// the solid leave coincident faces the booleans cannot resolve.
    fn extrude(&self, sketch: &Self::Sketch, z_start: f64, depth: f64)
        -> KernelResult<Self::Solid>;

    /// Revolve a sketch by `angle_deg` degrees around the axis through
    /// `axis_a` and `axis_b`.
    fn revolve(
        &self,
        sketch: &Self::Sketch,
        angle_deg: f64,
        axis_a: Point3D,
        axis_b: Point3D,
    ) -> KernelResult<Self::Solid>;

    /// Union of two solids (A ∪ B).
    fn boolean_union(&self, a: &Self::Solid, b: &Self::Solid) -> KernelResult<Self::Solid>;

    /// Difference of two solids (A − B).
    fn boolean_cut(&self, a: &Self::Solid, b: &Self::Solid) -> KernelResult<Self::Solid>;

    /// Export a solid as a STEP file at `destination`.
    fn export_step(&self, solid: &Self::Solid, destination: &Path) -> KernelResult<()>;
}
