//! Truck-based implementation of the geometry kernel.
//!
//! This module provides a CAD kernel implementation using the Truck library,
//! which is licensed under Apache-2.0 (MIT-compatible).

use super::{GeometryKernel, KernelOpError, KernelResult};
use crate::geometry::{Point2D, Point3D};
use std::path::Path;

// Use truck's pre-exported types which come from cgmath64
use truck_modeling::{builder, Face, InnerSpace, Point3, Rad, Solid, Vector3, Vertex, Wire};

/// Truck-based CAD kernel implementation.
pub struct TruckKernel {
    /// Tolerance handed to the boolean operations.
    pub tolerance: f64,
}

impl TruckKernel {
    pub fn new() -> Self {
        Self {
            tolerance: 0.01, // 0.01mm precision
        }
    }

    pub fn with_tolerance(tolerance: f64) -> Self {
        Self { tolerance }
    }
}

impl Default for TruckKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometryKernel for TruckKernel {
    type Sketch = Face;
    type Solid = Solid;

    fn sketch_from_polygon(&self, points: &[Point2D], closed: bool) -> KernelResult<Self::Sketch> {
        // A closed outline repeats its first point at the end; the wire is
        // always closed through the first vertex, so drop the repeat.
        let outline = if closed && points.len() > 1 {
            &points[..points.len() - 1]
        } else {
            points
        };

        let wire = build_wire_from_points(outline)?;
        builder::try_attach_plane(&[wire]).map_err(|e| {
            KernelOpError::OperationFailed(format!("failed to create planar face: {e:?}"))
        })
    }

    fn sketch_from_circle(&self, center: Point2D, radius: f64) -> KernelResult<Self::Sketch> {
        if radius <= 0.0 {
            return Err(KernelOpError::InvalidGeometry(format!(
                "circle radius must be positive, got {radius}"
            )));
        }

        let wire = build_circle_wire(center.x, center.y, radius);
        builder::try_attach_plane(&[wire]).map_err(|e| {
            KernelOpError::OperationFailed(format!("failed to create circular face: {e:?}"))
        })
    }

    fn extrude(
        &self,
        sketch: &Self::Sketch,
        z_start: f64,
        depth: f64,
    ) -> KernelResult<Self::Solid> {
        if depth <= 0.0 {
            return Err(KernelOpError::InvalidGeometry(format!(
                "extrusion depth must be positive, got {depth}"
            )));
        }

        let face = if z_start != 0.0 {
            builder::translated(sketch, Vector3::new(0.0, 0.0, z_start))
        } else {
            sketch.clone()
        };
        Ok(builder::tsweep(&face, Vector3::new(0.0, 0.0, depth)))
    }

    fn revolve(
        &self,
        sketch: &Self::Sketch,
        angle_deg: f64,
        axis_a: Point3D,
        axis_b: Point3D,
    ) -> KernelResult<Self::Solid> {
        let origin = Point3::new(axis_a.x, axis_a.y, axis_a.z);
        let direction = Vector3::new(axis_b.x - axis_a.x, axis_b.y - axis_a.y, axis_b.z - axis_a.z);
        if direction.magnitude() < 1e-9 {
            return Err(KernelOpError::InvalidGeometry(
                "revolve axis endpoints are coincident".into(),
            ));
        }
        let axis = direction.normalize();

        // Truck requires an angle beyond 2π to produce a closed shape, so a
        // full revolution sweeps by 7.0 rad rather than exactly 2π.
        let angle = if angle_deg >= 360.0 {
            Rad(7.0)
        } else {
            Rad(angle_deg.to_radians())
        };

        Ok(builder::rsweep(sketch, origin, axis, angle))
    }

    fn boolean_union(&self, a: &Self::Solid, b: &Self::Solid) -> KernelResult<Self::Solid> {
        truck_shapeops::or(a, b, self.tolerance)
            .ok_or_else(|| KernelOpError::OperationFailed("boolean union failed".into()))
    }

    fn boolean_cut(&self, a: &Self::Solid, b: &Self::Solid) -> KernelResult<Self::Solid> {
        // Subtraction is: A - B = A AND (NOT B)
        // Solid::not() mutates in place, so we clone first
        let mut complement_b = b.clone();
        complement_b.not();
        truck_shapeops::and(a, &complement_b, self.tolerance)
            .ok_or_else(|| KernelOpError::OperationFailed("boolean subtraction failed".into()))
    }

    fn export_step(&self, solid: &Self::Solid, destination: &Path) -> KernelResult<()> {
        use truck_stepio::out::{CompleteStepDisplay, StepHeaderDescriptor, StepModels};

        // Solid::compress() is required for STEP export.
        let compressed = solid.compress();
        let models: StepModels<_, _, _> = std::iter::once(&compressed).collect();

        let file_name = destination
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "model.step".to_string());

        let header = StepHeaderDescriptor {
            file_name,
            time_stamp: String::new(),
            authors: Vec::new(),
            organization: Vec::new(),
            organization_system: "truck".to_string(),
            authorization: String::new(),
        };

        let display = CompleteStepDisplay::new(models, header);
        std::fs::write(destination, display.to_string())
            .map_err(|e| KernelOpError::ExportFailed(format!("{}: {e}", destination.display())))
    }
}

/// Build a truck Wire from 2D points (as 3D with z=0), closed through the
/// first vertex.
fn build_wire_from_points(points: &[Point2D]) -> KernelResult<Wire> {
    if points.len() < 3 {
        return Err(KernelOpError::InvalidGeometry(
            "wire requires at least 3 points".into(),
        ));
    }

    let mut vertices: Vec<Vertex> = points
        .iter()
        .map(|p| builder::vertex(Point3::new(p.x, p.y, 0.0)))
        .collect();
    vertices.push(vertices[0].clone());

    let mut edges = Vec::with_capacity(vertices.len() - 1);
    for i in 0..vertices.len() - 1 {
        edges.push(builder::line(&vertices[i], &vertices[i + 1]));
    }

    Ok(Wire::from_iter(edges))
}

/// Build a circular wire using rsweep (rotational sweep of a vertex).
/// This creates a true circle edge, preserving cylindrical topology on
/// extrusion.
fn build_circle_wire(cx: f64, cy: f64, radius: f64) -> Wire {
    let start_point = Point3::new(cx + radius, cy, 0.0);
    let center_point = Point3::new(cx, cy, 0.0);

    let v: Vertex = builder::vertex(start_point);

    // Truck requires angle > 2π for closed shapes (2π ≈ 6.28, so use 7.0).
    builder::rsweep(&v, center_point, Vector3::new(0.0, 0.0, 1.0), Rad(7.0))
}
