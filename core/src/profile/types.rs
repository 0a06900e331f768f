//! Reconstructed 2D profiles and their metrics.

use crate::config::Config;
use crate::drawing::{CurveEntity, CurveGeometry};
use crate::error::ConvertError;
use crate::geometry::{polygon_area, vertex_centroid, Point2D};
use std::f64::consts::PI;

/// A reconstructed 2D contour intended to become a sketch.
///
/// Created once by chaining, immutable afterwards. `is_outer` is assigned
/// only after all profiles of a job are known: the largest closed area
/// wins the outer role. That is a heuristic ranking, not a topological
/// containment proof.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    /// Ordered member edges, in chain order with original orientation.
    pub edges: Vec<CurveEntity>,
    pub is_outer: bool,
    pub is_closed: bool,
    /// Distance between the first and last assembled point (mm).
    pub closure_gap: f64,
    pub area: f64,
    pub centroid: Point2D,
}

impl Profile {
    pub fn new(edges: Vec<CurveEntity>) -> Self {
        Self {
            edges,
            is_outer: true,
            is_closed: false,
            closure_gap: 0.0,
            area: 0.0,
            centroid: Point2D::new(0.0, 0.0),
        }
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// The endpoint sequence used for metrics: each edge contributes its
    /// start point, then its end point unless identical to the start
    /// (circles and zero-length edges contribute one point).
    ///
    /// Edges appended to a chain tail-first keep their stored orientation
    /// here; the conceptual reversal during chaining only steered the
    /// scan. Carried source behavior.
    pub fn point_sequence(&self) -> Vec<Point2D> {
        let mut points = Vec::new();
        for edge in &self.edges {
            let start = edge.start_point();
            if let Some(s) = start {
                points.push(s);
            }
            if let Some(e) = edge.end_point() {
                if start != Some(e) {
                    points.push(e);
                }
            }
        }
        points
    }

    /// Compute area, centroid, closure gap and the closed flag.
    ///
    /// Single-edge loops (circle, closed polyline) get exact metrics;
    /// chained profiles use the shoelace formula over the endpoint
    /// sequence once it has at least `min_profile_edges` points.
    pub fn compute_metrics(&mut self, config: &Config) {
        if self.edges.is_empty() {
            return;
        }

        if self.edges.len() == 1 {
            match &self.edges[0].geometry {
                CurveGeometry::Circle { center, radius } => {
                    self.area = PI * radius * radius;
                    self.centroid = *center;
                    self.closure_gap = 0.0;
                    self.is_closed = true;
                    return;
                }
                CurveGeometry::Polyline { vertices, closed: true } => {
                    self.area = polygon_area(vertices);
                    self.centroid = vertex_centroid(vertices);
                    self.closure_gap = 0.0;
                    self.is_closed = true;
                    return;
                }
                _ => {}
            }
        }

        let points = self.point_sequence();
        if points.len() >= config.min_profile_edges {
            self.area = polygon_area(&points);
            self.centroid = vertex_centroid(&points);
            let first = points[0];
            let last = points[points.len() - 1];
            self.closure_gap = first.distance_to(last);
            self.is_closed = self.closure_gap < config.profile_closure_tolerance;
        }
    }

    /// Check that this profile can bound a region.
    ///
    /// Single-edge circle and polyline profiles are closed by
    /// construction and always pass. Everything else must have enough
    /// edges and a closure gap under tolerance.
    pub fn validate_closure(&self, config: &Config) -> Result<(), ConvertError> {
        if self.edges.is_empty() {
            return Err(ConvertError::DegenerateProfile {
                edge_count: 0,
                min_edges: config.min_profile_edges,
            });
        }

        if self.edges.len() == 1 {
            if matches!(
                self.edges[0].geometry,
                CurveGeometry::Circle { .. } | CurveGeometry::Polyline { .. }
            ) {
                return Ok(());
            }
        }

        if self.edges.len() < config.min_profile_edges {
            return Err(ConvertError::DegenerateProfile {
                edge_count: self.edges.len(),
                min_edges: config.min_profile_edges,
            });
        }

        if !self.is_closed {
            return Err(ConvertError::ClosureValidation {
                gap: self.closure_gap,
                tolerance: config.profile_closure_tolerance,
            });
        }

        Ok(())
    }
}
