//! Polyline approximation of curved profile edges.
//!
//! Arcs are sampled uniformly across their sweep; splines are linearly
//! interpolated between consecutive control points. The spline path is an
//! explicit approximation, not a basis-function fit.

use crate::config::Config;
use crate::drawing::CurveGeometry;
use crate::geometry::Point2D;
use crate::profile::Profile;
use std::f64::consts::TAU;

/// Sample an arc as `segments + 1` points across its start→end sweep.
///
/// End angles numerically below the start angle indicate a sweep crossing
/// the zero direction; a full turn is added so interpolation runs the
/// short way around, never backwards.
pub fn approximate_arc(
    center: Point2D,
    radius: f64,
    start_angle_deg: f64,
    end_angle_deg: f64,
    segments: usize,
) -> Vec<Point2D> {
    let start = start_angle_deg.to_radians();
    let mut end = end_angle_deg.to_radians();
    if end < start {
        end += TAU;
    }

    (0..=segments)
        .map(|i| {
            let t = i as f64 / segments as f64;
            let angle = start + t * (end - start);
            Point2D::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        })
        .collect()
}

/// Sample a spline as straight runs between consecutive control points,
/// `segments` steps per pair plus the final control point.
pub fn approximate_spline(control_points: &[Point2D], segments: usize) -> Vec<Point2D> {
    if control_points.len() < 2 {
        return Vec::new();
    }

    let mut points = Vec::new();
    for pair in control_points.windows(2) {
        for j in 0..segments {
            let t = j as f64 / segments as f64;
            points.push(pair[0].lerp(pair[1], t));
        }
    }
    points.push(control_points[control_points.len() - 1]);
    points
}

/// Flatten a chained profile into a point polyline in edge order,
/// collapsing consecutive points closer than the coincidence tolerance.
pub fn sample_profile_points(profile: &Profile, config: &Config) -> Vec<Point2D> {
    let tolerance = config.point_coincidence_tolerance;
    let mut points: Vec<Point2D> = Vec::new();

    for edge in &profile.edges {
        match &edge.geometry {
            CurveGeometry::Line { start, end } => {
                let coincident =
                    points.last().is_some_and(|last| last.distance_to(*start) <= tolerance);
                if !coincident {
                    points.push(*start);
                }
                points.push(*end);
            }
            CurveGeometry::Arc { center, radius, start_angle, end_angle } => {
                points.extend(approximate_arc(
                    *center,
                    *radius,
                    *start_angle,
                    *end_angle,
                    config.arc_segments,
                ));
            }
            CurveGeometry::Spline { control_points } => {
                points.extend(approximate_spline(control_points, config.spline_segments));
            }
            CurveGeometry::Polyline { vertices, .. } => {
                // Open polylines chained into a profile contribute their
                // full vertex run.
                points.extend(vertices.iter().copied());
            }
            CurveGeometry::Circle { .. } => {
                // Circles are intrinsically closed and never member of a
                // chained profile.
            }
        }
    }

    let mut unique: Vec<Point2D> = Vec::with_capacity(points.len());
    for p in points {
        if unique.last().map_or(true, |last| p.distance_to(*last) > tolerance) {
            unique.push(p);
        }
    }
    unique
}
