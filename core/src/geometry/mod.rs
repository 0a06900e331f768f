//! Shared 2D/3D value types and small geometry helpers.
//!
//! Pure functions only; every pipeline stage that needs point math goes
//! through here so tolerances are applied consistently.

use serde::{Deserialize, Serialize};

/// A 2D point in drawing space (mm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point2D) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Linear interpolation: `t = 0` gives `self`, `t = 1` gives `other`.
    pub fn lerp(&self, other: Point2D, t: f64) -> Point2D {
        Point2D::new(self.x + t * (other.x - self.x), self.y + t * (other.y - self.y))
    }
}

impl From<[f64; 2]> for Point2D {
    fn from(arr: [f64; 2]) -> Self {
        Self::new(arr[0], arr[1])
    }
}

/// A 3D point in world space (mm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Unsigned polygon area via the shoelace formula.
///
/// The vertex sequence is treated as implicitly closed (last connects back
/// to first). Degenerate sequences (< 3 vertices) report zero area.
pub fn polygon_area(points: &[Point2D]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for i in 0..points.len() {
        let j = (i + 1) % points.len();
        acc += points[i].x * points[j].y;
        acc -= points[j].x * points[i].y;
    }
    acc.abs() / 2.0
}

/// Arithmetic mean of a vertex sequence.
///
/// This is the vertex centroid, not the area centroid; profile
/// classification only needs a representative interior-ish point.
pub fn vertex_centroid(points: &[Point2D]) -> Point2D {
    if points.is_empty() {
        return Point2D::new(0.0, 0.0);
    }
    let n = points.len() as f64;
    let cx = points.iter().map(|p| p.x).sum::<f64>() / n;
    let cy = points.iter().map(|p| p.y).sum::<f64>() / n;
    Point2D::new(cx, cy)
}
