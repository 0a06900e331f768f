//! Typed records yielded by the drawing source for one conversion job.
//!
//! The raw drawing-exchange format (DXF or otherwise) is parsed by an
//! external collaborator; this module is the contract it fills in. A
//! [`DrawingDocument`] carries curve entities and annotation entities in
//! document order, which is meaning-bearing: later annotations overwrite
//! earlier ones during extraction.

use crate::geometry::Point2D;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Geometric payload of a 2D curve primitive.
///
/// Arc angles are in degrees, measured counter-clockwise from the positive
/// X axis, matching drawing-exchange conventions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CurveGeometry {
    Line {
        start: Point2D,
        end: Point2D,
    },
    Arc {
        center: Point2D,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    Circle {
        center: Point2D,
        radius: f64,
    },
    Spline {
        control_points: Vec<Point2D>,
    },
    Polyline {
        vertices: Vec<Point2D>,
        #[serde(default)]
        closed: bool,
    },
}

/// One curve primitive extracted from the drawing.
///
/// Owned by the pipeline for the duration of one conversion and immutable
/// once extracted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveEntity {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub geometry: CurveGeometry,
}

impl CurveEntity {
    pub fn new(geometry: CurveGeometry) -> Self {
        Self { id: Uuid::new_v4(), geometry }
    }

    pub fn line(start: Point2D, end: Point2D) -> Self {
        Self::new(CurveGeometry::Line { start, end })
    }

    pub fn arc(center: Point2D, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Self::new(CurveGeometry::Arc { center, radius, start_angle, end_angle })
    }

    pub fn circle(center: Point2D, radius: f64) -> Self {
        Self::new(CurveGeometry::Circle { center, radius })
    }

    pub fn spline(control_points: Vec<Point2D>) -> Self {
        Self::new(CurveGeometry::Spline { control_points })
    }

    pub fn polyline(vertices: Vec<Point2D>, closed: bool) -> Self {
        Self::new(CurveGeometry::Polyline { vertices, closed })
    }

    /// Derived start point of the curve.
    ///
    /// A circle has no true endpoints; its center stands in for both so
    /// that point-sequence assembly still sees one representative point.
    /// `None` means the entity is degenerate (empty spline/polyline) and
    /// can never participate in chaining.
    pub fn start_point(&self) -> Option<Point2D> {
        match &self.geometry {
            CurveGeometry::Line { start, .. } => Some(*start),
            CurveGeometry::Arc { center, radius, start_angle, .. } => {
                Some(arc_point(*center, *radius, *start_angle))
            }
            CurveGeometry::Circle { center, .. } => Some(*center),
            CurveGeometry::Spline { control_points } => control_points.first().copied(),
            CurveGeometry::Polyline { vertices, .. } => vertices.first().copied(),
        }
    }

    /// Derived end point of the curve (see [`CurveEntity::start_point`]).
    pub fn end_point(&self) -> Option<Point2D> {
        match &self.geometry {
            CurveGeometry::Line { end, .. } => Some(*end),
            CurveGeometry::Arc { center, radius, end_angle, .. } => {
                Some(arc_point(*center, *radius, *end_angle))
            }
            CurveGeometry::Circle { center, .. } => Some(*center),
            CurveGeometry::Spline { control_points } => control_points.last().copied(),
            CurveGeometry::Polyline { vertices, .. } => vertices.last().copied(),
        }
    }

    /// True for entities that form a loop on their own: circles, and
    /// polylines flagged closed. These never enter the chaining scan.
    pub fn is_intrinsically_closed(&self) -> bool {
        match &self.geometry {
            CurveGeometry::Circle { .. } => true,
            CurveGeometry::Polyline { closed, .. } => *closed,
            _ => false,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match &self.geometry {
            CurveGeometry::Line { .. } => "LINE",
            CurveGeometry::Arc { .. } => "ARC",
            CurveGeometry::Circle { .. } => "CIRCLE",
            CurveGeometry::Spline { .. } => "SPLINE",
            CurveGeometry::Polyline { .. } => "POLYLINE",
        }
    }
}

/// Point on a circle at `angle_deg` degrees.
pub(crate) fn arc_point(center: Point2D, radius: f64, angle_deg: f64) -> Point2D {
    let angle = angle_deg.to_radians();
    Point2D::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
}

/// A free-text annotation entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnnotation {
    pub content: String,
    pub position: Point2D,
}

impl TextAnnotation {
    pub fn new(content: impl Into<String>, position: Point2D) -> Self {
        Self { content: content.into(), position }
    }
}

/// A dimension entity; only its text payload is consumed, and only when it
/// parses as a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionAnnotation {
    pub text: String,
}

impl DimensionAnnotation {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Everything the drawing source yields for one job, in document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DrawingDocument {
    pub curves: Vec<CurveEntity>,
    #[serde(default)]
    pub texts: Vec<TextAnnotation>,
    #[serde(default)]
    pub dimensions: Vec<DimensionAnnotation>,
}
