use super::{AnnotationSet, OperationDirective};
use crate::drawing::{DimensionAnnotation, TextAnnotation};
use crate::geometry::Point2D;
use regex::Regex;
use tracing::debug;

/// Rule-based annotation parser.
///
/// Patterns are compiled once per extractor and matched case-insensitively
/// by uppercasing the content first. Numbers are unsigned decimals
/// (`\d+\.?\d*`): negative values never parse, matching the source
/// behavior this pipeline reconstructs.
pub struct AnnotationExtractor {
    depth_re: Regex,
    angle_re: Regex,
    axis_re: Regex,
}

impl AnnotationExtractor {
    pub fn new() -> Self {
        // Alternation order matters: DEPTH must be tried before bare D.
        Self {
            depth_re: Regex::new(r"(?:DEPTH|D|EXTRUDE)[\s:=]+(\d+\.?\d*)")
                .expect("depth pattern is valid"),
            angle_re: Regex::new(r"ANGLE[\s:=]+(\d+\.?\d*)").expect("angle pattern is valid"),
            axis_re: Regex::new(r"AXIS[\s:=]+\((\d+\.?\d*),\s*(\d+\.?\d*)\)")
                .expect("axis pattern is valid"),
        }
    }

    /// Fold all annotation entities into a directive set.
    ///
    /// Never fails: unmatched text entities contribute nothing, and a
    /// dimension whose text is not numeric is skipped.
    pub fn extract(
        &self,
        texts: &[TextAnnotation],
        dimensions: &[DimensionAnnotation],
    ) -> AnnotationSet {
        let mut set = AnnotationSet::default();

        for text in texts {
            let content = text.content.to_uppercase();

            if let Some(depth) = self.capture_number(&self.depth_re, &content) {
                debug!(depth, x = text.position.x, y = text.position.y, "found depth annotation");
                set.depth = Some(depth);
            }

            // One operation keyword per text entity; first keyword in this
            // priority order wins within the entity, last entity wins
            // across the document.
            if content.contains("REVOLVE") {
                set.operation = Some(OperationDirective::Revolve);
                debug!("found REVOLVE directive");
            } else if content.contains("LOFT") {
                set.operation = Some(OperationDirective::Loft);
                debug!("found LOFT directive");
            } else if content.contains("SWEEP") {
                set.operation = Some(OperationDirective::Sweep);
                debug!("found SWEEP directive");
            } else if content.contains("CUT") || content.contains("HOLE") {
                set.operation = Some(OperationDirective::Cut);
                debug!("found CUT directive");
            } else if content.contains("BOSS") || content.contains("PROTRUSION") {
                set.operation = Some(OperationDirective::Add);
                debug!("found ADD directive");
            } else if content.contains("BASE") {
                set.base_feature_marker = true;
                debug!("found BASE feature marker");
            }

            // Angle and axis parsing run on every entity, independent of
            // the operation keyword chain: "REVOLVE", "ANGLE: 180" and
            // "AXIS: (5, 0)" are usually separate text placements.
            if let Some(angle) = self.capture_number(&self.angle_re, &content) {
                set.revolve_angle = Some(angle);
                debug!(angle, "found angle annotation");
            }
            if let Some(caps) = self.axis_re.captures(&content) {
                let x = caps[1].parse::<f64>();
                let y = caps[2].parse::<f64>();
                if let (Ok(x), Ok(y)) = (x, y) {
                    set.axis = Some(Point2D::new(x, y));
                    debug!(x, y, "found axis annotation");
                }
            }
        }

        for dim in dimensions {
            if let Ok(value) = dim.text.trim().parse::<f64>() {
                set.dimension_values.push(value);
            }
        }

        debug!(
            depth = ?set.depth,
            operation = ?set.operation,
            dimensions = set.dimension_values.len(),
            "annotation extraction complete"
        );
        set
    }

    fn capture_number(&self, re: &Regex, content: &str) -> Option<f64> {
        re.captures(content).and_then(|caps| caps[1].parse::<f64>().ok())
    }
}

impl Default for AnnotationExtractor {
    fn default() -> Self {
        Self::new()
    }
}
