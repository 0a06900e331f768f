//! Converting the ordered feature list into kernel calls.
//!
//! The builder owns sketch construction (profile → point polyline →
//! kernel sketch) and the base/secondary build order. The base feature is
//! built first; its failure aborts the whole run. Each secondary feature
//! is built and applied as a boolean in isolation: a failure there is
//! logged and the feature skipped, never corrupting the running solid.

mod sample;

#[cfg(test)]
mod tests_build;

pub use sample::{approximate_arc, approximate_spline, sample_profile_points};

use crate::config::{Config, UnsupportedOperationPolicy};
use crate::drawing::CurveGeometry;
use crate::error::ConvertError;
use crate::features::{Feature, Operation};
use crate::geometry::Point3D;
use crate::kernel::GeometryKernel;
use crate::profile::Profile;
use tracing::{debug, warn};

/// How far a boolean tool extends past each face of the solid it modifies
/// (mm). Tools flush with the solid leave coincident faces that the
/// boolean operations cannot resolve, so tools always pierce through.
const TOOL_OVERSHOOT: f64 = 1.0;

/// Result of a successful build: the finished solid plus the warnings
/// accumulated while skipping failed secondary features.
pub struct BuildReport<S> {
    pub solid: S,
    pub warnings: Vec<ConvertError>,
}

pub struct ModelBuilder<'a, K: GeometryKernel> {
    kernel: &'a K,
    config: &'a Config,
}

impl<'a, K: GeometryKernel> ModelBuilder<'a, K> {
    pub fn new(kernel: &'a K, config: &'a Config) -> Self {
        Self { kernel, config }
    }

    /// Build the base feature, then fold every secondary feature into it.
    pub fn build(
        &self,
        features: &[Feature],
        profiles: &[Profile],
    ) -> Result<BuildReport<K::Solid>, ConvertError> {
        let Some(base) = features.first() else {
            return Err(ConvertError::NoFeatures);
        };

        let base_profile = self.profile_for(base, profiles)?;

        if self.config.strict_validation {
            base_profile.validate_closure(self.config)?;
        }

        let mut solid = self.build_base(base, base_profile, profiles)?;
        debug!(operation = base.operation.name(), "base feature built");

        let mut warnings = Vec::new();
        for (index, feature) in features.iter().enumerate().skip(1) {
            match self.apply_secondary(feature, profiles, &solid) {
                Ok(next) => {
                    debug!(index, operation = feature.operation.name(), "secondary feature applied");
                    solid = next;
                }
                Err(err) => {
                    warn!(index, %err, "skipping secondary feature");
                    warnings.push(err);
                }
            }
        }

        Ok(BuildReport { solid, warnings })
    }

    fn build_base(
        &self,
        feature: &Feature,
        profile: &Profile,
        profiles: &[Profile],
    ) -> Result<K::Solid, ConvertError> {
        match &feature.operation {
            Operation::Extrude { depth } => {
                let sketch = self.sketch_for(profile)?;
                Ok(self.kernel.extrude(&sketch, 0.0, *depth)?)
            }

            Operation::Revolve { angle_deg, axis } => {
                self.validate_revolve(profile, *angle_deg, *axis)?;
                let sketch = self.sketch_for(profile)?;
                // No axis annotation: revolve about the Y axis through
                // the origin. Otherwise: the vertical (Z-direction) line
                // through the given XY point.
                let (a, b) = match axis {
                    Some(p) => {
                        (Point3D::new(p.x, p.y, 0.0), Point3D::new(p.x, p.y, 1.0))
                    }
                    None => (Point3D::new(0.0, 0.0, 0.0), Point3D::new(0.0, 1.0, 0.0)),
                };
                Ok(self.kernel.revolve(&sketch, *angle_deg, a, b)?)
            }

            Operation::Loft { depth, .. } => self.unsupported("loft", *depth, profile),
            Operation::Sweep { depth, .. } => self.unsupported("sweep", *depth, profile),

            // Cut/add never drive a base feature.
            other => Err(ConvertError::UnknownOperation(other.name().to_string())),
        }
    }

    /// Loft and sweep are kernel-level surface operations this integration
    /// does not provide. Policy decides between an explicit refusal and a
    /// degraded plain extrusion of the driving profile.
    fn unsupported(
        &self,
        operation: &'static str,
        depth: f64,
        profile: &Profile,
    ) -> Result<K::Solid, ConvertError> {
        match self.config.unsupported_operations {
            UnsupportedOperationPolicy::Reject => Err(ConvertError::UnsupportedOperation {
                operation,
                detail: "requires multi-plane surface generation",
            }),
            UnsupportedOperationPolicy::DegradeToExtrude => {
                warn!(operation, depth, "degrading unsupported operation to extrude");
                let sketch = self.sketch_for(profile)?;
                Ok(self.kernel.extrude(&sketch, 0.0, depth)?)
            }
        }
    }

    fn apply_secondary(
        &self,
        feature: &Feature,
        profiles: &[Profile],
        solid: &K::Solid,
    ) -> Result<K::Solid, ConvertError> {
        let profile = self.profile_for(feature, profiles)?;

        if self.config.strict_validation {
            profile.validate_closure(self.config)?;
        }

        match &feature.operation {
            Operation::Cut { depth } => {
                let sketch = self.sketch_for(profile)?;
                let tool = self.tool_solid(&sketch, *depth)?;
                Ok(self.kernel.boolean_cut(solid, &tool)?)
            }
            Operation::Add { depth } => {
                let sketch = self.sketch_for(profile)?;
                let tool = self.tool_solid(&sketch, *depth)?;
                Ok(self.kernel.boolean_union(solid, &tool)?)
            }
            other => Err(ConvertError::UnknownOperation(other.name().to_string())),
        }
    }

    /// Extrude a boolean tool so it pierces past both faces of a solid of
    /// the given depth.
    fn tool_solid(&self, sketch: &K::Sketch, depth: f64) -> Result<K::Solid, ConvertError> {
        Ok(self
            .kernel
            .extrude(sketch, -TOOL_OVERSHOOT, depth + 2.0 * TOOL_OVERSHOOT)?)
    }

    /// Construct a kernel sketch for one profile.
    ///
    /// Circles and standalone polylines go to the kernel directly; chained
    /// profiles are sampled into a polyline first.
    fn sketch_for(&self, profile: &Profile) -> Result<K::Sketch, ConvertError> {
        if profile.edges.len() == 1 {
            match &profile.edges[0].geometry {
                CurveGeometry::Circle { center, radius } => {
                    return Ok(self.kernel.sketch_from_circle(*center, *radius)?);
                }
                CurveGeometry::Polyline { vertices, .. } => {
                    if vertices.len() < 3 {
                        return Err(ConvertError::SketchCreation(format!(
                            "polyline has insufficient points ({} < 3)",
                            vertices.len()
                        )));
                    }
                    let closed = vertices
                        .first()
                        .zip(vertices.last())
                        .is_some_and(|(f, l)| {
                            f.distance_to(*l) < self.config.point_coincidence_tolerance
                        });
                    return Ok(self.kernel.sketch_from_polygon(vertices, closed)?);
                }
                _ => {}
            }
        }

        let points = sample_profile_points(profile, self.config);
        if points.len() < 3 {
            return Err(ConvertError::SketchCreation(format!(
                "insufficient unique points after sampling ({} < 3)",
                points.len()
            )));
        }
        let closed = points[0].distance_to(points[points.len() - 1])
            < self.config.point_coincidence_tolerance;
        Ok(self.kernel.sketch_from_polygon(&points, closed)?)
    }

    fn validate_revolve(
        &self,
        profile: &Profile,
        angle_deg: f64,
        axis: Option<crate::geometry::Point2D>,
    ) -> Result<(), ConvertError> {
        // Revolve needs a closed section regardless of the strict flag.
        profile
            .validate_closure(self.config)
            .map_err(|err| ConvertError::InvalidRevolve(err.to_string()))?;

        if angle_deg <= 0.0 || angle_deg > 360.0 {
            return Err(ConvertError::InvalidRevolve(format!(
                "invalid angle ({angle_deg}°), must be in range (0, 360]"
            )));
        }

        if let Some(p) = axis {
            if p.x.abs() > 10_000.0 || p.y.abs() > 10_000.0 {
                return Err(ConvertError::InvalidRevolve(format!(
                    "axis anchor ({}, {}) is unreasonably far from the drawing",
                    p.x, p.y
                )));
            }
        }

        Ok(())
    }

    fn profile_for<'p>(
        &self,
        feature: &Feature,
        profiles: &'p [Profile],
    ) -> Result<&'p Profile, ConvertError> {
        profiles.get(feature.profile).ok_or_else(|| {
            ConvertError::SketchCreation(format!(
                "feature references missing profile {}",
                feature.profile
            ))
        })
    }
}
