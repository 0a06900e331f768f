//! Combining profiles and directives into the ordered feature list.

use super::{Feature, Operation};
use crate::annotations::{AnnotationSet, OperationDirective};
use crate::config::{Config, InsufficientProfilePolicy};
use crate::error::ConvertError;
use crate::profile::Profile;
use tracing::{debug, warn};

/// Resolve profiles + annotations into features, base first.
///
/// Requires at least one profile. Output order is profile order, which is
/// descending area because chaining already sorted: the largest profile
/// drives the base feature.
pub fn detect_features(
    profiles: &[Profile],
    annotations: &AnnotationSet,
    config: &Config,
) -> Result<Vec<Feature>, ConvertError> {
    if profiles.is_empty() {
        return Err(ConvertError::NoProfile { edge_count: 0 });
    }

    let depth = annotations.depth.unwrap_or(config.default_extrude_depth);

    match annotations.operation {
        Some(OperationDirective::Revolve) => {
            let angle_deg = annotations.revolve_angle.unwrap_or(config.default_revolve_angle);
            let axis = annotations.axis;
            debug!(angle_deg, ?axis, "base feature: revolve");
            Ok(vec![Feature::base(0, Operation::Revolve { angle_deg, axis })])
        }

        Some(OperationDirective::Loft) => {
            if profiles.len() < 2 {
                return insufficient("loft", profiles, depth, config);
            }
            let section_profiles: Vec<usize> = (1..profiles.len()).collect();
            debug!(sections = section_profiles.len() + 1, "base feature: loft");
            Ok(vec![Feature::base(0, Operation::Loft { depth, section_profiles })])
        }

        Some(OperationDirective::Sweep) => {
            if profiles.len() < 2 {
                return insufficient("sweep", profiles, depth, config);
            }
            // First profile is the cross-section, second is the path.
            debug!("base feature: sweep");
            Ok(vec![Feature::base(0, Operation::Sweep { depth, path_profile: 1 })])
        }

        // No directive, or cut/add: the base is always an extrusion and
        // the directive only selects the secondary boolean.
        other => {
            debug!(depth, "base feature: extrude");
            Ok(extrude_features(profiles, depth, other))
        }
    }
}

/// Base extrusion plus one secondary feature per remaining profile.
///
/// Every secondary shares the one global directive (`cut` unless the
/// directive said `add`) and the base depth. One job cannot mix cut and
/// add; a carried limitation of the single-directive annotation scheme.
fn extrude_features(
    profiles: &[Profile],
    depth: f64,
    directive: Option<OperationDirective>,
) -> Vec<Feature> {
    let mut features = vec![Feature::base(0, Operation::Extrude { depth })];
    let secondary_op = match directive {
        Some(OperationDirective::Add) => Operation::Add { depth },
        _ => Operation::Cut { depth },
    };
    for index in 1..profiles.len() {
        debug!(profile = index, op = secondary_op.name(), "secondary feature");
        features.push(Feature::secondary(index, secondary_op.clone()));
    }
    features
}

fn insufficient(
    operation: &'static str,
    profiles: &[Profile],
    depth: f64,
    config: &Config,
) -> Result<Vec<Feature>, ConvertError> {
    match config.insufficient_profiles {
        InsufficientProfilePolicy::FailHard => Err(ConvertError::InsufficientProfiles {
            operation,
            required: 2,
            found: profiles.len(),
        }),
        InsufficientProfilePolicy::FallBackToExtrude => {
            warn!(operation, found = profiles.len(), "falling back to extrude");
            Ok(extrude_features(profiles, depth, None))
        }
    }
}
