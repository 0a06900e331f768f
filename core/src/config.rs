//! Conversion configuration: tolerances, approximation settings, defaults,
//! and the policy knobs for behaviors that are deliberately configurable.
//!
//! A `Config` is an immutable value injected into each pipeline run. It is
//! never a process-global: batch conversions run with independent configs
//! without interfering.

use serde::{Deserialize, Serialize};

/// What to do with an edge chain that reached the minimum edge count but
/// never returned to its starting point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ChainAcceptance {
    /// Emit the chain as a profile and record the closure gap as a
    /// diagnostic. This matches the historical behavior: closure is a
    /// flag, not a filter.
    #[default]
    AcceptOpen,
    /// Drop chains whose closure gap exceeds the closure tolerance.
    RequireClosed,
}

/// What feature detection does when a loft/sweep directive arrives with
/// fewer profiles than the operation needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InsufficientProfilePolicy {
    /// Fail detection with `ConvertError::InsufficientProfiles`.
    #[default]
    FailHard,
    /// Downgrade the job to a plain extrude of the detected profiles.
    FallBackToExtrude,
}

/// What the model builder does with a loft or sweep base feature, which the
/// kernel integration does not fully support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum UnsupportedOperationPolicy {
    /// Refuse the build with an explicit unsupported-operation error.
    #[default]
    Reject,
    /// Extrude the first profile at the feature depth instead.
    DegradeToExtrude,
}

/// Tolerances and defaults for one conversion run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Maximum endpoint gap (mm) bridged when chaining disconnected edges.
    pub edge_connection_tolerance: f64,
    /// Maximum first-to-last gap (mm) for a profile to count as closed.
    pub profile_closure_tolerance: f64,
    /// Two points closer than this (mm) collapse to one during sampling.
    pub point_coincidence_tolerance: f64,

    /// Segments used to approximate an arc as a polyline.
    pub arc_segments: usize,
    /// Segments per control-point pair when approximating a spline.
    pub spline_segments: usize,

    /// Extrusion depth (mm) when no depth annotation is present.
    pub default_extrude_depth: f64,
    /// Revolve sweep (degrees) when no angle annotation is present.
    pub default_revolve_angle: f64,

    /// Minimum edges for a chain to become a profile.
    pub min_profile_edges: usize,

    /// When true, unclosed profiles abort (base) or skip (secondary) the
    /// corresponding feature build.
    pub strict_validation: bool,

    pub chain_acceptance: ChainAcceptance,
    pub insufficient_profiles: InsufficientProfilePolicy,
    pub unsupported_operations: UnsupportedOperationPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            edge_connection_tolerance: 0.1,
            profile_closure_tolerance: 0.01,
            point_coincidence_tolerance: 0.01,
            arc_segments: 16,
            spline_segments: 20,
            default_extrude_depth: 10.0,
            default_revolve_angle: 360.0,
            min_profile_edges: 3,
            strict_validation: true,
            chain_acceptance: ChainAcceptance::default(),
            insufficient_profiles: InsufficientProfilePolicy::default(),
            unsupported_operations: UnsupportedOperationPolicy::default(),
        }
    }
}

impl Config {
    /// Override the default extrusion depth, e.g. from a CLI argument.
    pub fn with_default_depth(mut self, depth: f64) -> Self {
        self.default_extrude_depth = depth;
        self
    }
}
