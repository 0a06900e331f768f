use super::{approximate_arc, approximate_spline, sample_profile_points, ModelBuilder, TOOL_OVERSHOOT};
use crate::config::{Config, UnsupportedOperationPolicy};
use crate::drawing::CurveEntity;
use crate::error::ConvertError;
use crate::features::{Feature, Operation};
use crate::geometry::{Point2D, Point3D};
use crate::kernel::{GeometryKernel, KernelOpError, KernelResult};
use crate::profile::{chain_profiles, Profile};
use std::path::Path;

fn pt(x: f64, y: f64) -> Point2D {
    Point2D::new(x, y)
}

#[derive(Debug, Clone, PartialEq)]
enum MockSketch {
    Polygon { points: Vec<Point2D>, closed: bool },
    Circle { center: Point2D, radius: f64 },
}

#[derive(Debug, Clone, PartialEq)]
enum MockSolid {
    Extruded { sketch: MockSketch, z_start: f64, depth: f64 },
    Revolved { angle_deg: f64, axis_a: Point3D, axis_b: Point3D },
    Cut { base: Box<MockSolid>, tool: Box<MockSolid> },
    Union { base: Box<MockSolid>, tool: Box<MockSolid> },
}

/// Records the calls it receives instead of doing any solid math.
struct MockKernel;

impl GeometryKernel for MockKernel {
    type Sketch = MockSketch;
    type Solid = MockSolid;

    fn sketch_from_polygon(&self, points: &[Point2D], closed: bool) -> KernelResult<MockSketch> {
        if points.len() < 3 {
            return Err(KernelOpError::InvalidGeometry("polygon needs 3 points".into()));
        }
        Ok(MockSketch::Polygon { points: points.to_vec(), closed })
    }

    fn sketch_from_circle(&self, center: Point2D, radius: f64) -> KernelResult<MockSketch> {
        Ok(MockSketch::Circle { center, radius })
    }

    fn extrude(&self, sketch: &MockSketch, z_start: f64, depth: f64) -> KernelResult<MockSolid> {
        Ok(MockSolid::Extruded { sketch: sketch.clone(), z_start, depth })
    }

    fn revolve(
        &self,
        _sketch: &MockSketch,
        angle_deg: f64,
        axis_a: Point3D,
        axis_b: Point3D,
    ) -> KernelResult<MockSolid> {
        Ok(MockSolid::Revolved { angle_deg, axis_a, axis_b })
    }

    fn boolean_union(&self, a: &MockSolid, b: &MockSolid) -> KernelResult<MockSolid> {
        Ok(MockSolid::Union { base: Box::new(a.clone()), tool: Box::new(b.clone()) })
    }

    fn boolean_cut(&self, a: &MockSolid, b: &MockSolid) -> KernelResult<MockSolid> {
        Ok(MockSolid::Cut { base: Box::new(a.clone()), tool: Box::new(b.clone()) })
    }

    fn export_step(&self, _solid: &MockSolid, _destination: &Path) -> KernelResult<()> {
        Ok(())
    }
}

fn rectangle_edges(w: f64, h: f64) -> Vec<CurveEntity> {
    vec![
        CurveEntity::line(pt(0.0, 0.0), pt(w, 0.0)),
        CurveEntity::line(pt(w, 0.0), pt(w, h)),
        CurveEntity::line(pt(w, h), pt(0.0, h)),
        CurveEntity::line(pt(0.0, h), pt(0.0, 0.0)),
    ]
}

fn rectangle_profile(w: f64, h: f64) -> Profile {
    let profiles = chain_profiles(&rectangle_edges(w, h), &Config::default());
    profiles.into_iter().next().unwrap()
}

/// Three zero-length edges: passes closure validation (gap 0) but
/// collapses to a single sketch point.
fn degenerate_profile() -> Profile {
    let edges = vec![
        CurveEntity::line(pt(5.0, 5.0), pt(5.0, 5.0)),
        CurveEntity::line(pt(5.0, 5.0), pt(5.0, 5.0)),
        CurveEntity::line(pt(5.0, 5.0), pt(5.0, 5.0)),
    ];
    let mut p = Profile::new(edges);
    p.compute_metrics(&Config::default());
    p
}

#[test]
fn test_base_extrude() {
    let config = Config::default();
    let builder = ModelBuilder::new(&MockKernel, &config);
    let profiles = vec![rectangle_profile(10.0, 10.0)];
    let features = vec![Feature::base(0, Operation::Extrude { depth: 10.0 })];

    let report = builder.build(&features, &profiles).unwrap();
    assert!(report.warnings.is_empty());
    match report.solid {
        MockSolid::Extruded { sketch: MockSketch::Polygon { points, closed }, z_start, depth } => {
            assert_eq!(z_start, 0.0, "base extrusion starts on the sketch plane");
            assert_eq!(depth, 10.0);
            assert!(closed, "tip-to-tail rectangle samples into a closed outline");
            assert!(points.len() >= 4);
        }
        other => panic!("expected extrusion, got {other:?}"),
    }
}

#[test]
fn test_secondary_cut_applies_boolean() {
    let config = Config::default();
    let builder = ModelBuilder::new(&MockKernel, &config);
    let mut circle = Profile::new(vec![CurveEntity::circle(pt(5.0, 5.0), 2.0)]);
    circle.compute_metrics(&config);
    let profiles = vec![rectangle_profile(10.0, 10.0), circle];
    let features = vec![
        Feature::base(0, Operation::Extrude { depth: 25.0 }),
        Feature::secondary(1, Operation::Cut { depth: 25.0 }),
    ];

    let report = builder.build(&features, &profiles).unwrap();
    assert!(report.warnings.is_empty());
    match report.solid {
        MockSolid::Cut { base, tool } => {
            match *base {
                MockSolid::Extruded { z_start, depth, .. } => {
                    assert_eq!(z_start, 0.0);
                    assert_eq!(depth, 25.0);
                }
                other => panic!("expected extruded base, got {other:?}"),
            }
            // The tool must pierce both faces of the base; a flush tool
            // leaves coincident faces the booleans cannot resolve.
            match *tool {
                MockSolid::Extruded { sketch: MockSketch::Circle { .. }, z_start, depth } => {
                    assert_eq!(z_start, -TOOL_OVERSHOOT);
                    assert_eq!(depth, 25.0 + 2.0 * TOOL_OVERSHOOT);
                }
                other => panic!("expected extruded circle tool, got {other:?}"),
            }
        }
        other => panic!("expected boolean cut, got {other:?}"),
    }
}

#[test]
fn test_secondary_add_applies_union() {
    let config = Config::default();
    let builder = ModelBuilder::new(&MockKernel, &config);
    let mut circle = Profile::new(vec![CurveEntity::circle(pt(5.0, 5.0), 2.0)]);
    circle.compute_metrics(&config);
    let profiles = vec![rectangle_profile(10.0, 10.0), circle];
    let features = vec![
        Feature::base(0, Operation::Extrude { depth: 5.0 }),
        Feature::secondary(1, Operation::Add { depth: 5.0 }),
    ];

    let report = builder.build(&features, &profiles).unwrap();
    match report.solid {
        MockSolid::Union { tool, .. } => match *tool {
            MockSolid::Extruded { z_start, depth, .. } => {
                assert_eq!(z_start, -TOOL_OVERSHOOT);
                assert_eq!(depth, 5.0 + 2.0 * TOOL_OVERSHOOT);
            }
            other => panic!("expected extruded tool, got {other:?}"),
        },
        other => panic!("expected boolean union, got {other:?}"),
    }
}

#[test]
fn test_failed_secondary_is_skipped_not_fatal() {
    // A secondary whose sketch collapses to fewer than 3 points is logged
    // and skipped; the final solid is the base alone.
    let config = Config::default();
    let builder = ModelBuilder::new(&MockKernel, &config);
    let profiles = vec![rectangle_profile(10.0, 10.0), degenerate_profile()];
    let features = vec![
        Feature::base(0, Operation::Extrude { depth: 10.0 }),
        Feature::secondary(1, Operation::Cut { depth: 10.0 }),
    ];

    let report = builder.build(&features, &profiles).unwrap();
    assert_eq!(report.warnings.len(), 1);
    assert!(matches!(report.warnings[0], ConvertError::SketchCreation(_)));
    assert!(
        matches!(report.solid, MockSolid::Extruded { .. }),
        "base must survive a skipped secondary"
    );
}

#[test]
fn test_unclosed_secondary_skipped_under_strict_validation() {
    let config = Config::default();
    let builder = ModelBuilder::new(&MockKernel, &config);
    let open_edges = vec![
        CurveEntity::line(pt(0.0, 0.0), pt(4.0, 0.0)),
        CurveEntity::line(pt(4.0, 0.0), pt(4.0, 4.0)),
        CurveEntity::line(pt(4.0, 4.0), pt(0.0, 3.0)),
    ];
    let mut open = Profile::new(open_edges);
    open.compute_metrics(&config);
    let profiles = vec![rectangle_profile(10.0, 10.0), open];
    let features = vec![
        Feature::base(0, Operation::Extrude { depth: 10.0 }),
        Feature::secondary(1, Operation::Cut { depth: 10.0 }),
    ];

    let report = builder.build(&features, &profiles).unwrap();
    assert_eq!(report.warnings.len(), 1);
    assert!(matches!(report.warnings[0], ConvertError::ClosureValidation { .. }));
}

#[test]
fn test_unclosed_base_aborts_under_strict_validation() {
    let config = Config::default();
    let builder = ModelBuilder::new(&MockKernel, &config);
    let edges = vec![
        CurveEntity::line(pt(0.0, 0.0), pt(10.0, 0.0)),
        CurveEntity::line(pt(10.0, 0.0), pt(10.0, 10.0)),
        CurveEntity::line(pt(10.0, 10.0), pt(0.0, 10.0)),
    ];
    let mut open = Profile::new(edges);
    open.compute_metrics(&config);
    let features = vec![Feature::base(0, Operation::Extrude { depth: 10.0 })];

    let result = builder.build(&features, &[open.clone()]);
    assert!(matches!(result, Err(ConvertError::ClosureValidation { .. })));

    // Without strict validation the open outline is closed by the kernel.
    let relaxed = Config { strict_validation: false, ..Config::default() };
    let builder = ModelBuilder::new(&MockKernel, &relaxed);
    let report = builder.build(&features, &[open]).unwrap();
    assert!(matches!(report.solid, MockSolid::Extruded { .. }));
}

#[test]
fn test_revolve_axis_resolution() {
    let config = Config::default();
    let builder = ModelBuilder::new(&MockKernel, &config);
    let profiles = vec![rectangle_profile(10.0, 5.0)];

    // Default: Y axis through the origin.
    let features = vec![Feature::base(0, Operation::Revolve { angle_deg: 360.0, axis: None })];
    let report = builder.build(&features, &profiles).unwrap();
    match report.solid {
        MockSolid::Revolved { angle_deg, axis_a, axis_b } => {
            assert_eq!(angle_deg, 360.0);
            assert_eq!(axis_a, Point3D::new(0.0, 0.0, 0.0));
            assert_eq!(axis_b, Point3D::new(0.0, 1.0, 0.0));
        }
        other => panic!("expected revolve, got {other:?}"),
    }

    // Annotated anchor: vertical line through (5, 0).
    let features =
        vec![Feature::base(0, Operation::Revolve { angle_deg: 180.0, axis: Some(pt(5.0, 0.0)) })];
    let report = builder.build(&features, &profiles).unwrap();
    match report.solid {
        MockSolid::Revolved { angle_deg, axis_a, axis_b } => {
            assert_eq!(angle_deg, 180.0);
            assert_eq!(axis_a, Point3D::new(5.0, 0.0, 0.0));
            assert_eq!(axis_b, Point3D::new(5.0, 0.0, 1.0));
        }
        other => panic!("expected revolve, got {other:?}"),
    }
}

#[test]
fn test_revolve_rejects_out_of_range_angle() {
    let config = Config::default();
    let builder = ModelBuilder::new(&MockKernel, &config);
    let profiles = vec![rectangle_profile(10.0, 5.0)];
    let features = vec![Feature::base(0, Operation::Revolve { angle_deg: 400.0, axis: None })];

    assert!(matches!(
        builder.build(&features, &profiles),
        Err(ConvertError::InvalidRevolve(_))
    ));
}

#[test]
fn test_revolve_rejects_unreasonable_axis() {
    let config = Config::default();
    let builder = ModelBuilder::new(&MockKernel, &config);
    let profiles = vec![rectangle_profile(10.0, 5.0)];
    let features = vec![Feature::base(
        0,
        Operation::Revolve { angle_deg: 90.0, axis: Some(pt(50_000.0, 0.0)) },
    )];

    assert!(matches!(
        builder.build(&features, &profiles),
        Err(ConvertError::InvalidRevolve(_))
    ));
}

#[test]
fn test_loft_rejected_by_default_policy() {
    let config = Config::default();
    let builder = ModelBuilder::new(&MockKernel, &config);
    let profiles = vec![rectangle_profile(10.0, 10.0), rectangle_profile(5.0, 5.0)];
    let features =
        vec![Feature::base(0, Operation::Loft { depth: 10.0, section_profiles: vec![1] })];

    assert!(matches!(
        builder.build(&features, &profiles),
        Err(ConvertError::UnsupportedOperation { operation: "loft", .. })
    ));
}

#[test]
fn test_loft_degrades_to_extrude_under_policy() {
    let config = Config {
        unsupported_operations: UnsupportedOperationPolicy::DegradeToExtrude,
        ..Config::default()
    };
    let builder = ModelBuilder::new(&MockKernel, &config);
    let profiles = vec![rectangle_profile(10.0, 10.0), rectangle_profile(5.0, 5.0)];
    // The degraded extrusion uses the depth carried on the feature, not
    // the configured default.
    let features =
        vec![Feature::base(0, Operation::Loft { depth: 25.0, section_profiles: vec![1] })];

    let report = builder.build(&features, &profiles).unwrap();
    match report.solid {
        MockSolid::Extruded { z_start, depth, .. } => {
            assert_eq!(z_start, 0.0);
            assert_eq!(depth, 25.0);
        }
        other => panic!("expected degraded extrusion, got {other:?}"),
    }
}

#[test]
fn test_empty_feature_list_is_an_error() {
    let config = Config::default();
    let builder = ModelBuilder::new(&MockKernel, &config);
    assert!(matches!(builder.build(&[], &[]), Err(ConvertError::NoFeatures)));
}

#[test]
fn test_arc_sampling_point_count_and_endpoints() {
    let points = approximate_arc(pt(0.0, 0.0), 5.0, 0.0, 90.0, 16);
    assert_eq!(points.len(), 17);
    assert!((points[0].x - 5.0).abs() < 1e-9);
    assert!((points[16].y - 5.0).abs() < 1e-9);
}

#[test]
fn test_arc_sampling_wraps_across_zero() {
    // 350° → 10° sweeps 20° through the positive X direction, not 340°
    // backwards.
    let points = approximate_arc(pt(0.0, 0.0), 1.0, 350.0, 10.0, 16);
    assert_eq!(points.len(), 17);
    let mid = points[8];
    assert!((mid.x - 1.0).abs() < 1e-9, "midpoint must sit at 0°, got {mid:?}");
    assert!(mid.y.abs() < 1e-9);
}

#[test]
fn test_spline_sampling_linear_interpolation() {
    let points = approximate_spline(&[pt(0.0, 0.0), pt(10.0, 0.0)], 20);
    assert_eq!(points.len(), 21);
    assert_eq!(points[0], pt(0.0, 0.0));
    assert_eq!(points[20], pt(10.0, 0.0));
    assert!((points[10].x - 5.0).abs() < 1e-9);

    assert!(approximate_spline(&[pt(0.0, 0.0)], 20).is_empty());
}

#[test]
fn test_profile_sampling_collapses_coincident_points() {
    let config = Config::default();
    let profiles = chain_profiles(&rectangle_edges(10.0, 10.0), &config);
    let points = sample_profile_points(&profiles[0], &config);
    // Four corners plus the closing return to the first corner; shared
    // corners are not duplicated.
    assert_eq!(points.len(), 5);
    assert!(points[0].distance_to(points[4]) < config.point_coincidence_tolerance);
}
