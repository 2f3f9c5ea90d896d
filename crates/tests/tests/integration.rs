//! Integration tests for end-to-end voxfield execution.
//!
//! These tests verify the full pipeline:
//! Grid → Sample → Aggregate → Assemble → Volume remap

use voxfield_kernels::{BodySet, ChargeSet, WireLoop};
use voxfield_solver::{
    dense_field, Assembly, Error, FieldSolver, GridBounds, KernelFn, KernelSample, SampleStrategy,
};
use voxfield_tests::TestHarness;

fn constant_kernel() -> KernelFn {
    Box::new(|_| KernelSample {
        field: Some([1.0, 0.0, 0.0]),
        scalars: Some(vec![5.0]),
    })
}

fn position_kernel() -> KernelFn {
    Box::new(|r| KernelSample {
        field: Some([r[0] * 2.0, r[1] - r[2], r[0] * r[1]]),
        scalars: Some(vec![r[0] + r[1] + r[2]]),
    })
}

/// Constant kernel on a 2×2×2 grid: magnitude all ones, normalized scalar
/// all ones (max = 5, every value equal).
#[test]
fn test_constant_kernel_on_two_cubed_grid() {
    let harness = TestHarness::from_kernel(2, constant_kernel());

    let raw = harness.solve(Assembly::Raw).unwrap();
    assert_eq!(raw.field_magnitude, Some(vec![1.0; 8]));
    assert_eq!(raw.values, Some(vec![5.0; 8]));

    let normalized = harness.solve(Assembly::Normalized).unwrap();
    assert_eq!(normalized.values, Some(vec![1.0; 8]));
    assert_eq!(normalized.field_magnitude, Some(vec![1.0; 8]));
}

/// A kernel that reports nothing still yields fully populated coordinates,
/// with every derived channel absent.
#[test]
fn test_silent_kernel_yields_coordinates_only() {
    let harness = TestHarness::from_kernel(3, Box::new(|_| KernelSample::empty()));
    let volume = harness.solve(Assembly::Raw).unwrap();

    assert_eq!(volume.x.len(), 27);
    assert_eq!(volume.y.len(), 27);
    assert_eq!(volume.z.len(), 27);
    assert!(volume.values.is_none());
    assert!(volume.field_magnitude.is_none());
    assert!(volume.field_components.is_none());
    assert!(volume.scalars.is_none());
}

/// Direct and streaming strategies must produce bit-identical volumes for
/// the same grid and kernel.
#[test]
fn test_direct_and_streaming_strategies_identical() {
    let mut config = TestHarness::test_config(4);
    config.strategy = SampleStrategy::Direct;
    let direct = TestHarness::with_config(config.clone(), position_kernel())
        .solve(Assembly::Raw)
        .unwrap();

    config.strategy = SampleStrategy::Streaming;
    let streaming = TestHarness::with_config(config, position_kernel())
        .solve(Assembly::Raw)
        .unwrap();

    assert_eq!(direct, streaming);
}

/// Index alignment: every present channel has the same length after a solve.
#[test]
fn test_channel_alignment_after_solve() {
    let harness = TestHarness::from_kernel(3, position_kernel());
    let volume = harness.solve(Assembly::Raw).unwrap();

    let points = volume.x.len();
    assert_eq!(volume.y.len(), points);
    assert_eq!(volume.z.len(), points);
    assert_eq!(volume.values.as_ref().unwrap().len(), points);
    assert_eq!(volume.field_magnitude.as_ref().unwrap().len(), points);
    for component in volume.field_components.as_ref().unwrap() {
        assert_eq!(component.len(), points);
    }
    for channel in volume.scalars.as_ref().unwrap() {
        assert_eq!(channel.len(), points);
    }
}

/// Bounds equal the exact extents handed to the grid builder.
#[test]
fn test_bounds_match_grid_extents() {
    let mut harness = TestHarness::from_kernel(3, constant_kernel());
    harness.set_bounds(GridBounds {
        x: [-1.5, 2.5],
        y: [0.0, 4.0],
        z: [-8.0, -2.0],
    });

    let volume = harness.solve(Assembly::Raw).unwrap();
    // The emitted x coordinate walks the z axis (and vice versa), so the
    // computed x bounds are the z extents handed in.
    assert_eq!(volume.bounds.x, [-8.0, -2.0]);
    assert_eq!(volume.bounds.y, [0.0, 4.0]);
    assert_eq!(volume.bounds.z, [-1.5, 2.5]);
}

/// The dense remap recovers a natural row-major volume exactly.
#[test]
fn test_remap_recovers_row_major_volume() {
    let values: Vec<f64> = (0..8).map(f64::from).collect();
    let dense = dense_field(&values, [2, 2, 2]);
    for i in 0..2 {
        for j in 0..2 {
            for k in 0..2 {
                assert_eq!(dense[i * 4 + j * 2 + k], values[i * 4 + j * 2 + k]);
            }
        }
    }
}

/// Solving without a kernel is a configuration error, not a panic.
#[test]
fn test_missing_kernel_is_configuration_error() {
    let solver = FieldSolver::new(TestHarness::test_config(2)).unwrap();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();
    let result = runtime.block_on(solver.solve(&GridBounds::cube(1.0), Assembly::Raw, 0));
    assert!(matches!(result, Err(Error::MissingKernel)));
}

/// Progress starts at 0, ends at 100, and sampling stays in the 10–90 band.
#[test]
fn test_progress_envelope() {
    let harness = TestHarness::from_kernel(3, constant_kernel());
    harness.solve(Assembly::Raw).unwrap();

    let reports = harness.progress();
    assert_eq!(reports.first().map(|(p, _)| *p), Some(0.0));
    assert_eq!(reports.last().map(|(p, _)| *p), Some(100.0));
    for (percent, _) in &reports[1..reports.len() - 1] {
        assert!((10.0..=90.0).contains(percent), "percent = {percent}");
    }
    // At least one report per sampling batch: 27 points at batch size 16.
    assert!(reports.len() >= 4);
}

/// A cancelled solve yields an error and no partial volume.
#[test]
fn test_cancelled_solve_yields_nothing() {
    let harness = TestHarness::from_kernel(4, constant_kernel());
    harness.cancel_flag().cancel();
    let result = harness.solve(Assembly::Raw);
    assert!(matches!(result, Err(Error::Cancelled)));
}

/// Wire-loop model end to end: raw magnitude present and finite everywhere.
#[test]
fn test_wire_loop_model_end_to_end() {
    let wire = WireLoop {
        segments: 200,
        ..WireLoop::default()
    };
    let mut harness = TestHarness::from_kernel(5, wire.into_kernel());
    harness.set_bounds(GridBounds {
        x: [-2.0, 2.0],
        y: [-4.0, 4.0],
        z: [-2.0, 2.0],
    });

    let volume = harness.solve(Assembly::Raw).unwrap();
    let magnitude = volume.field_magnitude.as_ref().unwrap();
    assert_eq!(magnitude.len(), 125);
    assert!(magnitude.iter().all(|m| m.is_finite() && *m >= 0.0));
    assert!(volume.bounds.values[0] <= volume.bounds.values[1]);
}

/// Normalized gravity model: every value lands in [0, 1] with the max hit.
#[test]
fn test_gravity_model_normalizes_to_unit_range() {
    let mut harness = TestHarness::from_kernel(4, BodySet::default().into_kernel());
    harness.set_bounds(GridBounds::cube(7.1));

    let volume = harness.solve(Assembly::Normalized).unwrap();
    let values = volume.values.as_ref().unwrap();
    assert!(values.iter().all(|v| (0.0..=1.0).contains(v)));
    assert!(values.iter().any(|v| *v == 1.0));
    assert!(volume.bounds.values[1] <= 1.0);
}

/// The assembled volume survives a JSON round-trip unchanged.
#[test]
fn test_volume_json_round_trip() {
    let harness = TestHarness::from_kernel(2, ChargeSet::default().into_kernel());
    let volume = harness.solve(Assembly::Raw).unwrap();

    let json = serde_json::to_string(&volume).unwrap();
    let decoded: voxfield_solver::FieldVolume = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, volume);
}
