//! Integration tests for the drift animation
//!
//! These tests drive the public API the way the frame loop does:
//! 1. Directions stay on the unit sphere over long runs
//! 2. Targets are uniform over the sphere
//! 3. Equal seeds and equal deltas reproduce equal output
//! 4. Consecutive legs join without a jump
//! 5. The geometry updater is idempotent and signals once per call

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tetrasphere_core::{
    DriftConfig, Easing, PositionBuffer, TetraGeometry, TetrahedronGeometryUpdater,
    VertexDriftAnimator, REFERENCE_DIRECTION,
};
use tetrasphere_math::{random_on_sphere, Quat, Vec3};

const BINS: usize = 10;
const SAMPLES: usize = 20_000;
/// Chi-squared critical value for 9 degrees of freedom at p ≈ 1e-4
const CHI_SQUARED_LIMIT: f64 = 33.7;

/// Chi-squared statistic of the z coordinates over equal-area bands
///
/// Bands of equal height on a sphere have equal area, so a uniform sampler
/// puts the same expected count in each.
fn chi_squared_z(points: impl Iterator<Item = Vec3>) -> f64 {
    let mut counts = [0usize; BINS];
    let mut total = 0usize;
    for p in points {
        let band = (((p.z + 1.0) * 0.5 * BINS as f32) as usize).min(BINS - 1);
        counts[band] += 1;
        total += 1;
    }
    let expected = total as f64 / BINS as f64;
    counts
        .iter()
        .map(|&c| {
            let d = c as f64 - expected;
            d * d / expected
        })
        .sum()
}

// ==================== Unit Length ====================

#[test]
fn test_directions_stay_unit_length() {
    for seed in [0u64, 1, 42, 9_999] {
        let mut animator = VertexDriftAnimator::start(seed);
        for frame in 0..3_000 {
            animator.advance(1.0 / 60.0);
            for direction in animator.directions() {
                let error = (direction.length() - 1.0).abs();
                assert!(error <= 1e-6, "seed {} frame {}: length error {}", seed, frame, error);
            }
        }
    }
}

#[test]
fn test_rotations_stay_normalized() {
    let mut animator = VertexDriftAnimator::start(7u64);
    for _ in 0..1_000 {
        animator.advance(0.037);
        for rotation in animator.rotations() {
            assert!((rotation.magnitude() - 1.0).abs() < 1e-4);
        }
    }
}

// ==================== Uniformity ====================

#[test]
fn test_sphere_sampling_is_uniform() {
    let mut rng = StdRng::seed_from_u64(2024);
    let points = (0..SAMPLES).map(|_| random_on_sphere(&mut rng));
    let chi = chi_squared_z(points);
    assert!(chi < CHI_SQUARED_LIMIT, "chi-squared {} exceeds {}", chi, CHI_SQUARED_LIMIT);
}

#[test]
fn test_naive_cube_sampling_is_rejected() {
    let mut rng = StdRng::seed_from_u64(2024);
    let points = (0..SAMPLES).map(|_| {
        Vec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        )
        .normalized()
    });
    let chi = chi_squared_z(points);
    assert!(chi > CHI_SQUARED_LIMIT, "naive sampler passed with chi-squared {}", chi);
}

#[test]
fn test_drift_targets_are_uniform() {
    // Run animators with instantaneous legs so every frame lands on a fresh target
    let config = DriftConfig { duration: 0.01, easing: Easing::Linear };
    let mut points = Vec::with_capacity(SAMPLES);
    let mut animator = VertexDriftAnimator::start_with(123u64, config);
    while points.len() < SAMPLES {
        animator.advance(0.01);
        points.extend(animator.directions());
    }
    let chi = chi_squared_z(points.into_iter());
    assert!(chi < CHI_SQUARED_LIMIT, "chi-squared {} exceeds {}", chi, CHI_SQUARED_LIMIT);
}

// ==================== Determinism ====================

#[test]
fn test_same_seed_same_output() {
    let mut deltas = StdRng::seed_from_u64(77);
    let mut a = VertexDriftAnimator::start(31u64);
    let mut b = VertexDriftAnimator::start(31u64);

    for _ in 0..500 {
        let dt: f32 = deltas.gen_range(0.0..0.1);
        a.advance(dt);
        b.advance(dt);
        assert_eq!(a.directions(), b.directions());
        assert_eq!(a.rotations(), b.rotations());
    }
}

#[test]
fn test_different_seeds_differ() {
    let mut a = VertexDriftAnimator::start(1u64);
    let mut b = VertexDriftAnimator::start(2u64);
    a.advance(0.5);
    b.advance(0.5);
    assert_ne!(a.directions(), b.directions());
}

// ==================== Continuity ====================

#[test]
fn test_new_leg_starts_where_previous_ended() {
    let config = DriftConfig { duration: 0.25, easing: Easing::spring() };
    let mut animator = VertexDriftAnimator::start_with(5u64, config);
    let mut checked = 0;

    for _ in 0..400 {
        let before: Vec<(u64, Quat)> = animator
            .drifts()
            .iter()
            .map(|d| (d.legs_completed(), d.tween().end()))
            .collect();

        animator.advance(1.0 / 30.0);

        for (drift, (legs, previous_end)) in animator.drifts().iter().zip(before) {
            if drift.legs_completed() > legs {
                assert_eq!(drift.tween().start(), previous_end);
                assert_eq!(drift.rotation(), previous_end);
                checked += 1;
            }
        }
    }

    assert!(checked > 0);
}

// ==================== Geometry Buffer ====================

struct CountingGeometry {
    inner: TetraGeometry,
    signals: usize,
}

impl PositionBuffer for CountingGeometry {
    fn positions_mut(&mut self) -> &mut [f32] {
        self.inner.positions_mut()
    }

    fn mark_positions_dirty(&mut self) {
        self.signals += 1;
        self.inner.mark_positions_dirty();
    }
}

#[test]
fn test_apply_is_idempotent_and_signals_once() {
    let mut animator = VertexDriftAnimator::start(3u64);
    animator.advance(0.3);
    let directions = animator.directions();

    let updater = TetrahedronGeometryUpdater::for_tetrahedron();
    let mut buffer = CountingGeometry { inner: TetraGeometry::new(), signals: 0 };

    updater.apply(&directions, &mut buffer);
    let first = buffer.inner.positions().to_vec();
    assert_eq!(buffer.signals, 1);

    updater.apply(&directions, &mut buffer);
    assert_eq!(buffer.inner.positions(), first.as_slice());
    assert_eq!(buffer.signals, 2);
}

// ==================== End to End ====================

#[test]
fn test_seed_zero_reaches_first_targets() {
    let config = DriftConfig::default();
    let mut animator = VertexDriftAnimator::start_with(0u64, config);
    animator.advance(config.duration);

    let mut rng = StdRng::seed_from_u64(0);
    for i in 0..4 {
        let sampled = random_on_sphere(&mut rng);
        let target = Quat::from_unit_vectors(REFERENCE_DIRECTION, sampled);
        let expected = target.rotate(REFERENCE_DIRECTION).normalized();

        assert_eq!(animator.direction(i), expected, "vertex {}", i);
        assert!((animator.direction(i) - sampled).length() < 1e-5, "vertex {}", i);
    }
}

// ==================== Boundaries ====================

#[test]
fn test_easing_boundaries() {
    for easing in [
        Easing::Linear,
        Easing::EaseInCubic,
        Easing::EaseOutCubic,
        Easing::EaseInOutCubic,
        Easing::spring(),
    ] {
        assert_eq!(easing.apply(0.0), 0.0);
        assert_eq!(easing.apply(1.0), 1.0);
    }
}

#[test]
fn test_slerp_to_self_is_identity() {
    let mut rng = StdRng::seed_from_u64(8);
    for _ in 0..20 {
        let q = Quat::from_unit_vectors(REFERENCE_DIRECTION, random_on_sphere(&mut rng));
        for t in [0.0, 0.25, 0.5, 0.9, 1.0] {
            assert_eq!(q.slerp(&q, t), q);
        }
    }
}
