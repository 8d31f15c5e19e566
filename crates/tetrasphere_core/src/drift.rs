//! Vertex drift animation
//!
//! Each of a tetrahedron's 4 vertices drifts forever over the unit sphere:
//! it rotates the reference direction `(0, 1, 0)` towards a random target,
//! and as soon as it arrives it picks another target and keeps going.
//!
//! The endless "wait for the next target" loop is an explicit two-state
//! machine ([`DriftPhase`]) stepped by the frame driver through
//! [`VertexDriftAnimator::advance`], so every step is a plain function call
//! that tests can drive deterministically.

use rand::rngs::StdRng;
use serde::{Serialize, Deserialize};
use tetrasphere_math::{random_on_sphere, Quat, Vec3, TETRA_VERTEX_COUNT};

use crate::{Easing, Seed, Tween};

/// Direction every rotation is applied to
pub const REFERENCE_DIRECTION: Vec3 = Vec3::Y;

/// Timing of the drift tweens
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DriftConfig {
    /// Seconds to travel from one target to the next
    pub duration: f32,
    /// Easing of each leg
    pub easing: Easing,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            duration: 1.0,
            easing: Easing::spring(),
        }
    }
}

/// State of a single vertex's drift
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriftPhase {
    /// Travelling towards the current target
    Animating,
    /// Arrived; a new target must be drawn before the next frame
    SchedulingNext,
}

/// One vertex: its running tween and the latest output
#[derive(Clone, Debug)]
pub struct VertexDrift {
    tween: Tween<Quat>,
    rotation: Quat,
    direction: Vec3,
    phase: DriftPhase,
    legs_completed: u64,
}

impl VertexDrift {
    fn new(target: Quat, config: &DriftConfig) -> Self {
        Self {
            tween: Tween::new(Quat::IDENTITY, target, config.duration, config.easing),
            rotation: Quat::IDENTITY,
            direction: REFERENCE_DIRECTION,
            phase: DriftPhase::Animating,
            legs_completed: 0,
        }
    }

    fn advance(&mut self, dt: f32) {
        // Overshoot past the target is dropped; the next leg starts from rest
        self.tween.advance(dt);
        self.rotation = self.tween.value();
        self.direction = self.rotation.rotate(REFERENCE_DIRECTION).normalized();

        if self.tween.is_complete() {
            self.phase = DriftPhase::SchedulingNext;
        }
    }

    fn schedule_next(&mut self, target: Quat, config: &DriftConfig) {
        debug_assert_eq!(self.phase, DriftPhase::SchedulingNext);
        self.tween = Tween::new(self.tween.end(), target, config.duration, config.easing);
        self.phase = DriftPhase::Animating;
        self.legs_completed += 1;
    }

    /// Current unit direction of the vertex
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Current rotation from [`REFERENCE_DIRECTION`] to the vertex
    #[inline]
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// The leg in progress
    #[inline]
    pub fn tween(&self) -> &Tween<Quat> {
        &self.tween
    }

    #[inline]
    pub fn phase(&self) -> DriftPhase {
        self.phase
    }

    /// Number of legs finished so far
    #[inline]
    pub fn legs_completed(&self) -> u64 {
        self.legs_completed
    }
}

/// Drives the 4 vertices of one tetrahedron from a single seeded generator
///
/// The generator is owned exclusively by the animator; targets are drawn in
/// vertex order, so two animators built from the same seed and advanced with
/// the same deltas produce identical output.
pub struct VertexDriftAnimator {
    rng: StdRng,
    drifts: [VertexDrift; TETRA_VERTEX_COUNT],
    config: DriftConfig,
}

impl VertexDriftAnimator {
    /// Start an animator with the default drift timing
    pub fn start(seed: impl Into<Seed>) -> Self {
        Self::start_with(seed, DriftConfig::default())
    }

    /// Start an animator with custom timing
    pub fn start_with(seed: impl Into<Seed>, config: DriftConfig) -> Self {
        Self::from_rng(seed.into().rng(), config)
    }

    /// Start from a generator the caller has already seeded (and possibly drawn from)
    ///
    /// All vertices begin at [`REFERENCE_DIRECTION`] with their first target
    /// already scheduled.
    pub fn from_rng(mut rng: StdRng, config: DriftConfig) -> Self {
        let drifts = std::array::from_fn(|_| VertexDrift::new(sample_target(&mut rng), &config));
        Self { rng, drifts, config }
    }

    /// Step every vertex by `dt` seconds
    ///
    /// A vertex whose leg completes during this step reports exactly its
    /// target for this frame; its next leg starts from that same rotation.
    pub fn advance(&mut self, dt: f32) {
        for drift in self.drifts.iter_mut() {
            drift.advance(dt);
            if drift.phase == DriftPhase::SchedulingNext {
                drift.schedule_next(sample_target(&mut self.rng), &self.config);
            }
        }
    }

    /// Current direction of every vertex
    pub fn directions(&self) -> [Vec3; TETRA_VERTEX_COUNT] {
        std::array::from_fn(|i| self.drifts[i].direction)
    }

    /// Current rotation of every vertex
    pub fn rotations(&self) -> [Quat; TETRA_VERTEX_COUNT] {
        std::array::from_fn(|i| self.drifts[i].rotation)
    }

    /// Current direction of vertex `index`
    ///
    /// # Panics
    /// If `index >= 4`.
    #[inline]
    pub fn direction(&self, index: usize) -> Vec3 {
        self.drifts[index].direction
    }

    /// Read-only view of vertex `index`
    #[inline]
    pub fn drift(&self, index: usize) -> &VertexDrift {
        &self.drifts[index]
    }

    #[inline]
    pub fn drifts(&self) -> &[VertexDrift; TETRA_VERTEX_COUNT] {
        &self.drifts
    }

    #[inline]
    pub fn config(&self) -> &DriftConfig {
        &self.config
    }
}

/// Rotation taking the reference direction onto a uniformly random direction
pub fn sample_target(rng: &mut StdRng) -> Quat {
    Quat::from_unit_vectors(REFERENCE_DIRECTION, random_on_sphere(rng))
}
