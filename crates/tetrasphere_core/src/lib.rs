//! Core animation types for Tetrasphere
//!
//! - [`VertexDriftAnimator`] - the 4 drifting vertices of one tetrahedron
//! - [`TetrahedronGeometryUpdater`] - writes directions into the duplicated mesh slots
//! - [`LightOscillator`] - looping light intensity
//! - [`ShiftingTetrahedron`] / [`TetraField`] - scene objects
//! - [`FrameStats`] - optional frame-rate observer
//!
//! Nothing here performs I/O or talks to the GPU; everything is stepped by
//! the caller with frame deltas.

mod easing;
mod tween;
mod seed;
pub mod drift;
pub mod geometry;
pub mod oscillator;
pub mod tetrahedron;
pub mod field;
pub mod stats;

pub use easing::Easing;
pub use tween::{Interpolate, Tween};
pub use seed::Seed;
pub use drift::{
    sample_target, DriftConfig, DriftPhase, VertexDrift, VertexDriftAnimator, REFERENCE_DIRECTION,
};
pub use geometry::{DirtyFlags, GeometryError, PositionBuffer, TetraGeometry, TetrahedronGeometryUpdater};
pub use oscillator::{LightOscillator, OscillatorConfig, OscillatorLeg, OscillatorPhase};
pub use tetrahedron::{BaseColor, ShiftingTetrahedron};
pub use field::{TetraField, TetraKey};
pub use stats::{FrameObserver, FrameStats, FrameSummary};
