//! Looping scalar oscillator for light intensity

use serde::{Serialize, Deserialize};
use crate::{Easing, Tween};

/// One leg of the oscillation: travel to `target` over `duration` seconds
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OscillatorLeg {
    pub target: f32,
    pub duration: f32,
    pub easing: Easing,
}

/// A rise leg and a fall leg, repeated forever
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OscillatorConfig {
    /// Value before the first rise; the fall leg returns here
    pub rest: f32,
    pub rise: OscillatorLeg,
    pub fall: OscillatorLeg,
}

impl Default for OscillatorConfig {
    fn default() -> Self {
        Self {
            rest: 0.4,
            rise: OscillatorLeg {
                target: 1.0,
                duration: 1.0,
                easing: Easing::EaseOutCubic,
            },
            fall: OscillatorLeg {
                target: 0.4,
                duration: 0.3,
                easing: Easing::EaseInCubic,
            },
        }
    }
}

/// Which leg is running
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OscillatorPhase {
    Rising,
    Falling,
}

/// Scalar driven back and forth between the rest value and the peak
#[derive(Clone, Debug)]
pub struct LightOscillator {
    config: OscillatorConfig,
    phase: OscillatorPhase,
    tween: Tween<f32>,
    value: f32,
    cycles: u64,
}

impl LightOscillator {
    pub fn new(config: OscillatorConfig) -> Self {
        let tween = Tween::new(
            config.rest,
            config.rise.target,
            config.rise.duration,
            config.rise.easing,
        );
        Self {
            config,
            phase: OscillatorPhase::Rising,
            tween,
            value: config.rest,
            cycles: 0,
        }
    }

    /// Step the oscillator by `dt` seconds and return the new value
    ///
    /// A completed leg reports its exact target; the following leg starts
    /// from that value on the next call.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.tween.advance(dt);
        self.value = self.tween.value();

        if self.tween.is_complete() {
            let (phase, leg) = match self.phase {
                OscillatorPhase::Rising => (OscillatorPhase::Falling, self.config.fall),
                OscillatorPhase::Falling => {
                    self.cycles += 1;
                    (OscillatorPhase::Rising, self.config.rise)
                }
            };
            self.phase = phase;
            self.tween = Tween::new(self.value, leg.target, leg.duration, leg.easing);
        }

        self.value
    }

    /// Current value
    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn phase(&self) -> OscillatorPhase {
        self.phase
    }

    /// Number of full rise/fall cycles completed
    #[inline]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    #[inline]
    pub fn config(&self) -> &OscillatorConfig {
        &self.config
    }
}

impl Default for LightOscillator {
    fn default() -> Self {
        Self::new(OscillatorConfig::default())
    }
}
