//! Numeric seeds for per-instance random generators

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Seed for a tetrahedron's random generator
///
/// Any integer or float converts into a seed; equal seeds always reproduce
/// the same random sequence. Integral floats map onto the matching integer
/// seed, so `Seed::from(3.0)` and `Seed::from(3u64)` are the same seed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Seed(pub u64);

impl Seed {
    /// A fresh generator for this seed
    pub fn rng(self) -> StdRng {
        StdRng::seed_from_u64(self.0)
    }
}

impl From<u64> for Seed {
    fn from(value: u64) -> Self {
        Seed(value)
    }
}

impl From<u32> for Seed {
    fn from(value: u32) -> Self {
        Seed(value as u64)
    }
}

impl From<usize> for Seed {
    fn from(value: usize) -> Self {
        Seed(value as u64)
    }
}

impl From<i64> for Seed {
    fn from(value: i64) -> Self {
        Seed(value as u64)
    }
}

impl From<i32> for Seed {
    fn from(value: i32) -> Self {
        Seed(value as i64 as u64)
    }
}

impl From<f64> for Seed {
    fn from(value: f64) -> Self {
        if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
            Seed::from(value as i64)
        } else {
            Seed(value.to_bits())
        }
    }
}
