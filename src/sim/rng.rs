//! Deterministic random source
//!
//! A 32-bit linear congruential generator with GCC's constants. The engine
//! never advances it; the driver samples it once per tick and threads the
//! float into the `AdvanceTime` event.

use serde::{Deserialize, Serialize};

/// Modulus (2^31)
const M: u64 = 0x8000_0000;
/// Multiplier
const A: u64 = 1_103_515_245;
/// Increment
const C: u64 = 12_345;

/// Immutable LCG state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self {
            state: u64::from(seed) % M,
        }
    }

    /// The generator one step further along; `self` is unchanged
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn next(self) -> Self {
        Self {
            state: (A * self.state + C) % M,
        }
    }

    /// Current sample in [0, 1]
    pub fn value(self) -> f64 {
        self.state as f64 / (M - 1) as f64
    }

    pub fn state(self) -> u64 {
        self.state
    }
}
