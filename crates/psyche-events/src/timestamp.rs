//! Simulation Timestamps
//!
//! The core is driven by an external fixed-step loop, so time is a plain
//! monotonic tick counter owned by the driver and passed in explicitly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in simulation time, counted in driver ticks.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Tick(pub u64);

impl Tick {
    /// The tick before the simulation starts.
    pub const ZERO: Tick = Tick(0);

    /// Creates a tick at the given count.
    pub fn new(value: u64) -> Self {
        Tick(value)
    }

    /// Returns the raw tick count.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Returns the next tick.
    pub fn next(&self) -> Tick {
        Tick(self.0 + 1)
    }

    /// Ticks elapsed since `earlier`, saturating at zero if `earlier` is
    /// in the future.
    pub fn elapsed_since(&self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl From<u64> for Tick {
    fn from(value: u64) -> Self {
        Tick(value)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}
