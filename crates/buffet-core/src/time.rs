//! Simulated time.
//!
//! # Design
//!
//! Time is a monotonically increasing count of simulated *minutes*, stored as
//! `f64` because every delay in the model (inter-arrival gaps, service
//! durations) is drawn from a continuous exponential distribution.  The
//! newtype implements a *total* order via `f64::total_cmp`, which lets
//! `SimTime` serve directly as a `BTreeMap` key in the event queue.
//!
//! Validated configurations never produce NaN or negative delays, so the
//! exotic corners of `total_cmp` (NaN ordering, -0.0 < +0.0) are never
//! exercised; the total order is there so the type is honest, not clever.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};

/// An absolute point on the simulated timeline, in minutes from run start.
#[derive(Copy, Clone, Debug, Default)]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// The instant `minutes` after `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `minutes` is negative — scheduling into the
    /// past is a programming error, not a runtime condition.
    #[inline]
    pub fn after(self, minutes: f64) -> SimTime {
        debug_assert!(
            minutes >= 0.0,
            "negative delay {minutes} scheduled from {self}"
        );
        SimTime(self.0 + minutes)
    }

    /// Minutes elapsed from `earlier` to `self`.
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }
}

impl PartialEq for SimTime {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        self.after(rhs)
    }
}

impl Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} min", self.0)
    }
}
