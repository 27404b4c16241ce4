//! Simulation observer trait for progress reporting and tests.

use buffet_core::{PassId, SimTime};

use crate::stats::Outcome;

/// Callbacks invoked by [`Simulation::run`][crate::Simulation::run] at key
/// points of a run.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait SimObserver {
    /// A customer was admitted to the waiting station.
    fn on_admission(&mut self, _now: SimTime, _pass: PassId) {}

    /// A customer was granted a re-queue pass after dining.
    fn on_requeue(&mut self, _now: SimTime, _pass: PassId) {}

    /// A customer left the simulation.  Fires for balked entities too
    /// (outcome [`Outcome::AbandonedFullQueue`][crate::Outcome]), which never
    /// generate an `on_admission`.
    fn on_terminal(&mut self, _now: SimTime, _pass: PassId, _outcome: Outcome) {}

    /// Called once when the clock reaches the horizon.
    fn on_sim_end(&mut self, _end: SimTime) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
