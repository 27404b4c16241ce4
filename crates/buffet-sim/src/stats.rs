//! Run-wide counters and samples.
//!
//! All state lives on the owning [`Simulation`][crate::Simulation] — there
//! is no module-level or static state anywhere; constructing a new
//! simulation is the only reset.

use buffet_core::CustomerId;
use buffet_station::mean_f64;
use rustc_hash::FxHashSet;

/// How a customer left the simulation.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Outcome {
    /// Finished dining and chose not to re-queue.
    Completed,
    /// Rejected at arrival: the waiting queue was full.  The entity never
    /// entered the simulation.
    AbandonedFullQueue,
    /// Gave up after waiting too long for a waiting-room server.
    AbandonedExcessiveWait,
    /// Wanted to re-queue but had exceeded the eligibility window.
    AbandonedDeniedRequeue,
}

/// Counters and samples for one simulation run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SimStats {
    /// Every synthesized customer, including those balked at the door.
    pub arrivals: u64,
    pub completions: u64,
    /// Re-queue passes granted after dining.
    pub requeue_count: u64,
    /// Defensive re-entries with demands left after dining (should stay 0).
    pub unmet_demand_returns: u64,
    pub abandoned_full_queue: u64,
    pub abandoned_excessive_wait: u64,
    pub abandoned_denied_requeue: u64,
    /// Customers that finished dining at least once, by base identity.
    pub unique_diners: FxHashSet<CustomerId>,
    /// Total minutes in system for completed and requeue-denied customers,
    /// anchored to the original arrival.
    pub time_in_system: Vec<f64>,
}

impl SimStats {
    pub fn abandoned_total(&self) -> u64 {
        self.abandoned_full_queue + self.abandoned_excessive_wait + self.abandoned_denied_requeue
    }

    pub fn mean_time_in_system(&self) -> f64 {
        mean_f64(&self.time_in_system)
    }

    pub fn max_time_in_system(&self) -> f64 {
        self.time_in_system.iter().copied().fold(0.0, f64::max)
    }

    pub fn min_time_in_system(&self) -> f64 {
        self.time_in_system
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min)
            .min(self.max_time_in_system())
    }

    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Completed => self.completions += 1,
            Outcome::AbandonedFullQueue => self.abandoned_full_queue += 1,
            Outcome::AbandonedExcessiveWait => self.abandoned_excessive_wait += 1,
            Outcome::AbandonedDeniedRequeue => self.abandoned_denied_requeue += 1,
        }
    }
}
