//! The customer entity and its state machine.
//!
//! A customer is data advanced by the engine's event handlers — suspension
//! points are exactly: awaiting a waiting-room grant (racing the abandonment
//! timer), awaiting a service completion, and awaiting an occupancy-gate
//! poll tick.  The engine owns all transitions; nothing here schedules.

use buffet_core::{Course, CourseSet, PassId, SimTime};

/// Where a customer currently is in the flow.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum CustomerState {
    /// Queued at the waiting station, abandonment timer running.
    QueuedAtWaiting,
    /// Granted a waiting-room server; the timer lost its race.
    ServingAtWaiting,
    /// Waiting (polled) for food-area occupancy to drop below the dining
    /// station's total capacity.
    AwaitingBuffetRoom,
    /// Queued or in service at one food station.
    AtFood(Course),
    /// Waiting (polled) for the dining station to become admissible.
    AwaitingDiningRoom,
    /// Queued or in service at the dining station.
    AtDining,
}

/// One active pass of a customer through the buffet.
///
/// Re-queue and unmet-demand re-entry replace the entry in the engine's
/// customer map with a derived-identity pass; `arrival_time` is carried over
/// so total time in system stays anchored to the original arrival, while
/// `pass_start` is reset to anchor per-pass checks.
#[derive(Debug)]
pub struct Customer {
    pub id: PassId,
    /// First entry into the simulation (constant across derived passes).
    pub arrival_time: SimTime,
    /// Start of the current pass; anchors requeue eligibility.
    pub pass_start: SimTime,
    /// Courses this pass set out to obtain (never empty).
    pub required: CourseSet,
    /// Courses not yet obtained this pass.
    pub remaining: CourseSet,
    /// Did the current food round clear at least one demand?
    pub cleared_this_round: bool,
    /// Bumped on every waiting-room entry; guards stale abandonment timers.
    pub wait_attempt: u32,
    pub state: CustomerState,
}

impl Customer {
    /// A fresh first-pass customer at its admission instant.
    pub fn new(id: PassId, now: SimTime, required: CourseSet) -> Self {
        debug_assert!(!required.is_empty(), "service requirement must be non-empty");
        Customer {
            id,
            arrival_time: now,
            pass_start: now,
            required,
            remaining: required,
            cleared_this_round: false,
            wait_attempt: 0,
            state: CustomerState::QueuedAtWaiting,
        }
    }

    /// Derive the next pass of this customer with a new requirement,
    /// starting now.  Total-time anchoring is preserved.
    pub fn derive_pass(&self, now: SimTime, required: CourseSet) -> Customer {
        let mut next = Customer::new(self.id.next(), now, required);
        next.arrival_time = self.arrival_time;
        next
    }
}
