//! `buffet-sim` — the discrete-event engine for the buffet simulator.
//!
//! # Event loop
//!
//! ```text
//! while let Some((now, event)) = events.pop_before(horizon):
//!   Arrival          → reschedule source; synthesize customer; admission
//!                      check at waiting (balk → counted, discarded)
//!   WaitTimeout      → if the grant already won, discard; else cancel the
//!                      queued ticket and abandon (excessive wait)
//!   ServiceDone      → release server, re-dispatch the station, then
//!                      advance the customer: waiting → buffet-room gate,
//!                      food → next course in the round, dining → terminal
//!                      branch (complete / re-queue / denied)
//!   PollCapacity     → re-check the customer's occupancy gate
//! ```
//!
//! All customer and arrival processes are cooperative entities multiplexed
//! onto one timeline: exactly one handler runs per simulated instant, to its
//! next suspension point.  The capacity gates are intentionally racy
//! (check-sleep-recheck at a fixed poll interval); station admission plus
//! commit happens inside a single handler and is therefore consistent.

pub mod builder;
pub mod customer;
pub mod error;
pub mod event_queue;
pub mod observer;
pub mod sim;
pub mod stats;


pub use builder::SimBuilder;
pub use customer::{Customer, CustomerState};
pub use error::{SimError, SimResult};
pub use event_queue::{Event, EventQueue};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{Simulation, Stations};
pub use stats::{Outcome, SimStats};
