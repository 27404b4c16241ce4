//! `buffet-station` — the multi-server queueing station.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                |
//! |----------------|---------------------------------------------------------|
//! | [`station`]    | `ServiceStation`, `ServiceGrant`, `Placement`           |
//! | [`discipline`] | shared-queue and per-server-queue internals             |
//! | [`samples`]    | append-only observation logs and summary helpers        |
//!
//! # Interaction model
//!
//! The station never suspends anything itself — the engine owns time.  A
//! caller checks [`ServiceStation::has_available_capacity`], commits with
//! [`ServiceStation::enqueue`], then asks the station to
//! [`ServiceStation::dispatch`] free servers to queued entities.  Each
//! returned [`ServiceGrant`] carries the service completion instant for the
//! engine to schedule; [`ServiceStation::complete`] releases the slot when
//! that instant arrives.

pub mod discipline;
pub mod samples;
pub mod station;

#[cfg(test)]
mod tests;

pub use samples::{ServerSamples, StationSamples, max_u32, mean_f64, mean_u32};
pub use station::{Placement, ServiceGrant, ServiceStation};
