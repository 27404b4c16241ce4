//! `buffet-core` — foundational types for the buffet queueing simulator.
//!
//! This crate is a dependency of every other `buffet-*` crate.  It has no
//! `buffet-*` dependencies and minimal external ones (only `rand`,
//! `rand_distr` and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `CustomerId`, `PassId`                                    |
//! | [`time`]    | `SimTime` (simulated minutes)                             |
//! | [`rng`]     | `SimRng` (seeded `SmallRng` wrapper), `exp_with_mean`     |
//! | [`course`]  | `Course`, `CourseSet` (service requirements)              |
//! | [`config`]  | `StationConfig`, `WorkloadConfig`, `ScenarioConfig`, …    |
//! | [`error`]   | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to the config and id types.   |

pub mod config;
pub mod course;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{
    QueueCapacity, QueueDiscipline, RequeueWindow, ScenarioConfig, StationConfig, StationKind,
    WorkloadConfig,
};
pub use course::{Course, CourseSet};
pub use error::{CoreError, CoreResult};
pub use ids::{CustomerId, PassId};
pub use rng::{SimRng, exp_with_mean};
pub use time::SimTime;
