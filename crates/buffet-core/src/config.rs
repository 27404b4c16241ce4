//! Station and workload configuration.
//!
//! Typically loaded from a JSON scenario file by the application crate and
//! validated once, up front, before the simulation is built — malformed
//! configuration is fatal at setup, never a runtime condition.

use std::fmt;

use crate::course::Course;
use crate::error::{CoreError, CoreResult};

// ── StationKind ───────────────────────────────────────────────────────────────

/// The five stations of the buffet flow.  All must appear in a scenario,
/// exactly once each.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StationKind {
    Waiting,
    Appetizer,
    MainCourse,
    Dessert,
    Dining,
}

impl StationKind {
    /// All stations, in flow order.
    pub const ALL: [StationKind; 5] = [
        StationKind::Waiting,
        StationKind::Appetizer,
        StationKind::MainCourse,
        StationKind::Dessert,
        StationKind::Dining,
    ];

    /// The three food stations, in visit order.
    pub const FOOD: [StationKind; 3] = [
        StationKind::Appetizer,
        StationKind::MainCourse,
        StationKind::Dessert,
    ];

    /// Index into per-station arrays (flow order).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            StationKind::Waiting => 0,
            StationKind::Appetizer => 1,
            StationKind::MainCourse => 2,
            StationKind::Dessert => 3,
            StationKind::Dining => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StationKind::Waiting => "waiting",
            StationKind::Appetizer => "appetizer",
            StationKind::MainCourse => "main_course",
            StationKind::Dessert => "dessert",
            StationKind::Dining => "dining",
        }
    }
}

impl From<Course> for StationKind {
    fn from(course: Course) -> StationKind {
        match course {
            Course::Appetizer => StationKind::Appetizer,
            Course::MainCourse => StationKind::MainCourse,
            Course::Dessert => StationKind::Dessert,
        }
    }
}

impl fmt::Display for StationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── QueueCapacity ─────────────────────────────────────────────────────────────

/// Bound on the number of queued (not in-service) entities at a station.
///
/// A tagged variant, not a float sentinel: `Unlimited` and `Finite(0)` are
/// different things and must never be conflated.  In scenario files the
/// field is an optional integer — absent means unlimited.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum QueueCapacity {
    #[default]
    Unlimited,
    Finite(u32),
}

impl QueueCapacity {
    /// Would a queue currently holding `queued` entities accept one more?
    #[inline]
    pub fn admits(self, queued: u32) -> bool {
        match self {
            QueueCapacity::Unlimited => true,
            QueueCapacity::Finite(cap) => queued < cap,
        }
    }

    #[inline]
    pub fn is_unlimited(self) -> bool {
        matches!(self, QueueCapacity::Unlimited)
    }
}

impl fmt::Display for QueueCapacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueCapacity::Unlimited => f.write_str("unlimited"),
            QueueCapacity::Finite(cap) => write!(f, "{cap}"),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for QueueCapacity {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            QueueCapacity::Unlimited => serializer.serialize_none(),
            QueueCapacity::Finite(cap) => serializer.serialize_some(cap),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for QueueCapacity {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let cap = Option::<u32>::deserialize(deserializer)?;
        Ok(match cap {
            None => QueueCapacity::Unlimited,
            Some(cap) => QueueCapacity::Finite(cap),
        })
    }
}

// ── QueueDiscipline ───────────────────────────────────────────────────────────

/// How a station's servers share their queue.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum QueueDiscipline {
    /// One shared FIFO queue feeding all servers (proper M/M/c).
    #[default]
    Pooled,
    /// One independent queue per server; arrivals join the shortest queue
    /// among those with spare capacity.
    Partitioned,
}

// ── RequeueWindow ─────────────────────────────────────────────────────────────

/// Time limit for re-queue eligibility, measured from the current pass start.
///
/// The scenario field is an optional number of minutes.  Absent *or zero*
/// means unlimited — the zero sentinel is inherited from the source system's
/// configuration convention and is distinct from a genuine "zero tolerance"
/// window, which this model does not have.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub enum RequeueWindow {
    #[default]
    Unlimited,
    Within(f64),
}

impl RequeueWindow {
    /// Map a configured number of minutes to a window, applying the zero
    /// sentinel.
    pub fn from_minutes(minutes: f64) -> RequeueWindow {
        if minutes <= 0.0 {
            RequeueWindow::Unlimited
        } else {
            RequeueWindow::Within(minutes)
        }
    }

    /// Is a customer whose current pass has run for `elapsed` minutes still
    /// eligible to re-queue?
    #[inline]
    pub fn allows(self, elapsed: f64) -> bool {
        match self {
            RequeueWindow::Unlimited => true,
            RequeueWindow::Within(limit) => elapsed < limit,
        }
    }
}

impl fmt::Display for RequeueWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequeueWindow::Unlimited => f.write_str("unlimited"),
            RequeueWindow::Within(limit) => write!(f, "{limit:.2} min"),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for RequeueWindow {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RequeueWindow::Unlimited => serializer.serialize_none(),
            RequeueWindow::Within(limit) => serializer.serialize_some(limit),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for RequeueWindow {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let minutes = Option::<f64>::deserialize(deserializer)?;
        Ok(match minutes {
            None => RequeueWindow::Unlimited,
            Some(m) => RequeueWindow::from_minutes(m),
        })
    }
}

// ── StationConfig ─────────────────────────────────────────────────────────────

/// Configuration of one service station.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StationConfig {
    pub kind: StationKind,

    /// Number of servers (c in M/M/c).  Must be at least 1.
    pub servers: u32,

    /// Mean of the exponential service-time distribution, in minutes.
    pub mean_service_minutes: f64,

    /// Queue bound.  Absent in scenario files means unlimited.
    #[cfg_attr(feature = "serde", serde(default))]
    pub queue_capacity: QueueCapacity,

    #[cfg_attr(feature = "serde", serde(default))]
    pub discipline: QueueDiscipline,
}

impl StationConfig {
    /// A pooled, unlimited-queue station — the common case in tests.
    pub fn new(kind: StationKind, servers: u32, mean_service_minutes: f64) -> Self {
        StationConfig {
            kind,
            servers,
            mean_service_minutes,
            queue_capacity: QueueCapacity::Unlimited,
            discipline: QueueDiscipline::Pooled,
        }
    }

    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.queue_capacity = QueueCapacity::Finite(capacity);
        self
    }

    pub fn partitioned(mut self) -> Self {
        self.discipline = QueueDiscipline::Partitioned;
        self
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.servers == 0 {
            return Err(CoreError::Config(format!(
                "station '{}' must have at least one server",
                self.kind
            )));
        }
        if !(self.mean_service_minutes.is_finite() && self.mean_service_minutes > 0.0) {
            return Err(CoreError::Config(format!(
                "station '{}' mean service time must be positive, got {}",
                self.kind, self.mean_service_minutes
            )));
        }
        Ok(())
    }
}

// ── WorkloadConfig ────────────────────────────────────────────────────────────

/// Arrival-process and run-level parameters.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkloadConfig {
    /// Mean of the exponential inter-arrival distribution (1/λ), in minutes.
    pub mean_interarrival_minutes: f64,

    /// Probability that a customer re-queues after dining, in [0, 1].
    pub requeue_probability: f64,

    /// Re-queue eligibility window.  Absent or zero means unlimited.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_time_for_requeue: RequeueWindow,

    /// Total simulated minutes to run.
    pub horizon_minutes: f64,

    /// Master RNG seed.  The same seed and scenario reproduce the run exactly.
    #[cfg_attr(feature = "serde", serde(default = "defaults::seed"))]
    pub seed: u64,

    /// How long a customer waits for a waiting-room server before giving up.
    #[cfg_attr(feature = "serde", serde(default = "defaults::abandon_after"))]
    pub abandon_after_minutes: f64,

    /// Re-check interval for the occupancy gates (check-sleep-recheck).
    #[cfg_attr(feature = "serde", serde(default = "defaults::poll_interval"))]
    pub poll_interval_minutes: f64,
}

mod defaults {
    pub fn seed() -> u64 {
        42
    }
    pub fn abandon_after() -> f64 {
        20.0
    }
    pub fn poll_interval() -> f64 {
        0.1
    }
}

impl WorkloadConfig {
    /// A workload with the default abandonment timeout, poll interval and
    /// seed; the shape most tests want.
    pub fn new(mean_interarrival_minutes: f64, horizon_minutes: f64) -> Self {
        WorkloadConfig {
            mean_interarrival_minutes,
            requeue_probability: 0.0,
            max_time_for_requeue: RequeueWindow::Unlimited,
            horizon_minutes,
            seed: defaults::seed(),
            abandon_after_minutes: defaults::abandon_after(),
            poll_interval_minutes: defaults::poll_interval(),
        }
    }

    pub fn with_requeue(mut self, probability: f64, window: RequeueWindow) -> Self {
        self.requeue_probability = probability;
        self.max_time_for_requeue = window;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> CoreResult<()> {
        let positive = [
            ("mean inter-arrival time", self.mean_interarrival_minutes),
            ("simulation horizon", self.horizon_minutes),
            ("abandonment timeout", self.abandon_after_minutes),
            ("poll interval", self.poll_interval_minutes),
        ];
        for (what, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(CoreError::Config(format!(
                    "{what} must be positive, got {value}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.requeue_probability) {
            return Err(CoreError::Config(format!(
                "requeue probability must be in [0, 1], got {}",
                self.requeue_probability
            )));
        }
        Ok(())
    }
}

// ── ScenarioConfig ────────────────────────────────────────────────────────────

/// A complete scenario: the five station configurations plus the workload.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioConfig {
    pub stations: Vec<StationConfig>,
    pub workload: WorkloadConfig,
}

impl ScenarioConfig {
    /// Validate every member and require each of the five stations exactly
    /// once.
    pub fn validate(&self) -> CoreResult<()> {
        self.workload.validate()?;
        let mut seen = [false; StationKind::ALL.len()];
        for station in &self.stations {
            station.validate()?;
            let idx = station.kind.index();
            if seen[idx] {
                return Err(CoreError::DuplicateStation(station.kind));
            }
            seen[idx] = true;
        }
        for kind in StationKind::ALL {
            if !seen[kind.index()] {
                return Err(CoreError::MissingStation(kind));
            }
        }
        Ok(())
    }

    pub fn station(&self, kind: StationKind) -> Option<&StationConfig> {
        self.stations.iter().find(|s| s.kind == kind)
    }
}
