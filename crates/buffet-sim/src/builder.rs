//! Fluent builder for constructing a [`Simulation`].

use rustc_hash::FxHashMap;

use buffet_core::{
    CoreError, ScenarioConfig, SimRng, SimTime, StationConfig, StationKind, WorkloadConfig,
    exp_with_mean,
};
use buffet_station::ServiceStation;

use crate::event_queue::{Event, EventQueue};
use crate::sim::{Simulation, Stations};
use crate::stats::SimStats;
use crate::{SimError, SimResult};

/// Builder for [`Simulation`].
///
/// Collects the workload and the five station configurations, validates the
/// whole scenario once, and produces a ready-to-run simulation with the
/// first arrival already scheduled.
///
/// # Example
///
/// ```rust,ignore
/// let sim = SimBuilder::new(WorkloadConfig::new(2.0, 480.0))
///     .station(StationConfig::new(StationKind::Waiting, 4, 2.0))
///     // … the other four stations …
///     .build()?;
/// sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder {
    workload: WorkloadConfig,
    stations: Vec<StationConfig>,
}

impl SimBuilder {
    pub fn new(workload: WorkloadConfig) -> Self {
        SimBuilder {
            workload,
            stations: Vec::new(),
        }
    }

    /// Build directly from a loaded scenario file.
    pub fn from_scenario(scenario: ScenarioConfig) -> Self {
        SimBuilder {
            workload: scenario.workload,
            stations: scenario.stations,
        }
    }

    /// Add one station configuration.
    pub fn station(mut self, config: StationConfig) -> Self {
        self.stations.push(config);
        self
    }

    /// Add several station configurations.
    pub fn stations<I: IntoIterator<Item = StationConfig>>(mut self, configs: I) -> Self {
        self.stations.extend(configs);
        self
    }

    /// Validate the scenario and assemble the simulation.
    ///
    /// All configuration errors surface here, before any event runs.
    pub fn build(self) -> SimResult<Simulation> {
        let scenario = ScenarioConfig {
            stations: self.stations,
            workload: self.workload,
        };
        scenario.validate().map_err(SimError::Config)?;

        let workload = scenario.workload;
        let interarrival = exp_with_mean(workload.mean_interarrival_minutes)?;

        // Flow order, so StationKind::index() addresses the vector directly.
        let mut stations = Vec::with_capacity(StationKind::ALL.len());
        for kind in StationKind::ALL {
            let config = scenario
                .stations
                .iter()
                .find(|s| s.kind == kind)
                .ok_or(CoreError::MissingStation(kind))?;
            stations.push(ServiceStation::new(config)?);
        }

        let mut rng = SimRng::new(workload.seed);
        let mut events = EventQueue::new();
        let first_gap = rng.sample_exp(&interarrival);
        events.push(SimTime::ZERO.after(first_gap), Event::Arrival);

        let horizon = SimTime(workload.horizon_minutes);
        Ok(Simulation {
            workload,
            interarrival,
            stations: Stations::new(stations),
            customers: FxHashMap::default(),
            events,
            stats: SimStats::default(),
            rng,
            now: SimTime::ZERO,
            horizon,
            next_customer: 1,
        })
    }
}
