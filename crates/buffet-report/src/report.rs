//! Building a [`SimulationReport`] from a finished run.

use buffet_core::QueueDiscipline;
use buffet_station::{ServiceStation, max_u32, mean_u32};
use buffet_sim::Simulation;

use crate::row::{GlobalReportRow, ServerReportRow, StationReportRow};

/// The complete end-of-run report: one row per station plus the run-wide
/// row.
///
/// Building is a pure read of the simulation's samples and counters;
/// building twice from the same finished run yields identical reports.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    pub horizon_minutes: f64,
    pub stations: Vec<StationReportRow>,
    pub global: GlobalReportRow,
}

impl SimulationReport {
    pub fn from_simulation(sim: &Simulation) -> SimulationReport {
        let horizon_minutes = sim.horizon().0;
        let stations = sim
            .stations()
            .iter()
            .map(|station| station_row(station, horizon_minutes))
            .collect();

        let stats = sim.stats();
        let global = GlobalReportRow {
            arrivals: stats.arrivals,
            completions: stats.completions,
            unique_diners: stats.unique_diners.len() as u64,
            requeue_count: stats.requeue_count,
            unmet_demand_returns: stats.unmet_demand_returns,
            abandoned_full_queue: stats.abandoned_full_queue,
            abandoned_excessive_wait: stats.abandoned_excessive_wait,
            abandoned_denied_requeue: stats.abandoned_denied_requeue,
            in_flight: sim.in_flight() as u64,
            mean_time_in_system: stats.mean_time_in_system(),
            max_time_in_system: stats.max_time_in_system(),
            min_time_in_system: stats.min_time_in_system(),
        };

        SimulationReport {
            horizon_minutes,
            stations,
            global,
        }
    }
}

fn station_row(station: &ServiceStation, horizon_minutes: f64) -> StationReportRow {
    let samples = station.samples();
    let per_server = samples
        .per_server
        .iter()
        .enumerate()
        .map(|(server, s)| ServerReportRow {
            server,
            served: s.served,
            mean_queue_length: mean_u32(&s.queue_lengths),
            max_queue_length: max_u32(&s.queue_lengths),
        })
        .collect();

    // Per-server queue metrics only exist where servers own queues; the
    // discipline tag lets renderers suppress the meaningless pooled columns.
    let discipline = station.discipline();
    debug_assert!(
        discipline == QueueDiscipline::Partitioned
            || samples.per_server.iter().all(|s| s.queue_lengths.is_empty())
    );

    StationReportRow {
        kind: station.kind(),
        servers: station.servers(),
        discipline,
        capacity: station.capacity(),
        served: samples.served,
        mean_wait: samples.mean_wait(),
        max_wait: samples.max_wait(),
        mean_service: samples.mean_service(),
        mean_queue_length: samples.mean_queue_length(),
        max_queue_length: samples.max_queue_length(),
        per_server,
        residual_queued: station.queued(),
        residual_in_service: station.in_service(),
        utilization: samples.total_service_time() / (horizon_minutes * station.servers() as f64),
    }
}
