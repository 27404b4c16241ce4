//! Plain data rows assembled by the report builder.

use buffet_core::{QueueCapacity, QueueDiscipline, StationKind};

/// Per-server slice of a station's report.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerReportRow {
    pub server: usize,
    pub served: u64,
    /// Mean/max of this server's own queue at each arrival assigned to it.
    /// Zero for pooled stations, which share a single queue.
    pub mean_queue_length: f64,
    pub max_queue_length: u32,
}

/// End-of-run metrics for one station.
#[derive(Debug, Clone, PartialEq)]
pub struct StationReportRow {
    pub kind: StationKind,
    pub servers: u32,
    pub discipline: QueueDiscipline,
    pub capacity: QueueCapacity,
    pub served: u64,
    pub mean_wait: f64,
    pub max_wait: f64,
    pub mean_service: f64,
    pub mean_queue_length: f64,
    pub max_queue_length: u32,
    pub per_server: Vec<ServerReportRow>,
    /// Entities still queued when the clock stopped.
    pub residual_queued: u32,
    /// Entities still being served when the clock stopped.
    pub residual_in_service: u32,
    /// Σ drawn service time / (horizon × servers), as a fraction.
    pub utilization: f64,
}

/// Run-wide metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalReportRow {
    pub arrivals: u64,
    pub completions: u64,
    pub unique_diners: u64,
    pub requeue_count: u64,
    pub unmet_demand_returns: u64,
    pub abandoned_full_queue: u64,
    pub abandoned_excessive_wait: u64,
    pub abandoned_denied_requeue: u64,
    /// Customers still in the flow at the horizon.
    pub in_flight: u64,
    pub mean_time_in_system: f64,
    pub max_time_in_system: f64,
    pub min_time_in_system: f64,
}
