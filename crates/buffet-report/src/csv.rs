//! CSV report backend.
//!
//! Creates two files in the configured output directory:
//! - `station_metrics.csv` — one row per station
//! - `run_summary.csv` — one row per run

use std::fs::File;
use std::path::Path;

use csv::Writer;

use buffet_core::QueueDiscipline;

use crate::writer::ReportWriter;
use crate::{ReportResult, SimulationReport};

/// Writes a report to two CSV files.
pub struct CsvWriter {
    stations: Writer<File>,
    summary: Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> ReportResult<Self> {
        let mut stations = Writer::from_path(dir.join("station_metrics.csv"))?;
        stations.write_record([
            "station",
            "servers",
            "discipline",
            "queue_capacity",
            "served",
            "mean_wait_min",
            "max_wait_min",
            "mean_service_min",
            "mean_queue_length",
            "max_queue_length",
            "residual_queued",
            "residual_in_service",
            "utilization",
        ])?;

        let mut summary = Writer::from_path(dir.join("run_summary.csv"))?;
        summary.write_record([
            "horizon_min",
            "arrivals",
            "completions",
            "unique_diners",
            "requeue_count",
            "unmet_demand_returns",
            "abandoned_full_queue",
            "abandoned_excessive_wait",
            "abandoned_denied_requeue",
            "in_flight",
            "mean_time_in_system_min",
            "max_time_in_system_min",
            "min_time_in_system_min",
        ])?;

        Ok(Self {
            stations,
            summary,
            finished: false,
        })
    }
}

impl ReportWriter for CsvWriter {
    fn write_report(&mut self, report: &SimulationReport) -> ReportResult<()> {
        for station in &report.stations {
            let discipline = match station.discipline {
                QueueDiscipline::Pooled => "pooled",
                QueueDiscipline::Partitioned => "partitioned",
            };
            self.stations.write_record(&[
                station.kind.as_str().to_string(),
                station.servers.to_string(),
                discipline.to_string(),
                station.capacity.to_string(),
                station.served.to_string(),
                format!("{:.4}", station.mean_wait),
                format!("{:.4}", station.max_wait),
                format!("{:.4}", station.mean_service),
                format!("{:.4}", station.mean_queue_length),
                station.max_queue_length.to_string(),
                station.residual_queued.to_string(),
                station.residual_in_service.to_string(),
                format!("{:.4}", station.utilization),
            ])?;
        }

        let g = &report.global;
        self.summary.write_record(&[
            format!("{:.2}", report.horizon_minutes),
            g.arrivals.to_string(),
            g.completions.to_string(),
            g.unique_diners.to_string(),
            g.requeue_count.to_string(),
            g.unmet_demand_returns.to_string(),
            g.abandoned_full_queue.to_string(),
            g.abandoned_excessive_wait.to_string(),
            g.abandoned_denied_requeue.to_string(),
            g.in_flight.to_string(),
            format!("{:.4}", g.mean_time_in_system),
            format!("{:.4}", g.max_time_in_system),
            format!("{:.4}", g.min_time_in_system),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> ReportResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.stations.flush()?;
        self.summary.flush()?;
        Ok(())
    }
}
