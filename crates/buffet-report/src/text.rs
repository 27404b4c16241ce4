//! Human-readable report renderer.

use std::io::Write;

use buffet_core::QueueDiscipline;

use crate::writer::ReportWriter;
use crate::{ReportResult, SimulationReport};

const RULE: &str = "======================================================================";

/// Renders a report onto any `io::Write` sink (stdout, a file, a buffer).
pub struct TextWriter<W: Write> {
    out: W,
}

impl<W: Write> TextWriter<W> {
    pub fn new(out: W) -> Self {
        TextWriter { out }
    }

    /// Consume the writer and hand back the sink — handy for tests that
    /// render into a `Vec<u8>`.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportWriter for TextWriter<W> {
    fn write_report(&mut self, report: &SimulationReport) -> ReportResult<()> {
        let out = &mut self.out;
        let g = &report.global;

        writeln!(out, "{RULE}")?;
        writeln!(out, "SIMULATION RESULTS ({:.0} minutes)", report.horizon_minutes)?;
        writeln!(out, "{RULE}")?;

        writeln!(out, "\n--- Overall ---")?;
        writeln!(out, "Total customers arrived:        {}", g.arrivals)?;
        writeln!(out, "Customers completed:            {}", g.completions)?;
        writeln!(out, "Unique customers who dined:     {}", g.unique_diners)?;
        writeln!(out, "Re-queue passes granted:        {}", g.requeue_count)?;
        writeln!(out, "Returns with unmet demands:     {}", g.unmet_demand_returns)?;
        writeln!(out, "Still in system at horizon:     {}", g.in_flight)?;

        writeln!(out, "\n--- Customers who left ---")?;
        writeln!(out, "Waiting queue full at arrival:  {}", g.abandoned_full_queue)?;
        writeln!(out, "Excessive wait:                 {}", g.abandoned_excessive_wait)?;
        writeln!(out, "Denied re-queue:                {}", g.abandoned_denied_requeue)?;

        writeln!(out, "\nTime in system (completed/denied):")?;
        writeln!(out, "  mean {:.2} min   max {:.2} min   min {:.2} min",
            g.mean_time_in_system, g.max_time_in_system, g.min_time_in_system)?;

        writeln!(out, "\n{RULE}")?;
        writeln!(out, "STATION-BY-STATION METRICS")?;
        writeln!(out, "{RULE}")?;

        for station in &report.stations {
            writeln!(out, "\n--- {} ---", station.kind)?;
            writeln!(out, "Servers: {}  (queue capacity: {})", station.servers, station.capacity)?;
            writeln!(out, "Customers served:     {}", station.served)?;
            writeln!(out, "Wait time:            mean {:.2} min, max {:.2} min",
                station.mean_wait, station.max_wait)?;
            writeln!(out, "Service time:         mean {:.2} min", station.mean_service)?;
            writeln!(out, "Queue length:         mean {:.2}, max {}",
                station.mean_queue_length, station.max_queue_length)?;

            match station.discipline {
                QueueDiscipline::Pooled => {
                    writeln!(out, "Per-server breakdown (round-robin attribution):")?;
                    for server in &station.per_server {
                        writeln!(out, "  server {}: {} served", server.server + 1, server.served)?;
                    }
                }
                QueueDiscipline::Partitioned => {
                    writeln!(out, "Per-server breakdown (own queues):")?;
                    for server in &station.per_server {
                        writeln!(out,
                            "  server {}: {} served, queue mean {:.2}, max {}",
                            server.server + 1,
                            server.served,
                            server.mean_queue_length,
                            server.max_queue_length)?;
                    }
                }
            }

            writeln!(out, "At horizon:           {} queued, {} in service",
                station.residual_queued, station.residual_in_service)?;
            writeln!(out, "Server utilization:   {:.2}%", station.utilization * 100.0)?;
        }

        writeln!(out, "\n{RULE}")?;
        Ok(())
    }

    fn finish(&mut self) -> ReportResult<()> {
        self.out.flush()?;
        Ok(())
    }
}
