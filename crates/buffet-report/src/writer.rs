//! The `ReportWriter` trait implemented by all backend renderers.

use crate::{ReportResult, SimulationReport};

/// Trait implemented by the text and CSV renderers.
pub trait ReportWriter {
    /// Render one complete report.
    fn write_report(&mut self, report: &SimulationReport) -> ReportResult<()>;

    /// Flush and close any underlying handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> ReportResult<()> {
        Ok(())
    }
}
