//! Integration tests for buffet-report.

use buffet_core::{RequeueWindow, StationConfig, StationKind, WorkloadConfig};
use buffet_sim::{NoopObserver, SimBuilder, Simulation};

use crate::SimulationReport;

fn stations() -> Vec<StationConfig> {
    vec![
        StationConfig::new(StationKind::Waiting, 2, 1.0),
        StationConfig::new(StationKind::Appetizer, 2, 0.5),
        StationConfig::new(StationKind::MainCourse, 2, 1.0).partitioned(),
        StationConfig::new(StationKind::Dessert, 2, 0.5),
        StationConfig::new(StationKind::Dining, 8, 4.0).with_capacity(4),
    ]
}

fn finished_run() -> Simulation {
    let workload = WorkloadConfig::new(1.0, 240.0)
        .with_requeue(0.3, RequeueWindow::Within(90.0));
    let mut sim = SimBuilder::new(workload)
        .stations(stations())
        .build()
        .unwrap();
    sim.run(&mut NoopObserver);
    sim
}

#[cfg(test)]
mod build {
    use super::*;
    use buffet_core::QueueDiscipline;

    #[test]
    fn report_building_is_idempotent() {
        let sim = finished_run();
        let first = SimulationReport::from_simulation(&sim);
        let second = SimulationReport::from_simulation(&sim);
        assert_eq!(first, second);
    }

    #[test]
    fn rows_cover_all_stations_in_flow_order() {
        let report = SimulationReport::from_simulation(&finished_run());
        let kinds: Vec<StationKind> = report.stations.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, StationKind::ALL);
    }

    #[test]
    fn global_row_reconciles_with_itself() {
        let report = SimulationReport::from_simulation(&finished_run());
        let g = &report.global;
        assert_eq!(
            g.arrivals,
            g.completions
                + g.abandoned_full_queue
                + g.abandoned_excessive_wait
                + g.abandoned_denied_requeue
                + g.in_flight
        );
        assert!(g.min_time_in_system <= g.mean_time_in_system);
        assert!(g.mean_time_in_system <= g.max_time_in_system);
    }

    #[test]
    fn utilization_is_a_sane_fraction() {
        let report = SimulationReport::from_simulation(&finished_run());
        for station in &report.stations {
            assert!(station.utilization >= 0.0, "{}: negative utilization", station.kind);
            // Draws for services still running at the horizon are included,
            // so a saturated station can nudge past 1.0 — but not far.
            assert!(station.utilization < 1.5, "{}: implausible utilization", station.kind);
        }
    }

    #[test]
    fn partitioned_station_reports_per_server_queues() {
        let report = SimulationReport::from_simulation(&finished_run());
        let main = report
            .stations
            .iter()
            .find(|s| s.kind == StationKind::MainCourse)
            .unwrap();
        assert_eq!(main.discipline, QueueDiscipline::Partitioned);
        assert_eq!(main.per_server.len(), 2);
        let attributed: u64 = main.per_server.iter().map(|s| s.served).sum();
        assert_eq!(attributed, main.served);
    }

    #[test]
    fn empty_run_reports_zeros() {
        // An arrival stream too sparse for the horizon: nothing ever happens.
        let workload = WorkloadConfig::new(1e9, 1.0);
        let mut sim = SimBuilder::new(workload)
            .stations(stations())
            .build()
            .unwrap();
        sim.run(&mut NoopObserver);
        let report = SimulationReport::from_simulation(&sim);

        assert_eq!(report.global.arrivals, 0);
        assert_eq!(report.global.mean_time_in_system, 0.0);
        assert_eq!(report.global.min_time_in_system, 0.0);
        for station in &report.stations {
            assert_eq!(station.served, 0);
            assert_eq!(station.mean_wait, 0.0);
            assert_eq!(station.mean_queue_length, 0.0);
            assert_eq!(station.utilization, 0.0);
        }
    }
}

#[cfg(test)]
mod text {
    use super::*;
    use crate::writer::ReportWriter;
    use crate::TextWriter;

    fn render(report: &SimulationReport) -> String {
        let mut writer = TextWriter::new(Vec::new());
        writer.write_report(report).unwrap();
        writer.finish().unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn mentions_every_station() {
        let report = SimulationReport::from_simulation(&finished_run());
        let text = render(&report);
        for kind in StationKind::ALL {
            assert!(text.contains(kind.as_str()), "missing section for {kind}");
        }
        assert!(text.contains("SIMULATION RESULTS"));
    }

    #[test]
    fn rendering_is_idempotent() {
        let report = SimulationReport::from_simulation(&finished_run());
        assert_eq!(render(&report), render(&report));
    }
}

#[cfg(test)]
mod csv {
    use super::*;
    use crate::writer::ReportWriter;
    use crate::CsvWriter;
    use tempfile::TempDir;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn files_created_with_headers() {
        let dir = tmp();
        let mut writer = CsvWriter::new(dir.path()).unwrap();
        writer.finish().unwrap();

        let mut rdr = ::csv::Reader::from_path(dir.path().join("station_metrics.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers[0], "station");
        assert_eq!(headers[1], "servers");

        assert!(dir.path().join("run_summary.csv").exists());
    }

    #[test]
    fn one_station_row_per_station() {
        let dir = tmp();
        let report = SimulationReport::from_simulation(&finished_run());
        let mut writer = CsvWriter::new(dir.path()).unwrap();
        writer.write_report(&report).unwrap();
        writer.finish().unwrap();

        let mut rdr = ::csv::Reader::from_path(dir.path().join("station_metrics.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 5);
        assert_eq!(&rows[0][0], "waiting");
        assert_eq!(&rows[4][0], "dining");

        let mut rdr = ::csv::Reader::from_path(dir.path().join("run_summary.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][1], report.global.arrivals.to_string());
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tmp();
        let mut writer = CsvWriter::new(dir.path()).unwrap();
        writer.finish().unwrap();
        writer.finish().unwrap();
    }
}
