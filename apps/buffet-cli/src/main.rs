//! buffet-cli — run a buffet simulation scenario and print the report.
//!
//! Usage:
//!
//! ```text
//! buffet-cli <scenario.json> [--csv DIR] [--seed N]
//! buffet-cli --preset off-peak|peak [--csv DIR] [--seed N]
//! ```
//!
//! A scenario file configures the five stations and the workload; the two
//! presets reproduce the classic off-peak (λ = 1/min) and peak (λ = 5/min)
//! workloads over an 8-hour service window.  `--csv DIR` additionally writes
//! `station_metrics.csv` and `run_summary.csv` into DIR.

use std::fs::{self, File};
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use log::info;

use buffet_core::{
    PassId, RequeueWindow, ScenarioConfig, SimTime, StationConfig, StationKind, WorkloadConfig,
};
use buffet_report::{CsvWriter, ReportWriter, SimulationReport, TextWriter};
use buffet_sim::{SimBuilder, SimObserver};

// ── Observer ──────────────────────────────────────────────────────────────────

/// Logs a progress line every `interval` admissions.
#[derive(Default)]
struct ProgressPrinter {
    admissions: u64,
}

impl ProgressPrinter {
    const INTERVAL: u64 = 500;
}

impl SimObserver for ProgressPrinter {
    fn on_admission(&mut self, now: SimTime, _pass: PassId) {
        self.admissions += 1;
        if self.admissions.is_multiple_of(Self::INTERVAL) {
            info!("{} customers admitted by {now}", self.admissions);
        }
    }
}

// ── Presets ───────────────────────────────────────────────────────────────────

fn preset_stations() -> Vec<StationConfig> {
    vec![
        StationConfig::new(StationKind::Waiting, 4, 2.0).with_capacity(15),
        StationConfig::new(StationKind::Appetizer, 2, 1.0).with_capacity(5),
        StationConfig::new(StationKind::MainCourse, 3, 2.0).with_capacity(5),
        StationConfig::new(StationKind::Dessert, 2, 1.0).with_capacity(5),
        StationConfig::new(StationKind::Dining, 12, 10.0).with_capacity(6),
    ]
}

fn preset(name: &str) -> Result<ScenarioConfig> {
    let workload = match name {
        // λ = 1 customer/min, relaxed re-queue rules.
        "off-peak" => WorkloadConfig::new(1.0, 480.0).with_requeue(0.3, RequeueWindow::Unlimited),
        // λ = 5 customers/min, re-queues only within the first hour.
        "peak" => WorkloadConfig::new(0.2, 480.0).with_requeue(0.3, RequeueWindow::Within(60.0)),
        other => bail!("unknown preset '{other}' (expected 'off-peak' or 'peak')"),
    };
    Ok(ScenarioConfig {
        stations: preset_stations(),
        workload,
    })
}

// ── Argument handling ─────────────────────────────────────────────────────────

struct Args {
    scenario: ScenarioSource,
    csv_dir: Option<PathBuf>,
    seed: Option<u64>,
}

enum ScenarioSource {
    File(PathBuf),
    Preset(String),
}

fn parse_args() -> Result<Args> {
    let mut scenario = None;
    let mut csv_dir = None;
    let mut seed = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--preset" => {
                let name = args.next().context("--preset needs a name")?;
                scenario = Some(ScenarioSource::Preset(name));
            }
            "--csv" => {
                let dir = args.next().context("--csv needs a directory")?;
                csv_dir = Some(PathBuf::from(dir));
            }
            "--seed" => {
                let value = args.next().context("--seed needs a value")?;
                seed = Some(value.parse().context("--seed must be an integer")?);
            }
            "-h" | "--help" => {
                print_usage();
                std::process::exit(0);
            }
            path if !path.starts_with('-') => {
                scenario = Some(ScenarioSource::File(PathBuf::from(path)));
            }
            other => bail!("unknown argument '{other}'"),
        }
    }

    let Some(scenario) = scenario else {
        print_usage();
        bail!("no scenario given");
    };
    Ok(Args {
        scenario,
        csv_dir,
        seed,
    })
}

fn print_usage() {
    eprintln!("usage: buffet-cli <scenario.json> [--csv DIR] [--seed N]");
    eprintln!("       buffet-cli --preset off-peak|peak [--csv DIR] [--seed N]");
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn load_scenario(source: &ScenarioSource) -> Result<ScenarioConfig> {
    match source {
        ScenarioSource::Preset(name) => preset(name),
        ScenarioSource::File(path) => {
            let file = File::open(path)
                .with_context(|| format!("cannot open scenario '{}'", path.display()))?;
            serde_json::from_reader(file)
                .with_context(|| format!("malformed scenario '{}'", path.display()))
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = parse_args()?;

    let mut scenario = load_scenario(&args.scenario)?;
    if let Some(seed) = args.seed {
        scenario.workload.seed = seed;
    }

    info!(
        "running {:.0} simulated minutes, 1/λ = {:.2} min, re-queue p = {:.2} (window: {}), seed {}",
        scenario.workload.horizon_minutes,
        scenario.workload.mean_interarrival_minutes,
        scenario.workload.requeue_probability,
        scenario.workload.max_time_for_requeue,
        scenario.workload.seed,
    );

    let mut sim = SimBuilder::from_scenario(scenario).build()?;
    let start = std::time::Instant::now();
    sim.run(&mut ProgressPrinter::default());
    info!("simulated in {:.2?} wall time", start.elapsed());

    let report = SimulationReport::from_simulation(&sim);

    let stdout = io::stdout();
    let mut text = TextWriter::new(stdout.lock());
    text.write_report(&report)?;
    text.finish()?;

    if let Some(dir) = args.csv_dir {
        fs::create_dir_all(&dir)
            .with_context(|| format!("cannot create output dir '{}'", dir.display()))?;
        let mut csv = CsvWriter::new(&dir)?;
        csv.write_report(&report)?;
        csv.finish()?;
        info!("CSV report written to '{}'", dir.display());
    }

    Ok(())
}
