//! Append-only observation logs owned by a station.
//!
//! Stations write samples as side effects of serving; nothing reads them
//! until reporting time, and reporting never mutates them — building a
//! report twice yields identical output.

/// Observations accumulated by one station over a run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StationSamples {
    /// Minutes between joining the queue and receiving a server grant.
    pub wait_times: Vec<f64>,
    /// Drawn service durations, recorded at grant time.
    pub service_times: Vec<f64>,
    /// Total queued entities observed immediately before each arrival joined.
    pub queue_lengths: Vec<u32>,
    /// Entities whose service ran to completion.
    pub served: u64,
    /// Per-server breakdown, indexed by server.
    pub per_server: Vec<ServerSamples>,
}

/// Per-server slice of a station's observations.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ServerSamples {
    pub served: u64,
    /// Queue length of this server's own queue at each arrival assigned to
    /// it.  Only populated for partitioned stations; a pooled station has a
    /// single shared queue.
    pub queue_lengths: Vec<u32>,
}

impl StationSamples {
    pub fn new(servers: u32) -> Self {
        StationSamples {
            per_server: vec![ServerSamples::default(); servers as usize],
            ..StationSamples::default()
        }
    }

    pub fn mean_wait(&self) -> f64 {
        mean_f64(&self.wait_times)
    }

    pub fn max_wait(&self) -> f64 {
        self.wait_times.iter().copied().fold(0.0, f64::max)
    }

    pub fn mean_service(&self) -> f64 {
        mean_f64(&self.service_times)
    }

    pub fn total_service_time(&self) -> f64 {
        self.service_times.iter().sum()
    }

    pub fn mean_queue_length(&self) -> f64 {
        mean_u32(&self.queue_lengths)
    }

    pub fn max_queue_length(&self) -> u32 {
        max_u32(&self.queue_lengths)
    }
}

// Summary helpers: statistics over no data report zero, never an error.

pub fn mean_f64(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        0.0
    } else {
        samples.iter().sum::<f64>() / samples.len() as f64
    }
}

pub fn mean_u32(samples: &[u32]) -> f64 {
    if samples.is_empty() {
        0.0
    } else {
        samples.iter().map(|&v| v as f64).sum::<f64>() / samples.len() as f64
    }
}

pub fn max_u32(samples: &[u32]) -> u32 {
    samples.iter().copied().max().unwrap_or(0)
}
