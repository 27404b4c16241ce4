//! The `ServiceStation` — one named queueing resource group.

use rand_distr::Exp;

use buffet_core::{
    CoreResult, PassId, QueueCapacity, QueueDiscipline, SimRng, SimTime, StationConfig,
    StationKind, exp_with_mean,
};

use crate::discipline::{PartitionedQueue, PooledQueue, Ticket};
use crate::samples::StationSamples;

/// Where an entity joins the queue.
///
/// Re-queued customers are admitted at the front of the waiting station's
/// queue, ahead of previously waiting fresh arrivals; everything else joins
/// at the back.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Placement {
    Back,
    Front,
}

/// A server grant issued by [`ServiceStation::dispatch`].
///
/// The engine schedules a completion event at `done_at` and calls
/// [`ServiceStation::complete`] with `server` when it fires.
#[derive(Copy, Clone, Debug)]
pub struct ServiceGrant {
    pub pass: PassId,
    pub server: usize,
    /// Simulated instant the granted service finishes.
    pub done_at: SimTime,
}

enum QueueLayout {
    Pooled(PooledQueue),
    Partitioned(PartitionedQueue),
}

/// One queueing resource group: `servers` exponential servers behind either
/// a shared or a per-server queue, with an optional queue-capacity bound.
///
/// The station owns its observation logs ([`StationSamples`]) and its
/// admission rule; it never rejects an entity itself — admission control is
/// the caller's job, checked through [`has_available_capacity`] *before*
/// committing with [`enqueue`].
///
/// [`has_available_capacity`]: ServiceStation::has_available_capacity
/// [`enqueue`]: ServiceStation::enqueue
pub struct ServiceStation {
    kind: StationKind,
    servers: u32,
    capacity: QueueCapacity,
    mean_service_minutes: f64,
    service_dist: Exp<f64>,
    layout: QueueLayout,
    samples: StationSamples,
}

impl ServiceStation {
    /// Build a station from a validated configuration.
    pub fn new(config: &StationConfig) -> CoreResult<Self> {
        config.validate()?;
        let layout = match config.discipline {
            QueueDiscipline::Pooled => QueueLayout::Pooled(PooledQueue::new(config.servers)),
            QueueDiscipline::Partitioned => {
                QueueLayout::Partitioned(PartitionedQueue::new(config.servers))
            }
        };
        Ok(ServiceStation {
            kind: config.kind,
            servers: config.servers,
            capacity: config.queue_capacity,
            mean_service_minutes: config.mean_service_minutes,
            service_dist: exp_with_mean(config.mean_service_minutes)?,
            layout,
            samples: StationSamples::new(config.servers),
        })
    }

    pub fn kind(&self) -> StationKind {
        self.kind
    }

    pub fn servers(&self) -> u32 {
        self.servers
    }

    pub fn capacity(&self) -> QueueCapacity {
        self.capacity
    }

    pub fn discipline(&self) -> QueueDiscipline {
        match self.layout {
            QueueLayout::Pooled(_) => QueueDiscipline::Pooled,
            QueueLayout::Partitioned(_) => QueueDiscipline::Partitioned,
        }
    }

    pub fn mean_service_minutes(&self) -> f64 {
        self.mean_service_minutes
    }

    /// Would an arriving entity be admitted right now?
    ///
    /// Pooled: a free server, or room in the shared queue.  Partitioned: at
    /// least one server that is idle or has room in its own queue.  Callers
    /// must check this before [`enqueue`](Self::enqueue) when the capacity
    /// is finite; the station itself never blocks or rejects.
    pub fn has_available_capacity(&self) -> bool {
        match &self.layout {
            QueueLayout::Pooled(q) => q.admits(self.capacity),
            QueueLayout::Partitioned(q) => q.admits(self.capacity),
        }
    }

    /// Commit an entity to the queue, recording the queue-length-at-arrival
    /// snapshot immediately before it joins.
    pub fn enqueue(&mut self, pass: PassId, now: SimTime, placement: Placement) {
        let ticket = Ticket {
            pass,
            entered_at: now,
        };
        let front = placement == Placement::Front;
        match &mut self.layout {
            QueueLayout::Pooled(q) => {
                self.samples.queue_lengths.push(q.queued());
                q.push(ticket, front);
            }
            QueueLayout::Partitioned(q) => {
                self.samples.queue_lengths.push(q.queued());
                let server = q.push(ticket, front, self.capacity);
                self.samples.per_server[server]
                    .queue_lengths
                    .push(q.queued_at(server) - 1);
            }
        }
    }

    /// Grant free servers to queued entities in FIFO order, drawing each
    /// grant's exponential service duration.
    ///
    /// Returns the grants issued at this instant; the engine schedules their
    /// completions.  Wait time (grant − entry) and the drawn service time
    /// are recorded per grant.
    pub fn dispatch(&mut self, now: SimTime, rng: &mut SimRng) -> Vec<ServiceGrant> {
        let mut grants = Vec::new();
        loop {
            let next = match &mut self.layout {
                QueueLayout::Pooled(q) => q.start_next(),
                QueueLayout::Partitioned(q) => q.start_next(),
            };
            let Some((ticket, server)) = next else {
                break;
            };
            self.samples.wait_times.push(now.since(ticket.entered_at));
            let service_time = rng.sample_exp(&self.service_dist);
            self.samples.service_times.push(service_time);
            grants.push(ServiceGrant {
                pass: ticket.pass,
                server,
                done_at: now.after(service_time),
            });
        }
        debug_assert!(
            self.in_service() <= self.servers,
            "server-count invariant violated at '{}'",
            self.kind
        );
        grants
    }

    /// Release the server slot of a finished service and bump the served
    /// counters.
    pub fn complete(&mut self, server: usize) {
        match &mut self.layout {
            QueueLayout::Pooled(q) => q.release(),
            QueueLayout::Partitioned(q) => q.release(server),
        }
        self.samples.served += 1;
        self.samples.per_server[server].served += 1;
    }

    /// Remove a still-queued entity whose wait was abandoned.  Returns
    /// `false` if the entity was no longer queued (already granted).
    pub fn cancel(&mut self, pass: PassId) -> bool {
        match &mut self.layout {
            QueueLayout::Pooled(q) => q.cancel(pass),
            QueueLayout::Partitioned(q) => q.cancel(pass),
        }
    }

    /// Entities currently waiting in the queue(s).
    pub fn queued(&self) -> u32 {
        match &self.layout {
            QueueLayout::Pooled(q) => q.queued(),
            QueueLayout::Partitioned(q) => q.queued(),
        }
    }

    /// Entities currently being served.
    pub fn in_service(&self) -> u32 {
        match &self.layout {
            QueueLayout::Pooled(q) => q.in_service(),
            QueueLayout::Partitioned(q) => q.in_service(),
        }
    }

    /// Queued plus in-service — the station's total occupancy.
    pub fn occupancy(&self) -> u32 {
        self.queued() + self.in_service()
    }

    pub fn samples(&self) -> &StationSamples {
        &self.samples
    }
}
