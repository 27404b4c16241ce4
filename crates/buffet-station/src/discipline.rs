//! Queue-topology internals: one shared FIFO for all servers, or one FIFO
//! per server with join-shortest-available-queue admission.
//!
//! Both layouts maintain the same invariants: entities in service never
//! exceed the server count, and a non-empty queue implies every (relevant)
//! server is busy — dispatch drains queues the moment a server frees up, so
//! nobody waits while a usable server is idle.

use std::collections::VecDeque;

use buffet_core::{PassId, QueueCapacity, SimTime};

/// A queued entity awaiting a server grant.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Ticket {
    pub pass: PassId,
    pub entered_at: SimTime,
}

// ── Pooled (shared queue, proper M/M/c) ───────────────────────────────────────

#[derive(Debug)]
pub(crate) struct PooledQueue {
    queue: VecDeque<Ticket>,
    servers: u32,
    busy: u32,
    /// Round-robin attribution index.  Reporting only — the shared queue is
    /// FIFO regardless of which server a grant is attributed to.
    next_server: usize,
}

impl PooledQueue {
    pub fn new(servers: u32) -> Self {
        PooledQueue {
            queue: VecDeque::new(),
            servers,
            busy: 0,
            next_server: 0,
        }
    }

    /// An arriving entity is admissible iff it would not queue beyond
    /// capacity.  A free server means the entity will not queue at all, so
    /// even a zero-capacity queue admits it.
    pub fn admits(&self, capacity: QueueCapacity) -> bool {
        self.busy < self.servers || capacity.admits(self.queue.len() as u32)
    }

    pub fn push(&mut self, ticket: Ticket, front: bool) {
        if front {
            self.queue.push_front(ticket);
        } else {
            self.queue.push_back(ticket);
        }
    }

    /// Grant the next queued ticket to a free server, if both exist.
    pub fn start_next(&mut self) -> Option<(Ticket, usize)> {
        if self.busy >= self.servers {
            return None;
        }
        let ticket = self.queue.pop_front()?;
        self.busy += 1;
        let server = self.next_server;
        self.next_server = (self.next_server + 1) % self.servers as usize;
        Some((ticket, server))
    }

    pub fn release(&mut self) {
        debug_assert!(self.busy > 0, "release on an idle pooled station");
        self.busy -= 1;
    }

    pub fn cancel(&mut self, pass: PassId) -> bool {
        let before = self.queue.len();
        self.queue.retain(|t| t.pass != pass);
        self.queue.len() != before
    }

    pub fn queued(&self) -> u32 {
        self.queue.len() as u32
    }

    pub fn in_service(&self) -> u32 {
        self.busy
    }
}

// ── Partitioned (per-server queues) ───────────────────────────────────────────

#[derive(Debug)]
pub(crate) struct PartitionedQueue {
    queues: Vec<VecDeque<Ticket>>,
    busy: Vec<bool>,
}

impl PartitionedQueue {
    pub fn new(servers: u32) -> Self {
        PartitionedQueue {
            queues: (0..servers).map(|_| VecDeque::new()).collect(),
            busy: vec![false; servers as usize],
        }
    }

    fn server_admits(&self, server: usize, capacity: QueueCapacity) -> bool {
        !self.busy[server] || capacity.admits(self.queues[server].len() as u32)
    }

    pub fn admits(&self, capacity: QueueCapacity) -> bool {
        (0..self.queues.len()).any(|s| self.server_admits(s, capacity))
    }

    /// Join-shortest-available-queue: the shortest queue among servers with
    /// spare capacity, lowest index on ties.
    ///
    /// Callers check [`admits`](Self::admits) first; if every server is
    /// saturated the ticket joins the shortest queue outright, which keeps
    /// the operation total but is never reached through the admission path.
    pub fn push(&mut self, ticket: Ticket, front: bool, capacity: QueueCapacity) -> usize {
        let target = (0..self.queues.len())
            .filter(|&s| self.server_admits(s, capacity))
            .min_by_key(|&s| self.queues[s].len())
            .unwrap_or(0);
        if front {
            self.queues[target].push_front(ticket);
        } else {
            self.queues[target].push_back(ticket);
        }
        target
    }

    pub fn start_next(&mut self) -> Option<(Ticket, usize)> {
        for server in 0..self.queues.len() {
            if !self.busy[server] {
                if let Some(ticket) = self.queues[server].pop_front() {
                    self.busy[server] = true;
                    return Some((ticket, server));
                }
            }
        }
        None
    }

    pub fn release(&mut self, server: usize) {
        debug_assert!(self.busy[server], "release on an idle server");
        self.busy[server] = false;
    }

    pub fn cancel(&mut self, pass: PassId) -> bool {
        for queue in &mut self.queues {
            let before = queue.len();
            queue.retain(|t| t.pass != pass);
            if queue.len() != before {
                return true;
            }
        }
        false
    }

    pub fn queued(&self) -> u32 {
        self.queues.iter().map(|q| q.len() as u32).sum()
    }

    pub fn queued_at(&self, server: usize) -> u32 {
        self.queues[server].len() as u32
    }

    pub fn in_service(&self) -> u32 {
        self.busy.iter().filter(|&&b| b).count() as u32
    }
}
