//! The `Simulation` struct and its event loop.

use log::{debug, info, trace};
use rand_distr::Exp;
use rustc_hash::FxHashMap;

use buffet_core::{
    Course, CourseSet, CustomerId, PassId, QueueCapacity, SimRng, SimTime, StationKind,
    WorkloadConfig,
};
use buffet_station::{Placement, ServiceStation};

use crate::customer::{Customer, CustomerState};
use crate::event_queue::{Event, EventQueue};
use crate::observer::SimObserver;
use crate::stats::{Outcome, SimStats};

// ── Stations ──────────────────────────────────────────────────────────────────

/// The five stations of a run, indexed by [`StationKind`] in flow order.
pub struct Stations(Vec<ServiceStation>);

impl Stations {
    pub(crate) fn new(stations: Vec<ServiceStation>) -> Self {
        debug_assert_eq!(stations.len(), StationKind::ALL.len());
        Stations(stations)
    }

    pub fn get(&self, kind: StationKind) -> &ServiceStation {
        &self.0[kind.index()]
    }

    fn get_mut(&mut self, kind: StationKind) -> &mut ServiceStation {
        &mut self.0[kind.index()]
    }

    /// Stations in flow order (waiting, appetizer, main_course, dessert,
    /// dining).
    pub fn iter(&self) -> impl Iterator<Item = &ServiceStation> {
        self.0.iter()
    }

    /// Combined occupancy (queued + in service) of the three food stations.
    pub fn food_occupancy(&self) -> u32 {
        StationKind::FOOD
            .into_iter()
            .map(|kind| self.get(kind).occupancy())
            .sum()
    }
}

// ── Simulation ────────────────────────────────────────────────────────────────

/// One buffet simulation run.
///
/// Owns every piece of run state — stations, in-flight customers, pending
/// events, counters, and the RNG — so constructing a new `Simulation` is the
/// only way to reset anything.  Single-threaded by design: one event handler
/// runs at a time and runs to its next suspension point, so shared counters
/// are only ever touched at suspension-free points.
///
/// Create via [`SimBuilder`][crate::SimBuilder], drive with [`run`], then
/// read [`stats`], [`stations`] and [`in_flight`] for reporting.
///
/// [`run`]: Simulation::run
/// [`stats`]: Simulation::stats
/// [`stations`]: Simulation::stations
/// [`in_flight`]: Simulation::in_flight
pub struct Simulation {
    pub(crate) workload: WorkloadConfig,
    pub(crate) interarrival: Exp<f64>,
    pub(crate) stations: Stations,
    pub(crate) customers: FxHashMap<PassId, Customer>,
    pub(crate) events: EventQueue,
    pub(crate) stats: SimStats,
    pub(crate) rng: SimRng,
    pub(crate) now: SimTime,
    pub(crate) horizon: SimTime,
    pub(crate) next_customer: u32,
}

impl Simulation {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the event loop until the horizon.
    ///
    /// Events scheduled at or beyond the horizon are left pending; the
    /// customers they belong to are reported as in flight.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) {
        while let Some((now, event)) = self.events.pop_before(self.horizon) {
            debug_assert!(now >= self.now, "event queue went back in time");
            self.now = now;
            self.handle(event, observer);
        }
        self.now = self.horizon;
        info!(
            "run complete at {}: {} arrivals, {} completions, {} abandoned, {} in flight",
            self.now,
            self.stats.arrivals,
            self.stats.completions,
            self.stats.abandoned_total(),
            self.in_flight()
        );
        observer.on_sim_end(self.now);
    }

    /// Current simulated time (the horizon, once [`run`](Simulation::run)
    /// returns).
    pub fn now(&self) -> SimTime {
        self.now
    }

    pub fn horizon(&self) -> SimTime {
        self.horizon
    }

    pub fn workload(&self) -> &WorkloadConfig {
        &self.workload
    }

    pub fn stats(&self) -> &SimStats {
        &self.stats
    }

    pub fn stations(&self) -> &Stations {
        &self.stations
    }

    /// Customers still somewhere in the flow (queued, in service, or
    /// polling a gate).
    pub fn in_flight(&self) -> usize {
        self.customers.len()
    }

    // ── Event dispatch ────────────────────────────────────────────────────

    fn handle<O: SimObserver>(&mut self, event: Event, observer: &mut O) {
        match event {
            Event::Arrival => self.handle_arrival(observer),
            Event::WaitTimeout { pass, attempt } => {
                self.handle_wait_timeout(pass, attempt, observer)
            }
            Event::ServiceDone {
                pass,
                station,
                server,
            } => self.handle_service_done(pass, station, server, observer),
            Event::PollCapacity { pass } => self.handle_poll(pass),
        }
    }

    // ── Arrival process ───────────────────────────────────────────────────

    /// One firing of the arrival process: reschedule itself, synthesize a
    /// customer, and apply waiting-room admission control.
    fn handle_arrival<O: SimObserver>(&mut self, observer: &mut O) {
        let gap = self.rng.sample_exp(&self.interarrival);
        self.events.push(self.now.after(gap), Event::Arrival);

        let customer = CustomerId(self.next_customer);
        self.next_customer += 1;
        self.stats.arrivals += 1;
        let pass = PassId::first(customer);
        let required = CourseSet::sample_nonempty(&mut self.rng);

        // Admission control lives here, not in the station: a full waiting
        // queue turns the entity away before it ever enters the simulation.
        if !self.stations.get(StationKind::Waiting).has_available_capacity() {
            debug!("{pass} balked at {}: waiting queue full", self.now);
            self.stats.record(Outcome::AbandonedFullQueue);
            observer.on_terminal(self.now, pass, Outcome::AbandonedFullQueue);
            return;
        }

        trace!("{pass} admitted at {} requiring {required}", self.now);
        self.customers
            .insert(pass, Customer::new(pass, self.now, required));
        observer.on_admission(self.now, pass);
        self.enter_waiting(pass, Placement::Back);
    }

    // ── Waiting room ──────────────────────────────────────────────────────

    /// Join the waiting queue and start the grant-vs-abandonment race.
    fn enter_waiting(&mut self, pass: PassId, placement: Placement) {
        let now = self.now;
        let timeout = self.workload.abandon_after_minutes;
        let Some(customer) = self.customers.get_mut(&pass) else {
            return;
        };
        customer.state = CustomerState::QueuedAtWaiting;
        customer.wait_attempt += 1;
        let attempt = customer.wait_attempt;

        self.stations
            .get_mut(StationKind::Waiting)
            .enqueue(pass, now, placement);
        self.events
            .push(now.after(timeout), Event::WaitTimeout { pass, attempt });
        self.dispatch(StationKind::Waiting);
    }

    /// An abandonment timer fired.  It only applies if the customer is still
    /// queued at the waiting station *and* the timer belongs to the current
    /// waiting attempt; anything else is a stale loser of the race.
    fn handle_wait_timeout<O: SimObserver>(&mut self, pass: PassId, attempt: u32, observer: &mut O) {
        let Some(customer) = self.customers.get(&pass) else {
            return;
        };
        if customer.wait_attempt != attempt || customer.state != CustomerState::QueuedAtWaiting {
            return;
        }

        let cancelled = self.stations.get_mut(StationKind::Waiting).cancel(pass);
        debug_assert!(cancelled, "timed-out customer was not queued");
        self.customers.remove(&pass);
        debug!("{pass} abandoned at {}: waited too long", self.now);
        self.stats.record(Outcome::AbandonedExcessiveWait);
        observer.on_terminal(self.now, pass, Outcome::AbandonedExcessiveWait);
    }

    // ── Service grants and completions ────────────────────────────────────

    /// Hand free servers at `kind` to queued customers and schedule their
    /// completions.
    fn dispatch(&mut self, kind: StationKind) {
        let grants = self.stations.get_mut(kind).dispatch(self.now, &mut self.rng);
        for grant in grants {
            if kind == StationKind::Waiting {
                if let Some(customer) = self.customers.get_mut(&grant.pass) {
                    // The grant beat the abandonment timer; the timer event
                    // is now stale and will be discarded when it fires.
                    customer.state = CustomerState::ServingAtWaiting;
                }
            }
            self.events.push(
                grant.done_at,
                Event::ServiceDone {
                    pass: grant.pass,
                    station: kind,
                    server: grant.server,
                },
            );
        }
    }

    fn handle_service_done<O: SimObserver>(
        &mut self,
        pass: PassId,
        station: StationKind,
        server: usize,
        observer: &mut O,
    ) {
        self.stations.get_mut(station).complete(server);
        // The freed slot may immediately admit the next queued customer.
        self.dispatch(station);

        match station {
            StationKind::Waiting => self.after_waiting(pass),
            StationKind::Appetizer => self.after_food(pass, Course::Appetizer),
            StationKind::MainCourse => self.after_food(pass, Course::MainCourse),
            StationKind::Dessert => self.after_food(pass, Course::Dessert),
            StationKind::Dining => self.after_dining(pass, observer),
        }
    }

    // ── Buffet-room gate ──────────────────────────────────────────────────

    /// Waiting service finished: hold at the buffet-room gate until the food
    /// area has room under the dining station's total capacity.
    fn after_waiting(&mut self, pass: PassId) {
        let Some(customer) = self.customers.get_mut(&pass) else {
            return;
        };
        customer.state = CustomerState::AwaitingBuffetRoom;
        customer.cleared_this_round = false;
        self.check_buffet_gate(pass);
    }

    /// Total headcount the food area may hold: the dining station's servers
    /// plus its queue bound, or unbounded when the dining queue is
    /// unlimited.
    fn buffet_gate_capacity(&self) -> Option<u32> {
        let dining = self.stations.get(StationKind::Dining);
        match dining.capacity() {
            QueueCapacity::Unlimited => None,
            QueueCapacity::Finite(cap) => Some(dining.servers() + cap),
        }
    }

    /// Check-sleep-recheck: a closed gate is re-polled at a fixed interval
    /// rather than woken by capacity release elsewhere.
    fn check_buffet_gate(&mut self, pass: PassId) {
        let open = match self.buffet_gate_capacity() {
            None => true,
            Some(cap) => self.stations.food_occupancy() < cap,
        };
        if open {
            self.continue_food_round(pass, 0);
        } else {
            self.events.push(
                self.now.after(self.workload.poll_interval_minutes),
                Event::PollCapacity { pass },
            );
        }
    }

    fn handle_poll(&mut self, pass: PassId) {
        let Some(customer) = self.customers.get(&pass) else {
            return;
        };
        match customer.state {
            CustomerState::AwaitingBuffetRoom => self.check_buffet_gate(pass),
            CustomerState::AwaitingDiningRoom => self.check_dining_gate(pass),
            // The customer moved on; a poll for a gate it no longer stands
            // at is discarded.
            _ => {}
        }
    }

    // ── Food rounds ───────────────────────────────────────────────────────

    /// Visit the next still-required course from `start_index` onward,
    /// skipping stations without capacity this round.
    fn continue_food_round(&mut self, pass: PassId, start_index: usize) {
        let Some(customer) = self.customers.get(&pass) else {
            return;
        };
        let remaining = customer.remaining;

        for index in start_index..Course::ORDER.len() {
            let course = Course::ORDER[index];
            if !remaining.contains(course) {
                continue;
            }
            let kind = StationKind::from(course);
            if self.stations.get(kind).has_available_capacity() {
                if let Some(customer) = self.customers.get_mut(&pass) {
                    customer.state = CustomerState::AtFood(course);
                }
                self.stations
                    .get_mut(kind)
                    .enqueue(pass, self.now, Placement::Back);
                self.dispatch(kind);
                return;
            }
            trace!("{pass} skips {course} at {}: no capacity", self.now);
        }

        self.end_food_round(pass);
    }

    /// One course obtained: clear the demand and continue the round from the
    /// next course in visit order.
    fn after_food(&mut self, pass: PassId, course: Course) {
        let Some(customer) = self.customers.get_mut(&pass) else {
            return;
        };
        customer.remaining.remove(course);
        customer.cleared_this_round = true;
        let next_index = Course::ORDER
            .iter()
            .position(|&c| c == course)
            .map_or(Course::ORDER.len(), |i| i + 1);
        self.continue_food_round(pass, next_index);
    }

    /// A full round over the remaining demands is finished: dine if done,
    /// go again if the round made progress, or fall back to the waiting
    /// room if it cleared nothing.
    fn end_food_round(&mut self, pass: PassId) {
        let Some(customer) = self.customers.get_mut(&pass) else {
            return;
        };
        if customer.remaining.is_empty() {
            customer.state = CustomerState::AwaitingDiningRoom;
            self.check_dining_gate(pass);
        } else if customer.cleared_this_round {
            customer.cleared_this_round = false;
            self.continue_food_round(pass, 0);
        } else {
            debug!(
                "{pass} cleared nothing this round at {}; back to waiting",
                self.now
            );
            self.enter_waiting(pass, Placement::Back);
        }
    }

    // ── Dining ────────────────────────────────────────────────────────────

    fn check_dining_gate(&mut self, pass: PassId) {
        if self.stations.get(StationKind::Dining).has_available_capacity() {
            if let Some(customer) = self.customers.get_mut(&pass) {
                customer.state = CustomerState::AtDining;
            }
            self.stations
                .get_mut(StationKind::Dining)
                .enqueue(pass, self.now, Placement::Back);
            self.dispatch(StationKind::Dining);
        } else {
            self.events.push(
                self.now.after(self.workload.poll_interval_minutes),
                Event::PollCapacity { pass },
            );
        }
    }

    /// Dining finished: the terminal branch point of a pass.
    fn after_dining<O: SimObserver>(&mut self, pass: PassId, observer: &mut O) {
        let Some(customer) = self.customers.get(&pass) else {
            return;
        };
        let arrival_time = customer.arrival_time;
        let pass_elapsed = self.now.since(customer.pass_start);
        let remaining = customer.remaining;
        let time_in_system = self.now.since(arrival_time);

        self.stats.unique_diners.insert(pass.customer);

        // Defensive: the round loop clears every demand before dining, so a
        // leftover here means a logic regression, not a domain outcome.  The
        // entity re-enters under a derived identity with no eligibility
        // change.
        if !remaining.is_empty() {
            self.stats.unmet_demand_returns += 1;
            self.replace_with_derived_pass(pass, remaining, Placement::Back);
            return;
        }

        if self.rng.gen_bool(self.workload.requeue_probability) {
            if self.workload.max_time_for_requeue.allows(pass_elapsed) {
                self.stats.requeue_count += 1;
                let required = CourseSet::sample_nonempty(&mut self.rng);
                let next = self.replace_with_derived_pass(pass, required, Placement::Front);
                debug!("{pass} re-queues as {next} at {}", self.now);
                observer.on_requeue(self.now, next);
            } else {
                debug!(
                    "{pass} denied re-queue at {}: pass ran {pass_elapsed:.2} min",
                    self.now
                );
                self.stats.time_in_system.push(time_in_system);
                self.stats.record(Outcome::AbandonedDeniedRequeue);
                self.customers.remove(&pass);
                observer.on_terminal(self.now, pass, Outcome::AbandonedDeniedRequeue);
            }
        } else {
            self.stats.time_in_system.push(time_in_system);
            self.stats.record(Outcome::Completed);
            self.customers.remove(&pass);
            observer.on_terminal(self.now, pass, Outcome::Completed);
        }
    }

    /// Swap an entry for its next pass and send it back through the waiting
    /// room.  Returns the derived identity.
    fn replace_with_derived_pass(
        &mut self,
        pass: PassId,
        required: CourseSet,
        placement: Placement,
    ) -> PassId {
        let Some(customer) = self.customers.remove(&pass) else {
            return pass;
        };
        let next = customer.derive_pass(self.now, required);
        let next_id = next.id;
        self.customers.insert(next_id, next);
        self.enter_waiting(next_id, placement);
        next_id
    }
}
