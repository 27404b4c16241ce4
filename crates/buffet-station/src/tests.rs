//! Unit tests for the service station.

use buffet_core::{CustomerId, PassId, SimRng, SimTime, StationConfig, StationKind};

use crate::{Placement, ServiceStation};

fn pass(n: u32) -> PassId {
    PassId::first(CustomerId(n))
}

fn station(servers: u32, mean: f64) -> ServiceStation {
    ServiceStation::new(&StationConfig::new(StationKind::Appetizer, servers, mean)).unwrap()
}

#[cfg(test)]
mod pooled {
    use super::*;

    #[test]
    fn grants_follow_fifo_order() {
        let mut st = station(1, 1.0);
        let mut rng = SimRng::new(42);

        for n in 0..3 {
            st.enqueue(pass(n), SimTime(0.0), Placement::Back);
        }
        let grants = st.dispatch(SimTime(0.0), &mut rng);
        assert_eq!(grants.len(), 1, "one server, one grant");
        assert_eq!(grants[0].pass, pass(0));
        assert_eq!(st.queued(), 2);
        assert_eq!(st.in_service(), 1);

        st.complete(grants[0].server);
        let grants = st.dispatch(SimTime(1.0), &mut rng);
        assert_eq!(grants[0].pass, pass(1));
    }

    #[test]
    fn in_service_never_exceeds_server_count() {
        let mut st = station(2, 1.0);
        let mut rng = SimRng::new(42);
        for n in 0..10 {
            st.enqueue(pass(n), SimTime(0.0), Placement::Back);
        }
        let grants = st.dispatch(SimTime(0.0), &mut rng);
        assert_eq!(grants.len(), 2);
        assert_eq!(st.in_service(), 2);
        assert_eq!(st.queued(), 8);
        // A redundant dispatch grants nothing further.
        assert!(st.dispatch(SimTime(0.0), &mut rng).is_empty());
    }

    #[test]
    fn front_placement_overtakes_queue() {
        let mut st = station(1, 1.0);
        let mut rng = SimRng::new(42);
        st.enqueue(pass(0), SimTime(0.0), Placement::Back);
        let first = st.dispatch(SimTime(0.0), &mut rng);
        st.enqueue(pass(1), SimTime(0.0), Placement::Back);
        st.enqueue(pass(2), SimTime(0.0), Placement::Back);
        // A re-queued customer jumps ahead of the two waiting fresh arrivals.
        st.enqueue(pass(3), SimTime(1.0), Placement::Front);

        st.complete(first[0].server);
        let grants = st.dispatch(SimTime(2.0), &mut rng);
        assert_eq!(grants[0].pass, pass(3));
    }

    #[test]
    fn wait_time_measured_from_entry_to_grant() {
        let mut st = station(1, 1.0);
        let mut rng = SimRng::new(42);
        st.enqueue(pass(0), SimTime(0.0), Placement::Back);
        let g = st.dispatch(SimTime(0.0), &mut rng);
        st.enqueue(pass(1), SimTime(1.0), Placement::Back);
        st.complete(g[0].server);
        st.dispatch(SimTime(4.5), &mut rng);

        let waits = &st.samples().wait_times;
        assert_eq!(waits.len(), 2);
        assert!((waits[0] - 0.0).abs() < 1e-12);
        assert!((waits[1] - 3.5).abs() < 1e-12);
    }

    #[test]
    fn queue_length_snapshot_taken_before_join() {
        let mut st = station(1, 1.0);
        let mut rng = SimRng::new(42);
        st.enqueue(pass(0), SimTime(0.0), Placement::Back);
        st.dispatch(SimTime(0.0), &mut rng);
        st.enqueue(pass(1), SimTime(0.1), Placement::Back);
        st.enqueue(pass(2), SimTime(0.2), Placement::Back);
        assert_eq!(st.samples().queue_lengths, vec![0, 0, 1]);
    }

    #[test]
    fn served_counters_and_round_robin_attribution() {
        let mut st = station(2, 1.0);
        let mut rng = SimRng::new(42);
        for n in 0..4 {
            st.enqueue(pass(n), SimTime(0.0), Placement::Back);
        }
        let grants = st.dispatch(SimTime(0.0), &mut rng);
        for g in &grants {
            st.complete(g.server);
        }
        let grants = st.dispatch(SimTime(1.0), &mut rng);
        for g in &grants {
            st.complete(g.server);
        }
        assert_eq!(st.samples().served, 4);
        // Round-robin attribution splits 4 services evenly over 2 servers.
        assert_eq!(st.samples().per_server[0].served, 2);
        assert_eq!(st.samples().per_server[1].served, 2);
    }

    #[test]
    fn cancel_removes_only_queued_tickets() {
        let mut st = station(1, 1.0);
        let mut rng = SimRng::new(42);
        st.enqueue(pass(0), SimTime(0.0), Placement::Back);
        st.dispatch(SimTime(0.0), &mut rng);
        st.enqueue(pass(1), SimTime(0.0), Placement::Back);
        st.enqueue(pass(2), SimTime(0.0), Placement::Back);

        assert!(st.cancel(pass(1)), "queued ticket is cancellable");
        assert!(!st.cancel(pass(0)), "in-service entity is not queued");
        assert_eq!(st.queued(), 1);

        st.complete(0);
        let grants = st.dispatch(SimTime(1.0), &mut rng);
        assert_eq!(grants[0].pass, pass(2), "FIFO order preserved after cancel");
    }
}

#[cfg(test)]
mod capacity {
    use super::*;
    use buffet_core::QueueCapacity;

    fn bounded(servers: u32, cap: u32) -> ServiceStation {
        let config =
            StationConfig::new(StationKind::Dessert, servers, 1.0).with_capacity(cap);
        ServiceStation::new(&config).unwrap()
    }

    #[test]
    fn zero_capacity_admits_only_with_idle_server() {
        let mut st = bounded(1, 0);
        let mut rng = SimRng::new(42);
        assert!(st.has_available_capacity(), "idle server admits at capacity 0");

        st.enqueue(pass(0), SimTime(0.0), Placement::Back);
        st.dispatch(SimTime(0.0), &mut rng);
        assert!(
            !st.has_available_capacity(),
            "busy server and zero queue room rejects"
        );

        st.complete(0);
        assert!(st.has_available_capacity());
    }

    #[test]
    fn finite_capacity_counts_queued_not_in_service() {
        let mut st = bounded(1, 2);
        let mut rng = SimRng::new(42);
        st.enqueue(pass(0), SimTime(0.0), Placement::Back);
        st.dispatch(SimTime(0.0), &mut rng);
        st.enqueue(pass(1), SimTime(0.0), Placement::Back);
        assert!(st.has_available_capacity(), "1 queued < cap 2");
        st.enqueue(pass(2), SimTime(0.0), Placement::Back);
        assert!(!st.has_available_capacity(), "2 queued == cap 2");
    }

    #[test]
    fn unlimited_is_distinct_from_zero() {
        let unlimited = station(1, 1.0);
        assert_eq!(unlimited.capacity(), QueueCapacity::Unlimited);
        assert!(unlimited.has_available_capacity());

        let zero = bounded(1, 0);
        assert_eq!(zero.capacity(), QueueCapacity::Finite(0));
    }
}

#[cfg(test)]
mod partitioned {
    use super::*;

    fn partitioned(servers: u32, cap: Option<u32>) -> ServiceStation {
        let mut config =
            StationConfig::new(StationKind::MainCourse, servers, 1.0).partitioned();
        if let Some(cap) = cap {
            config = config.with_capacity(cap);
        }
        ServiceStation::new(&config).unwrap()
    }

    #[test]
    fn arrivals_join_shortest_available_queue() {
        let mut st = partitioned(2, None);
        let mut rng = SimRng::new(42);
        // Fill both servers, then queue three more.
        for n in 0..5 {
            st.enqueue(pass(n), SimTime(0.0), Placement::Back);
        }
        st.dispatch(SimTime(0.0), &mut rng);
        assert_eq!(st.in_service(), 2);
        // 3 still queued across 2 servers after the two initial grants.
        assert_eq!(st.queued(), 3);
        // Shortest-queue assignment alternates, so each server saw at least
        // two of the five arrivals.
        let s = st.samples();
        let assigned: Vec<usize> = s.per_server.iter().map(|p| p.queue_lengths.len()).collect();
        assert_eq!(assigned.iter().sum::<usize>(), 5);
        assert!(assigned.iter().all(|&l| l >= 2), "both queues used: {assigned:?}");
    }

    #[test]
    fn admits_while_any_server_has_room() {
        let mut st = partitioned(2, Some(1));
        let mut rng = SimRng::new(42);
        // Occupy both servers.
        st.enqueue(pass(0), SimTime(0.0), Placement::Back);
        st.enqueue(pass(1), SimTime(0.0), Placement::Back);
        st.dispatch(SimTime(0.0), &mut rng);
        // One queue slot per server: fill one.
        st.enqueue(pass(2), SimTime(0.0), Placement::Back);
        assert!(st.has_available_capacity(), "second server's queue still open");
        st.enqueue(pass(3), SimTime(0.0), Placement::Back);
        assert!(!st.has_available_capacity(), "both per-server queues full");
    }

    #[test]
    fn each_server_serves_its_own_queue() {
        let mut st = partitioned(2, None);
        let mut rng = SimRng::new(42);
        for n in 0..4 {
            st.enqueue(pass(n), SimTime(0.0), Placement::Back);
        }
        let first = st.dispatch(SimTime(0.0), &mut rng);
        assert_eq!(first.len(), 2);
        let server_of_first: Vec<usize> = first.iter().map(|g| g.server).collect();

        // Completing server 0 must grant the entity queued *at* server 0.
        st.complete(server_of_first[0]);
        let next = st.dispatch(SimTime(1.0), &mut rng);
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].server, server_of_first[0]);
    }
}
