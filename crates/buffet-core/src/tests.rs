//! Unit tests for buffet-core primitives.

#[cfg(test)]
mod ids {
    use crate::{CustomerId, PassId};

    #[test]
    fn pass_derivation() {
        let first = PassId::first(CustomerId(7));
        assert_eq!(first.pass, 0);
        let second = first.next();
        assert_eq!(second.customer, CustomerId(7));
        assert_eq!(second.pass, 1);
    }

    #[test]
    fn display() {
        assert_eq!(CustomerId(5).to_string(), "Customer_5");
        assert_eq!(PassId::first(CustomerId(5)).to_string(), "Customer_5");
        assert_eq!(PassId::first(CustomerId(5)).next().to_string(), "Customer_5#1");
    }
}

#[cfg(test)]
mod time {
    use crate::SimTime;

    #[test]
    fn arithmetic() {
        let t = SimTime(10.0);
        assert_eq!(t.after(2.5), SimTime(12.5));
        assert_eq!(t + 2.5, SimTime(12.5));
        assert!((SimTime(12.5).since(t) - 2.5).abs() < 1e-12);
        assert!((SimTime(12.5) - t - 2.5).abs() < 1e-12);
    }

    #[test]
    fn total_order() {
        let mut times = vec![SimTime(3.0), SimTime(1.0), SimTime(2.0), SimTime(1.0)];
        times.sort();
        assert_eq!(times, vec![SimTime(1.0), SimTime(1.0), SimTime(2.0), SimTime(3.0)]);
    }

    #[test]
    fn usable_as_map_key() {
        use std::collections::BTreeMap;
        let mut map = BTreeMap::new();
        map.insert(SimTime(2.0), "b");
        map.insert(SimTime(1.0), "a");
        assert_eq!(map.keys().next(), Some(&SimTime(1.0)));
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn negative_delay_panics_in_debug() {
        let _ = SimTime(5.0).after(-1.0);
    }
}

#[cfg(test)]
mod rng {
    use crate::{SimRng, exp_with_mean};

    #[test]
    fn same_seed_same_stream() {
        let dist = exp_with_mean(2.0).unwrap();
        let mut a = SimRng::new(42);
        let mut b = SimRng::new(42);
        for _ in 0..10 {
            assert_eq!(a.sample_exp(&dist), b.sample_exp(&dist));
        }
    }

    #[test]
    fn exp_samples_positive_with_plausible_mean() {
        let dist = exp_with_mean(2.0).unwrap();
        let mut rng = SimRng::new(7);
        let n = 10_000;
        let mut sum = 0.0;
        for _ in 0..n {
            let x = rng.sample_exp(&dist);
            assert!(x >= 0.0);
            sum += x;
        }
        let mean = sum / n as f64;
        assert!((mean - 2.0).abs() < 0.2, "sample mean {mean} far from 2.0");
    }

    #[test]
    fn invalid_means_rejected() {
        assert!(exp_with_mean(0.0).is_err());
        assert!(exp_with_mean(-1.0).is_err());
        assert!(exp_with_mean(f64::NAN).is_err());
        assert!(exp_with_mean(f64::INFINITY).is_err());
    }

    #[test]
    fn children_diverge() {
        let mut root = SimRng::new(42);
        let dist = exp_with_mean(1.0).unwrap();
        let mut a = root.child(0);
        let mut b = root.child(1);
        let same = (0..16).filter(|_| a.sample_exp(&dist) == b.sample_exp(&dist)).count();
        assert!(same < 16, "child streams should not be identical");
    }
}

#[cfg(test)]
mod course {
    use crate::{Course, CourseSet, SimRng};

    #[test]
    fn set_operations() {
        let mut set = CourseSet::EMPTY;
        assert!(set.is_empty());
        set.insert(Course::Dessert);
        set.insert(Course::Appetizer);
        assert_eq!(set.len(), 2);
        assert!(set.contains(Course::Appetizer));
        assert!(!set.contains(Course::MainCourse));
        set.remove(Course::Appetizer);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Course::Dessert]);
    }

    #[test]
    fn iteration_follows_visit_order() {
        let set: CourseSet = [Course::Dessert, Course::Appetizer].into_iter().collect();
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![Course::Appetizer, Course::Dessert]
        );
    }

    #[test]
    fn sampled_requirements_never_empty() {
        let mut rng = SimRng::new(42);
        for _ in 0..1000 {
            assert!(!CourseSet::sample_nonempty(&mut rng).is_empty());
        }
    }

    #[test]
    fn sampling_reaches_every_subset() {
        let mut rng = SimRng::new(42);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            seen.insert(CourseSet::sample_nonempty(&mut rng));
        }
        assert_eq!(seen.len(), 7, "all non-empty subsets should occur");
    }

    #[test]
    fn display_notation() {
        let set: CourseSet = [Course::Appetizer, Course::Dessert].into_iter().collect();
        assert_eq!(set.to_string(), "1/0/1");
    }
}

#[cfg(test)]
mod config {
    use crate::{
        QueueCapacity, RequeueWindow, ScenarioConfig, StationConfig, StationKind, WorkloadConfig,
    };

    fn five_stations() -> Vec<StationConfig> {
        StationKind::ALL
            .into_iter()
            .map(|kind| StationConfig::new(kind, 2, 1.0))
            .collect()
    }

    #[test]
    fn valid_scenario_passes() {
        let scenario = ScenarioConfig {
            stations: five_stations(),
            workload: WorkloadConfig::new(2.0, 100.0),
        };
        scenario.validate().unwrap();
    }

    #[test]
    fn zero_servers_rejected() {
        let station = StationConfig::new(StationKind::Dining, 0, 1.0);
        assert!(station.validate().is_err());
    }

    #[test]
    fn non_positive_service_time_rejected() {
        assert!(StationConfig::new(StationKind::Dining, 1, 0.0).validate().is_err());
        assert!(StationConfig::new(StationKind::Dining, 1, -2.0).validate().is_err());
    }

    #[test]
    fn missing_station_rejected() {
        let mut stations = five_stations();
        stations.retain(|s| s.kind != StationKind::Dessert);
        let scenario = ScenarioConfig {
            stations,
            workload: WorkloadConfig::new(2.0, 100.0),
        };
        assert!(scenario.validate().is_err());
    }

    #[test]
    fn duplicate_station_rejected() {
        let mut stations = five_stations();
        stations.push(StationConfig::new(StationKind::Waiting, 1, 1.0));
        let scenario = ScenarioConfig {
            stations,
            workload: WorkloadConfig::new(2.0, 100.0),
        };
        assert!(scenario.validate().is_err());
    }

    #[test]
    fn requeue_probability_bounds() {
        let mut workload = WorkloadConfig::new(2.0, 100.0);
        workload.requeue_probability = 1.5;
        assert!(workload.validate().is_err());
        workload.requeue_probability = -0.1;
        assert!(workload.validate().is_err());
        workload.requeue_probability = 1.0;
        workload.validate().unwrap();
    }

    #[test]
    fn capacity_zero_is_not_unlimited() {
        let cap = QueueCapacity::Finite(0);
        assert!(!cap.is_unlimited());
        assert!(!cap.admits(0));
        assert!(QueueCapacity::Unlimited.admits(u32::MAX));
    }

    #[test]
    fn requeue_window_zero_sentinel() {
        // A configured 0 means "no limit", not "zero tolerance".
        assert_eq!(RequeueWindow::from_minutes(0.0), RequeueWindow::Unlimited);
        assert!(RequeueWindow::from_minutes(0.0).allows(1e9));
        let bounded = RequeueWindow::from_minutes(30.0);
        assert!(bounded.allows(29.9));
        assert!(!bounded.allows(30.0));
    }
}
