//! Unit tests for ts-core primitives.

#[cfg(test)]
mod ids {
    use crate::{RouteId, StopId, VehicleId};

    #[test]
    fn index_roundtrip() {
        let id = StopId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(StopId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(VehicleId(0) < VehicleId(1));
        assert!(RouteId(100) > RouteId(99));
    }

    #[test]
    fn display() {
        assert_eq!(StopId(7).to_string(), "StopId(7)");
    }
}

#[cfg(test)]
mod time {
    use crate::{SimTime, bucket_len, hour_buckets};

    #[test]
    fn arithmetic() {
        let t = SimTime(10.0);
        assert_eq!(t + 5.0, SimTime(15.0));
        assert_eq!(SimTime(15.0) - SimTime(10.0), 5.0);
        assert_eq!(SimTime(15.0).since(SimTime(20.0)), -5.0);
        assert_eq!(SimTime::from_hours(1.5), SimTime(90.0));
    }

    #[test]
    fn total_order() {
        let mut times = vec![SimTime(3.0), SimTime(-1.0), SimTime(0.5)];
        times.sort();
        assert_eq!(times, vec![SimTime(-1.0), SimTime(0.5), SimTime(3.0)]);
        assert_eq!(SimTime(2.0).max(SimTime(1.0)), SimTime(2.0));
    }

    #[test]
    fn hour_and_window_buckets() {
        assert_eq!(SimTime(0.0).hour(), 0);
        assert_eq!(SimTime(59.9).hour(), 0);
        assert_eq!(SimTime(60.0).hour(), 1);
        assert_eq!(SimTime(179.0).window(180.0), 0);
        assert_eq!(SimTime(180.0).window(180.0), 1);
    }

    #[test]
    fn bucket_count_and_length() {
        assert_eq!(hour_buckets(SimTime(120.0)), 2);
        assert_eq!(hour_buckets(SimTime(130.0)), 3);
        assert_eq!(hour_buckets(SimTime(0.0)), 0);
        assert_eq!(bucket_len(0, SimTime(130.0)), 60.0);
        assert_eq!(bucket_len(2, SimTime(130.0)), 10.0);
    }

    #[test]
    fn horizon_validation() {
        assert!(SimTime(60.0).checked_horizon().is_ok());
        assert!(SimTime(0.0).checked_horizon().is_err());
        assert!(SimTime(f64::INFINITY).checked_horizon().is_err());
        assert!(SimTime(f64::NAN).checked_horizon().is_err());
    }

    #[test]
    fn display() {
        assert_eq!(SimTime(75.5).to_string(), "01:15.50");
    }
}

#[cfg(test)]
mod stats {
    use crate::{SimTime, TimeWeighted};

    #[test]
    fn constant_value_averages_to_itself() {
        let mut tw = TimeWeighted::new();
        tw.accumulate(SimTime(0.0), SimTime(120.0), 3.0);
        assert_eq!(tw.average(SimTime(120.0)), 3.0);
        assert_eq!(tw.hourly_averages(SimTime(120.0)), vec![3.0, 3.0]);
    }

    #[test]
    fn interval_split_across_hours() {
        let mut tw = TimeWeighted::new();
        // Value 2 from 50 to 70: 10 min in hour 0, 10 min in hour 1.
        tw.accumulate(SimTime(50.0), SimTime(70.0), 2.0);
        assert_eq!(tw.integral(), 40.0);
        let hourly = tw.hourly_averages(SimTime(120.0));
        assert!((hourly[0] - 20.0 / 60.0).abs() < 1e-12);
        assert!((hourly[1] - 20.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn partial_last_hour_uses_own_length() {
        let mut tw = TimeWeighted::new();
        tw.accumulate(SimTime(60.0), SimTime(90.0), 4.0);
        let hourly = tw.hourly_averages(SimTime(90.0));
        assert_eq!(hourly, vec![0.0, 4.0]);
    }

    #[test]
    fn backwards_interval_ignored() {
        let mut tw = TimeWeighted::new();
        tw.accumulate(SimTime(10.0), SimTime(5.0), 1.0);
        assert_eq!(tw.integral(), 0.0);
    }

    #[test]
    fn reset_clears() {
        let mut tw = TimeWeighted::new();
        tw.accumulate(SimTime(0.0), SimTime(10.0), 1.0);
        tw.reset();
        assert_eq!(tw, TimeWeighted::new());
    }
}

#[cfg(test)]
mod config {
    use crate::{Capacity, CoreError, SimConfig};

    #[test]
    fn defaults_match_calibration() {
        let c = SimConfig::default();
        assert_eq!(c.capacity.max_cap(), 35);
        assert_eq!(c.schedule_window_minutes, 180.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn short_hop_uses_speed_long_hop_is_fixed() {
        let c = SimConfig::default();
        // 1 km at 20 km/h = 3 minutes.
        assert!((c.travel_minutes(1.0) - 3.0).abs() < 1e-12);
        assert_eq!(c.travel_minutes(2.0), 6.0);
        assert_eq!(c.travel_minutes(5.0), 6.0);
    }

    #[test]
    fn zero_capacity_rejected() {
        let c = SimConfig { capacity: Capacity::new(0, 0), ..SimConfig::default() };
        assert_eq!(c.validate(), Err(CoreError::ZeroCapacity));
    }

    #[test]
    fn non_finite_speed_rejected() {
        let c = SimConfig { speed_kmh: f64::NAN, ..SimConfig::default() };
        assert!(matches!(c.validate(), Err(CoreError::Config { field: "speed_kmh", .. })));
    }
}

#[cfg(test)]
mod rng {
    use rand::Rng;

    use crate::StreamRng;

    #[test]
    fn same_key_same_sequence() {
        let mut a = StreamRng::new(7, 3);
        let mut b = StreamRng::new(7, 3);
        let xs: Vec<u64> = (0..5).map(|_| a.inner().r#gen()).collect();
        let ys: Vec<u64> = (0..5).map(|_| b.inner().r#gen()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn different_keys_diverge() {
        let mut a = StreamRng::new(7, 3);
        let mut b = StreamRng::new(7, 4);
        let x: u64 = a.inner().r#gen();
        let y: u64 = b.inner().r#gen();
        assert_ne!(x, y);
    }

    #[test]
    fn pair_keys_unique() {
        let n = 4;
        let mut keys: Vec<u64> = (0..n)
            .flat_map(|o| (0..n).map(move |d| StreamRng::pair_key(o, d, n)))
            .collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), n * n);
    }
}
