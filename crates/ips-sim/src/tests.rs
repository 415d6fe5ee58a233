//! Integration tests for ips-sim.

use ips_core::{Coordinates, GridSize, SimConfig, Tick};
use ips_heatmap::HeatmapGrid;
use ips_sensor::{CustomerRecord, StoreFloorSuite, TrackingSuite};

use crate::{NoopObserver, Row, SimBuilder, SimObserver, TimeSeriesStore};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(total_steps: u64) -> SimConfig {
    SimConfig {
        start_unix_secs:    1_700_000_000,
        tick_duration_secs: 60,
        total_steps,
        seed:               Some(42),
        grid_width:         20,
        grid_height:        10,
        track_positions:    true,
        update_interval_ms: None,
    }
}

fn tracking_suite() -> TrackingSuite {
    TrackingSuite::for_grid(GridSize::new(20, 10).unwrap()).unwrap()
}

fn customer_row(tick: u64, browsing_time: f64, purchases: u8, returning: bool) -> Row<CustomerRecord> {
    Row {
        tick:           Tick(tick),
        unix_time_secs: tick as i64 * 60,
        record:         CustomerRecord {
            browsing_time,
            purchases,
            returning_customer: returning,
        },
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use ips_core::SensorRngs;

    use super::*;
    use crate::SimError;

    #[test]
    fn builds_successfully_with_defaults() {
        let sim = SimBuilder::new(SimConfig::default(), StoreFloorSuite::default())
            .build()
            .unwrap();
        assert_eq!(sim.rngs.len(), 4);
        assert!(sim.store.is_empty());
        assert!(sim.heatmap.is_some());
        assert_eq!(sim.remaining(), 100);
    }

    #[test]
    fn zero_steps_fails_before_running() {
        let cfg = SimConfig { total_steps: 0, ..test_config(1) };
        let err = SimBuilder::new(cfg, StoreFloorSuite::default()).build().err().unwrap();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn bad_grid_fails_before_running() {
        let cfg = SimConfig { grid_width: 0, ..test_config(5) };
        assert!(SimBuilder::new(cfg, StoreFloorSuite::default()).build().is_err());
    }

    #[test]
    fn overflowing_start_fails_before_running() {
        let cfg = SimConfig { start_unix_secs: i64::MAX - 10, total_steps: 2, ..test_config(2) };
        let err = SimBuilder::new(cfg, StoreFloorSuite::default()).build().err().unwrap();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn unrepresentable_date_fails_before_running() {
        let cfg = SimConfig { start_unix_secs: 9_000_000_000_000_000, total_steps: 3, ..test_config(3) };
        let err = SimBuilder::new(cfg, StoreFloorSuite::default()).build().err().unwrap();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn rng_count_mismatch_errors() {
        let result = SimBuilder::new(test_config(5), StoreFloorSuite::default())
            .sensor_rngs(SensorRngs::new(2, 1))
            .build();
        assert!(matches!(
            result.err(),
            Some(SimError::SensorCountMismatch { expected: 4, got: 2 })
        ));
    }

    #[test]
    fn seed_override_is_recorded() {
        let sim = SimBuilder::new(test_config(5), StoreFloorSuite::default())
            .seed(7)
            .build()
            .unwrap();
        assert_eq!(sim.seed, 7);
        assert_eq!(sim.config.seed, Some(7));
    }

    #[test]
    fn unseeded_run_reports_its_seed() {
        let cfg = SimConfig { seed: None, ..test_config(3) };
        let sim = SimBuilder::new(cfg, StoreFloorSuite::default()).build().unwrap();
        // Whatever was drawn, replaying it reproduces the run.
        let replay = SimBuilder::new(test_config(3), StoreFloorSuite::default())
            .seed(sim.seed)
            .build()
            .unwrap();
        assert_eq!(sim.seed, replay.seed);
    }
}

// ── Running ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use ips_core::Field;
    use ips_sensor::Record;

    use super::*;
    use crate::simulate;

    #[test]
    fn produces_exactly_step_count_rows_in_order() {
        for steps in [1, 2, 17, 1_000] {
            let out = simulate(test_config(steps), StoreFloorSuite::default()).unwrap();
            assert_eq!(out.store.len() as u64, steps);
            let ts: Vec<i64> = out.store.timestamps().collect();
            assert!(ts.windows(2).all(|w| w[0] < w[1]), "timestamps must increase");
            for (i, row) in out.store.iter().enumerate() {
                assert_eq!(row.tick, Tick(i as u64));
                assert_eq!(row.unix_time_secs, 1_700_000_000 + 60 * i as i64);
            }
        }
    }

    #[test]
    fn readings_stay_in_range() {
        let out = simulate(test_config(500), StoreFloorSuite::default()).unwrap();
        for row in &out.store {
            assert!((0.0..360.0).contains(&row.record.rotation));
            assert!(row.record.foot_traffic <= 15);
        }
    }

    #[test]
    fn five_step_tracking_run_end_to_end() {
        let mut sim = SimBuilder::new(test_config(5), tracking_suite()).build().unwrap();
        sim.run(&mut NoopObserver).unwrap();
        let out = sim.finish();

        assert_eq!(out.store.len(), 5);
        for row in &out.store {
            let fields = row.record.fields();
            assert_eq!(fields.len(), ips_sensor::TrackingRecord::COLUMNS.len());
            assert!(fields.iter().all(|f| !f.is_empty()), "no missing fields");
            assert!(row.record.rssi.unwrap().dbm.is_finite());
        }
        let grid = out.heatmap.expect("tracking enabled");
        assert_eq!(grid.total(), 5);
        let sum: u64 = grid.snapshot().cells().iter().map(|&c| c as u64).sum();
        assert_eq!(sum, 5);
    }

    #[test]
    fn tracked_positions_match_heatmap() {
        let out = simulate(test_config(200), tracking_suite()).unwrap();
        let mut rebuilt = HeatmapGrid::with_dimensions(20, 10).unwrap();
        for row in &out.store {
            let p = row.record.position.unwrap();
            rebuilt.add(p);
        }
        assert_eq!(Some(rebuilt), out.heatmap);
    }

    #[test]
    fn tracking_off_has_no_heatmap_or_positions() {
        let cfg = SimConfig { track_positions: false, ..test_config(10) };
        let out = simulate(cfg, tracking_suite()).unwrap();
        assert!(out.heatmap.is_none());
        let xs = out.store.column("position_x").unwrap();
        assert!(xs.iter().all(|f| *f == Field::Empty));
    }

    #[test]
    fn same_seed_same_rows() {
        let a = simulate(test_config(50), StoreFloorSuite::default()).unwrap();
        let b = simulate(test_config(50), StoreFloorSuite::default()).unwrap();
        assert_eq!(a.store.rows(), b.store.rows());
    }

    #[test]
    fn different_seed_same_shape_different_values() {
        let a = simulate(test_config(50), StoreFloorSuite::default()).unwrap();
        let b = simulate(SimConfig { seed: Some(43), ..test_config(50) }, StoreFloorSuite::default())
            .unwrap();
        assert_eq!(a.store.len(), b.store.len());
        assert_ne!(a.store.rows(), b.store.rows());
    }

    #[test]
    fn position_stream_is_independent_of_sensors() {
        let on = simulate(test_config(30), StoreFloorSuite::default()).unwrap();
        let off = simulate(
            SimConfig { track_positions: false, ..test_config(30) },
            StoreFloorSuite::default(),
        )
        .unwrap();
        let rec_on: Vec<_> = on.store.iter().map(|r| r.record).collect();
        let rec_off: Vec<_> = off.store.iter().map(|r| r.record).collect();
        assert_eq!(rec_on, rec_off);
    }

    #[test]
    fn single_steps_then_none() {
        let mut sim = SimBuilder::new(test_config(2), StoreFloorSuite::default()).build().unwrap();
        assert_eq!(sim.step().unwrap().map(|r| r.tick), Some(Tick(0)));
        assert_eq!(sim.step().unwrap().map(|r| r.tick), Some(Tick(1)));
        assert!(sim.step().unwrap().is_none());
        assert!(sim.is_finished());
        assert_eq!(sim.store.len(), 2);
    }

    #[test]
    fn run_steps_never_passes_end() {
        let mut sim = SimBuilder::new(test_config(5), StoreFloorSuite::default()).build().unwrap();
        assert_eq!(sim.run_steps(3, &mut NoopObserver).unwrap(), 3);
        assert_eq!(sim.run_steps(10, &mut NoopObserver).unwrap(), 2);
        assert_eq!(sim.store.len(), 5);
    }

    #[test]
    fn failed_step_leaves_rows_and_samples_in_step() {
        let mut sim = SimBuilder::new(test_config(10), tracking_suite()).build().unwrap();
        sim.step().unwrap();
        // Rewind wall-clock time so the next row is not after the first.
        sim.clock.start_unix_secs -= 1_000;

        let err = sim.step().unwrap_err();
        assert!(matches!(err, crate::SimError::NonMonotonic { .. }));
        assert_eq!(sim.store.len(), 1);
        assert_eq!(sim.heatmap.as_ref().unwrap().total(), 1);
    }

    #[test]
    fn timestamp_overflow_mid_run_is_an_error() {
        let mut sim = SimBuilder::new(test_config(10), tracking_suite()).build().unwrap();
        sim.run_steps(3, &mut NoopObserver).unwrap();
        sim.clock.start_unix_secs = i64::MAX;

        let err = sim.step().unwrap_err();
        assert!(matches!(err, crate::SimError::Config(_)));
        assert_eq!(sim.store.len(), 3);
        assert_eq!(sim.heatmap.as_ref().unwrap().total(), 3);
    }

    #[test]
    fn run_after_partial_steps_completes_the_rest() {
        let mut sim = SimBuilder::new(test_config(8), tracking_suite()).build().unwrap();
        sim.step().unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.store.len(), 8);
        assert_eq!(sim.heatmap.as_ref().unwrap().total(), 8);
    }
}

// ── Iterator / live feed ──────────────────────────────────────────────────────

#[cfg(test)]
mod live_tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::{Paced, StopHandle};

    #[test]
    fn steps_yield_every_row() {
        let mut sim = SimBuilder::new(test_config(12), StoreFloorSuite::default()).build().unwrap();
        assert_eq!(sim.steps().size_hint(), (12, Some(12)));
        let rows: Vec<_> = sim.steps().map(Result::unwrap).collect();
        assert_eq!(rows.len(), 12);
        assert_eq!(rows.as_slice(), sim.store.rows());
    }

    #[test]
    fn stopping_early_leaves_consistent_partial_state() {
        let mut sim = SimBuilder::new(test_config(100), tracking_suite()).build().unwrap();
        let taken = sim.steps().take(7).count();
        assert_eq!(taken, 7);
        assert_eq!(sim.store.len(), 7);
        assert_eq!(sim.heatmap.as_ref().unwrap().total(), 7);

        let out = sim.finish();
        assert_eq!(out.store.len(), 7);
    }

    #[test]
    fn stop_handle_cancels_between_ticks() {
        let mut sim = SimBuilder::new(test_config(50), StoreFloorSuite::default()).build().unwrap();
        let stop = StopHandle::new();
        let mut seen = 0;
        for row in sim.live().with_stop(stop.clone()) {
            row.unwrap();
            seen += 1;
            if seen == 3 {
                stop.stop();
            }
        }
        assert_eq!(seen, 3);
        assert_eq!(sim.store.len(), 3);
    }

    #[test]
    fn paced_waits_between_items_only() {
        let start = Instant::now();
        let items: Vec<_> = Paced::new(0..3, Some(Duration::from_millis(20))).collect();
        assert_eq!(items, vec![0, 1, 2]);
        assert!(start.elapsed() >= Duration::from_millis(40));
    }

    #[test]
    fn paced_without_interval_is_passthrough() {
        let paced = Paced::new(0..5, None);
        let handle = paced.stop_handle();
        assert!(!handle.is_stopped());
        assert_eq!(paced.count(), 5);
    }

    #[test]
    fn live_uses_configured_interval() {
        let cfg = SimConfig { update_interval_ms: Some(5), ..test_config(3) };
        let mut sim = SimBuilder::new(cfg, StoreFloorSuite::default()).build().unwrap();
        let start = Instant::now();
        assert_eq!(sim.live().count(), 3);
        assert!(start.elapsed() >= Duration::from_millis(10));
    }
}

// ── Observers ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use ips_sensor::TrackingRecord;

    use super::*;
    use crate::LoggingObserver;

    #[derive(Default)]
    struct Recorder {
        starts:    Vec<Tick>,
        positions: Vec<(Tick, Coordinates, bool)>,
        rows:      usize,
        ends:      Vec<(Tick, Option<u64>)>,
    }

    impl SimObserver<TrackingRecord> for Recorder {
        fn on_step_start(&mut self, tick: Tick) {
            self.starts.push(tick);
        }

        fn on_position(&mut self, tick: Tick, position: Coordinates, landed: bool) {
            self.positions.push((tick, position, landed));
        }

        fn on_row(&mut self, row: &Row<TrackingRecord>) {
            assert_eq!(row.record.position, Some(self.positions.last().unwrap().1));
            self.rows += 1;
        }

        fn on_run_end(&mut self, final_tick: Tick, heatmap: Option<&HeatmapGrid>) {
            self.ends.push((final_tick, heatmap.map(HeatmapGrid::total)));
        }
    }

    #[test]
    fn hooks_fire_once_per_step() {
        let mut sim = SimBuilder::new(test_config(6), tracking_suite()).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert_eq!(rec.starts, (0..6).map(Tick).collect::<Vec<_>>());
        assert_eq!(rec.positions.len(), 6);
        assert!(rec.positions.iter().all(|p| p.2));
        assert_eq!(rec.rows, 6);
        assert_eq!(rec.ends, vec![(Tick(6), Some(6))]);
    }

    #[test]
    fn logging_observer_counts_rows() {
        let mut sim = SimBuilder::new(test_config(9), StoreFloorSuite::default()).build().unwrap();
        let mut obs = LoggingObserver::new(0);
        sim.run(&mut obs).unwrap();
        assert_eq!(obs.rows_seen(), 9);
    }
}

// ── TimeSeriesStore ───────────────────────────────────────────────────────────

#[cfg(test)]
mod store_tests {
    use ips_core::Field;

    use super::*;
    use crate::SimError;

    #[test]
    fn rejects_gaps_and_duplicates() {
        let mut store = TimeSeriesStore::new();
        store.push(customer_row(0, 1.0, 1, true)).unwrap();
        let err = store.push(customer_row(2, 1.0, 1, true)).unwrap_err();
        assert!(matches!(err, SimError::OutOfOrder { expected: Tick(1), got: Tick(2) }));
        let err = store.push(customer_row(0, 1.0, 1, true)).unwrap_err();
        assert!(matches!(err, SimError::OutOfOrder { .. }));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn rejects_non_increasing_timestamps() {
        let mut store = TimeSeriesStore::new();
        store.push(customer_row(0, 1.0, 1, true)).unwrap();
        let mut row = customer_row(1, 1.0, 1, true);
        row.unix_time_secs = 0;
        assert!(matches!(store.push(row), Err(SimError::NonMonotonic { .. })));
    }

    #[test]
    fn column_access() {
        let mut store = TimeSeriesStore::new();
        store.push(customer_row(0, 2.0, 3, false)).unwrap();
        store.push(customer_row(1, 4.0, 5, true)).unwrap();
        assert_eq!(
            store.column("purchases").unwrap(),
            vec![Field::Integer(3), Field::Integer(5)]
        );
        assert!(store.column("missing").is_none());
        assert_eq!(store.columns().len(), 3);
        assert_eq!(store.get(1).unwrap().record.browsing_time, 4.0);
    }
}

// ── Stats ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod stats_tests {
    use super::*;
    use crate::{correlation, describe, rows_where};

    fn store() -> TimeSeriesStore<CustomerRecord> {
        let mut s = TimeSeriesStore::new();
        // browsing_time and purchases move together exactly.
        s.push(customer_row(0, 1.0, 1, false)).unwrap();
        s.push(customer_row(1, 2.0, 2, true)).unwrap();
        s.push(customer_row(2, 3.0, 3, false)).unwrap();
        s.push(customer_row(3, 4.0, 4, true)).unwrap();
        s
    }

    #[test]
    fn describe_matches_hand_computed() {
        let summaries = describe(&store());
        assert_eq!(summaries.len(), 3);
        let b = &summaries[0];
        assert_eq!(b.name, "browsing_time");
        assert_eq!(b.count, 4);
        assert_eq!(b.mean, 2.5);
        assert_eq!(b.min, 1.0);
        assert_eq!(b.max, 4.0);
        assert_eq!(b.median, 2.5);
        assert_eq!(b.q25, 1.75);
        assert_eq!(b.q75, 3.25);
        let std = b.std.unwrap();
        assert!((std - 1.290_994_448_735_805_6).abs() < 1e-12);

        let r = &summaries[2];
        assert_eq!(r.name, "returning_customer");
        assert_eq!(r.mean, 0.5);
    }

    #[test]
    fn describe_single_row_has_no_std() {
        let mut s = TimeSeriesStore::new();
        s.push(customer_row(0, 1.0, 1, false)).unwrap();
        let summaries = describe(&s);
        assert!(summaries.iter().all(|c| c.std.is_none()));
    }

    #[test]
    fn describe_skips_all_empty_columns() {
        let cfg = SimConfig { track_positions: false, ..test_config(10) };
        let out = crate::simulate(cfg, tracking_suite()).unwrap();
        let names: Vec<_> = describe(&out.store).iter().map(|c| c.name).collect();
        assert!(!names.contains(&"position_x"));
        assert!(names.contains(&"gyroscope_x"));
    }

    #[test]
    fn correlation_of_linear_columns_is_one() {
        let m = correlation(&store());
        assert_eq!(m.len(), 3);
        let r = m.get("browsing_time", "purchases").unwrap();
        assert!((r - 1.0).abs() < 1e-12);
        assert_eq!(m.get("purchases", "browsing_time"), Some(r));
        assert!((m.at(0, 0).unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(m.get("nope", "purchases"), None);
    }

    #[test]
    fn constant_column_has_no_correlation() {
        let mut s = TimeSeriesStore::new();
        s.push(customer_row(0, 1.0, 2, true)).unwrap();
        s.push(customer_row(1, 2.0, 2, true)).unwrap();
        let m = correlation(&s);
        assert_eq!(m.get("browsing_time", "purchases"), None);
    }

    #[test]
    fn rows_where_filters_on_boolean() {
        let s = store();
        let returning = rows_where(&s, "returning_customer");
        assert_eq!(returning.iter().map(|r| r.tick).collect::<Vec<_>>(), vec![Tick(1), Tick(3)]);
        assert!(rows_where(&s, "purchases").is_empty());
        assert!(rows_where(&s, "unknown").is_empty());
    }
}
