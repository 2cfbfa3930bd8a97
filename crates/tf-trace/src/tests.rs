//! Unit tests for tf-trace.

use tf_core::{AgentId, AggregationStrategy, LinkId, VehicleId};

use crate::{
    IntervalRecord, IntervalStore, LinkTable, TraceError, TraceEvent, TrajectoryAggregator,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const EPS: f64 = 1e-9;

fn rec(start: f64, end: f64, value: f64) -> IntervalRecord {
    IntervalRecord { start, end, value }
}

fn store(records: &[(f64, f64, f64)]) -> IntervalStore {
    let mut s = IntervalStore::new();
    for &(start, end, value) in records {
        s.push(rec(start, end, value));
    }
    s
}

/// Four links: 0 → 20 m, 1 → 30 m, 2 → 500 m, 3 → 1000 m.
fn links() -> LinkTable {
    [(LinkId(0), 20.0), (LinkId(1), 30.0), (LinkId(2), 500.0), (LinkId(3), 1000.0)]
        .into_iter()
        .collect()
}

/// One car trip on links 0 → 1 by `agent` in `vehicle`, 100 s to 200 s.
fn trip(agent: u32, vehicle: u32, t0: f64) -> Vec<TraceEvent> {
    let (a, v) = (AgentId(agent), VehicleId(vehicle));
    vec![
        TraceEvent::EntersTraffic { time: t0,         vehicle: v, agent: a, link: LinkId(0) },
        TraceEvent::LinkLeave     { time: t0 + 50.0,  vehicle: v, link: LinkId(0) },
        TraceEvent::LinkEnter     { time: t0 + 50.0,  vehicle: v, link: LinkId(1) },
        TraceEvent::LeavesTraffic { time: t0 + 100.0, vehicle: v, agent: a, link: LinkId(1) },
    ]
}

// ── SegmentState ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod segment_state {
    use crate::{ProtocolViolation, SegmentState};

    use super::*;

    #[test]
    fn start_then_end_emits_record() {
        let mut s = SegmentState::Idle;
        s.start(LinkId(4), 10.0).unwrap();
        assert!(s.is_active());
        let r = s.end(LinkId(4), 25.0, 7.0).unwrap();
        assert_eq!(r, rec(10.0, 25.0, 7.0));
        assert_eq!(s, SegmentState::Idle);
    }

    #[test]
    fn start_twice_is_violation() {
        let mut s = SegmentState::Idle;
        s.start(LinkId(1), 10.0).unwrap();
        let err = s.start(LinkId(2), 12.0).unwrap_err();
        assert_eq!(err, ProtocolViolation::AlreadyActive { link: LinkId(1), since: 10.0 });
        // The open traversal is untouched.
        assert_eq!(s, SegmentState::Active { link: LinkId(1), entered_at: 10.0 });
    }

    #[test]
    fn end_while_idle_is_violation() {
        let mut s = SegmentState::Idle;
        assert_eq!(s.end(LinkId(1), 5.0, 1.0).unwrap_err(), ProtocolViolation::NotActive);
    }

    #[test]
    fn end_on_other_link_is_violation() {
        let mut s = SegmentState::Idle;
        s.start(LinkId(1), 0.0).unwrap();
        assert_eq!(
            s.end(LinkId(9), 5.0, 1.0).unwrap_err(),
            ProtocolViolation::UnitMismatch { expected: LinkId(1) }
        );
        assert!(s.is_active());
    }

    #[test]
    fn end_before_start_is_violation() {
        let mut s = SegmentState::Idle;
        s.start(LinkId(1), 50.0).unwrap();
        assert!(matches!(
            s.end(LinkId(1), 40.0, 1.0),
            Err(ProtocolViolation::EndsBeforeStart { .. })
        ));
    }
}

// ── IntervalStore ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod interval_store {
    use super::*;

    #[test]
    fn single_record_apportionment() {
        let s = store(&[(100.0, 200.0, 50.0)]);
        assert_eq!(s.query(100.0, 200.0).unwrap(), 50.0);
        assert!((s.query(100.0, 150.0).unwrap() - 25.0).abs() < EPS);
        assert!((s.query(150.0, 200.0).unwrap() - 25.0).abs() < EPS);
    }

    #[test]
    fn empty_window_is_zero_everywhere() {
        let s = store(&[(100.0, 200.0, 50.0), (300.0, 400.0, 10.0)]);
        for t in [0.0, 100.0, 150.0, 200.0, 250.0, 300.0, 399.0, 400.0] {
            assert_eq!(s.query(t, t).unwrap(), 0.0, "t = {t}");
        }
    }

    #[test]
    fn inverted_window_is_invalid_range() {
        let s = store(&[(0.0, 10.0, 1.0)]);
        let err = s.query(10.0, 5.0).unwrap_err();
        assert!(err.is_invalid_range(), "got {err}");
    }

    #[test]
    fn window_in_gap_is_zero() {
        let s = store(&[(0.0, 100.0, 10.0), (200.0, 300.0, 10.0)]);
        assert_eq!(s.query(120.0, 180.0).unwrap(), 0.0);
        assert_eq!(s.query(100.0, 200.0).unwrap(), 0.0);
    }

    #[test]
    fn window_outside_span_is_zero() {
        let s = store(&[(100.0, 200.0, 10.0)]);
        assert_eq!(s.query(0.0, 50.0).unwrap(), 0.0);
        assert_eq!(s.query(500.0, 900.0).unwrap(), 0.0);
        assert_eq!(IntervalStore::new().query(0.0, 100.0).unwrap(), 0.0);
    }

    #[test]
    fn partial_first_full_middle_partial_last() {
        // [0,100) 100 m, [100,200) 50 m, [200,300) 80 m, [300,400) 40 m
        let s = store(&[
            (0.0, 100.0, 100.0),
            (100.0, 200.0, 50.0),
            (200.0, 300.0, 80.0),
            (300.0, 400.0, 40.0),
        ]);
        // 0.25 * 100 + 50 + 80 + 0.5 * 40
        let got = s.query(75.0, 350.0).unwrap();
        assert!((got - 175.0).abs() < EPS, "got {got}");
    }

    #[test]
    fn window_starting_in_gap() {
        let s = store(&[(0.0, 100.0, 10.0), (200.0, 300.0, 60.0)]);
        // Nothing from the gap, half of the second record.
        let got = s.query(150.0, 250.0).unwrap();
        assert!((got - 30.0).abs() < EPS);
    }

    #[test]
    fn linear_over_any_split() {
        let s = store(&[(0.0, 100.0, 50.0), (150.0, 250.0, 100.0), (300.0, 330.0, 30.0)]);
        let (qs, qe) = (20.0, 320.0);
        let whole = s.query(qs, qe).unwrap();
        for k in [1usize, 2, 3, 7, 16] {
            let step = (qe - qs) / k as f64;
            let pieces: f64 = (0..k)
                .map(|i| {
                    let a = qs + step * i as f64;
                    let b = if i + 1 == k { qe } else { qs + step * (i + 1) as f64 };
                    s.query(a, b).unwrap()
                })
                .sum();
            assert!((pieces - whole).abs() < 1e-6, "k = {k}: {pieces} vs {whole}");
        }
    }

    #[test]
    fn widening_never_decreases() {
        let s = store(&[(0.0, 100.0, 50.0), (150.0, 250.0, 100.0), (300.0, 330.0, 30.0)]);
        let mut last = 0.0;
        for (qs, qe) in [(160.0, 170.0), (150.0, 200.0), (90.0, 260.0), (40.0, 310.0), (0.0, 400.0)] {
            let got = s.query(qs, qe).unwrap();
            assert!(got >= last, "[{qs}, {qe}) gave {got} < {last}");
            last = got;
        }
        assert!((last - 180.0).abs() < EPS);
    }

    #[test]
    fn adjacent_windows_do_not_double_count_edges() {
        let s = store(&[(0.0, 3600.0, 100.0), (3600.0, 7200.0, 60.0)]);
        assert_eq!(s.query(0.0, 3600.0).unwrap(), 100.0);
        assert_eq!(s.query(3600.0, 7200.0).unwrap(), 60.0);
        assert_eq!(s.query(0.0, 7200.0).unwrap(), 160.0);
    }

    #[test]
    fn degenerate_record_belongs_to_window_starting_at_it() {
        let s = store(&[(0.0, 100.0, 10.0), (100.0, 100.0, 5.0), (100.0, 200.0, 10.0)]);
        // Right-open: the point at 100 is outside [50, 100) and inside [100, 150).
        assert!((s.query(50.0, 100.0).unwrap() - 5.0).abs() < EPS);
        assert!((s.query(100.0, 150.0).unwrap() - 10.0).abs() < EPS);
        assert!((s.query(50.0, 150.0).unwrap() - 15.0).abs() < EPS);
    }

    #[test]
    fn linear_across_split_at_degenerate_record() {
        let s = store(&[
            (0.0, 100.0, 10.0),
            (100.0, 100.0, 5.0),
            (100.0, 200.0, 10.0),
            (250.0, 250.0, 7.0),
        ]);
        let whole = s.query(50.0, 300.0).unwrap();
        assert!((whole - 27.0).abs() < EPS, "got {whole}");
        for cuts in [&[100.0][..], &[100.0, 250.0], &[75.0, 100.0, 120.0, 250.0, 260.0]] {
            let mut edges = vec![50.0];
            edges.extend_from_slice(cuts);
            edges.push(300.0);
            let pieces: f64 = edges.windows(2).map(|w| s.query(w[0], w[1]).unwrap()).sum();
            assert!((pieces - whole).abs() < 1e-9, "cuts {cuts:?}: {pieces} vs {whole}");
        }
    }

    #[test]
    fn degenerate_record_strictly_inside_counts_whole() {
        let s = store(&[(0.0, 100.0, 10.0), (100.0, 100.0, 5.0), (100.0, 200.0, 10.0)]);
        assert!((s.query(99.0, 101.0).unwrap() - (0.1 + 5.0 + 0.1)).abs() < EPS);
    }

    #[test]
    fn degenerate_record_outside_is_ignored() {
        let s = store(&[(0.0, 100.0, 10.0), (100.0, 100.0, 5.0)]);
        assert!((s.query(0.0, 50.0).unwrap() - 5.0).abs() < EPS);
    }

    #[test]
    fn record_at_is_left_closed_right_open() {
        let s = store(&[(0.0, 100.0, 10.0), (200.0, 300.0, 20.0)]);
        assert_eq!(s.record_at(0.0).map(|r| r.value), Some(10.0));
        assert_eq!(s.record_at(99.9).map(|r| r.value), Some(10.0));
        assert!(s.record_at(100.0).is_none());
        assert!(s.record_at(150.0).is_none());
        assert_eq!(s.record_at(200.0).map(|r| r.value), Some(20.0));
        assert!(s.record_at(-1.0).is_none());
    }

    #[test]
    fn span_and_total() {
        let s = store(&[(10.0, 20.0, 1.0), (30.0, 45.0, 2.0)]);
        assert_eq!(s.span(), Some((10.0, 45.0)));
        assert_eq!(s.total(), 3.0);
        assert_eq!(IntervalStore::new().span(), None);
    }
}

// ── BinnedStore ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod binned_store {
    use crate::{BinnedStore, is_single_bin};

    use super::*;

    fn hourly() -> BinnedStore {
        BinnedStore::new(3600.0)
    }

    fn traverse(s: &mut BinnedStore, start: f64, end: f64, value: f64) {
        s.on_start(start);
        s.add(rec(start, end, value));
    }

    #[test]
    fn same_bin_accumulates() {
        let mut s = hourly();
        traverse(&mut s, 100.0, 200.0, 10.0);
        traverse(&mut s, 300.0, 900.0, 25.0);
        s.flush();
        assert_eq!(s.query(0.0, 3600.0).unwrap(), 35.0);
    }

    #[test]
    fn crossing_split_uses_segment_elapsed_time() {
        let mut s = hourly();
        traverse(&mut s, 100.0, 200.0, 10.0);
        // 600 of the 1200 s lie in bin 0: half the length goes there.
        traverse(&mut s, 3000.0, 4200.0, 120.0);
        s.flush();
        assert!((s.query(0.0, 3600.0).unwrap() - 70.0).abs() < EPS);
        assert!((s.query(3600.0, 7200.0).unwrap() - 60.0).abs() < EPS);
    }

    #[test]
    fn crossing_several_bins_spreads_by_time() {
        let mut s = hourly();
        traverse(&mut s, 3000.0, 9000.0, 600.0);
        s.flush();
        assert_eq!(s.query(0.0, 3600.0).unwrap(), 60.0);
        assert_eq!(s.query(3600.0, 7200.0).unwrap(), 360.0);
        assert_eq!(s.query(7200.0, 10_800.0).unwrap(), 180.0);
        assert_eq!(s.total(), 600.0);
    }

    #[test]
    fn start_in_later_bin_seals_current() {
        let mut s = hourly();
        traverse(&mut s, 100.0, 200.0, 10.0);
        s.on_start(8000.0);
        // Bin 0 is sealed and visible; bin 2 has not elapsed yet.
        assert_eq!(s.query(0.0, 3600.0).unwrap(), 10.0);
        assert_eq!(s.query(7200.0, 10_800.0).unwrap(), 0.0);
        s.add(rec(8000.0, 8100.0, 5.0));
        s.flush();
        assert_eq!(s.query(7200.0, 10_800.0).unwrap(), 5.0);
        // Skipped bin was never created.
        assert_eq!(s.query(3600.0, 7200.0).unwrap(), 0.0);
        assert_eq!(s.bins().count(), 2);
    }

    #[test]
    fn bins_advance_monotonically() {
        let mut s = hourly();
        traverse(&mut s, 5000.0, 5100.0, 1.0);
        // A start in an earlier bin never rewinds the pointer.
        s.on_start(10.0);
        s.add(rec(10.0, 20.0, 2.0));
        s.flush();
        let bins: Vec<(f64, f64)> = s.bins().collect();
        assert_eq!(bins, [(3600.0, 3.0)]);
    }

    #[test]
    fn non_bin_window_unsupported() {
        let s = hourly();
        assert!(matches!(
            s.query(0.0, 1800.0),
            Err(TraceError::UnsupportedWindow { bin_size, .. }) if bin_size == 3600.0
        ));
    }

    #[test]
    fn misaligned_bin_wide_window_unsupported() {
        let mut s = hourly();
        traverse(&mut s, 2000.0, 2100.0, 10.0);
        s.flush();
        assert!(matches!(
            s.query(1800.0, 5400.0),
            Err(TraceError::UnsupportedWindow { start, .. }) if start == 1800.0
        ));
        assert_eq!(s.query(0.0, 3600.0).unwrap(), 10.0);
    }

    #[test]
    fn empty_or_inverted_window() {
        let mut s = hourly();
        traverse(&mut s, 100.0, 200.0, 10.0);
        s.flush();
        assert_eq!(s.query(500.0, 500.0).unwrap(), 0.0);
        assert!(s.query(3600.0, 0.0).unwrap_err().is_invalid_range());
    }

    #[test]
    fn single_bin_check() {
        let w = |a, b| tf_core::TimeWindow::new(a, b).unwrap();
        assert!(is_single_bin(&w(7200.0, 10_800.0), 3600.0));
        assert!(is_single_bin(&w(0.0, 900.0), 900.0));
        assert!(!is_single_bin(&w(1800.0, 5400.0), 3600.0));
        assert!(!is_single_bin(&w(3600.0, 5400.0), 3600.0));
    }

    #[test]
    fn bin_too_narrow_to_advance_does_not_stall() {
        // At t=30000 adding 1e-12 no longer changes the value.
        let mut s = BinnedStore::new(1e-12);
        s.on_start(30_000.0);
        s.add(rec(30_000.0, 30_001.0, 1.0));
        s.flush();
        assert_eq!(s.bins().count(), 1);
        assert!((s.total() - 1.0).abs() < EPS);
    }
}

// ── TrajectoryAggregator ──────────────────────────────────────────────────────

#[cfg(test)]
mod aggregator {
    use std::collections::HashSet;

    use crate::{ProtocolViolation, SegmentState, TraceStore};

    use super::*;

    fn intervals() -> TrajectoryAggregator {
        TrajectoryAggregator::new(AggregationStrategy::Intervals, links())
    }

    #[test]
    fn unit_calls_build_queryable_trace() {
        let mut agg = intervals();
        agg.on_unit_start(LinkId(0), AgentId(1), 100.0).unwrap();
        agg.on_unit_end(LinkId(0), AgentId(1), 200.0, 50.0).unwrap();
        let traces = agg.finish();
        assert_eq!(traces.query_interval(AgentId(1), 100.0, 200.0).unwrap(), 50.0);
        assert!((traces.query_interval(AgentId(1), 100.0, 150.0).unwrap() - 25.0).abs() < EPS);
        assert!((traces.query_interval(AgentId(1), 150.0, 200.0).unwrap() - 25.0).abs() < EPS);
    }

    #[test]
    fn zero_time_traversal_on_hour_edge_lands_in_later_hour() {
        let mut agg = intervals();
        agg.on_unit_start(LinkId(0), AgentId(1), 3000.0).unwrap();
        agg.on_unit_end(LinkId(0), AgentId(1), 3600.0, 20.0).unwrap();
        agg.on_unit_start(LinkId(1), AgentId(1), 3600.0).unwrap();
        agg.on_unit_end(LinkId(1), AgentId(1), 3600.0, 30.0).unwrap();
        let traces = agg.finish();
        assert_eq!(traces.query_interval(AgentId(1), 0.0, 3600.0).unwrap(), 20.0);
        assert_eq!(traces.query_interval(AgentId(1), 3600.0, 7200.0).unwrap(), 30.0);
        assert_eq!(traces.query_interval(AgentId(1), 0.0, 7200.0).unwrap(), 50.0);
    }

    #[test]
    fn start_twice_is_protocol_error() {
        let mut agg = intervals();
        agg.on_unit_start(LinkId(0), AgentId(1), 100.0).unwrap();
        let err = agg.on_unit_start(LinkId(1), AgentId(1), 110.0).unwrap_err();
        assert!(matches!(
            err,
            TraceError::Protocol { agent, violation: ProtocolViolation::AlreadyActive { .. }, .. }
                if agent == AgentId(1)
        ));
    }

    #[test]
    fn end_without_start_is_protocol_error() {
        let mut agg = intervals();
        assert!(matches!(
            agg.on_unit_end(LinkId(0), AgentId(1), 100.0, 20.0),
            Err(TraceError::Protocol { violation: ProtocolViolation::NotActive, .. })
        ));
    }

    #[test]
    fn event_trip_resolves_driver_and_lengths() {
        let mut agg = intervals();
        let n = agg.replay(trip(1, 7, 100.0)).unwrap();
        assert_eq!(n, 4);
        assert!(agg.drivers().is_empty(), "vehicle left traffic");

        let traces = agg.finish();
        let trace = traces.trace(AgentId(1)).unwrap();
        let TraceStore::Intervals(store) = trace.store() else {
            panic!("expected interval store");
        };
        assert_eq!(store.records(), &[rec(100.0, 150.0, 20.0), rec(150.0, 200.0, 30.0)]);
        assert_eq!(traces.query_interval(AgentId(1), 100.0, 200.0).unwrap(), 50.0);
        assert_eq!(traces.query_interval(AgentId(1), 0.0, 150.0).unwrap(), 20.0);
    }

    #[test]
    fn round_trip_reproduces_inputs() {
        let triples = [(0.0, 30.0, 120.0), (30.0, 95.0, 480.5), (400.0, 401.0, 3.25), (401.0, 900.0, 7_000.0)];
        let mut agg = intervals();
        for (i, &(enter, exit, dist)) in triples.iter().enumerate() {
            let link = LinkId(i as u32);
            agg.on_unit_start(link, AgentId(3), enter).unwrap();
            agg.on_unit_end(link, AgentId(3), exit, dist).unwrap();
        }
        let traces = agg.finish();
        for &(enter, exit, dist) in &triples {
            assert_eq!(traces.query_interval(AgentId(3), enter, exit).unwrap(), dist);
        }
    }

    #[test]
    fn link_events_without_driver_are_ignored() {
        let mut agg = intervals();
        agg.handle(&TraceEvent::LinkEnter { time: 0.0, vehicle: VehicleId(5), link: LinkId(0) }).unwrap();
        agg.handle(&TraceEvent::LinkLeave { time: 9.0, vehicle: VehicleId(5), link: LinkId(0) }).unwrap();
        assert!(agg.finish().is_empty());
    }

    #[test]
    fn filtered_agents_are_ignored() {
        let only: HashSet<AgentId> = [AgentId(2)].into_iter().collect();
        let mut agg = TrajectoryAggregator::with_filter(AggregationStrategy::Intervals, links(), only);
        let mut events = trip(1, 10, 100.0);
        events.extend(trip(2, 20, 100.0));
        agg.replay(events).unwrap();
        let traces = agg.finish();
        assert!(traces.trace(AgentId(1)).is_none());
        assert_eq!(traces.query_interval(AgentId(2), 0.0, 1000.0).unwrap(), 50.0);
    }

    #[test]
    fn vehicle_reused_by_another_agent() {
        let mut agg = intervals();
        let mut events = trip(1, 7, 100.0);
        events.extend(trip(2, 7, 500.0));
        agg.replay(events).unwrap();
        let traces = agg.finish();
        assert_eq!(traces.query_interval(AgentId(1), 0.0, 1000.0).unwrap(), 50.0);
        assert_eq!(traces.query_interval(AgentId(2), 0.0, 1000.0).unwrap(), 50.0);
        assert_eq!(traces.query_interval(AgentId(2), 0.0, 500.0).unwrap(), 0.0);
    }

    #[test]
    fn unknown_link_aborts_replay() {
        let mut agg = intervals();
        let events = vec![
            TraceEvent::EntersTraffic { time: 0.0, vehicle: VehicleId(1), agent: AgentId(1), link: LinkId(42) },
            TraceEvent::LeavesTraffic { time: 5.0, vehicle: VehicleId(1), agent: AgentId(1), link: LinkId(42) },
        ];
        assert!(matches!(agg.replay(events), Err(TraceError::UnknownLink(LinkId(42)))));
    }

    #[test]
    fn replay_stops_at_first_protocol_error() {
        let mut agg = intervals();
        let mut events = trip(1, 7, 100.0);
        // A second link_enter without leaving the first link.
        events.insert(3, TraceEvent::LinkEnter { time: 160.0, vehicle: VehicleId(7), link: LinkId(2) });
        assert!(matches!(agg.replay(events), Err(TraceError::Protocol { .. })));
    }

    #[test]
    fn reset_clears_drivers_only() {
        let mut agg = intervals();
        let events = trip(1, 7, 100.0);
        agg.replay(events[..3].iter().copied()).unwrap();
        assert_eq!(agg.drivers().driver_of(VehicleId(7)), Some(AgentId(1)));

        agg.reset();
        assert!(agg.drivers().is_empty());
        // Accumulated records survive; the open traversal too.
        let trace = agg.trace(AgentId(1)).unwrap();
        assert_eq!(trace.store().total(), 20.0);
        assert!(trace.state().is_active());
        // Link events for the now-unknown vehicle are dropped.
        agg.handle(&TraceEvent::LinkLeave { time: 200.0, vehicle: VehicleId(7), link: LinkId(1) }).unwrap();
        assert!(agg.trace(AgentId(1)).unwrap().state().is_active());
    }

    #[test]
    fn finish_drops_dangling_segment() {
        let mut agg = intervals();
        let events = trip(1, 7, 100.0);
        agg.replay(events[..3].iter().copied()).unwrap();
        let traces = agg.finish();
        let trace = traces.trace(AgentId(1)).unwrap();
        assert_eq!(trace.state(), SegmentState::Idle);
        assert_eq!(traces.query_interval(AgentId(1), 0.0, 1000.0).unwrap(), 20.0);
    }

    #[test]
    fn binned_strategy_through_events() {
        let mut agg = TrajectoryAggregator::new(AggregationStrategy::hourly(), links());
        // 3550 → 3600 on link 0 (20 m), 3600 → 3650 on link 1 (30 m).
        agg.replay(trip(1, 7, 3550.0)).unwrap();
        let traces = agg.finish();
        assert_eq!(traces.query_interval(AgentId(1), 0.0, 3600.0).unwrap(), 20.0);
        assert_eq!(traces.query_interval(AgentId(1), 3600.0, 7200.0).unwrap(), 30.0);
        assert!(matches!(
            traces.query_interval(AgentId(1), 0.0, 100.0),
            Err(TraceError::UnsupportedWindow { .. })
        ));
    }

    #[test]
    fn unknown_agent_queries_zero_but_window_checked() {
        let traces = intervals().finish();
        assert_eq!(traces.query_interval(AgentId(99), 0.0, 100.0).unwrap(), 0.0);
        assert!(traces.query_interval(AgentId(99), 100.0, 0.0).unwrap_err().is_invalid_range());
    }

    #[test]
    fn trace_set_agents_sorted() {
        let mut agg = intervals();
        let mut events = trip(5, 1, 0.0);
        events.extend(trip(2, 2, 500.0));
        events.extend(trip(9, 3, 900.0));
        agg.replay(events).unwrap();
        assert_eq!(agg.finish().agents(), [AgentId(2), AgentId(5), AgentId(9)]);
    }
}

// ── Loaders ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use crate::{load_events_reader, load_links_reader};

    use super::*;

    #[test]
    fn links_load() {
        let table = load_links_reader(Cursor::new("link_id,length_m\n0,120.5\n3,800\n")).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.length(LinkId(3)).unwrap(), 800.0);
        assert!(matches!(table.length(LinkId(1)), Err(TraceError::UnknownLink(_))));
    }

    #[test]
    fn negative_link_length_rejected() {
        assert!(load_links_reader(Cursor::new("link_id,length_m\n0,-1\n")).is_err());
    }

    #[test]
    fn events_load_in_order() {
        let csv = "\
time,kind,vehicle,agent,link
100,enters_traffic,7,1,0
150,link_leave,7,,0
150,link_enter,7,,1
200,leaves_traffic,7,1,1
";
        let events = load_events_reader(Cursor::new(csv)).unwrap();
        assert_eq!(events, trip(1, 7, 100.0));
    }

    #[test]
    fn traffic_event_needs_agent() {
        let csv = "time,kind,vehicle,agent,link\n100,enters_traffic,7,,0\n";
        let err = load_events_reader(Cursor::new(csv)).unwrap_err();
        assert!(err.to_string().contains("row 2"), "got {err}");
    }

    #[test]
    fn unknown_kind_rejected() {
        let csv = "time,kind,vehicle,agent,link\n100,teleport,7,1,0\n";
        assert!(matches!(load_events_reader(Cursor::new(csv)), Err(TraceError::Parse(_))));
    }
}
