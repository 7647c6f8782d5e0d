use cube_cache_application::HitRateCounter;
use std::sync::Arc;
use std::thread;

mod helpers;
use helpers::{FailingReportSink, MockReportSink};

fn make_counter() -> (Arc<HitRateCounter>, Arc<MockReportSink>) {
    let sink = Arc::new(MockReportSink::new());
    let counter = Arc::new(HitRateCounter::new("/mnt/cube_cache", sink.clone()));
    (counter, sink)
}

fn record_many(counter: &HitRateCounter, hits: u64, misses: u64) {
    for _ in 0..hits {
        counter.record(true);
    }
    for _ in 0..misses {
        counter.record(false);
    }
}

#[test]
fn test_first_cycle_three_hits_one_miss() {
    let (counter, sink) = make_counter();
    record_many(&counter, 3, 1);

    let report = counter.report();

    assert_eq!(report.last_cycle.request_count, 4);
    assert_eq!(report.last_cycle.hit_count, 3);
    assert_eq!(report.last_cycle.miss_count, 1);
    assert_eq!(format!("{:.2}", report.last_cycle.hit_rate), "75.00");
    assert_eq!(format!("{:.2}", report.last_cycle.miss_rate), "25.00");
    assert_eq!(report.lifetime, report.last_cycle);

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains(
        "last_cycle_metrics:([request_count:4 hit_count:3 miss_count:1 hit_rate:75.00% miss_rate:25.00%])"
    ));
    assert!(lines[0].contains(
        "sum_metrics:([request_count:4 hit_count:3 miss_count:1 hit_rate:75.00% miss_rate:25.00%])"
    ));
}

#[test]
fn test_empty_second_cycle_keeps_lifetime_totals() {
    let (counter, _sink) = make_counter();
    record_many(&counter, 3, 1);
    let first = counter.report();

    let second = counter.report();

    assert_eq!(second.last_cycle.request_count, 1);
    assert_eq!(second.last_cycle.hit_count, 0);
    assert_eq!(second.last_cycle.miss_count, 0);
    assert_eq!(second.last_cycle.hit_rate, 0.0);
    assert_eq!(second.lifetime, first.lifetime);
}

#[test]
fn test_report_before_any_traffic_is_zero_percent() {
    let (counter, sink) = make_counter();

    let report = counter.report();

    assert_eq!(report.last_cycle.request_count, 1);
    assert_eq!(report.lifetime.request_count, 0);
    assert_eq!(report.lifetime.hit_rate, 0.0);
    assert_eq!(report.lifetime.miss_rate, 0.0);
    assert_eq!(sink.call_count(), 1);
}

#[test]
fn test_cycle_counters_reset_after_every_report() {
    let (counter, _sink) = make_counter();

    for (hits, misses) in [(5, 0), (0, 7), (2, 2), (0, 0)] {
        record_many(&counter, hits, misses);
        counter.report();

        let snapshot = counter.snapshot();
        assert_eq!(snapshot.cycle_hits, 0);
        assert_eq!(snapshot.cycle_misses, 0);
    }
}

#[test]
fn test_lifetime_totals_sum_all_cycles() {
    let (counter, _sink) = make_counter();
    let cycles = [(3u64, 1u64), (0, 0), (10, 5), (1, 0)];

    let mut last = None;
    for (hits, misses) in cycles {
        record_many(&counter, hits, misses);
        let report = counter.report();
        assert_eq!(report.last_cycle.hit_count, hits);
        assert_eq!(report.last_cycle.miss_count, misses);
        last = Some(report);
    }

    let expected_hits: u64 = cycles.iter().map(|(h, _)| h).sum();
    let expected_misses: u64 = cycles.iter().map(|(_, m)| m).sum();
    let lifetime = last.unwrap().lifetime;
    assert_eq!(lifetime.hit_count, expected_hits);
    assert_eq!(lifetime.miss_count, expected_misses);
    assert_eq!(lifetime.request_count, expected_hits + expected_misses);

    let snapshot = counter.snapshot();
    assert_eq!(
        snapshot.total_hits + snapshot.total_misses,
        snapshot.total_requests
    );
}

#[test]
fn test_concurrent_records_are_not_lost() {
    let (counter, _sink) = make_counter();

    thread::scope(|s| {
        for _ in 0..10 {
            s.spawn(|| {
                for _ in 0..100 {
                    counter.record(true);
                }
            });
        }
    });

    assert_eq!(counter.snapshot().cycle_hits, 1000);

    let report = counter.report();
    assert_eq!(report.last_cycle.hit_count, 1000);
    assert_eq!(report.last_cycle.miss_count, 0);
    assert_eq!(counter.snapshot().cycle_hits, 0);
}

#[test]
fn test_records_racing_with_reports_land_in_exactly_one_cycle() {
    let (counter, _sink) = make_counter();
    let writers = 4u64;
    let per_writer = 5_000u64;

    let reported_hits: u64 = thread::scope(|s| {
        for _ in 0..writers {
            s.spawn(|| {
                for i in 0..per_writer {
                    counter.record(i % 2 == 0);
                }
            });
        }

        let reporter = s.spawn(|| {
            let mut hits = 0;
            for _ in 0..50 {
                hits += counter.report().last_cycle.hit_count;
                thread::yield_now();
            }
            hits
        });
        reporter.join().unwrap()
    });

    let tail = counter.report();
    let total = writers * per_writer;

    assert_eq!(reported_hits + tail.last_cycle.hit_count, total / 2);
    assert_eq!(tail.lifetime.request_count, total);
    assert_eq!(tail.lifetime.hit_count + tail.lifetime.miss_count, total);
}

#[test]
fn test_failing_sink_does_not_disturb_counting() {
    let sink = Arc::new(FailingReportSink::new());
    let counter = HitRateCounter::new("/mnt/cube_cache", sink.clone());

    counter.record(true);
    let first = counter.report();
    counter.record(false);
    let second = counter.report();

    assert_eq!(sink.call_count(), 2);
    assert_eq!(first.last_cycle.hit_count, 1);
    assert_eq!(second.lifetime.request_count, 2);
}

#[test]
fn test_label_is_carried_into_report() {
    let (counter, _sink) = make_counter();
    assert_eq!(counter.cache_label(), "/mnt/cube_cache");
    assert_eq!(counter.report().cache_label, "/mnt/cube_cache");
}
