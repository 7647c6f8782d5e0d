use cube_cache_domain::{CounterSnapshot, HitRateReport, RateMetrics};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, warn};

use crate::ports::ReportSink;

// align(64) keeps the per-access counters on their own cache line so that
// concurrent `record` calls do not contend with the lifetime totals.
#[derive(Default)]
#[repr(align(64))]
struct CycleCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    _pad: [u64; 6],
}

#[derive(Debug, Default, Clone, Copy)]
struct LifetimeTotals {
    requests: u64,
    hits: u64,
    misses: u64,
}

/// Process-wide cache hit/miss counter.
///
/// `record` is lock-free and may be called from any thread. `report` closes
/// the current cycle: it takes the cycle counts (leaving zero behind), folds
/// them into the lifetime totals, and emits one line through the sink.
/// Accesses recorded while a report is running are counted in exactly one
/// of the two cycles.
pub struct HitRateCounter {
    cycle: CycleCounters,
    totals: Mutex<LifetimeTotals>,
    cache_label: String,
    pid: u32,
    sink: Arc<dyn ReportSink>,
}

impl HitRateCounter {
    pub fn new(cache_label: impl Into<String>, sink: Arc<dyn ReportSink>) -> Self {
        Self {
            cycle: CycleCounters::default(),
            totals: Mutex::new(LifetimeTotals::default()),
            cache_label: cache_label.into(),
            pid: std::process::id(),
            sink,
        }
    }

    pub fn cache_label(&self) -> &str {
        &self.cache_label
    }

    #[inline]
    pub fn record(&self, is_hit: bool) {
        if is_hit {
            self.cycle.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.cycle.misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn report(&self) -> HitRateReport {
        let report = {
            let mut totals = self.lock_totals();

            let hits = self.cycle.hits.swap(0, Ordering::AcqRel);
            let misses = self.cycle.misses.swap(0, Ordering::AcqRel);

            totals.requests += hits + misses;
            totals.hits += hits;
            totals.misses += misses;

            HitRateReport {
                pid: self.pid,
                cache_label: self.cache_label.clone(),
                last_cycle: RateMetrics::for_cycle(hits, misses),
                lifetime: RateMetrics::for_lifetime(totals.hits, totals.misses),
            }
        };

        debug!(
            cycle_requests = report.last_cycle.request_count,
            total_requests = report.lifetime.request_count,
            "Hit-rate cycle closed"
        );

        if let Err(e) = self.sink.emit(&report) {
            warn!(error = %e, "Failed to emit hit-rate report");
        }

        report
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        let totals = *self.lock_totals();
        CounterSnapshot {
            cycle_hits: self.cycle.hits.load(Ordering::Relaxed),
            cycle_misses: self.cycle.misses.load(Ordering::Relaxed),
            total_requests: totals.requests,
            total_hits: totals.hits,
            total_misses: totals.misses,
        }
    }

    // Poisoning is ignored: totals are plain integers.
    fn lock_totals(&self) -> MutexGuard<'_, LifetimeTotals> {
        self.totals.lock().unwrap_or_else(|e| e.into_inner())
    }
}
