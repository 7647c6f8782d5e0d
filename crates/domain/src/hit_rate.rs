use serde::{Deserialize, Serialize};
use std::fmt;

/// Request, hit and miss counts for one window with the derived percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateMetrics {
    pub request_count: u64,
    pub hit_count: u64,
    pub miss_count: u64,
    pub hit_rate: f64,
    pub miss_rate: f64,
}

impl RateMetrics {
    /// Metrics for a single cycle. An empty cycle reports `request_count = 1`
    /// so that the rates stay defined (both 0%).
    pub fn for_cycle(hits: u64, misses: u64) -> Self {
        let request_count = match hits + misses {
            0 => 1,
            n => n,
        };

        Self {
            request_count,
            hit_count: hits,
            miss_count: misses,
            hit_rate: percentage(hits, request_count),
            miss_rate: percentage(misses, request_count),
        }
    }

    /// Metrics over the process lifetime. Rates are 0% until traffic exists.
    pub fn for_lifetime(total_hits: u64, total_misses: u64) -> Self {
        let request_count = total_hits + total_misses;

        Self {
            request_count,
            hit_count: total_hits,
            miss_count: total_misses,
            hit_rate: percentage(total_hits, request_count),
            miss_rate: percentage(total_misses, request_count),
        }
    }
}

fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 / whole as f64) * 100.0
}

impl fmt::Display for RateMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[request_count:{} hit_count:{} miss_count:{} hit_rate:{:.2}% miss_rate:{:.2}%]",
            self.request_count, self.hit_count, self.miss_count, self.hit_rate, self.miss_rate
        )
    }
}

/// One closed reporting cycle together with the lifetime totals after folding it in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitRateReport {
    pub pid: u32,
    pub cache_label: String,
    pub last_cycle: RateMetrics,
    pub lifetime: RateMetrics,
}

impl fmt::Display for HitRateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pid:{} cube_cache_dir:{} last_cycle_metrics:({}) sum_metrics:({})",
            self.pid, self.cache_label, self.last_cycle, self.lifetime
        )
    }
}

/// Point-in-time view of a counter that does not close the cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterSnapshot {
    pub cycle_hits: u64,
    pub cycle_misses: u64,
    pub total_requests: u64,
    pub total_hits: u64,
    pub total_misses: u64,
}
