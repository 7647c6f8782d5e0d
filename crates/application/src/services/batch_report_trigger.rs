use cube_cache_domain::{DomainError, HitRateReport};
use std::num::NonZeroU64;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::HitRateCounter;

/// Closes a reporting cycle every `every` fetched batches, independent of the
/// periodic timer.
pub struct BatchReportTrigger {
    counter: Arc<HitRateCounter>,
    every: NonZeroU64,
    fetched: AtomicU64,
}

impl BatchReportTrigger {
    pub fn new(counter: Arc<HitRateCounter>, every: u64) -> Result<Self, DomainError> {
        let every = NonZeroU64::new(every).ok_or_else(|| {
            DomainError::InvalidInterval("batch report cadence must be at least 1".to_string())
        })?;

        Ok(Self {
            counter,
            every,
            fetched: AtomicU64::new(0),
        })
    }

    pub fn on_batch_fetched(&self) -> Option<HitRateReport> {
        let fetched = self.fetched.fetch_add(1, Ordering::Relaxed) + 1;
        if fetched % self.every.get() == 0 {
            Some(self.counter.report())
        } else {
            None
        }
    }

    pub fn fetched_batches(&self) -> u64 {
        self.fetched.load(Ordering::Relaxed)
    }
}
