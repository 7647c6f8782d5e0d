use cube_cache_application::HitRateCounter;
use cube_cache_domain::DomainError;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

const STATE_CREATED: u8 = 0;
const STATE_RUNNING: u8 = 1;
const STATE_CANCELLED: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReporterState {
    Created,
    Running,
    Cancelled,
}

/// Closes a hit-rate cycle on `counter` every `interval` until cancelled.
///
/// The first report fires one full interval after `start`. Cancellation is
/// terminal: a cancelled job never starts again.
pub struct HitRateReportJob {
    counter: Arc<HitRateCounter>,
    interval: Duration,
    shutdown: CancellationToken,
    state: AtomicU8,
    reports_emitted: AtomicU64,
}

impl HitRateReportJob {
    pub fn new(counter: Arc<HitRateCounter>, interval: Duration) -> Result<Self, DomainError> {
        if interval.is_zero() {
            return Err(DomainError::InvalidInterval(
                "report interval must be positive".to_string(),
            ));
        }

        Ok(Self {
            counter,
            interval,
            shutdown: CancellationToken::new(),
            state: AtomicU8::new(STATE_CREATED),
            reports_emitted: AtomicU64::new(0),
        })
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn state(&self) -> ReporterState {
        if self.shutdown.is_cancelled() {
            return ReporterState::Cancelled;
        }
        match self.state.load(Ordering::Acquire) {
            STATE_CREATED => ReporterState::Created,
            STATE_RUNNING => ReporterState::Running,
            _ => ReporterState::Cancelled,
        }
    }

    pub fn reports_emitted(&self) -> u64 {
        self.reports_emitted.load(Ordering::Relaxed)
    }

    /// Spawns the reporting loop. Returns `None` if the job was already
    /// started or cancelled.
    pub async fn start(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if self.shutdown.is_cancelled()
            || self
                .state
                .compare_exchange(
                    STATE_CREATED,
                    STATE_RUNNING,
                    Ordering::AcqRel,
                    Ordering::Acquire,
                )
                .is_err()
        {
            warn!(
                cache_label = self.counter.cache_label(),
                "HitRateReportJob: start ignored, job already started or cancelled"
            );
            return None;
        }

        info!(
            cache_label = self.counter.cache_label(),
            interval_ms = self.interval.as_millis() as u64,
            "Starting hit-rate report job"
        );

        Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = self.shutdown.cancelled() => {
                        info!("HitRateReportJob: shutting down");
                        break;
                    }
                    _ = ticker.tick() => {
                        if self.shutdown.is_cancelled() {
                            break;
                        }
                        self.counter.report();
                        self.reports_emitted.fetch_add(1, Ordering::Relaxed);
                    }
                }
            }

            self.state.store(STATE_CANCELLED, Ordering::Release);
        }))
    }

    /// Idempotent; safe before `start`.
    pub fn cancel(&self) {
        self.shutdown.cancel();
        self.state.store(STATE_CANCELLED, Ordering::Release);
    }
}
