use cube_cache_application::ports::ReportSink;
use cube_cache_application::HitRateCounter;
use cube_cache_domain::{CounterSnapshot, DomainError, HitRateReport};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::hit_rate_report::{HitRateReportJob, ReporterState};

/// Owns the process-wide hit-rate counter and its periodic reporter.
///
/// Built once during accelerator startup; share it (or `counter()`) with
/// every file-access call site and call `stop` or `shutdown` on exit.
pub struct HitRateMonitor {
    counter: Arc<HitRateCounter>,
    reporter: Arc<HitRateReportJob>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl HitRateMonitor {
    pub async fn configure(
        cache_label: impl Into<String>,
        report_interval: Duration,
        sink: Arc<dyn ReportSink>,
    ) -> Result<Self, DomainError> {
        Self::configure_with_cancellation(
            cache_label,
            report_interval,
            sink,
            CancellationToken::new(),
        )
        .await
    }

    /// Like `configure`, with the reporter also stopping when `token` is cancelled.
    pub async fn configure_with_cancellation(
        cache_label: impl Into<String>,
        report_interval: Duration,
        sink: Arc<dyn ReportSink>,
        token: CancellationToken,
    ) -> Result<Self, DomainError> {
        let counter = Arc::new(HitRateCounter::new(cache_label, sink));
        let reporter = Arc::new(
            HitRateReportJob::new(Arc::clone(&counter), report_interval)?
                .with_cancellation(token.child_token()),
        );

        let handle = Arc::clone(&reporter).start().await;

        Ok(Self {
            counter,
            reporter,
            handle: Mutex::new(handle),
        })
    }

    #[inline]
    pub fn record(&self, is_hit: bool) {
        self.counter.record(is_hit);
    }

    pub fn report(&self) -> HitRateReport {
        self.counter.report()
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        self.counter.snapshot()
    }

    pub fn counter(&self) -> Arc<HitRateCounter> {
        Arc::clone(&self.counter)
    }

    pub fn reporter_state(&self) -> ReporterState {
        self.reporter.state()
    }

    pub fn reports_emitted(&self) -> u64 {
        self.reporter.reports_emitted()
    }

    /// Stops periodic reporting. Calling it again is a no-op.
    pub fn stop(&self) {
        if self.reporter.state() != ReporterState::Cancelled {
            info!(
                cache_label = self.counter.cache_label(),
                "Stopping hit-rate reporting"
            );
        }
        self.reporter.cancel();
    }

    /// Stops reporting and waits for the reporter task to exit.
    pub async fn shutdown(&self) {
        self.stop();

        let handle = self
            .handle
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();

        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                warn!(error = %e, "Hit-rate report task ended abnormally");
            }
        }
    }
}
