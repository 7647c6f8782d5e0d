use cube_cache_application::ports::ReportSink;
use cube_cache_domain::{DomainError, HitRateReport};
use tracing::info;

/// Forwards reports to the installed `tracing` subscriber.
pub struct TracingReportSink;

impl ReportSink for TracingReportSink {
    fn emit(&self, report: &HitRateReport) -> Result<(), DomainError> {
        info!(
            target: "cube_cache::hit_rate",
            pid = report.pid,
            cache_label = %report.cache_label,
            cycle_requests = report.last_cycle.request_count,
            cycle_hit_rate = report.last_cycle.hit_rate,
            total_requests = report.lifetime.request_count,
            total_hit_rate = report.lifetime.hit_rate,
            "{}",
            report
        );
        Ok(())
    }
}
