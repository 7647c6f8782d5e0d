use cube_cache_domain::{DomainError, HitRateReport};

/// Destination for closed-cycle hit-rate reports.
pub trait ReportSink: Send + Sync {
    fn emit(&self, report: &HitRateReport) -> Result<(), DomainError>;
}
