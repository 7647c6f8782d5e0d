#![allow(dead_code)]

use cube_cache_application::ports::ReportSink;
use cube_cache_domain::{DomainError, HitRateReport};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

pub struct MockReportSink {
    reports: Arc<Mutex<Vec<HitRateReport>>>,
}

impl MockReportSink {
    pub fn new() -> Self {
        Self {
            reports: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn reports(&self) -> Vec<HitRateReport> {
        self.reports.lock().unwrap().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.reports().iter().map(ToString::to_string).collect()
    }

    pub fn call_count(&self) -> usize {
        self.reports.lock().unwrap().len()
    }
}

impl ReportSink for MockReportSink {
    fn emit(&self, report: &HitRateReport) -> Result<(), DomainError> {
        self.reports.lock().unwrap().push(report.clone());
        Ok(())
    }
}

pub struct FailingReportSink {
    call_count: AtomicU64,
}

impl FailingReportSink {
    pub fn new() -> Self {
        Self {
            call_count: AtomicU64::new(0),
        }
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl ReportSink for FailingReportSink {
    fn emit(&self, _report: &HitRateReport) -> Result<(), DomainError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        Err(DomainError::SinkUnavailable("stdout closed".to_string()))
    }
}
