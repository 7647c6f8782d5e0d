use cube_cache_application::ports::ReportSink;
use cube_cache_domain::{DomainError, HitRateReport};
use std::io::{self, Stdout, Write};
use std::sync::Mutex;

/// Writes each report as one plain text line.
pub struct LineReportSink<W: Write + Send> {
    writer: Mutex<W>,
}

pub type StdoutReportSink = LineReportSink<Stdout>;

impl LineReportSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> LineReportSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl<W: Write + Send> ReportSink for LineReportSink<W> {
    fn emit(&self, report: &HitRateReport) -> Result<(), DomainError> {
        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        writeln!(writer, "{}", report)
            .and_then(|_| writer.flush())
            .map_err(|e| DomainError::SinkUnavailable(e.to_string()))
    }
}
