pub mod line;
pub mod tracing_sink;

pub use line::{LineReportSink, StdoutReportSink};
pub use tracing_sink::TracingReportSink;

use cube_cache_application::ports::ReportSink;
use cube_cache_domain::ReportSinkKind;
use std::sync::Arc;

pub fn build_report_sink(kind: ReportSinkKind) -> Arc<dyn ReportSink> {
    match kind {
        ReportSinkKind::Stdout => Arc::new(StdoutReportSink::stdout()),
        ReportSinkKind::Tracing => Arc::new(TracingReportSink),
    }
}
