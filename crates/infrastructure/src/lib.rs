//! Cube Cache Infrastructure Layer
pub mod interceptor;
pub mod sinks;

pub use interceptor::CachedOpenInterceptor;
pub use sinks::{build_report_sink, LineReportSink, StdoutReportSink, TracingReportSink};
