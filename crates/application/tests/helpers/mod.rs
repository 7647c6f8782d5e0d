mod mock_sinks;

pub use mock_sinks::{FailingReportSink, MockReportSink};
