pub mod errors;
pub mod interceptor;
pub mod logging;
pub mod root;
pub mod stats;

pub use errors::ConfigError;
pub use interceptor::InterceptorConfig;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use stats::{ReportSinkKind, StatsConfig};
