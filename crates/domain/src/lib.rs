//! Cube Cache Domain Layer
pub mod config;
pub mod errors;
pub mod hit_rate;

pub use config::{
    CliOverrides, Config, ConfigError, InterceptorConfig, LoggingConfig, ReportSinkKind,
    StatsConfig,
};
pub use errors::DomainError;
pub use hit_rate::{CounterSnapshot, HitRateReport, RateMetrics};
