pub mod hit_rate_report;
pub mod monitor;

pub use hit_rate_report::{HitRateReportJob, ReporterState};
pub use monitor::HitRateMonitor;
