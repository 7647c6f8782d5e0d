mod batch_report_trigger;
mod hit_rate_counter;

pub use batch_report_trigger::BatchReportTrigger;
pub use hit_rate_counter::HitRateCounter;
