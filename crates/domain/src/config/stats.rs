use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportSinkKind {
    #[default]
    Stdout,

    Tracing,
}

impl ReportSinkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Tracing => "tracing",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StatsConfig {
    #[serde(default = "default_cache_label")]
    pub cache_label: String,

    #[serde(default = "default_report_interval_secs")]
    pub report_interval_secs: u64,

    /// Also report every N fetched batches. Disabled when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_every_batches: Option<u64>,

    #[serde(default)]
    pub sink: ReportSinkKind,
}

impl StatsConfig {
    pub fn report_interval(&self) -> Duration {
        Duration::from_secs(self.report_interval_secs)
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            cache_label: default_cache_label(),
            report_interval_secs: default_report_interval_secs(),
            report_every_batches: None,
            sink: ReportSinkKind::default(),
        }
    }
}

fn default_cache_label() -> String {
    "user memory".to_string()
}

fn default_report_interval_secs() -> u64 {
    120
}
