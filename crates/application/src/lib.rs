//! Cube Cache Application Layer
pub mod ports;
pub mod services;

pub use services::{BatchReportTrigger, HitRateCounter};
