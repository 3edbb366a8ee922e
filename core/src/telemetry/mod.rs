pub mod log;
pub mod metrics;

pub use log::StatusLog;
pub use metrics::{CycleMetrics, MetricsSnapshot};
