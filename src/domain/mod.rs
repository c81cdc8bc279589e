// Domain layer - Fill-up records and the metrics derived from them
pub mod chart;
pub mod dashboard;
pub mod display;
pub mod fillup;
pub mod metrics;
pub mod stats;
pub mod units;
