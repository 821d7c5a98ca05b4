/// Hourly step clock and wall-clock labels.
pub mod clock;
pub mod dispatch;
pub mod kpi;
pub mod power_balance;
pub mod types;
