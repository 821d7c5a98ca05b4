//! Device components for microgrid modeling.

/// Fixed hourly load and generation series.
pub mod profile;
/// Battery storage model with SOC clamping.
pub mod storage;
pub mod types;

// Re-export the main types for convenience
pub use profile::HourlyProfile;
pub use storage::StorageDevice;
pub use types::Device;
pub use types::DeviceContext;
