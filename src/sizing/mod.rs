//! Per-park wind, solar and storage sizing with cost aggregation.

pub mod capacity;
/// Park schema and table resolution.
pub mod park;
pub mod report;

pub use capacity::{RequiredCapacity, StorageSizing};
pub use park::{ParkColumns, ParkSeries, discover_parks};
pub use report::{ParkSizing, SizingParams, SizingReport, size_park, size_parks};
