//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use microgrid_sizing::config::ScenarioConfig;
use microgrid_sizing::devices::StorageDevice;

/// Baseline scenario: the reference day with a 100 kWh / 50 kW battery.
pub fn reference_scenario() -> ScenarioConfig {
    ScenarioConfig::baseline()
}

/// 100 kWh, 50 kW, 10–90% band, 95% efficiency.
pub fn default_storage() -> StorageDevice {
    StorageDevice::new(100.0, 50.0, 0.1, 0.9, 0.95).expect("valid storage")
}

/// Large storage with a slow power rating so the SOC band is never reached
/// by the small fixture profiles.
pub fn unclamped_storage() -> StorageDevice {
    StorageDevice::new(10_000.0, 20.0, 0.1, 0.9, 0.9).expect("valid storage")
}

/// Six hours alternating between surplus and deficit.
pub fn alternating_profile() -> (Vec<f64>, Vec<f64>) {
    let load = vec![100.0, 120.0, 80.0, 150.0, 90.0, 110.0];
    let generation = vec![130.0, 100.0, 95.0, 120.0, 140.0, 60.0];
    (load, generation)
}

/// Two parks over three hours.
pub const LOAD_TABLE: &str = "\
hour,North_Load,South_Load
00:00:00,100,40
01:00:00,120,50
02:00:00,110,45
";

/// Wind and solar for both parks. South has no solar at all.
pub const GENERATION_TABLE: &str = "\
hour,North_Wind,North_Solar,South_Wind,South_Solar
00:00:00,60,0,30,0
01:00:00,80,10,20,0
02:00:00,40,30,25,0
";

/// Writes `contents` to a per-process file under the system temp directory.
pub fn write_temp(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("microgrid-sizing-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("temp dir should be creatable");
    let path = dir.join(name);
    fs::write(&path, contents).expect("temp file should be writable");
    path
}
