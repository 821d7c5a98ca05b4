//! TOML-based scenario configuration and preset definitions.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::devices::{HourlyProfile, StorageDevice};
use crate::error::SimError;
use crate::sim::kpi::DispatchPrices;
use crate::sizing::{ParkColumns, SizingParams};

/// Reference-day hourly load (kW).
const REFERENCE_LOAD_KW: [f64; 24] = [
    818.0, 820.0, 913.0, 918.0, 871.0, 865.0, 860.0, 870.0, 890.0, 920.0, 960.0, 990.0, 1000.0,
    980.0, 950.0, 930.0, 900.0, 880.0, 850.0, 830.0, 810.0, 800.0, 790.0, 780.0,
];

/// Reference-day hourly wind generation (kW).
const REFERENCE_WIND_KW: [f64; 24] = [
    303.30, 491.55, 494.75, 535.95, 738.70, 600.0, 550.0, 500.0, 450.0, 400.0, 350.0, 300.0,
    250.0, 200.0, 150.0, 100.0, 80.0, 60.0, 50.0, 40.0, 30.0, 20.0, 10.0, 5.0,
];

/// Reference-day hourly solar generation (kW).
const REFERENCE_SOLAR_KW: [f64; 24] = [
    0.0, 0.0, 0.0, 0.0, 0.0, 10.0, 30.0, 50.0, 80.0, 110.0, 130.0, 150.0, 160.0, 150.0, 130.0,
    100.0, 70.0, 50.0, 30.0, 10.0, 0.0, 0.0, 0.0, 0.0,
];

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Storage device parameters.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Hourly load and generation for the dispatch analysis.
    #[serde(default)]
    pub profile: ProfileConfig,
    /// Unit prices for the dispatch cost report.
    #[serde(default)]
    pub prices: PricesConfig,
    /// Installed costs and rules for the park sizing analysis.
    #[serde(default)]
    pub sizing: SizingConfig,
}

/// Storage device parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// Energy capacity (kWh).
    pub capacity_kwh: f64,
    /// Maximum charge/discharge power per step (kW).
    pub power_kw: f64,
    /// Lower SOC bound (fraction of capacity).
    pub soc_min: f64,
    /// Upper SOC bound (fraction of capacity).
    pub soc_max: f64,
    /// Per-direction efficiency (0.0–1.0].
    pub efficiency: f64,
    /// Initial SOC as a fraction of capacity, within `[soc_min, soc_max]`.
    pub initial_soc: f64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            capacity_kwh: 100.0,
            power_kw: 50.0,
            soc_min: 0.1,
            soc_max: 0.9,
            efficiency: 0.95,
            initial_soc: 0.5,
        }
    }
}

/// Hourly load and generation series (kW, one sample per hour).
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileConfig {
    pub load: Vec<f64>,
    pub wind: Vec<f64>,
    pub solar: Vec<f64>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            load: REFERENCE_LOAD_KW.to_vec(),
            wind: REFERENCE_WIND_KW.to_vec(),
            solar: REFERENCE_SOLAR_KW.to_vec(),
        }
    }
}

/// Unit prices for the dispatch cost report.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PricesConfig {
    /// Wind generation cost per kWh.
    pub wind_cost_per_kwh: f64,
    /// Solar generation cost per kWh.
    pub solar_cost_per_kwh: f64,
    /// Grid purchase price per kWh.
    pub purchase_price_per_kwh: f64,
    /// Storage capital cost per kWh of capacity.
    pub storage_energy_cost_per_kwh: f64,
    /// Storage capital cost per kW of power rating.
    pub storage_power_cost_per_kw: f64,
    /// Storage service life (years, must be > 0).
    pub storage_lifetime_years: f64,
}

impl Default for PricesConfig {
    fn default() -> Self {
        let p = DispatchPrices::default();
        Self {
            wind_cost_per_kwh: p.wind_cost_per_kwh,
            solar_cost_per_kwh: p.solar_cost_per_kwh,
            purchase_price_per_kwh: p.purchase_price_per_kwh,
            storage_energy_cost_per_kwh: p.storage_energy_cost_per_kwh,
            storage_power_cost_per_kw: p.storage_power_cost_per_kw,
            storage_lifetime_years: p.storage_lifetime_years,
        }
    }
}

/// Installed costs and sizing rules for the park analysis.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SizingConfig {
    /// Installed wind cost per kW.
    pub wind_cost_per_kw: f64,
    /// Installed solar cost per kW.
    pub solar_cost_per_kw: f64,
    /// Storage power as a fraction of park peak load.
    pub storage_power_ratio: f64,
    /// Load growth multiplier applied before sizing.
    pub load_growth: f64,
    /// Payback period for annualized cost (years).
    pub payback_years: f64,
    /// Explicit park-to-column mapping. Empty means discover `<Park>_Load` columns.
    pub parks: Vec<ParkColumns>,
}

impl Default for SizingConfig {
    fn default() -> Self {
        let p = SizingParams::default();
        Self {
            wind_cost_per_kw: p.wind_cost_per_kw,
            solar_cost_per_kw: p.solar_cost_per_kw,
            storage_power_ratio: p.storage_power_ratio,
            load_growth: p.load_growth,
            payback_years: p.payback_years,
            parks: Vec::new(),
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"storage.capacity_kwh"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario: the reference day with a 100 kWh / 50 kW battery.
    pub fn baseline() -> Self {
        Self {
            storage: StorageConfig::default(),
            profile: ProfileConfig::default(),
            prices: PricesConfig::default(),
            sizing: SizingConfig::default(),
        }
    }

    /// Returns the large-storage preset: four times the energy, three times the power.
    pub fn large_storage() -> Self {
        Self {
            storage: StorageConfig {
                capacity_kwh: 400.0,
                power_kw: 150.0,
                ..StorageConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Returns the narrow-band preset: lossier battery held to a 30–70% SOC band.
    pub fn narrow_band() -> Self {
        Self {
            storage: StorageConfig {
                soc_min: 0.3,
                soc_max: 0.7,
                efficiency: 0.9,
                ..StorageConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "large_storage", "narrow_band"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "large_storage" => Ok(Self::large_storage()),
            "narrow_band" => Ok(Self::narrow_band()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let st = &self.storage;
        if !st.capacity_kwh.is_finite() || st.capacity_kwh <= 0.0 {
            errors.push(ConfigError::new("storage.capacity_kwh", "must be > 0"));
        }
        if !st.power_kw.is_finite() || st.power_kw < 0.0 {
            errors.push(ConfigError::new("storage.power_kw", "must be >= 0"));
        }
        if !(0.0..=1.0).contains(&st.soc_min) {
            errors.push(ConfigError::new("storage.soc_min", "must be in [0.0, 1.0]"));
        }
        if !(0.0..=1.0).contains(&st.soc_max) {
            errors.push(ConfigError::new("storage.soc_max", "must be in [0.0, 1.0]"));
        }
        if st.soc_min >= st.soc_max {
            errors.push(ConfigError::new("storage.soc_min", "must be < storage.soc_max"));
        }
        if !(st.efficiency > 0.0 && st.efficiency <= 1.0) {
            errors.push(ConfigError::new("storage.efficiency", "must be in (0.0, 1.0]"));
        }
        if !(st.soc_min..=st.soc_max).contains(&st.initial_soc) {
            errors.push(ConfigError::new(
                "storage.initial_soc",
                "must be in [storage.soc_min, storage.soc_max]",
            ));
        }

        let pr = &self.profile;
        for (field, series) in [
            ("profile.load", &pr.load),
            ("profile.wind", &pr.wind),
            ("profile.solar", &pr.solar),
        ] {
            if series.is_empty() {
                errors.push(ConfigError::new(field, "must not be empty"));
            } else if series.iter().any(|v| !v.is_finite() || *v < 0.0) {
                errors.push(ConfigError::new(field, "samples must be finite and >= 0"));
            }
        }
        if pr.wind.len() != pr.load.len() || pr.solar.len() != pr.load.len() {
            errors.push(ConfigError::new(
                "profile",
                format!(
                    "load, wind and solar must have equal lengths ({}/{}/{})",
                    pr.load.len(),
                    pr.wind.len(),
                    pr.solar.len()
                ),
            ));
        }

        let p = &self.prices;
        for (field, v) in [
            ("prices.wind_cost_per_kwh", p.wind_cost_per_kwh),
            ("prices.solar_cost_per_kwh", p.solar_cost_per_kwh),
            ("prices.purchase_price_per_kwh", p.purchase_price_per_kwh),
            ("prices.storage_energy_cost_per_kwh", p.storage_energy_cost_per_kwh),
            ("prices.storage_power_cost_per_kw", p.storage_power_cost_per_kw),
        ] {
            if !v.is_finite() || v < 0.0 {
                errors.push(ConfigError::new(field, "must be finite and >= 0"));
            }
        }
        if !p.storage_lifetime_years.is_finite() || p.storage_lifetime_years <= 0.0 {
            errors.push(ConfigError::new(
                "prices.storage_lifetime_years",
                "must be finite and > 0",
            ));
        }

        let sz = &self.sizing;
        for (field, v) in [
            ("sizing.wind_cost_per_kw", sz.wind_cost_per_kw),
            ("sizing.solar_cost_per_kw", sz.solar_cost_per_kw),
            ("sizing.payback_years", sz.payback_years),
        ] {
            if !v.is_finite() || v <= 0.0 {
                errors.push(ConfigError::new(field, "must be finite and > 0"));
            }
        }
        for (field, v) in [
            ("sizing.storage_power_ratio", sz.storage_power_ratio),
            ("sizing.load_growth", sz.load_growth),
        ] {
            if !v.is_finite() || v < 0.0 {
                errors.push(ConfigError::new(field, "must be finite and >= 0"));
            }
        }
        let mut seen = HashSet::new();
        for park in &sz.parks {
            if !seen.insert(park.name.as_str()) {
                errors.push(ConfigError::new(
                    "sizing.parks",
                    format!("duplicate park name \"{}\"", park.name),
                ));
            }
        }

        errors
    }

    /// Builds the storage device described by `[storage]`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] if the parameters are invalid.
    pub fn storage_device(&self) -> Result<StorageDevice, SimError> {
        let s = &self.storage;
        StorageDevice::new(s.capacity_kwh, s.power_kw, s.soc_min, s.soc_max, s.efficiency)
    }

    pub fn load_profile(&self) -> HourlyProfile {
        HourlyProfile::new(self.profile.load.clone())
    }

    pub fn wind_profile(&self) -> HourlyProfile {
        HourlyProfile::new(self.profile.wind.clone())
    }

    pub fn solar_profile(&self) -> HourlyProfile {
        HourlyProfile::new(self.profile.solar.clone())
    }

    /// Wind plus solar generation.
    pub fn generation_profile(&self) -> HourlyProfile {
        HourlyProfile::combined(&self.wind_profile(), &self.solar_profile())
    }

    /// Unit prices for the dispatch cost report.
    pub fn dispatch_prices(&self) -> DispatchPrices {
        let p = &self.prices;
        DispatchPrices {
            wind_cost_per_kwh: p.wind_cost_per_kwh,
            solar_cost_per_kwh: p.solar_cost_per_kwh,
            purchase_price_per_kwh: p.purchase_price_per_kwh,
            storage_energy_cost_per_kwh: p.storage_energy_cost_per_kwh,
            storage_power_cost_per_kw: p.storage_power_cost_per_kw,
            storage_lifetime_years: p.storage_lifetime_years,
        }
    }

    /// Sizing parameters; per-kWh prices and the SOC band come from `[prices]` and `[storage]`.
    pub fn sizing_params(&self) -> SizingParams {
        let sz = &self.sizing;
        let p = &self.prices;
        SizingParams {
            wind_cost_per_kw: sz.wind_cost_per_kw,
            solar_cost_per_kw: sz.solar_cost_per_kw,
            storage_power_cost_per_kw: p.storage_power_cost_per_kw,
            storage_energy_cost_per_kwh: p.storage_energy_cost_per_kwh,
            wind_cost_per_kwh: p.wind_cost_per_kwh,
            solar_cost_per_kwh: p.solar_cost_per_kwh,
            purchase_price_per_kwh: p.purchase_price_per_kwh,
            soc_min: self.storage.soc_min,
            soc_max: self.storage.soc_max,
            storage_power_ratio: sz.storage_power_ratio,
            load_growth: sz.load_growth,
            payback_years: sz.payback_years,
        }
    }
}
