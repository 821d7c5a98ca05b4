//! Explicit park schema: which series belong to which park.

use serde::Deserialize;

use crate::devices::HourlyProfile;
use crate::error::{SimError, check_series};
use crate::io::tables::HourTable;

/// Column suffix marking a park's load column in conventional tables.
pub const LOAD_SUFFIX: &str = "_Load";

/// Maps a park to the table columns holding its load, wind and solar series.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParkColumns {
    /// Park identifier.
    pub name: String,
    /// Load column in the load table.
    pub load: String,
    /// Wind column in the generation table.
    pub wind: String,
    /// Solar column in the generation table.
    pub solar: String,
}

impl ParkColumns {
    /// Columns following the `<Park>_Load`, `<Park>_Wind`, `<Park>_Solar` convention.
    pub fn conventional(name: &str) -> Self {
        Self {
            name: name.to_string(),
            load: format!("{name}{LOAD_SUFFIX}"),
            wind: format!("{name}_Wind"),
            solar: format!("{name}_Solar"),
        }
    }
}

/// Lists the parks of a load table by its `<Park>_Load` columns, in column order.
pub fn discover_parks(load_table: &HourTable) -> Vec<ParkColumns> {
    load_table
        .columns()
        .iter()
        .filter_map(|c| c.strip_suffix(LOAD_SUFFIX))
        .filter(|name| !name.is_empty())
        .map(ParkColumns::conventional)
        .collect()
}

/// Load and generation series for one park, validated on construction.
#[derive(Debug, Clone)]
pub struct ParkSeries {
    name: String,
    load: HourlyProfile,
    wind: HourlyProfile,
    solar: HourlyProfile,
}

impl ParkSeries {
    /// Builds a park from its three series.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidInput`] if any series is empty, holds a
    /// non-finite or negative sample, or the lengths differ.
    pub fn new(
        name: impl Into<String>,
        load: Vec<f64>,
        wind: Vec<f64>,
        solar: Vec<f64>,
    ) -> Result<Self, SimError> {
        let name = name.into();
        check_series(&format!("{name} load"), &load)?;
        check_series(&format!("{name} wind"), &wind)?;
        check_series(&format!("{name} solar"), &solar)?;
        if load.len() != wind.len() || load.len() != solar.len() {
            return Err(SimError::InvalidInput(format!(
                "park {name}: load/wind/solar lengths differ ({}/{}/{})",
                load.len(),
                wind.len(),
                solar.len()
            )));
        }
        Ok(Self {
            name,
            load: load.into(),
            wind: wind.into(),
            solar: solar.into(),
        })
    }

    /// Pulls a park's series out of the load and generation tables.
    ///
    /// # Errors
    ///
    /// * [`SimError::Schema`] naming the first missing column.
    /// * [`SimError::InvalidInput`] if the tables differ in row count or the
    ///   series fail validation.
    pub fn resolve(
        columns: &ParkColumns,
        load_table: &HourTable,
        generation_table: &HourTable,
    ) -> Result<Self, SimError> {
        if load_table.row_count() != generation_table.row_count() {
            return Err(SimError::InvalidInput(format!(
                "load table has {} rows but generation table has {}",
                load_table.row_count(),
                generation_table.row_count()
            )));
        }
        let load = load_table.column(&columns.load)?.to_vec();
        let wind = generation_table.column(&columns.wind)?.to_vec();
        let solar = generation_table.column(&columns.solar)?.to_vec();
        Self::new(columns.name.clone(), load, wind, solar)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn load(&self) -> &HourlyProfile {
        &self.load
    }

    pub fn wind(&self) -> &HourlyProfile {
        &self.wind
    }

    pub fn solar(&self) -> &HourlyProfile {
        &self.solar
    }

    /// Wind plus solar generation.
    pub fn generation(&self) -> HourlyProfile {
        HourlyProfile::combined(&self.wind, &self.solar)
    }
}
