//! End-to-end analyses built from a validated scenario.

use std::path::Path;

use tracing::info;

use crate::config::ScenarioConfig;
use crate::devices::HourlyProfile;
use crate::error::SimError;
use crate::io::tables::HourTable;
use crate::sim::dispatch::simulate;
use crate::sim::kpi::CostReport;
use crate::sim::types::DispatchOutcome;
use crate::sizing::{ParkSeries, SizingReport, discover_parks, size_parks};

/// Inputs and results of one dispatch analysis.
#[derive(Debug, Clone)]
pub struct DispatchRun {
    pub load: HourlyProfile,
    pub generation: HourlyProfile,
    pub outcome: DispatchOutcome,
    pub report: CostReport,
}

/// Runs the storage dispatch over the scenario's profile and costs it.
///
/// # Errors
///
/// Propagates [`SimError`] from storage construction or the simulator.
pub fn run_dispatch(config: &ScenarioConfig) -> Result<DispatchRun, SimError> {
    let device = config.storage_device()?;
    let load = config.load_profile();
    let wind = config.wind_profile();
    let solar = config.solar_profile();
    let generation = HourlyProfile::combined(&wind, &solar);

    let outcome = simulate(
        load.samples(),
        generation.samples(),
        &device,
        config.storage.initial_soc,
    )?;
    let report = CostReport::from_outcome(
        &outcome,
        &load,
        &wind,
        &solar,
        &device,
        &config.dispatch_prices(),
    )?;

    info!(
        steps = outcome.len(),
        purchased_kwh = report.total_purchased_kwh,
        abandoned_kwh = report.total_abandoned_kwh,
        "dispatch analysis finished"
    );

    Ok(DispatchRun {
        load,
        generation,
        outcome,
        report,
    })
}

/// Resolves the scenario's parks against the two tables.
///
/// Uses `[[sizing.parks]]` when present, otherwise every `<Park>_Load` column.
///
/// # Errors
///
/// * [`SimError::Schema`] naming the first missing column.
/// * [`SimError::InvalidInput`] if no parks are found or a series is invalid.
pub fn resolve_parks(
    config: &ScenarioConfig,
    load_table: &HourTable,
    generation_table: &HourTable,
) -> Result<Vec<ParkSeries>, SimError> {
    let columns = if config.sizing.parks.is_empty() {
        discover_parks(load_table)
    } else {
        config.sizing.parks.clone()
    };
    if columns.is_empty() {
        return Err(SimError::InvalidInput(
            "no parks configured and no <Park>_Load columns in the load table".to_string(),
        ));
    }
    columns
        .iter()
        .map(|c| ParkSeries::resolve(c, load_table, generation_table))
        .collect()
}

/// Reads both tables and runs the park sizing analysis.
///
/// # Errors
///
/// Propagates table read, schema and sizing errors.
pub fn run_sizing(
    config: &ScenarioConfig,
    load_path: &Path,
    generation_path: &Path,
) -> Result<SizingReport, SimError> {
    let load_table = HourTable::from_path(load_path)?;
    let generation_table = HourTable::from_path(generation_path)?;
    info!(
        load_columns = ?load_table.columns(),
        generation_columns = ?generation_table.columns(),
        "tables loaded"
    );

    let parks = resolve_parks(config, &load_table, &generation_table)?;
    let report = size_parks(&parks, &config.sizing_params())?;

    info!(
        parks = report.parks.len(),
        total_cost = report.total_cost,
        "sizing analysis finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sizing::ParkColumns;

    fn tables() -> (HourTable, HourTable) {
        let load = "hour,A_Load,B_Load\n00:00:00,100,50\n01:00:00,120,60\n";
        let generation =
            "hour,A_Wind,A_Solar,B_Wind,B_Solar\n00:00:00,30,0,10,0\n01:00:00,40,5,20,3\n";
        (
            HourTable::from_reader(load.as_bytes()).expect("load table"),
            HourTable::from_reader(generation.as_bytes()).expect("generation table"),
        )
    }

    #[test]
    fn baseline_dispatch_runs_24_steps() {
        let run = run_dispatch(&ScenarioConfig::baseline()).expect("baseline runs");
        assert_eq!(run.outcome.len(), 24);
        assert_eq!(run.generation.len(), 24);
    }

    #[test]
    fn nan_storage_lifetime_fails_dispatch() {
        let cfg = ScenarioConfig::from_toml_str("[prices]\nstorage_lifetime_years = nan\n")
            .expect("nan is valid TOML");
        let err = run_dispatch(&cfg);
        assert!(matches!(err, Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn parks_discovered_when_not_configured() {
        let (load, generation) = tables();
        let parks = resolve_parks(&ScenarioConfig::baseline(), &load, &generation)
            .expect("parks resolve");
        let names: Vec<&str> = parks.iter().map(ParkSeries::name).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn explicit_parks_take_priority() {
        let (load, generation) = tables();
        let mut cfg = ScenarioConfig::baseline();
        cfg.sizing.parks = vec![ParkColumns::conventional("B")];
        let parks = resolve_parks(&cfg, &load, &generation).expect("parks resolve");
        assert_eq!(parks.len(), 1);
        assert_eq!(parks[0].name(), "B");
    }

    #[test]
    fn configured_park_with_missing_column_fails() {
        let (load, generation) = tables();
        let mut cfg = ScenarioConfig::baseline();
        cfg.sizing.parks = vec![ParkColumns::conventional("C")];
        let err = resolve_parks(&cfg, &load, &generation);
        assert!(matches!(err, Err(SimError::Schema { column }) if column == "C_Load"));
    }

    #[test]
    fn table_without_load_columns_fails() {
        let (_, generation) = tables();
        let err = resolve_parks(&ScenarioConfig::baseline(), &generation, &generation);
        assert!(matches!(err, Err(SimError::InvalidInput(_))));
    }
}
