//! Multi-park sizing and cost roll-up.

use std::fmt;

use tracing::{debug, warn};

use crate::error::SimError;

use super::capacity::{
    RequiredCapacity, StorageSizing, purchase_and_abandonment, required_capacity, size_storage,
};
use super::park::ParkSeries;

/// Unit costs and sizing rules for the park analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct SizingParams {
    /// Installed wind cost per kW.
    pub wind_cost_per_kw: f64,
    /// Installed solar cost per kW.
    pub solar_cost_per_kw: f64,
    /// Storage power cost per kW.
    pub storage_power_cost_per_kw: f64,
    /// Storage energy cost per kWh.
    pub storage_energy_cost_per_kwh: f64,
    /// Wind generation cost per kWh.
    pub wind_cost_per_kwh: f64,
    /// Solar generation cost per kWh.
    pub solar_cost_per_kwh: f64,
    /// Grid purchase price per kWh.
    pub purchase_price_per_kwh: f64,
    /// Storage SOC lower bound.
    pub soc_min: f64,
    /// Storage SOC upper bound.
    pub soc_max: f64,
    /// Storage power as a fraction of peak load.
    pub storage_power_ratio: f64,
    /// Multiplier applied to every park's load before sizing.
    pub load_growth: f64,
    /// Years over which total cost is annualized.
    pub payback_years: f64,
}

impl Default for SizingParams {
    fn default() -> Self {
        Self {
            wind_cost_per_kw: 3000.0,
            solar_cost_per_kw: 2500.0,
            storage_power_cost_per_kw: 800.0,
            storage_energy_cost_per_kwh: 1800.0,
            wind_cost_per_kwh: 0.5,
            solar_cost_per_kwh: 0.4,
            purchase_price_per_kwh: 1.0,
            soc_min: 0.1,
            soc_max: 0.9,
            storage_power_ratio: 0.8,
            load_growth: 1.5,
            payback_years: 5.0,
        }
    }
}

impl SizingParams {
    /// Checks the parameters the formulas divide by or bound with.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] describing the first violation.
    pub fn validate(&self) -> Result<(), SimError> {
        for (name, v) in [
            ("wind_cost_per_kw", self.wind_cost_per_kw),
            ("solar_cost_per_kw", self.solar_cost_per_kw),
            ("payback_years", self.payback_years),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(SimError::InvalidConfig(format!(
                    "{name} must be finite and > 0, got {v}"
                )));
            }
        }
        for (name, v) in [
            ("storage_power_cost_per_kw", self.storage_power_cost_per_kw),
            ("storage_energy_cost_per_kwh", self.storage_energy_cost_per_kwh),
            ("wind_cost_per_kwh", self.wind_cost_per_kwh),
            ("solar_cost_per_kwh", self.solar_cost_per_kwh),
            ("purchase_price_per_kwh", self.purchase_price_per_kwh),
            ("storage_power_ratio", self.storage_power_ratio),
            ("load_growth", self.load_growth),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(SimError::InvalidConfig(format!(
                    "{name} must be finite and >= 0, got {v}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.soc_min)
            || !(0.0..=1.0).contains(&self.soc_max)
            || self.soc_min >= self.soc_max
        {
            return Err(SimError::InvalidConfig(
                "require 0 <= soc_min < soc_max <= 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Sizing and cost results for one park.
#[derive(Debug, Clone)]
pub struct ParkSizing {
    pub name: String,
    /// Peak load after growth (kW).
    pub max_load_kw: f64,
    pub wind_capacity: RequiredCapacity,
    pub solar_capacity: RequiredCapacity,
    pub storage: StorageSizing,
    /// Whole-horizon purchase after growth (kWh).
    pub purchase_kwh: f64,
    /// Whole-horizon abandonment after growth (kWh).
    pub abandonment_kwh: f64,
    pub wind_generation_cost: f64,
    pub solar_generation_cost: f64,
    pub purchase_cost: f64,
}

/// Aggregate result of sizing every park.
#[derive(Debug, Clone)]
pub struct SizingReport {
    pub parks: Vec<ParkSizing>,
    /// Self-generation plus purchase cost over all parks.
    pub total_supply_cost: f64,
    pub total_storage_cost: f64,
    /// Supply plus storage cost.
    pub total_cost: f64,
    /// `total_cost / payback_years`.
    pub annualized_cost: f64,
    /// Wind capacity over all parks.
    pub joint_wind_capacity: RequiredCapacity,
    /// Solar capacity over all parks.
    pub joint_solar_capacity: RequiredCapacity,
}

/// Sizes one park.
pub fn size_park(park: &ParkSeries, params: &SizingParams) -> ParkSizing {
    let load = park.load().scaled(params.load_growth);
    let max_load_kw = load.peak_kw();
    let wind_kwh = park.wind().total_kwh();
    let solar_kwh = park.solar().total_kwh();

    let wind_capacity = required_capacity(max_load_kw, wind_kwh, params.wind_cost_per_kw);
    let solar_capacity = required_capacity(max_load_kw, solar_kwh, params.solar_cost_per_kw);
    if wind_capacity.is_unbounded() {
        warn!(park = park.name(), "no wind generation; wind capacity unbounded");
    }
    if solar_capacity.is_unbounded() {
        warn!(park = park.name(), "no solar generation; solar capacity unbounded");
    }

    let storage = size_storage(
        max_load_kw,
        params.storage_power_ratio,
        params.soc_min,
        params.soc_max,
        params.storage_power_cost_per_kw,
        params.storage_energy_cost_per_kwh,
    );
    let (purchase_kwh, abandonment_kwh) =
        purchase_and_abandonment(load.total_kwh(), wind_kwh + solar_kwh);

    debug!(
        park = park.name(),
        max_load_kw,
        purchase_kwh,
        abandonment_kwh,
        storage_kw = storage.power_kw,
        "park sized"
    );

    ParkSizing {
        name: park.name().to_string(),
        max_load_kw,
        wind_capacity,
        solar_capacity,
        storage,
        purchase_kwh,
        abandonment_kwh,
        wind_generation_cost: wind_kwh * params.wind_cost_per_kwh,
        solar_generation_cost: solar_kwh * params.solar_cost_per_kwh,
        purchase_cost: purchase_kwh * params.purchase_price_per_kwh,
    }
}

/// Sizes every park and rolls up system cost.
///
/// # Errors
///
/// * [`SimError::InvalidInput`] if `parks` is empty.
/// * [`SimError::InvalidConfig`] if `params` fail validation.
pub fn size_parks(parks: &[ParkSeries], params: &SizingParams) -> Result<SizingReport, SimError> {
    if parks.is_empty() {
        return Err(SimError::InvalidInput("no parks to size".to_string()));
    }
    params.validate()?;

    let parks: Vec<ParkSizing> = parks.iter().map(|p| size_park(p, params)).collect();

    let total_supply_cost: f64 = parks
        .iter()
        .map(|p| p.wind_generation_cost + p.solar_generation_cost + p.purchase_cost)
        .sum();
    let total_storage_cost: f64 = parks.iter().map(|p| p.storage.cost).sum();
    let total_cost = total_supply_cost + total_storage_cost;

    Ok(SizingReport {
        joint_wind_capacity: parks.iter().map(|p| p.wind_capacity).sum(),
        joint_solar_capacity: parks.iter().map(|p| p.solar_capacity).sum(),
        total_supply_cost,
        total_storage_cost,
        total_cost,
        annualized_cost: total_cost / params.payback_years,
        parks,
    })
}

impl fmt::Display for SizingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Park Sizing Report ---")?;
        for p in &self.parks {
            writeln!(f, "[{}] peak load {:.2} kW", p.name, p.max_load_kw)?;
            writeln!(f, "  wind capacity:   {}", p.wind_capacity)?;
            writeln!(f, "  solar capacity:  {}", p.solar_capacity)?;
            writeln!(
                f,
                "  storage:         {:.2} kW / {:.2} kWh, cost {:.2}",
                p.storage.power_kw, p.storage.energy_kwh, p.storage.cost
            )?;
            writeln!(
                f,
                "  purchase:        {:.2} kWh (cost {:.2}), abandonment {:.2} kWh",
                p.purchase_kwh, p.purchase_cost, p.abandonment_kwh
            )?;
            writeln!(
                f,
                "  self-generation: wind {:.2}, solar {:.2}",
                p.wind_generation_cost, p.solar_generation_cost
            )?;
        }
        writeln!(f, "Total supply cost:     {:.2}", self.total_supply_cost)?;
        writeln!(f, "Storage cost:          {:.2}", self.total_storage_cost)?;
        writeln!(f, "Total cost:            {:.2}", self.total_cost)?;
        writeln!(f, "Annualized cost:       {:.2}", self.annualized_cost)?;
        writeln!(f, "Joint wind capacity:   {}", self.joint_wind_capacity)?;
        write!(f, "Joint solar capacity:  {}", self.joint_solar_capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn park_a() -> ParkSeries {
        ParkSeries::new(
            "A",
            vec![100.0, 200.0],
            vec![50.0, 150.0],
            vec![0.0, 100.0],
        )
        .expect("valid park")
    }

    #[test]
    fn park_sizing_applies_growth() {
        let s = size_park(&park_a(), &SizingParams::default());
        assert!((s.max_load_kw - 300.0).abs() < 1e-9);
        // grown load total 450, generation 300
        assert!((s.purchase_kwh - 150.0).abs() < 1e-9);
        assert_eq!(s.abandonment_kwh, 0.0);
        assert_eq!(
            s.wind_capacity,
            RequiredCapacity::Finite(300.0 / (200.0 * 3000.0))
        );
        assert!((s.storage.power_kw - 240.0).abs() < 1e-9);
        assert!((s.wind_generation_cost - 100.0).abs() < 1e-9);
        assert!((s.solar_generation_cost - 40.0).abs() < 1e-9);
    }

    #[test]
    fn totals_and_annualized_cost() {
        let params = SizingParams {
            load_growth: 1.0,
            ..SizingParams::default()
        };
        let report = size_parks(&[park_a()], &params).expect("valid sizing");
        let p = &report.parks[0];
        let supply = p.wind_generation_cost + p.solar_generation_cost + p.purchase_cost;
        assert!((report.total_supply_cost - supply).abs() < 1e-9);
        assert!((report.total_cost - (supply + p.storage.cost)).abs() < 1e-9);
        assert!((report.annualized_cost - report.total_cost / 5.0).abs() < 1e-9);
    }

    #[test]
    fn park_without_wind_is_unbounded_jointly() {
        let windless =
            ParkSeries::new("B", vec![10.0, 10.0], vec![0.0, 0.0], vec![5.0, 5.0]).expect("park");
        let report = size_parks(&[park_a(), windless], &SizingParams::default())
            .expect("valid sizing");
        assert!(report.parks[1].wind_capacity.is_unbounded());
        assert!(report.joint_wind_capacity.is_unbounded());
        assert!(!report.joint_solar_capacity.is_unbounded());
        assert!(report.total_cost.is_finite());
    }

    #[test]
    fn empty_park_list_rejected() {
        let err = size_parks(&[], &SizingParams::default());
        assert!(matches!(err, Err(SimError::InvalidInput(_))));
    }

    #[test]
    fn non_finite_params_rejected() {
        let nan_payback = SizingParams {
            payback_years: f64::NAN,
            ..SizingParams::default()
        };
        assert!(matches!(
            size_parks(&[park_a()], &nan_payback),
            Err(SimError::InvalidConfig(_))
        ));

        let nan_energy_cost = SizingParams {
            storage_energy_cost_per_kwh: f64::NAN,
            ..SizingParams::default()
        };
        assert!(nan_energy_cost.validate().is_err());

        let infinite_price = SizingParams {
            purchase_price_per_kwh: f64::INFINITY,
            ..SizingParams::default()
        };
        assert!(infinite_price.validate().is_err());
    }

    #[test]
    fn invalid_params_rejected() {
        let params = SizingParams {
            soc_min: 0.9,
            soc_max: 0.1,
            ..SizingParams::default()
        };
        assert!(matches!(
            size_parks(&[park_a()], &params),
            Err(SimError::InvalidConfig(_))
        ));
    }
}
