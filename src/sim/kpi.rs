//! Post-hoc cost metrics for a dispatch run.

use std::fmt;

use crate::devices::{HourlyProfile, StorageDevice};
use crate::error::SimError;

use super::types::DispatchOutcome;

/// Unit prices used to cost a dispatch run.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchPrices {
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
    /// Storage service life used to spread capital cost over days.
    pub storage_lifetime_years: f64,
}

impl Default for DispatchPrices {
    fn default() -> Self {
        Self {
            wind_cost_per_kwh: 0.5,
            solar_cost_per_kwh: 0.4,
            purchase_price_per_kwh: 1.0,
            storage_energy_cost_per_kwh: 1800.0,
            storage_power_cost_per_kw: 800.0,
            storage_lifetime_years: 10.0,
        }
    }
}

impl DispatchPrices {
    /// Rejects non-finite or negative prices and a non-positive lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] naming the first bad price.
    pub fn validate(&self) -> Result<(), SimError> {
        for (name, v) in [
            ("wind_cost_per_kwh", self.wind_cost_per_kwh),
            ("solar_cost_per_kwh", self.solar_cost_per_kwh),
            ("purchase_price_per_kwh", self.purchase_price_per_kwh),
            ("storage_energy_cost_per_kwh", self.storage_energy_cost_per_kwh),
            ("storage_power_cost_per_kw", self.storage_power_cost_per_kw),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(SimError::InvalidConfig(format!(
                    "{name} must be finite and >= 0, got {v}"
                )));
            }
        }
        let years = self.storage_lifetime_years;
        if !years.is_finite() || years <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "storage_lifetime_years must be finite and > 0, got {years}"
            )));
        }
        Ok(())
    }
}

/// Cost and energy metrics derived from a complete dispatch run.
#[derive(Debug, Clone)]
pub struct CostReport {
    /// Raw purchased energy (kWh).
    pub total_purchased_kwh: f64,
    /// Raw curtailed renewable energy (kWh).
    pub total_abandoned_kwh: f64,
    /// Purchased energy after storage (kWh).
    pub residual_purchased_kwh: f64,
    /// Curtailed energy after storage (kWh).
    pub residual_abandoned_kwh: f64,
    /// Wind generation cost.
    pub wind_generation_cost: f64,
    /// Solar generation cost.
    pub solar_generation_cost: f64,
    /// Storage capital cost.
    pub storage_capital_cost: f64,
    /// Purchases plus one day's share of storage capital cost.
    pub total_supply_cost: f64,
    /// `total_supply_cost` per kWh of load, zero when there is no load.
    pub average_cost_per_kwh: f64,
    /// Storage energy capacity (kWh).
    pub storage_capacity_kwh: f64,
    /// Storage power rating (kW).
    pub storage_power_kw: f64,
}

impl CostReport {
    /// Computes all cost metrics for a run.
    ///
    /// # Arguments
    ///
    /// * `outcome` - Completed dispatch run
    /// * `load` - Load profile the run was driven by
    /// * `wind` - Wind generation profile
    /// * `solar` - Solar generation profile
    /// * `device` - Storage device that was dispatched
    /// * `prices` - Unit prices
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] if `prices` fail validation.
    pub fn from_outcome(
        outcome: &DispatchOutcome,
        load: &HourlyProfile,
        wind: &HourlyProfile,
        solar: &HourlyProfile,
        device: &StorageDevice,
        prices: &DispatchPrices,
    ) -> Result<Self, SimError> {
        prices.validate()?;

        let storage_capital_cost = device.capacity_kwh * prices.storage_energy_cost_per_kwh
            + device.power_kw * prices.storage_power_cost_per_kw;

        let daily_storage_cost = storage_capital_cost / (prices.storage_lifetime_years * 365.0);
        let total_supply_cost =
            outcome.total_purchased_kwh * prices.purchase_price_per_kwh + daily_storage_cost;

        let total_load = load.total_kwh();
        let average_cost_per_kwh = if total_load > 0.0 {
            total_supply_cost / total_load
        } else {
            0.0
        };

        Ok(Self {
            total_purchased_kwh: outcome.total_purchased_kwh,
            total_abandoned_kwh: outcome.total_abandoned_kwh,
            residual_purchased_kwh: outcome.residual_purchased_kwh,
            residual_abandoned_kwh: outcome.residual_abandoned_kwh,
            wind_generation_cost: wind.total_kwh() * prices.wind_cost_per_kwh,
            solar_generation_cost: solar.total_kwh() * prices.solar_cost_per_kwh,
            storage_capital_cost,
            total_supply_cost,
            average_cost_per_kwh,
            storage_capacity_kwh: device.capacity_kwh,
            storage_power_kw: device.power_kw,
        })
    }
}

impl fmt::Display for CostReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Dispatch Cost Report ---")?;
        writeln!(f, "Total purchased:        {:.2} kWh", self.total_purchased_kwh)?;
        writeln!(f, "Total abandoned:        {:.2} kWh", self.total_abandoned_kwh)?;
        writeln!(
            f,
            "After storage:          {:.2} kWh purchased, {:.2} kWh abandoned",
            self.residual_purchased_kwh, self.residual_abandoned_kwh
        )?;
        writeln!(
            f,
            "Generation cost:        {:.2} (wind {:.2}, solar {:.2})",
            self.wind_generation_cost + self.solar_generation_cost,
            self.wind_generation_cost,
            self.solar_generation_cost
        )?;
        writeln!(f, "Total supply cost:      {:.2}", self.total_supply_cost)?;
        writeln!(f, "Average supply cost:    {:.2} /kWh", self.average_cost_per_kwh)?;
        writeln!(f, "Storage capacity:       {:.2} kWh", self.storage_capacity_kwh)?;
        write!(f, "Storage power:          {:.2} kW", self.storage_power_kw)
    }
}
