//! Core dispatch types: per-step records and the run outcome.

use std::fmt;

use super::clock::hour_label;

/// Complete record of one dispatch step.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchRecord {
    /// Hour-of-day index.
    pub timestep: usize,
    /// Demand (kW, positive).
    pub load_kw: f64,
    /// Total renewable generation (kW, positive).
    pub generation_kw: f64,
    /// `generation_kw - load_kw` (positive = surplus).
    pub net_kw: f64,
    /// Storage power (kW; positive=charge, negative=discharge).
    pub charge_discharge_kw: f64,
    /// Stored energy after this step's action (kWh).
    pub soc_after_kwh: f64,
    /// Deficit not covered by storage discharge (kWh).
    pub residual_purchase_kwh: f64,
    /// Surplus not absorbed by storage (kWh).
    pub residual_abandoned_kwh: f64,
}

impl fmt::Display for DispatchRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:>2} ({}) | load={:>8.2} kW  gen={:>8.2} kW  net={:>8.2} kW | \
             storage={:>7.2} kW  soc={:>7.2} kWh | residual(buy={:.2}, curtail={:.2})",
            self.timestep,
            hour_label(self.timestep),
            self.load_kw,
            self.generation_kw,
            self.net_kw,
            self.charge_discharge_kw,
            self.soc_after_kwh,
            self.residual_purchase_kwh,
            self.residual_abandoned_kwh,
        )
    }
}

/// Result of a full dispatch run.
///
/// `total_purchased_kwh` and `total_abandoned_kwh` come from the raw
/// surplus/deficit of the input series and ignore what storage buffered.
/// The `residual_*` totals are the post-storage counterparts.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchOutcome {
    /// Per-step records in chronological order.
    pub records: Vec<DispatchRecord>,
    /// Stored energy after each step (kWh).
    pub soc_history: Vec<f64>,
    /// Signed storage power per step (kW).
    pub dispatch_history: Vec<f64>,
    /// `Σ max(0, load - generation)` (kWh).
    pub total_purchased_kwh: f64,
    /// `Σ max(0, generation - load)` (kWh).
    pub total_abandoned_kwh: f64,
    /// Deficit left after storage discharge (kWh).
    pub residual_purchased_kwh: f64,
    /// Surplus left after storage charge (kWh).
    pub residual_abandoned_kwh: f64,
}

impl DispatchOutcome {
    /// Number of dispatched steps.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
