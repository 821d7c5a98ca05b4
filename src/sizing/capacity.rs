//! Per-park capacity formulas.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// Installed capacity a park needs from one source.
///
/// A park with no energy from a source cannot meet its load with that source
/// at any finite size, which is reported as `Unbounded` rather than as a very
/// large number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RequiredCapacity {
    Finite(f64),
    Unbounded,
}

impl RequiredCapacity {
    pub fn is_unbounded(&self) -> bool {
        matches!(self, Self::Unbounded)
    }

    /// The finite value, if any.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Finite(v) => Some(*v),
            Self::Unbounded => None,
        }
    }
}

impl Add for RequiredCapacity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Finite(a), Self::Finite(b)) => Self::Finite(a + b),
            _ => Self::Unbounded,
        }
    }
}

impl Sum for RequiredCapacity {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::Finite(0.0), Add::add)
    }
}

impl fmt::Display for RequiredCapacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(v) => write!(f, "{v:.6} kW"),
            Self::Unbounded => write!(f, "unbounded (no resource)"),
        }
    }
}

/// `max_load / (generation_energy * cost_per_kw)`, or `Unbounded` without generation.
///
/// # Arguments
///
/// * `max_load_kw` - Peak load of the park
/// * `generation_kwh` - Source's total generation over the horizon
/// * `cost_per_kw` - Installed cost per kW of the source (> 0)
pub fn required_capacity(max_load_kw: f64, generation_kwh: f64, cost_per_kw: f64) -> RequiredCapacity {
    if generation_kwh <= 0.0 {
        return RequiredCapacity::Unbounded;
    }
    RequiredCapacity::Finite(max_load_kw / (generation_kwh * cost_per_kw))
}

/// Storage rating derived from a park's peak load.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageSizing {
    /// Power rating (kW).
    pub power_kw: f64,
    /// Energy capacity (kWh).
    pub energy_kwh: f64,
    /// Capital cost of power and energy.
    pub cost: f64,
}

/// Sizes storage as `power_ratio` of peak load with energy at the mean SOC band.
///
/// # Arguments
///
/// * `max_load_kw` - Peak load of the park
/// * `power_ratio` - Storage power as a fraction of peak load
/// * `soc_min`, `soc_max` - SOC band; energy is `power * (soc_max + soc_min) / 2`
/// * `power_cost_per_kw`, `energy_cost_per_kwh` - Unit capital costs
pub fn size_storage(
    max_load_kw: f64,
    power_ratio: f64,
    soc_min: f64,
    soc_max: f64,
    power_cost_per_kw: f64,
    energy_cost_per_kwh: f64,
) -> StorageSizing {
    let power_kw = max_load_kw * power_ratio;
    let energy_kwh = power_kw * (soc_max + soc_min) / 2.0;
    StorageSizing {
        power_kw,
        energy_kwh,
        cost: power_kw * power_cost_per_kw + energy_kwh * energy_cost_per_kwh,
    }
}

/// Whole-horizon `(purchase, abandonment)` from total load and generation.
pub fn purchase_and_abandonment(total_load_kwh: f64, total_generation_kwh: f64) -> (f64, f64) {
    (
        (total_load_kwh - total_generation_kwh).max(0.0),
        (total_generation_kwh - total_load_kwh).max(0.0),
    )
}
