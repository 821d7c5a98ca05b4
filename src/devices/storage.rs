use tracing::trace;

use crate::devices::types::{Device, DeviceContext};
use crate::error::SimError;

/// A battery energy storage device that absorbs surplus and covers deficit.
///
/// `StorageDevice` tracks its stored energy in kWh and keeps it inside
/// `[soc_min * capacity, soc_max * capacity]` by clamping after every action.
/// Energy that would push the state past a bound is lost, not rejected: the
/// reported power is the command after the power limit only.
///
/// # Power Flow Convention
/// - Positive power: Charging (absorbing renewable surplus)
/// - Negative power: Discharging (covering a load deficit)
#[derive(Debug, Clone)]
pub struct StorageDevice {
    /// Energy capacity in kilowatt-hours.
    pub capacity_kwh: f64,

    /// Maximum charge or discharge power per step in kilowatts.
    pub power_kw: f64,

    /// Lower state-of-charge bound as a fraction of capacity.
    pub soc_min: f64,

    /// Upper state-of-charge bound as a fraction of capacity.
    pub soc_max: f64,

    /// Per-direction efficiency multiplier (0..=1.0).
    pub efficiency: f64,

    /// Stored energy in kWh.
    soc_kwh: f64,
}

impl StorageDevice {
    /// Creates a new storage device with the given parameters and an empty store.
    ///
    /// Call [`StorageDevice::reset`] to set the initial state of charge before
    /// dispatching.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] if capacity is not positive, power
    /// is negative, the SOC bounds are not `0 <= soc_min < soc_max <= 1`, or
    /// efficiency is outside `(0, 1]`.
    pub fn new(
        capacity_kwh: f64,
        power_kw: f64,
        soc_min: f64,
        soc_max: f64,
        efficiency: f64,
    ) -> Result<Self, SimError> {
        let finite = [capacity_kwh, power_kw, soc_min, soc_max, efficiency]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(SimError::InvalidConfig(
                "storage parameters must be finite".to_string(),
            ));
        }
        if capacity_kwh <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "capacity_kwh must be > 0, got {capacity_kwh}"
            )));
        }
        if power_kw < 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "power_kw must be >= 0, got {power_kw}"
            )));
        }
        if !(0.0..=1.0).contains(&soc_min) || !(0.0..=1.0).contains(&soc_max) {
            return Err(SimError::InvalidConfig(
                "soc_min and soc_max must be in [0.0, 1.0]".to_string(),
            ));
        }
        if soc_min >= soc_max {
            return Err(SimError::InvalidConfig(format!(
                "soc_min ({soc_min}) must be < soc_max ({soc_max})"
            )));
        }
        if efficiency <= 0.0 || efficiency > 1.0 {
            return Err(SimError::InvalidConfig(format!(
                "efficiency must be in (0.0, 1.0], got {efficiency}"
            )));
        }

        Ok(Self {
            capacity_kwh,
            power_kw,
            soc_min,
            soc_max,
            efficiency,
            soc_kwh: 0.0,
        })
    }

    /// Sets the stored energy to `fraction * capacity`.
    ///
    /// The fraction is taken as given; bounds are only applied by the clamp
    /// that follows each charge or discharge.
    pub fn reset(&mut self, fraction: f64) {
        self.soc_kwh = fraction * self.capacity_kwh;
    }

    /// Current stored energy in kWh.
    pub fn soc_kwh(&self) -> f64 {
        self.soc_kwh
    }

    /// Lowest energy the device may hold (kWh).
    pub fn floor_kwh(&self) -> f64 {
        self.capacity_kwh * self.soc_min
    }

    /// Highest energy the device may hold (kWh).
    pub fn ceiling_kwh(&self) -> f64 {
        self.capacity_kwh * self.soc_max
    }
}

impl Device for StorageDevice {
    /// Applies a setpoint for one step and returns the power moved.
    ///
    /// A positive setpoint charges with `min(setpoint, power_kw)`, a zero or
    /// negative setpoint discharges with `min(-setpoint, power_kw)`.
    fn power_kw(&mut self, context: &DeviceContext) -> f64 {
        let setpoint_kw = context.setpoint_kw.unwrap_or(0.0);

        if setpoint_kw > 0.0 {
            let charge_kw = setpoint_kw.min(self.power_kw);
            self.soc_kwh += charge_kw * self.efficiency;
            self.soc_kwh = self.soc_kwh.min(self.ceiling_kwh());
            trace!(t = context.timestep, charge_kw, soc_kwh = self.soc_kwh, "charge");
            charge_kw
        } else {
            let discharge_kw = (-setpoint_kw).min(self.power_kw);
            self.soc_kwh -= discharge_kw / self.efficiency;
            self.soc_kwh = self.soc_kwh.max(self.floor_kwh());
            trace!(t = context.timestep, discharge_kw, soc_kwh = self.soc_kwh, "discharge");
            -discharge_kw
        }
    }

    fn device_type(&self) -> &'static str {
        "Storage"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device() -> StorageDevice {
        StorageDevice::new(100.0, 50.0, 0.1, 0.9, 0.95).expect("valid storage")
    }

    #[test]
    fn test_new_storage() {
        let d = device();
        assert_eq!(d.capacity_kwh, 100.0);
        assert_eq!(d.power_kw, 50.0);
        assert_eq!(d.floor_kwh(), 10.0);
        assert_eq!(d.ceiling_kwh(), 90.0);
        assert_eq!(d.soc_kwh(), 0.0);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(StorageDevice::new(0.0, 50.0, 0.1, 0.9, 0.95).is_err());
        assert!(StorageDevice::new(100.0, -1.0, 0.1, 0.9, 0.95).is_err());
        assert!(StorageDevice::new(100.0, 50.0, 0.9, 0.9, 0.95).is_err());
        assert!(StorageDevice::new(100.0, 50.0, 0.5, 0.2, 0.95).is_err());
        assert!(StorageDevice::new(100.0, 50.0, 0.1, 0.9, 0.0).is_err());
        assert!(StorageDevice::new(100.0, 50.0, 0.1, 0.9, 1.2).is_err());
        assert!(StorageDevice::new(100.0, 50.0, -0.1, 0.9, 0.95).is_err());
        assert!(StorageDevice::new(f64::NAN, 50.0, 0.1, 0.9, 0.95).is_err());
    }

    #[test]
    fn test_charge_power_limit_and_ceiling() {
        let mut d = device();
        d.reset(0.5);
        let kw = d.power_kw(&DeviceContext::with_setpoint(0, 200.0));
        assert_eq!(kw, 50.0);
        // 50 + 50 * 0.95 = 97.5, clamped to 90
        assert!((d.soc_kwh() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_discharge_power_limit_and_floor() {
        let mut d = device();
        d.reset(0.5);
        let kw = d.power_kw(&DeviceContext::with_setpoint(0, -200.0));
        assert_eq!(kw, -50.0);
        // 50 - 50 / 0.95 = -2.63, clamped to 10
        assert!((d.soc_kwh() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_efficiency_unclamped() {
        let mut d = device();
        d.reset(0.5);
        d.power_kw(&DeviceContext::with_setpoint(0, 20.0));
        assert!((d.soc_kwh() - (50.0 + 20.0 * 0.95)).abs() < 1e-9);
        d.power_kw(&DeviceContext::with_setpoint(1, -19.0));
        assert!((d.soc_kwh() - (69.0 - 19.0 / 0.95)).abs() < 1e-9);
    }

    #[test]
    fn test_zero_setpoint_leaves_state() {
        let mut d = device();
        d.reset(0.4);
        let kw = d.power_kw(&DeviceContext::new(0));
        assert_eq!(kw, 0.0);
        assert!((d.soc_kwh() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_power_device_never_moves() {
        let mut d = StorageDevice::new(100.0, 0.0, 0.1, 0.9, 0.95).expect("valid storage");
        d.reset(0.5);
        assert_eq!(d.power_kw(&DeviceContext::with_setpoint(0, 30.0)), 0.0);
        assert_eq!(d.soc_kwh(), 50.0);
    }
}
