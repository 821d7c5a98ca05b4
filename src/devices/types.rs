//! Common types and traits for microgrid device components.

/// Contextual information passed to devices during power calculations.
/// Includes the current timestep and optional setpoints for controllable devices.
/// # Fields
/// * `timestep` - Current hour-of-day index
/// * `setpoint_kw` - Optional power setpoint for controllable devices (kW)
pub struct DeviceContext {
    pub timestep: usize,
    pub setpoint_kw: Option<f64>,
}

impl DeviceContext {
    /// Creates a new DeviceContext with the given timestep and no setpoint.
    pub fn new(timestep: usize) -> Self {
        Self {
            timestep,
            setpoint_kw: None,
        }
    }

    /// Creates a new DeviceContext with the given timestep and setpoint.
    pub fn with_setpoint(timestep: usize, setpoint_kw: f64) -> Self {
        Self {
            timestep,
            setpoint_kw: Some(setpoint_kw),
        }
    }
}

/// Trait defining a device that produces, consumes, or stores electricity.
///
/// Profiles report the non-negative magnitude of their sample for the
/// requested hour. Storage reports the power it moved, positive when
/// charging and negative when discharging.
pub trait Device {
    /// Returns the power value at the specified time step.
    ///
    /// # Arguments
    ///
    /// * `context` - Timestep and optional setpoint for controllable devices
    ///
    /// # Returns
    ///
    /// Power in kilowatts (kW) at the specified time step
    fn power_kw(&mut self, context: &DeviceContext) -> f64;

    /// Returns a human-readable type name for the device.
    fn device_type(&self) -> &'static str;
}
