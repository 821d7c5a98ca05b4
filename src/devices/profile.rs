use crate::devices::types::{Device, DeviceContext};

/// A fixed hourly series replayed step by step.
///
/// Used for measured load and for wind or solar generation. Samples are
/// non-negative kW values averaged over one hour, so each sample is also the
/// step's energy in kWh. Steps past the end of the series read as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyProfile {
    samples: Vec<f64>,
}

impl HourlyProfile {
    pub fn new(samples: Vec<f64>) -> Self {
        Self { samples }
    }

    /// Element-wise sum of two profiles, padded with zeros to the longer one.
    pub fn combined(a: &HourlyProfile, b: &HourlyProfile) -> Self {
        let len = a.len().max(b.len());
        let samples = (0..len).map(|t| a.at(t) + b.at(t)).collect();
        Self { samples }
    }

    /// Returns a copy with every sample multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            samples: self.samples.iter().map(|v| v * factor).collect(),
        }
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample at `t`, or zero past the end.
    pub fn at(&self, t: usize) -> f64 {
        self.samples.get(t).copied().unwrap_or(0.0)
    }

    /// Energy over the whole horizon (kWh).
    pub fn total_kwh(&self) -> f64 {
        self.samples.iter().sum()
    }

    /// Highest sample (kW), zero for an empty profile.
    pub fn peak_kw(&self) -> f64 {
        self.samples.iter().copied().fold(0.0, f64::max)
    }
}

impl From<Vec<f64>> for HourlyProfile {
    fn from(samples: Vec<f64>) -> Self {
        Self::new(samples)
    }
}

impl Device for HourlyProfile {
    fn power_kw(&mut self, context: &DeviceContext) -> f64 {
        self.at(context.timestep)
    }

    fn device_type(&self) -> &'static str {
        "HourlyProfile"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_samples_and_zero_past_end() {
        let mut p = HourlyProfile::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(p.power_kw(&DeviceContext::new(1)), 2.0);
        assert_eq!(p.power_kw(&DeviceContext::new(7)), 0.0);
    }

    #[test]
    fn combined_pads_shorter_profile() {
        let a = HourlyProfile::new(vec![1.0, 2.0, 3.0]);
        let b = HourlyProfile::new(vec![10.0]);
        assert_eq!(HourlyProfile::combined(&a, &b).samples(), &[11.0, 2.0, 3.0]);
    }

    #[test]
    fn totals_and_peak() {
        let p = HourlyProfile::new(vec![818.0, 1000.0, 780.0]);
        assert_eq!(p.total_kwh(), 2598.0);
        assert_eq!(p.peak_kw(), 1000.0);
        assert_eq!(p.scaled(1.5).peak_kw(), 1500.0);
        assert_eq!(HourlyProfile::new(vec![]).peak_kw(), 0.0);
    }
}
