//! Per-step renewable balance arithmetic.

/// Net renewable balance for one step.
///
/// Positive values are surplus (generation exceeds load), negative values are
/// deficit.
///
/// # Arguments
///
/// * `generation_kw` - Total renewable generation (wind + solar, positive)
/// * `load_kw` - Demand (positive)
pub fn net_kw(generation_kw: f64, load_kw: f64) -> f64 {
    generation_kw - load_kw
}

/// Energy that must be bought from the grid for a step, ignoring storage.
pub fn deficit_kw(net_kw: f64) -> f64 {
    (-net_kw).max(0.0)
}

/// Renewable energy left unused for a step, ignoring storage.
pub fn surplus_kw(net_kw: f64) -> f64 {
    net_kw.max(0.0)
}
