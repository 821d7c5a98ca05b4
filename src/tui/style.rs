//! Colours and axis scaling for the chart view.

use ratatui::style::Color;

pub const LOAD_COLOR: Color = Color::Red;
pub const GENERATION_COLOR: Color = Color::Green;
pub const SOC_LINE_COLOR: Color = Color::Cyan;
/// Charge/discharge line.
pub const STORAGE_COLOR: Color = Color::Magenta;
pub const PURCHASED_COLOR: Color = Color::Yellow;
pub const ABANDONED_COLOR: Color = Color::Blue;
/// SOC gauge colour when comfortably inside the band.
pub const SOC_HIGH: Color = Color::Green;
/// SOC gauge colour near the band edges.
pub const SOC_MID: Color = Color::Yellow;
/// SOC gauge colour at a band edge.
pub const SOC_LOW: Color = Color::Red;
pub const HEADER_FG: Color = Color::White;
pub const HEADER_BG: Color = Color::DarkGray;
pub const FOOTER_FG: Color = Color::DarkGray;

/// Gauge colour for `soc` (fraction of capacity) within the band `[lo, hi]`.
///
/// Within 5% of capacity of either edge is red, within 15% is yellow.
pub fn soc_color(soc: f64, lo: f64, hi: f64) -> Color {
    let margin = (soc - lo).min(hi - soc);
    if margin <= 0.05 {
        SOC_LOW
    } else if margin <= 0.15 {
        SOC_MID
    } else {
        SOC_HIGH
    }
}

/// Y-axis bounds covering every series with 10% padding.
pub fn auto_bounds_y(series: &[&[(f64, f64)]]) -> [f64; 2] {
    let all = series.iter().flat_map(|s| s.iter()).map(|&(_, y)| y);
    let min = all.clone().fold(f64::INFINITY, f64::min);
    let max = all.fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return [-1.0, 1.0];
    }
    let range = (max - min).max(0.1);
    let pad = range * 0.1;
    [min - pad, max + pad]
}
