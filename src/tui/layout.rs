//! Frame layout and widget rendering for the chart view.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, Gauge, GraphType, Paragraph,
};

use crate::sim::clock::hour_label;

use super::runtime::App;
use super::style;

/// Renders the full frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(10),   // balance chart
            Constraint::Min(8),    // storage + energy totals
            Constraint::Length(3), // SOC gauge
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    let lower = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[2]);

    render_header(frame, app, chunks[0]);
    render_balance_chart(frame, app, chunks[1]);
    render_storage_chart(frame, app, lower[0]);
    render_energy_bars(frame, app, lower[1]);
    render_soc_gauge(frame, app, chunks[3]);
    render_footer(frame, chunks[4]);
}

/// Header bar: scenario label, hour progress, speed, replay state.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let (state_icon, state_label) = if app.is_finished() {
        ("■", "DONE")
    } else if app.paused {
        ("‖", "PAUSED")
    } else {
        ("▶", "RUNNING")
    };

    let clock = match app.revealed {
        0 => "--:--:--".to_string(),
        n => hour_label(n - 1),
    };

    let header = Line::from(vec![
        Span::styled(
            " MICROGRID ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(&app.label, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!(
            " │ {clock} │ {}/{} │ {}ms │ {state_icon} {state_label} ",
            app.revealed,
            app.total_steps(),
            app.tick_interval_ms(),
        )),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

fn x_axis(app: &App) -> Axis<'static> {
    let x_hi = (app.total_steps().max(2) - 1) as f64;
    Axis::default()
        .title("hour")
        .bounds([0.0, x_hi])
        .labels(vec!["0".to_string(), format!("{}", x_hi as usize)])
}

fn y_axis(title: &'static str, bounds: [f64; 2]) -> Axis<'static> {
    Axis::default()
        .title(title)
        .bounds(bounds)
        .labels(vec![format!("{:.1}", bounds[0]), format!("{:.1}", bounds[1])])
}

/// Load, generation, and stored energy over the revealed hours.
fn render_balance_chart(frame: &mut Frame, app: &App, area: Rect) {
    let visible = app.visible();
    let load: Vec<(f64, f64)> = visible
        .iter()
        .map(|r| (r.timestep as f64, r.load_kw))
        .collect();
    let generation: Vec<(f64, f64)> = visible
        .iter()
        .map(|r| (r.timestep as f64, r.generation_kw))
        .collect();
    let soc: Vec<(f64, f64)> = visible
        .iter()
        .map(|r| (r.timestep as f64, r.soc_after_kwh))
        .collect();

    let y_bounds = style::auto_bounds_y(&[&load, &generation, &soc]);

    let datasets = vec![
        Dataset::default()
            .name("Load kW")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(style::LOAD_COLOR))
            .data(&load),
        Dataset::default()
            .name("Generation kW")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(style::GENERATION_COLOR))
            .data(&generation),
        Dataset::default()
            .name("SOC kWh")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(style::SOC_LINE_COLOR))
            .data(&soc),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(" Load / Generation / Stored Energy ")
                .borders(Borders::ALL),
        )
        .x_axis(x_axis(app))
        .y_axis(y_axis("kW | kWh", y_bounds));

    frame.render_widget(chart, area);
}

/// Signed storage power: positive charges, negative discharges.
fn render_storage_chart(frame: &mut Frame, app: &App, area: Rect) {
    let power: Vec<(f64, f64)> = app
        .visible()
        .iter()
        .map(|r| (r.timestep as f64, r.charge_discharge_kw))
        .collect();
    let zero: Vec<(f64, f64)> = vec![(0.0, 0.0), ((app.total_steps().max(2) - 1) as f64, 0.0)];

    let y_bounds = style::auto_bounds_y(&[&power, &zero]);

    let datasets = vec![
        Dataset::default()
            .name("Charge(+)/Discharge(-) kW")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(style::STORAGE_COLOR))
            .data(&power),
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(style::FOOTER_FG))
            .data(&zero),
    ];

    let chart = Chart::new(datasets)
        .block(Block::default().title(" Storage Dispatch ").borders(Borders::ALL))
        .x_axis(x_axis(app))
        .y_axis(y_axis("kW", y_bounds));

    frame.render_widget(chart, area);
}

/// Running raw purchased and abandoned energy.
fn render_energy_bars(frame: &mut Frame, app: &App, area: Rect) {
    let (purchased, abandoned) = app.running_totals();

    let bars = [
        Bar::default()
            .label(Line::from("Purchased"))
            .value(purchased.round() as u64)
            .text_value(format!("{purchased:.1}"))
            .style(Style::default().fg(style::PURCHASED_COLOR)),
        Bar::default()
            .label(Line::from("Abandoned"))
            .value(abandoned.round() as u64)
            .text_value(format!("{abandoned:.1}"))
            .style(Style::default().fg(style::ABANDONED_COLOR)),
    ];

    let chart = BarChart::default()
        .block(Block::default().title(" Energy kWh ").borders(Borders::ALL))
        .bar_width(11)
        .bar_gap(2)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}

/// Stored energy as a fraction of capacity, coloured by distance to the band edges.
fn render_soc_gauge(frame: &mut Frame, app: &App, area: Rect) {
    let soc = app.soc_fraction();
    let (lo, hi) = app.soc_band();

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(format!(" SOC (band {:.0}%–{:.0}%) ", lo * 100.0, hi * 100.0))
                .borders(Borders::ALL),
        )
        .gauge_style(Style::default().fg(style::soc_color(soc, lo, hi)))
        .ratio(soc.clamp(0.0, 1.0))
        .label(format!("{:.0}%", soc * 100.0));
    frame.render_widget(gauge, area);
}

/// Footer with keybinding hints.
fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " q:Quit  Space:Pause  +/-:Speed  1/2/3:Preset  r:Restart",
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}
