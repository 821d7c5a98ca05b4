//! Replay state for the chart view.

use std::time::Instant;

use crate::config::ScenarioConfig;
use crate::error::SimError;
use crate::runner::{DispatchRun, run_dispatch};
use crate::sim::power_balance::{deficit_kw, surplus_kw};
use crate::sim::types::DispatchRecord;

/// Tick interval options in milliseconds (slowest → fastest).
const SPEED_LEVELS_MS: [u64; 6] = [1000, 500, 250, 100, 50, 20];

/// Default speed index (250 ms).
const DEFAULT_SPEED_IDX: usize = 2;

/// Chart view state: a finished dispatch run revealed one hour per tick.
pub struct App {
    /// Completed run being replayed.
    run: DispatchRun,
    /// Scenario the run came from (kept for the SOC band and restarts).
    scenario: ScenarioConfig,
    /// Number of hours currently shown.
    pub revealed: usize,
    /// Whether the replay is paused.
    pub paused: bool,
    /// Current index into `SPEED_LEVELS_MS`.
    pub speed_idx: usize,
    /// Whether the user has requested quit.
    pub quit: bool,
    /// When the last hour was revealed.
    pub last_tick: Instant,
    /// Preset name or scenario path shown in the header.
    pub label: String,
}

impl App {
    /// Runs the dispatch for `scenario` and starts a replay with nothing shown.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub fn new(scenario: ScenarioConfig, label: &str) -> Result<Self, SimError> {
        let run = run_dispatch(&scenario)?;
        Ok(Self {
            run,
            scenario,
            revealed: 0,
            paused: false,
            speed_idx: DEFAULT_SPEED_IDX,
            quit: false,
            last_tick: Instant::now(),
            label: label.to_string(),
        })
    }

    /// Reveals one more hour if any remain.
    pub fn tick(&mut self) {
        if !self.is_finished() {
            self.revealed += 1;
        }
    }

    pub fn total_steps(&self) -> usize {
        self.run.outcome.len()
    }

    /// Returns `true` once every hour is shown.
    pub fn is_finished(&self) -> bool {
        self.revealed >= self.total_steps()
    }

    /// Records shown so far.
    pub fn visible(&self) -> &[DispatchRecord] {
        &self.run.outcome.records[..self.revealed]
    }

    /// Raw `(purchased, abandoned)` energy over the shown hours (kWh).
    pub fn running_totals(&self) -> (f64, f64) {
        self.visible().iter().fold((0.0, 0.0), |(buy, curtail), r| {
            (buy + deficit_kw(r.net_kw), curtail + surplus_kw(r.net_kw))
        })
    }

    /// Latest SOC as a fraction of capacity, or the initial fraction before the first hour.
    pub fn soc_fraction(&self) -> f64 {
        self.visible().last().map_or(self.scenario.storage.initial_soc, |r| {
            r.soc_after_kwh / self.scenario.storage.capacity_kwh
        })
    }

    /// SOC band `(soc_min, soc_max)` of the dispatched device.
    pub fn soc_band(&self) -> (f64, f64) {
        (self.scenario.storage.soc_min, self.scenario.storage.soc_max)
    }

    pub fn run(&self) -> &DispatchRun {
        &self.run
    }

    /// Toggles pause/resume.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Shorter tick interval.
    pub fn speed_up(&mut self) {
        if self.speed_idx + 1 < SPEED_LEVELS_MS.len() {
            self.speed_idx += 1;
        }
    }

    /// Longer tick interval.
    pub fn speed_down(&mut self) {
        if self.speed_idx > 0 {
            self.speed_idx -= 1;
        }
    }

    /// Returns the current tick interval in milliseconds.
    pub fn tick_interval_ms(&self) -> u64 {
        SPEED_LEVELS_MS[self.speed_idx]
    }

    /// Replaces the scenario with a preset and restarts the replay.
    ///
    /// Unknown presets and presets that fail to dispatch leave the view unchanged.
    pub fn switch_preset(&mut self, name: &str) {
        let Ok(scenario) = ScenarioConfig::from_preset(name) else {
            return;
        };
        let Ok(run) = run_dispatch(&scenario) else {
            return;
        };
        self.run = run;
        self.scenario = scenario;
        self.label = name.to_string();
        self.restart();
    }

    /// Hides every hour and resumes the replay from the start.
    pub fn restart(&mut self) {
        self.revealed = 0;
        self.paused = false;
    }
}
