//! Microgrid sizing entry point: CLI wiring and scenario-driven analyses.

mod cli;

use std::process;

use microgrid_sizing::config::ScenarioConfig;
use microgrid_sizing::error::SimError;
use microgrid_sizing::io::export::export_csv;
use microgrid_sizing::logging::init_tracing;
use microgrid_sizing::reporting::{print_dispatch_report, print_sizing_report};
use microgrid_sizing::runner::{run_dispatch, run_sizing};
use tracing::info;

use cli::{CliOptions, Command};

/// Loads the scenario: `--scenario` file, else the named preset.
fn load_scenario(cli: &CliOptions) -> ScenarioConfig {
    let loaded = if let Some(ref path) = cli.scenario {
        ScenarioConfig::from_toml_file(path)
    } else {
        ScenarioConfig::from_preset(cli.preset.as_deref().unwrap_or("baseline"))
    };
    let scenario = match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    scenario
}

fn dispatch(cli: &CliOptions, scenario: &ScenarioConfig) -> Result<(), SimError> {
    if cli.tui {
        return show_tui(cli, scenario);
    }

    let run = run_dispatch(scenario)?;
    print_dispatch_report(&run);

    if let Some(ref path) = cli.telemetry_out {
        export_csv(&run.outcome.records, path)?;
        info!(path = %path.display(), "dispatch records written");
    }
    Ok(())
}

#[cfg(feature = "tui")]
fn show_tui(cli: &CliOptions, scenario: &ScenarioConfig) -> Result<(), SimError> {
    let label = match (&cli.scenario, &cli.preset) {
        (Some(path), _) => path.display().to_string(),
        (None, Some(name)) => name.clone(),
        (None, None) => "baseline".to_string(),
    };
    microgrid_sizing::tui::run(scenario.clone(), &label)
}

#[cfg(not(feature = "tui"))]
fn show_tui(_cli: &CliOptions, _scenario: &ScenarioConfig) -> Result<(), SimError> {
    Err(SimError::InvalidInput(
        "--tui requires a build with the `tui` feature".to_string(),
    ))
}

fn sizing(cli: &CliOptions, scenario: &ScenarioConfig) -> Result<(), SimError> {
    let (Some(load), Some(generation)) = (&cli.load_table, &cli.generation_table) else {
        return Err(SimError::InvalidInput(
            "sizing requires --load and --generation".to_string(),
        ));
    };
    let report = run_sizing(scenario, load, generation)?;
    print_sizing_report(&report);
    Ok(())
}

fn main() {
    let cli = match cli::parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("error: {e}");
            cli::print_usage();
            process::exit(1);
        }
    };

    // Keep the chart view free of log lines unless RUST_LOG asks for them
    init_tracing(if cli.tui { "warn" } else { "info" });

    let scenario = load_scenario(&cli);

    let result = match cli.command {
        Command::Dispatch => dispatch(&cli, &scenario),
        Command::Sizing => sizing(&cli, &scenario),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
