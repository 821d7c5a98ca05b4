use std::env;
use std::path::PathBuf;

/// Analysis selected by the first positional argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Dispatch,
    Sizing,
}

pub struct CliOptions {
    pub command: Command,
    pub scenario: Option<PathBuf>,
    pub preset: Option<String>,
    pub telemetry_out: Option<PathBuf>,
    pub load_table: Option<PathBuf>,
    pub generation_table: Option<PathBuf>,
    pub tui: bool,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(args)
}

fn parse_args_from(args: Vec<String>) -> Result<CliOptions, String> {
    let (command, rest) = match args.first().map(String::as_str) {
        Some("dispatch") => (Command::Dispatch, &args[1..]),
        Some("sizing") => (Command::Sizing, &args[1..]),
        _ => (Command::Dispatch, &args[..]),
    };
    parse_options(command, rest)
}

fn parse_options(command: Command, args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut scenario = None;
    let mut preset = None;
    let mut telemetry_out = None;
    let mut load_table = None;
    let mut generation_table = None;
    let mut tui = false;

    while i < args.len() {
        match args[i].as_str() {
            "--scenario" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --scenario (expected a TOML file path)")?;
                if scenario.replace(PathBuf::from(path)).is_some() {
                    return Err("--scenario provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name = args.next_or_err(i, "missing value for --preset (expected a preset name)")?;
                if preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--telemetry-out" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --telemetry-out (expected a file path)",
                )?;
                if telemetry_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--telemetry-out provided more than once".to_string());
                }
            }
            "--load" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --load (expected a CSV path)")?;
                if load_table.replace(PathBuf::from(path)).is_some() {
                    return Err("--load provided more than once".to_string());
                }
            }
            "--generation" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --generation (expected a CSV path)")?;
                if generation_table.replace(PathBuf::from(path)).is_some() {
                    return Err("--generation provided more than once".to_string());
                }
            }
            "--tui" => tui = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if scenario.is_some() && preset.is_some() {
        return Err(
            "arguments `--scenario` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    match command {
        Command::Dispatch => {
            if load_table.is_some() || generation_table.is_some() {
                return Err("`--load` and `--generation` only apply to `sizing`".to_string());
            }
        }
        Command::Sizing => {
            if load_table.is_none() || generation_table.is_none() {
                return Err("`sizing` requires both `--load` and `--generation`".to_string());
            }
            if telemetry_out.is_some() || tui {
                return Err("`--telemetry-out` and `--tui` only apply to `dispatch`".to_string());
            }
        }
    }

    if scenario.is_none() && preset.is_none() {
        preset = Some("baseline".to_string());
    }

    Ok(CliOptions {
        command,
        scenario,
        preset,
        telemetry_out,
        load_table,
        generation_table,
        tui,
    })
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  microgrid-sizing [dispatch] [--scenario <path> | --preset <name>] \
         [--telemetry-out <path>] [--tui]"
    );
    eprintln!(
        "  microgrid-sizing sizing --load <csv> --generation <csv> \
         [--scenario <path> | --preset <name>]"
    );
    eprintln!();
    eprintln!("Presets: baseline (default), large_storage, narrow_band");
    eprintln!("Set RUST_LOG to change log verbosity (default: info).");
}
