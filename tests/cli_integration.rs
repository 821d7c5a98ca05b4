//! Runs the binary the way a user would.

mod common;

use std::fs;
use std::process::Command;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_microgrid-sizing"))
}

#[test]
fn presets_run_via_cli_and_report_costs() {
    let mut purchased = Vec::new();
    for preset in ["baseline", "large_storage", "narrow_band"] {
        let output = bin()
            .args(["dispatch", "--preset", preset])
            .output()
            .expect("process should run");
        assert!(
            output.status.success(),
            "preset {preset} failed: stderr={}",
            String::from_utf8_lossy(&output.stderr)
        );
        let stdout = String::from_utf8(output.stdout).expect("stdout should be valid UTF-8");
        assert!(stdout.contains("--- Dispatch Cost Report ---"));
        purchased.push(parse_metric(&stdout, "Total purchased:", "kWh"));
    }
    // Raw purchases depend on the profile only
    assert!(purchased.windows(2).all(|w| (w[0] - w[1]).abs() < 1e-6));
}

#[test]
fn telemetry_export_writes_one_row_per_hour() {
    let out = common::write_temp("dispatch_records.csv", "");
    let output = bin()
        .args(["--telemetry-out"])
        .arg(&out)
        .output()
        .expect("process should run");
    assert!(output.status.success());

    let csv = fs::read_to_string(&out).expect("export should exist");
    let mut lines = csv.lines();
    assert!(
        lines
            .next()
            .is_some_and(|h| h.starts_with("timestep,hour,load_kw"))
    );
    assert_eq!(lines.count(), 24);
}

#[test]
fn sizing_runs_from_csv_tables() {
    let load = common::write_temp("cli_load.csv", common::LOAD_TABLE);
    let generation = common::write_temp("cli_generation.csv", common::GENERATION_TABLE);
    let output = bin()
        .arg("sizing")
        .arg("--load")
        .arg(&load)
        .arg("--generation")
        .arg(&generation)
        .output()
        .expect("process should run");
    assert!(
        output.status.success(),
        "sizing failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8(output.stdout).expect("stdout should be valid UTF-8");
    assert!(stdout.contains("[North]"));
    assert!(stdout.contains("[South]"));
    assert!(stdout.contains("unbounded"));
}

#[test]
fn invalid_scenario_exits_non_zero() {
    let path = common::write_temp("bad_scenario.toml", "[storage]\ncapacity_kwh = -5.0\n");
    let output = bin()
        .arg("--scenario")
        .arg(&path)
        .output()
        .expect("process should run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("storage.capacity_kwh"));
}

#[test]
fn nan_costs_in_scenario_exit_non_zero() {
    let path = common::write_temp(
        "nan_scenario.toml",
        "[prices]\nstorage_lifetime_years = nan\n\n[sizing]\npayback_years = nan\n",
    );
    let output = bin()
        .arg("--scenario")
        .arg(&path)
        .output()
        .expect("process should run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("prices.storage_lifetime_years"));
    assert!(stderr.contains("sizing.payback_years"));
}

#[test]
fn unknown_preset_exits_non_zero() {
    let output = bin()
        .args(["--preset", "nope"])
        .output()
        .expect("process should run");
    assert!(!output.status.success());
}

fn parse_metric(stdout: &str, label: &str, unit: &str) -> f64 {
    let line = stdout
        .lines()
        .find(|line| line.trim_start().starts_with(label))
        .unwrap_or_else(|| panic!("missing line `{label}` in output: {stdout}"));

    let raw = line
        .split_once(':')
        .map(|(_, right)| right.trim())
        .unwrap_or_else(|| panic!("invalid format for line `{line}`"));

    let numeric = raw.strip_suffix(unit).unwrap_or(raw).trim();
    numeric
        .parse::<f64>()
        .unwrap_or_else(|_| panic!("failed parsing `{numeric}` from line `{line}`"))
}
