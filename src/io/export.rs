//! CSV export for dispatch records.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::clock::hour_label;
use crate::sim::types::DispatchRecord;

/// Column header for CSV dispatch export.
const HEADER: &str = "timestep,hour,load_kw,generation_kw,net_kw,\
                      charge_discharge_kw,soc_kwh,\
                      residual_purchase_kwh,residual_abandoned_kwh";

/// Exports dispatch records to a CSV file at the given path.
///
/// Writes a header row followed by one data row per step. Produces
/// deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(records: &[DispatchRecord], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(records, buf)
}

/// Writes dispatch records as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(records: &[DispatchRecord], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for r in records {
        wtr.write_record(&[
            r.timestep.to_string(),
            hour_label(r.timestep),
            format!("{:.4}", r.load_kw),
            format!("{:.4}", r.generation_kw),
            format!("{:.4}", r.net_kw),
            format!("{:.4}", r.charge_discharge_kw),
            format!("{:.4}", r.soc_after_kwh),
            format!("{:.4}", r.residual_purchase_kwh),
            format!("{:.4}", r.residual_abandoned_kwh),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
