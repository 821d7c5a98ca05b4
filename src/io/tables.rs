//! Hour-indexed CSV tables for multi-park load and generation data.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::SimError;

/// A table of numeric columns keyed by an hour-of-day column.
///
/// The first CSV column holds the hour label (e.g. `00:00:00`) and is kept
/// only for display; every other column must parse as `f64`.
#[derive(Debug, Clone)]
pub struct HourTable {
    hours: Vec<String>,
    columns: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl HourTable {
    /// Reads a table from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or is not a valid table.
    pub fn from_path(path: &Path) -> Result<Self, SimError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Reads a table from any CSV source.
    ///
    /// # Errors
    ///
    /// * [`SimError::Csv`] for malformed CSV.
    /// * [`SimError::InvalidInput`] when there is no value column, two value
    ///   columns share a name, or a cell is not a number.
    pub fn from_reader(reader: impl Read) -> Result<Self, SimError> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let headers = rdr.headers()?.clone();
        if headers.len() < 2 {
            return Err(SimError::InvalidInput(
                "table needs an hour column and at least one value column".to_string(),
            ));
        }
        let columns: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();
        let mut seen = HashSet::new();
        if let Some(dup) = columns.iter().find(|c| !seen.insert(c.as_str())) {
            return Err(SimError::InvalidInput(format!(
                "column \"{dup}\" appears more than once"
            )));
        }

        let mut hours = Vec::new();
        let mut values = vec![Vec::new(); columns.len()];
        for (row, record) in rdr.records().enumerate() {
            let record = record?;
            hours.push(record.get(0).unwrap_or_default().to_string());
            for (c, column) in columns.iter().enumerate() {
                let cell = record.get(c + 1).unwrap_or_default();
                let v: f64 = cell.parse().map_err(|_| {
                    SimError::InvalidInput(format!(
                        "row {row}, column \"{column}\": \"{cell}\" is not a number"
                    ))
                })?;
                values[c].push(v);
            }
        }

        Ok(Self {
            hours,
            columns,
            values,
        })
    }

    /// Value column names in file order (the hour column excluded).
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Hour labels, one per row.
    pub fn hours(&self) -> &[String] {
        &self.hours
    }

    pub fn row_count(&self) -> usize {
        self.hours.len()
    }

    /// Looks up a column by exact name.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Schema`] naming the column if it does not exist.
    pub fn column(&self, name: &str) -> Result<&[f64], SimError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .map(|i| self.values[i].as_slice())
            .ok_or_else(|| SimError::Schema {
                column: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOAD_CSV: &str = "hour,A_Load,B_Load\n\
                            00:00:00,275,241\n\
                            01:00:00,264,253\n\
                            02:00:00,262,329\n";

    #[test]
    fn reads_columns_and_hours() {
        let table = HourTable::from_reader(LOAD_CSV.as_bytes()).expect("valid table");
        assert_eq!(table.columns(), &["A_Load".to_string(), "B_Load".to_string()]);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.hours()[1], "01:00:00");
        assert_eq!(table.column("B_Load").ok(), Some(&[241.0, 253.0, 329.0][..]));
    }

    #[test]
    fn missing_column_is_schema_error() {
        let table = HourTable::from_reader(LOAD_CSV.as_bytes()).expect("valid table");
        match table.column("C_Load") {
            Err(SimError::Schema { column }) => assert_eq!(column, "C_Load"),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_cell_rejected() {
        let csv = "hour,A_Load\n00:00:00,abc\n";
        let err = HourTable::from_reader(csv.as_bytes());
        assert!(matches!(err, Err(SimError::InvalidInput(_))));
    }

    #[test]
    fn duplicate_column_rejected() {
        let csv = "hour,A_Load,A_Load\n00:00:00,1,2\n";
        match HourTable::from_reader(csv.as_bytes()) {
            Err(SimError::InvalidInput(msg)) => assert!(msg.contains("A_Load")),
            other => panic!("expected duplicate column error, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_after_trim_rejected() {
        let csv = "hour,A_Wind, A_Wind \n00:00:00,1,2\n";
        assert!(matches!(
            HourTable::from_reader(csv.as_bytes()),
            Err(SimError::InvalidInput(_))
        ));
    }

    #[test]
    fn hour_only_table_rejected() {
        let csv = "hour\n00:00:00\n";
        assert!(HourTable::from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn ragged_row_is_csv_error() {
        let csv = "hour,A_Load,B_Load\n00:00:00,1\n";
        assert!(matches!(
            HourTable::from_reader(csv.as_bytes()),
            Err(SimError::Csv(_))
        ));
    }
}
