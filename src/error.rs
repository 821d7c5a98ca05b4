//! Library error type shared by the dispatch and sizing analyses.

use thiserror::Error;

/// Errors raised while validating inputs or running an analysis.
#[derive(Debug, Error)]
pub enum SimError {
    /// Input series are empty, of different lengths, or contain bad samples.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Storage device or cost parameters violate their constraints.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// An expected table column is missing.
    #[error("schema error: missing column \"{column}\"")]
    Schema { column: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Checks that a named series is non-empty and holds finite, non-negative samples.
pub(crate) fn check_series(name: &str, series: &[f64]) -> Result<(), SimError> {
    if series.is_empty() {
        return Err(SimError::InvalidInput(format!("{name} series is empty")));
    }
    if let Some((i, v)) = series
        .iter()
        .enumerate()
        .find(|(_, v)| !v.is_finite() || **v < 0.0)
    {
        return Err(SimError::InvalidInput(format!(
            "{name}[{i}] = {v} is not a finite, non-negative value"
        )));
    }
    Ok(())
}
