use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading tabular or sequence input from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV in {path}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("missing {hint} column ({column})")]
    MissingColumn { column: String, hint: &'static str },
    #[error("row {row}: {column} value is not a number: {value:?}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },
}

/// Outcomes of the HRV pipeline that stop short of producing metrics.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HrvError {
    #[error("not enough beats to calculate HRV (found {found}, need at least 2)")]
    InsufficientBeats { found: usize },
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error("Invalid input for glucose or oxygen levels (glucose={glucose}, oxygen={oxygen})")]
    UnknownLevel { glucose: String, oxygen: String },
    #[error("invalid noise parameters: mean={mean}, std_dev={std_dev}")]
    InvalidNoise { mean: f64, std_dev: f64 },
    #[error("failed to read ATP config {path}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing ATP config")]
    ConfigParse(#[from] toml::de::Error),
}
