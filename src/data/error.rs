use std::path::PathBuf;

use thiserror::Error;

/// The dataset could not be produced.
///
/// Every variant is fatal for the session: the dashboard shows the message
/// and renders nothing else until another file is opened.
#[derive(Debug, Error)]
pub enum DataUnavailable {
    #[error("data file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed delimited text: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("unreadable arrow data: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("required column '{0}' is missing")]
    MissingColumn(String),

    #[error("row {row}, column '{column}': {reason} ('{value}')")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
        reason: &'static str,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
}
