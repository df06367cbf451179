//! Pipeline error types.
//!
//! Every fatal failure mode has a named variant. An empty selection is not
//! an error and never appears here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Missing required column: {column}")]
    MissingColumn { column: String },

    #[error("Malformed numeric value in row {row}, column '{column}': '{value}'")]
    MalformedNumericField {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to open '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type alias for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
