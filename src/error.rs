use thiserror::Error;

/// The result type used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the evaluators, the classifier and the sanity runner.
///
/// Shape and label errors are caller contract violations. They are checked
/// before any arithmetic runs, so both evaluation strategies report the same
/// error for the same bad input.
#[derive(Debug, Error)]
pub enum Error {
    #[error("weights have {weights} rows but the feature batch has {features} columns")]
    FeatureMismatch { weights: usize, features: usize },

    #[error("feature batch has {rows} rows but {labels} labels were given")]
    LabelCountMismatch { rows: usize, labels: usize },

    #[error("label {label} at row {row} is outside 0..{classes}")]
    LabelOutOfRange {
        row: usize,
        label: usize,
        classes: usize,
    },

    #[error("feature batch is empty")]
    EmptyBatch,

    #[error("regularization strength must be finite and non-negative, got {0}")]
    InvalidRegularization(f64),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
