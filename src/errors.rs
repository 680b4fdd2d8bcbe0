use thiserror::Error;

/// Error type shared by every finboard utility.
#[derive(Debug, Error)]
pub enum FinboardError {
    #[error("Invalid date `{input}`: expected YYYY-MM-DD")]
    InvalidDate { input: String },
    #[error("Invalid month token `{0}`: expected YYYY-MM")]
    InvalidMonthToken(String),
    #[error("Invalid currency code `{0}`: expected three ASCII letters")]
    InvalidCurrency(String),
    #[error("No display rate for {from} -> {to}")]
    MissingRate { from: String, to: String },
    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FinboardError>;
