use thiserror::Error;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Unknown {domain} kind `{value}`")]
    UnknownKind { domain: &'static str, value: String },
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),
    #[error("Malformed record: {0}")]
    MalformedRecord(String),
    #[error("Invalid reference: {0}")]
    InvalidRef(String),
    #[error("Configuration error: {0}")]
    Config(String),
}
