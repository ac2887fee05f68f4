use thiserror::Error;
use uuid::Uuid;

/// Error type that captures common ledger and persistence failures.
#[derive(Debug, Error)]
pub enum FinanceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),
    #[error("Storage error: {0}")]
    Storage(String),
}
