use thiserror::Error;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Error: {0}")]
    Validation(String),
    #[error("Invalid index!")]
    InvalidIndex { index: usize, len: usize },
    #[error("Expense canceled.")]
    Cancelled,
    #[error("Invalid {field} on line {line}, skipping.")]
    Parse { line: usize, field: &'static str },
}

impl LedgerError {
    pub fn negative_amount() -> Self {
        LedgerError::Validation("Negative amount!".into())
    }

    pub fn negative_limit() -> Self {
        LedgerError::Validation("Negative limit!".into())
    }

    pub fn empty_label(label: &str) -> Self {
        LedgerError::Validation(format!("{label} cannot be empty!"))
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Config(err.to_string())
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
