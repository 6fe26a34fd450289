use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid time format: '{0}'. Use HH:MM (e.g., 09:00).")]
    InvalidTimeFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Quote fetch failed: {0}")]
    QuoteFetch(String),

    #[error("Incomplete quote: {0}")]
    IncompleteQuote(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<String> for DomainError {
    fn from(s: String) -> Self {
        DomainError::Database(s)
    }
}
