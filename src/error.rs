use thiserror::Error;

/// The only way the analysis core can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("cannot analyze '{input}': {reason}")]
    InvalidUrl { input: String, reason: String },
}

impl AnalysisError {
    pub(crate) fn invalid(input: &str, reason: impl Into<String>) -> Self {
        AnalysisError::InvalidUrl {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Failures of the stateful collaborators (settings, history).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid setting {key}: {value}")]
    Config { key: String, value: String },
    #[error("history store lock poisoned")]
    Poisoned,
}
