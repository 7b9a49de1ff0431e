use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MortgageError {
    #[error("invalid input: {field}: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: String,
    },

    #[error("invalid amount: {input:?}")]
    InvalidAmount {
        input: String,
    },

    #[error("rate feed error for {series_id}: {message}")]
    RateFeed {
        series_id: String,
        message: String,
    },

    #[error("serialization error: {message}")]
    Serialization {
        message: String,
    },
}

impl MortgageError {
    pub(crate) fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        MortgageError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for MortgageError {
    fn from(e: serde_json::Error) -> Self {
        MortgageError::Serialization {
            message: e.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MortgageError>;
