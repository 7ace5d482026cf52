// src/error.rs
use crate::validation::ValidationError;
use std::fmt;
use thiserror::Error;
use warp::http::StatusCode;
use warp::reject::Reject;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid transaction: {0}")]
    Validation(#[from] ValidationError),

    #[error("transaction not found: {0}")]
    NotFound(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server responded with HTTP {status}: {message}")]
    Remote { status: u16, message: String },
}

impl LedgerError {
    pub fn status(&self) -> StatusCode {
        match self {
            LedgerError::Validation(_) => StatusCode::BAD_REQUEST,
            LedgerError::NotFound(_) => StatusCode::NOT_FOUND,
            LedgerError::Remote { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            LedgerError::Storage(_) | LedgerError::Http(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Rejection carried through warp filters and rendered by `api::handle_rejection`.
#[derive(Debug)]
pub struct CustomError {
    pub status: StatusCode,
    pub message: String,
}

impl fmt::Display for CustomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CustomError {}

impl Reject for CustomError {}

impl From<LedgerError> for CustomError {
    fn from(e: LedgerError) -> Self {
        CustomError {
            status: e.status(),
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let not_found = CustomError::from(LedgerError::NotFound("42".into()));
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);
        assert_eq!(not_found.to_string(), "transaction not found: 42");

        let invalid = CustomError::from(LedgerError::from(ValidationError::EmptyStockName));
        assert_eq!(invalid.status, StatusCode::BAD_REQUEST);

        let storage = CustomError::from(LedgerError::Storage("down".into()));
        assert_eq!(storage.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
