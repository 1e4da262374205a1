//! API error type and its JSON rendering

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::services::{ConfirmationError, DraftError};

/// Every non-2xx answer of the API, rendered as `{"error": .., "details": ..}`
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Transaction ID is required")]
    MissingTransactionId,

    #[error("Invalid transaction ID")]
    InvalidTransactionId(String),

    #[error("Invalid address")]
    InvalidAddress(String),

    #[error("Invalid request body")]
    InvalidBody(String),

    #[error("Experience not found")]
    ExperienceNotFound { id: u64, details: String },

    #[error("Invalid experience draft")]
    Draft(#[from] DraftError),

    #[error("Internal server error")]
    Upstream(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingTransactionId
            | ApiError::InvalidTransactionId(_)
            | ApiError::InvalidAddress(_)
            | ApiError::InvalidBody(_)
            | ApiError::Draft(_) => StatusCode::BAD_REQUEST,
            ApiError::ExperienceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            ApiError::MissingTransactionId => None,
            ApiError::InvalidTransactionId(value) | ApiError::InvalidAddress(value) => {
                Some(format!("not a valid hex value: {value}"))
            }
            ApiError::InvalidBody(details) | ApiError::Upstream(details) => Some(details.clone()),
            ApiError::ExperienceNotFound { details, .. } => Some(details.clone()),
            ApiError::Draft(err) => Some(err.to_string()),
        }
    }
}

impl From<ConfirmationError> for ApiError {
    fn from(err: ConfirmationError) -> Self {
        match err {
            ConfirmationError::MissingTransactionId => ApiError::MissingTransactionId,
            ConfirmationError::InvalidTransactionId(value) => ApiError::InvalidTransactionId(value),
            ConfirmationError::Ledger(err) => ApiError::Upstream(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = ?self, "request failed");
        }

        let body = match self.details() {
            Some(details) => json!({ "error": self.to_string(), "details": details }),
            None => json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}
