use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::ErrorResponse;
use crate::providers::FetchError;

/// Application error types for the HTTP layer
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid request parameter
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Upstream data provider failed
    #[error("upstream error: {0}")]
    Upstream(#[from] FetchError),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error_code, message) = match self {
            AppError::Validation(msg) => ("validation_error", msg.clone()),
            AppError::NotFound(msg) => ("not_found", msg.clone()),
            AppError::Upstream(e) => ("upstream_error", e.to_string()),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: error_code.to_string(),
            message,
        })
    }
}

/// Validate a swap budget before it reaches the recommendation core
pub fn validate_budget(budget: f64) -> Result<(), AppError> {
    if !budget.is_finite() {
        return Err(AppError::Validation(format!(
            "Budget must be a finite number, got {}",
            budget
        )));
    }
    if budget < 0.0 {
        return Err(AppError::Validation(format!(
            "Budget must be non-negative, got {}",
            budget
        )));
    }
    Ok(())
}
