use actix_web::HttpResponse;
use thiserror::Error;

use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unprocessable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::ProductNotFound(_) => AppError::NotFound(e.to_string()),
            DomainError::InvalidQuote(_) => AppError::Unprocessable(e.to_string()),
            DomainError::InvalidInput(msg) => AppError::Unprocessable(msg),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound(msg) => HttpResponse::NotFound().json(serde_json::json!({
                "message": msg
            })),
            AppError::Unprocessable(msg) => {
                HttpResponse::UnprocessableEntity().json(serde_json::json!({
                    "message": msg
                }))
            }
            AppError::Internal(msg) => {
                log::error!("Unexpected error: {}", msg);
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "message": "Internal server error"
                }))
            }
        }
    }
}
