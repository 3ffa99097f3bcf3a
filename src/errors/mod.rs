use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Per-request failure. Always rendered as a `{status: "fail", message}` envelope.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    DatabaseError(String),
    #[error("storage call exceeded the {0:?} request deadline")]
    Timeout(Duration),
}

/// Failures that prevent the service from starting. Never recovered.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("failed to get the secret value: {0}")]
    SecretFetch(String),
    #[error("failed to parse secret value: {0}")]
    SecretDecode(String),
    #[error("failed to bootstrap the database pool: {0}")]
    Bootstrap(String),
}

#[derive(Serialize)]
pub struct Envelope<'a> {
    pub status: &'a str,
    pub message: &'a str,
}

impl<'a> Envelope<'a> {
    pub fn success(message: &'a str) -> Self {
        Envelope { status: "success", message }
    }

    pub fn fail(message: &'a str) -> Self {
        Envelope { status: "fail", message }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        log::error!("Database error: {}", err);
        AppError::DatabaseError(err.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) | AppError::Timeout(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = self.to_string();
        HttpResponse::build(self.status_code()).json(Envelope::fail(&message))
    }
}
