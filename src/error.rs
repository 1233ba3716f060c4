//! Typed errors and HTTP mapping.

use crate::response::{conflict, not_found};
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid {key}={value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("password hashing: {0}")]
    Hash(#[from] bcrypt::BcryptError),
    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("background task: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = match &self {
            AppError::NotFound(msg) => {
                let body = not_found(msg.clone());
                return (body.status(), Json(body)).into_response();
            }
            AppError::Conflict(msg) => {
                let body = conflict(msg.clone());
                return (body.status(), Json(body)).into_response();
            }
            AppError::BadRequest(_) => "bad_request",
            AppError::InvalidBody(_) => "invalid_body",
            AppError::Db(_) => "database_error",
            AppError::Hash(_) => "hash_error",
            AppError::Serialization(_) => "serialization_error",
            AppError::Task(_) => "internal_error",
        };
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidBody(rejection) => {
                tracing::debug!(error = %rejection, "request body rejected");
                rejection.status()
            }
            _ => {
                tracing::error!(error = %self, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}
