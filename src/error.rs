//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Missing, empty or non-string required field.
    #[error("{0}")]
    Validation(String),
    /// Referenced parent entity does not exist.
    #[error("{0}")]
    Reference(String),
    /// The store accepted the write but the row could not be read back.
    #[error("{0}")]
    Persistence(String),
    /// Primary-key collision on insert.
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

impl AppError {
    /// Maps constraint violations raised by the store onto the catalog taxonomy.
    /// Anything else stays a plain database error.
    pub fn from_write(err: sqlx::Error, what: &str) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                return AppError::Conflict(format!("{} id already taken", what));
            }
            if db.is_foreign_key_violation() {
                return AppError::Reference(format!("{} references a missing parent", what));
            }
        }
        AppError::Db(err)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Reference(_) => StatusCode::NOT_FOUND,
            AppError::Config(_) | AppError::Persistence(_) | AppError::Conflict(_) | AppError::Db(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error, info) = match &self {
            AppError::Db(e) => ("Unexpected error".to_string(), Some(e.to_string())),
            AppError::Conflict(_) | AppError::Config(_) => ("Unexpected error".to_string(), Some(self.to_string())),
            _ => (self.to_string(), None),
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(ErrorBody { error, info })).into_response()
    }
}
