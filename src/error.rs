use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::slots::ParseError;

#[derive(Debug)]
pub enum AppError {
    InvalidCredentials,
    Unauthorized,
    Forbidden(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Parse(ParseError),
    /// Availability or venue data could not be read; the client should retry.
    Load(String),
    InvalidJoinCount { requested: i32, open: i32 },
    /// Some writes of a multi-record operation landed and were not rolled back.
    PartialWrite(String),
    Internal(String),
    Database(sqlx::Error),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "Invalid email or password"),
            Self::Unauthorized => write!(f, "Please log in to continue"),
            Self::Forbidden(msg) => write!(f, "{msg}"),
            Self::BadRequest(msg) => write!(f, "{msg}"),
            Self::NotFound(msg) => write!(f, "{msg}"),
            Self::Conflict(msg) => write!(f, "{msg}"),
            Self::Parse(e) => write!(f, "{e}"),
            Self::Load(msg) => write!(f, "{msg}. Please try again."),
            Self::InvalidJoinCount { requested, open } => {
                write!(f, "Cannot join with {requested} slots, only {open} available")
            }
            Self::PartialWrite(msg) => write!(f, "{msg}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
            Self::Database(e) => write!(f, "Database error: {e}"),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::BadRequest(_) | Self::Parse(_) | Self::InvalidJoinCount { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Load(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::PartialWrite(_) | Self::Internal(_) | Self::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Internal(_) | Self::Database(_) => {
                tracing::error!("{self}");
                "Internal server error".to_string()
            }
            Self::PartialWrite(_) | Self::Load(_) => {
                tracing::error!("{self}");
                self.to_string()
            }
            _ => self.to_string(),
        };

        if status.is_client_error() {
            tracing::warn!(status = status.as_u16(), "{message}");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        Self::Database(e)
    }
}

impl From<ParseError> for AppError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}
