//! Typed errors and HTTP mapping.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::document::JSONAPI_MEDIA_TYPE;

/// Errors raised by the in-memory store and the resource facades.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{kind} with id {id} does not exist")]
    NotFound { kind: &'static str, id: String },
    #[error("there is no to-many relationship with the name {name} on {kind}")]
    UnknownRelationship { kind: &'static str, name: String },
    #[error("invalid value '{value}' for parameter {name}")]
    InvalidParameter { name: String, value: String },
}

impl StoreError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        StoreError::NotFound { kind, id: id.into() }
    }

    pub fn unknown_relationship(kind: &'static str, name: impl Into<String>) -> Self {
        StoreError::UnknownRelationship {
            kind,
            name: name.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {name}")]
    InvalidVar { name: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("conflict: {0}")]
    Conflict(String),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub errors: Vec<ErrorDetail>,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub status: String,
    pub code: String,
    pub detail: String,
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Store(StoreError::NotFound { .. }) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Store(StoreError::UnknownRelationship { .. }) => {
                (StatusCode::NOT_FOUND, "unknown_relationship")
            }
            AppError::Store(StoreError::InvalidParameter { .. }) => {
                (StatusCode::BAD_REQUEST, "invalid_parameter")
            }
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, code, "request rejected");
        }
        let body = ErrorBody {
            errors: vec![ErrorDetail {
                status: status.as_u16().to_string(),
                code: code.to_string(),
                detail: self.to_string(),
            }],
        };
        (status, [(header::CONTENT_TYPE, JSONAPI_MEDIA_TYPE)], Json(body)).into_response()
    }
}
