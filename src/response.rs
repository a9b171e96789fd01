//! JSON:API response helpers.

use crate::document::JSONAPI_MEDIA_TYPE;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Serializes `body` with the JSON:API media type.
pub fn document<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, [(header::CONTENT_TYPE, JSONAPI_MEDIA_TYPE)], Json(body)).into_response()
}

pub fn ok<T: Serialize>(body: T) -> Response {
    document(StatusCode::OK, body)
}

pub fn created<T: Serialize>(body: T) -> Response {
    document(StatusCode::CREATED, body)
}

pub fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}
