//! Extract the pagination request from `page[...]` query parameters.

use crate::error::AppError;
use crate::store::PageRequest;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use std::collections::HashMap;

/// `page[number]`+`page[size]` or `page[limit]`+`page[offset]`; `None` when neither pair is complete.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageQuery(pub Option<PageRequest>);

#[async_trait]
impl<S> FromRequestParts<S> for PageQuery
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        Ok(PageQuery(PageRequest::from_query(&params)?))
    }
}
