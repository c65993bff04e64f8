//! Query-string extraction
//!
//! Axum's stock `Query` rejection renders as plain text, which breaks the
//! JSON envelope contract every response carries. This wrapper maps the
//! rejection into `AppError::BadRequest` so malformed filter values come
//! back as `{success: false, error}` like every other client error.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Query parameters with an envelope-rendering rejection.
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::BadRequest("Invalid query parameters".to_string()))?;
        Ok(QueryParams(value))
    }
}
