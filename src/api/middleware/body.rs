//! Untyped JSON body extraction
//!
//! Validation runs over the raw `serde_json::Value` so every violation in
//! a payload can be collected before anything is deserialized into typed
//! request structs. This extractor only guards the two pre-validation
//! failure modes: empty body and malformed JSON.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde_json::Value;

use crate::error::AppError;

/// Raw JSON request body.
#[derive(Debug)]
pub struct JsonPayload(pub Value);

impl<S> FromRequest<S> for JsonPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| AppError::BadRequest("Failed to read request body".to_string()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(AppError::BadRequest("Request body is required".to_string()));
        }

        let value = serde_json::from_slice(&bytes)
            .map_err(|_| AppError::BadRequest("Invalid JSON in request body".to_string()))?;

        Ok(JsonPayload(value))
    }
}
