//! Authentication middleware
//!
//! Resolves the caller through the injected `AuthProvider` and attaches
//! the resulting `CurrentUser` as a request extension. Authorization
//! (role vs resource/action) happens per handler; this layer only
//! establishes identity.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::error::AppError;

/// Reject unauthenticated requests and inject `CurrentUser` for handlers.
pub async fn require_user(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = state
        .auth
        .current_user(request.headers())
        .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

    tracing::debug!(user_id = %user.id, role = %user.role, "Authenticated request");
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
