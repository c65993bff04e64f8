//! API module for the dealership backend
//!
//! This module contains all HTTP handlers, middleware, and routing.

pub mod handlers;
pub mod middleware;
pub mod pagination;
pub mod response;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::auth::{Action, AuthProvider, CurrentUser, Resource};
use crate::config::Settings;
use crate::error::AppError;
use crate::service::DealershipService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn DealershipService>,
    pub auth: Arc<dyn AuthProvider>,
    pub settings: Settings,
}

impl AppState {
    pub fn new(
        service: Arc<dyn DealershipService>,
        auth: Arc<dyn AuthProvider>,
        settings: Settings,
    ) -> Self {
        Self {
            service,
            auth,
            settings,
        }
    }

    /// Check the caller's role against the permission matrix.
    pub fn authorize(
        &self,
        user: &CurrentUser,
        resource: Resource,
        action: Action,
    ) -> Result<(), AppError> {
        if self.auth.has_permission(user.role, resource, action) {
            Ok(())
        } else {
            tracing::warn!(
                user_id = %user.id,
                role = %user.role,
                ?resource,
                ?action,
                "Permission denied"
            );
            Err(AppError::Forbidden(
                "Insufficient permissions for this operation".to_string(),
            ))
        }
    }
}

/// Build the main application router
///
/// CORS is configurable based on environment:
/// - Development: Allow any origin (for local testing)
/// - Production: Restrict to mirrored origins with an explicit header/method list
pub fn router(state: AppState) -> Router {
    use crate::config::Environment;

    let cors = if state.settings.server.environment == Environment::Production {
        tracing::info!("Production mode: Using restrictive CORS policy");
        CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::AUTHORIZATION,
                axum::http::header::CONTENT_TYPE,
                axum::http::header::HeaderName::from_static("x-request-id"),
            ])
            .allow_origin(tower_http::cors::AllowOrigin::mirror_request())
    } else {
        tracing::info!("Development mode: Using permissive CORS policy");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    #[allow(deprecated)] // TimeoutLayer::new is deprecated but with_status_code is not yet stable
    let timeout_layer = TimeoutLayer::new(Duration::from_secs(30));

    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(timeout_layer)
        .layer(cors);

    Router::new()
        // Health endpoints (public - no auth required)
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .nest("/api/v1", api_v1_router(state.clone()))
        .layer(middleware)
        .with_state(state)
}

/// API v1 routes - split into public storefront and protected back office
fn api_v1_router(state: AppState) -> Router<AppState> {
    // Public routes: the storefront browses vehicles without credentials.
    // Handlers restrict anonymous callers to public inventory.
    let public_routes = Router::new()
        .route("/vehicles", get(handlers::vehicles::list))
        .route("/vehicles/{id}", get(handlers::vehicles::get));

    // Protected routes (require bearer token authentication)
    // Auth middleware is applied via route_layer which runs AFTER state extraction
    let protected_routes = Router::new()
        // Vehicles
        .route("/vehicles", post(handlers::vehicles::create))
        .route("/vehicles/{id}", put(handlers::vehicles::update))
        .route("/vehicles/{id}", delete(handlers::vehicles::delete))
        // Invoices
        .route("/invoices", get(handlers::invoices::list))
        .route("/invoices", post(handlers::invoices::create))
        .route("/invoices/{id}", get(handlers::invoices::get))
        .route("/invoices/{id}", put(handlers::invoices::update))
        .route("/invoices/{id}", delete(handlers::invoices::delete))
        // Customers
        .route("/customers", get(handlers::customers::list))
        .route("/customers", post(handlers::customers::create))
        .route("/customers/{id}", get(handlers::customers::get))
        .route("/customers/{id}", put(handlers::customers::update))
        .route("/customers/{id}", delete(handlers::customers::delete))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::auth::require_user,
        ));

    public_routes.merge(protected_routes)
}
