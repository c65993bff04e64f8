//! Common test utilities and fixtures

// Test utilities may not all be used in every test
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, Response, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use lotkeeper_backend::api::{self, AppState};
use lotkeeper_backend::auth::TokenTableAuth;
use lotkeeper_backend::config::Settings;
use lotkeeper_backend::models::{
    CreateCustomerRequest, CreateInvoiceRequest, CreateVehicleRequest, Customer, Invoice,
    UpdateCustomerRequest, UpdateInvoiceRequest, UpdateVehicleRequest, Vehicle, VehicleFilter,
};
use lotkeeper_backend::service::memory::InMemoryDealership;
use lotkeeper_backend::service::{
    DealershipService, PageOf, ServiceError, ServiceResult,
};

pub const ADMIN_TOKEN: &str = "admin-token";
pub const MANAGER_TOKEN: &str = "manager-token";
pub const CLERK_TOKEN: &str = "clerk-token";
pub const VIEWER_TOKEN: &str = "viewer-token";

/// Build an app backed by the in-memory service and the test token table.
pub fn app() -> Router {
    let settings = Settings::load_for_testing();
    let state = AppState::new(
        Arc::new(InMemoryDealership::new()),
        Arc::new(TokenTableAuth::from_settings(&settings)),
        settings,
    );
    api::router(state)
}

/// Build an app whose service fails every call with a credential-laden
/// internal error, for exercising the 500 sanitization path.
pub fn failing_app() -> Router {
    let settings = Settings::load_for_testing();
    let state = AppState::new(
        Arc::new(FailingService),
        Arc::new(TokenTableAuth::from_settings(&settings)),
        settings,
    );
    api::router(state)
}

/// Service stub where every operation reports an infrastructure fault
/// containing things that must never reach a client.
pub struct FailingService;

impl FailingService {
    fn error<T>() -> ServiceResult<T> {
        Err(ServiceError::Internal(
            r#"Database error: connection string "user:password@host" failed"#.to_string(),
        ))
    }
}

#[async_trait]
impl DealershipService for FailingService {
    async fn list_vehicles(
        &self,
        _filter: &VehicleFilter,
        _page: i64,
        _limit: i64,
    ) -> ServiceResult<PageOf<Vehicle>> {
        Self::error()
    }
    async fn create_vehicle(&self, _request: CreateVehicleRequest) -> ServiceResult<Vehicle> {
        Self::error()
    }
    async fn get_vehicle(&self, _id: &str) -> ServiceResult<Vehicle> {
        Self::error()
    }
    async fn update_vehicle(
        &self,
        _id: &str,
        _request: UpdateVehicleRequest,
    ) -> ServiceResult<Vehicle> {
        Self::error()
    }
    async fn delete_vehicle(&self, _id: &str) -> ServiceResult<()> {
        Self::error()
    }

    async fn list_invoices(&self, _page: i64, _limit: i64) -> ServiceResult<PageOf<Invoice>> {
        Self::error()
    }
    async fn create_invoice(&self, _request: CreateInvoiceRequest) -> ServiceResult<Invoice> {
        Self::error()
    }
    async fn get_invoice(&self, _id: &str) -> ServiceResult<Invoice> {
        Self::error()
    }
    async fn update_invoice(
        &self,
        _id: &str,
        _request: UpdateInvoiceRequest,
    ) -> ServiceResult<Invoice> {
        Self::error()
    }
    async fn delete_invoice(&self, _id: &str) -> ServiceResult<()> {
        Self::error()
    }

    async fn list_customers(&self, _page: i64, _limit: i64) -> ServiceResult<PageOf<Customer>> {
        Self::error()
    }
    async fn create_customer(&self, _request: CreateCustomerRequest) -> ServiceResult<Customer> {
        Self::error()
    }
    async fn get_customer(&self, _id: &str) -> ServiceResult<Customer> {
        Self::error()
    }
    async fn update_customer(
        &self,
        _id: &str,
        _request: UpdateCustomerRequest,
    ) -> ServiceResult<Customer> {
        Self::error()
    }
    async fn delete_customer(&self, _id: &str) -> ServiceResult<()> {
        Self::error()
    }
}

/// Send one request through the router. `token` adds a bearer header,
/// `body` is serialized as JSON.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let raw = body.map(|v| v.to_string());
    send_raw(app, method, uri, token, raw).await
}

/// Like `send` but with a raw body string, for malformed-payload tests.
pub async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<String>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = builder
        .body(body.map(Body::from).unwrap_or_else(Body::empty))
        .expect("failed to build request");

    app.clone()
        .oneshot(request)
        .await
        .expect("request should not fail at the transport level")
}

/// Read and parse a JSON response body.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Assert status and return the parsed body.
pub async fn expect_status(response: Response<Body>, status: StatusCode) -> Value {
    assert_eq!(response.status(), status, "unexpected status");
    body_json(response).await
}

/// Test fixtures for creating request payloads
pub mod fixtures {
    use serde_json::{json, Value};

    pub fn vehicle(vin: &str) -> Value {
        json!({
            "vin": vin,
            "year": 2021,
            "make": "Honda",
            "model": "Accord",
            "auction_house": "Copart",
            "purchase_price": 15000.0,
            "currency": "AED",
            "is_public": true
        })
    }

    pub fn customer(name: &str) -> Value {
        json!({
            "full_name": name,
            "email": format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            "phone": "+971 50 123 4567",
            "preferred_language": "en"
        })
    }

    pub fn invoice(customer_id: &str) -> Value {
        json!({
            "customer_id": customer_id,
            "line_items": [
                {"description": "Detailing", "quantity": 2.0, "unit_price": 500.0, "total": 1000.0}
            ],
            "subtotal": 1000.0,
            "vat_rate": 5.0,
            "vat_amount": 50.0,
            "total_amount": 1050.0,
            "currency": "AED",
            "due_date": "2026-09-30"
        })
    }
}
