//! Service boundary for the dealership data layer
//!
//! The real data-access layer (ORM/database) is an external collaborator.
//! Handlers only see the `DealershipService` trait and its closed
//! `ServiceError` kinds, so HTTP status mapping never depends on parsing
//! free-form error text. `ServiceError::classify` keeps the old substring
//! table alive for legacy callers that still hand us unstructured strings.

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    CreateCustomerRequest, CreateInvoiceRequest, CreateVehicleRequest, Customer, Invoice,
    UpdateCustomerRequest, UpdateInvoiceRequest, UpdateVehicleRequest, Vehicle, VehicleFilter,
};

/// Error kinds a service implementation may report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The addressed entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// Duplicate key or delete-protection violation
    #[error("{0}")]
    Conflict(String),

    /// Anything else (infrastructure faults, bugs)
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    /// Classify a legacy free-text error message by its marker phrases.
    ///
    /// Compatibility shim for callers predating the structured error kinds:
    /// the substring table ("not found", "already exists", "Cannot delete")
    /// is the documented contract of the old service layer. Matching is
    /// case-sensitive, as the original markers were.
    pub fn classify(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.contains("not found") {
            ServiceError::NotFound(message)
        } else if message.contains("already exists") || message.contains("Cannot delete") {
            ServiceError::Conflict(message)
        } else {
            ServiceError::Internal(message)
        }
    }
}

/// Result type alias for service calls
pub type ServiceResult<T> = Result<T, ServiceError>;

/// One page of a listing plus the unpaged total.
#[derive(Debug, Clone)]
pub struct PageOf<T> {
    pub items: Vec<T>,
    pub total: i64,
}

/// Data-access operations the HTTP layer depends on.
///
/// Implementations own persistence entirely; this crate ships an in-memory
/// one (`memory::InMemoryDealership`) for development and tests.
#[async_trait]
pub trait DealershipService: Send + Sync {
    async fn list_vehicles(
        &self,
        filter: &VehicleFilter,
        page: i64,
        limit: i64,
    ) -> ServiceResult<PageOf<Vehicle>>;
    async fn create_vehicle(&self, request: CreateVehicleRequest) -> ServiceResult<Vehicle>;
    async fn get_vehicle(&self, id: &str) -> ServiceResult<Vehicle>;
    async fn update_vehicle(
        &self,
        id: &str,
        request: UpdateVehicleRequest,
    ) -> ServiceResult<Vehicle>;
    async fn delete_vehicle(&self, id: &str) -> ServiceResult<()>;

    async fn list_invoices(&self, page: i64, limit: i64) -> ServiceResult<PageOf<Invoice>>;
    async fn create_invoice(&self, request: CreateInvoiceRequest) -> ServiceResult<Invoice>;
    async fn get_invoice(&self, id: &str) -> ServiceResult<Invoice>;
    async fn update_invoice(
        &self,
        id: &str,
        request: UpdateInvoiceRequest,
    ) -> ServiceResult<Invoice>;
    async fn delete_invoice(&self, id: &str) -> ServiceResult<()>;

    async fn list_customers(&self, page: i64, limit: i64) -> ServiceResult<PageOf<Customer>>;
    async fn create_customer(&self, request: CreateCustomerRequest) -> ServiceResult<Customer>;
    async fn get_customer(&self, id: &str) -> ServiceResult<Customer>;
    async fn update_customer(
        &self,
        id: &str,
        request: UpdateCustomerRequest,
    ) -> ServiceResult<Customer>;
    async fn delete_customer(&self, id: &str) -> ServiceResult<()>;
}
