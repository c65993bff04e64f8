//! In-memory `DealershipService` implementation
//!
//! Backs local development and the integration tests. Enforces the same
//! conflict rules a database-backed implementation would: VIN uniqueness,
//! existence checks on lookups and foreign keys, and delete protection for
//! sold vehicles and customers with invoices.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{DealershipService, PageOf, ServiceError, ServiceResult};
use crate::models::{
    CreateCustomerRequest, CreateInvoiceRequest, CreateVehicleRequest, Customer, Invoice,
    InvoiceStatus, StatusChange, UpdateCustomerRequest, UpdateInvoiceRequest,
    UpdateVehicleRequest, Vehicle, VehicleFilter, VehicleStatus,
};

#[derive(Default)]
struct Store {
    vehicles: HashMap<String, Vehicle>,
    invoices: HashMap<String, Invoice>,
    customers: HashMap<String, Customer>,
    invoice_seq: u64,
}

/// Hash-map backed service. All state lives behind one mutex; no lock is
/// held across an await point.
#[derive(Default)]
pub struct InMemoryDealership {
    store: Mutex<Store>,
}

impl InMemoryDealership {
    pub fn new() -> Self {
        Self::default()
    }
}

fn paginate<T: Clone>(items: &[&T], page: i64, limit: i64) -> PageOf<T> {
    let total = items.len() as i64;
    // Saturating: page and limit come from the wire, and an absurd page
    // must yield an empty page, not an arithmetic panic under the lock.
    let start = page.saturating_sub(1).saturating_mul(limit).max(0) as usize;
    let items = items
        .iter()
        .skip(start)
        .take(limit as usize)
        .map(|item| (*item).clone())
        .collect();
    PageOf { items, total }
}

fn matches_filter(vehicle: &Vehicle, filter: &VehicleFilter) -> bool {
    if let Some(ref search) = filter.search {
        let needle = search.to_lowercase();
        let haystack = format!("{} {} {}", vehicle.vin, vehicle.make, vehicle.model);
        if !haystack.to_lowercase().contains(&needle) {
            return false;
        }
    }
    if let Some(ref status) = filter.status {
        if vehicle.current_status.to_string() != *status {
            return false;
        }
    }
    if let Some(ref make) = filter.make {
        if !vehicle.make.eq_ignore_ascii_case(make) {
            return false;
        }
    }
    if let Some(ref model) = filter.model {
        if !vehicle.model.eq_ignore_ascii_case(model) {
            return false;
        }
    }
    if let Some(year_min) = filter.year_min {
        if vehicle.year < year_min {
            return false;
        }
    }
    if let Some(year_max) = filter.year_max {
        if vehicle.year > year_max {
            return false;
        }
    }
    if let Some(price_min) = filter.price_min {
        if vehicle.purchase_price < price_min {
            return false;
        }
    }
    if let Some(price_max) = filter.price_max {
        if vehicle.purchase_price > price_max {
            return false;
        }
    }
    if let Some(ref auction_house) = filter.auction_house {
        if !vehicle.auction_house.eq_ignore_ascii_case(auction_house) {
            return false;
        }
    }
    if let Some(is_public) = filter.is_public {
        if vehicle.is_public != is_public {
            return false;
        }
    }
    true
}

#[async_trait]
impl DealershipService for InMemoryDealership {
    async fn list_vehicles(
        &self,
        filter: &VehicleFilter,
        page: i64,
        limit: i64,
    ) -> ServiceResult<PageOf<Vehicle>> {
        let store = self.store.lock().unwrap();
        let mut matched: Vec<&Vehicle> = store
            .vehicles
            .values()
            .filter(|v| matches_filter(v, filter))
            .collect();
        // Stable listing order: newest first, id as tiebreaker
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(paginate(&matched, page, limit))
    }

    async fn create_vehicle(&self, request: CreateVehicleRequest) -> ServiceResult<Vehicle> {
        let mut store = self.store.lock().unwrap();

        if store.vehicles.values().any(|v| v.vin == request.vin) {
            return Err(ServiceError::Conflict(format!(
                "A vehicle with VIN {} already exists",
                request.vin
            )));
        }

        let now = Utc::now();
        let status = VehicleStatus::default();
        let vehicle = Vehicle {
            id: Uuid::new_v4().to_string(),
            vin: request.vin,
            year: request.year,
            make: request.make,
            model: request.model,
            auction_house: request.auction_house,
            purchase_price: request.purchase_price,
            currency: request.currency.unwrap_or_default(),
            damage_severity: request.damage_severity,
            color: request.color,
            mileage: request.mileage,
            current_status: status,
            is_public: request.is_public.unwrap_or(false),
            status_history: vec![StatusChange {
                status,
                changed_at: now,
            }],
            created_at: now,
            updated_at: now,
        };

        store.vehicles.insert(vehicle.id.clone(), vehicle.clone());
        Ok(vehicle)
    }

    async fn get_vehicle(&self, id: &str) -> ServiceResult<Vehicle> {
        let store = self.store.lock().unwrap();
        store
            .vehicles
            .get(id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("Vehicle {} not found", id)))
    }

    async fn update_vehicle(
        &self,
        id: &str,
        request: UpdateVehicleRequest,
    ) -> ServiceResult<Vehicle> {
        let mut store = self.store.lock().unwrap();

        if let Some(ref vin) = request.vin {
            if store
                .vehicles
                .values()
                .any(|v| v.vin == *vin && v.id != id)
            {
                return Err(ServiceError::Conflict(format!(
                    "A vehicle with VIN {} already exists",
                    vin
                )));
            }
        }

        let vehicle = store
            .vehicles
            .get_mut(id)
            .ok_or_else(|| ServiceError::NotFound(format!("Vehicle {} not found", id)))?;

        if let Some(vin) = request.vin {
            vehicle.vin = vin;
        }
        if let Some(year) = request.year {
            vehicle.year = year;
        }
        if let Some(make) = request.make {
            vehicle.make = make;
        }
        if let Some(model) = request.model {
            vehicle.model = model;
        }
        if let Some(auction_house) = request.auction_house {
            vehicle.auction_house = auction_house;
        }
        if let Some(purchase_price) = request.purchase_price {
            vehicle.purchase_price = purchase_price;
        }
        if let Some(currency) = request.currency {
            vehicle.currency = currency;
        }
        if let Some(damage_severity) = request.damage_severity {
            vehicle.damage_severity = Some(damage_severity);
        }
        if let Some(color) = request.color {
            vehicle.color = Some(color);
        }
        if let Some(mileage) = request.mileage {
            vehicle.mileage = Some(mileage);
        }
        if let Some(is_public) = request.is_public {
            vehicle.is_public = is_public;
        }
        if let Some(status) = request.current_status {
            if status != vehicle.current_status {
                vehicle.current_status = status;
                vehicle.status_history.push(StatusChange {
                    status,
                    changed_at: Utc::now(),
                });
            }
        }
        vehicle.updated_at = Utc::now();

        Ok(vehicle.clone())
    }

    async fn delete_vehicle(&self, id: &str) -> ServiceResult<()> {
        let mut store = self.store.lock().unwrap();

        let vehicle = store
            .vehicles
            .get(id)
            .ok_or_else(|| ServiceError::NotFound(format!("Vehicle {} not found", id)))?;

        if vehicle.current_status == VehicleStatus::Sold
            || vehicle.current_status == VehicleStatus::Delivered
        {
            return Err(ServiceError::Conflict(format!(
                "Cannot delete vehicle {}: vehicle has been sold",
                id
            )));
        }

        store.vehicles.remove(id);
        Ok(())
    }

    async fn list_invoices(&self, page: i64, limit: i64) -> ServiceResult<PageOf<Invoice>> {
        let store = self.store.lock().unwrap();
        let mut invoices: Vec<&Invoice> = store.invoices.values().collect();
        invoices.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(paginate(&invoices, page, limit))
    }

    async fn create_invoice(&self, request: CreateInvoiceRequest) -> ServiceResult<Invoice> {
        let mut store = self.store.lock().unwrap();

        if !store.customers.contains_key(&request.customer_id) {
            return Err(ServiceError::NotFound(format!(
                "Customer {} not found",
                request.customer_id
            )));
        }

        store.invoice_seq += 1;
        let now = Utc::now();
        let invoice = Invoice {
            id: Uuid::new_v4().to_string(),
            invoice_number: format!("INV-{:05}", store.invoice_seq),
            customer_id: request.customer_id,
            line_items: request.line_items,
            subtotal: request.subtotal,
            vat_rate: request.vat_rate,
            vat_amount: request.vat_amount,
            total_amount: request.total_amount,
            currency: request.currency,
            status: request.status.unwrap_or_default(),
            due_date: request.due_date,
            notes: request.notes,
            created_at: now,
            updated_at: now,
        };

        store.invoices.insert(invoice.id.clone(), invoice.clone());
        Ok(invoice)
    }

    async fn get_invoice(&self, id: &str) -> ServiceResult<Invoice> {
        let store = self.store.lock().unwrap();
        store
            .invoices
            .get(id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("Invoice {} not found", id)))
    }

    async fn update_invoice(
        &self,
        id: &str,
        request: UpdateInvoiceRequest,
    ) -> ServiceResult<Invoice> {
        let mut store = self.store.lock().unwrap();
        let invoice = store
            .invoices
            .get_mut(id)
            .ok_or_else(|| ServiceError::NotFound(format!("Invoice {} not found", id)))?;

        if let Some(line_items) = request.line_items {
            invoice.line_items = line_items;
        }
        if let Some(subtotal) = request.subtotal {
            invoice.subtotal = subtotal;
        }
        if let Some(vat_rate) = request.vat_rate {
            invoice.vat_rate = vat_rate;
        }
        if let Some(vat_amount) = request.vat_amount {
            invoice.vat_amount = vat_amount;
        }
        if let Some(total_amount) = request.total_amount {
            invoice.total_amount = total_amount;
        }
        if let Some(currency) = request.currency {
            invoice.currency = currency;
        }
        if let Some(due_date) = request.due_date {
            invoice.due_date = due_date;
        }
        if let Some(status) = request.status {
            invoice.status = status;
        }
        if let Some(notes) = request.notes {
            invoice.notes = Some(notes);
        }
        invoice.updated_at = Utc::now();

        Ok(invoice.clone())
    }

    async fn delete_invoice(&self, id: &str) -> ServiceResult<()> {
        let mut store = self.store.lock().unwrap();

        let invoice = store
            .invoices
            .get(id)
            .ok_or_else(|| ServiceError::NotFound(format!("Invoice {} not found", id)))?;

        if invoice.status == InvoiceStatus::FullyPaid
            || invoice.status == InvoiceStatus::PartiallyPaid
        {
            return Err(ServiceError::Conflict(format!(
                "Cannot delete invoice {}: payments have been recorded",
                id
            )));
        }

        store.invoices.remove(id);
        Ok(())
    }

    async fn list_customers(&self, page: i64, limit: i64) -> ServiceResult<PageOf<Customer>> {
        let store = self.store.lock().unwrap();
        let mut customers: Vec<&Customer> = store.customers.values().collect();
        customers.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(paginate(&customers, page, limit))
    }

    async fn create_customer(&self, request: CreateCustomerRequest) -> ServiceResult<Customer> {
        let mut store = self.store.lock().unwrap();

        if let Some(ref email) = request.email {
            if store
                .customers
                .values()
                .any(|c| c.email.as_deref() == Some(email.as_str()))
            {
                return Err(ServiceError::Conflict(format!(
                    "A customer with email {} already exists",
                    email
                )));
            }
        }

        let now = Utc::now();
        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            full_name: request.full_name,
            email: request.email,
            phone: request.phone,
            preferred_language: request.preferred_language,
            date_of_birth: request.date_of_birth,
            marketing_consent: request.marketing_consent.unwrap_or(false),
            address: request.address,
            city: request.city,
            country: request.country,
            created_at: now,
            updated_at: now,
        };

        store.customers.insert(customer.id.clone(), customer.clone());
        Ok(customer)
    }

    async fn get_customer(&self, id: &str) -> ServiceResult<Customer> {
        let store = self.store.lock().unwrap();
        store
            .customers
            .get(id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("Customer {} not found", id)))
    }

    async fn update_customer(
        &self,
        id: &str,
        request: UpdateCustomerRequest,
    ) -> ServiceResult<Customer> {
        let mut store = self.store.lock().unwrap();
        let customer = store
            .customers
            .get_mut(id)
            .ok_or_else(|| ServiceError::NotFound(format!("Customer {} not found", id)))?;

        if let Some(full_name) = request.full_name {
            customer.full_name = full_name;
        }
        if let Some(email) = request.email {
            customer.email = Some(email);
        }
        if let Some(phone) = request.phone {
            customer.phone = Some(phone);
        }
        if let Some(preferred_language) = request.preferred_language {
            customer.preferred_language = Some(preferred_language);
        }
        if let Some(date_of_birth) = request.date_of_birth {
            customer.date_of_birth = Some(date_of_birth);
        }
        if let Some(marketing_consent) = request.marketing_consent {
            customer.marketing_consent = marketing_consent;
        }
        if let Some(address) = request.address {
            customer.address = Some(address);
        }
        if let Some(city) = request.city {
            customer.city = Some(city);
        }
        if let Some(country) = request.country {
            customer.country = Some(country);
        }
        customer.updated_at = Utc::now();

        Ok(customer.clone())
    }

    async fn delete_customer(&self, id: &str) -> ServiceResult<()> {
        let mut store = self.store.lock().unwrap();

        if !store.customers.contains_key(id) {
            return Err(ServiceError::NotFound(format!("Customer {} not found", id)));
        }

        let invoice_count = store
            .invoices
            .values()
            .filter(|invoice| invoice.customer_id == id)
            .count();
        if invoice_count > 0 {
            return Err(ServiceError::Conflict(format!(
                "Cannot delete customer {} with {} invoices. Delete or reassign the invoices first.",
                id, invoice_count
            )));
        }

        store.customers.remove(id);
        Ok(())
    }
}
