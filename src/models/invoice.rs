//! Invoice model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::Currency;

/// Invoice statuses, serialized snake_case.
pub const INVOICE_STATUSES: &[&str] = &[
    "draft",
    "sent",
    "viewed",
    "partially_paid",
    "fully_paid",
    "overdue",
    "cancelled",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Sent,
    Viewed,
    PartiallyPaid,
    FullyPaid,
    Overdue,
    Cancelled,
}

impl InvoiceStatus {
    pub fn parse(value: &str) -> Option<Self> {
        serde_json::from_value(serde_json::Value::String(value.to_string())).ok()
    }
}

/// One billed line on an invoice.
///
/// Invariant (checked by validation, not here): `quantity * unit_price`
/// agrees with `total` to within 0.01 after 2-decimal rounding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_rate: Option<f64>,
}

/// A customer invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub invoice_number: String,
    pub customer_id: String,
    pub line_items: Vec<LineItem>,
    pub subtotal: f64,
    pub vat_rate: f64,
    pub vat_amount: f64,
    pub total_amount: f64,
    pub currency: Currency,
    pub status: InvoiceStatus,
    pub due_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Typed form of a validated create-invoice payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvoiceRequest {
    pub customer_id: String,
    pub line_items: Vec<LineItem>,
    pub subtotal: f64,
    pub vat_rate: f64,
    pub vat_amount: f64,
    pub total_amount: f64,
    pub currency: Currency,
    pub due_date: NaiveDate,
    pub status: Option<InvoiceStatus>,
    pub notes: Option<String>,
}

/// Typed form of a validated update-invoice payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateInvoiceRequest {
    pub line_items: Option<Vec<LineItem>>,
    pub subtotal: Option<f64>,
    pub vat_rate: Option<f64>,
    pub vat_amount: Option<f64>,
    pub total_amount: Option<f64>,
    pub currency: Option<Currency>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<InvoiceStatus>,
    pub notes: Option<String>,
}
