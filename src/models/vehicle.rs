//! Vehicle model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Currency;

/// Every status a vehicle can carry, in lifecycle order: auction purchase
/// through import, reconditioning, sale and delivery. Serialized form is
/// the snake_case name.
pub const VEHICLE_STATUSES: &[&str] = &[
    "purchased",
    "payment_pending",
    "in_transit",
    "at_port",
    "customs_clearance",
    "received",
    "in_workshop",
    "awaiting_parts",
    "under_repair",
    "detailing",
    "photography",
    "ready_for_sale",
    "listed",
    "reserved",
    "sold",
    "delivered",
    "archived",
];

/// Vehicle lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    #[default]
    Purchased,
    PaymentPending,
    InTransit,
    AtPort,
    CustomsClearance,
    Received,
    InWorkshop,
    AwaitingParts,
    UnderRepair,
    Detailing,
    Photography,
    ReadyForSale,
    Listed,
    Reserved,
    Sold,
    Delivered,
    Archived,
}

impl VehicleStatus {
    /// Parse the snake_case wire form; None for anything outside the enum.
    pub fn parse(value: &str) -> Option<Self> {
        serde_json::from_value(serde_json::Value::String(value.to_string())).ok()
    }
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = serde_json::to_value(self)
            .ok()
            .and_then(|v| v.as_str().map(str::to_owned))
            .unwrap_or_default();
        write!(f, "{}", s)
    }
}

/// Reported auction damage severity.
pub const DAMAGE_SEVERITIES: &[&str] = &["none", "minor", "moderate", "severe"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageSeverity {
    None,
    Minor,
    Moderate,
    Severe,
}

/// One entry in a vehicle's append-only status history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusChange {
    pub status: VehicleStatus,
    pub changed_at: DateTime<Utc>,
}

/// A vehicle in inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub vin: String,
    pub year: i32,
    pub make: String,
    pub model: String,
    /// Auction house the vehicle was purchased from
    pub auction_house: String,
    pub purchase_price: f64,
    pub currency: Currency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub damage_severity: Option<DamageSeverity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mileage: Option<i64>,
    pub current_status: VehicleStatus,
    /// Whether the vehicle appears on the public storefront
    pub is_public: bool,
    /// Append-only log of status transitions, oldest first
    pub status_history: Vec<StatusChange>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Typed form of a validated create-vehicle payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVehicleRequest {
    pub vin: String,
    pub year: i32,
    pub make: String,
    pub model: String,
    pub auction_house: String,
    pub purchase_price: f64,
    pub currency: Option<Currency>,
    pub damage_severity: Option<DamageSeverity>,
    pub color: Option<String>,
    pub mileage: Option<i64>,
    pub is_public: Option<bool>,
}

/// Typed form of a validated update-vehicle payload. Every field optional;
/// absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateVehicleRequest {
    pub vin: Option<String>,
    pub year: Option<i32>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub auction_house: Option<String>,
    pub purchase_price: Option<f64>,
    pub currency: Option<Currency>,
    pub damage_severity: Option<DamageSeverity>,
    pub color: Option<String>,
    pub mileage: Option<i64>,
    pub current_status: Option<VehicleStatus>,
    pub is_public: Option<bool>,
}

/// Storefront/back-office list filters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleFilter {
    /// Substring match against VIN, make and model
    pub search: Option<String>,
    pub status: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub auction_house: Option<String>,
    pub is_public: Option<bool>,
}
