//! Customer model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A customer record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Preferred contact language (ISO 639-1 subset, see LANGUAGE_CODES)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    pub marketing_consent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Typed form of a validated create-customer payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCustomerRequest {
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub preferred_language: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub marketing_consent: Option<bool>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

/// Typed form of a validated update-customer payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCustomerRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub preferred_language: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub marketing_consent: Option<bool>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}
