//! Single-field format validators
//!
//! Every function here is total: any input yields a plain bool, nothing
//! panics. Entity validators combine these with their own required/optional
//! handling and error messages.

use chrono::{Datelike, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;

/// Customer-facing languages the dealership supports.
pub const LANGUAGE_CODES: &[&str] = &["en", "ar", "fr", "es", "de", "it", "ru", "hi", "ur"];

/// Earliest model year accepted for inventory.
pub const MIN_VEHICLE_YEAR: i64 = 1900;

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[\d\s\-()]+$").unwrap();
    static ref DATE_ONLY_REGEX: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// Phone numbers: optional leading `+`, then digits with common separators,
/// and at least 8 actual digits.
pub fn is_valid_phone(value: &str) -> bool {
    if !PHONE_REGEX.is_match(value) {
        return false;
    }
    value.chars().filter(|c| c.is_ascii_digit()).count() >= 8
}

pub fn is_valid_language_code(value: &str) -> bool {
    LANGUAGE_CODES.contains(&value)
}

/// `YYYY-MM-DD` that also names a real calendar date.
pub fn is_valid_date_only(value: &str) -> bool {
    DATE_ONLY_REGEX.is_match(value) && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

pub fn is_valid_currency(value: &str) -> bool {
    crate::models::CURRENCIES.contains(&value)
}

/// VINs vary by market and era; anything from 10 to 17 characters is
/// accepted, stricter checksum validation is left to the service layer.
pub fn is_valid_vin(value: &str) -> bool {
    let len = value.chars().count();
    (10..=17).contains(&len)
}

/// Model year range. Upper bound is next year: auction lots routinely carry
/// next-model-year vehicles, anything beyond that is a typo.
pub fn is_valid_year(year: i64) -> bool {
    year >= MIN_VEHICLE_YEAR && year <= i64::from(Utc::now().year()) + 1
}

pub fn is_valid_damage_severity(value: &str) -> bool {
    crate::models::DAMAGE_SEVERITIES.contains(&value)
}
