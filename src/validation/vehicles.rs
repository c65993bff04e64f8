//! Vehicle payload validators

use serde_json::Value;

use super::{as_object, fields, integer, number, optional, required, ValidationReport};
use crate::models::{DAMAGE_SEVERITIES, VEHICLE_STATUSES};

fn check_vin(value: &Value, report: &mut ValidationReport) {
    match value.as_str() {
        Some(vin) if fields::is_valid_vin(vin) => {}
        Some(_) => report.fail("vin must be between 10 and 17 characters"),
        None => report.fail("vin must be a string"),
    }
}

fn check_year(value: &Value, report: &mut ValidationReport) {
    match integer(value) {
        Some(year) if fields::is_valid_year(year) => {}
        Some(_) => report.fail("year must be between 1900 and next model year"),
        None => report.fail("year must be an integer"),
    }
}

fn check_non_empty_string(key: &str, value: &Value, report: &mut ValidationReport) {
    match value.as_str() {
        Some(s) if !s.trim().is_empty() => {}
        Some(_) => report.fail(format!("{} must not be empty", key)),
        None => report.fail(format!("{} must be a string", key)),
    }
}

fn check_purchase_price(value: &Value, report: &mut ValidationReport) {
    match number(value) {
        Some(price) if price > 0.0 => {}
        Some(_) => report.fail("purchase_price must be greater than 0"),
        None => report.fail("purchase_price must be a number"),
    }
}

fn check_currency(value: &Value, report: &mut ValidationReport) {
    match value.as_str() {
        Some(code) if fields::is_valid_currency(code) => {}
        _ => report.fail("currency must be one of AED, USD, CAD"),
    }
}

fn check_damage_severity(value: &Value, report: &mut ValidationReport) {
    match value.as_str() {
        Some(severity) if fields::is_valid_damage_severity(severity) => {}
        _ => report.fail(format!(
            "damage_severity must be one of {}",
            DAMAGE_SEVERITIES.join(", ")
        )),
    }
}

fn check_status(value: &Value, report: &mut ValidationReport) {
    match value.as_str() {
        Some(status) if VEHICLE_STATUSES.contains(&status) => {}
        _ => report.fail("current_status is not a valid vehicle status"),
    }
}

fn check_mileage(value: &Value, report: &mut ValidationReport) {
    match integer(value) {
        Some(mileage) if mileage >= 0 => {}
        Some(_) => report.fail("mileage must not be negative"),
        None => report.fail("mileage must be an integer"),
    }
}

fn check_boolean(key: &str, value: &Value, report: &mut ValidationReport) {
    if !value.is_boolean() {
        report.fail(format!("{} must be a boolean", key));
    }
}

/// Shared optional-field rules for both create and update payloads.
fn check_optional_fields(map: &serde_json::Map<String, Value>, report: &mut ValidationReport) {
    if let Some(value) = optional(map, "currency") {
        check_currency(value, report);
    }
    if let Some(value) = optional(map, "damage_severity") {
        check_damage_severity(value, report);
    }
    if let Some(value) = optional(map, "color") {
        check_non_empty_string("color", value, report);
    }
    if let Some(value) = optional(map, "mileage") {
        check_mileage(value, report);
    }
    if let Some(value) = optional(map, "is_public") {
        check_boolean("is_public", value, report);
    }
}

/// Validate a create-vehicle payload. Requires `vin`, `year`, `make`,
/// `model`, `auction_house` and `purchase_price`; optional fields are
/// format-checked when present. All violations are reported.
pub fn validate_create_vehicle(payload: &Value) -> ValidationReport {
    let mut report = ValidationReport::new();
    let Some(map) = as_object(payload, &mut report) else {
        return report;
    };

    if let Some(value) = required(map, "vin", &mut report) {
        check_vin(value, &mut report);
    }
    if let Some(value) = required(map, "year", &mut report) {
        check_year(value, &mut report);
    }
    if let Some(value) = required(map, "make", &mut report) {
        check_non_empty_string("make", value, &mut report);
    }
    if let Some(value) = required(map, "model", &mut report) {
        check_non_empty_string("model", value, &mut report);
    }
    if let Some(value) = required(map, "auction_house", &mut report) {
        check_non_empty_string("auction_house", value, &mut report);
    }
    if let Some(value) = required(map, "purchase_price", &mut report) {
        check_purchase_price(value, &mut report);
    }

    check_optional_fields(map, &mut report);

    report
}

/// Validate an update-vehicle payload. No field is mandatory; every field
/// present is held to the same rules as on create, and `current_status`
/// must name a known vehicle status.
pub fn validate_update_vehicle(payload: &Value) -> ValidationReport {
    let mut report = ValidationReport::new();
    let Some(map) = as_object(payload, &mut report) else {
        return report;
    };

    if let Some(value) = optional(map, "vin") {
        check_vin(value, &mut report);
    }
    if let Some(value) = optional(map, "year") {
        check_year(value, &mut report);
    }
    for key in ["make", "model", "auction_house"] {
        if let Some(value) = optional(map, key) {
            check_non_empty_string(key, value, &mut report);
        }
    }
    if let Some(value) = optional(map, "purchase_price") {
        check_purchase_price(value, &mut report);
    }
    if let Some(value) = optional(map, "current_status") {
        check_status(value, &mut report);
    }

    check_optional_fields(map, &mut report);

    report
}
