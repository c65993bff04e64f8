//! Customer payload validators

use serde_json::{Map, Value};

use super::{as_object, fields, optional, required, ValidationReport};

fn check_full_name(value: &Value, report: &mut ValidationReport) {
    match value.as_str() {
        Some(name) if name.trim().chars().count() >= 2 => {}
        Some(_) => report.fail("full_name must be at least 2 characters"),
        None => report.fail("full_name must be a string"),
    }
}

fn check_email(value: &Value, report: &mut ValidationReport) {
    match value.as_str() {
        Some(email) if fields::is_valid_email(email) => {}
        _ => report.fail("email format is invalid"),
    }
}

fn check_phone(value: &Value, report: &mut ValidationReport) {
    match value.as_str() {
        Some(phone) if fields::is_valid_phone(phone) => {}
        _ => report.fail("phone format is invalid"),
    }
}

fn check_preferred_language(value: &Value, report: &mut ValidationReport) {
    match value.as_str() {
        Some(code) if fields::is_valid_language_code(code) => {}
        _ => report.fail(format!(
            "preferred_language must be one of {}",
            fields::LANGUAGE_CODES.join(", ")
        )),
    }
}

fn check_date_of_birth(value: &Value, report: &mut ValidationReport) {
    match value.as_str() {
        Some(date) if fields::is_valid_date_only(date) => {}
        _ => report.fail("date_of_birth must be a valid YYYY-MM-DD date"),
    }
}

/// Optional-field rules shared by create and update payloads.
fn check_optional_fields(map: &Map<String, Value>, report: &mut ValidationReport) {
    if let Some(value) = optional(map, "email") {
        check_email(value, report);
    }
    if let Some(value) = optional(map, "phone") {
        check_phone(value, report);
    }
    if let Some(value) = optional(map, "preferred_language") {
        check_preferred_language(value, report);
    }
    if let Some(value) = optional(map, "date_of_birth") {
        check_date_of_birth(value, report);
    }
    if let Some(value) = optional(map, "marketing_consent") {
        if !value.is_boolean() {
            report.fail("marketing_consent must be a boolean");
        }
    }
    for key in ["address", "city", "country"] {
        if let Some(value) = optional(map, key) {
            if !value.is_string() {
                report.fail(format!("{} must be a string", key));
            }
        }
    }
}

/// Validate a create-customer payload: `full_name` is mandatory, every
/// other field is format-checked when present.
pub fn validate_create_customer(payload: &Value) -> ValidationReport {
    let mut report = ValidationReport::new();
    let Some(map) = as_object(payload, &mut report) else {
        return report;
    };

    if let Some(value) = required(map, "full_name", &mut report) {
        check_full_name(value, &mut report);
    }
    check_optional_fields(map, &mut report);

    report
}

/// Validate an update-customer payload. All fields optional.
pub fn validate_update_customer(payload: &Value) -> ValidationReport {
    let mut report = ValidationReport::new();
    let Some(map) = as_object(payload, &mut report) else {
        return report;
    };

    if let Some(value) = optional(map, "full_name") {
        check_full_name(value, &mut report);
    }
    check_optional_fields(map, &mut report);

    report
}
