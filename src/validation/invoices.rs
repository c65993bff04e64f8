//! Invoice payload validators
//!
//! Line items are validated individually with a "Line item N:" prefix
//! (1-based), then the invoice-level VAT arithmetic is checked whenever the
//! full amount quartet is present and numeric.

use serde_json::Value;

use super::{as_object, consistency, fields, number, optional, required, ValidationReport};
use crate::models::INVOICE_STATUSES;

fn check_line_item(index: usize, item: &Value, report: &mut ValidationReport) {
    let prefix = format!("Line item {}", index + 1);

    let Some(map) = item.as_object() else {
        report.fail(format!("{}: must be an object", prefix));
        return;
    };

    match map.get("description").and_then(Value::as_str) {
        Some(desc) if !desc.trim().is_empty() => {}
        _ => report.fail(format!("{}: description is required", prefix)),
    }

    let quantity = map.get("quantity").and_then(number);
    let unit_price = map.get("unit_price").and_then(number);
    let total = map.get("total").and_then(number);

    match quantity {
        Some(q) if q > 0.0 => {}
        Some(_) => report.fail(format!("{}: quantity must be greater than 0", prefix)),
        None => report.fail(format!("{}: quantity must be a number", prefix)),
    }
    match unit_price {
        Some(p) if p >= 0.0 => {}
        Some(_) => report.fail(format!("{}: unit_price must not be negative", prefix)),
        None => report.fail(format!("{}: unit_price must be a number", prefix)),
    }
    match total {
        Some(t) if t >= 0.0 => {}
        Some(_) => report.fail(format!("{}: total must not be negative", prefix)),
        None => report.fail(format!("{}: total must be a number", prefix)),
    }

    if let Some(value) = optional(map, "vat_rate") {
        match number(value) {
            Some(rate) if consistency::is_valid_vat_rate(rate) => {}
            _ => report.fail(format!("{}: vat_rate must be between 0 and 100", prefix)),
        }
    }

    // Arithmetic only when all three operands are numeric; missing operands
    // have already been reported above.
    if let (Some(q), Some(p), Some(t)) = (quantity, unit_price, total) {
        if !consistency::line_total_consistent(q, p, t) {
            report.fail(format!(
                "{}: quantity * unit_price does not match total",
                prefix
            ));
        }
    }
}

fn check_amount(key: &str, value: &Value, report: &mut ValidationReport) -> Option<f64> {
    match number(value) {
        Some(amount) if amount >= 0.0 => Some(amount),
        Some(_) => {
            report.fail(format!("{} must not be negative", key));
            None
        }
        None => {
            report.fail(format!("{} must be a number", key));
            None
        }
    }
}

fn check_vat_rate(value: &Value, report: &mut ValidationReport) -> Option<f64> {
    match number(value) {
        Some(rate) if consistency::is_valid_vat_rate(rate) => Some(rate),
        Some(_) => {
            report.fail("vat_rate must be between 0 and 100");
            None
        }
        None => {
            report.fail("vat_rate must be a number");
            None
        }
    }
}

fn check_invoice_arithmetic(
    subtotal: Option<f64>,
    vat_rate: Option<f64>,
    vat_amount: Option<f64>,
    total_amount: Option<f64>,
    report: &mut ValidationReport,
) {
    if let (Some(subtotal), Some(rate), Some(vat)) = (subtotal, vat_rate, vat_amount) {
        if !consistency::vat_amount_consistent(subtotal, rate, vat) {
            report.fail("Invoice calculation mismatch: subtotal * vat_rate / 100 does not match vat_amount");
        }
    }
    if let (Some(subtotal), Some(vat), Some(total)) = (subtotal, vat_amount, total_amount) {
        if !consistency::grand_total_consistent(subtotal, vat, total) {
            report.fail(
                "Invoice calculation mismatch: subtotal + vat_amount does not match total_amount",
            );
        }
    }
}

fn check_status(value: &Value, report: &mut ValidationReport) {
    match value.as_str() {
        Some(status) if INVOICE_STATUSES.contains(&status) => {}
        _ => report.fail(format!(
            "status must be one of {}",
            INVOICE_STATUSES.join(", ")
        )),
    }
}

fn check_due_date(value: &Value, report: &mut ValidationReport) {
    match value.as_str() {
        Some(date) if fields::is_valid_date_only(date) => {}
        _ => report.fail("due_date must be a valid YYYY-MM-DD date"),
    }
}

fn check_currency(value: &Value, report: &mut ValidationReport) {
    match value.as_str() {
        Some(code) if fields::is_valid_currency(code) => {}
        _ => report.fail("currency must be one of AED, USD, CAD"),
    }
}

/// Validate a create-invoice payload: required fields, per-line-item rules,
/// then VAT/total arithmetic. All violations are reported.
pub fn validate_create_invoice(payload: &Value) -> ValidationReport {
    let mut report = ValidationReport::new();
    let Some(map) = as_object(payload, &mut report) else {
        return report;
    };

    if let Some(value) = required(map, "customer_id", &mut report) {
        match value.as_str() {
            Some(id) if !id.trim().is_empty() => {}
            _ => report.fail("customer_id must be a non-empty string"),
        }
    }

    if let Some(value) = required(map, "line_items", &mut report) {
        match value.as_array() {
            Some(items) if !items.is_empty() => {
                for (index, item) in items.iter().enumerate() {
                    check_line_item(index, item, &mut report);
                }
            }
            _ => report.fail("line_items must be a non-empty array"),
        }
    }

    let subtotal = required(map, "subtotal", &mut report)
        .and_then(|v| check_amount("subtotal", v, &mut report));
    let vat_rate =
        required(map, "vat_rate", &mut report).and_then(|v| check_vat_rate(v, &mut report));
    let vat_amount = required(map, "vat_amount", &mut report)
        .and_then(|v| check_amount("vat_amount", v, &mut report));
    let total_amount = required(map, "total_amount", &mut report)
        .and_then(|v| check_amount("total_amount", v, &mut report));

    check_invoice_arithmetic(subtotal, vat_rate, vat_amount, total_amount, &mut report);

    if let Some(value) = required(map, "currency", &mut report) {
        check_currency(value, &mut report);
    }
    if let Some(value) = required(map, "due_date", &mut report) {
        check_due_date(value, &mut report);
    }
    if let Some(value) = optional(map, "status") {
        check_status(value, &mut report);
    }

    report
}

/// Validate an update-invoice payload. Every field optional; present fields
/// follow the create rules, and the arithmetic check runs when the full
/// amount quartet is supplied.
pub fn validate_update_invoice(payload: &Value) -> ValidationReport {
    let mut report = ValidationReport::new();
    let Some(map) = as_object(payload, &mut report) else {
        return report;
    };

    if let Some(value) = optional(map, "line_items") {
        match value.as_array() {
            Some(items) if !items.is_empty() => {
                for (index, item) in items.iter().enumerate() {
                    check_line_item(index, item, &mut report);
                }
            }
            _ => report.fail("line_items must be a non-empty array"),
        }
    }

    let subtotal =
        optional(map, "subtotal").and_then(|v| check_amount("subtotal", v, &mut report));
    let vat_rate = optional(map, "vat_rate").and_then(|v| check_vat_rate(v, &mut report));
    let vat_amount =
        optional(map, "vat_amount").and_then(|v| check_amount("vat_amount", v, &mut report));
    let total_amount =
        optional(map, "total_amount").and_then(|v| check_amount("total_amount", v, &mut report));

    check_invoice_arithmetic(subtotal, vat_rate, vat_amount, total_amount, &mut report);

    if let Some(value) = optional(map, "currency") {
        check_currency(value, &mut report);
    }
    if let Some(value) = optional(map, "due_date") {
        check_due_date(value, &mut report);
    }
    if let Some(value) = optional(map, "status") {
        check_status(value, &mut report);
    }

    report
}
