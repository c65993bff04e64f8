//! Cross-field arithmetic consistency checks
//!
//! Monetary fields are compared after rounding to 2 decimal places, with a
//! fixed 0.01 tolerance to absorb float noise from upstream clients.

/// Tolerance applied to all monetary comparisons.
pub const AMOUNT_TOLERANCE: f64 = 0.01;

/// Round to 2 decimal places (cents/fils).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn within_tolerance(a: f64, b: f64) -> bool {
    (round2(a) - round2(b)).abs() <= AMOUNT_TOLERANCE
}

/// `quantity * unit_price` must agree with the stated line total.
pub fn line_total_consistent(quantity: f64, unit_price: f64, total: f64) -> bool {
    within_tolerance(quantity * unit_price, total)
}

/// `subtotal * vat_rate / 100` must agree with the stated VAT amount.
pub fn vat_amount_consistent(subtotal: f64, vat_rate: f64, vat_amount: f64) -> bool {
    within_tolerance(subtotal * vat_rate / 100.0, vat_amount)
}

/// `subtotal + vat_amount` must agree with the stated grand total.
pub fn grand_total_consistent(subtotal: f64, vat_amount: f64, total_amount: f64) -> bool {
    within_tolerance(subtotal + vat_amount, total_amount)
}

/// VAT rates are percentages.
pub fn is_valid_vat_rate(vat_rate: f64) -> bool {
    (0.0..=100.0).contains(&vat_rate)
}
