//! Payload validation for the dealership API
//!
//! Entity validators operate on untyped JSON payloads and collect every
//! violation instead of stopping at the first one, so a single request
//! round-trip reports all of its problems. Nothing in this module performs
//! I/O or mutates its input; handlers deserialize into typed request
//! structs only after a payload passes.

pub mod consistency;
pub mod customers;
pub mod fields;
pub mod invoices;
pub mod vehicles;

use serde_json::{Map, Value};

/// Outcome of validating one payload: an ordered list of human-readable
/// error messages. Empty means the payload passed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record a violation. Order of calls is preserved in the output.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }
}

/// Treat the payload as a JSON object, recording a violation if it is not.
pub(crate) fn as_object<'a>(
    payload: &'a Value,
    report: &mut ValidationReport,
) -> Option<&'a Map<String, Value>> {
    match payload.as_object() {
        Some(map) => Some(map),
        None => {
            report.fail("Request body must be a JSON object");
            None
        }
    }
}

/// Look up a mandatory field. Missing or explicit-null fields record
/// "<key> is required" and yield None.
pub(crate) fn required<'a>(
    map: &'a Map<String, Value>,
    key: &str,
    report: &mut ValidationReport,
) -> Option<&'a Value> {
    match map.get(key) {
        Some(value) if !value.is_null() => Some(value),
        _ => {
            report.fail(format!("{} is required", key));
            None
        }
    }
}

/// Look up an optional field; explicit null counts as absent.
pub(crate) fn optional<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|value| !value.is_null())
}

/// Numeric value of a JSON field, if it is a number.
pub(crate) fn number(value: &Value) -> Option<f64> {
    value.as_f64()
}

/// Integer value of a JSON field. Accepts whole-valued floats since JSON
/// clients frequently send `2021.0` where `2021` is meant.
pub(crate) fn integer(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.is_finite())
            .map(|f| f as i64)
    })
}
