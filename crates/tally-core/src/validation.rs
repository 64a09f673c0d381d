//! # Validation Module
//!
//! Boundary checks for loosely-typed caller input.
//!
//! Callers of the loose entry points hand in whatever they received from a
//! user or an upstream record, modelled as [`serde_json::Value`]. Each entry
//! point runs the checks below at function entry, before any arithmetic.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Flow                                    │
//! │                                                                         │
//! │  Loose entry point (e.g. parse_fare)                                   │
//! │  ├── Kind check   (text? number? sequence? object?)                    │
//! │  ├── Range check  (positive? non-negative integer?)                    │
//! │  └── Shape check  (required keys present?)                             │
//! │           │                                                             │
//! │           ├── Err(ValidationError) → debug! → sentinel                 │
//! │           └── Ok(typed value)      → typed counterpart                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use serde_json::json;
//! use tally_core::validation::{expect_text, expect_decimal_places};
//!
//! assert_eq!(expect_text("fare", &json!("152.50")).unwrap(), "152.50");
//! assert!(expect_text("fare", &json!(152.5)).is_err());
//! assert_eq!(expect_decimal_places(&json!(2)).unwrap(), 2);
//! ```

use serde_json::{Map, Value};

use crate::error::{ValidationError, ValidationResult};
use crate::MAX_DECIMAL_PLACES;

/// Returns a short human name for the kind of a loose value.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "text",
        Value::Array(_) => "sequence",
        Value::Object(_) => "object",
    }
}

fn wrong_type(field: &str, expected: &str, value: &Value) -> ValidationError {
    ValidationError::WrongType {
        field: field.to_string(),
        expected: expected.to_string(),
        found: kind_of(value).to_string(),
    }
}

// =============================================================================
// Scalar Validators
// =============================================================================

/// Requires a text value.
pub fn expect_text<'a>(field: &str, value: &'a Value) -> ValidationResult<&'a str> {
    value.as_str().ok_or_else(|| wrong_type(field, "text", value))
}

/// Requires a number.
///
/// Booleans and numeric-looking text are rejected; only real numbers pass.
pub fn expect_number(field: &str, value: &Value) -> ValidationResult<f64> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| wrong_type(field, "number", value)),
        _ => Err(wrong_type(field, "number", value)),
    }
}

/// Requires a strictly positive number.
///
/// ## Example
/// ```rust
/// use serde_json::json;
/// use tally_core::validation::expect_positive;
///
/// assert!(expect_positive("base fare", &json!(73)).is_ok());
/// assert!(expect_positive("base fare", &json!(0)).is_err());
/// assert!(expect_positive("base fare", &json!(-5)).is_err());
/// ```
pub fn expect_positive(field: &str, value: &Value) -> ValidationResult<f64> {
    let number = expect_number(field, value)?;

    if number <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(number)
}

/// Requires a non-negative integer no larger than [`MAX_DECIMAL_PLACES`].
///
/// Integral floats (`2.0`) are accepted, fractional ones (`1.5`) are not.
pub fn expect_decimal_places(value: &Value) -> ValidationResult<u32> {
    let field = "decimal places";
    let places = expect_number(field, value)?;

    if places.fract() != 0.0 {
        return Err(wrong_type(field, "an integer", value));
    }

    if places < 0.0 || places > f64::from(MAX_DECIMAL_PLACES) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::from(MAX_DECIMAL_PLACES),
        });
    }

    Ok(places as u32)
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Requires a sequence.
pub fn expect_sequence<'a>(field: &str, value: &'a Value) -> ValidationResult<&'a [Value]> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| wrong_type(field, "a sequence", value))
}

/// Requires a sequence holding at least one element.
pub fn expect_non_empty_sequence<'a>(
    field: &str,
    value: &'a Value,
) -> ValidationResult<&'a [Value]> {
    let seq = expect_sequence(field, value)?;

    if seq.is_empty() {
        return Err(ValidationError::Empty {
            field: field.to_string(),
        });
    }

    Ok(seq)
}

// =============================================================================
// Record Validators
// =============================================================================

/// Requires a structured (object) value.
pub fn expect_object<'a>(field: &str, value: &'a Value) -> ValidationResult<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| wrong_type(field, "an object", value))
}

/// Checks that every key in `fields` is present on `record`.
///
/// Presence only: a key holding `null` counts as present.
pub fn require_fields(record: &Map<String, Value>, fields: &[&str]) -> ValidationResult<()> {
    match fields.iter().find(|field| !record.contains_key(**field)) {
        Some(missing) => Err(ValidationError::Required {
            field: (*missing).to_string(),
        }),
        None => Ok(()),
    }
}

/// Truthiness of a loose value: `false`, `0`, empty text and `null` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|x| x != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
