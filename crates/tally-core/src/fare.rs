//! # Fare Module
//!
//! Meter arithmetic for auto-rickshaw fares: parsing what the customer says,
//! rounding, surge pricing, cheapest/costliest, and distance between km
//! markers.
//!
//! ## Two Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Loose entry points (take serde_json::Value, never fail)                │
//! │    parse_fare ─ round_fare ─ calculate_surge ─ find_cheapest_and_...   │
//! │    get_distance_difference                                             │
//! │         │                                                               │
//! │         │ validation::expect_* at entry                                │
//! │         ▼                                                               │
//! │  Typed counterparts (return ValidationResult / Option)                  │
//! │    try_parse_fare ─ try_round_fare ─ surge_fare ─ fare_range           │
//! │    try_distance_difference                                             │
//! │         │                                                               │
//! │         └── Err → debug! → sentinel (-1, "", 0, None)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use serde_json::json;
//! use tally_core::fare::{calculate_surge, parse_fare, round_fare};
//!
//! assert_eq!(parse_fare(&json!("152.50")), 152.5);
//! assert_eq!(round_fare(&json!(152.567), &json!(2)), "152.57");
//! assert_eq!(calculate_surge(&json!(73), &json!(1.8)), 132.0);
//! ```

use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{ValidationError, ValidationResult};
use crate::numeric::{format_fixed, parse_leading_float, parse_leading_int};
use crate::types::FareRange;
use crate::validation::{expect_decimal_places, expect_number, expect_positive, expect_text, kind_of};
use crate::{INVALID_FARE, NO_SURGE};

// =============================================================================
// Parsing
// =============================================================================

/// Parses a spoken/typed fare such as `"152.50"` into a number.
///
/// Leading-prefix parse: `"12kg"` gives `12`.
pub fn try_parse_fare(input: &Value) -> ValidationResult<f64> {
    let text = expect_text("fare", input)?;

    parse_leading_float(text).ok_or_else(|| ValidationError::NotNumeric {
        field: "fare".to_string(),
        input: text.to_string(),
    })
}

/// Loose form of [`try_parse_fare`]: returns [`INVALID_FARE`] (`-1`) for
/// non-text input or text without a numeric prefix.
///
/// ## Example
/// ```rust
/// use serde_json::json;
/// use tally_core::fare::parse_fare;
///
/// assert_eq!(parse_fare(&json!("152.50")), 152.5);
/// assert_eq!(parse_fare(&json!("12kg")), 12.0);
/// assert_eq!(parse_fare(&json!("abc")), -1.0);
/// assert_eq!(parse_fare(&json!(152.5)), -1.0);
/// ```
pub fn parse_fare(input: &Value) -> f64 {
    try_parse_fare(input).unwrap_or_else(|err| {
        debug!(error = %err, "Rejected fare text");
        INVALID_FARE
    })
}

// =============================================================================
// Rounding
// =============================================================================

/// Rounds a fare to `decimal_places` digits and renders it as text.
///
/// Text keeps trailing zeros: `250` to 2 places is `"250.00"`.
pub fn try_round_fare(amount: &Value, decimal_places: &Value) -> ValidationResult<String> {
    let amount = expect_number("amount", amount)?;
    let places = expect_decimal_places(decimal_places)?;

    let rounded = format_fixed(amount, places);
    trace!(amount, places, rounded = %rounded, "Rounded fare");
    Ok(rounded)
}

/// Loose form of [`try_round_fare`]: returns `""` when `amount` is not a
/// number or `decimal_places` is not a non-negative integer.
///
/// ## Example
/// ```rust
/// use serde_json::json;
/// use tally_core::fare::round_fare;
///
/// assert_eq!(round_fare(&json!(152.567), &json!(2)), "152.57");
/// assert_eq!(round_fare(&json!(152.567), &json!(0)), "153");
/// assert_eq!(round_fare(&json!(152.567), &json!(-1)), "");
/// ```
pub fn round_fare(amount: &Value, decimal_places: &Value) -> String {
    try_round_fare(amount, decimal_places).unwrap_or_else(|err| {
        debug!(error = %err, "Rejected fare rounding");
        String::new()
    })
}

// =============================================================================
// Surge
// =============================================================================

/// Multiplies a base fare by the surge multiplier and rounds UP.
///
/// ## Why Ceiling?
/// ```text
/// Base fare: 73     Surge: 1.8x
///      │
///      ▼
/// 73 × 1.8 = 131.4
///      │
///      ▼
/// ceil → 132        (the driver is never short-changed by rounding)
/// ```
///
/// Both inputs must be strictly positive.
pub fn surge_fare(base_fare: f64, surge_multiplier: f64) -> ValidationResult<f64> {
    // NaN fails both comparisons, so test for "not positive" explicitly.
    if !(base_fare > 0.0) {
        return Err(ValidationError::MustBePositive {
            field: "base fare".to_string(),
        });
    }
    if !(surge_multiplier > 0.0) {
        return Err(ValidationError::MustBePositive {
            field: "surge multiplier".to_string(),
        });
    }

    Ok((base_fare * surge_multiplier).ceil())
}

/// Loose form of [`surge_fare`]: returns [`NO_SURGE`] (`0`) unless both
/// inputs are positive numbers.
///
/// ## Example
/// ```rust
/// use serde_json::json;
/// use tally_core::fare::calculate_surge;
///
/// assert_eq!(calculate_surge(&json!(100), &json!(1.5)), 150.0);
/// assert_eq!(calculate_surge(&json!(73), &json!(1.8)), 132.0);
/// assert_eq!(calculate_surge(&json!(-5), &json!(2)), 0.0);
/// ```
pub fn calculate_surge(base_fare: &Value, surge_multiplier: &Value) -> f64 {
    let surged = expect_positive("base fare", base_fare)
        .and_then(|base| {
            let multiplier = expect_positive("surge multiplier", surge_multiplier)?;
            surge_fare(base, multiplier)
        });

    surged.unwrap_or_else(|err| {
        debug!(error = %err, "Rejected surge input");
        NO_SURGE
    })
}

// =============================================================================
// Cheapest / Costliest
// =============================================================================

/// Finds the cheapest and costliest fare, or `None` when there are no fares.
///
/// A single fare is both cheapest and costliest.
pub fn fare_range<I>(fares: I) -> Option<FareRange>
where
    I: IntoIterator<Item = f64>,
{
    fares.into_iter().fold(None, |range, fare| {
        Some(match range {
            None => FareRange {
                cheapest: fare,
                costliest: fare,
            },
            Some(FareRange {
                cheapest,
                costliest,
            }) => FareRange {
                cheapest: cheapest.min(fare),
                costliest: costliest.max(fare),
            },
        })
    })
}

/// Loose form of [`fare_range`]: only number entries are considered; text,
/// booleans, null, sequences and objects are skipped.
///
/// ## Example
/// ```rust
/// use serde_json::json;
/// use tally_core::fare::find_cheapest_and_costliest;
///
/// let range = find_cheapest_and_costliest(&[json!(150), json!(80), json!(200)]).unwrap();
/// assert_eq!((range.cheapest, range.costliest), (80.0, 200.0));
///
/// assert!(find_cheapest_and_costliest(&[json!("a"), json!(true)]).is_none());
/// ```
pub fn find_cheapest_and_costliest(fares: &[Value]) -> Option<FareRange> {
    let range = fare_range(fares.iter().filter_map(|fare| match fare {
        Value::Number(n) => n.as_f64(),
        _ => None,
    }));

    if range.is_none() {
        debug!(entries = fares.len(), "No numeric fares to compare");
    }
    range
}

// =============================================================================
// Distance
// =============================================================================

fn km_marker(field: &str, marker: &Value) -> ValidationResult<f64> {
    match marker {
        Value::Number(_) => expect_number(field, marker),
        Value::String(text) => parse_leading_int(text).ok_or_else(|| ValidationError::NotNumeric {
            field: field.to_string(),
            input: text.clone(),
        }),
        other => Err(ValidationError::WrongType {
            field: field.to_string(),
            expected: "a number or text".to_string(),
            found: kind_of(other).to_string(),
        }),
    }
}

/// Absolute distance between two km markers.
///
/// Text markers are read as leading integers (`"15"`, `"8 km"`); numbers
/// pass through unchanged.
pub fn try_distance_difference(from: &Value, to: &Value) -> ValidationResult<f64> {
    let from = km_marker("from", from)?;
    let to = km_marker("to", to)?;

    Ok((from - to).abs())
}

/// Loose form of [`try_distance_difference`]: returns [`INVALID_FARE`]
/// (`-1`) when either marker cannot be read.
///
/// ## Example
/// ```rust
/// use serde_json::json;
/// use tally_core::fare::get_distance_difference;
///
/// assert_eq!(get_distance_difference(&json!(5), &json!(12)), 7.0);
/// assert_eq!(get_distance_difference(&json!("15"), &json!("8")), 7.0);
/// assert_eq!(get_distance_difference(&json!("x"), &json!(3)), -1.0);
/// ```
pub fn get_distance_difference(from: &Value, to: &Value) -> f64 {
    try_distance_difference(from, to).unwrap_or_else(|err| {
        debug!(error = %err, "Rejected km marker");
        INVALID_FARE
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_fare() {
        assert_eq!(parse_fare(&json!("152.50")), 152.5);
        assert_eq!(parse_fare(&json!("12kg")), 12.0);
        assert_eq!(parse_fare(&json!(" 99")), 99.0);
        assert_eq!(parse_fare(&json!("abc")), -1.0);
        assert_eq!(parse_fare(&json!("")), -1.0);
    }

    #[test]
    fn test_parse_fare_leading_blanks() {
        assert_eq!(parse_fare(&json!("\u{a0}12")), 12.0);
        assert_eq!(parse_fare(&json!("\u{85}12")), INVALID_FARE);
    }

    #[test]
    fn test_parse_fare_rejects_every_non_text_kind() {
        for input in [json!(152.5), json!(true), json!(null), json!(["1"]), json!({"fare": "1"})] {
            assert_eq!(parse_fare(&input), INVALID_FARE, "input: {input}");
        }
    }

    #[test]
    fn test_try_parse_fare_reports_reason() {
        assert!(matches!(
            try_parse_fare(&json!(5)),
            Err(ValidationError::WrongType { .. })
        ));
        assert!(matches!(
            try_parse_fare(&json!("abc")),
            Err(ValidationError::NotNumeric { .. })
        ));
    }

    #[test]
    fn test_round_fare() {
        assert_eq!(round_fare(&json!(152.567), &json!(2)), "152.57");
        assert_eq!(round_fare(&json!(152.567), &json!(0)), "153");
        assert_eq!(round_fare(&json!(152), &json!(2)), "152.00");
        assert_eq!(round_fare(&json!(152.567), &json!(2.0)), "152.57");
    }

    #[test]
    fn test_round_fare_large_amount_many_places() {
        assert_eq!(
            round_fare(&json!(1234567), &json!(26)),
            format!("1234567.{}", "0".repeat(26))
        );
        assert_eq!(round_fare(&json!(99.995), &json!(100)).len(), 103);
    }

    #[test]
    fn test_round_fare_invalid_input() {
        assert_eq!(round_fare(&json!(152.567), &json!(-1)), "");
        assert_eq!(round_fare(&json!(152.567), &json!(1.5)), "");
        assert_eq!(round_fare(&json!(152.567), &json!("2")), "");
        assert_eq!(round_fare(&json!("152.567"), &json!(2)), "");
        assert_eq!(round_fare(&json!(null), &json!(2)), "");
    }

    #[test]
    fn test_calculate_surge_rounds_up() {
        assert_eq!(calculate_surge(&json!(73), &json!(1.8)), 132.0);
        assert_eq!(calculate_surge(&json!(100), &json!(1.5)), 150.0);
        assert_eq!(calculate_surge(&json!(10), &json!(1.01)), 11.0);
    }

    #[test]
    fn test_calculate_surge_matches_ceiling_of_product() {
        for (base, multiplier) in [(73.0_f64, 1.8_f64), (49.5, 1.25), (120.0, 2.0), (33.3, 3.3)] {
            assert_eq!(
                calculate_surge(&json!(base), &json!(multiplier)),
                (base * multiplier).ceil()
            );
        }
    }

    #[test]
    fn test_calculate_surge_invalid_input() {
        assert_eq!(calculate_surge(&json!(-5), &json!(2)), NO_SURGE);
        assert_eq!(calculate_surge(&json!(100), &json!(0)), NO_SURGE);
        assert_eq!(calculate_surge(&json!("100"), &json!(1.5)), NO_SURGE);
        assert_eq!(calculate_surge(&json!(100), &json!(null)), NO_SURGE);
    }

    #[test]
    fn test_surge_fare_rejects_nan() {
        assert!(surge_fare(f64::NAN, 2.0).is_err());
        assert!(surge_fare(10.0, f64::NAN).is_err());
    }

    #[test]
    fn test_find_cheapest_and_costliest() {
        let range = find_cheapest_and_costliest(&[json!(150), json!(80), json!(200)]).unwrap();
        assert_eq!(range.cheapest, 80.0);
        assert_eq!(range.costliest, 200.0);
    }

    #[test]
    fn test_find_cheapest_and_costliest_skips_non_numbers() {
        let range =
            find_cheapest_and_costliest(&[json!("90"), json!(120), json!(null), json!(true), json!(45.5)])
                .unwrap();
        assert_eq!(range, FareRange { cheapest: 45.5, costliest: 120.0 });

        assert_eq!(find_cheapest_and_costliest(&[json!("a"), json!(true)]), None);
        assert_eq!(find_cheapest_and_costliest(&[]), None);
    }

    #[test]
    fn test_single_fare_is_both_ends() {
        let range = fare_range([64.0]).unwrap();
        assert_eq!(range.cheapest, range.costliest);
    }

    #[test]
    fn test_get_distance_difference() {
        assert_eq!(get_distance_difference(&json!(5), &json!(12)), 7.0);
        assert_eq!(get_distance_difference(&json!("15"), &json!("8")), 7.0);
        assert_eq!(get_distance_difference(&json!("20km"), &json!(4.5)), 15.5);
        assert_eq!(get_distance_difference(&json!("7.9"), &json!("2")), 5.0);
    }

    #[test]
    fn test_get_distance_difference_invalid_input() {
        assert_eq!(get_distance_difference(&json!("x"), &json!(3)), INVALID_FARE);
        assert_eq!(get_distance_difference(&json!(3), &json!("")), INVALID_FARE);
        assert_eq!(get_distance_difference(&json!(true), &json!(3)), INVALID_FARE);
        assert_eq!(get_distance_difference(&json!(null), &json!(3)), INVALID_FARE);
    }
}
