//! # Numeric Module
//!
//! Number parsing and rendering shared by the fare and menu functions.
//!
//! ## Leading-Prefix Parsing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "  152.50 Rs"                                                          │
//! │   ^^ ^^^^^^                                                             │
//! │   │  └── longest numeric prefix: 152.50 → 152.5                        │
//! │   └───── leading whitespace skipped                                    │
//! │                                                                         │
//! │  "12kg"  → 12        (stops at first non-numeric character)            │
//! │  "1e3x"  → 1000      (exponent only if a digit follows the 'e')        │
//! │  "abc"   → None      (no numeric prefix at all)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rendering
//! - [`format_fixed`] - exactly N fractional digits, half away from zero
//! - [`format_number`] - plain rendering: `250`, `99.5`, `1e+21`

/// Fractional digits in the exact expansion of the smallest subnormal f64.
///
/// Every finite f64 is a dyadic rational, so this many digits render it
/// without any rounding.
const EXACT_FRACTION_DIGITS: usize = 1074;

/// Magnitude at which plain rendering switches to exponent form.
const EXPONENT_UPPER: f64 = 1e21;

/// Magnitude below which plain rendering switches to exponent form.
const EXPONENT_LOWER: f64 = 1e-6;

// =============================================================================
// Parsing
// =============================================================================

/// Blank characters skipped before a numeric prefix: space separators,
/// tab, vertical tab, form feed, line terminators and the byte-order mark.
///
/// U+0085 (next line) is not skipped.
fn is_leading_blank(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

fn skip_whitespace(text: &str) -> &str {
    text.trim_start_matches(is_leading_blank)
}

fn split_sign(text: &str) -> (bool, &str) {
    if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = text.strip_prefix('+') {
        (false, rest)
    } else {
        (false, text)
    }
}

fn count_digits(bytes: &[u8], radix: u32) -> usize {
    bytes
        .iter()
        .take_while(|b| char::from(**b).is_digit(radix))
        .count()
}

/// Parses the longest leading decimal number in `text`.
///
/// Accepts optional leading whitespace, an optional sign, `Infinity`, or
/// digits with an optional fractional part and exponent. Anything after the
/// prefix is ignored.
///
/// ## Example
/// ```rust
/// use tally_core::numeric::parse_leading_float;
///
/// assert_eq!(parse_leading_float("152.50"), Some(152.5));
/// assert_eq!(parse_leading_float("12kg"), Some(12.0));
/// assert_eq!(parse_leading_float(".5"), Some(0.5));
/// assert_eq!(parse_leading_float("abc"), None);
/// ```
pub fn parse_leading_float(text: &str) -> Option<f64> {
    let (negative, body) = split_sign(skip_whitespace(text));

    let magnitude = if body.starts_with("Infinity") {
        f64::INFINITY
    } else {
        let bytes = body.as_bytes();
        let int_len = count_digits(bytes, 10);
        let mut end = int_len;
        let mut frac_len = 0;

        if bytes.get(end) == Some(&b'.') {
            frac_len = count_digits(&bytes[end + 1..], 10);
            end += 1 + frac_len;
        }

        if int_len + frac_len == 0 {
            return None;
        }

        if matches!(bytes.get(end), Some(b'e' | b'E')) {
            let mut exp = end + 1;
            if matches!(bytes.get(exp), Some(b'+' | b'-')) {
                exp += 1;
            }
            let exp_len = count_digits(&bytes[exp..], 10);
            if exp_len > 0 {
                end = exp + exp_len;
            }
        }

        body[..end].parse::<f64>().ok()?
    };

    Some(if negative { -magnitude } else { magnitude })
}

/// Parses the longest leading integer in `text`.
///
/// A `0x`/`0X` prefix switches to hexadecimal; otherwise digits are decimal.
/// A fractional part is not consumed: `"7.9"` parses as `7`.
///
/// ## Example
/// ```rust
/// use tally_core::numeric::parse_leading_int;
///
/// assert_eq!(parse_leading_int("15"), Some(15.0));
/// assert_eq!(parse_leading_int(" -8 km"), Some(-8.0));
/// assert_eq!(parse_leading_int("0x1F"), Some(31.0));
/// assert_eq!(parse_leading_int("km 8"), None);
/// ```
pub fn parse_leading_int(text: &str) -> Option<f64> {
    let (negative, body) = split_sign(skip_whitespace(text));

    let (radix, digits) = match body.get(..2) {
        Some("0x") | Some("0X") => (16, &body[2..]),
        _ => (10, body),
    };

    let len = count_digits(digits.as_bytes(), radix);
    if len == 0 {
        return None;
    }
    let digits = &digits[..len];

    let magnitude = if radix == 10 {
        digits.parse::<f64>().ok()?
    } else {
        digits
            .chars()
            .filter_map(|c| c.to_digit(radix))
            .fold(0.0, |acc, d| acc * f64::from(radix) + f64::from(d))
    };

    Some(if negative { -magnitude } else { magnitude })
}

// =============================================================================
// Rendering
// =============================================================================

/// Renders `amount` with exactly `places` fractional digits.
///
/// Rounds half away from zero on the exact binary value of `amount`, so
/// `2.5` → `"3"` but `1.005` (stored as 1.00499…) → `"1.00"`. Trailing zeros
/// are kept. A negative amount keeps its sign even when it rounds to zero.
/// Magnitudes of 1e21 and above use [`format_number`].
///
/// ## Example
/// ```rust
/// use tally_core::numeric::format_fixed;
///
/// assert_eq!(format_fixed(152.567, 2), "152.57");
/// assert_eq!(format_fixed(152.567, 0), "153");
/// assert_eq!(format_fixed(250.0, 2), "250.00");
/// ```
pub fn format_fixed(amount: f64, places: u32) -> String {
    if amount.is_nan() {
        return "NaN".to_string();
    }
    if amount.abs() >= EXPONENT_UPPER {
        return format_number(amount);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}{}", round_half_away(amount.abs(), places as usize))
}

/// Rounds a non-negative finite value to `places` fractional digits, half
/// away from zero, working on its exact decimal expansion.
fn round_half_away(magnitude: f64, places: usize) -> String {
    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, magnitude);
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(places))
        .collect();

    // Anything from "5000..." upward in the dropped tail is at or past the midpoint.
    if frac_part.as_bytes().get(places).is_some_and(|d| *d >= b'5') {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let int_len = digits.len() - places;
    let mut rendered: String = digits[..int_len].iter().map(|d| char::from(*d)).collect();
    if places > 0 {
        rendered.push('.');
        rendered.extend(digits[int_len..].iter().map(|d| char::from(*d)));
    }
    rendered
}

/// Renders a number the plain way: no trailing `.0`, shortest digits that
/// round-trip, exponent form outside `[1e-6, 1e21)`.
///
/// ## Example
/// ```rust
/// use tally_core::numeric::format_number;
///
/// assert_eq!(format_number(250.0), "250");
/// assert_eq!(format_number(99.5), "99.5");
/// assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
/// assert_eq!(format_number(1e21), "1e+21");
/// ```
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (EXPONENT_LOWER..EXPONENT_UPPER).contains(&magnitude) {
        return format!("{value}");
    }

    let rendered = format!("{value:e}");
    match rendered.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => rendered,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
