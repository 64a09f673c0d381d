//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  CoreError                                                              │
//! │  ├── Validation(ValidationError)  - caller input rejected              │
//! │  └── InvalidConfig                - formatter settings unusable        │
//! │                                                                         │
//! │  Flow at the loose boundary:                                           │
//! │    ValidationError → logged → sentinel (-1, "", None, [])              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the offending field in every message
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised by the typed API.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Formatter configuration is unusable.
    ///
    /// ## When This Occurs
    /// - TOML text does not parse into a `FormatConfig`
    /// - A required label (title, separator) is empty
    /// - `price_decimals` exceeds the fixed-point limit
    #[error("Invalid format config: {0}")]
    InvalidConfig(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl From<toml::de::Error> for CoreError {
    fn from(err: toml::de::Error) -> Self {
        CoreError::InvalidConfig(err.to_string())
    }
}

impl From<toml::ser::Error> for CoreError {
    fn from(err: toml::ser::Error) -> Self {
        CoreError::InvalidConfig(err.to_string())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Every loose entry point checks its input at the boundary and produces one
/// of these before any arithmetic runs. The sentinel wrappers log the error
/// and return the documented soft-failure value instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing.
    #[error("{field} is required")]
    Required { field: String },

    /// Value has the wrong kind (e.g. a boolean where text was expected).
    #[error("{field} must be {expected}, got {found}")]
    WrongType {
        field: String,
        expected: String,
        found: String,
    },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Text has no leading numeric prefix.
    #[error("{field} has no numeric prefix: {input:?}")]
    NotNumeric { field: String, input: String },

    /// A collection that must hold at least one element is empty.
    #[error("{field} must not be empty")]
    Empty { field: String },

    /// A record does not have the combo item shape.
    #[error("{field} is not a valid combo item: {reason}")]
    InvalidRecord { field: String, reason: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "price".to_string(),
        };
        assert_eq!(err.to_string(), "price is required");

        let err = ValidationError::WrongType {
            field: "fare".to_string(),
            expected: "text".to_string(),
            found: "number".to_string(),
        };
        assert_eq!(err.to_string(), "fare must be text, got number");

        let err = ValidationError::NotNumeric {
            field: "fare".to_string(),
            input: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "fare has no numeric prefix: \"abc\"");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Empty {
            field: "thalis".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.to_string(), "Validation error: thalis must not be empty");
    }

    #[test]
    fn test_toml_error_becomes_invalid_config() {
        let err = toml::from_str::<toml::Value>("title = ").unwrap_err();
        let core_err: CoreError = err.into();
        assert!(matches!(core_err, CoreError::InvalidConfig(_)));
    }
}
