//! # tally-core: Pure Fare & Menu Logic
//!
//! Stateless helpers for an auto-rickshaw fare meter and a thali counter:
//! parsing and rounding fares, surge pricing, and aggregating combo-item
//! records into descriptions, statistics, search results and receipts.
//!
//! ## Crate Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    ★ tally-core (THIS CRATE) ★                          │
//! │                                                                         │
//! │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐          │
//! │   │   fare    │  │   menu    │  │  numeric  │  │ validation│          │
//! │   │ parse     │  │ describe  │  │ prefix    │  │ expect_*  │          │
//! │   │ round     │  │ stats     │  │ parsing   │  │ checks    │          │
//! │   │ surge     │  │ search    │  │ fixed-pt  │  │           │          │
//! │   │ range     │  │ receipt   │  │ rendering │  │           │          │
//! │   └───────────┘  └───────────┘  └───────────┘  └───────────┘          │
//! │          │              │                                               │
//! │          └──── types (ComboItem, ThaliStats, FareRange)                 │
//! │                config (FormatConfig) ─ error (ValidationError)          │
//! │                                                                         │
//! │   NO I/O • NO SHARED STATE • PURE FUNCTIONS                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`fare`] - Fare parsing, rounding, surge, cheapest/costliest, distance
//! - [`menu`] - Thali descriptions, stats, search and receipts
//! - [`types`] - Record types shared with script callers
//! - [`numeric`] - Leading-prefix parsing and number rendering
//! - [`validation`] - Boundary checks over loose input
//! - [`config`] - Text settings for menu output
//! - [`error`] - Validation and config errors
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, nothing is mutated
//! 2. **Soft Failure**: loose entry points return a documented sentinel
//!    (`-1`, `""`, `None`, empty `Vec`) instead of panicking
//! 3. **Typed Core**: every loose entry point has a typed counterpart that
//!    reports *why* input was rejected
//!
//! ## Example Usage
//!
//! ```rust
//! use serde_json::json;
//! use tally_core::fare::{calculate_surge, parse_fare};
//! use tally_core::menu::create_thali_description;
//!
//! assert_eq!(parse_fare(&json!("152.50")), 152.5);
//! assert_eq!(calculate_surge(&json!(73), &json!(1.8)), 132.0);
//!
//! let thali = json!({"name": "Rajasthani Thali", "items": ["dal", "churma"], "price": 250, "isVeg": true});
//! assert_eq!(
//!     create_thali_description(&thali),
//!     "RAJASTHANI THALI (Veg) - Items: dal, churma - Rs.250.00"
//! );
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod fare;
pub mod menu;
pub mod numeric;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use config::FormatConfig;
pub use error::{CoreError, CoreResult, ValidationError, ValidationResult};
pub use menu::MenuFormatter;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Returned by numeric entry points when input cannot be read.
///
/// Fares and distances are never negative, so `-1` cannot be mistaken for a
/// real result.
pub const INVALID_FARE: f64 = -1.0;

/// Returned by `calculate_surge` when either input is not a positive number.
pub const NO_SURGE: f64 = 0.0;

/// Largest accepted number of fractional digits when rounding.
pub const MAX_DECIMAL_PLACES: u32 = 100;
