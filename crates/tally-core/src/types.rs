//! # Domain Types
//!
//! Record types produced and consumed by the fare and menu functions.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   ComboItem     │   │   ThaliStats    │   │   FareRange     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name           │   │  totalThalis    │   │  cheapest       │       │
//! │  │  items[]        │   │  vegCount       │   │  costliest      │       │
//! │  │  price          │   │  nonVegCount    │   └─────────────────┘       │
//! │  │  isVeg          │   │  avgPrice (txt) │                             │
//! │  └─────────────────┘   │  cheapest       │                             │
//! │                        │  costliest      │                             │
//! │                        │  names[]        │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All three serialize camelCase so records written by script callers
//! (`{"isVeg": true}`) decode without translation.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::error::{ValidationError, ValidationResult};

// =============================================================================
// Combo Item
// =============================================================================

/// A named bundle of dishes sold at one price (a thali).
///
/// Combo items are never mutated by this crate; every function reads them by
/// reference and produces new values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ComboItem {
    /// Display name, e.g. "Rajasthani Thali".
    pub name: String,

    /// Dishes included, in menu order.
    pub items: Vec<String>,

    /// Price in rupees. Non-negative by convention.
    pub price: f64,

    /// Vegetarian flag.
    pub is_veg: bool,
}

impl ComboItem {
    /// Creates a combo item.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::ComboItem;
    ///
    /// let thali = ComboItem::new("Rajasthani Thali", ["dal baati", "churma"], 250.0, true);
    /// assert_eq!(thali.items.len(), 2);
    /// ```
    pub fn new<I, S>(name: impl Into<String>, items: I, price: f64, is_veg: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ComboItem {
            name: name.into(),
            items: items.into_iter().map(Into::into).collect(),
            price,
            is_veg,
        }
    }

    /// Decodes a combo item from a loose value.
    ///
    /// All four fields must be present with the right kinds.
    pub fn from_value(value: &Value) -> ValidationResult<Self> {
        ComboItem::deserialize(value).map_err(|err| ValidationError::InvalidRecord {
            field: "thali".to_string(),
            reason: err.to_string(),
        })
    }

    /// Returns "Veg" or "Non-Veg".
    #[inline]
    pub fn diet_label(&self) -> &'static str {
        diet_label(self.is_veg)
    }

    /// Checks whether the name or any dish contains `lowered_query`.
    ///
    /// `lowered_query` must already be lowercased.
    pub fn mentions(&self, lowered_query: &str) -> bool {
        self.name.to_lowercase().contains(lowered_query)
            || self
                .items
                .iter()
                .any(|item| item.to_lowercase().contains(lowered_query))
    }
}

/// Maps the vegetarian flag to its menu label.
#[inline]
pub(crate) fn diet_label(is_veg: bool) -> &'static str {
    if is_veg {
        "Veg"
    } else {
        "Non-Veg"
    }
}

// =============================================================================
// Thali Stats
// =============================================================================

/// Summary over a non-empty set of combo items.
///
/// `veg_count + non_veg_count == total_thalis` always holds because the
/// non-veg count is derived, not counted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ThaliStats {
    pub total_thalis: usize,
    pub veg_count: usize,
    pub non_veg_count: usize,

    /// Average price rendered with two decimals, e.g. "216.67".
    pub avg_price: String,

    pub cheapest: f64,
    pub costliest: f64,

    /// Names in input order.
    pub names: Vec<String>,
}

// =============================================================================
// Fare Range
// =============================================================================

/// Cheapest and costliest of a set of fares.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FareRange {
    pub cheapest: f64,
    pub costliest: f64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_combo_item_decodes_camel_case() {
        let value = json!({
            "name": "Rajasthani Thali",
            "items": ["dal", "churma"],
            "price": 250,
            "isVeg": true
        });

        let thali = ComboItem::from_value(&value).unwrap();
        assert_eq!(thali, ComboItem::new("Rajasthani Thali", ["dal", "churma"], 250.0, true));
        assert_eq!(serde_json::to_value(&thali).unwrap()["isVeg"], json!(true));
    }

    #[test]
    fn test_combo_item_rejects_wrong_shape() {
        let missing_flag = json!({"name": "X", "items": [], "price": 1});
        assert!(matches!(
            ComboItem::from_value(&missing_flag),
            Err(ValidationError::InvalidRecord { .. })
        ));

        let text_price = json!({"name": "X", "items": [], "price": "1", "isVeg": false});
        assert!(ComboItem::from_value(&text_price).is_err());

        assert!(ComboItem::from_value(&json!("thali")).is_err());
    }

    #[test]
    fn test_diet_label() {
        assert_eq!(ComboItem::new("A", ["x"], 1.0, true).diet_label(), "Veg");
        assert_eq!(ComboItem::new("B", ["y"], 1.0, false).diet_label(), "Non-Veg");
    }

    #[test]
    fn test_mentions_is_case_insensitive() {
        let thali = ComboItem::new("Punjabi Thali", ["Dal Makhani", "naan"], 300.0, true);

        assert!(thali.mentions("dal"));
        assert!(thali.mentions("punjabi"));
        assert!(thali.mentions("aan"));
        assert!(!thali.mentions("biryani"));
    }
}
