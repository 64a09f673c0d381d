//! # Menu Module
//!
//! Aggregations over thali (combo item) records: one-line descriptions,
//! menu statistics, dish search and customer receipts.
//!
//! ## Receipt Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THALI RECEIPT                          ← FormatConfig::receipt_title   │
//! │  ---                                    ← FormatConfig::separator       │
//! │  Customer: AMIT                         ← customer name, uppercased     │
//! │  - Rajasthani Thali x Rs.250            ← one line per thali, raw price │
//! │  - Hyderabadi Thali x Rs.350.5                                          │
//! │  ---                                                                    │
//! │  Total: Rs.600.5                        ← raw sum, no rounding          │
//! │  Items: 2                                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! As in the fare module, each loose entry point validates a
//! [`serde_json::Value`] and falls back to a sentinel (`""`, `None`, empty
//! `Vec`), while the typed API works on [`ComboItem`] slices.

use serde_json::Value;
use tracing::{debug, trace};

use crate::config::FormatConfig;
use crate::error::{CoreResult, ValidationError, ValidationResult};
use crate::fare::fare_range;
use crate::numeric::{format_fixed, format_number};
use crate::types::{diet_label, ComboItem, ThaliStats};
use crate::validation::{
    expect_non_empty_sequence, expect_number, expect_object, expect_sequence, expect_text,
    is_truthy, require_fields,
};

/// Keys a description record must carry.
const REQUIRED_FIELDS: [&str; 4] = ["name", "items", "price", "isVeg"];

// =============================================================================
// Menu Formatter
// =============================================================================

/// Renders descriptions and receipts with a [`FormatConfig`].
#[derive(Debug, Clone, Default)]
pub struct MenuFormatter {
    config: FormatConfig,
}

impl MenuFormatter {
    /// Creates a formatter with custom labels.
    ///
    /// Rejects a config that [`FormatConfig::validate`] would reject, so a
    /// hand-built config gets the same checks as one read from TOML.
    pub fn new(config: FormatConfig) -> CoreResult<Self> {
        config.validate()?;
        Ok(MenuFormatter { config })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    /// One-line description of a thali.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::{ComboItem, MenuFormatter};
    ///
    /// let thali = ComboItem::new("Rajasthani Thali", ["dal", "churma"], 250.0, true);
    /// assert_eq!(
    ///     MenuFormatter::default().describe(&thali),
    ///     "RAJASTHANI THALI (Veg) - Items: dal, churma - Rs.250.00"
    /// );
    /// ```
    pub fn describe(&self, thali: &ComboItem) -> String {
        let items = thali.items.join(self.config.item_separator.as_str());
        self.description_line(&thali.name, thali.is_veg, &items, thali.price)
    }

    /// Describes a loose record.
    ///
    /// All four keys must be present; beyond that, `name` must be text,
    /// `items` a sequence and `price` a number. `isVeg` is read by
    /// truthiness, so `1` or `"yes"` count as vegetarian.
    pub fn describe_value(&self, record: &Value) -> ValidationResult<String> {
        let record = expect_object("thali", record)?;
        require_fields(record, &REQUIRED_FIELDS)?;

        let field = |key: &str| {
            record.get(key).ok_or_else(|| ValidationError::Required {
                field: key.to_string(),
            })
        };

        let name = expect_text("name", field("name")?)?;
        let items = expect_sequence("items", field("items")?)?;
        let price = expect_number("price", field("price")?)?;
        let is_veg = is_truthy(field("isVeg")?);

        let items = items
            .iter()
            .map(item_label)
            .collect::<Vec<_>>()
            .join(self.config.item_separator.as_str());

        Ok(self.description_line(name, is_veg, &items, price))
    }

    fn description_line(&self, name: &str, is_veg: bool, items: &str, price: f64) -> String {
        format!(
            "{} ({}) - Items: {} - {}{}",
            name.to_uppercase(),
            diet_label(is_veg),
            items,
            self.config.currency_prefix,
            format_fixed(price, self.config.price_decimals)
        )
    }

    /// Builds the customer receipt for a non-empty order.
    ///
    /// Line prices and the total use plain number rendering, so `250` stays
    /// `250` and `0.1 + 0.2` shows every digit of the raw sum.
    pub fn receipt(&self, customer_name: &str, thalis: &[ComboItem]) -> ValidationResult<String> {
        if thalis.is_empty() {
            return Err(ValidationError::Empty {
                field: "thalis".to_string(),
            });
        }

        let prefix = &self.config.currency_prefix;
        let total = thalis.iter().fold(0.0, |sum, thali| sum + thali.price);

        let mut lines = Vec::with_capacity(thalis.len() + 6);
        lines.push(self.config.receipt_title.clone());
        lines.push(self.config.separator.clone());
        lines.push(format!("Customer: {}", customer_name.to_uppercase()));
        lines.extend(
            thalis
                .iter()
                .map(|thali| format!("- {} x {}{}", thali.name, prefix, format_number(thali.price))),
        );
        lines.push(self.config.separator.clone());
        lines.push(format!("Total: {}{}", prefix, format_number(total)));
        lines.push(format!("Items: {}", thalis.len()));

        trace!(customer = %customer_name, items = thalis.len(), total, "Built receipt");
        Ok(lines.join("\n"))
    }
}

/// Renders one entry of a loose `items` sequence as text.
///
/// `null` becomes empty and numbers use plain rendering. A nested sequence
/// is flattened to its labels joined by `,`, and an object falls back to
/// its JSON text.
fn item_label(item: &Value) -> String {
    match item {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(n) => n.as_f64().map(format_number).unwrap_or_else(|| n.to_string()),
        Value::Array(values) => values.iter().map(item_label).collect::<Vec<_>>().join(","),
        Value::Object(_) => item.to_string(),
    }
}

impl ComboItem {
    /// One-line description using the default format.
    pub fn describe(&self) -> String {
        MenuFormatter::default().describe(self)
    }
}

// =============================================================================
// Typed API
// =============================================================================

/// Summarises a set of thalis, or `None` when the set is empty.
///
/// ## Example
/// ```rust
/// use tally_core::{menu::thali_stats, ComboItem};
///
/// let menu = [
///     ComboItem::new("Gujarati Thali", ["dhokla"], 200.0, true),
///     ComboItem::new("Mutton Thali", ["rogan josh"], 400.0, false),
/// ];
/// let stats = thali_stats(&menu).unwrap();
/// assert_eq!(stats.avg_price, "300.00");
/// assert_eq!(stats.veg_count + stats.non_veg_count, stats.total_thalis);
/// ```
pub fn thali_stats(thalis: &[ComboItem]) -> Option<ThaliStats> {
    let range = fare_range(thalis.iter().map(|thali| thali.price))?;

    let total_thalis = thalis.len();
    let veg_count = thalis.iter().filter(|thali| thali.is_veg).count();
    let total_cost = thalis.iter().fold(0.0, |sum, thali| sum + thali.price);

    Some(ThaliStats {
        total_thalis,
        veg_count,
        non_veg_count: total_thalis - veg_count,
        avg_price: format_fixed(total_cost / total_thalis as f64, 2),
        cheapest: range.cheapest,
        costliest: range.costliest,
        names: thalis.iter().map(|thali| thali.name.clone()).collect(),
    })
}

/// Thalis whose name or any dish contains `query`, ignoring case.
///
/// Input order is kept. An empty query matches everything.
pub fn search_menu<'a>(thalis: &'a [ComboItem], query: &str) -> Vec<&'a ComboItem> {
    let query = query.to_lowercase();
    thalis.iter().filter(|thali| thali.mentions(&query)).collect()
}

// =============================================================================
// Loose Entry Points
// =============================================================================

fn decode_thalis(records: &Value) -> ValidationResult<Vec<ComboItem>> {
    expect_non_empty_sequence("thalis", records)?
        .iter()
        .map(ComboItem::from_value)
        .collect()
}

/// Describes a loose record, or returns `""` when it is not an object or a
/// required key is missing.
///
/// ## Example
/// ```rust
/// use serde_json::json;
/// use tally_core::menu::create_thali_description;
///
/// let thali = json!({"name": "Rajasthani Thali", "items": ["dal", "churma"], "price": 250, "isVeg": true});
/// assert_eq!(
///     create_thali_description(&thali),
///     "RAJASTHANI THALI (Veg) - Items: dal, churma - Rs.250.00"
/// );
/// assert_eq!(create_thali_description(&json!({"name": "X"})), "");
/// ```
pub fn create_thali_description(record: &Value) -> String {
    MenuFormatter::default()
        .describe_value(record)
        .unwrap_or_else(|err| {
            debug!(error = %err, "Rejected thali description");
            String::new()
        })
}

/// Summarises a loose sequence of thalis.
///
/// Returns `None` for a non-sequence, an empty sequence, or when any element
/// is not a well-formed thali.
pub fn get_thali_stats(records: &Value) -> Option<ThaliStats> {
    match decode_thalis(records) {
        Ok(thalis) => thali_stats(&thalis),
        Err(err) => {
            debug!(error = %err, "Rejected thali stats input");
            None
        }
    }
}

fn try_search_thali_menu(records: &Value, query: &Value) -> ValidationResult<Vec<ComboItem>> {
    let records = expect_sequence("thalis", records)?;
    let query = expect_text("query", query)?.to_lowercase();

    Ok(records
        .iter()
        .filter_map(|record| match ComboItem::from_value(record) {
            Ok(thali) => Some(thali),
            Err(err) => {
                trace!(error = %err, "Skipping malformed thali in search");
                None
            }
        })
        .filter(|thali| thali.mentions(&query))
        .collect())
}

/// Searches a loose sequence of thalis by name or dish.
///
/// Returns an empty `Vec` both for invalid input and for no matches.
/// Elements that are not well-formed thalis never match.
pub fn search_thali_menu(records: &Value, query: &Value) -> Vec<ComboItem> {
    try_search_thali_menu(records, query).unwrap_or_else(|err| {
        debug!(error = %err, "Rejected thali search");
        Vec::new()
    })
}

fn try_generate_thali_receipt(customer_name: &Value, records: &Value) -> ValidationResult<String> {
    let customer_name = expect_text("customer name", customer_name)?;
    let thalis = decode_thalis(records)?;
    MenuFormatter::default().receipt(customer_name, &thalis)
}

/// Builds a receipt from loose input, or `""` when the customer name is not
/// text or the order is empty or malformed.
pub fn generate_thali_receipt(customer_name: &Value, records: &Value) -> String {
    try_generate_thali_receipt(customer_name, records).unwrap_or_else(|err| {
        debug!(error = %err, "Rejected thali receipt");
        String::new()
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
