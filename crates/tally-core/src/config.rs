//! # Format Configuration
//!
//! Text settings for thali descriptions and receipts.
//!
//! The defaults reproduce the fixed menu format exactly; a caller that prints
//! receipts for another counter can override labels from TOML text it has
//! already loaded. This module never touches the file system or environment.
//!
//! ## Configuration Format
//! ```toml
//! currency_prefix = "Rs."
//! receipt_title = "THALI RECEIPT"
//! separator = "---"
//! item_separator = ", "
//! price_decimals = 2
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::MAX_DECIMAL_PLACES;

/// Labels and precision used when rendering menu text.
///
/// Every field falls back to its default when missing from TOML, so a file
/// holding only `receipt_title = "..."` is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatConfig {
    /// Prefix before every amount ("Rs.").
    #[serde(default = "default_currency_prefix")]
    pub currency_prefix: String,

    /// First line of a receipt.
    #[serde(default = "default_receipt_title")]
    pub receipt_title: String,

    /// Line that frames the receipt body.
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Joins dish names in a description.
    #[serde(default = "default_item_separator")]
    pub item_separator: String,

    /// Fractional digits for description prices.
    #[serde(default = "default_price_decimals")]
    pub price_decimals: u32,
}

fn default_currency_prefix() -> String {
    "Rs.".to_string()
}

fn default_receipt_title() -> String {
    "THALI RECEIPT".to_string()
}

fn default_separator() -> String {
    "---".to_string()
}

fn default_item_separator() -> String {
    ", ".to_string()
}

fn default_price_decimals() -> u32 {
    2
}

impl Default for FormatConfig {
    fn default() -> Self {
        FormatConfig {
            currency_prefix: default_currency_prefix(),
            receipt_title: default_receipt_title(),
            separator: default_separator(),
            item_separator: default_item_separator(),
            price_decimals: default_price_decimals(),
        }
    }
}

impl FormatConfig {
    /// Parses and validates a config from TOML text.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::config::FormatConfig;
    ///
    /// let config = FormatConfig::from_toml_str(r#"receipt_title = "DHABA BILL""#).unwrap();
    /// assert_eq!(config.receipt_title, "DHABA BILL");
    /// assert_eq!(config.currency_prefix, "Rs.");
    /// ```
    pub fn from_toml_str(text: &str) -> CoreResult<Self> {
        let config: FormatConfig = toml::from_str(text)?;
        config.validate()?;
        debug!(title = %config.receipt_title, "Loaded format config");
        Ok(config)
    }

    /// Serializes the config back to TOML.
    pub fn to_toml_string(&self) -> CoreResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CoreResult<()> {
        if self.receipt_title.trim().is_empty() {
            return Err(CoreError::InvalidConfig(
                "receipt_title must not be empty".into(),
            ));
        }

        if self.separator.trim().is_empty() {
            return Err(CoreError::InvalidConfig("separator must not be empty".into()));
        }

        if self.price_decimals > MAX_DECIMAL_PLACES {
            return Err(CoreError::InvalidConfig(format!(
                "price_decimals must be at most {}, got {}",
                MAX_DECIMAL_PLACES, self.price_decimals
            )));
        }

        Ok(())
    }
}
