//! # Merchant Configuration
//!
//! What the merchant declares for a wallet payment: the summary shown on the
//! sheet, the merchant identifier, and which contact fields to collect.
//! Can be built in code or loaded from TOML:
//!
//! ```toml
//! merchant_identifier = "merchant.io.enginevector.shop"
//! allow_onboarding = false
//! required_billing_fields = ["postal_address"]
//!
//! [[summary_items]]
//! label = "Subtotal"
//! amount = "18.00"
//!
//! [[summary_items]]
//! label = "EngineVector"
//! amount = "20.00"
//! ```

use crate::summary::SummaryItem;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Contact details the sheet can ask the payer for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    PostalAddress,
    EmailAddress,
    PhoneNumber,
    Name,
    PhoneticName,
}

/// Merchant configuration for a wallet payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Line items; the last one is the grand total
    pub summary_items: Vec<SummaryItem>,

    /// Merchant identifier registered with the wallet provider
    #[serde(default)]
    pub merchant_identifier: String,

    /// Show the sheet even if the payer has no usable card, so they can add one
    #[serde(default)]
    pub allow_onboarding: bool,

    /// Billing contact fields the payer must provide
    #[serde(default)]
    pub required_billing_fields: BTreeSet<ContactField>,

    /// Shipping contact fields the payer must provide
    #[serde(default)]
    pub required_shipping_fields: BTreeSet<ContactField>,
}

impl Configuration {
    /// Create a configuration with no required contact fields
    pub fn new(summary_items: Vec<SummaryItem>, merchant_identifier: impl Into<String>) -> Self {
        Self {
            summary_items,
            merchant_identifier: merchant_identifier.into(),
            allow_onboarding: false,
            required_billing_fields: BTreeSet::new(),
            required_shipping_fields: BTreeSet::new(),
        }
    }

    /// Builder: allow onboarding
    pub fn with_onboarding(mut self, allow: bool) -> Self {
        self.allow_onboarding = allow;
        self
    }

    /// Builder: require billing fields
    pub fn with_billing_fields(mut self, fields: impl IntoIterator<Item = ContactField>) -> Self {
        self.required_billing_fields = fields.into_iter().collect();
        self
    }

    /// Builder: require shipping fields
    pub fn with_shipping_fields(mut self, fields: impl IntoIterator<Item = ContactField>) -> Self {
        self.required_shipping_fields = fields.into_iter().collect();
        self
    }

    /// Load a configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::SummaryAmount;
    use rust_decimal_macros::dec;

    #[test]
    fn test_configuration_builder() {
        let config = Configuration::new(
            vec![SummaryItem::new("Total", dec!(20))],
            "merchant.io.enginevector.test",
        )
        .with_onboarding(true)
        .with_billing_fields([ContactField::PostalAddress, ContactField::Name]);

        assert!(config.allow_onboarding);
        assert_eq!(config.required_billing_fields.len(), 2);
        assert!(config.required_shipping_fields.is_empty());
    }

    #[test]
    fn test_configuration_from_toml() {
        let config = Configuration::from_toml(
            r#"
            merchant_identifier = "merchant.io.enginevector.shop"
            required_shipping_fields = ["email_address", "phone_number"]

            [[summary_items]]
            label = "Discount"
            amount = "-2.00"

            [[summary_items]]
            label = "EngineVector"
            amount = "20.00"
            "#,
        )
        .unwrap();

        assert_eq!(config.merchant_identifier, "merchant.io.enginevector.shop");
        assert!(!config.allow_onboarding);
        assert!(config.required_billing_fields.is_empty());
        assert!(config
            .required_shipping_fields
            .contains(&ContactField::EmailAddress));
        assert_eq!(config.summary_items.len(), 2);
        assert_eq!(
            config.summary_items[1].amount,
            SummaryAmount::Value(dec!(20.00))
        );
    }

    #[test]
    fn test_configuration_rejects_bad_amount() {
        let result = Configuration::from_toml(
            r#"
            merchant_identifier = "merchant.test"
            summary_items = [{ label = "Total", amount = "abc" }]
            "#,
        );
        assert!(result.is_err());
    }
}
