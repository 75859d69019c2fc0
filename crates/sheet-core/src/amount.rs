//! # Amount & Payment Context
//!
//! Money and locale inputs for a wallet payment.
//! Amounts are kept in the smallest currency unit; the currency and country
//! codes stay as strings so that invalid codes can reach validation.

use crate::iso;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Amount in the smallest currency unit (cents for USD)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    /// Value in minor units
    pub value: i64,
    /// ISO 4217 currency code (e.g. "EUR")
    pub currency_code: String,
}

impl Amount {
    /// Create a new amount from minor units
    pub fn new(value: i64, currency_code: impl Into<String>) -> Self {
        Self {
            value,
            currency_code: currency_code.into(),
        }
    }

    /// Whether the currency code is on the ISO 4217 allow-list
    pub fn has_valid_currency(&self) -> bool {
        iso::is_currency_code(&self.currency_code)
    }

    /// Convert to a major-unit decimal (1099 USD -> 10.99).
    ///
    /// Returns `None` for currencies outside the allow-list, since their
    /// exponent is unknown.
    pub fn to_decimal(&self) -> Option<Decimal> {
        let exponent = iso::currency_exponent(&self.currency_code)?;
        Some(Decimal::new(self.value, u32::from(exponent)))
    }

    /// Format for display (e.g., "10.99 USD")
    pub fn display(&self) -> String {
        match self.to_decimal() {
            Some(decimal) => format!("{} {}", decimal, self.currency_code),
            None => format!("{} {}", self.value, self.currency_code),
        }
    }
}

/// Amount plus the country the payment is made in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentContext {
    /// Amount to charge
    pub amount: Amount,
    /// ISO 3166-1 alpha-2 country code (e.g. "NL")
    pub country_code: String,
}

impl PaymentContext {
    pub fn new(amount: Amount, country_code: impl Into<String>) -> Self {
        Self {
            amount,
            country_code: country_code.into(),
        }
    }

    /// Currency of the context amount
    pub fn currency_code(&self) -> &str {
        &self.amount.currency_code
    }
}
