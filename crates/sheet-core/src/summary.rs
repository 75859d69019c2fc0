//! # Summary Items
//!
//! Labeled line items shown on the payment sheet before authorization.
//! The last item of a sequence is the grand total.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Amount of a summary item.
///
/// Wallet platforms carry decimal amounts that may hold a not-a-number
/// sentinel; it is modeled explicitly so validation can reject it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SummaryAmount {
    Value(Decimal),
    NotANumber,
}

impl SummaryAmount {
    /// Returns the decimal value, if any
    pub fn value(&self) -> Option<Decimal> {
        match self {
            SummaryAmount::Value(v) => Some(*v),
            SummaryAmount::NotANumber => None,
        }
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, SummaryAmount::NotANumber)
    }
}

impl From<Decimal> for SummaryAmount {
    fn from(value: Decimal) -> Self {
        SummaryAmount::Value(value)
    }
}

impl FromStr for SummaryAmount {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("nan") {
            return Ok(SummaryAmount::NotANumber);
        }
        Decimal::from_str(trimmed).map(SummaryAmount::Value)
    }
}

impl TryFrom<String> for SummaryAmount {
    type Error = rust_decimal::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SummaryAmount> for String {
    fn from(amount: SummaryAmount) -> Self {
        amount.to_string()
    }
}

impl fmt::Display for SummaryAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryAmount::Value(v) => write!(f, "{}", v),
            SummaryAmount::NotANumber => write!(f, "NaN"),
        }
    }
}

/// A labeled amount on the payment sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryItem {
    /// Label shown to the payer (e.g. "Shipping")
    pub label: String,
    /// Amount in major units
    pub amount: SummaryAmount,
}

impl SummaryItem {
    pub fn new(label: impl Into<String>, amount: impl Into<SummaryAmount>) -> Self {
        Self {
            label: label.into(),
            amount: amount.into(),
        }
    }

    /// A line item whose amount is the not-a-number sentinel
    pub fn not_a_number(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            amount: SummaryAmount::NotANumber,
        }
    }
}

/// The grand total of a summary sequence (its last item)
pub fn grand_total(items: &[SummaryItem]) -> Option<&SummaryItem> {
    items.last()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_summary_amount() {
        assert_eq!(
            "20.00".parse::<SummaryAmount>().unwrap(),
            SummaryAmount::Value(dec!(20.00))
        );
        assert_eq!(
            "NaN".parse::<SummaryAmount>().unwrap(),
            SummaryAmount::NotANumber
        );
        assert!("twenty".parse::<SummaryAmount>().is_err());
    }

    #[test]
    fn test_summary_item_serde() {
        let item: SummaryItem =
            serde_json::from_str(r#"{"label":"Total","amount":"-3.50"}"#).unwrap();
        assert_eq!(item.amount.value(), Some(dec!(-3.50)));

        let nan: SummaryItem = serde_json::from_str(r#"{"label":"Tax","amount":"NaN"}"#).unwrap();
        assert!(nan.amount.is_nan());

        let json = serde_json::to_string(&SummaryItem::new("Total", dec!(20))).unwrap();
        assert_eq!(json, r#"{"label":"Total","amount":"20"}"#);
    }

    #[test]
    fn test_grand_total_is_last_item() {
        let items = vec![
            SummaryItem::new("Item", dec!(5)),
            SummaryItem::new("Total", dec!(20)),
        ];
        assert_eq!(grand_total(&items).unwrap().label, "Total");
        assert!(grand_total(&[]).is_none());
    }
}
