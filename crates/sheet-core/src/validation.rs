//! # Validators
//!
//! Pure checks over merchant input. Each one answers a single question;
//! the component decides the order they run in and which error wins.

use crate::iso;
use crate::summary::{SummaryAmount, SummaryItem};
use rust_decimal::Decimal;

/// ISO 3166-1 alpha-2 membership
pub fn is_valid_country_code(code: &str) -> bool {
    iso::is_country_code(code)
}

/// ISO 4217 membership
pub fn is_valid_currency_code(code: &str) -> bool {
    iso::is_currency_code(code)
}

/// False only for the not-a-number sentinel
pub fn is_valid_summary_amount(item: &SummaryItem) -> bool {
    !item.amount.is_nan()
}

/// True iff there is at least one item and the last one is >= 0.
///
/// Earlier items may be negative (discounts).
pub fn is_grand_total_valid(items: &[SummaryItem]) -> bool {
    match items.last().map(|item| item.amount) {
        Some(SummaryAmount::Value(total)) => total >= Decimal::ZERO,
        Some(SummaryAmount::NotANumber) | None => false,
    }
}

/// Index of the first summary item with an invalid amount
pub fn first_invalid_summary_item(items: &[SummaryItem]) -> Option<usize> {
    items.iter().position(|item| !is_valid_summary_amount(item))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn items(values: &[Decimal]) -> Vec<SummaryItem> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| SummaryItem::new(format!("item {}", i), *v))
            .collect()
    }

    #[test]
    fn test_codes() {
        assert!(is_valid_country_code("NL"));
        assert!(!is_valid_country_code("ZZ"));
        assert!(is_valid_currency_code("EUR"));
        assert!(!is_valid_currency_code("ZZZ"));
    }

    #[test]
    fn test_grand_total_only_checks_last_item() {
        assert!(is_grand_total_valid(&items(&[dec!(-5), dec!(-3), dec!(20)])));
        assert!(is_grand_total_valid(&items(&[dec!(0)])));
        assert!(!is_grand_total_valid(&items(&[dec!(20), dec!(-0.01)])));
        assert!(!is_grand_total_valid(&[]));
    }

    #[test]
    fn test_nan_grand_total_is_invalid() {
        let list = vec![SummaryItem::not_a_number("Total")];
        assert!(!is_grand_total_valid(&list));
    }

    #[test]
    fn test_summary_amount_validity() {
        let mut list = items(&[dec!(1), dec!(2)]);
        assert_eq!(first_invalid_summary_item(&list), None);

        list.insert(1, SummaryItem::not_a_number("Tax"));
        assert!(!is_valid_summary_amount(&list[1]));
        assert_eq!(first_invalid_summary_item(&list), Some(1));
    }
}
