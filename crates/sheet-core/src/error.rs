//! # Component Error Types
//!
//! Typed error handling for the wallet payment component.
//! Construction returns `Result<T, ComponentError>`; runtime failures
//! (cancellation, bad tokens) reach the delegate as the same type.

use thiserror::Error;

/// Core error type for the wallet component
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComponentError {
    /// The device or environment cannot make payments at all
    #[error("Device unsupported: this environment cannot make wallet payments")]
    DeviceUnsupported,

    /// No usable card is set up for any of the supported networks
    #[error("User cannot make payment with any of the supported networks")]
    UserCannotMakePayment,

    /// Country code is not ISO 3166-1 alpha-2
    #[error("Invalid country code")]
    InvalidCountryCode,

    /// Currency code is not ISO 4217
    #[error("Invalid currency code")]
    InvalidCurrencyCode,

    /// The configuration has no summary items
    #[error("Summary items are empty")]
    EmptySummaryItems,

    /// The last summary item (grand total) is negative
    #[error("Grand total is negative")]
    NegativeGrandTotal,

    /// A summary item has a not-a-number amount
    #[error("Summary item has an invalid amount")]
    InvalidSummaryItem,

    /// The authorized payment carried no token data
    #[error("Payment token is invalid")]
    InvalidToken,

    /// The sheet finished before the result was confirmed
    #[error("Payment was cancelled")]
    Cancelled,

    /// Configuration errors (missing env vars, malformed TOML)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Opaque platform failure
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl ComponentError {
    /// Returns true if this error comes from construction-time validation
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ComponentError::DeviceUnsupported
                | ComponentError::UserCannotMakePayment
                | ComponentError::InvalidCountryCode
                | ComponentError::InvalidCurrencyCode
                | ComponentError::EmptySummaryItems
                | ComponentError::NegativeGrandTotal
                | ComponentError::InvalidSummaryItem
        )
    }

    /// Returns true if the payer or environment cancelled the sheet
    pub fn is_cancellation(&self) -> bool {
        matches!(self, ComponentError::Cancelled)
    }

    /// Stable identifier for logs and host bridges
    pub fn code(&self) -> &'static str {
        match self {
            ComponentError::DeviceUnsupported => "device_unsupported",
            ComponentError::UserCannotMakePayment => "user_cannot_make_payment",
            ComponentError::InvalidCountryCode => "invalid_country_code",
            ComponentError::InvalidCurrencyCode => "invalid_currency_code",
            ComponentError::EmptySummaryItems => "empty_summary_items",
            ComponentError::NegativeGrandTotal => "negative_grand_total",
            ComponentError::InvalidSummaryItem => "invalid_summary_item",
            ComponentError::InvalidToken => "invalid_token",
            ComponentError::Cancelled => "cancelled",
            ComponentError::Configuration(_) => "configuration",
            ComponentError::Unknown(_) => "unknown",
        }
    }
}

/// Result type alias for component operations
pub type ComponentResult<T> = Result<T, ComponentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors() {
        assert!(ComponentError::InvalidCountryCode.is_validation());
        assert!(ComponentError::NegativeGrandTotal.is_validation());
        assert!(!ComponentError::Cancelled.is_validation());
        assert!(!ComponentError::Unknown("boom".into()).is_validation());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(ComponentError::Cancelled.code(), "cancelled");
        assert!(ComponentError::Cancelled.is_cancellation());
        assert_eq!(
            ComponentError::Configuration("x".into()).code(),
            "configuration"
        );
        assert_eq!(
            ComponentError::Unknown("sheet".into()).to_string(),
            "Unknown error: sheet"
        );
    }
}
