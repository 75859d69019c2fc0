//! # sheet-core
//!
//! Core types and traits for the wallet-sheet payment component.
//!
//! This crate provides:
//! - `Amount`, `PaymentContext`, `SummaryItem` and `Configuration` inputs
//! - ISO 3166-1 / ISO 4217 allow-lists and pure validators
//! - The version-gated `PaymentNetwork` capability table
//! - `build_payment_request` for the provider request
//! - `CapabilityOracle`, `SheetFactory` and `PaymentSheet` platform seams
//! - `ComponentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use sheet_core::{build_payment_request, supported_networks, Amount, Configuration, PaymentContext};
//!
//! let context = PaymentContext::new(Amount::new(2000, "EUR"), "NL");
//! let configuration = Configuration::from_toml(&std::fs::read_to_string("summary.toml")?)?;
//!
//! let networks = supported_networks(Some(&brands), platform.version());
//! let request = build_payment_request(&context, &configuration, &networks);
//! ```

pub mod amount;
pub mod configuration;
pub mod error;
pub mod iso;
pub mod network;
pub mod platform;
pub mod request;
pub mod summary;
pub mod validation;

// Re-exports for convenience
pub use amount::{Amount, PaymentContext};
pub use configuration::{Configuration, ContactField};
pub use error::{ComponentError, ComponentResult};
pub use network::{
    brand_network, supported_networks, ParseVersionError, PaymentNetwork, PlatformVersion,
    CAPABILITY_TABLE,
};
pub use platform::{
    AuthorizationCompletion, AuthorizationStatus, BoxedPaymentPlatform, CapabilityOracle,
    PaymentPlatform, PaymentSheet, SheetFactory, SheetId,
};
pub use request::{build_payment_request, MerchantCapability, PaymentRequest};
pub use summary::{SummaryAmount, SummaryItem};
pub use validation::{
    is_grand_total_valid, is_valid_country_code, is_valid_currency_code,
    is_valid_summary_amount,
};
