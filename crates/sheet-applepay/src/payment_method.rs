//! # Apple Pay Payment Method
//!
//! Payment method metadata as returned by the payment backend.

use serde::{Deserialize, Serialize};
use sheet_core::{supported_networks, PaymentNetwork, PlatformVersion};

/// The wallet payment method offered to the payer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplePayPaymentMethod {
    /// Payment method type ("applepay")
    #[serde(rename = "type", default = "default_type")]
    pub kind: String,

    /// Display name
    pub name: String,

    /// Card brands the merchant accepts (backend spelling: "visa", "mc", ...).
    /// `None` accepts every network the platform supports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brands: Option<Vec<String>>,
}

fn default_type() -> String {
    "applepay".to_string()
}

impl ApplePayPaymentMethod {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            kind: default_type(),
            name: name.into(),
            brands: None,
        }
    }

    /// Builder: restrict to declared brands
    pub fn with_brands<I, S>(mut self, brands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.brands = Some(brands.into_iter().map(Into::into).collect());
        self
    }

    /// Networks usable on a platform of `version`
    pub fn supported_networks(&self, version: PlatformVersion) -> Vec<PaymentNetwork> {
        supported_networks(self.brands.as_deref(), version)
    }
}
