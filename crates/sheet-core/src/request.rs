//! # Payment Request Builder
//!
//! Assembles the request handed to the wallet platform's sheet factory.
//! Building is pure: the same inputs always give the same request, so a
//! sheet can be recreated from it after the previous one was used up.

use crate::amount::PaymentContext;
use crate::configuration::{Configuration, ContactField};
use crate::network::PaymentNetwork;
use crate::summary::SummaryItem;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Merchant processing capability; requests always ask for 3-D Secure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MerchantCapability {
    ThreeDSecure,
}

/// Provider payment request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub summary_items: Vec<SummaryItem>,
    pub merchant_capability: MerchantCapability,
    pub supported_networks: Vec<PaymentNetwork>,
    pub currency_code: String,
    pub merchant_identifier: String,
    pub country_code: String,
    pub required_billing_fields: BTreeSet<ContactField>,
    pub required_shipping_fields: BTreeSet<ContactField>,
}

impl PaymentRequest {
    /// The last summary item
    pub fn grand_total(&self) -> Option<&SummaryItem> {
        self.summary_items.last()
    }
}

/// Build a payment request from already validated inputs
pub fn build_payment_request(
    context: &PaymentContext,
    configuration: &Configuration,
    supported_networks: &[PaymentNetwork],
) -> PaymentRequest {
    PaymentRequest {
        summary_items: configuration.summary_items.clone(),
        merchant_capability: MerchantCapability::ThreeDSecure,
        supported_networks: supported_networks.to_vec(),
        currency_code: context.amount.currency_code.clone(),
        merchant_identifier: configuration.merchant_identifier.clone(),
        country_code: context.country_code.clone(),
        required_billing_fields: configuration.required_billing_fields.clone(),
        required_shipping_fields: configuration.required_shipping_fields.clone(),
    }
}
