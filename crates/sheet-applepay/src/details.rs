//! # Payment Details
//!
//! What the sheet hands over on authorization, and the details the component
//! submits to its delegate for the backend payment call.

use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sheet_core::{Amount, ComponentError, ComponentResult, PaymentNetwork};

/// Contact details collected by the sheet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

/// A payment the payer authorized on the sheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorizedPayment {
    /// Opaque encrypted token data
    pub token: Vec<u8>,
    /// Network of the card the payer picked
    pub network: Option<PaymentNetwork>,
    pub billing_contact: Option<Contact>,
    pub shipping_contact: Option<Contact>,
}

impl AuthorizedPayment {
    pub fn new(token: impl Into<Vec<u8>>) -> Self {
        Self {
            token: token.into(),
            ..Self::default()
        }
    }

    /// Builder: set card network
    pub fn with_network(mut self, network: PaymentNetwork) -> Self {
        self.network = Some(network);
        self
    }

    /// Builder: set billing contact
    pub fn with_billing_contact(mut self, contact: Contact) -> Self {
        self.billing_contact = Some(contact);
        self
    }

    /// Builder: set shipping contact
    pub fn with_shipping_contact(mut self, contact: Contact) -> Self {
        self.shipping_contact = Some(contact);
        self
    }
}

/// Wallet details sent with the payment call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplePayDetails {
    #[serde(rename = "type")]
    pub kind: String,

    /// Base64 of the payment token
    pub apple_pay_token: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_contact: Option<Contact>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_contact: Option<Contact>,
}

impl ApplePayDetails {
    /// Build details from an authorized payment.
    ///
    /// Fails with `InvalidToken` when the token carries no data.
    pub fn from_payment(payment: &AuthorizedPayment) -> ComponentResult<Self> {
        if payment.token.is_empty() {
            return Err(ComponentError::InvalidToken);
        }

        Ok(Self {
            kind: "applepay".to_string(),
            apple_pay_token: base64::engine::general_purpose::STANDARD.encode(&payment.token),
            network: payment.network.map(|n| n.as_str().to_string()),
            billing_contact: payment.billing_contact.clone(),
            shipping_contact: payment.shipping_contact.clone(),
        })
    }
}

/// Data delivered to the delegate on submit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentComponentData {
    pub details: ApplePayDetails,
    pub amount: Amount,
    pub submitted_at: DateTime<Utc>,
}

impl PaymentComponentData {
    pub fn new(details: ApplePayDetails, amount: Amount) -> Self {
        Self {
            details,
            amount,
            submitted_at: Utc::now(),
        }
    }

    /// JSON body for the backend payment call
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
