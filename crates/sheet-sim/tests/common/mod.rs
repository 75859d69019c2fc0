#![allow(dead_code)]

use rust_decimal_macros::dec;
use sheet_applepay::{ApplePayComponent, ApplePayPaymentMethod, AuthorizedPayment};
use sheet_core::{
    Amount, ComponentError, Configuration, PaymentContext, PaymentNetwork, PlatformVersion,
    SummaryItem,
};
use sheet_sim::{RecordingDelegate, SimulatedPlatform};
use std::sync::Arc;

pub const MERCHANT: &str = "merchant.io.enginevector.test";

pub fn platform() -> Arc<SimulatedPlatform> {
    Arc::new(SimulatedPlatform::new(PlatformVersion::new(17, 0, 0)))
}

pub fn method() -> ApplePayPaymentMethod {
    ApplePayPaymentMethod::new("Apple Pay").with_brands(["visa", "mc", "amex"])
}

pub fn context(country: &str, currency: &str) -> PaymentContext {
    PaymentContext::new(Amount::new(2000, currency), country)
}

pub fn configuration(items: Vec<SummaryItem>) -> Configuration {
    Configuration::new(items, MERCHANT)
}

pub fn total(value: rust_decimal::Decimal) -> Vec<SummaryItem> {
    vec![SummaryItem::new("EngineVector", value)]
}

pub fn payment() -> AuthorizedPayment {
    AuthorizedPayment::new(b"simulated-token".to_vec()).with_network(PaymentNetwork::Visa)
}

/// A valid component wired to `delegate`
pub fn component(
    platform: Arc<SimulatedPlatform>,
    delegate: Arc<RecordingDelegate>,
) -> ApplePayComponent {
    ApplePayComponent::new(
        method(),
        context("NL", "EUR"),
        configuration(total(dec!(20.00))),
        platform,
    )
    .unwrap()
    .with_delegate(delegate)
}

/// Construction error for the given inputs on a capable platform
pub fn construction_error(context: PaymentContext, configuration: Configuration) -> ComponentError {
    match ApplePayComponent::new(method(), context, configuration, platform()) {
        Ok(_) => panic!("construction unexpectedly succeeded"),
        Err(error) => error,
    }
}
