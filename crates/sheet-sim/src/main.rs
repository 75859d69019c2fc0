//! # Wallet Sheet Simulator
//!
//! Runs one scripted wallet payment session against a simulated platform.
//!
//! ## Usage
//!
//! ```bash
//! # Optional component settings
//! export APPLE_PAY_MERCHANT_ID=merchant.io.enginevector.demo
//! export APPLE_PAY_SUMMARY_FILE=crates/sheet-sim/config/summary.toml
//!
//! # Simulator settings
//! export SIM_SCENARIO=finish-first
//! export SIM_PLATFORM_VERSION=14.5
//! export SIM_BRANDS=visa,mc,girocard
//!
//! sheet-sim
//! ```

use sheet_applepay::{ApplePayComponent, ApplePayPaymentMethod, AuthorizedPayment, ComponentSettings};
use sheet_core::{Amount, BoxedPaymentPlatform, Configuration, PaymentContext, PaymentNetwork};
use sheet_sim::{load_demo_configuration, run_scenario, RecordingDelegate, SheetHost, SimSettings, SimulatedPlatform};
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    print_banner();

    let sim = SimSettings::from_env()?;
    let configuration = load_configuration()?;

    info!("Scenario: {}", sim.scenario);
    info!("Platform version: {}", sim.platform_version);
    info!("Summary items: {}", configuration.summary_items.len());

    let mut method = ApplePayPaymentMethod::new("Apple Pay");
    if let Some(brands) = &sim.brands {
        method = method.with_brands(brands.iter().cloned());
    }

    let context = PaymentContext::new(
        Amount::new(sim.amount, sim.currency_code.clone()),
        sim.country_code.clone(),
    );
    let platform: BoxedPaymentPlatform = Arc::new(SimulatedPlatform::new(sim.platform_version));
    let delegate = Arc::new(RecordingDelegate::new());

    let component = ApplePayComponent::new(method, context, configuration, platform)?
        .with_delegate(delegate.clone());
    info!("Supported networks: {:?}", component.supported_networks());

    let network = component
        .supported_networks()
        .first()
        .copied()
        .unwrap_or(PaymentNetwork::Visa);
    let payment = AuthorizedPayment::new(b"simulated-payment-token".to_vec()).with_network(network);

    let (host, handle) = SheetHost::spawn(component);
    let report = run_scenario(&host, sim.scenario, payment, true).await?;
    drop(host);
    let component = handle.await?;

    info!("Sheet: {}", report.sheet);
    info!("Authorization status: {:?}", report.authorization_status);
    info!("Finalize completion ran: {}", report.finalize_done);
    info!("Finalization state: {:?}", component.finalization_state());

    for data in delegate.submissions() {
        info!("Submitted: {}", serde_json::to_string_pretty(&data.to_json()?)?);
    }
    for error in delegate.failures() {
        warn!("Failed: {} ({})", error, error.code());
    }

    Ok(())
}

/// Component settings from the environment, falling back to the demo summary
fn load_configuration() -> anyhow::Result<Configuration> {
    match ComponentSettings::from_env() {
        Ok(settings) if settings.summary_file.is_some() => Ok(settings.load_configuration()?),
        Ok(settings) => Ok(settings.apply(load_demo_configuration()?)),
        Err(e) => {
            warn!("{}; using demo configuration", e);
            load_demo_configuration()
        }
    }
}

fn print_banner() {
    println!(
        r#"
  Wallet Sheet Simulator
  ━━━━━━━━━━━━━━━━━━━━━━━
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
