//! # Scenarios
//!
//! Simulator settings and the scripted payment session the binary runs.

use crate::host::{HostError, SheetHost};
use sheet_applepay::AuthorizedPayment;
use sheet_core::{AuthorizationStatus, Configuration, PlatformVersion, SheetId, SummaryItem};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Which of finalize and sheet-finish reaches the component first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    FinalizeFirst,
    FinishFirst,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown scenario '{0}' (expected finalize-first or finish-first)")]
pub struct ParseScenarioError(pub String);

impl FromStr for Scenario {
    type Err = ParseScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "finalize-first" => Ok(Scenario::FinalizeFirst),
            "finish-first" => Ok(Scenario::FinishFirst),
            other => Err(ParseScenarioError(other.to_string())),
        }
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scenario::FinalizeFirst => write!(f, "finalize-first"),
            Scenario::FinishFirst => write!(f, "finish-first"),
        }
    }
}

/// Simulator settings
#[derive(Debug, Clone)]
pub struct SimSettings {
    pub scenario: Scenario,
    pub platform_version: PlatformVersion,
    /// Declared card brands; `None` accepts every network the platform knows
    pub brands: Option<Vec<String>>,
    /// Amount in minor units
    pub amount: i64,
    pub currency_code: String,
    pub country_code: String,
}

impl SimSettings {
    /// Load from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let scenario = match std::env::var("SIM_SCENARIO") {
            Ok(value) => value.parse()?,
            Err(_) => Scenario::FinalizeFirst,
        };
        let platform_version = match std::env::var("SIM_PLATFORM_VERSION") {
            Ok(value) => value.parse()?,
            Err(_) => PlatformVersion::new(17, 0, 0),
        };
        let brands = std::env::var("SIM_BRANDS").ok().map(|value| parse_brands(&value));

        Ok(Self {
            scenario,
            platform_version,
            brands,
            amount: std::env::var("SIM_AMOUNT")
                .ok()
                .and_then(|a| a.parse().ok())
                .unwrap_or(2000),
            currency_code: std::env::var("SIM_CURRENCY").unwrap_or_else(|_| "EUR".to_string()),
            country_code: std::env::var("SIM_COUNTRY").unwrap_or_else(|_| "NL".to_string()),
        })
    }
}

/// Split a comma separated brand list
pub fn parse_brands(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(str::to_string)
        .collect()
}

/// Load the demo configuration from config/summary.toml
pub fn load_demo_configuration() -> anyhow::Result<Configuration> {
    let config_paths = [
        "config/summary.toml",
        "crates/sheet-sim/config/summary.toml",
        "../config/summary.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let configuration = Configuration::from_toml(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
            info!(
                "Loaded {} summary items from {}",
                configuration.summary_items.len(),
                path
            );
            return Ok(configuration);
        }
    }

    warn!("No summary file found, using a single demo item");
    Ok(Configuration::new(
        vec![SummaryItem::new("Demo Shop", rust_decimal::Decimal::new(2000, 2))],
        "merchant.com.example.demo",
    ))
}

/// What happened during a scripted session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioReport {
    pub sheet: SheetId,
    /// Status reported to the sheet; `None` if the completion was dropped
    pub authorization_status: Option<AuthorizationStatus>,
    /// Whether `on_done` of the finalize call ran
    pub finalize_done: bool,
}

/// Delays used to order finalize and sheet-finish
const FIRST: Duration = Duration::from_millis(200);
const SECOND: Duration = Duration::from_millis(800);

/// Present, authorize, then deliver finalize and finish in scenario order
pub async fn run_scenario(
    host: &SheetHost,
    scenario: Scenario,
    payment: AuthorizedPayment,
    success: bool,
) -> Result<ScenarioReport, HostError> {
    let sheet = host.present().await?;
    info!("Presenting sheet {} ({})", sheet, scenario);
    host.appear(sheet)?;

    let status = host.authorize(sheet, payment)?;

    let (finalize_delay, finish_delay) = match scenario {
        Scenario::FinalizeFirst => (FIRST, SECOND),
        Scenario::FinishFirst => (SECOND, FIRST),
    };
    let finalize = host.finalize_after(finalize_delay, success);
    let finish = host.finish_after(finish_delay, sheet);

    let done = finalize.await.map_err(|_| HostError::Stopped)??;
    finish.await.map_err(|_| HostError::Stopped)??;

    let authorization_status = status.await.ok();
    let finalize_done = done.await.is_ok();

    Ok(ScenarioReport {
        sheet,
        authorization_status,
        finalize_done,
    })
}
