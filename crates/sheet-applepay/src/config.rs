//! # Component Settings
//!
//! Environment-driven settings for the wallet component.
//! The merchant identifier comes from the environment; the summary items
//! come from a TOML file (see `sheet_core::configuration`).

use sheet_core::{ComponentError, ComponentResult, Configuration};
use std::env;
use std::path::PathBuf;
use tracing::info;

/// Wallet component settings
#[derive(Debug, Clone)]
pub struct ComponentSettings {
    /// Merchant identifier (merchant.*)
    pub merchant_identifier: String,

    /// Show the sheet even when the payer has no usable card
    pub allow_onboarding: bool,

    /// TOML file holding summary items and required contact fields
    pub summary_file: Option<PathBuf>,
}

impl ComponentSettings {
    /// Load settings from environment variables.
    ///
    /// Required env vars:
    /// - `APPLE_PAY_MERCHANT_ID`
    ///
    /// Optional:
    /// - `APPLE_PAY_ALLOW_ONBOARDING` (`true`/`false`, default `false`)
    /// - `APPLE_PAY_SUMMARY_FILE`
    pub fn from_env() -> ComponentResult<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let merchant_identifier = env::var("APPLE_PAY_MERCHANT_ID").map_err(|_| {
            ComponentError::Configuration("APPLE_PAY_MERCHANT_ID not set".to_string())
        })?;
        validate_merchant_identifier(&merchant_identifier)?;

        let allow_onboarding = match env::var("APPLE_PAY_ALLOW_ONBOARDING") {
            Ok(value) => value.trim().parse::<bool>().map_err(|_| {
                ComponentError::Configuration(format!(
                    "APPLE_PAY_ALLOW_ONBOARDING must be true or false, got {:?}",
                    value
                ))
            })?,
            Err(_) => false,
        };

        let summary_file = env::var("APPLE_PAY_SUMMARY_FILE").ok().map(PathBuf::from);

        Ok(Self {
            merchant_identifier,
            allow_onboarding,
            summary_file,
        })
    }

    /// Create settings with explicit values (for testing)
    pub fn new(merchant_identifier: impl Into<String>) -> Self {
        Self {
            merchant_identifier: merchant_identifier.into(),
            allow_onboarding: false,
            summary_file: None,
        }
    }

    /// Builder: set the summary file
    pub fn with_summary_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.summary_file = Some(path.into());
        self
    }

    /// Builder: allow onboarding
    pub fn with_onboarding(mut self, allow: bool) -> Self {
        self.allow_onboarding = allow;
        self
    }

    /// Overlay these settings on a configuration
    pub fn apply(&self, mut configuration: Configuration) -> Configuration {
        configuration.merchant_identifier = self.merchant_identifier.clone();
        configuration.allow_onboarding = self.allow_onboarding;
        configuration
    }

    /// Read the summary file and overlay these settings on it
    pub fn load_configuration(&self) -> ComponentResult<Configuration> {
        let path = self.summary_file.as_ref().ok_or_else(|| {
            ComponentError::Configuration("APPLE_PAY_SUMMARY_FILE not set".to_string())
        })?;

        let content = std::fs::read_to_string(path).map_err(|e| {
            ComponentError::Configuration(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let configuration = Configuration::from_toml(&content).map_err(|e| {
            ComponentError::Configuration(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        info!(
            "Loaded {} summary items from {}",
            configuration.summary_items.len(),
            path.display()
        );
        Ok(self.apply(configuration))
    }
}

/// Merchant identifiers are reverse-DNS names prefixed with `merchant.`
pub fn validate_merchant_identifier(identifier: &str) -> ComponentResult<()> {
    let rest = identifier.strip_prefix("merchant.").unwrap_or_default();
    if rest.is_empty() || rest.contains(char::is_whitespace) {
        return Err(ComponentError::Configuration(
            "APPLE_PAY_MERCHANT_ID must look like merchant.<reverse-dns>".to_string(),
        ));
    }
    Ok(())
}
