//! # Payment Networks
//!
//! Card networks a wallet sheet can accept, and the static capability table
//! that says from which platform version each network is available.
//!
//! ```text
//! declared brands ──► brand_network() ──► CAPABILITY_TABLE[version] ──► supported networks
//!  "visa", "mc"         Visa, MasterCard      min version <= current
//! ```
//!
//! The table is evaluated against an injected `PlatformVersion`, so it can be
//! tested without a real device.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Card networks known to the wallet platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentNetwork {
    Amex,
    Bancontact,
    CartesBancaires,
    ChinaUnionPay,
    Discover,
    Eftpos,
    Electron,
    Elo,
    Girocard,
    Interac,
    Jcb,
    Mada,
    Maestro,
    MasterCard,
    Mir,
    Visa,
    VPay,
}

impl PaymentNetwork {
    /// Identifier as the platform spells it
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentNetwork::Amex => "AmEx",
            PaymentNetwork::Bancontact => "Bancontact",
            PaymentNetwork::CartesBancaires => "CartesBancaires",
            PaymentNetwork::ChinaUnionPay => "ChinaUnionPay",
            PaymentNetwork::Discover => "Discover",
            PaymentNetwork::Eftpos => "Eftpos",
            PaymentNetwork::Electron => "Electron",
            PaymentNetwork::Elo => "Elo",
            PaymentNetwork::Girocard => "Girocard",
            PaymentNetwork::Interac => "Interac",
            PaymentNetwork::Jcb => "JCB",
            PaymentNetwork::Mada => "mada",
            PaymentNetwork::Maestro => "Maestro",
            PaymentNetwork::MasterCard => "MasterCard",
            PaymentNetwork::Mir => "Mir",
            PaymentNetwork::Visa => "Visa",
            PaymentNetwork::VPay => "VPay",
        }
    }
}

impl fmt::Display for PaymentNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error parsing a platform version string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid platform version: {0:?}")]
pub struct ParseVersionError(pub String);

/// Host platform version (e.g. 14.5 or 12.1.1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlatformVersion {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
}

impl PlatformVersion {
    pub const fn new(major: u16, minor: u16, patch: u16) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Whether this version is at least `minimum`
    pub fn at_least(&self, minimum: PlatformVersion) -> bool {
        *self >= minimum
    }
}

impl FromStr for PlatformVersion {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('.').collect();
        if parts.is_empty() || parts.len() > 3 {
            return Err(ParseVersionError(s.to_string()));
        }

        let mut numbers = [0u16; 3];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| ParseVersionError(s.to_string()))?;
        }

        Ok(Self::new(numbers[0], numbers[1], numbers[2]))
    }
}

impl TryFrom<String> for PlatformVersion {
    type Error = ParseVersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PlatformVersion> for String {
    fn from(version: PlatformVersion) -> Self {
        version.to_string()
    }
}

impl fmt::Display for PlatformVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Networks in preference order, each with the first platform version that
/// supports it.
pub const CAPABILITY_TABLE: &[(PaymentNetwork, PlatformVersion)] = &[
    (PaymentNetwork::Visa, PlatformVersion::new(8, 0, 0)),
    (PaymentNetwork::MasterCard, PlatformVersion::new(8, 0, 0)),
    (PaymentNetwork::Amex, PlatformVersion::new(8, 0, 0)),
    (PaymentNetwork::Discover, PlatformVersion::new(9, 0, 0)),
    (PaymentNetwork::ChinaUnionPay, PlatformVersion::new(9, 2, 0)),
    (PaymentNetwork::Interac, PlatformVersion::new(9, 2, 0)),
    (PaymentNetwork::Jcb, PlatformVersion::new(10, 1, 0)),
    (PaymentNetwork::CartesBancaires, PlatformVersion::new(11, 2, 0)),
    (PaymentNetwork::Eftpos, PlatformVersion::new(12, 0, 0)),
    (PaymentNetwork::Electron, PlatformVersion::new(12, 0, 0)),
    (PaymentNetwork::Maestro, PlatformVersion::new(12, 0, 0)),
    (PaymentNetwork::VPay, PlatformVersion::new(12, 0, 0)),
    (PaymentNetwork::Elo, PlatformVersion::new(12, 1, 1)),
    (PaymentNetwork::Mada, PlatformVersion::new(12, 1, 1)),
    (PaymentNetwork::Girocard, PlatformVersion::new(14, 0, 0)),
    (PaymentNetwork::Mir, PlatformVersion::new(14, 5, 0)),
    (PaymentNetwork::Bancontact, PlatformVersion::new(16, 0, 0)),
];

/// Minimum platform version for a network
pub fn minimum_version(network: PaymentNetwork) -> Option<PlatformVersion> {
    CAPABILITY_TABLE
        .iter()
        .find(|(n, _)| *n == network)
        .map(|(_, v)| *v)
}

/// Whether `network` is available on `version`
pub fn is_available(network: PaymentNetwork, version: PlatformVersion) -> bool {
    minimum_version(network)
        .map(|min| version.at_least(min))
        .unwrap_or(false)
}

/// Map a merchant-declared card brand to its payment network
pub fn brand_network(brand: &str) -> Option<PaymentNetwork> {
    let network = match brand.to_ascii_lowercase().as_str() {
        "visa" => PaymentNetwork::Visa,
        "mc" | "mastercard" => PaymentNetwork::MasterCard,
        "amex" => PaymentNetwork::Amex,
        "discover" => PaymentNetwork::Discover,
        "cup" | "unionpay" => PaymentNetwork::ChinaUnionPay,
        "interac_card" | "interac" => PaymentNetwork::Interac,
        "jcb" => PaymentNetwork::Jcb,
        "cartebancaire" => PaymentNetwork::CartesBancaires,
        "eftpos_australia" => PaymentNetwork::Eftpos,
        "electron" => PaymentNetwork::Electron,
        "maestro" => PaymentNetwork::Maestro,
        "vpay" => PaymentNetwork::VPay,
        "elo" | "elodebit" => PaymentNetwork::Elo,
        "mada" => PaymentNetwork::Mada,
        "girocard" => PaymentNetwork::Girocard,
        "mir" => PaymentNetwork::Mir,
        "bcmc" | "bancontact" => PaymentNetwork::Bancontact,
        _ => return None,
    };
    Some(network)
}

/// Derive the supported networks for a platform version.
///
/// `None` brands means "everything the platform supports", in table order.
/// Declared brands keep their declared order; unknown brands, duplicates and
/// networks newer than `version` are dropped.
pub fn supported_networks(brands: Option<&[String]>, version: PlatformVersion) -> Vec<PaymentNetwork> {
    let Some(brands) = brands else {
        return CAPABILITY_TABLE
            .iter()
            .filter(|(_, min)| version.at_least(*min))
            .map(|(network, _)| *network)
            .collect();
    };

    let mut networks = Vec::with_capacity(brands.len());
    for brand in brands {
        match brand_network(brand) {
            Some(network) if is_available(network, version) => {
                if !networks.contains(&network) {
                    networks.push(network);
                }
            }
            Some(network) => {
                debug!("Network {} needs a newer platform than {}", network, version);
            }
            None => debug!("Ignoring brand without wallet network: {}", brand),
        }
    }
    networks
}
