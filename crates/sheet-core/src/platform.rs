//! # Platform Seams
//!
//! Traits the host wallet platform implements. The component only talks to
//! the platform through these, which keeps it testable with a simulated host.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                PaymentPlatform (blanket trait)           │
//! │  ├── CapabilityOracle                                    │
//! │  │     ├── can_make_payments()                           │
//! │  │     ├── can_make_payments_using(networks)             │
//! │  │     └── version()                                     │
//! │  └── SheetFactory                                        │
//! │        └── create_sheet(request, id) -> PaymentSheet?    │
//! └──────────────────────────────────────────────────────────┘
//! ```

use crate::network::{PaymentNetwork, PlatformVersion};
use crate::request::PaymentRequest;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Identity of one sheet handle.
///
/// Sheet events carry it so a component can tell its live sheet from one
/// that was already used up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SheetId(Uuid);

impl SheetId {
    /// Mint a new random id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SheetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Status reported back to the sheet after authorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationStatus {
    Success,
    Failure,
}

impl AuthorizationStatus {
    pub fn from_success(success: bool) -> Self {
        if success {
            AuthorizationStatus::Success
        } else {
            AuthorizationStatus::Failure
        }
    }
}

/// Completion the sheet hands over with an authorized payment
pub type AuthorizationCompletion = Box<dyn FnOnce(AuthorizationStatus) + Send>;

/// Environment capability queries
pub trait CapabilityOracle: Send + Sync {
    /// Can this environment make wallet payments at all
    fn can_make_payments(&self) -> bool;

    /// Can the payer pay with at least one of `networks`
    fn can_make_payments_using(&self, networks: &[PaymentNetwork]) -> bool;

    /// Running platform version, used to gate the network table
    fn version(&self) -> PlatformVersion;
}

/// Creates native payment sheets
pub trait SheetFactory: Send + Sync {
    /// Instantiate a sheet for `request`.
    ///
    /// Returns `None` when the platform refuses for a reason it does not
    /// explain. Events from the created sheet must carry `id`.
    fn create_sheet(&self, request: &PaymentRequest, id: SheetId) -> Option<Box<dyn PaymentSheet>>;
}

/// Everything a component needs from the host
pub trait PaymentPlatform: CapabilityOracle + SheetFactory {}

impl<T: CapabilityOracle + SheetFactory> PaymentPlatform for T {}

/// Type alias for a shared platform (dynamic dispatch)
pub type BoxedPaymentPlatform = Arc<dyn PaymentPlatform>;

/// An opaque, one-shot native payment sheet
pub trait PaymentSheet: Send {
    /// Id minted for this sheet at creation
    fn id(&self) -> SheetId;

    /// Request the sheet was created from
    fn request(&self) -> &PaymentRequest;
}
