//! # Simulated Platform
//!
//! A scriptable stand-in for the host wallet platform: capability answers
//! are fixed at construction, sheets are plain values.

use sheet_core::{
    CapabilityOracle, PaymentNetwork, PaymentRequest, PaymentSheet, PlatformVersion, SheetFactory,
    SheetId,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing::debug;

/// Sheet created by the simulated platform
#[derive(Debug, Clone)]
pub struct SimulatedSheet {
    id: SheetId,
    request: PaymentRequest,
}

impl PaymentSheet for SimulatedSheet {
    fn id(&self) -> SheetId {
        self.id
    }

    fn request(&self) -> &PaymentRequest {
        &self.request
    }
}

/// Simulated wallet platform
#[derive(Debug)]
pub struct SimulatedPlatform {
    version: PlatformVersion,
    can_make_payments: bool,
    /// Networks the payer has a card for; `None` means any network
    payable_networks: Option<Vec<PaymentNetwork>>,
    refuse_sheets: AtomicBool,
    sheets_created: AtomicUsize,
}

impl SimulatedPlatform {
    /// A capable platform of `version` with cards on every network
    pub fn new(version: PlatformVersion) -> Self {
        Self {
            version,
            can_make_payments: true,
            payable_networks: None,
            refuse_sheets: AtomicBool::new(false),
            sheets_created: AtomicUsize::new(0),
        }
    }

    /// Builder: a device that cannot make wallet payments
    pub fn without_payments(mut self) -> Self {
        self.can_make_payments = false;
        self
    }

    /// Builder: the payer only has cards on `networks`
    pub fn with_payable_networks(mut self, networks: impl IntoIterator<Item = PaymentNetwork>) -> Self {
        self.payable_networks = Some(networks.into_iter().collect());
        self
    }

    /// Make sheet creation fail (or succeed again)
    pub fn set_refuse_sheets(&self, refuse: bool) {
        self.refuse_sheets.store(refuse, Ordering::SeqCst);
    }

    /// Number of sheets handed out so far
    pub fn sheets_created(&self) -> usize {
        self.sheets_created.load(Ordering::SeqCst)
    }
}

impl CapabilityOracle for SimulatedPlatform {
    fn can_make_payments(&self) -> bool {
        self.can_make_payments
    }

    fn can_make_payments_using(&self, networks: &[PaymentNetwork]) -> bool {
        match &self.payable_networks {
            Some(payable) => networks.iter().any(|n| payable.contains(n)),
            None => !networks.is_empty(),
        }
    }

    fn version(&self) -> PlatformVersion {
        self.version
    }
}

impl SheetFactory for SimulatedPlatform {
    fn create_sheet(&self, request: &PaymentRequest, id: SheetId) -> Option<Box<dyn PaymentSheet>> {
        if self.refuse_sheets.load(Ordering::SeqCst) {
            debug!("Simulated platform refusing sheet {}", id);
            return None;
        }

        self.sheets_created.fetch_add(1, Ordering::SeqCst);
        debug!(
            "Simulated sheet {} for {} ({} items)",
            id,
            request.merchant_identifier,
            request.summary_items.len()
        );
        Some(Box::new(SimulatedSheet {
            id,
            request: request.clone(),
        }))
    }
}
