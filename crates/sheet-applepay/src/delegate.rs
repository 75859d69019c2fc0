//! # Component Delegate
//!
//! The sink a merchant app implements to receive component events.

use crate::details::PaymentComponentData;
use sheet_core::ComponentError;
use std::sync::Arc;
use tracing::{info, warn};

/// Delegate trait for component events
///
/// Default methods only log, so implementors override what they need.
pub trait ComponentDelegate: Send + Sync {
    /// The payer authorized; send `data` to the backend, then call
    /// `finalize` on the component with the result.
    fn did_submit(&self, data: PaymentComponentData) {
        info!(
            "Payment submitted: amount={}, network={:?}",
            data.amount.display(),
            data.details.network
        );
    }

    /// The component failed at runtime (cancelled, invalid token)
    fn did_fail(&self, error: ComponentError) {
        warn!("Component failed: {} ({})", error, error.code());
    }
}

/// Type alias for a shared delegate
pub type BoxedComponentDelegate = Arc<dyn ComponentDelegate>;

/// Default delegate (just logs events)
pub struct LoggingDelegate;

impl ComponentDelegate for LoggingDelegate {}
