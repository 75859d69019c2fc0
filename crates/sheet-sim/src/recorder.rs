//! # Recording Delegate
//!
//! Delegate that keeps every event it receives, for scenario reports and tests.

use sheet_applepay::{ComponentDelegate, PaymentComponentData};
use sheet_core::ComponentError;
use std::sync::Mutex;
use tracing::info;

/// Event received by the delegate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DelegateEvent {
    Submitted(PaymentComponentData),
    Failed(ComponentError),
}

#[derive(Debug, Default)]
pub struct RecordingDelegate {
    events: Mutex<Vec<DelegateEvent>>,
}

impl RecordingDelegate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events so far
    pub fn events(&self) -> Vec<DelegateEvent> {
        self.lock().clone()
    }

    pub fn submissions(&self) -> Vec<PaymentComponentData> {
        self.lock()
            .iter()
            .filter_map(|e| match e {
                DelegateEvent::Submitted(data) => Some(data.clone()),
                DelegateEvent::Failed(_) => None,
            })
            .collect()
    }

    pub fn failures(&self) -> Vec<ComponentError> {
        self.lock()
            .iter()
            .filter_map(|e| match e {
                DelegateEvent::Failed(error) => Some(error.clone()),
                DelegateEvent::Submitted(_) => None,
            })
            .collect()
    }

    /// Number of `Cancelled` failures
    pub fn cancellations(&self) -> usize {
        self.failures()
            .iter()
            .filter(|e| e.is_cancellation())
            .count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<DelegateEvent>> {
        // A panicking test thread must not hide the events from the others.
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ComponentDelegate for RecordingDelegate {
    fn did_submit(&self, data: PaymentComponentData) {
        info!("Delegate received submit: {}", data.amount.display());
        self.lock().push(DelegateEvent::Submitted(data));
    }

    fn did_fail(&self, error: ComponentError) {
        info!("Delegate received failure: {}", error.code());
        self.lock().push(DelegateEvent::Failed(error));
    }
}
