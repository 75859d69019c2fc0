//! # Sheet Finalization
//!
//! Tracks one payment sheet session from authorization to dismissal.
//!
//! Two events close a session and they may arrive in either order: the merchant
//! app calling `finalize` once the backend answered, and the sheet reporting
//! that it finished. A sheet that finishes before `finalize` was ever called
//! was cancelled.
//!
//! ```text
//!   Idle ──begin_authorization──► AwaitingFinalization ──finalize──► Finalized
//!    │                                    │                             │
//!    └────────────── on_sheet_did_finish ─┴─────────────────────────────┘
//!                 confirmed? Completed (on_done runs) : Cancelled
//! ```
//!
//! Both callback slots are single-shot: they are taken out of their `Option`
//! before being invoked, so neither can run twice.

use sheet_core::{AuthorizationCompletion, AuthorizationStatus};
use tracing::{debug, warn};

/// Completion the merchant app passes to `finalize`
pub type FinalizeCompletion = Box<dyn FnOnce() + Send>;

/// Session state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FinalizationState {
    /// No authorization received yet
    #[default]
    Idle,
    /// The sheet is waiting for the merchant's result
    AwaitingFinalization,
    /// The merchant confirmed the result
    Finalized,
}

/// How a sheet session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetOutcome {
    /// The result was confirmed before the sheet finished
    Completed,
    /// The sheet finished without a confirmed result
    Cancelled,
}

/// State machine for one sheet session
#[derive(Default)]
pub struct Finalization {
    state: FinalizationState,
    result_confirmed: bool,
    sheet_finished: bool,
    authorization_completion: Option<AuthorizationCompletion>,
    finalize_completion: Option<FinalizeCompletion>,
}

impl Finalization {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FinalizationState {
        self.state
    }

    pub fn is_result_confirmed(&self) -> bool {
        self.result_confirmed
    }

    pub fn is_sheet_finished(&self) -> bool {
        self.sheet_finished
    }

    /// Whether the sheet is still waiting on its authorization completion
    pub fn has_pending_authorization(&self) -> bool {
        self.authorization_completion.is_some()
    }

    /// Store the sheet's authorization completion until the result is known
    pub fn begin_authorization(&mut self, completion: AuthorizationCompletion) {
        if let Some(stale) = self.authorization_completion.take() {
            warn!("Sheet authorized twice; failing the earlier authorization");
            stale(AuthorizationStatus::Failure);
        }

        self.authorization_completion = Some(completion);
        if self.state == FinalizationState::Idle {
            self.state = FinalizationState::AwaitingFinalization;
        }
    }

    /// Resolve the pending authorization completion.
    ///
    /// Returns false, and does nothing, when no completion is pending. Some
    /// hosts drive the completion hook more than once.
    // TODO: audit whether hosts really double-drive the completion or this hides a bug upstream.
    pub fn record_authorization_outcome(&mut self, success: bool) -> bool {
        match self.authorization_completion.take() {
            Some(completion) => {
                let status = AuthorizationStatus::from_success(success);
                debug!("Resolving sheet authorization: {:?}", status);
                completion(status);
                true
            }
            None => {
                debug!("No pending authorization completion; ignoring outcome");
                false
            }
        }
    }

    /// Confirm the merchant's result.
    ///
    /// `on_done` runs once the sheet has finished; immediately if it already has.
    /// A repeated call keeps the earlier `on_done`; both run, in call order.
    pub fn finalize(&mut self, success: bool, on_done: FinalizeCompletion) {
        self.result_confirmed = true;
        self.state = FinalizationState::Finalized;
        self.record_authorization_outcome(success);

        let on_done: FinalizeCompletion = match self.finalize_completion.take() {
            Some(earlier) => {
                warn!("Finalized twice; keeping the earlier completion");
                Box::new(move || {
                    earlier();
                    on_done();
                })
            }
            None => on_done,
        };

        if self.sheet_finished {
            on_done();
        } else {
            self.finalize_completion = Some(on_done);
        }
    }

    /// The sheet reported the end of its lifecycle
    pub fn on_sheet_did_finish(&mut self) -> SheetOutcome {
        self.sheet_finished = true;

        // The sheet is gone; nobody is left to hear the status.
        self.authorization_completion = None;

        if !self.result_confirmed {
            return SheetOutcome::Cancelled;
        }

        if let Some(on_done) = self.finalize_completion.take() {
            on_done();
        }
        SheetOutcome::Completed
    }

    /// Start over for a new sheet
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
