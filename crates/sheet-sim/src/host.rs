//! # Sheet Host
//!
//! The host side of a payment sheet. One task owns the component and drains
//! a channel of host commands, so every call into the component is serialized
//! the way a UI thread would serialize them.
//!
//! Delayed commands (`finalize_after`, `finish_after`) are scheduled with
//! `tokio::time::sleep`; with a paused clock the two orderings of finalize
//! and sheet-finish can be reproduced exactly.

use sheet_applepay::{
    dispatch_sheet_event, ApplePayComponent, AuthorizedPayment, FinalizeCompletion, SheetEvent,
};
use sheet_core::{AuthorizationStatus, ComponentError, SheetId};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Host errors
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Host loop has stopped")]
    Stopped,

    #[error(transparent)]
    Component(#[from] ComponentError),
}

/// Commands the host loop applies to the component
pub enum HostCommand {
    /// Ask for the sheet to present, recreating it if needed
    Present {
        reply: oneshot::Sender<Result<SheetId, ComponentError>>,
    },
    /// Forward a sheet event
    Sheet(SheetEvent),
    /// The application reports the backend result
    Finalize {
        success: bool,
        on_done: FinalizeCompletion,
    },
}

/// Handle for sending commands to the host loop
#[derive(Clone)]
pub struct SheetHost {
    tx: mpsc::UnboundedSender<HostCommand>,
}

impl SheetHost {
    /// Move the component into a host loop.
    ///
    /// The loop stops once every `SheetHost` clone is dropped and hands the
    /// component back through the join handle.
    pub fn spawn(component: ApplePayComponent) -> (Self, JoinHandle<ApplePayComponent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run_host(component, rx));
        (Self { tx }, handle)
    }

    /// Present the sheet and return its id
    pub async fn present(&self) -> Result<SheetId, HostError> {
        let (reply, rx) = oneshot::channel();
        self.send(HostCommand::Present { reply })?;
        let id = rx.await.map_err(|_| HostError::Stopped)??;
        Ok(id)
    }

    /// Replay the view lifecycle of a freshly presented sheet
    pub fn appear(&self, sheet: SheetId) -> Result<(), HostError> {
        self.send(HostCommand::Sheet(SheetEvent::ViewDidLoad(sheet)))?;
        self.send(HostCommand::Sheet(SheetEvent::ViewWillAppear(sheet)))?;
        self.send(HostCommand::Sheet(SheetEvent::ViewDidAppear(sheet)))
    }

    /// The payer authorizes. The receiver yields the status the component
    /// reports back to the sheet, or an error if the completion was dropped.
    pub fn authorize(
        &self,
        sheet: SheetId,
        payment: AuthorizedPayment,
    ) -> Result<oneshot::Receiver<AuthorizationStatus>, HostError> {
        let (status_tx, status_rx) = oneshot::channel();
        let completion = Box::new(move |status: AuthorizationStatus| {
            let _ = status_tx.send(status);
        });

        self.send(HostCommand::Sheet(SheetEvent::DidAuthorizePayment {
            sheet,
            payment,
            completion,
        }))?;
        Ok(status_rx)
    }

    /// The sheet is dismissed
    pub fn finish(&self, sheet: SheetId) -> Result<(), HostError> {
        self.send(HostCommand::Sheet(SheetEvent::DidFinish(sheet)))
    }

    /// Report the backend result. The receiver fires when `on_done` runs.
    pub fn finalize(&self, success: bool) -> Result<oneshot::Receiver<()>, HostError> {
        let (done_tx, done_rx) = oneshot::channel();
        let on_done: FinalizeCompletion = Box::new(move || {
            let _ = done_tx.send(());
        });

        self.send(HostCommand::Finalize { success, on_done })?;
        Ok(done_rx)
    }

    /// `finish` after `delay`
    pub fn finish_after(&self, delay: Duration, sheet: SheetId) -> JoinHandle<Result<(), HostError>> {
        let host = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            host.finish(sheet)
        })
    }

    /// `finalize` after `delay`
    pub fn finalize_after(
        &self,
        delay: Duration,
        success: bool,
    ) -> JoinHandle<Result<oneshot::Receiver<()>, HostError>> {
        let host = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            host.finalize(success)
        })
    }

    fn send(&self, command: HostCommand) -> Result<(), HostError> {
        self.tx.send(command).map_err(|_| HostError::Stopped)
    }
}

async fn run_host(
    mut component: ApplePayComponent,
    mut rx: mpsc::UnboundedReceiver<HostCommand>,
) -> ApplePayComponent {
    info!("Sheet host started");

    while let Some(command) = rx.recv().await {
        match command {
            HostCommand::Present { reply } => {
                let result = component.presentation_handle().map(|sheet| sheet.id());
                let _ = reply.send(result);
            }
            HostCommand::Sheet(event) => {
                debug!("Host event: {:?}", event);
                dispatch_sheet_event(&mut component, event);
            }
            HostCommand::Finalize { success, on_done } => {
                component.finalize(success, on_done);
            }
        }
    }

    info!("Sheet host stopped");
    component
}
