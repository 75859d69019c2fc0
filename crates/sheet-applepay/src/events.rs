//! # Sheet Events
//!
//! Host-side events of a native payment sheet and the listener that receives
//! them. The host registers a listener per sheet and routes every event
//! through `dispatch_sheet_event`.

use crate::details::AuthorizedPayment;
use sheet_core::{AuthorizationCompletion, SheetId};
use tracing::trace;

/// Events a payment sheet emits over its lifetime
pub enum SheetEvent {
    ViewDidLoad(SheetId),
    ViewWillAppear(SheetId),
    ViewDidAppear(SheetId),
    /// The payer authorized; the completion reports the result back to the sheet
    DidAuthorizePayment {
        sheet: SheetId,
        payment: AuthorizedPayment,
        completion: AuthorizationCompletion,
    },
    /// The sheet was dismissed; sent exactly once per sheet
    DidFinish(SheetId),
}

impl SheetEvent {
    /// Sheet the event belongs to
    pub fn sheet_id(&self) -> SheetId {
        match self {
            SheetEvent::ViewDidLoad(id)
            | SheetEvent::ViewWillAppear(id)
            | SheetEvent::ViewDidAppear(id)
            | SheetEvent::DidFinish(id) => *id,
            SheetEvent::DidAuthorizePayment { sheet, .. } => *sheet,
        }
    }

    /// Event name for logs
    pub fn name(&self) -> &'static str {
        match self {
            SheetEvent::ViewDidLoad(_) => "view_did_load",
            SheetEvent::ViewWillAppear(_) => "view_will_appear",
            SheetEvent::ViewDidAppear(_) => "view_did_appear",
            SheetEvent::DidAuthorizePayment { .. } => "did_authorize_payment",
            SheetEvent::DidFinish(_) => "did_finish",
        }
    }
}

impl std::fmt::Debug for SheetEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetEvent")
            .field("name", &self.name())
            .field("sheet", &self.sheet_id())
            .finish()
    }
}

/// Listener for sheet events
///
/// View lifecycle hooks default to no-ops.
#[allow(unused_variables)]
pub trait SheetListener {
    fn view_did_load(&mut self, sheet: SheetId) {
        trace!("Sheet view loaded: {}", sheet);
    }

    fn view_will_appear(&mut self, sheet: SheetId) {
        trace!("Sheet view will appear: {}", sheet);
    }

    fn view_did_appear(&mut self, sheet: SheetId) {
        trace!("Sheet view appeared: {}", sheet);
    }

    fn did_authorize_payment(
        &mut self,
        sheet: SheetId,
        payment: AuthorizedPayment,
        completion: AuthorizationCompletion,
    );

    fn did_finish(&mut self, sheet: SheetId);
}

/// Dispatch a sheet event to the appropriate listener method
pub fn dispatch_sheet_event(listener: &mut dyn SheetListener, event: SheetEvent) {
    match event {
        SheetEvent::ViewDidLoad(id) => listener.view_did_load(id),
        SheetEvent::ViewWillAppear(id) => listener.view_will_appear(id),
        SheetEvent::ViewDidAppear(id) => listener.view_did_appear(id),
        SheetEvent::DidAuthorizePayment {
            sheet,
            payment,
            completion,
        } => listener.did_authorize_payment(sheet, payment, completion),
        SheetEvent::DidFinish(id) => listener.did_finish(id),
    }
}
