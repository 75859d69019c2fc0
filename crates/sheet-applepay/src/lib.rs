//! # sheet-applepay
//!
//! Apple Pay style wallet component for wallet-sheet-rs.
//!
//! The component validates the merchant's input, builds the payment request,
//! owns the native payment sheet and coordinates its one-shot lifecycle:
//!
//! 1. **Construction** - ordered validation, fails fast with a typed error
//! 2. **Authorization** - the sheet hands over a token; the delegate gets `did_submit`
//! 3. **Finalization** - the app reports the backend result with `finalize`
//! 4. **Finish** - the sheet is dismissed; without a prior `finalize` the
//!    delegate gets `did_fail(Cancelled)`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sheet_applepay::{ApplePayComponent, ApplePayPaymentMethod, ComponentSettings};
//! use sheet_core::{Amount, PaymentContext};
//!
//! let settings = ComponentSettings::from_env()?;
//! let configuration = settings.load_configuration()?;
//! let context = PaymentContext::new(Amount::new(2000, "EUR"), "NL");
//! let method = ApplePayPaymentMethod::new("Apple Pay").with_brands(["visa", "mc"]);
//!
//! let mut component = ApplePayComponent::new(method, context, configuration, platform)?
//!     .with_delegate(Arc::new(MyDelegate));
//! host.present(component.presentation_handle()?);
//! ```
//!
//! ## Sheet events
//!
//! ```rust,ignore
//! use sheet_applepay::{dispatch_sheet_event, SheetEvent};
//!
//! // In the host's sheet callback:
//! dispatch_sheet_event(&mut component, SheetEvent::DidFinish(sheet_id));
//! ```

pub mod component;
pub mod config;
pub mod delegate;
pub mod details;
pub mod events;
pub mod finalization;
pub mod payment_method;

// Re-exports
pub use component::ApplePayComponent;
pub use config::ComponentSettings;
pub use delegate::{BoxedComponentDelegate, ComponentDelegate, LoggingDelegate};
pub use details::{ApplePayDetails, AuthorizedPayment, Contact, PaymentComponentData};
pub use events::{dispatch_sheet_event, SheetEvent, SheetListener};
pub use finalization::{
    Finalization, FinalizationState, FinalizeCompletion, SheetOutcome,
};
pub use payment_method::ApplePayPaymentMethod;
