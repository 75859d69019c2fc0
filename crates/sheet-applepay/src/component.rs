//! # Apple Pay Component
//!
//! Validates merchant input, builds the payment request, owns the native
//! sheet, and turns sheet events into delegate events.
//!
//! Construction runs its checks in a fixed order and stops at the first one
//! that fails; no sheet is created unless every check passed:
//!
//! ```text
//! can_make_payments ─► networks ─► payable? ─► country ─► currency
//!        ─► summary non-empty ─► grand total >= 0 ─► no NaN item ─► create sheet
//! ```

use crate::delegate::BoxedComponentDelegate;
use crate::details::{ApplePayDetails, AuthorizedPayment, PaymentComponentData};
use crate::events::SheetListener;
use crate::finalization::{Finalization, FinalizationState, SheetOutcome};
use crate::payment_method::ApplePayPaymentMethod;
use sheet_core::summary::grand_total;
use sheet_core::validation::{
    first_invalid_summary_item, is_grand_total_valid, is_valid_country_code,
    is_valid_currency_code,
};
use sheet_core::{
    build_payment_request, AuthorizationCompletion, AuthorizationStatus, BoxedPaymentPlatform,
    ComponentError, ComponentResult, Configuration, PaymentContext, PaymentNetwork, PaymentRequest,
    PaymentSheet, SheetId,
};
use tracing::{debug, info, instrument, warn};

/// Wallet payment component
pub struct ApplePayComponent {
    payment_method: ApplePayPaymentMethod,
    context: PaymentContext,
    configuration: Configuration,
    supported_networks: Vec<PaymentNetwork>,
    request: PaymentRequest,
    platform: BoxedPaymentPlatform,
    sheet: Option<Box<dyn PaymentSheet>>,
    finalization: Finalization,
    /// A dismissed sheet submitted a payment but was never finalized
    late_finalize_pending: bool,
    delegate: Option<BoxedComponentDelegate>,
}

impl ApplePayComponent {
    /// Validate the inputs and create the first sheet.
    #[instrument(skip_all, fields(country = %context.country_code, currency = %context.currency_code()))]
    pub fn new(
        payment_method: ApplePayPaymentMethod,
        context: PaymentContext,
        configuration: Configuration,
        platform: BoxedPaymentPlatform,
    ) -> ComponentResult<Self> {
        let supported_networks =
            validate(&payment_method, &context, &configuration, &platform)?;

        let request = build_payment_request(&context, &configuration, &supported_networks);
        let sheet = create_sheet(&platform, &request)?;

        info!(
            "Wallet component ready: sheet={}, networks={:?}",
            sheet.id(),
            supported_networks
        );

        Ok(Self {
            payment_method,
            context,
            configuration,
            supported_networks,
            request,
            platform,
            sheet: Some(sheet),
            finalization: Finalization::new(),
            late_finalize_pending: false,
            delegate: None,
        })
    }

    /// Register the delegate that receives submit/fail events
    pub fn set_delegate(&mut self, delegate: BoxedComponentDelegate) {
        self.delegate = Some(delegate);
    }

    /// Builder: register the delegate
    pub fn with_delegate(mut self, delegate: BoxedComponentDelegate) -> Self {
        self.set_delegate(delegate);
        self
    }

    /// Sheet to present, creating a new one if the last was used up
    pub fn presentation_handle(&mut self) -> ComponentResult<&dyn PaymentSheet> {
        if self.sheet.is_none() {
            let sheet = create_sheet(&self.platform, &self.request)?;
            info!("Recreated payment sheet: {}", sheet.id());
            self.finalization.reset();
            self.sheet = Some(sheet);
        }

        self.sheet
            .as_deref()
            .ok_or_else(|| ComponentError::Unknown("payment sheet unavailable".to_string()))
    }

    /// Report the backend result to the sheet.
    ///
    /// `on_done` runs after the sheet has been dismissed.
    ///
    /// A finalize owed by a dismissed sheet that arrives after a new sheet was
    /// presented, before that sheet authorized, belongs to the dismissed sheet:
    /// `on_done` runs at once and the new session is left untouched.
    #[instrument(skip(self, on_done))]
    pub fn finalize(&mut self, success: bool, on_done: impl FnOnce() + Send + 'static) {
        let late = std::mem::take(&mut self.late_finalize_pending);
        if late && self.finalization.state() == FinalizationState::Idle {
            warn!("Finalize for a dismissed sheet; leaving the new sheet untouched");
            on_done();
            return;
        }

        self.finalization.finalize(success, Box::new(on_done));
    }

    pub fn payment_method(&self) -> &ApplePayPaymentMethod {
        &self.payment_method
    }

    pub fn context(&self) -> &PaymentContext {
        &self.context
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn supported_networks(&self) -> &[PaymentNetwork] {
        &self.supported_networks
    }

    pub fn request(&self) -> &PaymentRequest {
        &self.request
    }

    pub fn finalization_state(&self) -> FinalizationState {
        self.finalization.state()
    }

    /// Id of the live sheet, if one exists
    pub fn current_sheet_id(&self) -> Option<SheetId> {
        self.sheet.as_ref().map(|sheet| sheet.id())
    }

    fn is_current_sheet(&self, id: SheetId) -> bool {
        self.current_sheet_id() == Some(id)
    }

    fn notify_submit(&self, data: PaymentComponentData) {
        match &self.delegate {
            Some(delegate) => delegate.did_submit(data),
            None => warn!("No delegate registered; dropping submit"),
        }
    }

    fn notify_fail(&self, error: ComponentError) {
        match &self.delegate {
            Some(delegate) => delegate.did_fail(error),
            None => warn!("No delegate registered; dropping error: {}", error),
        }
    }
}

impl SheetListener for ApplePayComponent {
    fn did_authorize_payment(
        &mut self,
        sheet: SheetId,
        payment: AuthorizedPayment,
        completion: AuthorizationCompletion,
    ) {
        if !self.is_current_sheet(sheet) {
            warn!("Authorization from stale sheet {}; failing it", sheet);
            completion(AuthorizationStatus::Failure);
            return;
        }

        self.finalization.begin_authorization(completion);

        match ApplePayDetails::from_payment(&payment) {
            Ok(details) => {
                debug!("Payment authorized on sheet {}", sheet);
                let data = PaymentComponentData::new(details, self.context.amount.clone());
                self.notify_submit(data);
            }
            Err(error) => {
                self.finalization.record_authorization_outcome(false);
                self.notify_fail(error);
            }
        }
    }

    fn did_finish(&mut self, sheet: SheetId) {
        if !self.is_current_sheet(sheet) {
            warn!("Finish from stale sheet {}; ignoring", sheet);
            return;
        }

        // A sheet cannot be presented twice.
        self.sheet = None;

        let submitted = self.finalization.state() == FinalizationState::AwaitingFinalization;
        match self.finalization.on_sheet_did_finish() {
            SheetOutcome::Completed => {
                info!("Payment sheet {} finished", sheet);
                self.late_finalize_pending = false;
            }
            SheetOutcome::Cancelled => {
                warn!("Payment sheet {} finished without a result", sheet);
                self.late_finalize_pending = submitted;
                self.notify_fail(ComponentError::Cancelled);
            }
        }
    }
}

/// Run the construction checks in order and return the supported networks
fn validate(
    payment_method: &ApplePayPaymentMethod,
    context: &PaymentContext,
    configuration: &Configuration,
    platform: &BoxedPaymentPlatform,
) -> ComponentResult<Vec<PaymentNetwork>> {
    if !platform.can_make_payments() {
        return Err(ComponentError::DeviceUnsupported);
    }

    let networks = payment_method.supported_networks(platform.version());
    debug!("Supported networks on {}: {:?}", platform.version(), networks);

    if !configuration.allow_onboarding
        && (networks.is_empty() || !platform.can_make_payments_using(&networks))
    {
        return Err(ComponentError::UserCannotMakePayment);
    }

    if !is_valid_country_code(&context.country_code) {
        return Err(ComponentError::InvalidCountryCode);
    }

    if !is_valid_currency_code(context.currency_code()) {
        return Err(ComponentError::InvalidCurrencyCode);
    }

    if configuration.summary_items.is_empty() {
        return Err(ComponentError::EmptySummaryItems);
    }

    // A NaN total is not negative; the item check reports it.
    let numeric_total = grand_total(&configuration.summary_items)
        .is_some_and(|item| !item.amount.is_nan());
    if numeric_total && !is_grand_total_valid(&configuration.summary_items) {
        return Err(ComponentError::NegativeGrandTotal);
    }

    if let Some(index) = first_invalid_summary_item(&configuration.summary_items) {
        debug!("Summary item {} has no numeric amount", index);
        return Err(ComponentError::InvalidSummaryItem);
    }

    Ok(networks)
}

fn create_sheet(
    platform: &BoxedPaymentPlatform,
    request: &PaymentRequest,
) -> ComponentResult<Box<dyn PaymentSheet>> {
    platform.create_sheet(request, SheetId::new()).ok_or_else(|| {
        ComponentError::Unknown(format!(
            "Failed to instantiate payment sheet for {} because of an unknown platform error",
            request.merchant_identifier
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delegate::ComponentDelegate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use sheet_core::{
        Amount, CapabilityOracle, PlatformVersion, SheetFactory, SummaryItem,
    };
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    struct FakeSheet {
        id: SheetId,
        request: PaymentRequest,
    }

    impl PaymentSheet for FakeSheet {
        fn id(&self) -> SheetId {
            self.id
        }

        fn request(&self) -> &PaymentRequest {
            &self.request
        }
    }

    struct FakePlatform {
        can_pay: bool,
        payable: bool,
        version: PlatformVersion,
        refuse_sheets: AtomicBool,
        sheets_created: AtomicUsize,
    }

    impl FakePlatform {
        fn new() -> Self {
            Self {
                can_pay: true,
                payable: true,
                version: PlatformVersion::new(15, 0, 0),
                refuse_sheets: AtomicBool::new(false),
                sheets_created: AtomicUsize::new(0),
            }
        }
    }

    impl CapabilityOracle for FakePlatform {
        fn can_make_payments(&self) -> bool {
            self.can_pay
        }

        fn can_make_payments_using(&self, _networks: &[PaymentNetwork]) -> bool {
            self.payable
        }

        fn version(&self) -> PlatformVersion {
            self.version
        }
    }

    impl SheetFactory for FakePlatform {
        fn create_sheet(&self, request: &PaymentRequest, id: SheetId) -> Option<Box<dyn PaymentSheet>> {
            if self.refuse_sheets.load(Ordering::SeqCst) {
                return None;
            }
            self.sheets_created.fetch_add(1, Ordering::SeqCst);
            Some(Box::new(FakeSheet {
                id,
                request: request.clone(),
            }))
        }
    }

    #[derive(Default)]
    struct RecordingDelegate {
        submitted: Mutex<Vec<PaymentComponentData>>,
        failed: Mutex<Vec<ComponentError>>,
    }

    impl ComponentDelegate for RecordingDelegate {
        fn did_submit(&self, data: PaymentComponentData) {
            self.submitted.lock().unwrap().push(data);
        }

        fn did_fail(&self, error: ComponentError) {
            self.failed.lock().unwrap().push(error);
        }
    }

    fn method() -> ApplePayPaymentMethod {
        ApplePayPaymentMethod::new("Apple Pay").with_brands(["visa", "mc"])
    }

    fn context() -> PaymentContext {
        PaymentContext::new(Amount::new(2000, "EUR"), "NL")
    }

    fn configuration(values: &[Decimal]) -> Configuration {
        let items = values
            .iter()
            .enumerate()
            .map(|(i, v)| SummaryItem::new(format!("item {}", i), *v))
            .collect();
        Configuration::new(items, "merchant.io.enginevector.test")
    }

    fn build(
        method: ApplePayPaymentMethod,
        context: PaymentContext,
        configuration: Configuration,
        platform: FakePlatform,
    ) -> ComponentResult<ApplePayComponent> {
        ApplePayComponent::new(method, context, configuration, Arc::new(platform))
    }

    fn build_error(
        method: ApplePayPaymentMethod,
        context: PaymentContext,
        configuration: Configuration,
        platform: FakePlatform,
    ) -> ComponentError {
        match build(method, context, configuration, platform) {
            Ok(_) => panic!("construction should have failed"),
            Err(error) => error,
        }
    }

    fn component_with_delegate() -> (ApplePayComponent, Arc<RecordingDelegate>) {
        let delegate = Arc::new(RecordingDelegate::default());
        let component = build(method(), context(), configuration(&[dec!(20)]), FakePlatform::new())
            .unwrap()
            .with_delegate(delegate.clone());
        (component, delegate)
    }

    #[test]
    fn test_valid_component() {
        let component = build(method(), context(), configuration(&[dec!(20)]), FakePlatform::new())
            .unwrap();

        assert_eq!(
            component.supported_networks(),
            &[PaymentNetwork::Visa, PaymentNetwork::MasterCard]
        );
        assert_eq!(component.request().currency_code, "EUR");
        assert!(component.current_sheet_id().is_some());
        assert_eq!(component.finalization_state(), FinalizationState::Idle);
    }

    #[test]
    fn test_device_unsupported_wins() {
        let platform = FakePlatform {
            can_pay: false,
            ..FakePlatform::new()
        };
        let bad = PaymentContext::new(Amount::new(1, "ZZZ"), "ZZ");
        assert_eq!(
            build_error(method(), bad, configuration(&[]), platform),
            ComponentError::DeviceUnsupported
        );
    }

    #[test]
    fn test_user_cannot_make_payment() {
        let platform = FakePlatform {
            payable: false,
            ..FakePlatform::new()
        };
        assert_eq!(
            build_error(method(), context(), configuration(&[dec!(1)]), platform),
            ComponentError::UserCannotMakePayment
        );
    }

    #[test]
    fn test_no_supported_networks() {
        let only_new = ApplePayPaymentMethod::new("Apple Pay").with_brands(["mir"]);
        let platform = FakePlatform {
            version: PlatformVersion::new(13, 0, 0),
            ..FakePlatform::new()
        };
        assert_eq!(
            build_error(only_new, context(), configuration(&[dec!(1)]), platform),
            ComponentError::UserCannotMakePayment
        );
    }

    #[test]
    fn test_onboarding_skips_payability() {
        let platform = FakePlatform {
            payable: false,
            ..FakePlatform::new()
        };
        let unknown = ApplePayPaymentMethod::new("Apple Pay").with_brands(["paypal"]);
        let component = build(
            unknown,
            context(),
            configuration(&[dec!(1)]).with_onboarding(true),
            platform,
        )
        .unwrap();
        assert!(component.supported_networks().is_empty());
    }

    #[test]
    fn test_invalid_country_code() {
        let bad = PaymentContext::new(Amount::new(100, "ZZZ"), "ZZ");
        assert_eq!(
            build_error(method(), bad, configuration(&[dec!(1)]), FakePlatform::new()),
            ComponentError::InvalidCountryCode
        );
    }

    #[test]
    fn test_invalid_currency_code() {
        let bad = PaymentContext::new(Amount::new(100, "ZZZ"), "NL");
        assert_eq!(
            build_error(method(), bad, configuration(&[]), FakePlatform::new()),
            ComponentError::InvalidCurrencyCode
        );
    }

    #[test]
    fn test_empty_summary_items() {
        assert_eq!(
            build_error(method(), context(), configuration(&[]), FakePlatform::new()),
            ComponentError::EmptySummaryItems
        );
    }

    #[test]
    fn test_negative_grand_total() {
        assert_eq!(
            build_error(
                method(),
                context(),
                configuration(&[dec!(20), dec!(-1)]),
                FakePlatform::new()
            ),
            ComponentError::NegativeGrandTotal
        );
    }

    #[test]
    fn test_negative_items_before_total_are_fine() {
        assert!(build(
            method(),
            context(),
            configuration(&[dec!(-5), dec!(-3), dec!(20)]),
            FakePlatform::new()
        )
        .is_ok());
    }

    #[test]
    fn test_nan_summary_item() {
        let mut config = configuration(&[dec!(20)]);
        config.summary_items.insert(0, SummaryItem::not_a_number("Tax"));
        assert_eq!(
            build_error(method(), context(), config, FakePlatform::new()),
            ComponentError::InvalidSummaryItem
        );
    }

    #[test]
    fn test_nan_grand_total_is_invalid_item() {
        let mut config = configuration(&[dec!(20)]);
        config.summary_items.push(SummaryItem::not_a_number("Total"));
        assert_eq!(
            build_error(method(), context(), config, FakePlatform::new()),
            ComponentError::InvalidSummaryItem
        );
    }

    #[test]
    fn test_sheet_creation_failure_is_unknown() {
        let platform = FakePlatform::new();
        platform.refuse_sheets.store(true, Ordering::SeqCst);
        let error = build_error(method(), context(), configuration(&[dec!(1)]), platform);
        assert!(matches!(error, ComponentError::Unknown(ref msg) if msg.contains("merchant.io.enginevector.test")));
    }

    #[test]
    fn test_no_sheet_created_when_validation_fails() {
        let platform = Arc::new(FakePlatform::new());
        let result = ApplePayComponent::new(
            method(),
            context(),
            configuration(&[]),
            platform.clone(),
        );
        assert!(result.is_err());
        assert_eq!(platform.sheets_created.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_authorize_then_finalize() {
        let (mut component, delegate) = component_with_delegate();
        let sheet = component.presentation_handle().unwrap().id();

        let status = Arc::new(Mutex::new(None));
        let sink = status.clone();
        component.did_authorize_payment(
            sheet,
            AuthorizedPayment::new(b"token".to_vec()).with_network(PaymentNetwork::Visa),
            Box::new(move |s: AuthorizationStatus| *sink.lock().unwrap() = Some(s)),
        );
        assert_eq!(delegate.submitted.lock().unwrap().len(), 1);
        assert_eq!(
            component.finalization_state(),
            FinalizationState::AwaitingFinalization
        );

        let done = Arc::new(AtomicBool::new(false));
        let flag = done.clone();
        component.finalize(true, move || flag.store(true, Ordering::SeqCst));
        assert_eq!(*status.lock().unwrap(), Some(AuthorizationStatus::Success));
        assert!(!done.load(Ordering::SeqCst));

        component.did_finish(sheet);
        assert!(done.load(Ordering::SeqCst));
        assert!(delegate.failed.lock().unwrap().is_empty());
        assert!(component.current_sheet_id().is_none());
    }

    #[test]
    fn test_finish_without_finalize_is_cancelled() {
        let (mut component, delegate) = component_with_delegate();
        let sheet = component.presentation_handle().unwrap().id();

        component.did_finish(sheet);
        assert_eq!(
            *delegate.failed.lock().unwrap(),
            vec![ComponentError::Cancelled]
        );
    }

    #[test]
    fn test_empty_token_fails_authorization() {
        let (mut component, delegate) = component_with_delegate();
        let sheet = component.presentation_handle().unwrap().id();

        let status = Arc::new(Mutex::new(None));
        let sink = status.clone();
        component.did_authorize_payment(
            sheet,
            AuthorizedPayment::new(Vec::new()),
            Box::new(move |s: AuthorizationStatus| *sink.lock().unwrap() = Some(s)),
        );

        assert_eq!(*status.lock().unwrap(), Some(AuthorizationStatus::Failure));
        assert_eq!(
            *delegate.failed.lock().unwrap(),
            vec![ComponentError::InvalidToken]
        );
        assert!(delegate.submitted.lock().unwrap().is_empty());
    }

    #[test]
    fn test_stale_sheet_events_are_ignored() {
        let (mut component, delegate) = component_with_delegate();
        let stale = component.presentation_handle().unwrap().id();
        component.finalize(true, || {});
        component.did_finish(stale);

        let fresh = component.presentation_handle().unwrap().id();
        assert_ne!(stale, fresh);

        component.did_finish(stale);
        assert!(delegate.failed.lock().unwrap().is_empty());
        assert_eq!(component.current_sheet_id(), Some(fresh));
    }

    #[test]
    fn test_presentation_handle_recreates_sheet() {
        let platform = Arc::new(FakePlatform::new());
        let mut component = ApplePayComponent::new(
            method(),
            context(),
            configuration(&[dec!(20)]),
            platform.clone(),
        )
        .unwrap();

        let first = component.presentation_handle().unwrap().id();
        assert_eq!(component.presentation_handle().unwrap().id(), first);
        assert_eq!(platform.sheets_created.load(Ordering::SeqCst), 1);

        component.finalize(true, || {});
        component.did_finish(first);
        assert_eq!(component.finalization_state(), FinalizationState::Finalized);

        let (second, second_request) = {
            let sheet = component.presentation_handle().unwrap();
            (sheet.id(), sheet.request().clone())
        };
        assert_ne!(second, first);
        assert_eq!(&second_request, component.request());
        assert_eq!(platform.sheets_created.load(Ordering::SeqCst), 2);
        assert_eq!(component.finalization_state(), FinalizationState::Idle);
    }

    fn authorize(component: &mut ApplePayComponent, sheet: SheetId) {
        component.did_authorize_payment(
            sheet,
            AuthorizedPayment::new(b"token".to_vec()).with_network(PaymentNetwork::Visa),
            Box::new(|_: AuthorizationStatus| {}),
        );
    }

    #[test]
    fn test_late_finalize_does_not_confirm_next_sheet() {
        let (mut component, delegate) = component_with_delegate();
        let first = component.presentation_handle().unwrap().id();
        authorize(&mut component, first);
        component.did_finish(first);

        let second = component.presentation_handle().unwrap().id();

        let done = Arc::new(AtomicBool::new(false));
        let flag = done.clone();
        component.finalize(true, move || flag.store(true, Ordering::SeqCst));
        assert!(done.load(Ordering::SeqCst));
        assert_eq!(component.finalization_state(), FinalizationState::Idle);

        // The payer dismisses the new sheet without paying.
        component.did_finish(second);
        assert_eq!(
            *delegate.failed.lock().unwrap(),
            vec![ComponentError::Cancelled, ComponentError::Cancelled]
        );
    }

    #[test]
    fn test_finalize_on_new_sheet_after_late_one() {
        let (mut component, delegate) = component_with_delegate();
        let first = component.presentation_handle().unwrap().id();
        authorize(&mut component, first);
        component.did_finish(first);

        let second = component.presentation_handle().unwrap().id();
        component.finalize(true, || {});

        authorize(&mut component, second);
        component.finalize(true, || {});
        component.did_finish(second);

        assert_eq!(
            *delegate.failed.lock().unwrap(),
            vec![ComponentError::Cancelled]
        );
        assert_eq!(delegate.submitted.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_recreation_failure_is_unknown() {
        let platform = Arc::new(FakePlatform::new());
        let mut component = ApplePayComponent::new(
            method(),
            context(),
            configuration(&[dec!(20)]),
            platform.clone(),
        )
        .unwrap();

        let sheet = component.presentation_handle().unwrap().id();
        component.did_finish(sheet);

        platform.refuse_sheets.store(true, Ordering::SeqCst);
        assert!(matches!(
            component.presentation_handle(),
            Err(ComponentError::Unknown(_))
        ));
    }
}
