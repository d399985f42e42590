//! Invoice creation form
//!
//! [`CreateInvoiceForm`] holds the form's local state (the error set and the
//! submitting flag) and drives one submission through
//! `Idle -> Validating -> (Invalid | Submitting) -> (Succeeded | Failed) -> Idle`.
//!
//! `submit` takes `&mut self`, so a form can only have one submission in
//! flight. The create call has no timeout of its own. If the caller drops the
//! `submit` future mid-call (a timeout or a disconnected client), the form is
//! settled as abandoned: back to `Idle` with the submit control enabled.

use crate::core::entity::CustomerField;
use crate::core::service::InvoiceActions;
use crate::core::validation::{
    CREATE_FAILED, FormErrors, InvoiceDraft, InvoiceValidator, ValidatedInvoice,
};
use serde::Serialize;

pub const SUBMIT_LABEL: &str = "Create Invoice";
pub const SUBMITTING_LABEL: &str = "Creating...";

/// Position of the form in its submission cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormState {
    Idle,
    Validating,
    Invalid,
    Submitting,
    Succeeded,
    Failed,
}

impl FormState {
    fn can_transition_to(self, next: FormState) -> bool {
        use FormState::*;
        matches!(
            (self, next),
            (Idle, Validating)
                | (Validating, Invalid)
                | (Validating, Submitting)
                | (Submitting, Succeeded)
                | (Submitting, Failed)
                | (Invalid, Idle)
                | (Failed, Idle)
                | (Succeeded, Idle)
        )
    }
}

/// What the caller should do once a submission settles
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Local validation failed; field errors are on the form
    Invalid,
    /// The invoice was created; leave the form for `location`
    Navigate { location: String },
    /// The create action failed; the catch-all error is on the form
    Failed,
}

/// Serializable snapshot of the form for rendering
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    pub customers: Vec<CustomerField>,
    pub errors: FormErrors,
    pub submitting: bool,
    pub submit_label: &'static str,
    pub submit_disabled: bool,
    pub cancel_href: String,
}

/// State holder for the invoice creation form
#[derive(Clone)]
pub struct CreateInvoiceForm {
    validator: InvoiceValidator,
    list_path: String,
    state: FormState,
    errors: FormErrors,
    submitting: bool,
}

impl CreateInvoiceForm {
    /// Create an idle form that navigates to `list_path` after a successful create
    pub fn new(validator: InvoiceValidator, list_path: impl Into<String>) -> Self {
        Self {
            validator,
            list_path: list_path.into(),
            state: FormState::Idle,
            errors: FormErrors::new(),
            submitting: false,
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn submit_label(&self) -> &'static str {
        if self.submitting {
            SUBMITTING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    /// Snapshot the form together with the customers offered for selection
    pub fn view(&self, customers: Vec<CustomerField>) -> FormView {
        FormView {
            customers,
            errors: self.errors.clone(),
            submitting: self.submitting,
            submit_label: self.submit_label(),
            submit_disabled: self.submitting,
            cancel_href: self.list_path.clone(),
        }
    }

    /// Run one full submission: validate, then call the create action
    pub async fn submit<A>(&mut self, draft: InvoiceDraft, actions: &A) -> SubmitOutcome
    where
        A: InvoiceActions + ?Sized,
    {
        let Some(validated) = self.begin(&draft) else {
            return SubmitOutcome::Invalid;
        };

        let pending = PendingSubmit::new(self);
        let result = actions.create_invoice(&draft, &validated).await;
        pending.settle(result)
    }

    /// Validate a draft and, when valid, enter `Submitting`
    ///
    /// The previous error set is cleared first. On invalid input the field
    /// errors are stored and the form returns to `Idle`.
    pub fn begin(&mut self, draft: &InvoiceDraft) -> Option<ValidatedInvoice> {
        if self.state == FormState::Submitting {
            self.abandon();
        }
        if self.state != FormState::Idle {
            self.transition(FormState::Idle);
        }
        self.transition(FormState::Validating);
        self.errors.clear();

        match self.validator.validate(draft) {
            Ok(validated) => {
                self.transition(FormState::Submitting);
                self.submitting = true;
                Some(validated)
            }
            Err(errors) => {
                tracing::debug!(fields = ?errors.fields().collect::<Vec<_>>(), "invoice draft rejected");
                self.errors = errors;
                self.transition(FormState::Invalid);
                self.transition(FormState::Idle);
                None
            }
        }
    }

    /// Settle an in-flight submission with the create action's result
    ///
    /// The submitting flag is reset whatever the outcome. Failures collapse to
    /// the single catch-all message.
    pub fn settle<T, E>(&mut self, result: Result<T, E>) -> SubmitOutcome
    where
        E: std::fmt::Display,
    {
        let outcome = match result {
            Ok(_) => {
                self.transition(FormState::Succeeded);
                tracing::info!(location = %self.list_path, "invoice created");
                SubmitOutcome::Navigate {
                    location: self.list_path.clone(),
                }
            }
            Err(err) => {
                self.transition(FormState::Failed);
                tracing::warn!(error = %err, "invoice creation failed");
                self.errors = FormErrors::form(CREATE_FAILED);
                self.transition(FormState::Idle);
                SubmitOutcome::Failed
            }
        };
        self.submitting = false;
        outcome
    }

    /// Give up on an in-flight submission whose result will never arrive
    ///
    /// The create action may or may not have run, so no error is shown.
    fn abandon(&mut self) {
        tracing::warn!("invoice submission abandoned before the create action returned");
        self.transition(FormState::Failed);
        self.transition(FormState::Idle);
        self.submitting = false;
    }

    fn transition(&mut self, next: FormState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid form transition {:?} -> {:?}",
            self.state,
            next
        );
        tracing::trace!(from = ?self.state, to = ?next, "form transition");
        self.state = next;
    }
}

/// Borrow of a form in `Submitting` that settles it even if never resolved
struct PendingSubmit<'a> {
    form: &'a mut CreateInvoiceForm,
    settled: bool,
}

impl<'a> PendingSubmit<'a> {
    fn new(form: &'a mut CreateInvoiceForm) -> Self {
        Self {
            form,
            settled: false,
        }
    }

    fn settle<T, E>(mut self, result: Result<T, E>) -> SubmitOutcome
    where
        E: std::fmt::Display,
    {
        self.settled = true;
        self.form.settle(result)
    }
}

impl Drop for PendingSubmit<'_> {
    fn drop(&mut self) {
        if !self.settled && self.form.state == FormState::Submitting {
            self.form.abandon();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::{Invoice, InvoiceStatus};
    use crate::core::validation::{
        AMOUNT_INVALID, CUSTOMER_REQUIRED, FormField, STATUS_REQUIRED,
    };
    use anyhow::{Result, anyhow};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Mutex;
    use std::time::Duration;

    const LIST_PATH: &str = "/dashboard/invoices";

    /// Records every call and succeeds or fails on demand
    #[derive(Default)]
    struct RecordingActions {
        calls: Mutex<Vec<InvoiceDraft>>,
        fail: bool,
    }

    impl RecordingActions {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<InvoiceDraft> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl InvoiceActions for RecordingActions {
        async fn create_invoice(
            &self,
            draft: &InvoiceDraft,
            validated: &ValidatedInvoice,
        ) -> Result<Invoice> {
            self.calls.lock().unwrap().push(draft.clone());
            if self.fail {
                return Err(anyhow!("database unavailable"));
            }
            Ok(Invoice {
                id: "inv-new".to_string(),
                customer_id: validated.customer_id.clone(),
                amount: (validated.amount * 100.0).round() as i64,
                status: validated.status,
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            })
        }
    }

    /// Never answers within any reasonable test timeout
    struct StalledActions;

    #[async_trait]
    impl InvoiceActions for StalledActions {
        async fn create_invoice(
            &self,
            _draft: &InvoiceDraft,
            _validated: &ValidatedInvoice,
        ) -> Result<Invoice> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Err(anyhow!("stalled"))
        }
    }

    fn form() -> CreateInvoiceForm {
        CreateInvoiceForm::new(InvoiceValidator::default(), LIST_PATH)
    }

    #[test]
    fn test_new_form_is_idle() {
        let form = form();
        assert_eq!(form.state(), FormState::Idle);
        assert!(form.errors().is_empty());
        assert!(!form.is_submitting());
        assert_eq!(form.submit_label(), SUBMIT_LABEL);
    }

    #[tokio::test]
    async fn test_valid_draft_calls_action_once_and_navigates() {
        let actions = RecordingActions::default();
        let mut form = form();
        let draft = InvoiceDraft::new("c1", "25.00", "pending");

        let outcome = form.submit(draft.clone(), &actions).await;

        assert_eq!(
            outcome,
            SubmitOutcome::Navigate {
                location: LIST_PATH.to_string()
            }
        );
        assert_eq!(actions.calls(), vec![draft]);
        assert_eq!(form.state(), FormState::Succeeded);
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_invalid_draft_never_calls_action() {
        let actions = RecordingActions::default();
        let mut form = form();

        let outcome = form.submit(InvoiceDraft::default(), &actions).await;

        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert!(actions.calls().is_empty());
        assert_eq!(form.state(), FormState::Idle);
        assert!(!form.is_submitting());
        assert_eq!(form.errors().get(FormField::CustomerId), Some(CUSTOMER_REQUIRED));
        assert_eq!(form.errors().get(FormField::Amount), Some(AMOUNT_INVALID));
        assert_eq!(form.errors().get(FormField::Status), Some(STATUS_REQUIRED));
    }

    #[tokio::test]
    async fn test_failed_action_shows_catch_all_error() {
        let actions = RecordingActions::failing();
        let mut form = form();

        let outcome = form
            .submit(InvoiceDraft::new("c1", "25.00", "pending"), &actions)
            .await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(actions.calls().len(), 1);
        assert_eq!(form.errors().len(), 1);
        assert_eq!(form.errors().get(FormField::Form), Some(CREATE_FAILED));
        assert!(!form.is_submitting());
        assert_eq!(form.state(), FormState::Idle);
    }

    #[tokio::test]
    async fn test_resubmit_clears_previous_errors() {
        let mut form = form();

        form.submit(
            InvoiceDraft::new("c1", "25.00", "paid"),
            &RecordingActions::failing(),
        )
        .await;
        assert!(form.errors().contains(FormField::Form));

        let outcome = form
            .submit(
                InvoiceDraft::new("", "25.00", "paid"),
                &RecordingActions::default(),
            )
            .await;

        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert!(!form.errors().contains(FormField::Form));
        assert_eq!(form.errors().len(), 1);
        assert!(form.errors().contains(FormField::CustomerId));
    }

    #[test]
    fn test_submitting_disables_control_until_settled() {
        let mut form = form();

        let validated = form
            .begin(&InvoiceDraft::new("c1", "10.50", "paid"))
            .unwrap();
        assert_eq!(validated.status, InvoiceStatus::Paid);
        assert_eq!(form.state(), FormState::Submitting);

        let view = form.view(Vec::new());
        assert!(view.submitting);
        assert!(view.submit_disabled);
        assert_eq!(view.submit_label, SUBMITTING_LABEL);

        form.settle::<(), _>(Err("boom"));
        let view = form.view(Vec::new());
        assert!(!view.submit_disabled);
        assert_eq!(view.submit_label, SUBMIT_LABEL);
    }

    #[test]
    fn test_view_serializes_for_rendering() {
        let form = form();
        let view = form.view(vec![CustomerField::new("c1", "Acme")]);
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["customers"][0]["name"], "Acme");
        assert_eq!(json["submitLabel"], SUBMIT_LABEL);
        assert_eq!(json["cancelHref"], LIST_PATH);
        assert_eq!(json["errors"], serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_dropped_submission_releases_the_form() {
        let mut form = form();

        let timed_out = tokio::time::timeout(
            Duration::from_millis(20),
            form.submit(InvoiceDraft::new("c1", "25.00", "pending"), &StalledActions),
        )
        .await;
        assert!(timed_out.is_err());

        assert_eq!(form.state(), FormState::Idle);
        assert!(!form.is_submitting());
        assert!(form.errors().is_empty());
        assert!(!form.view(Vec::new()).submit_disabled);

        let actions = RecordingActions::default();
        let outcome = form
            .submit(InvoiceDraft::new("c1", "25.00", "pending"), &actions)
            .await;
        assert!(matches!(outcome, SubmitOutcome::Navigate { .. }));
        assert_eq!(actions.calls().len(), 1);
    }

    #[test]
    fn test_begin_recovers_from_unsettled_submission() {
        let mut form = form();
        form.begin(&InvoiceDraft::new("c1", "10", "paid")).unwrap();
        assert_eq!(form.state(), FormState::Submitting);

        let outcome = form.begin(&InvoiceDraft::default());

        assert!(outcome.is_none());
        assert_eq!(form.state(), FormState::Idle);
        assert!(!form.is_submitting());
        assert_eq!(form.errors().len(), 3);
    }
}
