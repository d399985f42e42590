//! Invoice draft and its validator
//!
//! A draft is the raw field set of one submission. [`InvoiceValidator`] checks
//! it and either produces a [`ValidatedInvoice`] or the per-field
//! [`FormErrors`] to display next to each input.

use super::validators::{currency_precision, one_of, parse_amount, positive_amount, required};
use crate::core::entity::InvoiceStatus;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

pub const CUSTOMER_REQUIRED: &str = "Please select a customer.";
pub const AMOUNT_INVALID: &str = "Please enter an amount greater than $0.";
pub const STATUS_REQUIRED: &str = "Please select an invoice status.";
pub const CREATE_FAILED: &str = "Error creating invoice. Try again.";

const STATUS_VALUES: &[&str] = &["pending", "paid"];

/// Raw fields of one invoice submission, as posted by the form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl InvoiceDraft {
    pub fn new(
        customer_id: impl Into<String>,
        amount: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            customer_id: Some(customer_id.into()),
            amount: Some(amount.into()),
            status: Some(status.into()),
        }
    }

    /// Raw value submitted for a field, if any
    pub fn value(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::CustomerId => self.customer_id.as_deref(),
            FormField::Amount => self.amount.as_deref(),
            FormField::Status => self.status.as_deref(),
            FormField::Form => None,
        }
    }
}

/// Typed view of a draft that passed validation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedInvoice {
    pub customer_id: String,
    pub amount: f64,
    pub status: InvoiceStatus,
}

/// Keys of the error set; `Form` holds the catch-all message
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    CustomerId,
    Amount,
    Status,
    Form,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::CustomerId => "customerId",
            FormField::Amount => "amount",
            FormField::Status => "status",
            FormField::Form => "form",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field name to message mapping shown by the form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<FormField, String>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Error set holding only the catch-all message
    pub fn form(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(FormField::Form, message);
        errors
    }

    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.0.keys().copied()
    }
}

/// How strictly the amount's fractional precision is checked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmountPrecision {
    /// Any positive number is accepted
    #[default]
    Lenient,
    /// At most two fractional digits
    Strict,
}

type Rule = Arc<dyn Fn(Option<&str>) -> Result<(), String> + Send + Sync>;

/// Validator for invoice drafts
///
/// Rules run per field in order; the first failing rule of a field supplies
/// its message. Every field is checked so the user sees all problems at once.
#[derive(Clone)]
pub struct InvoiceValidator {
    rules: Vec<(FormField, Vec<Rule>)>,
}

impl InvoiceValidator {
    pub fn new(precision: AmountPrecision) -> Self {
        let mut amount_rules: Vec<Rule> = vec![Arc::new(positive_amount(AMOUNT_INVALID))];
        if precision == AmountPrecision::Strict {
            amount_rules.push(Arc::new(currency_precision(AMOUNT_INVALID)));
        }

        let customer_rules: Vec<Rule> = vec![Arc::new(required(CUSTOMER_REQUIRED))];
        let status_rules: Vec<Rule> = vec![
            Arc::new(required(STATUS_REQUIRED)),
            Arc::new(one_of(STATUS_VALUES, STATUS_REQUIRED)),
        ];

        Self {
            rules: vec![
                (FormField::CustomerId, customer_rules),
                (FormField::Amount, amount_rules),
                (FormField::Status, status_rules),
            ],
        }
    }

    /// Check a draft, returning its typed form or the collected field errors
    pub fn validate(&self, draft: &InvoiceDraft) -> Result<ValidatedInvoice, FormErrors> {
        let mut errors = FormErrors::new();

        for (field, rules) in &self.rules {
            let value = draft.value(*field);
            if let Some(message) = rules.iter().find_map(|rule| rule(value).err()) {
                errors.insert(*field, message);
            }
        }

        let customer_id = draft.customer_id.as_deref().filter(|v| !v.is_empty());
        let amount = draft.amount.as_deref().and_then(parse_amount);
        let status = draft
            .status
            .as_deref()
            .and_then(|s| s.parse::<InvoiceStatus>().ok());

        match (customer_id, amount, status) {
            (Some(customer_id), Some(amount), Some(status)) if errors.is_empty() => {
                Ok(ValidatedInvoice {
                    customer_id: customer_id.to_string(),
                    amount,
                    status,
                })
            }
            (customer_id, amount, status) => {
                // A value the rules let through but that has no typed form
                // is reported against its own field.
                let untyped = [
                    (FormField::CustomerId, customer_id.is_none(), CUSTOMER_REQUIRED),
                    (FormField::Amount, amount.is_none(), AMOUNT_INVALID),
                    (FormField::Status, status.is_none(), STATUS_REQUIRED),
                ];
                for (field, missing, message) in untyped {
                    if missing && !errors.contains(field) {
                        errors.insert(field, message);
                    }
                }
                Err(errors)
            }
        }
    }
}

impl Default for InvoiceValidator {
    fn default() -> Self {
        Self::new(AmountPrecision::default())
    }
}
