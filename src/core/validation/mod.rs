//! Validation of invoice form input
//!
//! Field rules are small reusable closures (see [`validators`]) assembled by
//! [`InvoiceValidator`] into the per-field checks of the creation form.

pub mod draft;
pub mod validators;

pub use draft::{
    AMOUNT_INVALID, AmountPrecision, CREATE_FAILED, CUSTOMER_REQUIRED, FormErrors, FormField,
    InvoiceDraft, InvoiceValidator, STATUS_REQUIRED, ValidatedInvoice,
};
