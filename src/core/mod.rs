//! Core module containing the dashboard's records, service traits and errors

pub mod entity;
pub mod error;
pub mod service;
pub mod validation;

pub use entity::{CustomerField, Invoice, InvoiceStatus};
pub use error::{
    ConfigError, CreateError, DashboardError, DashboardResult, ErrorResponse, InvoiceError,
    StorageError, ValidationError,
};
pub use service::{InvoiceActions, InvoiceSource};
pub use validation::{FormErrors, FormField, InvoiceDraft, InvoiceValidator, ValidatedInvoice};
