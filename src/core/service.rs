//! Service traits for the dashboard's external collaborators
//!
//! The dashboard is agnostic to where invoices and customers live. Backends
//! implement [`InvoiceSource`] for reads and [`InvoiceActions`] for the create
//! action; the in-memory store implements both.

use crate::core::entity::{CustomerField, Invoice};
use crate::core::validation::{InvoiceDraft, ValidatedInvoice};
use anyhow::Result;
use async_trait::async_trait;

/// Read side of the data layer
#[async_trait]
pub trait InvoiceSource: Send + Sync {
    /// Get an invoice by id
    ///
    /// Returns `Ok(None)` when no invoice matches; `Err` is reserved for
    /// failures of the backend itself.
    async fn fetch_invoice_by_id(&self, id: &str) -> Result<Option<Invoice>>;

    /// List every customer, ordered by name
    async fn fetch_customers(&self) -> Result<Vec<CustomerField>>;

    /// List every invoice
    async fn fetch_invoices(&self) -> Result<Vec<Invoice>>;
}

/// Write side of the data layer
#[async_trait]
pub trait InvoiceActions: Send + Sync {
    /// Persist a new invoice
    ///
    /// `draft` carries the raw submitted fields and `validated` their typed
    /// form. Only success or failure is observed by the caller.
    async fn create_invoice(
        &self,
        draft: &InvoiceDraft,
        validated: &ValidatedInvoice,
    ) -> Result<Invoice>;
}
