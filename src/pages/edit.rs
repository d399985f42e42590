//! Edit-page loader
//!
//! Fetches the invoice and the customer list concurrently. A missing invoice
//! is an expected outcome and is reported as [`EditPageOutcome::NotFound`];
//! a failing fetch is an error and propagates to the caller.

use crate::core::entity::{CustomerField, Invoice};
use crate::core::error::{DashboardResult, StorageError};
use crate::core::service::InvoiceSource;
use serde::Serialize;

/// Data handed to the edit page renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditInvoicePage {
    pub invoice: Invoice,
    pub customers: Vec<CustomerField>,
}

/// Result of loading the edit page
#[derive(Debug, Clone, PartialEq)]
pub enum EditPageOutcome {
    Found(EditInvoicePage),
    NotFound,
}

/// Load everything the edit page needs for invoice `id`
///
/// Both fetches start together and are joined; the first failure wins. The
/// not-found outcome does not depend on how the customer fetch went, as long
/// as it did not fail.
pub async fn load_edit_page<S>(id: &str, source: &S) -> DashboardResult<EditPageOutcome>
where
    S: InvoiceSource + ?Sized,
{
    let invoice = async {
        source
            .fetch_invoice_by_id(id)
            .await
            .map_err(|e| StorageError::fetch("invoice", e))
    };
    let customers = async {
        source
            .fetch_customers()
            .await
            .map_err(|e| StorageError::fetch("customers", e))
    };

    let (invoice, customers) = tokio::try_join!(invoice, customers)?;

    let Some(invoice) = invoice else {
        tracing::debug!(invoice_id = %id, "invoice not found");
        return Ok(EditPageOutcome::NotFound);
    };

    tracing::debug!(invoice_id = %id, customers = customers.len(), "edit page loaded");
    Ok(EditPageOutcome::Found(EditInvoicePage { invoice, customers }))
}
