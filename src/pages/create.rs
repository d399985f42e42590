//! Create-page loader

use crate::core::error::{DashboardResult, StorageError};
use crate::core::service::InvoiceSource;
use crate::form::{CreateInvoiceForm, FormView};

/// Load the customer list and snapshot `form` for the create page
pub async fn load_create_page<S>(form: &CreateInvoiceForm, source: &S) -> DashboardResult<FormView>
where
    S: InvoiceSource + ?Sized,
{
    let customers = source
        .fetch_customers()
        .await
        .map_err(|e| StorageError::fetch("customers", e))?;
    Ok(form.view(customers))
}
