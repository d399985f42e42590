//! HTTP handlers for the invoice pages
//!
//! Handlers return JSON view models; markup is left to whatever renders them.

use axum::{
    Form, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::core::error::{DashboardError, DashboardResult, StorageError};
use crate::core::{Invoice, InvoiceActions, InvoiceDraft, InvoiceSource, InvoiceValidator};
use crate::form::{CreateInvoiceForm, FormView, SubmitOutcome};
use crate::pages::{EditInvoicePage, EditPageOutcome, load_create_page, load_edit_page};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn InvoiceSource>,
    pub actions: Arc<dyn InvoiceActions>,
    pub config: Arc<DashboardConfig>,
    pub validator: InvoiceValidator,
}

impl AppState {
    pub fn new(
        source: Arc<dyn InvoiceSource>,
        actions: Arc<dyn InvoiceActions>,
        config: Arc<DashboardConfig>,
    ) -> Self {
        let validator = InvoiceValidator::new(config.invoices.amount_precision);
        Self {
            source,
            actions,
            config,
            validator,
        }
    }

    /// Fresh, idle creation form
    pub fn new_form(&self) -> CreateInvoiceForm {
        CreateInvoiceForm::new(self.validator.clone(), self.config.invoices.list_path.clone())
    }
}

/// Health check endpoint handler
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "invoice-dashboard"
    }))
}

/// List all invoices
pub async fn list_invoices(State(state): State<AppState>) -> DashboardResult<Json<Vec<Invoice>>> {
    let invoices = state
        .source
        .fetch_invoices()
        .await
        .map_err(|e| StorageError::fetch("invoices", e))?;
    Ok(Json(invoices))
}

/// Render an empty creation form
pub async fn create_invoice_page(State(state): State<AppState>) -> DashboardResult<Json<FormView>> {
    let form = state.new_form();
    let view = load_create_page(&form, state.source.as_ref()).await?;
    Ok(Json(view))
}

/// Handle a creation form submission
///
/// - success: `303 See Other` to the invoice list
/// - invalid input: `422` with the field errors
/// - failed create: `500` with the catch-all error
pub async fn submit_create_invoice(
    State(state): State<AppState>,
    Form(draft): Form<InvoiceDraft>,
) -> DashboardResult<Response> {
    let mut form = state.new_form();

    let status = match form.submit(draft, state.actions.as_ref()).await {
        SubmitOutcome::Navigate { location } => {
            return Ok(Redirect::to(&location).into_response());
        }
        SubmitOutcome::Invalid => StatusCode::UNPROCESSABLE_ENTITY,
        SubmitOutcome::Failed => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let view = load_create_page(&form, state.source.as_ref()).await?;
    Ok((status, Json(view)).into_response())
}

/// Load the edit page for one invoice
pub async fn edit_invoice_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> DashboardResult<Json<EditInvoicePage>> {
    match load_edit_page(&id, state.source.as_ref()).await? {
        EditPageOutcome::Found(page) => Ok(Json(page)),
        EditPageOutcome::NotFound => Err(DashboardError::invoice_not_found(&id)),
    }
}
