//! Router builder utilities for the dashboard routes

use super::handlers::{
    AppState, create_invoice_page, edit_invoice_page, health_check, list_invoices,
    submit_create_invoice,
};
use axum::{Router, routing::get};

/// Build health check routes
pub fn build_health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

/// Build invoice routes under the configured list path
///
/// With the default list path:
/// - GET /dashboard/invoices - List invoices
/// - GET /dashboard/invoices/create - Empty creation form
/// - POST /dashboard/invoices/create - Submit the creation form
/// - GET /dashboard/invoices/{id}/edit - Edit page data
pub fn build_invoice_routes(state: AppState) -> Router {
    let base = state.config.invoices.list_path.trim_end_matches('/').to_string();

    Router::new()
        .route(&base, get(list_invoices))
        .route(
            &format!("{}/create", base),
            get(create_invoice_page).post(submit_create_invoice),
        )
        .route(&format!("{}/{{id}}/edit", base), get(edit_invoice_page))
        .with_state(state)
}
