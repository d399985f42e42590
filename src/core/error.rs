//! Typed error handling for the invoice dashboard
//!
//! Handlers and loaders return [`DashboardError`] so that callers can match on
//! the precise failure instead of a generic `anyhow::Error`.
//!
//! # Error Categories
//!
//! - [`InvoiceError`]: Errors related to invoice records
//! - [`StorageError`]: Errors raised by the data source
//!
//! Errors that never reach an HTTP response stand on their own:
//! [`ValidationError`] from parsing typed values, [`CreateError`] from a
//! backend's create action, and [`ConfigError`] from configuration loading.
//!
//! # Example
//!
//! ```rust,ignore
//! match load_edit_page(&id, source).await? {
//!     EditPageOutcome::Found(page) => Ok(Json(page)),
//!     EditPageOutcome::NotFound => Err(DashboardError::invoice_not_found(&id)),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// The main error type for the dashboard
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Invoice record errors
    #[error(transparent)]
    Invoice(#[from] InvoiceError),

    /// Storage backend errors
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl DashboardError {
    /// Shorthand for the loader's not-found signal
    pub fn invoice_not_found(id: &str) -> Self {
        DashboardError::Invoice(InvoiceError::NotFound { id: id.to_string() })
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::Invoice(e) => e.status_code(),
            DashboardError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            DashboardError::Invoice(e) => e.error_code(),
            DashboardError::Storage(e) => e.error_code(),
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            DashboardError::Invoice(InvoiceError::NotFound { id }) => {
                Some(serde_json::json!({ "id": id }))
            }
            DashboardError::Storage(_) => None,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self);
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Invoice Errors
// =============================================================================

/// Errors related to invoice records
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// No invoice exists for the requested id
    #[error("Invoice with id '{id}' not found")]
    NotFound { id: String },
}

impl InvoiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            InvoiceError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            InvoiceError::NotFound { .. } => "INVOICE_NOT_FOUND",
        }
    }
}

/// Reasons a backend refuses to store a new invoice
///
/// Create failures reach the user only as the form's catch-all message, so
/// these carry no HTTP mapping.
#[derive(Debug, Error)]
pub enum CreateError {
    /// Referenced customer does not exist
    #[error("Customer with id '{customer_id}' does not exist")]
    UnknownCustomer { customer_id: String },

    /// Amount does not convert to a positive, representable number of cents
    #[error("Amount {amount} cannot be stored as a positive number of cents")]
    UnrepresentableAmount { amount: f64 },
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to interpreting submitted values
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A single field carried a value that could not be interpreted
    #[error("Invalid value for field '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised by the data layer
#[derive(Debug, Error)]
pub enum StorageError {
    /// Fetching invoices or customers failed
    #[error("Failed to fetch {resource}: {message}")]
    FetchFailed { resource: String, message: String },
}

impl StorageError {
    /// Wrap an opaque fetch failure
    pub fn fetch(resource: &str, err: anyhow::Error) -> Self {
        StorageError::FetchFailed {
            resource: resource.to_string(),
            message: format!("{:#}", err),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::FetchFailed { .. } => "STORAGE_ERROR",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file '{file}': {message}")]
    ReadError { file: String, message: String },

    /// Failed to parse the configuration
    #[error("Failed to parse config{}: {message}", .file.as_deref().map(|f| format!(" '{}'", f)).unwrap_or_default())]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// A configuration value is out of range or inconsistent
    #[error("Invalid config value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result alias used across the dashboard
pub type DashboardResult<T> = std::result::Result<T, DashboardError>;
