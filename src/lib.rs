//! # Invoice Dashboard
//!
//! The invoice pages of an admin dashboard, served over HTTP with axum.
//!
//! ## Features
//!
//! - **Edit-page loader**: fetches an invoice and the customer list concurrently,
//!   with a distinct not-found outcome
//! - **Creation form**: local validation of customer, amount and status, then a
//!   single call to the create action, with field errors or a catch-all error
//! - **Pluggable data layer**: [`InvoiceSource`](core::InvoiceSource) and
//!   [`InvoiceActions`](core::InvoiceActions) traits, with an in-memory backend
//! - **Typed errors**: page failures map to an HTTP status and error code
//! - **YAML configuration**: bind address, list path, amount precision policy
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dashboard::prelude::*;
//!
//! let store = InMemoryInvoiceStore::new();
//! store.insert_customer(CustomerField::new("c1", "Acme"))?;
//!
//! ServerBuilder::new()
//!     .with_store(store)
//!     .serve("127.0.0.1:3000")
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod form;
pub mod pages;
pub mod server;
pub mod storage;
pub mod telemetry;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        CustomerField, DashboardError, DashboardResult, FormErrors, FormField, Invoice,
        InvoiceActions, InvoiceDraft, InvoiceSource, InvoiceStatus, InvoiceValidator,
        ValidatedInvoice,
        error::{ConfigError, CreateError, InvoiceError, StorageError, ValidationError},
        validation::AmountPrecision,
    };

    // === Form & pages ===
    pub use crate::form::{CreateInvoiceForm, FormState, FormView, SubmitOutcome};
    pub use crate::pages::{EditInvoicePage, EditPageOutcome, load_create_page, load_edit_page};

    // === Storage ===
    pub use crate::storage::InMemoryInvoiceStore;

    // === Config ===
    pub use crate::config::DashboardConfig;

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};
    pub use crate::telemetry::init_tracing;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
}
