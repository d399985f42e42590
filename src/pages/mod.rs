//! Page loaders
//!
//! Loaders gather the data a dashboard page needs from the data layer and
//! return it as plain serializable structures.

pub mod create;
pub mod edit;

pub use create::load_create_page;
pub use edit::{EditInvoicePage, EditPageOutcome, load_edit_page};
