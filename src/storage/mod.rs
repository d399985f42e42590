//! Storage implementations for the dashboard's data layer

pub mod in_memory;

pub use in_memory::{InMemoryInvoiceStore, amount_to_cents};
