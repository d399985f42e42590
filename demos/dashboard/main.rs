//! Dashboard demo: seeds an in-memory store and serves the invoice pages
//!
//! Run with `cargo run --example dashboard [config.yaml]`.

use chrono::NaiveDate;
use dashboard::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => DashboardConfig::from_yaml_file(&path)?,
        None => DashboardConfig::default_config(),
    };
    init_tracing(&config.logging.level);

    let store = InMemoryInvoiceStore::new();
    for (id, name) in [
        ("c1", "Delba de Oliveira"),
        ("c2", "Lee Robinson"),
        ("c3", "Hector Simpson"),
    ] {
        store.insert_customer(CustomerField::new(id, name))?;
    }
    for (id, customer_id, amount, status, day) in [
        ("inv-1", "c1", 15795, InvoiceStatus::Pending, 6),
        ("inv-2", "c2", 20348, InvoiceStatus::Pending, 14),
        ("inv-3", "c3", 3040, InvoiceStatus::Paid, 29),
    ] {
        store.insert_invoice(Invoice {
            id: id.to_string(),
            customer_id: customer_id.to_string(),
            amount,
            status,
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap_or_default(),
        })?;
    }

    tracing::info!(list_path = %config.invoices.list_path, "seeded demo data");

    ServerBuilder::new()
        .with_store(store)
        .with_config(config)
        .serve_from_config()
        .await
}
