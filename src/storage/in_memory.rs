//! In-memory invoice store for development and testing

use crate::core::entity::{CustomerField, Invoice};
use crate::core::error::CreateError;
use crate::core::service::{InvoiceActions, InvoiceSource};
use crate::core::validation::{InvoiceDraft, ValidatedInvoice};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory invoice store
///
/// Implements both the read side and the create action. Uses RwLock for
/// thread-safe access; clones share the same data.
#[derive(Clone, Default)]
pub struct InMemoryInvoiceStore {
    invoices: Arc<RwLock<HashMap<String, Invoice>>>,
    customers: Arc<RwLock<Vec<CustomerField>>>,
    fail_fetches: Arc<AtomicBool>,
    fail_creates: Arc<AtomicBool>,
}

impl InMemoryInvoiceStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a customer
    pub fn insert_customer(&self, customer: CustomerField) -> Result<()> {
        let mut customers = self
            .customers
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        customers.retain(|c| c.id != customer.id);
        customers.push(customer);

        Ok(())
    }

    /// Add or replace an invoice
    pub fn insert_invoice(&self, invoice: Invoice) -> Result<()> {
        let mut invoices = self
            .invoices
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        invoices.insert(invoice.id.clone(), invoice);

        Ok(())
    }

    /// Make every fetch fail until reset
    pub fn set_fail_fetches(&self, fail: bool) {
        self.fail_fetches.store(fail, Ordering::SeqCst);
    }

    /// Make every create fail until reset
    pub fn set_fail_creates(&self, fail: bool) {
        self.fail_creates.store(fail, Ordering::SeqCst);
    }

    fn check_fetch(&self) -> Result<()> {
        if self.fail_fetches.load(Ordering::SeqCst) {
            return Err(anyhow!("In-memory store is unavailable"));
        }
        Ok(())
    }

    fn customer_exists(&self, id: &str) -> Result<bool> {
        let customers = self
            .customers
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(customers.iter().any(|c| c.id == id))
    }
}

/// Convert a currency amount to cents, rounding to the nearest cent
///
/// Returns `None` when the result is not a positive number of cents that
/// fits in an `i64`.
pub fn amount_to_cents(amount: f64) -> Option<i64> {
    let cents = (amount * 100.0).round();
    if cents.is_finite() && cents >= 1.0 && cents < i64::MAX as f64 {
        Some(cents as i64)
    } else {
        None
    }
}

#[async_trait]
impl InvoiceSource for InMemoryInvoiceStore {
    async fn fetch_invoice_by_id(&self, id: &str) -> Result<Option<Invoice>> {
        self.check_fetch()?;
        let invoices = self
            .invoices
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(invoices.get(id).cloned())
    }

    async fn fetch_customers(&self) -> Result<Vec<CustomerField>> {
        self.check_fetch()?;
        let customers = self
            .customers
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut list = customers.clone();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(list)
    }

    async fn fetch_invoices(&self) -> Result<Vec<Invoice>> {
        self.check_fetch()?;
        let invoices = self
            .invoices
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut list: Vec<Invoice> = invoices.values().cloned().collect();
        list.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        Ok(list)
    }
}

#[async_trait]
impl InvoiceActions for InMemoryInvoiceStore {
    async fn create_invoice(
        &self,
        _draft: &InvoiceDraft,
        validated: &ValidatedInvoice,
    ) -> Result<Invoice> {
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(anyhow!("In-memory store rejected the write"));
        }
        if !self.customer_exists(&validated.customer_id)? {
            return Err(CreateError::UnknownCustomer {
                customer_id: validated.customer_id.clone(),
            }
            .into());
        }
        let amount =
            amount_to_cents(validated.amount).ok_or(CreateError::UnrepresentableAmount {
                amount: validated.amount,
            })?;

        let invoice = Invoice {
            id: Uuid::new_v4().to_string(),
            customer_id: validated.customer_id.clone(),
            amount,
            status: validated.status,
            date: Utc::now().date_naive(),
        };
        self.insert_invoice(invoice.clone())?;

        tracing::debug!(invoice_id = %invoice.id, amount = invoice.amount, "invoice stored");
        Ok(invoice)
    }
}
