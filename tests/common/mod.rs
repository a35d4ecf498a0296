#![allow(dead_code)]

use async_trait::async_trait;
use std::io::Error;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use storefront::domain::order::{NewOrder, Order, OrderId};
use storefront::domain::ports::OrderRepository;
use storefront::error::{Result, StorefrontError};
use storefront::infrastructure::in_memory::InMemoryOrderRepository;

/// Writes an event script. Each row is `[action, id, value, text]`.
pub fn write_script(path: &Path, rows: &[[&str; 4]]) -> std::result::Result<(), Error> {
    let mut wtr = csv::WriterBuilder::new().from_path(path)?;
    wtr.write_record(["action", "id", "value", "text"])?;
    for row in rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Rows that fill every required field of the order form.
pub fn customer_rows(name: &'static str, date: &'static str, time: &'static str) -> Vec<[&'static str; 4]> {
    vec![
        ["name", "", "", name],
        ["phone", "", "", "3001234567"],
        ["date", "", "", date],
        ["time", "", "", time],
        ["address", "", "", "Cra 5 #10-20"],
    ]
}

/// An order table that counts inserts and can be switched off.
#[derive(Clone, Default)]
pub struct FlakyOrderRepository {
    inner: InMemoryOrderRepository,
    inserts: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
}

impl FlakyOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn insert_calls(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OrderRepository for FlakyOrderRepository {
    async fn insert(&self, order: NewOrder) -> Result<OrderId> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorefrontError::Submission(
                "connection reset by peer".to_string(),
            ));
        }
        self.inner.insert(order).await
    }

    async fn select_all(&self) -> Result<Vec<Order>> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorefrontError::Load("service unavailable".to_string()));
        }
        self.inner.select_all().await
    }
}
