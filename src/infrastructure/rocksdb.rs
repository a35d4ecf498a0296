use crate::domain::order::{NewOrder, Order, OrderId};
use crate::domain::ports::{KeyValueStore, OrderRepository};
use crate::error::{Result, StorefrontError};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Column Family for storing submitted orders, keyed by big-endian id.
pub const CF_ORDERS: &str = "orders";
/// Column Family standing in for the device's local storage.
pub const CF_LOCAL: &str = "local";

/// A persistent store implementation using RocksDB.
///
/// Serves both as the order table and as local storage, using separate
/// Column Families. `Clone` shares the underlying `Arc<DB>`.
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
    insert_lock: Arc<Mutex<()>>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the "orders" and "local" column families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_orders = ColumnFamilyDescriptor::new(CF_ORDERS, Options::default());
        let cf_local = ColumnFamilyDescriptor::new(CF_LOCAL, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_orders, cf_local])?;

        Ok(Self {
            db: Arc::new(db),
            insert_lock: Arc::new(Mutex::new(())),
        })
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            StorefrontError::Io(std::io::Error::other(format!(
                "Column family {name} not found"
            )))
        })
    }

    fn last_order_id(&self) -> Result<OrderId> {
        let cf = self.cf(CF_ORDERS)?;
        match self.db.iterator_cf(cf, IteratorMode::End).next() {
            Some(item) => {
                let (key, _value) = item?;
                let bytes: [u8; 8] = key.as_ref().try_into().map_err(|_| {
                    StorefrontError::Io(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        "Malformed order key",
                    ))
                })?;
                Ok(OrderId::from_be_bytes(bytes))
            }
            None => Ok(0),
        }
    }
}

#[async_trait]
impl OrderRepository for RocksDBStore {
    async fn insert(&self, order: NewOrder) -> Result<OrderId> {
        let _guard = self.insert_lock.lock().await;
        let id = self.last_order_id()? + 1;
        let order = Order::new(id, order);

        let value = serde_json::to_vec(&order)?;
        self.db.put_cf(self.cf(CF_ORDERS)?, id.to_be_bytes(), value)?;

        Ok(id)
    }

    async fn select_all(&self) -> Result<Vec<Order>> {
        let cf = self.cf(CF_ORDERS)?;

        let mut orders = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item?;
            orders.push(serde_json::from_slice(&value)?);
        }

        Ok(orders)
    }
}

impl KeyValueStore for RocksDBStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match self.db.get_cf(self.cf(CF_LOCAL)?, key.as_bytes())? {
            Some(bytes) => String::from_utf8(bytes).map(Some).map_err(|e| {
                StorefrontError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            }),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.db
            .put_cf(self.cf(CF_LOCAL)?, key.as_bytes(), value.as_bytes())?;
        Ok(())
    }
}
