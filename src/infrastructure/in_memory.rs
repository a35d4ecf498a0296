use crate::domain::location::Coordinates;
use crate::domain::notice::Notice;
use crate::domain::order::{NewOrder, Order, OrderId};
use crate::domain::ports::{Geocoder, KeyValueStore, Notifier, OrderRepository};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::RwLock;

/// A thread-safe in-memory order table.
///
/// Clones share the same table, so one clone can back the storefront while
/// another backs the dashboard. Ids are assigned sequentially from 1.
#[derive(Default, Clone)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<Vec<Order>>>,
}

impl InMemoryOrderRepository {
    /// Creates a new, empty order table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored orders.
    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn insert(&self, order: NewOrder) -> Result<OrderId> {
        let mut orders = self.orders.write().await;
        let id = orders.iter().map(|o| o.id).max().unwrap_or(0) + 1;
        orders.push(Order::new(id, order));
        Ok(id)
    }

    async fn select_all(&self) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.clone())
    }
}

/// Local storage kept in a shared map.
#[derive(Default, Clone)]
pub struct InMemoryKeyValueStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A geocoder backed by a fixed list of known places.
///
/// Reverse lookups match coordinates within about ten meters; forward lookups
/// match the address case-insensitively.
#[derive(Default, Clone)]
pub struct InMemoryGeocoder {
    places: Vec<(Coordinates, String)>,
}

impl InMemoryGeocoder {
    const TOLERANCE: f64 = 1e-4;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_place(mut self, at: Coordinates, address: impl Into<String>) -> Self {
        self.places.push((at, address.into()));
        self
    }
}

#[async_trait]
impl Geocoder for InMemoryGeocoder {
    async fn reverse(&self, at: Coordinates) -> Result<Option<String>> {
        Ok(self
            .places
            .iter()
            .find(|(place, _)| {
                (place.lat - at.lat).abs() < Self::TOLERANCE
                    && (place.lng - at.lng).abs() < Self::TOLERANCE
            })
            .map(|(_, address)| address.clone()))
    }

    async fn forward(&self, address: &str) -> Result<Option<Coordinates>> {
        let wanted = address.trim().to_lowercase();
        Ok(self
            .places
            .iter()
            .find(|(_, known)| known.to_lowercase() == wanted)
            .map(|(place, _)| *place))
    }
}

/// Keeps every notice it receives, in order.
#[derive(Default, Clone)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice.clone());
    }
}
