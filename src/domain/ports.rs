use super::location::Coordinates;
use super::notice::Notice;
use super::order::{NewOrder, Order, OrderId};
use crate::error::Result;
use async_trait::async_trait;

/// Local storage key holding the `[id, status]` pairs.
pub const ORDER_STATUS_KEY: &str = "orderStatus";
/// Local storage key holding the last known `"lat,lng"`.
pub const USER_LOCATION_KEY: &str = "userLocation";
/// Local storage key holding the last resolved address.
pub const ADDRESS_KEY: &str = "address";

/// The hosted order table.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persists a new order and returns the id the store assigned.
    async fn insert(&self, order: NewOrder) -> Result<OrderId>;
    /// Every stored order, in no particular order.
    async fn select_all(&self) -> Result<Vec<Order>>;
}

/// Device-local string storage. Writes are last-writer-wins.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Address ⇄ coordinate resolution. `Ok(None)` means nothing was found.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn reverse(&self, at: Coordinates) -> Result<Option<String>>;
    async fn forward(&self, address: &str) -> Result<Option<Coordinates>>;
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice);
}

pub type OrderRepositoryBox = Box<dyn OrderRepository>;
pub type KeyValueStoreBox = Box<dyn KeyValueStore>;
pub type GeocoderBox = Box<dyn Geocoder>;
pub type NotifierBox = Box<dyn Notifier>;

/// Hands out handles that all reach the same order table.
pub type OrderRepositoryFactory = Box<dyn Fn() -> OrderRepositoryBox + Send + Sync>;
/// Hands out handles that all reach the same local storage.
pub type KeyValueStoreFactory = Box<dyn Fn() -> KeyValueStoreBox + Send + Sync>;
