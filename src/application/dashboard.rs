use crate::domain::money::Money;
use crate::domain::order::{Order, OrderId, sort_chronologically};
use crate::domain::ports::{KeyValueStore, KeyValueStoreBox, ORDER_STATUS_KEY, OrderRepositoryBox};
use crate::domain::status::{OrderStatus, StatusBuckets, StatusMap, bucket};
use crate::error::{Result, StorefrontError};
use tracing::{error, info, warn};

/// The staff view over submitted orders.
///
/// Statuses live on this device only: they are read from local storage when
/// the tracker is built and written back in full after every change.
pub struct StatusTracker {
    orders: OrderRepositoryBox,
    local: KeyValueStoreBox,
    statuses: StatusMap,
    loaded: Vec<Order>,
    load_error: Option<String>,
}

impl StatusTracker {
    pub fn new(orders: OrderRepositoryBox, local: KeyValueStoreBox) -> Self {
        let statuses = restore_statuses(local.as_ref());
        Self {
            orders,
            local,
            statuses,
            loaded: Vec::new(),
            load_error: None,
        }
    }

    /// Fetches every order and starts tracking unseen ids as Pending.
    ///
    /// Statuses already known are kept. If the fetch fails, no orders are
    /// shown and the error message is kept for display.
    pub async fn load(&mut self) -> Result<usize> {
        match self.orders.select_all().await {
            Ok(mut orders) => {
                sort_chronologically(&mut orders);
                let mut newly_tracked = 0;
                for order in &orders {
                    if self.statuses.track(order.id) {
                        newly_tracked += 1;
                    }
                }
                info!(orders = orders.len(), newly_tracked, "Orders loaded");
                self.loaded = orders;
                self.load_error = None;
                Ok(self.loaded.len())
            }
            Err(e) => {
                let message = match e {
                    StorefrontError::Load(message) => message,
                    other => other.to_string(),
                };
                error!(error = %message, "Failed to load orders");
                self.loaded.clear();
                self.load_error = Some(message.clone());
                Err(StorefrontError::Load(message))
            }
        }
    }

    /// Moves an order one step along Pending → Cooking → Delivered → Pending
    /// and saves the whole status map.
    ///
    /// Only orders returned by the last successful [`load`](Self::load) can be
    /// advanced.
    pub fn advance(&mut self, id: OrderId) -> Result<OrderStatus> {
        if !self.loaded.iter().any(|order| order.id == id) {
            return Err(StorefrontError::Validation(format!(
                "Order {id} is not on the dashboard"
            )));
        }
        let mut next = self.statuses.clone();
        let status = next.advance(id);
        self.local.set(ORDER_STATUS_KEY, &next.to_json()?)?;
        self.statuses = next;
        info!(order_id = id, %status, "Order status advanced");
        Ok(status)
    }

    pub fn status_of(&self, id: OrderId) -> OrderStatus {
        self.statuses.status_of(id)
    }

    pub fn statuses(&self) -> &StatusMap {
        &self.statuses
    }

    /// Loaded orders, earliest delivery first.
    pub fn orders(&self) -> &[Order] {
        &self.loaded
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn buckets(&self) -> StatusBuckets<'_> {
        bucket(&self.loaded, &self.statuses)
    }

    pub fn collected_total(&self) -> Money {
        self.buckets().collected_total()
    }
}

fn restore_statuses(local: &dyn KeyValueStore) -> StatusMap {
    match local.get(ORDER_STATUS_KEY) {
        Ok(Some(json)) => StatusMap::from_json(&json).unwrap_or_else(|e| {
            warn!(error = %e, "Stored order statuses are unreadable, starting fresh");
            StatusMap::new()
        }),
        Ok(None) => StatusMap::new(),
        Err(e) => {
            warn!(error = %e, "Could not read stored order statuses");
            StatusMap::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::Cart;
    use crate::domain::menu::MenuItem;
    use crate::domain::order::NewOrder;
    use crate::domain::ports::OrderRepository;
    use crate::infrastructure::in_memory::{InMemoryKeyValueStore, InMemoryOrderRepository};

    fn new_order(date: &str, time: &str, price: u64) -> NewOrder {
        let mut cart = Cart::new();
        cart.add_item(&MenuItem::new(1, "Clásica", Money::new(price), "", &[], "").unwrap());
        NewOrder {
            name: "Ana".to_string(),
            phone: "3001234567".to_string(),
            address: "Centro".to_string(),
            location: String::new(),
            date: date.to_string(),
            time: time.to_string(),
            items: cart.snapshot(),
        }
    }

    async fn seeded_repo() -> InMemoryOrderRepository {
        let repo = InMemoryOrderRepository::new();
        repo.insert(new_order("2025-01-02", "10:00", 10_000)).await.unwrap();
        repo.insert(new_order("2025-01-01", "09:00", 5_000)).await.unwrap();
        repo
    }

    #[tokio::test]
    async fn test_load_sorts_and_defaults_to_pending() {
        let repo = seeded_repo().await;
        let mut tracker = StatusTracker::new(Box::new(repo), Box::new(InMemoryKeyValueStore::new()));

        assert_eq!(tracker.load().await.unwrap(), 2);

        let ids: Vec<_> = tracker.orders().iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(tracker.status_of(1), OrderStatus::Pending);
        assert!(tracker.statuses().is_tracked(2));
        assert_eq!(tracker.buckets().pending.len(), 2);
    }

    #[tokio::test]
    async fn test_advance_persists_full_map() {
        let repo = seeded_repo().await;
        let local = InMemoryKeyValueStore::new();
        let mut tracker = StatusTracker::new(Box::new(repo), Box::new(local.clone()));
        tracker.load().await.unwrap();

        assert_eq!(tracker.advance(1).unwrap(), OrderStatus::Cooking);

        let stored = local.get(ORDER_STATUS_KEY).unwrap().unwrap();
        assert_eq!(stored, r#"[[1,"Cocinando"],[2,"Pendiente"]]"#);
    }

    #[tokio::test]
    async fn test_advance_unknown_order_is_rejected() {
        let repo = seeded_repo().await;
        let local = InMemoryKeyValueStore::new();
        let mut tracker = StatusTracker::new(Box::new(repo), Box::new(local.clone()));

        // Nothing is on the dashboard before the first load
        assert!(matches!(tracker.advance(1), Err(StorefrontError::Validation(_))));

        tracker.load().await.unwrap();
        assert!(matches!(tracker.advance(42), Err(StorefrontError::Validation(_))));

        assert!(!tracker.statuses().is_tracked(42));
        assert_eq!(local.get(ORDER_STATUS_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_reload_keeps_previous_status() {
        let repo = seeded_repo().await;
        let local = InMemoryKeyValueStore::new();
        local.set(ORDER_STATUS_KEY, r#"[[1,"Cocinando"]]"#).unwrap();

        let mut tracker = StatusTracker::new(Box::new(repo.clone()), Box::new(local));
        tracker.load().await.unwrap();
        tracker.load().await.unwrap();

        assert_eq!(tracker.status_of(1), OrderStatus::Cooking);
        assert_eq!(tracker.status_of(2), OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_collected_total_follows_delivered_bucket() {
        let repo = seeded_repo().await;
        let mut tracker = StatusTracker::new(Box::new(repo), Box::new(InMemoryKeyValueStore::new()));
        tracker.load().await.unwrap();

        tracker.advance(1).unwrap();
        tracker.advance(1).unwrap();
        assert_eq!(tracker.collected_total(), Money::new(10_000));

        tracker.advance(2).unwrap();
        tracker.advance(2).unwrap();
        assert_eq!(tracker.collected_total(), Money::new(15_000));

        tracker.advance(1).unwrap();
        assert_eq!(tracker.status_of(1), OrderStatus::Pending);
        assert_eq!(tracker.collected_total(), Money::new(5_000));
    }

    #[tokio::test]
    async fn test_corrupt_stored_statuses_start_fresh() {
        let local = InMemoryKeyValueStore::new();
        local.set(ORDER_STATUS_KEY, "not json").unwrap();

        let tracker = StatusTracker::new(
            Box::new(InMemoryOrderRepository::new()),
            Box::new(local),
        );

        assert!(tracker.statuses().is_empty());
    }
}
