use crate::domain::money::Money;
use crate::domain::order::{Order, OrderId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Fulfillment state of an order on the staff dashboard.
///
/// Stored labels match the ones already written by existing dashboards; the
/// English names are accepted on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    #[serde(rename = "Pendiente", alias = "Pending")]
    Pending,
    #[serde(rename = "Cocinando", alias = "Cooking")]
    Cooking,
    #[serde(rename = "Entregado", alias = "Delivered")]
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 3] = [Self::Pending, Self::Cooking, Self::Delivered];

    /// The next state in the cycle. Delivered wraps back to Pending.
    pub fn next(self) -> Self {
        match self {
            Self::Pending => Self::Cooking,
            Self::Cooking => Self::Delivered,
            Self::Delivered => Self::Pending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Cooking => "cooking",
            Self::Delivered => "delivered",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of every order, as a total function over order ids.
///
/// Only ids that have been seen or advanced are stored; any other id reads as
/// [`OrderStatus::Pending`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusMap {
    entries: HashMap<OrderId, OrderStatus>,
}

impl StatusMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status_of(&self, id: OrderId) -> OrderStatus {
        self.entries.get(&id).copied().unwrap_or_default()
    }

    pub fn is_tracked(&self, id: OrderId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Starts tracking `id` as Pending. Existing entries are left alone.
    pub fn track(&mut self, id: OrderId) -> bool {
        if self.entries.contains_key(&id) {
            return false;
        }
        self.entries.insert(id, OrderStatus::Pending);
        true
    }

    pub fn set(&mut self, id: OrderId, status: OrderStatus) {
        self.entries.insert(id, status);
    }

    /// Moves `id` one step forward in the cycle and returns the new status.
    pub fn advance(&mut self, id: OrderId) -> OrderStatus {
        let next = self.status_of(id).next();
        self.entries.insert(id, next);
        next
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializes as a JSON list of `[id, status]` pairs, ordered by id.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut pairs: Vec<(OrderId, OrderStatus)> =
            self.entries.iter().map(|(id, status)| (*id, *status)).collect();
        pairs.sort_by_key(|(id, _)| *id);
        serde_json::to_string(&pairs)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let pairs: Vec<(OrderId, OrderStatus)> = serde_json::from_str(json)?;
        Ok(Self {
            entries: pairs.into_iter().collect(),
        })
    }
}

/// Orders split by status, each group in the order it was given.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct StatusBuckets<'a> {
    pub pending: Vec<&'a Order>,
    pub cooking: Vec<&'a Order>,
    pub delivered: Vec<&'a Order>,
}

impl<'a> StatusBuckets<'a> {
    pub fn get(&self, status: OrderStatus) -> &[&'a Order] {
        match status {
            OrderStatus::Pending => &self.pending,
            OrderStatus::Cooking => &self.cooking,
            OrderStatus::Delivered => &self.delivered,
        }
    }

    /// Revenue from delivered orders. Pending and cooking orders never count.
    pub fn collected_total(&self) -> Money {
        self.delivered.iter().map(|order| order.total()).sum()
    }

    /// All orders tagged with their status, pending first then cooking then delivered.
    pub fn iter(&self) -> impl Iterator<Item = (OrderStatus, &'a Order)> + '_ {
        OrderStatus::ALL
            .into_iter()
            .flat_map(move |status| self.get(status).iter().map(move |order| (status, *order)))
    }
}

pub fn bucket<'a>(orders: &'a [Order], statuses: &StatusMap) -> StatusBuckets<'a> {
    let mut buckets = StatusBuckets::default();
    for order in orders {
        match statuses.status_of(order.id) {
            OrderStatus::Pending => buckets.pending.push(order),
            OrderStatus::Cooking => buckets.cooking.push(order),
            OrderStatus::Delivered => buckets.delivered.push(order),
        }
    }
    buckets
}
