use crate::domain::cart::CartLine;
use crate::domain::money::Money;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

pub type OrderId = u64;

/// An order as submitted, before the store assigns it an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub location: String,
    pub date: String,
    pub time: String,
    pub items: Vec<CartLine>,
}

/// A persisted order. `items` is the cart as it was at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub location: String,
    pub date: String,
    pub time: String,
    pub items: Vec<CartLine>,
}

impl Order {
    pub fn new(id: OrderId, order: NewOrder) -> Self {
        Self {
            id,
            name: order.name,
            phone: order.phone,
            address: order.address,
            location: order.location,
            date: order.date,
            time: order.time,
            items: order.items,
        }
    }

    pub fn total(&self) -> Money {
        self.items.iter().map(CartLine::line_total).sum()
    }

    /// The requested delivery instant, or `None` when date or time do not parse.
    pub fn sort_key(&self) -> Option<NaiveDateTime> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()?;
        let time = self.time.trim();
        let time = NaiveTime::parse_from_str(time, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
            .ok()?;
        Some(date.and_time(time))
    }
}

/// Sorts orders by delivery instant, earliest first.
///
/// The sort is stable, so ties keep their input order. Orders with an
/// unreadable date or time go last.
pub fn sort_chronologically(orders: &mut [Order]) {
    orders.sort_by_key(|order| {
        let key = order.sort_key();
        (key.is_none(), key)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: OrderId, date: &str, time: &str) -> Order {
        Order {
            id,
            name: format!("Cliente {id}"),
            phone: "3001234567".to_string(),
            address: "Centro".to_string(),
            location: "4.9214,-75.0626".to_string(),
            date: date.to_string(),
            time: time.to_string(),
            items: Vec::new(),
        }
    }

    #[test]
    fn test_sort_by_date_then_time() {
        let mut orders = vec![
            order(1, "2025-01-02", "10:00"),
            order(2, "2025-01-01", "09:00"),
            order(3, "2025-01-01", "18:30"),
        ];
        sort_chronologically(&mut orders);

        let ids: Vec<_> = orders.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let mut orders = vec![
            order(5, "2025-03-01", "12:00"),
            order(4, "2025-03-01", "12:00:00"),
            order(6, "2025-03-01", "12:00"),
        ];
        sort_chronologically(&mut orders);

        let ids: Vec<_> = orders.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![5, 4, 6]);
    }

    #[test]
    fn test_unparseable_orders_sort_last() {
        let mut orders = vec![
            order(1, "", "10:00"),
            order(2, "2025-01-01", "09:00"),
            order(3, "2025-01-01", "noon"),
        ];
        sort_chronologically(&mut orders);

        let ids: Vec<_> = orders.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_order_deserializes_store_record() {
        let json = r#"{
            "id": 12,
            "name": "Ana",
            "phone": "3001234567",
            "address": "Cra 5 #10-20",
            "location": "4.92,-75.06",
            "date": "2025-05-01",
            "time": "19:30",
            "items": [{
                "id": 1,
                "name": "Hamburguesa Clásica",
                "price": 10000,
                "description": "",
                "ingredients": ["Carne", "Pan"],
                "imageUrl": "https://example.com/burger.jpg",
                "notes": "sin cebolla",
                "quantity": 2,
                "showNotes": true
            }]
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();

        assert_eq!(order.id, 12);
        assert_eq!(order.items[0].notes, "sin cebolla");
        assert_eq!(order.total(), Money::new(20_000));
    }
}
