//! Order model
//!
//! The persisted production order moving through the
//! pending -> approved -> in-production -> completed -> stocked lifecycle.
//! Orders are created by the upstream request-intake process and mutated
//! exclusively through the transitions in [`crate::workflow`]; they are
//! never deleted client-side, only cancelled.

mod item;
mod status;

pub use item::{ItemStatus, OrderItem};
pub use status::{OrderStatus, Priority};

use serde::{Deserialize, Serialize};

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: i64,
    /// Human-facing order number (e.g. ORD-20260219-0042)
    pub order_number: String,
    pub status: OrderStatus,
    pub priority: Priority,
    pub items: Vec<OrderItem>,
    /// Employee who filed the request
    pub created_by: i64,
    #[serde(default)]
    pub notes: String,
    /// Set once the stock confirmation has been processed
    #[serde(default)]
    pub inventory_processed: bool,
    pub created_at: Option<String>,
}

impl Order {
    /// Whether every item has been confirmed done
    pub fn all_items_completed(&self) -> bool {
        self.items.iter().all(OrderItem::is_completed)
    }

    /// Whether every item has a chef assigned
    pub fn all_items_assigned(&self) -> bool {
        self.items.iter().all(OrderItem::is_assigned)
    }

    /// Whether the order is in a terminal state
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Look up an item by ID
    pub fn item(&self, item_id: i64) -> Option<&OrderItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    /// Look up an item mutably by ID
    pub(crate) fn item_mut(&mut self, item_id: i64) -> Option<&mut OrderItem> {
        self.items.iter_mut().find(|i| i.id == item_id)
    }
}

/// Update status payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderUpdateStatus {
    pub status: OrderStatus,
}

/// Assign item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderAssignItem {
    pub item_id: i64,
    pub chef_id: i64,
}

/// Item progress payload (start / confirm completion)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemProgress {
    pub item_id: i64,
    pub status: ItemStatus,
    pub progress: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, status: ItemStatus, assigned_to: Option<i64>) -> OrderItem {
        OrderItem {
            id,
            product_id: id * 10,
            name: format!("Item {}", id),
            quantity: 5,
            unit: "kg".to_string(),
            assigned_to,
            status,
            progress: 0,
        }
    }

    #[test]
    fn test_consensus_predicates() {
        let mut order = Order {
            id: 1,
            order_number: "ORD-1".to_string(),
            status: OrderStatus::InProduction,
            priority: Priority::Medium,
            items: vec![
                item(1, ItemStatus::Completed, Some(7)),
                item(2, ItemStatus::Assigned, Some(8)),
            ],
            created_by: 3,
            notes: String::new(),
            inventory_processed: false,
            created_at: None,
        };
        assert!(order.all_items_assigned());
        assert!(!order.all_items_completed());

        order.item_mut(2).unwrap().status = ItemStatus::Completed;
        assert!(order.all_items_completed());
    }

    #[test]
    fn test_empty_items_vacuous_consensus() {
        let order = Order {
            id: 1,
            order_number: "ORD-1".to_string(),
            status: OrderStatus::Pending,
            priority: Priority::Low,
            items: vec![],
            created_by: 3,
            notes: String::new(),
            inventory_processed: false,
            created_at: None,
        };
        assert!(order.all_items_completed());
        assert!(order.all_items_assigned());
    }
}
