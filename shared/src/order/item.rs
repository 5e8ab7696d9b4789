//! Order item sub-state

use serde::{Deserialize, Serialize};

/// Item production sub-status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    /// Waiting for a chef assignment
    #[default]
    Pending,
    /// Assigned to a chef, not started
    Assigned,
    /// Chef has started work
    InProgress,
    /// Confirmed done by the assigned chef
    Completed,
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemStatus::Pending => write!(f, "PENDING"),
            ItemStatus::Assigned => write!(f, "ASSIGNED"),
            ItemStatus::InProgress => write!(f, "IN_PROGRESS"),
            ItemStatus::Completed => write!(f, "COMPLETED"),
        }
    }
}

/// One production line within an order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub id: i64,
    /// Product reference
    pub product_id: i64,
    pub name: String,
    pub quantity: i32,
    pub unit: String,
    /// Chef this item is assigned to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<i64>,
    pub status: ItemStatus,
    /// Completion progress, 0-100
    pub progress: u8,
}

impl OrderItem {
    /// Whether this item has been confirmed done
    pub fn is_completed(&self) -> bool {
        self.status == ItemStatus::Completed
    }

    /// Whether a chef has been assigned
    pub fn is_assigned(&self) -> bool {
        self.assigned_to.is_some()
    }

    /// Whether `chef_id` is the assigned chef
    pub fn is_assigned_to(&self, chef_id: i64) -> bool {
        self.assigned_to == Some(chef_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment_predicates() {
        let mut item = OrderItem {
            id: 1,
            product_id: 10,
            name: "Baguette".to_string(),
            quantity: 40,
            unit: "pcs".to_string(),
            assigned_to: None,
            status: ItemStatus::Pending,
            progress: 0,
        };
        assert!(!item.is_assigned());
        assert!(!item.is_assigned_to(7));

        item.assigned_to = Some(7);
        item.status = ItemStatus::Assigned;
        assert!(item.is_assigned());
        assert!(item.is_assigned_to(7));
        assert!(!item.is_assigned_to(8));
        assert!(!item.is_completed());
    }
}
