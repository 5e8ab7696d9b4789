//! Order status and priority unions
//!
//! One canonical status vocabulary. The transition table here is
//! shape-level only (which edges exist); role and item-level guards live in
//! [`crate::workflow`].

use serde::{Deserialize, Serialize};

/// Order lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Intake state, awaiting approval
    #[default]
    Pending,
    /// Approved, items being assigned to chefs
    Approved,
    /// Every item assigned, production running
    InProduction,
    /// Every item completed
    Completed,
    /// Produced goods confirmed into stock (terminal)
    Stocked,
    /// Cancelled (terminal)
    Cancelled,
}

impl OrderStatus {
    /// Terminal states admit no further transitions
    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Stocked | OrderStatus::Cancelled)
    }

    /// Whether the `self -> next` edge exists in the transition table.
    ///
    /// Cancellation is reachable from any non-terminal state; every other
    /// edge advances one stage.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        if next == OrderStatus::Cancelled {
            return !self.is_terminal();
        }
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Approved)
                | (OrderStatus::Approved, OrderStatus::InProduction)
                | (OrderStatus::InProduction, OrderStatus::Completed)
                | (OrderStatus::Completed, OrderStatus::Stocked)
        )
    }

    /// Human label for notifications
    pub const fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Approved => "Approved",
            OrderStatus::InProduction => "In production",
            OrderStatus::Completed => "Completed",
            OrderStatus::Stocked => "Stocked",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "PENDING"),
            OrderStatus::Approved => write!(f, "APPROVED"),
            OrderStatus::InProduction => write!(f, "IN_PRODUCTION"),
            OrderStatus::Completed => write!(f, "COMPLETED"),
            OrderStatus::Stocked => write!(f, "STOCKED"),
            OrderStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// Order priority
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// Human label for notifications
    pub const fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Urgent => "Urgent",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_edges() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Approved));
        assert!(OrderStatus::Approved.can_transition_to(OrderStatus::InProduction));
        assert!(OrderStatus::InProduction.can_transition_to(OrderStatus::Completed));
        assert!(OrderStatus::Completed.can_transition_to(OrderStatus::Stocked));
    }

    #[test]
    fn test_no_skipping_stages() {
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::InProduction));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Completed));
        assert!(!OrderStatus::Approved.can_transition_to(OrderStatus::Completed));
        assert!(!OrderStatus::InProduction.can_transition_to(OrderStatus::Stocked));
    }

    #[test]
    fn test_no_backward_edges() {
        assert!(!OrderStatus::Approved.can_transition_to(OrderStatus::Pending));
        assert!(!OrderStatus::Completed.can_transition_to(OrderStatus::InProduction));
    }

    #[test]
    fn test_cancel_from_any_non_terminal() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Approved,
            OrderStatus::InProduction,
            OrderStatus::Completed,
        ] {
            assert!(status.can_transition_to(OrderStatus::Cancelled), "{status}");
        }
    }

    #[test]
    fn test_terminal_states_admit_nothing() {
        for terminal in [OrderStatus::Stocked, OrderStatus::Cancelled] {
            assert!(terminal.is_terminal());
            for next in [
                OrderStatus::Pending,
                OrderStatus::Approved,
                OrderStatus::InProduction,
                OrderStatus::Completed,
                OrderStatus::Stocked,
                OrderStatus::Cancelled,
            ] {
                assert!(!terminal.can_transition_to(next), "{terminal} -> {next}");
            }
        }
    }
}
