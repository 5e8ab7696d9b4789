//! Sale-created notification feed
//!
//! The real-time channel can deliver the same "sale created" event more
//! than once. Each event carries a de-duplication identifier; the feed
//! tracks identifiers it has already processed (bounded, FIFO eviction)
//! and surfaces an event at most once.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use tracing::debug;
use uuid::Uuid;

/// How many processed identifiers are remembered by default
const DEFAULT_SEEN_CAPACITY: usize = 1024;

/// Out-of-band "sale created" event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaleCreatedEvent {
    /// De-duplication identifier
    pub event_id: Uuid,
    pub sale_id: i64,
    pub sale_number: String,
    pub total: f64,
}

struct SeenSet {
    set: HashSet<Uuid>,
    order: VecDeque<Uuid>,
}

/// De-duplicating consumer of sale-created events
pub struct SaleFeed {
    seen: Mutex<SeenSet>,
    capacity: usize,
}

impl SaleFeed {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_SEEN_CAPACITY)
    }

    /// Remember at most `capacity` processed identifiers; the oldest are
    /// evicted first once the bound is reached.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            seen: Mutex::new(SeenSet {
                set: HashSet::new(),
                order: VecDeque::new(),
            }),
            capacity: capacity.max(1),
        }
    }

    /// Process one delivery. Returns the event the first time its
    /// identifier is seen and `None` for redeliveries.
    pub fn observe(&self, event: SaleCreatedEvent) -> Option<SaleCreatedEvent> {
        let mut seen = self.seen.lock();
        if seen.set.contains(&event.event_id) {
            debug!(event_id = %event.event_id, "duplicate sale-created event suppressed");
            return None;
        }
        seen.set.insert(event.event_id);
        seen.order.push_back(event.event_id);
        while seen.order.len() > self.capacity {
            if let Some(evicted) = seen.order.pop_front() {
                seen.set.remove(&evicted);
            }
        }
        Some(event)
    }

    /// Number of identifiers currently remembered
    pub fn seen_count(&self) -> usize {
        self.seen.lock().order.len()
    }
}

impl Default for SaleFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(event_id: Uuid, sale_id: i64) -> SaleCreatedEvent {
        SaleCreatedEvent {
            event_id,
            sale_id,
            sale_number: format!("SAL-{}", sale_id),
            total: 12.5,
        }
    }

    #[test]
    fn test_first_delivery_surfaces() {
        let feed = SaleFeed::new();
        let e = event(Uuid::new_v4(), 1);
        assert_eq!(feed.observe(e.clone()), Some(e));
    }

    #[test]
    fn test_redelivery_suppressed() {
        let feed = SaleFeed::new();
        let id = Uuid::new_v4();
        assert!(feed.observe(event(id, 1)).is_some());
        assert!(feed.observe(event(id, 1)).is_none());
        assert!(feed.observe(event(id, 1)).is_none());
        assert_eq!(feed.seen_count(), 1);
    }

    #[test]
    fn test_distinct_events_both_surface() {
        let feed = SaleFeed::new();
        assert!(feed.observe(event(Uuid::new_v4(), 1)).is_some());
        assert!(feed.observe(event(Uuid::new_v4(), 2)).is_some());
        assert_eq!(feed.seen_count(), 2);
    }

    #[test]
    fn test_eviction_is_bounded_fifo() {
        let feed = SaleFeed::with_capacity(2);
        let first = Uuid::new_v4();
        feed.observe(event(first, 1));
        feed.observe(event(Uuid::new_v4(), 2));
        feed.observe(event(Uuid::new_v4(), 3));
        assert_eq!(feed.seen_count(), 2);
        // The oldest identifier was evicted; a very late redelivery of it
        // surfaces again - the memory bound is a deliberate trade-off.
        assert!(feed.observe(event(first, 1)).is_some());
    }
}
