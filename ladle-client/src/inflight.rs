//! Per-entity submission discipline
//!
//! Two small pieces keep the dashboard honest about concurrent requests:
//!
//! - [`InflightRegistry`]: an advisory per-entity lock. While one
//!   submission for an entity is running, a second trigger for the same
//!   entity is rejected; every other entity stays interactive. This is UI
//!   state, not a mutex, and it does not survive a restart.
//! - [`RequestSequencer`]: a monotonically increasing sequence per entity.
//!   A response carrying a stale sequence is discarded instead of
//!   overwriting newer state.

use dashmap::DashMap;
use std::sync::Arc;

/// Advisory per-entity in-flight lock
#[derive(Debug, Clone, Default)]
pub struct InflightRegistry {
    inner: Arc<DashMap<String, ()>>,
}

impl InflightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `key` as submitting. Returns `None` when a submission for the
    /// same key is already in flight; the returned guard releases the key
    /// on drop.
    pub fn begin(&self, key: impl Into<String>) -> Option<InflightGuard> {
        let key = key.into();
        match self.inner.entry(key.clone()) {
            dashmap::Entry::Occupied(_) => None,
            dashmap::Entry::Vacant(entry) => {
                entry.insert(());
                Some(InflightGuard {
                    registry: Arc::clone(&self.inner),
                    key,
                })
            }
        }
    }

    /// Whether a submission for `key` is currently in flight
    pub fn is_inflight(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }
}

/// Releases the in-flight mark on drop
#[derive(Debug)]
pub struct InflightGuard {
    registry: Arc<DashMap<String, ()>>,
    key: String,
}

impl Drop for InflightGuard {
    fn drop(&mut self) {
        self.registry.remove(&self.key);
    }
}

/// Monotone per-entity request sequence
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    inner: Arc<DashMap<String, u64>>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bump and return the sequence for `key`. Call at dispatch time.
    pub fn next(&self, key: impl Into<String>) -> u64 {
        let mut entry = self.inner.entry(key.into()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// Current sequence for `key` (0 when never dispatched)
    pub fn current(&self, key: &str) -> u64 {
        self.inner.get(key).map(|v| *v).unwrap_or(0)
    }

    /// Whether `seq` is still the latest dispatched sequence for `key`.
    /// A response whose sequence is not current belongs to a superseded
    /// request and must not be written into state.
    pub fn is_current(&self, key: &str, seq: u64) -> bool {
        self.current(key) == seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_begin_is_rejected() {
        let registry = InflightRegistry::new();
        let guard = registry.begin("order:1");
        assert!(guard.is_some());
        assert!(registry.begin("order:1").is_none());
        // Other entities stay available
        assert!(registry.begin("order:2").is_some());
    }

    #[test]
    fn test_guard_releases_on_drop() {
        let registry = InflightRegistry::new();
        {
            let _guard = registry.begin("order:1").unwrap();
            assert!(registry.is_inflight("order:1"));
        }
        assert!(!registry.is_inflight("order:1"));
        assert!(registry.begin("order:1").is_some());
    }

    #[test]
    fn test_sequencer_is_monotone_per_key() {
        let seq = RequestSequencer::new();
        assert_eq!(seq.current("order:1"), 0);
        let first = seq.next("order:1");
        let second = seq.next("order:1");
        assert_eq!(first, 1);
        assert_eq!(second, 2);
        // Keys are independent
        assert_eq!(seq.next("order:2"), 1);
    }

    #[test]
    fn test_stale_sequence_detected() {
        let seq = RequestSequencer::new();
        let stale = seq.next("order:1");
        let fresh = seq.next("order:1");
        assert!(!seq.is_current("order:1", stale));
        assert!(seq.is_current("order:1", fresh));
    }
}
