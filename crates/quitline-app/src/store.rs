//! Canonical state store
//!
//! A wholesale cache of the last authoritative bulk read. The contract's
//! bulk read is cheap, so refreshes replace the whole list rather than
//! merging incrementally. Only the reconciliation engine mutates this.

use quitline_core::{Counter, CounterId};

/// Last-fetched canonical counter list.
#[derive(Debug, Clone, Default)]
pub struct CanonicalStore {
    counters: Vec<Counter>,
}

impl CanonicalStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached counters, in contract order.
    pub fn counters(&self) -> &[Counter] {
        &self.counters
    }

    /// Replace the whole list with a fresh read.
    pub fn replace(&mut self, counters: Vec<Counter>) {
        self.counters = counters;
    }

    /// Drop everything (wallet disconnected).
    pub fn clear(&mut self) {
        self.counters.clear();
    }

    /// Look up a counter by id.
    pub fn find(&self, id: CounterId) -> Option<&Counter> {
        self.counters.iter().find(|c| c.id == id)
    }

    /// Remove a counter, returning it for later rollback (optimistic
    /// deletion).
    pub fn remove(&mut self, id: CounterId) -> Option<Counter> {
        let index = self.counters.iter().position(|c| c.id == id)?;
        Some(self.counters.remove(index))
    }

    /// Re-insert a previously removed counter, keeping id order.
    pub fn restore(&mut self, counter: Counter) {
        if self.find(counter.id).is_some() {
            return;
        }
        let index = self
            .counters
            .iter()
            .position(|c| c.id > counter.id)
            .unwrap_or(self.counters.len());
        self.counters.insert(index, counter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter(id: u64) -> Counter {
        Counter {
            id: CounterId::new(id),
            active: true,
            category: format!("habit-{id}"),
            ..Counter::default()
        }
    }

    #[test]
    fn remove_then_restore_keeps_id_order() {
        let mut store = CanonicalStore::new();
        store.replace(vec![counter(1), counter(3), counter(5)]);

        let removed = store.remove(CounterId::new(3)).expect("present");
        assert!(store.find(CounterId::new(3)).is_none());

        store.restore(removed);
        let ids: Vec<u64> = store.counters().iter().map(|c| c.id.value()).collect();
        assert_eq!(ids, vec![1, 3, 5]);
    }

    #[test]
    fn restore_is_idempotent() {
        let mut store = CanonicalStore::new();
        store.replace(vec![counter(2)]);
        store.restore(counter(2));
        assert_eq!(store.counters().len(), 1);
    }

    #[test]
    fn clear_empties_the_store() {
        let mut store = CanonicalStore::new();
        store.replace(vec![counter(1)]);
        store.clear();
        assert!(store.counters().is_empty());
    }
}
