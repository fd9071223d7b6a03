//! Client preferences and their persistence adapter
//!
//! The original client kept these in a persisted global store; here they
//! are an explicit value owned by the engine, serialized through a
//! [`StorageEffects`] backend at defined save points.

use quitline_core::effects::StorageEffects;
use quitline_core::{Counter, CounterId, StorageError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Storage key for the serialized preference blob.
const PREFERENCES_KEY: &str = "quitline/preferences";

/// Persisted client preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Color picked for the next counter.
    pub selected_color: String,
    /// Category picked for the next counter.
    pub selected_category: String,
    /// Custom habit name, when the category is "custom".
    pub custom_name: String,
    /// Whether UI sound effects are enabled.
    pub sound_enabled: bool,
    /// Counters created with a backdated start; not eligible for
    /// achievements.
    pub custom_date_counter_ids: BTreeSet<CounterId>,
    /// Custom start timestamps whose counter ids are not yet known. A
    /// confirmed backdated Create lands here until the next refresh shows
    /// the counter with a matching `started_at`.
    pub pending_custom_starts: Vec<u64>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            selected_color: "#3b82f6".to_string(),
            selected_category: "smoking".to_string(),
            custom_name: String::new(),
            sound_enabled: true,
            custom_date_counter_ids: BTreeSet::new(),
            pending_custom_starts: Vec::new(),
        }
    }
}

impl Preferences {
    /// Whether a counter is excluded from achievement computation.
    pub fn is_achievement_ineligible(&self, id: CounterId) -> bool {
        self.custom_date_counter_ids.contains(&id)
    }

    /// Record a custom start whose counter id is not yet known.
    pub fn push_pending_custom_start(&mut self, started_at: u64) {
        self.pending_custom_starts.push(started_at);
    }

    /// Resolve pending custom starts against a fresh canonical read.
    ///
    /// A counter whose `started_at` equals a recorded custom start is the
    /// one created from it; its id becomes achievement-ineligible and the
    /// pending entry is dropped. Returns true if anything changed.
    pub fn adopt_custom_starts(&mut self, counters: &[Counter]) -> bool {
        if self.pending_custom_starts.is_empty() {
            return false;
        }
        let mut changed = false;
        let Self {
            pending_custom_starts,
            custom_date_counter_ids,
            ..
        } = self;
        pending_custom_starts.retain(|started_at| {
            match counters.iter().find(|c| c.started_at == *started_at) {
                Some(counter) => {
                    custom_date_counter_ids.insert(counter.id);
                    changed = true;
                    false
                }
                None => true,
            }
        });
        changed
    }
}

/// Serialization adapter between [`Preferences`] and a storage backend.
#[derive(Clone)]
pub struct PreferenceAdapter {
    storage: Arc<dyn StorageEffects>,
}

impl PreferenceAdapter {
    /// Create an adapter over the given backend.
    pub fn new(storage: Arc<dyn StorageEffects>) -> Self {
        Self { storage }
    }

    /// Load preferences, defaulting when nothing is stored yet.
    pub async fn load(&self) -> Result<Preferences, StorageError> {
        match self.storage.retrieve(PREFERENCES_KEY).await? {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| StorageError::Serialization(e.to_string())),
            None => Ok(Preferences::default()),
        }
    }

    /// Persist the current preferences wholesale.
    pub async fn save(&self, preferences: &Preferences) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(preferences)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.store(PREFERENCES_KEY, bytes).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter(id: u64, started_at: u64) -> Counter {
        Counter {
            id: CounterId::new(id),
            started_at,
            active: true,
            ..Counter::default()
        }
    }

    #[test]
    fn adopt_matches_by_started_at() {
        let mut prefs = Preferences::default();
        prefs.push_pending_custom_start(1_000);
        prefs.push_pending_custom_start(2_000);

        let changed = prefs.adopt_custom_starts(&[counter(4, 1_000), counter(5, 500)]);
        assert!(changed);
        assert!(prefs.is_achievement_ineligible(CounterId::new(4)));
        assert!(!prefs.is_achievement_ineligible(CounterId::new(5)));
        // The unmatched start stays pending for a later refresh.
        assert_eq!(prefs.pending_custom_starts, vec![2_000]);
    }

    #[test]
    fn adopt_without_pending_is_a_no_op() {
        let mut prefs = Preferences::default();
        assert!(!prefs.adopt_custom_starts(&[counter(1, 123)]));
    }
}
