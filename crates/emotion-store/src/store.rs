//! Emotion Store
//!
//! The [`EmotionStore`] owns every emotion record and the relations between
//! them. All operations are synchronous; wrap the whole store in a single
//! lock if it must be shared across threads.

use std::collections::HashMap;

use crate::config::{ReregisterPolicy, StoreConfig};
use crate::error::StoreError;
use crate::id::{EmotionId, EmotionKey};
use crate::record::Emotion;
use crate::relations::RelationGraph;

/// In-memory map of emotion ids to strength values, with one-hop
/// propagation along paired relations.
#[derive(Debug, Clone)]
pub struct EmotionStore {
    /// Value used by registrations that don't supply one
    default_value: f32,
    /// Handling of incoming relations on re-registration
    reregister: ReregisterPolicy,
    /// Maps emotion id -> current record
    records: HashMap<EmotionId, Emotion>,
    /// Directed relations between record keys
    relations: RelationGraph,
    /// Generation handed to the next registration
    next_generation: u64,
}

impl Default for EmotionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EmotionStore {
    /// Creates an empty store with a default value of 0.5.
    pub fn new() -> Self {
        Self::from_config(StoreConfig::default())
    }

    /// Creates an empty store with the given default value.
    pub fn with_default_value(default_value: f32) -> Self {
        Self::from_config(StoreConfig::default().with_default_value(default_value))
    }

    /// Creates a store with the given default value and registers each id
    /// with it.
    ///
    /// Equivalent to [`with_default_value`](Self::with_default_value)
    /// followed by one [`register_emotion`](Self::register_emotion) per id.
    pub fn with_emotions<I, T>(ids: I, default_value: f32) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<EmotionId>,
    {
        let mut store = Self::with_default_value(default_value);
        for id in ids {
            store.register_emotion_with_value(id, default_value);
        }
        store
    }

    /// Creates an empty store from a configuration.
    pub fn from_config(config: StoreConfig) -> Self {
        Self {
            default_value: config.default_value,
            reregister: config.reregister,
            records: HashMap::new(),
            relations: RelationGraph::new(),
            next_generation: 0,
        }
    }

    /// Registers `id` with the store's current default value.
    pub fn register_emotion(&mut self, id: impl Into<EmotionId>) {
        let value = self.default_value;
        self.register_emotion_with_value(id, value);
    }

    /// Registers `id` with `value`, replacing any record already at `id`.
    ///
    /// A replaced record loses its value and its outgoing relations.
    /// Relations other records held into it follow the configured
    /// [`ReregisterPolicy`].
    pub fn register_emotion_with_value(&mut self, id: impl Into<EmotionId>, value: f32) {
        let id = id.into();
        let generation = self.next_generation;
        self.next_generation += 1;

        let record = Emotion::new(id, generation, value);
        let new_key = record.key();

        let Some(old) = self.records.insert(id, record) else {
            tracing::debug!("Registered {} with value {}", id, value);
            return;
        };

        let old_key = old.key();
        let cleared = self.relations.clear_from(old_key);
        match self.reregister {
            ReregisterPolicy::Detach => {
                let detached = self.relations.count_into(old_key);
                tracing::debug!(
                    "Re-registered {} with value {}: cleared {} outgoing, detached {} incoming",
                    id,
                    value,
                    cleared,
                    detached
                );
            }
            ReregisterPolicy::Redirect => {
                let moved = self.relations.retarget(old_key, new_key);
                tracing::debug!(
                    "Re-registered {} with value {}: cleared {} outgoing, redirected {} incoming",
                    id,
                    value,
                    cleared,
                    moved
                );
            }
        }
    }

    /// Changes the value used by future registrations without a value.
    ///
    /// Existing records are not touched.
    pub fn set_default_value(&mut self, value: f32) {
        tracing::debug!("Default value changed from {} to {}", self.default_value, value);
        self.default_value = value;
    }

    pub fn default_value(&self) -> f32 {
        self.default_value
    }

    pub fn reregister_policy(&self) -> ReregisterPolicy {
        self.reregister
    }

    /// Current value at `id`, or `0.0` when `id` is not registered.
    ///
    /// A registered emotion whose value is exactly zero reads the same as a
    /// missing one; use [`value`](Self::value) or
    /// [`contains`](Self::contains) to tell them apart.
    pub fn value_for_emotion(&self, id: impl Into<EmotionId>) -> f32 {
        self.value(id).unwrap_or(0.0)
    }

    /// Current value at `id`, if registered.
    pub fn value(&self, id: impl Into<EmotionId>) -> Option<f32> {
        self.records.get(&id.into()).map(Emotion::value)
    }

    /// Whether `id` is registered.
    pub fn contains(&self, id: impl Into<EmotionId>) -> bool {
        self.records.contains_key(&id.into())
    }

    /// The record currently registered at `id`.
    pub fn emotion(&self, id: impl Into<EmotionId>) -> Option<&Emotion> {
        self.records.get(&id.into())
    }

    /// Overwrites the value at `id` without propagating to paired emotions.
    pub fn set_value(&mut self, id: impl Into<EmotionId>, value: f32) -> Result<(), StoreError> {
        let id = id.into();
        let record = self
            .records
            .get_mut(&id)
            .ok_or(StoreError::UnknownEmotion(id))?;
        record.set_value(value);
        Ok(())
    }

    /// Adds `delta` to the value at `id`, then adds `delta * ratio` to every
    /// emotion `id` is paired to.
    ///
    /// Propagation is one hop: the targets' own relations are not followed.
    /// Returns how many targets received a share of the delta.
    pub fn update_value(
        &mut self,
        id: impl Into<EmotionId>,
        delta: f32,
    ) -> Result<usize, StoreError> {
        let id = id.into();
        let source = self
            .records
            .get_mut(&id)
            .ok_or(StoreError::UnknownEmotion(id))?;
        source.apply_delta(delta);
        let source_key = source.key();

        let mut reached = 0;
        for (target_key, ratio) in self.relations.relations_from(source_key) {
            match self.records.get_mut(&target_key.id) {
                Some(target) if target.key() == target_key => {
                    target.apply_delta(delta * ratio);
                    reached += 1;
                    tracing::trace!(
                        "Propagated {} from {} to {} (ratio {})",
                        delta * ratio,
                        id,
                        target_key.id,
                        ratio
                    );
                }
                _ => {
                    tracing::trace!("Skipped detached target {} of {}", target_key, id);
                }
            }
        }
        Ok(reached)
    }

    /// Creates or overwrites the directed relation `id1 -> id2`.
    ///
    /// Pairing is one-way: no relation `id2 -> id1` is created. A relation
    /// `id1` still holds into a replaced registration of `id2` is dropped.
    pub fn pair(
        &mut self,
        id1: impl Into<EmotionId>,
        id2: impl Into<EmotionId>,
        ratio: f32,
    ) -> Result<(), StoreError> {
        let source = self.live_key(id1.into())?;
        let target = self.live_key(id2.into())?;

        match self.relations.append_relation(source, target, ratio) {
            Some(previous) => tracing::debug!(
                "Re-paired {} -> {} with ratio {} (was {})",
                source.id,
                target.id,
                ratio,
                previous
            ),
            None => tracing::debug!("Paired {} -> {} with ratio {}", source.id, target.id, ratio),
        }
        Ok(())
    }

    /// Ratio of the live relation `id1 -> id2`, if both are registered and
    /// paired.
    pub fn ratio(&self, id1: impl Into<EmotionId>, id2: impl Into<EmotionId>) -> Option<f32> {
        let source = self.records.get(&id1.into())?.key();
        let target = self.records.get(&id2.into())?.key();
        self.relations.ratio(source, target)
    }

    /// Live outgoing relations of `id`, ordered by target id.
    ///
    /// Empty when `id` is not registered.
    pub fn relations_from(&self, id: impl Into<EmotionId>) -> Vec<(EmotionId, f32)> {
        let Some(source) = self.records.get(&id.into()) else {
            return Vec::new();
        };
        self.relations
            .relations_from(source.key())
            .into_iter()
            .filter(|(to, _)| is_live(&self.records, *to))
            .map(|(to, ratio)| (to.id, ratio))
            .collect()
    }

    /// Number of stored relations bound to a replaced record.
    pub fn stale_relation_count(&self) -> usize {
        let records = &self.records;
        self.relations.count_dead(|key| is_live(records, key))
    }

    /// Drops relations bound to replaced records. Returns how many were
    /// removed.
    pub fn prune_stale_relations(&mut self) -> usize {
        let records = &self.records;
        let removed = self.relations.retain_live(|key| is_live(records, key));
        if removed > 0 {
            tracing::debug!("Pruned {} stale relations", removed);
        }
        removed
    }

    /// Registered ids in ascending order.
    pub fn ids(&self) -> Vec<EmotionId> {
        let mut ids: Vec<_> = self.records.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Iterates over all current records in no particular order.
    pub fn emotions(&self) -> impl Iterator<Item = &Emotion> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn live_key(&self, id: EmotionId) -> Result<EmotionKey, StoreError> {
        self.records
            .get(&id)
            .map(Emotion::key)
            .ok_or(StoreError::UnknownEmotion(id))
    }
}

fn is_live(records: &HashMap<EmotionId, Emotion>, key: EmotionKey) -> bool {
    records.get(&key.id).is_some_and(|r| r.key() == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = EmotionStore::new();
        assert!(store.is_empty());
        assert_eq!(store.default_value(), 0.5);
        assert_eq!(store.reregister_policy(), ReregisterPolicy::Detach);
    }

    #[test]
    fn test_register_with_default() {
        let mut store = EmotionStore::with_default_value(0.3);
        store.register_emotion(1);
        assert_eq!(store.value(1), Some(0.3));
    }

    #[test]
    fn test_register_uses_current_default() {
        let mut store = EmotionStore::new();
        store.register_emotion(1);
        store.set_default_value(0.9);
        store.register_emotion(2);

        assert_eq!(store.value(1), Some(0.5));
        assert_eq!(store.value(2), Some(0.9));
    }

    #[test]
    fn test_with_emotions() {
        let store = EmotionStore::with_emotions(vec![3, 1, 2], 0.2);
        assert_eq!(store.len(), 3);
        assert_eq!(store.default_value(), 0.2);
        assert_eq!(store.ids(), vec![EmotionId(1), EmotionId(2), EmotionId(3)]);
        assert!(store.emotions().all(|e| e.value() == 0.2));
    }

    #[test]
    fn test_value_for_missing_emotion_is_zero() {
        let mut store = EmotionStore::new();
        store.register_emotion_with_value(1, 0.0);

        assert_eq!(store.value_for_emotion(1), 0.0);
        assert_eq!(store.value_for_emotion(2), 0.0);
        assert!(store.contains(1));
        assert!(!store.contains(2));
        assert_eq!(store.value(2), None);
    }

    #[test]
    fn test_set_value_does_not_propagate() {
        let mut store = EmotionStore::new();
        store.register_emotion(1);
        store.register_emotion(2);
        store.pair(1, 2, 1.0).unwrap();

        store.set_value(1, 0.9).unwrap();
        assert_eq!(store.value(1), Some(0.9));
        assert_eq!(store.value(2), Some(0.5));
    }

    #[test]
    fn test_set_value_unknown() {
        let mut store = EmotionStore::new();
        assert_eq!(
            store.set_value(1, 0.9),
            Err(StoreError::UnknownEmotion(EmotionId(1)))
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_value_propagates_one_hop() {
        let mut store = EmotionStore::new();
        store.register_emotion(1);
        store.register_emotion(2);
        store.pair(1, 2, -0.75).unwrap();

        let reached = store.update_value(1, 0.2).unwrap();
        assert_eq!(reached, 1);
        assert_close(store.value_for_emotion(1), 0.7);
        assert_close(store.value_for_emotion(2), 0.35);
    }

    #[test]
    fn test_self_pair_applies_once() {
        let mut store = EmotionStore::new();
        store.register_emotion_with_value(1, 0.0);
        store.pair(1, 1, 0.5).unwrap();

        store.update_value(1, 1.0).unwrap();
        assert_close(store.value_for_emotion(1), 1.5);
    }

    #[test]
    fn test_pair_requires_both_ids() {
        let mut store = EmotionStore::new();
        store.register_emotion(1);

        assert_eq!(
            store.pair(1, 2, 0.5),
            Err(StoreError::UnknownEmotion(EmotionId(2)))
        );
        assert_eq!(
            store.pair(2, 1, 0.5),
            Err(StoreError::UnknownEmotion(EmotionId(2)))
        );
        assert!(store.relations_from(1).is_empty());
    }

    #[test]
    fn test_pair_overwrites_ratio() {
        let mut store = EmotionStore::new();
        store.register_emotion(1);
        store.register_emotion(2);
        store.pair(1, 2, 0.5).unwrap();
        store.pair(1, 2, 0.25).unwrap();

        assert_eq!(store.relations_from(1), vec![(EmotionId(2), 0.25)]);
        assert_eq!(store.ratio(1, 2), Some(0.25));
        assert_eq!(store.ratio(2, 1), None);
    }

    #[test]
    fn test_reregister_detaches_incoming() {
        let mut store = EmotionStore::new();
        store.register_emotion(1);
        store.register_emotion(2);
        store.pair(1, 2, 1.0).unwrap();

        store.register_emotion_with_value(2, 0.1);
        assert_eq!(store.stale_relation_count(), 1);
        assert_eq!(store.ratio(1, 2), None);

        assert_eq!(store.update_value(1, 0.3).unwrap(), 0);
        assert_close(store.value_for_emotion(2), 0.1);

        assert_eq!(store.prune_stale_relations(), 1);
        assert_eq!(store.stale_relation_count(), 0);
    }

    #[test]
    fn test_repair_replaces_stale_relation() {
        let mut store = EmotionStore::new();
        store.register_emotion(1);
        store.register_emotion(2);
        store.pair(1, 2, 1.0).unwrap();

        store.register_emotion(2);
        assert_eq!(store.stale_relation_count(), 1);

        store.pair(1, 2, 0.5).unwrap();
        assert_eq!(store.stale_relation_count(), 0);
        assert_eq!(store.relations_from(1), vec![(EmotionId(2), 0.5)]);
    }

    #[test]
    fn test_reregister_redirects_incoming() {
        let config = StoreConfig::default().with_reregister(ReregisterPolicy::Redirect);
        let mut store = EmotionStore::from_config(config);
        store.register_emotion(1);
        store.register_emotion(2);
        store.pair(1, 2, 1.0).unwrap();

        store.register_emotion_with_value(2, 0.1);
        assert_eq!(store.stale_relation_count(), 0);
        assert_eq!(store.ratio(1, 2), Some(1.0));

        assert_eq!(store.update_value(1, 0.3).unwrap(), 1);
        assert_close(store.value_for_emotion(2), 0.4);
    }

    #[test]
    fn test_reregister_clears_outgoing() {
        let mut store = EmotionStore::new();
        store.register_emotion(1);
        store.register_emotion(2);
        store.pair(1, 2, 1.0).unwrap();

        store.register_emotion(1);
        assert!(store.relations_from(1).is_empty());
        assert_eq!(store.stale_relation_count(), 0);

        assert_eq!(store.update_value(1, 0.2).unwrap(), 0);
        assert_close(store.value_for_emotion(2), 0.5);
    }
}
