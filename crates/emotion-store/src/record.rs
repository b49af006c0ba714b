//! Emotion Records
//!
//! A record is one registration of an emotion id together with its current
//! strength. Records are owned by the store; relations between them live in
//! the store's [`RelationGraph`](crate::RelationGraph), keyed by
//! [`EmotionKey`].

use std::hash::{Hash, Hasher};

use crate::id::{EmotionId, EmotionKey};

/// A single registered emotion.
///
/// Two records compare equal when their ids match, regardless of value or
/// generation.
#[derive(Debug, Clone)]
pub struct Emotion {
    id: EmotionId,
    generation: u64,
    value: f32,
}

impl Emotion {
    pub(crate) fn new(id: EmotionId, generation: u64, value: f32) -> Self {
        Self {
            id,
            generation,
            value,
        }
    }

    pub fn id(&self) -> EmotionId {
        self.id
    }

    /// Arena key of this particular registration.
    pub fn key(&self) -> EmotionKey {
        EmotionKey::new(self.id, self.generation)
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Overwrites the value without touching any relation.
    pub(crate) fn set_value(&mut self, value: f32) {
        self.value = value;
    }

    /// Adds `delta` to this record's own value only.
    ///
    /// Spreading the delta over outgoing relations is the store's job, since
    /// the edges are held centrally.
    pub(crate) fn apply_delta(&mut self, delta: f32) {
        self.value += delta;
    }
}

impl PartialEq for Emotion {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Emotion {}

impl Hash for Emotion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
