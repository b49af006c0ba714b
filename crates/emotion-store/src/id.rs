//! Emotion identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an emotion within a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmotionId(pub i32);

impl EmotionId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Returns the raw integer id.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for EmotionId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl From<EmotionId> for i32 {
    fn from(id: EmotionId) -> Self {
        id.0
    }
}

impl fmt::Display for EmotionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "emotion_{}", self.0)
    }
}

/// Arena key for one registration of an id.
///
/// Re-registering an id mints a new generation, so relations bound to an
/// older key never resolve to the replacement record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EmotionKey {
    pub id: EmotionId,
    pub generation: u64,
}

impl EmotionKey {
    pub fn new(id: EmotionId, generation: u64) -> Self {
        Self { id, generation }
    }
}

impl fmt::Display for EmotionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.id, self.generation)
    }
}
