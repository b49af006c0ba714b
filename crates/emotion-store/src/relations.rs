//! Relation Graph
//!
//! Directed, weighted edges between emotion records, stored centrally and
//! indexed by source key.

use std::collections::HashMap;

use crate::id::EmotionKey;

/// Graph of all relations between records.
#[derive(Debug, Clone, Default)]
pub struct RelationGraph {
    /// Maps source_key -> (target_key -> ratio)
    edges: HashMap<EmotionKey, HashMap<EmotionKey, f32>>,
}

impl RelationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the edge `source -> target`.
    ///
    /// Any edge from `source` to another generation of `target.id` is
    /// replaced, so a source holds at most one edge per target id.
    /// Returns the previous ratio if the exact edge already existed.
    pub fn append_relation(
        &mut self,
        source: EmotionKey,
        target: EmotionKey,
        ratio: f32,
    ) -> Option<f32> {
        let targets = self.edges.entry(source).or_default();
        targets.retain(|to, _| to.id != target.id || *to == target);
        targets.insert(target, ratio)
    }

    /// Ratio of the edge `source -> target`, if present.
    pub fn ratio(&self, source: EmotionKey, target: EmotionKey) -> Option<f32> {
        self.edges.get(&source)?.get(&target).copied()
    }

    /// All outgoing edges of `source`, ordered by target key.
    pub fn relations_from(&self, source: EmotionKey) -> Vec<(EmotionKey, f32)> {
        let Some(targets) = self.edges.get(&source) else {
            return Vec::new();
        };
        let mut out: Vec<_> = targets.iter().map(|(to, ratio)| (*to, *ratio)).collect();
        out.sort_by_key(|(to, _)| *to);
        out
    }

    /// Number of edges pointing at exactly `target`.
    pub fn count_into(&self, target: EmotionKey) -> usize {
        self.edges
            .values()
            .filter(|targets| targets.contains_key(&target))
            .count()
    }

    /// Drops every outgoing edge of `source`. Returns how many were removed.
    pub fn clear_from(&mut self, source: EmotionKey) -> usize {
        self.edges.remove(&source).map_or(0, |targets| targets.len())
    }

    /// Rebinds every edge pointing at `old` so it points at `new`.
    ///
    /// An existing edge into `new` from the same source is overwritten by the
    /// rebound one. Returns how many edges were moved.
    pub fn retarget(&mut self, old: EmotionKey, new: EmotionKey) -> usize {
        let mut moved = 0;
        for targets in self.edges.values_mut() {
            if let Some(ratio) = targets.remove(&old) {
                targets.insert(new, ratio);
                moved += 1;
            }
        }
        moved
    }

    /// Keeps only edges whose endpoints both satisfy `is_live`.
    /// Returns how many edges were removed.
    pub fn retain_live<F>(&mut self, mut is_live: F) -> usize
    where
        F: FnMut(EmotionKey) -> bool,
    {
        let before = self.len();
        self.edges.retain(|from, targets| {
            if !is_live(*from) {
                return false;
            }
            targets.retain(|to, _| is_live(*to));
            !targets.is_empty()
        });
        before - self.len()
    }

    /// Counts edges with at least one endpoint failing `is_live`.
    pub fn count_dead<F>(&self, mut is_live: F) -> usize
    where
        F: FnMut(EmotionKey) -> bool,
    {
        self.edges
            .iter()
            .map(|(from, targets)| {
                if is_live(*from) {
                    targets.keys().filter(|to| !is_live(**to)).count()
                } else {
                    targets.len()
                }
            })
            .sum()
    }

    pub fn len(&self) -> usize {
        self.edges.values().map(HashMap::len).sum()
    }
}
