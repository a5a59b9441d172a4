//! Expansion Tracker
//!
//! Set of record ids whose children are visible. Owned by the session, never
//! URL-backed, and untouched by filter, sort, or page changes.

use crate::types::RecordId;
use std::collections::HashSet;

/// Expanded ids plus a generation counter bumped on every toggle
#[derive(Debug, Clone, Default)]
pub struct ExpansionTracker {
    expanded: HashSet<RecordId>,
    generation: u64,
}

impl ExpansionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `id`. Returns true if the node is now expanded.
    pub fn toggle(&mut self, id: RecordId) -> bool {
        let now_expanded = if self.expanded.remove(&id) {
            false
        } else {
            self.expanded.insert(id);
            true
        };
        self.generation += 1;
        now_expanded
    }

    pub fn is_expanded(&self, id: RecordId) -> bool {
        self.expanded.contains(&id)
    }

    /// Changes whenever the set changes; consumers key caches on it.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Expanded ids in ascending order
    pub fn expanded_ids(&self) -> Vec<RecordId> {
        let mut ids: Vec<RecordId> = self.expanded.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }
}

impl FromIterator<RecordId> for ExpansionTracker {
    /// Toggle each id once, so repeated ids cancel out.
    fn from_iter<I: IntoIterator<Item = RecordId>>(iter: I) -> Self {
        let mut tracker = Self::new();
        for id in iter {
            tracker.toggle(id);
        }
        tracker
    }
}
