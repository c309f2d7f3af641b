//! Expansion Tracker
//!
//! Per-aisle expanded/collapsed flags, owned independently of the rendered
//! tree. The reconciler consults this before mutating anything; it never
//! re-derives expansion from the tree, which may destroy and recreate a
//! section along the way.

use std::collections::{HashMap, HashSet};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpansionState {
    expanded: HashMap<String, bool>,
}

impl ExpansionState {
    /// Unseen aisles render expanded.
    pub fn is_expanded(&self, aisle: &str) -> bool {
        self.expanded.get(aisle).copied().unwrap_or(true)
    }

    pub fn set_expanded(&mut self, aisle: &str, open: bool) {
        self.expanded.insert(aisle.to_string(), open);
    }

    pub fn forget(&mut self, aisle: &str) {
        self.expanded.remove(aisle);
    }

    /// Drop entries for aisles no longer present in the authoritative
    /// collection. Aisles hidden only by the filter keep their entry, so
    /// collapsing survives a round-trip through "Shopping Mode".
    pub fn prune(&mut self, live: &HashSet<String>) {
        self.expanded.retain(|aisle, _| live.contains(aisle));
    }
}
