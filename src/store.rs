//! List State
//!
//! The authoritative collection plus the client-only filter flag, updated
//! through explicit operations. The component layer wraps this in a signal,
//! so one mutation means exactly one pass of the render effect.

use std::collections::HashSet;

use crate::models::Item;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListState {
    /// Authoritative collection, replaced wholesale on every snapshot
    pub items: Vec<Item>,
    /// Client-only "show needed only" flag
    pub show_needed_only: bool,
}

impl ListState {
    /// Swap in a complete snapshot. No merge logic: the transport delivers
    /// full state, never deltas, and the last snapshot wins.
    pub fn replace(&mut self, items: Vec<Item>) {
        self.items = items;
    }

    /// Optimistic local flip. Silently a no-op when the label is absent,
    /// e.g. the item was dropped by a snapshot that raced the click.
    pub fn set_needed(&mut self, label: &str, needed: bool) {
        if let Some(item) = self.items.iter_mut().find(|i| i.label == label) {
            item.needed = needed;
        }
    }

    pub fn set_filter(&mut self, enabled: bool) {
        self.show_needed_only = enabled;
    }

    /// Every aisle named by the authoritative collection, filter ignored.
    /// Used to prune expansion entries for aisles that vanished for real.
    pub fn live_aisles(&self) -> HashSet<String> {
        self.items
            .iter()
            .flat_map(|i| i.aisle.iter().cloned())
            .collect()
    }
}
