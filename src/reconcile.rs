//! Reconciler
//!
//! Applies the minimal structural edit that takes the rendered tree from
//! its previous state to the given grouped view. Surviving sections and
//! rows keep their backend handles; only changed visual state is touched.
//!
//! The walk relies on two orderings agreeing: the view's keys are sorted by
//! `aisle_cmp`, and sections are only ever inserted at their sorted
//! position, so after dead sections are dropped the survivors line up with
//! the view as a subsequence.

use std::collections::HashSet;

use crate::group::GroupedView;
use crate::tree::{ListTree, RowNode, SectionNode, Surface};
use crate::ui_state::ExpansionState;

pub fn reconcile<S: Surface>(
    view: &GroupedView,
    tree: &mut ListTree<S>,
    expansion: &ExpansionState,
    surface: &mut S,
) {
    // Drop whole sections whose aisle vanished from the view, subtree and
    // all; their rows go with the section handle.
    let live: HashSet<&str> = view.iter().map(|(aisle, _)| aisle.as_str()).collect();
    for section in tree.sections.iter().filter(|s| !live.contains(s.aisle.as_str())) {
        surface.remove_section(&section.handle);
    }
    tree.sections.retain(|s| live.contains(s.aisle.as_str()));
    tree.reindex();

    for (at, (aisle, items)) in view.iter().enumerate() {
        let at = match tree.section_index.get(aisle) {
            Some(&existing) => existing,
            None => {
                // New aisle: the next surviving section is the insertion
                // anchor, keeping section order identical to the view's key
                // order.
                let anchor = tree.sections.get(at).map(|s| &s.handle);
                let expanded = expansion.is_expanded(aisle);
                let handle = surface.create_section(aisle, expanded, anchor);
                tree.insert_section(at, SectionNode::new(aisle.clone(), expanded, handle));
                at
            }
        };

        let section = &mut tree.sections[at];

        // Rows: drop vanished labels, refresh survivors, append new ones in
        // bucket order.
        let wanted: HashSet<&str> = items.iter().map(|i| i.label.as_str()).collect();
        for row in section.rows.iter().filter(|r| !wanted.contains(r.label.as_str())) {
            surface.remove_row(&section.handle, &row.handle);
        }
        section.rows.retain(|r| wanted.contains(r.label.as_str()));
        section.reindex_rows();

        for item in items {
            match section.row_index.get(&item.label) {
                Some(&row_at) => {
                    let row = &mut section.rows[row_at];
                    if row.needed != item.needed {
                        surface.set_needed(&row.handle, item.needed);
                        row.needed = item.needed;
                    }
                }
                None => {
                    let handle = surface.create_row(&section.handle, &item.label, item.needed);
                    section.rows.push(RowNode {
                        label: item.label.clone(),
                        needed: item.needed,
                        handle,
                    });
                    section.row_index.insert(item.label.clone(), section.rows.len() - 1);
                }
            }
        }

        // Expansion comes from the tracker, never from the tree itself.
        let expanded = expansion.is_expanded(aisle);
        if section.expanded != expanded {
            surface.set_expanded(&section.handle, expanded);
            section.expanded = expanded;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::group_by_aisle;
    use crate::models::Item;
    use crate::tree::testing::CountingSurface;

    fn item(label: &str, needed: bool, aisles: &[&str]) -> Item {
        Item {
            label: label.to_string(),
            needed,
            aisle: aisles.iter().map(|a| a.to_string()).collect(),
        }
    }

    fn view(items: &[Item]) -> GroupedView {
        group_by_aisle(items, false)
    }

    fn shape<S: Surface>(tree: &ListTree<S>) -> Vec<(String, bool, Vec<(String, bool)>)> {
        tree.sections
            .iter()
            .map(|s| {
                (
                    s.aisle.clone(),
                    s.expanded,
                    s.rows.iter().map(|r| (r.label.clone(), r.needed)).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn builds_sections_and_rows_from_empty() {
        let items = [item("milk", true, &["dairy"]), item("bread", false, &["bakery"])];
        let mut tree = ListTree::new();
        let mut surface = CountingSurface::default();
        reconcile(&view(&items), &mut tree, &ExpansionState::default(), &mut surface);

        assert_eq!(
            shape(&tree),
            vec![
                ("bakery".to_string(), true, vec![("bread".to_string(), false)]),
                ("dairy".to_string(), true, vec![("milk".to_string(), true)]),
            ]
        );
        assert_eq!(surface.sections_created, 2);
        assert_eq!(surface.rows_created, 2);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let items = [item("milk", true, &["dairy"]), item("bread", false, &["bakery"])];
        let mut tree = ListTree::new();
        let mut surface = CountingSurface::default();
        let v = view(&items);
        reconcile(&v, &mut tree, &ExpansionState::default(), &mut surface);

        let first = shape(&tree);
        let edits = surface.edits();
        reconcile(&v, &mut tree, &ExpansionState::default(), &mut surface);
        assert_eq!(shape(&tree), first);
        assert_eq!(surface.edits(), edits, "second pass must apply no edits");
    }

    #[test]
    fn two_runs_from_empty_produce_identical_trees() {
        let items = [
            item("milk", true, &["dairy"]),
            item("soap", false, &["Toiletries"]),
            item("peanut butter", true, &["spreads", "baking"]),
        ];
        let v = view(&items);
        let mut first = ListTree::new();
        let mut second = ListTree::new();
        reconcile(&v, &mut first, &ExpansionState::default(), &mut CountingSurface::default());
        reconcile(&v, &mut second, &ExpansionState::default(), &mut CountingSurface::default());
        assert_eq!(shape(&first), shape(&second));
    }

    #[test]
    fn surviving_sections_and_rows_keep_their_handles() {
        let mut tree = ListTree::new();
        let mut surface = CountingSurface::default();
        let expansion = ExpansionState::default();
        reconcile(
            &view(&[item("milk", true, &["dairy"])]),
            &mut tree,
            &expansion,
            &mut surface,
        );
        let section_handle = tree.sections[0].handle;
        let row_handle = tree.sections[0].rows[0].handle;

        // New aisle ahead of "dairy" plus a needed flip on milk.
        reconcile(
            &view(&[item("milk", false, &["dairy"]), item("bread", true, &["bakery"])]),
            &mut tree,
            &expansion,
            &mut surface,
        );
        let dairy = &tree.sections[tree.section_index["dairy"]];
        assert_eq!(dairy.handle, section_handle);
        assert_eq!(dairy.rows[0].handle, row_handle);
        assert!(!dairy.rows[0].needed);
        assert_eq!(surface.needed_updates, 1);
    }

    #[test]
    fn new_sections_land_at_their_sorted_position() {
        let mut tree = ListTree::new();
        let mut surface = CountingSurface::default();
        let expansion = ExpansionState::default();
        reconcile(
            &view(&[item("apples", true, &["produce"]), item("milk", true, &["dairy"])]),
            &mut tree,
            &expansion,
            &mut surface,
        );
        reconcile(
            &view(&[
                item("apples", true, &["produce"]),
                item("milk", true, &["dairy"]),
                item("bread", true, &["bakery"]),
            ]),
            &mut tree,
            &expansion,
            &mut surface,
        );
        let aisles: Vec<_> = tree.sections.iter().map(|s| s.aisle.as_str()).collect();
        assert_eq!(aisles, vec!["bakery", "dairy", "produce"]);
        assert_eq!(tree.section_index["bakery"], 0);
    }

    #[test]
    fn dropped_aisle_removes_the_whole_section() {
        let mut tree = ListTree::new();
        let mut surface = CountingSurface::default();
        let expansion = ExpansionState::default();
        reconcile(
            &view(&[item("milk", true, &["dairy"]), item("bread", false, &["bakery"])]),
            &mut tree,
            &expansion,
            &mut surface,
        );
        // Snapshot that drops milk entirely.
        reconcile(
            &view(&[item("bread", false, &["bakery"])]),
            &mut tree,
            &expansion,
            &mut surface,
        );
        assert_eq!(tree.sections.len(), 1);
        assert_eq!(tree.sections[0].aisle, "bakery");
        assert!(!tree.section_index.contains_key("dairy"));
        assert_eq!(surface.sections_removed, 1);
    }

    #[test]
    fn rows_are_added_and_removed_within_a_surviving_section() {
        let mut tree = ListTree::new();
        let mut surface = CountingSurface::default();
        let expansion = ExpansionState::default();
        reconcile(
            &view(&[item("milk", true, &["dairy"]), item("yogurt", true, &["dairy"])]),
            &mut tree,
            &expansion,
            &mut surface,
        );
        let section_handle = tree.sections[0].handle;
        reconcile(
            &view(&[item("milk", true, &["dairy"]), item("butter", true, &["dairy"])]),
            &mut tree,
            &expansion,
            &mut surface,
        );
        assert_eq!(tree.sections[0].handle, section_handle);
        let labels: Vec<_> = tree.sections[0].rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["milk", "butter"]);
        assert_eq!(surface.rows_removed, 1);
    }

    #[test]
    fn collapse_survives_a_new_snapshot() {
        let mut tree = ListTree::new();
        let mut surface = CountingSurface::default();
        let mut expansion = ExpansionState::default();
        reconcile(&view(&[item("milk", true, &["dairy"])]), &mut tree, &expansion, &mut surface);

        // User collapses "dairy"; a fresh snapshot still containing the
        // aisle must leave it collapsed.
        expansion.set_expanded("dairy", false);
        reconcile(
            &view(&[item("milk", false, &["dairy"])]),
            &mut tree,
            &expansion,
            &mut surface,
        );
        assert!(!tree.sections[0].expanded);
        assert_eq!(surface.expanded_updates, 1);
    }

    #[test]
    fn recreated_section_uses_the_stored_expansion() {
        let mut tree = ListTree::new();
        let mut surface = CountingSurface::default();
        let mut expansion = ExpansionState::default();
        expansion.set_expanded("dairy", false);

        reconcile(&view(&[item("bread", true, &["bakery"])]), &mut tree, &expansion, &mut surface);
        reconcile(
            &view(&[item("bread", true, &["bakery"]), item("milk", true, &["dairy"])]),
            &mut tree,
            &expansion,
            &mut surface,
        );
        let dairy = &tree.sections[tree.section_index["dairy"]];
        assert!(!dairy.expanded, "stored collapse applies to a brand new section");
        // The flag went in at creation, not as a follow-up edit.
        assert_eq!(surface.expanded_updates, 0);
    }

    #[test]
    fn first_appearance_renders_expanded() {
        let mut tree = ListTree::new();
        reconcile(
            &view(&[item("milk", true, &["dairy"])]),
            &mut tree,
            &ExpansionState::default(),
            &mut CountingSurface::default(),
        );
        assert!(tree.sections[0].expanded);
    }

    #[test]
    fn filter_round_trip_restores_the_full_tree() {
        let items = [item("milk", true, &["dairy"]), item("bread", false, &["bakery"])];
        let mut tree = ListTree::new();
        let mut surface = CountingSurface::default();
        let expansion = ExpansionState::default();

        reconcile(&group_by_aisle(&items, false), &mut tree, &expansion, &mut surface);
        let full = shape(&tree);
        reconcile(&group_by_aisle(&items, true), &mut tree, &expansion, &mut surface);
        assert_eq!(tree.sections.len(), 1);
        reconcile(&group_by_aisle(&items, false), &mut tree, &expansion, &mut surface);
        assert_eq!(shape(&tree), full);
    }
}
