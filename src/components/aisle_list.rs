//! Aisle List Component
//!
//! Owns the render target, the retained tree, and the expansion tracker.
//! A single effect reacts to store mutations: group, prune stale expansion
//! entries, reconcile against the mounted container.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;

use crate::dom::DomSurface;
use crate::group::group_by_aisle;
use crate::reconcile::reconcile;
use crate::store::ListState;
use crate::tree::ListTree;
use crate::ui_state::ExpansionState;

#[component]
pub fn AisleList(state: RwSignal<ListState>, on_toggle: Rc<dyn Fn(String, bool)>) -> impl IntoView {
    let container = NodeRef::<leptos::html::Div>::new();
    let expansion = Rc::new(RefCell::new(ExpansionState::default()));
    let renderer: Rc<RefCell<Option<(ListTree<DomSurface>, DomSurface)>>> =
        Rc::new(RefCell::new(None));

    Effect::new({
        let expansion = expansion.clone();
        let renderer = renderer.clone();
        move |_| {
            // Track the store: one mutation, one pass here.
            let (view, live) = state.with(|s| {
                (group_by_aisle(&s.items, s.show_needed_only), s.live_aisles())
            });
            let Some(div) = container.get() else {
                return;
            };

            let mut slot = renderer.borrow_mut();
            let (tree, surface) = slot.get_or_insert_with(|| {
                let tracker = expansion.clone();
                // Expand/collapse records presentation state only; it never
                // requests a render.
                let on_expand = Rc::new(move |aisle: String, open: bool| {
                    tracker.borrow_mut().set_expanded(&aisle, open);
                });
                let surface = DomSurface::new(
                    web_sys::Element::from(div),
                    on_toggle.clone(),
                    on_expand,
                );
                (ListTree::new(), surface)
            });

            // Entries for aisles gone from the authoritative collection are
            // garbage-collected; filtered-out aisles keep theirs.
            expansion.borrow_mut().prune(&live);
            let snapshot = expansion.borrow().clone();
            reconcile(&view, tree, &snapshot, surface);
        }
    });

    view! { <div class="list-container" id="item-list" node_ref=container></div> }
}
