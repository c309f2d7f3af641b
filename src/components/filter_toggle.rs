//! Filter Toggle Component
//!
//! The "Shopping Mode" switch: show needed items only. Flips the
//! client-only filter flag; the collection and the network are untouched.

use leptos::prelude::*;

use crate::store::ListState;

#[component]
pub fn FilterToggle(state: RwSignal<ListState>) -> impl IntoView {
    view! {
        <div class="filter-toggle-container">
            <label class="toggle-switch-wrapper">
                <input
                    type="checkbox"
                    id="filter-toggle"
                    prop:checked=move || state.with(|s| s.show_needed_only)
                    on:change=move |ev| {
                        let enabled = event_target_checked(&ev);
                        state.update(|s| s.set_filter(enabled));
                    }
                />
                <span class="toggle-switch" aria-hidden="true"></span>
                <span class="toggle-label-text">"Shopping Mode"</span>
            </label>
        </div>
    }
}
