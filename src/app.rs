//! Shopping List App
//!
//! Wires the store, both transports, and the render pipeline together.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::components::{AisleList, FilterToggle, StatusBar};
use crate::connection::{ConnectionStatus, LiveUpdates};
use crate::models;
use crate::store::ListState;

#[component]
pub fn App() -> impl IntoView {
    let state = RwSignal::new(ListState::default());
    let (status, set_status) = signal(ConnectionStatus::Disconnected);
    let (load_error, set_load_error) = signal(None::<String>);

    // A failed fetch leaves the collection empty and surfaces the error;
    // the error value itself never reaches the grouping code.
    let refresh = move || {
        spawn_local(async move {
            match commands::fetch_items().await {
                Ok(items) => {
                    set_load_error.set(None);
                    state.update(|s| s.replace(items));
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("[FETCH] load failed: {e}").into());
                    set_load_error.set(Some(format!("failed to load items: {e}")));
                    state.update(|s| s.replace(Vec::new()));
                }
            }
        });
    };
    refresh();

    // Push channel: every message is a complete replacement, and the last
    // snapshot wins over any optimistic local flip. Rejected snapshots are
    // logged and never touch the store.
    let live = LiveUpdates::connect(
        move |raw: String| match models::parse_snapshot(&raw) {
            Ok(items) => state.update(|s| s.replace(items)),
            Err(e) => web_sys::console::error_1(&format!("[WS] rejected snapshot: {e}").into()),
        },
        move |s| set_status.set(s),
        // No resumable delta stream: re-seed in full after every (re)open.
        move || refresh(),
    );

    // Optimistic toggle: flip locally first so the click renders without a
    // network wait, then tell the server. While the channel is down the
    // legacy PATCH endpoint stands in; a failed send is logged, not retried.
    let on_toggle: Rc<dyn Fn(String, bool)> = {
        let live = live.clone();
        Rc::new(move |label: String, checked: bool| {
            state.update(|s| s.set_needed(&label, checked));
            if let Err(e) = live.send_toggle(&label) {
                web_sys::console::error_1(&format!("[WS] toggle send failed: {e}").into());
                spawn_local(async move {
                    if let Err(e) = commands::patch_item(&label).await {
                        web_sys::console::error_1(
                            &format!("[FETCH] toggle fallback failed: {e}").into(),
                        );
                    }
                });
            }
        })
    };

    view! {
        <div class="app-layout">
            <FilterToggle state=state />
            <StatusBar status=status load_error=load_error />
            <h1>"Shopping List"</h1>
            <AisleList state=state on_toggle=on_toggle />
        </div>
    }
}
