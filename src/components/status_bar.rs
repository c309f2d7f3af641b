//! Status Bar Component
//!
//! Connection state plus the load-error indicator. A failed fetch shows up
//! here instead of pretending to be a collection.

use leptos::prelude::*;

use crate::connection::ConnectionStatus;

#[component]
pub fn StatusBar(
    status: ReadSignal<ConnectionStatus>,
    load_error: ReadSignal<Option<String>>,
) -> impl IntoView {
    let status_text = move || match status.get() {
        ConnectionStatus::Open => "live",
        ConnectionStatus::Connecting => "connecting...",
        ConnectionStatus::Disconnected => "offline",
    };

    view! {
        <div class="status-bar">
            <span
                class="connection-status"
                class:offline=move || status.get() == ConnectionStatus::Disconnected
            >
                {status_text}
            </span>
            <Show when=move || load_error.get().is_some()>
                <span class="load-error">{move || load_error.get().unwrap_or_default()}</span>
            </Show>
        </div>
    }
}
