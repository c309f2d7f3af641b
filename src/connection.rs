//! Live Updates Channel
//!
//! WebSocket wrapper for the push side of the protocol: full-collection
//! snapshots in, toggle commands out. Reconnects with capped exponential
//! backoff; the protocol has no resumable delta stream, so every successful
//! (re)open triggers a full re-fetch through the `on_open` hook.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use leptos::task::spawn_local;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, MessageEvent, WebSocket};

use crate::models::ClientMessage;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionStatus {
    Disconnected,
    Connecting,
    Open,
}

const BACKOFF_BASE_MS: u32 = 1_000;
const BACKOFF_CAP_MS: u32 = 30_000;

/// Delay before reconnect attempt number `attempt` (0-based).
fn backoff_delay_ms(attempt: u32) -> u32 {
    (BACKOFF_BASE_MS << attempt.min(5)).min(BACKOFF_CAP_MS)
}

#[derive(Clone)]
pub struct LiveUpdates {
    inner: Rc<Inner>,
}

struct Inner {
    socket: RefCell<Option<WebSocket>>,
    attempts: Cell<u32>,
    on_message: Box<dyn Fn(String)>,
    on_status: Box<dyn Fn(ConnectionStatus)>,
    on_open: Box<dyn Fn()>,
}

impl LiveUpdates {
    pub fn connect(
        on_message: impl Fn(String) + 'static,
        on_status: impl Fn(ConnectionStatus) + 'static,
        on_open: impl Fn() + 'static,
    ) -> Self {
        let live = Self {
            inner: Rc::new(Inner {
                socket: RefCell::new(None),
                attempts: Cell::new(0),
                on_message: Box::new(on_message),
                on_status: Box::new(on_status),
                on_open: Box::new(on_open),
            }),
        };
        live.open_socket();
        live
    }

    /// Send a toggle command. Errors go back to the caller, which logs and
    /// falls back; this layer never retries.
    pub fn send_toggle(&self, label: &str) -> Result<(), String> {
        let msg = serde_json::to_string(&ClientMessage::Toggle {
            label: label.to_string(),
        })
        .map_err(|e| e.to_string())?;
        let socket = self.inner.socket.borrow();
        let ws = socket
            .as_ref()
            .filter(|ws| ws.ready_state() == WebSocket::OPEN)
            .ok_or("push channel is not open")?;
        ws.send_with_str(&msg).map_err(|e| format!("{e:?}"))
    }

    fn open_socket(&self) {
        (self.inner.on_status)(ConnectionStatus::Connecting);
        let url = updates_url();
        let ws = match WebSocket::new(&url) {
            Ok(ws) => ws,
            Err(e) => {
                web_sys::console::error_1(&format!("[WS] connect to {url} failed: {e:?}").into());
                self.schedule_reconnect();
                return;
            }
        };

        let live = self.clone();
        let onmessage = Closure::<dyn FnMut(MessageEvent)>::new(move |ev: MessageEvent| {
            if let Some(text) = ev.data().as_string() {
                (live.inner.on_message)(text);
            }
        });
        ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
        onmessage.forget();

        let live = self.clone();
        let onopen = Closure::<dyn FnMut()>::new(move || {
            web_sys::console::log_1(&"[WS] open".into());
            live.inner.attempts.set(0);
            (live.inner.on_status)(ConnectionStatus::Open);
            (live.inner.on_open)();
        });
        ws.set_onopen(Some(onopen.as_ref().unchecked_ref()));
        onopen.forget();

        // An error event is always followed by close, so close owns both the
        // status change and the reconnect.
        let live = self.clone();
        let onclose = Closure::<dyn FnMut(CloseEvent)>::new(move |ev: CloseEvent| {
            web_sys::console::log_1(&format!("[WS] closed: code={}", ev.code()).into());
            (live.inner.on_status)(ConnectionStatus::Disconnected);
            live.schedule_reconnect();
        });
        ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));
        onclose.forget();

        *self.inner.socket.borrow_mut() = Some(ws);
    }

    fn schedule_reconnect(&self) {
        let attempt = self.inner.attempts.get();
        self.inner.attempts.set(attempt.saturating_add(1));
        let delay = backoff_delay_ms(attempt);
        web_sys::console::log_1(&format!("[WS] reconnecting in {delay}ms").into());

        let live = self.clone();
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            live.open_socket();
        });
    }
}

/// Scheme-matched push channel URL: `wss://` on https pages.
fn updates_url() -> String {
    let location = web_sys::window().map(|w| w.location());
    let protocol = location
        .as_ref()
        .and_then(|l| l.protocol().ok())
        .unwrap_or_else(|| "http:".to_string());
    let host = location.and_then(|l| l.host().ok()).unwrap_or_default();
    let scheme = if protocol == "https:" { "wss" } else { "ws" };
    format!("{scheme}://{host}/ws/updates")
}
