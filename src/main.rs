//! Shopping List Frontend Entry Point

mod app;
mod commands;
mod components;
mod connection;
mod dom;
mod group;
mod models;
mod reconcile;
mod store;
mod tree;
mod ui_state;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
