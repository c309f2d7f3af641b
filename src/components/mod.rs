//! UI Components
//!
//! Reusable Leptos components.

mod aisle_list;
mod filter_toggle;
mod status_bar;

pub use aisle_list::AisleList;
pub use filter_toggle::FilterToggle;
pub use status_bar::StatusBar;
