//! Frontend Models
//!
//! Wire-shape data structures and snapshot decoding.

use serde::{Deserialize, Serialize};

/// A checklist entry (matches the server's wire shape).
///
/// `label` doubles as the display text and the unique key within one
/// snapshot; `aisle` is non-empty and may name several aisles at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub label: String,
    pub needed: bool,
    pub aisle: Vec<String>,
}

/// Client -> server message on the push channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientMessage {
    Toggle { label: String },
}

/// Decode and validate one full-collection snapshot.
///
/// A rejected snapshot never reaches the store: invalid JSON, an item with
/// an empty `aisle` list, and duplicate labels are all refused here.
pub fn parse_snapshot(raw: &str) -> Result<Vec<Item>, String> {
    let items: Vec<Item> = serde_json::from_str(raw).map_err(|e| e.to_string())?;
    let mut seen = std::collections::HashSet::new();
    for item in &items {
        if item.aisle.is_empty() {
            return Err(format!("item '{}' has no aisle", item.label));
        }
        if !seen.insert(item.label.as_str()) {
            return Err(format!("duplicate label '{}'", item.label));
        }
    }
    Ok(items)
}
