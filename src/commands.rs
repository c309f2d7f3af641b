//! HTTP Command Wrappers
//!
//! Browser fetch bindings for the REST side of the protocol.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use crate::models::{parse_snapshot, Item};

/// GET /items — seed (or re-seed after a reconnect) the collection.
pub async fn fetch_items() -> Result<Vec<Item>, String> {
    let body = request("GET", "/items").await?;
    parse_snapshot(&body)
}

/// PATCH /items/{label} — legacy toggle endpoint, used as the fallback
/// while the push channel is down. The response body is ignored; the next
/// snapshot corrects state either way.
pub async fn patch_item(label: &str) -> Result<(), String> {
    let encoded = utf8_percent_encode(label, NON_ALPHANUMERIC);
    let _ = request("PATCH", &format!("/items/{encoded}")).await?;
    Ok(())
}

async fn request(method: &str, url: &str) -> Result<String, String> {
    let window = web_sys::window().ok_or("no window")?;

    let opts = RequestInit::new();
    opts.set_method(method);
    let request = Request::new_with_str_and_init(url, &opts).map_err(|e| format!("{e:?}"))?;

    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("{e:?}"))?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| "fetch did not yield a Response".to_string())?;
    if !response.ok() {
        return Err(format!("{method} {url} failed: HTTP {}", response.status()));
    }

    let body = JsFuture::from(response.text().map_err(|e| format!("{e:?}"))?)
        .await
        .map_err(|e| format!("{e:?}"))?;
    body.as_string()
        .ok_or_else(|| "response body is not text".to_string())
}
