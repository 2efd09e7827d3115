//! JSON over `fetch` for the code source, preview, and print services.
//!
//! One request per call; no retries and no cancellation. Ordering between
//! overlapping preview requests is resolved by the session's sync tickets.

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestCredentials, RequestInit, Response};

use crate::error::{LabelError, Result};

fn js_err(value: JsValue) -> LabelError {
    LabelError::Network(
        value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}")),
    )
}

async fn send<T: DeserializeOwned>(url: &str, init: &RequestInit) -> Result<T> {
    let request = Request::new_with_str_and_init(url, init).map_err(js_err)?;
    let window =
        web_sys::window().ok_or_else(|| LabelError::Network("no window to fetch from".into()))?;
    let value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_err)?;
    let response: Response = value
        .dyn_into()
        .map_err(|_| LabelError::Network(format!("{url}: fetch did not return a Response")))?;
    if !response.ok() {
        return Err(LabelError::Network(format!(
            "{url}: HTTP {} {}",
            response.status(),
            response.status_text()
        )));
    }
    let text = JsFuture::from(response.text().map_err(js_err)?)
        .await
        .map_err(js_err)?
        .as_string()
        .ok_or_else(|| LabelError::Network(format!("{url}: response body is not text")))?;
    serde_json::from_str(&text)
        .map_err(|e| LabelError::Network(format!("{url}: malformed response: {e}")))
}

pub(crate) async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T> {
    let init = RequestInit::new();
    init.set_method("GET");
    init.set_credentials(RequestCredentials::SameOrigin);
    send(url, &init).await
}

pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(url: &str, body: &B) -> Result<T> {
    let body = serde_json::to_string(body)?;
    let headers = Headers::new().map_err(js_err)?;
    headers
        .set("Content-Type", "application/json")
        .map_err(js_err)?;
    let init = RequestInit::new();
    init.set_method("POST");
    init.set_credentials(RequestCredentials::SameOrigin);
    init.set_headers(headers.as_ref());
    init.set_body(&JsValue::from_str(&body));
    send(url, &init).await
}
