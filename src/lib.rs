//! labelview - label sheet layout and pagination for the web
//!
//! Maps a flat sequence of item codes onto a multi-page grid of physical
//! label slots, driven from the browser via WebAssembly:
//! - Grid index algebra between linear slots and (page, row, col)
//! - Physical sheet geometry converted to pixels, with fit-to-window zoom
//! - Start offset and skip marks, synced with a server-computed placement
//! - Multi-page navigation that keeps the operator's editing context
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { LabelView } from 'labelview';
//! await init();
//! const view = new LabelView(document.getElementById('labels'), {
//!   columns: 4, rows: 10, apiBase: '/api/labels', token,
//! });
//! await view.load();
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod logging;
pub mod session;
pub mod sync;

// Layout, view-model, and paint plan
pub mod layout;
pub mod model;
pub mod render;

#[cfg(target_arch = "wasm32")]
pub mod viewer;

use wasm_bindgen::prelude::*;

pub use config::{SheetConfig, ViewerConfig};
pub use error::{LabelError, Result};
pub use grid::{GridPos, GridShape, LinearIndex};
pub use session::{LabelSession, Mutation, Repaint, SyncCall, SyncOutcome};

#[cfg(target_arch = "wasm32")]
pub use viewer::LabelView;

/// Slots per page for a configuration object, or an error string if the
/// configuration is invalid.
///
/// # Errors
/// Returns an error if the configuration cannot be deserialized or validated.
#[wasm_bindgen(js_name = "slotsPerPage")]
pub fn slots_per_page(config_json: &str) -> std::result::Result<u32, JsValue> {
    let config = ViewerConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(config.sheet.per_page())
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
