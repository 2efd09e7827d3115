//! Builders for label sheet configurations and service payloads.
//!
//! ```rust,ignore
//! let config = SheetBuilder::new().grid(2, 2).token("abc").build();
//! let codes = codes(5);
//! ```
#![allow(dead_code, clippy::unwrap_used)]

use labelview::sync::{CodesResponse, Placement, PlacementResponse, PrintResponse};
use labelview::ViewerConfig;

/// Fluent builder over [`ViewerConfig`].
#[derive(Debug, Clone, Default)]
pub struct SheetBuilder {
    config: ViewerConfig,
}

impl SheetBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn grid(mut self, columns: u32, rows: u32) -> Self {
        self.config.sheet.columns = columns;
        self.config.sheet.rows = rows;
        self
    }

    #[must_use]
    pub fn page(mut self, width: f64, height: f64) -> Self {
        self.config.sheet.page_width = width;
        self.config.sheet.page_height = height;
        self
    }

    #[must_use]
    pub fn margins(mut self, left: f64, top: f64) -> Self {
        self.config.sheet.margin_left = left;
        self.config.sheet.margin_top = top;
        self
    }

    #[must_use]
    pub fn gaps(mut self, x: f64, y: f64) -> Self {
        self.config.sheet.gap_x = x;
        self.config.sheet.gap_y = y;
        self
    }

    #[must_use]
    pub fn label(mut self, width: f64, height: f64) -> Self {
        self.config.sheet.label_width = width;
        self.config.sheet.label_height = height;
        self
    }

    #[must_use]
    pub fn reference_px(mut self, px: f64) -> Self {
        self.config.sheet.reference_page_px = px;
        self
    }

    #[must_use]
    pub fn chrome(mut self, height: f64) -> Self {
        self.config.chrome_height = height;
        self
    }

    #[must_use]
    pub fn token(mut self, token: &str) -> Self {
        self.config.token = Some(token.to_string());
        self
    }

    #[must_use]
    pub fn build(self) -> ViewerConfig {
        self.config
    }

    /// The configuration as the camelCase JSON object the page embeds.
    #[must_use]
    pub fn json(self) -> String {
        serde_json::to_string(&self.config).unwrap()
    }
}

/// `n` codes in the production format, numbered from 1.
#[must_use]
pub fn codes(n: usize) -> CodesResponse {
    CodesResponse {
        codes: (1..=n).map(|i| format!("250822_BB_{i}")).collect(),
    }
}

/// A placement response from `(index, code)` pairs.
#[must_use]
pub fn response(pages: u32, placed: &[(u32, &str)]) -> PlacementResponse {
    PlacementResponse {
        pages,
        placed: placed
            .iter()
            .map(|&(index, code)| Placement {
                index,
                code: code.to_string(),
            })
            .collect(),
    }
}

#[must_use]
pub fn print_ok() -> PrintResponse {
    PrintResponse {
        success: true,
        msg: None,
    }
}

#[must_use]
pub fn print_refused(msg: Option<&str>) -> PrintResponse {
    PrintResponse {
        success: false,
        msg: msg.map(str::to_string),
    }
}
