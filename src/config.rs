//! Session configuration supplied once at load.
//!
//! All physical dimensions share one unit (millimetres in practice); only
//! their ratio to `page_width` matters once converted to pixels.

use serde::{Deserialize, Serialize};

use crate::error::{LabelError, Result};
use crate::grid::GridShape;

/// Default on-screen chrome (toolbar, navigation) subtracted from the
/// viewport height before fitting a page.
pub const DEFAULT_CHROME_HEIGHT: f64 = 140.0;

/// Upper bound on `columns × rows`; larger sheets are rejected as invalid.
pub const MAX_LABELS_PER_PAGE: u32 = 10_000;

/// Default API base path.
pub const DEFAULT_API_BASE: &str = "/api/labels";

/// Physical description of one label sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SheetConfig {
    pub columns: u32,
    pub rows: u32,
    pub page_width: f64,
    pub page_height: f64,
    pub margin_left: f64,
    pub margin_top: f64,
    pub gap_x: f64,
    pub gap_y: f64,
    pub label_width: f64,
    pub label_height: f64,
    pub corner_radius: f64,
    /// On-screen width in pixels that one page is drawn at, before zoom.
    pub reference_page_px: f64,
}

impl Default for SheetConfig {
    /// A4 sheet of 4 × 10 rounded labels, drawn at 96 dpi.
    fn default() -> Self {
        Self {
            columns: 4,
            rows: 10,
            page_width: 210.0,
            page_height: 297.0,
            margin_left: 9.7,
            margin_top: 21.5,
            gap_x: 2.5,
            gap_y: 0.0,
            label_width: 46.0,
            label_height: 25.4,
            corner_radius: 2.0,
            reference_page_px: 794.0,
        }
    }
}

impl SheetConfig {
    /// Reject values that cannot describe a printable sheet.
    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 || self.rows == 0 {
            return Err(LabelError::InvalidConfig(format!(
                "sheet needs at least one column and row, got {}x{}",
                self.columns, self.rows
            )));
        }
        match self.columns.checked_mul(self.rows) {
            Some(per_page) if per_page <= MAX_LABELS_PER_PAGE => {}
            _ => {
                return Err(LabelError::InvalidConfig(format!(
                    "{}x{} labels exceeds {MAX_LABELS_PER_PAGE} per page",
                    self.columns, self.rows
                )))
            }
        }
        if !(self.page_width.is_finite() && self.page_width > 0.0) {
            return Err(LabelError::InvalidConfig(format!(
                "page width must be positive, got {}",
                self.page_width
            )));
        }
        if !(self.page_height.is_finite() && self.page_height > 0.0) {
            return Err(LabelError::InvalidConfig(format!(
                "page height must be positive, got {}",
                self.page_height
            )));
        }
        if !(self.reference_page_px.is_finite() && self.reference_page_px > 0.0) {
            return Err(LabelError::InvalidConfig(format!(
                "reference page size must be positive, got {}",
                self.reference_page_px
            )));
        }
        let lengths = [
            ("marginLeft", self.margin_left),
            ("marginTop", self.margin_top),
            ("gapX", self.gap_x),
            ("gapY", self.gap_y),
            ("labelWidth", self.label_width),
            ("labelHeight", self.label_height),
            ("cornerRadius", self.corner_radius),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(LabelError::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn grid(&self) -> GridShape {
        GridShape::new(self.columns, self.rows)
    }

    /// Slots per page (`columns × rows`).
    pub fn per_page(&self) -> u32 {
        self.grid().per_page()
    }
}

/// Everything the viewer needs at load: the sheet plus where to talk to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerConfig {
    #[serde(flatten)]
    pub sheet: SheetConfig,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_chrome_height")]
    pub chrome_height: f64,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_chrome_height() -> f64 {
    DEFAULT_CHROME_HEIGHT
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            sheet: SheetConfig::default(),
            api_base: default_api_base(),
            token: None,
            chrome_height: DEFAULT_CHROME_HEIGHT,
        }
    }
}

impl ViewerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.sheet.validate()?;
        Ok(config)
    }

    /// The code-source token; a missing or blank token is fatal.
    pub fn require_token(&self) -> Result<&str> {
        match self.token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(LabelError::ConfigurationMissing(
                "no token supplied for the code source".to_string(),
            )),
        }
    }

    /// Join `path` onto the API base without doubling slashes.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Code source URL; the token must already be URI-encoded.
    pub fn codes_url(&self, encoded_token: &str) -> String {
        format!("{}?token={encoded_token}", self.endpoint("codes"))
    }

    pub fn preview_url(&self) -> String {
        self.endpoint("preview")
    }

    pub fn print_url(&self) -> String {
        self.endpoint("print")
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = SheetConfig::default();
        config.validate().unwrap();
        assert_eq!(config.per_page(), 40);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config =
            ViewerConfig::from_json(r#"{"columns":2,"rows":3,"token":"abc","apiBase":"/x/"}"#)
                .unwrap();
        assert_eq!(config.sheet.per_page(), 6);
        assert_eq!(config.sheet.page_width, 210.0);
        assert_eq!(config.require_token().unwrap(), "abc");
        assert_eq!(config.preview_url(), "/x/preview");
        assert_eq!(config.codes_url("abc"), "/x/codes?token=abc");
    }

    #[test]
    fn test_zero_columns_rejected() {
        let err = ViewerConfig::from_json(r#"{"columns":0}"#).unwrap_err();
        assert!(matches!(err, LabelError::InvalidConfig(_)));
    }

    #[test]
    fn test_negative_gap_rejected() {
        let config = SheetConfig {
            gap_x: -1.0,
            ..SheetConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_token_is_missing() {
        let config = ViewerConfig {
            token: Some("  ".to_string()),
            ..ViewerConfig::default()
        };
        assert!(matches!(
            config.require_token(),
            Err(LabelError::ConfigurationMissing(_))
        ));
    }
}
