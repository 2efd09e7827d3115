//! Structured error types for labelview.
//!
//! Every fallible operation in the crate returns [`Result`]; the viewer layer
//! converts errors into `JsValue` strings at the wasm boundary.

/// All errors that can occur while laying out, syncing, or printing a label sheet.
#[derive(Debug, thiserror::Error)]
pub enum LabelError {
    /// A required input (token, code list) is absent. Fatal to initialization.
    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    /// Sheet configuration values that cannot describe a printable sheet.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The operation is not valid in the current view-model state.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Hit-test coordinates that do not name a slot on the sheet.
    #[error("Slot out of grid: page {page}, row {row}, col {col}")]
    OutOfGrid { page: u32, row: u32, col: u32 },

    /// Non-success HTTP status, transport failure, or malformed response.
    #[error("Network: {0}")]
    Network(String),

    /// The print service refused or failed the job.
    #[error("Print failed: {0}")]
    Print(String),

    /// I/O error (CLI input files).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LabelError>;

#[cfg(target_arch = "wasm32")]
impl From<LabelError> for wasm_bindgen::JsValue {
    fn from(e: LabelError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
