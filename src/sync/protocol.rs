//! Wire types for the code source, placement preview, and print services.

use serde::{Deserialize, Serialize};

use crate::grid::LinearIndex;

/// Numbering always starts at one; the server owns everything after that.
pub const START_NO: u32 = 1;

/// Body of both the preview and the print request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementRequest {
    pub start_no: u32,
    pub start_index: LinearIndex,
    pub skip_indices: Vec<LinearIndex>,
    pub codes: Vec<String>,
}

/// One server-assigned code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub index: LinearIndex,
    pub code: String,
}

/// Authoritative placement computed by the preview service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementResponse {
    pub pages: u32,
    #[serde(default)]
    pub placed: Vec<Placement>,
}

/// Result of a print submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintResponse {
    pub success: bool,
    #[serde(default)]
    pub msg: Option<String>,
}

/// Ordered item codes for one token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodesResponse {
    #[serde(default)]
    pub codes: Vec<String>,
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
    fn test_request_uses_camel_case_keys() {
        let request = PlacementRequest {
            start_no: START_NO,
            start_index: 3,
            skip_indices: vec![5, 7],
            codes: vec!["250822_BB_1".to_string()],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "startNo": 1,
                "startIndex": 3,
                "skipIndices": [5, 7],
                "codes": ["250822_BB_1"]
            })
        );
    }

    #[test]
    fn test_response_without_placed_is_empty() {
        let response: PlacementResponse = serde_json::from_str(r#"{"pages":1}"#).unwrap();
        assert!(response.placed.is_empty());
    }

    #[test]
    fn test_print_response_message_optional() {
        let ok: PrintResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(ok.success);
        assert_eq!(ok.msg, None);
        let failed: PrintResponse =
            serde_json::from_str(r#"{"success":false,"msg":"printer offline"}"#).unwrap();
        assert_eq!(failed.msg.as_deref(), Some("printer offline"));
    }

    #[test]
    fn test_missing_pages_is_malformed() {
        assert!(serde_json::from_str::<PlacementResponse>(r#"{"placed":[]}"#).is_err());
    }
}
