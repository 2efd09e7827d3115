//! Server sync protocol.
//!
//! Builds placement requests from the view-model, guards overlapping
//! responses with sequence tickets, and gates print submissions. The
//! transport itself lives in the viewer; everything here is pure.

mod print;
mod protocol;
mod tracker;

pub use print::{PrintGate, PrintState, GENERIC_PRINT_FAILURE};
pub use protocol::{
    CodesResponse, Placement, PlacementRequest, PlacementResponse, PrintResponse, START_NO,
};
pub use tracker::{SyncTicket, SyncTracker};

use std::sync::Arc;

use crate::error::{LabelError, Result};
use crate::model::PlacementModel;

/// Ordered item codes loaded once per session. Never reordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSequence {
    codes: Arc<[String]>,
}

impl CodeSequence {
    /// An empty list is a hard failure: no placement UI may initialize.
    pub fn new(codes: Vec<String>) -> Result<Self> {
        if codes.is_empty() {
            return Err(LabelError::ConfigurationMissing(
                "code source returned no codes".to_string(),
            ));
        }
        Ok(Self {
            codes: codes.into(),
        })
    }

    pub fn from_response(response: CodesResponse) -> Result<Self> {
        Self::new(response.codes)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.codes
    }
}

/// Build the request for the current view-model state.
///
/// Fails locally, before anything touches the network, when no codes have
/// been loaded. A missing start index is sent as 0.
pub fn build_request(
    model: &PlacementModel,
    codes: Option<&CodeSequence>,
) -> Result<PlacementRequest> {
    let codes = match codes {
        Some(codes) if !codes.is_empty() => codes,
        _ => {
            return Err(LabelError::ConfigurationMissing(
                "codes have not been loaded".to_string(),
            ))
        }
    };
    Ok(PlacementRequest {
        start_no: START_NO,
        start_index: model.start().unwrap_or(0),
        skip_indices: model.skips().collect(),
        codes: codes.as_slice().to_vec(),
    })
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
    fn test_empty_codes_rejected() {
        assert!(matches!(
            CodeSequence::new(Vec::new()),
            Err(LabelError::ConfigurationMissing(_))
        ));
    }

    #[test]
    fn test_request_carries_model_state() {
        let mut model = PlacementModel::new();
        model.set_start(2).unwrap();
        model.toggle_skip(9).unwrap();
        model.toggle_skip(4).unwrap();
        let codes = CodeSequence::new(vec!["A".into(), "B".into()]).unwrap();
        let request = build_request(&model, Some(&codes)).unwrap();
        assert_eq!(request.start_no, START_NO);
        assert_eq!(request.start_index, 2);
        assert_eq!(request.skip_indices, vec![4, 9]);
        assert_eq!(request.codes, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_request_without_codes_fails_locally() {
        let model = PlacementModel::new();
        assert!(matches!(
            build_request(&model, None),
            Err(LabelError::ConfigurationMissing(_))
        ));
    }
}
