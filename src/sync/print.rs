//! Print submission gate.
//!
//! A print job is fire-and-forget. After a successful submission the trigger
//! stays disabled until the operator dismisses the completion dialog, so
//! rapid repeated clicks cannot submit the same sheet twice.

use log::{error, info};

use super::protocol::PrintResponse;
use crate::error::{LabelError, Result};

/// Shown when the print service fails without a message.
pub const GENERIC_PRINT_FAILURE: &str = "print request failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrintState {
    #[default]
    Idle,
    Submitting,
    AwaitingAck,
}

#[derive(Debug, Clone, Default)]
pub struct PrintGate {
    state: PrintState,
}

impl PrintGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PrintState {
        self.state
    }

    /// Whether the print trigger should be enabled.
    pub fn can_print(&self) -> bool {
        self.state == PrintState::Idle
    }

    /// Claim the gate for a submission. Returns `false` if one is already
    /// in flight or awaiting acknowledgment.
    pub fn begin(&mut self) -> bool {
        if self.state != PrintState::Idle {
            return false;
        }
        self.state = PrintState::Submitting;
        true
    }

    /// Apply the print service response.
    pub fn finish(&mut self, response: &PrintResponse) -> Result<()> {
        if response.success {
            info!("print job accepted");
            self.state = PrintState::AwaitingAck;
            return Ok(());
        }
        let msg = response
            .msg
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(GENERIC_PRINT_FAILURE)
            .to_string();
        Err(self.fail(msg))
    }

    /// Transport-level failure: re-enable the trigger and surface `msg`.
    pub fn fail(&mut self, msg: String) -> LabelError {
        error!("print failed: {msg}");
        self.state = PrintState::Idle;
        LabelError::Print(msg)
    }

    /// Dismiss the completion dialog.
    pub fn acknowledge(&mut self) {
        if self.state == PrintState::AwaitingAck {
            self.state = PrintState::Idle;
        }
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
    fn test_success_blocks_until_acknowledged() {
        let mut gate = PrintGate::new();
        assert!(gate.begin());
        assert!(!gate.begin());
        gate.finish(&PrintResponse {
            success: true,
            msg: None,
        })
        .unwrap();
        assert_eq!(gate.state(), PrintState::AwaitingAck);
        assert!(!gate.begin());
        gate.acknowledge();
        assert!(gate.can_print());
    }

    #[test]
    fn test_failure_reenables_with_server_message() {
        let mut gate = PrintGate::new();
        gate.begin();
        let err = gate
            .finish(&PrintResponse {
                success: false,
                msg: Some("paper jam".to_string()),
            })
            .unwrap_err();
        assert_eq!(err.to_string(), "Print failed: paper jam");
        assert!(gate.can_print());
    }

    #[test]
    fn test_failure_without_message_uses_fallback() {
        let mut gate = PrintGate::new();
        gate.begin();
        let err = gate
            .finish(&PrintResponse {
                success: false,
                msg: Some(String::new()),
            })
            .unwrap_err();
        assert!(err.to_string().contains(GENERIC_PRINT_FAILURE));
    }

    #[test]
    fn test_acknowledge_is_ignored_while_submitting() {
        let mut gate = PrintGate::new();
        gate.begin();
        gate.acknowledge();
        assert_eq!(gate.state(), PrintState::Submitting);
    }
}
