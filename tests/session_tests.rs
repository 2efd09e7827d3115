//! Label session tests
//!
//! Operator flows end to end: mutation, sync request, response, page
//! selection, navigation, and the print gate. The placement service is
//! played by `common::place`.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;
mod fixtures;

use common::*;
use labelview::model::{NavAction, SyncState};
use labelview::sync::{PrintState, GENERIC_PRINT_FAILURE, START_NO};
use labelview::{GridPos, LabelError, LabelSession, Repaint, SyncOutcome};

#[test]
fn test_two_by_two_sheet_with_five_codes() {
    let mut session = session(2, 2, 5);
    let mutation = session.click(0, 0, 0, false).unwrap();
    let call = mutation.sync.unwrap();
    assert_eq!(call.request.start_no, START_NO);
    assert_eq!(call.request.start_index, 0);
    assert!(call.request.skip_indices.is_empty());
    assert_eq!(call.request.codes.len(), 5);

    let answer = response(2, &[(0, "A"), (1, "B"), (2, "C"), (3, "D"), (4, "E")]);
    let outcome = session.apply_sync(call.ticket, &answer);
    assert!(matches!(
        outcome,
        SyncOutcome::Applied {
            repaint: Repaint::Full,
            ..
        }
    ));

    assert_eq!(session.model().placed_len(), 5);
    assert_eq!(session.grid().to_grid(4), GridPos::new(1, 0, 0));
    assert_eq!(session.rendered_pages(), 2);
    assert!(session.pager().nav_visible());

    assert_eq!(session.pager().current(), 0);
    assert!(session.pager().has_next());
    assert!(!session.pager().has_prev());

    assert!(session.navigate(NavAction::Next));
    assert_eq!(session.pager().current(), 1);
    assert!(!session.pager().has_next());
    assert!(session.pager().has_prev());
    assert_eq!(session.paint_current().cell(4).unwrap().code.as_deref(), Some("E"));
}

#[test]
fn test_navigation_clamps_to_page_count() {
    let mut session = session(2, 2, 9);
    let mutation = session.set_start(0).unwrap();
    sync(&mut session, mutation);
    assert_eq!(session.model().pages(), 3);

    assert_eq!(session.go_to_page(5), 2);
    assert_eq!(session.go_to_page(-1), 0);
}

#[test]
fn test_sync_without_codes_fails_locally() {
    let mut session = LabelSession::new(SheetBuilder::new().grid(2, 2).build()).unwrap();
    let err = session.set_start(0).unwrap_err();
    assert!(matches!(err, LabelError::ConfigurationMissing(_)));
}

#[test]
fn test_empty_code_list_is_fatal() {
    let mut session = LabelSession::new(SheetBuilder::new().build()).unwrap();
    let err = session.load_codes(codes(0)).unwrap_err();
    assert!(matches!(err, LabelError::ConfigurationMissing(_)));
    assert!(session.codes().is_none());
}

#[test]
fn test_stale_response_is_discarded() {
    let mut session = session(2, 2, 3);
    let first = session.set_start(0).unwrap().sync.unwrap();
    let second = session.toggle_skip(1).unwrap().sync.unwrap();
    assert!(second.ticket > first.ticket);

    // Newest answer lands first, then the older one arrives late.
    let fresh = place(&second.request, 4);
    assert!(matches!(
        session.apply_sync(second.ticket, &fresh),
        SyncOutcome::Applied { .. }
    ));
    let late = place(&first.request, 4);
    assert_eq!(session.apply_sync(first.ticket, &late), SyncOutcome::Stale);

    assert_eq!(session.model().code_at(1), None);
    assert_eq!(session.model().code_at(3), Some("250822_BB_3"));
}

#[test]
fn test_stale_failure_is_not_surfaced() {
    let mut session = session(2, 2, 3);
    let first = session.set_start(0).unwrap().sync.unwrap();
    let second = session.toggle_skip(2).unwrap().sync.unwrap();
    let err = LabelError::Network("HTTP 502".to_string());
    assert!(!session.sync_failed(first.ticket, &err));
    assert!(session.sync_failed(second.ticket, &err));
}

#[test]
fn test_failed_sync_leaves_state_unchanged() {
    let mut session = session(2, 2, 3);
    let mutation = session.set_start(0).unwrap();
    sync(&mut session, mutation);
    let placed_before: Vec<_> = session.model().placed().map(|(i, c)| (i, c.to_string())).collect();

    let call = session.toggle_skip(0).unwrap().sync.unwrap();
    session.sync_failed(call.ticket, &LabelError::Network("timeout".to_string()));

    let placed_after: Vec<_> = session.model().placed().map(|(i, c)| (i, c.to_string())).collect();
    assert_eq!(placed_before, placed_after);
    assert!(session.model().is_skipped(0));
    assert_eq!(session.model().state(), SyncState::AwaitingSync);
}

#[test]
fn test_sync_returns_to_last_action_page() {
    let mut session = session(2, 2, 10);
    let mutation = session.set_start(0).unwrap();
    sync(&mut session, mutation);
    assert_eq!(session.model().pages(), 3);

    session.go_to_page(1);
    let mutation = session.click(1, 1, 0, false).unwrap();
    sync(&mut session, mutation);
    assert_eq!(session.pager().current(), 1);

    // Viewing page 0 while the response for a page-2 edit is in flight.
    let mutation = session.toggle_skip(9).unwrap();
    session.go_to_page(0);
    sync(&mut session, mutation);
    assert_eq!(session.pager().current(), 2);
}

fn page_changed(outcome: SyncOutcome) -> bool {
    match outcome {
        SyncOutcome::Applied { page_changed, .. } => page_changed,
        SyncOutcome::Stale => panic!("sync should have applied"),
    }
}

#[test]
fn test_sync_reports_page_change_only_when_pager_moves() {
    let mut session = session(2, 2, 10);
    let mutation = session.set_start(0).unwrap();
    assert!(!page_changed(sync(&mut session, mutation)));

    // Edit on the page being viewed: the view stays put.
    session.go_to_page(1);
    let mutation = session.toggle_skip(5).unwrap();
    assert!(!page_changed(sync(&mut session, mutation)));
    assert_eq!(session.pager().current(), 1);

    // Navigated away while the response was in flight.
    let mutation = session.toggle_skip(5).unwrap();
    session.go_to_page(0);
    assert!(page_changed(sync(&mut session, mutation)));
    assert_eq!(session.pager().current(), 1);
}

#[test]
fn test_reset_invalidates_in_flight_sync() {
    let mut session = session(2, 2, 5);
    assert!(session.toggle_skip(0).is_err());
    let call = session.set_start(1).unwrap().sync.unwrap();
    session.wheel(-100.0, true);

    assert_eq!(session.reset_start(), Repaint::Full);
    assert_eq!(session.viewport().user_zoom, 1.0);

    let late = place(&call.request, 4);
    assert_eq!(session.apply_sync(call.ticket, &late), SyncOutcome::Stale);
    assert_eq!(session.model().placed_len(), 0);
    assert_eq!(session.model().pages(), 1);
    assert_eq!(session.pager().current(), 0);
    assert!(!session.pager().nav_visible());
}

#[test]
fn test_reset_then_start_again_keeps_skips_in_request() {
    let mut session = session(2, 2, 3);
    let mutation = session.set_start(0).unwrap();
    sync(&mut session, mutation);
    let mutation = session.toggle_skip(2).unwrap();
    sync(&mut session, mutation);

    session.reset_start();
    let call = session.click(0, 0, 1, false).unwrap().sync.unwrap();
    assert_eq!(call.request.start_index, 1);
    assert_eq!(call.request.skip_indices, vec![2]);
}

#[test]
fn test_clear_skips_without_start_does_nothing() {
    let mut session = session(2, 2, 3);
    let mutation = session.clear_skips().unwrap();
    assert_eq!(mutation.repaint, Repaint::None);
    assert!(mutation.sync.is_none());
}

#[test]
fn test_clear_skips_with_start_resyncs() {
    let mut session = session(2, 2, 3);
    let mutation = session.set_start(0).unwrap();
    sync(&mut session, mutation);
    session.toggle_range(0, 3).unwrap();

    let mutation = session.clear_skips().unwrap();
    let call = mutation.sync.as_ref().unwrap();
    assert!(call.request.skip_indices.is_empty());
    assert_eq!(session.model().start(), Some(0));
    sync(&mut session, mutation);
    assert_eq!(session.model().placed_len(), 3);
}

#[test]
fn test_click_off_grid_is_rejected() {
    let mut session = session(2, 2, 3);
    assert!(matches!(
        session.click(0, 2, 0, false),
        Err(LabelError::OutOfGrid { .. })
    ));
    assert_eq!(session.model().start(), None);
}

#[test]
fn test_arrow_keys_ignored_in_text_input() {
    let mut session = session(2, 2, 9);
    let mutation = session.set_start(0).unwrap();
    sync(&mut session, mutation);

    assert!(!session.handle_key("ArrowRight", true));
    assert_eq!(session.pager().current(), 0);
    assert!(session.handle_key("ArrowRight", false));
    assert!(session.handle_key("ArrowRight", false));
    assert!(!session.handle_key("ArrowRight", false));
    assert!(session.handle_key("ArrowLeft", false));
    assert!(!session.handle_key("Enter", false));
    assert_eq!(session.pager().current(), 1);
}

#[test]
fn test_status_line_reports_progress() {
    let mut session = session(2, 2, 5);
    assert!(session.status_line().starts_with("Click a label"));
    let mutation = session.set_start(0).unwrap();
    sync(&mut session, mutation);
    assert_eq!(
        session.status_line(),
        "Page 1 / 2 | start 1 | 5 placed | 0 skipped"
    );
}

#[test]
fn test_print_requires_start() {
    let mut session = session(2, 2, 3);
    assert!(matches!(
        session.print_request(),
        Err(LabelError::InvalidState(_))
    ));
    assert!(session.print_gate().can_print());
}

#[test]
fn test_print_requires_loaded_codes() {
    let mut session = LabelSession::new(SheetBuilder::new().grid(2, 2).build()).unwrap();
    // The start is recorded even though the preview request cannot be built.
    assert!(session.set_start(0).is_err());
    assert_eq!(session.model().start(), Some(0));

    assert!(matches!(
        session.print_request(),
        Err(LabelError::ConfigurationMissing(_))
    ));
    assert!(session.print_gate().can_print());
    assert_eq!(session.print_gate().state(), PrintState::Idle);
}

#[test]
fn test_print_gate_blocks_duplicates_until_acknowledged() {
    let mut session = session(2, 2, 3);
    let mutation = session.set_start(0).unwrap();
    sync(&mut session, mutation);

    let request = session.print_request().unwrap();
    assert_eq!(request.codes.len(), 3);
    assert_eq!(session.print_gate().state(), PrintState::Submitting);
    assert!(session.print_request().is_err());

    session.finish_print(&print_ok()).unwrap();
    assert_eq!(session.print_gate().state(), PrintState::AwaitingAck);
    assert!(session.print_request().is_err());

    session.acknowledge_print();
    assert!(session.print_gate().can_print());
    assert!(session.print_request().is_ok());
}

#[test]
fn test_print_refusal_reenables_trigger() {
    let mut session = session(2, 2, 3);
    let mutation = session.set_start(0).unwrap();
    sync(&mut session, mutation);

    session.print_request().unwrap();
    let err = session
        .finish_print(&print_refused(Some("printer offline")))
        .unwrap_err();
    assert!(err.to_string().contains("printer offline"));
    assert!(session.print_gate().can_print());

    session.print_request().unwrap();
    let err = session.finish_print(&print_refused(None)).unwrap_err();
    assert!(err.to_string().contains(GENERIC_PRINT_FAILURE));
}

#[test]
fn test_print_transport_failure_reenables_trigger() {
    let mut session = session(2, 2, 3);
    let mutation = session.set_start(0).unwrap();
    sync(&mut session, mutation);

    session.print_request().unwrap();
    let err = session.print_failed(&LabelError::Network("HTTP 500".to_string()));
    assert!(matches!(err, LabelError::Print(_)));
    assert_eq!(session.print_gate().state(), PrintState::Idle);
}
