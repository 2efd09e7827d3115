//! Click, keyboard, wheel, and resize handlers for `LabelView`.
//!
//! All methods here are `pub(crate)` helpers called from the closures and
//! the wasm-exported API in `mod.rs`. Each handler runs to completion,
//! including issuing its async request, before the next event is processed.

use std::cell::RefCell;
use std::rc::Rc;

use log::info;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{KeyboardEvent, MouseEvent, WheelEvent};

use super::{alert, net, window_height, LabelView, SharedState};
use crate::error::{LabelError, Result};
use crate::model::NavAction;
use crate::render::dom::{click_target, is_text_input, ClickTarget, UiAction};
use crate::session::{Mutation, Repaint, SyncCall, SyncOutcome};
use crate::sync::{CodesResponse, PlacementResponse, PrintResponse};

impl LabelView {
    pub(crate) async fn load_codes(state: &Rc<RefCell<SharedState>>) -> Result<u32> {
        let url = {
            let s = state.borrow();
            let token = s.session.config().require_token()?;
            let encoded = String::from(js_sys::encode_uri_component(token));
            s.session.config().codes_url(&encoded)
        };
        let response: CodesResponse = net::get_json(&url).await?;
        let mut guard = state.borrow_mut();
        let s = &mut *guard;
        let count = s.session.load_codes(response)?;
        s.loaded = true;
        s.dom.rebuild(&s.session)?;
        s.dom.show();
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    pub(crate) fn internal_click(state: &Rc<RefCell<SharedState>>, event: &MouseEvent) {
        if !state.borrow().loaded {
            return;
        }
        match click_target(event.target()) {
            Some(ClickTarget::Slot { page, row, col }) => {
                let result = state
                    .borrow_mut()
                    .session
                    .click(page, row, col, event.shift_key());
                Self::after_mutation(state, result);
            }
            Some(ClickTarget::Action(action)) => match action {
                UiAction::Prev => Self::internal_navigate(state, NavAction::Prev),
                UiAction::Next => Self::internal_navigate(state, NavAction::Next),
                UiAction::ClearSkips => Self::internal_clear_skips(state),
                UiAction::ResetStart => Self::internal_reset_start(state),
                UiAction::Print => Self::internal_print(state),
            },
            None => {}
        }
    }

    /// Repaint after a local mutation and send its sync request, if any.
    fn after_mutation(state: &Rc<RefCell<SharedState>>, result: Result<Mutation>) {
        let call = {
            let mut s = state.borrow_mut();
            match result {
                Ok(mutation) => {
                    s.repaint(mutation.repaint);
                    mutation.sync
                }
                Err(e) => {
                    // Local mutation may have been applied before the failure.
                    s.repaint(Repaint::Cells);
                    drop(s);
                    alert(&e);
                    None
                }
            }
        };
        if let Some(call) = call {
            Self::spawn_sync(state, call);
        }
    }

    fn spawn_sync(state: &Rc<RefCell<SharedState>>, call: SyncCall) {
        let url = state.borrow().session.config().preview_url();
        let state = state.clone();
        spawn_local(async move {
            let result: Result<PlacementResponse> = net::post_json(&url, &call.request).await;
            let mut s = state.borrow_mut();
            match result {
                Ok(response) => match s.session.apply_sync(call.ticket, &response) {
                    SyncOutcome::Applied {
                        repaint,
                        page_changed,
                        ..
                    } => {
                        s.repaint(repaint);
                        if page_changed {
                            s.dom.scroll_to_top();
                        }
                    }
                    SyncOutcome::Stale => {}
                },
                Err(e) => {
                    if s.session.sync_failed(call.ticket, &e) {
                        drop(s);
                        alert(&e);
                    }
                }
            }
        });
    }

    pub(crate) fn internal_navigate(state: &Rc<RefCell<SharedState>>, action: NavAction) {
        let mut s = state.borrow_mut();
        if s.session.navigate(action) {
            s.dom.scroll_to_top();
            s.repaint(Repaint::Cells);
        }
    }

    pub(crate) fn internal_key_down(
        state: &Rc<RefCell<SharedState>>,
        event: &KeyboardEvent,
    ) -> bool {
        let in_text_input = is_text_input(event.target());
        let mut s = state.borrow_mut();
        if !s.loaded || !s.session.handle_key(&event.key(), in_text_input) {
            return false;
        }
        s.dom.scroll_to_top();
        s.repaint(Repaint::Cells);
        true
    }

    pub(crate) fn internal_wheel(state: &Rc<RefCell<SharedState>>, event: &WheelEvent) -> bool {
        let modifier = event.ctrl_key() || event.meta_key();
        let mut s = state.borrow_mut();
        if !s.session.wheel(event.delta_y(), modifier) {
            return false;
        }
        s.repaint(Repaint::Cells);
        true
    }

    pub(crate) fn internal_resize(state: &Rc<RefCell<SharedState>>) {
        let Some(height) = window_height() else {
            return;
        };
        let mut s = state.borrow_mut();
        s.session.resize(height);
        s.repaint(Repaint::Cells);
    }

    pub(crate) fn internal_clear_skips(state: &Rc<RefCell<SharedState>>) {
        let result = state.borrow_mut().session.clear_skips();
        Self::after_mutation(state, result);
    }

    pub(crate) fn internal_reset_start(state: &Rc<RefCell<SharedState>>) {
        let mut s = state.borrow_mut();
        let repaint = s.session.reset_start();
        s.dom.scroll_to_top();
        s.repaint(repaint);
    }

    pub(crate) fn internal_print(state: &Rc<RefCell<SharedState>>) {
        let (url, request) = {
            let mut s = state.borrow_mut();
            match s.session.print_request() {
                Ok(request) => {
                    s.dom.set_print_enabled(false);
                    (s.session.config().print_url(), request)
                }
                Err(e) => {
                    drop(s);
                    alert(&e);
                    return;
                }
            }
        };
        let state = state.clone();
        spawn_local(async move {
            let result: Result<PrintResponse> = net::post_json(&url, &request).await;
            let outcome = {
                let mut s = state.borrow_mut();
                let outcome = match result {
                    Ok(response) => s.session.finish_print(&response),
                    Err(e) => Err(s.session.print_failed(&e)),
                };
                if outcome.is_err() {
                    s.repaint(Repaint::Cells);
                }
                outcome
            };
            match outcome {
                Ok(()) => Self::show_print_complete(&state),
                Err(e) => alert(&e),
            }
        });
    }

    /// Completion dialog; dismissing it acknowledges the job and tries to
    /// close the window, blanking the page if the browser refuses.
    fn show_print_complete(state: &Rc<RefCell<SharedState>>) {
        let modal = state.borrow().dom.show_print_modal();
        let (overlay, ok) = match modal {
            Ok(parts) => parts,
            Err(e) => {
                alert(&e);
                return;
            }
        };
        info!("print complete, awaiting acknowledgment");
        let state = state.clone();
        let on_ok = Closure::once_into_js(move || {
            overlay.remove();
            let mut s = state.borrow_mut();
            s.session.acknowledge_print();
            s.repaint(Repaint::Cells);
            let closed = web_sys::window().is_some_and(|window| {
                let _ = window.close();
                window.closed().unwrap_or(false)
            });
            if !closed {
                s.dom.blank_page();
            }
        });
        if ok
            .add_event_listener_with_callback("click", on_ok.unchecked_ref())
            .is_err()
        {
            alert(&LabelError::InvalidState(
                "could not bind the print dialog".to_string(),
            ));
        }
    }
}
