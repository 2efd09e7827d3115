//! Main LabelView struct - the primary entry point for the browser.
//!
//! This module provides the WASM-exported `LabelView` struct that handles:
//! - Loading the code sequence for the configured token
//! - Owning the label session and the mounted DOM
//! - Wiring click, keyboard, wheel, and resize events
//! - Issuing preview and print requests
//!
//! Event handlers are registered when the viewer is created; no manual
//! JavaScript wiring is required beyond calling `load()`.

mod events;
mod net;

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Promise;
use log::{error, LevelFilter};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use web_sys::{AddEventListenerOptions, Event, HtmlElement, KeyboardEvent, MouseEvent, WheelEvent};

use crate::config::ViewerConfig;
use crate::error::LabelError;
use crate::render::dom::DomSurface;
use crate::session::{LabelSession, Repaint};

/// Shared state that can be accessed by event handlers.
pub(crate) struct SharedState {
    pub(crate) session: LabelSession,
    pub(crate) dom: DomSurface,
    pub(crate) loaded: bool,
}

impl SharedState {
    /// Bring the DOM in line with the session.
    pub(crate) fn repaint(&mut self, repaint: Repaint) {
        let result = match repaint {
            Repaint::None => Ok(()),
            Repaint::Cells => self.dom.paint(&self.session),
            Repaint::Full => self.dom.rebuild(&self.session),
        };
        if let Err(e) = result {
            error!("repaint failed: {e}");
        }
    }
}

/// Blocking alert plus a console diagnostic.
pub(crate) fn alert(err: &LabelError) {
    error!("{err}");
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(&err.to_string());
    }
}

pub(crate) fn window_height() -> Option<f64> {
    web_sys::window()?.inner_height().ok()?.as_f64()
}

/// The main viewer struct exported to JavaScript
#[wasm_bindgen]
pub struct LabelView {
    state: Rc<RefCell<SharedState>>,
    #[allow(dead_code)]
    click_closure: Closure<dyn FnMut(MouseEvent)>,
    #[allow(dead_code)]
    key_closure: Closure<dyn FnMut(KeyboardEvent)>,
    #[allow(dead_code)]
    wheel_closure: Closure<dyn FnMut(WheelEvent)>,
    #[allow(dead_code)]
    resize_closure: Closure<dyn FnMut(Event)>,
}

#[wasm_bindgen]
impl LabelView {
    /// Create a viewer inside `root` from a configuration object.
    ///
    /// The UI stays hidden until `load()` succeeds.
    #[wasm_bindgen(constructor)]
    pub fn new(root: HtmlElement, config: JsValue) -> std::result::Result<LabelView, JsValue> {
        console_error_panic_hook::set_once();
        crate::logging::init(LevelFilter::Debug);

        let config: ViewerConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid configuration: {e}")))?;
        let mut session = LabelSession::new(config)?;
        if let Some(height) = window_height() {
            session.resize(height);
        }
        let dom = DomSurface::mount(&root)?;

        let state = Rc::new(RefCell::new(SharedState {
            session,
            dom,
            loaded: false,
        }));

        // Slot clicks and toolbar buttons share one delegated listener.
        let click_closure = {
            let state = state.clone();
            Closure::wrap(Box::new(move |event: MouseEvent| {
                Self::internal_click(&state, &event);
            }) as Box<dyn FnMut(MouseEvent)>)
        };
        root.add_event_listener_with_callback("click", click_closure.as_ref().unchecked_ref())
            .ok();

        let key_closure = {
            let state = state.clone();
            Closure::wrap(Box::new(move |event: KeyboardEvent| {
                if Self::internal_key_down(&state, &event) {
                    event.prevent_default();
                }
            }) as Box<dyn FnMut(KeyboardEvent)>)
        };
        if let Some(document) = root.owner_document() {
            document
                .add_event_listener_with_callback("keydown", key_closure.as_ref().unchecked_ref())
                .ok();
        }

        // Non-passive so modifier+wheel can suppress browser page zoom.
        let wheel_closure = {
            let state = state.clone();
            Closure::wrap(Box::new(move |event: WheelEvent| {
                if Self::internal_wheel(&state, &event) {
                    event.prevent_default();
                }
            }) as Box<dyn FnMut(WheelEvent)>)
        };
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        root.add_event_listener_with_callback_and_add_event_listener_options(
            "wheel",
            wheel_closure.as_ref().unchecked_ref(),
            &options,
        )
        .ok();

        let resize_closure = {
            let state = state.clone();
            Closure::wrap(Box::new(move |_event: Event| {
                Self::internal_resize(&state);
            }) as Box<dyn FnMut(Event)>)
        };
        if let Some(window) = web_sys::window() {
            window
                .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())
                .ok();
        }

        Ok(LabelView {
            state,
            click_closure,
            key_closure,
            wheel_closure,
            resize_closure,
        })
    }

    /// Fetch the code sequence and reveal the placement UI.
    ///
    /// A missing token or an empty code list rejects the promise after a
    /// blocking alert; no partial UI is shown.
    pub fn load(&self) -> Promise {
        let state = self.state.clone();
        future_to_promise(async move {
            match Self::load_codes(&state).await {
                Ok(count) => Ok(JsValue::from(count)),
                Err(e) => {
                    alert(&e);
                    Err(e.into())
                }
            }
        })
    }

    #[wasm_bindgen(js_name = "nextPage")]
    pub fn next_page(&self) {
        Self::internal_navigate(&self.state, crate::model::NavAction::Next);
    }

    #[wasm_bindgen(js_name = "prevPage")]
    pub fn prev_page(&self) {
        Self::internal_navigate(&self.state, crate::model::NavAction::Prev);
    }

    #[wasm_bindgen(js_name = "clearSkips")]
    pub fn clear_skips(&self) {
        Self::internal_clear_skips(&self.state);
    }

    #[wasm_bindgen(js_name = "resetStart")]
    pub fn reset_start(&self) {
        Self::internal_reset_start(&self.state);
    }

    pub fn print(&self) {
        Self::internal_print(&self.state);
    }

    #[wasm_bindgen(js_name = "pageCount")]
    pub fn page_count(&self) -> u32 {
        self.state.borrow().session.model().pages()
    }

    #[wasm_bindgen(js_name = "currentPage")]
    pub fn current_page(&self) -> u32 {
        self.state.borrow().session.pager().current()
    }

    #[wasm_bindgen(js_name = "renderScale")]
    pub fn render_scale(&self) -> f64 {
        self.state.borrow().session.scale()
    }

    pub fn status(&self) -> String {
        self.state.borrow().session.status_line()
    }
}
