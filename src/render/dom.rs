//! DOM backend: builds page subtrees and repaints cell decoration in place.
//!
//! Every cell element carries `data-page`, `data-row`, and `data-col`, so a
//! click resolves to a slot through the grid algebra alone. Toolbar and
//! navigation buttons carry a `data-action` attribute instead.

use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, EventTarget, HtmlButtonElement, HtmlDivElement, HtmlElement, Node,
};

use super::{CellPaint, PagePaint};
use crate::error::{LabelError, Result};
use crate::layout::Marker;
use crate::model::Pager;
use crate::session::LabelSession;

/// Toolbar/navigation actions, as written into `data-action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Prev,
    Next,
    ClearSkips,
    ResetStart,
    Print,
}

impl UiAction {
    fn as_attr(self) -> &'static str {
        match self {
            Self::Prev => "prev",
            Self::Next => "next",
            Self::ClearSkips => "clear-skips",
            Self::ResetStart => "reset-start",
            Self::Print => "print",
        }
    }

    fn from_attr(value: &str) -> Option<Self> {
        match value {
            "prev" => Some(Self::Prev),
            "next" => Some(Self::Next),
            "clear-skips" => Some(Self::ClearSkips),
            "reset-start" => Some(Self::ResetStart),
            "print" => Some(Self::Print),
            _ => None,
        }
    }
}

/// What a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Slot { page: u32, row: u32, col: u32 },
    Action(UiAction),
}

fn dom_err(value: JsValue) -> LabelError {
    LabelError::InvalidState(
        value
            .as_string()
            .unwrap_or_else(|| format!("DOM error: {value:?}")),
    )
}

fn px(value: f64) -> String {
    format!("{value:.2}px")
}

fn parse_attr(element: &Element, name: &str) -> Option<u32> {
    element.get_attribute(name)?.parse().ok()
}

/// Resolve a click's event target to a slot or an action.
pub fn click_target(target: Option<EventTarget>) -> Option<ClickTarget> {
    let element = target?.dyn_into::<Element>().ok()?;
    if let Some(button) = element.closest("[data-action]").ok().flatten() {
        let action = button.get_attribute("data-action")?;
        return UiAction::from_attr(&action).map(ClickTarget::Action);
    }
    let cell = element.closest(".label-cell").ok().flatten()?;
    Some(ClickTarget::Slot {
        page: parse_attr(&cell, "data-page")?,
        row: parse_attr(&cell, "data-row")?,
        col: parse_attr(&cell, "data-col")?,
    })
}

/// Whether keyboard focus is in a text field.
pub fn is_text_input(target: Option<EventTarget>) -> bool {
    let Some(element) = target.and_then(|t| t.dyn_into::<HtmlElement>().ok()) else {
        return false;
    };
    matches!(
        element.tag_name().to_ascii_uppercase().as_str(),
        "INPUT" | "TEXTAREA" | "SELECT"
    ) || element.is_content_editable()
}

struct PageNodes {
    root: HtmlDivElement,
    cells: Vec<HtmlDivElement>,
    col_markers: Vec<HtmlDivElement>,
    row_markers: Vec<HtmlDivElement>,
}

/// Mounted toolbar, navigation, and preview surface.
pub struct DomSurface {
    document: Document,
    container: HtmlDivElement,
    status: HtmlDivElement,
    nav: HtmlDivElement,
    page_label: HtmlDivElement,
    prev: HtmlButtonElement,
    next: HtmlButtonElement,
    print: HtmlButtonElement,
    surface: HtmlDivElement,
    pages: Vec<PageNodes>,
}

impl DomSurface {
    /// Build the chrome inside `root`. The container stays hidden until
    /// [`DomSurface::show`] so that a failed load leaves no partial UI.
    pub fn mount(root: &HtmlElement) -> Result<Self> {
        let document = root
            .owner_document()
            .ok_or_else(|| LabelError::InvalidState("root is not attached to a document".into()))?;
        let div = |class: &str| -> Result<HtmlDivElement> {
            let el = document
                .create_element("div")
                .map_err(dom_err)?
                .dyn_into::<HtmlDivElement>()
                .map_err(|_| LabelError::InvalidState("div is not an HtmlDivElement".into()))?;
            el.set_class_name(class);
            Ok(el)
        };
        let button = |action: UiAction, text: &str| -> Result<HtmlButtonElement> {
            let el = document
                .create_element("button")
                .map_err(dom_err)?
                .dyn_into::<HtmlButtonElement>()
                .map_err(|_| LabelError::InvalidState("button is not an HtmlButtonElement".into()))?;
            el.set_type("button");
            el.set_text_content(Some(text));
            el.set_attribute("data-action", action.as_attr())
                .map_err(dom_err)?;
            Ok(el)
        };

        let container = div("labelview")?;
        container.set_hidden(true);

        let toolbar = div("labelview-toolbar")?;
        let status = div("labelview-status")?;
        let clear = button(UiAction::ClearSkips, "Clear skips")?;
        let reset = button(UiAction::ResetStart, "Reset start")?;
        let print = button(UiAction::Print, "Print")?;
        let toolbar_children: [&Node; 4] = [&status, &clear, &reset, &print];
        for child in toolbar_children {
            toolbar.append_child(child).map_err(dom_err)?;
        }

        let nav = div("labelview-nav")?;
        let prev = button(UiAction::Prev, "\u{2039} Prev")?;
        let page_label = div("labelview-page-label")?;
        let next = button(UiAction::Next, "Next \u{203a}")?;
        let nav_children: [&Node; 3] = [&prev, &page_label, &next];
        for child in nav_children {
            nav.append_child(child).map_err(dom_err)?;
        }

        let surface = div("labelview-surface")?;
        let style = surface.style();
        style.set_property("overflow", "auto").map_err(dom_err)?;
        style.set_property("position", "relative").map_err(dom_err)?;

        let sections: [&Node; 3] = [&toolbar, &nav, &surface];
        for child in sections {
            container.append_child(child).map_err(dom_err)?;
        }
        root.append_child(&container).map_err(dom_err)?;

        Ok(Self {
            document,
            container,
            status,
            nav,
            page_label,
            prev,
            next,
            print,
            surface,
            pages: Vec::new(),
        })
    }

    pub fn show(&self) {
        self.container.set_hidden(false);
    }

    pub fn container(&self) -> &HtmlDivElement {
        &self.container
    }

    pub fn surface(&self) -> &HtmlDivElement {
        &self.surface
    }

    fn create_div(&self, class: &str) -> Result<HtmlDivElement> {
        let el = self
            .document
            .create_element("div")
            .map_err(dom_err)?
            .dyn_into::<HtmlDivElement>()
            .map_err(|_| LabelError::InvalidState("div is not an HtmlDivElement".into()))?;
        el.set_class_name(class);
        Ok(el)
    }

    fn build_page(&self, plan: &PagePaint) -> Result<PageNodes> {
        let root = self.create_div("label-page")?;
        root.set_attribute("data-page", &plan.page.to_string())
            .map_err(dom_err)?;
        root.style()
            .set_property("position", "relative")
            .map_err(dom_err)?;

        let mut cells = Vec::with_capacity(plan.cells.len());
        for cell in &plan.cells {
            let el = self.create_div("label-cell")?;
            el.set_attribute("data-index", &cell.index.to_string())
                .map_err(dom_err)?;
            el.set_attribute("data-page", &cell.pos.page.to_string())
                .map_err(dom_err)?;
            el.set_attribute("data-row", &cell.pos.row.to_string())
                .map_err(dom_err)?;
            el.set_attribute("data-col", &cell.pos.col.to_string())
                .map_err(dom_err)?;
            el.style()
                .set_property("position", "absolute")
                .map_err(dom_err)?;
            root.append_child(&el).map_err(dom_err)?;
            cells.push(el);
        }

        let markers = |source: &[Marker], class: &str| -> Result<Vec<HtmlDivElement>> {
            let mut out = Vec::with_capacity(source.len());
            for marker in source {
                let el = self.create_div(class)?;
                el.set_text_content(Some(&marker.label));
                el.style()
                    .set_property("position", "absolute")
                    .map_err(dom_err)?;
                el.style()
                    .set_property("transform", "translate(-50%, -50%)")
                    .map_err(dom_err)?;
                root.append_child(&el).map_err(dom_err)?;
                out.push(el);
            }
            Ok(out)
        };
        let col_markers = markers(&plan.column_markers, "label-marker label-marker-col")?;
        let row_markers = markers(&plan.row_markers, "label-marker label-marker-row")?;

        self.surface.append_child(&root).map_err(dom_err)?;
        Ok(PageNodes {
            root,
            cells,
            col_markers,
            row_markers,
        })
    }

    /// Throw away every page subtree and build one per page.
    pub fn rebuild(&mut self, session: &LabelSession) -> Result<()> {
        self.surface.set_inner_html("");
        self.pages.clear();
        for page in 0..session.rendered_pages() {
            let nodes = self.build_page(&session.paint(page))?;
            self.pages.push(nodes);
        }
        self.paint(session)
    }

    fn paint_cell(el: &HtmlDivElement, cell: &CellPaint) -> Result<()> {
        el.set_class_name(&cell.class_name());
        el.set_text_content(cell.code.as_deref());
        let style = el.style();
        style.set_property("left", &px(cell.rect.x)).map_err(dom_err)?;
        style.set_property("top", &px(cell.rect.y)).map_err(dom_err)?;
        style
            .set_property("width", &px(cell.rect.width))
            .map_err(dom_err)?;
        style
            .set_property("height", &px(cell.rect.height))
            .map_err(dom_err)?;
        style
            .set_property("border-radius", &px(cell.rect.radius))
            .map_err(dom_err)?;
        Ok(())
    }

    fn place_markers(nodes: &[HtmlDivElement], markers: &[Marker]) -> Result<()> {
        for (el, marker) in nodes.iter().zip(markers) {
            let style = el.style();
            style.set_property("left", &px(marker.x)).map_err(dom_err)?;
            style.set_property("top", &px(marker.y)).map_err(dom_err)?;
        }
        Ok(())
    }

    /// Show only the current page and repaint its cells at the current scale.
    pub fn paint(&self, session: &LabelSession) -> Result<()> {
        let current = session.pager().current();
        for (page, nodes) in (0u32..).zip(&self.pages) {
            nodes.root.set_hidden(page != current);
        }
        if let Some(nodes) = usize::try_from(current)
            .ok()
            .and_then(|i| self.pages.get(i))
        {
            let plan = session.paint(current);
            let style = nodes.root.style();
            style.set_property("width", &px(plan.width)).map_err(dom_err)?;
            style
                .set_property("height", &px(plan.height))
                .map_err(dom_err)?;
            for (el, cell) in nodes.cells.iter().zip(&plan.cells) {
                Self::paint_cell(el, cell)?;
            }
            Self::place_markers(&nodes.col_markers, &plan.column_markers)?;
            Self::place_markers(&nodes.row_markers, &plan.row_markers)?;
        }
        self.update_nav(session.pager());
        self.status
            .set_text_content(Some(&session.status_line()));
        self.set_print_enabled(
            session.print_gate().can_print() && session.model().start().is_some(),
        );
        Ok(())
    }

    fn update_nav(&self, pager: &Pager) {
        self.nav.set_hidden(!pager.nav_visible());
        self.prev.set_disabled(!pager.has_prev());
        self.next.set_disabled(!pager.has_next());
        self.page_label.set_text_content(Some(&format!(
            "{} / {}",
            pager.current() + 1,
            pager.pages().max(1)
        )));
    }

    pub fn set_print_enabled(&self, enabled: bool) {
        self.print.set_disabled(!enabled);
    }

    pub fn scroll_to_top(&self) {
        self.surface.set_scroll_top(0);
    }

    /// Completion dialog telling the operator to reload paper. Returns the
    /// dismiss button so the caller can bind the acknowledgment.
    pub fn show_print_modal(&self) -> Result<(HtmlDivElement, HtmlButtonElement)> {
        let overlay = self.create_div("labelview-modal")?;
        let dialog = self.create_div("labelview-modal-dialog")?;
        let message = self.create_div("labelview-modal-message")?;
        message.set_text_content(Some(
            "Print job sent. Reload label paper in the printer, then close this window.",
        ));
        let ok = self
            .document
            .create_element("button")
            .map_err(dom_err)?
            .dyn_into::<HtmlButtonElement>()
            .map_err(|_| LabelError::InvalidState("button is not an HtmlButtonElement".into()))?;
        ok.set_type("button");
        ok.set_text_content(Some("OK"));
        dialog.append_child(&message).map_err(dom_err)?;
        dialog.append_child(&ok).map_err(dom_err)?;
        overlay.append_child(&dialog).map_err(dom_err)?;
        self.container.append_child(&overlay).map_err(dom_err)?;
        Ok((overlay, ok))
    }

    /// Fallback when the window refuses to close.
    pub fn blank_page(&self) {
        if let Some(body) = self.document.body() {
            body.set_inner_html("");
        }
    }
}
