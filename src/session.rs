//! The label-printing session: one explicit context object owned by the UI
//! root and handed to every event handler.
//!
//! Control flow for every operator action:
//! mutation → (optional) sync call → response applied → page selected → paint.
//! The session performs every step except the network round trip, which the
//! caller executes with the [`SyncCall`] it is handed.

use log::{debug, error, info, warn};

use crate::config::ViewerConfig;
use crate::error::{LabelError, Result};
use crate::grid::{GridShape, LinearIndex};
use crate::layout::{SheetGeometry, Viewport};
use crate::model::{ApplyReport, NavAction, Pager, PlacementModel, SyncDirective};
use crate::render::{paint_page, PagePaint};
use crate::sync::{
    build_request, CodeSequence, CodesResponse, PlacementRequest, PlacementResponse, PrintGate,
    PrintResponse, SyncTicket, SyncTracker,
};

/// How much of the page DOM must be redrawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repaint {
    /// Nothing visible changed.
    None,
    /// Repaint cell decoration of the visible page in place.
    Cells,
    /// Page count changed: rebuild every page subtree.
    Full,
}

/// A placement request waiting to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncCall {
    pub ticket: SyncTicket,
    pub request: PlacementRequest,
}

/// Result of a local mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation {
    pub repaint: Repaint,
    pub sync: Option<SyncCall>,
}

/// Result of handing a placement response to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Applied {
        repaint: Repaint,
        report: ApplyReport,
        /// The pager moved to a different page than the operator was viewing.
        page_changed: bool,
    },
    /// A newer request was issued after this one; the response was discarded.
    Stale,
}

#[derive(Debug, Clone)]
pub struct LabelSession {
    config: ViewerConfig,
    grid: GridShape,
    geometry: SheetGeometry,
    codes: Option<CodeSequence>,
    model: PlacementModel,
    pager: Pager,
    viewport: Viewport,
    tracker: SyncTracker,
    print: PrintGate,
}

impl LabelSession {
    pub fn new(config: ViewerConfig) -> Result<Self> {
        config.sheet.validate()?;
        let geometry = SheetGeometry::new(&config.sheet);
        let viewport = Viewport::new(geometry.page_height, config.chrome_height);
        Ok(Self {
            grid: config.sheet.grid(),
            geometry,
            codes: None,
            model: PlacementModel::new(),
            pager: Pager::new(),
            viewport,
            tracker: SyncTracker::new(),
            print: PrintGate::new(),
            config,
        })
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn grid(&self) -> GridShape {
        self.grid
    }

    pub fn geometry(&self) -> &SheetGeometry {
        &self.geometry
    }

    pub fn model(&self) -> &PlacementModel {
        &self.model
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn print_gate(&self) -> &PrintGate {
        &self.print
    }

    pub fn codes(&self) -> Option<&CodeSequence> {
        self.codes.as_ref()
    }

    /// Number of page subtrees to build; a blank page is shown while empty.
    pub fn rendered_pages(&self) -> u32 {
        self.model.pages().max(1)
    }

    // ---- loading ---------------------------------------------------------

    /// Install the code sequence. An empty list is fatal.
    pub fn load_codes(&mut self, response: CodesResponse) -> Result<usize> {
        let codes = CodeSequence::from_response(response)?;
        info!("loaded {} codes", codes.len());
        let len = codes.len();
        self.codes = Some(codes);
        Ok(len)
    }

    // ---- mutations -------------------------------------------------------

    fn prepare_sync(&mut self) -> Result<SyncCall> {
        let request = build_request(&self.model, self.codes.as_ref())?;
        let ticket = self.tracker.issue();
        debug!(
            "sync #{} start={} skips={}",
            ticket.seq(),
            request.start_index,
            request.skip_indices.len()
        );
        Ok(SyncCall { ticket, request })
    }

    fn finish_mutation(&mut self, directive: SyncDirective, pages_before: u32) -> Result<Mutation> {
        let repaint = if self.model.pages() == pages_before {
            Repaint::Cells
        } else {
            self.pager.set_pages(self.model.pages());
            Repaint::Full
        };
        let sync = match directive {
            SyncDirective::Sync => Some(self.prepare_sync()?),
            SyncDirective::Settled => None,
        };
        Ok(Mutation { repaint, sync })
    }

    /// Operator clicked the slot at (page, row, col).
    pub fn click(&mut self, page: u32, row: u32, col: u32, shift: bool) -> Result<Mutation> {
        let index = self.grid.index_at(page, row, col)?;
        self.click_index(index, shift)
    }

    pub fn click_index(&mut self, index: LinearIndex, shift: bool) -> Result<Mutation> {
        let pages_before = self.model.pages();
        let directive = self.model.click(index, shift)?;
        self.finish_mutation(directive, pages_before)
    }

    pub fn set_start(&mut self, index: LinearIndex) -> Result<Mutation> {
        let pages_before = self.model.pages();
        let directive = self.model.set_start(index)?;
        self.finish_mutation(directive, pages_before)
    }

    pub fn toggle_skip(&mut self, index: LinearIndex) -> Result<Mutation> {
        let pages_before = self.model.pages();
        let directive = self.model.toggle_skip(index)?;
        self.finish_mutation(directive, pages_before)
    }

    pub fn toggle_range(&mut self, anchor: LinearIndex, index: LinearIndex) -> Result<Mutation> {
        let pages_before = self.model.pages();
        let directive = self.model.toggle_range(anchor, index)?;
        self.finish_mutation(directive, pages_before)
    }

    pub fn clear_skips(&mut self) -> Result<Mutation> {
        let had_skips = self.model.skip_count() > 0;
        let pages_before = self.model.pages();
        let directive = self.model.clear_skips();
        let mut mutation = self.finish_mutation(directive, pages_before)?;
        if !had_skips && mutation.sync.is_none() && mutation.repaint == Repaint::Cells {
            mutation.repaint = Repaint::None;
        }
        Ok(mutation)
    }

    /// Back to the empty state without a round trip. Skips are kept; any
    /// in-flight sync is invalidated so it cannot repopulate the placement.
    pub fn reset_start(&mut self) -> Repaint {
        self.model.reset_start();
        self.tracker.invalidate();
        self.viewport.reset_zoom();
        self.pager.set_pages(1);
        self.pager.go_to(0);
        self.viewport.refit();
        Repaint::Full
    }

    // ---- sync ------------------------------------------------------------

    /// Apply a placement response if it answers the latest request.
    ///
    /// On success the visible page follows the operator's last action rather
    /// than whatever page was showing before the round trip.
    pub fn apply_sync(&mut self, ticket: SyncTicket, response: &PlacementResponse) -> SyncOutcome {
        if !self.tracker.is_current(ticket) {
            warn!(
                "discarding stale sync #{} (latest #{})",
                ticket.seq(),
                self.tracker.latest()
            );
            return SyncOutcome::Stale;
        }
        let before = self.pager.current();
        let report = self.model.apply(response, self.grid);
        self.pager.set_pages(self.model.pages());
        let target = self.model.last_action_page(self.grid);
        self.pager.go_to(i64::from(target));
        self.viewport.refit();
        debug!(
            "sync #{} applied: {} pages, {} placed, page {}",
            ticket.seq(),
            self.model.pages(),
            self.model.placed_len(),
            self.pager.current()
        );
        let repaint = if report.pages_changed {
            Repaint::Full
        } else {
            Repaint::Cells
        };
        SyncOutcome::Applied {
            repaint,
            report,
            page_changed: self.pager.current() != before,
        }
    }

    /// Record a failed sync. State is left as it was before the call.
    /// Returns whether the failure belongs to the latest request and should
    /// be surfaced to the operator.
    pub fn sync_failed(&mut self, ticket: SyncTicket, err: &LabelError) -> bool {
        if !self.tracker.is_current(ticket) {
            warn!("ignoring failure of stale sync #{}: {err}", ticket.seq());
            return false;
        }
        error!("sync #{} failed: {err}", ticket.seq());
        true
    }

    // ---- navigation & viewport -------------------------------------------

    /// Step a page. Returns whether the visible page changed.
    pub fn navigate(&mut self, action: NavAction) -> bool {
        let changed = self.pager.step(action);
        if changed {
            self.viewport.refit();
        }
        changed
    }

    pub fn go_to_page(&mut self, requested: i64) -> u32 {
        let before = self.pager.current();
        let page = self.pager.go_to(requested);
        if page != before {
            self.viewport.refit();
        }
        page
    }

    /// Arrow-key navigation. Returns whether the visible page changed.
    pub fn handle_key(&mut self, key: &str, in_text_input: bool) -> bool {
        NavAction::from_key(key, in_text_input).is_some_and(|action| self.navigate(action))
    }

    pub fn resize(&mut self, window_height: f64) {
        self.viewport.resize(window_height);
    }

    /// Modifier+wheel zoom. Returns whether the event was consumed.
    pub fn wheel(&mut self, delta_y: f64, modifier: bool) -> bool {
        self.viewport.wheel(delta_y, modifier)
    }

    pub fn scale(&self) -> f64 {
        self.viewport.scale()
    }

    // ---- paint -----------------------------------------------------------

    pub fn paint(&self, page: u32) -> PagePaint {
        paint_page(&self.model, &self.geometry, page, self.scale())
    }

    pub fn paint_current(&self) -> PagePaint {
        self.paint(self.pager.current())
    }

    /// One-line status for the toolbar.
    pub fn status_line(&self) -> String {
        match self.model.start() {
            None => format!(
                "Click a label to choose the start position ({} skipped)",
                self.model.skip_count()
            ),
            Some(start) => format!(
                "Page {} / {} | start {} | {} placed | {} skipped",
                self.pager.current() + 1,
                self.rendered_pages(),
                start + 1,
                self.model.placed_len(),
                self.model.skip_count()
            ),
        }
    }

    // ---- print -----------------------------------------------------------

    /// Claim the print gate and build the print request. The gate is only
    /// claimed when the request can be built.
    pub fn print_request(&mut self) -> Result<PlacementRequest> {
        if self.model.start().is_none() {
            return Err(LabelError::InvalidState(
                "choose a start position before printing".to_string(),
            ));
        }
        let request = build_request(&self.model, self.codes.as_ref())?;
        if !self.print.begin() {
            return Err(LabelError::InvalidState(
                "a print job is already pending".to_string(),
            ));
        }
        Ok(request)
    }

    pub fn finish_print(&mut self, response: &PrintResponse) -> Result<()> {
        self.print.finish(response)
    }

    /// Transport failure while printing: re-enable the trigger.
    pub fn print_failed(&mut self, err: &LabelError) -> LabelError {
        self.print.fail(err.to_string())
    }

    pub fn acknowledge_print(&mut self) {
        self.print.acknowledge();
    }
}
