//! Placement view-model: start offset, skip set, and the server-confirmed
//! slot → code assignment.
//!
//! The client never computes a placement. Every mutation here only edits the
//! operator's inputs and reports whether a sync round trip is needed; the
//! placed map is replaced wholesale by [`PlacementModel::apply`].

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, warn};

use crate::error::{LabelError, Result};
use crate::grid::{GridShape, LinearIndex};
use crate::sync::PlacementResponse;

/// Where the view-model sits relative to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// No start index; a blank single page is shown.
    Empty,
    /// A local mutation is waiting for the server's placement.
    AwaitingSync,
    /// Placed map and page count reflect the last applied response.
    Synced,
}

/// What the caller must do after a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncDirective {
    /// Send a placement request.
    Sync,
    /// Nothing to send; repaint from local state.
    Settled,
}

/// Summary of an applied placement response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyReport {
    pub pages_changed: bool,
    /// Placements dropped for lying outside the returned page count.
    pub dropped: usize,
}

#[derive(Debug, Clone)]
pub struct PlacementModel {
    start: Option<LinearIndex>,
    skips: BTreeSet<LinearIndex>,
    placed: BTreeMap<LinearIndex, String>,
    pages: u32,
    last_clicked: Option<LinearIndex>,
    state: SyncState,
}

impl Default for PlacementModel {
    fn default() -> Self {
        Self::new()
    }
}

impl PlacementModel {
    pub fn new() -> Self {
        Self {
            start: None,
            skips: BTreeSet::new(),
            placed: BTreeMap::new(),
            pages: 1,
            last_clicked: None,
            state: SyncState::Empty,
        }
    }

    /// An empty model with skips already marked, as left behind by
    /// [`reset_start`](Self::reset_start). Nothing is sent until a start is set.
    pub fn with_skips(skips: impl IntoIterator<Item = LinearIndex>) -> Self {
        Self {
            skips: skips.into_iter().collect(),
            ..Self::new()
        }
    }

    // ---- accessors -------------------------------------------------------

    pub fn start(&self) -> Option<LinearIndex> {
        self.start
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn pages(&self) -> u32 {
        self.pages
    }

    pub fn last_clicked(&self) -> Option<LinearIndex> {
        self.last_clicked
    }

    /// Skipped slots in ascending order.
    pub fn skips(&self) -> impl Iterator<Item = LinearIndex> + '_ {
        self.skips.iter().copied()
    }

    pub fn skip_count(&self) -> usize {
        self.skips.len()
    }

    pub fn is_skipped(&self, index: LinearIndex) -> bool {
        self.skips.contains(&index)
    }

    pub fn is_start(&self, index: LinearIndex) -> bool {
        self.start == Some(index)
    }

    /// Slots before the start offset are implicitly skipped.
    pub fn is_before_start(&self, index: LinearIndex) -> bool {
        self.start.is_some_and(|start| index < start)
    }

    pub fn code_at(&self, index: LinearIndex) -> Option<&str> {
        self.placed.get(&index).map(String::as_str)
    }

    pub fn placed_len(&self) -> usize {
        self.placed.len()
    }

    pub fn placed(&self) -> impl Iterator<Item = (LinearIndex, &str)> + '_ {
        self.placed.iter().map(|(&i, code)| (i, code.as_str()))
    }

    /// Page of the most recently clicked slot, or the first page.
    pub fn last_action_page(&self, grid: GridShape) -> u32 {
        self.last_clicked.map_or(0, |i| grid.page_of(i))
    }

    // ---- mutations -------------------------------------------------------

    fn require_start(&self, op: &str) -> Result<()> {
        if self.start.is_none() {
            return Err(LabelError::InvalidState(format!(
                "{op} requires a start index"
            )));
        }
        Ok(())
    }

    /// Enter `AwaitingSync`, or short-circuit to a blank page when there is
    /// nothing to place.
    fn begin_sync(&mut self) -> SyncDirective {
        if self.start.is_none() {
            self.placed.clear();
            self.pages = 1;
            self.state = SyncState::Empty;
            return SyncDirective::Settled;
        }
        self.state = SyncState::AwaitingSync;
        SyncDirective::Sync
    }

    /// Choose the first slot eligible for placement. Only valid while empty.
    pub fn set_start(&mut self, index: LinearIndex) -> Result<SyncDirective> {
        if let Some(current) = self.start {
            return Err(LabelError::InvalidState(format!(
                "start index already set to {current}"
            )));
        }
        debug!("set start {index}");
        self.start = Some(index);
        self.last_clicked = Some(index);
        Ok(self.begin_sync())
    }

    /// Flip one slot's membership in the skip set.
    pub fn toggle_skip(&mut self, index: LinearIndex) -> Result<SyncDirective> {
        self.require_start("toggle skip")?;
        if !self.skips.remove(&index) {
            self.skips.insert(index);
        }
        debug!("toggle skip {index} -> {}", self.skips.contains(&index));
        self.last_clicked = Some(index);
        Ok(self.begin_sync())
    }

    /// Toggle the inclusive range between `anchor` and `index`.
    ///
    /// Only the clicked endpoint decides the effect: if `index` is skipped the
    /// whole range is unskipped, otherwise the whole range is skipped.
    pub fn toggle_range(
        &mut self,
        anchor: LinearIndex,
        index: LinearIndex,
    ) -> Result<SyncDirective> {
        self.require_start("range toggle")?;
        let (lo, hi) = if anchor <= index {
            (anchor, index)
        } else {
            (index, anchor)
        };
        let unskip = self.skips.contains(&index);
        if unskip {
            self.skips.retain(|i| !(lo..=hi).contains(i));
        } else {
            self.skips.extend(lo..=hi);
        }
        debug!(
            "range {lo}..={hi} {}",
            if unskip { "unskipped" } else { "skipped" }
        );
        self.last_clicked = Some(index);
        Ok(self.begin_sync())
    }

    /// Route a slot click: the first click sets the start, shift-clicks with
    /// an anchor toggle a range, everything else toggles one slot.
    pub fn click(&mut self, index: LinearIndex, shift: bool) -> Result<SyncDirective> {
        match (self.start, self.last_clicked) {
            (None, _) => self.set_start(index),
            (Some(_), Some(anchor)) if shift => self.toggle_range(anchor, index),
            (Some(_), _) => self.toggle_skip(index),
        }
    }

    /// Forget the start offset and the placement. The skip set survives.
    pub fn reset_start(&mut self) {
        debug!("reset start");
        self.start = None;
        self.last_clicked = None;
        self.placed.clear();
        self.pages = 1;
        self.state = SyncState::Empty;
    }

    /// Empty the skip set; only syncs when a start offset exists.
    pub fn clear_skips(&mut self) -> SyncDirective {
        debug!("clear {} skips", self.skips.len());
        self.skips.clear();
        self.begin_sync()
    }

    /// Replace page count and placed map with the server's answer.
    ///
    /// This is a full replace: placements absent from `response` disappear.
    /// Entries outside `0 .. pages × per_page` are dropped; skipped slots are
    /// trusted as returned.
    pub fn apply(&mut self, response: &PlacementResponse, grid: GridShape) -> ApplyReport {
        let capacity = grid.capacity(response.pages);
        let mut placed = BTreeMap::new();
        let mut dropped = 0;
        for placement in &response.placed {
            if placement.index < capacity {
                placed.insert(placement.index, placement.code.clone());
            } else {
                dropped += 1;
                warn!(
                    "dropping placement {} at {} beyond {} pages",
                    placement.code, placement.index, response.pages
                );
            }
        }
        let pages_changed = self.pages != response.pages;
        self.pages = response.pages;
        self.placed = placed;
        self.state = SyncState::Synced;
        ApplyReport {
            pages_changed,
            dropped,
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
    use crate::sync::Placement;

    #[test]
    fn test_set_start_twice_is_rejected() {
        let mut model = PlacementModel::new();
        assert_eq!(model.set_start(3).unwrap(), SyncDirective::Sync);
        assert!(matches!(
            model.set_start(4),
            Err(LabelError::InvalidState(_))
        ));
        assert_eq!(model.start(), Some(3));
    }

    #[test]
    fn test_toggle_requires_start() {
        let mut model = PlacementModel::new();
        assert!(model.toggle_skip(1).is_err());
        assert!(model.toggle_range(1, 4).is_err());
        assert_eq!(model.skip_count(), 0);
    }

    #[test]
    fn test_clear_skips_without_start_settles() {
        let mut model = PlacementModel::new();
        assert_eq!(model.clear_skips(), SyncDirective::Settled);
        assert_eq!(model.state(), SyncState::Empty);
        assert_eq!(model.pages(), 1);
    }

    #[test]
    fn test_apply_drops_out_of_range_placements() {
        let mut model = PlacementModel::new();
        model.set_start(0).unwrap();
        let response = PlacementResponse {
            pages: 1,
            placed: vec![
                Placement {
                    index: 3,
                    code: "A".into(),
                },
                Placement {
                    index: 4,
                    code: "B".into(),
                },
            ],
        };
        let report = model.apply(&response, GridShape::new(2, 2));
        assert_eq!(report.dropped, 1);
        assert!(!report.pages_changed);
        assert_eq!(model.code_at(3), Some("A"));
        assert_eq!(model.code_at(4), None);
        assert_eq!(model.state(), SyncState::Synced);
    }

    #[test]
    fn test_before_start() {
        let mut model = PlacementModel::new();
        assert!(!model.is_before_start(0));
        model.set_start(5).unwrap();
        assert!(model.is_before_start(4));
        assert!(!model.is_before_start(5));
    }
}
