//! View-model state: placement inputs and page navigation.

mod pager;
mod placement;

pub use pager::{NavAction, Pager};
pub use placement::{ApplyReport, PlacementModel, SyncDirective, SyncState};
