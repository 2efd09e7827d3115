//! Layout engine for label geometry and viewport scaling.
//!
//! This module handles:
//! - Converting physical sheet dimensions into pixel rectangles
//! - Row/column marker placement in the page margins
//! - Fit-to-window scale and modifier+wheel zoom

mod geometry;
mod viewport;

pub use geometry::{LabelRect, Marker, SheetGeometry, MARKER_MARGIN_FRACTION};
pub use viewport::{
    Viewport, FIT_MAX, FIT_MIN, SCALE_MAX, SCALE_MIN, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP,
};
