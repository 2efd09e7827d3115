//! Paint plan for one page of labels.
//!
//! The plan is computed from the view-model, the grid algebra, and the sheet
//! geometry at the current render scale. The DOM backend (wasm32 only) turns
//! it into elements; the CLI turns it into text. Neither computes positions
//! or slot indices on its own.

#[cfg(target_arch = "wasm32")]
pub mod dom;

use serde::Serialize;

use crate::grid::{GridPos, GridShape, LinearIndex};
use crate::layout::{LabelRect, Marker, SheetGeometry};
use crate::model::PlacementModel;

/// Characters that separate an item code's prefix from its running number.
const CODE_SEPARATORS: [char; 2] = ['_', '-'];

/// Display density derived from the length of a code's trailing number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DensityTier {
    /// Up to two digits.
    Short,
    /// Three digits.
    Medium,
    /// Four or more digits.
    Long,
}

impl DensityTier {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Short => "digits-short",
            Self::Medium => "digits-medium",
            Self::Long => "digits-long",
        }
    }
}

/// Density tier of `code`, from the digits after its last separator.
///
/// `"250822_BB_12"` has the suffix `"12"` and is [`DensityTier::Short`].
/// Codes without a separator use the whole string; a suffix with no digits
/// yields `None`.
pub fn density_tier(code: &str) -> Option<DensityTier> {
    let suffix = code
        .rsplit_once(CODE_SEPARATORS)
        .map_or(code, |(_, tail)| tail);
    let digits = suffix.chars().filter(char::is_ascii_digit).count();
    match digits {
        0 => None,
        1 | 2 => Some(DensityTier::Short),
        3 => Some(DensityTier::Medium),
        _ => Some(DensityTier::Long),
    }
}

/// Decoration of a single slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellPaint {
    pub index: LinearIndex,
    pub pos: GridPos,
    pub rect: LabelRect,
    pub code: Option<String>,
    pub skipped: bool,
    pub is_start: bool,
    pub before_start: bool,
    pub density: Option<DensityTier>,
}

impl CellPaint {
    pub fn occupied(&self) -> bool {
        self.code.is_some()
    }

    /// Space-separated class list for the cell element.
    pub fn class_name(&self) -> String {
        let mut classes = vec!["label-cell"];
        if self.occupied() {
            classes.push("occupied");
        }
        if self.skipped {
            classes.push("skipped");
        }
        if self.is_start {
            classes.push("start");
        }
        if self.before_start {
            classes.push("before-start");
        }
        if let Some(tier) = self.density {
            classes.push(tier.css_class());
        }
        classes.join(" ")
    }
}

/// Everything needed to draw one page at one scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PagePaint {
    pub page: u32,
    pub width: f64,
    pub height: f64,
    pub scale: f64,
    pub cells: Vec<CellPaint>,
    pub column_markers: Vec<Marker>,
    pub row_markers: Vec<Marker>,
}

impl PagePaint {
    pub fn cell(&self, index: LinearIndex) -> Option<&CellPaint> {
        self.cells.iter().find(|c| c.index == index)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.occupied()).count()
    }
}

/// Build the paint plan of `page`.
pub fn paint_page(
    model: &PlacementModel,
    geometry: &SheetGeometry,
    page: u32,
    scale: f64,
) -> PagePaint {
    let grid: GridShape = geometry.grid();
    let cells = grid
        .page_range(page)
        .map(|index| {
            let pos = grid.to_grid(index);
            let code = model.code_at(index).map(str::to_string);
            let density = code.as_deref().and_then(density_tier);
            CellPaint {
                index,
                pos,
                rect: geometry.label_rect(pos.row, pos.col).scaled(scale),
                code,
                skipped: model.is_skipped(index),
                is_start: model.is_start(index),
                before_start: model.is_before_start(index),
                density,
            }
        })
        .collect();
    PagePaint {
        page,
        width: geometry.page_width * scale,
        height: geometry.page_height * scale,
        scale,
        cells,
        column_markers: geometry
            .column_markers()
            .iter()
            .map(|m| m.scaled(scale))
            .collect(),
        row_markers: geometry
            .row_markers()
            .iter()
            .map(|m| m.scaled(scale))
            .collect(),
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
    fn test_density_uses_suffix_after_last_separator() {
        assert_eq!(density_tier("250822_BB_12"), Some(DensityTier::Short));
        assert_eq!(density_tier("250822_BB_123"), Some(DensityTier::Medium));
        assert_eq!(density_tier("250822-BB-1234"), Some(DensityTier::Long));
        assert_eq!(density_tier("250822_BB"), None);
        assert_eq!(density_tier("7"), Some(DensityTier::Short));
        assert_eq!(density_tier(""), None);
    }

    #[test]
    fn test_class_name_lists_every_flag() {
        let cell = CellPaint {
            index: 0,
            pos: GridPos::new(0, 0, 0),
            rect: LabelRect {
                x: 0.0,
                y: 0.0,
                width: 1.0,
                height: 1.0,
                radius: 0.0,
            },
            code: Some("X_1000".to_string()),
            skipped: true,
            is_start: true,
            before_start: false,
            density: Some(DensityTier::Long),
        };
        assert_eq!(
            cell.class_name(),
            "label-cell occupied skipped start digits-long"
        );
    }
}
