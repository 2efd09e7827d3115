//! Bidirectional mapping between linear slot indices and (page, row, col).
//!
//! The same functions are used to generate cell DOM and to hit-test clicks,
//! so a painted position and the slot it represents can never disagree.

use std::ops::Range;

use serde::Serialize;

use crate::error::{LabelError, Result};

/// Linear index of one physical label slot across all pages.
pub type LinearIndex = u32;

/// Position of a slot on the sheet, all components 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GridPos {
    pub page: u32,
    pub row: u32,
    pub col: u32,
}

impl GridPos {
    pub const fn new(page: u32, row: u32, col: u32) -> Self {
        Self { page, row, col }
    }
}

/// Columns × rows of labels on a single sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    columns: u32,
    rows: u32,
}

impl GridShape {
    /// Build a shape; zero dimensions are raised to one so that the
    /// index algebra never divides by zero.
    pub fn new(columns: u32, rows: u32) -> Self {
        Self {
            columns: columns.max(1),
            rows: rows.max(1),
        }
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of slots on one page (`columns × rows`), saturating at
    /// `u32::MAX` for shapes that were never validated.
    pub fn per_page(&self) -> u32 {
        self.columns.saturating_mul(self.rows)
    }

    /// Linear index → grid position.
    pub fn to_grid(&self, index: LinearIndex) -> GridPos {
        let per_page = self.per_page();
        let within = index % per_page;
        GridPos {
            page: index / per_page,
            row: within / self.columns,
            col: index % self.columns,
        }
    }

    /// Grid position → linear index. Row and column must lie inside the shape.
    pub fn to_index(&self, pos: GridPos) -> LinearIndex {
        pos.page
            .saturating_mul(self.per_page())
            .saturating_add(pos.row.saturating_mul(self.columns))
            .saturating_add(pos.col)
    }

    /// Hit-test: resolve a clicked (page, row, col) to its slot, rejecting
    /// coordinates that fall outside the sheet.
    pub fn index_at(&self, page: u32, row: u32, col: u32) -> Result<LinearIndex> {
        if row >= self.rows || col >= self.columns {
            return Err(LabelError::OutOfGrid { page, row, col });
        }
        Ok(self.to_index(GridPos { page, row, col }))
    }

    /// Page containing `index`.
    pub fn page_of(&self, index: LinearIndex) -> u32 {
        index / self.per_page()
    }

    /// Half-open range of linear indices belonging to `page`.
    pub fn page_range(&self, page: u32) -> Range<LinearIndex> {
        let start = self.capacity(page);
        start..start.saturating_add(self.per_page())
    }

    /// Total number of slots across `pages` pages.
    pub fn capacity(&self, pages: u32) -> u32 {
        pages.saturating_mul(self.per_page())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dimensions_are_raised() {
        let shape = GridShape::new(0, 0);
        assert_eq!(shape.per_page(), 1);
        assert_eq!(shape.to_grid(3), GridPos::new(3, 0, 0));
    }

    #[test]
    fn page_range_is_contiguous() {
        let shape = GridShape::new(3, 2);
        assert_eq!(shape.page_range(0), 0..6);
        assert_eq!(shape.page_range(2), 12..18);
        assert!(shape.page_range(1).all(|i| shape.page_of(i) == 1));
    }

    #[test]
    fn index_at_rejects_outside_columns() {
        let shape = GridShape::new(4, 10);
        assert!(matches!(
            shape.index_at(0, 0, 4),
            Err(LabelError::OutOfGrid { col: 4, .. })
        ));
        assert!(shape.index_at(0, 10, 0).is_err());
        assert_eq!(shape.index_at(1, 0, 0).ok(), Some(40));
    }

    #[test]
    fn huge_pages_saturate_instead_of_overflowing() {
        let shape = GridShape::new(70_000, 70_000);
        assert_eq!(shape.per_page(), u32::MAX);
        let range = GridShape::new(4, 10).page_range(u32::MAX);
        assert_eq!(range, u32::MAX..u32::MAX);
        assert_eq!(
            GridShape::new(4, 10).to_index(GridPos::new(u32::MAX, 9, 3)),
            u32::MAX
        );
    }
}
