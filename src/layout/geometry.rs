//! Physical sheet dimensions converted to pixel geometry.
//!
//! A single scalar, pixels per physical unit, is derived from the reference
//! page width; every position, gap, margin, and radius is a linear scale of
//! its physical value. Zoom is applied afterwards with [`LabelRect::scaled`].

use serde::Serialize;

use crate::config::SheetConfig;
use crate::grid::GridShape;

/// Row/column markers sit this fraction of the margin away from the page edge.
pub const MARKER_MARGIN_FRACTION: f64 = 0.5;

/// Pixel rectangle of one label, relative to the page's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub radius: f64,
}

impl LabelRect {
    /// Apply the effective render scale.
    pub fn scaled(&self, scale: f64) -> Self {
        Self {
            x: self.x * scale,
            y: self.y * scale,
            width: self.width * scale,
            height: self.height * scale,
            radius: self.radius * scale,
        }
    }
}

/// A 1-based row or column number drawn in the page margin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub label: String,
    /// Centre of the marker text.
    pub x: f64,
    pub y: f64,
}

impl Marker {
    pub fn scaled(&self, scale: f64) -> Self {
        Self {
            label: self.label.clone(),
            x: self.x * scale,
            y: self.y * scale,
        }
    }
}

/// Pixel geometry of a sheet at zoom 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetGeometry {
    pub px_per_unit: f64,
    pub page_width: f64,
    pub page_height: f64,
    pub margin_left: f64,
    pub margin_top: f64,
    pub gap_x: f64,
    pub gap_y: f64,
    pub label_width: f64,
    pub label_height: f64,
    pub corner_radius: f64,
    grid: GridShape,
}

impl SheetGeometry {
    pub fn new(config: &SheetConfig) -> Self {
        let px_per_unit = if config.page_width > 0.0 {
            config.reference_page_px / config.page_width
        } else {
            1.0
        };
        Self {
            px_per_unit,
            page_width: config.page_width * px_per_unit,
            page_height: config.page_height * px_per_unit,
            margin_left: config.margin_left * px_per_unit,
            margin_top: config.margin_top * px_per_unit,
            gap_x: config.gap_x * px_per_unit,
            gap_y: config.gap_y * px_per_unit,
            label_width: config.label_width * px_per_unit,
            label_height: config.label_height * px_per_unit,
            corner_radius: config.corner_radius * px_per_unit,
            grid: config.grid(),
        }
    }

    pub fn grid(&self) -> GridShape {
        self.grid
    }

    fn label_x(&self, col: u32) -> f64 {
        self.margin_left + f64::from(col) * (self.label_width + self.gap_x)
    }

    fn label_y(&self, row: u32) -> f64 {
        self.margin_top + f64::from(row) * (self.label_height + self.gap_y)
    }

    /// Rectangle of the label at (row, col) on any page.
    pub fn label_rect(&self, row: u32, col: u32) -> LabelRect {
        LabelRect {
            x: self.label_x(col),
            y: self.label_y(row),
            width: self.label_width,
            height: self.label_height,
            radius: self.corner_radius,
        }
    }

    /// Column numbers, centred over each column in the top margin.
    pub fn column_markers(&self) -> Vec<Marker> {
        (0..self.grid.columns())
            .map(|col| Marker {
                label: (col + 1).to_string(),
                x: self.label_x(col) + self.label_width / 2.0,
                y: self.margin_top * MARKER_MARGIN_FRACTION,
            })
            .collect()
    }

    /// Row numbers, centred beside each row in the left margin.
    pub fn row_markers(&self) -> Vec<Marker> {
        (0..self.grid.rows())
            .map(|row| Marker {
                label: (row + 1).to_string(),
                x: self.margin_left * MARKER_MARGIN_FRACTION,
                y: self.label_y(row) + self.label_height / 2.0,
            })
            .collect()
    }
}
