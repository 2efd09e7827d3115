//! Grid index algebra tests
//!
//! Linear slot index <-> (page, row, col) across sheet shapes.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use labelview::config::MAX_LABELS_PER_PAGE;
use labelview::{GridPos, GridShape, LabelError, ViewerConfig};
use test_case::test_case;

#[test_case(1, 1 => 1 ; "single label")]
#[test_case(2, 2 => 4 ; "two by two")]
#[test_case(4, 10 => 40 ; "a4 default")]
#[test_case(3, 7 => 21 ; "three by seven")]
#[test_case(5, 13 => 65 ; "five by thirteen")]
fn test_per_page_is_columns_times_rows(columns: u32, rows: u32) -> u32 {
    GridShape::new(columns, rows).per_page()
}

#[test_case(1, 1)]
#[test_case(2, 2)]
#[test_case(3, 7)]
#[test_case(4, 10)]
fn test_round_trip_over_several_pages(columns: u32, rows: u32) {
    let grid = GridShape::new(columns, rows);
    for index in 0..grid.per_page() * 5 {
        let pos = grid.to_grid(index);
        assert!(pos.row < rows && pos.col < columns, "{pos:?} off the sheet");
        assert_eq!(grid.to_index(pos), index, "round trip of {index}");
    }
}

#[test]
fn test_round_trip_at_large_indices() {
    let grid = GridShape::new(4, 10);
    for index in [1_000, 65_535, 1_000_003, u32::MAX / 2] {
        assert_eq!(grid.to_index(grid.to_grid(index)), index);
    }
}

#[test]
fn test_to_grid_matches_worked_example() {
    let grid = GridShape::new(2, 2);
    assert_eq!(grid.to_grid(4), GridPos::new(1, 0, 0));
    assert_eq!(grid.to_grid(3), GridPos::new(0, 1, 1));
    assert_eq!(grid.to_grid(6), GridPos::new(1, 1, 0));
}

#[test]
fn test_zero_dimensions_clamp_to_one() {
    let grid = GridShape::new(0, 0);
    assert_eq!(grid.columns(), 1);
    assert_eq!(grid.rows(), 1);
    assert_eq!(grid.per_page(), 1);
}

#[test]
fn test_index_at_rejects_off_grid_coordinates() {
    let grid = GridShape::new(4, 10);
    assert_eq!(grid.index_at(2, 3, 1).unwrap(), 2 * 40 + 3 * 4 + 1);
    assert!(matches!(
        grid.index_at(0, 10, 0),
        Err(LabelError::OutOfGrid {
            page: 0,
            row: 10,
            col: 0
        })
    ));
    assert!(grid.index_at(0, 0, 4).is_err());
}

#[test]
fn test_page_range_covers_page_slots() {
    let grid = GridShape::new(2, 3);
    assert_eq!(grid.page_range(0), 0..6);
    assert_eq!(grid.page_range(2), 12..18);
    for index in grid.page_range(2) {
        assert_eq!(grid.page_of(index), 2);
    }
}

#[test]
fn test_capacity_saturates() {
    let grid = GridShape::new(4, 10);
    assert_eq!(grid.capacity(0), 0);
    assert_eq!(grid.capacity(3), 120);
    assert_eq!(grid.capacity(u32::MAX), u32::MAX);
}

#[test_case(70_000, 70_000 ; "product overflows u32")]
#[test_case(101, 100 ; "above the per page cap")]
#[test_case(1, MAX_LABELS_PER_PAGE + 1 ; "single column too tall")]
fn test_oversized_sheet_is_rejected(columns: u32, rows: u32) {
    let json = format!(r#"{{"columns":{columns},"rows":{rows}}}"#);
    assert!(matches!(
        ViewerConfig::from_json(&json),
        Err(LabelError::InvalidConfig(_))
    ));
}

#[test]
fn test_largest_accepted_sheet_keeps_exact_product() {
    let config = ViewerConfig::from_json(r#"{"columns":100,"rows":100}"#).unwrap();
    assert_eq!(config.sheet.per_page(), MAX_LABELS_PER_PAGE);
    let grid = config.sheet.grid();
    let last = grid.capacity(3) - 1;
    assert_eq!(grid.to_index(grid.to_grid(last)), last);
}

#[test]
fn test_huge_page_number_does_not_overflow() {
    let grid = GridShape::new(4, 10);
    let range = grid.page_range(u32::MAX / 10);
    assert!(range.start <= range.end);
    assert_eq!(range.end, u32::MAX);
    assert_eq!(grid.page_range(u32::MAX).count(), 0);
}
