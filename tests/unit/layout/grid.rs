use super::*;
use crate::foundation::core::Canvas;

fn metrics() -> LayoutMetrics {
    LayoutMetrics::for_canvas(Canvas::default())
}

#[test]
fn dimensions_follow_lookup_table() {
    assert_eq!(grid_dimensions(0), None);
    assert_eq!(grid_dimensions(1), Some((1, 1)));
    assert_eq!(grid_dimensions(3), Some((3, 1)));
    assert_eq!(grid_dimensions(4), Some((2, 2)));
    assert_eq!(grid_dimensions(5), Some((3, 2)));
    assert_eq!(grid_dimensions(6), Some((3, 2)));
    assert_eq!(grid_dimensions(7), Some((3, 3)));
    assert_eq!(grid_dimensions(10), Some((3, 4)));
}

#[test]
fn zero_items_yield_no_regions() {
    assert!(grid_regions(0, &metrics()).is_empty());
}

#[test]
fn four_items_form_two_by_two() {
    let m = metrics();
    let regions = grid_regions(4, &m);
    assert_eq!(regions.len(), 4);

    // 1920x1080: unit 120, margin 60, gap 36, header 216.
    let w = (1920.0 - 120.0 - 36.0) / 2.0;
    let h = (1080.0 - 216.0 - 60.0 - 36.0) / 2.0;
    let r0 = regions[0].rect;
    assert!((r0.x0 - 60.0).abs() < 1e-9);
    assert!((r0.y0 - 216.0).abs() < 1e-9);
    assert!((r0.width() - w).abs() < 1e-9);
    assert!((r0.height() - h).abs() < 1e-9);

    let r3 = regions[3].rect;
    assert_eq!(regions[3].detail, RegionDetail::Cell { row: 1, col: 1 });
    assert!((r3.x1 - (1920.0 - 60.0)).abs() < 1e-9);
    assert!((r3.y1 - (1080.0 - 60.0)).abs() < 1e-9);
}

#[test]
fn cells_are_row_major() {
    let regions = grid_regions(5, &metrics());
    assert_eq!(regions[2].detail, RegionDetail::Cell { row: 0, col: 2 });
    assert_eq!(regions[3].detail, RegionDetail::Cell { row: 1, col: 0 });
    assert!(regions[3].rect.y0 > regions[2].rect.y1);
    assert!(regions[1].rect.x0 > regions[0].rect.x1);
}
