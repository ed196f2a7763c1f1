use crate::{
    foundation::core::Rect,
    layout::region::{LayoutMetrics, Region, RegionDetail},
};

/// Fixed `(columns, rows)` lookup for `count` items; `None` for zero items.
pub fn grid_dimensions(count: usize) -> Option<(usize, usize)> {
    match count {
        0 => None,
        1..=3 => Some((count, 1)),
        4 => Some((2, 2)),
        5 | 6 => Some((3, 2)),
        n => Some((3, n.div_ceil(3))),
    }
}

/// Row-major grid cells below the header band.
pub fn grid_regions(count: usize, m: &LayoutMetrics) -> Vec<Region> {
    let Some((cols, rows)) = grid_dimensions(count) else {
        return Vec::new();
    };

    let (c, r) = (cols as f64, rows as f64);
    let cell_w = ((m.canvas.width_f64() - 2.0 * m.margin - (c - 1.0) * m.gap) / c).max(0.0);
    let cell_h = ((m.canvas.height_f64() - m.header_height - m.margin - (r - 1.0) * m.gap) / r)
        .max(0.0);

    (0..count)
        .map(|i| {
            let (row, col) = (i / cols, i % cols);
            let x = m.margin + (col as f64) * (cell_w + m.gap);
            let y = m.header_height + (row as f64) * (cell_h + m.gap);
            Region {
                index: i,
                rect: Rect::new(x, y, x + cell_w, y + cell_h),
                detail: RegionDetail::Cell { row, col },
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;
