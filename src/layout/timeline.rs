use crate::{
    foundation::core::{Point, Rect},
    layout::region::{LayoutMetrics, Region, RegionDetail},
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Horizontal line the timeline markers sit on.
pub struct Spine {
    pub start: Point,
    pub end: Point,
}

/// The spine spans the content width at the fixed spine offset.
pub fn timeline_spine(m: &LayoutMetrics) -> Spine {
    let bounds = m.content_bounds();
    Spine {
        start: Point::new(bounds.x0, m.spine_y),
        end: Point::new(bounds.x1, m.spine_y),
    }
}

/// Equal-width slots along the spine: marker on the spine, thumbnail above, card below.
pub fn timeline_regions(count: usize, m: &LayoutMetrics) -> Vec<Region> {
    // Guard before the slot width division.
    if count == 0 {
        return Vec::new();
    }

    let bounds = m.content_bounds();
    let slot_w = bounds.width() / count as f64;
    let card_w = (slot_w - m.slot_padding).max(0.0);
    let card_top = m.spine_y + m.card_offset;
    let card_bottom = bounds.y1.max(card_top);

    let thumb_bottom = m.spine_y - m.marker_radius - m.thumbnail_gap;
    let room_above = (thumb_bottom - bounds.y0 - m.thumbnail_gap).max(0.0);
    let thumb = m.thumbnail_max.min(card_w).min(room_above);

    (0..count)
        .map(|i| {
            let slot_x = bounds.x0 + (i as f64) * slot_w;
            let center_x = slot_x + slot_w / 2.0;
            let card_x = slot_x + m.slot_padding / 2.0;
            Region {
                index: i,
                rect: Rect::new(card_x, card_top, card_x + card_w, card_bottom),
                detail: RegionDetail::TimelineSlot {
                    slot: Rect::new(slot_x, bounds.y0, slot_x + slot_w, bounds.y1),
                    marker: Point::new(center_x, m.spine_y),
                    thumbnail: Rect::new(
                        center_x - thumb / 2.0,
                        thumb_bottom - thumb,
                        center_x + thumb / 2.0,
                        thumb_bottom,
                    ),
                },
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/layout/timeline.rs"]
mod tests;
