use crate::foundation::core::{Canvas, Point, Rect};

/// Fixed layout constants, in layout units (1/16 of the canvas width).
const MARGIN_U: f64 = 0.5;
const GAP_U: f64 = 0.3;
const HEADER_U: f64 = 1.8;
const SPINE_Y_U: f64 = 4.0;
const MARKER_RADIUS_U: f64 = 0.12;
const SLOT_PADDING_U: f64 = 0.2;
const THUMB_MAX_U: f64 = 1.4;
const THUMB_GAP_U: f64 = 0.15;
const CARD_OFFSET_U: f64 = 0.35;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Layout constants resolved to pixels for one canvas.
pub struct LayoutMetrics {
    pub canvas: Canvas,
    /// Outer margin on the left, right and bottom.
    pub margin: f64,
    /// Gap between grid cells.
    pub gap: f64,
    /// Reserved title band at the top of the canvas.
    pub header_height: f64,
    /// Vertical position of the timeline spine.
    pub spine_y: f64,
    pub marker_radius: f64,
    /// Horizontal space removed from each timeline slot to get the card width.
    pub slot_padding: f64,
    pub thumbnail_max: f64,
    /// Clearance between a timeline thumbnail and its marker.
    pub thumbnail_gap: f64,
    /// Distance from the spine to the top of a timeline card.
    pub card_offset: f64,
}

impl LayoutMetrics {
    pub fn for_canvas(canvas: Canvas) -> Self {
        Self {
            canvas,
            margin: canvas.units(MARGIN_U),
            gap: canvas.units(GAP_U),
            header_height: canvas.units(HEADER_U),
            spine_y: canvas.units(SPINE_Y_U),
            marker_radius: canvas.units(MARKER_RADIUS_U),
            slot_padding: canvas.units(SLOT_PADDING_U),
            thumbnail_max: canvas.units(THUMB_MAX_U),
            thumbnail_gap: canvas.units(THUMB_GAP_U),
            card_offset: canvas.units(CARD_OFFSET_U),
        }
    }

    /// Canvas minus margins and the header band.
    pub fn content_bounds(&self) -> Rect {
        Rect::new(
            self.margin,
            self.header_height,
            self.canvas.width_f64() - self.margin,
            self.canvas.height_f64() - self.margin,
        )
    }

    pub fn content_width(&self) -> f64 {
        self.content_bounds().width()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Strategy-specific placement details.
pub enum RegionDetail {
    /// Grid cell position.
    Cell { row: usize, col: usize },
    /// Timeline slot with its spine marker and the thumbnail area above the spine.
    TimelineSlot {
        slot: Rect,
        marker: Point,
        thumbnail: Rect,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Card rectangle assigned to one item; recomputed on every render pass.
pub struct Region {
    /// Position of the item in plan order.
    pub index: usize,
    /// Card rectangle in canvas pixels.
    pub rect: Rect,
    pub detail: RegionDetail,
}

impl Region {
    /// Thumbnail area outside the card, if the strategy provides one.
    pub fn thumbnail_slot(&self) -> Option<Rect> {
        match self.detail {
            RegionDetail::Cell { .. } => None,
            RegionDetail::TimelineSlot { thumbnail, .. } => Some(thumbnail),
        }
    }

    pub fn marker(&self) -> Option<Point> {
        match self.detail {
            RegionDetail::Cell { .. } => None,
            RegionDetail::TimelineSlot { marker, .. } => Some(marker),
        }
    }

    /// Full timeline slot (card plus padding), if any.
    pub fn slot(&self) -> Option<Rect> {
        match self.detail {
            RegionDetail::Cell { .. } => None,
            RegionDetail::TimelineSlot { slot, .. } => Some(slot),
        }
    }
}
