pub(crate) mod grid;
pub(crate) mod region;
pub(crate) mod timeline;

use crate::{
    foundation::core::Canvas,
    layout::{
        grid::grid_regions,
        region::{LayoutMetrics, Region},
        timeline::{Spine, timeline_regions, timeline_spine},
    },
    plan::model::{Item, LayoutKind},
};

impl LayoutKind {
    /// Card regions for `count` items; the strategy is fixed once per slide.
    pub fn regions(self, count: usize, metrics: &LayoutMetrics) -> Vec<Region> {
        match self {
            Self::Grid => grid_regions(count, metrics),
            Self::Timeline => timeline_regions(count, metrics),
        }
    }

    /// Strategy-owned decoration drawn under the cards.
    pub fn spine(self, count: usize, metrics: &LayoutMetrics) -> Option<Spine> {
        match self {
            Self::Timeline if count > 0 => Some(timeline_spine(metrics)),
            _ => None,
        }
    }
}

/// One region per item, in item order.
pub fn compute_regions(items: &[Item], kind: LayoutKind, canvas: Canvas) -> Vec<Region> {
    kind.regions(items.len(), &LayoutMetrics::for_canvas(canvas))
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Complete geometry for one slide.
pub struct SlideLayout {
    pub kind: LayoutKind,
    pub metrics: LayoutMetrics,
    pub regions: Vec<Region>,
    pub spine: Option<Spine>,
}

impl SlideLayout {
    #[tracing::instrument(skip(items), fields(items = items.len()))]
    pub fn compute(items: &[Item], kind: LayoutKind, canvas: Canvas) -> Self {
        let metrics = LayoutMetrics::for_canvas(canvas);
        let regions = kind.regions(items.len(), &metrics);
        tracing::debug!(regions = regions.len(), layout = kind.as_str(), "layout computed");
        Self {
            kind,
            metrics,
            regions,
            spine: kind.spine(items.len(), &metrics),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/engine.rs"]
mod tests;
