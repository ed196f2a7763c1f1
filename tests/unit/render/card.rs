use super::*;
use crate::{
    foundation::core::Canvas,
    layout::{
        compute_regions,
        region::{Region, RegionDetail},
    },
    plan::model::LayoutKind,
};

fn style() -> SlideStyle {
    SlideStyle::new(Canvas::default(), "tech_blue")
}

fn cell(rect: Rect) -> Region {
    Region {
        index: 0,
        rect,
        detail: RegionDetail::Cell { row: 0, col: 0 },
    }
}

fn specced() -> Item {
    Item::new("gpu", "GPU", "Accelerator")
        .with_spec("Memory", "80 GB")
        .with_spec("Bandwidth", "3 TB/s")
        .with_spec("TDP", "700 W")
}

#[test]
fn description_fills_card_without_specs() {
    let s = style();
    let region = cell(Rect::new(100.0, 200.0, 700.0, 600.0));
    let g = layout_card(&Item::new("a", "A", "text"), &region, false, &s.card);
    assert!((g.description.y1 - (600.0 - s.card.padding)).abs() < 1e-9);
    assert!(g.separator.is_none());
    assert!(g.spec_rows.is_empty());
    assert!(g.thumbnail.is_none());
    assert!((g.title.x0 - (100.0 + s.card.padding)).abs() < 1e-9);
}

#[test]
fn specs_split_remaining_height_evenly() {
    let s = style();
    let region = cell(Rect::new(0.0, 0.0, 600.0, 800.0));
    let g = layout_card(&specced(), &region, false, &s.card);

    let desc_h = g.description.height();
    assert!((desc_h - 0.25 * 800.0).abs() < 1e-9);

    let (from, to) = g.separator.unwrap();
    assert!(from.y > g.description.y1);
    assert_eq!(from.y, to.y);

    assert_eq!(g.spec_rows.len(), 3);
    let h = g.spec_rows[0].band.height();
    for (i, row) in g.spec_rows.iter().enumerate() {
        assert!((row.band.height() - h).abs() < 1e-9);
        assert_eq!(row.tinted, i % 2 == 1);
        assert!(row.label.x1 < row.value.x0);
    }
    let last = g.spec_rows.last().unwrap().band;
    assert!((last.y1 - (800.0 - s.card.padding)).abs() < 1e-9);
}

#[test]
fn cramped_card_clamps_rows_to_minimum_height() {
    let s = style();
    let region = cell(Rect::new(0.0, 0.0, 400.0, 90.0));
    let g = layout_card(&specced(), &region, false, &s.card);
    assert_eq!(g.spec_rows.len(), 3);
    for row in &g.spec_rows {
        assert!((row.band.height() - s.card.min_row_height).abs() < 1e-9);
        assert!(row.label.height() > 0.0);
        assert!(row.value.width() >= 0.0);
    }
}

#[test]
fn grid_thumbnail_pushes_title_right() {
    let s = style();
    let region = cell(Rect::new(0.0, 0.0, 800.0, 500.0));
    let plain = layout_card(&Item::new("a", "A", ""), &region, true, &s.card);
    let thumb = plain.thumbnail.unwrap();
    assert!((thumb.width() - s.card.icon_large).abs() < 1e-9);
    assert!(plain.title.x0 > thumb.x1);

    let with_specs = layout_card(&specced(), &region, true, &s.card);
    let thumb = with_specs.thumbnail.unwrap();
    assert!((thumb.width() - s.card.icon_compact).abs() < 1e-9);
    let (from, _) = with_specs.separator.unwrap();
    assert!(from.y > thumb.y1);
}

#[test]
fn timeline_thumbnail_uses_region_slot() {
    let s = style();
    let items = vec![Item::new("a", "A", ""), Item::new("b", "B", "")];
    let regions = compute_regions(&items, LayoutKind::Timeline, Canvas::default());
    let g = layout_card(&items[0], &regions[0], true, &s.card);
    assert_eq!(g.thumbnail, regions[0].thumbnail_slot());
    assert!((g.title.x0 - (regions[0].rect.x0 + s.card.padding)).abs() < 1e-9);

    let without = layout_card(&items[0], &regions[0], false, &s.card);
    assert!(without.thumbnail.is_none());
}

#[test]
fn render_draws_picture_only_when_asset_resolved() {
    let s = style();
    let region = cell(Rect::new(0.0, 0.0, 800.0, 500.0));
    let item = specced();

    let mut doc = SlideDocument::new(Canvas::default());
    render_card(&mut doc, &item, &region, &AssetMap::default(), &s);
    assert_eq!(doc.pictures().count(), 0);
    let texts: Vec<_> = doc.texts().map(|t| t.text.clone()).collect();
    assert!(texts.contains(&"GPU".to_string()));
    assert!(texts.contains(&"● Memory".to_string()));
    assert!(texts.contains(&"3 TB/s".to_string()));

    let mut assets = AssetMap::default();
    assets.insert("gpu", "/tmp/gpu.png");
    let mut with_pic = SlideDocument::new(Canvas::default());
    let g = render_card(&mut with_pic, &item, &region, &assets, &s);
    assert_eq!(with_pic.pictures().count(), 1);
    assert!(g.thumbnail.is_some());
}

#[test]
fn render_is_deterministic() {
    let s = style();
    let region = cell(Rect::new(0.0, 0.0, 800.0, 500.0));
    let mut a = SlideDocument::new(Canvas::default());
    let mut b = SlideDocument::new(Canvas::default());
    render_card(&mut a, &specced(), &region, &AssetMap::default(), &s);
    render_card(&mut b, &specced(), &region, &AssetMap::default(), &s);
    assert_eq!(a, b);
    assert_eq!(a.to_svg(), b.to_svg());
}

fn thumbnail_frame_width(doc: &SlideDocument, thumb: Rect) -> Option<f64> {
    doc.elements().iter().find_map(|e| match e {
        Element::Rect {
            rect,
            fill: None,
            stroke: Some(stroke),
            ..
        } if *rect == thumb => Some(stroke.width),
        _ => None,
    })
}

#[test]
fn thumbnail_frame_follows_layout_strategy() {
    let s = style();
    assert!(s.timeline.thumbnail_border != s.card.border_width);
    let mut assets = AssetMap::default();
    assets.insert("a", "/tmp/a.png");

    let items = vec![Item::new("a", "A", ""), Item::new("b", "B", "")];
    let regions = compute_regions(&items, LayoutKind::Timeline, Canvas::default());
    let mut doc = SlideDocument::new(Canvas::default());
    let g = render_card(&mut doc, &items[0], &regions[0], &assets, &s);
    let frame = thumbnail_frame_width(&doc, g.thumbnail.unwrap());
    assert_eq!(frame, Some(s.timeline.thumbnail_border));

    let mut doc = SlideDocument::new(Canvas::default());
    let grid_cell = cell(Rect::new(0.0, 0.0, 800.0, 500.0));
    let g = render_card(&mut doc, &items[0], &grid_cell, &assets, &s);
    let frame = thumbnail_frame_width(&doc, g.thumbnail.unwrap());
    assert_eq!(frame, Some(s.card.border_width));
}
