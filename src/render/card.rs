use crate::{
    assets::resolver::AssetMap,
    foundation::core::{Point, Rect},
    layout::region::Region,
    plan::model::Item,
    render::{
        document::{Element, SlideDocument, Stroke, TextBox},
        style::{CardStyle, SlideStyle},
    },
};

#[derive(Clone, Debug, PartialEq)]
/// One spec row: tinted band plus label and value boxes.
pub struct SpecRow {
    pub band: Rect,
    pub label: Rect,
    pub value: Rect,
    pub tinted: bool,
}

#[derive(Clone, Debug, PartialEq)]
/// Sub-layout of one card, computed before anything is drawn.
pub struct CardGeometry {
    pub card: Rect,
    pub thumbnail: Option<Rect>,
    pub title: Rect,
    pub description: Rect,
    pub separator: Option<(Point, Point)>,
    pub spec_rows: Vec<SpecRow>,
}

/// Allocate the bands of a card.
///
/// Depends only on the item, its region and the style, so grid and timeline share it. The
/// region decides where a thumbnail goes: timeline regions carry a slot above the spine,
/// otherwise the thumbnail sits in the top-left corner and the text moves right of it.
pub fn layout_card(
    item: &Item,
    region: &Region,
    has_asset: bool,
    style: &CardStyle,
) -> CardGeometry {
    let card = region.rect;
    let pad = style.padding;
    let inner = shrink(card, pad);

    let (thumbnail, text_x0, inline_thumb_bottom) = match region.thumbnail_slot() {
        Some(slot) => (has_asset.then_some(slot), inner.x0, inner.y0),
        None if has_asset => {
            let wanted = if item.has_specs() {
                style.icon_compact
            } else {
                style.icon_large
            };
            let edge = wanted.min(inner.width() * 0.4).min(inner.height()).max(0.0);
            let thumb = Rect::new(inner.x0, inner.y0, inner.x0 + edge, inner.y0 + edge);
            (Some(thumb), (thumb.x1 + pad).min(inner.x1), thumb.y1)
        }
        None => (None, inner.x0, inner.y0),
    };

    let title = Rect::new(
        text_x0,
        inner.y0,
        inner.x1,
        (inner.y0 + style.title_band).min(inner.y1),
    );

    if !item.has_specs() {
        return CardGeometry {
            card,
            thumbnail,
            title,
            description: Rect::new(text_x0, title.y1, inner.x1, inner.y1),
            separator: None,
            spec_rows: Vec::new(),
        };
    }

    let desc_bottom = (title.y1 + style.desc_fraction * card.height()).min(inner.y1);
    let description = Rect::new(text_x0, title.y1, inner.x1, desc_bottom);

    let sep_y = (description.y1.max(inline_thumb_bottom) + style.separator_gap).min(inner.y1);
    let separator = (Point::new(inner.x0, sep_y), Point::new(inner.x1, sep_y));

    let rows_top = sep_y + style.rows_top_gap;
    let remaining = inner.y1 - rows_top;
    let n = item.specs.len() as f64;
    let row_h = if remaining > 0.0 {
        remaining / n
    } else {
        style.min_row_height
    };

    let label_x1 = (inner.x0 + style.key_column).min(inner.x1);
    let value_x0 = (label_x1 + style.value_gap).min(inner.x1);
    let text_h = (style.spec_size * 1.25).min(row_h);
    let spec_rows = (0..item.specs.len())
        .map(|i| {
            let y0 = rows_top + (i as f64) * row_h;
            let band = Rect::new(inner.x0, y0, inner.x1, y0 + row_h);
            let ty = y0 + (row_h - text_h) / 2.0;
            SpecRow {
                band,
                label: Rect::new(inner.x0 + pad / 2.0, ty, label_x1, ty + text_h),
                value: Rect::new(value_x0, ty, inner.x1, ty + text_h),
                tinted: i % 2 == 1,
            }
        })
        .collect();

    CardGeometry {
        card,
        thumbnail,
        title,
        description,
        separator: Some(separator),
        spec_rows,
    }
}

/// Draw one card into `doc` and return the geometry used.
pub fn render_card(
    doc: &mut SlideDocument,
    item: &Item,
    region: &Region,
    assets: &AssetMap,
    style: &SlideStyle,
) -> CardGeometry {
    let asset = assets.get(&item.id);
    let geom = layout_card(item, region, asset.is_some(), &style.card);
    let (p, cs) = (&style.palette, &style.card);

    doc.push(Element::Rect {
        rect: geom.card,
        fill: Some(p.card),
        stroke: Some(Stroke::new(p.border, cs.border_width)),
        corner_radius: cs.corner_radius,
    });

    if let (Some(rect), Some(path)) = (geom.thumbnail, asset) {
        let frame = if region.thumbnail_slot().is_some() {
            style.timeline.thumbnail_border
        } else {
            cs.border_width
        };
        doc.picture(rect, path);
        doc.push(Element::Rect {
            rect,
            fill: None,
            stroke: Some(Stroke::new(p.border, frame)),
            corner_radius: 0.0,
        });
    }

    doc.text(TextBox::new(geom.title, &item.title, cs.title_size, p.text_heading).bold());
    doc.text(TextBox::new(geom.description, &item.desc, cs.desc_size, p.text_body));

    if let Some((from, to)) = geom.separator {
        doc.push(Element::Line {
            from,
            to,
            stroke: Stroke::new(p.border, cs.separator_width),
        });
    }

    for (row, (label, value)) in geom.spec_rows.iter().zip(&item.specs) {
        if row.tinted {
            doc.fill_rect(row.band, p.row_tint);
        }
        doc.text(TextBox::new(row.label, format!("● {label}"), cs.spec_size, p.accent).bold());
        doc.text(TextBox::new(row.value, value, cs.spec_size, p.text_body));
    }

    geom
}

fn shrink(rect: Rect, pad: f64) -> Rect {
    let dx = pad.min(rect.width().max(0.0) / 2.0);
    let dy = pad.min(rect.height().max(0.0) / 2.0);
    Rect::new(rect.x0 + dx, rect.y0 + dy, rect.x1 - dx, rect.y1 - dy)
}

#[cfg(test)]
#[path = "../../tests/unit/render/card.rs"]
mod tests;
