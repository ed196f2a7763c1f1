use std::path::Path;

use crate::{
    assets::resolver::AssetMap,
    foundation::core::{Point, Rect},
    layout::SlideLayout,
    plan::model::Plan,
    render::{
        card::render_card,
        document::{Element, SlideDocument, Stroke, TextBox},
        style::SlideStyle,
    },
};

/// Assemble the full slide: background, header, timeline decoration, then cards in item order.
#[tracing::instrument(skip_all, fields(items = plan.items().len(), layout = layout.kind.as_str()))]
pub fn compose_slide(
    plan: &Plan,
    layout: &SlideLayout,
    assets: &AssetMap,
    background: Option<&Path>,
    style: &SlideStyle,
) -> SlideDocument {
    let canvas = layout.metrics.canvas;
    let mut doc = SlideDocument::new(canvas);
    doc.fill_rect(canvas.bounds(), style.palette.background);
    if let Some(path) = background {
        doc.picture(canvas.bounds(), path);
    }

    draw_header(&mut doc, plan, style);

    if let Some(spine) = layout.spine {
        doc.push(Element::Line {
            from: spine.start,
            to: spine.end,
            stroke: Stroke::new(style.palette.accent, style.timeline.spine_width),
        });
        for region in &layout.regions {
            if let Some(marker) = region.marker() {
                draw_marker(&mut doc, marker, layout.metrics.marker_radius, style);
            }
        }
    }

    for (item, region) in plan.items().iter().zip(&layout.regions) {
        render_card(&mut doc, item, region, assets, style);
    }

    tracing::debug!(elements = doc.len(), "slide composed");
    doc
}

fn draw_header(doc: &mut SlideDocument, plan: &Plan, style: &SlideStyle) {
    let h = &style.header;
    let p = &style.palette;
    let width = doc.canvas().width_f64();
    let right = width - h.bar.0;

    let (bx, by, bw, bh) = h.bar;
    doc.fill_rect(Rect::new(bx, by, bx + bw, by + bh), p.accent);

    let title = Rect::new(h.title_x, h.title_y, right, h.title_y + h.title_height);
    doc.text(TextBox::new(title, &plan.content.main_title, h.title_size, p.text_heading).bold());

    let subtitle = Rect::new(
        h.title_x,
        h.subtitle_y,
        right,
        h.subtitle_y + h.subtitle_height,
    );
    doc.text(TextBox::new(subtitle, &plan.content.subtitle, h.subtitle_size, p.text_body));
}

fn draw_marker(doc: &mut SlideDocument, center: Point, radius: f64, style: &SlideStyle) {
    doc.push(Element::Ellipse {
        rect: Rect::from_center_size(center, (radius * 2.0, radius * 2.0)),
        fill: Some(style.palette.background),
        stroke: Some(Stroke::new(style.palette.accent, style.timeline.marker_stroke)),
    });
}

#[cfg(test)]
#[path = "../../tests/unit/render/slide.rs"]
mod tests;
