use std::path::{Path, PathBuf};

use crate::{
    assets::raster::{bare_placeholder, save_png},
    config::PlaceholderSize,
    export::svg_raster::{SvgRasterBridge, rasterize_svg, save_rgba_png},
    foundation::core::{Canvas, Rect},
    foundation::error::SlideResult,
    foundation::math::truncate_chars,
    render::{
        document::{Element, SlideDocument, Stroke, TextBox},
        style::Palette,
    },
};

pub const STATUS_HEADLINE: &str = "Slide generated successfully";
pub const STATUS_DETAIL: &str = "Preview unavailable on this platform";
/// Longest error excerpt shown on the placeholder.
pub const MAX_ERROR_CHARS: usize = 50;

/// Draws the fixed-size status image shown when no bridge could rasterize the document.
#[derive(Clone, Debug)]
pub struct PlaceholderRenderer {
    size: PlaceholderSize,
    palette: Palette,
    fonts: SvgRasterBridge,
}

impl PlaceholderRenderer {
    pub fn new(size: PlaceholderSize) -> Self {
        Self {
            size,
            palette: Palette::tech_blue(),
            fonts: SvgRasterBridge::new(),
        }
    }

    pub fn size(&self) -> PlaceholderSize {
        self.size
    }

    /// Status document: dark background, accent frame, headline, detail and error excerpt.
    pub fn document(&self, error: Option<&str>) -> SlideDocument {
        let (w, h) = (
            f64::from(self.size.width.max(1)),
            f64::from(self.size.height.max(1)),
        );
        let p = &self.palette;
        let mut doc = SlideDocument::new(Canvas {
            width: self.size.width.max(1),
            height: self.size.height.max(1),
        });
        doc.fill_rect(Rect::new(0.0, 0.0, w, h), p.background);

        let inset = (w.min(h) / 14.4).round();
        doc.push(Element::Rect {
            rect: Rect::new(inset, inset, w - inset, h - inset),
            fill: None,
            stroke: Some(Stroke::new(p.accent, (w.min(h) / 144.0).max(1.0))),
            corner_radius: 0.0,
        });

        let line =
            |top: f64, height: f64| Rect::new(inset * 2.0, top, w - inset * 2.0, top + height);
        let headline = h * 0.055;
        doc.text(
            TextBox::new(line(h * 0.36, headline * 1.4), STATUS_HEADLINE, headline, p.accent)
                .bold()
                .centered(),
        );
        let body = h * 0.033;
        doc.text(
            TextBox::new(line(h * 0.48, body * 1.4), STATUS_DETAIL, body, p.text_heading)
                .centered(),
        );
        if let Some(err) = error.map(str::trim).filter(|e| !e.is_empty()) {
            let excerpt = truncate_chars(err, MAX_ERROR_CHARS);
            doc.text(
                TextBox::new(line(h * 0.58, body * 1.4), excerpt, body * 0.8, p.text_body)
                    .centered(),
            );
        }
        doc
    }

    /// Write the placeholder to `output`; degrade to a text-less frame if SVG rasterization fails.
    pub fn write(&self, error: Option<&str>, output: &Path) -> SlideResult<PathBuf> {
        let svg = self.document(error).to_svg();
        match rasterize_svg(svg.as_bytes(), None, self.fonts.fontdb())
            .and_then(|img| save_rgba_png(&img, output))
        {
            Ok(()) => Ok(output.to_path_buf()),
            Err(e) => {
                tracing::warn!(error = %e, "placeholder text rendering failed, writing bare frame");
                let img = bare_placeholder(self.size.width, self.size.height, &self.palette);
                save_png(&img, output)?;
                Ok(output.to_path_buf())
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/placeholder.rs"]
mod tests;
