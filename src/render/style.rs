use crate::foundation::core::{Canvas, Rgb8};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
/// Slide colors. Only the `tech_blue` theme exists; every theme name resolves to it.
pub struct Palette {
    pub background: Rgb8,
    pub accent: Rgb8,
    pub card: Rgb8,
    pub border: Rgb8,
    pub text_heading: Rgb8,
    pub text_body: Rgb8,
    /// Fill behind alternating spec rows.
    pub row_tint: Rgb8,
}

impl Palette {
    pub const fn tech_blue() -> Self {
        Self {
            background: Rgb8::new(10, 25, 47),
            accent: Rgb8::new(0, 255, 255),
            card: Rgb8::new(23, 42, 69),
            border: Rgb8::new(45, 65, 95),
            text_heading: Rgb8::new(255, 255, 255),
            text_body: Rgb8::new(170, 190, 210),
            row_tint: Rgb8::new(30, 52, 84),
        }
    }

    pub fn for_theme(theme: &str) -> Self {
        if !theme.trim().eq_ignore_ascii_case("tech_blue") {
            tracing::debug!(theme, "unknown theme, using tech_blue");
        }
        Self::tech_blue()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::tech_blue()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Card metrics in pixels, derived from the canvas.
pub struct CardStyle {
    pub padding: f64,
    pub corner_radius: f64,
    pub border_width: f64,
    /// Thumbnail edge when the item has specs.
    pub icon_compact: f64,
    /// Thumbnail edge when the item has no specs.
    pub icon_large: f64,
    pub title_band: f64,
    pub title_size: f64,
    pub desc_size: f64,
    pub spec_size: f64,
    /// Share of the card height given to the description when specs follow it.
    pub desc_fraction: f64,
    pub separator_gap: f64,
    pub separator_width: f64,
    pub rows_top_gap: f64,
    pub min_row_height: f64,
    pub key_column: f64,
    pub value_gap: f64,
}

impl CardStyle {
    pub fn for_canvas(canvas: Canvas) -> Self {
        let u = |v: f64| canvas.units(v);
        Self {
            padding: u(0.2),
            corner_radius: u(0.08),
            border_width: u(0.015).max(1.0),
            icon_compact: u(0.8),
            icon_large: u(1.2),
            title_band: u(0.5),
            title_size: canvas.pt(20.0),
            desc_size: canvas.pt(14.0),
            spec_size: canvas.pt(12.0),
            desc_fraction: 0.25,
            separator_gap: u(0.1),
            separator_width: u(0.01).max(1.0),
            rows_top_gap: u(0.1),
            min_row_height: u(0.15),
            key_column: u(1.4),
            value_gap: u(0.1),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Title band metrics.
pub struct HeaderStyle {
    /// Accent bar left of the title: x, y, width, height.
    pub bar: (f64, f64, f64, f64),
    pub title_x: f64,
    pub title_y: f64,
    pub title_height: f64,
    pub title_size: f64,
    pub subtitle_y: f64,
    pub subtitle_height: f64,
    pub subtitle_size: f64,
}

impl HeaderStyle {
    pub fn for_canvas(canvas: Canvas) -> Self {
        let u = |v: f64| canvas.units(v);
        Self {
            bar: (u(0.5), u(0.4), u(0.15), u(0.8)),
            title_x: u(0.8),
            title_y: u(0.3),
            title_height: u(0.8),
            title_size: canvas.pt(40.0),
            subtitle_y: u(1.15),
            subtitle_height: u(0.45),
            subtitle_size: canvas.pt(18.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Timeline spine and marker drawing metrics.
pub struct TimelineStyle {
    pub spine_width: f64,
    pub marker_stroke: f64,
    pub thumbnail_border: f64,
}

impl TimelineStyle {
    pub fn for_canvas(canvas: Canvas) -> Self {
        Self {
            spine_width: canvas.units(0.03).max(1.0),
            marker_stroke: canvas.units(0.025).max(1.0),
            thumbnail_border: canvas.units(0.02).max(1.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Everything the renderer needs to draw one slide.
pub struct SlideStyle {
    pub palette: Palette,
    pub card: CardStyle,
    pub header: HeaderStyle,
    pub timeline: TimelineStyle,
}

impl SlideStyle {
    pub fn new(canvas: Canvas, theme: &str) -> Self {
        Self {
            palette: Palette::for_theme(theme),
            card: CardStyle::for_canvas(canvas),
            header: HeaderStyle::for_canvas(canvas),
            timeline: TimelineStyle::for_canvas(canvas),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/style.rs"]
mod tests;
