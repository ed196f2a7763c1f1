use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    foundation::core::{Canvas, Point, Rect, Rgb8},
    foundation::error::SlideResult,
    render::svg,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Rgb8,
    pub width: f64,
}

impl Stroke {
    pub fn new(color: Rgb8, width: f64) -> Self {
        Self { color, width }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Start,
    Center,
}

#[derive(Clone, Debug, PartialEq)]
/// Text placed inside a bounding box; wrapped and truncated at serialization time.
pub struct TextBox {
    pub rect: Rect,
    pub text: String,
    /// Font size in pixels.
    pub size: f64,
    pub bold: bool,
    pub color: Rgb8,
    pub align: TextAlign,
}

impl TextBox {
    pub fn new(rect: Rect, text: impl Into<String>, size: f64, color: Rgb8) -> Self {
        Self {
            rect,
            text: text.into(),
            size,
            bold: false,
            color,
            align: TextAlign::Start,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn centered(mut self) -> Self {
        self.align = TextAlign::Center;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
/// One drawing primitive, painted in document order.
pub enum Element {
    Rect {
        rect: Rect,
        fill: Option<Rgb8>,
        stroke: Option<Stroke>,
        corner_radius: f64,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Ellipse {
        rect: Rect,
        fill: Option<Rgb8>,
        stroke: Option<Stroke>,
    },
    Text(TextBox),
    Picture {
        rect: Rect,
        path: PathBuf,
    },
}

impl Element {
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Rect { rect, .. } | Self::Ellipse { rect, .. } | Self::Picture { rect, .. } => {
                *rect
            }
            Self::Line { from, to, .. } => Rect::from_points(*from, *to),
            Self::Text(t) => t.rect,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Single-page document assembled by the renderer.
pub struct SlideDocument {
    canvas: Canvas,
    elements: Vec<Element>,
}

impl SlideDocument {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            elements: Vec::new(),
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn fill_rect(&mut self, rect: Rect, fill: Rgb8) {
        self.push(Element::Rect {
            rect,
            fill: Some(fill),
            stroke: None,
            corner_radius: 0.0,
        });
    }

    pub fn text(&mut self, text: TextBox) {
        if !text.text.trim().is_empty() {
            self.push(Element::Text(text));
        }
    }

    pub fn picture(&mut self, rect: Rect, path: impl Into<PathBuf>) {
        self.push(Element::Picture {
            rect,
            path: path.into(),
        });
    }

    /// Paths of every embedded picture, in paint order.
    pub fn pictures(&self) -> impl Iterator<Item = &Path> {
        self.elements.iter().filter_map(|e| match e {
            Element::Picture { path, .. } => Some(path.as_path()),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextBox> {
        self.elements.iter().filter_map(|e| match e {
            Element::Text(t) => Some(t),
            _ => None,
        })
    }

    pub fn to_svg(&self) -> String {
        svg::write_document(self)
    }

    #[tracing::instrument(skip(self), fields(elements = self.elements.len()))]
    pub fn save_svg(&self, path: &Path) -> SlideResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create document dir '{}'", parent.display()))?;
        }
        std::fs::write(path, self.to_svg())
            .with_context(|| format!("write document '{}'", path.display()))?;
        tracing::debug!(path = %path.display(), "document saved");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/document.rs"]
mod tests;
