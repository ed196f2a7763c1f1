use crate::foundation::error::{SlideError, SlideResult};

pub use kurbo::{Point, Rect, Size};

/// Number of layout units across the canvas width.
///
/// All layout and style constants are expressed in these units so that every 16:9 canvas
/// size produces the same proportions.
pub const UNITS_ACROSS: f64 = 16.0;

/// Points per layout unit, used to convert typographic sizes.
const POINTS_PER_UNIT: f64 = 72.0;

/// Fixed 16:9 drawing surface, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> SlideResult<Self> {
        let canvas = Self { width, height };
        canvas.validate()?;
        Ok(canvas)
    }

    /// 16:9 canvas with the given width; the width must be a multiple of 16.
    pub fn widescreen(width: u32) -> SlideResult<Self> {
        if !width.is_multiple_of(16) {
            return Err(SlideError::validation(
                "widescreen canvas width must be a multiple of 16",
            ));
        }
        Self::new(width, width / 16 * 9)
    }

    pub fn validate(&self) -> SlideResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SlideError::validation("canvas width/height must be non-zero"));
        }
        if u64::from(self.width) * 9 != u64::from(self.height) * 16 {
            return Err(SlideError::validation(format!(
                "canvas must be 16:9, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    pub fn width_f64(self) -> f64 {
        f64::from(self.width)
    }

    pub fn height_f64(self) -> f64 {
        f64::from(self.height)
    }

    /// Pixels per layout unit.
    pub fn unit(self) -> f64 {
        self.width_f64() / UNITS_ACROSS
    }

    /// Convert a length in layout units to pixels.
    pub fn units(self, u: f64) -> f64 {
        u * self.unit()
    }

    /// Convert a typographic point size to pixels.
    pub fn pt(self, points: f64) -> f64 {
        points * self.unit() / POINTS_PER_UNIT
    }

    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, self.width_f64(), self.height_f64())
    }
}

/// Opaque sRGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` form used by the SVG writer.
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
