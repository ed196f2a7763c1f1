//! Synthesized rasters that need no network and no fonts.

use std::path::Path;

use anyhow::Context;
use image::{Rgb, RgbImage};

use crate::{
    foundation::core::{Canvas, Rgb8},
    foundation::error::SlideResult,
    foundation::math::{fnv1a64_str, lerp_u8},
    render::style::Palette,
};

const MOCK_BACKGROUND: Rgb8 = Rgb8::new(10, 30, 60);
const MOCK_FRAME: Rgb8 = Rgb8::new(0, 255, 255);
const MOCK_RING: Rgb8 = Rgb8::new(255, 255, 255);

/// Deterministic stand-in illustration for `prompt`.
///
/// Frame and ring match the fixed mock style; the center disk is tinted by a hash of the
/// prompt so different items stay distinguishable.
pub fn mock_illustration(prompt: &str, size: u32) -> RgbImage {
    let size = size.max(16);
    let s = f64::from(size) / 1024.0;
    let mut img = RgbImage::from_pixel(size, size, px(MOCK_BACKGROUND));

    let inset = (50.0 * s).round() as u32;
    let frame_w = ((5.0 * s).round() as u32).max(1);
    stroke_rect(
        &mut img,
        inset,
        inset,
        size.saturating_sub(2 * inset),
        size.saturating_sub(2 * inset),
        frame_w,
        MOCK_FRAME,
    );

    let c = f64::from(size) / 2.0;
    stroke_circle(&mut img, c, c, 212.0 * s, (2.0 * s).max(1.0), MOCK_RING);
    fill_circle(&mut img, c, c, 120.0 * s, prompt_tint(prompt));
    img
}

/// Decorative full-canvas background: vertical gradient with a faint unit grid.
pub fn background_art(canvas: Canvas, palette: &Palette) -> RgbImage {
    let (w, h) = (canvas.width, canvas.height);
    let top = palette.background;
    let bottom = palette.card;
    let mut img = RgbImage::new(w, h);
    for y in 0..h {
        let t = f64::from(y) / f64::from(h.max(2) - 1);
        let row = Rgb([
            lerp_u8(top.r, bottom.r, t),
            lerp_u8(top.g, bottom.g, t),
            lerp_u8(top.b, bottom.b, t),
        ]);
        for x in 0..w {
            img.put_pixel(x, y, row);
        }
    }

    let step = (canvas.unit() / 2.0).round().max(4.0) as u32;
    let line = palette.border;
    for y in (0..h).step_by(step as usize) {
        for x in 0..w {
            blend_pixel(&mut img, x, y, line, 0.35);
        }
    }
    for x in (0..w).step_by(step as usize) {
        for y in 0..h {
            blend_pixel(&mut img, x, y, line, 0.35);
        }
    }
    img
}

/// Text-less placeholder frame, used when even SVG rasterization is unavailable.
pub fn bare_placeholder(width: u32, height: u32, palette: &Palette) -> RgbImage {
    let (width, height) = (width.max(1), height.max(1));
    let mut img = RgbImage::from_pixel(width, height, px(palette.background));
    let inset = (width.min(height) / 14).max(1);
    let frame_w = (width.min(height) / 144).max(1);
    stroke_rect(
        &mut img,
        inset,
        inset,
        width.saturating_sub(2 * inset),
        height.saturating_sub(2 * inset),
        frame_w,
        palette.accent,
    );
    img
}

pub fn save_png(img: &RgbImage, path: &Path) -> SlideResult<()> {
    img.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write png to '{}'", path.display()))?;
    Ok(())
}

fn prompt_tint(prompt: &str) -> Rgb8 {
    let hue = (fnv1a64_str(prompt) % 360) as f64;
    hsv_to_rgb(hue, 0.65, 0.9)
}

fn hsv_to_rgb(h: f64, s: f64, v: f64) -> Rgb8 {
    let c = v * s;
    let hp = (h % 360.0) / 60.0;
    let x = c * (1.0 - ((hp % 2.0) - 1.0).abs());
    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = v - c;
    let to_u8 = |f: f64| ((f + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgb8::new(to_u8(r), to_u8(g), to_u8(b))
}

fn px(c: Rgb8) -> Rgb<u8> {
    Rgb(c.to_array())
}

fn blend_pixel(img: &mut RgbImage, x: u32, y: u32, c: Rgb8, alpha: f64) {
    let p = img.get_pixel_mut(x, y);
    p.0 = [
        lerp_u8(p.0[0], c.r, alpha),
        lerp_u8(p.0[1], c.g, alpha),
        lerp_u8(p.0[2], c.b, alpha),
    ];
}

fn stroke_rect(img: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, line_w: u32, c: Rgb8) {
    let (iw, ih) = img.dimensions();
    let x1 = (x + w).min(iw);
    let y1 = (y + h).min(ih);
    for py in y.min(ih)..y1 {
        for pxx in x.min(iw)..x1 {
            let on_edge = pxx < x + line_w
                || pxx + line_w >= x1
                || py < y + line_w
                || py + line_w >= y1;
            if on_edge {
                img.put_pixel(pxx, py, px(c));
            }
        }
    }
}

fn stroke_circle(img: &mut RgbImage, cx: f64, cy: f64, r: f64, line_w: f64, c: Rgb8) {
    let (inner, outer) = ((r - line_w / 2.0).max(0.0), r + line_w / 2.0);
    for_each_in_radius(img, cx, cy, outer, |img, x, y, d| {
        if d >= inner {
            img.put_pixel(x, y, px(c));
        }
    });
}

fn fill_circle(img: &mut RgbImage, cx: f64, cy: f64, r: f64, c: Rgb8) {
    for_each_in_radius(img, cx, cy, r, |img, x, y, _| img.put_pixel(x, y, px(c)));
}

fn for_each_in_radius(
    img: &mut RgbImage,
    cx: f64,
    cy: f64,
    r: f64,
    mut f: impl FnMut(&mut RgbImage, u32, u32, f64),
) {
    let (w, h) = img.dimensions();
    let x0 = (cx - r).floor().max(0.0) as u32;
    let y0 = (cy - r).floor().max(0.0) as u32;
    let x1 = ((cx + r).ceil() as u32).min(w);
    let y1 = ((cy + r).ceil() as u32).min(h);
    for y in y0..y1 {
        for x in x0..x1 {
            let dx = f64::from(x) + 0.5 - cx;
            let dy = f64::from(y) + 0.5 - cy;
            let d = (dx * dx + dy * dy).sqrt();
            if d <= r {
                f(img, x, y, d);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/raster.rs"]
mod tests;
