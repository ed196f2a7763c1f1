//! SVG serialization of [`SlideDocument`].
//!
//! Text is laid out here: lines are broken with an estimated glyph advance, and text that
//! does not fit its box is cut at the last visible line with an ellipsis.

use std::fmt::Write as _;

use crate::{
    foundation::core::Rect,
    render::document::{Element, SlideDocument, Stroke, TextAlign, TextBox},
};

pub const FONT_FAMILY: &str = "Arial, Helvetica, 'Noto Sans', 'DejaVu Sans', sans-serif";
const LINE_HEIGHT: f64 = 1.25;
const ELLIPSIS: char = '…';

pub fn write_document(doc: &SlideDocument) -> String {
    let canvas = doc.canvas();
    let mut out = String::with_capacity(4096 + doc.len() * 160);
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = canvas.width,
        h = canvas.height
    );
    for element in doc.elements() {
        write_element(&mut out, element);
    }
    out.push_str("</svg>\n");
    out
}

fn write_element(out: &mut String, element: &Element) {
    match element {
        Element::Rect {
            rect,
            fill,
            stroke,
            corner_radius,
        } => {
            let _ = write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                num(rect.x0),
                num(rect.y0),
                num(rect.width().max(0.0)),
                num(rect.height().max(0.0))
            );
            if *corner_radius > 0.0 {
                let r = corner_radius.min(rect.width().min(rect.height()).max(0.0) / 2.0);
                let _ = write!(out, r#" rx="{0}" ry="{0}""#, num(r));
            }
            paint_attrs(out, fill.map(|c| c.hex()), *stroke);
            out.push_str("/>\n");
        }
        Element::Line { from, to, stroke } => {
            let _ = write!(
                out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
                num(from.x),
                num(from.y),
                num(to.x),
                num(to.y)
            );
            paint_attrs(out, None, Some(*stroke));
            out.push_str("/>\n");
        }
        Element::Ellipse { rect, fill, stroke } => {
            let c = rect.center();
            let _ = write!(
                out,
                r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}""#,
                num(c.x),
                num(c.y),
                num(rect.width().max(0.0) / 2.0),
                num(rect.height().max(0.0) / 2.0)
            );
            paint_attrs(out, fill.map(|c| c.hex()), *stroke);
            out.push_str("/>\n");
        }
        Element::Text(text) => write_text(out, text),
        Element::Picture { rect, path } => {
            // Relative hrefs would resolve against the document's directory, not the cwd.
            let abs = std::path::absolute(path).unwrap_or_else(|_| path.clone());
            let href = escape_xml(&abs.to_string_lossy());
            let _ = writeln!(
                out,
                r#"<image x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="xMidYMid slice" href="{href}" xlink:href="{href}"/>"#,
                num(rect.x0),
                num(rect.y0),
                num(rect.width().max(0.0)),
                num(rect.height().max(0.0))
            );
        }
    }
}

fn paint_attrs(out: &mut String, fill: Option<String>, stroke: Option<Stroke>) {
    match fill {
        Some(hex) => {
            let _ = write!(out, r#" fill="{hex}""#);
        }
        None => out.push_str(r#" fill="none""#),
    }
    if let Some(s) = stroke {
        let _ = write!(
            out,
            r#" stroke="{}" stroke-width="{}""#,
            s.color.hex(),
            num(s.width)
        );
    }
}

fn write_text(out: &mut String, text: &TextBox) {
    let lines = fit_lines(&text.text, text.rect, text.size, text.bold);
    if lines.is_empty() {
        return;
    }
    let (x, anchor) = match text.align {
        TextAlign::Start => (text.rect.x0, "start"),
        TextAlign::Center => (text.rect.center().x, "middle"),
    };
    let weight = if text.bold { "bold" } else { "normal" };
    let _ = write!(
        out,
        r#"<text font-family="{}" font-size="{}" font-weight="{weight}" fill="{}" text-anchor="{anchor}">"#,
        escape_xml(FONT_FAMILY),
        num(text.size),
        text.color.hex()
    );
    let line_h = text.size * LINE_HEIGHT;
    for (i, line) in lines.iter().enumerate() {
        // Baseline sits roughly one ascent below the top of each line box.
        let y = text.rect.y0 + (i as f64) * line_h + text.size * 0.95;
        let _ = write!(
            out,
            r#"<tspan x="{}" y="{}">{}</tspan>"#,
            num(x),
            num(y),
            escape_xml(line)
        );
    }
    out.push_str("</text>\n");
}

/// Estimated advance of one glyph at `size` pixels.
pub fn glyph_advance(c: char, size: f64, bold: bool) -> f64 {
    let factor = if is_wide(c) {
        1.0
    } else if c == ' ' {
        0.3
    } else if c.is_ascii_uppercase() || c.is_ascii_digit() {
        0.62
    } else {
        0.52
    };
    let weight = if bold { 1.06 } else { 1.0 };
    size * factor * weight
}

pub fn estimate_width(s: &str, size: f64, bold: bool) -> f64 {
    s.chars().map(|c| glyph_advance(c, size, bold)).sum()
}

fn is_wide(c: char) -> bool {
    matches!(u32::from(c),
        0x1100..=0x115F
        | 0x2E80..=0xA4CF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6
        | 0x1F300..=0x1FAFF)
}

/// Greedy line breaking at spaces; words wider than the box are split per character.
pub fn wrap_text(text: &str, max_width: f64, size: f64, bold: bool) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        let mut line_w = 0.0;
        for word in paragraph.split_whitespace() {
            let word_w = estimate_width(word, size, bold);
            let space_w = if line.is_empty() {
                0.0
            } else {
                glyph_advance(' ', size, bold)
            };
            if line_w + space_w + word_w <= max_width {
                if !line.is_empty() {
                    line.push(' ');
                }
                line.push_str(word);
                line_w += space_w + word_w;
                continue;
            }
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                line_w = 0.0;
            }
            for c in word.chars() {
                let w = glyph_advance(c, size, bold);
                if line_w + w > max_width && !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                    line_w = 0.0;
                }
                line.push(c);
                line_w += w;
            }
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }
    lines
}

/// Wrapped lines that fit `rect`; the last visible line ends with an ellipsis when cut.
pub fn fit_lines(text: &str, rect: Rect, size: f64, bold: bool) -> Vec<String> {
    if size <= 0.0 || rect.width() <= 0.0 {
        return Vec::new();
    }
    let mut lines = wrap_text(text, rect.width(), size, bold);
    let max_lines = ((rect.height().max(0.0) / (size * LINE_HEIGHT)).floor() as usize).max(1);
    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let ellipsis_w = glyph_advance(ELLIPSIS, size, bold);
            while !last.is_empty() && estimate_width(last, size, bold) + ellipsis_w > rect.width()
            {
                last.pop();
            }
            let trimmed = last.trim_end().len();
            last.truncate(trimmed);
            last.push(ELLIPSIS);
        }
    }
    lines
}

pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if (c as u32) < 0x20 && c != '\t' && c != '\n' && c != '\r' => {}
            c => out.push(c),
        }
    }
    out
}

fn num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let rounded = (v * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded}")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
