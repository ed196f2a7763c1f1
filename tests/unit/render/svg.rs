use super::*;
use crate::{foundation::core::Canvas, render::style::Palette};

#[test]
fn escape_xml_handles_markup_and_controls() {
    assert_eq!(escape_xml(r#"a<b>&"c'"#), "a&lt;b&gt;&amp;&quot;c&apos;");
    assert_eq!(escape_xml("x\u{1}y"), "xy");
}

#[test]
fn wrap_breaks_at_spaces_within_width() {
    let size = 10.0;
    let max = estimate_width("hello world", size, false) + 0.1;
    let lines = wrap_text("hello world again", max, size, false);
    assert_eq!(lines, vec!["hello world", "again"]);
}

#[test]
fn long_words_split_per_character() {
    let max = glyph_advance('a', 10.0, false) * 4.0 + 0.01;
    let lines = wrap_text("abcdefghij", max, 10.0, false);
    assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
}

#[test]
fn cjk_glyphs_are_wider() {
    assert!(glyph_advance('中', 10.0, false) > glyph_advance('a', 10.0, false));
}

#[test]
fn overflow_is_truncated_with_ellipsis() {
    let rect = Rect::new(0.0, 0.0, 60.0, 26.0);
    let lines = fit_lines("one two three four five six seven eight", rect, 10.0, false);
    assert_eq!(lines.len(), 2);
    assert!(lines[1].ends_with('…'));
    for l in &lines {
        assert!(estimate_width(l, 10.0, false) <= 60.0 + 1e-9);
    }
}

#[test]
fn tiny_box_still_shows_one_line() {
    let lines = fit_lines("word", Rect::new(0.0, 0.0, 100.0, 1.0), 10.0, false);
    assert_eq!(lines, vec!["word"]);
    assert!(fit_lines("word", Rect::new(0.0, 0.0, 0.0, 10.0), 10.0, false).is_empty());
}

#[test]
fn document_serializes_every_element_kind() {
    let p = Palette::tech_blue();
    let mut doc = SlideDocument::new(Canvas::default());
    doc.push(Element::Rect {
        rect: Rect::new(0.0, 0.0, 100.0, 50.0),
        fill: Some(p.card),
        stroke: Some(Stroke::new(p.border, 2.0)),
        corner_radius: 8.0,
    });
    doc.push(Element::Line {
        from: kurbo::Point::new(0.0, 0.0),
        to: kurbo::Point::new(10.0, 0.0),
        stroke: Stroke::new(p.accent, 1.5),
    });
    doc.push(Element::Ellipse {
        rect: Rect::new(0.0, 0.0, 10.0, 10.0),
        fill: None,
        stroke: Some(Stroke::new(p.accent, 1.0)),
    });
    let label = TextBox::new(Rect::new(0.0, 0.0, 300.0, 40.0), "A & B", 16.0, p.text_heading);
    doc.text(label.bold());
    doc.picture(Rect::new(0.0, 0.0, 10.0, 10.0), "/tmp/x y.png");

    let svg = doc.to_svg();
    assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg""#));
    assert!(svg.contains(r#"width="1920" height="1080""#));
    assert!(svg.contains(r#"rx="8""#));
    assert!(svg.contains(r#"stroke-width="1.5""#));
    assert!(svg.contains("<ellipse"));
    assert!(svg.contains("A &amp; B"));
    assert!(svg.contains(r#"font-weight="bold""#));
    assert!(svg.contains(r#"href="/tmp/x y.png""#));
    assert!(svg.trim_end().ends_with("</svg>"));

    usvg::Tree::from_str(&svg, &usvg::Options::default()).unwrap();
}

#[test]
fn relative_picture_paths_are_written_absolute() {
    let mut doc = SlideDocument::new(Canvas::default());
    doc.picture(Rect::new(0.0, 0.0, 10.0, 10.0), "out/assets/a.png");
    let svg = doc.to_svg();
    let expected = std::env::current_dir().unwrap().join("out/assets/a.png");
    assert!(svg.contains(&format!(r#"href="{}""#, expected.display())));
}
