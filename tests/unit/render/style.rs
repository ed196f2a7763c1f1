use super::*;

#[test]
fn tech_blue_colors_are_fixed() {
    let p = Palette::tech_blue();
    assert_eq!(p.background, Rgb8::new(10, 25, 47));
    assert_eq!(p.accent, Rgb8::new(0, 255, 255));
    assert_eq!(p.card, Rgb8::new(23, 42, 69));
    assert_eq!(p.border, Rgb8::new(45, 65, 95));
    assert_eq!(p.text_body, Rgb8::new(170, 190, 210));
}

#[test]
fn unknown_theme_resolves_to_tech_blue() {
    assert_eq!(Palette::for_theme("neon"), Palette::tech_blue());
    assert_eq!(Palette::for_theme(" TECH_BLUE "), Palette::tech_blue());
}

#[test]
fn card_metrics_scale_with_canvas() {
    let big = CardStyle::for_canvas(Canvas::default());
    let small = CardStyle::for_canvas(Canvas::widescreen(960).unwrap());
    assert!((big.padding - 24.0).abs() < 1e-9);
    assert!((big.padding - 2.0 * small.padding).abs() < 1e-9);
    // 20pt at 120 px per 72pt.
    assert!((big.title_size - 20.0 * 120.0 / 72.0).abs() < 1e-9);
    assert!(big.icon_large > big.icon_compact);
}
