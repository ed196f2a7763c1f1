use super::*;
use crate::{
    export::bridge::{BridgeKind, UnavailableBridge},
    foundation::error::{SlideError, SlideResult},
};

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "slidegen_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

struct Failing;

impl RasterBridge for Failing {
    fn name(&self) -> &str {
        "failing"
    }

    fn probe(&self) -> bool {
        true
    }

    fn rasterize(&self, _document: &Path, _output: &Path) -> SlideResult<PathBuf> {
        Err(SlideError::export("automation host crashed"))
    }
}

struct Panicking;

impl RasterBridge for Panicking {
    fn name(&self) -> &str {
        "panicking"
    }

    fn probe(&self) -> bool {
        true
    }

    fn rasterize(&self, _document: &Path, _output: &Path) -> SlideResult<PathBuf> {
        panic!("bridge bug")
    }
}

fn small() -> PlaceholderSize {
    PlaceholderSize {
        width: 160,
        height: 90,
    }
}

fn assert_usable_image(path: &Path) {
    assert!(path.is_file(), "missing {}", path.display());
    let img = image::open(path).unwrap();
    assert!(img.width() >= 1 && img.height() >= 1);
}

#[test]
fn failing_bridge_yields_placeholder_next_to_document() {
    let dir = temp_dir("export_failing");
    let doc = dir.join("slide.svg");
    let exporter = Exporter::new(Box::new(Failing), small());
    let out = exporter.export(&doc);
    assert_eq!(out, dir.join("slide.png"));
    assert_usable_image(&out);
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn unavailable_bridge_yields_placeholder() {
    let dir = temp_dir("export_unavailable");
    let exporter = Exporter::new(Box::new(UnavailableBridge), small());
    assert_eq!(exporter.bridge_name(), "unavailable");
    let out = exporter.export(&dir.join("slide.svg"));
    assert_usable_image(&out);
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn panicking_bridge_still_yields_image() {
    let dir = temp_dir("export_panicking");
    let exporter = Exporter::new(Box::new(Panicking), small());
    let out = exporter.export(&dir.join("slide.svg"));
    assert_usable_image(&out);
    std::fs::remove_dir_all(&dir).ok();
}

#[cfg(unix)]
#[test]
fn unwritable_directory_falls_back_to_temp() {
    let dir = temp_dir("export_blocked");
    std::fs::create_dir_all(&dir).unwrap();
    // A regular file where the output directory should be.
    let blocker = dir.join("blocked");
    std::fs::write(&blocker, b"file").unwrap();
    let exporter = Exporter::new(Box::new(Failing), small());
    let out = exporter.export(&blocker.join("slide.svg"));
    assert!(out.starts_with(std::env::temp_dir()));
    assert_usable_image(&out);
    std::fs::remove_file(&out).ok();
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn svg_bridge_rasterizes_saved_document() {
    let dir = temp_dir("export_svg");
    std::fs::create_dir_all(&dir).unwrap();
    let doc = dir.join("slide.svg");
    std::fs::write(
        &doc,
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="48" height="27"><rect width="48" height="27" fill="#172a45"/></svg>"##,
    )
    .unwrap();
    let config = PipelineConfig::default().with_bridges(vec![BridgeKind::Svg]);
    let exporter = Exporter::from_config(&config);
    assert_eq!(exporter.bridge_name(), "resvg");
    let out = exporter.export(&doc);
    let img = image::open(&out).unwrap().to_rgb8();
    assert_eq!(img.dimensions(), (48, 27));
    assert_eq!(img.get_pixel(1, 1).0, [23, 42, 69]);
    std::fs::remove_dir_all(&dir).ok();
}
