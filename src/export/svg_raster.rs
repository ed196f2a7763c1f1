use std::{
    path::{Path, PathBuf},
    sync::{Arc, OnceLock},
};

use anyhow::Context;
use image::RgbaImage;

use crate::{
    export::bridge::RasterBridge,
    foundation::error::{SlideError, SlideResult},
};

const MAX_DIM: u32 = 16_384;

/// In-process rasterizer backed by `usvg` + `resvg`; always available.
#[derive(Clone, Debug, Default)]
pub struct SvgRasterBridge {
    fontdb: OnceLock<Arc<usvg::fontdb::Database>>,
}

impl SvgRasterBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// System fonts, loaded on first use and shared by every later call.
    pub(crate) fn fontdb(&self) -> Arc<usvg::fontdb::Database> {
        self.fontdb
            .get_or_init(|| {
                let mut db = usvg::fontdb::Database::new();
                db.load_system_fonts();
                tracing::debug!(faces = db.len(), "system fonts loaded");
                Arc::new(db)
            })
            .clone()
    }
}

impl RasterBridge for SvgRasterBridge {
    fn name(&self) -> &str {
        "resvg"
    }

    fn probe(&self) -> bool {
        true
    }

    #[tracing::instrument(skip(self))]
    fn rasterize(&self, document: &Path, output: &Path) -> SlideResult<PathBuf> {
        let bytes = std::fs::read(document)
            .with_context(|| format!("read document '{}'", document.display()))?;
        let img = rasterize_svg(&bytes, document.parent(), self.fontdb())?;
        save_rgba_png(&img, output)?;
        Ok(output.to_path_buf())
    }
}

/// Parse and rasterize SVG bytes at their intrinsic size.
///
/// Relative picture paths resolve against `resources_dir`.
pub fn rasterize_svg(
    bytes: &[u8],
    resources_dir: Option<&Path>,
    fontdb: Arc<usvg::fontdb::Database>,
) -> SlideResult<RgbaImage> {
    let opts = usvg::Options {
        resources_dir: resources_dir.map(Path::to_path_buf),
        fontdb,
        ..Default::default()
    };
    let tree = usvg::Tree::from_data(bytes, &opts).with_context(|| "parse svg tree")?;

    let size = tree.size().to_int_size();
    let (w, h) = (size.width(), size.height());
    if w > MAX_DIM || h > MAX_DIM {
        return Err(SlideError::render(format!(
            "svg raster size too large: {w}x{h} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }
    let mut pixmap = resvg::tiny_skia::Pixmap::new(w, h)
        .ok_or_else(|| SlideError::render("failed to allocate svg pixmap"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::default(),
        &mut pixmap.as_mut(),
    );

    let mut data = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.pixels() {
        let c = px.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    RgbaImage::from_raw(w, h, data)
        .ok_or_else(|| SlideError::render("pixmap size does not match its buffer"))
}

pub fn save_rgba_png(img: &RgbaImage, path: &Path) -> SlideResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    img.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/export/svg_raster.rs"]
mod tests;
