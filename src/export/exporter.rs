use std::{
    panic::{AssertUnwindSafe, catch_unwind},
    path::{Path, PathBuf},
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use crate::{
    config::{PipelineConfig, PlaceholderSize},
    export::{
        bridge::{RasterBridge, select_bridge},
        placeholder::PlaceholderRenderer,
    },
};

/// Turns a saved document into a preview image.
///
/// [`Exporter::export`] never fails: when the bridge is unavailable or errors, a placeholder
/// image carrying the status and a short error excerpt is written instead.
pub struct Exporter {
    bridge: Box<dyn RasterBridge>,
    placeholder: PlaceholderRenderer,
}

impl std::fmt::Debug for Exporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Exporter")
            .field("bridge", &self.bridge.name())
            .field("placeholder", &self.placeholder.size())
            .finish()
    }
}

impl Exporter {
    pub fn new(bridge: Box<dyn RasterBridge>, placeholder: PlaceholderSize) -> Self {
        Self {
            bridge,
            placeholder: PlaceholderRenderer::new(placeholder),
        }
    }

    /// Probe the configured bridges in order and keep the first available one.
    pub fn from_config(config: &PipelineConfig) -> Self {
        let timeout = Duration::from_millis(config.bridge_timeout_ms);
        let candidates = config.bridges.iter().map(|b| b.build(timeout)).collect();
        Self::new(select_bridge(candidates), config.placeholder)
    }

    pub fn bridge_name(&self) -> &str {
        self.bridge.name()
    }

    /// Preview path for a document: same location, `.png` extension.
    pub fn preview_path(document: &Path) -> PathBuf {
        document.with_extension("png")
    }

    #[tracing::instrument(skip(self), fields(bridge = self.bridge.name()))]
    pub fn export(&self, document: &Path) -> PathBuf {
        let output = Self::preview_path(document);

        let attempt = catch_unwind(AssertUnwindSafe(|| {
            self.bridge.rasterize(document, &output)
        }));
        let failure = match attempt {
            Ok(Ok(path)) if path.is_file() => {
                tracing::info!(path = %path.display(), "preview rasterized");
                return path;
            }
            Ok(Ok(path)) => format!("bridge wrote no file at '{}'", path.display()),
            Ok(Err(e)) => e.to_string(),
            Err(_) => "raster bridge panicked".to_string(),
        };
        tracing::warn!(error = %failure, "preview export failed, writing placeholder");

        if let Some(parent) = output.parent()
            && !parent.as_os_str().is_empty()
        {
            let _ = std::fs::create_dir_all(parent);
        }
        match self.placeholder.write(Some(&failure), &output) {
            Ok(path) => return path,
            Err(e) => tracing::warn!(error = %e, "placeholder not writable next to document"),
        }

        let fallback = std::env::temp_dir().join(format!(
            "slidegen_preview_{}_{}.png",
            std::process::id(),
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or_default()
        ));
        match self.placeholder.write(Some(&failure), &fallback) {
            Ok(path) => path,
            Err(e) => {
                tracing::error!(error = %e, path = %fallback.display(), "placeholder write failed");
                fallback
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/exporter.rs"]
mod tests;
