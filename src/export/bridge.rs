use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{
    export::{command::CommandBridge, svg_raster::SvgRasterBridge},
    foundation::error::{SlideError, SlideResult},
};

/// Environment-dependent capability that turns a saved document into a raster image.
///
/// Availability is probed once when the exporter is built; callers never branch on the
/// platform themselves.
pub trait RasterBridge: Send + Sync {
    fn name(&self) -> &str;

    /// Cheap availability check.
    fn probe(&self) -> bool;

    /// Rasterize the first page of `document` into `output` and return the written path.
    fn rasterize(&self, document: &Path, output: &Path) -> SlideResult<PathBuf>;
}

/// Bridge used when nothing else is available; every call fails so the exporter falls back.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnavailableBridge;

impl RasterBridge for UnavailableBridge {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn probe(&self) -> bool {
        false
    }

    fn rasterize(&self, _document: &Path, _output: &Path) -> SlideResult<PathBuf> {
        Err(SlideError::export("preview unavailable on this platform"))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Serializable bridge selection.
pub enum BridgeKind {
    /// In-process SVG rasterizer.
    Svg,
    /// External converter; `{input}` and `{output}` in `args` are replaced per call.
    Command { program: String, args: Vec<String> },
    /// Always unavailable.
    Disabled,
}

impl BridgeKind {
    pub fn rsvg_convert() -> Self {
        Self::Command {
            program: "rsvg-convert".to_string(),
            args: ["--format", "png", "--output", "{output}", "{input}"]
                .map(String::from)
                .to_vec(),
        }
    }

    pub fn validate(&self) -> SlideResult<()> {
        if let Self::Command { program, args } = self {
            if program.trim().is_empty() {
                return Err(SlideError::validation("bridge program must be non-empty"));
            }
            if !args.iter().any(|a| a.contains("{input}")) {
                return Err(SlideError::validation(format!(
                    "bridge '{program}' args must reference {{input}}"
                )));
            }
        }
        Ok(())
    }

    pub fn build(&self, timeout: Duration) -> Box<dyn RasterBridge> {
        match self {
            Self::Svg => Box::new(SvgRasterBridge::new()),
            Self::Command { program, args } => {
                Box::new(CommandBridge::new(program.clone(), args.clone(), timeout))
            }
            Self::Disabled => Box::new(UnavailableBridge),
        }
    }
}

/// First candidate whose probe succeeds, otherwise [`UnavailableBridge`].
#[tracing::instrument(skip(candidates), fields(candidates = candidates.len()))]
pub fn select_bridge(candidates: Vec<Box<dyn RasterBridge>>) -> Box<dyn RasterBridge> {
    for bridge in candidates {
        if bridge.probe() {
            tracing::info!(bridge = bridge.name(), "raster bridge selected");
            return bridge;
        }
        tracing::debug!(bridge = bridge.name(), "raster bridge probe failed");
    }
    tracing::warn!("no raster bridge available, previews will be placeholders");
    Box::new(UnavailableBridge)
}

#[cfg(test)]
#[path = "../../tests/unit/export/bridge.rs"]
mod tests;
