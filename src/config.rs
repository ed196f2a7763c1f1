use std::path::Path;

use anyhow::Context;

use crate::{
    export::bridge::BridgeKind,
    foundation::core::Canvas,
    foundation::error::{SlideError, SlideResult},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Explicit configuration handed to [`crate::SlidePipeline::new`].
///
/// Every field has a default, so a partial JSON document (or `{}`) is a valid configuration.
#[serde(default)]
pub struct PipelineConfig {
    /// Output canvas; must be 16:9.
    pub canvas: Canvas,
    /// Edge length of the square placeholder art produced by the mock provider.
    pub mock_image_size: u32,
    /// Generate and draw the decorative background asset.
    pub draw_background: bool,
    /// Raster bridges to probe, in preference order.
    pub bridges: Vec<BridgeKind>,
    /// Upper bound for a single external bridge invocation.
    pub bridge_timeout_ms: u64,
    /// Size of the fallback preview image.
    pub placeholder: PlaceholderSize,
    /// Write `plan.json` next to the document for later re-rendering.
    pub write_snapshot: bool,
    /// Credentials and models for the optional HTTP collaborators.
    pub remote: Option<RemoteConfig>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            mock_image_size: 1024,
            draw_background: true,
            bridges: vec![BridgeKind::rsvg_convert(), BridgeKind::Svg],
            bridge_timeout_ms: 60_000,
            placeholder: PlaceholderSize::default(),
            write_snapshot: true,
            remote: None,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> SlideResult<()> {
        self.canvas.validate()?;
        if self.mock_image_size == 0 {
            return Err(SlideError::validation("mock_image_size must be non-zero"));
        }
        if self.bridge_timeout_ms == 0 {
            return Err(SlideError::validation("bridge_timeout_ms must be non-zero"));
        }
        if self.placeholder.width == 0 || self.placeholder.height == 0 {
            return Err(SlideError::validation(
                "placeholder width/height must be non-zero",
            ));
        }
        for bridge in &self.bridges {
            bridge.validate()?;
        }
        Ok(())
    }

    pub fn from_json_str(s: &str) -> SlideResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file(path: &Path) -> SlideResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read pipeline config from '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn with_canvas(mut self, canvas: Canvas) -> Self {
        self.canvas = canvas;
        self
    }

    pub fn with_bridges(mut self, bridges: Vec<BridgeKind>) -> Self {
        self.bridges = bridges;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlaceholderSize {
    pub width: u32,
    pub height: u32,
}

impl Default for PlaceholderSize {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

#[derive(Clone, PartialEq, serde::Serialize, serde::Deserialize)]
/// OpenAI-compatible endpoint settings used by the `remote` feature.
#[serde(default)]
pub struct RemoteConfig {
    /// Base URL including the version segment, e.g. `https://api.openai.com/v1`.
    pub api_base: String,
    pub api_key: String,
    pub planner_model: String,
    pub image_model: String,
    /// Requested image size, e.g. `1024x1024`.
    pub image_size: String,
    pub timeout_ms: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            planner_model: "gpt-4o".to_string(),
            image_model: "dall-e-3".to_string(),
            image_size: "1024x1024".to_string(),
            timeout_ms: 60_000,
        }
    }
}

impl RemoteConfig {
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl std::fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("api_base", &self.api_base)
            .field("api_key", &if self.api_key.is_empty() { "" } else { "<redacted>" })
            .field("planner_model", &self.planner_model)
            .field("image_model", &self.image_model)
            .field("image_size", &self.image_size)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
