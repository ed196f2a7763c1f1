//! Image generation over an OpenAI-compatible `images/generations` endpoint.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use base64::Engine as _;
use serde_json::json;

use crate::{
    assets::provider::{AssetProvider, GenerationTarget},
    config::RemoteConfig,
    foundation::error::{SlideError, SlideResult},
};

#[derive(Debug)]
pub struct RemoteImageProvider {
    client: reqwest::blocking::Client,
    config: RemoteConfig,
}

impl RemoteImageProvider {
    pub fn new(config: RemoteConfig) -> SlideResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(SlideError::validation("remote image provider requires an api_key"));
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| SlideError::asset(format!("failed to build http client: {e}")))?;
        Ok(Self { client, config })
    }

    fn request_body(&self, prompt: &str) -> serde_json::Value {
        json!({
            "model": self.config.image_model,
            "prompt": prompt,
            "size": self.config.image_size,
            "n": 1,
        })
    }

    fn generate(&self, target: &GenerationTarget<'_>) -> SlideResult<PathBuf> {
        let response = self
            .client
            .post(self.config.endpoint("images/generations"))
            .bearer_auth(&self.config.api_key)
            .json(&self.request_body(target.prompt))
            .send()
            .map_err(|e| SlideError::asset(format!("image request failed: {e}")))?;
        let status = response.status();
        if !status.is_success() {
            return Err(SlideError::asset(format!("image endpoint returned {status}")));
        }
        let body: serde_json::Value = response
            .json()
            .map_err(|e| SlideError::asset(format!("image response is not json: {e}")))?;

        let bytes = match image_payload(&body)? {
            ImagePayload::Inline(bytes) => bytes,
            ImagePayload::Url(url) => self
                .client
                .get(&url)
                .send()
                .and_then(|r| r.error_for_status())
                .and_then(|r| r.bytes())
                .map_err(|e| SlideError::asset(format!("image download failed: {e}")))?
                .to_vec(),
        };
        write_as_png(&bytes, target.dest)?;
        Ok(target.dest.to_path_buf())
    }
}

impl AssetProvider for RemoteImageProvider {
    fn name(&self) -> &str {
        "remote"
    }

    #[tracing::instrument(skip(self, target), fields(target_id = target.target_id))]
    fn try_generate(&self, target: &GenerationTarget<'_>) -> Option<PathBuf> {
        match self.generate(target) {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!(error = %e, "remote image generation failed");
                None
            }
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum ImagePayload {
    Inline(Vec<u8>),
    Url(String),
}

/// First entry of `data`, as base64 bytes or a download URL.
pub fn image_payload(body: &serde_json::Value) -> SlideResult<ImagePayload> {
    let entry = body
        .pointer("/data/0")
        .ok_or_else(|| SlideError::asset("image response has no data"))?;
    if let Some(b64) = entry.get("b64_json").and_then(serde_json::Value::as_str) {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(b64)
            .map_err(|e| SlideError::asset(format!("invalid base64 image: {e}")))?;
        return Ok(ImagePayload::Inline(bytes));
    }
    entry
        .get("url")
        .and_then(serde_json::Value::as_str)
        .map(|u| ImagePayload::Url(u.to_string()))
        .ok_or_else(|| SlideError::asset("image response has neither b64_json nor url"))
}

/// Decode whatever format the backend returned and store it as PNG.
fn write_as_png(bytes: &[u8], dest: &Path) -> SlideResult<()> {
    let img = image::load_from_memory(bytes).with_context(|| "decode generated image")?;
    img.save_with_format(dest, image::ImageFormat::Png)
        .with_context(|| format!("write png to '{}'", dest.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/remote.rs"]
mod tests;
