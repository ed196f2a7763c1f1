use std::{
    collections::{BTreeMap, HashSet},
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{
    assets::provider::{AssetProvider, GenerationTarget, MockImageProvider},
    assets::raster::{background_art, save_png},
    foundation::core::Canvas,
    foundation::error::SlideResult,
    plan::model::{ImageRequest, Plan},
    render::style::Palette,
};

/// File name of the shared decorative background inside an asset directory.
pub const BACKGROUND_FILE_NAME: &str = "background.png";

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
/// Item id to resolved local raster path.
///
/// Built once after asset resolution and read by layout and rendering.
pub struct AssetMap(BTreeMap<String, PathBuf>);

impl AssetMap {
    /// Collect resolved requests whose file exists and whose target is an item in `plan`.
    ///
    /// When several requests target the same item, the first resolved one wins.
    pub fn from_plan(plan: &Plan) -> Self {
        let item_ids: HashSet<&str> = plan.items().iter().map(|i| i.id.as_str()).collect();
        let mut out = BTreeMap::new();
        for req in &plan.assets.images {
            if !item_ids.contains(req.target_id.as_str()) || !req.is_resolved() {
                continue;
            }
            if let Some(path) = req.local_path() {
                out.entry(req.target_id.clone())
                    .or_insert_with(|| path.to_path_buf());
            }
        }
        Self(out)
    }

    pub fn get(&self, item_id: &str) -> Option<&Path> {
        self.0.get(item_id).map(PathBuf::as_path)
    }

    pub fn insert(&mut self, item_id: impl Into<String>, path: impl Into<PathBuf>) {
        self.0.insert(item_id.into(), path.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_path()))
    }

    /// Drop entries whose file has disappeared, e.g. after loading an old snapshot.
    pub fn retain_existing(&mut self) {
        self.0.retain(|_, p| p.is_file());
    }
}

/// Turns image requests into files under one asset directory.
///
/// Providers are tried in order; the mock provider is always the final stage, so resolution
/// only fails when the asset directory itself is unusable.
pub struct AssetResolver {
    asset_dir: PathBuf,
    providers: Vec<Box<dyn AssetProvider>>,
    mock: MockImageProvider,
}

impl std::fmt::Debug for AssetResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetResolver")
            .field("asset_dir", &self.asset_dir)
            .field("providers", &self.provider_names())
            .finish()
    }
}

impl AssetResolver {
    pub fn new(asset_dir: impl Into<PathBuf>) -> Self {
        Self {
            asset_dir: asset_dir.into(),
            providers: Vec::new(),
            mock: MockImageProvider::default(),
        }
    }

    /// Put a caller callback at the front of the chain.
    pub fn with_callback(mut self, provider: impl AssetProvider + 'static) -> Self {
        self.providers.insert(0, Box::new(provider));
        self
    }

    /// Append a provider after the existing ones (still before the mock).
    pub fn with_provider(mut self, provider: impl AssetProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    pub fn with_mock_size(mut self, size: u32) -> Self {
        self.mock = MockImageProvider::new(size);
        self
    }

    pub fn asset_dir(&self) -> &Path {
        &self.asset_dir
    }

    /// Provider names in the order they are tried.
    pub fn provider_names(&self) -> Vec<String> {
        self.providers
            .iter()
            .map(|p| p.name().to_string())
            .chain(std::iter::once(self.mock.name().to_string()))
            .collect()
    }

    /// Obtain a local raster for `request`, trying each provider in order.
    #[tracing::instrument(skip(self, request), fields(target_id = %request.target_id))]
    pub fn resolve(&self, request: &ImageRequest) -> Option<PathBuf> {
        if let Err(e) = std::fs::create_dir_all(&self.asset_dir) {
            tracing::error!(dir = %self.asset_dir.display(), error = %e, "asset directory unavailable");
            return None;
        }

        let dest = unique_asset_path(&self.asset_dir, &request.target_id);
        let target = GenerationTarget {
            target_id: &request.target_id,
            prompt: &request.prompt,
            dest: &dest,
        };

        let mock: &(dyn AssetProvider + 'static) = &self.mock;
        let chain = self
            .providers
            .iter()
            .map(|p| &**p)
            .chain(std::iter::once(mock));
        for provider in chain {
            if let Some(path) = provider.try_generate(&target) {
                tracing::debug!(provider = provider.name(), path = %path.display(), "asset resolved");
                return Some(path);
            }
            tracing::warn!(provider = provider.name(), "provider failed; falling through");
        }
        None
    }

    /// Resolve every pending request of `plan` in place and return the number attached.
    ///
    /// Requests that already point at an existing file, that target no item, or whose item
    /// already has a resolved image are skipped.
    #[tracing::instrument(skip(self, plan))]
    pub fn resolve_plan(&self, plan: &mut Plan) -> usize {
        let item_ids: HashSet<String> = plan.items().iter().map(|i| i.id.clone()).collect();
        let mut covered: HashSet<String> = plan
            .assets
            .images
            .iter()
            .filter(|r| r.is_resolved())
            .map(|r| r.target_id.clone())
            .collect();

        let mut attached = 0usize;
        for req in &mut plan.assets.images {
            if req.is_resolved() {
                continue;
            }
            if !item_ids.contains(&req.target_id) {
                tracing::debug!(target_id = %req.target_id, "image request targets no item; skipped");
                continue;
            }
            if covered.contains(&req.target_id) {
                tracing::debug!(target_id = %req.target_id, "item already has an image; skipped");
                continue;
            }
            match self.resolve(req) {
                Some(path) => {
                    if req.attach(path) {
                        attached += 1;
                        covered.insert(req.target_id.clone());
                    }
                }
                None => tracing::warn!(target_id = %req.target_id, "no provider produced an image"),
            }
        }
        tracing::info!(attached, "asset production finished");
        attached
    }

    /// Create the decorative background once per asset directory.
    ///
    /// Returns the existing file untouched when it is already present.
    pub fn ensure_background(&self, canvas: Canvas, palette: &Palette) -> SlideResult<PathBuf> {
        let path = self.asset_dir.join(BACKGROUND_FILE_NAME);
        if path.is_file() {
            tracing::debug!(path = %path.display(), "background already present");
            return Ok(path);
        }
        std::fs::create_dir_all(&self.asset_dir).with_context(|| {
            format!("create asset directory '{}'", self.asset_dir.display())
        })?;
        save_png(&background_art(canvas, palette), &path)?;
        tracing::info!(path = %path.display(), "generated background asset");
        Ok(path)
    }
}

/// `<sanitized id>_<unix millis>.png`, suffixed with `-<n>` if that file already exists.
pub fn unique_asset_path(dir: &Path, target_id: &str) -> PathBuf {
    let stem = format!("{}_{}", sanitize_file_stem(target_id), unix_millis());
    let mut candidate = dir.join(format!("{stem}.png"));
    let mut n = 2u32;
    while candidate.exists() {
        candidate = dir.join(format!("{stem}-{n}.png"));
        n += 1;
    }
    candidate
}

fn sanitize_file_stem(id: &str) -> String {
    let cleaned: String = id
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "asset".to_string()
    } else {
        cleaned
    }
}

fn unix_millis() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resolver.rs"]
mod tests;
