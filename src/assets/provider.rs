use std::path::{Path, PathBuf};

use crate::{
    assets::raster::{mock_illustration, save_png},
    foundation::error::SlideResult,
};

/// Where a provider should place its output.
#[derive(Clone, Copy, Debug)]
pub struct GenerationTarget<'a> {
    /// Item id the image illustrates.
    pub target_id: &'a str,
    /// Generation instruction.
    pub prompt: &'a str,
    /// Suggested output file; providers may write elsewhere and return that path.
    pub dest: &'a Path,
}

/// One stage of the asset generation chain.
///
/// Providers never error: `None` means "fall through to the next provider".
pub trait AssetProvider {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Produce a raster file for `target`, or `None` on any failure.
    fn try_generate(&self, target: &GenerationTarget<'_>) -> Option<PathBuf>;
}

impl<P: AssetProvider + ?Sized> AssetProvider for std::sync::Arc<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn try_generate(&self, target: &GenerationTarget<'_>) -> Option<PathBuf> {
        (**self).try_generate(target)
    }
}

type GenerateFn = dyn Fn(&GenerationTarget<'_>) -> SlideResult<PathBuf>;

/// Caller-supplied generation callback.
pub struct CallbackProvider {
    name: String,
    callback: Box<GenerateFn>,
}

impl CallbackProvider {
    pub fn new(
        name: impl Into<String>,
        callback: impl Fn(&GenerationTarget<'_>) -> SlideResult<PathBuf> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            callback: Box::new(callback),
        }
    }
}

impl std::fmt::Debug for CallbackProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackProvider")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl AssetProvider for CallbackProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn try_generate(&self, target: &GenerationTarget<'_>) -> Option<PathBuf> {
        match (self.callback)(target) {
            Ok(path) if path.is_file() => Some(path),
            Ok(path) => {
                tracing::warn!(
                    provider = %self.name,
                    path = %path.display(),
                    "callback returned a path that does not exist"
                );
                None
            }
            Err(e) => {
                tracing::warn!(provider = %self.name, error = %e, "callback generation failed");
                None
            }
        }
    }
}

/// Local placeholder art; needs no network and only fails if the file cannot be written.
#[derive(Clone, Debug)]
pub struct MockImageProvider {
    size: u32,
}

impl Default for MockImageProvider {
    fn default() -> Self {
        Self { size: 1024 }
    }
}

impl MockImageProvider {
    pub fn new(size: u32) -> Self {
        Self { size }
    }
}

impl AssetProvider for MockImageProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn try_generate(&self, target: &GenerationTarget<'_>) -> Option<PathBuf> {
        let img = mock_illustration(target.prompt, self.size);
        match save_png(&img, target.dest) {
            Ok(()) => {
                tracing::info!(path = %target.dest.display(), "generated local mock image");
                Some(target.dest.to_path_buf())
            }
            Err(e) => {
                tracing::error!(error = %e, "mock image could not be written");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/provider.rs"]
mod tests;
