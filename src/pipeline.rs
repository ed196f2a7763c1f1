use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::{
    assets::{
        provider::AssetProvider,
        resolver::{AssetMap, AssetResolver},
    },
    config::PipelineConfig,
    export::exporter::Exporter,
    foundation::error::SlideResult,
    layout::SlideLayout,
    plan::{
        model::Plan,
        planner::{PlanningCollaborator, plan_or_fallback},
        snapshot::PlanSnapshot,
    },
    render::{slide::compose_slide, style::SlideStyle},
};

pub const ASSET_DIR_NAME: &str = "assets";
pub const DOCUMENT_FILE_NAME: &str = "slide.svg";
pub const SNAPSHOT_FILE_NAME: &str = "plan.json";

#[derive(Clone, Debug, serde::Serialize)]
/// Everything one pipeline run produced.
pub struct SlideOutput {
    pub plan: Plan,
    pub asset_map: AssetMap,
    pub layout: SlideLayout,
    pub document_path: PathBuf,
    /// Always points at an existing image; a placeholder when rasterization failed.
    pub preview_path: PathBuf,
    pub snapshot_path: Option<PathBuf>,
    /// The planning collaborator failed and the single-item fallback plan was rendered.
    pub used_fallback_plan: bool,
}

/// Outline to slide: plan, resolve assets, lay out, render, export.
///
/// All configuration is fixed at construction; the raster bridge is probed once here.
pub struct SlidePipeline {
    config: PipelineConfig,
    planner: Box<dyn PlanningCollaborator>,
    providers: Vec<Arc<dyn AssetProvider>>,
    exporter: Exporter,
}

impl std::fmt::Debug for SlidePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlidePipeline")
            .field("config", &self.config)
            .field(
                "providers",
                &self.providers.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .field("exporter", &self.exporter)
            .finish_non_exhaustive()
    }
}

impl SlidePipeline {
    pub fn new(
        config: PipelineConfig,
        planner: impl PlanningCollaborator + 'static,
    ) -> SlideResult<Self> {
        config.validate()?;
        let exporter = Exporter::from_config(&config);
        Ok(Self {
            config,
            planner: Box::new(planner),
            providers: Vec::new(),
            exporter,
        })
    }

    /// Pipeline backed by the OpenAI-compatible planner and image provider from `config.remote`.
    #[cfg(feature = "remote")]
    pub fn remote(config: PipelineConfig) -> SlideResult<Self> {
        use crate::{
            assets::remote::RemoteImageProvider, foundation::error::SlideError,
            plan::remote::OpenAiPlanner,
        };

        let remote = config
            .remote
            .clone()
            .ok_or_else(|| SlideError::validation("remote pipeline requires `remote` settings"))?;
        let planner = OpenAiPlanner::new(remote.clone())?;
        let images = RemoteImageProvider::new(remote)?;
        Ok(Self::new(config, planner)?.with_provider(images))
    }

    /// Try `provider` before every provider registered so far.
    pub fn with_callback(mut self, provider: impl AssetProvider + 'static) -> Self {
        self.providers.insert(0, Arc::new(provider));
        self
    }

    /// Try `provider` after the ones registered so far; the local mock always comes last.
    pub fn with_provider(mut self, provider: impl AssetProvider + 'static) -> Self {
        self.providers.push(Arc::new(provider));
        self
    }

    pub fn with_exporter(mut self, exporter: Exporter) -> Self {
        self.exporter = exporter;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn exporter(&self) -> &Exporter {
        &self.exporter
    }

    /// Full run starting from outline text. Planning failures fall back to a one-card plan.
    #[tracing::instrument(skip_all, fields(workdir = %workdir.display()))]
    pub fn generate(&self, outline: &str, workdir: &Path) -> SlideResult<SlideOutput> {
        let outcome = plan_or_fallback(self.planner.as_ref(), outline);
        let used_fallback_plan = outcome.used_fallback();
        let mut output = self.render_plan(outcome.plan, workdir)?;
        output.used_fallback_plan = used_fallback_plan;
        Ok(output)
    }

    /// Run every stage after planning for an existing plan.
    #[tracing::instrument(skip_all, fields(workdir = %workdir.display()))]
    pub fn render_plan(&self, mut plan: Plan, workdir: &Path) -> SlideResult<SlideOutput> {
        let workdir = &absolute_workdir(workdir)?;
        plan.normalize();
        let resolver = self.resolver(workdir);
        resolver.resolve_plan(&mut plan);
        let asset_map = AssetMap::from_plan(&plan);
        self.render_resolved(plan, asset_map, &resolver, workdir)
    }

    /// Re-render from a saved snapshot without calling the planner or any image provider.
    #[tracing::instrument(
        skip_all,
        fields(snapshot = %snapshot.display(), workdir = %workdir.display())
    )]
    pub fn render_snapshot(&self, snapshot: &Path, workdir: &Path) -> SlideResult<SlideOutput> {
        let workdir = &absolute_workdir(workdir)?;
        let PlanSnapshot {
            mut plan,
            mut asset_map,
        } = PlanSnapshot::load(snapshot)?;
        plan.normalize();
        let before = asset_map.len();
        asset_map.retain_existing();
        if asset_map.len() < before {
            tracing::warn!(
                dropped = before - asset_map.len(),
                "snapshot assets missing on disk"
            );
        }
        let resolver = AssetResolver::new(workdir.join(ASSET_DIR_NAME));
        self.render_resolved(plan, asset_map, &resolver, workdir)
    }

    /// `workdir` must be absolute; asset paths derived from it end up as document hrefs.
    fn resolver(&self, workdir: &Path) -> AssetResolver {
        self.providers.iter().fold(
            AssetResolver::new(workdir.join(ASSET_DIR_NAME))
                .with_mock_size(self.config.mock_image_size),
            |resolver, p| resolver.with_provider(Arc::clone(p)),
        )
    }

    fn render_resolved(
        &self,
        plan: Plan,
        asset_map: AssetMap,
        resolver: &AssetResolver,
        workdir: &Path,
    ) -> SlideResult<SlideOutput> {
        std::fs::create_dir_all(workdir)
            .with_context(|| format!("create workdir '{}'", workdir.display()))?;

        let canvas = self.config.canvas;
        let style = SlideStyle::new(canvas, &plan.meta.theme);
        let background = if self.config.draw_background {
            resolver
                .ensure_background(canvas, &style.palette)
                .inspect_err(|e| tracing::warn!(error = %e, "background unavailable"))
                .ok()
        } else {
            None
        };

        let layout = SlideLayout::compute(plan.items(), plan.layout(), canvas);
        let document = compose_slide(&plan, &layout, &asset_map, background.as_deref(), &style);
        let document_path = workdir.join(DOCUMENT_FILE_NAME);
        document.save_svg(&document_path)?;

        let snapshot_path = if self.config.write_snapshot {
            let path = workdir.join(SNAPSHOT_FILE_NAME);
            PlanSnapshot::new(plan.clone(), asset_map.clone()).save(&path)?;
            Some(path)
        } else {
            None
        };

        let preview_path = self.exporter.export(&document_path);
        tracing::info!(
            items = plan.items().len(),
            assets = asset_map.len(),
            preview = %preview_path.display(),
            "slide generated"
        );

        Ok(SlideOutput {
            plan,
            asset_map,
            layout,
            document_path,
            preview_path,
            snapshot_path,
            used_fallback_plan: false,
        })
    }
}

fn absolute_workdir(workdir: &Path) -> SlideResult<PathBuf> {
    let abs = std::path::absolute(workdir)
        .with_context(|| format!("resolve workdir '{}'", workdir.display()))?;
    Ok(abs)
}
