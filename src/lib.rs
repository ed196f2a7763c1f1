//! Slidegen turns a short outline into a single structured slide.
//!
//! The pipeline is deterministic once a plan exists:
//!
//! - a [`PlanningCollaborator`] drafts a [`Plan`] (a fallback plan is used when it fails)
//! - the [`AssetResolver`] fills image requests through an ordered provider chain
//! - [`compute_regions`] places one card per item with the grid or timeline strategy
//! - the card renderer draws a [`SlideDocument`], saved as SVG
//! - the [`Exporter`] rasterizes it, or writes a placeholder preview when it cannot
#![forbid(unsafe_code)]

mod assets;
mod config;
mod export;
mod foundation;
mod layout;
mod pipeline;
mod plan;
mod render;

pub use crate::foundation::core::{Canvas, Point, Rect, Rgb8, Size, UNITS_ACROSS};
pub use crate::foundation::error::{SlideError, SlideResult};

pub use crate::config::{PipelineConfig, PlaceholderSize, RemoteConfig};

pub use crate::plan::model::{
    ImageRequest, Item, LayoutKind, Plan, PlanAssets, PlanContent, PlanMeta,
};
pub use crate::plan::parse::{parse_plan_text, strip_code_fences};
pub use crate::plan::planner::{
    PLAN_JSON_SCHEMA, PlanOutcome, PlanningCollaborator, plan_or_fallback, planning_system_prompt,
};
pub use crate::plan::snapshot::PlanSnapshot;
#[cfg(feature = "remote")]
pub use crate::plan::remote::OpenAiPlanner;

pub use crate::assets::provider::{
    AssetProvider, CallbackProvider, GenerationTarget, MockImageProvider,
};
#[cfg(feature = "remote")]
pub use crate::assets::remote::RemoteImageProvider;
pub use crate::assets::resolver::{AssetMap, AssetResolver, BACKGROUND_FILE_NAME};

pub use crate::layout::region::{LayoutMetrics, Region, RegionDetail};
pub use crate::layout::timeline::Spine;
pub use crate::layout::{SlideLayout, compute_regions};

pub use crate::render::card::{CardGeometry, SpecRow, layout_card, render_card};
pub use crate::render::document::{Element, SlideDocument, Stroke, TextAlign, TextBox};
pub use crate::render::slide::compose_slide;
pub use crate::render::style::{CardStyle, HeaderStyle, Palette, SlideStyle, TimelineStyle};

pub use crate::export::bridge::{BridgeKind, RasterBridge, UnavailableBridge, select_bridge};
pub use crate::export::command::CommandBridge;
pub use crate::export::exporter::Exporter;
pub use crate::export::svg_raster::SvgRasterBridge;

pub use crate::pipeline::{
    ASSET_DIR_NAME, DOCUMENT_FILE_NAME, SNAPSHOT_FILE_NAME, SlideOutput, SlidePipeline,
};
