use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, de::DeserializeOwned};

/// Layout strategy requested by the planning stage.
///
/// Any absent, null, non-string or unrecognized value deserializes to [`LayoutKind::Grid`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    /// Row-major card grid.
    #[default]
    Grid,
    /// Cards hanging below a horizontal spine.
    Timeline,
}

impl LayoutKind {
    /// Lenient parse: case-insensitive, whitespace-trimmed, defaults to `Grid`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "timeline" => Self::Timeline,
            _ => Self::Grid,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::Timeline => "timeline",
        }
    }
}

impl<'de> Deserialize<'de> for LayoutKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(raw
            .as_ref()
            .and_then(serde_json::Value::as_str)
            .map(Self::parse)
            .unwrap_or_default())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Root artifact produced by the planning stage and consumed by every later stage.
pub struct Plan {
    /// Layout and theme selection.
    #[serde(default, deserialize_with = "object_or_default")]
    pub meta: PlanMeta,
    /// Titles and ordered content items.
    #[serde(default, deserialize_with = "object_or_default")]
    pub content: PlanContent,
    /// Image generation requests, joined to items by id.
    #[serde(default, deserialize_with = "object_or_default")]
    pub assets: PlanAssets,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Plan metadata chosen upstream and never recomputed.
pub struct PlanMeta {
    /// Layout strategy for the item regions.
    #[serde(default)]
    pub layout_type: LayoutKind,
    /// Palette identifier; only one palette exists today.
    #[serde(default = "default_theme", deserialize_with = "string_or_default_theme")]
    pub theme: String,
}

impl Default for PlanMeta {
    fn default() -> Self {
        Self {
            layout_type: LayoutKind::Grid,
            theme: default_theme(),
        }
    }
}

fn default_theme() -> String {
    "tech_blue".to_string()
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Slide titles and items in reading order.
pub struct PlanContent {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub main_title: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub subtitle: String,
    /// Ordered content units; order is reading (or timeline) order.
    #[serde(default, deserialize_with = "seq_or_empty")]
    pub items: Vec<Item>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Image requests attached to the plan.
pub struct PlanAssets {
    #[serde(default, deserialize_with = "seq_or_empty")]
    pub images: Vec<ImageRequest>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// One visual content unit (card).
pub struct Item {
    /// Join key into resolved assets; unique within a normalized plan.
    #[serde(default, deserialize_with = "string_or_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub desc: String,
    /// Label to value table, insertion order preserved.
    #[serde(default, deserialize_with = "specs_or_empty")]
    pub specs: IndexMap<String, String>,
    /// Passed through untouched.
    #[serde(default, deserialize_with = "strings_or_empty")]
    pub tags: Vec<String>,
}

impl Item {
    pub fn new(id: impl Into<String>, title: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            desc: desc.into(),
            ..Self::default()
        }
    }

    pub fn with_spec(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.specs.insert(label.into(), value.into());
        self
    }

    pub fn has_specs(&self) -> bool {
        !self.specs.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Request for one illustrative image.
pub struct ImageRequest {
    /// Must equal some `Item::id` for the image to be used.
    #[serde(default, deserialize_with = "string_or_empty")]
    pub target_id: String,
    /// Generation instruction.
    #[serde(default, deserialize_with = "string_or_empty")]
    pub prompt: String,
    /// Set exactly once by the asset resolver.
    #[serde(default)]
    local_path: Option<PathBuf>,
}

impl ImageRequest {
    pub fn new(target_id: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            target_id: target_id.into(),
            prompt: prompt.into(),
            local_path: None,
        }
    }

    pub fn local_path(&self) -> Option<&Path> {
        self.local_path.as_deref()
    }

    /// True when a resolved path is attached and still present on disk.
    pub fn is_resolved(&self) -> bool {
        self.local_path.as_deref().is_some_and(Path::is_file)
    }

    /// Attach the resolved path. Returns `false` (and keeps the old value) if a path that
    /// still exists is already attached.
    pub fn attach(&mut self, path: PathBuf) -> bool {
        if self.is_resolved() {
            return false;
        }
        self.local_path = Some(path);
        true
    }
}

impl Plan {
    pub fn new(layout: LayoutKind, main_title: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            meta: PlanMeta {
                layout_type: layout,
                ..PlanMeta::default()
            },
            content: PlanContent {
                main_title: main_title.into(),
                subtitle: String::new(),
                items,
            },
            assets: PlanAssets::default(),
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.content.subtitle = subtitle.into();
        self
    }

    pub fn with_image(mut self, target_id: impl Into<String>, prompt: impl Into<String>) -> Self {
        self.assets.images.push(ImageRequest::new(target_id, prompt));
        self
    }

    pub fn layout(&self) -> LayoutKind {
        self.meta.layout_type
    }

    pub fn items(&self) -> &[Item] {
        &self.content.items
    }

    /// Single-item plan used when the planning collaborator fails.
    pub fn fallback(outline: &str) -> Self {
        const MAX_DESC_CHARS: usize = 280;

        let trimmed = outline.trim();
        let title = trimmed
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .map(|l| crate::foundation::math::truncate_chars(l, 60))
            .unwrap_or_else(|| "Overview".to_string());
        let desc = crate::foundation::math::truncate_chars(trimmed, MAX_DESC_CHARS);

        Self::new(
            LayoutKind::Grid,
            title,
            vec![Item::new("item_1", "Overview", desc)],
        )
    }

    /// Give every item a non-empty id that is unique within the plan.
    ///
    /// Ids and image targets are trimmed. The first holder of each explicit id keeps it;
    /// empty or duplicate ids are replaced by `item_<n>` (1-based position), with a numeric
    /// suffix when that name is claimed anywhere in the plan.
    pub fn normalize(&mut self) {
        for item in &mut self.content.items {
            let trimmed = item.id.trim();
            if trimmed.len() != item.id.len() {
                item.id = trimmed.to_string();
            }
        }
        for req in &mut self.assets.images {
            let trimmed = req.target_id.trim();
            if trimmed.len() != req.target_id.len() {
                req.target_id = trimmed.to_string();
            }
        }

        let mut owner = std::collections::HashSet::<usize>::new();
        let mut seen = std::collections::HashSet::<String>::new();
        for (idx, item) in self.content.items.iter().enumerate() {
            if !item.id.is_empty() && seen.insert(item.id.clone()) {
                owner.insert(idx);
            }
        }

        for (idx, item) in self.content.items.iter_mut().enumerate() {
            if owner.contains(&idx) {
                continue;
            }
            let base = format!("item_{}", idx + 1);
            let mut candidate = base.clone();
            let mut n = 2usize;
            while seen.contains(&candidate) {
                candidate = format!("{base}_{n}");
                n += 1;
            }
            tracing::debug!(index = idx, old = %item.id, new = %candidate, "reassigned item id");
            seen.insert(candidate.clone());
            item.id = candidate;
        }
    }
}

fn string_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.map(value_to_text).unwrap_or_default())
}

fn string_or_default_theme<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let s = string_or_empty(deserializer)?;
    Ok(if s.trim().is_empty() { default_theme() } else { s })
}

fn object_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default())
}

/// Non-array values become empty; elements that do not fit `T` become `T::default()`.
fn seq_or_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    let Some(serde_json::Value::Array(values)) = raw else {
        return Ok(Vec::new());
    };
    Ok(values
        .into_iter()
        .map(|v| serde_json::from_value(v).unwrap_or_default())
        .collect())
}

fn strings_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    let Some(serde_json::Value::Array(values)) = raw else {
        return Ok(Vec::new());
    };
    Ok(values.into_iter().map(value_to_text).collect())
}

fn specs_or_empty<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<IndexMap<String, String>, D::Error> {
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    let Some(serde_json::Value::Object(map)) = raw else {
        return Ok(IndexMap::new());
    };
    Ok(map.into_iter().map(|(k, v)| (k, value_to_text(v))).collect())
}

fn value_to_text(v: serde_json::Value) -> String {
    match v {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plan/model.rs"]
mod tests;
