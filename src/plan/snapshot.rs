use std::path::Path;

use anyhow::Context;

use crate::{
    assets::resolver::AssetMap,
    foundation::error::{SlideError, SlideResult},
    plan::model::Plan,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Resolved plan plus asset map, enough to re-render a slide without planning again.
pub struct PlanSnapshot {
    pub plan: Plan,
    #[serde(default)]
    pub asset_map: AssetMap,
}

impl PlanSnapshot {
    pub fn new(plan: Plan, asset_map: AssetMap) -> Self {
        Self { plan, asset_map }
    }

    pub fn save(&self, path: &Path) -> SlideResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("write plan snapshot to '{}'", path.display()))?;
        Ok(())
    }

    pub fn load(path: &Path) -> SlideResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read plan snapshot from '{}'", path.display()))?;
        let snapshot: Self = serde_json::from_str(&text).map_err(|e| {
            SlideError::serde(format!("invalid plan snapshot '{}': {e}", path.display()))
        })?;
        Ok(snapshot)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plan/snapshot.rs"]
mod tests;
