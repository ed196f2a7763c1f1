use crate::{
    foundation::error::SlideResult,
    plan::{model::Plan, parse::parse_plan_text},
};

/// JSON shape the planning collaborator is asked to produce.
pub const PLAN_JSON_SCHEMA: &str = r#"{
  "meta": {"layout_type": "grid | timeline", "theme": "tech_blue"},
  "content": {
    "main_title": "string", "subtitle": "string",
    "items": [{
      "id": "string", "title": "string", "desc": "string",
      "specs": {"Key": "Value"}, "tags": ["string"]
    }]
  },
  "assets": {"images": [{"target_id": "string", "prompt": "string", "local_path": null}]}
}"#;

/// System prompt sent alongside the user's outline.
pub fn planning_system_prompt() -> String {
    format!(
        "You are an information architect. Turn the user's outline into structured slide data. \
         Use layout_type \"timeline\" when the outline is a dated or ordered sequence of steps, \
         otherwise \"grid\". If the input contains tabular or comparison data, extract it into \
         each item's `specs` object. Write one 3D tech-blue style image generation prompt per \
         item in assets.images, with target_id equal to the item id. \
         Output pure JSON matching: {PLAN_JSON_SCHEMA}"
    )
}

/// External collaborator that turns outline text into plan JSON text.
pub trait PlanningCollaborator {
    /// Return the raw model output; it may still carry code fences.
    fn draft_plan(&self, outline: &str) -> SlideResult<String>;
}

impl<F> PlanningCollaborator for F
where
    F: Fn(&str) -> SlideResult<String>,
{
    fn draft_plan(&self, outline: &str) -> SlideResult<String> {
        self(outline)
    }
}

/// Result of the planning stage.
#[derive(Clone, Debug)]
pub struct PlanOutcome {
    pub plan: Plan,
    /// Set when the collaborator failed and [`Plan::fallback`] was substituted.
    pub fallback_reason: Option<String>,
}

impl PlanOutcome {
    pub fn used_fallback(&self) -> bool {
        self.fallback_reason.is_some()
    }
}

/// Run the collaborator and parse its output, substituting the fallback plan on any failure.
#[tracing::instrument(skip(collaborator, outline), fields(outline_len = outline.len()))]
pub fn plan_or_fallback(collaborator: &dyn PlanningCollaborator, outline: &str) -> PlanOutcome {
    let attempt = collaborator
        .draft_plan(outline)
        .and_then(|raw| parse_plan_text(&raw));

    let mut outcome = match attempt {
        Ok(plan) => PlanOutcome {
            plan,
            fallback_reason: None,
        },
        Err(e) => {
            tracing::warn!(error = %e, "planning failed; substituting fallback plan");
            PlanOutcome {
                plan: Plan::fallback(outline),
                fallback_reason: Some(e.to_string()),
            }
        }
    };
    outcome.plan.normalize();
    tracing::info!(
        layout = outcome.plan.layout().as_str(),
        items = outcome.plan.items().len(),
        images = outcome.plan.assets.images.len(),
        "plan ready"
    );
    outcome
}

#[cfg(test)]
#[path = "../../tests/unit/plan/planner.rs"]
mod tests;
