use crate::{
    foundation::error::{SlideError, SlideResult},
    plan::model::Plan,
};

/// Remove Markdown code-fence markers (```` ```json ```` and ```` ``` ````) and trim.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "")
        .replace("```JSON", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Parse planner output into a [`Plan`].
///
/// Fences are stripped first. If the remainder still fails to parse, the outermost
/// `{ ... }` span is tried, which tolerates prose before or after the payload.
pub fn parse_plan_text(raw: &str) -> SlideResult<Plan> {
    let cleaned = strip_code_fences(raw);
    if cleaned.is_empty() {
        return Err(SlideError::planning("planner returned empty output"));
    }

    let first_err = match serde_json::from_str::<Plan>(&cleaned) {
        Ok(plan) => return Ok(plan),
        Err(e) => e,
    };

    if let Some(span) = outer_object_span(&cleaned)
        && span.len() != cleaned.len()
        && let Ok(plan) = serde_json::from_str::<Plan>(span)
    {
        tracing::debug!("plan parsed from embedded JSON object");
        return Ok(plan);
    }

    Err(SlideError::planning(format!(
        "planner output is not a valid plan: {first_err}"
    )))
}

fn outer_object_span(s: &str) -> Option<&str> {
    let start = s.find('{')?;
    let end = s.rfind('}')?;
    (end > start).then(|| &s[start..=end])
}

#[cfg(test)]
#[path = "../../tests/unit/plan/parse.rs"]
mod tests;
