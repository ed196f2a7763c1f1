use super::*;
use crate::{SlideError, plan::model::LayoutKind};

#[test]
fn system_prompt_embeds_schema() {
    let prompt = planning_system_prompt();
    assert!(prompt.contains("\"layout_type\""));
    assert!(prompt.contains("assets.images"));
}

#[test]
fn successful_plan_is_normalized() {
    let collab = |_: &str| -> SlideResult<String> {
        Ok("```json\n{\"meta\":{\"layout_type\":\"timeline\"},\"content\":{\"items\":[{\"title\":\"a\"},{\"title\":\"b\"}]}}\n```".to_string())
    };
    let out = plan_or_fallback(&collab, "outline");
    assert!(!out.used_fallback());
    assert_eq!(out.plan.layout(), LayoutKind::Timeline);
    let ids: Vec<_> = out.plan.items().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["item_1", "item_2"]);
}

#[test]
fn collaborator_error_substitutes_fallback() {
    let collab =
        |_: &str| -> SlideResult<String> { Err(SlideError::planning("upstream timeout")) };
    let out = plan_or_fallback(&collab, "Launch plan");
    assert!(out.used_fallback());
    assert!(out.fallback_reason.unwrap().contains("upstream timeout"));
    assert_eq!(out.plan.items().len(), 1);
}

#[test]
fn unparseable_output_substitutes_fallback() {
    let collab = |_: &str| -> SlideResult<String> { Ok("sorry, I cannot help".to_string()) };
    let out = plan_or_fallback(&collab, "Launch plan");
    assert!(out.used_fallback());
    assert_eq!(out.plan.content.main_title, "Launch plan");
}
