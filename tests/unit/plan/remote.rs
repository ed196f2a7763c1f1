use super::*;

fn config() -> RemoteConfig {
    RemoteConfig {
        api_key: "sk-test".to_string(),
        ..RemoteConfig::default()
    }
}

#[test]
fn missing_key_is_rejected() {
    assert!(OpenAiPlanner::new(RemoteConfig::default()).is_err());
}

#[test]
fn request_carries_model_prompt_and_outline() {
    let planner = OpenAiPlanner::new(config()).unwrap();
    let body = planner.request_body("1. Kickoff 2024-01");
    assert_eq!(body["model"], "gpt-4o");
    assert_eq!(body["temperature"], 0.1);
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][1]["content"], "1. Kickoff 2024-01");
}

#[test]
fn message_content_is_extracted() {
    let body = serde_json::json!({"choices": [{"message": {"content": "{\"meta\":{}}"}}]});
    assert_eq!(message_content(&body).unwrap(), "{\"meta\":{}}");
    assert!(message_content(&serde_json::json!({"choices": []})).is_err());
}

#[test]
fn unreachable_endpoint_is_a_planning_error() {
    let planner = OpenAiPlanner::new(RemoteConfig {
        api_base: "http://127.0.0.1:9".to_string(),
        timeout_ms: 500,
        ..config()
    })
    .unwrap();
    let err = planner.draft_plan("outline").unwrap_err();
    assert!(matches!(err, SlideError::Planning(_)));
}
