//! Chat-completions planner for OpenAI-compatible endpoints.

use std::time::Duration;

use serde_json::json;

use crate::{
    config::RemoteConfig,
    foundation::error::{SlideError, SlideResult},
    plan::planner::{PlanningCollaborator, planning_system_prompt},
};

/// Low temperature keeps the JSON structure stable between calls.
const PLANNER_TEMPERATURE: f64 = 0.1;

#[derive(Debug)]
pub struct OpenAiPlanner {
    client: reqwest::blocking::Client,
    config: RemoteConfig,
}

impl OpenAiPlanner {
    pub fn new(config: RemoteConfig) -> SlideResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(SlideError::validation("remote planner requires an api_key"));
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| SlideError::planning(format!("failed to build http client: {e}")))?;
        Ok(Self { client, config })
    }

    fn request_body(&self, outline: &str) -> serde_json::Value {
        json!({
            "model": self.config.planner_model,
            "temperature": PLANNER_TEMPERATURE,
            "messages": [
                {"role": "system", "content": planning_system_prompt()},
                {"role": "user", "content": outline},
            ],
        })
    }
}

impl PlanningCollaborator for OpenAiPlanner {
    #[tracing::instrument(skip(self, outline), fields(model = %self.config.planner_model))]
    fn draft_plan(&self, outline: &str) -> SlideResult<String> {
        let response = self
            .client
            .post(self.config.endpoint("chat/completions"))
            .bearer_auth(&self.config.api_key)
            .json(&self.request_body(outline))
            .send()
            .map_err(|e| SlideError::planning(format!("planner request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(SlideError::planning(format!(
                "planner returned {status}: {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .map_err(|e| SlideError::planning(format!("planner response is not json: {e}")))?;
        message_content(&body)
    }
}

/// `choices[0].message.content` of a chat-completions response.
pub fn message_content(body: &serde_json::Value) -> SlideResult<String> {
    body.pointer("/choices/0/message/content")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| SlideError::planning("planner response has no message content"))
}

#[cfg(test)]
#[path = "../../tests/unit/plan/remote.rs"]
mod tests;
