//! Blocking HTTP transport for the Gemini `generateContent` API.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ExplainConfig, Explainer, Transport};
use crate::error::{CircuitScopeError, Result};

/// Request body: a single user turn holding the prompt.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Clone, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Clone, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    pub fn new(prompt: &'a str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        }
    }
}

/// The subset of the response body we read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Clone, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Clone, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate; empty if there is none.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

/// Sends prompts to Gemini over HTTPS.
#[derive(Debug, Clone)]
pub struct GeminiTransport {
    agent: ureq::Agent,
}

impl GeminiTransport {
    pub fn new(config: &ExplainConfig) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(config.timeout).build();
        Self { agent }
    }
}

impl Transport for GeminiTransport {
    fn generate(&self, config: &ExplainConfig, api_key: &str, prompt: &str) -> Result<String> {
        let url = format!("{}/models/{}:generateContent", config.endpoint, config.model);
        debug!(model = %config.model, prompt_len = prompt.len(), "requesting explanation");

        let response = self
            .agent
            .post(&url)
            .set("x-goog-api-key", api_key)
            .send_json(GenerateContentRequest::new(prompt))
            .map_err(from_ureq)?;

        let body: GenerateContentResponse = response
            .into_json()
            .map_err(|e| CircuitScopeError::transport(format!("invalid response body: {e}")))?;
        Ok(body.text())
    }
}

fn from_ureq(err: ureq::Error) -> CircuitScopeError {
    match err {
        ureq::Error::Status(status, response) => CircuitScopeError::BackendStatus {
            status,
            message: response.into_string().unwrap_or_default(),
        },
        ureq::Error::Transport(transport) => CircuitScopeError::transport(transport.to_string()),
    }
}

impl Explainer<GeminiTransport> {
    /// Explainer backed by Gemini with the given configuration.
    pub fn gemini(config: ExplainConfig) -> Self {
        let transport = GeminiTransport::new(&config);
        Self::new(config, transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let body = serde_json::to_value(GenerateContentRequest::new("hello")).unwrap();
        assert_eq!(body, serde_json::json!({"contents": [{"parts": [{"text": "hello"}]}]}));
    }

    #[test]
    fn test_response_text_joins_parts() {
        let body: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"Gain "},{"text":"is **2**"}],"role":"model"},"finishReason":"STOP"}]}"#,
        )
        .unwrap();
        assert_eq!(body.text(), "Gain is **2**");
    }

    #[test]
    fn test_response_without_candidates() {
        let body: GenerateContentResponse =
            serde_json::from_str(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap();
        assert_eq!(body.text(), "");
    }

    #[test]
    fn test_unreachable_backend_falls_back() {
        let config = ExplainConfig::new()
            .with_api_key("k")
            .with_endpoint("http://127.0.0.1:9")
            .with_timeout(std::time::Duration::from_millis(500));
        let explainer = Explainer::gemini(config);
        let text = explainer.explain(
            crate::CircuitType::VoltageDivider,
            &crate::circuit::defaults_for(crate::CircuitType::VoltageDivider),
            "x",
        );
        assert_eq!(text, super::super::UNAVAILABLE_MESSAGE);
    }
}
