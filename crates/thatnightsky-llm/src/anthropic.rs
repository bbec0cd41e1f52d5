use crate::ports::Generator;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thatnightsky_core::error::{NightSkyError, Result};

/// Messages API version header value
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Response length cap for narrative paragraphs
pub const MAX_TOKENS: u32 = 300;

/// Anthropic Messages API generator
pub struct AnthropicGenerator {
    /// Base URL (e.g., "https://api.anthropic.com")
    base_url: String,

    api_key: String,

    /// Model name to use for generation
    model: String,

    /// HTTP client with request timeout
    client: reqwest::Client,
}

impl AnthropicGenerator {
    /// Create a generator against the public endpoint
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        Self::with_base_url("https://api.anthropic.com", api_key, model, timeout)
    }

    /// Create a generator against a custom endpoint
    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build().map_err(|e| {
            NightSkyError::ConfigInvalid {
                key: "http_client".to_string(),
                reason: format!("Failed to build HTTP client: {}", e),
            }
        })?;

        Ok(Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            client,
        })
    }
}

#[async_trait]
impl Generator for AnthropicGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url.trim_end_matches('/')))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| NightSkyError::Narrative {
                reason: format!("Failed to reach the Messages API: {}", e),
                remediation: "Check network access to api.anthropic.com".to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(NightSkyError::Narrative {
                reason: format!("Messages API error ({}): {}", status, error_text),
                remediation: format!(
                    "Check ANTHROPIC_API_KEY and that the model '{}' is available",
                    self.model
                ),
            });
        }

        let reply: MessagesResponse = response.json().await.map_err(|e| NightSkyError::Narrative {
            reason: format!("Failed to parse Messages API response: {}", e),
            remediation: "Check Messages API compatibility".to_string(),
        })?;

        reply.first_text().ok_or_else(|| NightSkyError::Narrative {
            reason: "Messages API returned no text content".to_string(),
            remediation: "Retry later".to_string(),
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Request body for the Messages API
#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response from the Messages API
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl MessagesResponse {
    fn first_text(self) -> Option<String> {
        self.content
            .into_iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_creation() {
        let generator =
            AnthropicGenerator::new("key", "claude-sonnet-4-5", Duration::from_secs(10)).unwrap();
        assert_eq!(generator.model_name(), "claude-sonnet-4-5");
        assert_eq!(generator.base_url, "https://api.anthropic.com");
    }

    #[test]
    fn test_request_body_shape() {
        let request = MessagesRequest {
            model: "m",
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user",
                content: "hello",
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["max_tokens"], 300);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hello");
    }

    #[test]
    fn test_first_text_block() {
        let reply: MessagesResponse = serde_json::from_str(
            r#"{"id": "msg_1", "type": "message", "role": "assistant",
                "content": [{"type": "text", "text": "  별빛이 내려앉은 밤.  "}],
                "stop_reason": "end_turn"}"#,
        )
        .unwrap();
        assert_eq!(reply.first_text().unwrap(), "별빛이 내려앉은 밤.");

        let empty: MessagesResponse = serde_json::from_str(r#"{"content": []}"#).unwrap();
        assert!(empty.first_text().is_none());
    }
}
