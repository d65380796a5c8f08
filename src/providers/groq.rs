use crate::config::GroqConfig;
use crate::error::RelayError;
use crate::providers::{LlmProvider, ResponseFormat};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

/// Groq chat completions through its OpenAI-compatible endpoint
pub struct GroqProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl GroqProvider {
    /// Create a new Groq provider from configuration
    ///
    /// Fails with [`RelayError::ServiceUnavailable`] when no API key is configured.
    pub fn new(config: &GroqConfig, timeout: Duration) -> Result<Self, RelayError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| RelayError::ServiceUnavailable("GROQ_API_KEY not configured".into()))?;

        let client = Client::builder().timeout(timeout).build()?;

        Ok(GroqProvider {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        GroqProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: 0.7,
            max_tokens: 2000,
        }
    }
}

#[async_trait]
impl LlmProvider for GroqProvider {
    fn provider_name(&self) -> &str {
        "groq"
    }

    async fn complete(
        &self,
        system: &str,
        prompt: &str,
        format: ResponseFormat,
    ) -> Result<String, RelayError> {
        let mut body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": prompt}
            ],
            "temperature": self.temperature,
            "max_tokens": self.max_tokens
        });
        if format == ResponseFormat::JsonObject {
            body["response_format"] = json!({"type": "json_object"});
        }

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let response_body: Value = response.json().await?;
        debug!("{:?}", response_body);
        let content = response_body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| RelayError::Parse("Failed to extract content from response".into()))?
            .to_string();

        Ok(content)
    }
}
