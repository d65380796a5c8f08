mod groq;
mod prompt;

pub use groq::GroqProvider;
pub use prompt::{
    build_assistant_prompt, build_recipe_prompt, CHEF_SYSTEM_PROMPT, COOKING_ASSISTANT_PROMPT,
    RECIPE_GENERATION_PROMPT,
};

use async_trait::async_trait;

use crate::error::RelayError;

/// Shape the completion should take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Text,
    /// Ask the service to constrain output to a single JSON object
    JsonObject,
}

/// Unified trait for generative text services
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "groq")
    fn provider_name(&self) -> &str;

    /// Send a system and user prompt, returning the raw completion text
    async fn complete(
        &self,
        system: &str,
        prompt: &str,
        format: ResponseFormat,
    ) -> Result<String, RelayError>;
}
