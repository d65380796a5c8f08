use log::debug;

use crate::error::RelayError;
use crate::providers::{build_assistant_prompt, LlmProvider, ResponseFormat};

/// Answer a cooking question, optionally in the context of a recipe.
pub async fn answer_question(
    provider: Option<&dyn LlmProvider>,
    question: &str,
    recipe: Option<&str>,
) -> Result<String, RelayError> {
    let provider = provider.ok_or_else(|| {
        RelayError::ServiceUnavailable("no generative service configured".to_string())
    })?;

    debug!("Asking {} a cooking question", provider.provider_name());
    let answer = provider
        .complete(
            &build_assistant_prompt(recipe),
            question.trim(),
            ResponseFormat::Text,
        )
        .await?;

    Ok(answer.trim().to_string())
}
