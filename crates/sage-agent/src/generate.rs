//! Single-shot answer generation: category-specific prompt building plus one
//! provider call. Retries, if any, are the provider's own business.

use tracing::debug;

use crate::persona::SYSTEM_PROMPT;
use crate::provider::{ChatRequest, LlmProvider, Message, ProviderError, Role};

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 2000;

/// Question category, derived from the command the user invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    General,
    Math,
    Code,
    Gaming,
}

impl Category {
    /// Human label, used in help text and validation wording.
    pub fn label(&self) -> &'static str {
        match self {
            Category::General => "question",
            Category::Math => "math problem",
            Category::Code => "coding question",
            Category::Gaming => "gaming question",
        }
    }

    /// Build the user prompt for this category.
    ///
    /// General questions pass through untouched; the other categories get a
    /// topic prefix so the model knows which specialty applies.
    pub fn user_prompt(&self, payload: &str) -> String {
        match self {
            Category::General => payload.to_string(),
            Category::Math => format!("Math problem: {payload}"),
            Category::Code => format!("Coding question: {payload}"),
            Category::Gaming => format!("Gaming question: {payload}"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("provider returned no text")]
    Empty,
}

/// Stateless generation front-end: fixed persona, per-category prompt, one
/// provider call per request.
pub struct Generator {
    provider: Box<dyn LlmProvider>,
    model: String,
}

impl Generator {
    pub fn new(provider: Box<dyn LlmProvider>, model: String) -> Self {
        Self { provider, model }
    }

    /// Generate an answer for `payload` in the given category.
    ///
    /// Calls the provider exactly once. An empty response counts as a failure
    /// so callers never deliver a blank message.
    pub async fn answer(&self, category: Category, payload: &str) -> Result<String, GenerateError> {
        let request = ChatRequest {
            model: self.model.clone(),
            system: SYSTEM_PROMPT.to_string(),
            messages: vec![Message {
                role: Role::User,
                content: category.user_prompt(payload),
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        debug!(provider = %self.provider.name(), category = ?category, "generating answer");

        let response = self.provider.send(&request).await?;
        if response.content.is_empty() {
            return Err(GenerateError::Empty);
        }
        Ok(response.content)
    }
}
