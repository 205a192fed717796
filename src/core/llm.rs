use crate::config::Config;
use crate::features::commit::prompt::{create_suggestion_prompt, truncate_diff};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use llm::{
    LLMProvider,
    builder::{LLMBackend, LLMBuilder},
    chat::ChatMessage,
};
use log::debug;

const SUGGESTION_TEMPERATURE: f32 = 0.3;
const SUGGESTION_MAX_TOKENS: u32 = 100;

/// What the model is told about the allowed commit vocabulary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionContext {
    pub commit_types: Vec<String>,
    pub scope_types: Vec<String>,
    pub custom_prompt: Option<String>,
}

impl SuggestionContext {
    pub fn from_config(config: &Config) -> Self {
        Self {
            commit_types: config.commit_types.clone(),
            scope_types: config.scope_types.clone(),
            custom_prompt: config.get_effective_instructions(),
        }
    }
}

/// Turns a staged diff into a suggested commit subject line.
///
/// One request per call; callers decide what a failure means.
#[async_trait]
pub trait Suggester {
    async fn suggest(&self, diff: &str, context: &SuggestionContext) -> Result<String>;
}

/// Suggestion service backed by Google Gemini through the `llm` crate
pub struct GeminiSuggester {
    api_key: Option<String>,
    model: String,
    max_diff_chars: usize,
}

impl GeminiSuggester {
    pub fn new(config: &Config) -> Self {
        Self {
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            max_diff_chars: config.max_diff_chars,
        }
    }

    fn build_provider(&self) -> Result<Box<dyn LLMProvider>> {
        let api_key = self
            .api_key
            .as_ref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| anyhow!("API key required for suggestions"))?;

        LLMBuilder::new()
            .backend(LLMBackend::Google)
            .api_key(api_key.clone())
            .model(self.model.clone())
            .temperature(SUGGESTION_TEMPERATURE)
            .max_tokens(SUGGESTION_MAX_TOKENS)
            .build()
            .map_err(|e| anyhow!("Failed to build provider: {e}"))
    }
}

#[async_trait]
impl Suggester for GeminiSuggester {
    async fn suggest(&self, diff: &str, context: &SuggestionContext) -> Result<String> {
        debug!("Requesting suggestion from model {}", self.model);

        let provider = self.build_provider()?;
        let prompt = create_suggestion_prompt(&truncate_diff(diff, self.max_diff_chars), context);
        debug!("Suggestion prompt is {} bytes", prompt.len());

        let messages = vec![ChatMessage::user().content(prompt).build()];
        let response = provider
            .chat(&messages)
            .await
            .map_err(|e| anyhow!("Provider error: {e}"))?;

        let text = response.text().unwrap_or_default();
        debug!("Received response from provider: {text:?}");

        clean_suggestion(&text).ok_or_else(|| anyhow!("Unparseable response: {text:?}"))
    }
}

/// Extracts the subject line from a model reply.
///
/// Takes the first non-empty line and strips list markers, code fences and
/// surrounding quotes. Returns `None` when nothing usable is left.
pub fn clean_suggestion(text: &str) -> Option<String> {
    let line = text
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty() && !l.starts_with("```"))?;

    let line = line
        .strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .unwrap_or(line)
        .trim();

    let cleaned = line
        .trim_matches(|c| c == '"' || c == '\'' || c == '`')
        .trim();

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}
