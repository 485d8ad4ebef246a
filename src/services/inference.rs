use std::sync::Arc;
use std::time::Instant;

use crate::{
    error::{AppError, AppResult},
    models::{TagSuggestions, UserSignal},
    services::providers::{ChatMessage, CompletionGateway, CompletionRequest},
};

/// Instruction pinning the model to a bare JSON array of style tags
pub const SYSTEM_INSTRUCTION: &str = "You are a fashion stylist. Based on user preferences, \
suggest product tags/keywords they would like. Return ONLY a JSON array of 5-8 style tags, \
nothing else.";

/// Derives style tags from a user's signals with one model call
///
/// The model is asked for a JSON array of strings but its output is still
/// validated: anything else is rejected as `AppError::MalformedInference`.
#[derive(Clone)]
pub struct TagInferencer {
    gateway: Arc<dyn CompletionGateway>,
    model: String,
}

impl TagInferencer {
    pub fn new(gateway: Arc<dyn CompletionGateway>, model: String) -> Self {
        Self { gateway, model }
    }

    /// Summarizes favorites and searches as the user turn of the prompt
    ///
    /// Both sections are always present, empty for a user with no history.
    pub fn build_context(signal: &UserSignal) -> String {
        let favorites = signal
            .favorite_items()
            .iter()
            .map(|product| format!("{} ({})", product.name, product.tags.join(", ")))
            .collect::<Vec<_>>()
            .join("; ");

        format!(
            "User's favorite items: {}.\nRecent searches: {}.",
            favorites,
            signal.recent_queries().join(", ")
        )
    }

    pub fn build_request(&self, signal: &UserSignal) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_INSTRUCTION),
                ChatMessage::user(Self::build_context(signal)),
            ],
        }
    }

    pub async fn infer(&self, signal: &UserSignal) -> AppResult<TagSuggestions> {
        let request = self.build_request(signal);
        let start = Instant::now();

        let content = self.gateway.complete(&request).await?;
        let suggestions = parse_suggestions(&content)?;

        tracing::info!(
            gateway = self.gateway.name(),
            model = %self.model,
            count = suggestions.len(),
            tags = ?suggestions.as_slice(),
            elapsed_ms = start.elapsed().as_millis(),
            "Style tags inferred"
        );

        Ok(suggestions)
    }
}

/// Validates model output as a JSON array of strings
///
/// A surrounding Markdown code fence is tolerated. An empty array is valid.
pub fn parse_suggestions(content: &str) -> AppResult<TagSuggestions> {
    let payload = strip_code_fence(content);

    let tags: Vec<String> = serde_json::from_str(payload).map_err(|e| {
        tracing::warn!(error = %e, content = %content, "Model output is not a JSON array of strings");
        AppError::MalformedInference(format!("Expected a JSON array of strings: {}", e))
    })?;

    Ok(TagSuggestions::new(tags))
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_suffix("```").unwrap_or(rest);

    // Opening fence may carry a language tag such as `json`
    match rest.find('\n') {
        Some(idx) if rest[..idx].trim().chars().all(|c| c.is_ascii_alphanumeric()) => {
            rest[idx + 1..].trim()
        }
        _ => rest.trim(),
    }
}
