/// External collaborators of the recommendation pipeline
///
/// Identity verification and the language-model gateway are remote services.
/// Each sits behind a trait so the pipeline can be driven by in-process fakes
/// in tests, and so another vendor can be dropped in without touching the
/// pipeline.
use serde::Serialize;

use crate::{error::AppResult, models::UserId};

pub mod chat_completions;
pub mod identity;

pub use chat_completions::ChatCompletionsGateway;
pub use identity::HttpIdentityProvider;

/// Resolves a bearer credential to the user it was issued for
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the user id, or `AppError::Unauthorized` for any credential that
    /// cannot be verified
    async fn verify(&self, token: &str) -> AppResult<UserId>;
}

/// One chat turn sent to the gateway
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

/// A single chat-completion request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

/// Request/response access to a language-model gateway
///
/// Implementations set the error kind at the call site: a rate-limited gateway
/// yields `AppError::RateLimited`, every other failure a 500-class variant.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Sends the request and returns the raw text of the first completion
    async fn complete(&self, request: &CompletionRequest) -> AppResult<String>;

    /// Gateway name for logging
    fn name(&self) -> &'static str;
}
