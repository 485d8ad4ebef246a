/// OpenAI-compatible chat-completions gateway
///
/// Sends `POST {api_url}/chat/completions` with a bearer key and returns the
/// content of the first choice. The HTTP client carries a hard timeout so a
/// hung gateway cannot hold a request open indefinitely.
use crate::{
    error::{AppError, AppResult},
    services::providers::{CompletionGateway, CompletionRequest},
};
use reqwest::{Client as HttpClient, StatusCode};
use serde::Deserialize;
use std::time::Duration;

const GATEWAY_NAME: &str = "chat_completions";

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// A failed attempt, tagged with whether another attempt may succeed
struct AttemptFailure {
    error: AppError,
    transient: bool,
}

impl From<reqwest::Error> for AttemptFailure {
    fn from(e: reqwest::Error) -> Self {
        let transient = e.is_timeout() || e.is_connect();
        let error = if e.is_timeout() {
            AppError::Timeout("model gateway".to_string())
        } else {
            AppError::HttpClient(e)
        };
        Self { error, transient }
    }
}

#[derive(Clone)]
pub struct ChatCompletionsGateway {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    max_retries: u32,
}

impl ChatCompletionsGateway {
    /// Creates a gateway client
    ///
    /// `max_retries` extra attempts are made only for timeouts, connection
    /// failures and 5xx responses. A 429 is never retried.
    pub fn new(
        api_key: String,
        api_url: String,
        timeout: Duration,
        max_retries: u32,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            max_retries,
        })
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.api_url)
    }

    async fn send_once(&self, request: &CompletionRequest) -> Result<String, AttemptFailure> {
        let response = self
            .http_client
            .post(self.url())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(AttemptFailure {
                error: AppError::RateLimited,
                transient: false,
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AttemptFailure {
                error: AppError::Upstream(format!(
                    "Gateway returned status {}: {}",
                    status, body
                )),
                transient: status.is_server_error(),
            });
        }

        let body = response.text().await?;
        parse_completion(&body).map_err(|error| AttemptFailure {
            error,
            transient: false,
        })
    }
}

/// Extracts the first choice's content from a completion envelope
fn parse_completion(body: &str) -> AppResult<String> {
    let envelope: ChatCompletionResponse = serde_json::from_str(body).map_err(|e| {
        tracing::error!(error = %e, response = %body, "Failed to deserialize completion");
        AppError::MalformedInference(format!("Invalid completion envelope: {}", e))
    })?;

    envelope
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| AppError::MalformedInference("Completion has no content".to_string()))
}

#[async_trait::async_trait]
impl CompletionGateway for ChatCompletionsGateway {
    #[tracing::instrument(skip(self, request), fields(model = %request.model, provider = GATEWAY_NAME))]
    async fn complete(&self, request: &CompletionRequest) -> AppResult<String> {
        let mut attempt = 0;

        loop {
            match self.send_once(request).await {
                Ok(content) => {
                    tracing::debug!(attempt, chars = content.len(), "Completion received");
                    return Ok(content);
                }
                Err(failure) if failure.transient && attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        error = %failure.error,
                        attempt,
                        max_retries = self.max_retries,
                        "Transient gateway failure, retrying"
                    );
                }
                Err(failure) => return Err(failure.error),
            }
        }
    }

    fn name(&self) -> &'static str {
        GATEWAY_NAME
    }
}
