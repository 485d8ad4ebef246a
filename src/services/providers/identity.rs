/// GoTrue-compatible identity provider
///
/// Resolves an access token by calling `GET {auth_url}/auth/v1/user`. Any
/// failure to verify, including transport errors, counts as unauthenticated.
use crate::{
    error::{AppError, AppResult},
    models::UserId,
    services::providers::IdentityProvider,
};
use reqwest::Client as HttpClient;
use serde::Deserialize;
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: Uuid,
}

#[derive(Clone)]
pub struct HttpIdentityProvider {
    http_client: HttpClient,
    auth_url: String,
    api_key: String,
}

impl HttpIdentityProvider {
    pub fn new(auth_url: String, api_key: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            auth_url: auth_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn url(&self) -> String {
        format!("{}/auth/v1/user", self.auth_url)
    }
}

#[async_trait::async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn verify(&self, token: &str) -> AppResult<UserId> {
        if token.trim().is_empty() {
            return Err(AppError::Unauthorized);
        }

        let response = self
            .http_client
            .get(self.url())
            .bearer_auth(token)
            .header("apikey", &self.api_key)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Identity lookup failed");
                AppError::Unauthorized
            })?;

        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "Identity provider rejected token");
            return Err(AppError::Unauthorized);
        }

        let user: AuthUser = response.json().await.map_err(|e| {
            tracing::warn!(error = %e, "Identity provider returned an unreadable user");
            AppError::Unauthorized
        })?;

        Ok(UserId(user.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        http::{HeaderMap, StatusCode},
        routing::get,
        Json, Router,
    };
    use serde_json::json;

    const USER_ID: &str = "7c9e6679-7425-40de-944b-e07fc1f90ae7";

    async fn spawn_auth_server() -> String {
        let router = Router::new().route(
            "/auth/v1/user",
            get(|headers: HeaderMap| async move {
                let authorized = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .map(|v| v == "Bearer good-token")
                    .unwrap_or(false);
                let has_key = headers
                    .get("apikey")
                    .and_then(|v| v.to_str().ok())
                    .map(|v| v == "anon")
                    .unwrap_or(false);

                if authorized && has_key {
                    Ok(Json(json!({ "id": USER_ID, "email": "user@example.com" })))
                } else {
                    Err(StatusCode::UNAUTHORIZED)
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/", addr)
    }

    fn create_test_provider(url: String) -> HttpIdentityProvider {
        create_provider_with_timeout(url, Duration::from_secs(5))
    }

    fn create_provider_with_timeout(url: String, timeout: Duration) -> HttpIdentityProvider {
        HttpIdentityProvider::new(url, "anon".to_string(), timeout).unwrap()
    }

    #[test]
    fn test_url() {
        let provider = create_test_provider("https://project.supabase.co/".to_string());
        assert_eq!(provider.url(), "https://project.supabase.co/auth/v1/user");
    }

    #[tokio::test]
    async fn test_verify_valid_token() {
        let provider = create_test_provider(spawn_auth_server().await);
        let user = provider.verify("good-token").await.unwrap();
        assert_eq!(user.0, Uuid::parse_str(USER_ID).unwrap());
    }

    #[tokio::test]
    async fn test_verify_rejected_token() {
        let provider = create_test_provider(spawn_auth_server().await);
        let result = provider.verify("expired").await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_verify_blank_token_short_circuits() {
        let provider = create_test_provider("http://127.0.0.1:9".to_string());
        let result = provider.verify("   ").await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_verify_unreachable_provider_is_unauthorized() {
        let provider = create_test_provider("http://127.0.0.1:9".to_string());
        let result = provider.verify("good-token").await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_verify_slow_provider_is_unauthorized() {
        let router = Router::new().route(
            "/auth/v1/user",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                Json(json!({ "id": USER_ID }))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let provider =
            create_provider_with_timeout(format!("http://{}", addr), Duration::from_millis(100));
        let start = std::time::Instant::now();
        let result = provider.verify("good-token").await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
        assert!(start.elapsed() < Duration::from_secs(2));
    }
}
