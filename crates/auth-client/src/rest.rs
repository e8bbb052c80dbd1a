//! SnapFit REST API client
//!
//! Thin HTTP client over the backend endpoints the login flow needs: the
//! social-login exchange, user registration, and the vibes listing. Request
//! and response bodies are JSON with camelCase field names.

use crate::gateway::GatewayError;
use crate::provider::SocialProvider;
use crate::types::{RegistrationRequest, SessionTokens, Vibe};
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default SnapFit API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.snapfit.kr";

/// API client configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the SnapFit backend
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("snapfit/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ApiConfig {
    /// Create a configuration with a custom base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Default::default() }
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Error body the backend returns on non-2xx responses
#[derive(Debug, Clone, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SocialLoginBody<'a> {
    social: SocialProvider,
    social_access_token: &'a str,
}

/// HTTP client for the SnapFit backend
#[derive(Debug, Clone)]
pub struct SnapFitApi {
    client: ReqwestClient,
    config: ApiConfig,
}

impl SnapFitApi {
    /// Create a new API client
    pub fn new(config: ApiConfig) -> Result<Self, GatewayError> {
        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    /// Exchange a provider access token for SnapFit session tokens
    ///
    /// 404 means the social identity has no SnapFit account yet.
    pub async fn login_with_provider(
        &self,
        access_token: &str,
        provider: SocialProvider,
    ) -> Result<SessionTokens, GatewayError> {
        let url = format!("{}/login/social", self.config.base_url);
        let body = SocialLoginBody { social: provider, social_access_token: access_token };

        tracing::debug!(provider = %provider, "social login exchange");

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = Self::error_message(response).await;
            return Err(GatewayError::Backend { status: status.as_u16(), message });
        }

        Ok(response.json().await?)
    }

    /// Register a new user with the backend
    pub async fn register_user(
        &self,
        request: RegistrationRequest,
    ) -> Result<SessionTokens, GatewayError> {
        let url = format!("{}/users", self.config.base_url);

        tracing::debug!(provider = %request.social, "registering user");

        let response = self.client.post(&url).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = Self::error_message(response).await;
            return Err(GatewayError::Registration { status: status.as_u16(), message });
        }

        Ok(response.json().await?)
    }

    /// Fetch the vibes offered during registration
    pub async fn fetch_vibes(&self) -> Result<Vec<Vibe>, GatewayError> {
        let url = format!("{}/vibes", self.config.base_url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = Self::error_message(response).await;
            return Err(GatewayError::VibesFetch(format!("{}: {}", status.as_u16(), message)));
        }

        Ok(response.json().await?)
    }

    /// Extract a message from an error response, best-effort
    async fn error_message(response: reqwest::Response) -> String {
        match response.json::<ErrorBody>().await {
            Ok(body) => body.message.unwrap_or_else(|| "unknown error".to_string()),
            Err(_) => "unknown error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json_string, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn api_for(server: &MockServer) -> SnapFitApi {
        SnapFitApi::new(ApiConfig::new(server.uri())).unwrap()
    }

    #[tokio::test]
    async fn test_login_exchange_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login/social"))
            .and(body_json_string(
                "{\"social\":\"kakao\",\"socialAccessToken\":\"tok1\"}",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "accessToken": "A",
                "refreshToken": "B",
            })))
            .mount(&server)
            .await;

        let api = api_for(&server).await;
        let tokens = api
            .login_with_provider("tok1", SocialProvider::Kakao)
            .await
            .unwrap();
        assert_eq!(tokens, SessionTokens::new("A", "B"));
    }

    #[tokio::test]
    async fn test_login_exchange_unregistered() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login/social"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "message": "user not found",
            })))
            .mount(&server)
            .await;

        let api = api_for(&server).await;
        let err = api
            .login_with_provider("tok1", SocialProvider::Apple)
            .await
            .unwrap_err();
        assert!(err.is_unregistered());
        assert!(err.to_string().contains("user not found"));
    }

    #[tokio::test]
    async fn test_register_user_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "accessToken": "X",
                "refreshToken": "Y",
            })))
            .mount(&server)
            .await;

        let api = api_for(&server).await;
        let request = RegistrationRequest {
            social: SocialProvider::Kakao,
            nickname: "kim".to_string(),
            is_marketing: false,
            oauth_token: String::new(),
            social_access_token: "tok1".to_string(),
            moods: vec!["calm".to_string(), "bright".to_string()],
        };
        let tokens = api.register_user(request).await.unwrap();
        assert_eq!(tokens, SessionTokens::new("X", "Y"));
    }

    #[tokio::test]
    async fn test_register_user_failure_maps_to_registration_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "message": "nickname taken",
            })))
            .mount(&server)
            .await;

        let api = api_for(&server).await;
        let request = RegistrationRequest {
            social: SocialProvider::Apple,
            nickname: "kim".to_string(),
            is_marketing: true,
            oauth_token: "oauth".to_string(),
            social_access_token: "tok".to_string(),
            moods: vec!["calm".to_string()],
        };
        let err = api.register_user(request).await.unwrap_err();
        assert!(matches!(err, GatewayError::Registration { status: 400, .. }));
    }

    #[tokio::test]
    async fn test_fetch_vibes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/vibes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "id": 1, "name": "calm" },
                { "id": 2, "name": "bright" },
            ])))
            .mount(&server)
            .await;

        let api = api_for(&server).await;
        let vibes = api.fetch_vibes().await.unwrap();
        assert_eq!(vibes, vec![Vibe::new(1, "calm"), Vibe::new(2, "bright")]);
    }

    #[tokio::test]
    async fn test_fetch_vibes_failure_is_vibes_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/vibes"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let api = api_for(&server).await;
        let err = api.fetch_vibes().await.unwrap_err();
        assert!(matches!(err, GatewayError::VibesFetch(_)));
    }
}
