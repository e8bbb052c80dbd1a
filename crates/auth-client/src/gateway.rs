//! Auth gateway collaborator
//!
//! The login flow talks to exactly one collaborator, the [`AuthGateway`].
//! It bundles the identity-provider SDK seam (Kakao/Apple sign-in) with the
//! SnapFit backend calls (exchange, registration, vibes). The production
//! implementation is [`SnapFitGateway`], which pairs an injected
//! [`IdentityProvider`] with the HTTP [`crate::rest::SnapFitApi`].

use crate::provider::SocialProvider;
use crate::types::{AppleAuthRequest, RegistrationRequest, SessionTokens, Vibe};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by gateway operations
///
/// Variants map onto the flow's failure taxonomy: provider SDK failures,
/// backend exchange failures, registration failures, and the non-fatal
/// vibes fetch failure. Transport-level variants carry the underlying cause.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Identity-provider SDK failure (Kakao or Apple)
    #[error("Provider auth error: {0}")]
    Provider(String),

    /// Backend rejected or failed the social-login exchange
    #[error("Backend exchange error ({status}): {message}")]
    Backend {
        /// HTTP status code
        status: u16,
        /// Error message from the backend
        message: String,
    },

    /// Backend rejected or failed the registration call
    #[error("Registration error ({status}): {message}")]
    Registration {
        /// HTTP status code
        status: u16,
        /// Error message from the backend
        message: String,
    },

    /// Vibes listing could not be fetched (non-fatal for the flow)
    #[error("Vibes fetch error: {0}")]
    VibesFetch(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GatewayError {
    /// Whether the backend reported the identity as not yet registered
    ///
    /// The SnapFit backend answers the social-login exchange with 404 for an
    /// unknown identity, which the flow turns into the registration wizard.
    pub fn is_unregistered(&self) -> bool {
        matches!(self, GatewayError::Backend { status: 404, .. })
    }

    /// Whether the failure came from the transport rather than the backend
    pub fn is_network_error(&self) -> bool {
        matches!(self, GatewayError::Network(_))
    }
}

/// External collaborator driving social sign-in and backend calls
///
/// Consumed by the login flow controller; mocked in its tests.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Run the Kakao SDK sign-in and return the provider access token
    async fn sign_in_kakao(&self) -> Result<String, GatewayError>;

    /// Hand off to the Apple sign-in SDK
    ///
    /// Fire-and-forget: the SDK's completion arrives later as a separate
    /// `CompleteAppleLogin` action carrying the outcome.
    async fn sign_in_apple(&self, request: AppleAuthRequest);

    /// Exchange a provider access token for SnapFit session tokens
    ///
    /// A 404 from the backend means the social identity is not registered
    /// yet (see [`GatewayError::is_unregistered`]).
    async fn login_with_provider(
        &self,
        access_token: &str,
        provider: SocialProvider,
    ) -> Result<SessionTokens, GatewayError>;

    /// Register a new user and return their session tokens
    async fn register_user(
        &self,
        request: RegistrationRequest,
    ) -> Result<SessionTokens, GatewayError>;

    /// Fetch the vibes offered during registration
    async fn fetch_vibes(&self) -> Result<Vec<Vibe>, GatewayError>;
}

/// Seam over the platform identity-provider SDKs
///
/// Only the sign-in entry points live here; completions for Apple are
/// delivered out-of-band by the platform layer.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Run the Kakao SDK sign-in and return the provider access token
    async fn sign_in_kakao(&self) -> Result<String, GatewayError>;

    /// Hand the request to the Apple sign-in SDK
    async fn sign_in_apple(&self, request: AppleAuthRequest);
}

/// Production gateway: identity-provider seam plus the SnapFit HTTP API
pub struct SnapFitGateway {
    provider: Arc<dyn IdentityProvider>,
    api: crate::rest::SnapFitApi,
}

impl SnapFitGateway {
    /// Create a gateway from an identity provider and an API client
    pub fn new(provider: Arc<dyn IdentityProvider>, api: crate::rest::SnapFitApi) -> Self {
        Self { provider, api }
    }
}

#[async_trait]
impl AuthGateway for SnapFitGateway {
    async fn sign_in_kakao(&self) -> Result<String, GatewayError> {
        self.provider.sign_in_kakao().await
    }

    async fn sign_in_apple(&self, request: AppleAuthRequest) {
        self.provider.sign_in_apple(request).await;
    }

    async fn login_with_provider(
        &self,
        access_token: &str,
        provider: SocialProvider,
    ) -> Result<SessionTokens, GatewayError> {
        self.api.login_with_provider(access_token, provider).await
    }

    async fn register_user(
        &self,
        request: RegistrationRequest,
    ) -> Result<SessionTokens, GatewayError> {
        self.api.register_user(request).await
    }

    async fn fetch_vibes(&self) -> Result<Vec<Vibe>, GatewayError> {
        self.api.fetch_vibes().await
    }
}
