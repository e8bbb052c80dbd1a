//! Test doubles for gateway consumers
//!
//! Provides a scripted in-memory [`AuthGateway`] so downstream crates and
//! integration tests can drive the login flow without a network or the
//! provider SDKs.

#![allow(dead_code)] // Test utilities may not all be used yet

use crate::gateway::{AuthGateway, GatewayError};
use crate::provider::SocialProvider;
use crate::types::{AppleAuthRequest, RegistrationRequest, SessionTokens, Vibe};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Scripted gateway returning pre-configured outcomes
///
/// Defaults: Kakao sign-in yields `"kakao-token"`, the identity is already
/// registered, registration succeeds, and two vibes are offered.
pub struct ScriptedGateway {
    /// Token the Kakao sign-in yields; `None` scripts an SDK failure
    pub kakao_token: Option<String>,
    /// Whether the backend knows the social identity
    pub registered: bool,
    /// Tokens returned from a successful exchange
    pub login_tokens: SessionTokens,
    /// Tokens returned from registration; `None` scripts a backend reject
    pub register_tokens: Option<SessionTokens>,
    /// Vibes listing; `None` scripts a fetch failure
    pub vibes: Option<Vec<Vibe>>,
    exchange_calls: AtomicUsize,
    register_calls: AtomicUsize,
    apple_requests: Mutex<Vec<AppleAuthRequest>>,
}

impl Default for ScriptedGateway {
    fn default() -> Self {
        Self {
            kakao_token: Some("kakao-token".to_string()),
            registered: true,
            login_tokens: SessionTokens::new("access", "refresh"),
            register_tokens: Some(SessionTokens::new("reg-access", "reg-refresh")),
            vibes: Some(vec![Vibe::new(1, "calm"), Vibe::new(2, "bright")]),
            exchange_calls: AtomicUsize::new(0),
            register_calls: AtomicUsize::new(0),
            apple_requests: Mutex::new(Vec::new()),
        }
    }
}

impl ScriptedGateway {
    /// Gateway for an identity the backend already knows
    pub fn registered() -> Self {
        Self::default()
    }

    /// Gateway for an identity the backend has never seen
    pub fn unregistered() -> Self {
        Self { registered: false, ..Self::default() }
    }

    /// Number of backend exchange calls made so far
    pub fn exchange_calls(&self) -> usize {
        self.exchange_calls.load(Ordering::SeqCst)
    }

    /// Number of registration calls made so far
    pub fn register_calls(&self) -> usize {
        self.register_calls.load(Ordering::SeqCst)
    }

    /// Apple sign-in requests handed off so far
    pub fn apple_requests(&self) -> Vec<AppleAuthRequest> {
        self.apple_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthGateway for ScriptedGateway {
    async fn sign_in_kakao(&self) -> Result<String, GatewayError> {
        self.kakao_token
            .clone()
            .ok_or_else(|| GatewayError::Provider("kakao sign-in failed".to_string()))
    }

    async fn sign_in_apple(&self, request: AppleAuthRequest) {
        self.apple_requests.lock().unwrap().push(request);
    }

    async fn login_with_provider(
        &self,
        _access_token: &str,
        _provider: SocialProvider,
    ) -> Result<SessionTokens, GatewayError> {
        self.exchange_calls.fetch_add(1, Ordering::SeqCst);
        if self.registered {
            Ok(self.login_tokens.clone())
        } else {
            Err(GatewayError::Backend { status: 404, message: "user not found".to_string() })
        }
    }

    async fn register_user(
        &self,
        _request: RegistrationRequest,
    ) -> Result<SessionTokens, GatewayError> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        self.register_tokens.clone().ok_or(GatewayError::Registration {
            status: 400,
            message: "registration rejected".to_string(),
        })
    }

    async fn fetch_vibes(&self) -> Result<Vec<Vibe>, GatewayError> {
        self.vibes
            .clone()
            .ok_or_else(|| GatewayError::VibesFetch("vibes unavailable".to_string()))
    }
}
