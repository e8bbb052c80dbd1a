//! Wire types exchanged with the SnapFit backend and provider SDKs

use crate::provider::SocialProvider;
use serde::{Deserialize, Serialize};

/// Session tokens issued by the SnapFit backend
///
/// Both fields are optional on the wire; callers persisting them substitute
/// empty strings for absent values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTokens {
    /// Backend access token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Backend refresh token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl SessionTokens {
    /// Create tokens from concrete values
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access_token: Some(access.into()),
            refresh_token: Some(refresh.into()),
        }
    }

    /// Access token, empty string when absent
    pub fn access_or_empty(&self) -> &str {
        self.access_token.as_deref().unwrap_or("")
    }

    /// Refresh token, empty string when absent
    pub fn refresh_or_empty(&self) -> &str {
        self.refresh_token.as_deref().unwrap_or("")
    }
}

/// A photography vibe offered during registration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vibe {
    /// Backend identifier
    pub id: Option<i64>,
    /// Display name, also the mood string submitted at registration
    pub name: Option<String>,
}

impl Vibe {
    /// Create a vibe with both fields present
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self { id: Some(id), name: Some(name.into()) }
    }
}

/// Registration payload for a social identity not yet known to the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    /// Provider the identity came from
    pub social: SocialProvider,
    /// Chosen nickname
    pub nickname: String,
    /// Marketing consent checkbox
    pub is_marketing: bool,
    /// Provider-specific identity token used for linking
    pub oauth_token: String,
    /// Provider access token from the sign-in step
    pub social_access_token: String,
    /// Selected moods, one or two entries
    pub moods: Vec<String>,
}

/// Parameters handed to the Apple sign-in SDK
///
/// The handoff is fire-and-forget; the SDK reports back through a separate
/// completion delivered as a `CompleteAppleLogin` action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppleAuthRequest {
    /// Requested scopes (e.g. "email", "fullName")
    pub scopes: Vec<String>,
    /// Replay-protection nonce, when the caller supplies one
    pub nonce: Option<String>,
}
