//! Actions and signals of the login flow
//!
//! User intents and async completions are both expressed as [`LoginAction`]s
//! so a single owner applies every mutation. Transient user-facing failures
//! are reported out-of-band as [`LoginSignal`]s.

use auth_client::{AppleAuthRequest, GatewayError, RegistrationRequest, SessionTokens,
    SocialProvider, Vibe};

/// An intent accepted by the login flow controller
#[derive(Debug)]
pub enum LoginAction {
    /// Kick off Kakao sign-in via the gateway
    StartKakaoLogin,
    /// Hand off to the Apple sign-in SDK
    StartAppleLogin(AppleAuthRequest),
    /// Apple SDK completion, delivered by the platform layer
    CompleteAppleLogin(Result<String, GatewayError>),
    /// Exchange a provider token for backend session tokens
    ExchangeWithBackend {
        /// Provider the token came from
        provider: SocialProvider,
        /// Provider access token
        access_token: String,
    },
    /// Write session tokens to storage (best-effort)
    PersistTokens(SessionTokens),
    /// Exchange or registration succeeded
    PresentLoginOutcome {
        /// Provider of the attempt
        provider: SocialProvider,
        /// Access token to retain in state
        access_token: String,
        /// Identity token to retain, when the step produced one
        oauth_token: Option<String>,
    },
    /// Exchange failed for an unregistered identity
    PresentLoginFailure {
        /// Provider of the attempt
        provider: SocialProvider,
        /// Provider token retained for the registration wizard
        access_token: String,
    },
    /// Exchange failed for a reason other than an unregistered identity
    PresentExchangeError {
        /// Provider of the attempt
        provider: SocialProvider,
    },
    /// Identity-provider SDK failed before any exchange
    PresentProviderFailure {
        /// Provider that failed
        provider: SocialProvider,
    },
    /// Submit the registration wizard
    RegisterUser(RegistrationRequest),
    /// Registration call failed; wizard input stays editable
    PresentRegisterFailure {
        /// Provider of the attempt
        provider: SocialProvider,
        /// Provider token retained for a retry
        access_token: String,
        /// Identity token retained for a retry
        oauth_token: String,
    },
    /// Load the vibes listing
    FetchVibes,
    /// Vibes listing arrived
    PresentVibes(Vec<Vibe>),
    /// Vibes listing failed; list stays as it was
    PresentVibesFailure,
    /// Toggle the mood at an index of the vibes listing
    SelectMood(usize),
    /// Update the nickname field
    SetNickname(String),
    /// Recompute navigation and modal visibility from state
    Display,
}

/// Transient, user-facing failure notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginSignal {
    /// Kakao SDK sign-in failed
    KakaoLoginFailed,
    /// Apple SDK sign-in failed
    AppleLoginFailed,
    /// Backend exchange failed
    BackendLoginFailed,
    /// Registration was rejected or failed validation
    RegistrationFailed,
    /// Vibes listing could not be fetched
    VibesFetchFailed,
    /// A third mood selection was rejected
    TooManySelections,
}
