//! SnapFit authentication client
//!
//! This crate provides the client-side surface for SnapFit's social sign-in:
//! the `AuthGateway` collaborator trait, the identity-provider seam, the wire
//! types exchanged with the SnapFit backend, and an HTTP-backed gateway.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod gateway;
pub mod provider;
pub mod rest;
pub mod test_utils;
pub mod types;

pub use gateway::{AuthGateway, GatewayError, IdentityProvider, SnapFitGateway};
pub use provider::{SocialProvider, UnknownProvider};
pub use rest::{ApiConfig, SnapFitApi, DEFAULT_BASE_URL};
pub use types::{AppleAuthRequest, RegistrationRequest, SessionTokens, Vibe};

/// Result type for gateway operations
pub type Result<T> = std::result::Result<T, GatewayError>;
