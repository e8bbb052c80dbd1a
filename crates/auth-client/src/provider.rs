//! Social identity providers
//!
//! The original client carried provider names as bare strings ("kakao",
//! "apple") and fell through silently on anything else. Here the set is a
//! closed enum; unknown wire strings are a parse error at the boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A supported social identity provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialProvider {
    /// Kakao social sign-in
    Kakao,
    /// Sign in with Apple
    Apple,
}

impl SocialProvider {
    /// Wire name used by the backend ("kakao" / "apple")
    pub fn as_str(&self) -> &'static str {
        match self {
            SocialProvider::Kakao => "kakao",
            SocialProvider::Apple => "apple",
        }
    }

    /// All supported providers
    pub fn all() -> [SocialProvider; 2] {
        [SocialProvider::Kakao, SocialProvider::Apple]
    }
}

impl fmt::Display for SocialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown provider name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported social provider: {0}")]
pub struct UnknownProvider(pub String);

impl FromStr for SocialProvider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "kakao" => Ok(SocialProvider::Kakao),
            "apple" => Ok(SocialProvider::Apple),
            other => Err(UnknownProvider(other.to_string())),
        }
    }
}
