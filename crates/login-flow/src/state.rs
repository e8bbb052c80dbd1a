//! View-facing login flow state
//!
//! Created when the login screen mounts, mutated only by the controller,
//! discarded when login completes or the session ends.

use crate::navigation::NavigationStack;
use auth_client::{SocialProvider, Vibe};
use serde::{Deserialize, Serialize};

/// Maximum number of moods a user may select
pub const MAX_MOODS: usize = 2;

/// Rejected mood selection beyond [`MAX_MOODS`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("At most {MAX_MOODS} moods can be selected")]
pub struct TooManySelections;

/// Ordered mood selection capped at [`MAX_MOODS`] entries
///
/// Order is preserved because the selection is submitted verbatim in the
/// registration request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodSelection {
    moods: Vec<String>,
}

impl MoodSelection {
    /// Toggle a mood in or out of the selection
    ///
    /// Adding a third distinct mood is rejected and leaves the selection
    /// unchanged.
    pub fn toggle(&mut self, mood: impl Into<String>) -> Result<(), TooManySelections> {
        let mood = mood.into();
        if let Some(position) = self.moods.iter().position(|m| *m == mood) {
            self.moods.remove(position);
            return Ok(());
        }
        if self.moods.len() >= MAX_MOODS {
            return Err(TooManySelections);
        }
        self.moods.push(mood);
        Ok(())
    }

    /// Whether a mood is currently selected
    pub fn contains(&self, mood: &str) -> bool {
        self.moods.iter().any(|m| m == mood)
    }

    /// Selected moods in selection order
    pub fn as_slice(&self) -> &[String] {
        &self.moods
    }

    /// Number of selected moods
    pub fn len(&self) -> usize {
        self.moods.len()
    }

    /// Whether nothing is selected
    pub fn is_empty(&self) -> bool {
        self.moods.is_empty()
    }

    /// Clear the selection
    pub fn clear(&mut self) {
        self.moods.clear();
    }
}

/// Phase of the current login attempt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoginPhase {
    /// No attempt in progress
    #[default]
    Idle,
    /// Waiting on the identity-provider SDK
    ProviderAuthInProgress,
    /// Waiting on the backend exchange
    BackendExchangeInProgress,
    /// Backend accepted the identity; flow is done
    Authenticated,
    /// Backend does not know the identity; registration wizard active
    RegistrationRequired,
    /// Waiting on the backend registration call
    RegistrationInProgress,
}

impl LoginPhase {
    /// Whether an async provider or exchange step is currently pending
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            LoginPhase::ProviderAuthInProgress
                | LoginPhase::BackendExchangeInProgress
                | LoginPhase::RegistrationInProgress
        )
    }
}

/// Mutable state backing the login and registration screens
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginFlowState {
    /// Current phase of the attempt
    pub phase: LoginPhase,
    /// Provider of the most recent sign-in, if any
    pub social_provider: Option<SocialProvider>,
    /// Provider access token from the sign-in step
    pub social_access_token: String,
    /// Provider identity token kept for registration linking
    pub oauth_token: String,
    /// True when the backend reported the identity as unregistered
    pub membership_required: bool,
    /// Nickname entered in the wizard
    pub nickname: String,
    /// Moods picked in the wizard, at most two
    pub selected_moods: MoodSelection,
    /// Vibes offered by the backend
    pub available_vibes: Vec<Vibe>,
    /// Route stack the presentation layer renders from
    pub navigation: NavigationStack,
    /// Whether the login modal is showing
    pub is_login_modal_visible: bool,
}

impl LoginFlowState {
    /// State as it exists when the login screen mounts
    pub fn new() -> Self {
        Self { is_login_modal_visible: true, ..Self::default() }
    }
}
