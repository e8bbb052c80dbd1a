//! Login flow routes and navigation stack
//!
//! Routes are a closed enum with the original client's stringly identifiers
//! as wire names. The stack only grows via explicit push and shrinks via
//! explicit pop/reset; the presentation layer reads it to pick a screen.

use serde::{Deserialize, Serialize};

/// Screens reachable from the login flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    /// Terms-of-service acceptance, first step of registration
    #[serde(rename = "termsView")]
    TermsView,
    /// Nickname entry
    #[serde(rename = "NicknameSettingsView")]
    NicknameSettingsView,
    /// Vibe/mood grid selection
    #[serde(rename = "GridSelectionView")]
    GridSelectionView,
    /// Browse-without-account entry
    #[serde(rename = "FreelookView")]
    FreelookView,
}

impl Route {
    /// Stable route identifier matching the original client
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::TermsView => "termsView",
            Route::NicknameSettingsView => "NicknameSettingsView",
            Route::GridSelectionView => "GridSelectionView",
            Route::FreelookView => "FreelookView",
        }
    }
}

/// Ordered route stack for the login UI
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationStack {
    entries: Vec<Route>,
}

impl NavigationStack {
    /// Create an empty stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a route onto the stack
    pub fn push(&mut self, route: Route) {
        self.entries.push(route);
    }

    /// Pop the top route, if any
    pub fn pop(&mut self) -> Option<Route> {
        self.entries.pop()
    }

    /// Remove every route
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Current top route
    pub fn current(&self) -> Option<&Route> {
        self.entries.last()
    }

    /// All routes, bottom to top
    pub fn routes(&self) -> &[Route] {
        &self.entries
    }

    /// Stack depth
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// Whether the stack is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_identifiers() {
        assert_eq!(Route::TermsView.as_str(), "termsView");
        assert_eq!(Route::NicknameSettingsView.as_str(), "NicknameSettingsView");
        assert_eq!(Route::GridSelectionView.as_str(), "GridSelectionView");
        assert_eq!(Route::FreelookView.as_str(), "FreelookView");
    }

    #[test]
    fn test_route_serde_uses_original_names() {
        let json = serde_json::to_string(&Route::TermsView).unwrap();
        assert_eq!(json, "\"termsView\"");
        let back: Route = serde_json::from_str("\"FreelookView\"").unwrap();
        assert_eq!(back, Route::FreelookView);
    }

    #[test]
    fn test_stack_push_pop() {
        let mut stack = NavigationStack::new();
        assert!(stack.is_empty());
        assert_eq!(stack.pop(), None);

        stack.push(Route::TermsView);
        stack.push(Route::NicknameSettingsView);
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.current(), Some(&Route::NicknameSettingsView));

        assert_eq!(stack.pop(), Some(Route::NicknameSettingsView));
        assert_eq!(stack.current(), Some(&Route::TermsView));
    }

    #[test]
    fn test_stack_reset() {
        let mut stack = NavigationStack::new();
        stack.push(Route::TermsView);
        stack.push(Route::GridSelectionView);

        stack.reset();
        assert!(stack.is_empty());
    }
}
