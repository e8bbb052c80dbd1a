//! Login and registration flow for SnapFit
//!
//! This crate owns the login state machine: a single controller receives
//! intents as actions, drives the external `AuthGateway` collaborator, and
//! mutates the view-facing [`LoginFlowState`]. Async completions come back
//! as follow-up actions applied by the same owner, so UI-visible state is
//! never read mid-mutation.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod action;
pub mod controller;
pub mod navigation;
pub mod state;

pub use action::{LoginAction, LoginSignal};
pub use controller::{LoginFlowController, LoginFlowHandle};
pub use navigation::{NavigationStack, Route};
pub use state::{LoginFlowState, LoginPhase, MoodSelection, TooManySelections, MAX_MOODS};
