//! Login flow controller
//!
//! Single owner of [`LoginFlowState`]. Intents arrive as [`LoginAction`]s;
//! each async step runs in a task owned by the controller's `JoinSet` and
//! reports back by sending a follow-up action over the internal channel.
//! Dropping the controller aborts everything still in flight.

use crate::action::{LoginAction, LoginSignal};
use crate::navigation::Route;
use crate::state::{LoginFlowState, LoginPhase, MAX_MOODS};
use auth_client::{AuthGateway, RegistrationRequest, SessionTokens, SocialProvider};
use std::sync::Arc;
use storage::{TokenStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;

/// Cloneable sender half for dispatching actions into a running flow
#[derive(Clone)]
pub struct LoginFlowHandle {
    tx: mpsc::UnboundedSender<LoginAction>,
}

impl LoginFlowHandle {
    /// Queue an action for the controller
    ///
    /// Returns false if the flow has been torn down.
    pub fn send(&self, action: LoginAction) -> bool {
        self.tx.send(action).is_ok()
    }
}

/// Owner of the login flow state machine
///
/// Must be driven inside a Tokio runtime; async steps are spawned when the
/// initiating action is dispatched.
pub struct LoginFlowController {
    state: LoginFlowState,
    gateway: Arc<dyn AuthGateway>,
    tokens: Arc<dyn TokenStore>,
    actions_tx: mpsc::UnboundedSender<LoginAction>,
    actions_rx: mpsc::UnboundedReceiver<LoginAction>,
    signals_tx: mpsc::UnboundedSender<LoginSignal>,
    signals_rx: Option<mpsc::UnboundedReceiver<LoginSignal>>,
    snapshot_tx: watch::Sender<LoginFlowState>,
    tasks: JoinSet<()>,
    in_flight_exchange: Option<(SocialProvider, String)>,
}

impl LoginFlowController {
    /// Create a controller for a freshly mounted login screen
    pub fn new(gateway: Arc<dyn AuthGateway>, tokens: Arc<dyn TokenStore>) -> Self {
        let state = LoginFlowState::new();
        let (actions_tx, actions_rx) = mpsc::unbounded_channel();
        let (signals_tx, signals_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, _) = watch::channel(state.clone());

        Self {
            state,
            gateway,
            tokens,
            actions_tx,
            actions_rx,
            signals_tx,
            signals_rx: Some(signals_rx),
            snapshot_tx,
            tasks: JoinSet::new(),
            in_flight_exchange: None,
        }
    }

    /// Current state, as the presentation layer sees it
    pub fn state(&self) -> &LoginFlowState {
        &self.state
    }

    /// Subscribe to state snapshots published after every applied action
    pub fn watch_state(&self) -> watch::Receiver<LoginFlowState> {
        self.snapshot_tx.subscribe()
    }

    /// Take the signal receiver; `None` after the first call
    pub fn take_signals(&mut self) -> Option<mpsc::UnboundedReceiver<LoginSignal>> {
        self.signals_rx.take()
    }

    /// Handle for dispatching actions from other tasks
    pub fn handle(&self) -> LoginFlowHandle {
        LoginFlowHandle { tx: self.actions_tx.clone() }
    }

    /// Apply one action to the state machine
    pub fn dispatch(&mut self, action: LoginAction) {
        match action {
            LoginAction::StartKakaoLogin => self.start_kakao_login(),
            LoginAction::StartAppleLogin(request) => self.start_apple_login(request),
            LoginAction::CompleteAppleLogin(outcome) => self.complete_apple_login(outcome),
            LoginAction::ExchangeWithBackend { provider, access_token } => {
                self.exchange_with_backend(provider, access_token)
            }
            LoginAction::PersistTokens(tokens) => self.persist_tokens(&tokens),
            LoginAction::PresentLoginOutcome { provider, access_token, oauth_token } => {
                self.present_login_outcome(provider, access_token, oauth_token)
            }
            LoginAction::PresentLoginFailure { provider, access_token } => {
                self.present_login_failure(provider, access_token)
            }
            LoginAction::PresentExchangeError { provider } => {
                self.present_exchange_error(provider)
            }
            LoginAction::PresentProviderFailure { provider } => {
                self.present_provider_failure(provider)
            }
            LoginAction::RegisterUser(request) => self.register_user(request),
            LoginAction::PresentRegisterFailure { provider, access_token, oauth_token } => {
                self.present_register_failure(provider, access_token, oauth_token)
            }
            LoginAction::FetchVibes => self.fetch_vibes(),
            LoginAction::PresentVibes(vibes) => self.state.available_vibes = vibes,
            LoginAction::PresentVibesFailure => self.signal(LoginSignal::VibesFetchFailed),
            LoginAction::SelectMood(index) => self.select_mood(index),
            LoginAction::SetNickname(value) => self.state.nickname = value,
            LoginAction::Display => self.display(),
        }

        self.snapshot_tx.send_replace(self.state.clone());
    }

    /// Drive the flow until every spawned step and queued follow-up has
    /// been applied
    ///
    /// Deterministic driver used by tests and by hosts that dispatch
    /// directly instead of running the loop.
    pub async fn settle(&mut self) {
        loop {
            while let Some(result) = self.tasks.join_next().await {
                if let Err(error) = result {
                    if !error.is_cancelled() {
                        tracing::warn!(%error, "login effect task failed");
                    }
                }
            }

            let mut progressed = false;
            while let Ok(action) = self.actions_rx.try_recv() {
                progressed = true;
                self.dispatch(action);
            }

            if !progressed && self.tasks.is_empty() {
                break;
            }
        }
    }

    /// Run the dispatch loop until login completes
    ///
    /// The presentation layer feeds intents through a [`LoginFlowHandle`];
    /// the loop ends once the flow reaches `Authenticated` with nothing
    /// left in flight. Dropping the returned future tears the flow down.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(action) = self.actions_rx.recv() => {
                    self.dispatch(action);
                }
                Some(result) = self.tasks.join_next() => {
                    if let Err(error) = result {
                        if !error.is_cancelled() {
                            tracing::warn!(%error, "login effect task failed");
                        }
                    }
                }
                else => break,
            }

            // Checked after reaps too; the last pending task may finish
            // without producing a follow-up action.
            if self.state.phase == LoginPhase::Authenticated && self.tasks.is_empty() {
                break;
            }
        }
    }

    fn start_kakao_login(&mut self) {
        if self.state.phase.is_busy() {
            tracing::debug!("ignoring kakao login while a step is in flight");
            return;
        }
        self.state.phase = LoginPhase::ProviderAuthInProgress;

        let gateway = Arc::clone(&self.gateway);
        let tx = self.actions_tx.clone();
        self.tasks.spawn(async move {
            match gateway.sign_in_kakao().await {
                Ok(access_token) => {
                    let _ = tx.send(LoginAction::ExchangeWithBackend {
                        provider: SocialProvider::Kakao,
                        access_token,
                    });
                }
                Err(error) => {
                    tracing::warn!(%error, "kakao sign-in failed");
                    let _ = tx.send(LoginAction::PresentProviderFailure {
                        provider: SocialProvider::Kakao,
                    });
                }
            }
        });
    }

    fn start_apple_login(&mut self, request: auth_client::AppleAuthRequest) {
        if self.state.phase.is_busy() {
            tracing::debug!("ignoring apple login while a step is in flight");
            return;
        }
        self.state.phase = LoginPhase::ProviderAuthInProgress;

        // Fire-and-forget handoff; the SDK's completion arrives later as
        // a CompleteAppleLogin action.
        let gateway = Arc::clone(&self.gateway);
        self.tasks.spawn(async move {
            gateway.sign_in_apple(request).await;
        });
    }

    fn complete_apple_login(&mut self, outcome: Result<String, auth_client::GatewayError>) {
        match outcome {
            Ok(access_token) => self.dispatch(LoginAction::ExchangeWithBackend {
                provider: SocialProvider::Apple,
                access_token,
            }),
            Err(error) => {
                tracing::warn!(%error, "apple sign-in failed");
                self.dispatch(LoginAction::PresentProviderFailure {
                    provider: SocialProvider::Apple,
                });
            }
        }
    }

    fn exchange_with_backend(&mut self, provider: SocialProvider, access_token: String) {
        let same_pair = matches!(
            &self.in_flight_exchange,
            Some((pending_provider, pending_token))
                if *pending_provider == provider && *pending_token == access_token
        );
        if same_pair {
            tracing::debug!(%provider, "ignoring duplicate exchange for pending token");
            return;
        }

        self.in_flight_exchange = Some((provider, access_token.clone()));
        self.state.phase = LoginPhase::BackendExchangeInProgress;
        self.state.social_provider = Some(provider);
        self.state.social_access_token = access_token.clone();

        let gateway = Arc::clone(&self.gateway);
        let tx = self.actions_tx.clone();
        self.tasks.spawn(async move {
            match gateway.login_with_provider(&access_token, provider).await {
                Ok(tokens) => {
                    let _ = tx.send(LoginAction::PersistTokens(tokens));
                    let _ = tx.send(LoginAction::PresentLoginOutcome {
                        provider,
                        access_token,
                        oauth_token: None,
                    });
                }
                Err(error) if error.is_unregistered() => {
                    tracing::debug!(%provider, "identity not registered with backend");
                    let _ = tx.send(LoginAction::PresentLoginFailure { provider, access_token });
                }
                Err(error) => {
                    tracing::warn!(%error, %provider, "backend exchange failed");
                    let _ = tx.send(LoginAction::PresentExchangeError { provider });
                }
            }
        });
    }

    fn persist_tokens(&mut self, tokens: &SessionTokens) {
        // Best-effort: a storage failure must not strand the flow.
        if let Err(error) = self.tokens.set(ACCESS_TOKEN_KEY, tokens.access_or_empty()) {
            tracing::warn!(%error, "failed to persist access token");
        }
        if let Err(error) = self.tokens.set(REFRESH_TOKEN_KEY, tokens.refresh_or_empty()) {
            tracing::warn!(%error, "failed to persist refresh token");
        }
    }

    fn present_login_outcome(
        &mut self,
        provider: SocialProvider,
        access_token: String,
        oauth_token: Option<String>,
    ) {
        tracing::debug!(%provider, "login complete");
        self.state.social_provider = Some(provider);
        self.state.social_access_token = access_token;
        if let Some(oauth_token) = oauth_token {
            self.state.oauth_token = oauth_token;
        }
        self.state.membership_required = false;
        self.state.phase = LoginPhase::Authenticated;
        self.in_flight_exchange = None;
        self.display();
    }

    fn present_login_failure(&mut self, provider: SocialProvider, access_token: String) {
        tracing::debug!(%provider, "identity not registered, entering registration");
        self.state.social_provider = Some(provider);
        self.state.social_access_token = access_token;
        self.state.membership_required = true;
        self.state.phase = LoginPhase::RegistrationRequired;
        self.in_flight_exchange = None;
        self.signal(LoginSignal::BackendLoginFailed);
        self.display();
    }

    fn present_exchange_error(&mut self, provider: SocialProvider) {
        tracing::debug!(%provider, "exchange failed, returning to idle");
        self.state.phase = LoginPhase::Idle;
        self.in_flight_exchange = None;
        self.signal(LoginSignal::BackendLoginFailed);
    }

    fn present_provider_failure(&mut self, provider: SocialProvider) {
        self.state.phase = LoginPhase::Idle;
        self.signal(match provider {
            SocialProvider::Kakao => LoginSignal::KakaoLoginFailed,
            SocialProvider::Apple => LoginSignal::AppleLoginFailed,
        });
    }

    fn register_user(&mut self, request: RegistrationRequest) {
        let mood_count = request.moods.len();
        let valid = self.state.membership_required
            && !request.nickname.trim().is_empty()
            && (1..=MAX_MOODS).contains(&mood_count);
        if !valid {
            tracing::warn!(mood_count, "rejecting registration request before submit");
            self.signal(LoginSignal::RegistrationFailed);
            return;
        }

        self.state.phase = LoginPhase::RegistrationInProgress;

        let gateway = Arc::clone(&self.gateway);
        let tx = self.actions_tx.clone();
        self.tasks.spawn(async move {
            let provider = request.social;
            let access_token = request.social_access_token.clone();
            let oauth_token = request.oauth_token.clone();
            match gateway.register_user(request).await {
                Ok(tokens) => {
                    let backend_access = tokens.access_or_empty().to_string();
                    let _ = tx.send(LoginAction::PersistTokens(tokens));
                    let _ = tx.send(LoginAction::PresentLoginOutcome {
                        provider,
                        access_token: backend_access,
                        oauth_token: Some(oauth_token),
                    });
                }
                Err(error) => {
                    tracing::warn!(%error, %provider, "registration failed");
                    let _ = tx.send(LoginAction::PresentRegisterFailure {
                        provider,
                        access_token,
                        oauth_token,
                    });
                }
            }
        });
    }

    fn present_register_failure(
        &mut self,
        provider: SocialProvider,
        access_token: String,
        oauth_token: String,
    ) {
        self.state.social_provider = Some(provider);
        self.state.social_access_token = access_token;
        self.state.oauth_token = oauth_token;
        self.state.membership_required = true;
        // Back to the wizard; the user corrects input and retries.
        self.state.phase = LoginPhase::RegistrationRequired;
        self.signal(LoginSignal::RegistrationFailed);
    }

    fn fetch_vibes(&mut self) {
        let gateway = Arc::clone(&self.gateway);
        let tx = self.actions_tx.clone();
        self.tasks.spawn(async move {
            match gateway.fetch_vibes().await {
                Ok(vibes) => {
                    let _ = tx.send(LoginAction::PresentVibes(vibes));
                }
                Err(error) => {
                    tracing::warn!(%error, "vibes fetch failed");
                    let _ = tx.send(LoginAction::PresentVibesFailure);
                }
            }
        });
    }

    fn select_mood(&mut self, index: usize) {
        let Some(vibe) = self.state.available_vibes.get(index) else {
            tracing::debug!(index, "mood selection out of bounds");
            return;
        };
        let Some(name) = vibe.name.clone() else {
            return;
        };
        if self.state.selected_moods.toggle(name).is_err() {
            self.signal(LoginSignal::TooManySelections);
        }
    }

    fn display(&mut self) {
        if self.state.membership_required {
            self.state.navigation.push(Route::TermsView);
        } else {
            self.state.is_login_modal_visible = false;
        }
    }

    fn signal(&self, signal: LoginSignal) {
        let _ = self.signals_tx.send(signal);
    }
}
