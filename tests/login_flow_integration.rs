//! Login Flow Integration Tests
//!
//! End-to-end scenarios wiring the controller to a scripted gateway and a
//! real on-disk token store.

use auth_client::test_utils::ScriptedGateway;
use auth_client::{
    AppleAuthRequest, AuthGateway, GatewayError, RegistrationRequest, SessionTokens,
    SocialProvider, Vibe,
};
use login_flow::{LoginAction, LoginFlowController, LoginPhase, Route};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use storage::{KvConfig, KvStore, SledTokenStore, TokenStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use tempfile::TempDir;

fn disk_store(temp_dir: &TempDir) -> (KvStore, Arc<SledTokenStore>) {
    let config = KvConfig::new(temp_dir.path().join("tokens.db").to_string_lossy())
        .flush_every_ms(None);
    let kv = KvStore::new(config).unwrap();
    let store = Arc::new(SledTokenStore::new(kv.clone()));
    (kv, store)
}

/// Test a registered Kakao user logging in, with tokens surviving a restart
#[tokio::test]
async fn test_kakao_login_persists_across_restart() {
    let temp_dir = TempDir::new().unwrap();

    // Phase 1: Log in and persist tokens
    {
        let (kv, store) = disk_store(&temp_dir);
        let gateway = Arc::new(ScriptedGateway::registered());
        let mut controller = LoginFlowController::new(gateway, store);

        controller.dispatch(LoginAction::StartKakaoLogin);
        controller.settle().await;

        assert_eq!(controller.state().phase, LoginPhase::Authenticated);
        assert!(!controller.state().is_login_modal_visible);
        kv.flush().unwrap();
    }

    // Phase 2: Reopen the store and verify the session survived
    {
        let (_kv, store) = disk_store(&temp_dir);
        assert_eq!(
            store.get(ACCESS_TOKEN_KEY).unwrap(),
            Some("access".to_string())
        );
        assert_eq!(
            store.get(REFRESH_TOKEN_KEY).unwrap(),
            Some("refresh".to_string())
        );
    }
}

/// Test the full registration wizard for an identity the backend rejects
#[tokio::test]
async fn test_registration_wizard_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let (kv, store) = disk_store(&temp_dir);

    let mut gateway = ScriptedGateway::unregistered();
    gateway.register_tokens = Some(SessionTokens::new("new-access", "new-refresh"));
    let gateway = Arc::new(gateway);

    let mut controller =
        LoginFlowController::new(Arc::clone(&gateway) as _, Arc::clone(&store) as _);

    // Sign in with an identity the backend has never seen
    controller.dispatch(LoginAction::StartKakaoLogin);
    controller.settle().await;

    assert_eq!(controller.state().phase, LoginPhase::RegistrationRequired);
    assert!(controller.state().membership_required);
    assert_eq!(controller.state().navigation.routes(), [Route::TermsView]);
    assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap(), None);

    // Fill in the wizard
    controller.dispatch(LoginAction::FetchVibes);
    controller.settle().await;
    controller.dispatch(LoginAction::SetNickname("kim".to_string()));
    controller.dispatch(LoginAction::SelectMood(0));
    controller.dispatch(LoginAction::SelectMood(1));

    let state = controller.state();
    let request = RegistrationRequest {
        social: SocialProvider::Kakao,
        nickname: state.nickname.clone(),
        is_marketing: true,
        oauth_token: state.oauth_token.clone(),
        social_access_token: state.social_access_token.clone(),
        moods: state.selected_moods.as_slice().to_vec(),
    };
    controller.dispatch(LoginAction::RegisterUser(request));
    controller.settle().await;

    assert_eq!(controller.state().phase, LoginPhase::Authenticated);
    assert!(!controller.state().membership_required);
    assert!(!controller.state().is_login_modal_visible);
    assert_eq!(gateway.exchange_calls(), 1);
    assert_eq!(gateway.register_calls(), 1);

    kv.flush().unwrap();
    assert_eq!(
        store.get(ACCESS_TOKEN_KEY).unwrap(),
        Some("new-access".to_string())
    );
    assert_eq!(
        store.get(REFRESH_TOKEN_KEY).unwrap(),
        Some("new-refresh".to_string())
    );
}

/// Gateway whose sign-in blocks until released, for teardown tests
struct BlockedGateway {
    release: tokio::sync::Notify,
    exchange_calls: AtomicUsize,
}

impl BlockedGateway {
    fn new() -> Self {
        Self {
            release: tokio::sync::Notify::new(),
            exchange_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait::async_trait]
impl AuthGateway for BlockedGateway {
    async fn sign_in_kakao(&self) -> Result<String, GatewayError> {
        self.release.notified().await;
        Ok("late-token".to_string())
    }

    async fn sign_in_apple(&self, _request: AppleAuthRequest) {}

    async fn login_with_provider(
        &self,
        _access_token: &str,
        _provider: SocialProvider,
    ) -> Result<SessionTokens, GatewayError> {
        self.exchange_calls.fetch_add(1, Ordering::SeqCst);
        Ok(SessionTokens::new("late", "late"))
    }

    async fn register_user(
        &self,
        _request: RegistrationRequest,
    ) -> Result<SessionTokens, GatewayError> {
        Err(GatewayError::Registration { status: 500, message: "unused".to_string() })
    }

    async fn fetch_vibes(&self) -> Result<Vec<Vibe>, GatewayError> {
        Ok(Vec::new())
    }
}

/// Test that dropping the controller aborts in-flight sign-in work
#[tokio::test]
async fn test_teardown_aborts_pending_sign_in() {
    let temp_dir = TempDir::new().unwrap();
    let (_kv, store) = disk_store(&temp_dir);

    let gateway = Arc::new(BlockedGateway::new());
    let mut controller =
        LoginFlowController::new(Arc::clone(&gateway) as _, Arc::clone(&store) as _);

    controller.dispatch(LoginAction::StartKakaoLogin);
    tokio::task::yield_now().await;

    // Screen dismissed while the SDK call is still pending
    drop(controller);

    // Releasing the gate now goes nowhere; the task was aborted
    gateway.release.notify_one();
    tokio::task::yield_now().await;

    assert_eq!(gateway.exchange_calls.load(Ordering::SeqCst), 0);
    assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap(), None);
}
