//! Integration tests for the full sign-in, MFA, and enrollment flows
//! wired over the dev identity provider and the in-memory profile store,
//! the same stack the demo walkthrough uses.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::Arc;

use dreamtrue_application::{
    AppState, AuthFlowController, AuthFlowError, SessionStore, SignInOutcome,
};
use dreamtrue_application::ports::{IdentityProvider, ProfileRepository};
use dreamtrue_domain::{PhoneNumber, RESEND_COOLDOWN_TICKS, User};
use dreamtrue_infrastructure::{
    DevIdentityProvider, InMemoryProfileRepository, NoopAutomationGate, SystemClock,
};
use pretty_assertions::assert_eq;

type DemoController = AuthFlowController<
    Arc<DevIdentityProvider>,
    InMemoryProfileRepository,
    NoopAutomationGate,
    SystemClock,
>;

struct Harness {
    controller: DemoController,
    provider: Arc<DevIdentityProvider>,
    profiles: InMemoryProfileRepository,
    store: Arc<SessionStore>,
}

fn harness(mfa_enabled: bool) -> Harness {
    let provider = Arc::new(DevIdentityProvider::with_demo_account());
    let user_id = provider
        .user_id_for("demo@dreamtrue.ai")
        .expect("demo account");

    let mut user = User::new(user_id, "demo@dreamtrue.ai", "Demo User");
    if mfa_enabled {
        user.mfa_enabled = true;
        user.phone_number = Some(PhoneNumber::parse("+15551234567").expect("valid"));
    }
    let profiles = InMemoryProfileRepository::new().with_profile(user);

    let store = Arc::new(SessionStore::new());
    let controller = AuthFlowController::new(
        Arc::clone(&provider),
        profiles.clone(),
        NoopAutomationGate::new(),
        SystemClock::new(),
        Arc::clone(&store),
    );

    Harness {
        controller,
        provider,
        profiles,
        store,
    }
}

#[tokio::test]
async fn demo_credentials_sign_in_directly_without_mfa() {
    let mut h = harness(false);

    let outcome = h
        .controller
        .sign_in("demo@dreamtrue.ai", "demo123")
        .await
        .expect("sign-in succeeds");

    assert_eq!(outcome, SignInOutcome::SignedIn);
    let state = h.store.snapshot();
    assert!(state.auth.authenticated);
    assert!(!state.auth.mfa_required);
    assert_eq!(
        state.auth.user.map(|u| u.email),
        Some("demo@dreamtrue.ai".to_string())
    );
}

#[tokio::test]
async fn mfa_sign_in_requires_a_correct_code() {
    let mut h = harness(true);

    let outcome = h
        .controller
        .sign_in("demo@dreamtrue.ai", "demo123")
        .await
        .expect("password accepted");
    assert!(outcome.mfa_required());
    assert!(h.store.snapshot().auth.mfa_required);
    assert!(!h.store.snapshot().auth.authenticated);

    h.controller
        .send_mfa_code("+15551234567")
        .await
        .expect("code sent");

    // A wrong code is rejected against the provider, not assumed valid.
    let err = h
        .controller
        .verify_mfa_for_sign_in("000000")
        .await
        .expect_err("wrong code rejected");
    assert_eq!(err, AuthFlowError::InvalidCode);
    assert!(h.store.snapshot().auth.mfa_required);

    let code = h.provider.last_issued_code().expect("code issued");
    h.controller
        .verify_mfa_for_sign_in(&code)
        .await
        .expect("right code accepted");

    let state = h.store.snapshot();
    assert!(state.auth.authenticated);
    assert!(state.auth.mfa_verified);
    assert!(!state.auth.mfa_required);
    assert!(state.auth.is_consistent());
}

#[tokio::test]
async fn resend_is_gated_by_the_cooldown() {
    let mut h = harness(true);
    h.controller
        .sign_in("demo@dreamtrue.ai", "demo123")
        .await
        .expect("password accepted");

    let first = h
        .controller
        .send_mfa_code("+15551234567")
        .await
        .expect("first code");
    let first_code = h.provider.last_issued_code().expect("code issued");

    let err = h
        .controller
        .send_mfa_code("+15551234567")
        .await
        .expect_err("resend rejected during cooldown");
    assert!(matches!(err, AuthFlowError::CooldownActive { .. }));

    // The original challenge survived the rejected resend.
    assert_eq!(h.provider.last_issued_code(), Some(first_code));
    assert_eq!(
        h.controller.sign_in_flow().challenge().map(|c| &c.verification_id),
        Some(&first)
    );

    for _ in 0..RESEND_COOLDOWN_TICKS {
        h.controller.tick();
    }
    let second = h
        .controller
        .send_mfa_code("+15551234567")
        .await
        .expect("resend after cooldown");
    assert_ne!(first, second);
}

#[tokio::test]
async fn enrollment_sets_flags_and_phone_number() {
    let mut h = harness(false);
    h.controller
        .sign_in("demo@dreamtrue.ai", "demo123")
        .await
        .expect("sign-in");

    h.controller
        .setup_mfa("+15557654321")
        .await
        .expect("enrollment code sent");
    let code = h.provider.last_issued_code().expect("code issued");
    h.controller
        .verify_mfa_enrollment(&code)
        .await
        .expect("enrollment confirmed");

    let user = h.store.snapshot().auth.user.expect("session user");
    assert!(user.mfa_enabled);
    assert_eq!(
        user.phone_number.map(|p| p.as_str().to_string()),
        Some("+15557654321".to_string())
    );
    assert_eq!(
        h.provider.list_enrolled_factors().await.expect("factors").len(),
        1
    );
}

#[tokio::test]
async fn disable_mfa_then_sign_in_skips_the_code_step() {
    let mut h = harness(true);

    // Enroll the factor provider-side to mirror the profile flags.
    h.controller
        .sign_in("demo@dreamtrue.ai", "demo123")
        .await
        .expect("password accepted");
    h.controller
        .send_mfa_code("+15551234567")
        .await
        .expect("code sent");
    let code = h.provider.last_issued_code().expect("code issued");
    h.controller
        .verify_mfa_for_sign_in(&code)
        .await
        .expect("signed in");

    h.controller.disable_mfa().await.expect("mfa disabled");
    let user = stored_profile(&h, "demo@dreamtrue.ai").await;
    assert!(!user.mfa_enabled);
    assert!(user.phone_number.is_none());

    h.controller.sign_out().await;
    let outcome = h
        .controller
        .sign_in("demo@dreamtrue.ai", "demo123")
        .await
        .expect("second sign-in");
    assert_eq!(outcome, SignInOutcome::SignedIn);
    assert!(!h.store.snapshot().auth.mfa_required);
}

#[tokio::test]
async fn logout_restores_the_exact_initial_state_idempotently() {
    let mut h = harness(false);
    h.controller
        .sign_in("demo@dreamtrue.ai", "demo123")
        .await
        .expect("sign-in");

    h.controller.sign_out().await;
    let once = h.store.snapshot();
    h.controller.sign_out().await;
    let twice = h.store.snapshot();

    assert_eq!(once, twice);
    let expected = {
        let mut state = AppState::initial();
        state.auth.loading = false;
        state
    };
    assert_eq!(once, expected);
}

#[tokio::test]
async fn profile_patches_persist_across_sign_ins() {
    let mut h = harness(false);
    h.controller
        .sign_in("demo@dreamtrue.ai", "demo123")
        .await
        .expect("sign-in");
    let first_login = h
        .store
        .snapshot()
        .auth
        .user
        .and_then(|u| u.last_login)
        .expect("login stamped");

    h.controller.sign_out().await;
    h.controller
        .sign_in("demo@dreamtrue.ai", "demo123")
        .await
        .expect("second sign-in");
    let second_login = h
        .store
        .snapshot()
        .auth
        .user
        .and_then(|u| u.last_login)
        .expect("login stamped again");

    assert!(second_login >= first_login);
}

/// Resolves a stored profile through the provider's account mapping.
async fn stored_profile(h: &Harness, email: &str) -> User {
    let user_id = h.provider.user_id_for(email).expect("known account");
    h.profiles
        .get_profile(&user_id)
        .await
        .expect("profile store")
        .expect("profile exists")
}
