//! Auth flow controller.
//!
//! Orchestrates sign-in (with the optional phone second factor),
//! sign-up, settings-initiated MFA enrollment, and sign-out against the
//! identity provider and profile store ports, committing results to the
//! session store. Callers serialize operations (single-threaded event
//! dispatch); the controller keeps the flow state between calls.

use std::sync::Arc;

use dreamtrue_domain::{
    MfaChallenge, PhoneNumber, ProfilePatch, User, VerificationId,
};

use crate::error::{AuthFlowError, AuthFlowResult};
use crate::ports::{AutomationGate, Clock, IdentityProvider, ProfileRepository};
use crate::store::{Action, SessionStore};

use super::flow::{EnrollmentFlow, SignInFlow};

/// How a successful `sign_in` call settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    /// Session established; the store holds the user.
    SignedIn,
    /// Password accepted, a code must be verified next.
    MfaRequired {
        /// The enrolled phone number to offer as the code target.
        phone_number: Option<PhoneNumber>,
    },
}

impl SignInOutcome {
    /// True if a second factor is still owed.
    #[must_use]
    pub const fn mfa_required(&self) -> bool {
        matches!(self, Self::MfaRequired { .. })
    }
}

/// Orchestrates the auth flows over injected ports.
pub struct AuthFlowController<P, R, G, C> {
    provider: P,
    profiles: R,
    gate: G,
    clock: C,
    store: Arc<SessionStore>,
    sign_in: SignInFlow,
    enrollment: EnrollmentFlow,
}

impl<P, R, G, C> AuthFlowController<P, R, G, C>
where
    P: IdentityProvider,
    R: ProfileRepository,
    G: AutomationGate,
    C: Clock,
{
    /// Creates a controller in the idle state.
    pub const fn new(provider: P, profiles: R, gate: G, clock: C, store: Arc<SessionStore>) -> Self {
        Self {
            provider,
            profiles,
            gate,
            clock,
            store,
            sign_in: SignInFlow::Idle,
            enrollment: EnrollmentFlow::NotStarted,
        }
    }

    /// Current sign-in flow state.
    #[must_use]
    pub const fn sign_in_flow(&self) -> &SignInFlow {
        &self.sign_in
    }

    /// Current enrollment flow state.
    #[must_use]
    pub const fn enrollment_flow(&self) -> &EnrollmentFlow {
        &self.enrollment
    }

    /// Signs in with email and password.
    ///
    /// A profile without MFA authenticates directly and lands in the
    /// store; an MFA-enabled profile parks in `MfaPending` until
    /// [`verify_mfa_for_sign_in`](Self::verify_mfa_for_sign_in) succeeds.
    /// Failures reset the flow to idle, surface the message through the
    /// store, and leave the session unauthenticated.
    ///
    /// # Errors
    /// `Credentials` for rejected email/password, `Provider` for backend
    /// failures, `ProfileMissing` if the account has no profile record.
    pub async fn sign_in(&mut self, email: &str, password: &str) -> AuthFlowResult<SignInOutcome> {
        self.store.dispatch(Action::SetLoading(true));
        self.store.dispatch(Action::SetError(None));
        self.sign_in = SignInFlow::Authenticating;

        match self.run_sign_in(email, password).await {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                self.sign_in = SignInFlow::Idle;
                self.store.dispatch(Action::SetError(Some(err.to_string())));
                self.store.dispatch(Action::SetLoading(false));
                Err(err)
            }
        }
    }

    async fn run_sign_in(&mut self, email: &str, password: &str) -> AuthFlowResult<SignInOutcome> {
        let user_id = self.provider.verify_credentials(email, password).await?;
        let profile = self
            .profiles
            .get_profile(&user_id)
            .await?
            .ok_or_else(|| AuthFlowError::ProfileMissing(user_id.clone()))?;

        if profile.mfa_enabled {
            tracing::info!(user = %user_id, "password accepted, second factor required");
            let phone_number = profile.phone_number.clone();
            self.sign_in = SignInFlow::MfaPending {
                user: profile,
                challenge: None,
            };
            self.store.dispatch(Action::SetMfaRequired(true));
            self.store.dispatch(Action::SetLoading(false));
            return Ok(SignInOutcome::MfaRequired { phone_number });
        }

        let user = self
            .profiles
            .update_profile(&user_id, &ProfilePatch::login_stamp(self.clock.now()))
            .await?;
        tracing::info!(user = %user_id, "signed in");
        self.sign_in = SignInFlow::Authenticated;
        self.store.dispatch(Action::SetUser(user));
        Ok(SignInOutcome::SignedIn)
    }

    /// Sends (or resends) the sign-in verification code.
    ///
    /// Rejected client-side while the resend cooldown is running — the
    /// provider is not contacted and the outstanding verification id is
    /// untouched. A successful send replaces any previous challenge, so
    /// at most one is ever outstanding.
    ///
    /// # Errors
    /// `NoPendingSignIn` unless a sign-in is parked on MFA,
    /// `CooldownActive` during the cooldown, `Domain` for a malformed
    /// number, `Provider` for backend failures.
    pub async fn send_mfa_code(&mut self, phone_number: &str) -> AuthFlowResult<VerificationId> {
        let SignInFlow::MfaPending { challenge, .. } = &self.sign_in else {
            return Err(AuthFlowError::NoPendingSignIn);
        };
        if let Some(existing) = challenge
            && !existing.cooldown.is_ready()
        {
            return Err(AuthFlowError::CooldownActive {
                remaining: existing.cooldown.remaining(),
            });
        }

        let phone = PhoneNumber::parse(phone_number)?;
        let verification_id = self.issue_challenge(&phone).await?;
        tracing::debug!(phone = %phone, "sign-in code sent");

        if let SignInFlow::MfaPending { challenge, .. } = &mut self.sign_in {
            *challenge = Some(MfaChallenge::new(verification_id.clone(), phone));
        }
        Ok(verification_id)
    }

    /// Verifies the sign-in code and establishes the session.
    ///
    /// The code is checked against the provider for real; a wrong code
    /// keeps the flow in `MfaPending` with the same challenge so the
    /// user can retry or resend after the cooldown.
    ///
    /// # Errors
    /// `NoPendingSignIn` / `NoChallenge` for out-of-order calls,
    /// `InvalidCode` for a rejected code, `Provider` for backend
    /// failures.
    pub async fn verify_mfa_for_sign_in(&mut self, code: &str) -> AuthFlowResult<()> {
        let SignInFlow::MfaPending { user, challenge } = &self.sign_in else {
            return Err(AuthFlowError::NoPendingSignIn);
        };
        let challenge = challenge.as_ref().ok_or(AuthFlowError::NoChallenge)?;
        let user_id = user.id.clone();

        if let Err(err) = self
            .provider
            .verify_phone_code(&challenge.verification_id, code)
            .await
        {
            let err = AuthFlowError::from(err);
            self.store.dispatch(Action::SetError(Some(err.to_string())));
            return Err(err);
        }

        let patch = ProfilePatch {
            mfa_verified: Some(true),
            last_login: Some(self.clock.now()),
            ..ProfilePatch::default()
        };
        let user = self.profiles.update_profile(&user_id, &patch).await?;
        tracing::info!(user = %user_id, "second factor verified, signed in");

        self.sign_in = SignInFlow::Authenticated;
        self.store.dispatch(Action::SetMfaRequired(false));
        self.store.dispatch(Action::SetMfaVerified(true));
        self.store.dispatch(Action::SetUser(user));
        Ok(())
    }

    /// Advances the resend cooldowns by one logical time unit.
    ///
    /// The scheduler calls this once per unit while a verification
    /// screen is active.
    pub fn tick(&mut self) {
        if let SignInFlow::MfaPending {
            challenge: Some(challenge),
            ..
        } = &mut self.sign_in
        {
            challenge.cooldown.tick();
        }
        if let EnrollmentFlow::CodeSent { challenge } = &mut self.enrollment {
            challenge.cooldown.tick();
        }
    }

    /// Creates an account, sends the verification email, and writes the
    /// profile record (role `User`, MFA off).
    ///
    /// The session is not committed; the caller signs in once the email
    /// is verified.
    ///
    /// # Errors
    /// Provider failures (duplicate email, weak password, transport) are
    /// surfaced verbatim; profile-store failures as `Profile`.
    pub async fn sign_up(&mut self, email: &str, password: &str, name: &str) -> AuthFlowResult<User> {
        let user_id = self.provider.create_account(email, password, name).await?;
        self.provider.send_email_verification().await?;

        let user = User::new(user_id, email, name).with_created_at(self.clock.now());
        self.profiles.create_profile(&user).await?;
        tracing::info!(user = %user.id, "account created");
        Ok(user)
    }

    /// Starts MFA enrollment for the signed-in user by sending a code to
    /// the given phone number.
    ///
    /// Nothing is persisted here; the profile flips only when
    /// [`verify_mfa_enrollment`](Self::verify_mfa_enrollment) confirms
    /// the factor.
    ///
    /// # Errors
    /// `NotSignedIn` without a session, `CooldownActive` while a
    /// previous enrollment code is cooling down, `Domain` for a
    /// malformed number, `Provider` for backend failures.
    pub async fn setup_mfa(&mut self, phone_number: &str) -> AuthFlowResult<VerificationId> {
        self.session_user()?;
        if let EnrollmentFlow::CodeSent { challenge } = &self.enrollment
            && !challenge.cooldown.is_ready()
        {
            return Err(AuthFlowError::CooldownActive {
                remaining: challenge.cooldown.remaining(),
            });
        }

        let phone = PhoneNumber::parse(phone_number)?;
        let verification_id = self.issue_challenge(&phone).await?;
        tracing::debug!(phone = %phone, "enrollment code sent");

        self.enrollment = EnrollmentFlow::CodeSent {
            challenge: MfaChallenge::new(verification_id.clone(), phone),
        };
        Ok(verification_id)
    }

    /// Confirms enrollment with the received code.
    ///
    /// On success the factor is enrolled with the provider and the
    /// profile gets `mfa_enabled`, `mfa_verified` and the phone number
    /// in one write. A wrong code stays in `CodeSent`; the user may
    /// retry with a fresh code.
    ///
    /// # Errors
    /// `NoChallenge` without an outstanding enrollment code,
    /// `NotSignedIn` without a session, `InvalidCode` for a rejected
    /// code, `Provider` / `Profile` for backend failures.
    pub async fn verify_mfa_enrollment(&mut self, code: &str) -> AuthFlowResult<()> {
        let user = self.session_user()?;
        let EnrollmentFlow::CodeSent { challenge } = &self.enrollment else {
            return Err(AuthFlowError::NoChallenge);
        };

        self.provider
            .enroll_second_factor(&challenge.verification_id, code)
            .await?;

        let patch = ProfilePatch::mfa_enrolled(challenge.phone_number.clone(), self.clock.now());
        let updated = self.profiles.update_profile(&user.id, &patch).await?;
        tracing::info!(user = %user.id, "second factor enrolled");

        self.enrollment = EnrollmentFlow::Enrolled;
        self.store.dispatch(Action::SetUser(updated));
        self.store.dispatch(Action::SetMfaVerified(true));
        Ok(())
    }

    /// Removes every enrolled second factor and clears the profile's
    /// MFA flags and phone number. Unconditional once invoked;
    /// confirmation belongs to the caller.
    ///
    /// # Errors
    /// `NotSignedIn` without a session, `Provider` / `Profile` for
    /// backend failures.
    pub async fn disable_mfa(&mut self) -> AuthFlowResult<()> {
        let user = self.session_user()?;

        let factors = self.provider.list_enrolled_factors().await?;
        for factor in &factors {
            self.provider.unenroll_factor(factor).await?;
        }

        let updated = self
            .profiles
            .update_profile(&user.id, &ProfilePatch::mfa_disabled())
            .await?;
        tracing::info!(user = %user.id, factors = factors.len(), "second factors removed");

        self.enrollment = EnrollmentFlow::NotStarted;
        self.store.dispatch(Action::SetMfaVerified(false));
        self.store.dispatch(Action::SetUser(updated));
        Ok(())
    }

    /// Ends the session and resets the store to the signed-out state.
    ///
    /// Provider failures are logged and swallowed; the local session is
    /// torn down regardless, and calling this twice is harmless.
    pub async fn sign_out(&mut self) {
        if let Err(err) = self.provider.sign_out().await {
            tracing::warn!(error = %err, "provider sign-out failed");
        }
        self.sign_in = SignInFlow::Idle;
        self.enrollment = EnrollmentFlow::NotStarted;
        self.store.dispatch(Action::Logout);
    }

    /// Commits a still-active provider session at startup, if any, and
    /// clears the store's loading flag either way. Returns whether a
    /// session was restored.
    ///
    /// # Errors
    /// `Profile` for profile-store failures.
    pub async fn restore_session(&mut self) -> AuthFlowResult<bool> {
        if let Some(user_id) = self.provider.current_session_user_id() {
            match self.profiles.get_profile(&user_id).await? {
                Some(user) => {
                    tracing::info!(user = %user_id, "session restored");
                    self.sign_in = SignInFlow::Authenticated;
                    self.store.dispatch(Action::SetUser(user));
                    return Ok(true);
                }
                None => {
                    tracing::warn!(user = %user_id, "provider session without profile record");
                }
            }
        }
        self.store.dispatch(Action::SetLoading(false));
        Ok(false)
    }

    /// Registers a provider session listener that tears down the local
    /// session when the provider session disappears.
    ///
    /// New sessions are committed only through the explicit flows, so a
    /// sign-in parked on MFA can never authenticate through this path.
    pub fn watch_provider_session(&self) {
        let store = Arc::clone(&self.store);
        self.provider.on_session_changed(Box::new(move |session| {
            if session.is_none() {
                store.dispatch(Action::Logout);
            }
        }));
    }

    async fn issue_challenge(&self, phone: &PhoneNumber) -> Result<VerificationId, AuthFlowError> {
        let proof = self.gate.obtain_proof().await?;
        let id = self.provider.issue_phone_challenge(phone, &proof).await?;
        Ok(id)
    }

    fn session_user(&self) -> AuthFlowResult<User> {
        self.store
            .snapshot()
            .auth
            .user
            .ok_or(AuthFlowError::NotSignedIn)
    }
}

impl<P, R, G, C> std::fmt::Debug for AuthFlowController<P, R, G, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthFlowController")
            .field("sign_in", &self.sign_in)
            .field("enrollment", &self.enrollment)
            .finish_non_exhaustive()
    }
}
