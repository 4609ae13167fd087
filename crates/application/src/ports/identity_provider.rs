//! Identity provider port.
//!
//! The abstract capability surface the auth flows consume: credential
//! verification, account creation, phone-based second-factor challenges,
//! enrollment, and session observation. Adapters in the infrastructure
//! layer talk to the real backend (or an in-memory stand-in).

use async_trait::async_trait;
use dreamtrue_domain::{PhoneNumber, VerificationId};
use thiserror::Error;

/// Errors surfaced by identity provider adapters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// Email/password rejected.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The email is already registered.
    #[error("email already registered: {0}")]
    EmailAlreadyRegistered(String),

    /// The password fails the provider's policy.
    #[error("password rejected: {0}")]
    WeakPassword(String),

    /// The provider rejected the phone number.
    #[error("invalid phone number: {0}")]
    InvalidPhoneNumber(String),

    /// The verification code is wrong or expired.
    #[error("invalid or expired verification code")]
    InvalidCode,

    /// The verification id does not match an outstanding challenge.
    #[error("unknown verification id")]
    UnknownVerification,

    /// Too many attempts; the provider is throttling.
    #[error("rate limited, try again later")]
    RateLimited,

    /// No provider session is active for a call that needs one.
    #[error("no active session")]
    NoSession,

    /// The anti-automation proof was missing or rejected.
    #[error("automation check failed: {0}")]
    AutomationCheckFailed(String),

    /// Transport or backend failure.
    #[error("provider error: {0}")]
    Network(String),
}

/// Unique id of an enrolled second factor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FactorId(pub String);

/// Proof that an out-of-band anti-automation challenge was completed.
///
/// Issuing a phone challenge requires one; the core only mounts the
/// capability and never inspects the token.
#[derive(Debug, Clone)]
pub struct AutomationProof(pub String);

/// Callback invoked whenever the provider session changes. Receives the
/// new session user id, or `None` when the session ended.
pub type SessionListener = Box<dyn Fn(Option<String>) + Send + Sync>;

/// Port for the external identity platform.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verifies email/password credentials and establishes a provider
    /// session. Returns the provider user id.
    async fn verify_credentials(&self, email: &str, password: &str)
    -> Result<String, ProviderError>;

    /// Creates a new account with the given display name and establishes
    /// a provider session. Returns the provider user id.
    async fn create_account(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<String, ProviderError>;

    /// Sends the address-verification email for the current session.
    async fn send_email_verification(&self) -> Result<(), ProviderError>;

    /// Sends a one-time code to the phone number and returns the id that
    /// correlates its later verification.
    async fn issue_phone_challenge(
        &self,
        phone_number: &PhoneNumber,
        proof: &AutomationProof,
    ) -> Result<VerificationId, ProviderError>;

    /// Checks a one-time code against an outstanding challenge.
    async fn verify_phone_code(
        &self,
        verification_id: &VerificationId,
        code: &str,
    ) -> Result<(), ProviderError>;

    /// Verifies the code and enrolls the phone as a second factor for
    /// the current session user.
    async fn enroll_second_factor(
        &self,
        verification_id: &VerificationId,
        code: &str,
    ) -> Result<FactorId, ProviderError>;

    /// Lists the second factors enrolled for the current session user.
    async fn list_enrolled_factors(&self) -> Result<Vec<FactorId>, ProviderError>;

    /// Removes an enrolled second factor.
    async fn unenroll_factor(&self, factor: &FactorId) -> Result<(), ProviderError>;

    /// The current provider session user id, if a session is active.
    fn current_session_user_id(&self) -> Option<String>;

    /// Registers a listener for session changes. Listeners stay
    /// registered for the life of the provider.
    fn on_session_changed(&self, listener: SessionListener);

    /// Ends the provider session.
    async fn sign_out(&self) -> Result<(), ProviderError>;
}

/// Port for the out-of-band anti-automation check required before phone
/// challenges can be issued.
#[async_trait]
pub trait AutomationGate: Send + Sync {
    /// Completes the check and returns the proof to attach to the
    /// challenge request.
    async fn obtain_proof(&self) -> Result<AutomationProof, ProviderError>;
}

// A shared provider handle is a provider; the controller can own an
// `Arc` while wiring code keeps another handle to the same adapter.
#[async_trait]
impl<T: IdentityProvider + ?Sized> IdentityProvider for std::sync::Arc<T> {
    async fn verify_credentials(&self, email: &str, password: &str)
    -> Result<String, ProviderError> {
        (**self).verify_credentials(email, password).await
    }

    async fn create_account(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<String, ProviderError> {
        (**self).create_account(email, password, display_name).await
    }

    async fn send_email_verification(&self) -> Result<(), ProviderError> {
        (**self).send_email_verification().await
    }

    async fn issue_phone_challenge(
        &self,
        phone_number: &PhoneNumber,
        proof: &AutomationProof,
    ) -> Result<VerificationId, ProviderError> {
        (**self).issue_phone_challenge(phone_number, proof).await
    }

    async fn verify_phone_code(
        &self,
        verification_id: &VerificationId,
        code: &str,
    ) -> Result<(), ProviderError> {
        (**self).verify_phone_code(verification_id, code).await
    }

    async fn enroll_second_factor(
        &self,
        verification_id: &VerificationId,
        code: &str,
    ) -> Result<FactorId, ProviderError> {
        (**self).enroll_second_factor(verification_id, code).await
    }

    async fn list_enrolled_factors(&self) -> Result<Vec<FactorId>, ProviderError> {
        (**self).list_enrolled_factors().await
    }

    async fn unenroll_factor(&self, factor: &FactorId) -> Result<(), ProviderError> {
        (**self).unenroll_factor(factor).await
    }

    fn current_session_user_id(&self) -> Option<String> {
        (**self).current_session_user_id()
    }

    fn on_session_changed(&self, listener: SessionListener) {
        (**self).on_session_changed(listener);
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        (**self).sign_out().await
    }
}
