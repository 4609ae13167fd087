//! Application error types

use dreamtrue_domain::DomainError;
use thiserror::Error;

use crate::ports::{ProfileError, ProviderError};

/// Errors surfaced by the auth flows.
///
/// Recoverable failures (bad credentials, provider faults, wrong codes)
/// carry the message the user sees; the invariant-violation variants
/// (`NoPendingSignIn`, `NoChallenge`, `NotSignedIn`) mark calls that are
/// out of order and fail loudly instead of silently succeeding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthFlowError {
    /// Email/password rejected; the user may retry immediately.
    #[error("invalid credentials: {0}")]
    Credentials(String),

    /// The identity provider or network failed; retry is user-initiated.
    #[error("provider error: {0}")]
    Provider(String),

    /// The verification code was wrong or expired.
    #[error("invalid verification code")]
    InvalidCode,

    /// A resend was requested before the cooldown elapsed. The provider
    /// was not contacted.
    #[error("code already sent, retry in {remaining} seconds")]
    CooldownActive {
        /// Time units left on the cooldown.
        remaining: u32,
    },

    /// An MFA operation was called with no sign-in awaiting a code.
    #[error("no sign-in is awaiting MFA verification")]
    NoPendingSignIn,

    /// A code verification was attempted with no outstanding challenge.
    #[error("no verification code is outstanding")]
    NoChallenge,

    /// A settings-initiated operation was called without a session.
    #[error("no user is signed in")]
    NotSignedIn,

    /// The provider knows the account but no profile record exists.
    #[error("no profile record for user {0}")]
    ProfileMissing(String),

    /// Local input validation failed.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The profile store failed.
    #[error("profile store error: {0}")]
    Profile(String),
}

impl From<ProviderError> for AuthFlowError {
    fn from(error: ProviderError) -> Self {
        match error {
            ProviderError::InvalidCredentials => Self::Credentials(error.to_string()),
            ProviderError::InvalidCode | ProviderError::UnknownVerification => Self::InvalidCode,
            other => Self::Provider(other.to_string()),
        }
    }
}

impl From<ProfileError> for AuthFlowError {
    fn from(error: ProfileError) -> Self {
        match error {
            ProfileError::NotFound(user_id) => Self::ProfileMissing(user_id),
            other => Self::Profile(other.to_string()),
        }
    }
}

/// Result type alias for auth flow operations.
pub type AuthFlowResult<T> = Result<T, AuthFlowError>;
