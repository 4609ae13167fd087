//! Flow state for the sign-in and enrollment sequences.

use dreamtrue_domain::{MfaChallenge, User};

/// Where the sign-in sequence currently stands.
///
/// `MfaPending` holds the profile that passed the password check but is
/// NOT yet committed to the session store; it becomes the session user
/// only once the code verifies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInFlow {
    /// Nothing in progress.
    Idle,
    /// Credentials submitted, waiting on the provider.
    Authenticating,
    /// Password accepted; a second factor is owed.
    MfaPending {
        /// The profile awaiting its second factor.
        user: User,
        /// The outstanding code, once one was sent.
        challenge: Option<MfaChallenge>,
    },
    /// Session established.
    Authenticated,
}

impl SignInFlow {
    /// Check if a sign-in is underway (submitted but not settled).
    #[must_use]
    pub const fn is_in_progress(&self) -> bool {
        matches!(self, Self::Authenticating | Self::MfaPending { .. })
    }

    /// Check if the session is established.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated)
    }

    /// The outstanding challenge, if one exists.
    #[must_use]
    pub const fn challenge(&self) -> Option<&MfaChallenge> {
        match self {
            Self::MfaPending {
                challenge: Some(challenge),
                ..
            } => Some(challenge),
            _ => None,
        }
    }

    /// Get a user-friendly status message.
    #[must_use]
    pub const fn message(&self) -> &str {
        match self {
            Self::Idle => "Ready to sign in",
            Self::Authenticating => "Checking credentials...",
            Self::MfaPending { .. } => "Waiting for verification code",
            Self::Authenticated => "Signed in",
        }
    }
}

/// Where the settings-initiated MFA enrollment stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrollmentFlow {
    /// No enrollment underway.
    NotStarted,
    /// A code went out to the chosen phone number.
    CodeSent {
        /// The outstanding enrollment challenge.
        challenge: MfaChallenge,
    },
    /// The factor is enrolled.
    Enrolled,
}

impl EnrollmentFlow {
    /// Check if a code is outstanding.
    #[must_use]
    pub const fn is_code_sent(&self) -> bool {
        matches!(self, Self::CodeSent { .. })
    }

    /// Check if enrollment completed.
    #[must_use]
    pub const fn is_enrolled(&self) -> bool {
        matches!(self, Self::Enrolled)
    }

    /// The outstanding challenge, if one exists.
    #[must_use]
    pub const fn challenge(&self) -> Option<&MfaChallenge> {
        match self {
            Self::CodeSent { challenge } => Some(challenge),
            _ => None,
        }
    }

    /// Get a user-friendly status message.
    #[must_use]
    pub const fn message(&self) -> &str {
        match self {
            Self::NotStarted => "Two-factor authentication is off",
            Self::CodeSent { .. } => "Enter the code sent to your phone",
            Self::Enrolled => "Two-factor authentication is on",
        }
    }
}
