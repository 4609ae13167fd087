//! Session authentication state and MFA challenge types.
//!
//! `AuthState` is the value the session store holds; the flow rules that
//! mutate it live in the application layer. `MfaChallenge` correlates a
//! sent one-time code with its later verification attempt and carries the
//! resend cooldown.

use serde::{Deserialize, Serialize};

use crate::phone::PhoneNumber;
use crate::user::User;

/// Number of logical time units a challenge must cool down before the
/// code can be resent.
pub const RESEND_COOLDOWN_TICKS: u32 = 60;

/// Authentication slice of the session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthState {
    /// The signed-in user, if a session is established.
    pub user: Option<User>,
    /// Whether a session is established. Always `user.is_some()`.
    pub authenticated: bool,
    /// Whether an auth operation (or the startup session restore) is in
    /// flight.
    pub loading: bool,
    /// A password check succeeded but a second factor is still owed.
    pub mfa_required: bool,
    /// The second factor was verified during this session.
    pub mfa_verified: bool,
    /// Last user-visible auth error, cleared by the next success.
    pub error: Option<String>,
}

impl AuthState {
    /// State at process start: unauthenticated, with the session restore
    /// still pending.
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            user: None,
            authenticated: false,
            loading: true,
            mfa_required: false,
            mfa_verified: false,
            error: None,
        }
    }

    /// State after logout: the initial value with nothing in flight.
    #[must_use]
    pub const fn signed_out() -> Self {
        Self {
            user: None,
            authenticated: false,
            loading: false,
            mfa_required: false,
            mfa_verified: false,
            error: None,
        }
    }

    /// Checks the structural invariants of the state.
    ///
    /// `authenticated` mirrors the presence of a user, `mfa_required`
    /// never survives authentication, and a verified factor clears the
    /// requirement.
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        if self.authenticated != self.user.is_some() {
            return false;
        }
        if self.mfa_required && self.authenticated {
            return false;
        }
        if self.mfa_verified && self.mfa_required {
            return false;
        }
        true
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::initial()
    }
}

/// Opaque token correlating a sent one-time code with its verification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerificationId(String);

impl VerificationId {
    /// Wraps a provider-issued verification id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw id string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VerificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An outstanding phone verification: the provider's id, the number the
/// code went to, and the resend cooldown.
///
/// Only one challenge is outstanding at a time; issuing a new code
/// replaces the previous challenge wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MfaChallenge {
    /// Provider-issued verification id.
    pub verification_id: VerificationId,
    /// Target phone number.
    pub phone_number: PhoneNumber,
    /// Resend cooldown, counted down by the scheduler.
    pub cooldown: ResendCooldown,
}

impl MfaChallenge {
    /// Creates a challenge with a full resend cooldown.
    #[must_use]
    pub const fn new(verification_id: VerificationId, phone_number: PhoneNumber) -> Self {
        Self {
            verification_id,
            phone_number,
            cooldown: ResendCooldown::full(),
        }
    }
}

/// Logical countdown gating code resends.
///
/// The scheduler advances it once per time unit; a resend is allowed only
/// once it reaches zero. No wall clock is read anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResendCooldown {
    remaining: u32,
}

impl ResendCooldown {
    /// A freshly started cooldown of [`RESEND_COOLDOWN_TICKS`] units.
    #[must_use]
    pub const fn full() -> Self {
        Self {
            remaining: RESEND_COOLDOWN_TICKS,
        }
    }

    /// An elapsed cooldown (resend immediately allowed).
    #[must_use]
    pub const fn ready() -> Self {
        Self { remaining: 0 }
    }

    /// Advances the countdown by one time unit.
    pub const fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    /// Remaining time units before a resend is allowed.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// True once the countdown has elapsed.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.remaining == 0
    }
}

impl Default for ResendCooldown {
    fn default() -> Self {
        Self::full()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_consistent() {
        let state = AuthState::initial();
        assert!(state.loading);
        assert!(!state.authenticated);
        assert!(state.is_consistent());
    }

    #[test]
    fn test_authenticated_without_user_is_inconsistent() {
        let state = AuthState {
            authenticated: true,
            ..AuthState::signed_out()
        };
        assert!(!state.is_consistent());
    }

    #[test]
    fn test_mfa_required_after_auth_is_inconsistent() {
        let state = AuthState {
            user: Some(User::new("uid", "a@b.c", "A")),
            authenticated: true,
            mfa_required: true,
            ..AuthState::signed_out()
        };
        assert!(!state.is_consistent());
    }

    #[test]
    fn test_verified_clears_required() {
        let state = AuthState {
            mfa_required: true,
            mfa_verified: true,
            ..AuthState::signed_out()
        };
        assert!(!state.is_consistent());
    }

    #[test]
    fn test_cooldown_counts_down_to_ready() {
        let mut cooldown = ResendCooldown::full();
        assert_eq!(cooldown.remaining(), RESEND_COOLDOWN_TICKS);
        assert!(!cooldown.is_ready());

        for _ in 0..RESEND_COOLDOWN_TICKS {
            cooldown.tick();
        }
        assert!(cooldown.is_ready());

        // Ticking past zero stays at zero.
        cooldown.tick();
        assert_eq!(cooldown.remaining(), 0);
    }

    #[test]
    fn test_new_challenge_starts_full_cooldown() {
        let challenge = MfaChallenge::new(
            VerificationId::new("ver-1"),
            PhoneNumber::parse("+15551234567").unwrap(),
        );
        assert!(!challenge.cooldown.is_ready());
        assert_eq!(challenge.verification_id.as_str(), "ver-1");
    }
}
