//! User profile domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::phone::PhoneNumber;

/// Role assigned to a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Administrative account.
    Admin,
    /// Regular account (default for sign-ups).
    #[default]
    User,
}

/// A user profile as stored by the profile repository.
///
/// The session store owns the active copy for the lifetime of a session
/// and discards it on logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Identity-provider user id.
    pub id: String,
    /// Sign-in email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Account role.
    #[serde(default)]
    pub role: Role,
    /// Whether a phone second factor is enrolled.
    #[serde(default)]
    pub mfa_enabled: bool,
    /// Whether the second factor has been verified this enrollment.
    #[serde(default)]
    pub mfa_verified: bool,
    /// Enrolled phone number, if any.
    #[serde(default)]
    pub phone_number: Option<PhoneNumber>,
    /// Last successful sign-in.
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    /// Account creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Creates a fresh profile with MFA disabled, as written at sign-up.
    #[must_use]
    pub fn new(id: impl Into<String>, email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: name.into(),
            role: Role::User,
            mfa_enabled: false,
            mfa_verified: false,
            phone_number: None,
            last_login: None,
            created_at: None,
        }
    }

    /// Sets the creation timestamp.
    #[must_use]
    pub fn with_created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }

    /// Applies a partial update in place.
    pub fn apply(&mut self, patch: &ProfilePatch) {
        if let Some(enabled) = patch.mfa_enabled {
            self.mfa_enabled = enabled;
        }
        if let Some(verified) = patch.mfa_verified {
            self.mfa_verified = verified;
        }
        if let Some(phone) = &patch.phone_number {
            self.phone_number.clone_from(phone);
        }
        if let Some(at) = patch.last_login {
            self.last_login = Some(at);
        }
    }
}

/// Partial profile update, the unit of `update_profile` calls.
///
/// `phone_number` distinguishes "leave unchanged" (`None`) from
/// "clear the stored number" (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    /// New MFA-enabled flag, if changing.
    pub mfa_enabled: Option<bool>,
    /// New MFA-verified flag, if changing.
    pub mfa_verified: Option<bool>,
    /// New phone number: outer `None` leaves it alone.
    pub phone_number: Option<Option<PhoneNumber>>,
    /// New last-login timestamp, if stamping.
    pub last_login: Option<DateTime<Utc>>,
}

impl ProfilePatch {
    /// A patch that only stamps the last-login time.
    #[must_use]
    pub fn login_stamp(at: DateTime<Utc>) -> Self {
        Self {
            last_login: Some(at),
            ..Self::default()
        }
    }

    /// The patch written when an enrollment is confirmed.
    #[must_use]
    pub fn mfa_enrolled(phone: PhoneNumber, at: DateTime<Utc>) -> Self {
        Self {
            mfa_enabled: Some(true),
            mfa_verified: Some(true),
            phone_number: Some(Some(phone)),
            last_login: Some(at),
        }
    }

    /// The patch written when MFA is disabled.
    #[must_use]
    pub fn mfa_disabled() -> Self {
        Self {
            mfa_enabled: Some(false),
            mfa_verified: Some(false),
            phone_number: Some(None),
            last_login: None,
        }
    }

    /// Returns true if the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.mfa_enabled.is_none()
            && self.mfa_verified.is_none()
            && self.phone_number.is_none()
            && self.last_login.is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_user_defaults() {
        let user = User::new("uid-1", "demo@dreamtrue.ai", "Demo User");
        assert_eq!(user.role, Role::User);
        assert!(!user.mfa_enabled);
        assert!(!user.mfa_verified);
        assert!(user.phone_number.is_none());
        assert!(user.last_login.is_none());
    }

    #[test]
    fn test_apply_enrollment_patch() {
        let mut user = User::new("uid-1", "demo@dreamtrue.ai", "Demo User");
        let phone = PhoneNumber::parse("+15557654321").unwrap();
        let now = Utc::now();

        user.apply(&ProfilePatch::mfa_enrolled(phone.clone(), now));

        assert!(user.mfa_enabled);
        assert!(user.mfa_verified);
        assert_eq!(user.phone_number, Some(phone));
        assert_eq!(user.last_login, Some(now));
    }

    #[test]
    fn test_apply_disable_patch_clears_phone() {
        let mut user = User::new("uid-1", "demo@dreamtrue.ai", "Demo User");
        let phone = PhoneNumber::parse("+15557654321").unwrap();
        user.apply(&ProfilePatch::mfa_enrolled(phone, Utc::now()));

        user.apply(&ProfilePatch::mfa_disabled());

        assert!(!user.mfa_enabled);
        assert!(!user.mfa_verified);
        assert!(user.phone_number.is_none());
    }

    #[test]
    fn test_empty_patch_changes_nothing() {
        let mut user = User::new("uid-1", "demo@dreamtrue.ai", "Demo User");
        let before = user.clone();

        user.apply(&ProfilePatch::default());

        assert_eq!(user, before);
        assert!(ProfilePatch::default().is_empty());
    }
}
