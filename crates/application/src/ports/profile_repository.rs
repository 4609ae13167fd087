//! Profile store port.

use async_trait::async_trait;
use dreamtrue_domain::{ProfilePatch, User};
use thiserror::Error;

/// Errors surfaced by profile repository adapters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProfileError {
    /// No profile exists for the user id.
    #[error("profile not found: {0}")]
    NotFound(String),

    /// A profile already exists for the user id.
    #[error("profile already exists: {0}")]
    AlreadyExists(String),

    /// Backend failure.
    #[error("profile storage error: {0}")]
    Storage(String),
}

/// Port for the user-profile store that backs the identity provider's
/// opaque accounts with application-level profile records.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Loads a profile, or `None` if the user has no profile record.
    async fn get_profile(&self, user_id: &str) -> Result<Option<User>, ProfileError>;

    /// Creates a profile record. Fails if one already exists.
    async fn create_profile(&self, user: &User) -> Result<(), ProfileError>;

    /// Applies a partial update to an existing profile and returns the
    /// updated record.
    async fn update_profile(&self, user_id: &str, patch: &ProfilePatch)
    -> Result<User, ProfileError>;
}
