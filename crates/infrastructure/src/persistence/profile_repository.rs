//! In-memory profile repository.
//!
//! The hosted profile store is external; locally the profiles live in a
//! process-wide map. Demos seed it next to the dev identity provider and
//! tests control it directly.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use dreamtrue_application::ports::{ProfileError, ProfileRepository};
use dreamtrue_domain::{ProfilePatch, User};
use tokio::sync::RwLock;

/// Thread-safe in-memory profile store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileRepository {
    profiles: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryProfileRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a profile and returns the repository for chaining.
    #[must_use]
    pub fn with_profile(self, user: User) -> Self {
        if let Ok(mut profiles) = self.profiles.try_write() {
            profiles.insert(user.id.clone(), user);
        }
        self
    }

    /// Number of stored profiles.
    pub async fn count(&self) -> usize {
        self.profiles.read().await.len()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn get_profile(&self, user_id: &str) -> Result<Option<User>, ProfileError> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }

    async fn create_profile(&self, user: &User) -> Result<(), ProfileError> {
        let mut profiles = self.profiles.write().await;
        if profiles.contains_key(&user.id) {
            return Err(ProfileError::AlreadyExists(user.id.clone()));
        }
        profiles.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn update_profile(
        &self,
        user_id: &str,
        patch: &ProfilePatch,
    ) -> Result<User, ProfileError> {
        let mut profiles = self.profiles.write().await;
        let user = profiles
            .get_mut(user_id)
            .ok_or_else(|| ProfileError::NotFound(user_id.to_string()))?;
        user.apply(patch);
        Ok(user.clone())
    }
}
