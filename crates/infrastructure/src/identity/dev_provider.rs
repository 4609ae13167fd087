//! In-memory identity provider for demos and tests.
//!
//! Plays the backend's part entirely in process: seeded accounts,
//! generated phone codes (logged instead of sent), factor bookkeeping
//! and session-change notification. The demo walkthrough and the
//! integration tests run against this adapter.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use dreamtrue_application::ports::{
    AutomationProof, FactorId, IdentityProvider, ProviderError, SessionListener,
};
use dreamtrue_domain::{PhoneNumber, VerificationId};
use rand::Rng;

/// Minimum password length the dev provider enforces, matching the
/// policy of the real backend.
const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone)]
struct DevAccount {
    user_id: String,
    password: String,
    factors: Vec<FactorId>,
}

#[derive(Debug, Clone)]
struct DevChallenge {
    code: String,
}

/// In-memory [`IdentityProvider`] adapter.
pub struct DevIdentityProvider {
    accounts: Mutex<HashMap<String, DevAccount>>,
    challenges: Mutex<HashMap<String, DevChallenge>>,
    session: Mutex<Option<String>>,
    listeners: Mutex<Vec<SessionListener>>,
    last_code: Mutex<Option<String>>,
    issued: Mutex<u32>,
}

impl DevIdentityProvider {
    /// Creates an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            challenges: Mutex::new(HashMap::new()),
            session: Mutex::new(None),
            listeners: Mutex::new(Vec::new()),
            last_code: Mutex::new(None),
            issued: Mutex::new(0),
        }
    }

    /// Seeds an account and returns the provider for chaining.
    #[must_use]
    pub fn with_account(self, email: &str, password: &str) -> Self {
        {
            let mut accounts = lock(&self.accounts);
            let user_id = format!("dev-{}", accounts.len() + 1);
            accounts.insert(
                email.to_string(),
                DevAccount {
                    user_id,
                    password: password.to_string(),
                    factors: Vec::new(),
                },
            );
        }
        self
    }

    /// A provider seeded with the standard demo account.
    #[must_use]
    pub fn with_demo_account() -> Self {
        Self::new().with_account("demo@dreamtrue.ai", "demo123")
    }

    /// The provider user id for a seeded email, for wiring the profile
    /// store to match.
    #[must_use]
    pub fn user_id_for(&self, email: &str) -> Option<String> {
        lock(&self.accounts).get(email).map(|a| a.user_id.clone())
    }

    /// The code the last challenge would have texted. This is the dev
    /// stand-in for receiving the SMS.
    #[must_use]
    pub fn last_issued_code(&self) -> Option<String> {
        lock(&self.last_code).clone()
    }

    fn set_session(&self, user_id: Option<String>) {
        *lock(&self.session) = user_id.clone();
        for listener in lock(&self.listeners).iter() {
            listener(user_id.clone());
        }
    }

    fn session_account_key(&self) -> Result<String, ProviderError> {
        let session = lock(&self.session).clone().ok_or(ProviderError::NoSession)?;
        lock(&self.accounts)
            .iter()
            .find(|(_, account)| account.user_id == session)
            .map(|(email, _)| email.clone())
            .ok_or(ProviderError::NoSession)
    }
}

impl Default for DevIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DevIdentityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DevIdentityProvider")
            .field("session", &lock(&self.session).clone())
            .finish_non_exhaustive()
    }
}

/// Recovers the guard from a poisoned lock; the maps hold plain data.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[async_trait]
impl IdentityProvider for DevIdentityProvider {
    async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<String, ProviderError> {
        let user_id = {
            let accounts = lock(&self.accounts);
            match accounts.get(email) {
                Some(account) if account.password == password => account.user_id.clone(),
                _ => return Err(ProviderError::InvalidCredentials),
            }
        };
        tracing::debug!(user = %user_id, "dev provider: credentials accepted");
        self.set_session(Some(user_id.clone()));
        Ok(user_id)
    }

    async fn create_account(
        &self,
        email: &str,
        password: &str,
        _display_name: &str,
    ) -> Result<String, ProviderError> {
        if password.len() < MIN_PASSWORD_LEN {
            return Err(ProviderError::WeakPassword(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        let user_id = {
            let mut accounts = lock(&self.accounts);
            if accounts.contains_key(email) {
                return Err(ProviderError::EmailAlreadyRegistered(email.to_string()));
            }
            let user_id = format!("dev-{}", accounts.len() + 1);
            accounts.insert(
                email.to_string(),
                DevAccount {
                    user_id: user_id.clone(),
                    password: password.to_string(),
                    factors: Vec::new(),
                },
            );
            user_id
        };
        self.set_session(Some(user_id.clone()));
        Ok(user_id)
    }

    async fn send_email_verification(&self) -> Result<(), ProviderError> {
        let key = self.session_account_key()?;
        tracing::info!(email = %key, "dev provider: verification email (not actually sent)");
        Ok(())
    }

    async fn issue_phone_challenge(
        &self,
        phone_number: &PhoneNumber,
        proof: &AutomationProof,
    ) -> Result<VerificationId, ProviderError> {
        if proof.0.is_empty() {
            return Err(ProviderError::AutomationCheckFailed(
                "empty proof".to_string(),
            ));
        }
        self.session_account_key()?;

        let code = format!("{:06}", rand::rng().random_range(0..1_000_000));
        let id = {
            let mut issued = lock(&self.issued);
            *issued += 1;
            format!("dev-ver-{issued}")
        };
        lock(&self.challenges).insert(id.clone(), DevChallenge { code: code.clone() });
        *lock(&self.last_code) = Some(code.clone());
        tracing::info!(phone = %phone_number, code = %code, "dev provider: SMS code (not actually sent)");
        Ok(VerificationId::new(id))
    }

    async fn verify_phone_code(
        &self,
        verification_id: &VerificationId,
        code: &str,
    ) -> Result<(), ProviderError> {
        let mut challenges = lock(&self.challenges);
        match challenges.get(verification_id.as_str()) {
            Some(challenge) if challenge.code == code => {
                challenges.remove(verification_id.as_str());
                Ok(())
            }
            Some(_) => Err(ProviderError::InvalidCode),
            None => Err(ProviderError::UnknownVerification),
        }
    }

    async fn enroll_second_factor(
        &self,
        verification_id: &VerificationId,
        code: &str,
    ) -> Result<FactorId, ProviderError> {
        self.verify_phone_code(verification_id, code).await?;
        let key = self.session_account_key()?;
        let factor = FactorId(format!("dev-factor-{}", verification_id.as_str()));
        if let Some(account) = lock(&self.accounts).get_mut(&key) {
            account.factors.push(factor.clone());
        }
        Ok(factor)
    }

    async fn list_enrolled_factors(&self) -> Result<Vec<FactorId>, ProviderError> {
        let key = self.session_account_key()?;
        Ok(lock(&self.accounts)
            .get(&key)
            .map(|a| a.factors.clone())
            .unwrap_or_default())
    }

    async fn unenroll_factor(&self, factor: &FactorId) -> Result<(), ProviderError> {
        let key = self.session_account_key()?;
        let mut accounts = lock(&self.accounts);
        let account = accounts.get_mut(&key).ok_or(ProviderError::NoSession)?;
        let before = account.factors.len();
        account.factors.retain(|f| f != factor);
        if account.factors.len() == before {
            return Err(ProviderError::Network(format!(
                "unknown factor: {}",
                factor.0
            )));
        }
        Ok(())
    }

    fn current_session_user_id(&self) -> Option<String> {
        lock(&self.session).clone()
    }

    fn on_session_changed(&self, listener: SessionListener) {
        lock(&self.listeners).push(listener);
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        self.set_session(None);
        Ok(())
    }
}
