//! HTTP identity provider adapter.
//!
//! Talks to the hosted identity service over its REST surface: JSON
//! request/response bodies for the account and MFA operations, a
//! form-encoded grant for session refresh, bearer auth with the session
//! id token. Error payloads are mapped onto [`ProviderError`] variants so
//! the flows never see transport details.

use std::sync::Mutex;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use dreamtrue_application::ports::{
    AutomationProof, FactorId, IdentityProvider, ProviderError, SessionListener,
};
use dreamtrue_domain::{PhoneNumber, VerificationId};
use serde::Deserialize;
use url::Url;

/// Content-Type for form-urlencoded data.
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Endpoint configuration for the identity service.
#[derive(Debug, Clone)]
pub struct IdentityEndpoints {
    base: Url,
    api_key: String,
}

impl IdentityEndpoints {
    /// Creates an endpoint set from the service base URL and the
    /// project API key.
    ///
    /// # Errors
    /// Returns `ProviderError::Network` if the base URL does not parse.
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, ProviderError> {
        let base = Url::parse(base_url)
            .map_err(|e| ProviderError::Network(format!("invalid base URL: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ProviderError::Network(format!(
                "base URL cannot carry paths: {base}"
            )));
        }
        Ok(Self {
            base,
            api_key: api_key.into(),
        })
    }

    fn join(&self, path: &str) -> String {
        format!(
            "{}/{path}?key={}",
            self.base.as_str().trim_end_matches('/'),
            self.api_key
        )
    }
}

#[derive(Debug, Clone)]
struct HttpSession {
    user_id: String,
    id_token: String,
    refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    user_id: String,
    id_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChallengeResponse {
    verification_id: String,
}

#[derive(Debug, Deserialize)]
struct FactorRecord {
    id: String,
}

#[derive(Debug, Deserialize)]
struct FactorListResponse {
    #[serde(default)]
    factors: Vec<FactorRecord>,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    id_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
}

/// Error payload returned by the identity service.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
    #[serde(default)]
    message: Option<String>,
}

/// Claims carried by the session id token.
#[derive(Debug, Deserialize)]
struct IdTokenClaims {
    sub: String,
    #[serde(default)]
    exp: Option<i64>,
}

/// Decodes the payload segment of a JWT without verifying the
/// signature; the token came from the service over TLS and is only
/// inspected locally.
fn decode_claims(id_token: &str) -> Result<IdTokenClaims, ProviderError> {
    let payload = id_token
        .split('.')
        .nth(1)
        .ok_or_else(|| ProviderError::Network("malformed id token".to_string()))?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| ProviderError::Network(format!("id token decode failed: {e}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| ProviderError::Network(format!("id token claims failed to parse: {e}")))
}

/// HTTP [`IdentityProvider`] adapter.
pub struct HttpIdentityProvider {
    endpoints: IdentityEndpoints,
    http_client: reqwest::Client,
    session: Mutex<Option<HttpSession>>,
    listeners: Mutex<Vec<SessionListener>>,
}

impl HttpIdentityProvider {
    /// Creates a provider against the given endpoints.
    ///
    /// Every call carries the client-level timeout; callers never wait
    /// on the identity service indefinitely.
    #[must_use]
    pub fn new(endpoints: IdentityEndpoints) -> Self {
        Self {
            endpoints,
            http_client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            session: Mutex::new(None),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Exchanges the refresh token for a fresh session.
    ///
    /// # Errors
    /// `NoSession` without a refreshable session; otherwise the mapped
    /// service error.
    pub async fn refresh_session(&self) -> Result<(), ProviderError> {
        let refresh_token = {
            let session = self.lock_session();
            session
                .as_ref()
                .and_then(|s| s.refresh_token.clone())
                .ok_or(ProviderError::NoSession)?
        };

        let body = serde_urlencoded::to_string([
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token.as_str()),
        ])
        .map_err(|e| ProviderError::Network(format!("failed to encode form: {e}")))?;

        let response = self
            .http_client
            .post(self.endpoints.join("sessions/refresh"))
            .header("Content-Type", FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let refreshed: RefreshResponse = Self::parse_response(response).await?;
        // The refresh grant returns only tokens; the user id comes from
        // the id token's subject claim.
        let user_id = decode_claims(&refreshed.id_token)?.sub;
        self.store_session(HttpSession {
            user_id,
            id_token: refreshed.id_token,
            refresh_token: refreshed.refresh_token.or(Some(refresh_token)),
        });
        Ok(())
    }

    /// Seconds until the current session's id token expires, when the
    /// token carries an expiry claim.
    #[must_use]
    pub fn session_expires_in(&self, now_epoch: i64) -> Option<i64> {
        let session = self.lock_session();
        let token = session.as_ref().map(|s| s.id_token.clone())?;
        drop(session);
        decode_claims(&token)
            .ok()
            .and_then(|claims| claims.exp)
            .map(|exp| exp - now_epoch)
    }

    fn lock_session(&self) -> std::sync::MutexGuard<'_, Option<HttpSession>> {
        match self.session.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn store_session(&self, session: HttpSession) {
        let user_id = session.user_id.clone();
        *self.lock_session() = Some(session);
        self.notify(Some(user_id));
    }

    fn clear_session(&self) {
        *self.lock_session() = None;
        self.notify(None);
    }

    fn notify(&self, user_id: Option<String>) {
        let listeners = match self.listeners.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        for listener in listeners.iter() {
            listener(user_id.clone());
        }
    }

    fn bearer_token(&self) -> Result<String, ProviderError> {
        self.lock_session()
            .as_ref()
            .map(|s| s.id_token.clone())
            .ok_or(ProviderError::NoSession)
    }

    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
        bearer: Option<&str>,
    ) -> Result<T, ProviderError> {
        let mut request = self
            .http_client
            .post(self.endpoints.join(path))
            .json(body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        Self::parse_response(response).await
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ProviderError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| ProviderError::Network(format!("failed to parse response: {e}")));
        }

        let body = response.text().await.unwrap_or_default();
        Err(Self::map_error(status, &body))
    }

    fn map_error(status: reqwest::StatusCode, body: &str) -> ProviderError {
        if let Ok(payload) = serde_json::from_str::<ErrorResponse>(body) {
            let message = payload.message.unwrap_or_else(|| payload.error.clone());
            return match payload.error.as_str() {
                "INVALID_CREDENTIALS" | "INVALID_PASSWORD" | "EMAIL_NOT_FOUND" => {
                    ProviderError::InvalidCredentials
                }
                "EMAIL_EXISTS" => ProviderError::EmailAlreadyRegistered(message),
                "WEAK_PASSWORD" => ProviderError::WeakPassword(message),
                "INVALID_PHONE_NUMBER" => ProviderError::InvalidPhoneNumber(message),
                "INVALID_CODE" | "CODE_EXPIRED" => ProviderError::InvalidCode,
                "UNKNOWN_VERIFICATION" => ProviderError::UnknownVerification,
                "CAPTCHA_CHECK_FAILED" => ProviderError::AutomationCheckFailed(message),
                "TOO_MANY_ATTEMPTS" => ProviderError::RateLimited,
                _ => ProviderError::Network(message),
            };
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return ProviderError::RateLimited;
        }
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return ProviderError::NoSession;
        }
        ProviderError::Network(format!("identity service returned {status}"))
    }
}

impl std::fmt::Debug for HttpIdentityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpIdentityProvider")
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<String, ProviderError> {
        let session: SessionResponse = self
            .post_json(
                "sessions",
                &serde_json::json!({ "email": email, "password": password }),
                None,
            )
            .await?;
        let user_id = session.user_id.clone();
        tracing::debug!(user = %user_id, "identity service: credentials accepted");
        self.store_session(HttpSession {
            user_id: session.user_id,
            id_token: session.id_token,
            refresh_token: session.refresh_token,
        });
        Ok(user_id)
    }

    async fn create_account(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<String, ProviderError> {
        let session: SessionResponse = self
            .post_json(
                "accounts",
                &serde_json::json!({
                    "email": email,
                    "password": password,
                    "display_name": display_name,
                }),
                None,
            )
            .await?;
        let user_id = session.user_id.clone();
        self.store_session(HttpSession {
            user_id: session.user_id,
            id_token: session.id_token,
            refresh_token: session.refresh_token,
        });
        Ok(user_id)
    }

    async fn send_email_verification(&self) -> Result<(), ProviderError> {
        let token = self.bearer_token()?;
        let _: serde_json::Value = self
            .post_json(
                "accounts/send-verification",
                &serde_json::json!({}),
                Some(&token),
            )
            .await?;
        Ok(())
    }

    async fn issue_phone_challenge(
        &self,
        phone_number: &PhoneNumber,
        proof: &AutomationProof,
    ) -> Result<VerificationId, ProviderError> {
        let token = self.bearer_token()?;
        let challenge: ChallengeResponse = self
            .post_json(
                "mfa/challenges",
                &serde_json::json!({
                    "phone_number": phone_number.as_str(),
                    "captcha_token": proof.0,
                }),
                Some(&token),
            )
            .await?;
        Ok(VerificationId::new(challenge.verification_id))
    }

    async fn verify_phone_code(
        &self,
        verification_id: &VerificationId,
        code: &str,
    ) -> Result<(), ProviderError> {
        let token = self.bearer_token()?;
        let _: serde_json::Value = self
            .post_json(
                "mfa/verify",
                &serde_json::json!({
                    "verification_id": verification_id.as_str(),
                    "code": code,
                }),
                Some(&token),
            )
            .await?;
        Ok(())
    }

    async fn enroll_second_factor(
        &self,
        verification_id: &VerificationId,
        code: &str,
    ) -> Result<FactorId, ProviderError> {
        let token = self.bearer_token()?;
        let factor: FactorRecord = self
            .post_json(
                "mfa/enrollments",
                &serde_json::json!({
                    "verification_id": verification_id.as_str(),
                    "code": code,
                }),
                Some(&token),
            )
            .await?;
        Ok(FactorId(factor.id))
    }

    async fn list_enrolled_factors(&self) -> Result<Vec<FactorId>, ProviderError> {
        let token = self.bearer_token()?;
        let response = self
            .http_client
            .get(self.endpoints.join("mfa/factors"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        let list: FactorListResponse = Self::parse_response(response).await?;
        Ok(list.factors.into_iter().map(|f| FactorId(f.id)).collect())
    }

    async fn unenroll_factor(&self, factor: &FactorId) -> Result<(), ProviderError> {
        let token = self.bearer_token()?;
        let response = self
            .http_client
            .delete(self.endpoints.join(&format!("mfa/factors/{}", factor.0)))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        if response.status().is_success() {
            return Ok(());
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(Self::map_error(status, &body))
    }

    fn current_session_user_id(&self) -> Option<String> {
        self.lock_session().as_ref().map(|s| s.user_id.clone())
    }

    fn on_session_changed(&self, listener: SessionListener) {
        match self.listeners.lock() {
            Ok(mut guard) => guard.push(listener),
            Err(poisoned) => poisoned.into_inner().push(listener),
        }
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        // Session teardown is local; the id token simply stops being used.
        self.clear_session();
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn endpoints() -> IdentityEndpoints {
        IdentityEndpoints::new("https://identity.dreamtrue.ai/v1", "test-key").unwrap()
    }

    #[test]
    fn test_endpoint_urls_carry_the_api_key() {
        let url = endpoints().join("mfa/challenges");
        assert_eq!(
            url,
            "https://identity.dreamtrue.ai/v1/mfa/challenges?key=test-key"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        assert!(IdentityEndpoints::new("not a url", "k").is_err());
    }

    #[test]
    fn test_error_payloads_map_to_variants() {
        let err = HttpIdentityProvider::map_error(
            reqwest::StatusCode::BAD_REQUEST,
            r#"{"error":"INVALID_PASSWORD"}"#,
        );
        assert_eq!(err, ProviderError::InvalidCredentials);

        let err = HttpIdentityProvider::map_error(
            reqwest::StatusCode::BAD_REQUEST,
            r#"{"error":"EMAIL_EXISTS","message":"already registered"}"#,
        );
        assert!(matches!(err, ProviderError::EmailAlreadyRegistered(m) if m == "already registered"));

        let err = HttpIdentityProvider::map_error(
            reqwest::StatusCode::BAD_REQUEST,
            r#"{"error":"CODE_EXPIRED"}"#,
        );
        assert_eq!(err, ProviderError::InvalidCode);
    }

    #[test]
    fn test_unparseable_errors_fall_back_to_status() {
        let err = HttpIdentityProvider::map_error(
            reqwest::StatusCode::TOO_MANY_REQUESTS,
            "<html>slow down</html>",
        );
        assert_eq!(err, ProviderError::RateLimited);

        let err =
            HttpIdentityProvider::map_error(reqwest::StatusCode::UNAUTHORIZED, "unauthorized");
        assert_eq!(err, ProviderError::NoSession);
    }

    #[test]
    fn test_decode_claims_reads_sub_and_exp() {
        let payload = URL_SAFE_NO_PAD.encode(r#"{"sub":"user-1","exp":1790000000}"#);
        let token = format!("eyJhbGciOiJub25lIn0.{payload}.sig");

        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.exp, Some(1_790_000_000));
    }

    #[test]
    fn test_decode_claims_rejects_malformed_tokens() {
        assert!(decode_claims("no-dots-here").is_err());
        assert!(decode_claims("a.!!!.c").is_err());
    }
}
