//! Auth configuration and shared state.

use secrecy::{ExposeSecret, SecretString};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::token::{self, Role, SessionClaims};

const DEFAULT_SESSION_TTL_SECONDS: i64 = 24 * 60 * 60;
const DEFAULT_PASSWORD_HASH_COST: u32 = 2;

#[derive(Clone, Debug)]
pub struct AuthConfig {
    frontend_base_url: String,
    session_secret: SecretString,
    session_ttl_seconds: i64,
    password_hash_cost: u32,
}

impl AuthConfig {
    #[must_use]
    pub fn new(frontend_base_url: String, session_secret: SecretString) -> Self {
        Self {
            frontend_base_url,
            session_secret,
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            password_hash_cost: DEFAULT_PASSWORD_HASH_COST,
        }
    }

    #[must_use]
    pub fn with_session_ttl_seconds(mut self, seconds: i64) -> Self {
        self.session_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_password_hash_cost(mut self, cost: u32) -> Self {
        self.password_hash_cost = cost;
        self
    }

    #[must_use]
    pub fn session_ttl_seconds(&self) -> i64 {
        self.session_ttl_seconds
    }

    #[must_use]
    pub fn password_hash_cost(&self) -> u32 {
        self.password_hash_cost
    }

    pub(crate) fn frontend_base_url(&self) -> &str {
        &self.frontend_base_url
    }

    /// Cookies are only marked `Secure` when the panel is served over HTTPS.
    pub(crate) fn session_cookie_secure(&self) -> bool {
        self.frontend_base_url.starts_with("https://")
    }

    pub(crate) fn session_secret(&self) -> &[u8] {
        self.session_secret.expose_secret().as_bytes()
    }
}

pub struct AuthState {
    config: AuthConfig,
}

impl AuthState {
    #[must_use]
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Mint a signed session token for a user who just authenticated.
    ///
    /// # Errors
    /// Returns an error if claims encoding or signing fails.
    pub(crate) fn issue_token(
        &self,
        user_id: Uuid,
        username: &str,
        name: &str,
        role: Role,
    ) -> Result<String, token::Error> {
        let claims = SessionClaims::issue(
            user_id,
            username,
            name,
            role,
            now_unix_seconds(),
            self.config.session_ttl_seconds,
        );
        token::sign_hs256(self.config.session_secret(), &claims)
    }

    /// Stateless decode of a presented token against the current clock.
    ///
    /// # Errors
    /// Returns an error for malformed, tampered, or expired tokens; callers
    /// treat every failure uniformly as "not authenticated".
    pub(crate) fn decode_token(&self, token: &str) -> Result<SessionClaims, token::Error> {
        token::verify_hs256(token, self.config.session_secret(), now_unix_seconds())
    }
}

fn now_unix_seconds() -> i64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    i64::try_from(now).unwrap_or(i64::MAX)
}
