//! Concrete authentication backend
//!
//! Verifies identity provider tokens. There is no local session store:
//! the token itself carries the user id and display name.

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::identity::Identity;
use crate::jwt::validate_jwt_token;

/// Concrete authentication backend.
///
/// Domain states expose this via `FromRef`:
/// ```ignore
/// impl FromRef<MyDomainState> for AuthBackend {
///     fn from_ref(state: &MyDomainState) -> Self {
///         state.auth.clone()
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthBackend {
    config: AuthConfig,
}

impl AuthBackend {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Verify a bearer token and return the identity it carries
    pub fn authenticate_jwt(&self, token: &str) -> Result<Identity, AuthError> {
        let claims = validate_jwt_token(token, &self.config)?;
        let identity = Identity::from(claims);
        tracing::debug!(user_id = %identity.user_id, "Authenticated request");
        Ok(identity)
    }
}
