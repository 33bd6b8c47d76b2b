//! Identity of the signed-in user

use crate::claims::IdentityClaims;

/// The two facts the service reads from the identity provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub first_name: Option<String>,
}

impl Identity {
    /// Name to store for a new user document
    pub fn display_name(&self) -> &str {
        self.first_name.as_deref().unwrap_or("")
    }
}

impl From<IdentityClaims> for Identity {
    fn from(claims: IdentityClaims) -> Self {
        Self {
            user_id: claims.sub,
            first_name: claims.first_name.filter(|name| !name.trim().is_empty()),
        }
    }
}
