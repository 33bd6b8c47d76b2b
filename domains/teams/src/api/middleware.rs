//! Teams domain state and auth backend integration

use crate::TeamsRepositories;
use axum::extract::FromRef;
use rosterboard_auth::AuthBackend;

pub use rosterboard_auth::AuthUser;

/// Application state for the Teams domain
#[derive(Clone)]
pub struct TeamsState {
    pub repos: TeamsRepositories,
    pub auth: AuthBackend,
}

impl FromRef<TeamsState> for AuthBackend {
    fn from_ref(state: &TeamsState) -> Self {
        state.auth.clone()
    }
}
