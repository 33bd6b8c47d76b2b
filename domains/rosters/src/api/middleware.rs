//! Rosters domain state and auth backend integration

use crate::domain::ranking::SkillColumns;
use crate::RostersRepositories;
use axum::extract::FromRef;
use rosterboard_auth::AuthBackend;

pub use rosterboard_auth::AuthUser;

/// Application state for the Rosters domain
#[derive(Clone)]
pub struct RostersState {
    pub repos: RostersRepositories,
    pub auth: AuthBackend,
    /// Column policy for the ranking view
    pub skill_columns: SkillColumns,
}

impl FromRef<RostersState> for AuthBackend {
    fn from_ref(state: &RostersState) -> Self {
        state.auth.clone()
    }
}
