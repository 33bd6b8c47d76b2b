//! Collection layout shared by the domains
//!
//! ```text
//! users/{userId}
//! organizations/{teamId}
//! organizations/{teamId}/players/{playerId}
//! ```

use crate::error::StoreError;
use crate::path::{CollectionPath, DocumentPath};

pub const USERS: &str = "users";
pub const TEAMS: &str = "organizations";
pub const PLAYERS: &str = "players";

pub fn users() -> Result<CollectionPath, StoreError> {
    CollectionPath::root(USERS)
}

pub fn user(user_id: &str) -> Result<DocumentPath, StoreError> {
    users()?.doc(user_id)
}

pub fn teams() -> Result<CollectionPath, StoreError> {
    CollectionPath::root(TEAMS)
}

pub fn team(team_id: &str) -> Result<DocumentPath, StoreError> {
    teams()?.doc(team_id)
}

pub fn players(team_id: &str) -> Result<CollectionPath, StoreError> {
    team(team_id)?.collection(PLAYERS)
}

pub fn player(team_id: &str, player_id: &str) -> Result<DocumentPath, StoreError> {
    players(team_id)?.doc(player_id)
}
