//! Repository implementations for the Teams domain

pub mod teams;
pub mod users;

use rosterboard_docstore::SharedStore;

pub use teams::{TeamRepository, INVALID_CODE_MESSAGE};
pub use users::UserRepository;

/// Combined repository access for the Teams domain
#[derive(Clone)]
pub struct TeamsRepositories {
    pub users: UserRepository,
    pub teams: TeamRepository,
}

impl TeamsRepositories {
    pub fn new(store: SharedStore) -> Self {
        Self {
            users: UserRepository::new(store.clone()),
            teams: TeamRepository::new(store),
        }
    }
}
