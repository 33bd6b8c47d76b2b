//! Repository implementations for the Rosters domain

pub mod players;

use rosterboard_docstore::SharedStore;

pub use players::PlayerRepository;

/// Combined repository access for the Rosters domain
#[derive(Clone)]
pub struct RostersRepositories {
    pub players: PlayerRepository,
}

impl RostersRepositories {
    pub fn new(store: SharedStore) -> Self {
        Self {
            players: PlayerRepository::new(store),
        }
    }
}
