//! Teams domain: users, teams (organizations), invitation codes

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;
// Re-export repository types
pub use repository::{TeamRepository, TeamsRepositories, UserRepository, INVALID_CODE_MESSAGE};

// Re-export API types
pub use api::routes;
pub use api::TeamsState;
