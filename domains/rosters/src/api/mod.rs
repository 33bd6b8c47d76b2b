//! API layer for the Rosters domain
//!
//! Contains HTTP handlers, routes, and domain state definition.

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::RostersState;
pub use routes::routes;
