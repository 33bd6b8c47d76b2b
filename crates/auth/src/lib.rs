//! Identity provider adapter for Rosterboard
//!
//! Sign-in is handled by an external identity provider. This crate verifies
//! the tokens it issues and exposes the current user's identity to handlers
//! through axum extractors that work with any state implementing
//! `FromRef<S>` for `AuthBackend`.

mod backend;
mod claims;
mod config;
mod error;
mod extractors;
mod identity;
mod jwt;

pub use backend::AuthBackend;
pub use claims::IdentityClaims;
pub use config::AuthConfig;
pub use error::AuthError;
pub use extractors::AuthUser;
pub use identity::Identity;
