//! Shared utilities, configuration, and error handling for Rosterboard
//!
//! This crate provides common functionality used across the Rosterboard service:
//! - Configuration management following 12-factor principles
//! - Error types and their HTTP mapping
//! - Request extractors
//! - State machine error types

pub mod config;
pub mod error;
pub mod extractors;
pub mod state;

pub use config::{Config, SkillColumnsSetting, StoreBackend};
pub use error::{Error, Result};
pub use extractors::{not_blank, ValidatedJson};
pub use state::StateError;
