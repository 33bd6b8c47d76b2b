//! Common state machine error types
//!
//! Shared by the view-model state machines in the domain crates.

use thiserror::Error;

use crate::Error;

/// Errors that can occur during state transitions
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StateError {
    #[error("Invalid transition: cannot apply {event} in state {from}")]
    InvalidTransition { from: String, event: String },

    #[error("Guard condition failed: {0}")]
    GuardFailed(String),
}

/// A rejected transition is a client-side validation failure
impl From<StateError> for Error {
    fn from(err: StateError) -> Self {
        match err {
            StateError::GuardFailed(msg) => Error::Validation(msg),
            other => Error::Validation(other.to_string()),
        }
    }
}
