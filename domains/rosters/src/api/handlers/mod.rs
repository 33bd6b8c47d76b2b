//! HTTP handlers for the Rosters domain

pub mod players;
pub mod ranking;
