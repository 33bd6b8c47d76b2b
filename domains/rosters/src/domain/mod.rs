//! Domain layer for rosters

pub mod entities;
pub mod ranking;
pub mod skill_editor;
