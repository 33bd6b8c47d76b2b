//! Rosters domain: players, ranking view, skill editor

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;
pub use domain::ranking::{skill_keys, RankingRow, RankingView, SkillColumns};
pub use domain::skill_editor::{
    SkillEditor, SkillEditorEvent, SkillEditorState, SkillUpdate, SELECTION_REQUIRED,
};
// Re-export repository types
pub use repository::{PlayerRepository, RostersRepositories};

// Re-export API types
pub use api::routes;
pub use api::RostersState;
