//! Ranking view-model
//!
//! Rows keep the order of the player list they are built from; the roster
//! query already sorts by rank.

use std::collections::BTreeSet;

use rosterboard_common::SkillColumnsSetting;
use serde::Serialize;

use super::entities::Player;

/// How the ranking table picks its skill columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillColumns {
    /// Keys of the first player's skill map
    #[default]
    FirstPlayer,
    /// Keys of every player's skill map
    Union,
}

impl From<SkillColumnsSetting> for SkillColumns {
    fn from(setting: SkillColumnsSetting) -> Self {
        match setting {
            SkillColumnsSetting::First => SkillColumns::FirstPlayer,
            SkillColumnsSetting::Union => SkillColumns::Union,
        }
    }
}

/// Skill column names for a list of players
pub fn skill_keys(players: &[Player], policy: SkillColumns) -> Vec<String> {
    match policy {
        SkillColumns::FirstPlayer => players
            .first()
            .map(|player| player.skills.keys().cloned().collect())
            .unwrap_or_default(),
        SkillColumns::Union => players
            .iter()
            .flat_map(|player| player.skills.keys().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingRow {
    pub player_id: String,
    pub rank: i64,
    pub name: String,
    pub position: String,
    pub score: i64,
    /// One entry per column; `None` where the player lacks that skill
    pub skills: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingView {
    pub columns: Vec<String>,
    pub rows: Vec<RankingRow>,
}

impl RankingView {
    pub fn build(players: &[Player], policy: SkillColumns) -> Self {
        let columns = skill_keys(players, policy);
        let rows = players
            .iter()
            .map(|player| RankingRow {
                player_id: player.id.clone(),
                rank: player.rank,
                name: player.name.clone(),
                position: player.position.clone(),
                score: player.score,
                skills: columns
                    .iter()
                    .map(|column| player.skills.get(column).copied())
                    .collect(),
            })
            .collect();

        Self { columns, rows }
    }
}
