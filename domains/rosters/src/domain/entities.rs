//! Domain entities for the Rosterboard rosters domain

use std::collections::BTreeMap;

use rosterboard_common::{Error, Result};
use rosterboard_docstore::{Document, Fields};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Score every new player starts with
pub const INITIAL_SCORE: i64 = 1000;

/// Skill name to counter value
pub type Skills = BTreeMap<String, f64>;

/// Counters every player starts with unless the request names its own
pub const DEFAULT_SKILLS: [&str; 7] = [
    "turns",
    "catches",
    "scores",
    "defenses",
    "totalthrows",
    "goodthrows",
    "teamWins",
];

/// The default counters, all at zero
pub fn default_skills() -> Skills {
    DEFAULT_SKILLS
        .iter()
        .map(|name| (name.to_string(), 0.0))
        .collect()
}

/// Player on a team's roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub position: String,
    pub score: i64,
    /// 1-based position in the ranking; not unique under concurrent adds
    pub rank: i64,
    pub skills: Skills,
}

// Player documents are schemaless; missing fields read as empty or zero
#[derive(Debug, Deserialize)]
struct PlayerFields {
    #[serde(default)]
    name: String,
    #[serde(default)]
    position: String,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    rank: i64,
    #[serde(default)]
    skills: Skills,
}

/// Player data supplied when adding to a roster
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlayer {
    pub name: String,
    pub position: String,
    pub skills: Skills,
}

impl NewPlayer {
    pub fn new(name: &str, position: &str, skills: Skills) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation(
                "Please enter a player name.".to_string(),
            ));
        }
        for (skill, value) in &skills {
            validate_skill_name(skill)?;
            validate_skill_value(*value)?;
        }

        Ok(Self {
            name: name.to_string(),
            position: position.trim().to_string(),
            skills,
        })
    }
}

impl Player {
    pub fn from_document(document: &Document) -> Result<Self> {
        let fields: PlayerFields = document.decode()?;
        Ok(Self {
            id: document.id.clone(),
            name: fields.name,
            position: fields.position,
            score: fields.score,
            rank: fields.rank,
            skills: fields.skills,
        })
    }

    /// Document fields for a player at `rank` (without the id)
    pub fn new_fields(player: &NewPlayer, rank: i64) -> Fields {
        let skills: Map<String, Value> = player
            .skills
            .iter()
            .map(|(name, value)| (name.clone(), skill_value(*value)))
            .collect();

        let mut fields = Fields::new();
        fields.insert("name".to_string(), Value::from(player.name.clone()));
        fields.insert("position".to_string(), Value::from(player.position.clone()));
        fields.insert("score".to_string(), Value::from(INITIAL_SCORE));
        fields.insert("rank".to_string(), Value::from(rank));
        fields.insert("skills".to_string(), Value::Object(skills));
        fields
    }

    /// Current value of a skill, 0 when the player has no such key
    pub fn skill(&self, name: &str) -> f64 {
        self.skills.get(name).copied().unwrap_or(0.0)
    }
}

/// Skill names become a dotted field path, so they cannot contain `.`
pub fn validate_skill_name(name: &str) -> Result<()> {
    if name.trim().is_empty() || name.contains('.') || name.contains('/') {
        return Err(Error::Validation(format!("Invalid skill name: '{}'", name)));
    }
    Ok(())
}

pub fn validate_skill_value(value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::Validation("Skill value must be a finite number".to_string()));
    }
    Ok(())
}

/// Stored form of a skill value; whole numbers are written as integers
pub fn skill_value(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}
