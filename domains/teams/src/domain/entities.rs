//! Domain entities for the Rosterboard teams domain
//!
//! Users and teams are stored as schemaless documents; each entity has a
//! private document shape (camelCase fields) and converts from a
//! [`Document`] so the store id becomes the entity id.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rosterboard_common::{Error, Result};
use rosterboard_docstore::{generate_id, Document, Fields};
use serde::{Deserialize, Serialize};

/// Maximum length of a team name
pub const MAX_TEAM_NAME_LEN: usize = 100;

/// Roster name used when the creator has no first name
pub const UNNAMED_PLAYER: &str = "Unnamed Player";

/// User document: external identity plus the teams the user belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    /// Team ids in join order. Duplicates are possible when a user joins twice.
    pub team_ids: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserFields {
    #[serde(default)]
    name: String,
    #[serde(default)]
    team_ids: Vec<String>,
}

impl User {
    /// Fresh user with no teams
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            team_ids: Vec::new(),
        }
    }

    pub fn from_document(document: &Document) -> Result<Self> {
        let fields: UserFields = document.decode()?;
        Ok(Self {
            id: document.id.clone(),
            name: fields.name,
            team_ids: fields.team_ids,
        })
    }

    /// Document fields for this user (without the id)
    pub fn to_fields(&self) -> Result<Fields> {
        Ok(rosterboard_docstore::to_fields(&UserFields {
            name: self.name.clone(),
            team_ids: self.team_ids.clone(),
        })?)
    }
}

/// Team ("organization"). The id doubles as the invitation code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TeamFields {
    name: String,
    created_by: String,
    created_at: DateTime<Utc>,
}

impl Team {
    /// Create a new team with a freshly generated id
    pub fn new(name: &str, created_by: &str) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation(
                "Please enter a valid team name.".to_string(),
            ));
        }
        if name.chars().count() > MAX_TEAM_NAME_LEN {
            return Err(Error::Validation(format!(
                "Team name must be at most {} characters",
                MAX_TEAM_NAME_LEN
            )));
        }

        Ok(Self {
            id: generate_id(),
            name: name.to_string(),
            created_by: created_by.to_string(),
            created_at: Utc::now(),
        })
    }

    /// Code other users enter to join this team
    pub fn invitation_code(&self) -> &str {
        &self.id
    }

    pub fn from_document(document: &Document) -> Result<Self> {
        let fields: TeamFields = document.decode()?;
        Ok(Self {
            id: document.id.clone(),
            name: fields.name,
            created_by: fields.created_by,
            created_at: fields.created_at,
        })
    }

    pub fn to_fields(&self) -> Result<Fields> {
        Ok(rosterboard_docstore::to_fields(&TeamFields {
            name: self.name.clone(),
            created_by: self.created_by.clone(),
            created_at: self.created_at,
        })?)
    }
}

/// Roster entry for the team creator, written together with the team.
///
/// The creator starts at rank 1 with the score and statistics they chose.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatorPlayer {
    pub name: String,
    pub position: String,
    pub score: i64,
    pub skills: BTreeMap<String, f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreatorPlayerFields<'a> {
    name: &'a str,
    user_id: &'a str,
    created_at: DateTime<Utc>,
    rank: i64,
    score: i64,
    position: &'a str,
    skills: &'a BTreeMap<String, f64>,
}

impl CreatorPlayer {
    pub fn new(
        name: &str,
        position: &str,
        score: i64,
        skills: BTreeMap<String, f64>,
    ) -> Result<Self> {
        for (skill, value) in &skills {
            if skill.trim().is_empty() || skill.contains('.') || skill.contains('/') {
                return Err(Error::Validation(format!("Invalid skill name: '{}'", skill)));
            }
            if !value.is_finite() {
                return Err(Error::Validation(
                    "Skill value must be a finite number".to_string(),
                ));
            }
        }

        let name = match name.trim() {
            "" => UNNAMED_PLAYER,
            trimmed => trimmed,
        };

        Ok(Self {
            name: name.to_string(),
            position: position.trim().to_string(),
            score,
            skills,
        })
    }

    /// Player document fields linking the entry to `user_id`
    pub fn to_fields(&self, user_id: &str) -> Result<Fields> {
        Ok(rosterboard_docstore::to_fields(&CreatorPlayerFields {
            name: &self.name,
            user_id,
            created_at: Utc::now(),
            rank: 1,
            score: self.score,
            position: &self.position,
            skills: &self.skills,
        })?)
    }
}
