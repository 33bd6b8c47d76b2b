//! Skill editor state machine
//!
//! States:
//! - `NoPlayerSelected`: initial state
//! - `PlayerSelected`: a player is chosen; its skill map gives the choices
//! - `SkillSelected`: a skill is chosen and its value is being edited
//!
//! `Submit` never changes state; a successful submit yields a [`SkillUpdate`]
//! for the roster repository. Rejected events leave the editor untouched.

use rosterboard_common::StateError;
use serde::{Deserialize, Serialize};

use super::entities::{Player, Skills};

/// Message for a submit without both selections
pub const SELECTION_REQUIRED: &str = "Please select a player and a skill.";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SkillEditorState {
    #[default]
    NoPlayerSelected,
    PlayerSelected {
        player_id: String,
        /// Skill names with the player's current values
        skill_choices: Skills,
    },
    SkillSelected {
        player_id: String,
        skill_choices: Skills,
        skill: String,
        value: f64,
    },
}

impl std::fmt::Display for SkillEditorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoPlayerSelected => write!(f, "no_player_selected"),
            Self::PlayerSelected { .. } => write!(f, "player_selected"),
            Self::SkillSelected { .. } => write!(f, "skill_selected"),
        }
    }
}

/// Events that drive the skill editor
#[derive(Debug, Clone, PartialEq)]
pub enum SkillEditorEvent {
    SelectPlayer(Player),
    SelectSkill(String),
    SetValue(f64),
    Increment,
    Decrement,
    Reset,
    Submit,
}

impl std::fmt::Display for SkillEditorEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SelectPlayer(_) => write!(f, "select_player"),
            Self::SelectSkill(_) => write!(f, "select_skill"),
            Self::SetValue(_) => write!(f, "set_value"),
            Self::Increment => write!(f, "increment"),
            Self::Decrement => write!(f, "decrement"),
            Self::Reset => write!(f, "reset"),
            Self::Submit => write!(f, "submit"),
        }
    }
}

/// Write produced by a successful submit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillUpdate {
    pub player_id: String,
    pub skill: String,
    pub value: f64,
}

/// Skill editor view-model
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillEditor {
    state: SkillEditorState,
}

impl SkillEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SkillEditorState {
        &self.state
    }

    /// Apply an event. Returns the update to write when the event is `Submit`.
    pub fn apply(&mut self, event: SkillEditorEvent) -> Result<Option<SkillUpdate>, StateError> {
        if event == SkillEditorEvent::Submit {
            return self.submit().map(Some);
        }
        self.state = Self::transition(&self.state, event)?;
        Ok(None)
    }

    fn submit(&self) -> Result<SkillUpdate, StateError> {
        match &self.state {
            SkillEditorState::SkillSelected {
                player_id,
                skill,
                value,
                ..
            } => Ok(SkillUpdate {
                player_id: player_id.clone(),
                skill: skill.clone(),
                value: *value,
            }),
            _ => Err(StateError::GuardFailed(SELECTION_REQUIRED.to_string())),
        }
    }

    fn transition(
        current: &SkillEditorState,
        event: SkillEditorEvent,
    ) -> Result<SkillEditorState, StateError> {
        use SkillEditorState::*;

        let next = match (current, event) {
            // Choosing a player always starts over with that player's skills
            (_, SkillEditorEvent::SelectPlayer(player)) => PlayerSelected {
                player_id: player.id,
                skill_choices: player.skills,
            },
            (_, SkillEditorEvent::Reset) => NoPlayerSelected,

            (
                PlayerSelected {
                    player_id,
                    skill_choices,
                }
                | SkillSelected {
                    player_id,
                    skill_choices,
                    ..
                },
                SkillEditorEvent::SelectSkill(skill),
            ) => {
                if skill_choices.is_empty() {
                    return Err(StateError::GuardFailed(
                        "Selected player has no skills to edit".to_string(),
                    ));
                }
                let value = *skill_choices.get(&skill).ok_or_else(|| {
                    StateError::GuardFailed(format!("Unknown skill: '{}'", skill))
                })?;
                SkillSelected {
                    player_id: player_id.clone(),
                    skill_choices: skill_choices.clone(),
                    skill,
                    value,
                }
            }

            (
                SkillSelected {
                    player_id,
                    skill_choices,
                    skill,
                    value,
                },
                event @ (SkillEditorEvent::SetValue(_)
                | SkillEditorEvent::Increment
                | SkillEditorEvent::Decrement),
            ) => {
                let value = match event {
                    SkillEditorEvent::SetValue(v) => v,
                    SkillEditorEvent::Increment => value + 1.0,
                    _ => value - 1.0,
                };
                if !value.is_finite() {
                    return Err(StateError::GuardFailed(
                        "Skill value must be a finite number".to_string(),
                    ));
                }
                SkillSelected {
                    player_id: player_id.clone(),
                    skill_choices: skill_choices.clone(),
                    skill: skill.clone(),
                    value,
                }
            }

            (current, event) => {
                return Err(StateError::InvalidTransition {
                    from: current.to_string(),
                    event: event.to_string(),
                });
            }
        };

        Ok(next)
    }
}
