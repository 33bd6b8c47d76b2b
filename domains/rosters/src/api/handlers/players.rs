//! Roster API handlers
//!
//! Every route is scoped to the `team_id` path parameter. Writes never reload
//! the roster; clients refresh with `GET /v1/teams/{team_id}/players`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use rosterboard_common::{not_blank, Error, Result, ValidatedJson};
use serde::Deserialize;
use validator::Validate;

use crate::api::middleware::{AuthUser, RostersState};
use crate::{
    default_skills, NewPlayer, Player, SkillEditor, SkillEditorEvent, SkillUpdate, Skills,
};

/// Request for adding a player
#[derive(Debug, Deserialize, Validate)]
pub struct AddPlayerRequest {
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 100))]
    pub position: String,

    /// Initial skill counters; the default counters at zero when omitted
    #[serde(default)]
    pub skills: Option<Skills>,
}

/// Step applied to the current skill value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Adjustment {
    Increment,
    Decrement,
}

/// Request for editing one skill.
///
/// `value` replaces the current value, then `adjust` steps it by one.
/// With neither, the current value is written back.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateSkillRequest {
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub adjust: Option<Adjustment>,
}

#[derive(Debug, Deserialize)]
pub struct DeletePlayerParams {
    #[serde(default)]
    pub confirm: bool,
}

/// List a team's players by rank
///
/// **GET /v1/teams/{team_id}/players**
pub async fn list_players(
    AuthUser(_identity): AuthUser,
    State(state): State<RostersState>,
    Path(team_id): Path<String>,
) -> Result<Json<Vec<Player>>> {
    let players = state.repos.players.list(&team_id).await?;
    Ok(Json(players))
}

/// Add a player to the bottom of the ranking
///
/// **POST /v1/teams/{team_id}/players**
pub async fn add_player(
    AuthUser(_identity): AuthUser,
    State(state): State<RostersState>,
    Path(team_id): Path<String>,
    ValidatedJson(request): ValidatedJson<AddPlayerRequest>,
) -> Result<(StatusCode, Json<Player>)> {
    let skills = request.skills.unwrap_or_else(default_skills);
    let new_player = NewPlayer::new(&request.name, &request.position, skills)?;
    let player = state.repos.players.add(&team_id, new_player).await?;
    Ok((StatusCode::CREATED, Json(player)))
}

/// Get a single player
///
/// **GET /v1/teams/{team_id}/players/{player_id}**
pub async fn get_player(
    AuthUser(_identity): AuthUser,
    State(state): State<RostersState>,
    Path((team_id, player_id)): Path<(String, String)>,
) -> Result<Json<Player>> {
    let player = state
        .repos
        .players
        .get(&team_id, &player_id)
        .await?
        .ok_or_else(|| Error::NotFound("Player not found".to_string()))?;
    Ok(Json(player))
}

/// Remove a player; requires `?confirm=true`
///
/// **DELETE /v1/teams/{team_id}/players/{player_id}**
pub async fn delete_player(
    AuthUser(identity): AuthUser,
    State(state): State<RostersState>,
    Path((team_id, player_id)): Path<(String, String)>,
    Query(params): Query<DeletePlayerParams>,
) -> Result<StatusCode> {
    if !params.confirm {
        return Err(Error::Validation(
            "Deleting a player requires confirm=true".to_string(),
        ));
    }

    tracing::debug!(user_id = %identity.user_id, player_id = %player_id, "Player delete confirmed");
    state.repos.players.delete(&team_id, &player_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Edit one skill of a player
///
/// **PUT /v1/teams/{team_id}/players/{player_id}/skills/{skill}**
///
/// Runs the request through the skill editor for the stored player, so only
/// skills the player already has can be edited.
pub async fn update_skill(
    AuthUser(_identity): AuthUser,
    State(state): State<RostersState>,
    Path((team_id, player_id, skill)): Path<(String, String, String)>,
    ValidatedJson(request): ValidatedJson<UpdateSkillRequest>,
) -> Result<Json<SkillUpdate>> {
    let player = state
        .repos
        .players
        .get(&team_id, &player_id)
        .await?
        .ok_or_else(|| Error::NotFound("Player not found".to_string()))?;

    let mut editor = SkillEditor::new();
    editor.apply(SkillEditorEvent::SelectPlayer(player))?;
    editor.apply(SkillEditorEvent::SelectSkill(skill))?;
    if let Some(value) = request.value {
        editor.apply(SkillEditorEvent::SetValue(value))?;
    }
    match request.adjust {
        Some(Adjustment::Increment) => {
            editor.apply(SkillEditorEvent::Increment)?;
        }
        Some(Adjustment::Decrement) => {
            editor.apply(SkillEditorEvent::Decrement)?;
        }
        None => {}
    }

    let update = editor
        .apply(SkillEditorEvent::Submit)?
        .ok_or_else(|| Error::Internal("Skill editor produced no update".to_string()))?;

    state
        .repos
        .players
        .update_skill(&team_id, &update.player_id, &update.skill, update.value)
        .await?;

    Ok(Json(update))
}
