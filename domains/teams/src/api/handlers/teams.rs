//! Team management API handlers
//!
//! Any authenticated user may create, join and view teams. Deleting is
//! reserved to the team creator.

use std::collections::BTreeMap;

use crate::{CreatorPlayer, Team, MAX_TEAM_NAME_LEN};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use rosterboard_common::{not_blank, Error, Result, ValidatedJson};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::middleware::{AuthUser, TeamsState};

/// `MAX_TEAM_NAME_LEN` as the `u64` the `validator` length rule requires
const MAX_TEAM_NAME_LEN_U64: u64 = MAX_TEAM_NAME_LEN as u64;

/// Request for creating a new team
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTeamRequest {
    /// Team display name; blank names are rejected by `Team::new`
    #[validate(length(max = MAX_TEAM_NAME_LEN_U64))]
    pub name: String,

    /// Put the creator on the new team's roster
    #[serde(default)]
    #[validate(nested)]
    pub creator_player: Option<CreatorPlayerRequest>,
}

/// Creator's own roster entry: starting score, position and statistics
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreatorPlayerRequest {
    #[serde(default)]
    pub score: i64,

    #[serde(default)]
    #[validate(length(max = 100))]
    pub position: String,

    #[serde(default)]
    pub skills: BTreeMap<String, f64>,
}

/// Request for joining a team by invitation code
#[derive(Debug, Deserialize, Validate)]
pub struct JoinTeamRequest {
    #[validate(custom(function = "not_blank"))]
    pub invitation_code: String,
}

/// Team response for API operations
#[derive(Debug, Serialize)]
pub struct TeamResponse {
    pub id: String,
    pub name: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    /// Code other users enter to join
    pub invitation_code: String,
}

impl From<Team> for TeamResponse {
    fn from(team: Team) -> Self {
        Self {
            invitation_code: team.invitation_code().to_string(),
            id: team.id,
            name: team.name,
            created_by: team.created_by,
            created_at: team.created_at,
        }
    }
}

/// List teams for the current user
///
/// **GET /v1/teams**
///
/// Teams come back in the order they were joined. Ids that no longer resolve
/// are skipped.
pub async fn list_teams(
    AuthUser(identity): AuthUser,
    State(state): State<TeamsState>,
) -> Result<Json<Vec<TeamResponse>>> {
    let teams = state.repos.teams.list_for_user(&identity.user_id).await?;

    Ok(Json(teams.into_iter().map(TeamResponse::from).collect()))
}

/// Create a new team
///
/// **POST /v1/teams**
///
/// The creator is added to the team, and to its roster when
/// `creator_player` is given, in the same write.
pub async fn create_team(
    AuthUser(identity): AuthUser,
    State(state): State<TeamsState>,
    ValidatedJson(request): ValidatedJson<CreateTeamRequest>,
) -> Result<(StatusCode, Json<TeamResponse>)> {
    let creator_player = request
        .creator_player
        .map(|player| {
            CreatorPlayer::new(
                identity.display_name(),
                &player.position,
                player.score,
                player.skills,
            )
        })
        .transpose()?;

    state
        .repos
        .users
        .ensure(&identity.user_id, identity.display_name())
        .await?;

    let team = state
        .repos
        .teams
        .create(&request.name, &identity.user_id, creator_player.as_ref())
        .await?;

    Ok((StatusCode::CREATED, Json(team.into())))
}

/// Join a team
///
/// **POST /v1/teams/join**
pub async fn join_team(
    AuthUser(identity): AuthUser,
    State(state): State<TeamsState>,
    ValidatedJson(request): ValidatedJson<JoinTeamRequest>,
) -> Result<Json<TeamResponse>> {
    state
        .repos
        .users
        .ensure(&identity.user_id, identity.display_name())
        .await?;

    let team = state
        .repos
        .teams
        .join(&request.invitation_code, &identity.user_id)
        .await?;

    Ok(Json(team.into()))
}

/// Get team details
///
/// **GET /v1/teams/{team_id}**
pub async fn get_team(
    AuthUser(_identity): AuthUser,
    State(state): State<TeamsState>,
    Path(team_id): Path<String>,
) -> Result<Json<TeamResponse>> {
    let team = state
        .repos
        .teams
        .get_by_id(&team_id)
        .await?
        .ok_or_else(|| Error::NotFound("Team not found".to_string()))?;

    Ok(Json(team.into()))
}

/// Delete a team and its roster
///
/// **DELETE /v1/teams/{team_id}**
pub async fn delete_team(
    AuthUser(identity): AuthUser,
    State(state): State<TeamsState>,
    Path(team_id): Path<String>,
) -> Result<StatusCode> {
    state
        .repos
        .teams
        .delete(&team_id, &identity.user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
