//! Ranking view handler

use axum::{
    extract::{Path, State},
    Json,
};
use rosterboard_common::Result;

use crate::api::middleware::{AuthUser, RostersState};
use crate::RankingView;

/// Ranking table for a team
///
/// **GET /v1/teams/{team_id}/ranking**
pub async fn get_ranking(
    AuthUser(_identity): AuthUser,
    State(state): State<RostersState>,
    Path(team_id): Path<String>,
) -> Result<Json<RankingView>> {
    let players = state.repos.players.list(&team_id).await?;
    Ok(Json(RankingView::build(&players, state.skill_columns)))
}
