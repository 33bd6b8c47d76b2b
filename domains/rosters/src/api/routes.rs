//! Route definitions for Rosters domain API

use axum::{
    routing::{get, put},
    Router,
};

use super::handlers::{players, ranking};
use super::middleware::RostersState;

/// Roster management routes
fn player_routes() -> Router<RostersState> {
    Router::new()
        .route(
            "/v1/teams/{team_id}/players",
            get(players::list_players).post(players::add_player),
        )
        .route(
            "/v1/teams/{team_id}/players/{player_id}",
            get(players::get_player).delete(players::delete_player),
        )
        .route(
            "/v1/teams/{team_id}/players/{player_id}/skills/{skill}",
            put(players::update_skill),
        )
}

fn ranking_routes() -> Router<RostersState> {
    Router::new().route("/v1/teams/{team_id}/ranking", get(ranking::get_ranking))
}

/// Create all Rosters domain API routes
pub fn routes() -> Router<RostersState> {
    Router::new().merge(player_routes()).merge(ranking_routes())
}
