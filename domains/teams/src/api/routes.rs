//! Route definitions for Teams domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{teams, users};
use super::middleware::TeamsState;

/// Identity provider hook and profile routes
fn user_routes() -> Router<TeamsState> {
    Router::new()
        .route("/api/createUser", post(users::create_user))
        .route("/v1/me", get(users::get_profile))
}

/// Create team management routes
fn team_routes() -> Router<TeamsState> {
    Router::new()
        .route("/v1/teams", get(teams::list_teams).post(teams::create_team))
        .route("/v1/teams/join", post(teams::join_team))
        .route(
            "/v1/teams/{team_id}",
            get(teams::get_team).delete(teams::delete_team),
        )
}

/// Create all Teams domain API routes
pub fn routes() -> Router<TeamsState> {
    Router::new().merge(user_routes()).merge(team_routes())
}
