//! Rosterboard application composition root
//!
//! Composes all domain routers into a single application.

use std::time::Duration;

use axum::Router;
use rosterboard_auth::{AuthBackend, AuthConfig};
use rosterboard_common::Config;
use rosterboard_docstore::SharedStore;
use rosterboard_rosters::{RostersRepositories, RostersState};
use rosterboard_teams::{TeamsRepositories, TeamsState};
use tower_http::timeout::TimeoutLayer;

/// Create the main application router with all routes and middleware
pub fn create_app(config: &Config, store: SharedStore) -> Router {
    let auth = AuthBackend::new(AuthConfig::from(config));

    let teams_state = TeamsState {
        repos: TeamsRepositories::new(store.clone()),
        auth: auth.clone(),
    };

    let rosters_state = RostersState {
        repos: RostersRepositories::new(store.clone()),
        auth,
        skill_columns: config.skill_columns.into(),
    };

    tracing::info!(
        store = store.backend_name(),
        skill_columns = ?config.skill_columns,
        "Composing application"
    );

    Router::new()
        .route("/health", axum::routing::get(health_check))
        .route(
            "/",
            axum::routing::get(|| async { "Rosterboard API v0.0.1-SNAPSHOT" }),
        )
        .merge(rosterboard_teams::routes().with_state(teams_state))
        .merge(rosterboard_rosters::routes().with_state(rosters_state))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
