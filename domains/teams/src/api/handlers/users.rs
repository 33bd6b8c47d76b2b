//! User API handlers
//!
//! - POST /api/createUser - identity provider hook, writes the user document
//! - GET /v1/me - current user profile, created on first visit

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rosterboard_common::Result;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::middleware::{AuthUser, TeamsState};
use crate::User;

/// Payload sent by the identity provider when a user registers
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub id: String,
    pub first_name: String,
}

/// Response for user profile operations
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub team_ids: Vec<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            team_ids: user.team_ids,
        }
    }
}

fn create_user_failed() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Error creating user" })),
    )
        .into_response()
}

/// Create the user document for a newly registered identity
///
/// **POST /api/createUser**
///
/// Any failure, including a malformed body, answers 500 with a fixed message.
/// The route carries no token: it overwrites whatever document exists for the
/// id, team list included, so only the identity provider may reach it.
pub async fn create_user(
    State(state): State<TeamsState>,
    payload: std::result::Result<Json<CreateUserRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::error!(error = %rejection.body_text(), "Rejected create-user payload");
            return create_user_failed();
        }
    };

    match state
        .repos
        .users
        .create_from_provider(&request.id, &request.first_name)
        .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "User created successfully" })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(user_id = %request.id, error = %e, "Failed to create user");
            create_user_failed()
        }
    }
}

/// Get the current user's profile
///
/// **GET /v1/me**
pub async fn get_profile(
    AuthUser(identity): AuthUser,
    State(state): State<TeamsState>,
) -> Result<Json<UserResponse>> {
    let user = state
        .repos
        .users
        .ensure(&identity.user_id, identity.display_name())
        .await?;

    Ok(Json(user.into()))
}
