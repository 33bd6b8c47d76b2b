//! User endpoint integration tests
//!
//! - POST /api/createUser - identity provider hook
//! - GET /v1/me - current user profile

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::common::{assertions, create_test_jwt, TestApp, UserFixture};

mod test_create_user {
    use super::*;

    #[tokio::test]
    async fn test_create_user_writes_provider_document() {
        let app = TestApp::new();

        let (status, body) = app
            .send(
                Method::POST,
                "/api/createUser",
                None,
                Some(json!({ "id": "u1", "first_name": "Ann" })),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "User created successfully" }));
        assert_eq!(
            app.user_document("u1").await,
            Some(json!({ "name": "Ann", "teamCodes": [] }))
        );
    }

    #[tokio::test]
    async fn test_create_user_overwrites_existing_document() {
        let app = TestApp::new();
        let ann = UserFixture::new(&app, "u1", "Ann");
        app.send(Method::POST, "/v1/teams", ann.token(), Some(json!({ "name": "Hawks" })))
            .await;

        let (status, _) = app
            .send(
                Method::POST,
                "/api/createUser",
                None,
                Some(json!({ "id": "u1", "first_name": "Annie" })),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            app.user_document("u1").await,
            Some(json!({ "name": "Annie", "teamCodes": [] }))
        );
    }

    #[tokio::test]
    async fn test_create_user_with_malformed_body() {
        let app = TestApp::new();

        let (status, body) = app
            .send(
                Method::POST,
                "/api/createUser",
                None,
                Some(json!({ "first_name": "Ann" })),
            )
            .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Error creating user" }));
    }

    #[tokio::test]
    async fn test_create_user_when_store_is_down() {
        let app = TestApp::new();
        app.store.set_unavailable(true);

        let (status, body) = app
            .send(
                Method::POST,
                "/api/createUser",
                None,
                Some(json!({ "id": "u1", "first_name": "Ann" })),
            )
            .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Error creating user" }));
    }
}

mod test_get_profile {
    use super::*;

    #[tokio::test]
    async fn test_first_visit_creates_user() {
        let app = TestApp::new();
        let ann = UserFixture::new(&app, "u1", "Ann");

        let (status, profile) = app.send(Method::GET, "/v1/me", ann.token(), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(profile["id"], "u1");
        assert_eq!(profile["name"], "Ann");
        assert_eq!(profile["team_ids"], json!([]));
        assert_eq!(
            app.user_document("u1").await,
            Some(json!({ "name": "Ann", "teamIds": [] }))
        );
    }

    #[tokio::test]
    async fn test_get_profile_without_auth() {
        let app = TestApp::new();

        let (status, body) = app.send(Method::GET, "/v1/me", None, None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assertions::assert_error_code(&body, "MISSING_AUTHORIZATION");
    }

    #[tokio::test]
    async fn test_get_profile_with_foreign_signature() {
        let app = TestApp::new();
        let token = create_test_jwt("u1", Some("Ann"), "some-other-secret").unwrap();

        let (status, body) = app.send(Method::GET, "/v1/me", Some(&token), None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assertions::assert_error_code(&body, "INVALID_TOKEN");
    }
}
