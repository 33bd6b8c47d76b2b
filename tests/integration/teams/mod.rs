//! Team management endpoint integration tests
//!
//! - GET /v1/teams - List the current user's teams
//! - POST /v1/teams - Create team
//! - POST /v1/teams/join - Join by invitation code
//! - GET /v1/teams/{team_id} - Get team
//! - DELETE /v1/teams/{team_id} - Delete team

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use crate::common::{assertions, TestApp, UserFixture};

async fn create_team(app: &TestApp, user: &UserFixture, name: &str) -> Value {
    let (status, team) = app
        .send(Method::POST, "/v1/teams", user.token(), Some(json!({ "name": name })))
        .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {}", team);
    team
}

mod test_create_team {
    use super::*;

    #[tokio::test]
    async fn test_create_team_links_creator() {
        let app = TestApp::new();
        let ann = UserFixture::new(&app, "u1", "Ann");

        let team = create_team(&app, &ann, "Hawks").await;

        assert_eq!(team["name"], "Hawks");
        assert_eq!(team["created_by"], "u1");
        assert_eq!(team["invitation_code"], team["id"]);

        let user = app.user_document("u1").await.unwrap();
        assert_eq!(user["teamIds"], json!([team["id"]]));
    }

    #[tokio::test]
    async fn test_create_team_with_creator_player() {
        let app = TestApp::new();
        let ann = UserFixture::new(&app, "u1", "Ann");

        let (status, team) = app
            .send(
                Method::POST,
                "/v1/teams",
                ann.token(),
                Some(json!({
                    "name": "Hawks",
                    "creator_player": {
                        "score": 1200,
                        "position": "Cutter",
                        "skills": { "goals": 0 },
                    },
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let uri = format!("/v1/teams/{}/players", team["id"].as_str().unwrap());
        let (_, players) = app.send(Method::GET, &uri, ann.token(), None).await;
        assert_eq!(players.as_array().unwrap().len(), 1);
        assert_eq!(players[0]["name"], "Ann");
        assert_eq!(players[0]["rank"], 1);
        assert_eq!(players[0]["score"], 1200);
        assert_eq!(players[0]["position"], "Cutter");

        // the next player goes below the creator
        let (_, bo) = app
            .send(Method::POST, &uri, ann.token(), Some(json!({ "name": "Bo" })))
            .await;
        assert_eq!(bo["rank"], 2);
    }

    #[tokio::test]
    async fn test_create_team_with_blank_name() {
        let app = TestApp::new();
        let ann = UserFixture::new(&app, "u1", "Ann");

        let (status, body) = app
            .send(Method::POST, "/v1/teams", ann.token(), Some(json!({ "name": "   " })))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assertions::assert_error_code(&body, "VALIDATION_ERROR");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .ends_with("Please enter a valid team name."));
    }
}

mod test_join_team {
    use super::*;

    #[tokio::test]
    async fn test_join_with_code() {
        let app = TestApp::new();
        let ann = UserFixture::new(&app, "u1", "Ann");
        let bo = UserFixture::new(&app, "u2", "Bo");
        let team = create_team(&app, &ann, "Hawks").await;

        let (status, joined) = app
            .send(
                Method::POST,
                "/v1/teams/join",
                bo.token(),
                Some(json!({ "invitation_code": team["invitation_code"] })),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(joined["id"], team["id"]);

        let (_, teams) = app.send(Method::GET, "/v1/teams", bo.token(), None).await;
        assert_eq!(teams.as_array().unwrap().len(), 1);
        assert_eq!(teams[0]["name"], "Hawks");
    }

    #[tokio::test]
    async fn test_join_with_bad_code() {
        let app = TestApp::new();
        let bo = UserFixture::new(&app, "u2", "Bo");

        let (status, body) = app
            .send(
                Method::POST,
                "/v1/teams/join",
                bo.token(),
                Some(json!({ "invitation_code": "bad-code" })),
            )
            .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("check your code"));
        assert_eq!(app.user_document("u2").await.unwrap()["teamIds"], json!([]));
    }

    #[tokio::test]
    async fn test_join_twice_lists_team_twice() {
        let app = TestApp::new();
        let ann = UserFixture::new(&app, "u1", "Ann");
        let bo = UserFixture::new(&app, "u2", "Bo");
        let team = create_team(&app, &ann, "Hawks").await;
        let body = json!({ "invitation_code": team["id"] });

        for _ in 0..2 {
            let (status, _) = app
                .send(Method::POST, "/v1/teams/join", bo.token(), Some(body.clone()))
                .await;
            assert_eq!(status, StatusCode::OK);
        }

        let user = app.user_document("u2").await.unwrap();
        assert_eq!(user["teamIds"], json!([team["id"], team["id"]]));
    }
}

mod test_list_teams {
    use super::*;

    #[tokio::test]
    async fn test_list_keeps_join_order() {
        let app = TestApp::new();
        let ann = UserFixture::new(&app, "u1", "Ann");
        create_team(&app, &ann, "Hawks").await;
        create_team(&app, &ann, "Owls").await;

        let (status, teams) = app.send(Method::GET, "/v1/teams", ann.token(), None).await;

        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = teams
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Hawks", "Owls"]);
    }

    #[tokio::test]
    async fn test_list_for_unknown_user_is_empty() {
        let app = TestApp::new();
        let cy = UserFixture::new(&app, "u3", "Cy");

        let (status, teams) = app.send(Method::GET, "/v1/teams", cy.token(), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(teams, json!([]));
    }
}

mod test_get_team {
    use super::*;

    #[tokio::test]
    async fn test_get_team() {
        let app = TestApp::new();
        let ann = UserFixture::new(&app, "u1", "Ann");
        let team = create_team(&app, &ann, "Hawks").await;
        let uri = format!("/v1/teams/{}", team["id"].as_str().unwrap());

        let (status, fetched) = app.send(Method::GET, &uri, ann.token(), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, team);
    }

    #[tokio::test]
    async fn test_get_missing_team() {
        let app = TestApp::new();
        let ann = UserFixture::new(&app, "u1", "Ann");

        let (status, body) = app.send(Method::GET, "/v1/teams/nope", ann.token(), None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assertions::assert_error_code(&body, "NOT_FOUND");
    }
}

mod test_delete_team {
    use super::*;

    #[tokio::test]
    async fn test_creator_deletes_team_and_roster() {
        let app = TestApp::new();
        let ann = UserFixture::new(&app, "u1", "Ann");
        let team = create_team(&app, &ann, "Hawks").await;
        let team_id = team["id"].as_str().unwrap();
        let players_uri = format!("/v1/teams/{}/players", team_id);
        app.send(Method::POST, &players_uri, ann.token(), Some(json!({ "name": "Cy" })))
            .await;

        let (status, _) = app
            .send(Method::DELETE, &format!("/v1/teams/{}", team_id), ann.token(), None)
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, players) = app.send(Method::GET, &players_uri, ann.token(), None).await;
        assert_eq!(players, json!([]));

        // the dangling id stays in the user document but is not listed
        let (_, teams) = app.send(Method::GET, "/v1/teams", ann.token(), None).await;
        assert_eq!(teams, json!([]));
        assert_eq!(app.user_document("u1").await.unwrap()["teamIds"], json!([team_id]));
    }

    #[tokio::test]
    async fn test_member_cannot_delete_team() {
        let app = TestApp::new();
        let ann = UserFixture::new(&app, "u1", "Ann");
        let bo = UserFixture::new(&app, "u2", "Bo");
        let team = create_team(&app, &ann, "Hawks").await;
        let uri = format!("/v1/teams/{}", team["id"].as_str().unwrap());

        let (status, body) = app.send(Method::DELETE, &uri, bo.token(), None).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assertions::assert_error_code(&body, "AUTHORIZATION_ERROR");
    }
}
