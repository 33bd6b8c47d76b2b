//! Common test utilities and fixtures for integration tests
//!
//! This module provides shared infrastructure for all integration tests:
//! - An application wired to a fresh in-memory document store
//! - Identity provider token helpers
//! - Request/response helpers

use std::env;
use std::sync::{Arc, Once};

use anyhow::Result;
use axum::{
    body::Body,
    http::{header::AUTHORIZATION, header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use rosterboard_auth::IdentityClaims;
use rosterboard_common::Config;
use rosterboard_docstore::{layout, DocumentStore, MemoryStore};
use serde_json::Value;
use tower::ServiceExt;

static INIT: Once = Once::new();

/// Test environment configuration
#[derive(Debug, Clone)]
pub struct TestConfig {
    pub jwt_secret: String,
    pub skill_columns: String,
    /// PostgreSQL database for store tests; those run in memory only when unset
    pub database_url: Option<String>,
}

impl TestConfig {
    pub fn from_env() -> Self {
        INIT.call_once(|| {
            dotenvy::from_filename(".env.test").ok();
            dotenvy::dotenv().ok();
        });

        Self {
            jwt_secret: env::var("TEST_JWT_SECRET")
                .unwrap_or_else(|_| "test_secret_key_for_testing_only".to_string()),
            skill_columns: "first".to_string(),
            database_url: env::var("TEST_DATABASE_URL")
                .or_else(|_| env::var("DATABASE_URL"))
                .ok(),
        }
    }
}

/// Test application backed by an in-memory document store
pub struct TestApp {
    pub config: TestConfig,
    pub store: Arc<MemoryStore>,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(TestConfig::from_env())
    }

    /// Application whose ranking view uses the union of all skill keys
    pub fn with_union_columns() -> Self {
        let mut config = TestConfig::from_env();
        config.skill_columns = "union".to_string();
        Self::with_config(config)
    }

    fn with_config(config: TestConfig) -> Self {
        let app_config = Config::from_lookup(|key| match key {
            "JWT_SECRET" => Some(config.jwt_secret.clone()),
            "SKILL_COLUMNS" => Some(config.skill_columns.clone()),
            _ => None,
        })
        .expect("test configuration is valid");

        let store = Arc::new(MemoryStore::new());
        let router = rosterboard_app::create_app(&app_config, store.clone());

        Self {
            config,
            store,
            router,
        }
    }

    /// A fresh router sharing this app's store
    pub fn test_router(&self) -> Router {
        self.router.clone()
    }

    /// Send a request and decode the JSON body (`Value::Null` when empty)
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.test_router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    /// Raw stored user document, if any
    pub async fn user_document(&self, user_id: &str) -> Option<Value> {
        self.store
            .get(&layout::user(user_id).unwrap())
            .await
            .unwrap()
            .map(|doc| Value::Object(doc.data))
    }
}

/// Signed-in user fixture
#[derive(Debug, Clone)]
pub struct UserFixture {
    pub user_id: String,
    pub first_name: String,
    pub jwt_token: String,
}

impl UserFixture {
    pub fn new(app: &TestApp, user_id: &str, first_name: &str) -> Self {
        let jwt_token = create_test_jwt(user_id, Some(first_name), &app.config.jwt_secret)
            .expect("token encodes");
        Self {
            user_id: user_id.to_string(),
            first_name: first_name.to_string(),
            jwt_token,
        }
    }

    pub fn token(&self) -> Option<&str> {
        Some(&self.jwt_token)
    }
}

/// Create a test JWT the way the identity provider issues them
pub fn create_test_jwt(user_id: &str, first_name: Option<&str>, secret: &str) -> Result<String> {
    use jsonwebtoken::{Algorithm, EncodingKey, Header};

    let now = chrono::Utc::now().timestamp() as u64;

    let claims = IdentityClaims {
        sub: user_id.to_string(),
        first_name: first_name.map(str::to_string),
        iat: now,
        exp: now + 3600,
        iss: None,
        aud: None,
    };

    let header = Header::new(Algorithm::HS256);
    let encoding_key = EncodingKey::from_secret(secret.as_ref());

    Ok(jsonwebtoken::encode(&header, &claims, &encoding_key)?)
}

/// Common test assertions
pub mod assertions {
    use super::*;

    /// Assert the standard `{ "error": { "code", "message" } }` body
    pub fn assert_error_code(body: &Value, code: &str) {
        assert_eq!(body["error"]["code"], code, "unexpected error body: {}", body);
        assert!(body["error"]["message"].is_string());
    }

    /// Assert that ranks never decrease down the list
    pub fn assert_ranks_non_decreasing(players: &Value) {
        let ranks: Vec<i64> = players
            .as_array()
            .expect("player list")
            .iter()
            .map(|p| p["rank"].as_i64().expect("integer rank"))
            .collect();
        assert!(
            ranks.windows(2).all(|w| w[0] <= w[1]),
            "ranks out of order: {:?}",
            ranks
        );
    }
}
