//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// Which document store backend the service runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    Postgres,
}

/// How the ranking view derives its skill columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillColumnsSetting {
    /// Columns come from the first ranked player's skill keys
    #[default]
    First,
    /// Columns are the union of every player's skill keys
    Union,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Document store backend
    pub store_backend: StoreBackend,

    /// Database connection URL, required for the postgres backend
    pub database_url: Option<String>,

    /// Identity provider token verification
    pub jwt_secret: String,
    pub jwt_issuer: Option<String>,
    pub jwt_audience: Option<String>,

    /// Ranking view column policy
    pub skill_columns: SkillColumnsSetting,

    /// Runtime configuration
    pub rust_log: String,
    pub port: u16,
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store_backend = match lookup("STORE_BACKEND")
            .unwrap_or_else(|| "memory".to_string())
            .to_lowercase()
            .as_str()
        {
            "memory" => StoreBackend::Memory,
            "postgres" => StoreBackend::Postgres,
            other => {
                return Err(anyhow::anyhow!(
                    "Unknown STORE_BACKEND: {}. Supported backends: memory, postgres",
                    other
                ))
            }
        };

        let database_url = lookup("DATABASE_URL");
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            return Err(anyhow::anyhow!(
                "DATABASE_URL is required when STORE_BACKEND=postgres"
            ));
        }

        let skill_columns = match lookup("SKILL_COLUMNS")
            .unwrap_or_else(|| "first".to_string())
            .to_lowercase()
            .as_str()
        {
            "first" => SkillColumnsSetting::First,
            "union" => SkillColumnsSetting::Union,
            other => {
                return Err(anyhow::anyhow!(
                    "Unknown SKILL_COLUMNS: {}. Supported values: first, union",
                    other
                ))
            }
        };

        let config = Self {
            store_backend,
            database_url,

            jwt_secret: lookup("JWT_SECRET")
                .ok_or_else(|| anyhow::anyhow!("JWT_SECRET is required"))?,
            jwt_issuer: lookup("JWT_ISSUER"),
            jwt_audience: lookup("JWT_AUDIENCE"),

            skill_columns,

            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info,tower_http=debug".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            request_timeout_secs: lookup("REQUEST_TIMEOUT_SECS")
                .and_then(|t| t.parse().ok())
                .unwrap_or(30),
        };

        Ok(config)
    }
}
