//! Application configuration loaded from environment variables.
//!
//! There are no secrets to fetch at startup: session ids are generated per
//! login and password hashes live in the document store. Everything here is
//! deploy-time tuning.

use std::env;
use std::str::FromStr;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL, used for CORS and to decide cookie Secure-ness
    pub frontend_url: String,
    /// GCP project ID (Firestore)
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// Session lifetime in hours
    pub session_ttl_hours: i64,
    /// bcrypt work factor for password hashing
    pub bcrypt_cost: u32,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `GCP_PROJECT_ID` is the only required key; the rest default to
    /// local-development values. A key that is set but unparseable is an
    /// error rather than a silent fallback.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID")
                .map_err(|_| ConfigError::Missing("GCP_PROJECT_ID"))?,
            port: env_parsed("PORT", 8080)?,
            session_ttl_hours: env_parsed("SESSION_TTL_HOURS", 24 * 30)?,
            bcrypt_cost: env_parsed("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
        })
    }

    /// Config for tests only: in-memory-friendly defaults and the minimum
    /// bcrypt cost so password tests stay fast.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            session_ttl_hours: 24 * 30,
            // bcrypt's minimum cost (the crate keeps MIN_COST private)
            bcrypt_cost: 4,
        }
    }

    /// Session cookies are marked Secure when the frontend is served over
    /// HTTPS; plain HTTP (local development) gets a non-Secure cookie.
    pub fn cookie_secure(&self) -> bool {
        self.frontend_url.starts_with("https://")
    }
}

/// Parse an env var, falling back to `default` when unset.
///
/// A set-but-malformed value is a hard error so typos do not silently
/// downgrade to defaults.
fn env_parsed<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Environment variable is set but not parseable: {0}")]
    Invalid(&'static str),
}
