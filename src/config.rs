// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Cloud Run injects secrets as environment variables via secret bindings,
//! so everything is read from the process environment once at startup.

use crate::models::camp::ArchivalPolicy;
use std::env;

/// Default lifetime of an application session token.
pub const DEFAULT_SESSION_TTL_HOURS: u64 = 24;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// GCP project ID (Firestore lives here)
    pub gcp_project_id: String,
    /// Firebase project ID, the audience of identity-provider ID tokens
    pub firebase_project_id: String,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// How long a session token stays valid
    pub session_ttl_hours: u64,
    /// Which rule decides whether a camp is archived
    pub archival_policy: ArchivalPolicy,

    // --- Secrets ---
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
}

impl Config {
    /// Config for tests only.
    pub fn test_default() -> Self {
        Self {
            gcp_project_id: "test-project".to_string(),
            firebase_project_id: "test-project".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
            archival_policy: ArchivalPolicy::ByStartDate,
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honoured for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let gcp_project_id =
            env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string());
        let firebase_project_id =
            env::var("FIREBASE_PROJECT_ID").unwrap_or_else(|_| gcp_project_id.clone());

        let archival_policy = match env::var("ARCHIVAL_POLICY") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("ARCHIVAL_POLICY", raw))?,
            Err(_) => ArchivalPolicy::default(),
        };

        let session_ttl_hours = match env::var("SESSION_TTL_HOURS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|hours| *hours > 0)
                .ok_or(ConfigError::Invalid("SESSION_TTL_HOURS", raw))?,
            Err(_) => DEFAULT_SESSION_TTL_HOURS,
        };

        Ok(Self {
            gcp_project_id,
            firebase_project_id,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            session_ttl_hours,
            archival_policy,

            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
        })
    }

    /// Whether cookies must carry the `Secure` attribute.
    pub fn secure_cookies(&self) -> bool {
        self.frontend_url.starts_with("https://")
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Set required env vars for test
        env::set_var("JWT_SIGNING_KEY", "test_jwt_key_32_bytes_minimum!!");
        env::set_var("GCP_PROJECT_ID", "camps-prod");
        env::remove_var("FIREBASE_PROJECT_ID");
        env::remove_var("ARCHIVAL_POLICY");
        env::remove_var("SESSION_TTL_HOURS");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.gcp_project_id, "camps-prod");
        assert_eq!(config.firebase_project_id, "camps-prod");
        assert_eq!(config.archival_policy, ArchivalPolicy::ByStartDate);
        assert_eq!(config.session_ttl_hours, DEFAULT_SESSION_TTL_HOURS);
        assert_eq!(config.jwt_signing_key, b"test_jwt_key_32_bytes_minimum!!");
    }

    #[test]
    fn test_secure_cookies_follow_frontend_scheme() {
        let mut config = Config::test_default();
        assert!(!config.secure_cookies());

        config.frontend_url = "https://camps.example.com".to_string();
        assert!(config.secure_cookies());
    }
}
