//! Server configuration loaded from environment variables.

use std::path::PathBuf;

use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};

pub const DEFAULT_PORT: u16 = 3000;

/// Runtime configuration for the HTTP server.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Listen port (from NEBULA_TASKS_PORT)
    pub port: u16,
    /// SQLite file path (from NEBULA_TASKS_DB); None uses the platform
    /// data directory
    pub db_path: Option<PathBuf>,
    /// Allowed CORS origins (from NEBULA_TASKS_CORS_ORIGINS, comma-separated);
    /// None means permissive
    pub cors_origins: Option<Vec<String>>,
}

impl ServerConfig {
    /// Load configuration from environment variables. Unset or unparsable
    /// values fall back to the local defaults.
    pub fn from_env() -> Self {
        let port = std::env::var("NEBULA_TASKS_PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let db_path = std::env::var("NEBULA_TASKS_DB").ok().map(PathBuf::from);

        let cors_origins = std::env::var("NEBULA_TASKS_CORS_ORIGINS")
            .ok()
            .map(|s| s.split(',').map(|s| s.trim().to_string()).collect());

        Self {
            port,
            db_path,
            cors_origins,
        }
    }

    /// Create a config with local-development defaults (also used by tests).
    pub fn local() -> Self {
        Self {
            port: DEFAULT_PORT,
            db_path: None,
            cors_origins: None,
        }
    }

    /// Create a config with specific CORS origins.
    pub fn with_cors_origins(origins: Vec<String>) -> Self {
        Self {
            cors_origins: Some(origins),
            ..Self::local()
        }
    }

    /// CORS layer for the router: a specific origin list when configured,
    /// otherwise permissive. Origins that are not valid header values are
    /// skipped.
    pub fn cors_layer(&self) -> CorsLayer {
        match &self.cors_origins {
            Some(origins) => {
                let origins: Vec<HeaderValue> =
                    origins.iter().filter_map(|o| o.parse().ok()).collect();
                CorsLayer::new()
                    .allow_origin(origins)
                    .allow_methods(Any)
                    .allow_headers(Any)
            }
            None => CorsLayer::permissive(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::local()
    }
}
