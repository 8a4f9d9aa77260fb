//! Server configuration loaded from the environment.

use std::env;

use crate::auth::jwt::JwtConfig;

/// Runtime configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to, e.g. "0.0.0.0".
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Allowed CORS origins. Empty means allow any origin (dev mode).
    pub cors_origins: Vec<String>,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Directory where uploaded files are stored and served from.
    pub upload_dir: String,
    /// JWT signing configuration.
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to
    /// development defaults. Panics on malformed values since the server
    /// cannot start without a valid configuration.
    pub fn from_env() -> Self {
        let host = env::var("LANCER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("LANCER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .expect("LANCER_PORT must be a valid port number");
        let cors_origins = env::var("LANCER_CORS_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        let request_timeout_secs = env::var("LANCER_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .expect("LANCER_REQUEST_TIMEOUT_SECS must be a number");
        let upload_dir = env::var("LANCER_UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            upload_dir,
            jwt: JwtConfig::from_env(),
        }
    }
}
