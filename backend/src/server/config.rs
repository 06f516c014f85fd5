//! Process configuration read from the environment.

use std::env;
use std::net::SocketAddr;

/// Configuration failures that abort start-up.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {message}")]
    Invalid {
        name: &'static str,
        message: String,
    },
}

/// Runtime configuration for the server process.
///
/// There is deliberately no fallback for `SESSION_SECRET`: a generated
/// secret would silently invalidate every session on restart, and a
/// hard-coded one would be worse.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub session_secret: String,
    pub bind_addr: SocketAddr,
    pub cookie_secure: bool,
}

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

impl Config {
    /// Load the configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = require("DATABASE_URL")?;
        let session_secret = require("SESSION_SECRET")?;

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr: SocketAddr = bind_addr.parse().map_err(|err| ConfigError::Invalid {
            name: "BIND_ADDR",
            message: format!("{err}"),
        })?;

        let cookie_secure = env::var("SESSION_COOKIE_SECURE")
            .map(|v| v != "0")
            .unwrap_or(true);

        Ok(Self {
            database_url,
            session_secret,
            bind_addr,
            cookie_secure,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}
