//! Server configuration module.
//!
//! Configuration is loaded from environment variables. The record-store
//! location is required: startup fails fast with a diagnostic naming the
//! variable rather than limping along against a store that isn't there.

use std::env;

/// Environment variable naming the record-store location (SQLite path).
pub const ENV_DB_PATH: &str = "SALESPRO_DB_PATH";

/// Environment variable for the HTTP bind address.
pub const ENV_BIND_ADDR: &str = "SALESPRO_BIND_ADDR";

/// Default bind address when none is configured.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Record-store location (SQLite database path). Required.
    pub db_path: String,

    /// Address the HTTP server binds to.
    pub bind_addr: String,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// ## Errors
    /// [`ConfigError::MissingRequired`] when `SALESPRO_DB_PATH` is absent or
    /// empty; there is deliberately no development default for the store
    /// location.
    pub fn from_env() -> Result<Self, ConfigError> {
        let db_path = env::var(ENV_DB_PATH)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingRequired(ENV_DB_PATH))?;

        let bind_addr = env::var(ENV_BIND_ADDR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        Ok(ServerConfig { db_path, bind_addr })
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {0} (set it to the record-store location)")]
    MissingRequired(&'static str),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Single test so the env mutations don't race across test threads.
    #[test]
    fn test_from_env() {
        env::remove_var(ENV_DB_PATH);
        env::remove_var(ENV_BIND_ADDR);
        assert!(matches!(
            ServerConfig::from_env(),
            Err(ConfigError::MissingRequired(ENV_DB_PATH))
        ));

        env::set_var(ENV_DB_PATH, "/tmp/salespro.db");
        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config.db_path, "/tmp/salespro.db");
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);

        env::set_var(ENV_BIND_ADDR, "0.0.0.0:9000");
        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:9000");

        env::remove_var(ENV_DB_PATH);
        env::remove_var(ENV_BIND_ADDR);
    }
}
