//! API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// HTTP port to bind
    pub port: u16,

    /// Maximum concurrent bill sessions held in memory.
    /// The oldest session is evicted when the cap is reached.
    pub max_sessions: usize,

    /// CORS origin allowed to call the API ("*" during development)
    pub cors_origin: String,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ApiConfig {
            port: env::var("TAB_API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("TAB_API_PORT".to_string()))?,

            max_sessions: env::var("TAB_API_MAX_SESSIONS")
                .unwrap_or_else(|_| "1024".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("TAB_API_MAX_SESSIONS".to_string()))?,

            cors_origin: env::var("TAB_API_CORS_ORIGIN").unwrap_or_else(|_| "*".to_string()),
        };

        if config.max_sessions == 0 {
            return Err(ConfigError::InvalidValue(
                "TAB_API_MAX_SESSIONS".to_string(),
            ));
        }

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        // Only touch vars this test owns; default path must succeed
        env::remove_var("TAB_API_PORT");
        env::remove_var("TAB_API_MAX_SESSIONS");
        let config = ApiConfig::load().unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.max_sessions, 1024);
    }
}
