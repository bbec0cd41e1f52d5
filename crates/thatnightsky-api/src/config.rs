use std::env;

/// Default port for the HTTP server
pub const DEFAULT_PORT: u16 = 3001;

/// Default allowed browser origin
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// API server configuration loaded from environment variables
///
/// Chart settings live in [`LayeredConfig`](thatnightsky_core::config::LayeredConfig);
/// this only covers the listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub port: u16,
    pub cors_origin: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(port) = env::var("THATNIGHTSKY_PORT") {
            match port.parse() {
                Ok(port) => config.port = port,
                Err(_) => tracing::warn!(value = %port, "Invalid THATNIGHTSKY_PORT, using default"),
            }
        }

        if let Ok(origin) = env::var("THATNIGHTSKY_CORS_ORIGIN") {
            if !origin.trim().is_empty() {
                config.cors_origin = origin.trim().to_string();
            }
        }

        config
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        env::remove_var("THATNIGHTSKY_PORT");
        env::remove_var("THATNIGHTSKY_CORS_ORIGIN");
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = ApiConfig::from_env();
        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.bind_address(), "0.0.0.0:3001");
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        env::set_var("THATNIGHTSKY_PORT", "8080");
        env::set_var("THATNIGHTSKY_CORS_ORIGIN", "https://sky.example");

        let config = ApiConfig::from_env();
        assert_eq!(config.port, 8080);
        assert_eq!(config.cors_origin, "https://sky.example");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_port_is_ignored() {
        clear_env();
        env::set_var("THATNIGHTSKY_PORT", "not-a-port");

        assert_eq!(ApiConfig::from_env().port, DEFAULT_PORT);
        clear_env();
    }
}
