// Configuration module entry point
// Loads layered configuration and holds the per-process application state

mod state;
mod types;

use std::net::SocketAddr;

pub use state::AppState;
pub use types::Config;

/// Default config file name (extension resolved by the `config` crate)
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// Prefix for environment overrides, e.g. `HANDLERS_SERVER__PORT=9000`
const ENV_PREFIX: &str = "HANDLERS";

impl Config {
    /// Load configuration from the default file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// Sources are layered: built-in defaults, then the optional file, then
    /// `HANDLERS_*` environment variables.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the server cannot run with
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        let invalid = |msg: &str| Err(config::ConfigError::Message(msg.to_string()));

        if self.server.port == 0 {
            return invalid("server.port must be > 0");
        }
        if self.server.workers == Some(0) {
            return invalid("server.workers must be >= 1");
        }
        if self.performance.max_connections == Some(0) {
            return invalid("performance.max_connections must be >= 1");
        }
        if self.performance.connection_timeout == 0 {
            return invalid("performance.connection_timeout must be > 0");
        }
        if self.http.max_body_size == 0 {
            return invalid("http.max_body_size must be > 0");
        }
        if self.http.server_name.trim().is_empty() {
            return invalid("http.server_name must not be empty");
        }
        if hyper::header::HeaderValue::from_str(&self.http.server_name).is_err() {
            return invalid("http.server_name is not a valid header value");
        }
        Ok(())
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(config.server.workers.is_none());
        assert_eq!(config.logging.access_log_format, "combined");
        assert_eq!(config.http.max_body_size, 1_048_576);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_socket_addr() {
        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 3000;
        assert_eq!(
            config.get_socket_addr().unwrap(),
            "127.0.0.1:3000".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_invalid_host() {
        let mut config = Config::default();
        config.server.host = "not a host".to_string();
        assert!(config.get_socket_addr().is_err());
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let config = Config::load_from("does-not-exist/handler-demo").unwrap();
        assert_eq!(config.server.port, 8080);
        assert!(config.logging.access_log);
        assert_eq!(config.performance.shutdown_timeout, 10);
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().unwrap_err().to_string().contains("server.port"));

        let mut config = Config::default();
        config.server.workers = Some(0);
        assert!(config.validate().unwrap_err().to_string().contains("server.workers"));

        let mut config = Config::default();
        config.performance.max_connections = Some(0);
        assert!(config
            .validate()
            .unwrap_err()
            .to_string()
            .contains("max_connections"));

        let mut config = Config::default();
        config.http.max_body_size = 0;
        assert!(config.validate().unwrap_err().to_string().contains("max_body_size"));
    }

    #[test]
    fn test_validate_rejects_blank_server_name() {
        let mut config = Config::default();
        config.http.server_name = "  ".to_string();
        assert!(config.validate().is_err());

        config.http.server_name = "bad\nname".to_string();
        assert!(config
            .validate()
            .unwrap_err()
            .to_string()
            .contains("valid header value"));
    }

    #[test]
    fn test_sample_config_file_parses() {
        let config: Config = toml::from_str(include_str!("../../config.toml")).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.http.server_name, "handler-demo/0.1");
        assert!(config.validate().is_ok());
    }
}
