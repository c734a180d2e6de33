// Configuration module entry point
// Loads layered configuration and owns the shared application state

mod state;
mod types;

use std::net::SocketAddr;
use std::time::Duration;

use crate::error::ServerError;

// Re-export public types
pub use state::AppState;
pub use types::{Config, CorsConfig, HealthConfig, LoggingConfig};

/// Prefix for nested overrides, e.g. `DICT_SERVER__PORT`
const ENV_PREFIX: &str = "DICT";

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "config.toml" when no path specified
    ///
    /// Precedence, lowest first: built-in defaults, the file, `DICT_*`
    /// variables, then the plain `PORT` and `ALLOWED_ORIGIN` variables.
    pub fn load_from(config_path: &str) -> Result<Self, ServerError> {
        Self::load_layered(
            config_path,
            prefixed_environment(),
            std::env::var("PORT").ok(),
            std::env::var("ALLOWED_ORIGIN").ok(),
        )
    }

    fn load_layered(
        config_path: &str,
        environment: config::Environment,
        port: Option<String>,
        allowed_origin: Option<String>,
    ) -> Result<Self, ServerError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(environment)
            .set_override_option("server.port", port)?
            .set_override_option("cors.allowed_origin", allowed_origin)?
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, ServerError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|source| ServerError::InvalidAddress { addr, source })
    }

    pub const fn header_read_timeout(&self) -> Duration {
        Duration::from_millis(self.performance.header_read_timeout_ms)
    }

    pub const fn body_read_timeout(&self) -> Duration {
        Duration::from_millis(self.performance.body_read_timeout_ms)
    }

    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.performance.shutdown_timeout_ms)
    }
}

fn prefixed_environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.cors.allow_methods, "GET, POST, OPTIONS");
        assert_eq!(cfg.cors.allow_headers, "Content-Type");
        assert!(cfg.health.enabled);
        assert!(cfg.messages.file.is_none());
        assert_eq!(cfg.body_read_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_socket_addr() {
        let mut cfg = Config::default();
        cfg.server.host = "127.0.0.1".to_string();
        cfg.server.port = 4000;
        assert_eq!(cfg.get_socket_addr().unwrap(), "127.0.0.1:4000".parse().unwrap());

        cfg.server.host = "not a host".to_string();
        assert!(matches!(
            cfg.get_socket_addr(),
            Err(ServerError::InvalidAddress { .. })
        ));
    }

    fn write_config(dir: &tempfile::TempDir, content: &str) -> String {
        let path = dir.path().join("dict");
        std::fs::write(path.with_extension("toml"), content).unwrap();
        path.to_str().unwrap().to_string()
    }

    fn environment_from(vars: &[(&str, &str)]) -> config::Environment {
        let mut source = config::Map::new();
        for (key, value) in vars {
            source.insert((*key).to_string(), (*value).to_string());
        }
        prefixed_environment().source(Some(source))
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[server]\nport = 4567\n\n[logging]\naccess_log = false\n");

        let cfg = Config::load_layered(&path, environment_from(&[]), None, None).unwrap();
        assert_eq!(cfg.server.port, 4567);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert!(!cfg.logging.access_log);
        assert_eq!(cfg.http.max_body_size, types::HttpConfig::default().max_body_size);
        assert_eq!(cfg.shutdown_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_prefixed_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[health]\npath = \"/from-file\"\n");

        let env = environment_from(&[
            ("DICT_HEALTH__PATH", "/from-env"),
            ("DICT_PERFORMANCE__HEADER_READ_TIMEOUT_MS", "500"),
            ("UNRELATED_PORT", "1"),
        ]);
        let cfg = Config::load_layered(&path, env, None, None).unwrap();
        assert_eq!(cfg.health.path, "/from-env");
        assert_eq!(cfg.header_read_timeout(), Duration::from_millis(500));
        assert_eq!(cfg.server.port, 3000);
    }

    #[test]
    fn test_plain_variables_win() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[server]\nport = 4567\n");

        let env = environment_from(&[("DICT_SERVER__PORT", "5000")]);
        let cfg = Config::load_layered(&path, env, Some("8081".into()), Some("*".into())).unwrap();
        assert_eq!(cfg.server.port, 8081);
        assert_eq!(cfg.cors.allowed_origin, "*");
    }
}
