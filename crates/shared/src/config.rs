//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtSettings,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Message returned by the ping endpoint.
    #[serde(default = "default_ping_message")]
    pub ping_message: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            ping_message: default_ping_message(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_ping_message() -> String {
    "ping".to_string()
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT settings as read from configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Session token lifetime in hours.
    #[serde(default = "default_token_expiry_hours")]
    pub token_expiry_hours: i64,
}

fn default_token_expiry_hours() -> i64 {
    24
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `TRACKER__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TRACKER").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("TRACKER__DATABASE__URL", Some("postgres://localhost/tracker_test")),
                ("TRACKER__JWT__SECRET", Some("env-secret")),
                ("TRACKER__SERVER__PORT", Some("9090")),
                ("RUN_MODE", Some("nonexistent-mode")),
            ],
            || {
                let config = AppConfig::load().expect("config should load");
                assert_eq!(config.database.url, "postgres://localhost/tracker_test");
                assert_eq!(config.jwt.secret, "env-secret");
                assert_eq!(config.server.port, 9090);
            },
        );
    }

    #[test]
    fn test_defaults_apply() {
        temp_env::with_vars(
            [
                ("TRACKER__DATABASE__URL", Some("postgres://localhost/tracker_test")),
                ("TRACKER__JWT__SECRET", Some("env-secret")),
                ("TRACKER__SERVER__PORT", None),
                ("TRACKER__JWT__TOKEN_EXPIRY_HOURS", None),
                ("RUN_MODE", Some("nonexistent-mode")),
            ],
            || {
                let config = AppConfig::load().expect("config should load");
                assert_eq!(config.server.host, "0.0.0.0");
                assert_eq!(config.server.port, 8080);
                assert_eq!(config.server.ping_message, "ping");
                assert_eq!(config.jwt.token_expiry_hours, 24);
                assert_eq!(config.database.max_connections, 10);
                assert_eq!(config.database.min_connections, 1);
            },
        );
    }

    #[test]
    fn test_missing_secret_fails() {
        temp_env::with_vars(
            [
                ("TRACKER__DATABASE__URL", Some("postgres://localhost/tracker_test")),
                ("TRACKER__JWT__SECRET", None::<&str>),
                ("RUN_MODE", Some("nonexistent-mode")),
            ],
            || {
                assert!(AppConfig::load().is_err());
            },
        );
    }
}
