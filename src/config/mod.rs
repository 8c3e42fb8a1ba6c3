//! Configuration management
//!
//! This module handles loading and parsing configuration for the SwipeNews backend.
//! Configuration can be loaded from:
//! - config.yml file
//! - Environment variables (override file settings)
//!
//! Missing optional values are filled with sensible defaults.

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origin
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_cors_origin() -> String {
    "http://localhost:3000".to_string()
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database path or URL
    #[serde(default = "default_database_url")]
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

fn default_database_url() -> String {
    "data/swipenews.db".to_string()
}

/// Authentication configuration
///
/// Carries the hardcoded admin credential pair and the token signing
/// parameters. The default signing secret matches the upstream fallback
/// and must be overridden in any real deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Admin login email
    #[serde(default = "default_admin_email")]
    pub admin_email: String,
    /// Admin login password
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
    /// Secret used to sign session tokens
    #[serde(default = "default_token_secret")]
    pub token_secret: String,
    /// Token lifetime in days
    #[serde(default = "default_token_ttl_days")]
    pub token_ttl_days: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_email: default_admin_email(),
            admin_password: default_admin_password(),
            token_secret: default_token_secret(),
            token_ttl_days: default_token_ttl_days(),
        }
    }
}

fn default_admin_email() -> String {
    "admin@swipenews.local".to_string()
}

fn default_admin_password() -> String {
    "admin123".to_string()
}

fn default_token_secret() -> String {
    // Insecure fallback kept from the original deployment; override via
    // SWIPENEWS_AUTH_TOKEN_SECRET.
    "fallbacksecret".to_string()
}

fn default_token_ttl_days() -> i64 {
    7
}

/// Error type for configuration parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },
}

impl Config {
    /// Load configuration from file
    ///
    /// If the file doesn't exist, returns default configuration.
    /// If the file exists but is invalid YAML, returns an error with details.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: format_yaml_error(&e),
            })?;

        Ok(config)
    }

    /// Load configuration from file with environment variable overrides
    ///
    /// Environment variables follow the pattern:
    /// - SWIPENEWS_SERVER_HOST
    /// - SWIPENEWS_SERVER_PORT
    /// - SWIPENEWS_SERVER_CORS_ORIGIN
    /// - SWIPENEWS_DATABASE_URL
    /// - SWIPENEWS_AUTH_ADMIN_EMAIL
    /// - SWIPENEWS_AUTH_ADMIN_PASSWORD
    /// - SWIPENEWS_AUTH_TOKEN_SECRET
    /// - SWIPENEWS_AUTH_TOKEN_TTL_DAYS
    pub fn load_with_env(path: &std::path::Path) -> anyhow::Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("SWIPENEWS_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("SWIPENEWS_SERVER_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.server.port = port;
            }
        }
        if let Ok(cors_origin) = std::env::var("SWIPENEWS_SERVER_CORS_ORIGIN") {
            self.server.cors_origin = cors_origin;
        }

        if let Ok(url) = std::env::var("SWIPENEWS_DATABASE_URL") {
            self.database.url = url;
        }

        if let Ok(email) = std::env::var("SWIPENEWS_AUTH_ADMIN_EMAIL") {
            self.auth.admin_email = email;
        }
        if let Ok(password) = std::env::var("SWIPENEWS_AUTH_ADMIN_PASSWORD") {
            self.auth.admin_password = password;
        }
        if let Ok(secret) = std::env::var("SWIPENEWS_AUTH_TOKEN_SECRET") {
            self.auth.token_secret = secret;
        }
        if let Ok(ttl) = std::env::var("SWIPENEWS_AUTH_TOKEN_TTL_DAYS") {
            if let Ok(ttl) = ttl.parse::<i64>() {
                self.auth.token_ttl_days = ttl;
            }
        }
    }
}

/// Format YAML parsing error with location and context
fn format_yaml_error(e: &serde_yaml::Error) -> String {
    if let Some(location) = e.location() {
        format!(
            "at line {}, column {}: {}",
            location.line(),
            location.column(),
            e
        )
    } else {
        e.to_string()
    }
}

// Shared mutex for all config tests that modify environment variables.
#[cfg(test)]
static CONFIG_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        super::CONFIG_ENV_MUTEX
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let path = std::path::Path::new("nonexistent_config.yml");
        let config = Config::load(path).unwrap();

        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.url, "data/swipenews.db");
        assert_eq!(config.auth.token_ttl_days, 7);
    }

    #[test]
    fn test_load_empty_file_returns_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "   ").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.auth.token_secret, "fallbacksecret");
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "server:\n  port: 9000\nauth:\n  admin_email: boss@example.com"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.auth.admin_email, "boss@example.com");
        assert_eq!(config.auth.admin_password, "admin123");
    }

    #[test]
    fn test_load_invalid_yaml_errors() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "server: [not: a: mapping").unwrap();

        let result = Config::load(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_env_overrides() {
        let _guard = lock_env();

        std::env::set_var("SWIPENEWS_SERVER_PORT", "8123");
        std::env::set_var("SWIPENEWS_AUTH_TOKEN_SECRET", "topsecret");
        std::env::set_var("SWIPENEWS_DATABASE_URL", ":memory:");

        let config =
            Config::load_with_env(std::path::Path::new("nonexistent_config.yml")).unwrap();

        std::env::remove_var("SWIPENEWS_SERVER_PORT");
        std::env::remove_var("SWIPENEWS_AUTH_TOKEN_SECRET");
        std::env::remove_var("SWIPENEWS_DATABASE_URL");

        assert_eq!(config.server.port, 8123);
        assert_eq!(config.auth.token_secret, "topsecret");
        assert_eq!(config.database.url, ":memory:");
    }

    #[test]
    fn test_env_override_invalid_port_ignored() {
        let _guard = lock_env();

        std::env::set_var("SWIPENEWS_SERVER_PORT", "not-a-port");
        let config =
            Config::load_with_env(std::path::Path::new("nonexistent_config.yml")).unwrap();
        std::env::remove_var("SWIPENEWS_SERVER_PORT");

        assert_eq!(config.server.port, 5000);
    }
}
