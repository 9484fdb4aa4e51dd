//! Configuration module for whisperbox.

use serde::Deserialize;
use std::path::Path;

use crate::{Result, WhisperError};

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origins.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// JWT secret key (must be set).
    #[serde(default)]
    pub jwt_secret: String,
    /// Access token expiry in seconds.
    #[serde(default = "default_jwt_access_expiry")]
    pub jwt_access_token_expiry_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_jwt_access_expiry() -> u64 {
    86400 // 1 day
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
            jwt_secret: String::new(),
            jwt_access_token_expiry_secs: default_jwt_access_expiry(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/whisperbox.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Email (verification code delivery) configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Whether SMTP delivery is enabled. When false, codes are only logged.
    #[serde(default)]
    pub enabled: bool,
    /// SMTP relay host.
    #[serde(default)]
    pub smtp_host: String,
    /// SMTP relay port (STARTTLS).
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// SMTP username.
    #[serde(default)]
    pub smtp_username: String,
    /// SMTP password.
    #[serde(default)]
    pub smtp_password: String,
    /// From address for verification mails.
    #[serde(default)]
    pub from_address: String,
    /// Verification code lifetime in minutes.
    #[serde(default = "default_code_expiry")]
    pub code_expiry_mins: i64,
}

fn default_smtp_port() -> u16 {
    587
}

fn default_code_expiry() -> i64 {
    60 // 1 hour
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_host: String::new(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_address: String::new(),
            code_expiry_mins: default_code_expiry(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Optional path to a log file (stdout is always used).
    #[serde(default)]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Email configuration.
    #[serde(default)]
    pub email: EmailConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(WhisperError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| WhisperError::Validation(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `WHISPERBOX_JWT_SECRET`: Override the JWT secret key
    /// - `WHISPERBOX_SMTP_PASSWORD`: Override the SMTP password
    /// - `WHISPERBOX_DATABASE_PATH`: Override the database path
    pub fn apply_env_overrides(&mut self) {
        if let Ok(jwt_secret) = std::env::var("WHISPERBOX_JWT_SECRET") {
            if !jwt_secret.is_empty() {
                self.server.jwt_secret = jwt_secret;
            }
        }
        if let Ok(smtp_password) = std::env::var("WHISPERBOX_SMTP_PASSWORD") {
            if !smtp_password.is_empty() {
                self.email.smtp_password = smtp_password;
            }
        }
        if let Ok(db_path) = std::env::var("WHISPERBOX_DATABASE_PATH") {
            if !db_path.is_empty() {
                self.database.path = db_path;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - JWT secret is not set
    /// - Email delivery is enabled but the SMTP relay or from address is missing
    pub fn validate(&self) -> Result<()> {
        if self.server.jwt_secret.is_empty() {
            return Err(WhisperError::Validation(
                "jwt_secret is not set. \
                 Set it in config.toml or via WHISPERBOX_JWT_SECRET environment variable."
                    .to_string(),
            ));
        }
        if self.email.enabled {
            if self.email.smtp_host.is_empty() {
                return Err(WhisperError::Validation(
                    "email delivery is enabled but smtp_host is not set".to_string(),
                ));
            }
            if self.email.from_address.is_empty() {
                return Err(WhisperError::Validation(
                    "email delivery is enabled but from_address is not set".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert!(config.server.cors_origins.is_empty());
        assert!(config.server.jwt_secret.is_empty());
        assert_eq!(config.server.jwt_access_token_expiry_secs, 86400);

        assert_eq!(config.database.path, "data/whisperbox.db");

        assert!(!config.email.enabled);
        assert_eq!(config.email.smtp_port, 587);
        assert!(config.email.smtp_host.is_empty());
        assert!(config.email.from_address.is_empty());
        assert_eq!(config.email.code_expiry_mins, 60);

        assert_eq!(config.logging.level, "info");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 3000
cors_origins = ["http://localhost:3000", "http://localhost:5173"]
jwt_secret = "test-secret-key"
jwt_access_token_expiry_secs = 600

[database]
path = "custom/db.sqlite"

[email]
enabled = true
smtp_host = "smtp.example.com"
smtp_port = 465
smtp_username = "mailer"
smtp_password = "mailer-pass"
from_address = "no-reply@example.com"
code_expiry_mins = 30

[logging]
level = "debug"
file = "custom/logs/app.log"
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.cors_origins.len(), 2);
        assert_eq!(config.server.cors_origins[0], "http://localhost:3000");
        assert_eq!(config.server.cors_origins[1], "http://localhost:5173");
        assert_eq!(config.server.jwt_secret, "test-secret-key");
        assert_eq!(config.server.jwt_access_token_expiry_secs, 600);

        assert_eq!(config.database.path, "custom/db.sqlite");

        assert!(config.email.enabled);
        assert_eq!(config.email.smtp_host, "smtp.example.com");
        assert_eq!(config.email.smtp_port, 465);
        assert_eq!(config.email.smtp_username, "mailer");
        assert_eq!(config.email.smtp_password, "mailer-pass");
        assert_eq!(config.email.from_address, "no-reply@example.com");
        assert_eq!(config.email.code_expiry_mins, 30);

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file.as_deref(), Some("custom/logs/app.log"));
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[server]
port = 3000

[email]
smtp_host = "smtp.partial.example"
"#;

        let config = Config::parse(toml).unwrap();

        // Specified values
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.email.smtp_host, "smtp.partial.example");

        // Default values
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.path, "data/whisperbox.db");
        assert_eq!(config.email.smtp_port, 587);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_empty_config() {
        let toml = "";
        let config = Config::parse(toml).unwrap();

        // All defaults
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.path, "data/whisperbox.db");
    }

    #[test]
    fn test_parse_invalid_config() {
        let toml = "this is not valid toml [[[";
        let result = Config::parse(toml);

        assert!(result.is_err());
        if let Err(WhisperError::Validation(msg)) = result {
            assert!(msg.contains("config parse error"));
        } else {
            panic!("Expected Validation error");
        }
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load("nonexistent.toml");

        assert!(result.is_err());
        assert!(matches!(result, Err(WhisperError::Io(_))));
    }

    #[test]
    fn test_apply_env_overrides_jwt_secret() {
        // Save original value if exists
        let original = std::env::var("WHISPERBOX_JWT_SECRET").ok();

        std::env::set_var("WHISPERBOX_JWT_SECRET", "env-secret-key");

        let mut config = Config::default();
        config.apply_env_overrides();
        assert_eq!(config.server.jwt_secret, "env-secret-key");

        // An empty value must not clobber an explicit setting
        std::env::set_var("WHISPERBOX_JWT_SECRET", "");

        let mut config = Config::default();
        config.server.jwt_secret = "original-secret".to_string();
        config.apply_env_overrides();
        assert_eq!(config.server.jwt_secret, "original-secret");

        // Restore original
        if let Some(val) = original {
            std::env::set_var("WHISPERBOX_JWT_SECRET", val);
        } else {
            std::env::remove_var("WHISPERBOX_JWT_SECRET");
        }
    }

    #[test]
    fn test_apply_env_overrides_smtp_password() {
        let original = std::env::var("WHISPERBOX_SMTP_PASSWORD").ok();

        std::env::set_var("WHISPERBOX_SMTP_PASSWORD", "env-smtp-pass");

        let mut config = Config::default();
        config.apply_env_overrides();
        assert_eq!(config.email.smtp_password, "env-smtp-pass");

        if let Some(val) = original {
            std::env::set_var("WHISPERBOX_SMTP_PASSWORD", val);
        } else {
            std::env::remove_var("WHISPERBOX_SMTP_PASSWORD");
        }
    }

    #[test]
    fn test_apply_env_overrides_database_path() {
        let original = std::env::var("WHISPERBOX_DATABASE_PATH").ok();

        std::env::set_var("WHISPERBOX_DATABASE_PATH", "/tmp/override.db");

        let mut config = Config::default();
        config.apply_env_overrides();
        assert_eq!(config.database.path, "/tmp/override.db");

        if let Some(val) = original {
            std::env::set_var("WHISPERBOX_DATABASE_PATH", val);
        } else {
            std::env::remove_var("WHISPERBOX_DATABASE_PATH");
        }
    }

    #[test]
    fn test_validate_no_secret() {
        let config = Config::default();

        let result = config.validate();
        assert!(result.is_err());
        if let Err(WhisperError::Validation(msg)) = result {
            assert!(msg.contains("jwt_secret"));
        }
    }

    #[test]
    fn test_validate_with_secret() {
        let mut config = Config::default();
        config.server.jwt_secret = "secret".to_string();

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_email_enabled_requires_relay() {
        let mut config = Config::default();
        config.server.jwt_secret = "secret".to_string();
        config.email.enabled = true;

        let result = config.validate();
        assert!(result.is_err());
        if let Err(WhisperError::Validation(msg)) = result {
            assert!(msg.contains("smtp_host"));
        }

        config.email.smtp_host = "smtp.example.com".to_string();
        let result = config.validate();
        assert!(result.is_err());
        if let Err(WhisperError::Validation(msg)) = result {
            assert!(msg.contains("from_address"));
        }

        config.email.from_address = "no-reply@example.com".to_string();
        assert!(config.validate().is_ok());
    }
}
