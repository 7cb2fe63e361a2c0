//! Configuration module for ProTicket auth.

use serde::Deserialize;
use std::path::Path;

use crate::{AppError, Result};

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
    /// Maximum number of pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection (and for SQLite locks).
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
}

fn default_db_path() -> String {
    "data/proticket-auth.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout() -> u64 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/proticket-auth.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Locale configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LocaleConfig {
    /// Language code for user-facing messages (en / es).
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
        }
    }
}

/// Password hashing and account provisioning configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Argon2 memory cost in KiB.
    #[serde(default = "default_argon2_memory")]
    pub argon2_memory_kib: u32,
    /// Argon2 time cost (iterations).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,
    /// Argon2 parallelism (lanes).
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,
    /// Roles inserted at startup if they do not exist yet.
    #[serde(default = "default_seed_roles")]
    pub seed_roles: Vec<String>,
}

fn default_argon2_memory() -> u32 {
    65536 // 64 MB
}

fn default_argon2_iterations() -> u32 {
    3
}

fn default_argon2_parallelism() -> u32 {
    4
}

fn default_seed_roles() -> Vec<String> {
    vec![
        "customer".to_string(),
        "organizer".to_string(),
        "admin".to_string(),
    ]
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            argon2_memory_kib: default_argon2_memory(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
            seed_roles: default_seed_roles(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Locale configuration.
    #[serde(default)]
    pub locale: LocaleConfig,
    /// Auth configuration.
    #[serde(default)]
    pub auth: AuthConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(AppError::Io)?;
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
        toml::from_str(s).map_err(|e| AppError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `PROTICKET_DATABASE_PATH`: Override the database file path
    pub fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("PROTICKET_DATABASE_PATH") {
            if !path.is_empty() {
                self.database.path = path;
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        let auth = &self.auth;
        if auth.argon2_memory_kib == 0 || auth.argon2_iterations == 0 || auth.argon2_parallelism == 0
        {
            return Err(AppError::Config(
                "argon2 memory, iteration and parallelism costs must be non-zero".to_string(),
            ));
        }
        if auth.seed_roles.iter().any(|r| r.trim().is_empty()) {
            return Err(AppError::Config(
                "seed_roles must not contain empty role names".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(AppError::Config(
                "database.max_connections must be at least 1".to_string(),
            ));
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

        assert_eq!(config.database.path, "data/proticket-auth.db");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.database.acquire_timeout_secs, 5);

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, "logs/proticket-auth.log");

        assert_eq!(config.locale.language, "en");

        assert_eq!(config.auth.argon2_memory_kib, 65536);
        assert_eq!(config.auth.argon2_iterations, 3);
        assert_eq!(config.auth.argon2_parallelism, 4);
        assert_eq!(
            config.auth.seed_roles,
            vec!["customer", "organizer", "admin"]
        );
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[database]
path = "custom/auth.sqlite"
max_connections = 10
acquire_timeout_secs = 2

[logging]
level = "debug"
file = "custom/logs/auth.log"

[locale]
language = "es"

[auth]
argon2_memory_kib = 19456
argon2_iterations = 2
argon2_parallelism = 1
seed_roles = ["customer", "staff"]
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.database.path, "custom/auth.sqlite");
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.database.acquire_timeout_secs, 2);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, "custom/logs/auth.log");
        assert_eq!(config.locale.language, "es");
        assert_eq!(config.auth.argon2_memory_kib, 19456);
        assert_eq!(config.auth.argon2_iterations, 2);
        assert_eq!(config.auth.argon2_parallelism, 1);
        assert_eq!(config.auth.seed_roles, vec!["customer", "staff"]);
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[auth]
argon2_iterations = 5
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.auth.argon2_iterations, 5);
        assert_eq!(config.auth.argon2_memory_kib, 65536);
        assert_eq!(config.database.path, "data/proticket-auth.db");
        assert_eq!(config.locale.language, "en");
    }

    #[test]
    fn test_parse_empty_config() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.database.path, "data/proticket-auth.db");
        assert_eq!(config.auth.seed_roles.len(), 3);
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = Config::parse("this is not valid toml [[[");

        assert!(result.is_err());
        if let Err(AppError::Config(msg)) = result {
            assert!(msg.contains("config parse error"));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load("nonexistent.toml");

        assert!(matches!(result, Err(AppError::Io(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[locale]\nlanguage = \"es\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.locale.language, "es");
    }

    #[test]
    fn test_apply_env_overrides_database_path() {
        let original = std::env::var("PROTICKET_DATABASE_PATH").ok();

        std::env::set_var("PROTICKET_DATABASE_PATH", "env/override.db");
        let mut config = Config::default();
        config.apply_env_overrides();
        assert_eq!(config.database.path, "env/override.db");

        std::env::set_var("PROTICKET_DATABASE_PATH", "");
        let mut config = Config::default();
        config.apply_env_overrides();
        // Empty values do not override
        assert_eq!(config.database.path, "data/proticket-auth.db");

        if let Some(val) = original {
            std::env::set_var("PROTICKET_DATABASE_PATH", val);
        } else {
            std::env::remove_var("PROTICKET_DATABASE_PATH");
        }
    }

    #[test]
    fn test_validate_default() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_argon2_cost() {
        let mut config = Config::default();
        config.auth.argon2_iterations = 0;

        let result = config.validate();
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_validate_empty_seed_role() {
        let mut config = Config::default();
        config.auth.seed_roles.push("  ".to_string());

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_connections() {
        let mut config = Config::default();
        config.database.max_connections = 0;

        assert!(config.validate().is_err());
    }
}
