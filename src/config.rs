//! Configuration module
//!
//! Builds one explicit `Config` value at startup. Database credentials come
//! from a mounted JSON secret file when one is present (deployments mount it
//! at /etc/secrets/db.json), from environment variables otherwise.

use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgSslMode};

/// Path deployments mount the database secret at.
const DEFAULT_SECRET_PATH: &str = "/etc/secrets/db.json";

/// Database connection settings
///
/// Field names mirror the keys of the mounted secret file.
#[derive(Debug, Clone, Deserialize)]
pub struct DbConfig {
    #[serde(rename = "DB_USER")]
    pub user: String,

    #[serde(rename = "DB_PASSWORD")]
    pub password: String,

    #[serde(rename = "DB_HOST")]
    pub host: String,

    /// Secret files sometimes carry the port as a string.
    #[serde(rename = "DB_PORT", deserialize_with = "de_port")]
    pub port: u16,

    #[serde(rename = "DB_NAME")]
    pub name: String,

    #[serde(rename = "DB_SSLMODE", default = "default_sslmode")]
    pub sslmode: String,
}

impl DbConfig {
    /// Load database settings from a mounted JSON secret file
    pub fn from_secret_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| ConfigError::ParseFile {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load database settings from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let user = env::var("DB_USER").map_err(|_| ConfigError::MissingEnv("DB_USER"))?;
        let password =
            env::var("DB_PASSWORD").map_err(|_| ConfigError::MissingEnv("DB_PASSWORD"))?;
        let host = env::var("DB_HOST").map_err(|_| ConfigError::MissingEnv("DB_HOST"))?;

        let port = env::var("DB_PORT")
            .unwrap_or_else(|_| "5432".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("DB_PORT"))?;

        let name = env::var("DB_NAME").map_err(|_| ConfigError::MissingEnv("DB_NAME"))?;

        let sslmode = env::var("DB_SSLMODE").unwrap_or_else(|_| default_sslmode());

        Ok(Self {
            user,
            password,
            host,
            port,
            name,
            sslmode,
        })
    }

    /// Field-wise connection options for the pool factory
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        let ssl_mode = self
            .sslmode
            .parse::<PgSslMode>()
            .map_err(|_| ConfigError::InvalidValue("DB_SSLMODE"))?;

        Ok(PgConnectOptions::new()
            .username(&self.user)
            .password(&self.password)
            .host(&self.host)
            .port(self.port)
            .database(&self.name)
            .ssl_mode(ssl_mode))
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection settings
    pub db: DbConfig,

    /// Maximum database connections in pool
    pub database_max_connections: u32,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from the secret file or the environment
    pub fn load() -> Result<Self, ConfigError> {
        let db = match secret_file_path() {
            Some(path) => DbConfig::from_secret_file(&path)?,
            None => DbConfig::from_env()?,
        };

        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS"))?;

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        Ok(Self {
            db,
            database_max_connections,
            host,
            port,
        })
    }
}

/// Resolve the secret file to use, if any. DB_CONFIG_FILE overrides the
/// conventional mount path.
fn secret_file_path() -> Option<PathBuf> {
    if let Ok(path) = env::var("DB_CONFIG_FILE") {
        return Some(PathBuf::from(path));
    }

    let default = Path::new(DEFAULT_SECRET_PATH);
    if default.exists() {
        return Some(default.to_path_buf());
    }

    None
}

fn default_sslmode() -> String {
    "require".to_string()
}

fn de_port<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PortValue {
        Number(u16),
        Text(String),
    }

    match PortValue::deserialize(deserializer)? {
        PortValue::Number(port) => Ok(port),
        PortValue::Text(raw) => raw.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for {0}")]
    InvalidValue(&'static str),

    #[error("Failed to read config file {path}: {source}")]
    ReadFile {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ParseFile {
        path: String,
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_config_from_secret_json() {
        let raw = r#"{
            "DB_USER": "events_app",
            "DB_PASSWORD": "hunter2",
            "DB_HOST": "db.internal",
            "DB_PORT": "5432",
            "DB_NAME": "events",
            "DB_SSLMODE": "disable"
        }"#;

        let config: DbConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.user, "events_app");
        assert_eq!(config.port, 5432);
        assert_eq!(config.sslmode, "disable");
    }

    #[test]
    fn test_db_config_port_as_number() {
        let raw = r#"{
            "DB_USER": "u",
            "DB_PASSWORD": "p",
            "DB_HOST": "h",
            "DB_PORT": 6432,
            "DB_NAME": "n"
        }"#;

        let config: DbConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.port, 6432);
    }

    #[test]
    fn test_db_config_sslmode_defaults_to_require() {
        let raw = r#"{
            "DB_USER": "u",
            "DB_PASSWORD": "p",
            "DB_HOST": "h",
            "DB_PORT": "5432",
            "DB_NAME": "n"
        }"#;

        let config: DbConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.sslmode, "require");
    }

    #[test]
    fn test_connect_options_rejects_bad_sslmode() {
        let config = DbConfig {
            user: "u".to_string(),
            password: "p".to_string(),
            host: "h".to_string(),
            port: 5432,
            name: "n".to_string(),
            sslmode: "sometimes".to_string(),
        };

        assert!(config.connect_options().is_err());
    }
}
