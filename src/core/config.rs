//! 应用配置
//!
//! Values come from an optional TOML file named by `APP_CONFIG`, then from
//! individual environment variables. Everything has a default so the server
//! starts inside the compose stack without any setup.

use serde::{Deserialize, Serialize};
use sqlx::mysql::MySqlConnectOptions;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Name of the variable pointing at an optional TOML config file
pub const CONFIG_FILE_VAR: &str = "APP_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 顶层配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// HTTP 监听配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (APP_HOST)
    #[serde(default = "default_host")]
    pub host: String,
    /// Listen port (APP_PORT)
    #[serde(default = "default_port")]
    pub port: u16,
}

/// MySQL 连接配置
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_host")]
    pub host: String,
    #[serde(default = "default_db_port")]
    pub port: u16,
    #[serde(default = "default_db_user")]
    pub user: String,
    #[serde(default = "default_db_password")]
    pub password: String,
    #[serde(default = "default_db_name")]
    pub database: String,
    /// Upper bound on connecting, and on a whole probe round trip, in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_db_host() -> String {
    "db".to_string()
}

fn default_db_port() -> u16 {
    3306
}

fn default_db_user() -> String {
    "mysql".to_string()
}

fn default_db_password() -> String {
    "mysql".to_string()
}

fn default_db_name() -> String {
    "mysql".to_string()
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_max_connections() -> u32 {
    5
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_db_host(),
            port: default_db_port(),
            user: default_db_user(),
            password: default_db_password(),
            database: default_db_name(),
            connect_timeout_secs: default_connect_timeout(),
            max_connections: default_max_connections(),
        }
    }
}

// Keeps the password out of logs.
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Connection URL with the password masked, for log lines
    pub fn display_url(&self) -> String {
        format!(
            "mysql://{}:***@{}:{}/{}",
            self.user, self.host, self.port, self.database
        )
    }

    fn apply_overrides<F>(&mut self, lookup: &F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("MYSQL_HOST") {
            self.host = v;
        }
        if let Some(v) = lookup("MYSQL_PORT") {
            self.port = parse_value("MYSQL_PORT", v)?;
        }
        if let Some(v) = lookup("MYSQL_USER") {
            self.user = v;
        }
        if let Some(v) = lookup("MYSQL_PASSWORD") {
            self.password = v;
        }
        if let Some(v) = lookup("MYSQL_DATABASE") {
            self.database = v;
        }
        if let Some(v) = lookup("MYSQL_CONNECT_TIMEOUT") {
            self.connect_timeout_secs = parse_value("MYSQL_CONNECT_TIMEOUT", v)?;
        }
        Ok(())
    }
}

impl AppConfig {
    /// Loads the config file named by `APP_CONFIG` (if any), then applies
    /// environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = match std::env::var(CONFIG_FILE_VAR) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Applies overrides from `lookup`, which maps a variable name to its value.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("APP_HOST") {
            self.server.host = v;
        }
        if let Some(v) = lookup("APP_PORT") {
            self.server.port = parse_value("APP_PORT", v)?;
        }
        self.database.apply_overrides(&lookup)?;
        Ok(self)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

pub(crate) fn parse_value<T>(key: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    let parsed = value.trim().parse::<T>();
    parsed.map_err(|e| ConfigError::InvalidValue {
        key,
        reason: e.to_string(),
        value,
    })
}
