use dotenv::{dotenv, from_path};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;
use tracing::{info, warn};

const DEFAULT_DATABASE_PATH: &str = "user_profiles.db";
const DEFAULT_API_HOST: &str = "127.0.0.1";
const DEFAULT_API_PORT: u16 = 8080;
const DEFAULT_LOG_FILTER: &str =
    "user_profile_service=debug,api_server=debug,application=info,domain=debug,infrastructure=info,tower_http=debug";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to load .env file from path {path}: {reason}")]
    EnvFile { path: String, reason: String },

    #[error("Invalid {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Where profiles are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Sqlite,
    Memory,
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sqlite" => Ok(StoreKind::Sqlite),
            "memory" => Ok(StoreKind::Memory),
            other => Err(format!("unknown store '{}', expected sqlite or memory", other)),
        }
    }
}

/// Where the variables behind a `Config` came from; reported by `print_config`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvSource {
    File(PathBuf),
    /// No `.env` was loaded; the reason is what dotenv reported.
    ProcessOnly(String),
    Lookup,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub env_source: EnvSource,
    pub store: StoreKind,
    pub database_path: String,
    pub api_host: String,
    pub api_port: u16,
    pub log_filter: String,
}

impl Config {
    /// Load configuration from a specified `.env` file path or default to the root `.env` file.
    pub fn from_env(env_path: Option<&str>) -> Result<Self, ConfigError> {
        let env_source = match env_path {
            Some(path) => {
                from_path(path).map_err(|e| ConfigError::EnvFile {
                    path: path.to_string(),
                    reason: e.to_string(),
                })?;
                EnvSource::File(PathBuf::from(path))
            }
            None => match dotenv() {
                Ok(path) => EnvSource::File(path),
                Err(e) => EnvSource::ProcessOnly(e.to_string()),
            },
        };

        let mut config = Self::from_lookup(|key| env::var(key).ok())?;
        config.env_source = env_source;
        Ok(config)
    }

    /// Builds a configuration from any key lookup, applying defaults for
    /// unset or empty keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let store = match var("PROFILE_STORE") {
            Some(raw) => raw
                .parse()
                .map_err(|reason| ConfigError::Invalid {
                    key: "PROFILE_STORE",
                    reason,
                })?,
            None => StoreKind::Sqlite,
        };

        let api_port = match var("API_PORT") {
            Some(raw) => raw.trim().parse().map_err(|e| ConfigError::Invalid {
                key: "API_PORT",
                reason: format!("'{}': {}", raw, e),
            })?,
            None => DEFAULT_API_PORT,
        };

        Ok(Config {
            env_source: EnvSource::Lookup,
            store,
            database_path: var("DATABASE_PATH").unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string()),
            api_host: var("API_HOST").unwrap_or_else(|| DEFAULT_API_HOST.to_string()),
            api_port,
            log_filter: var("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }

    pub fn api_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }

    pub fn print_config(&self) {
        info!("📋 Configuration loaded:");
        match &self.env_source {
            EnvSource::File(path) => info!("  📄 Env file: {}", path.display()),
            EnvSource::ProcessOnly(reason) => {
                warn!("  📄 No .env file loaded ({}), using process environment", reason)
            }
            EnvSource::Lookup => {}
        }
        match self.store {
            StoreKind::Sqlite => info!("  🗄️  Database: {}", self.database_path),
            StoreKind::Memory => info!("  🗄️  Database: in-memory (not persisted)"),
        }
        info!("  🌐 API Server: {}", self.api_address());
        info!("  📝 Log filter: {}", self.log_filter);
    }
}
