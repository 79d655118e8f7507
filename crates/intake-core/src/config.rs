//! Configuration module
//!
//! Settings are read from the environment (after loading an optional `.env`
//! file) and validated before the service starts.

use std::collections::HashMap;
use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::constants::MAX_UPLOAD_BYTES;
use crate::store_types::StoreBackend;

const SERVER_PORT: u16 = 8000;
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const HTTP_CONCURRENCY_LIMIT: usize = 1024;

/// Console output format for tracing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" | "text" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(anyhow::anyhow!("Invalid log format: {}", s)),
        }
    }
}

impl Display for LogFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            LogFormat::Compact => write!(f, "compact"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

/// HTTP server settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub log_format: LogFormat,
    pub http_concurrency_limit: usize,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub base: BaseConfig,
    pub store_backend: StoreBackend,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub max_upload_bytes: usize,
}

impl Config {
    /// Load configuration from process environment, reading `.env` first.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        let vars: HashMap<String, String> = env::vars().collect();
        Self::from_vars(&vars)
    }

    /// Build configuration from an explicit variable map.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, anyhow::Error> {
        let var = |key: &str| vars.get(key).map(|s| s.trim().to_string());

        let environment = var("ENVIRONMENT")
            .or_else(|| var("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins: Vec<String> = var("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let log_format = match var("LOG_FORMAT") {
            Some(s) => s.parse()?,
            None => LogFormat::Compact,
        };

        let base = BaseConfig {
            server_port: var("PORT")
                .unwrap_or_else(|| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            log_format,
            http_concurrency_limit: var("HTTP_CONCURRENCY_LIMIT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(HTTP_CONCURRENCY_LIMIT),
        };

        let store_backend = match var("STORE_BACKEND") {
            Some(s) => s.parse()?,
            None => StoreBackend::Postgres,
        };

        let config = Config {
            base,
            store_backend,
            database_url: var("DATABASE_URL").filter(|s| !s.is_empty()),
            db_max_connections: var("DB_MAX_CONNECTIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: var("DB_TIMEOUT_SECONDS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            max_upload_bytes: match var("MAX_UPLOAD_BYTES") {
                Some(s) => s
                    .parse()
                    .map_err(|_| anyhow::anyhow!("MAX_UPLOAD_BYTES must be a valid number"))?,
                None => MAX_UPLOAD_BYTES,
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_upload_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_BYTES cannot be 0"));
        }
        if self.max_upload_bytes > MAX_UPLOAD_BYTES {
            return Err(anyhow::anyhow!(
                "MAX_UPLOAD_BYTES cannot exceed {} (got {})",
                MAX_UPLOAD_BYTES,
                self.max_upload_bytes
            ));
        }

        if self.base.http_concurrency_limit == 0 {
            return Err(anyhow::anyhow!("HTTP_CONCURRENCY_LIMIT cannot be 0"));
        }

        if self.is_production() && self.base.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        match self.store_backend {
            StoreBackend::Postgres => {
                let url = self.database_url.as_deref().ok_or_else(|| {
                    anyhow::anyhow!("DATABASE_URL must be set when using the postgres store")
                })?;
                if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
                    return Err(anyhow::anyhow!(
                        "DATABASE_URL must be a valid PostgreSQL connection string"
                    ));
                }
                if self.db_max_connections == 0 {
                    return Err(anyhow::anyhow!("Database max connections cannot be 0"));
                }
                if self.db_timeout_seconds == 0 {
                    return Err(anyhow::anyhow!("Database timeout cannot be 0"));
                }
            }
            StoreBackend::Memory => {
                if self.is_production() {
                    return Err(anyhow::anyhow!(
                        "STORE_BACKEND=memory cannot be used in production"
                    ));
                }
            }
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.base.environment
    }

    pub fn log_format(&self) -> LogFormat {
        self.base.log_format
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.base.http_concurrency_limit
    }

    pub fn store_backend(&self) -> StoreBackend {
        self.store_backend
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.db_timeout_seconds
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }
}
