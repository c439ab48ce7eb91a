//! # API Configuration Module
//!
//! Settings for the FitClub API server, read from environment variables.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//! - `CLASS_CAPACITY`: Members allowed per class (default: 5)

use eyre::{eyre, Result, WrapErr};
use fitclub_core::DEFAULT_CLASS_CAPACITY;
use std::env;
use tracing::Level;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    pub class_capacity: i64,
}

impl ApiConfig {
    /// Loads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Fails when `DATABASE_URL` is missing or when `API_PORT` or
    /// `CLASS_CAPACITY` hold invalid values.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ApiConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Network settings
        let host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("API_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        let database_url =
            lookup("DATABASE_URL").ok_or_else(|| eyre!("DATABASE_URL environment variable must be set"))?;

        let log_level = match lookup("LOG_LEVEL")
            .unwrap_or_else(|| "info".to_string())
            .to_lowercase()
            .as_str()
        {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        let cors_origins = lookup("API_CORS_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        let request_timeout = lookup("API_REQUEST_TIMEOUT_SECONDS")
            .and_then(|value| value.parse().ok())
            .unwrap_or(30);

        let class_capacity = match lookup("CLASS_CAPACITY") {
            Some(value) => value.parse().wrap_err("Invalid CLASS_CAPACITY value")?,
            None => DEFAULT_CLASS_CAPACITY,
        };
        if class_capacity < 1 {
            return Err(eyre!("CLASS_CAPACITY must be at least 1"));
        }

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            class_capacity,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
