//! Configuration Module
//!
//! Loads server configuration from environment variables once at startup.
//! Any missing required value or unparsable value is a `ConfigError`.

use std::env;
use std::time::Duration;

use reqwest::Url;

use crate::error::ConfigError;

/// Environment variable holding the backing engine connection string.
pub const BACKEND_URL_VAR: &str = "UPSTASH_REDIS_URL";

/// Origins allowed when `ALLOWED_ORIGINS` is unset.
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:4200",
    "https://character-keeper.vercel.app",
];

/// Request body limit when `MAX_BODY_BYTES` is unset
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Which backing engine to connect to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendTarget {
    /// Redis (or Redis-compatible) server at the given `redis://`/`rediss://` URL
    Redis(String),
    /// In-process engine, selected with `memory://`
    Memory,
}

impl BackendTarget {
    /// Parses a connection string into a backend target.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidValue {
            name: BACKEND_URL_VAR,
            reason,
        };

        let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
        match url.scheme() {
            "redis" | "rediss" => Ok(BackendTarget::Redis(raw.to_string())),
            "memory" => Ok(BackendTarget::Memory),
            other => Err(invalid(format!("unsupported scheme '{}'", other))),
        }
    }
}

/// Server configuration parameters.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backing engine to use
    pub backend: BackendTarget,
    /// HTTP server port
    pub server_port: u16,
    /// Origins echoed back in CORS responses
    pub allowed_origins: Vec<String>,
    /// Timeout for the fetch proxy's outbound request
    pub fetch_timeout: Duration,
    /// Whether deleting a missing key reports 404
    pub strict_delete: bool,
    /// Expiry sweep interval in seconds (in-process engine only)
    pub cleanup_interval: u64,
    /// Largest accepted request body in bytes
    pub max_body_bytes: usize,
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// # Environment Variables
    /// - `UPSTASH_REDIS_URL` - Backing engine connection string (required)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `ALLOWED_ORIGINS` - Comma-separated CORS allow-list
    /// - `FETCH_TIMEOUT_SECS` - Fetch proxy timeout in seconds (default: 10)
    /// - `STRICT_DELETE` - Report 404 when deleting a missing key (default: false)
    /// - `CLEANUP_INTERVAL` - Expiry sweep frequency in seconds (default: 60)
    /// - `MAX_BODY_BYTES` - Largest accepted request body (default: 10 MiB)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let raw_backend = lookup(BACKEND_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing(BACKEND_URL_VAR))?;
        let backend = BackendTarget::parse(raw_backend.trim())?;

        let server_port = parse_var(&lookup, "SERVER_PORT")?.unwrap_or(defaults.server_port);

        let allowed_origins = match lookup("ALLOWED_ORIGINS") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(String::from)
                .collect(),
            None => defaults.allowed_origins,
        };

        let fetch_timeout = match parse_var::<u64, _>(&lookup, "FETCH_TIMEOUT_SECS")? {
            Some(0) => return Err(positive_required("FETCH_TIMEOUT_SECS")),
            Some(secs) => Duration::from_secs(secs),
            None => defaults.fetch_timeout,
        };

        let strict_delete = parse_var(&lookup, "STRICT_DELETE")?.unwrap_or(defaults.strict_delete);

        let cleanup_interval = match parse_var::<u64, _>(&lookup, "CLEANUP_INTERVAL")? {
            Some(0) => return Err(positive_required("CLEANUP_INTERVAL")),
            Some(secs) => secs,
            None => defaults.cleanup_interval,
        };

        let max_body_bytes = match parse_var::<usize, _>(&lookup, "MAX_BODY_BYTES")? {
            Some(0) => return Err(positive_required("MAX_BODY_BYTES")),
            Some(bytes) => bytes,
            None => defaults.max_body_bytes,
        };

        Ok(Self {
            backend,
            server_port,
            allowed_origins,
            fetch_timeout,
            strict_delete,
            cleanup_interval,
            max_body_bytes,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendTarget::Memory,
            server_port: 8080,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|origin| origin.to_string())
                .collect(),
            fetch_timeout: Duration::from_secs(10),
            strict_delete: false,
            cleanup_interval: 60,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

fn parse_var<T, F>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                name,
                reason: e.to_string(),
            }),
    }
}

fn positive_required(name: &'static str) -> ConfigError {
    ConfigError::InvalidValue {
        name,
        reason: "must be greater than zero".to_string(),
    }
}
