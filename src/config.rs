//! Service configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Unset or unparseable optional values
//! fall back to their defaults.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Default Anthropic API base URL.
pub const DEFAULT_API_URL: &str = "https://api.anthropic.com";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Origins allowed in every environment.
const PRODUCTION_ORIGINS: [&str; 2] = [
    "https://jaho5.github.io",
    "https://jaho5.github.io/shot-sequence",
];

/// Origin added when running in development.
const DEVELOPMENT_ORIGIN: &str = "http://localhost:3000";

/// Error raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `LISTEN_ADDR` is set but not a socket address.
    #[error("invalid LISTEN_ADDR {value:?}: {source}")]
    ListenAddr {
        /// Raw value.
        value: String,
        /// Parse failure.
        source: std::net::AddrParseError,
    },

    /// `STORAGE_BACKEND` names an unknown backend.
    #[error("unknown STORAGE_BACKEND {0:?} (expected postgres, sqlite or memory)")]
    StorageBackend(String),

    /// Postgres was requested without a connection string.
    #[error("STORAGE_BACKEND=postgres requires DATABASE_URL")]
    MissingDatabaseUrl,
}

/// Where sequences are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// PostgreSQL at the given connection string.
    Postgres {
        /// Connection string.
        url: String,
    },
    /// SQLite database file.
    Sqlite {
        /// Database file path.
        path: PathBuf,
    },
    /// Process-local map; lost on restart.
    Memory,
}

/// Connection pool and backend selection.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Selected backend.
    pub backend: StorageBackend,
    /// Maximum number of database connections in the pool.
    pub max_connections: u32,
    /// Timeout for acquiring a database connection.
    pub connect_timeout: Duration,
}

/// Generative text API settings.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// API key; generation is disabled when absent.
    pub api_key: Option<String>,
    /// API base URL, without the `/v1/messages` path.
    pub api_url: String,
    /// Model identifier.
    pub model: String,
    /// Upper bound on reply tokens.
    pub max_tokens: u32,
    /// Bound on the whole API round trip.
    pub request_timeout: Duration,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 2000,
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Top-level service configuration.
///
/// Loaded once at startup via [`AppConfig::from_env`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Socket address to bind the HTTP server to.
    pub listen_addr: SocketAddr,
    /// Deployment environment name (`production`, `development`, ...).
    pub environment: String,
    /// Origins allowed by the CORS layer.
    pub cors_origins: Vec<String>,
    /// Storage settings.
    pub storage: StorageConfig,
    /// Generation settings.
    pub generation: GenerationConfig,
    /// Emit logs as JSON lines.
    pub log_json: bool,
}

impl AppConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `LISTEN_ADDR` cannot be parsed, or the
    /// storage backend selection is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_raw = lookup("LISTEN_ADDR").unwrap_or_else(|| "0.0.0.0:8000".to_string());
        let listen_addr: SocketAddr = listen_raw
            .parse()
            .map_err(|source| ConfigError::ListenAddr {
                value: listen_raw.clone(),
                source,
            })?;

        let environment = lookup("ENVIRONMENT")
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| "production".to_string());

        let cors_origins = cors_origins(&environment, lookup("CORS_ALLOWED_ORIGINS").as_deref());

        let storage = StorageConfig {
            backend: storage_backend(&lookup)?,
            max_connections: parse_env(&lookup, "DATABASE_MAX_CONNECTIONS", 10),
            connect_timeout: Duration::from_secs(parse_env(
                &lookup,
                "DATABASE_CONNECT_TIMEOUT_SECS",
                5,
            )),
        };

        let defaults = GenerationConfig::default();
        let generation = GenerationConfig {
            api_key: lookup("ANTHROPIC_API_KEY").filter(|k| !k.trim().is_empty()),
            api_url: lookup("ANTHROPIC_API_URL").unwrap_or(defaults.api_url),
            model: lookup("ANTHROPIC_MODEL").unwrap_or(defaults.model),
            max_tokens: parse_env(&lookup, "GENERATION_MAX_TOKENS", defaults.max_tokens),
            request_timeout: Duration::from_secs(parse_env(
                &lookup,
                "GENERATION_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )),
        };

        let log_json = lookup("LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json"));

        Ok(Self {
            listen_addr,
            environment,
            cors_origins,
            storage,
            generation,
            log_json,
        })
    }
}

/// Selects the backend: an explicit `STORAGE_BACKEND` wins, otherwise
/// Postgres when `DATABASE_URL` is set, otherwise SQLite under `DATA_DIR`.
fn storage_backend<F>(lookup: &F) -> Result<StorageBackend, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let database_url = lookup("DATABASE_URL").filter(|u| !u.trim().is_empty());
    let sqlite_path = || {
        let dir = lookup("DATA_DIR").unwrap_or_else(|| ".".to_string());
        PathBuf::from(dir).join("sequences.db")
    };

    match lookup("STORAGE_BACKEND").map(|b| b.trim().to_lowercase()).as_deref() {
        None | Some("") => Ok(match database_url {
            Some(url) => StorageBackend::Postgres { url },
            None => StorageBackend::Sqlite {
                path: sqlite_path(),
            },
        }),
        Some("postgres") => database_url
            .map(|url| StorageBackend::Postgres { url })
            .ok_or(ConfigError::MissingDatabaseUrl),
        Some("sqlite") => Ok(StorageBackend::Sqlite {
            path: sqlite_path(),
        }),
        Some("memory") => Ok(StorageBackend::Memory),
        Some(other) => Err(ConfigError::StorageBackend(other.to_string())),
    }
}

/// Explicit origins replace the built-in list; development always adds
/// the local frontend.
fn cors_origins(environment: &str, explicit: Option<&str>) -> Vec<String> {
    let mut origins: Vec<String> = match explicit {
        Some(list) if !list.trim().is_empty() => list
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(String::from)
            .collect(),
        _ => PRODUCTION_ORIGINS.iter().map(|o| (*o).to_string()).collect(),
    };
    if environment == "development" && !origins.iter().any(|o| o == DEVELOPMENT_ORIGIN) {
        origins.push(DEVELOPMENT_ORIGIN.to_string());
    }
    origins
}

/// Parses a variable as `T`, returning `default` on missing or invalid
/// values.
fn parse_env<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
