//! Runtime configuration
//!
//! Everything comes from environment variables. A `.env` file in the working
//! directory is read first when present.

use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Deployment environment, from `APP_ENV`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        *self == Self::Production
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(name: &str) -> Result<Self, ()> {
        if name.eq_ignore_ascii_case("production") {
            Ok(Self::Production)
        } else if name.eq_ignore_ascii_case("staging") {
            Ok(Self::Staging)
        } else if name.eq_ignore_ascii_case("development") {
            Ok(Self::Development)
        } else {
            Err(())
        }
    }
}

/// Listener address
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Apply pending migrations on startup
    pub run_migrations: bool,
    pub migrations_dir: String,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Seconds; only used when this process mints tokens
    pub access_token_expiry: i64,
}

/// Per-client token bucket
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub requests_per_second: u32,
    pub burst: u32,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub request_timeout_secs: u64,
}

impl HttpConfig {
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

/// Variable lookup, so loading can run against a fixed map in tests
struct Vars<F>(F);

impl<F: Fn(&str) -> Option<String>> Vars<F> {
    fn text(&self, name: &'static str, fallback: &str) -> String {
        (self.0)(name).unwrap_or_else(|| fallback.to_string())
    }

    fn require(&self, name: &'static str) -> Result<String, ConfigError> {
        (self.0)(name).ok_or(ConfigError::MissingVar(name))
    }

    fn parsed<T: FromStr>(&self, name: &'static str) -> Result<Option<T>, ConfigError> {
        (self.0)(name)
            .map(|raw| {
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue(name, raw.clone()))
            })
            .transpose()
    }

    fn parsed_or<T: FromStr>(&self, name: &'static str, fallback: T) -> Result<T, ConfigError> {
        Ok(self.parsed(name)?.unwrap_or(fallback))
    }

    fn list(&self, name: &'static str) -> Vec<String> {
        (self.0)(name)
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl AppConfig {
    /// Load from the process environment
    ///
    /// # Errors
    /// A required variable is missing or a set variable does not parse
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let vars = Vars(lookup);

        Ok(Self {
            app: AppSettings {
                name: vars.text("APP_NAME", "feed-server"),
                env: vars.parsed_or("APP_ENV", Environment::Development)?,
            },
            api: ServerConfig {
                host: vars.text("API_HOST", "127.0.0.1"),
                port: vars
                    .parsed("API_PORT")?
                    .ok_or(ConfigError::MissingVar("API_PORT"))?,
            },
            database: DatabaseConfig {
                url: vars.require("DATABASE_URL")?,
                max_connections: vars.parsed_or("DATABASE_MAX_CONNECTIONS", 20)?,
                min_connections: vars.parsed_or("DATABASE_MIN_CONNECTIONS", 5)?,
                run_migrations: vars.parsed_or("DATABASE_RUN_MIGRATIONS", true)?,
                migrations_dir: vars.text("DATABASE_MIGRATIONS_DIR", "crates/feed-db/migrations"),
            },
            jwt: JwtConfig {
                secret: vars.require("JWT_SECRET")?,
                access_token_expiry: vars.parsed_or("JWT_ACCESS_TOKEN_EXPIRY", 3600)?,
            },
            rate_limit: RateLimitConfig {
                requests_per_second: vars.parsed_or("RATE_LIMIT_REQUESTS_PER_SECOND", 10)?,
                burst: vars.parsed_or("RATE_LIMIT_BURST", 50)?,
            },
            cors: CorsConfig {
                allowed_origins: vars.list("CORS_ALLOWED_ORIGINS"),
            },
            http: HttpConfig {
                request_timeout_secs: vars.parsed_or("REQUEST_TIMEOUT_SECS", 30)?,
            },
        })
    }
}
