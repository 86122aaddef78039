//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub storage: StorageConfig,
    pub mail: MailConfig,
    pub rate_limit: RateLimitConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: PathBuf,
}

/// Login session configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Key used to sign session tokens
    pub secret_key: String,
    /// Lifetime of a session token when "remember me" is not ticked (hours)
    #[serde(default = "default_session_expiry_hours")]
    pub expiry_hours: i64,
    /// Lifetime of the persistent cookie when "remember me" is ticked (days)
    #[serde(default = "default_remember_days")]
    pub remember_days: i64,
}

/// Static file and upload configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size_mb: u32,
}

impl StorageConfig {
    /// Directory holding uploaded avatars
    #[must_use]
    pub fn profile_pics_dir(&self) -> PathBuf {
        self.static_dir.join("profile_pics")
    }

    /// Upload cap in bytes
    #[must_use]
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_size_mb as usize * 1024 * 1024
    }
}

/// Outgoing mail configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    #[serde(default = "default_mail_server")]
    pub server: String,
    #[serde(default = "default_mail_port")]
    pub port: u16,
    #[serde(default = "default_mail_use_ssl")]
    pub use_ssl: bool,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

// Default value functions
fn default_app_name() -> String {
    "brevity".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_migrations_dir() -> PathBuf {
    PathBuf::from("./migrations")
}

fn default_session_expiry_hours() -> i64 {
    744 // 31 days
}

fn default_remember_days() -> i64 {
    365
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("./static")
}

fn default_max_upload_size() -> u32 {
    5
}

fn default_mail_server() -> String {
    "smtp.gmail.com".to_string()
}

fn default_mail_port() -> u16 {
    465
}

fn default_mail_use_ssl() -> bool {
    true
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|s| s.parse().ok())
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PORT", raw))?,
            Err(_) => return Err(ConfigError::MissingVar("PORT")),
        };

        let database_url = env::var("DATABASE_URL")
            .or_else(|_| env::var("SQLALCHEMY_DATABASE_URI"))
            .map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?;

        let secret_key =
            env::var("SECRET_KEY").map_err(|_| ConfigError::MissingVar("SECRET_KEY"))?;
        if secret_key.is_empty() {
            return Err(ConfigError::InvalidValue("SECRET_KEY", "empty".to_string()));
        }

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| default_host()),
                port,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: parse_var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(default_max_connections),
                min_connections: parse_var("DATABASE_MIN_CONNECTIONS")
                    .unwrap_or_else(default_min_connections),
                migrations_dir: env::var("DATABASE_MIGRATIONS_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| default_migrations_dir()),
            },
            session: SessionConfig {
                secret_key,
                expiry_hours: parse_var("SESSION_EXPIRY_HOURS")
                    .unwrap_or_else(default_session_expiry_hours),
                remember_days: parse_var("SESSION_REMEMBER_DAYS")
                    .unwrap_or_else(default_remember_days),
            },
            storage: StorageConfig {
                static_dir: env::var("STATIC_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| default_static_dir()),
                max_upload_size_mb: parse_var("MAX_UPLOAD_SIZE_MB")
                    .unwrap_or_else(default_max_upload_size),
            },
            mail: MailConfig {
                server: env::var("MAIL_SERVER").unwrap_or_else(|_| default_mail_server()),
                port: parse_var("MAIL_PORT").unwrap_or_else(default_mail_port),
                use_ssl: parse_var("MAIL_USE_SSL").unwrap_or_else(default_mail_use_ssl),
                username: env::var("EMAIL_USER").ok(),
                password: env::var("EMAIL_PASS").ok(),
            },
            rate_limit: RateLimitConfig {
                requests_per_second: parse_var("RATE_LIMIT_REQUESTS_PER_SECOND")
                    .unwrap_or_else(default_requests_per_second),
                burst: parse_var("RATE_LIMIT_BURST").unwrap_or_else(default_burst),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
