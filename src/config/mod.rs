use crate::core::{AppError, Result};
use std::env;
use std::fmt;

pub mod database;
pub mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Minimum length of the key that signs and encrypts session cookies
pub const MIN_SESSION_SECRET_LEN: usize = 64;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub security: SecurityConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    pub log_format: LogFormat,
    /// Apply migrations and seed demo data on startup
    pub seed_database: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Clone)]
pub struct SecurityConfig {
    pub session_secret: String,
    pub cookie_secure: bool,
    pub rate_limit_per_minute: u32,
    /// Key rate limits on `X-Forwarded-For` rather than the socket peer
    pub trust_proxy_headers: bool,
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("session_secret", &"<redacted>")
            .field("cookie_secure", &self.cookie_secure)
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .field("trust_proxy_headers", &self.trust_proxy_headers)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "debug".to_string()),
                log_format: match env::var("LOG_FORMAT").as_deref() {
                    Ok("json") => LogFormat::Json,
                    _ => LogFormat::Pretty,
                },
                seed_database: parse_bool("SEED_DATABASE", true)?,
            },
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
            security: SecurityConfig {
                session_secret: env::var("SESSION_SECRET")
                    .map_err(|_| AppError::Configuration("SESSION_SECRET not set".to_string()))?,
                cookie_secure: parse_bool("COOKIE_SECURE", true)?,
                rate_limit_per_minute: env::var("RATE_LIMIT_PER_MINUTE")
                    .unwrap_or_else(|_| "600".to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::Configuration("Invalid RATE_LIMIT_PER_MINUTE".to_string())
                    })?,
                trust_proxy_headers: parse_bool("TRUST_PROXY_HEADERS", false)?,
            },
            cors: CorsConfig {
                allowed_origins: parse_list(
                    &env::var("CORS_ALLOWED_ORIGINS")
                        .unwrap_or_else(|_| "https://localhost:3000".to_string()),
                ),
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.security.rate_limit_per_minute == 0 {
            return Err(AppError::Configuration(
                "Rate limit must be greater than 0".to_string(),
            ));
        }

        if self.security.session_secret.len() < MIN_SESSION_SECRET_LEN {
            return Err(AppError::Configuration(format!(
                "SESSION_SECRET must be at least {} bytes",
                MIN_SESSION_SECRET_LEN
            )));
        }

        if self.cors.allowed_origins.is_empty() {
            return Err(AppError::Configuration(
                "At least one CORS origin is required".to_string(),
            ));
        }

        if self.database.max_connections == 0 {
            return Err(AppError::Configuration(
                "DATABASE_MAX_CONNECTIONS must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_bool(key: &str, default: bool) -> Result<bool> {
    match env::var(key) {
        Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(AppError::Configuration(format!("Invalid {}", key))),
        },
        Err(_) => Ok(default),
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
