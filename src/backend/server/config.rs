/**
 * Server Configuration
 *
 * Everything the server reads from its environment. `from_env` is called
 * once by the binary after `.env` is loaded; tests build a
 * `ServerConfig::default()` and adjust fields directly.
 *
 * # Variables
 *
 * | Variable              | Default          |
 * |-----------------------|------------------|
 * | `HOST`                | `0.0.0.0`        |
 * | `PORT`                | `5000`           |
 * | `APP_ENV`             | `development`    |
 * | `JWT_SECRET`          | dev-only secret  |
 * | `TOKEN_TTL_HOURS`     | `24`             |
 * | `BCRYPT_COST`         | bcrypt default   |
 * | `CORS_ORIGINS`        | any origin       |
 * | `MAX_JSON_BODY_BYTES` | 10 MiB           |
 * | `MAX_UPLOAD_BYTES`    | 10 MiB           |
 * | `DEMO_SEED_ENABLED`   | `true`           |
 * | `DEMO_SEED_DELAY_MS`  | `1000`           |
 */

use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

const DEV_JWT_SECRET: &str = "docchat-development-secret";
const TEN_MIB: usize = 10 * 1024 * 1024;

/// Runtime environment; controls how much a 500 reveals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "test" => Ok(Self::Test),
            "production" | "prod" => Ok(Self::Production),
            other => Err(ConfigError::InvalidValue("APP_ENV", other.to_string())),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    /// HS256 secret for session tokens
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub bcrypt_cost: u32,
    /// Allowed CORS origins; empty means any origin
    pub cors_origins: Vec<String>,
    /// Upper bound for buffered JSON bodies
    pub max_json_body_bytes: usize,
    /// Upper bound for the document upload stream
    pub max_upload_bytes: usize,
    pub demo_seed_enabled: bool,
    pub demo_seed_delay: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            environment: Environment::Development,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl: Duration::from_secs(24 * 60 * 60),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            cors_origins: Vec::new(),
            max_json_body_bytes: TEN_MIB,
            max_upload_bytes: TEN_MIB,
            demo_seed_enabled: true,
            demo_seed_delay: Duration::from_millis(1000),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let environment = match env::var("APP_ENV") {
            Ok(value) => value.parse()?,
            Err(_) => defaults.environment,
        };

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ if environment.is_production() => {
                return Err(ConfigError::MissingEnvVar("JWT_SECRET"));
            }
            _ => {
                tracing::warn!("JWT_SECRET not set, using the development secret");
                defaults.jwt_secret
            }
        };

        let bcrypt_cost = parse_var("BCRYPT_COST", defaults.bcrypt_cost)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::InvalidValue(
                "BCRYPT_COST",
                bcrypt_cost.to_string(),
            ));
        }

        let ttl_hours: u64 = parse_var("TOKEN_TTL_HOURS", 24)?;
        let token_ttl = ttl_hours
            .checked_mul(3600)
            .map(Duration::from_secs)
            .ok_or_else(|| ConfigError::InvalidValue("TOKEN_TTL_HOURS", ttl_hours.to_string()))?;

        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT", defaults.port)?,
            environment,
            jwt_secret,
            token_ttl,
            bcrypt_cost,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(|origin| origin.trim().to_string())
                        .filter(|origin| !origin.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            max_json_body_bytes: parse_var("MAX_JSON_BODY_BYTES", defaults.max_json_body_bytes)?,
            max_upload_bytes: parse_var("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            demo_seed_enabled: parse_var("DEMO_SEED_ENABLED", defaults.demo_seed_enabled)?,
            demo_seed_delay: Duration::from_millis(parse_var("DEMO_SEED_DELAY_MS", 1000u64)?),
        })
    }

    /// Address to bind. `HOST` may be an IP or a resolvable name.
    pub async fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let invalid = || ConfigError::InvalidValue("HOST", self.host.clone());
        tokio::net::lookup_host((self.host.as_str(), self.port))
            .await
            .map_err(|e| {
                tracing::warn!("Cannot resolve HOST {}: {}", self.host, e);
                invalid()
            })?
            .next()
            .ok_or_else(invalid)
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name, raw)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    MissingEnvVar(&'static str),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
