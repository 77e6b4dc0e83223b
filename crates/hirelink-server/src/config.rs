//! Environment-driven configuration.

use std::env;
use std::time::Duration;

use hirelink_auth::AuthConfig;
use hirelink_db::DbConfig;
use hirelink_notify::GatewayConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("APP_PORT is not a valid port number")]
    InvalidPort,

    #[error("AUTH_SESSION_TTL_SECS is not a valid number of seconds")]
    InvalidSessionTtl,

    #[error("SMS_TIMEOUT_SECS is not a valid number of seconds")]
    InvalidSmsTimeout,

    #[error("AUTH_SIGNING_SECRET must be set")]
    MissingSigningSecret,
}

/// Top-level configuration for the server process.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub db: DbConfig,
    pub auth: AuthConfig,
    /// `None` when any gateway credential is absent; dispatch then
    /// degrades to `failed` without blocking transitions.
    pub gateway: Option<GatewayConfig>,
    pub sms_timeout: Duration,
}

fn var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

impl ServerConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let host = var("APP_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = var("APP_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let db_defaults = DbConfig::default();
        let db = DbConfig {
            url: var("DB_URL").unwrap_or(db_defaults.url),
            namespace: var("DB_NAMESPACE").unwrap_or(db_defaults.namespace),
            database: var("DB_DATABASE").unwrap_or(db_defaults.database),
            username: var("DB_USERNAME").unwrap_or(db_defaults.username),
            password: var("DB_PASSWORD").unwrap_or(db_defaults.password),
        };

        let auth_defaults = AuthConfig::default();
        let auth = AuthConfig {
            signing_secret: var("AUTH_SIGNING_SECRET")
                .ok_or(ConfigError::MissingSigningSecret)?,
            session_ttl_secs: match var("AUTH_SESSION_TTL_SECS") {
                Some(raw) => raw
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidSessionTtl)?,
                None => auth_defaults.session_ttl_secs,
            },
            pepper: var("AUTH_PEPPER"),
            min_password_length: auth_defaults.min_password_length,
        };

        let gateway = GatewayConfig::from_parts(
            var("SMS_GATEWAY_URL"),
            var("SMS_GATEWAY_DEVICE_ID"),
            var("SMS_GATEWAY_API_KEY"),
        );

        let sms_timeout = match var("SMS_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.parse::<u64>().map_err(|_| ConfigError::InvalidSmsTimeout)?,
            ),
            None => hirelink_notify::config::DEFAULT_DISPATCH_TIMEOUT,
        };

        Ok(Self {
            host,
            port,
            db,
            auth,
            gateway,
            sms_timeout,
        })
    }
}
