use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::env;

/// Full configuration for email-service.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailServiceConfig {
    #[serde(flatten)]
    pub common: CommonConfig,
    pub smtp: SmtpConfig,
}

/// Service-level settings, loaded from an optional `configuration` file
/// plus `APP__`-prefixed environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct CommonConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    5001
}

/// SMTP relay settings, loaded from the `MAIL_*` environment variables
/// so the service can share a `.env` with the rest of the platform.
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub use_tls: bool,
    pub username: String,
    pub password: String,
    pub from_email: String,
    pub from_name: String,
    pub enabled: bool,
    pub timeout_secs: u64,
}

impl CommonConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

impl EmailServiceConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = CommonConfig::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(EmailServiceConfig {
            common,
            smtp: SmtpConfig {
                host: get_env("MAIL_SERVER", Some("smtp.gmail.com"), is_prod)?,
                port: get_env("MAIL_PORT", Some("587"), is_prod)?
                    .parse()
                    .unwrap_or(587),
                use_tls: env::var("MAIL_USE_TLS")
                    .unwrap_or_else(|_| "true".to_string())
                    .to_lowercase()
                    .parse()
                    .unwrap_or(true),
                username: get_env("MAIL_USERNAME", Some(""), is_prod)?,
                password: get_env("MAIL_PASSWORD", Some(""), is_prod)?,
                from_email: get_env("MAIL_DEFAULT_SENDER", Some("noreply@pulsepay.com"), is_prod)?,
                from_name: get_env("MAIL_FROM_NAME", Some("PulsePay"), is_prod)?,
                enabled: env::var("SMTP_ENABLED")
                    .unwrap_or_else(|_| "true".to_string())
                    .parse()
                    .unwrap_or(true),
                timeout_secs: env::var("SMTP_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .unwrap_or(30),
            },
        })
    }
}

/// Read an environment variable, falling back to `default` outside
/// production. In production every variable must be set explicitly.
fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
