//! Process configuration read from the environment.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use crate::assistant::GeminiSettings;

const DEFAULT_DATABASE_URL: &str = "app.db";
const DEFAULT_ADDRESS: &str = "127.0.0.1";
const DEFAULT_PORT: &str = "8080";
const DEFAULT_DOMAIN: &str = "localhost";
const DEFAULT_STATIC_DIR: &str = "./dist";
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),
    #[error("invalid {key} value `{value}`: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Settings for the HTTP server and its collaborators.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub address: String,
    pub port: u16,
    pub domain: String,
    /// Cookie signing secret; a random key is generated when absent.
    pub secret: Option<String>,
    pub auth_service_url: String,
    /// Directory holding the compiled single-page app.
    pub static_dir: String,
    /// `None` disables the menu assistant.
    pub gemini: Option<GeminiSettings>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let or_default = |key: &str, default: &str| {
            var(key).unwrap_or_else(|| {
                log::info!("{key} not set, using default: {default}");
                default.to_string()
            })
        };

        let auth_service_url =
            var("AUTH_SERVICE_URL").ok_or(ConfigError::Missing("AUTH_SERVICE_URL"))?;

        let gemini = var("GEMINI_API_KEY").map(|api_key| GeminiSettings {
            api_key,
            model: or_default("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            api_url: or_default("GEMINI_API_URL", DEFAULT_GEMINI_API_URL),
        });
        if gemini.is_none() {
            log::warn!("GEMINI_API_KEY not set, menu assistant disabled");
        }

        Ok(Self {
            database_url: or_default("DATABASE_URL", DEFAULT_DATABASE_URL),
            address: or_default("ADDRESS", DEFAULT_ADDRESS),
            port: parse("PORT", or_default("PORT", DEFAULT_PORT))?,
            domain: or_default("DOMAIN", DEFAULT_DOMAIN),
            secret: var("SECRET_KEY"),
            auth_service_url,
            static_dir: or_default("STATIC_DIR", DEFAULT_STATIC_DIR),
            gemini,
        })
    }
}

fn parse<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let parsed = value.trim().parse::<T>();
    parsed.map_err(|e| ConfigError::Invalid {
        key,
        reason: e.to_string(),
        value,
    })
}
