//! Runtime configuration, read from the environment with an optional
//! `.env` file on top.

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";

const ENV_PREFIX: &str = "BLOG_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Error parsing .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
    #[error("Error parsing environment: {0}")]
    Envy(#[from] envy::Error),
}

#[derive(Clone, Eq, PartialEq, Debug, Deserialize)]
struct Env {
    api_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
}

impl Config {
    /// Reads `BLOG_`-prefixed variables from the environment, loading a
    /// `.env` file first when one exists. Falls back to the local dev
    /// server address when `BLOG_API_URL` is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if e.not_found() {
                debug!("No .env file found");
            } else {
                return Err(e.into());
            }
        }

        let env = envy::prefixed(ENV_PREFIX).from_env::<Env>()?;
        Ok(Self::from_parsed(env))
    }

    fn from_parsed(env: Env) -> Self {
        let api_url = env
            .api_url
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Self { api_url }
    }
}
