use std::{env, str::FromStr};

use mmt_core::PracticeConfig;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(ConfigError::InvalidEnvironment(other.to_string())),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown ENVIRONMENT value: {0}")]
    InvalidEnvironment(String),
    #[error("Invalid PORT value: {0}")]
    InvalidPort(String),
    #[error("Invalid practice configuration: {0}")]
    Practice(#[from] envy::Error),
}

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub env: Environment,
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub practice: PracticeConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            env: Environment::Development,
            host: "0.0.0.0".to_string(),
            port: 3000,
            allowed_origins: vec!["http://localhost:8080".to_string()],
            practice: PracticeConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Read the server settings and the `PRACTICE_*` policy from the environment.
    /// Missing variables fall back to the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let env = match env::var("ENVIRONMENT") {
            Ok(value) => value.parse()?,
            Err(_) => defaults.env,
        };

        let port = match env::var("PORT") {
            Ok(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidPort(value.clone()))?,
            Err(_) => defaults.port,
        };

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|value| parse_origins(&value))
            .unwrap_or(defaults.allowed_origins);

        Ok(Self {
            env,
            host: env::var("HOST").unwrap_or(defaults.host),
            port,
            allowed_origins,
            practice: PracticeConfig::from_env()?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
