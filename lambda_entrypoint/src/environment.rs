use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// The env var which holds the [Environment] value
const ENVIRONMENT_VAR: &str = "ENVIRONMENT";

/// The current environment the function is running in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Dev and or staging environment
    Develop,
    /// Running on a developer machine, e.g. through `cargo lambda watch`
    Local,
}

impl Environment {
    /// attempt to read the [Environment] from the `ENVIRONMENT` env var, falling back to
    /// [Environment::Production] if it is missing or unrecognized
    pub fn new_or_prod() -> Self {
        std::env::var(ENVIRONMENT_VAR)
            .ok()
            .and_then(|v| Self::from_str(&v).ok())
            .unwrap_or(Environment::Production)
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Production => write!(f, "prod"),
            Environment::Develop => write!(f, "dev"),
            Environment::Local => write!(f, "local"),
        }
    }
}

/// Represents a value which cannot be converted into an [Environment]
#[derive(Debug, Error)]
#[error("Could not convert {0} into an environment value")]
pub struct UnknownValue(String);

impl FromStr for Environment {
    type Err = UnknownValue;

    fn from_str(environment: &str) -> Result<Self, UnknownValue> {
        match environment {
            "prod" => Ok(Environment::Production),
            "dev" => Ok(Environment::Develop),
            "local" => Ok(Environment::Local),
            s => Err(UnknownValue(s.to_string())),
        }
    }
}
