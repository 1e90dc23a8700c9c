use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    DynamoDb {
        matches_table: String,
        stats_table: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub storage: StorageBackend,
    pub bind_addr: String,
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} environment variable must be set", key),
            ConfigError::Invalid { key, value } => {
                write!(f, "{} has unsupported value '{}'", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let jwt_secret = required("JWT_SECRET")?;

        let storage = match lookup("STORAGE_BACKEND").as_deref() {
            None | Some("") | Some("memory") => StorageBackend::Memory,
            Some("dynamodb") => StorageBackend::DynamoDb {
                matches_table: required("MATCHES_TABLE")?,
                stats_table: required("PLAYER_STATS_TABLE")?,
            },
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "STORAGE_BACKEND",
                    value: other.to_string(),
                })
            }
        };

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:8000".to_string());

        Ok(Config {
            jwt_secret,
            storage,
            bind_addr,
        })
    }
}
