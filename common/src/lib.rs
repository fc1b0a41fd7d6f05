use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod models {
    use super::*;

    /// Plain form of an add-user request, built before it is turned into
    /// the wire message.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct NewUser {
        pub name: String,
        pub hobbies: Vec<String>,
    }
}

pub mod utils {
    use super::*;

    pub const NAME_PREFIX: &str = "Anand Jakhaniya ";
    pub const HOBBY_TAGS: [&str; 3] = ["Coding ", "Playing PubG", "Cycling"];

    /// A user with a unique name and three hobbies, each suffixed with its
    /// own random number.
    pub fn random_new_user() -> NewUser {
        let hobbies = HOBBY_TAGS
            .iter()
            .map(|tag| format!("{}{}", tag, rand::random::<f64>()))
            .collect();

        NewUser {
            name: format!("{}{}", NAME_PREFIX, Uuid::new_v4()),
            hobbies,
        }
    }
}

pub mod errors {
    use std::fmt;

    #[derive(Debug, Clone, PartialEq)]
    pub enum ConfigError {
        MissingValue(&'static str),
        InvalidValue { key: &'static str, value: String },
    }

    impl fmt::Display for ConfigError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                ConfigError::MissingValue(key) => write!(f, "Missing value: {} is empty", key),
                ConfigError::InvalidValue { key, value } => {
                    write!(f, "Invalid value for {}: {:?}", key, value)
                }
            }
        }
    }

    impl std::error::Error for ConfigError {}
}

pub mod config {
    use std::env;
    use std::time::Duration;

    use super::errors::ConfigError;

    pub const ADDR_VAR: &str = "USER_SERVICE_ADDR";
    pub const PACE_VAR: &str = "STREAM_PACE_MS";

    pub const DEFAULT_ADDR: &str = "http://localhost:8080";
    pub const DEFAULT_PACE: Duration = Duration::from_millis(2000);

    #[derive(Debug, Clone, PartialEq)]
    pub struct ClientConfig {
        pub addr: String,
        pub stream_pace: Duration,
    }

    impl Default for ClientConfig {
        fn default() -> Self {
            Self {
                addr: DEFAULT_ADDR.to_string(),
                stream_pace: DEFAULT_PACE,
            }
        }
    }

    impl ClientConfig {
        /// Reads the process environment. Callers load `.env` first.
        pub fn from_env() -> Result<Self, ConfigError> {
            Self::from_lookup(|key| env::var(key).ok())
        }

        pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
        where
            F: Fn(&str) -> Option<String>,
        {
            let addr = match lookup(ADDR_VAR) {
                Some(addr) if addr.trim().is_empty() => {
                    return Err(ConfigError::MissingValue(ADDR_VAR))
                }
                Some(addr) => addr.trim().to_string(),
                None => DEFAULT_ADDR.to_string(),
            };

            let stream_pace = match lookup(PACE_VAR) {
                Some(raw) => raw
                    .trim()
                    .parse::<u64>()
                    .map(Duration::from_millis)
                    .map_err(|_| ConfigError::InvalidValue {
                        key: PACE_VAR,
                        value: raw,
                    })?,
                None => DEFAULT_PACE,
            };

            Ok(Self { addr, stream_pace })
        }
    }
}

pub use config::*;
pub use errors::*;
pub use models::*;
pub use utils::*;
