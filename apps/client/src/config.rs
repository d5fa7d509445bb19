//! Client configuration loaded from the environment.

use std::env;
use std::time::Duration;

use uuid::Uuid;

use crate::error::ConfigError;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the session service.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub backend_url: String,
    pub token: String,
    pub user_id: Uuid,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Read `STUDYCARDS_*` variables, loading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));

        let backend_url = required("STUDYCARDS_BACKEND_URL")?;
        let token = required("STUDYCARDS_TOKEN")?;

        let user_id = required("STUDYCARDS_USER_ID")?;
        let user_id = Uuid::parse_str(&user_id).map_err(|_| ConfigError::Invalid {
            key: "STUDYCARDS_USER_ID",
            value: user_id,
        })?;

        let timeout = match lookup("STUDYCARDS_TIMEOUT_SECS") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: "STUDYCARDS_TIMEOUT_SECS",
                value: raw,
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            backend_url: backend_url.trim_end_matches('/').to_string(),
            token,
            user_id,
            timeout: Duration::from_secs(timeout),
        })
    }
}
