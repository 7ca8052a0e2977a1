use std::{env, time::Duration};

use anyhow::{Context as _, Result};

use crate::library::MAX_PER_CALL;

/// Credentials and the account to sync, read from `.env` and the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    /// Falls back to the authenticated user when unset.
    pub user_id: Option<String>,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str, fallback: &str| {
            lookup(key)
                .or_else(|| lookup(fallback))
                .filter(|value| !value.is_empty())
                .with_context(|| format!("{} is not set (nor {})", key, fallback))
        };

        Ok(Settings {
            client_id: required("CLIENT_ID", "RSPOTIFY_CLIENT_ID")?,
            client_secret: required("CLIENT_SECRET", "RSPOTIFY_CLIENT_SECRET")?,
            redirect_uri: required("REDIRECT_URI", "RSPOTIFY_REDIRECT_URI")?,
            user_id: lookup("USER_ID").filter(|value| !value.is_empty()),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncSettings {
    pub batch_size: usize,
    /// Sleep after every save call to stay under the rate limit.
    pub pause: Duration,
}

impl Default for SyncSettings {
    fn default() -> Self {
        SyncSettings {
            batch_size: MAX_PER_CALL,
            pause: Duration::from_secs(1),
        }
    }
}
