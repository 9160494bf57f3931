// src/config.rs
//! SDK configuration.
//!
//! All configuration is carried by an explicit [`Config`] value handed to
//! [`Magic::new`](crate::Magic::new); the crate keeps no process-global
//! state.

use std::time::Duration;

use crate::error::MagicError;

/// Default base URL of the Magic admin API.
pub const BASE_URL: &str = "https://api.magic.link";

/// Environment variable read by [`Config::from_env`].
pub const API_SECRET_KEY_ENV_VAR: &str = "MAGIC_API_SECRET_KEY";

/// Default grace period subtracted from a DID token's `nbf` timestamp to
/// absorb clock skew between the token issuer and this verifier. Matches
/// the deployed issuer's skew tolerance.
pub const DEFAULT_NBF_GRACE_PERIOD_S: i64 = 300;

/// Default timeout for outbound API requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub(crate) const API_SECRET_KEY_MISSING_MESSAGE: &str =
    "API secret key is missing. Please specify an API secret key when you \
     construct the configuration with `Config::new(<KEY>)` or use the \
     environment variable `MAGIC_API_SECRET_KEY`. You can get your API \
     secret key from https://dashboard.magic.link.";

/// Configuration for the Magic SDK client.
#[derive(Clone, Debug)]
pub struct Config {
    /// Secret key authenticating outbound API requests.
    pub api_secret_key: String,
    /// Base URL of the Magic admin API.
    pub base_url: String,
    /// Timeout applied to each outbound API request.
    pub timeout: Duration,
    /// Grace period, in seconds, applied to the `nbf` lower bound of DID
    /// token validation. Never applied to `ext`.
    pub nbf_grace_period_s: i64,
}

impl Config {
    /// Builds a configuration with the given API secret key and defaults
    /// for everything else.
    pub fn new(api_secret_key: impl Into<String>) -> Self {
        Config {
            api_secret_key: api_secret_key.into(),
            base_url: BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            nbf_grace_period_s: DEFAULT_NBF_GRACE_PERIOD_S,
        }
    }

    /// Builds a configuration from the `MAGIC_API_SECRET_KEY` environment
    /// variable.
    ///
    /// # Errors
    /// Returns [`MagicError::Authentication`] if the variable is unset or
    /// empty.
    pub fn from_env() -> Result<Self, MagicError> {
        match std::env::var(API_SECRET_KEY_ENV_VAR) {
            Ok(key) if !key.is_empty() => Ok(Config::new(key)),
            _ => Err(MagicError::Authentication(
                API_SECRET_KEY_MISSING_MESSAGE.to_string(),
            )),
        }
    }

    /// Overrides the API base URL. Intended for tests and self-hosted
    /// deployments.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the outbound request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overrides the `nbf` grace period.
    pub fn with_nbf_grace_period(mut self, grace_period_s: i64) -> Self {
        self.nbf_grace_period_s = grace_period_s;
        self
    }
}
