//! Gateway configuration read from the environment.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `STOCKDECK_BACKEND_URL` | `http://127.0.0.1:8000` |
//! | `STOCKDECK_TIMEOUT_MS` | `3000` |

use crate::ValidationError;

pub const BACKEND_URL_ENV: &str = "STOCKDECK_BACKEND_URL";
pub const TIMEOUT_MS_ENV: &str = "STOCKDECK_TIMEOUT_MS";
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_MS: u64 = 3_000;

/// Where the backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    base_url: String,
    timeout_ms: u64,
}

impl GatewayConfig {
    pub fn new(base_url: impl AsRef<str>, timeout_ms: u64) -> Result<Self, ValidationError> {
        Ok(Self {
            base_url: normalize_base_url(base_url.as_ref())?,
            timeout_ms: validate_timeout(timeout_ms)?,
        })
    }

    /// Reads the environment, falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BACKEND_URL_ENV).unwrap_or_else(|| DEFAULT_BACKEND_URL.to_owned());
        let timeout_ms = match lookup(TIMEOUT_MS_ENV) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ValidationError::InvalidEnvValue {
                    name: TIMEOUT_MS_ENV,
                    value: raw,
                })?,
            None => DEFAULT_TIMEOUT_MS,
        };

        Self::new(base_url, timeout_ms)
    }

    pub fn with_base_url(self, base_url: impl AsRef<str>) -> Result<Self, ValidationError> {
        Self::new(base_url, self.timeout_ms)
    }

    pub fn with_timeout_ms(self, timeout_ms: u64) -> Result<Self, ValidationError> {
        Ok(Self {
            timeout_ms: validate_timeout(timeout_ms)?,
            ..self
        })
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub const fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_owned(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

fn normalize_base_url(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim().trim_end_matches('/');
    let has_host = ["http://", "https://"].iter().any(|scheme| {
        trimmed
            .strip_prefix(scheme)
            .is_some_and(|rest| !rest.is_empty())
    });

    if !has_host {
        return Err(ValidationError::InvalidBackendUrl {
            value: input.to_owned(),
        });
    }

    Ok(trimmed.to_owned())
}

fn validate_timeout(timeout_ms: u64) -> Result<u64, ValidationError> {
    if timeout_ms == 0 {
        return Err(ValidationError::ZeroTimeout);
    }
    Ok(timeout_ms)
}
