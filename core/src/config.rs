//! Client configuration.
//!
//! # Design
//! The API version is a deployment choice carried by the base URL
//! (`.../web/v2`, `.../web/v3`); it only changes how the detailed
//! configuration path is laid out. `ClientConfig` is immutable once handed
//! to a `WebApiClient`.

use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "https://global.ketchcdn.com/web/v2";
pub const BASE_URL_ENV: &str = "CONSENT_API_BASE_URL";
pub const FAIL_OPEN_ENV: &str = "CONSENT_API_FAIL_OPEN";

/// Path layout generation of the web API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiVersion {
    /// Same path layout as `V2`.
    V1,
    #[default]
    V2,
    /// Moves the configuration hash from the path into the query string.
    V3,
}

impl ApiVersion {
    /// Reads the version from the last path segment of `base_url`, falling
    /// back to `V2` when it is not a `vN` segment.
    pub fn from_base_url(base_url: &str) -> Self {
        match base_url.trim_end_matches('/').rsplit('/').next() {
            Some("v1") => ApiVersion::V1,
            Some("v3") => ApiVersion::V3,
            _ => ApiVersion::V2,
        }
    }
}

/// What get/set consent do when the service fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsentFailurePolicy {
    /// Resolve with the caller's own submitted values.
    #[default]
    FailOpen,
    /// Return the error like every other operation.
    Propagate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    api_version: ApiVersion,
    consent_failure_policy: ConsentFailurePolicy,
}

impl ClientConfig {
    /// Trailing slashes are stripped; the version is detected from the URL.
    pub fn new(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            api_version: ApiVersion::from_base_url(&base_url),
            base_url,
            consent_failure_policy: ConsentFailurePolicy::default(),
        }
    }

    /// Builds a config from `CONSENT_API_BASE_URL` and
    /// `CONSENT_API_FAIL_OPEN`, using defaults for unset variables.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let base_url = lookup(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if base_url.trim().is_empty() {
            return Err(ApiError::Config(format!("{BASE_URL_ENV} is empty")));
        }
        let policy = match lookup(FAIL_OPEN_ENV).as_deref().map(str::trim) {
            None | Some("") | Some("true") | Some("1") => ConsentFailurePolicy::FailOpen,
            Some("false") | Some("0") => ConsentFailurePolicy::Propagate,
            Some(other) => {
                return Err(ApiError::Config(format!(
                    "{FAIL_OPEN_ENV} must be true or false, got {other:?}"
                )))
            }
        };
        Ok(Self::new(base_url.trim()).with_consent_failure_policy(policy))
    }

    pub fn with_api_version(mut self, api_version: ApiVersion) -> Self {
        self.api_version = api_version;
        self
    }

    pub fn with_consent_failure_policy(mut self, policy: ConsentFailurePolicy) -> Self {
        self.consent_failure_policy = policy;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_version(&self) -> ApiVersion {
        self.api_version
    }

    pub fn consent_failure_policy(&self) -> ConsentFailurePolicy {
        self.consent_failure_policy
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
