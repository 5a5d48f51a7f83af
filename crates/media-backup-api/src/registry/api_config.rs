//! Base address configuration and URL resolution.

use std::borrow::Cow;

use hyper::Uri;
use thiserror::Error;

use crate::registry::{constants::DEFAULT_BASE_URL, endpoint::Endpoint};

/// Errors produced while building an [`ApiConfig`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApiConfigError {
    /// The base address is not an absolute `http`/`https` origin.
    #[error("invalid base URL `{url}`: {reason}")]
    InvalidBaseUrl {
        /// The rejected base address.
        url: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}

/// Immutable base address used to resolve endpoint URLs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: Cow<'static, str>,
}

impl ApiConfig {
    /// The process-wide default, pointing at [`DEFAULT_BASE_URL`].
    pub const DEFAULT: Self = Self {
        base_url: Cow::Borrowed(DEFAULT_BASE_URL),
    };

    /// Start building an `ApiConfig` with an injected base address.
    #[must_use]
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::default()
    }

    /// The base address (scheme + authority, no trailing `/`).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of `endpoint`: the base address followed directly by the
    /// endpoint path.
    #[must_use]
    pub fn url(&self, endpoint: Endpoint) -> String {
        let path = endpoint.path();
        let mut url = String::with_capacity(self.base_url.len() + path.len());
        url.push_str(&self.base_url);
        url.push_str(path);
        url
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Resolves `endpoint` against [`ApiConfig::DEFAULT`].
#[must_use]
pub fn api_url(endpoint: Endpoint) -> String {
    ApiConfig::DEFAULT.url(endpoint)
}

/// Builder for [`ApiConfig`].
#[derive(Debug, Default)]
pub struct ApiConfigBuilder {
    base_url: Option<String>,
}

impl ApiConfigBuilder {
    /// Overrides the base address, e.g. `https://backup.lan:5050`.
    #[must_use]
    pub fn base_url<T: Into<String>>(mut self, base_url: T) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Build the `ApiConfig`. Falls back to [`DEFAULT_BASE_URL`] when no base
    /// address was set.
    ///
    /// # Errors
    ///
    /// Returns [`ApiConfigError::InvalidBaseUrl`] if the base address is not
    /// an absolute `http`/`https` origin, or carries a path, query, fragment
    /// or trailing `/` that would corrupt the resolved URLs.
    pub fn build(self) -> Result<ApiConfig, ApiConfigError> {
        let Some(base_url) = self.base_url else {
            return Ok(ApiConfig::DEFAULT);
        };

        validate_base_url(&base_url)?;

        Ok(ApiConfig {
            base_url: Cow::Owned(base_url),
        })
    }
}

/// Accepts `scheme://authority` with nothing after the authority.
fn validate_base_url(url: &str) -> Result<(), ApiConfigError> {
    let invalid = |reason| ApiConfigError::InvalidBaseUrl {
        url: url.to_owned(),
        reason,
    };

    // `Uri` discards fragments while parsing, so they have to be caught on the raw text.
    if url.contains('#') {
        return Err(invalid("must not contain a fragment"));
    }

    let uri: Uri = url.parse().map_err(|_| invalid("not a valid URI"))?;

    if !matches!(uri.scheme_str(), Some("http" | "https")) {
        return Err(invalid("scheme must be http or https"));
    }
    if uri.authority().is_none() {
        return Err(invalid("missing host"));
    }
    if uri.query().is_some() {
        return Err(invalid("must not contain a query"));
    }
    if url.ends_with('/') {
        return Err(invalid("must not end with `/`"));
    }
    if uri.path() != "/" && !uri.path().is_empty() {
        return Err(invalid("must not contain a path"));
    }

    Ok(())
}
