//! Per-call cookie options and store defaults.
//!
//! Every field is optional so "not given" stays distinct from a given value.
//! This matters for `secure`: an explicit `false` must override a default
//! `true`.

use crate::base::cookieerror::{CookieError, Result};
use crate::cookies::expires::Expires;
use serde::Deserialize;

/// Attributes applied to a cookie write.
///
/// # Example
/// ```
/// use rawcookie::cookies::options::CookieOptions;
///
/// let options = CookieOptions::new()
///     .path("/account")
///     .expires(3600)
///     .secure(true);
/// assert_eq!(options.path.as_deref(), Some("/account"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "RawOptions")]
pub struct CookieOptions {
    pub path: Option<String>,
    pub domain: Option<String>,
    pub expires: Option<Expires>,
    pub secure: Option<bool>,
}

impl CookieOptions {
    /// Options with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// The defaults a freshly constructed store starts with.
    pub fn store_defaults() -> Self {
        Self {
            path: Some("/".to_string()),
            domain: None,
            expires: None,
            secure: Some(false),
        }
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn expires(mut self, expires: impl Into<Expires>) -> Self {
        self.expires = Some(expires.into());
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = Some(secure);
        self
    }

    /// Overwrite fields with every field set in `partial`.
    pub fn merge_from(&mut self, partial: &CookieOptions) {
        if let Some(path) = &partial.path {
            self.path = Some(path.clone());
        }
        if let Some(domain) = &partial.domain {
            self.domain = Some(domain.clone());
        }
        if let Some(expires) = &partial.expires {
            self.expires = Some(expires.clone());
        }
        if let Some(secure) = partial.secure {
            self.secure = Some(secure);
        }
    }

    /// Fill unset fields from `defaults`. Neither input is modified.
    pub fn merged_over(&self, defaults: &CookieOptions) -> CookieOptions {
        CookieOptions {
            path: self.path.clone().or_else(|| defaults.path.clone()),
            domain: self.domain.clone().or_else(|| defaults.domain.clone()),
            expires: self.expires.clone().or_else(|| defaults.expires.clone()),
            secure: self.secure.or(defaults.secure),
        }
    }

    /// Effective secure flag.
    pub fn is_secure(&self) -> bool {
        self.secure.unwrap_or(false)
    }

    /// Build options from a JSON object such as
    /// `{"path": "/", "expires": 3600, "secure": true}`.
    ///
    /// An `expires` that is neither a number nor a string fails with
    /// [`CookieError::InvalidExpires`]; other shape problems fail with
    /// [`CookieError::InvalidOptions`].
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        let raw = RawOptions::deserialize(value)
            .map_err(|e| CookieError::invalid_options(e.to_string()))?;
        CookieOptions::try_from(raw)
    }
}

/// Serde shape of [`CookieOptions`]; `expires` is validated after the fact.
#[derive(Debug, Deserialize)]
struct RawOptions {
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    domain: Option<String>,
    #[serde(default)]
    expires: Option<serde_json::Value>,
    #[serde(default)]
    secure: Option<bool>,
}

impl TryFrom<RawOptions> for CookieOptions {
    type Error = CookieError;

    fn try_from(raw: RawOptions) -> Result<Self> {
        let expires = raw
            .expires
            .as_ref()
            .filter(|v| !v.is_null())
            .map(Expires::try_from)
            .transpose()?;

        Ok(CookieOptions {
            path: raw.path,
            domain: raw.domain,
            expires,
            secure: raw.secure,
        })
    }
}
