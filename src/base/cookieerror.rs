use thiserror::Error;

/// Errors raised by the cookie store.
///
/// Reads never fail: a missing key, a document without cookie support or a
/// browser that silently drops writes all surface as `None`/`false`. Only the
/// cases below are reported.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CookieError {
    /// No document handle was available when constructing the store.
    #[error("CookieStore requires a document exposing a cookie string")]
    NoDocument,

    /// An expiration could not be resolved to a representable instant.
    #[error("`expires` cannot be converted to a valid date: {input}")]
    InvalidExpires { input: String },

    /// Option configuration could not be deserialized.
    #[error("Invalid cookie options: {message}")]
    InvalidOptions { message: String },
}

impl CookieError {
    pub fn invalid_expires(input: impl Into<String>) -> Self {
        Self::InvalidExpires {
            input: input.into(),
        }
    }

    pub fn invalid_options(message: impl Into<String>) -> Self {
        Self::InvalidOptions {
            message: message.into(),
        }
    }

    /// True for errors caused by caller input rather than the environment.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CookieError::InvalidExpires { .. } | CookieError::InvalidOptions { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CookieError>;
