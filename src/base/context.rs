//! Ergonomic error context helpers.
//!
//! Provides an extension trait for converting date/time library errors into
//! context-rich `CookieError` variants.

use crate::base::cookieerror::CookieError;

/// Extension trait for adding expiration context to fallible date results.
pub trait ExpiresResultExt<T> {
    /// Replace the underlying error with [`CookieError::InvalidExpires`],
    /// recording the caller input that could not be converted.
    ///
    /// # Example
    /// ```ignore
    /// use rawcookie::base::context::ExpiresResultExt;
    ///
    /// let instant = OffsetDateTime::parse(input, &Rfc3339).expires_context(input)?;
    /// // Error: "`expires` cannot be converted to a valid date: <input>"
    /// ```
    fn expires_context(self, input: &str) -> Result<T, CookieError>;
}

impl<T, E: std::error::Error> ExpiresResultExt<T> for Result<T, E> {
    fn expires_context(self, input: &str) -> Result<T, CookieError> {
        self.map_err(|e| {
            tracing::debug!(input = %input, error = %e, "expiration rejected");
            CookieError::invalid_expires(input)
        })
    }
}

impl<T> ExpiresResultExt<T> for Option<T> {
    fn expires_context(self, input: &str) -> Result<T, CookieError> {
        self.ok_or_else(|| CookieError::invalid_expires(input))
    }
}
