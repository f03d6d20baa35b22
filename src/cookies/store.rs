//! Cached cookie access over a [`CookieDocument`].

use crate::base::cookieerror::{CookieError, Result};
use crate::cookies::codec::{cookie_fragment, parse_cookie_string, FragmentAttributes};
use crate::cookies::document::CookieDocument;
use crate::cookies::expires::Expires;
use crate::cookies::options::CookieOptions;
use std::collections::HashMap;
use time::OffsetDateTime;

/// Key written by [`CookieStore::cookies_enabled`] to probe the document.
pub const TEST_KEY: &str = "rawcookie.rs";

/// Seconds relative to now used when deleting a cookie.
const EXPIRE_NOW_SECS: f64 = -1.0;

/// Value passed to [`CookieStore::set`].
///
/// Strings are written as given, numbers and booleans in their `Display`
/// form. `None` deletes the cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieValue(Option<String>);

impl CookieValue {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl From<&str> for CookieValue {
    fn from(value: &str) -> Self {
        CookieValue(Some(value.to_string()))
    }
}

impl From<String> for CookieValue {
    fn from(value: String) -> Self {
        CookieValue(Some(value))
    }
}

impl From<&String> for CookieValue {
    fn from(value: &String) -> Self {
        CookieValue(Some(value.clone()))
    }
}

impl From<Option<&str>> for CookieValue {
    fn from(value: Option<&str>) -> Self {
        CookieValue(value.map(str::to_string))
    }
}

macro_rules! display_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for CookieValue {
                fn from(value: $ty) -> Self {
                    CookieValue(Some(value.to_string()))
                }
            }
        )*
    };
}

display_value!(i32, i64, u32, u64, usize, f64, bool);

/// Reads and writes cookies on a document.
///
/// Reads go through a cache of the decoded cookie string. The document may
/// change underneath the store at any time, so every [`get`](Self::get)
/// compares the live string with the one the cache was built from and
/// rebuilds on any difference.
///
/// # Example
/// ```
/// use rawcookie::cookies::document::MemoryDocument;
/// use rawcookie::cookies::options::CookieOptions;
/// use rawcookie::cookies::store::CookieStore;
///
/// let mut store = CookieStore::new(MemoryDocument::new());
/// store
///     .set("theme", "dark", None)?
///     .set("lang", "en", CookieOptions::new().expires(3600))?;
///
/// assert_eq!(store.get("theme").as_deref(), Some("dark"));
/// store.expire("theme", None)?;
/// assert_eq!(store.get("theme"), None);
/// # Ok::<(), rawcookie::base::cookieerror::CookieError>(())
/// ```
#[derive(Debug)]
pub struct CookieStore<D> {
    document: D,
    defaults: CookieOptions,
    cache: HashMap<String, String>,
    cached_cookie: Option<String>,
    #[cfg(test)]
    renewals: usize,
}

impl<D: CookieDocument> CookieStore<D> {
    pub fn new(document: D) -> Self {
        Self {
            document,
            defaults: CookieOptions::store_defaults(),
            cache: HashMap::new(),
            cached_cookie: None,
            #[cfg(test)]
            renewals: 0,
        }
    }

    /// Build a store from a document handle that may be missing, as when
    /// looking up a window's document.
    pub fn try_new(document: Option<D>) -> Result<Self> {
        document.map(Self::new).ok_or(CookieError::NoDocument)
    }

    /// Decoded value of `key`, or `None` if the document does not hold it.
    pub fn get(&mut self, key: &str) -> Option<String> {
        let current = self.document.cookie();
        if current != self.cached_cookie {
            self.renew_cache(current);
        }

        self.cache.get(key).cloned()
    }

    /// Write `key`. A `None` value deletes the cookie; numbers and booleans
    /// are written in their `Display` form.
    ///
    /// `options` are merged over the store defaults field by field. Fails only
    /// when the effective expiration cannot be resolved to a date.
    pub fn set(
        &mut self,
        key: &str,
        value: impl Into<CookieValue>,
        options: impl Into<Option<CookieOptions>>,
    ) -> Result<&mut Self> {
        let value = value.into();
        self.set_at(key, value.as_deref(), options.into(), OffsetDateTime::now_utc())
    }

    /// Delete `key`. Same as `set(key, None, options)`.
    pub fn expire(
        &mut self,
        key: &str,
        options: impl Into<Option<CookieOptions>>,
    ) -> Result<&mut Self> {
        self.set(key, None::<&str>, options)
    }

    /// Overwrite the defaults with every field set in `defaults`.
    pub fn set_defaults(&mut self, defaults: CookieOptions) {
        self.defaults.merge_from(&defaults);
    }

    /// Restore the defaults a new store starts with.
    pub fn reset_defaults(&mut self) {
        self.defaults = CookieOptions::store_defaults();
    }

    pub fn defaults(&self) -> &CookieOptions {
        &self.defaults
    }

    /// Probe whether the document keeps cookies by writing and reading back a
    /// test cookie. The test cookie is always removed afterwards.
    pub fn cookies_enabled(&mut self) -> bool {
        let enabled = match self.set(TEST_KEY, 1, None) {
            Ok(store) => store.get(TEST_KEY).as_deref() == Some("1"),
            Err(e) => {
                tracing::debug!(error = %e, "cookie probe write failed");
                false
            }
        };

        if let Err(e) = self.expire(TEST_KEY, None) {
            tracing::debug!(error = %e, "cookie probe cleanup failed");
        }

        enabled
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn into_document(self) -> D {
        self.document
    }

    fn set_at(
        &mut self,
        key: &str,
        value: Option<&str>,
        options: Option<CookieOptions>,
        now: OffsetDateTime,
    ) -> Result<&mut Self> {
        let options = options.unwrap_or_default().merged_over(&self.defaults);

        let expires = match value {
            Some(_) => options.expires.as_ref().map(|e| e.resolve(now)).transpose()?,
            None => Some(Expires::Seconds(EXPIRE_NOW_SECS).resolve(now)?),
        };

        let attrs = FragmentAttributes {
            path: options.path.as_deref(),
            domain: options.domain.as_deref(),
            expires,
            secure: options.is_secure(),
        };
        let fragment = cookie_fragment(key, value.unwrap_or(""), &attrs)?;

        tracing::debug!(key = %key, expiring = value.is_none(), "writing cookie");
        self.document.set_cookie(&fragment);

        Ok(self)
    }

    fn renew_cache(&mut self, current: Option<String>) {
        self.cache = current
            .as_deref()
            .map(parse_cookie_string)
            .unwrap_or_default();
        tracing::debug!(entries = self.cache.len(), "cookie cache renewed");
        self.cached_cookie = current;
        #[cfg(test)]
        {
            self.renewals += 1;
        }
    }
}
