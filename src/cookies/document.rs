//! The document a [`CookieStore`](crate::cookies::store::CookieStore) reads and writes.
//!
//! A document exposes all of its cookies as one `k1=v1; k2=v2` string and
//! accepts writes of one `key=value;attr...` fragment at a time. Merging a
//! fragment into the existing cookies is the document's job, not the store's.
//!
//! [`MemoryDocument`] is an in-memory document that merges writes the way a
//! browser does, so stores can be exercised without one.

use crate::cookies::expires::MAX_EXPIRES;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use time::OffsetDateTime;
use url::Url;

/// A document-like object holding a cookie string.
pub trait CookieDocument {
    /// The current cookie string, or `None` when the document has no cookie
    /// support at all.
    fn cookie(&self) -> Option<String>;

    /// Write one cookie fragment. Documents may silently ignore writes.
    fn set_cookie(&mut self, fragment: &str);
}

impl<D: CookieDocument + ?Sized> CookieDocument for &mut D {
    fn cookie(&self) -> Option<String> {
        (**self).cookie()
    }

    fn set_cookie(&mut self, fragment: &str) {
        (**self).set_cookie(fragment)
    }
}

impl<D: CookieDocument + ?Sized> CookieDocument for Box<D> {
    fn cookie(&self) -> Option<String> {
        (**self).cookie()
    }

    fn set_cookie(&mut self, fragment: &str) {
        (**self).set_cookie(fragment)
    }
}

/// A bare cookie string. Each write replaces the whole string, which makes it
/// a recorder for the last fragment written.
impl CookieDocument for String {
    fn cookie(&self) -> Option<String> {
        Some(self.clone())
    }

    fn set_cookie(&mut self, fragment: &str) {
        self.clear();
        self.push_str(fragment);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentMode {
    /// Reads and writes work.
    Enabled,
    /// Reads work, writes are dropped (cookies blocked by the user).
    Disabled,
    /// No cookie string is exposed and writes are dropped.
    Unsupported,
}

/// Jar key: a write replaces the cookie with the same name, domain and path.
type JarKey = (String, String, String);

#[derive(Debug, Clone)]
struct StoredCookie {
    name: String,
    value: String,
    domain: String,
    host_only: bool,
    path: String,
    secure: bool,
    expires: Option<OffsetDateTime>,
    creation: u64,
}

impl StoredCookie {
    fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.expires.is_some_and(|expiry| expiry <= now)
    }
}

/// In-memory document.
///
/// Clones share the same jar, so a write through one handle is visible
/// through all others. Values are kept exactly as written (still
/// percent-encoded).
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    jar: Arc<DashMap<JarKey, StoredCookie>>,
    sequence: Arc<AtomicU64>,
    host: String,
    location_path: String,
    secure_origin: bool,
    mode: DocumentMode,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// A document located at `https://localhost/`.
    pub fn new() -> Self {
        Self::with_location("localhost", "/", true)
    }

    /// A document located at `url`.
    pub fn for_url(url: &Url) -> Self {
        Self::with_location(
            url.host_str().unwrap_or(""),
            url.path(),
            url.scheme() == "https",
        )
    }

    fn with_location(host: &str, path: &str, secure_origin: bool) -> Self {
        Self {
            jar: Arc::new(DashMap::new()),
            sequence: Arc::new(AtomicU64::new(0)),
            host: host.to_lowercase(),
            location_path: path.to_string(),
            secure_origin,
            mode: DocumentMode::Enabled,
        }
    }

    /// A document whose writes are silently dropped.
    pub fn disabled() -> Self {
        Self {
            mode: DocumentMode::Disabled,
            ..Self::new()
        }
    }

    /// A document that exposes no cookie string.
    pub fn unsupported() -> Self {
        Self {
            mode: DocumentMode::Unsupported,
            ..Self::new()
        }
    }

    /// Number of live cookies in the jar, regardless of visibility.
    pub fn len(&self) -> usize {
        let now = OffsetDateTime::now_utc();
        self.jar.iter().filter(|c| !c.is_expired(now)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every cookie.
    pub fn clear(&self) {
        self.jar.clear();
    }

    fn accept(&self, fragment: &str) {
        use cookie::Cookie;

        let parsed = match Cookie::parse(fragment) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::debug!(error = %e, "cookie write rejected: unparsable fragment");
                return;
            }
        };

        let (domain, host_only) = match parsed.domain() {
            Some(d) => {
                let d = d.trim_start_matches('.').to_lowercase();
                if !is_valid_cookie_domain(&d, &self.host) {
                    tracing::debug!(domain = %d, host = %self.host, "cookie write rejected: domain");
                    return;
                }
                (d, false)
            }
            None => (self.host.clone(), true),
        };

        let path = match parsed.path() {
            Some(p) if p.starts_with('/') => p.to_string(),
            _ => default_path(&self.location_path),
        };

        let secure = parsed.secure().unwrap_or(false);
        if secure && !self.secure_origin {
            tracing::debug!(name = %parsed.name(), "cookie write rejected: secure from insecure origin");
            return;
        }

        let now = OffsetDateTime::now_utc();
        let expires = match parsed.max_age() {
            Some(max_age) if max_age.is_positive() => {
                Some(now.checked_add(max_age).unwrap_or(MAX_EXPIRES))
            }
            Some(_) => Some(now),
            None => parsed.expires_datetime(),
        };

        let key = (parsed.name().to_string(), domain.clone(), path.clone());
        if expires.is_some_and(|expiry| expiry <= now) {
            self.jar.remove(&key);
            return;
        }

        // Overwrites keep their original creation order.
        let creation = self
            .jar
            .get(&key)
            .map(|c| c.creation)
            .unwrap_or_else(|| self.sequence.fetch_add(1, Ordering::Relaxed));

        let stored = StoredCookie {
            name: parsed.name().to_string(),
            value: parsed.value().to_string(),
            domain,
            host_only,
            path,
            secure,
            expires,
            creation,
        };
        self.jar.insert(key, stored);
    }

    fn render(&self) -> String {
        let now = OffsetDateTime::now_utc();
        self.jar.retain(|_, c| !c.is_expired(now));

        let mut visible: Vec<StoredCookie> = self
            .jar
            .iter()
            .filter(|c| domain_matches(&c.domain, &self.host, c.host_only))
            .filter(|c| path_matches(&c.path, &self.location_path))
            .filter(|c| !c.secure || self.secure_origin)
            .map(|c| c.value().clone())
            .collect();

        // Longest path first, then oldest first.
        visible.sort_by(|a, b| {
            b.path
                .len()
                .cmp(&a.path.len())
                .then_with(|| a.creation.cmp(&b.creation))
        });

        visible
            .iter()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl CookieDocument for MemoryDocument {
    fn cookie(&self) -> Option<String> {
        match self.mode {
            DocumentMode::Unsupported => None,
            _ => Some(self.render()),
        }
    }

    fn set_cookie(&mut self, fragment: &str) {
        match self.mode {
            DocumentMode::Enabled => self.accept(fragment),
            _ => tracing::debug!("cookie write dropped: cookies unavailable"),
        }
    }
}

/// RFC 6265 default-path: the location path up to, not including, its last `/`.
fn default_path(location_path: &str) -> String {
    match location_path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => location_path[..idx].to_string(),
    }
}

/// RFC 6265 domain matching.
fn domain_matches(cookie_domain: &str, host: &str, host_only: bool) -> bool {
    if host.eq_ignore_ascii_case(cookie_domain) {
        return true;
    }
    if host_only || host.len() <= cookie_domain.len() {
        return false;
    }

    // Suffix match on a label boundary.
    let start = host.len() - cookie_domain.len();
    let host = host.as_bytes();
    host[start..].eq_ignore_ascii_case(cookie_domain.as_bytes()) && host[start - 1] == b'.'
}

/// RFC 6265 path matching.
fn path_matches(cookie_path: &str, request_path: &str) -> bool {
    if request_path == cookie_path {
        return true;
    }

    request_path.starts_with(cookie_path)
        && (cookie_path.ends_with('/')
            || request_path.as_bytes().get(cookie_path.len()) == Some(&b'/'))
}

/// A `Domain` attribute must cover the document host and must not be a
/// public suffix such as `com` or `co.uk`.
fn is_valid_cookie_domain(cookie_domain: &str, host: &str) -> bool {
    use psl::{List, Psl};

    let is_public_suffix = List
        .suffix(cookie_domain.as_bytes())
        .is_some_and(|suffix| suffix.as_bytes() == cookie_domain.as_bytes());
    if is_public_suffix && cookie_domain != host {
        return false;
    }

    domain_matches(cookie_domain, host, false)
}
