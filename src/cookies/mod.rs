//! Document cookie access.
//!
//! This module provides cookie reads and writes over a document-style cookie
//! string:
//!
//! - **Store**: cached get/set/expire with defaults ([`CookieStore`](store::CookieStore))
//! - **Documents**: the read/write contract and an in-memory document ([`document`])
//! - **Encoding**: RFC 6265 percent-encoding and string parsing ([`codec`])
//! - **Expiration**: seconds, date strings and instants ([`expires`])
//! - **Options**: per-call attributes and defaults ([`options`])
//!
//! # Architecture
//!
//! | Type | Responsibility |
//! |------|----------------|
//! | [`CookieStore`](store::CookieStore) | Merges options, resolves expiration, caches reads |
//! | [`CookieDocument`](document::CookieDocument) | Exposes the raw `k1=v1; k2=v2` string, accepts fragments |
//! | [`MemoryDocument`](document::MemoryDocument) | Browser-like merging of fragments in memory |
//! | [`CookieOptions`](options::CookieOptions) | Path, domain, expires, secure |
//!
//! # Wire Format
//!
//! Each write sends one fragment to the document:
//!
//! ```text
//! <key>=<value>[;path=<path>][;domain=<domain>][;expires=<RFC 1123 date>][;secure]
//! ```
//!
//! # Example
//!
//! ```rust
//! use rawcookie::cookies::document::MemoryDocument;
//! use rawcookie::cookies::options::CookieOptions;
//! use rawcookie::cookies::store::CookieStore;
//!
//! let mut store = CookieStore::new(MemoryDocument::new());
//! store.set_defaults(CookieOptions::new().secure(true));
//!
//! store.set("session", "a b;c", CookieOptions::new().expires(f64::INFINITY))?;
//! assert_eq!(store.get("session").as_deref(), Some("a b;c"));
//! assert!(store.cookies_enabled());
//! # Ok::<(), rawcookie::base::cookieerror::CookieError>(())
//! ```

pub mod codec;
pub mod document;
pub mod expires;
pub mod options;
pub mod store;
