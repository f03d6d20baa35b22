//! # rawcookie
//!
//! Cookie access for document-style environments.
//!
//! A browser document exposes all of its cookies as a single string
//! (`"k1=v1; k2=v2"`) and accepts writes of one cookie at a time. `rawcookie`
//! wraps that interface with a small stateful store: reads are cached and
//! decoded, writes are encoded per RFC 6265 and carry configurable defaults
//! for path, domain, secure and expiration.
//!
//! ## Features
//!
//! - **Cached Reads**: the cookie string is re-parsed only when it changes
//! - **RFC 6265 Encoding**: separate safe sets for keys and values
//! - **Expiration**: seconds from now, date strings, instants, or never
//! - **Defaults**: tri-state options so an explicit `false` beats a `true` default
//! - **Injectable Documents**: any [`CookieDocument`](cookies::document::CookieDocument),
//!   with an in-memory one for tests and native use
//!
//! ## Quick Start
//!
//! ```rust
//! use rawcookie::cookies::document::MemoryDocument;
//! use rawcookie::cookies::store::CookieStore;
//!
//! let mut store = CookieStore::new(MemoryDocument::new());
//! store.set("user", "ada", None)?;
//! assert_eq!(store.get("user").as_deref(), Some("ada"));
//! # Ok::<(), rawcookie::base::cookieerror::CookieError>(())
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error types
//! - [`cookies`] - Store, documents, encoding, expiration and options

pub mod base;
pub mod cookies;
