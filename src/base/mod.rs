//! Base types and error handling.
//!
//! - [`CookieError`](cookieerror::CookieError): the error taxonomy of the store
//! - [`context`]: helpers that attach caller input to date errors

pub mod context;
pub mod cookieerror;
