//! Document cookie example.
//!
//! Walks through the store API against an in-memory document.
//! Run with `RUST_LOG=debug` to see cache renewals and writes.

use rawcookie::cookies::document::{CookieDocument, MemoryDocument};
use rawcookie::cookies::options::CookieOptions;
use rawcookie::cookies::store::CookieStore;
use tracing_subscriber::EnvFilter;
use url::Url;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // A document at https://shop.example.org/cart
    let url = Url::parse("https://shop.example.org/cart")?;
    let document = MemoryDocument::for_url(&url);
    let mut cookies = CookieStore::new(document.clone());

    println!("Cookies enabled: {}", cookies.cookies_enabled());

    // Defaults apply to every write
    cookies.set_defaults(CookieOptions::new().domain("example.org").secure(true));

    cookies
        .set("cart", "3 items; total=42.00", CookieOptions::new().expires(3600))?
        .set("theme", "dark", CookieOptions::new().expires(f64::INFINITY))?;

    println!("Raw cookie string: {:?}", document.cookie());
    println!("cart  = {:?}", cookies.get("cart"));
    println!("theme = {:?}", cookies.get("theme"));

    cookies.expire("cart", None)?;
    println!("cart after expire = {:?}", cookies.get("cart"));

    // Invalid expirations are the only failing input
    if let Err(e) = cookies.set("bad", "x", CookieOptions::new().expires("not-a-date")) {
        println!("Rejected: {}", e);
    }

    Ok(())
}
