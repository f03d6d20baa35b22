//! Cookie expiration values.
//!
//! An expiration may be given as a number of seconds from now, as a date
//! string, or as an instant. All of them resolve to an [`OffsetDateTime`]
//! which is rendered in the RFC 1123 form browsers expect
//! (`Fri, 31 Dec 9999 23:59:59 GMT`).

use crate::base::context::ExpiresResultExt;
use crate::base::cookieerror::{CookieError, Result};
use time::format_description::well_known::{Rfc2822, Rfc3339};
use time::macros::{datetime, format_description};
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

/// The "never expires" sentinel. Some environments have no way to say
/// "permanent", so the latest representable date is used instead.
pub const MAX_EXPIRES: OffsetDateTime = datetime!(9999-12-31 23:59:59 UTC);

/// Largest offset, in milliseconds, a date value may carry.
const MAX_TIME_VALUE_MS: f64 = 8.64e15;

/// Expiration input accepted by [`CookieStore::set`](crate::cookies::store::CookieStore::set).
#[derive(Debug, Clone, PartialEq)]
pub enum Expires {
    /// Seconds from now. `f64::INFINITY` means never.
    Seconds(f64),
    /// A calendar date/time string.
    Text(String),
    /// An absolute instant.
    At(OffsetDateTime),
}

impl Expires {
    /// An expiration that never elapses.
    pub fn never() -> Self {
        Expires::Seconds(f64::INFINITY)
    }

    /// Resolve against `now`.
    ///
    /// The result is always in UTC. Fails with [`CookieError::InvalidExpires`]
    /// when the value cannot be converted to a UTC instant within the
    /// supported range.
    pub fn resolve(&self, now: OffsetDateTime) -> Result<OffsetDateTime> {
        let resolved = match self {
            Expires::Seconds(secs) => resolve_seconds(*secs, now)?,
            Expires::Text(text) => parse_date(text)?,
            Expires::At(instant) => *instant,
        };
        to_utc(resolved)
    }
}

/// Convert to UTC. An instant near the range limits may carry an offset
/// whose UTC equivalent is outside the supported years.
fn to_utc(instant: OffsetDateTime) -> Result<OffsetDateTime> {
    instant
        .checked_to_offset(UtcOffset::UTC)
        .expires_context(&instant.to_string())
}

fn resolve_seconds(secs: f64, now: OffsetDateTime) -> Result<OffsetDateTime> {
    if secs == f64::INFINITY {
        return Ok(MAX_EXPIRES);
    }

    let input = secs.to_string();
    let millis = (secs * 1000.0).trunc();
    if !millis.is_finite() || millis.abs() > MAX_TIME_VALUE_MS {
        return Err(CookieError::invalid_expires(input));
    }

    now.checked_add(Duration::milliseconds(millis as i64))
        .expires_context(&input)
}

/// Parse a calendar date/time string.
///
/// Accepted forms, tried in order:
/// - RFC 1123 (`Thu, 01 Jan 2015 00:00:00 GMT`, also with `UTC`)
/// - RFC 2822 (`Thu, 01 Jan 2015 00:00:00 +0000`)
/// - RFC 3339 (`2015-01-01T00:00:00Z`)
/// - `2015-01-01T00:00:00` and `2015-01-01`
/// - `01/01/2015 00:00:00` and `01/01/2015` (month first)
///
/// Strings without an offset are read as UTC.
pub fn parse_date(input: &str) -> Result<OffsetDateTime> {
    let text = input.trim();

    if let Ok(dt) = OffsetDateTime::parse(text, &Rfc2822) {
        return Ok(dt);
    }
    if let Ok(dt) = OffsetDateTime::parse(text, &Rfc3339) {
        return Ok(dt);
    }

    let date_times = [
        format_description!(
            "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
        ),
        format_description!(
            "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] UTC"
        ),
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        format_description!(
            "[month padding:none]/[day padding:none]/[year] [hour padding:none]:[minute]:[second]"
        ),
    ];
    if let Some(dt) = date_times
        .iter()
        .find_map(|fmt| PrimitiveDateTime::parse(text, fmt).ok())
    {
        return Ok(dt.assume_utc());
    }

    let dates = [
        format_description!("[year]-[month]-[day]"),
        format_description!("[month padding:none]/[day padding:none]/[year]"),
    ];
    dates
        .iter()
        .find_map(|fmt| Date::parse(text, fmt).ok())
        .map(|date| date.with_time(Time::MIDNIGHT).assume_utc())
        .expires_context(input)
}

/// Render an instant as an RFC 1123 GMT date, e.g. `Fri, 31 Dec 9999 23:59:59 GMT`.
pub fn to_utc_string(instant: OffsetDateTime) -> Result<String> {
    to_utc(instant)?
        .format(format_description!(
            "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
        ))
        .expires_context(&instant.to_string())
}

impl From<f64> for Expires {
    fn from(secs: f64) -> Self {
        Expires::Seconds(secs)
    }
}

impl From<i32> for Expires {
    fn from(secs: i32) -> Self {
        Expires::Seconds(f64::from(secs))
    }
}

impl From<u32> for Expires {
    fn from(secs: u32) -> Self {
        Expires::Seconds(f64::from(secs))
    }
}

impl From<i64> for Expires {
    fn from(secs: i64) -> Self {
        Expires::Seconds(secs as f64)
    }
}

impl From<Duration> for Expires {
    fn from(duration: Duration) -> Self {
        Expires::Seconds(duration.as_seconds_f64())
    }
}

impl From<&str> for Expires {
    fn from(text: &str) -> Self {
        Expires::Text(text.to_string())
    }
}

impl From<String> for Expires {
    fn from(text: String) -> Self {
        Expires::Text(text)
    }
}

impl From<OffsetDateTime> for Expires {
    fn from(instant: OffsetDateTime) -> Self {
        Expires::At(instant)
    }
}

impl TryFrom<&serde_json::Value> for Expires {
    type Error = CookieError;

    /// Numbers are seconds, strings are dates; any other JSON shape is rejected.
    fn try_from(value: &serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Number(n) => n
                .as_f64()
                .map(Expires::Seconds)
                .expires_context(&value.to_string()),
            serde_json::Value::String(s) => Ok(Expires::Text(s.clone())),
            other => Err(CookieError::invalid_expires(other.to_string())),
        }
    }
}
