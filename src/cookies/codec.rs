//! Cookie string encoding and decoding.
//!
//! Two directions:
//! - [`cookie_fragment`] builds the `key=value;path=..;domain=..;expires=..;secure`
//!   fragment written to a document.
//! - [`parse_cookie_string`] reads a document's `k1=v1; k2=v2` string into a map.
//!
//! Keys and values are percent-encoded with different safe sets, both derived
//! from RFC 6265 (`cookie-name` is a token, `cookie-value` is `cookie-octet*`).

use crate::base::cookieerror::Result;
use crate::cookies::expires::to_utc_string;
use percent_encoding::{
    percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS, NON_ALPHANUMERIC,
};
use std::collections::HashMap;
use time::OffsetDateTime;

/// Characters escaped in cookie keys.
///
/// Everything but alphanumerics, the URI-component marks `-_.!~*'` and the
/// token characters ``#$&+^`|``. Parentheses are separators in RFC 6265 and
/// stay escaped.
const KEY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'^')
    .remove(b'`')
    .remove(b'|');

/// Characters escaped in cookie values: anything outside `cookie-octet`,
/// plus `%` so decoding is unambiguous.
const VALUE_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'%')
    .add(b',')
    .add(b';')
    .add(b'\\');

/// Separator between pairs in a document cookie string.
const PAIR_SEPARATOR: &str = "; ";

pub fn encode_key(key: &str) -> String {
    utf8_percent_encode(key, KEY_ENCODE_SET).to_string()
}

pub fn encode_value(value: &str) -> String {
    utf8_percent_encode(value, VALUE_ENCODE_SET).to_string()
}

/// Effective attributes of a single write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FragmentAttributes<'a> {
    pub path: Option<&'a str>,
    pub domain: Option<&'a str>,
    pub expires: Option<OffsetDateTime>,
    pub secure: bool,
}

/// Build the fragment written to a document for one cookie.
///
/// Empty `path`/`domain` are treated as absent.
pub fn cookie_fragment(key: &str, value: &str, attrs: &FragmentAttributes<'_>) -> Result<String> {
    let mut fragment = format!("{}={}", encode_key(key), encode_value(value));

    if let Some(path) = attrs.path.filter(|p| !p.is_empty()) {
        fragment.push_str(";path=");
        fragment.push_str(path);
    }
    if let Some(domain) = attrs.domain.filter(|d| !d.is_empty()) {
        fragment.push_str(";domain=");
        fragment.push_str(domain);
    }
    if let Some(expires) = attrs.expires {
        fragment.push_str(";expires=");
        fragment.push_str(&to_utc_string(expires)?);
    }
    if attrs.secure {
        fragment.push_str(";secure");
    }

    Ok(fragment)
}

/// A decoded `key=value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookiePair {
    pub key: String,
    pub value: String,
}

/// Split one pair at the first `=` and decode both halves.
///
/// A pair without `=` is a key with an empty value (older browsers drop the
/// `=` for empty cookies). Returns `None` when either half does not decode to
/// UTF-8.
pub fn parse_pair(pair: &str) -> Option<CookiePair> {
    let (key, value) = pair.split_once('=').unwrap_or((pair, ""));

    let decoded_key = percent_decode_str(key).decode_utf8();
    let decoded_value = percent_decode_str(value).decode_utf8();

    match (decoded_key, decoded_value) {
        (Ok(key), Ok(value)) => Some(CookiePair {
            key: key.into_owned(),
            value: value.into_owned(),
        }),
        _ => {
            tracing::warn!(pair = %pair, "could not decode cookie pair, skipping");
            None
        }
    }
}

/// Parse a document cookie string. The first occurrence of a key wins.
pub fn parse_cookie_string(raw: &str) -> HashMap<String, String> {
    let mut cookies = HashMap::new();
    if raw.is_empty() {
        return cookies;
    }

    for pair in raw.split(PAIR_SEPARATOR).filter_map(parse_pair) {
        cookies.entry(pair.key).or_insert(pair.value);
    }

    cookies
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn plain(key: &str, value: &str) -> String {
        cookie_fragment(key, value, &FragmentAttributes::default()).unwrap()
    }

    #[test]
    fn test_key_value_separator() {
        assert_eq!(plain("key", "value"), "key=value");
        assert_eq!(plain("key", "0"), "key=0");
    }

    #[test]
    fn test_key_encoding() {
        assert_eq!(
            encode_key("\\\",; ñâé"),
            "%5C%22%2C%3B%20%C3%B1%C3%A2%C3%A9"
        );
    }

    #[test]
    fn test_key_keeps_token_characters() {
        assert_eq!(encode_key("#$%&+^`|"), "#$%25&+^`|");
    }

    #[test]
    fn test_key_escapes_parentheses() {
        assert_eq!(encode_key("()"), "%28%29");
    }

    #[test]
    fn test_key_keeps_uri_marks() {
        assert_eq!(encode_key("a-b_c.d!e~f*g'h"), "a-b_c.d!e~f*g'h");
        assert_eq!(encode_key("a=b/c"), "a%3Db%2Fc");
    }

    #[test]
    fn test_value_encoding() {
        assert_eq!(
            encode_value("\\\",; ñâé%"),
            "%5C%22%2C%3B%20%C3%B1%C3%A2%C3%A9%25"
        );
        assert_eq!(encode_value("tab\there\u{7f}"), "tab%09here%7F");
    }

    #[test]
    fn test_value_keeps_cookie_octets() {
        assert_eq!(
            encode_value("#$&+/:<=>?@[]^`{|}~%"),
            "#$&+/:<=>?@[]^`{|}~%25"
        );
        assert_eq!(encode_value("()*'-.!"), "()*'-.!");
    }

    #[test]
    fn test_fragment_attributes() {
        let attrs = FragmentAttributes {
            path: Some("/"),
            ..Default::default()
        };
        assert_eq!(cookie_fragment("key", "value", &attrs).unwrap(), "key=value;path=/");

        let attrs = FragmentAttributes {
            domain: Some("www.example.org"),
            ..Default::default()
        };
        assert_eq!(
            cookie_fragment("key", "value", &attrs).unwrap(),
            "key=value;domain=www.example.org"
        );

        let attrs = FragmentAttributes {
            secure: true,
            ..Default::default()
        };
        assert_eq!(cookie_fragment("key", "value", &attrs).unwrap(), "key=value;secure");
    }

    #[test]
    fn test_fragment_expires() {
        let attrs = FragmentAttributes {
            expires: Some(datetime!(2015-01-01 00:00:00 UTC)),
            ..Default::default()
        };
        assert_eq!(
            cookie_fragment("key", "value", &attrs).unwrap(),
            "key=value;expires=Thu, 01 Jan 2015 00:00:00 GMT"
        );
    }

    #[test]
    fn test_fragment_full_order() {
        let attrs = FragmentAttributes {
            path: Some("/cookies"),
            domain: Some("www.example.org"),
            expires: Some(datetime!(9999-12-31 23:59:59 UTC)),
            secure: true,
        };
        assert_eq!(
            cookie_fragment("key", "value", &attrs).unwrap(),
            "key=value;path=/cookies;domain=www.example.org;expires=Fri, 31 Dec 9999 23:59:59 GMT;secure"
        );
    }

    #[test]
    fn test_fragment_skips_empty_path_and_domain() {
        let attrs = FragmentAttributes {
            path: Some(""),
            domain: Some(""),
            ..Default::default()
        };
        assert_eq!(cookie_fragment("key", "value", &attrs).unwrap(), "key=value");
    }

    #[test]
    fn test_parse_cookie_string() {
        let cookies = parse_cookie_string("key=value; other=thing");
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies["key"], "value");
        assert_eq!(cookies["other"], "thing");
    }

    #[test]
    fn test_parse_empty_string() {
        assert!(parse_cookie_string("").is_empty());
    }

    #[test]
    fn test_parse_first_duplicate_wins() {
        let cookies = parse_cookie_string("key=value; key=other");
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies["key"], "value");
    }

    #[test]
    fn test_parse_pair_decodes() {
        let pair = parse_pair("%5C%22%2C%3B%20%C3%B1%C3%A2%C3%A9=value").unwrap();
        assert_eq!(pair.key, "\\\",; ñâé");
        assert_eq!(pair.value, "value");

        let pair = parse_pair("key=%5C%22%2C%3B%20%C3%B1%C3%A2%C3%A9").unwrap();
        assert_eq!(pair.value, "\\\",; ñâé");
    }

    #[test]
    fn test_parse_pair_splits_on_first_equals() {
        let pair = parse_pair("key=a=b=c").unwrap();
        assert_eq!(pair.key, "key");
        assert_eq!(pair.value, "a=b=c");
    }

    #[test]
    fn test_parse_pair_without_equals() {
        let pair = parse_pair("key").unwrap();
        assert_eq!(pair.key, "key");
        assert_eq!(pair.value, "");
    }

    #[test]
    fn test_parse_skips_undecodable_pairs() {
        assert!(parse_pair("key=%FF").is_none());
        let cookies = parse_cookie_string("bad=%C3; good=yes");
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies["good"], "yes");
    }
}
