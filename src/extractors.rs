//! Built-in header value extractors.
//!
//! Each extractor is a plain `(&str) -> T` transform meant to be handed to
//! [`HeaderRegistry::extract_with`](crate::HeaderRegistry::extract_with).
//! Decoding failures never abort a pipeline: a malformed date yields
//! `None`, malformed base64 yields an empty string, and an unrecognized
//! Authorization scheme hands the value back unchanged.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, NaiveDate, Utc};

/// The Authorization credential schemes the token extractor recognizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenScheme {
    Bearer,
    Basic,
    ApiKey,
}

impl TokenScheme {
    /// Returns the scheme token as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenScheme::Bearer => "Bearer",
            TokenScheme::Basic => "Basic",
            TokenScheme::ApiKey => "APIKey",
        }
    }

    /// Detects a leading scheme token followed by whitespace, returning
    /// the scheme and the remaining credential.
    fn detect(value: &str) -> Option<(Self, &str)> {
        for scheme in [TokenScheme::Bearer, TokenScheme::Basic, TokenScheme::ApiKey] {
            if let Some(rest) = value.strip_prefix(scheme.as_str()) {
                let credential = rest.trim_start();
                if credential.len() < rest.len() && !credential.is_empty() {
                    return Some((scheme, credential));
                }
            }
        }
        None
    }
}

impl fmt::Display for TokenScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of Authorization token extraction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthorizationToken {
    /// A bare token (Bearer, APIKey) or the original value when the
    /// scheme was not recognized.
    Value(String),
    /// Basic credentials decoded and split on `:`, usually
    /// `[login, password]`.
    Credentials(Vec<String>),
}

/// Splits a header value into its delimited parts, preserving order.
///
/// Whitespace around the parts is kept as-is; trim at the call site when
/// needed.
///
/// # Examples
///
/// ```
/// use http_convenience::extractors;
///
/// assert_eq!(extractors::split_list("a,b,c", ","), ["a", "b", "c"]);
/// assert_eq!(extractors::split_list("login:password", ":"), ["login", "password"]);
/// assert_eq!(extractors::split_list("", ","), [""]);
/// ```
pub fn split_list(value: &str, delimiter: &str) -> Vec<String> {
    value.split(delimiter).map(str::to_string).collect()
}

/// Parses a header date, trying RFC 2822 (the HTTP date format), then
/// RFC 3339, then a bare `YYYY-MM-DD`. Unparseable input yields `None`.
///
/// # Examples
///
/// ```
/// use http_convenience::extractors;
///
/// assert!(extractors::parse_date("Wed, 21 Oct 2015 07:28:00 GMT").is_some());
/// assert!(extractors::parse_date("2024-12-03").is_some());
/// assert!(extractors::parse_date("not-a-date").is_none());
/// ```
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc2822(value) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Some(date.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Decodes a base64 header value into a UTF-8 string.
///
/// Returns an empty string when the input is not valid base64 or when the
/// decoded bytes are not clean UTF-8 (a replacement character in the
/// decoded text is treated as a decoding failure).
///
/// # Examples
///
/// ```
/// use http_convenience::extractors;
///
/// assert_eq!(extractors::decode_base64("dXNlcjpwYXNz"), "user:pass");
/// assert_eq!(extractors::decode_base64("invalid"), "");
/// assert_eq!(extractors::decode_base64(""), "");
/// ```
pub fn decode_base64(value: &str) -> String {
    let charset_valid = !value.is_empty()
        && value
            .bytes()
            .all(|byte| byte.is_ascii_alphanumeric() || matches!(byte, b'+' | b'/' | b'='));
    if !charset_valid {
        return String::new();
    }

    let Ok(bytes) = STANDARD.decode(value) else {
        return String::new();
    };

    let decoded = String::from_utf8_lossy(&bytes);
    if decoded.contains('\u{FFFD}') {
        return String::new();
    }
    decoded.into_owned()
}

/// Extracts the Authorization header credential, auto-detecting the
/// scheme.
///
/// Basic credentials are base64-decoded and split on `:`; Bearer and
/// APIKey tokens pass through with the scheme stripped; a value with an
/// unrecognized scheme is returned unchanged rather than failing.
///
/// # Examples
///
/// ```
/// use http_convenience::extractors::{self, AuthorizationToken};
///
/// assert_eq!(
///     extractors::token("Basic dXNlcm5hbWU6cGFzc3dvcmQ="),
///     AuthorizationToken::Credentials(vec!["username".into(), "password".into()])
/// );
/// assert_eq!(
///     extractors::token("Bearer abc123"),
///     AuthorizationToken::Value("abc123".into())
/// );
/// assert_eq!(
///     extractors::token("Foo bar"),
///     AuthorizationToken::Value("Foo bar".into())
/// );
/// ```
pub fn token(value: &str) -> AuthorizationToken {
    match TokenScheme::detect(value) {
        Some((TokenScheme::Basic, credential)) => {
            AuthorizationToken::Credentials(split_list(&decode_base64(credential), ":"))
        }
        Some((_, credential)) => AuthorizationToken::Value(credential.to_string()),
        None => AuthorizationToken::Value(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_preserves_order_and_surrounding_whitespace() {
        assert_eq!(split_list("gzip, deflate, br", ","), ["gzip", " deflate", " br"]);
        assert_eq!(split_list("something", ":"), ["something"]);
    }

    #[test]
    fn parse_date_accepts_http_and_iso_formats() {
        let http_date = parse_date("Wed, 21 Oct 2015 07:28:00 GMT").unwrap();
        assert_eq!(http_date.to_rfc2822(), "Wed, 21 Oct 2015 07:28:00 +0000");

        let iso = parse_date("2024-12-03T10:15:30Z").unwrap();
        assert_eq!(iso.timestamp(), 1733220930);

        assert!(parse_date("2024-12-03").is_some());
        assert!(parse_date("03/12/2024").is_none());
    }

    #[test]
    fn decode_base64_signals_failure_with_an_empty_string() {
        assert_eq!(decode_base64("dXNlcjpwYXNz"), "user:pass");
        assert_eq!(decode_base64("not base64!"), "");
        // Valid charset but the decoded bytes are not UTF-8.
        assert_eq!(decode_base64("/////w=="), "");
    }

    #[test]
    fn token_detects_built_in_schemes() {
        assert_eq!(
            token("Basic dXNlcm5hbWU6cGFzc3dvcmQ="),
            AuthorizationToken::Credentials(vec!["username".into(), "password".into()])
        );
        assert_eq!(token("Bearer abc123xyz456"), AuthorizationToken::Value("abc123xyz456".into()));
        assert_eq!(token("APIKey xyz456"), AuthorizationToken::Value("xyz456".into()));
    }

    #[test]
    fn token_passes_unrecognized_schemes_through_unchanged() {
        assert_eq!(token("Foo bar"), AuthorizationToken::Value("Foo bar".into()));
        assert_eq!(token("unknown scheme"), AuthorizationToken::Value("unknown scheme".into()));
        // A scheme token without a credential is not a match either.
        assert_eq!(token("Bearer"), AuthorizationToken::Value("Bearer".into()));
        assert_eq!(token("Bearer   "), AuthorizationToken::Value("Bearer   ".into()));
    }

    #[test]
    fn basic_token_with_malformed_base64_yields_empty_credentials() {
        assert_eq!(token("Basic ???"), AuthorizationToken::Credentials(vec!["".into()]));
    }
}
