use crate::extractors::TokenScheme;
use crate::registry::{LazyRegistry, Registry, RegistryEntry, RegistryTable};

// Canonical header names, request-side first. The split is informal.
pub const AUTHORIZATION: &str = "Authorization";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const ACCEPT: &str = "Accept";
pub const ACCEPT_ENCODING: &str = "Accept-Encoding";
pub const COOKIE: &str = "Cookie";
pub const X_REQUESTED_WITH: &str = "X-Requested-With";
pub const CONTENT_LENGTH: &str = "Content-Length";
pub const SET_COOKIE: &str = "Set-Cookie";
pub const CACHE_CONTROL: &str = "Cache-Control";
pub const ETAG: &str = "ETag";
pub const LOCATION: &str = "Location";
pub const ACCESS_CONTROL_ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";

/// The single source of truth for built-in header names.
const BUILTIN_HEADERS: &[&str] = &[
    AUTHORIZATION,
    CONTENT_TYPE,
    ACCEPT,
    ACCEPT_ENCODING,
    COOKIE,
    X_REQUESTED_WITH,
    CONTENT_LENGTH,
    SET_COOKIE,
    CACHE_CONTROL,
    ETAG,
    LOCATION,
    ACCESS_CONTROL_ALLOW_ORIGIN,
];

/// One header name in its canonical display casing.
///
/// The registry key is the lowercase form: header names compare
/// case-insensitively everywhere in this module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderEntry {
    name: String,
}

impl HeaderEntry {
    /// Creates an entry, keeping the given casing for display.
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string() }
    }

    /// Returns the display-cased name.
    pub fn name(&self) -> &str { &self.name }
}

impl RegistryEntry for HeaderEntry {
    type Key = String;
    type Group = ();

    fn key(&self) -> String { self.name.to_lowercase() }
}

/// The HTTP header names registry and value-extraction pipeline.
///
/// The registry side is the thinnest instance of the shared pattern:
/// built-in names, case-insensitive validity, runtime extension with
/// custom names, no grouping. The pipeline side finds a header in a
/// caller-supplied `(name, value)` collection case-insensitively and
/// optionally pushes the value through an extractor.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
///
/// use http_convenience::{extractors, HeaderRegistry};
///
/// let registry = HeaderRegistry::new();
/// let headers = HashMap::from([("Content-Type".to_string(), "application/json".to_string())]);
///
/// assert_eq!(
///     registry.extract(&headers, "content-type"),
///     Some("application/json".to_string())
/// );
/// assert_eq!(registry.extract(&headers, "Accept"), None);
///
/// let parts = registry.extract_with(&headers, "Content-Type", |value| {
///     extractors::split_list(value, "/")
/// });
/// assert_eq!(parts.unwrap(), ["application", "json"]);
/// ```
#[derive(Clone, Debug)]
pub struct HeaderRegistry {
    registry: Registry<HeaderEntry>,
}

impl HeaderRegistry {
    /// Creates a registry with the built-in header names.
    pub fn new() -> Self {
        let entries = BUILTIN_HEADERS.iter().map(|name| HeaderEntry::new(name));
        Self { registry: Registry::new(RegistryTable::from_entries(entries)) }
    }

    /// Lower-cases a header name to its comparison form.
    pub fn normalize(name: &str) -> String { name.to_lowercase() }

    /// Checks whether `name` is a registered header, case-insensitively.
    pub fn is_valid(&self, name: &str) -> bool {
        self.registry.contains(&Self::normalize(name))
    }

    /// Checks whether `name` appears among `candidates`
    /// (case-insensitively), defaulting to every registered header.
    pub fn is_among(&self, name: &str, candidates: Option<&[&str]>) -> bool {
        let wanted = Self::normalize(name);
        match candidates {
            Some(list) => list.iter().any(|candidate| Self::normalize(candidate) == wanted),
            None => self.registry.contains(&wanted),
        }
    }

    /// Returns every registered header in its display casing.
    pub fn values(&self) -> Vec<String> {
        self.registry.entries().map(|entry| entry.name().to_string()).collect()
    }

    /// Installs custom header names as the custom table, replacing any
    /// previous custom table.
    pub fn extend<I>(&mut self, headers: I)
    where
        I: IntoIterator<Item = HeaderEntry>,
    {
        self.registry.extend(headers);
    }

    /// Drops the custom table.
    pub fn reset(&mut self) { self.registry.reset(); }

    /// Returns whether a custom table is installed.
    pub fn is_extended(&self) -> bool { self.registry.is_extended() }

    /// Extracts the raw value of `name` from a headers collection,
    /// matching the name case-insensitively. Absent header yields `None`.
    pub fn extract<H, K, V>(&self, headers: H, name: &str) -> Option<String>
    where
        H: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.extract_with(headers, name, str::to_string)
    }

    /// Extracts the value of `name` and pushes it through `extractor`.
    ///
    /// The extractor runs only when the header is present; a failed
    /// optional transform is the extractor's own business (the built-in
    /// ones return sentinels rather than failing).
    pub fn extract_with<H, K, V, T, F>(&self, headers: H, name: &str, extractor: F) -> Option<T>
    where
        H: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
        F: FnOnce(&str) -> T,
    {
        let wanted = Self::normalize(name);
        headers
            .into_iter()
            .find(|(key, _)| Self::normalize(key.as_ref()) == wanted)
            .map(|(_, value)| extractor(value.as_ref()))
    }

    /// Checks whether `name` is present and its extracted value equals
    /// `expected`.
    pub fn has_value<H, K, V, T, F>(&self, headers: H, name: &str, expected: &T, extractor: F) -> bool
    where
        H: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
        T: PartialEq,
        F: FnOnce(&str) -> T,
    {
        self.extract_with(headers, name, extractor)
            .is_some_and(|value| &value == expected)
    }

    /// Returns the matching `(name, value)` pair in its original casing,
    /// or `None` when the header is absent.
    pub fn to_key_value<H, K, V>(&self, headers: H, name: &str) -> Option<(String, String)>
    where
        H: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let wanted = Self::normalize(name);
        headers
            .into_iter()
            .find(|(key, _)| Self::normalize(key.as_ref()) == wanted)
            .map(|(key, value)| (key.as_ref().to_string(), value.as_ref().to_string()))
    }

    /// Builds an `Authorization` header pair for the given scheme and
    /// token, e.g. `("Authorization", "Bearer token")`.
    pub fn make_authorization(scheme: TokenScheme, token: &str) -> (String, String) {
        (AUTHORIZATION.to_string(), format!("{scheme} {token}"))
    }
}

impl Default for HeaderRegistry {
    fn default() -> Self { Self::new() }
}

/// The process-wide HTTP headers registry, lazily initialized on first
/// access.
pub static HEADERS: LazyRegistry<HeaderRegistry> = LazyRegistry::new(HeaderRegistry::new);

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::extractors::{self, AuthorizationToken};

    fn headers() -> HashMap<String, String> {
        HashMap::from([
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Accept-Encoding".to_string(), "gzip, deflate, br".to_string()),
            ("Authorization".to_string(), "Bearer abc123".to_string()),
        ])
    }

    #[test]
    fn validity_and_normalization_are_case_insensitive() {
        let registry = HeaderRegistry::new();

        assert!(registry.is_valid("authorization"));
        assert!(registry.is_valid("CONTENT-TYPE"));
        assert!(!registry.is_valid("X-Custom"));
        assert_eq!(HeaderRegistry::normalize("ETag"), "etag");
        assert!(registry.is_among("etag", None));
        assert!(registry.is_among("etag", Some(&["ETAG", "Location"])));
        assert!(!registry.is_among("etag", Some(&["Location"])));
    }

    #[test]
    fn extract_matches_names_case_insensitively() {
        let registry = HeaderRegistry::new();
        let headers = headers();

        assert_eq!(registry.extract(&headers, "content-type").unwrap(), "application/json");
        assert_eq!(registry.extract(&headers, "Content-Type").unwrap(), "application/json");
        assert_eq!(registry.extract(&headers, "Cookie"), None);
    }

    #[test]
    fn extract_with_runs_the_extractor_only_on_a_hit() {
        let registry = HeaderRegistry::new();
        let headers = headers();

        let encodings = registry
            .extract_with(&headers, "accept-encoding", |value| extractors::split_list(value, ","))
            .unwrap();
        assert_eq!(encodings, ["gzip", " deflate", " br"]);

        let token = registry.extract_with(&headers, "authorization", extractors::token).unwrap();
        assert_eq!(token, AuthorizationToken::Value("abc123".to_string()));

        let absent: Option<Vec<String>> =
            registry.extract_with(&headers, "cookie", |value| extractors::split_list(value, ";"));
        assert_eq!(absent, None);
    }

    #[test]
    fn has_value_compares_the_extracted_value() {
        let registry = HeaderRegistry::new();
        let headers = headers();

        assert!(registry.has_value(&headers, "content-type", &"application/json".to_string(), |v| v.to_string()));
        assert!(!registry.has_value(&headers, "content-type", &"text/html".to_string(), |v| v.to_string()));
        assert!(!registry.has_value(&headers, "cookie", &"anything".to_string(), |v| v.to_string()));
    }

    #[test]
    fn to_key_value_returns_the_original_casing() {
        let registry = HeaderRegistry::new();
        let headers = headers();

        let (name, value) = registry.to_key_value(&headers, "CONTENT-TYPE").unwrap();
        assert_eq!(name, "Content-Type");
        assert_eq!(value, "application/json");
        assert_eq!(registry.to_key_value(&headers, "Accept"), None);
    }

    #[test]
    fn make_authorization_composes_scheme_and_token() {
        let (name, value) = HeaderRegistry::make_authorization(TokenScheme::Bearer, "token");
        assert_eq!(name, "Authorization");
        assert_eq!(value, "Bearer token");

        let (_, value) = HeaderRegistry::make_authorization(TokenScheme::ApiKey, "xyz");
        assert_eq!(value, "APIKey xyz");
    }

    #[test]
    fn custom_headers_extend_and_reset() {
        let mut registry = HeaderRegistry::new();

        registry.extend([HeaderEntry::new("X-Correlation-Id")]);
        assert!(registry.is_extended());
        assert!(registry.is_valid("x-correlation-id"));

        registry.reset();
        assert!(!registry.is_valid("x-correlation-id"));
        assert!(registry.is_valid("authorization"));
    }
}
