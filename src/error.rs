use std::error::Error as StdError;

/// The crate-wide error type.
///
/// Carries a descriptive message and, optionally, the originating error.
/// When an originating error is supplied the display message is composed
/// as `"<message> (original message: <original>)"` so the higher-level
/// context is preserved alongside the cause.
///
/// Only the strict `normalize` operations return this error; boolean
/// probes and lookups report misses as `false`/`None` instead.
///
/// # Examples
///
/// ```
/// use http_convenience::HttpConvenienceError;
///
/// let error = HttpConvenienceError::new("something went wrong");
/// assert_eq!(error.to_string(), "something went wrong");
///
/// let cause = "42x".parse::<u16>().unwrap_err();
/// let error = HttpConvenienceError::with_source("could not coerce the code", cause);
/// assert!(error.to_string().contains("(original message:"));
/// ```
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct HttpConvenienceError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl HttpConvenienceError {
    /// Creates an error from a message alone.
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), source: None }
    }

    /// Creates an error wrapping the originating error.
    ///
    /// The composed message appends `(original message: …)` and the
    /// original error stays reachable through [`std::error::Error::source`].
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        let source = source.into();
        Self {
            message: format!("{} (original message: {})", message.into(), source),
            source: Some(source),
        }
    }

    /// Returns the composed error message.
    pub fn message(&self) -> &str { &self.message }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, HttpConvenienceError>;
