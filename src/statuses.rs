use std::fmt;

use paste::paste;

use crate::error::{HttpConvenienceError, Result};
use crate::registry::{LazyRegistry, Registry, RegistryEntry, RegistryTable};

/// One HTTP response status: code and reason phrase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Status {
    code: u16,
    message: &'static str,
}

impl Status {
    /// Creates a status at compile time.
    pub const fn new(code: u16, message: &'static str) -> Self {
        Self { code, message }
    }

    /// Returns the numeric code.
    pub fn code(&self) -> u16 { self.code }

    /// Returns the reason phrase.
    pub fn message(&self) -> &'static str { self.message }

    /// Returns the numeric-range classification of the code, or `None`
    /// outside the 100–599 range.
    pub fn group(&self) -> Option<StatusGroup> { StatusGroup::of_code(self.code) }
}

impl RegistryEntry for Status {
    type Key = u16;
    type Group = StatusGroup;

    fn key(&self) -> u16 { self.code }
    fn groups(&self) -> Vec<StatusGroup> {
        StatusGroup::of_code(self.code).into_iter().collect()
    }
}

/// The status code classes of RFC 9110 §15, derived from the code's
/// numeric range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusGroup {
    Info,
    Success,
    Redirect,
    ClientErr,
    ServerErr,
}

impl StatusGroup {
    /// Classifies a code by numeric range: 1xx info, 2xx success, 3xx
    /// redirect, 4xx client error, 5xx server error.
    pub fn of_code(code: u16) -> Option<Self> {
        match code {
            100..=199 => Some(StatusGroup::Info),
            200..=299 => Some(StatusGroup::Success),
            300..=399 => Some(StatusGroup::Redirect),
            400..=499 => Some(StatusGroup::ClientErr),
            500..=599 => Some(StatusGroup::ServerErr),
            _ => None,
        }
    }

    /// Returns the lowercase label of the class.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusGroup::Info => "info",
            StatusGroup::Success => "success",
            StatusGroup::Redirect => "redirect",
            StatusGroup::ClientErr => "clienterr",
            StatusGroup::ServerErr => "servererr",
        }
    }
}

impl fmt::Display for StatusGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A macro that declares a status constant at compile time.
///
/// Creates two constants: a raw `u16` code with the suffix `_CODE` and a
/// [`Status`] constant with the given name, code and reason phrase.
///
/// # Examples
///
/// ```
/// use http_convenience::*;
/// use paste::paste;
///
/// const_status!(799, VENDOR_STATUS, "Vendor Specific");
///
/// assert_eq!(VENDOR_STATUS.code(), 799);
/// assert_eq!(VENDOR_STATUS.message(), "Vendor Specific");
///
/// paste! {
///     assert_eq!(VENDOR_STATUS_CODE, 799);
/// }
/// ```
#[macro_export]
macro_rules! const_status {
    ($code:expr, $const_name:ident, $message:expr) => {
        paste! {
            pub const [<$const_name _CODE>]: u16 = $code;
        }
        pub const $const_name: $crate::Status = $crate::Status::new($code, $message);
    };
}

// Reason phrases per RFC 9110 §15 and the IANA status code registry,
// https://www.iana.org/assignments/http-status-codes/http-status-codes.xhtml

//
// Informational
//

const_status!(100, CONTINUE, "Continue");
const_status!(101, SWITCHING_PROTOCOLS, "Switching Protocols");
const_status!(102, PROCESSING, "Processing");
const_status!(103, EARLY_HINTS, "Early Hints");

//
// Successful
//

const_status!(200, OK, "OK");
const_status!(201, CREATED, "Created");
const_status!(202, ACCEPTED, "Accepted");
const_status!(203, NON_AUTHORITATIVE_INFORMATION, "Non-Authoritative Information");
const_status!(204, NO_CONTENT, "No Content");
const_status!(205, RESET_CONTENT, "Reset Content");
const_status!(206, PARTIAL_CONTENT, "Partial Content");
const_status!(207, MULTI_STATUS, "Multi-Status");
const_status!(208, ALREADY_REPORTED, "Already Reported");
const_status!(226, IM_USED, "IM Used");

//
// Redirection
//

const_status!(300, MULTIPLE_CHOICES, "Multiple Choices");
const_status!(301, MOVED_PERMANENTLY, "Moved Permanently");
const_status!(302, FOUND, "Found");
const_status!(303, SEE_OTHER, "See Other");
const_status!(304, NOT_MODIFIED, "Not Modified");
const_status!(305, USE_PROXY, "Use Proxy");
const_status!(307, TEMPORARY_REDIRECT, "Temporary Redirect");
const_status!(308, PERMANENT_REDIRECT, "Permanent Redirect");

//
// Client error
//

const_status!(400, BAD_REQUEST, "Bad Request");
const_status!(401, UNAUTHORIZED, "Unauthorized");
const_status!(402, PAYMENT_REQUIRED, "Payment Required");
const_status!(403, FORBIDDEN, "Forbidden");
const_status!(404, NOT_FOUND, "Not Found");
const_status!(405, METHOD_NOT_ALLOWED, "Method Not Allowed");
const_status!(406, NOT_ACCEPTABLE, "Not Acceptable");
const_status!(407, PROXY_AUTHENTICATION_REQUIRED, "Proxy Authentication Required");
const_status!(408, REQUEST_TIMEOUT, "Request Timeout");
const_status!(409, CONFLICT, "Conflict");
const_status!(410, GONE, "Gone");
const_status!(411, LENGTH_REQUIRED, "Length Required");
const_status!(412, PRECONDITION_FAILED, "Precondition Failed");
const_status!(413, CONTENT_TOO_LARGE, "Content Too Large");
const_status!(414, URI_TOO_LONG, "URI Too Long");
const_status!(415, UNSUPPORTED_MEDIA_TYPE, "Unsupported Media Type");
const_status!(416, RANGE_NOT_SATISFIABLE, "Range Not Satisfiable");
const_status!(417, EXPECTATION_FAILED, "Expectation Failed");
const_status!(421, MISDIRECTED_REQUEST, "Misdirected Request");
const_status!(422, UNPROCESSABLE_CONTENT, "Unprocessable Content");
const_status!(423, LOCKED, "Locked");
const_status!(424, FAILED_DEPENDENCY, "Failed Dependency");
const_status!(425, TOO_EARLY, "Too Early");
const_status!(426, UPGRADE_REQUIRED, "Upgrade Required");
const_status!(428, PRECONDITION_REQUIRED, "Precondition Required");
const_status!(429, TOO_MANY_REQUESTS, "Too Many Requests");
const_status!(431, REQUEST_HEADER_FIELDS_TOO_LARGE, "Request Header Fields Too Large");
const_status!(451, UNAVAILABLE_FOR_LEGAL_REASONS, "Unavailable For Legal Reasons");

//
// Server error
//

const_status!(500, INTERNAL_SERVER_ERROR, "Internal Server Error");
const_status!(501, NOT_IMPLEMENTED, "Not Implemented");
const_status!(502, BAD_GATEWAY, "Bad Gateway");
const_status!(503, SERVICE_UNAVAILABLE, "Service Unavailable");
const_status!(504, GATEWAY_TIMEOUT, "Gateway Timeout");
const_status!(505, HTTP_VERSION_NOT_SUPPORTED, "HTTP Version Not Supported");
const_status!(506, VARIANT_ALSO_NEGOTIATES, "Variant Also Negotiates");
const_status!(507, INSUFFICIENT_STORAGE, "Insufficient Storage");
const_status!(508, LOOP_DETECTED, "Loop Detected");
const_status!(510, NOT_EXTENDED, "Not Extended");
const_status!(511, NETWORK_AUTHENTICATION_REQUIRED, "Network Authentication Required");

/// The ordered built-in status list.
const BUILTIN_STATUSES: &[Status] = &[
    CONTINUE,
    SWITCHING_PROTOCOLS,
    PROCESSING,
    EARLY_HINTS,
    OK,
    CREATED,
    ACCEPTED,
    NON_AUTHORITATIVE_INFORMATION,
    NO_CONTENT,
    RESET_CONTENT,
    PARTIAL_CONTENT,
    MULTI_STATUS,
    ALREADY_REPORTED,
    IM_USED,
    MULTIPLE_CHOICES,
    MOVED_PERMANENTLY,
    FOUND,
    SEE_OTHER,
    NOT_MODIFIED,
    USE_PROXY,
    TEMPORARY_REDIRECT,
    PERMANENT_REDIRECT,
    BAD_REQUEST,
    UNAUTHORIZED,
    PAYMENT_REQUIRED,
    FORBIDDEN,
    NOT_FOUND,
    METHOD_NOT_ALLOWED,
    NOT_ACCEPTABLE,
    PROXY_AUTHENTICATION_REQUIRED,
    REQUEST_TIMEOUT,
    CONFLICT,
    GONE,
    LENGTH_REQUIRED,
    PRECONDITION_FAILED,
    CONTENT_TOO_LARGE,
    URI_TOO_LONG,
    UNSUPPORTED_MEDIA_TYPE,
    RANGE_NOT_SATISFIABLE,
    EXPECTATION_FAILED,
    MISDIRECTED_REQUEST,
    UNPROCESSABLE_CONTENT,
    LOCKED,
    FAILED_DEPENDENCY,
    TOO_EARLY,
    UPGRADE_REQUIRED,
    PRECONDITION_REQUIRED,
    TOO_MANY_REQUESTS,
    REQUEST_HEADER_FIELDS_TOO_LARGE,
    UNAVAILABLE_FOR_LEGAL_REASONS,
    INTERNAL_SERVER_ERROR,
    NOT_IMPLEMENTED,
    BAD_GATEWAY,
    SERVICE_UNAVAILABLE,
    GATEWAY_TIMEOUT,
    HTTP_VERSION_NOT_SUPPORTED,
    VARIANT_ALSO_NEGOTIATES,
    INSUFFICIENT_STORAGE,
    LOOP_DETECTED,
    NOT_EXTENDED,
    NETWORK_AUTHENTICATION_REQUIRED,
];

/// The HTTP status codes registry.
///
/// Unlike the other domains this registry is permanently built-in-only:
/// the IANA code space is not open for runtime extension here.
///
/// # Examples
///
/// ```
/// use http_convenience::{StatusGroup, StatusRegistry};
///
/// let statuses = StatusRegistry::new();
///
/// assert!(statuses.is_valid(404));
/// assert_eq!(statuses.message(404), Some("Not Found"));
/// assert_eq!(statuses.group_of(404), Some(StatusGroup::ClientErr));
/// assert_eq!(statuses.group_of(999), None);
/// assert_eq!(statuses.normalize("200").unwrap(), 200);
/// ```
#[derive(Clone, Debug)]
pub struct StatusRegistry {
    registry: Registry<Status>,
}

impl StatusRegistry {
    /// Creates the registry over the built-in status table.
    pub fn new() -> Self {
        Self {
            registry: Registry::new(RegistryTable::from_entries(
                BUILTIN_STATUSES.iter().copied(),
            )),
        }
    }

    /// Checks whether `code` is a registered status code.
    pub fn is_valid(&self, code: u16) -> bool { self.registry.contains(&code) }

    /// Checks whether a numeric string holds a registered status code.
    /// Non-numeric input is simply not valid, never an error.
    pub fn is_valid_str(&self, code: &str) -> bool {
        code.trim().parse::<u16>().is_ok_and(|code| self.is_valid(code))
    }

    /// Checks whether `code` appears among `candidates`, defaulting to
    /// every registered code.
    pub fn is_among(&self, code: u16, candidates: Option<&[u16]>) -> bool {
        self.registry.is_among(&code, candidates)
    }

    /// Returns the class of a registered code, or `None` when the code is
    /// not registered.
    pub fn group_of(&self, code: u16) -> Option<StatusGroup> {
        self.registry.get(&code).and_then(Status::group)
    }

    /// Checks whether a registered code belongs to `group`.
    pub fn in_group(&self, code: u16, group: StatusGroup) -> bool {
        self.registry.in_group(&code, &group)
    }

    /// Returns the reason phrase of a registered code.
    pub fn message(&self, code: u16) -> Option<&'static str> {
        self.registry.get(&code).map(Status::message)
    }

    /// Returns every registered code in `group`, in source order.
    pub fn codes_in_group(&self, group: StatusGroup) -> Vec<u16> {
        self.registry.keys_in_group(&group)
    }

    /// Coerces a numeric string to a registered status code.
    ///
    /// Fails when the string does not parse as a number or when the
    /// parsed code is not registered.
    pub fn normalize(&self, code: &str) -> Result<u16> {
        let parsed = code.trim().parse::<u16>().map_err(|error| {
            HttpConvenienceError::with_source(
                format!("\"{code}\" should coerce to a valid HTTP status code"),
                error,
            )
        })?;
        self.normalize_code(parsed)
    }

    /// Validates an already-numeric code, returning it unchanged.
    pub fn normalize_code(&self, code: u16) -> Result<u16> {
        if self.is_valid(code) {
            Ok(code)
        } else {
            Err(HttpConvenienceError::new(format!(
                "\"{code}\" should be a valid HTTP status code"
            )))
        }
    }
}

impl Default for StatusRegistry {
    fn default() -> Self { Self::new() }
}

/// The process-wide HTTP statuses registry, lazily initialized on first
/// access.
pub static STATUSES: LazyRegistry<StatusRegistry> = LazyRegistry::new(StatusRegistry::new);
