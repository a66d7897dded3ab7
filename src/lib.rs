//! HTTP Convenience: uniform lookup, validation, and normalization for
//! HTTP literal constants.
//!
//! This crate gathers the HTTP constants an application keeps re-typing
//! as string literals (request methods, response status codes, header
//! names, and MIME types) into per-domain registries with a shared shape:
//! a read-only built-in table, an optional custom table installed at
//! runtime, and queries that answer over the merged view of both.
//!
//! # Basic Usage
//!
//! ```rust
//! use http_convenience::{MethodGroup, MethodRegistry, StatusRegistry};
//!
//! let methods = MethodRegistry::new();
//! assert!(methods.is_valid("get"));
//! assert_eq!(methods.normalize("patch").unwrap(), "PATCH");
//! assert!(methods.in_group("GET", MethodGroup::Safe));
//!
//! let statuses = StatusRegistry::new();
//! assert_eq!(statuses.message(404), Some("Not Found"));
//! assert_eq!(http_convenience::NOT_FOUND_CODE, 404);
//! ```
//!
//! # Runtime Extension
//!
//! Registries that accept custom entries (methods, headers, MIME types)
//! extend by *replacement*: installing a custom table replaces any
//! previous one wholesale, and [`reset`](MethodRegistry::reset) restores
//! the built-in-only state. Custom entries whose key collides with a
//! built-in one shadow it in every query.
//!
//! ```rust
//! use http_convenience::{MethodEntry, MethodRegistry};
//!
//! let mut methods = MethodRegistry::new();
//! methods.extend([MethodEntry::custom("LINK")]);
//! assert!(methods.is_valid("LINK"));
//!
//! methods.extend([MethodEntry::custom("UNLINK")]);
//! assert!(!methods.is_valid("LINK"));
//!
//! methods.reset();
//! assert!(!methods.is_valid("UNLINK"));
//! ```
//!
//! # Headers and Extractors
//!
//! The headers registry doubles as a value-extraction pipeline: it finds
//! a header in any `(name, value)` collection case-insensitively and can
//! push the value through one of the [`extractors`].
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! use http_convenience::{extractors, AuthorizationToken, HeaderRegistry};
//!
//! let registry = HeaderRegistry::new();
//! let headers =
//!     HashMap::from([("Authorization".to_string(), "Bearer abc123".to_string())]);
//!
//! let token = registry.extract_with(&headers, "authorization", extractors::token);
//! assert_eq!(token, Some(AuthorizationToken::Value("abc123".into())));
//! ```
//!
//! # Global Registries
//!
//! Each domain also exposes a process-wide registry ([`METHODS`],
//! [`STATUSES`], [`HEADERS`], [`MIME_TYPES`]) initialized lazily on first
//! access and shared behind a mutex.
//!
//! ```rust
//! use http_convenience::STATUSES;
//!
//! let binding = STATUSES.get();
//! let statuses = binding.as_ref().unwrap();
//! assert!(statuses.is_valid(200));
//! ```

mod error;
pub use error::{HttpConvenienceError, Result};

mod registry;
pub use registry::{LazyRegistry, Registry, RegistryEntry, RegistryTable};

mod methods;
pub use methods::{METHODS, MethodEntry, MethodGroup, MethodRegistry};

mod statuses;
pub use statuses::*;

mod headers;
pub use headers::*;

pub mod extractors;
pub use extractors::{AuthorizationToken, TokenScheme};

mod mime;
pub use mime::{FileExtension, MIME_TYPES, MimeAttribute, MimeEntry, MimeGroup, MimeRegistry};
