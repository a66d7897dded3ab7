use std::fmt;

use crate::error::{HttpConvenienceError, Result};
use crate::registry::{LazyRegistry, Registry, RegistryEntry, RegistryTable};

/// The classification groups of HTTP request methods per RFC 9110.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MethodGroup {
    Safe,
    Idempotent,
    NonIdempotent,
    Cacheable,
    Preflight,
    SpecialPurpose,
}

impl MethodGroup {
    /// Returns the lowercase wire-style label of the group.
    pub fn as_str(&self) -> &'static str {
        match self {
            MethodGroup::Safe => "safe",
            MethodGroup::Idempotent => "idempotent",
            MethodGroup::NonIdempotent => "non_idempotent",
            MethodGroup::Cacheable => "cacheable",
            MethodGroup::Preflight => "preflight",
            MethodGroup::SpecialPurpose => "special_purpose",
        }
    }
}

impl fmt::Display for MethodGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

use MethodGroup::{Cacheable, Idempotent, NonIdempotent, Preflight, Safe, SpecialPurpose};

/// The single source of truth for built-in request methods and their
/// group memberships, per RFC 9110.
///
/// POST is cacheable only when explicitly stated by the response, but it
/// carries the group so "may be cached" queries answer consistently.
const BUILTIN_METHODS: &[(&str, &[MethodGroup])] = &[
    ("GET", &[Safe, Idempotent, Cacheable]),
    ("HEAD", &[Safe, Idempotent, Cacheable]),
    ("POST", &[NonIdempotent, Cacheable]),
    ("PUT", &[Idempotent]),
    ("DELETE", &[Idempotent]),
    ("PATCH", &[NonIdempotent]),
    ("OPTIONS", &[Idempotent, Preflight]),
    ("TRACE", &[Idempotent, Preflight, SpecialPurpose]),
    ("CONNECT", &[SpecialPurpose]),
];

/// One request method with its group memberships.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodEntry {
    name: String,
    groups: Vec<MethodGroup>,
}

impl MethodEntry {
    /// Creates an entry with the given groups. The name is stored in its
    /// canonical uppercase form.
    pub fn new(name: &str, groups: Vec<MethodGroup>) -> Self {
        Self { name: name.to_uppercase(), groups }
    }

    /// Creates a custom entry with no group memberships, the common case
    /// for runtime extension.
    pub fn custom(name: &str) -> Self { Self::new(name, Vec::new()) }

    /// Returns the canonical (uppercase) method name.
    pub fn name(&self) -> &str { &self.name }

    /// Returns the groups the method belongs to.
    pub fn groups(&self) -> &[MethodGroup] { &self.groups }
}

impl RegistryEntry for MethodEntry {
    type Key = String;
    type Group = MethodGroup;

    fn key(&self) -> String { self.name.clone() }
    fn groups(&self) -> Vec<MethodGroup> { self.groups.clone() }
}

/// The HTTP request methods registry.
///
/// Holds the RFC 9110 methods as the built-in table and accepts custom
/// methods at runtime. Method names compare case-insensitively; the
/// canonical form is uppercase.
///
/// # Examples
///
/// ```
/// use http_convenience::{MethodEntry, MethodGroup, MethodRegistry};
///
/// let mut methods = MethodRegistry::new();
///
/// assert!(methods.is_valid("get"));
/// assert!(methods.in_group("GET", MethodGroup::Safe));
/// assert_eq!(methods.normalize("patch").unwrap(), "PATCH");
///
/// methods.extend([MethodEntry::custom("LINK")]);
/// assert!(methods.is_valid("link"));
/// methods.reset();
/// assert!(!methods.is_valid("link"));
/// ```
#[derive(Clone, Debug)]
pub struct MethodRegistry {
    registry: Registry<MethodEntry>,
}

impl MethodRegistry {
    /// Creates a registry with the RFC 9110 built-in methods.
    pub fn new() -> Self {
        let entries = BUILTIN_METHODS
            .iter()
            .map(|(name, groups)| MethodEntry::new(name, groups.to_vec()));
        Self { registry: Registry::new(RegistryTable::from_entries(entries)) }
    }

    /// Checks whether `method` is a registered standard or custom method,
    /// case-insensitively. Never fails: any input merely probes the table.
    pub fn is_valid(&self, method: &str) -> bool {
        self.registry.contains(&method.to_uppercase())
    }

    /// Checks whether every method in the list is registered.
    pub fn is_valid_all<'a, I>(&self, methods: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        methods.into_iter().all(|method| self.is_valid(method))
    }

    /// Checks whether `method` appears among `allowed`, defaulting to
    /// every registered method when `allowed` is `None`.
    pub fn is_among(&self, method: &str, allowed: Option<&[&str]>) -> bool {
        let candidate = method.to_uppercase();
        match allowed {
            Some(list) => list.iter().any(|allowed| allowed.to_uppercase() == candidate),
            None => self.registry.contains(&candidate),
        }
    }

    /// Checks whether `method` belongs to `group`. Unregistered methods
    /// belong to no group.
    pub fn in_group(&self, method: &str, group: MethodGroup) -> bool {
        self.registry.in_group(&method.to_uppercase(), &group)
    }

    /// Checks whether `method` belongs to any of `groups`, or to all of
    /// them with `match_all`.
    ///
    /// ```
    /// use http_convenience::{MethodGroup, MethodRegistry};
    ///
    /// let methods = MethodRegistry::new();
    /// let groups = [MethodGroup::Idempotent, MethodGroup::Cacheable];
    ///
    /// // POST is cacheable but not idempotent.
    /// assert!(methods.in_groups("POST", &groups, false));
    /// assert!(!methods.in_groups("POST", &groups, true));
    /// ```
    pub fn in_groups(&self, method: &str, groups: &[MethodGroup], match_all: bool) -> bool {
        self.registry.in_groups(&method.to_uppercase(), groups, match_all)
    }

    /// Returns the groups of `method`, or `None` when it is not
    /// registered.
    pub fn groups_of(&self, method: &str) -> Option<Vec<MethodGroup>> {
        self.registry.groups_of(&method.to_uppercase())
    }

    /// Returns the canonical names of every method in `group`.
    pub fn methods_in_group(&self, group: MethodGroup) -> Vec<String> {
        self.registry.keys_in_group(&group)
    }

    /// Coerces `method` to its canonical uppercase form, failing when the
    /// result is not a registered method.
    pub fn normalize(&self, method: &str) -> Result<String> {
        let normalized = method.to_uppercase();
        if self.registry.contains(&normalized) {
            Ok(normalized)
        } else {
            Err(HttpConvenienceError::new(format!(
                "\"{method}\" when transformed to upper case should be a valid HTTP standard or custom method"
            )))
        }
    }

    /// Returns every registered method name in source order.
    pub fn values(&self) -> Vec<String> { self.registry.keys_vec() }

    /// Installs `methods` as the custom table, replacing any previous
    /// custom table.
    pub fn extend<I>(&mut self, methods: I)
    where
        I: IntoIterator<Item = MethodEntry>,
    {
        self.registry.extend(methods);
    }

    /// Drops the custom table.
    pub fn reset(&mut self) { self.registry.reset(); }

    /// Returns whether a custom table is installed.
    pub fn is_extended(&self) -> bool { self.registry.is_extended() }
}

impl Default for MethodRegistry {
    fn default() -> Self { Self::new() }
}

/// The process-wide HTTP methods registry, lazily initialized on first
/// access.
///
/// ```
/// use http_convenience::METHODS;
///
/// let binding = METHODS.get();
/// let methods = binding.as_ref().unwrap();
/// assert!(methods.in_group("GET", http_convenience::MethodGroup::Safe));
/// ```
pub static METHODS: LazyRegistry<MethodRegistry> = LazyRegistry::new(MethodRegistry::new);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity_is_case_insensitive() {
        let methods = MethodRegistry::new();

        assert!(methods.is_valid("get"));
        assert!(methods.is_valid("posT"));
        assert!(!methods.is_valid("unknown-verb"));
        assert!(methods.is_valid_all(["get", "PATCH"]));
        assert!(!methods.is_valid_all(["get", "unknown-verb"]));
    }

    #[test]
    fn is_among_defaults_to_all_registered_methods() {
        let methods = MethodRegistry::new();

        assert!(methods.is_among("patch", None));
        assert!(methods.is_among("patch", Some(&["GET", "PATCH"])));
        assert!(!methods.is_among("delete", Some(&["GET", "PATCH"])));
    }

    #[test]
    fn group_queries_follow_rfc_9110_classification() {
        let methods = MethodRegistry::new();

        assert!(methods.in_group("GET", MethodGroup::Safe));
        assert!(methods.in_group("options", MethodGroup::Preflight));
        assert!(!methods.in_group("POST", MethodGroup::Idempotent));
        assert_eq!(methods.groups_of("patch"), Some(vec![MethodGroup::NonIdempotent]));
        assert_eq!(methods.groups_of("unknown-verb"), None);
        assert_eq!(methods.methods_in_group(MethodGroup::Safe), ["GET", "HEAD"]);
    }

    #[test]
    fn normalize_uppercases_or_fails_with_a_descriptive_message() {
        let methods = MethodRegistry::new();

        assert_eq!(methods.normalize("patch").unwrap(), "PATCH");

        let error = methods.normalize("unknown-verb").unwrap_err();
        assert!(error.to_string().contains("valid"));
        assert!(error.to_string().contains("unknown-verb"));
    }

    #[test]
    fn extension_is_replace_not_merge() {
        let mut methods = MethodRegistry::new();

        methods.extend([MethodEntry::custom("LINK")]);
        assert!(methods.is_extended());
        assert!(methods.is_valid("link"));
        assert_eq!(methods.normalize("link").unwrap(), "LINK");

        methods.extend([MethodEntry::custom("UNLINK")]);
        assert!(!methods.is_valid("LINK"));
        assert!(methods.is_valid("UNLINK"));

        methods.reset();
        assert!(!methods.is_extended());
        assert!(!methods.is_valid("UNLINK"));
        assert!(methods.is_valid("GET"));
    }

    #[test]
    fn custom_methods_carry_supplied_groups() {
        let mut methods = MethodRegistry::new();
        methods.extend([MethodEntry::new("purge", vec![MethodGroup::Idempotent])]);

        assert!(methods.in_group("PURGE", MethodGroup::Idempotent));
        assert_eq!(methods.groups_of("LINK"), None);
    }

    #[test]
    fn values_lists_builtin_and_custom_methods() {
        let mut methods = MethodRegistry::new();
        assert_eq!(methods.values().len(), BUILTIN_METHODS.len());

        methods.extend([MethodEntry::custom("LINK")]);
        assert!(methods.values().contains(&"LINK".to_string()));
        assert!(methods.values().contains(&"GET".to_string()));
    }
}
