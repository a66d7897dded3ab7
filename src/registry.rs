use std::hash::Hash;
use std::sync::{Mutex, MutexGuard, Once};

use indexmap::IndexMap;

/// The structured form of one source-table tuple.
///
/// Each domain (methods, statuses, headers, MIME types) defines its entry
/// type once and derives its registry from an ordered literal list of them.
/// The associated types keep the key and group spaces distinct per domain,
/// so a lookup in one registry can never hand back another domain's data.
pub trait RegistryEntry: Clone {
    /// The domain's primary identifier (verb string, status code, …).
    type Key: Eq + Hash + Clone + std::fmt::Debug;
    /// The domain's category label. Domains without grouping use `()`.
    type Group: Eq + Hash + Clone + std::fmt::Debug;

    /// Returns the entry's primary key.
    fn key(&self) -> Self::Key;

    /// Returns every group the entry belongs to.
    ///
    /// An HTTP verb can be both idempotent and cacheable at once, so this
    /// is a list rather than a single value. Group-less domains keep the
    /// default empty implementation.
    fn groups(&self) -> Vec<Self::Group> { Vec::new() }
}

/// A key-indexed entry table with a derived group index.
///
/// Built once from an ordered entry list and never mutated afterwards.
/// Source order is preserved for both the entries and the per-group key
/// lists. Duplicate keys within one source list are a construction-time
/// defect.
///
/// # Examples
///
/// ```
/// use http_convenience::{MethodEntry, MethodGroup, RegistryTable};
///
/// let table = RegistryTable::from_entries([
///     MethodEntry::new("GET", vec![MethodGroup::Safe, MethodGroup::Idempotent]),
///     MethodEntry::new("POST", vec![MethodGroup::NonIdempotent]),
/// ]);
///
/// assert_eq!(table.len(), 2);
/// assert!(table.get(&"GET".to_string()).is_some());
/// assert_eq!(table.keys_in_group(&MethodGroup::Safe), ["GET".to_string()]);
/// ```
#[derive(Clone, Debug)]
pub struct RegistryTable<E: RegistryEntry> {
    entries: IndexMap<E::Key, E>,
    by_group: IndexMap<E::Group, Vec<E::Key>>,
}

impl<E: RegistryEntry> RegistryTable<E> {
    /// Builds the table and its group index from an ordered entry list.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = E>,
    {
        let mut table = IndexMap::new();
        for entry in entries {
            let previous = table.insert(entry.key(), entry);
            debug_assert!(previous.is_none(), "duplicate key in a source table");
        }

        let mut by_group: IndexMap<E::Group, Vec<E::Key>> = IndexMap::new();
        for (key, entry) in &table {
            for group in entry.groups() {
                by_group.entry(group).or_default().push(key.clone());
            }
        }

        Self { entries: table, by_group }
    }

    /// Looks up the entry at `key`.
    pub fn get(&self, key: &E::Key) -> Option<&E> { self.entries.get(key) }

    /// Returns whether `key` is present.
    pub fn contains_key(&self, key: &E::Key) -> bool { self.entries.contains_key(key) }

    /// Returns the keys of every entry in `group`, in source order.
    pub fn keys_in_group(&self, group: &E::Group) -> &[E::Key] {
        self.by_group.get(group).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterates the entries in source order.
    pub fn values(&self) -> impl Iterator<Item = &E> { self.entries.values() }

    /// Returns the number of entries.
    pub fn len(&self) -> usize { self.entries.len() }

    /// Returns whether the table is empty.
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

/// A built-in entry table plus an optional, wholesale-replaceable custom
/// layer, queried through the effective (merged) view.
///
/// The built-in table is set at construction and never changes. A caller
/// may install a custom table over it with [`extend`](Registry::extend).
/// Installing another one replaces the previous custom table entirely:
/// last write wins, extensions are never cumulative.
/// [`reset`](Registry::reset) returns the registry to the built-in-only
/// state. Every query reads the merged view computed on the spot. Custom
/// entries shadow built-in entries that share a key, and keys present
/// only in the built-in table remain visible.
///
/// # Examples
///
/// ```
/// use http_convenience::{MethodEntry, MethodGroup, Registry, RegistryTable};
///
/// let builtin = RegistryTable::from_entries([
///     MethodEntry::new("GET", vec![MethodGroup::Safe]),
/// ]);
/// let mut registry = Registry::new(builtin);
///
/// assert!(!registry.is_extended());
/// registry.extend([MethodEntry::custom("LINK")]);
/// assert!(registry.contains(&"LINK".to_string()));
///
/// registry.reset();
/// assert!(!registry.contains(&"LINK".to_string()));
/// assert!(registry.contains(&"GET".to_string()));
/// ```
#[derive(Clone, Debug)]
pub struct Registry<E: RegistryEntry> {
    builtin: RegistryTable<E>,
    custom: Option<RegistryTable<E>>,
}

impl<E: RegistryEntry> Registry<E> {
    /// Creates a registry over the given built-in table.
    pub fn new(builtin: RegistryTable<E>) -> Self {
        Self { builtin, custom: None }
    }

    /// Returns whether a custom table is currently installed.
    pub fn is_extended(&self) -> bool { self.custom.is_some() }

    /// Builds a custom table from `entries` and installs it, discarding
    /// any previously installed custom table.
    ///
    /// Keys colliding with built-in keys are the intended override
    /// mechanism and are not validated against.
    pub fn extend<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = E>,
    {
        self.custom = Some(RegistryTable::from_entries(entries));
    }

    /// Drops the custom table. Afterwards the effective view is exactly
    /// the built-in table. Idempotent.
    pub fn reset(&mut self) { self.custom = None; }

    /// Looks up the entry at `key` in the effective view.
    pub fn get(&self, key: &E::Key) -> Option<&E> {
        self.custom
            .as_ref()
            .and_then(|custom| custom.get(key))
            .or_else(|| self.builtin.get(key))
    }

    /// Returns whether `key` is present in the effective view.
    pub fn contains(&self, key: &E::Key) -> bool {
        self.custom.as_ref().is_some_and(|custom| custom.contains_key(key))
            || self.builtin.contains_key(key)
    }

    /// Iterates the effective view: built-in entries (shadowed ones
    /// replaced by their custom counterparts) followed by custom-only
    /// entries.
    pub fn entries(&self) -> impl Iterator<Item = &E> {
        let custom = self.custom.as_ref();
        let merged = self.builtin.entries.iter().map(move |(key, entry)| {
            custom.and_then(|table| table.get(key)).unwrap_or(entry)
        });
        let custom_only = custom.into_iter().flat_map(|table| {
            table
                .entries
                .iter()
                .filter(|(key, _)| !self.builtin.contains_key(*key))
                .map(|(_, entry)| entry)
        });
        merged.chain(custom_only)
    }

    /// Iterates the keys of the effective view.
    pub fn keys(&self) -> impl Iterator<Item = &E::Key> {
        let custom = self.custom.as_ref();
        let builtin = self.builtin.entries.keys();
        let custom_only = custom.into_iter().flat_map(|table| {
            table.entries.keys().filter(|key| !self.builtin.contains_key(*key))
        });
        builtin.chain(custom_only)
    }

    /// Returns every key of the effective view as an owned list.
    pub fn keys_vec(&self) -> Vec<E::Key> {
        self.keys().cloned().collect()
    }

    /// Returns whether `key` appears among `candidates`, defaulting to
    /// every key of the effective view when no candidates are supplied.
    pub fn is_among(&self, key: &E::Key, candidates: Option<&[E::Key]>) -> bool {
        match candidates {
            Some(list) => list.contains(key),
            None => self.contains(key),
        }
    }

    /// Returns whether the entry at `key` belongs to `group`. Unregistered
    /// keys are simply not in any group.
    pub fn in_group(&self, key: &E::Key, group: &E::Group) -> bool {
        self.get(key).is_some_and(|entry| entry.groups().contains(group))
    }

    /// Returns whether the entry at `key` belongs to any of `groups`, or
    /// to all of them with `match_all`.
    pub fn in_groups(&self, key: &E::Key, groups: &[E::Group], match_all: bool) -> bool {
        let Some(entry) = self.get(key) else {
            return false;
        };
        let membership = entry.groups();
        if match_all {
            groups.iter().all(|group| membership.contains(group))
        } else {
            groups.iter().any(|group| membership.contains(group))
        }
    }

    /// Returns the groups of the entry at `key`, or `None` when the key is
    /// not registered.
    pub fn groups_of(&self, key: &E::Key) -> Option<Vec<E::Group>> {
        self.get(key).map(RegistryEntry::groups)
    }

    /// Returns the keys of every effective entry in `group`.
    pub fn keys_in_group(&self, group: &E::Group) -> Vec<E::Key> {
        match &self.custom {
            None => self.builtin.keys_in_group(group).to_vec(),
            Some(_) => self
                .entries()
                .filter(|entry| entry.groups().contains(group))
                .map(RegistryEntry::key)
                .collect(),
        }
    }

    /// Returns the immutable built-in table.
    pub fn builtin(&self) -> &RegistryTable<E> { &self.builtin }
}

/// A lazily initialized singleton holding one domain's registry.
///
/// Initialization runs exactly once across all threads via
/// `std::sync::Once`; the registry itself sits behind a mutex. The crate
/// provides no finer-grained locking: callers that interleave
/// `extend`/`reset` with queries from several threads must hold the guard
/// across the whole sequence to observe a consistent state.
///
/// # Examples
///
/// ```
/// use http_convenience::METHODS;
///
/// let binding = METHODS.get();
/// let methods = binding.as_ref().unwrap();
/// assert!(methods.is_valid("GET"));
/// ```
#[derive(Debug)]
pub struct LazyRegistry<T> {
    init: Once,
    data: Mutex<Option<T>>,
    make: fn() -> T,
}

impl<T> LazyRegistry<T> {
    /// Creates a holder that builds its registry with `make` on first
    /// access.
    pub const fn new(make: fn() -> T) -> Self {
        Self { init: Once::new(), data: Mutex::new(None), make }
    }

    /// Gets the registry, initializing it if necessary.
    pub fn get(&self) -> MutexGuard<'_, Option<T>> {
        self.init.call_once(|| {
            *self.data.lock().unwrap() = Some((self.make)());
        });
        self.data.lock().unwrap()
    }
}
