use std::fmt;

use indexmap::IndexSet;

use crate::error::{HttpConvenienceError, Result};
use crate::registry::{LazyRegistry, Registry, RegistryEntry, RegistryTable};

/// The top-level MIME categories of the built-in table, with `Custom`
/// accommodating extension-supplied groups.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MimeGroup {
    Text,
    Image,
    Video,
    Audio,
    Application,
    Multipart,
    Font,
    Custom(String),
}

impl MimeGroup {
    /// Returns the uppercase group label.
    pub fn as_str(&self) -> &str {
        match self {
            MimeGroup::Text => "TEXT",
            MimeGroup::Image => "IMAGE",
            MimeGroup::Video => "VIDEO",
            MimeGroup::Audio => "AUDIO",
            MimeGroup::Application => "APPLICATION",
            MimeGroup::Multipart => "MULTIPART",
            MimeGroup::Font => "FONT",
            MimeGroup::Custom(label) => label,
        }
    }
}

impl fmt::Display for MimeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file extension attribute with its optional disambiguation qualifier.
///
/// Two distinct MIME types may want the same literal extension
/// (`application/sql` and `application/x-sql` both use `.sql`). The
/// source data marks the second carrier with an `N:` qualifier prefix,
/// as in `"1:.sql"`. The qualifier and the display value are kept as
/// separate fields here, and every query compares the display value
/// only. The prefix encoding never leaves the source table.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FileExtension {
    display: String,
    qualifier: Option<u8>,
}

impl FileExtension {
    /// Parses a source literal, splitting off an `N:` qualifier prefix
    /// when present.
    fn parse(raw: &str) -> Self {
        match raw.split_once(':') {
            Some((prefix, display)) if prefix.chars().all(|c| c.is_ascii_digit()) => Self {
                display: display.to_string(),
                qualifier: prefix.parse().ok(),
            },
            _ => Self { display: raw.to_string(), qualifier: None },
        }
    }

    /// Returns the display value, e.g. `".sql"`.
    pub fn as_str(&self) -> &str { &self.display }

    /// Returns the disambiguation qualifier, if any.
    pub fn qualifier(&self) -> Option<u8> { self.qualifier }

    /// Compares a caller-supplied value against the display value,
    /// tolerating a missing leading dot and ignoring the qualifier.
    pub fn matches(&self, candidate: &str) -> bool {
        self.display == normalize_extension(candidate)
    }
}

impl fmt::Display for FileExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

/// Lower-cases an extension and prepends the leading dot when missing,
/// so `"gz"` and `".gz"` compare equal.
fn normalize_extension(value: &str) -> String {
    let lowered = value.to_lowercase();
    if lowered.starts_with('.') { lowered } else { format!(".{lowered}") }
}

/// The entry attributes a lookup may target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MimeAttribute {
    Type,
    Extension,
}

/// One MIME type: type string, group, and optional file extension.
///
/// `extension` being `None` is the not-applicable sentinel: multipart
/// types have no meaningful file extension and never match extension
/// lookups.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MimeEntry {
    mime_type: String,
    group: MimeGroup,
    extension: Option<FileExtension>,
}

impl MimeEntry {
    /// Creates an entry. The type string is stored lowercase; a raw
    /// extension literal may carry an `N:` disambiguation prefix.
    pub fn new(mime_type: &str, group: MimeGroup, extension: Option<&str>) -> Self {
        Self {
            mime_type: mime_type.to_lowercase(),
            group,
            extension: extension.map(FileExtension::parse),
        }
    }

    /// Returns the canonical (lowercase) type string.
    pub fn mime_type(&self) -> &str { &self.mime_type }

    /// Returns the group.
    pub fn group(&self) -> &MimeGroup { &self.group }

    /// Returns the file extension, or `None` when the attribute is not
    /// applicable.
    pub fn extension(&self) -> Option<&FileExtension> { self.extension.as_ref() }
}

impl RegistryEntry for MimeEntry {
    type Key = String;
    type Group = MimeGroup;

    fn key(&self) -> String { self.mime_type.clone() }
    fn groups(&self) -> Vec<MimeGroup> { vec![self.group.clone()] }
}

use MimeGroup::{Application, Audio, Font, Image, Multipart, Text, Video};

/// The read-only single source of truth for built-in MIME types.
///
/// `None` marks the extension as inapplicable; a `1:` prefix carries the
/// disambiguation qualifier for extensions claimed by an earlier entry.
const BUILTIN_MIME_TYPES: &[(&str, MimeGroup, Option<&str>)] = &[
    // Text
    ("text/plain", Text, Some(".txt")),
    ("text/html", Text, Some(".html")),
    ("text/css", Text, Some(".css")),
    ("text/csv", Text, Some(".csv")),
    ("text/tab-separated-values", Text, Some(".tsv")),
    ("text/xml", Text, Some(".xml")),
    ("text/yaml", Text, Some(".yaml")),
    ("text/markdown", Text, Some(".md")),
    ("text/richtext", Text, Some(".rtf")),
    // Image
    ("image/png", Image, Some(".png")),
    ("image/jpeg", Image, Some(".jpeg")),
    ("image/gif", Image, Some(".gif")),
    ("image/bmp", Image, Some(".bmp")),
    ("image/svg+xml", Image, Some(".svg")),
    ("image/webp", Image, Some(".webp")),
    ("image/heif", Image, Some(".heif")),
    // Video
    ("video/mp4", Video, Some(".mp4")),
    ("video/webm", Video, Some(".webm")),
    ("video/ogg", Video, Some(".ogv")),
    ("video/avi", Video, Some(".avi")),
    ("video/3gpp", Video, Some(".3gp")),
    // Audio
    ("audio/mpeg", Audio, Some(".mp3")),
    ("audio/wav", Audio, Some(".wav")),
    ("audio/ogg", Audio, Some(".ogg")),
    ("audio/flac", Audio, Some(".flac")),
    ("audio/webm", Audio, Some("1:.webm")),
    // Application
    ("application/json", Application, Some(".json")),
    ("application/xml", Application, Some("1:.xml")),
    ("application/javascript", Application, Some(".js")),
    ("application/pdf", Application, Some(".pdf")),
    ("application/zip", Application, Some(".zip")),
    ("application/gzip", Application, Some(".gz")),
    ("application/x-tar", Application, Some(".tar")),
    ("application/java-archive", Application, Some(".jar")),
    ("application/xhtml+xml", Application, Some(".xhtml")),
    ("application/sql", Application, Some(".sql")),
    ("application/x-sql", Application, Some("1:.sql")),
    ("application/ld+json", Application, Some(".jsonld")),
    // Multipart
    ("multipart/form-data", Multipart, None),
    ("multipart/mixed", Multipart, None),
    ("multipart/alternative", Multipart, None),
    ("multipart/related", Multipart, None),
    // Font
    ("font/ttf", Font, Some(".ttf")),
    ("font/otf", Font, Some(".otf")),
    ("font/woff", Font, Some(".woff")),
    ("font/woff2", Font, Some(".woff2")),
];

/// The MIME types registry, the three-attribute instance of the shared
/// pattern.
///
/// Alongside the key-indexed entry table the registry keeps a normalized
/// extension set for the built-in table, giving O(1) extension checks in
/// the common unextended state. Extended registries answer extension
/// checks by scanning the effective entries.
///
/// # Examples
///
/// ```
/// use http_convenience::{MimeAttribute, MimeEntry, MimeGroup, MimeRegistry};
///
/// let mut mime = MimeRegistry::new();
///
/// assert!(mime.is_valid("application/json"));
/// assert!(!mime.is_valid("invalid/type"));
/// assert!(mime.is_valid_attr("gz", MimeAttribute::Extension));
/// assert!(mime.is_valid_attr(".gz", MimeAttribute::Extension));
///
/// mime.extend([MimeEntry::new(
///     "custom/json",
///     MimeGroup::Custom("CUSTOM".to_string()),
///     Some(".json"),
/// )]);
/// assert!(mime.is_among("custom/json", None));
/// mime.reset();
/// assert!(!mime.is_among("custom/json", None));
/// ```
#[derive(Clone, Debug)]
pub struct MimeRegistry {
    registry: Registry<MimeEntry>,
    builtin_extensions: IndexSet<String>,
}

impl MimeRegistry {
    /// Creates a registry with the built-in MIME type table.
    pub fn new() -> Self {
        let entries: Vec<MimeEntry> = BUILTIN_MIME_TYPES
            .iter()
            .map(|(mime_type, group, extension)| {
                MimeEntry::new(mime_type, group.clone(), *extension)
            })
            .collect();
        let builtin_extensions = entries
            .iter()
            .filter_map(MimeEntry::extension)
            .map(|extension| extension.as_str().to_string())
            .collect();
        Self {
            registry: Registry::new(RegistryTable::from_entries(entries)),
            builtin_extensions,
        }
    }

    /// Checks whether `value` is a registered type string (as-is
    /// comparison, the canonical form is lowercase).
    pub fn is_valid(&self, value: &str) -> bool {
        self.is_valid_attr(value, MimeAttribute::Type)
    }

    /// Checks `value` against the chosen attribute: type strings compare
    /// as-is, extensions tolerate a missing leading dot.
    ///
    /// The answer reads the effective view: a custom entry that shadows a
    /// built-in type also withdraws the built-in extension unless some
    /// effective entry still carries it.
    pub fn is_valid_attr(&self, value: &str, attribute: MimeAttribute) -> bool {
        match attribute {
            MimeAttribute::Type => self.registry.contains(&value.to_string()),
            MimeAttribute::Extension if self.registry.is_extended() => self
                .registry
                .entries()
                .any(|entry| Self::attr_matches(entry, attribute, value)),
            MimeAttribute::Extension => {
                self.builtin_extensions.contains(&normalize_extension(value))
            }
        }
    }

    /// Checks whether `mime_type` appears among `candidates`, defaulting
    /// to every registered type.
    pub fn is_among(&self, mime_type: &str, candidates: Option<&[&str]>) -> bool {
        match candidates {
            Some(list) => list.contains(&mime_type),
            None => self.registry.contains(&mime_type.to_string()),
        }
    }

    /// Checks whether `mime_type` belongs to `group`.
    pub fn in_group(&self, mime_type: &str, group: &MimeGroup) -> bool {
        self.registry.in_group(&mime_type.to_string(), group)
    }

    /// Returns the group of `mime_type`, or `None` when it is not
    /// registered.
    pub fn group_of(&self, mime_type: &str) -> Option<MimeGroup> {
        self.registry.get(&mime_type.to_string()).map(|entry| entry.group().clone())
    }

    /// Returns the registered types in `group`, in source order.
    pub fn types_in_group(&self, group: &MimeGroup) -> Vec<String> {
        self.registry.keys_in_group(group)
    }

    /// Scans the effective entries for the first one whose `attribute`
    /// matches `value`.
    pub fn pick_by(&self, attribute: MimeAttribute, value: &str) -> Option<&MimeEntry> {
        self.registry.entries().find(|entry| Self::attr_matches(entry, attribute, value))
    }

    /// Scans the effective entries for every one whose `attribute`
    /// matches `value`. Extension lookups may legitimately return more
    /// than one entry (`.sql`, `.webm`).
    pub fn find_all_by(&self, attribute: MimeAttribute, value: &str) -> Vec<&MimeEntry> {
        self.registry
            .entries()
            .filter(|entry| Self::attr_matches(entry, attribute, value))
            .collect()
    }

    fn attr_matches(entry: &MimeEntry, attribute: MimeAttribute, value: &str) -> bool {
        match attribute {
            MimeAttribute::Type => entry.mime_type() == value,
            MimeAttribute::Extension => {
                entry.extension().is_some_and(|extension| extension.matches(value))
            }
        }
    }

    /// Coerces `value` to the canonical lowercase type string, failing
    /// when the result is not registered.
    pub fn normalize(&self, value: &str) -> Result<String> {
        let normalized = value.to_lowercase();
        if self.registry.contains(&normalized) {
            Ok(normalized)
        } else {
            Err(HttpConvenienceError::new(format!(
                "\"{value}\" when lower-cased should be a valid MIME type"
            )))
        }
    }

    /// Returns every registered type string in source order.
    pub fn types(&self) -> Vec<String> { self.registry.keys_vec() }

    /// Installs `entries` as the custom table, replacing any previous
    /// custom table.
    pub fn extend<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = MimeEntry>,
    {
        self.registry.extend(entries);
    }

    /// Drops the custom table.
    pub fn reset(&mut self) { self.registry.reset(); }

    /// Returns whether a custom table is installed.
    pub fn is_extended(&self) -> bool { self.registry.is_extended() }
}

impl Default for MimeRegistry {
    fn default() -> Self { Self::new() }
}

/// The process-wide MIME types registry, lazily initialized on first
/// access.
pub static MIME_TYPES: LazyRegistry<MimeRegistry> = LazyRegistry::new(MimeRegistry::new);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_entries_keep_their_attributes() {
        let mime = MimeRegistry::new();

        let entry = mime.pick_by(MimeAttribute::Type, "application/java-archive").unwrap();
        assert_eq!(entry.mime_type(), "application/java-archive");
        assert_eq!(entry.group(), &MimeGroup::Application);
        assert_eq!(entry.extension().unwrap().as_str(), ".jar");
        assert_eq!(mime.types().len(), BUILTIN_MIME_TYPES.len());
    }

    #[test]
    fn type_validity_compares_as_is() {
        let mime = MimeRegistry::new();

        assert!(mime.is_valid("text/plain"));
        assert!(mime.is_valid("application/ld+json"));
        assert!(!mime.is_valid("invalid/type"));
        assert!(!mime.is_valid("TEXT/PLAIN"));
    }

    #[test]
    fn extension_validity_tolerates_a_missing_dot() {
        let mime = MimeRegistry::new();

        assert!(mime.is_valid_attr(".gz", MimeAttribute::Extension));
        assert!(mime.is_valid_attr("gz", MimeAttribute::Extension));
        assert!(mime.is_valid_attr(".3gp", MimeAttribute::Extension));
        assert!(!mime.is_valid_attr("invalid-extension", MimeAttribute::Extension));
    }

    #[test]
    fn inapplicable_extensions_never_match() {
        let mime = MimeRegistry::new();

        let multipart = mime.pick_by(MimeAttribute::Type, "multipart/form-data").unwrap();
        assert_eq!(multipart.extension(), None);
        assert!(mime.find_all_by(MimeAttribute::Extension, "").is_empty());
    }

    #[test]
    fn disambiguated_extensions_expose_only_the_display_value() {
        let mime = MimeRegistry::new();

        let x_sql = mime.pick_by(MimeAttribute::Type, "application/x-sql").unwrap();
        let extension = x_sql.extension().unwrap();
        assert_eq!(extension.as_str(), ".sql");
        assert_eq!(extension.qualifier(), Some(1));

        // Both carriers of `.sql` are reachable through the display value.
        let carriers = mime.find_all_by(MimeAttribute::Extension, ".sql");
        let types: Vec<&str> = carriers.iter().map(|entry| entry.mime_type()).collect();
        assert_eq!(types, ["application/sql", "application/x-sql"]);

        assert_eq!(mime.find_all_by(MimeAttribute::Extension, "webm").len(), 2);
    }

    #[test]
    fn group_queries_cover_builtin_and_custom_groups() {
        let mut mime = MimeRegistry::new();

        assert!(mime.in_group("application/gzip", &MimeGroup::Application));
        assert_eq!(mime.group_of("application/gzip"), Some(MimeGroup::Application));
        assert_eq!(mime.group_of("invalid/type"), None);
        assert_eq!(mime.types_in_group(&MimeGroup::Font).len(), 4);

        mime.extend([MimeEntry::new(
            "custom/json",
            MimeGroup::Custom("CUSTOM".to_string()),
            Some(".json"),
        )]);
        assert_eq!(mime.group_of("custom/json"), Some(MimeGroup::Custom("CUSTOM".to_string())));
    }

    #[test]
    fn extension_state_round_trips_through_extend_and_reset() {
        let mut mime = MimeRegistry::new();
        let builtin_types = mime.types();

        mime.extend([MimeEntry::new(
            "custom/binary",
            MimeGroup::Custom("CUSTOM".to_string()),
            Some(".bin"),
        )]);
        assert!(mime.is_extended());
        assert!(mime.is_among("custom/binary", None));
        assert!(mime.is_valid_attr("bin", MimeAttribute::Extension));

        mime.reset();
        assert!(!mime.is_extended());
        assert!(!mime.is_among("custom/binary", None));
        assert!(!mime.is_valid_attr("bin", MimeAttribute::Extension));
        assert_eq!(mime.types(), builtin_types);
    }

    #[test]
    fn re_extend_replaces_the_previous_custom_table() {
        let mut mime = MimeRegistry::new();

        mime.extend([MimeEntry::new("custom/a", MimeGroup::Custom("A".into()), Some(".a"))]);
        mime.extend([MimeEntry::new("custom/b", MimeGroup::Custom("B".into()), Some(".b"))]);

        assert!(!mime.is_valid("custom/a"));
        assert!(!mime.is_valid_attr(".a", MimeAttribute::Extension));
        assert!(mime.is_valid("custom/b"));
    }

    #[test]
    fn shadowing_away_an_extension_invalidates_it() {
        let mut mime = MimeRegistry::new();

        // The custom definition of application/json drops the extension,
        // so no effective entry carries .json any more.
        mime.extend([MimeEntry::new("application/json", MimeGroup::Custom("OVERRIDE".into()), None)]);

        assert!(mime.find_all_by(MimeAttribute::Extension, ".json").is_empty());
        assert!(!mime.is_valid_attr(".json", MimeAttribute::Extension));
        assert!(mime.is_valid_attr(".jsonld", MimeAttribute::Extension));

        mime.reset();
        assert!(mime.is_valid_attr(".json", MimeAttribute::Extension));
    }

    #[test]
    fn custom_entries_shadow_builtin_types() {
        let mut mime = MimeRegistry::new();

        mime.extend([MimeEntry::new("application/json", MimeGroup::Custom("OVERRIDE".into()), Some(".json"))]);

        assert_eq!(mime.group_of("application/json"), Some(MimeGroup::Custom("OVERRIDE".into())));
        assert_eq!(mime.types().len(), BUILTIN_MIME_TYPES.len());
    }

    #[test]
    fn is_among_accepts_explicit_candidates() {
        let mime = MimeRegistry::new();

        assert!(mime.is_among("application/gzip", Some(&["application/gzip", "application/json"])));
        assert!(!mime.is_among("text/xml", Some(&["application/gzip", "application/json"])));
    }

    #[test]
    fn normalize_lowercases_or_fails() {
        let mime = MimeRegistry::new();

        assert_eq!(mime.normalize("Application/JSON").unwrap(), "application/json");

        let error = mime.normalize("invalid/type").unwrap_err();
        assert!(error.to_string().contains("valid"));
    }
}
