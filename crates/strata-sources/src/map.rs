//! In-memory key-value source.

use std::collections::BTreeSet;

use indexmap::IndexMap;

use strata_core::{ConfigSource, DEFAULT_ORDINAL};

/// A fixed, in-memory configuration source.
///
/// The programmatic counterpart of a file-backed source: useful for
/// application-supplied defaults and for tests.
///
/// # Example
///
/// ```
/// use strata_core::ConfigBuilder;
/// use strata_sources::MapSource;
///
/// let source = MapSource::new("defaults")
///     .with_ordinal(50)
///     .with_entry("app.name", "demo");
///
/// let config = ConfigBuilder::new().with_source(source).build();
/// assert_eq!(config.get_value::<String>("app.name").unwrap(), "demo");
/// ```
pub struct MapSource {
    name: String,
    ordinal: i32,
    entries: IndexMap<String, String>,
}

impl MapSource {
    /// Creates an empty source with the default ordinal.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ordinal: DEFAULT_ORDINAL,
            entries: IndexMap::new(),
        }
    }

    /// Sets the ordinal of this source.
    pub fn with_ordinal(mut self, ordinal: i32) -> Self {
        self.ordinal = ordinal;
        self
    }

    /// Adds one entry.
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Adds every entry of `entries`.
    pub fn with_entries<K, V>(mut self, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.entries
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }
}

impl ConfigSource for MapSource {
    fn value(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn ordinal(&self) -> i32 {
        self.ordinal
    }

    fn property_names(&self) -> BTreeSet<String> {
        self.entries.keys().cloned().collect()
    }
}
