//! Structured sources and their adapter onto the flat source contract.

use std::collections::BTreeSet;

use tracing::trace;

use strata_core::{ConfigSource, DEFAULT_ORDINAL};

/// A configuration provider with a tree shape.
///
/// Keys are dotted paths with `[i]` index segments (`servers[0].host`). A
/// key denotes exactly one of: a scalar (`get` answers), an indexed node
/// (`list_size` answers), or an object node (`map_keys` answers).
pub trait StructuredSource: Send + Sync {
    /// Returns the name of this source, used for provenance and logging.
    fn name(&self) -> &str;

    /// Returns the priority of this source. Higher ordinals win.
    fn ordinal(&self) -> i32 {
        DEFAULT_ORDINAL
    }

    /// Returns the scalar value at `key`, if the key denotes a scalar.
    fn get(&self, key: &str) -> Option<String>;

    /// Returns the element count at `key`, if the key denotes an indexed
    /// node.
    fn list_size(&self, key: &str) -> Option<usize>;

    /// Returns the child key names at `key`, if the key denotes an object
    /// node. The empty key denotes the document root.
    fn map_keys(&self, key: &str) -> Option<Vec<String>>;
}

/// Adapts a [`StructuredSource`] to the flat [`ConfigSource`] contract.
///
/// Scalar keys pass through. A key denoting an indexed node is flattened
/// into one delimited string built from its scalar elements, so the core's
/// list conversion can split it back apart: commas inside elements are
/// escaped as `\,`, and elements that are themselves objects are omitted.
pub struct StructuredAdapter<S> {
    inner: S,
}

impl<S: StructuredSource> StructuredAdapter<S> {
    /// Wraps a structured source.
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    fn build_list(&self, key: &str, size: usize) -> String {
        let mut out = String::new();

        for i in 0..size {
            let item_key = format!("{key}[{i}]");

            // object elements have no scalar form in the flattened string
            if self.inner.map_keys(&item_key).is_some() {
                continue;
            }

            if i > 0 {
                out.push(',');
            }
            if let Some(item) = self.inner.get(&item_key) {
                out.push_str(&item.replace(',', "\\,"));
            }
        }

        trace!(source = self.inner.name(), key, flattened = %out, "flattened indexed node");
        out
    }

    fn collect_names(&self, prefix: &str, names: &mut BTreeSet<String>) {
        if let Some(keys) = self.inner.map_keys(prefix) {
            let parent = if prefix.is_empty() {
                String::new()
            } else {
                format!("{prefix}.")
            };
            for key in keys {
                self.collect_names(&format!("{parent}{key}"), names);
            }
        } else if !prefix.is_empty() {
            if let Some(size) = self.inner.list_size(prefix) {
                for i in 0..size {
                    self.collect_names(&format!("{prefix}[{i}]"), names);
                }
            } else if self.inner.get(prefix).is_some() {
                names.insert(prefix.to_string());
            }
        }
    }
}

impl<S: StructuredSource> ConfigSource for StructuredAdapter<S> {
    fn value(&self, key: &str) -> Option<String> {
        if let Some(value) = self.inner.get(key) {
            return Some(value);
        }

        // an indexed node answers as its flattened delimited form
        self.inner
            .list_size(key)
            .map(|size| self.build_list(key, size))
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn ordinal(&self) -> i32 {
        self.inner.ordinal()
    }

    fn property_names(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        self.collect_names("", &mut names);
        names
    }
}
