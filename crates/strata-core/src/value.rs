//! Resolved value with provenance.

use serde::{Deserialize, Serialize};

/// The outcome of one key lookup.
///
/// Carries the post-interpolation value, the raw value as found in the
/// winning source, and the provenance of that source. Invariant:
/// `source_name` is present iff `raw_value` is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedValue {
    /// The key that was queried.
    name: String,

    /// The value after `${...}` resolution, if any.
    value: Option<String>,

    /// The value exactly as the winning source returned it.
    raw_value: Option<String>,

    /// Name of the source that produced the value.
    source_name: Option<String>,

    /// Ordinal of the source that produced the value; 0 when absent.
    source_ordinal: i32,
}

impl ResolvedValue {
    /// Creates a resolved value with full provenance.
    pub fn found(
        name: impl Into<String>,
        value: impl Into<String>,
        raw_value: impl Into<String>,
        source_name: impl Into<String>,
        source_ordinal: i32,
    ) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            raw_value: Some(raw_value.into()),
            source_name: Some(source_name.into()),
            source_ordinal,
        }
    }

    /// Creates the result of a lookup that matched no source.
    pub fn absent(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            raw_value: None,
            source_name: None,
            source_ordinal: 0,
        }
    }

    /// Returns the key that was queried.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the post-interpolation value, if any.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Returns the raw, pre-interpolation value, if any.
    pub fn raw_value(&self) -> Option<&str> {
        self.raw_value.as_deref()
    }

    /// Returns the name of the winning source, if any.
    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    /// Returns the ordinal of the winning source, or 0 when absent.
    pub fn source_ordinal(&self) -> i32 {
        self.source_ordinal
    }

    /// Returns true if any source produced a value.
    pub fn is_present(&self) -> bool {
        self.raw_value.is_some()
    }

    /// Consumes the lookup result, returning the resolved value.
    pub fn into_value(self) -> Option<String> {
        self.value
    }
}
