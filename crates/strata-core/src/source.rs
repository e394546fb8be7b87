//! Configuration source trait definition.

use std::collections::BTreeSet;

/// Ordinal assumed for sources that do not declare one.
pub const DEFAULT_ORDINAL: i32 = 100;

/// A read-only provider of configuration properties.
///
/// A source is one layer of the configuration stack: an environment block, a
/// parsed file, an in-memory map. The resolver walks sources in descending
/// [`ordinal`](ConfigSource::ordinal) order and the first source that has a
/// value for a key wins.
///
/// Implementations must be pure readers within a single resolution call:
/// repeated `value` calls against unchanged backing state return the same
/// answer.
///
/// # Example
///
/// ```
/// use std::collections::BTreeSet;
/// use strata_core::ConfigSource;
///
/// struct Fixed;
///
/// impl ConfigSource for Fixed {
///     fn value(&self, key: &str) -> Option<String> {
///         (key == "greeting").then(|| "hello".to_string())
///     }
///
///     fn name(&self) -> &str {
///         "fixed"
///     }
///
///     fn property_names(&self) -> BTreeSet<String> {
///         BTreeSet::from(["greeting".to_string()])
///     }
/// }
///
/// let source = Fixed;
/// assert_eq!(source.value("greeting").as_deref(), Some("hello"));
/// assert_eq!(source.ordinal(), 100);
/// ```
pub trait ConfigSource: Send + Sync {
    /// Returns the raw string value for `key`, or `None` if this source does
    /// not define it.
    fn value(&self, key: &str) -> Option<String>;

    /// Returns the name of this source, used for provenance and logging.
    fn name(&self) -> &str;

    /// Returns the priority of this source. Higher ordinals win.
    fn ordinal(&self) -> i32 {
        DEFAULT_ORDINAL
    }

    /// Returns every property name this source defines.
    ///
    /// Used only for enumeration, never for resolution. Sources that cannot
    /// enumerate may return an empty set.
    fn property_names(&self) -> BTreeSet<String> {
        BTreeSet::new()
    }
}
