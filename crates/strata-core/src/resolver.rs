//! The immutable resolver: source-chain walk, profile overrides, expression
//! resolution, and the typed accessor layer.

use std::collections::{BTreeSet, HashSet};
use std::hash::Hash;
use std::sync::{Arc, OnceLock};

use tracing::{debug, trace};

use crate::convert::list::convert_tokens;
use crate::convert::registry::ConverterRegistry;
use crate::convert::{ConfigTarget, Converter};
use crate::error::{ConfigError, Result};
use crate::interpolate::interpolate;
use crate::source::ConfigSource;
use crate::value::ResolvedValue;

/// Property naming the active configuration profiles, comma-separated.
pub const PROFILE_KEY: &str = "config.profile";

/// Property toggling `${...}` expression resolution. Defaults to enabled.
pub const EXPRESSIONS_ENABLED_KEY: &str = "config.property.expressions.enabled";

/// An immutable stack of configuration sources with typed access.
///
/// Built once by [`ConfigBuilder`](crate::ConfigBuilder); afterwards the
/// source chain, converter registry, and profile list never change, so a
/// `Config` can be shared freely across threads. Lookups walk the sources in
/// descending ordinal order, trying profile-scoped keys (`%profile.key`)
/// before the bare key within each source; the first source with a value
/// wins.
///
/// A value configured as the empty string is treated as absent on every
/// access path.
pub struct Config {
    sources: Vec<Arc<dyn ConfigSource>>,
    converters: ConverterRegistry,
    profiles: Vec<String>,
    expressions_enabled: OnceLock<bool>,
}

impl Config {
    /// Assembles a resolver over an already-sorted source chain.
    ///
    /// Derives the profile list by resolving [`PROFILE_KEY`] through the
    /// chain itself and reversing the declared order, so the rightmost
    /// declared profile is tried first.
    pub(crate) fn new(sources: Vec<Arc<dyn ConfigSource>>, converters: ConverterRegistry) -> Self {
        let mut config = Self {
            sources,
            converters,
            profiles: Vec::new(),
            expressions_enabled: OnceLock::new(),
        };

        let mut profiles: Vec<String> = match config.config_value(PROFILE_KEY).into_value() {
            Some(declared) if !declared.is_empty() => {
                declared.split(',').map(str::to_owned).collect()
            }
            _ => Vec::new(),
        };
        profiles.reverse();

        if !profiles.is_empty() {
            debug!(?profiles, "active configuration profiles");
        }
        config.profiles = profiles;
        config
    }

    /// Resolves `name` with provenance, honoring the expression flag.
    pub fn config_value(&self, name: &str) -> ResolvedValue {
        self.lookup(name, self.expressions_enabled())
    }

    /// Walks the source chain for `name`.
    ///
    /// Within each source, profile-scoped keys are tried in stored (reversed
    /// declaration) order and short-circuit on the first hit; the bare key
    /// is the fallback. The first source with any hit stops the walk.
    fn lookup(&self, name: &str, resolve_expressions: bool) -> ResolvedValue {
        for source in &self.sources {
            let mut raw = None;

            for profile in &self.profiles {
                let scoped = format!("%{profile}.{name}");
                raw = source.value(&scoped);
                if raw.is_some() {
                    trace!(source = source.name(), key = %scoped, "profile-scoped hit");
                    break;
                }
            }

            if raw.is_none() {
                raw = source.value(name);
            }

            if let Some(raw) = raw {
                trace!(
                    source = source.name(),
                    ordinal = source.ordinal(),
                    key = name,
                    "resolved"
                );
                let value = if resolve_expressions {
                    // nested references resolve without interpolation, so
                    // substitution is bounded to one level
                    interpolate(&raw, |key| self.lookup(key, false).into_value())
                } else {
                    raw.clone()
                };
                return ResolvedValue::found(name, value, raw, source.name(), source.ordinal());
            }
        }

        ResolvedValue::absent(name)
    }

    fn expressions_enabled(&self) -> bool {
        *self.expressions_enabled.get_or_init(|| {
            match self.lookup(EXPRESSIONS_ENABLED_KEY, false).into_value() {
                Some(raw) if !raw.is_empty() => self
                    .converters
                    .converter::<bool>()
                    .and_then(|c| c.convert(&raw).ok())
                    .unwrap_or(true),
                _ => true,
            }
        })
    }

    /// Returns the value for `name` converted to `T`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::PropertyNotFound`] if no source defines `name`,
    /// [`ConfigError::NoConverter`] or [`ConfigError::ConversionFailed`] as
    /// surfaced by the conversion.
    pub fn get_value<T: ConfigTarget>(&self, name: &str) -> Result<T> {
        self.get_optional_value(name)?
            .ok_or_else(|| ConfigError::property_not_found(name))
    }

    /// Returns the value for `name` converted to `T`, or `None` if no
    /// source defines it (or defines it as the empty string).
    ///
    /// Conversion failures are errors, never `None`.
    pub fn get_optional_value<T: ConfigTarget>(&self, name: &str) -> Result<Option<T>> {
        self.optional_with_default(name, None)
    }

    /// Like [`get_optional_value`](Self::get_optional_value), but falls back
    /// to converting `default` when the key is absent.
    ///
    /// An empty `default` is the "unconfigured" marker: it yields `None`
    /// rather than a converted empty string.
    pub fn get_optional_value_or<T: ConfigTarget>(
        &self,
        name: &str,
        default: &str,
    ) -> Result<Option<T>> {
        self.optional_with_default(name, Some(default))
    }

    fn optional_with_default<T: ConfigTarget>(
        &self,
        name: &str,
        default: Option<&str>,
    ) -> Result<Option<T>> {
        let resolved = self.config_value(name);

        let value = match resolved.value() {
            Some(v) if !v.is_empty() => v.to_owned(),
            _ => match default {
                Some(d) if !d.is_empty() => d.to_owned(),
                _ => return Ok(None),
            },
        };

        self.convert::<T>(&value).map(Some)
    }

    /// Returns the delimited list value for `name`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::PropertyNotFound`] if the key is absent or every token
    /// is empty, plus any conversion error.
    pub fn get_values<T: ConfigTarget>(&self, name: &str) -> Result<Vec<T>> {
        self.get_optional_values(name)?
            .ok_or_else(|| ConfigError::property_not_found(name))
    }

    /// Returns the delimited list value for `name`, or `None` when the key
    /// is absent or yields no tokens.
    ///
    /// A list that is empty after tokenization is indistinguishable from an
    /// undefined property: both are `None`.
    pub fn get_optional_values<T: ConfigTarget>(&self, name: &str) -> Result<Option<Vec<T>>> {
        let Some(raw) = self.get_optional_value::<String>(name)? else {
            return Ok(None);
        };

        let element = self
            .converters
            .converter::<T>()
            .ok_or_else(|| ConfigError::no_converter(std::any::type_name::<T>()))?;
        let values = convert_tokens(&raw, element.as_ref())?;

        if values.is_empty() {
            Ok(None)
        } else {
            Ok(Some(values))
        }
    }

    /// Returns the list value for `name` deduplicated by converted-value
    /// equality. Order is not preserved.
    pub fn get_set<T>(&self, name: &str) -> Result<HashSet<T>>
    where
        T: ConfigTarget + Eq + Hash,
    {
        self.get_optional_set(name)?
            .ok_or_else(|| ConfigError::property_not_found(name))
    }

    /// Optional variant of [`get_set`](Self::get_set).
    pub fn get_optional_set<T>(&self, name: &str) -> Result<Option<HashSet<T>>>
    where
        T: ConfigTarget + Eq + Hash,
    {
        Ok(self
            .get_optional_values(name)?
            .map(|values| values.into_iter().collect()))
    }

    /// Returns the list value for `name` as a fixed-size sequence.
    pub fn get_array<T: ConfigTarget>(&self, name: &str) -> Result<Box<[T]>> {
        self.get_optional_array(name)?
            .ok_or_else(|| ConfigError::property_not_found(name))
    }

    /// Optional variant of [`get_array`](Self::get_array). An empty
    /// conversion result is `None`, matching the list policy.
    pub fn get_optional_array<T: ConfigTarget>(&self, name: &str) -> Result<Option<Box<[T]>>> {
        Ok(self
            .get_optional_values(name)?
            .map(Vec::into_boxed_slice))
    }

    /// Looks up the active converter for `T`, including implicit synthesis.
    pub fn converter<T: ConfigTarget>(&self) -> Option<Arc<dyn Converter<T>>> {
        self.converters.converter::<T>()
    }

    /// Returns every property name known to any source, deduplicated.
    pub fn property_names(&self) -> BTreeSet<String> {
        self.sources
            .iter()
            .flat_map(|source| source.property_names())
            .collect()
    }

    /// Returns the source chain in resolution order.
    pub fn sources(&self) -> &[Arc<dyn ConfigSource>] {
        &self.sources
    }

    /// Returns the active profiles in lookup order (reversed declaration
    /// order).
    pub fn profiles(&self) -> &[String] {
        &self.profiles
    }

    fn convert<T: ConfigTarget>(&self, value: &str) -> Result<T> {
        let converter = self
            .converters
            .converter::<T>()
            .ok_or_else(|| ConfigError::no_converter(std::any::type_name::<T>()))?;
        converter.convert(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    struct TableSource {
        name: &'static str,
        ordinal: i32,
        entries: BTreeMap<&'static str, &'static str>,
    }

    impl TableSource {
        fn new(
            name: &'static str,
            ordinal: i32,
            entries: &[(&'static str, &'static str)],
        ) -> Self {
            Self {
                name,
                ordinal,
                entries: entries.iter().copied().collect(),
            }
        }
    }

    impl ConfigSource for TableSource {
        fn value(&self, key: &str) -> Option<String> {
            self.entries.get(key).map(|v| v.to_string())
        }

        fn name(&self) -> &str {
            self.name
        }

        fn ordinal(&self) -> i32 {
            self.ordinal
        }

        fn property_names(&self) -> BTreeSet<String> {
            self.entries.keys().map(|k| k.to_string()).collect()
        }
    }

    fn config_over(sources: Vec<TableSource>) -> Config {
        let sources = sources
            .into_iter()
            .map(|s| Arc::new(s) as Arc<dyn ConfigSource>)
            .collect();
        Config::new(sources, ConverterRegistry::with_defaults())
    }

    #[test]
    fn test_profile_scoped_key_wins_within_source() {
        let config = config_over(vec![TableSource::new(
            "main",
            100,
            &[
                ("config.profile", "dev"),
                ("greeting", "plain"),
                ("%dev.greeting", "dev-scoped"),
            ],
        )]);

        assert_eq!(
            config.config_value("greeting").value(),
            Some("dev-scoped")
        );
    }

    #[test]
    fn test_profiles_reversed_from_declaration() {
        let config = config_over(vec![TableSource::new(
            "main",
            100,
            &[("config.profile", "docker,prod")],
        )]);

        assert_eq!(config.profiles(), &["prod", "docker"]);
    }

    #[test]
    fn test_rightmost_declared_profile_tried_first() {
        let config = config_over(vec![TableSource::new(
            "main",
            100,
            &[
                ("config.profile", "docker,prod"),
                ("%docker.override", "fromdocker"),
                ("%prod.override", "fromprod"),
            ],
        )]);

        assert_eq!(config.get_value::<String>("override").unwrap(), "fromprod");
    }

    #[test]
    fn test_bare_key_fallback_when_no_profile_match() {
        let config = config_over(vec![TableSource::new(
            "main",
            100,
            &[("config.profile", "dev"), ("plain", "root")],
        )]);

        assert_eq!(config.get_value::<String>("plain").unwrap(), "root");
    }

    #[test]
    fn test_expression_resolution_one_level() {
        let config = config_over(vec![TableSource::new(
            "main",
            100,
            &[
                ("host", "localhost"),
                ("url", "http://${host}/"),
                ("indirect", "${url}"),
            ],
        )]);

        assert_eq!(
            config.config_value("url").value(),
            Some("http://localhost/")
        );
        // the nested reference resolves without interpolation, so the
        // unexpanded text of `url` surfaces literally
        assert_eq!(
            config.config_value("indirect").value(),
            Some("http://${host}/")
        );
    }

    #[test]
    fn test_unresolved_expression_kept_verbatim() {
        let config = config_over(vec![TableSource::new(
            "main",
            100,
            &[("broken", "x=${nope}")],
        )]);

        let resolved = config.config_value("broken");
        assert_eq!(resolved.value(), Some("x=${nope}"));
        assert_eq!(resolved.raw_value(), Some("x=${nope}"));
    }

    #[test]
    fn test_expressions_can_be_disabled() {
        let config = config_over(vec![TableSource::new(
            "main",
            100,
            &[
                ("config.property.expressions.enabled", "false"),
                ("host", "localhost"),
                ("url", "http://${host}/"),
            ],
        )]);

        assert_eq!(config.config_value("url").value(), Some("http://${host}/"));
    }

    #[test]
    fn test_empty_string_value_is_absent() {
        let config = config_over(vec![TableSource::new("main", 100, &[("empty", "")])]);

        assert_eq!(config.get_optional_value::<String>("empty").unwrap(), None);
        assert!(config.get_value::<String>("empty").unwrap_err().is_not_found());
    }

    #[test]
    fn test_default_fallback() {
        let config = config_over(vec![TableSource::new("main", 100, &[])]);

        assert_eq!(
            config
                .get_optional_value_or::<i32>("missing.key", "42")
                .unwrap(),
            Some(42)
        );
        assert_eq!(
            config
                .get_optional_value_or::<i32>("missing.key", "")
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_configured_value_beats_default() {
        let config = config_over(vec![TableSource::new("main", 100, &[("port", "9000")])]);

        assert_eq!(
            config.get_optional_value_or::<u16>("port", "8080").unwrap(),
            Some(9000)
        );
    }

    #[test]
    fn test_conversion_failure_is_an_error_not_absent() {
        let config = config_over(vec![TableSource::new(
            "main",
            100,
            &[("port", "not-a-number")],
        )]);

        let err = config.get_optional_value::<u16>("port").unwrap_err();
        assert!(err.is_conversion_failure());
    }

    #[test]
    fn test_set_deduplicates_by_converted_value() {
        let config = config_over(vec![TableSource::new(
            "main",
            100,
            &[("ports", "1,2,2,1,3")],
        )]);

        let set = config.get_set::<u16>("ports").unwrap();
        assert_eq!(set, HashSet::from([1, 2, 3]));
    }

    #[test]
    fn test_array_empty_is_absent() {
        let config = config_over(vec![TableSource::new("main", 100, &[("items", ",,")])]);

        assert_eq!(config.get_optional_array::<String>("items").unwrap(), None);
        assert!(config.get_array::<String>("items").unwrap_err().is_not_found());
    }

    #[test]
    fn test_property_names_union() {
        let config = config_over(vec![
            TableSource::new("a", 200, &[("shared", "1"), ("only.a", "1")]),
            TableSource::new("b", 100, &[("shared", "2"), ("only.b", "2")]),
        ]);

        let names = config.property_names();
        assert_eq!(
            names,
            BTreeSet::from([
                "shared".to_string(),
                "only.a".to_string(),
                "only.b".to_string()
            ])
        );
    }

    #[test]
    fn test_determinism() {
        let config = config_over(vec![
            TableSource::new("a", 200, &[("key", "high")]),
            TableSource::new("b", 100, &[("key", "low")]),
        ]);

        let first = config.config_value("key");
        for _ in 0..10 {
            assert_eq!(config.config_value("key"), first);
        }
    }
}
