//! Assembles source chains and converter registries into [`Config`]
//! instances.

use std::cmp::Reverse;
use std::sync::Arc;

use tracing::debug;

use crate::convert::Converter;
use crate::convert::registry::{ConverterRegistry, DEFAULT_PRIORITY};
use crate::resolver::Config;
use crate::source::ConfigSource;

/// Builder for [`Config`].
///
/// Collects sources and converter registrations, then freezes them:
/// [`build`](Self::build) stable-sorts the sources descending by ordinal
/// (ties keep registration order) and derives the profile list. All
/// assembly cost is paid here, none on the lookup path.
///
/// # Example
///
/// ```
/// use std::collections::BTreeSet;
/// use strata_core::{ConfigBuilder, ConfigSource};
///
/// struct Fixed;
///
/// impl ConfigSource for Fixed {
///     fn value(&self, key: &str) -> Option<String> {
///         (key == "app.name").then(|| "demo".to_string())
///     }
///
///     fn name(&self) -> &str {
///         "fixed"
///     }
/// }
///
/// let config = ConfigBuilder::new().with_source(Fixed).build();
/// assert_eq!(config.get_value::<String>("app.name").unwrap(), "demo");
/// ```
pub struct ConfigBuilder {
    sources: Vec<Arc<dyn ConfigSource>>,
    converters: ConverterRegistry,
}

impl ConfigBuilder {
    /// Creates a builder seeded with the built-in converters.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            converters: ConverterRegistry::with_defaults(),
        }
    }

    /// Adds a source to the chain.
    pub fn with_source(mut self, source: impl ConfigSource + 'static) -> Self {
        self.sources.push(Arc::new(source));
        self
    }

    /// Adds an already-shared source to the chain.
    pub fn with_shared_source(mut self, source: Arc<dyn ConfigSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Registers a converter for `T` at the default priority (100).
    pub fn with_converter<T, C>(self, converter: C) -> Self
    where
        T: Send + Sync + 'static,
        C: Converter<T> + 'static,
    {
        self.with_prioritized_converter(DEFAULT_PRIORITY, converter)
    }

    /// Registers a converter for `T` at an explicit priority.
    ///
    /// The registry keeps the highest-priority converter per type; an equal
    /// priority never displaces an earlier registration.
    pub fn with_prioritized_converter<T, C>(mut self, priority: i32, converter: C) -> Self
    where
        T: Send + Sync + 'static,
        C: Converter<T> + 'static,
    {
        self.converters.register(converter, priority);
        self
    }

    /// Freezes the chain and registry into an immutable [`Config`].
    pub fn build(mut self) -> Config {
        // stable sort: equal ordinals keep registration order
        self.sources.sort_by_key(|source| Reverse(source.ordinal()));

        debug!(sources = self.sources.len(), "building configuration");
        Config::new(self.sources, self.converters)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
