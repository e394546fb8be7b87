//! # Strata Core
//!
//! Layered, typed configuration resolution.
//!
//! A [`Config`] is an immutable stack of prioritized sources. Resolution
//! walks the stack in descending ordinal order, trying profile-scoped keys
//! (`%profile.key`) before the bare key, resolves `${...}` references one
//! level deep, and converts the winning string through a priority-ordered
//! converter registry.
//!
//! ## Example
//!
//! ```
//! use strata_core::{ConfigBuilder, ConfigSource};
//!
//! struct Fixed;
//!
//! impl ConfigSource for Fixed {
//!     fn value(&self, key: &str) -> Option<String> {
//!         match key {
//!             "app.name" => Some("demo".to_string()),
//!             "app.workers" => Some("4".to_string()),
//!             _ => None,
//!         }
//!     }
//!
//!     fn name(&self) -> &str {
//!         "fixed"
//!     }
//! }
//!
//! let config = ConfigBuilder::new().with_source(Fixed).build();
//!
//! assert_eq!(config.get_value::<String>("app.name").unwrap(), "demo");
//! assert_eq!(config.get_value::<u32>("app.workers").unwrap(), 4);
//! assert!(config.get_optional_value::<String>("app.motto").unwrap().is_none());
//! ```

pub mod builder;
pub mod convert;
pub mod error;
pub mod interpolate;
pub mod resolver;
pub mod source;
pub mod value;

pub use builder::ConfigBuilder;
pub use convert::registry::{ConverterRegistry, DEFAULT_PRIORITY};
pub use convert::{ConfigTarget, Converter, FnConverter, FromStrConverter};
pub use error::{ConfigError, Result};
pub use resolver::{Config, EXPRESSIONS_ENABLED_KEY, PROFILE_KEY};
pub use source::{ConfigSource, DEFAULT_ORDINAL};
pub use value::ResolvedValue;
