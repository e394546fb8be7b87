//! # Strata Sources
//!
//! Configuration sources for the Strata resolution core: an in-memory map
//! source, an environment-variable source, parsed JSON/YAML document trees,
//! and the adapter that flattens structured (tree-shaped) sources into the
//! flat key-value contract the resolver consumes.
//!
//! ## Example
//!
//! ```
//! use strata_core::ConfigBuilder;
//! use strata_sources::{ConfigTree, MapSource, StructuredAdapter, TreeSource};
//!
//! let document = ConfigTree::from_json(
//!     r#"{"app": {"name": "demo", "features": ["auth", "beta"]}}"#,
//! )
//! .unwrap();
//!
//! let config = ConfigBuilder::new()
//!     .with_source(StructuredAdapter::new(TreeSource::new("app.json", document)))
//!     .with_source(MapSource::new("overrides").with_ordinal(400).with_entry("app.name", "real"))
//!     .build();
//!
//! assert_eq!(config.get_value::<String>("app.name").unwrap(), "real");
//! assert_eq!(
//!     config.get_values::<String>("app.features").unwrap(),
//!     vec!["auth", "beta"]
//! );
//! ```

pub mod env;
pub mod error;
pub mod map;
pub mod node;
pub mod structured;
pub mod tree;

pub use env::{ENV_ORDINAL, EnvSource};
pub use error::SourceError;
pub use map::MapSource;
pub use node::ConfigNode;
pub use structured::{StructuredAdapter, StructuredSource};
pub use tree::{ConfigTree, TreeSource};
