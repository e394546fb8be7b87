//! Parsed configuration documents as structured sources.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SourceError;
use crate::node::ConfigNode;
use crate::structured::StructuredSource;

use strata_core::DEFAULT_ORDINAL;

/// A parsed configuration document with path navigation.
///
/// Paths use dot notation with `[i]` index segments:
/// `servers[0].host`, `logging.level`. The empty path denotes the document
/// root, which is always an object.
///
/// # Example
///
/// ```
/// use strata_sources::ConfigTree;
///
/// let tree = ConfigTree::from_json(r#"{"server": {"port": 8080}}"#).unwrap();
/// assert_eq!(tree.get("server.port").as_deref(), Some("8080"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigTree {
    root: ConfigNode,
}

impl ConfigTree {
    /// Parses a JSON document into a tree. The root must be an object.
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        let root: ConfigNode =
            serde_json::from_str(json).map_err(|e| SourceError::Json(e.to_string()))?;
        Self::from_root(root).ok_or_else(|| SourceError::Json("root must be an object".into()))
    }

    /// Parses a YAML document into a tree. The root must be a mapping.
    pub fn from_yaml(yaml: &str) -> Result<Self, SourceError> {
        let root: ConfigNode =
            serde_yaml::from_str(yaml).map_err(|e| SourceError::Yaml(e.to_string()))?;
        Self::from_root(root).ok_or_else(|| SourceError::Yaml("root must be a mapping".into()))
    }

    fn from_root(root: ConfigNode) -> Option<Self> {
        root.as_object().is_some().then(|| Self { root })
    }

    /// Navigates to the node at `path`, or `None` if any segment is absent
    /// or of the wrong shape.
    pub fn node(&self, path: &str) -> Option<&ConfigNode> {
        if path.is_empty() {
            return Some(&self.root);
        }

        let mut current = &self.root;
        for segment in path.split('.') {
            let (name, indexes) = parse_segment(segment)?;
            current = current.as_object()?.get(name)?;
            for index in indexes {
                current = current.as_array()?.get(index)?;
            }
        }

        Some(current)
    }

    /// Returns the scalar string at `path`, if the path denotes a scalar.
    pub fn get(&self, path: &str) -> Option<String> {
        self.node(path)?.scalar_string()
    }

    /// Returns the element count at `path`, if the path denotes an array.
    pub fn list_size(&self, path: &str) -> Option<usize> {
        self.node(path)?.as_array().map(<[ConfigNode]>::len)
    }

    /// Returns the child key names at `path`, if the path denotes an
    /// object.
    pub fn map_keys(&self, path: &str) -> Option<Vec<String>> {
        self.node(path)?
            .as_object()
            .map(|map| map.keys().cloned().collect())
    }
}

/// Splits one dotted segment into its key name and trailing `[i]` indexes.
fn parse_segment(segment: &str) -> Option<(&str, Vec<usize>)> {
    match segment.find('[') {
        None => Some((segment, Vec::new())),
        Some(open) => {
            let name = &segment[..open];
            let mut indexes = Vec::new();
            let mut rest = &segment[open..];

            while !rest.is_empty() {
                let inner = rest.strip_prefix('[')?;
                let close = inner.find(']')?;
                indexes.push(inner[..close].parse().ok()?);
                rest = &inner[close + 1..];
            }

            Some((name, indexes))
        }
    }
}

/// A named, prioritized [`ConfigTree`] usable as a structured source.
pub struct TreeSource {
    name: String,
    ordinal: i32,
    tree: ConfigTree,
}

impl TreeSource {
    /// Creates a tree source with the default ordinal.
    pub fn new(name: impl Into<String>, tree: ConfigTree) -> Self {
        let name = name.into();
        debug!(source = %name, "created tree source");
        Self {
            name,
            ordinal: DEFAULT_ORDINAL,
            tree,
        }
    }

    /// Sets the ordinal of this source.
    pub fn with_ordinal(mut self, ordinal: i32) -> Self {
        self.ordinal = ordinal;
        self
    }
}

impl StructuredSource for TreeSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn ordinal(&self) -> i32 {
        self.ordinal
    }

    fn get(&self, key: &str) -> Option<String> {
        self.tree.get(key)
    }

    fn list_size(&self, key: &str) -> Option<usize> {
        self.tree.list_size(key)
    }

    fn map_keys(&self, key: &str) -> Option<Vec<String>> {
        self.tree.map_keys(key)
    }
}
