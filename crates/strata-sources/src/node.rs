//! Tree node type for structured configuration documents.

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// One node of a parsed configuration document (JSON/YAML).
///
/// Supports recursive structures (arrays inside objects, etc.) and uses
/// `IndexMap` so object keys keep document order, which keeps enumeration
/// output predictable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigNode {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value (signed 64-bit)
    Integer(i64),
    /// Floating point value (wrapped in OrderedFloat for Eq support)
    Float(OrderedFloat<f64>),
    /// String value
    String(String),
    /// Array of nodes
    Array(Vec<ConfigNode>),
    /// Object (map) of nodes
    Object(IndexMap<String, ConfigNode>),
}

impl ConfigNode {
    /// Returns true if the node is Null.
    pub fn is_null(&self) -> bool {
        matches!(self, ConfigNode::Null)
    }

    /// Returns the node as a str if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigNode::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the node as an array slice if it is an array.
    pub fn as_array(&self) -> Option<&[ConfigNode]> {
        match self {
            ConfigNode::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the node as an object map if it is an object.
    pub fn as_object(&self) -> Option<&IndexMap<String, ConfigNode>> {
        match self {
            ConfigNode::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Renders a scalar node to its configuration-string form.
    ///
    /// `Null`, arrays, and objects have no scalar form and return `None`;
    /// the flat key-value contract reaches them through their children
    /// instead.
    pub fn scalar_string(&self) -> Option<String> {
        match self {
            ConfigNode::Bool(b) => Some(b.to_string()),
            ConfigNode::Integer(i) => Some(i.to_string()),
            ConfigNode::Float(f) => Some(f.into_inner().to_string()),
            ConfigNode::String(s) => Some(s.clone()),
            ConfigNode::Null | ConfigNode::Array(_) | ConfigNode::Object(_) => None,
        }
    }
}

impl From<bool> for ConfigNode {
    fn from(v: bool) -> Self {
        ConfigNode::Bool(v)
    }
}

impl From<i64> for ConfigNode {
    fn from(v: i64) -> Self {
        ConfigNode::Integer(v)
    }
}

impl From<f64> for ConfigNode {
    fn from(v: f64) -> Self {
        ConfigNode::Float(OrderedFloat(v))
    }
}

impl From<String> for ConfigNode {
    fn from(v: String) -> Self {
        ConfigNode::String(v)
    }
}

impl From<&str> for ConfigNode {
    fn from(v: &str) -> Self {
        ConfigNode::String(v.to_string())
    }
}

impl<T: Into<ConfigNode>> From<Vec<T>> for ConfigNode {
    fn from(v: Vec<T>) -> Self {
        ConfigNode::Array(v.into_iter().map(Into::into).collect())
    }
}
