//! The in-memory document tree.

use std::collections::HashMap;
use std::fmt;

use serde_yaml::Value;

use crate::document::error::{LookupError, ParseError};
use crate::document::path::Path;
use crate::document::resolver::resolve;

/// A parsed mapping file.
///
/// Only a string [`Document::Scalar`] can be the result of a lookup.
/// Numbers and booleans are kept as [`Document::Literal`] in their text form;
/// they have no children and are not leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document {
    Mapping(HashMap<String, Document>),
    Sequence(Vec<Document>),
    Scalar(String),
    Literal(String),
}

/// The shape of a [`Document`] node, without its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Mapping,
    Sequence,
    Scalar,
    Literal,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Mapping => write!(f, "mapping"),
            NodeKind::Sequence => write!(f, "sequence"),
            NodeKind::Scalar => write!(f, "scalar"),
            NodeKind::Literal => write!(f, "non-string scalar"),
        }
    }
}

impl Document {
    /// Parse YAML text into a document whose root is a mapping.
    pub fn from_yaml_str(text: &str) -> Result<Self, ParseError> {
        let value: Value = serde_yaml::from_str(text)?;
        let value = untag(value);

        if !value.is_mapping() {
            return Err(ParseError::RootNotMapping(yaml_kind(&value)));
        }

        Document::try_from(value)
    }

    /// Shape of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Document::Mapping(_) => NodeKind::Mapping,
            Document::Sequence(_) => NodeKind::Sequence,
            Document::Scalar(_) => NodeKind::Scalar,
            Document::Literal(_) => NodeKind::Literal,
        }
    }

    /// Parse `path` and resolve it against this document.
    pub fn lookup(&self, path: &str) -> Result<&str, LookupError> {
        resolve(&Path::parse(path), self)
    }

    /// Number of string leaves reachable from this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            Document::Mapping(entries) => entries.values().map(Document::leaf_count).sum(),
            Document::Sequence(items) => items.iter().map(Document::leaf_count).sum(),
            Document::Scalar(_) => 1,
            Document::Literal(_) => 0,
        }
    }
}

impl TryFrom<Value> for Document {
    type Error = ParseError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            // A key with no value is an empty section, never a leaf.
            Value::Null => Ok(Document::Mapping(HashMap::new())),
            Value::Bool(b) => Ok(Document::Literal(b.to_string())),
            Value::Number(n) => Ok(Document::Literal(n.to_string())),
            Value::String(s) => Ok(Document::Scalar(s)),
            Value::Sequence(items) => items
                .into_iter()
                .map(Document::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(Document::Sequence),
            Value::Mapping(mapping) => {
                let mut entries = HashMap::with_capacity(mapping.len());
                for (key, value) in mapping {
                    entries.insert(mapping_key(key)?, Document::try_from(value)?);
                }
                Ok(Document::Mapping(entries))
            }
            Value::Tagged(tagged) => Document::try_from(tagged.value),
        }
    }
}

fn untag(mut value: Value) -> Value {
    while let Value::Tagged(tagged) = value {
        value = tagged.value;
    }
    value
}

fn mapping_key(key: Value) -> Result<String, ParseError> {
    match untag(key) {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(ParseError::UnsupportedKey(yaml_kind(&other))),
    }
}

fn yaml_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) | Value::Number(_) | Value::String(_) => "scalar",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
