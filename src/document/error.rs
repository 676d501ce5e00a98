//! Lookup and document conversion errors.

use thiserror::Error;

use crate::document::node::NodeKind;

/// Errors produced while resolving a path against a [`Document`](crate::document::Document).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The path had no segments.
    #[error("empty lookup path")]
    EmptyPath,

    /// The segment kind disagrees with the node it is applied to.
    #[error("segment {segment:?} expects a {expected} but found a {found}")]
    TypeMismatch {
        segment: String,
        expected: NodeKind,
        found: NodeKind,
    },

    /// Numeric segment past the end of a sequence.
    #[error("index {index} out of range for sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Named segment absent from a mapping.
    #[error("key {key:?} not found")]
    KeyNotFound { key: String },

    /// The path was fully consumed on a mapping or sequence.
    #[error("path ends on a {found}, not a leaf")]
    NotALeaf { found: NodeKind },
}

impl LookupError {
    /// Stable label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            LookupError::EmptyPath => "empty_path",
            LookupError::TypeMismatch { .. } => "type_mismatch",
            LookupError::IndexOutOfRange { .. } => "index_out_of_range",
            LookupError::KeyNotFound { .. } => "key_not_found",
            LookupError::NotALeaf { .. } => "not_a_leaf",
        }
    }
}

/// Errors produced while turning YAML text into a [`Document`](crate::document::Document).
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("document root must be a mapping, found {0}")]
    RootNotMapping(&'static str),

    #[error("unsupported mapping key: {0}")]
    UnsupportedKey(&'static str),
}
