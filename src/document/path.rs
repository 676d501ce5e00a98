//! Lookup path parsing and segment classification.
//!
//! # Normalization
//! - Exactly one leading and one trailing `/` is stripped
//! - The rest is split on `/`; an embedded `//` yields an empty named
//!   segment, which simply fails to match
//! - `""`, `"/"` and `"//"` all produce a path with no segments

use std::fmt;

/// An ordered list of segments borrowed from the request string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path<'a> {
    segments: Vec<&'a str>,
}

impl<'a> Path<'a> {
    /// Split a raw lookup string into segments.
    pub fn parse(raw: &'a str) -> Self {
        let trimmed = raw.strip_prefix('/').unwrap_or(raw);
        let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);

        if trimmed.is_empty() {
            return Self::default();
        }

        Self {
            segments: trimmed.split('/').collect(),
        }
    }

    pub fn segments(&self) -> &[&'a str] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }
}

impl<'a> FromIterator<&'a str> for Path<'a> {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Path<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.segments.join("/"))
    }
}

/// A path segment classified by its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// All ASCII digits. Values too large for `usize` saturate and are
    /// therefore always out of range.
    Index(usize),
    /// Anything else, including the empty segment.
    Name(&'a str),
}

impl<'a> Segment<'a> {
    pub fn classify(raw: &'a str) -> Self {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            Segment::Index(raw.parse().unwrap_or(usize::MAX))
        } else {
            Segment::Name(raw)
        }
    }
}
