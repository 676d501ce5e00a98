//! Path resolution over a [`Document`].

use crate::document::error::LookupError;
use crate::document::node::{Document, NodeKind};
use crate::document::path::{Path, Segment};

/// Walk `root` one segment at a time and return the scalar at the end.
///
/// Numeric segments require a sequence, named segments require a mapping.
/// The node reached after the last segment must be a scalar.
pub fn resolve<'d>(path: &Path<'_>, root: &'d Document) -> Result<&'d str, LookupError> {
    if path.is_empty() {
        return Err(LookupError::EmptyPath);
    }

    let mut node = root;
    for raw in path.segments() {
        node = step(node, raw)?;
    }

    match node {
        Document::Scalar(value) => Ok(value.as_str()),
        other => Err(LookupError::NotALeaf { found: other.kind() }),
    }
}

fn step<'d>(node: &'d Document, raw: &str) -> Result<&'d Document, LookupError> {
    match (Segment::classify(raw), node) {
        (Segment::Index(index), Document::Sequence(items)) => {
            items.get(index).ok_or(LookupError::IndexOutOfRange {
                index,
                len: items.len(),
            })
        }
        (Segment::Index(_), other) => Err(LookupError::TypeMismatch {
            segment: raw.to_string(),
            expected: NodeKind::Sequence,
            found: other.kind(),
        }),
        (Segment::Name(key), Document::Mapping(entries)) => {
            entries.get(key).ok_or_else(|| LookupError::KeyNotFound {
                key: key.to_string(),
            })
        }
        (Segment::Name(_), other) => Err(LookupError::TypeMismatch {
            segment: raw.to_string(),
            expected: NodeKind::Mapping,
            found: other.kind(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn scalar(s: &str) -> Document {
        Document::Scalar(s.to_string())
    }

    fn mapping<const N: usize>(entries: [(&str, Document); N]) -> Document {
        Document::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect::<HashMap<_, _>>(),
        )
    }

    fn path<'a>(segments: &[&'a str]) -> Path<'a> {
        segments.iter().copied().collect()
    }

    #[test]
    fn test_empty_path_always_fails() {
        let docs = [
            scalar("x"),
            Document::Sequence(vec![scalar("x")]),
            mapping([("k", scalar("x"))]),
        ];
        for doc in &docs {
            assert_eq!(resolve(&path(&[]), doc), Err(LookupError::EmptyPath));
        }
    }

    #[test]
    fn test_sequence_index() {
        let doc = Document::Sequence(vec![scalar("x")]);

        assert_eq!(resolve(&path(&["0"]), &doc), Ok("x"));
        assert_eq!(
            resolve(&path(&["1"]), &doc),
            Err(LookupError::IndexOutOfRange { index: 1, len: 1 })
        );
    }

    #[test]
    fn test_mapping_key() {
        let doc = mapping([("k", scalar("x"))]);

        assert_eq!(resolve(&path(&["k"]), &doc), Ok("x"));
        assert_eq!(
            resolve(&path(&["missing"]), &doc),
            Err(LookupError::KeyNotFound { key: "missing".into() })
        );
    }

    #[test]
    fn test_mapping_then_sequence() {
        let doc = mapping([("arr", Document::Sequence(vec![scalar("y")]))]);

        assert_eq!(resolve(&path(&["arr", "0"]), &doc), Ok("y"));
        assert_eq!(
            resolve(&path(&["arr", "k"]), &doc),
            Err(LookupError::TypeMismatch {
                segment: "k".into(),
                expected: NodeKind::Mapping,
                found: NodeKind::Sequence,
            })
        );
    }

    #[test]
    fn test_numeric_segment_on_mapping() {
        let doc = mapping([("0", scalar("unreachable"))]);

        assert_eq!(
            resolve(&path(&["0"]), &doc),
            Err(LookupError::TypeMismatch {
                segment: "0".into(),
                expected: NodeKind::Sequence,
                found: NodeKind::Mapping,
            })
        );
    }

    #[test]
    fn test_descending_past_a_scalar() {
        let doc = mapping([("k", scalar("x"))]);

        let err = resolve(&path(&["k", "deeper"]), &doc).unwrap_err();
        assert_eq!(err.kind(), "type_mismatch");

        let err = resolve(&path(&["k", "0"]), &doc).unwrap_err();
        assert_eq!(err.kind(), "type_mismatch");
    }

    #[test]
    fn test_not_a_leaf() {
        let doc = mapping([("a", mapping([("b", scalar("z"))]))]);

        assert_eq!(
            resolve(&path(&["a"]), &doc),
            Err(LookupError::NotALeaf { found: NodeKind::Mapping })
        );
        assert_eq!(resolve(&path(&["a", "b"]), &doc), Ok("z"));
    }

    #[test]
    fn test_embedded_empty_segment_does_not_match() {
        let doc = mapping([("a", mapping([("b", scalar("z"))]))]);

        assert_eq!(
            doc.lookup("/a//b"),
            Err(LookupError::KeyNotFound { key: String::new() })
        );
    }

    #[test]
    fn test_overflowing_index_is_out_of_range() {
        let doc = Document::Sequence(vec![scalar("x")]);

        let err = doc.lookup("/99999999999999999999999999").unwrap_err();
        assert_eq!(err.kind(), "index_out_of_range");
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let yaml = r#"
key1:
  - magic.com
  - key2: example.com
"#;
        let doc = Document::from_yaml_str(yaml).unwrap();

        let first = doc.lookup("/key1/1/key2").unwrap();
        for _ in 0..10 {
            assert_eq!(doc.lookup("/key1/1/key2"), Ok(first));
        }
        assert_eq!(first, "example.com");
    }

    #[test]
    fn test_unknown_paths() {
        let yaml = r#"
key1:
  - magic.com
  - key2: example.com
"#;
        let doc = Document::from_yaml_str(yaml).unwrap();

        assert!(doc.lookup("key1/1/key3").is_err());
        assert!(doc.lookup("key1/2/key2").is_err());
        assert_eq!(doc.lookup("key1/0"), Ok("magic.com"));
        assert_eq!(doc.lookup("/key1/0/"), Ok("magic.com"));
    }
}
