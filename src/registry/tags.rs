//! Tag listing types and decoding

use crate::{LookupError, Result};
use serde::Deserialize;
use serde_json::Value;

/// One entry of a repository's tag listing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TagRecord {
    /// Tag name (e.g., "latest", "v1.2.0")
    pub name: String,
    /// Manifest digest the tag points to (e.g., "sha256:...")
    pub digest: String,
}

impl TagRecord {
    pub fn new(name: impl Into<String>, digest: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            digest: digest.into(),
        }
    }
}

/// Decode a tag listing response body.
///
/// The body must be JSON. An array yields one record per element, in listing
/// order, and every element must be an object with string `name` and
/// `digest` fields. Any other JSON value (such as an error object) yields an
/// empty listing.
pub fn decode_listing(body: &[u8]) -> Result<Vec<TagRecord>> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| LookupError::Decode(e.to_string()))?;

    let entries = match value {
        Value::Array(entries) => entries,
        other => {
            tracing::warn!(
                kind = json_kind(&other),
                "tag listing is not a JSON array, treating it as empty"
            );
            return Ok(Vec::new());
        }
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| {
            serde_json::from_value(entry)
                .map_err(|e| LookupError::Decode(format!("listing entry {}: {}", idx, e)))
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_harbor_listing() {
        let body = br#"[
            {"name": "v1", "digest": "sha256:aaa", "size": 1024, "labels": []},
            {"name": "v2", "digest": "sha256:aaa"},
            {"name": "v3", "digest": "sha256:bbb"}
        ]"#;

        let records = decode_listing(body).unwrap();
        assert_eq!(
            records,
            vec![
                TagRecord::new("v1", "sha256:aaa"),
                TagRecord::new("v2", "sha256:aaa"),
                TagRecord::new("v3", "sha256:bbb"),
            ]
        );
    }

    #[test]
    fn test_decode_empty_array() {
        assert!(decode_listing(b"[]").unwrap().is_empty());
    }

    #[test]
    fn test_decode_error_object_is_empty() {
        let records = decode_listing(br#"{"error": "unauthorized"}"#).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_decode_rejects_incomplete_entries() {
        let bodies: [&[u8]; 4] = [
            br#"[{"digest": "sha256:aaa"}, {"name": "v5", "digest": "sha256:ccc"}]"#,
            br#"[{"name": 7, "digest": "sha256:aaa"}]"#,
            br#"[{"name": "v1", "digest": null}]"#,
            br#"["v4"]"#,
        ];

        for body in bodies {
            let err = decode_listing(body).unwrap_err();
            assert!(matches!(err, LookupError::Decode(_)));
        }
    }

    #[test]
    fn test_decode_tag_without_digest_fails() {
        let body = br#"[{"name": "v1"}, {"name": "v2", "digest": "sha:A"}]"#;

        match decode_listing(body).unwrap_err() {
            LookupError::Decode(msg) => {
                assert!(msg.contains("listing entry 0"));
                assert!(msg.contains("digest"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_decode_invalid_json() {
        let err = decode_listing(b"<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, LookupError::Decode(_)));
    }
}
