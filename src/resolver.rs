//! Duplicate tag resolution
//!
//! Finds the digest owned by a source tag and collects every tag in the
//! listing that points at the same digest.

use crate::registry::TagRecord;

/// Tags sharing the source tag's digest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The tag that was looked up
    pub src_tag: String,
    /// Every tag with the source tag's digest, source included, in listing order.
    /// `[src_tag]` when the source tag is not in the listing.
    pub tags: Vec<String>,
    /// `tags` with one occurrence of `src_tag` removed
    pub alternative_tags: Vec<String>,
}

impl Resolution {
    /// Number of tags sharing the digest, including the source tag
    pub fn count(&self) -> usize {
        self.tags.len()
    }

    /// True when at least one other tag shares the source tag's digest
    pub fn has_duplicates(&self) -> bool {
        self.count() > 1
    }
}

/// Digest of the first record named `src_tag`
pub fn find_digest<'a>(records: &'a [TagRecord], src_tag: &str) -> Option<&'a str> {
    records
        .iter()
        .find(|record| record.name == src_tag)
        .map(|record| record.digest.as_str())
}

/// Names of every record with `digest`, in listing order
pub fn tags_with_digest(records: &[TagRecord], digest: &str) -> Vec<String> {
    records
        .iter()
        .filter(|record| record.digest == digest)
        .map(|record| record.name.clone())
        .collect()
}

/// Resolve the duplicate tags of `src_tag` within `records`.
///
/// A source tag missing from the listing is not an error: it resolves to
/// itself alone.
pub fn resolve(records: &[TagRecord], src_tag: &str) -> Resolution {
    let tags = match find_digest(records, src_tag) {
        Some(digest) => {
            tracing::debug!(src_tag, digest, "found source tag");
            tags_with_digest(records, digest)
        }
        None => {
            tracing::debug!(src_tag, "source tag not in listing");
            vec![src_tag.to_string()]
        }
    };

    let mut alternative_tags = tags.clone();
    if let Some(pos) = alternative_tags.iter().position(|tag| tag == src_tag) {
        alternative_tags.remove(pos);
    }

    Resolution {
        src_tag: src_tag.to_string(),
        tags,
        alternative_tags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn listing() -> Vec<TagRecord> {
        vec![
            TagRecord::new("v1", "sha:A"),
            TagRecord::new("v2", "sha:A"),
            TagRecord::new("v3", "sha:B"),
        ]
    }

    #[test]
    fn test_duplicates_found() {
        let res = resolve(&listing(), "v1");
        assert_eq!(res.src_tag, "v1");
        assert_eq!(res.tags, vec!["v1", "v2"]);
        assert_eq!(res.alternative_tags, vec!["v2"]);
        assert!(res.has_duplicates());
    }

    #[test]
    fn test_unique_tag() {
        let res = resolve(&listing(), "v3");
        assert_eq!(res.tags, vec!["v3"]);
        assert!(res.alternative_tags.is_empty());
        assert!(!res.has_duplicates());
    }

    #[test]
    fn test_missing_tag() {
        let res = resolve(&listing(), "missing");
        assert_eq!(res.tags, vec!["missing"]);
        assert!(res.alternative_tags.is_empty());
        assert!(!res.has_duplicates());
    }

    #[test]
    fn test_empty_listing() {
        let res = resolve(&[], "latest");
        assert_eq!(res.tags, vec!["latest"]);
        assert!(res.alternative_tags.is_empty());
        assert_eq!(res.count(), 1);
    }

    #[test]
    fn test_order_follows_listing() {
        let records = vec![
            TagRecord::new("latest", "sha:A"),
            TagRecord::new("stable", "sha:B"),
            TagRecord::new("v2", "sha:A"),
            TagRecord::new("develop", "sha:A"),
        ];

        let res = resolve(&records, "develop");
        assert_eq!(res.tags, vec!["latest", "v2", "develop"]);
        assert_eq!(res.alternative_tags, vec!["latest", "v2"]);
    }

    #[test]
    fn test_first_matching_name_wins() {
        // Malformed listing with a repeated name; the first record's digest is used
        let records = vec![
            TagRecord::new("v1", "sha:A"),
            TagRecord::new("v1", "sha:B"),
            TagRecord::new("v2", "sha:B"),
        ];

        let res = resolve(&records, "v1");
        assert_eq!(res.tags, vec!["v1"]);
        assert!(res.alternative_tags.is_empty());
    }

    #[test]
    fn test_only_one_source_occurrence_removed() {
        let records = vec![
            TagRecord::new("v1", "sha:A"),
            TagRecord::new("v1", "sha:A"),
            TagRecord::new("v2", "sha:A"),
        ];

        let res = resolve(&records, "v1");
        assert_eq!(res.tags, vec!["v1", "v1", "v2"]);
        assert_eq!(res.alternative_tags, vec!["v1", "v2"]);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let records = listing();
        for tag in ["v1", "v2", "v3", "missing"] {
            assert_eq!(resolve(&records, tag), resolve(&records, tag));
        }
    }

    #[test]
    fn test_result_invariants() {
        let records = vec![
            TagRecord::new("a", "sha:1"),
            TagRecord::new("b", "sha:2"),
            TagRecord::new("c", "sha:1"),
            TagRecord::new("d", "sha:3"),
            TagRecord::new("e", "sha:1"),
        ];

        for tag in ["a", "b", "c", "d", "e", "zzz"] {
            let res = resolve(&records, tag);

            assert!(!res.tags.is_empty());
            assert!(res.tags.iter().any(|t| t == tag));
            assert_eq!(res.alternative_tags.len(), res.tags.len() - 1);

            let mut with_src: HashSet<&str> =
                res.alternative_tags.iter().map(String::as_str).collect();
            with_src.insert(tag);
            let all: HashSet<&str> = res.tags.iter().map(String::as_str).collect();
            assert_eq!(with_src, all);
        }
    }

    #[test]
    fn test_find_digest() {
        let records = listing();
        assert_eq!(find_digest(&records, "v2"), Some("sha:A"));
        assert_eq!(find_digest(&records, "nope"), None);
        assert_eq!(tags_with_digest(&records, "sha:B"), vec!["v3"]);
        assert!(tags_with_digest(&records, "sha:C").is_empty());
    }
}
