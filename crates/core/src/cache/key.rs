//! Canonical cache key generation for document sets.

use crate::Error;

/// Compute the canonical key for a set of document ids.
///
/// Ids are sorted lexicographically and joined with commas, so the key is
/// independent of the order in which the caller selected the documents.
pub fn compute_cache_key<S: AsRef<str>>(document_ids: &[S]) -> String {
    let mut ids: Vec<&str> = document_ids.iter().map(AsRef::as_ref).collect();
    ids.sort_unstable();
    ids.join(",")
}

/// Reject document ids that would corrupt the comma-joined key.
pub fn validate_document_ids<S: AsRef<str>>(document_ids: &[S]) -> Result<(), Error> {
    for id in document_ids {
        let id = id.as_ref();
        if id.is_empty() {
            return Err(Error::InvalidInput("document ids cannot be empty".to_string()));
        }
        if id.contains(',') {
            return Err(Error::InvalidInput(format!("document id contains a comma: {id}")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_order_independent() {
        let key1 = compute_cache_key(&["doc-b", "doc-a", "doc-c"]);
        let key2 = compute_cache_key(&["doc-c", "doc-a", "doc-b"]);
        assert_eq!(key1, key2);
        assert_eq!(key1, "doc-a,doc-b,doc-c");
    }

    #[test]
    fn test_key_single_id() {
        assert_eq!(compute_cache_key(&["doc-a"]), "doc-a");
    }

    #[test]
    fn test_key_empty_set() {
        assert_eq!(compute_cache_key::<&str>(&[]), "");
    }

    #[test]
    fn test_key_distinguishes_sets() {
        let key1 = compute_cache_key(&["doc-a", "doc-b"]);
        let key2 = compute_cache_key(&["doc-a"]);
        assert_ne!(key1, key2);
    }

    #[test]
    fn test_validate_rejects_comma() {
        let err = validate_document_ids(&["doc-a", "doc,b"]).unwrap_err();
        assert!(err.to_string().contains("comma"));
    }

    #[test]
    fn test_validate_rejects_empty() {
        assert!(validate_document_ids(&["doc-a", ""]).is_err());
    }

    #[test]
    fn test_validate_accepts_plain_ids() {
        validate_document_ids(&["doc-a", "b2c3", "550e8400-e29b-41d4-a716-446655440000"]).unwrap();
    }
}
