//! cache_purge tool implementation.
//!
//! Purges cached answers, either wholesale or by age.

use docqa_core::{CacheDb, Error};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the cache_purge tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CachePurgeParams {
    /// Delete every cached answer.
    #[serde(default)]
    pub clear_all: bool,

    /// Delete cached answers older than this many days (must be positive).
    pub older_than_days: Option<i64>,
}

/// Output from the cache_purge tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CachePurgeOutput {
    /// Number of entries removed by the age filter.
    pub removed: u64,
    /// Number of entries removed by the full clear.
    pub cleared: u64,
}

/// Implementation of the cache_purge tool.
///
/// The age filter runs before the full clear so that an invalid age is
/// rejected without deleting anything.
pub async fn purge_impl(cache: &CacheDb, params: CachePurgeParams) -> Result<CallToolResult, McpError> {
    if !params.clear_all && params.older_than_days.is_none() {
        return Err(Error::InvalidInput(
            "At least one of clear_all or older_than_days must be specified".to_string(),
        )
        .into());
    }

    let mut removed = 0u64;
    let mut cleared = 0u64;

    if let Some(days) = params.older_than_days {
        removed = cache.remove_expired_queries(days).await?;
    }

    if params.clear_all {
        cleared = cache.clear_query_cache().await?;
    }

    let output = CachePurgeOutput { removed, cleared };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::Serialization(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::parse_output;

    const MODEL: &str = "gemini-1.5-flash";

    async fn seed(cache: &CacheDb, id: &str, query: &str) {
        let docs = vec!["doc-a".to_string()];
        cache
            .cache_query(id, query, &docs, MODEL, &serde_json::json!({"answer": "seeded"}))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_purge_no_params() {
        let cache = CacheDb::open_in_memory().await.unwrap();
        let params = CachePurgeParams { clear_all: false, older_than_days: None };

        let result = purge_impl(&cache, params).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_purge_clear_all() {
        let cache = CacheDb::open_in_memory().await.unwrap();
        seed(&cache, "q-1", "first question").await;
        seed(&cache, "q-2", "second question").await;

        let params = CachePurgeParams { clear_all: true, older_than_days: None };
        let result = purge_impl(&cache, params).await.unwrap();

        let output: CachePurgeOutput = parse_output(&result);
        assert_eq!(output.cleared, 2);
        assert_eq!(output.removed, 0);
    }

    #[tokio::test]
    async fn test_purge_fresh_entries_survive_age_filter() {
        let cache = CacheDb::open_in_memory().await.unwrap();
        seed(&cache, "q-1", "recent question").await;

        let params = CachePurgeParams { clear_all: false, older_than_days: Some(30) };
        let result = purge_impl(&cache, params).await.unwrap();

        let output: CachePurgeOutput = parse_output(&result);
        assert_eq!(output.removed, 0);

        let docs = vec!["doc-a".to_string()];
        assert!(cache.get_cached_query("recent question", &docs, MODEL).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_purge_invalid_age_deletes_nothing() {
        let cache = CacheDb::open_in_memory().await.unwrap();
        seed(&cache, "q-1", "kept question").await;

        let params = CachePurgeParams { clear_all: true, older_than_days: Some(0) };
        let result = purge_impl(&cache, params).await;
        assert!(result.is_err());

        let docs = vec!["doc-a".to_string()];
        assert!(cache.get_cached_query("kept question", &docs, MODEL).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_purge_both_filters() {
        let cache = CacheDb::open_in_memory().await.unwrap();
        seed(&cache, "q-1", "first question").await;
        seed(&cache, "q-2", "second question").await;

        let params = CachePurgeParams { clear_all: true, older_than_days: Some(30) };
        let result = purge_impl(&cache, params).await.unwrap();

        let output: CachePurgeOutput = parse_output(&result);
        assert_eq!(output.removed, 0);
        assert_eq!(output.cleared, 2);
    }
}
