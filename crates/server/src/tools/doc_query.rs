//! doc_query tool implementation.
//!
//! Answers a natural-language query from the selected documents, caching
//! generated answers keyed by (query, canonical document set, model).

use std::collections::HashSet;
use std::str::FromStr;

use docqa_client::{
    DocumentRef, DocumentSource, GeminiClient, GeminiConfig, GeminiModel, GenerateRequest, Reference,
    extract_references,
};
use docqa_core::{AppConfig, CacheDb, Error, validate_document_ids};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input parameters for the doc_query tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct DocQueryParams {
    /// Natural-language question (required).
    pub query: String,

    /// Ids of the stored documents to answer from (at least one).
    pub document_ids: Vec<String>,

    /// Model name or alias: flash, pro, or a full model name. Defaults to
    /// the configured model.
    #[serde(default)]
    pub model: Option<String>,

    /// Regenerate even when a cached answer exists.
    #[serde(default)]
    pub force_refresh: bool,
}

/// The answer payload, as stored in the cache and returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DocQueryPayload {
    /// Generated answer text.
    pub answer: String,
    /// Citations extracted from the answer.
    pub references: Vec<Reference>,
    /// Canonical name of the model that produced the answer.
    pub model: String,
    /// The question as asked.
    pub query: String,
    /// When the answer was generated (RFC 3339).
    pub created_at: String,
}

/// Output from the doc_query tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DocQueryOutput {
    #[serde(flatten)]
    pub payload: DocQueryPayload,
    /// Whether the answer came from the cache.
    pub cached: bool,
}

/// Implementation of the doc_query tool.
pub async fn query_impl(db: &CacheDb, config: &AppConfig, params: DocQueryParams) -> Result<CallToolResult, McpError> {
    if params.query.trim().is_empty() {
        return Err(Error::InvalidInput("query cannot be empty".to_string()).into());
    }
    if params.document_ids.is_empty() {
        return Err(Error::InvalidInput("at least one document id is required".to_string()).into());
    }
    validate_document_ids(&params.document_ids)?;

    let mut seen = HashSet::new();
    for id in &params.document_ids {
        if !seen.insert(id.as_str()) {
            return Err(Error::InvalidInput(format!("duplicate document id: {id}")).into());
        }
    }

    // cache rows always store the canonical model name, so aliases hit too
    let model =
        GeminiModel::from_str(params.model.as_deref().unwrap_or(&config.default_model)).map_err(Error::from)?;

    if config.cache_enabled
        && !params.force_refresh
        && let Ok(Some(entry)) = db.get_cached_query(&params.query, &params.document_ids, model.as_str()).await
        && let Ok(payload) = serde_json::from_str::<DocQueryPayload>(&entry.response)
    {
        tracing::debug!("cache hit for query: {}", params.query);
        let output = DocQueryOutput { payload, cached: true };
        return Ok(CallToolResult::success(vec![Content::text(
            serde_json::to_string_pretty(&output).unwrap_or_default(),
        )]));
    }

    let records = db.get_documents_by_ids(&params.document_ids).await?;
    if records.len() != params.document_ids.len() {
        let missing: Vec<&str> = params
            .document_ids
            .iter()
            .filter(|id| !records.iter().any(|d| &d.id == *id))
            .map(|id| id.as_str())
            .collect();
        return Err(Error::DocumentNotFound(missing.join(", ")).into());
    }

    let client = GeminiClient::new(GeminiConfig {
        api_key: config
            .require_gemini_api_key()
            .map_err(|e| Error::GeminiAuth(e.to_string()))?
            .to_string(),
        model,
        timeout: config.timeout(),
        temperature: config.temperature,
        top_k: config.top_k,
        top_p: config.top_p,
        max_output_tokens: config.max_output_tokens,
        ..Default::default()
    })
    .map_err(Error::from)?;

    let request = GenerateRequest {
        query: params.query.clone(),
        documents: records
            .iter()
            .map(|d| DocumentSource { name: d.file_name.clone(), content: d.content.clone() })
            .collect(),
    };

    let answer = client.generate(request).await.map_err(Error::from)?;

    let candidates: Vec<DocumentRef> = records
        .iter()
        .map(|d| DocumentRef { id: d.id.clone(), name: d.file_name.clone() })
        .collect();
    let references = extract_references(&answer.text, &candidates);

    let payload = DocQueryPayload {
        answer: answer.text,
        references,
        model: model.as_str().to_string(),
        query: params.query.clone(),
        created_at: chrono::Utc::now().to_rfc3339(),
    };

    if config.cache_enabled {
        let id = uuid::Uuid::new_v4().to_string();
        let value = serde_json::to_value(&payload).unwrap_or_default();
        if let Err(e) = db.cache_query(&id, &params.query, &params.document_ids, model.as_str(), &value).await {
            tracing::warn!("failed to cache generated answer: {}", e);
        }
    }

    let output = DocQueryOutput { payload, cached: false };
    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&output).unwrap_or_default(),
    )]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::parse_output;
    use docqa_core::{DocumentMetadata, DocumentRecord};

    fn make_document(id: &str, file_name: &str) -> DocumentRecord {
        DocumentRecord {
            id: id.to_string(),
            file_name: file_name.to_string(),
            file_type: "pdf".to_string(),
            file_size: 1024,
            uploaded_at: chrono::Utc::now().to_rfc3339(),
            metadata: DocumentMetadata { title: file_name.to_string(), ..Default::default() },
            content: "Rust is a systems programming language.".to_string(),
        }
    }

    fn make_payload(query: &str) -> DocQueryPayload {
        DocQueryPayload {
            answer: "Rust is a systems language [report.pdf, page: 1].".to_string(),
            references: vec![],
            model: "gemini-1.5-flash".to_string(),
            query: query.to_string(),
            created_at: "2025-03-01T00:00:00+00:00".to_string(),
        }
    }

    #[tokio::test]
    async fn test_empty_query() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let config = AppConfig::default();
        let params =
            DocQueryParams { query: "  ".into(), document_ids: vec!["doc-a".into()], ..Default::default() };

        let result = query_impl(&db, &config, params).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_empty_document_ids() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let config = AppConfig::default();
        let params = DocQueryParams { query: "what is rust".into(), ..Default::default() };

        let result = query_impl(&db, &config, params).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_comma_in_document_id() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let config = AppConfig::default();
        let params = DocQueryParams {
            query: "what is rust".into(),
            document_ids: vec!["doc,a".into()],
            ..Default::default()
        };

        let result = query_impl(&db, &config, params).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_duplicate_document_ids() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let config = AppConfig::default();
        let params = DocQueryParams {
            query: "what is rust".into(),
            document_ids: vec!["doc-a".into(), "doc-a".into()],
            ..Default::default()
        };

        let result = query_impl(&db, &config, params).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_unknown_model() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let config = AppConfig::default();
        let params = DocQueryParams {
            query: "what is rust".into(),
            document_ids: vec!["doc-a".into()],
            model: Some("gpt-4".into()),
            ..Default::default()
        };

        let err = query_impl(&db, &config, params).await.unwrap_err();
        assert_eq!(err.code.0, -32602);
    }

    #[tokio::test]
    async fn test_missing_document() {
        let db = CacheDb::open_in_memory().await.unwrap();
        db.add_document(&make_document("doc-a", "report.pdf")).await.unwrap();
        let config = AppConfig::default();
        let params = DocQueryParams {
            query: "what is rust".into(),
            document_ids: vec!["doc-a".into(), "ghost".into()],
            ..Default::default()
        };

        let err = query_impl(&db, &config, params).await.unwrap_err();
        assert_eq!(err.code.0, -32001);
        assert!(err.message.contains("ghost"));
    }

    #[tokio::test]
    async fn test_missing_api_key_on_miss() {
        let db = CacheDb::open_in_memory().await.unwrap();
        db.add_document(&make_document("doc-a", "report.pdf")).await.unwrap();
        let config = AppConfig::default(); // No gemini_api_key set
        let params = DocQueryParams {
            query: "what is rust".into(),
            document_ids: vec!["doc-a".into()],
            ..Default::default()
        };

        let err = query_impl(&db, &config, params).await.unwrap_err();
        assert_eq!(err.code.0, -32009);
    }

    #[tokio::test]
    async fn test_cached_hit_requires_no_network() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let config = AppConfig::default();
        let payload = make_payload("what is rust");
        let docs = vec!["doc-a".to_string(), "doc-b".to_string()];
        db.cache_query("q-1", "what is rust", &docs, "gemini-1.5-flash", &serde_json::to_value(&payload).unwrap())
            .await
            .unwrap();

        // different selection order and the short model alias still hit
        let params = DocQueryParams {
            query: "what is rust".into(),
            document_ids: vec!["doc-b".into(), "doc-a".into()],
            model: Some("flash".into()),
            ..Default::default()
        };

        let result = query_impl(&db, &config, params).await.unwrap();
        let output: DocQueryOutput = parse_output(&result);
        assert!(output.cached);
        assert_eq!(output.payload.answer, payload.answer);
        assert_eq!(output.payload.created_at, payload.created_at);
    }

    #[tokio::test]
    async fn test_force_refresh_skips_cache() {
        let db = CacheDb::open_in_memory().await.unwrap();
        db.add_document(&make_document("doc-a", "report.pdf")).await.unwrap();
        let config = AppConfig::default();
        let payload = make_payload("what is rust");
        let docs = vec!["doc-a".to_string()];
        db.cache_query("q-1", "what is rust", &docs, "gemini-1.5-flash", &serde_json::to_value(&payload).unwrap())
            .await
            .unwrap();

        let params = DocQueryParams {
            query: "what is rust".into(),
            document_ids: vec!["doc-a".into()],
            force_refresh: true,
            ..Default::default()
        };

        // the cached entry is ignored, so generation is attempted and fails
        // on the missing API key
        let err = query_impl(&db, &config, params).await.unwrap_err();
        assert_eq!(err.code.0, -32009);
    }

    #[tokio::test]
    async fn test_cache_disabled_skips_lookup() {
        let db = CacheDb::open_in_memory().await.unwrap();
        db.add_document(&make_document("doc-a", "report.pdf")).await.unwrap();
        let config = AppConfig { cache_enabled: false, ..Default::default() };
        let payload = make_payload("what is rust");
        let docs = vec!["doc-a".to_string()];
        db.cache_query("q-1", "what is rust", &docs, "gemini-1.5-flash", &serde_json::to_value(&payload).unwrap())
            .await
            .unwrap();

        let params = DocQueryParams {
            query: "what is rust".into(),
            document_ids: vec!["doc-a".into()],
            ..Default::default()
        };

        let err = query_impl(&db, &config, params).await.unwrap_err();
        assert_eq!(err.code.0, -32009);
    }

    #[tokio::test]
    async fn test_corrupt_cache_entry_falls_through() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let config = AppConfig::default();
        let docs = vec!["doc-a".to_string()];
        db.cache_query("q-1", "what is rust", &docs, "gemini-1.5-flash", &serde_json::json!("not a payload"))
            .await
            .unwrap();

        let params = DocQueryParams {
            query: "what is rust".into(),
            document_ids: vec!["doc-a".into()],
            ..Default::default()
        };

        // the unparseable entry is treated as a miss; the selected document
        // doesn't exist, which surfaces next
        let err = query_impl(&db, &config, params).await.unwrap_err();
        assert_eq!(err.code.0, -32001);
    }
}
