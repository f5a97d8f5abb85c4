//! doc_add tool implementation.
//!
//! Stores a new document. Callers supply the already-extracted text
//! content; this server does no text extraction of its own.

use docqa_core::{CacheDb, DocumentMetadata, DocumentRecord, Error};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Upload size limit, matching the 10MB file cap.
const MAX_CONTENT_BYTES: usize = 10 * 1024 * 1024;

/// Parameters for the doc_add tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DocAddParams {
    /// Original file name; must end in .pdf or .docx.
    pub file_name: String,

    /// Extracted text content of the document.
    pub content: String,

    /// Optional descriptive metadata. Title defaults to the file name and
    /// author to "Unknown".
    #[serde(default)]
    pub metadata: Option<DocumentMetadata>,
}

/// Output from the doc_add tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DocAddOutput {
    /// The stored document, including its generated id.
    pub document: DocumentRecord,
}

/// Implementation of the doc_add tool.
pub async fn add_impl(db: &CacheDb, params: DocAddParams) -> Result<CallToolResult, McpError> {
    if params.file_name.trim().is_empty() {
        return Err(Error::InvalidInput("file_name cannot be empty".to_string()).into());
    }

    let file_type = params
        .file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| ext == "pdf" || ext == "docx")
        .ok_or_else(|| {
            Error::InvalidInput(format!("unsupported file type: {} (only PDF and DOCX)", params.file_name))
        })?;

    if params.content.is_empty() {
        return Err(Error::InvalidInput("content cannot be empty".to_string()).into());
    }

    if params.content.len() > MAX_CONTENT_BYTES {
        return Err(Error::InvalidInput(format!(
            "content size {} exceeds the 10MB limit",
            params.content.len()
        ))
        .into());
    }

    let mut metadata = params.metadata.unwrap_or_default();
    if metadata.title.is_empty() {
        metadata.title = params.file_name.clone();
    }
    if metadata.author.is_empty() {
        metadata.author = "Unknown".to_string();
    }

    let document = DocumentRecord {
        id: uuid::Uuid::new_v4().to_string(),
        file_name: params.file_name,
        file_type,
        file_size: params.content.len() as i64,
        uploaded_at: chrono::Utc::now().to_rfc3339(),
        metadata,
        content: params.content,
    };

    db.add_document(&document).await?;

    tracing::debug!("added document {} ({})", document.id, document.file_name);

    let output = DocAddOutput { document };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::Serialization(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::parse_output;

    #[tokio::test]
    async fn test_add_and_fetch() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let params = DocAddParams {
            file_name: "report.pdf".to_string(),
            content: "Quarterly revenue grew by 20%.".to_string(),
            metadata: None,
        };

        let result = add_impl(&db, params).await.unwrap();
        let output: DocAddOutput = parse_output(&result);

        assert_eq!(output.document.file_type, "pdf");
        assert_eq!(output.document.file_size, 30);
        assert_eq!(output.document.metadata.title, "report.pdf");
        assert_eq!(output.document.metadata.author, "Unknown");

        let stored = db.get_document(&output.document.id).await.unwrap().unwrap();
        assert_eq!(stored.content, "Quarterly revenue grew by 20%.");
    }

    #[tokio::test]
    async fn test_add_uppercase_extension() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let params = DocAddParams {
            file_name: "NOTES.DOCX".to_string(),
            content: "Meeting notes.".to_string(),
            metadata: None,
        };

        let result = add_impl(&db, params).await.unwrap();
        let output: DocAddOutput = parse_output(&result);
        assert_eq!(output.document.file_type, "docx");
        assert_eq!(output.document.file_name, "NOTES.DOCX");
    }

    #[tokio::test]
    async fn test_add_keeps_supplied_metadata() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let params = DocAddParams {
            file_name: "paper.pdf".to_string(),
            content: "Abstract.".to_string(),
            metadata: Some(DocumentMetadata {
                title: "A Study".to_string(),
                author: "Lovelace".to_string(),
                page_count: Some(12),
                ..Default::default()
            }),
        };

        let result = add_impl(&db, params).await.unwrap();
        let output: DocAddOutput = parse_output(&result);
        assert_eq!(output.document.metadata.title, "A Study");
        assert_eq!(output.document.metadata.author, "Lovelace");
        assert_eq!(output.document.metadata.page_count, Some(12));
    }

    #[tokio::test]
    async fn test_add_rejects_unsupported_extension() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let params = DocAddParams {
            file_name: "notes.txt".to_string(),
            content: "Plain text.".to_string(),
            metadata: None,
        };

        let result = add_impl(&db, params).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_add_rejects_missing_extension() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let params =
            DocAddParams { file_name: "report".to_string(), content: "Text.".to_string(), metadata: None };

        let result = add_impl(&db, params).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_add_rejects_empty_content() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let params =
            DocAddParams { file_name: "report.pdf".to_string(), content: String::new(), metadata: None };

        let result = add_impl(&db, params).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_add_rejects_oversize_content() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let params = DocAddParams {
            file_name: "big.pdf".to_string(),
            content: "x".repeat(MAX_CONTENT_BYTES + 1),
            metadata: None,
        };

        let result = add_impl(&db, params).await;
        assert!(result.is_err());
    }
}
