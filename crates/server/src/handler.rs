//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use crate::tools::cache::purge::{CachePurgeParams, purge_impl};
use crate::tools::doc_query::{DocQueryParams, query_impl};
use crate::tools::documents::add::{DocAddParams, add_impl};
use crate::tools::documents::get::{DocGetParams, get_impl};
use crate::tools::documents::list::{DocListParams, list_impl};
use crate::tools::documents::remove::{DocRemoveParams, remove_impl};
use crate::tools::documents::search::{DocSearchParams, search_impl};
use crate::tools::documents::update::{DocUpdateParams, update_impl};
use crate::tools::extract_refs::{ExtractRefsParams, extract_refs_impl};
use crate::tools::key_validate::{KeyValidateParams, key_validate_impl};

use docqa_core::{AppConfig, CacheDb};
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The main MCP server handler for mcp-docqa.
#[derive(Clone)]
pub struct DocQaServer {
    config: AppConfig,
    db: CacheDb,
    tool_router: ToolRouter<Self>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl DocQaServer {
    /// Create a new server handler over the given configuration and store.
    pub fn new(config: AppConfig, db: CacheDb) -> Self {
        Self { config, db, tool_router: Self::tool_router() }
    }

    /// Answer a question from stored documents, serving from cache when possible.
    #[tool(
        description = "Answer a natural-language query from the selected documents. Serves a cached answer when one exists; otherwise generates with Gemini, extracts citation references, and caches the result."
    )]
    async fn doc_query(&self, params: Parameters<DocQueryParams>) -> Result<CallToolResult, McpError> {
        query_impl(&self.db, &self.config, params.0).await
    }

    /// Extract citation references from answer text.
    ///
    /// No model call is made; this is a pure scan of the given text.
    #[tool(
        description = "Extract citation references of the form [document, page: N] or [document, section: \"name\"] from text, resolving them against the given documents."
    )]
    async fn extract_references(&self, params: Parameters<ExtractRefsParams>) -> Result<CallToolResult, McpError> {
        extract_refs_impl(params.0).await
    }

    /// Store a new document.
    #[tool(description = "Add a document (PDF or DOCX, max 10MB of extracted text) to the store.")]
    async fn doc_add(&self, params: Parameters<DocAddParams>) -> Result<CallToolResult, McpError> {
        add_impl(&self.db, params.0).await
    }

    /// Fetch a single document by id.
    #[tool(description = "Get a stored document by id, including its content and metadata.")]
    async fn doc_get(&self, params: Parameters<DocGetParams>) -> Result<CallToolResult, McpError> {
        get_impl(&self.db, params.0).await
    }

    /// List stored documents.
    #[tool(description = "List all stored documents, newest upload first.")]
    async fn doc_list(&self, params: Parameters<DocListParams>) -> Result<CallToolResult, McpError> {
        list_impl(&self.db, params.0).await
    }

    /// Search stored documents.
    #[tool(description = "Search stored documents by substring over content, file name, and metadata.")]
    async fn doc_search(&self, params: Parameters<DocSearchParams>) -> Result<CallToolResult, McpError> {
        search_impl(&self.db, params.0).await
    }

    /// Replace a stored document.
    #[tool(description = "Update a stored document, replacing every stored field.")]
    async fn doc_update(&self, params: Parameters<DocUpdateParams>) -> Result<CallToolResult, McpError> {
        update_impl(&self.db, params.0).await
    }

    /// Delete a stored document.
    #[tool(description = "Remove a stored document by id.")]
    async fn doc_remove(&self, params: Parameters<DocRemoveParams>) -> Result<CallToolResult, McpError> {
        remove_impl(&self.db, params.0).await
    }

    /// Purge the query cache.
    #[tool(description = "Purge cached answers, either all of them or only those older than a given age in days.")]
    async fn cache_purge(&self, params: Parameters<CachePurgeParams>) -> Result<CallToolResult, McpError> {
        purge_impl(&self.db, params.0).await
    }

    /// Check the configured Gemini API key.
    #[tool(description = "Validate the configured Gemini API key against the API.")]
    async fn key_validate(&self, params: Parameters<KeyValidateParams>) -> Result<CallToolResult, McpError> {
        key_validate_impl(&self.config, params.0).await
    }
}

impl ServerHandler for DocQaServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "mcp-docqa".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
