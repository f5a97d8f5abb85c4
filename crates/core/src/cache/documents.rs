//! Document CRUD operations.
//!
//! Provides functions for storing, listing, searching, and deleting the
//! uploaded documents that queries run against.

use super::connection::CacheDb;
use crate::Error;
use serde::{Deserialize, Serialize};
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

const DOCUMENT_COLUMNS: &str = "id, file_name, file_type, file_size, uploaded_at, metadata, content";

/// Descriptive metadata attached to a stored document.
///
/// All fields are optional on the wire; absent fields deserialize to their
/// defaults so older rows stay readable as the shape grows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct DocumentMetadata {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<u32>,
}

/// A stored document with its extracted text content.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct DocumentRecord {
    pub id: String,
    pub file_name: String,
    /// Lowercase extension, e.g. "pdf" or "docx".
    pub file_type: String,
    pub file_size: i64,
    pub uploaded_at: String,
    pub metadata: DocumentMetadata,
    pub content: String,
}

fn map_document_row(row: &rusqlite::Row<'_>) -> Result<DocumentRecord, rusqlite::Error> {
    let metadata: String = row.get(5)?;
    Ok(DocumentRecord {
        id: row.get(0)?,
        file_name: row.get(1)?,
        file_type: row.get(2)?,
        file_size: row.get(3)?,
        uploaded_at: row.get(4)?,
        metadata: serde_json::from_str(&metadata).unwrap_or_default(),
        content: row.get(6)?,
    })
}

impl CacheDb {
    /// Insert a new document.
    ///
    /// Fails if a document with the same id already exists.
    pub async fn add_document(&self, document: &DocumentRecord) -> Result<(), Error> {
        let metadata = serde_json::to_string(&document.metadata).map_err(|e| Error::Serialization(e.to_string()))?;
        let document = document.clone();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO documents (id, file_name, file_type, file_size, uploaded_at, metadata, content)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    params![
                        document.id,
                        document.file_name,
                        document.file_type,
                        document.file_size,
                        document.uploaded_at,
                        metadata,
                        document.content,
                    ],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Get a document by id.
    ///
    /// Returns None if the id doesn't exist.
    pub async fn get_document(&self, id: &str) -> Result<Option<DocumentRecord>, Error> {
        let id = id.to_string();
        self.conn
            .call(move |conn| -> Result<Option<DocumentRecord>, Error> {
                let mut stmt =
                    conn.prepare(&format!("SELECT {DOCUMENT_COLUMNS} FROM documents WHERE id = ?1"))?;

                let result = stmt.query_row(params![id], map_document_row);

                match result {
                    Ok(doc) => Ok(Some(doc)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Get several documents by id, in the requested order.
    ///
    /// Ids with no matching document are skipped, so the result may be
    /// shorter than the input.
    pub async fn get_documents_by_ids(&self, ids: &[String]) -> Result<Vec<DocumentRecord>, Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids = ids.to_vec();
        self.conn
            .call(move |conn| -> Result<Vec<DocumentRecord>, Error> {
                let placeholders = vec!["?"; ids.len()].join(", ");
                let mut stmt =
                    conn.prepare(&format!("SELECT {DOCUMENT_COLUMNS} FROM documents WHERE id IN ({placeholders})"))?;

                let rows = stmt.query_map(rusqlite::params_from_iter(ids.iter()), map_document_row)?;
                let mut found = Vec::new();
                for row in rows {
                    found.push(row?);
                }

                let mut ordered = Vec::with_capacity(found.len());
                for id in &ids {
                    if let Some(pos) = found.iter().position(|d| &d.id == id) {
                        ordered.push(found.remove(pos));
                    }
                }
                Ok(ordered)
            })
            .await
            .map_err(Error::from)
    }

    /// List all documents, newest upload first.
    pub async fn list_documents(&self) -> Result<Vec<DocumentRecord>, Error> {
        self.conn
            .call(|conn| -> Result<Vec<DocumentRecord>, Error> {
                let mut stmt =
                    conn.prepare(&format!("SELECT {DOCUMENT_COLUMNS} FROM documents ORDER BY uploaded_at DESC"))?;

                let rows = stmt.query_map([], map_document_row)?;
                let mut documents = Vec::new();
                for row in rows {
                    documents.push(row?);
                }
                Ok(documents)
            })
            .await
            .map_err(Error::from)
    }

    /// Search documents by substring match over content, file name, and
    /// metadata. Matching is ASCII case-insensitive (SQLite LIKE semantics).
    pub async fn search_documents(&self, needle: &str) -> Result<Vec<DocumentRecord>, Error> {
        let pattern = format!("%{needle}%");
        self.conn
            .call(move |conn| -> Result<Vec<DocumentRecord>, Error> {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {DOCUMENT_COLUMNS} FROM documents
                     WHERE content LIKE ?1 OR file_name LIKE ?1 OR metadata LIKE ?1
                     ORDER BY uploaded_at DESC"
                ))?;

                let rows = stmt.query_map(params![pattern], map_document_row)?;
                let mut documents = Vec::new();
                for row in rows {
                    documents.push(row?);
                }
                Ok(documents)
            })
            .await
            .map_err(Error::from)
    }

    /// Overwrite every stored field of an existing document.
    ///
    /// Returns the number of updated rows: 0 means the id doesn't exist.
    pub async fn update_document(&self, document: &DocumentRecord) -> Result<u64, Error> {
        let metadata = serde_json::to_string(&document.metadata).map_err(|e| Error::Serialization(e.to_string()))?;
        let document = document.clone();
        self.conn
            .call(move |conn| -> Result<u64, Error> {
                let count = conn.execute(
                    "UPDATE documents
                     SET file_name = ?2, file_type = ?3, file_size = ?4,
                         uploaded_at = ?5, metadata = ?6, content = ?7
                     WHERE id = ?1",
                    params![
                        document.id,
                        document.file_name,
                        document.file_type,
                        document.file_size,
                        document.uploaded_at,
                        metadata,
                        document.content,
                    ],
                )?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }

    /// Delete a document by id.
    ///
    /// Returns the number of deleted rows: 0 means the id doesn't exist.
    pub async fn delete_document(&self, id: &str) -> Result<u64, Error> {
        let id = id.to_string();
        self.conn
            .call(move |conn| -> Result<u64, Error> {
                let count = conn.execute("DELETE FROM documents WHERE id = ?1", params![id])?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }
}
