//! Query cache operations.
//!
//! Provides functions for caching and retrieving generated answers keyed by
//! (query text, canonical document set, model). Entries are append-only;
//! lookups resolve duplicates by taking the newest entry.

use super::connection::CacheDb;
use super::key::compute_cache_key;
use crate::Error;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio_rusqlite::params;

/// A cached answer row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedQuery {
    pub id: String,
    pub query: String,
    /// Canonical sorted comma-joined document id list.
    pub document_ids: String,
    pub model: String,
    /// Raw JSON payload as stored at insert time.
    pub response: String,
    pub created_at: String,
}

impl CacheDb {
    /// Look up the cached answer for an exact (query, document set, model) triple.
    ///
    /// The query and model match case-sensitively. Document ids are
    /// canonicalized, so selection order does not affect the result.
    /// When duplicate entries exist, the one with the newest `created_at`
    /// wins. Returns None on a miss.
    pub async fn get_cached_query(
        &self, query: &str, document_ids: &[String], model: &str,
    ) -> Result<Option<CachedQuery>, Error> {
        let query = query.to_string();
        let key = compute_cache_key(document_ids);
        let model = model.to_string();
        self.conn
            .call(move |conn| -> Result<Option<CachedQuery>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT id, query, document_ids, model, response, created_at
                     FROM query_cache
                     WHERE query = ?1 AND document_ids = ?2 AND model = ?3
                     ORDER BY created_at DESC
                     LIMIT 1",
                )?;

                let result = stmt.query_row(params![query, key, model], |row| {
                    Ok(CachedQuery {
                        id: row.get(0)?,
                        query: row.get(1)?,
                        document_ids: row.get(2)?,
                        model: row.get(3)?,
                        response: row.get(4)?,
                        created_at: row.get(5)?,
                    })
                });

                match result {
                    Ok(entry) => Ok(Some(entry)),
                    Err(tokio_rusqlite::rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Insert a generated answer into the cache.
    ///
    /// Always appends a new row, even when an entry for the same triple
    /// already exists; lookups resolve the duplicate in favor of this one.
    pub async fn cache_query(
        &self, id: &str, query: &str, document_ids: &[String], model: &str, response: &serde_json::Value,
    ) -> Result<(), Error> {
        let id = id.to_string();
        let query = query.to_string();
        let key = compute_cache_key(document_ids);
        let model = model.to_string();
        let response = serde_json::to_string(response).map_err(|e| Error::Serialization(e.to_string()))?;
        let created_at = Utc::now().to_rfc3339();

        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO query_cache (id, query, document_ids, model, response, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![id, query, key, model, response, created_at],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Delete every cached answer.
    ///
    /// Returns the number of deleted entries.
    pub async fn clear_query_cache(&self) -> Result<u64, Error> {
        self.conn
            .call(|conn| -> Result<u64, Error> {
                let count = conn.execute("DELETE FROM query_cache", [])?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }

    /// Delete cached answers older than the given age in days.
    ///
    /// The age is validated before any row is touched; zero or negative
    /// values are rejected. Entries created exactly at the cutoff instant
    /// are retained. Returns the number of deleted entries.
    pub async fn remove_expired_queries(&self, max_age_days: i64) -> Result<u64, Error> {
        if max_age_days <= 0 {
            return Err(Error::InvalidInput(format!(
                "max_age_days must be positive, got {max_age_days}"
            )));
        }
        let age = Duration::try_days(max_age_days)
            .ok_or_else(|| Error::InvalidInput(format!("max_age_days out of range: {max_age_days}")))?;
        let cutoff = (Utc::now() - age).to_rfc3339();
        self.remove_queries_before(cutoff).await
    }

    /// Delete cached answers with `created_at` strictly before the cutoff.
    pub(crate) async fn remove_queries_before(&self, cutoff: String) -> Result<u64, Error> {
        self.conn
            .call(move |conn| -> Result<u64, Error> {
                let count = conn.execute("DELETE FROM query_cache WHERE created_at < ?1", params![cutoff])?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }
}
