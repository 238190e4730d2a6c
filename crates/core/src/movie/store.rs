//! Storage abstraction for movie records.

use thiserror::Error;

use crate::query::MovieQuery;

use super::types::{Movie, MovieUpdate, NewMovie};

/// Storage-level failures.
///
/// Variants carry enough to classify the failure, not the raw driver error;
/// the driver text lives only in `Database` and is kept out of client
/// responses by the error classifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("record not found: {0}")]
    NotFound(String),

    #[error("conflict on {0}")]
    Conflict(String),

    #[error("storage busy: {0}")]
    Busy(String),

    #[error("database error: {0}")]
    Database(String),
}

/// Persistence operations the catalog needs.
///
/// Implementations must be safe to share across request handlers.
pub trait MovieStore: Send + Sync {
    /// Insert a new record under the given slug.
    ///
    /// Fails with [`StoreError::Conflict`] when the slug is already taken;
    /// the unique constraint is the final arbiter of slug identity.
    fn insert(&self, movie: &NewMovie, slug: &str) -> Result<Movie, StoreError>;

    fn fetch_by_id(&self, id: i64) -> Result<Option<Movie>, StoreError>;

    fn fetch_by_slug(&self, slug: &str) -> Result<Option<Movie>, StoreError>;

    /// Slug existence probe used during uniqueness resolution.
    fn exists_by_slug(&self, slug: &str) -> Result<bool, StoreError>;

    /// Count records matching the query's filter. Paging and ordering are
    /// ignored here.
    fn count_matching(&self, query: &MovieQuery) -> Result<u64, StoreError>;

    /// Fetch one page of records. Ordering is total: the requested sort
    /// column plus the id as tiebreak, so equal keys page deterministically.
    fn fetch_page(&self, query: &MovieQuery) -> Result<Vec<Movie>, StoreError>;

    /// Apply a partial update and return the updated record. Absent fields
    /// keep their stored values; the slug is never touched.
    fn update(&self, id: i64, update: &MovieUpdate) -> Result<Movie, StoreError>;

    /// Delete and return the removed record.
    fn delete(&self, id: i64) -> Result<Movie, StoreError>;

    /// Bump the view counter and return the new count.
    fn record_view(&self, id: i64) -> Result<i64, StoreError>;
}
