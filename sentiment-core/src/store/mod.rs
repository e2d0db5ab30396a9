//! Review persistence.
//!
//! [`ReviewStore`] is implemented by the SQLite and PostgreSQL backends and by
//! [`OfflineStore`], which stands in when no database connection could be made.

pub mod postgres;
pub mod sqlite;

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{NewReview, PageRequest, Review, ReviewPage, SentimentDistribution};

pub use postgres::PgReviewStore;
pub use sqlite::SqliteReviewStore;

// ============================================================================
// Errors
// ============================================================================

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Review {0} not found")]
    NotFound(i64),

    #[error("Database not available: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Query(sqlx::Error),

    #[error("Corrupt review row: {0}")]
    CorruptRow(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => StoreError::Unavailable(e.to_string()),
            other => StoreError::Query(other),
        }
    }
}

// ============================================================================
// Store trait
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Sqlite,
    Postgres,
    Offline,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StoreBackend::Sqlite => "sqlite",
            StoreBackend::Postgres => "postgres",
            StoreBackend::Offline => "offline",
        })
    }
}

/// CRUD over persisted reviews. Every operation is a single statement (or a
/// read-only pair) committed by the database itself.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Persist a scored review; the store assigns `id` and `created_at`.
    async fn insert(&self, review: &NewReview) -> Result<Review, StoreError>;

    async fn get_by_id(&self, id: i64) -> Result<Review, StoreError>;

    /// Newest first (`created_at`, then `id`, descending) with the full row count.
    async fn list_page(&self, page: PageRequest) -> Result<ReviewPage, StoreError>;

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError>;

    async fn count_by_sentiment(&self) -> Result<SentimentDistribution, StoreError>;

    /// `None` when the store is empty.
    async fn latest_timestamp(&self) -> Result<Option<DateTime<Utc>>, StoreError>;

    /// Cheap liveness check.
    async fn ping(&self) -> Result<(), StoreError>;

    fn backend(&self) -> StoreBackend;
}

// ============================================================================
// Row mapping shared by the SQL backends
// ============================================================================

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ReviewRow {
    pub id: i64,
    pub text: String,
    pub sentiment: String,
    pub confidence_score: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ReviewRow> for Review {
    type Error = StoreError;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        let sentiment = row
            .sentiment
            .parse()
            .map_err(|e| StoreError::CorruptRow(format!("review {}: {}", row.id, e)))?;
        let confidence_score = row.confidence_score.ok_or_else(|| {
            StoreError::CorruptRow(format!("review {}: missing confidence score", row.id))
        })?;

        Ok(Review {
            id: row.id,
            text: row.text,
            sentiment,
            confidence_score,
            created_at: row.created_at,
        })
    }
}

pub(crate) fn distribution_from_rows(
    rows: Vec<(String, i64)>,
) -> Result<SentimentDistribution, StoreError> {
    rows.into_iter()
        .map(|(label, count)| {
            label
                .parse()
                .map(|sentiment| (sentiment, count))
                .map_err(StoreError::CorruptRow)
        })
        .collect()
}

// ============================================================================
// OfflineStore
// ============================================================================

/// Used when every connection strategy failed. All operations report
/// `Unavailable`, so writes degrade to "scored but not persisted".
#[derive(Debug, Clone)]
pub struct OfflineStore {
    reason: String,
}

impl OfflineStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn unavailable<T>(&self) -> Result<T, StoreError> {
        Err(StoreError::Unavailable(self.reason.clone()))
    }
}

#[async_trait]
impl ReviewStore for OfflineStore {
    async fn insert(&self, _review: &NewReview) -> Result<Review, StoreError> {
        self.unavailable()
    }

    async fn get_by_id(&self, _id: i64) -> Result<Review, StoreError> {
        self.unavailable()
    }

    async fn list_page(&self, _page: PageRequest) -> Result<ReviewPage, StoreError> {
        self.unavailable()
    }

    async fn delete_by_id(&self, _id: i64) -> Result<(), StoreError> {
        self.unavailable()
    }

    async fn count_by_sentiment(&self) -> Result<SentimentDistribution, StoreError> {
        self.unavailable()
    }

    async fn latest_timestamp(&self) -> Result<Option<DateTime<Utc>>, StoreError> {
        self.unavailable()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.unavailable()
    }

    fn backend(&self) -> StoreBackend {
        StoreBackend::Offline
    }
}
