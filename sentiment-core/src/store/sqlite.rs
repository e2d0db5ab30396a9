use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::{distribution_from_rows, ReviewRow, ReviewStore, StoreBackend, StoreError};
use crate::models::{NewReview, PageRequest, Review, ReviewPage, SentimentDistribution};

const REVIEW_COLUMNS: &str = "id, text, sentiment, confidence_score, created_at";

/// SQLite-backed store for local development.
#[derive(Debug, Clone)]
pub struct SqliteReviewStore {
    pool: SqlitePool,
}

impl SqliteReviewStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the `reviews` table and its `created_at` index if missing.
    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS reviews (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                text TEXT NOT NULL,
                sentiment TEXT NOT NULL,
                confidence_score REAL,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_reviews_created_at ON reviews (created_at)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl ReviewStore for SqliteReviewStore {
    async fn insert(&self, review: &NewReview) -> Result<Review, StoreError> {
        let row: ReviewRow = sqlx::query_as(&format!(
            "INSERT INTO reviews (text, sentiment, confidence_score) VALUES (?, ?, ?) RETURNING {}",
            REVIEW_COLUMNS
        ))
        .bind(&review.text)
        .bind(review.sentiment.as_str())
        .bind(review.confidence_score)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(review_id = row.id, sentiment = %review.sentiment, "Stored review");
        row.try_into()
    }

    async fn get_by_id(&self, id: i64) -> Result<Review, StoreError> {
        let row: Option<ReviewRow> = sqlx::query_as(&format!(
            "SELECT {} FROM reviews WHERE id = ?",
            REVIEW_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(StoreError::NotFound(id))?.try_into()
    }

    async fn list_page(&self, page: PageRequest) -> Result<ReviewPage, StoreError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews")
            .fetch_one(&self.pool)
            .await?;

        let rows: Vec<ReviewRow> = sqlx::query_as(&format!(
            "SELECT {} FROM reviews ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
            REVIEW_COLUMNS
        ))
        .bind(page.limit() as i64)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let items = rows
            .into_iter()
            .map(Review::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ReviewPage { items, total })
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        tracing::info!(review_id = id, "Deleted review");
        Ok(())
    }

    async fn count_by_sentiment(&self) -> Result<SentimentDistribution, StoreError> {
        let rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT sentiment, COUNT(*) FROM reviews GROUP BY sentiment")
                .fetch_all(&self.pool)
                .await?;
        distribution_from_rows(rows)
    }

    async fn latest_timestamp(&self) -> Result<Option<DateTime<Utc>>, StoreError> {
        let latest: Option<DateTime<Utc>> = sqlx::query_scalar(
            "SELECT created_at FROM reviews ORDER BY created_at DESC, id DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(latest)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> StoreBackend {
        StoreBackend::Sqlite
    }
}
