use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{distribution_from_rows, ReviewRow, ReviewStore, StoreBackend, StoreError};
use crate::models::{NewReview, PageRequest, Review, ReviewPage, SentimentDistribution};

const REVIEW_COLUMNS: &str = "id, text, sentiment, confidence_score, created_at";

/// PostgreSQL-backed store for the container deployment.
#[derive(Debug, Clone)]
pub struct PgReviewStore {
    pool: PgPool,
}

impl PgReviewStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS reviews (
                id BIGSERIAL PRIMARY KEY,
                text TEXT NOT NULL,
                sentiment TEXT NOT NULL,
                confidence_score DOUBLE PRECISION,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
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
impl ReviewStore for PgReviewStore {
    async fn insert(&self, review: &NewReview) -> Result<Review, StoreError> {
        let row: ReviewRow = sqlx::query_as(&format!(
            "INSERT INTO reviews (text, sentiment, confidence_score) VALUES ($1, $2, $3) RETURNING {}",
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
            "SELECT {} FROM reviews WHERE id = $1",
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
            "SELECT {} FROM reviews ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2",
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
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
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
        let latest: Option<DateTime<Utc>> =
            sqlx::query_scalar("SELECT MAX(created_at) FROM reviews")
                .fetch_one(&self.pool)
                .await?;
        Ok(latest)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> StoreBackend {
        StoreBackend::Postgres
    }
}
