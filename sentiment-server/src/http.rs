//! Movie sentiment HTTP REST API
//!
//! Each endpoint has a thin axum handler that delegates to an inner function
//! returning `(StatusCode, serde_json::Value)`. The inner functions take plain
//! references to the scorer and store so they can be tested without a router.
//!
//! Endpoints:
//! - GET    /               endpoint index
//! - GET    /health         liveness plus store and lexicon status
//! - POST   /predict        score one review and persist it
//! - POST   /batch-predict  score several reviews, nothing persisted
//! - GET    /reviews        paginated history, newest first
//! - GET    /reviews/:id    one stored review
//! - DELETE /reviews/:id    remove a stored review
//! - GET    /stats          label distribution and latest review time

use std::sync::Arc;

use anyhow::Result;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use sentiment_core::{
    NewReview, PageRequest, Review, ReviewStore, Scorer, SentimentConfig, StoreError,
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;

use crate::error::ApiError;

/// Shared state for all HTTP handlers
pub struct HttpState {
    pub scorer: Scorer,
    pub store: Arc<dyn ReviewStore>,
    pub config: SentimentConfig,
}

/// Build the Axum router with all endpoints
pub fn build_router(state: Arc<HttpState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/predict", post(predict_handler))
        .route("/batch-predict", post(batch_predict_handler))
        .route("/reviews", get(list_reviews_handler))
        .route(
            "/reviews/:id",
            get(get_review_handler).delete(delete_review_handler),
        )
        .route("/stats", get(stats_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server on the configured address.
/// Gracefully shuts down when the broadcast shutdown signal fires.
pub async fn start_http_server(
    state: Arc<HttpState>,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<()> {
    let addr = format!("{}:{}", state.config.http.host, state.config.http.port);

    let app = build_router(state);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Sentiment API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
            tracing::info!("HTTP server shutting down...");
        })
        .await?;

    Ok(())
}

// ============================================================================
// Request DTOs
// ============================================================================

#[derive(Debug, Deserialize, Default)]
pub struct PredictRequest {
    pub text: Option<String>,
}

/// `texts` stays untyped so a non-array value gets the specific
/// "No texts array provided" message.
#[derive(Debug, Deserialize, Default)]
pub struct BatchPredictRequest {
    pub texts: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

fn review_json(review: &Review) -> serde_json::Value {
    serde_json::json!({
        "id": review.id,
        "text": review.text,
        "sentiment": review.sentiment,
        "confidence_score": review.confidence_score,
        "created_at": review.created_at.to_rfc3339(),
    })
}

// ============================================================================
// Inner (directly testable) business logic functions
// ============================================================================

pub fn index_inner() -> (StatusCode, serde_json::Value) {
    (
        StatusCode::OK,
        serde_json::json!({
            "message": "Movie Sentiment Analysis API",
            "version": env!("CARGO_PKG_VERSION"),
            "endpoints": {
                "health": "GET /health",
                "predict": "POST /predict",
                "batch_predict": "POST /batch-predict",
                "reviews": "GET /reviews?page=1&limit=10",
                "review": "GET /reviews/{id}",
                "delete_review": "DELETE /reviews/{id}",
                "stats": "GET /stats",
            },
            "status": "success",
        }),
    )
}

/// Always 200; the body reports whether the store answers a ping.
pub async fn health_inner(
    scorer: &Scorer,
    store: &dyn ReviewStore,
    config: &SentimentConfig,
) -> (StatusCode, serde_json::Value) {
    let database = match store.ping().await {
        Ok(()) => "connected",
        Err(e) => {
            tracing::debug!(error = %e, "Health check: database ping failed");
            "disconnected"
        }
    };

    (
        StatusCode::OK,
        serde_json::json!({
            "status": "healthy",
            "database": database,
            "lexicon": scorer.backend_name(),
            "environment": config.database.environment(),
            "timestamp": Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            "version": env!("CARGO_PKG_VERSION"),
        }),
    )
}

/// Score one review and try to persist it. A failed write still returns the
/// score, marked `database: "not_available"`.
pub async fn predict_inner(
    scorer: &Scorer,
    store: &dyn ReviewStore,
    req: PredictRequest,
) -> (StatusCode, serde_json::Value) {
    let text = match req.text {
        Some(t) => t.trim().to_string(),
        None => return ApiError::Validation("No text provided".into()).into_parts(),
    };
    if text.is_empty() {
        return ApiError::Validation("Text cannot be empty".into()).into_parts();
    }

    let score = match scorer.score(&text) {
        Ok(s) => s,
        Err(e) => return ApiError::from(e).into_parts(),
    };

    let new_review = NewReview {
        text,
        sentiment: score.sentiment,
        confidence_score: score.confidence,
    };

    match store.insert(&new_review).await {
        Ok(review) => {
            let mut body = review_json(&review);
            body["database"] = "stored".into();
            body["description"] = format!(
                "This review is {} with {:.2} confidence",
                review.sentiment, review.confidence_score
            )
            .into();
            body["status"] = "success".into();
            (StatusCode::OK, body)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Review scored but not persisted");
            (
                StatusCode::OK,
                serde_json::json!({
                    "text": new_review.text,
                    "sentiment": new_review.sentiment,
                    "confidence_score": new_review.confidence_score,
                    "database": "not_available",
                    "status": "success",
                }),
            )
        }
    }
}

/// Score each non-blank string entry. Nothing is persisted; a scoring failure
/// on one entry is reported in place and does not abort the batch.
pub fn batch_predict_inner(
    scorer: &Scorer,
    req: BatchPredictRequest,
) -> (StatusCode, serde_json::Value) {
    let entries = match req.texts {
        Some(serde_json::Value::Array(entries)) => entries,
        _ => return ApiError::Validation("No texts array provided".into()).into_parts(),
    };

    let texts: Vec<String> = entries
        .iter()
        .filter_map(|v| v.as_str())
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if texts.is_empty() {
        return ApiError::Validation("No valid texts provided".into()).into_parts();
    }

    let results: Vec<serde_json::Value> = texts
        .into_iter()
        .map(|text| match scorer.score(&text) {
            Ok(score) => serde_json::json!({
                "text": text,
                "sentiment": score.sentiment,
                "confidence_score": score.confidence,
            }),
            Err(e) => {
                tracing::warn!(error = %e, "Batch entry failed to score");
                serde_json::json!({
                    "text": text,
                    "error": e.to_string(),
                    "status": "failed",
                })
            }
        })
        .collect();

    (
        StatusCode::OK,
        serde_json::json!({
            "total_processed": results.len(),
            "results": results,
            "status": "success",
        }),
    )
}

pub async fn list_reviews_inner(
    store: &dyn ReviewStore,
    query: ListQuery,
    default_limit: u32,
) -> (StatusCode, serde_json::Value) {
    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(i64::from(default_limit));

    let request = match (u32::try_from(page), u32::try_from(limit)) {
        (Ok(page), Ok(limit)) => PageRequest::new(page, limit),
        _ => None,
    };
    let request = match request {
        Some(r) => r,
        None => {
            return ApiError::Validation("page and limit must be positive integers".into())
                .into_parts()
        }
    };

    match store.list_page(request).await {
        Ok(page) => (
            StatusCode::OK,
            serde_json::json!({
                "reviews": page.items.iter().map(review_json).collect::<Vec<_>>(),
                "pagination": {
                    "page": request.page(),
                    "limit": request.limit(),
                    "total": page.total,
                    "pages": page.pages(request.limit()),
                },
                "status": "success",
            }),
        ),
        Err(e) => ApiError::from(e).into_parts(),
    }
}

pub async fn get_review_inner(store: &dyn ReviewStore, id: i64) -> (StatusCode, serde_json::Value) {
    match store.get_by_id(id).await {
        Ok(review) => {
            let mut body = review_json(&review);
            body["status"] = "success".into();
            (StatusCode::OK, body)
        }
        Err(e) => ApiError::from(e).into_parts(),
    }
}

pub async fn delete_review_inner(
    store: &dyn ReviewStore,
    id: i64,
) -> (StatusCode, serde_json::Value) {
    match store.delete_by_id(id).await {
        Ok(()) => (
            StatusCode::OK,
            serde_json::json!({
                "message": format!("Review {} deleted successfully", id),
                "status": "success",
            }),
        ),
        Err(e) => ApiError::from(e).into_parts(),
    }
}

fn disconnected_stats(environment: &str) -> (StatusCode, serde_json::Value) {
    (
        StatusCode::OK,
        serde_json::json!({
            "statistics": {
                "total_reviews": 0,
                "sentiment_distribution": {},
                "latest_review_date": "No database connection",
                "environment": environment,
                "database_status": "disconnected",
            },
            "status": "success",
        }),
    )
}

/// Aggregate counts. An unreachable store yields zeroed statistics instead of
/// an error; other store failures are a 500.
pub async fn stats_inner(
    store: &dyn ReviewStore,
    config: &SentimentConfig,
) -> (StatusCode, serde_json::Value) {
    let environment = config.database.environment();

    let distribution = match store.count_by_sentiment().await {
        Ok(d) => d,
        Err(StoreError::Unavailable(reason)) => {
            tracing::warn!(reason = %reason, "Stats requested without a database");
            return disconnected_stats(environment);
        }
        Err(e) => return ApiError::from(e).into_parts(),
    };

    let latest = match store.latest_timestamp().await {
        Ok(l) => l,
        Err(StoreError::Unavailable(reason)) => {
            tracing::warn!(reason = %reason, "Stats requested without a database");
            return disconnected_stats(environment);
        }
        Err(e) => return ApiError::from(e).into_parts(),
    };

    let total: i64 = distribution.values().sum();
    let latest_review_date = latest
        .map(|ts| ts.to_rfc3339())
        .unwrap_or_else(|| "No reviews yet".to_string());

    (
        StatusCode::OK,
        serde_json::json!({
            "statistics": {
                "total_reviews": total,
                "sentiment_distribution": distribution,
                "latest_review_date": latest_review_date,
                "environment": environment,
                "database_status": "connected",
            },
            "status": "success",
        }),
    )
}

// ============================================================================
// Thin axum handlers (delegate to inner functions)
// ============================================================================

async fn index_handler() -> impl IntoResponse {
    let (status, body) = index_inner();
    (status, Json(body))
}

async fn health_handler(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    let (status, body) = health_inner(&state.scorer, state.store.as_ref(), &state.config).await;
    (status, Json(body))
}

async fn predict_handler(
    State(state): State<Arc<HttpState>>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> impl IntoResponse {
    let (status, body) = match payload {
        Ok(Json(req)) => predict_inner(&state.scorer, state.store.as_ref(), req).await,
        Err(rejection) => ApiError::from(rejection).into_parts(),
    };
    (status, Json(body))
}

async fn batch_predict_handler(
    State(state): State<Arc<HttpState>>,
    payload: Result<Json<BatchPredictRequest>, JsonRejection>,
) -> impl IntoResponse {
    let (status, body) = match payload {
        Ok(Json(req)) => batch_predict_inner(&state.scorer, req),
        Err(rejection) => ApiError::from(rejection).into_parts(),
    };
    (status, Json(body))
}

async fn list_reviews_handler(
    State(state): State<Arc<HttpState>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> impl IntoResponse {
    let default_limit = state.config.pagination.default_limit;
    let (status, body) = match query {
        Ok(Query(query)) => list_reviews_inner(state.store.as_ref(), query, default_limit).await,
        Err(rejection) => ApiError::from(rejection).into_parts(),
    };
    (status, Json(body))
}

async fn get_review_handler(
    State(state): State<Arc<HttpState>>,
    id: Result<Path<i64>, PathRejection>,
) -> impl IntoResponse {
    let (status, body) = match id {
        Ok(Path(id)) => get_review_inner(state.store.as_ref(), id).await,
        Err(rejection) => ApiError::from(rejection).into_parts(),
    };
    (status, Json(body))
}

async fn delete_review_handler(
    State(state): State<Arc<HttpState>>,
    id: Result<Path<i64>, PathRejection>,
) -> impl IntoResponse {
    let (status, body) = match id {
        Ok(Path(id)) => delete_review_inner(state.store.as_ref(), id).await,
        Err(rejection) => ApiError::from(rejection).into_parts(),
    };
    (status, Json(body))
}

async fn stats_handler(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    let (status, body) = stats_inner(state.store.as_ref(), &state.config).await;
    (status, Json(body))
}

// ============================================================================
// Unit tests (call inner functions directly)
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use sentiment_core::store::SqliteReviewStore;
    use sentiment_core::{DatabaseBackend, OfflineStore, Sentiment};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_store() -> SqliteReviewStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let store = SqliteReviewStore::new(pool);
        store.init_schema().await.unwrap();
        store
    }

    fn offline() -> OfflineStore {
        OfflineStore::new("test: no database")
    }

    fn predict(text: &str) -> PredictRequest {
        PredictRequest {
            text: Some(text.to_string()),
        }
    }

    // ========================================================================
    // 1. index_inner
    // ========================================================================

    #[test]
    fn test_index_lists_endpoints() {
        let (status, body) = index_inner();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["endpoints"]["predict"], "POST /predict");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    // ========================================================================
    // 2. health_inner
    // ========================================================================

    #[tokio::test]
    async fn test_health_connected() {
        let store = memory_store().await;
        let (status, body) =
            health_inner(&Scorer::word_list(), &store, &SentimentConfig::default()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["database"], "connected");
        assert_eq!(body["lexicon"], "fallback");
        assert_eq!(body["environment"], "local");
        // "%Y-%m-%d %H:%M:%S"
        assert_eq!(body["timestamp"].as_str().unwrap().len(), 19);
    }

    #[tokio::test]
    async fn test_health_disconnected_is_still_200() {
        let mut config = SentimentConfig::default();
        config.database.backend = DatabaseBackend::Postgres;
        let (status, body) = health_inner(&Scorer::word_list(), &offline(), &config).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["database"], "disconnected");
        assert_eq!(body["environment"], "docker");
    }

    // ========================================================================
    // 3. predict_inner
    // ========================================================================

    #[tokio::test]
    async fn test_predict_stores_review() {
        let store = memory_store().await;
        let (status, body) = predict_inner(
            &Scorer::word_list(),
            &store,
            predict("This movie is absolutely fantastic!"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sentiment"], "positive");
        assert_eq!(body["confidence_score"], 0.3);
        assert_eq!(body["database"], "stored");
        assert_eq!(
            body["description"],
            "This review is positive with 0.30 confidence"
        );

        let id = body["id"].as_i64().unwrap();
        let stored = store.get_by_id(id).await.unwrap();
        assert_eq!(stored.sentiment, Sentiment::Positive);
        assert_eq!(stored.text, "This movie is absolutely fantastic!");
    }

    #[tokio::test]
    async fn test_predict_trims_text() {
        let store = memory_store().await;
        let (_, body) = predict_inner(&Scorer::word_list(), &store, predict("  Bad movie  ")).await;
        assert_eq!(body["text"], "Bad movie");
        assert_eq!(body["sentiment"], "negative");
        assert_eq!(body["confidence_score"], 0.5);
    }

    #[tokio::test]
    async fn test_predict_missing_text_is_400() {
        let store = memory_store().await;
        let (status, body) =
            predict_inner(&Scorer::word_list(), &store, PredictRequest::default()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No text provided");
        assert_eq!(body["status"], "error");
    }

    #[tokio::test]
    async fn test_predict_blank_text_is_400() {
        let store = memory_store().await;
        let (status, body) = predict_inner(&Scorer::word_list(), &store, predict("   ")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Text cannot be empty");
    }

    #[tokio::test]
    async fn test_predict_without_database_still_scores() {
        let (status, body) =
            predict_inner(&Scorer::word_list(), &offline(), predict("Good movie")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sentiment"], "positive");
        assert_eq!(body["confidence_score"], 0.5);
        assert_eq!(body["database"], "not_available");
        assert!(body.get("id").is_none());
    }

    // ========================================================================
    // 4. batch_predict_inner
    // ========================================================================

    #[test]
    fn test_batch_scores_each_entry() {
        let req = BatchPredictRequest {
            texts: Some(serde_json::json!(["Good movie", "  ", "Bad movie"])),
        };
        let (status, body) = batch_predict_inner(&Scorer::word_list(), req);
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_processed"], 2);
        assert_eq!(body["results"][0]["sentiment"], "positive");
        assert_eq!(body["results"][1]["sentiment"], "negative");
        assert_eq!(body["results"][1]["text"], "Bad movie");
    }

    #[test]
    fn test_batch_empty_array_is_400() {
        let req = BatchPredictRequest {
            texts: Some(serde_json::json!([])),
        };
        let (status, body) = batch_predict_inner(&Scorer::word_list(), req);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No valid texts provided");
        assert_eq!(body["status"], "error");
    }

    #[test]
    fn test_batch_non_array_is_400() {
        let req = BatchPredictRequest {
            texts: Some(serde_json::json!("Good movie")),
        };
        let (status, body) = batch_predict_inner(&Scorer::word_list(), req);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No texts array provided");

        let (status, _) = batch_predict_inner(&Scorer::word_list(), BatchPredictRequest::default());
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    // ========================================================================
    // 5. list / get / delete
    // ========================================================================

    async fn seed(store: &SqliteReviewStore, n: usize) -> Vec<i64> {
        let mut ids = Vec::new();
        for i in 0..n {
            let review = store
                .insert(&NewReview {
                    text: format!("review {}", i),
                    sentiment: Sentiment::Neutral,
                    confidence_score: 1.0,
                })
                .await
                .unwrap();
            ids.push(review.id);
        }
        ids
    }

    #[tokio::test]
    async fn test_list_paginates_newest_first() {
        let store = memory_store().await;
        let ids = seed(&store, 3).await;

        let query = ListQuery {
            page: Some(1),
            limit: Some(2),
        };
        let (status, body) = list_reviews_inner(&store, query, 10).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reviews"].as_array().unwrap().len(), 2);
        assert_eq!(body["reviews"][0]["id"], ids[2]);
        assert_eq!(body["pagination"]["total"], 3);
        assert_eq!(body["pagination"]["pages"], 2);

        let query = ListQuery {
            page: Some(2),
            limit: Some(2),
        };
        let (_, body) = list_reviews_inner(&store, query, 10).await;
        assert_eq!(body["reviews"].as_array().unwrap().len(), 1);
        assert_eq!(body["reviews"][0]["id"], ids[0]);
    }

    #[tokio::test]
    async fn test_list_uses_default_limit() {
        let store = memory_store().await;
        seed(&store, 4).await;
        let (_, body) = list_reviews_inner(&store, ListQuery::default(), 3).await;
        assert_eq!(body["pagination"]["page"], 1);
        assert_eq!(body["pagination"]["limit"], 3);
        assert_eq!(body["reviews"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_list_rejects_non_positive_page() {
        let store = memory_store().await;
        for (page, limit) in [(0, 10), (1, 0), (-1, 10)] {
            let query = ListQuery {
                page: Some(page),
                limit: Some(limit),
            };
            let (status, _) = list_reviews_inner(&store, query, 10).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "page={} limit={}", page, limit);
        }
    }

    #[tokio::test]
    async fn test_list_offline_is_503() {
        let (status, body) = list_reviews_inner(&offline(), ListQuery::default(), 10).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "Database not available");
    }

    #[tokio::test]
    async fn test_get_and_delete_review() {
        let store = memory_store().await;
        let ids = seed(&store, 1).await;

        let (status, body) = get_review_inner(&store, ids[0]).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], "review 0");
        assert_eq!(body["status"], "success");

        let (status, body) = delete_review_inner(&store, ids[0]).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["message"],
            format!("Review {} deleted successfully", ids[0])
        );

        let (status, body) = get_review_inner(&store, ids[0]).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Review not found");

        let (status, _) = delete_review_inner(&store, ids[0]).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    // ========================================================================
    // 6. stats_inner
    // ========================================================================

    #[tokio::test]
    async fn test_stats_empty_store() {
        let store = memory_store().await;
        let (status, body) = stats_inner(&store, &SentimentConfig::default()).await;
        assert_eq!(status, StatusCode::OK);
        let stats = &body["statistics"];
        assert_eq!(stats["total_reviews"], 0);
        assert_eq!(stats["latest_review_date"], "No reviews yet");
        assert_eq!(stats["database_status"], "connected");
        assert_eq!(stats["environment"], "local");
    }

    #[tokio::test]
    async fn test_stats_counts_labels() {
        let store = memory_store().await;
        let scorer = Scorer::word_list();
        for text in ["Good movie", "Great film", "Bad movie"] {
            predict_inner(&scorer, &store, predict(text)).await;
        }

        let (_, body) = stats_inner(&store, &SentimentConfig::default()).await;
        let stats = &body["statistics"];
        assert_eq!(stats["total_reviews"], 3);
        assert_eq!(stats["sentiment_distribution"]["positive"], 2);
        assert_eq!(stats["sentiment_distribution"]["negative"], 1);
        assert!(stats["sentiment_distribution"].get("neutral").is_none());
        assert_ne!(stats["latest_review_date"], "No reviews yet");
    }

    #[tokio::test]
    async fn test_stats_offline_is_zeroed() {
        let (status, body) = stats_inner(&offline(), &SentimentConfig::default()).await;
        assert_eq!(status, StatusCode::OK);
        let stats = &body["statistics"];
        assert_eq!(stats["total_reviews"], 0);
        assert_eq!(stats["latest_review_date"], "No database connection");
        assert_eq!(stats["database_status"], "disconnected");
    }
}
