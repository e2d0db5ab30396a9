//! sentiment-cli: command-line client for the movie sentiment HTTP API
//!
//! # Subcommands
//! - `predict <text> [--json]`                       score and store one review
//! - `batch <text>... [--json]`                      score several reviews
//! - `reviews [--page N] [--limit N] [--json]`       list stored reviews
//! - `review <id> [--json]`                          show one review
//! - `delete <id> [--json]`                          delete one review
//! - `stats [--json]`                                label distribution
//! - `status [--json]`                               server health

use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use reqwest::blocking::{Client, RequestBuilder};
use serde::Deserialize;

const DEFAULT_SERVER: &str = "http://127.0.0.1:5000";
const PREVIEW_CHARS: usize = 60;

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Debug, Parser)]
#[command(
    name = "sentiment-cli",
    version,
    about = "Movie review sentiment analysis client"
)]
struct Cli {
    /// Sentiment HTTP server URL (overrides SENTIMENT_HTTP_URL env var)
    #[arg(long, env = "SENTIMENT_HTTP_URL", default_value = DEFAULT_SERVER)]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Score a review and store it
    Predict {
        text: String,

        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },

    /// Score several reviews without storing them
    Batch {
        #[arg(required = true)]
        texts: Vec<String>,

        #[arg(long)]
        json: bool,
    },

    /// List stored reviews, newest first
    Reviews {
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Page size (server default when omitted)
        #[arg(short = 'n', long)]
        limit: Option<u32>,

        #[arg(long)]
        json: bool,
    },

    /// Show one stored review
    Review {
        id: i64,

        #[arg(long)]
        json: bool,
    },

    /// Delete one stored review
    Delete {
        id: i64,

        #[arg(long)]
        json: bool,
    },

    /// Show sentiment statistics
    Stats {
        #[arg(long)]
        json: bool,
    },

    /// Show server health
    Status {
        #[arg(long)]
        json: bool,
    },
}

// ============================================================================
// API Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ReviewDto {
    pub id: i64,
    pub text: String,
    pub sentiment: String,
    pub confidence_score: f64,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub struct PredictResponse {
    pub id: Option<i64>,
    pub text: String,
    pub sentiment: String,
    pub confidence_score: f64,
    pub database: String,
}

/// One batch entry: either a score or a per-item failure.
#[derive(Debug, Deserialize)]
pub struct BatchItem {
    pub text: String,
    pub sentiment: Option<String>,
    pub confidence_score: Option<f64>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BatchResponse {
    pub results: Vec<BatchItem>,
    pub total_processed: usize,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub pages: i64,
}

#[derive(Debug, Deserialize)]
pub struct ReviewListResponse {
    pub reviews: Vec<ReviewDto>,
    pub pagination: Pagination,
}

#[derive(Debug, Deserialize)]
pub struct Statistics {
    pub total_reviews: i64,
    pub sentiment_distribution: serde_json::Map<String, serde_json::Value>,
    pub latest_review_date: String,
    pub environment: String,
    pub database_status: String,
}

#[derive(Debug, Deserialize)]
pub struct StatsResponse {
    pub statistics: Statistics,
}

#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub lexicon: String,
    pub environment: String,
    pub timestamp: String,
}

// ============================================================================
// Rendering
// ============================================================================

fn preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(PREVIEW_CHARS - 3).collect();
    format!("{}...", cut)
}

fn percent(confidence: f64) -> String {
    format!("{:.1}%", confidence * 100.0)
}

pub fn render_prediction(p: &PredictResponse) -> String {
    let stored = match (p.database.as_str(), p.id) {
        ("stored", Some(id)) => format!("stored as #{}", id),
        _ => "not stored (database unavailable)".to_string(),
    };
    format!(
        "Sentiment:  {}\nConfidence: {}\nReview:     {}\nDatabase:   {}",
        p.sentiment,
        percent(p.confidence_score),
        preview(&p.text),
        stored
    )
}

pub fn render_batch(b: &BatchResponse) -> String {
    let mut out = Vec::with_capacity(b.results.len() + 1);
    for item in &b.results {
        let line = match (&item.sentiment, item.confidence_score, &item.error) {
            (Some(sentiment), Some(confidence), _) => {
                format!("{:<8} {:>6}  {}", sentiment, percent(confidence), preview(&item.text))
            }
            (_, _, Some(error)) => {
                format!("{:<8} {:>6}  {} ({})", "failed", "-", preview(&item.text), error)
            }
            _ => format!("{:<8} {:>6}  {}", "unknown", "-", preview(&item.text)),
        };
        out.push(line);
    }
    out.push(format!("{} review(s) processed", b.total_processed));
    out.join("\n")
}

pub fn render_review(r: &ReviewDto) -> String {
    format!(
        "Review #{}\nSentiment:  {}\nConfidence: {}\nCreated:    {}\n\n{}",
        r.id,
        r.sentiment,
        percent(r.confidence_score),
        r.created_at,
        r.text
    )
}

pub fn render_review_list(list: &ReviewListResponse) -> String {
    if list.reviews.is_empty() {
        return "No reviews yet".to_string();
    }
    let mut out: Vec<String> = list
        .reviews
        .iter()
        .map(|r| {
            format!(
                "#{:<6} {:<8} {:>6}  {}",
                r.id,
                r.sentiment,
                percent(r.confidence_score),
                preview(&r.text)
            )
        })
        .collect();
    let p = &list.pagination;
    out.push(format!(
        "Page {}/{} ({} per page, {} total)",
        p.page,
        p.pages.max(1),
        p.limit,
        p.total
    ));
    out.join("\n")
}

pub fn render_stats(s: &Statistics) -> String {
    let mut out = vec![format!("Total reviews: {}", s.total_reviews)];
    for label in ["positive", "negative", "neutral"] {
        let count = s
            .sentiment_distribution
            .get(label)
            .and_then(|v| v.as_i64())
            .unwrap_or(0);
        out.push(format!("  {:<9} {}", format!("{}:", label), count));
    }
    out.push(format!("Latest review: {}", s.latest_review_date));
    out.push(format!("Environment:   {}", s.environment));
    out.push(format!("Database:      {}", s.database_status));
    out.join("\n")
}

pub fn render_status(h: &HealthResponse) -> String {
    format!(
        "Sentiment server: {}\nDatabase:         {}\nLexicon:          {}\nEnvironment:      {}\nTimestamp:        {}",
        h.status, h.database, h.lexicon, h.environment, h.timestamp
    )
}

// ============================================================================
// HTTP Client Calls
// ============================================================================

/// Send a request and return the JSON body. Non-2xx responses become errors
/// carrying the server's `error` message.
fn call(request: RequestBuilder, url: &str) -> anyhow::Result<serde_json::Value> {
    let resp = request
        .send()
        .with_context(|| format!("connection failed to {}", url))?;

    let status = resp.status();
    let body: serde_json::Value = resp.json().unwrap_or_default();

    if !status.is_success() {
        let message = body["error"].as_str().unwrap_or("no error message");
        bail!("server returned {}: {}", status, message);
    }
    Ok(body)
}

fn output<T, F>(body: serde_json::Value, json: bool, render: F) -> anyhow::Result<()>
where
    T: serde::de::DeserializeOwned,
    F: FnOnce(&T) -> String,
{
    if json {
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }
    let parsed: T = serde_json::from_value(body).context("failed to parse server response")?;
    println!("{}", render(&parsed));
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let server = cli.server.trim_end_matches('/').to_string();
    let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

    match cli.command {
        Commands::Predict { text, json } => {
            let url = format!("{}/predict", server);
            let body = call(client.post(&url).json(&serde_json::json!({ "text": text })), &url)?;
            output(body, json, render_prediction)
        }
        Commands::Batch { texts, json } => {
            let url = format!("{}/batch-predict", server);
            let body = call(client.post(&url).json(&serde_json::json!({ "texts": texts })), &url)?;
            output(body, json, render_batch)
        }
        Commands::Reviews { page, limit, json } => {
            let url = format!("{}/reviews", server);
            let mut query = vec![("page", page)];
            if let Some(limit) = limit {
                query.push(("limit", limit));
            }
            let body = call(client.get(&url).query(&query), &url)?;
            output(body, json, render_review_list)
        }
        Commands::Review { id, json } => {
            let url = format!("{}/reviews/{}", server, id);
            let body = call(client.get(&url), &url)?;
            output(body, json, render_review)
        }
        Commands::Delete { id, json } => {
            let url = format!("{}/reviews/{}", server, id);
            let body = call(client.delete(&url), &url)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                println!("{}", body["message"].as_str().unwrap_or("Review deleted"));
            }
            Ok(())
        }
        Commands::Stats { json } => {
            let url = format!("{}/stats", server);
            let body = call(client.get(&url), &url)?;
            output(body, json, |s: &StatsResponse| render_stats(&s.statistics))
        }
        Commands::Status { json } => {
            let url = format!("{}/health", server);
            let body = call(client.get(&url), &url)?;
            output(body, json, render_status)
        }
    }
}

// ============================================================================
// Main
// ============================================================================

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("sentiment-cli: {:#}", e);
        std::process::exit(1);
    }
}

// ============================================================================
// Tests
// ============================================================================
