use std::sync::Arc;

use clap::Parser;
use sentiment_core::{connect_store, ConnectionResult, Scorer, ScorerBackend, SentimentConfig};
use tokio::sync::broadcast;
use tracing_subscriber::{fmt, EnvFilter};

use sentiment_server::http::{self, HttpState};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "sentiment.toml")]
    config: String,

    /// Check database connectivity and lexicon discovery, then exit
    #[arg(long)]
    health: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let config = match SentimentConfig::load(&args.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config from {}: {}", args.config, e);
            std::process::exit(1);
        }
    };

    // RUST_LOG wins over the configured level
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.service.log_level)),
        )
        .init();

    let scorer = Scorer::from_config(&config.lexicon);
    let connection = connect_store(&config.database).await;

    if args.health {
        let mut healthy = true;

        match &connection {
            ConnectionResult::Connected { strategy, store } => match store.ping().await {
                Ok(()) => println!("✅ Database connected via {} ({})", strategy, store.backend()),
                Err(e) => {
                    println!("❌ Database ping failed: {}", e);
                    healthy = false;
                }
            },
            ConnectionResult::Unavailable { attempts } => {
                for attempt in attempts {
                    println!("❌ {} failed: {}", attempt.strategy, attempt.error);
                }
                healthy = false;
            }
        }

        match scorer.backend() {
            ScorerBackend::Lexicon(lexicon) => {
                println!("✅ VADER lexicon loaded: {} entries", lexicon.len())
            }
            ScorerBackend::WordList(_) => {
                println!("⚠️  VADER lexicon not found, using fallback word lists")
            }
        }

        if !healthy {
            std::process::exit(1);
        }
        println!("✅ Sentiment service health check passed");
        return Ok(());
    }

    let (tx, _rx) = broadcast::channel(1);
    let shutdown_tx = tx.clone();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        tracing::info!("Shutdown signal received");
        let _ = shutdown_tx.send(());
    });

    let state = Arc::new(HttpState {
        scorer,
        store: connection.into_store(),
        config,
    });

    http::start_http_server(state, tx.subscribe()).await?;

    Ok(())
}
