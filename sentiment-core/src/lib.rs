pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod scorer;
pub mod store;

pub use config::{DatabaseBackend, SentimentConfig};
pub use db::{connect_store, ConnectionResult, ConnectionStrategy};
pub use error::SentimentError;
pub use models::{NewReview, PageRequest, Review, ReviewPage, Sentiment, SentimentDistribution};
pub use scorer::{Score, Scorer, ScorerBackend, ScoringError};
pub use store::{OfflineStore, ReviewStore, StoreBackend, StoreError};
