pub mod review;

pub use review::{NewReview, PageRequest, Review, ReviewPage, Sentiment, SentimentDistribution};
