use thiserror::Error;

#[derive(Error, Debug)]
pub enum SentimentError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Lexicon archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Lexicon error at line {line}: {message}")]
    Lexicon { line: usize, message: String },

    #[error("Other error: {0}")]
    Other(String),
}
