use thiserror::Error;

#[derive(Error, Debug)]
pub enum SvodkaError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    // Network errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    // Parsing errors
    #[error("Feed parsing failed: {0}")]
    FeedParse(String),

    #[error("Page parsing failed: {0}")]
    PageParse(String),

    // Upstream API error envelopes
    #[error("VK API error [{code}]: {message}")]
    VkApi { code: i64, message: String },

    #[error("Telegram API error: {0}")]
    Telegram(String),

    // Storage errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // User input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type SvodkaResult<T> = Result<T, SvodkaError>;
