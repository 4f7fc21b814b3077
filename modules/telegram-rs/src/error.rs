use thiserror::Error;

pub type Result<T> = std::result::Result<T, TelegramError>;

#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Bot API error: {0}")]
    Api(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<reqwest::Error> for TelegramError {
    fn from(err: reqwest::Error) -> Self {
        TelegramError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for TelegramError {
    fn from(err: serde_json::Error) -> Self {
        TelegramError::Parse(err.to_string())
    }
}

impl From<std::io::Error> for TelegramError {
    fn from(err: std::io::Error) -> Self {
        TelegramError::Io(err.to_string())
    }
}
