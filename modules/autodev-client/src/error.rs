use thiserror::Error;

pub type Result<T> = std::result::Result<T, AutoDevError>;

#[derive(Debug, Error)]
pub enum AutoDevError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Listings request timed out")]
    Timeout,

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for AutoDevError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AutoDevError::Timeout
        } else {
            AutoDevError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AutoDevError {
    fn from(err: serde_json::Error) -> Self {
        AutoDevError::Parse(err.to_string())
    }
}
