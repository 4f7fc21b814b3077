use thiserror::Error;

/// Failures crossing the listings-search seam.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Listings request timed out")]
    Timeout,

    #[error("Listings API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Listings transport error: {0}")]
    Network(String),

    #[error("Listings response parse error: {0}")]
    Parse(String),
}

/// Failures that reach the command-handler boundary. Argument validation
/// short-circuits with a reply before the pipeline runs, so it never
/// appears here; translation degrades silently inside the translator.
#[derive(Debug, Error)]
pub enum CarbotError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
