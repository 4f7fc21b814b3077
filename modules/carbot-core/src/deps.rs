use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Config;
use crate::error::SearchError;
use crate::types::{Listing, ListingQuery, SearchFilters};

/// Free text → structured filters. Implementations degrade to empty
/// filters on failure instead of erroring; translation is best-effort and
/// the pipeline continues on price alone.
#[async_trait]
pub trait FilterTranslator: Send + Sync {
    async fn translate(&self, free_text: &str) -> SearchFilters;
}

/// One listings search per call; no retries.
#[async_trait]
pub trait ListingSearch: Send + Sync {
    async fn search(&self, query: &ListingQuery) -> Result<Vec<Listing>, SearchError>;
}

/// Central dependency container, built once at startup and shared by every
/// command invocation. Read-only after construction.
#[derive(Clone)]
pub struct BotDeps {
    pub translator: Arc<dyn FilterTranslator>,
    pub listings: Arc<dyn ListingSearch>,
    pub config: Config,
}
