pub mod error;
pub mod types;

pub use error::{AutoDevError, Result};
pub use types::{ListingRecord, ListingsRequest, ListingsResponse};

use std::time::Duration;

const BASE_URL: &str = "https://auto.dev/api";

/// Per-request ceiling; a slow upstream must not stall a command invocation.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct AutoDevClient {
    http: reqwest::Client,
    api_key: String,
}

impl AutoDevClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
        }
    }

    /// Run one listings search. A single GET, no retries.
    pub async fn search_listings(&self, request: &ListingsRequest) -> Result<Vec<ListingRecord>> {
        let url = format!("{}/listings", BASE_URL);

        tracing::debug!(
            price_min = request.price_min,
            price_max = request.price_max,
            filter_count = request.filters.len(),
            "auto.dev listings request"
        );

        let resp = self
            .http
            .get(&url)
            .query(&request.query_params(&self.api_key))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AutoDevError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.text().await?;
        let listings: ListingsResponse = serde_json::from_str(&body)?;

        tracing::debug!(count = listings.records.len(), "auto.dev listings response");
        Ok(listings.records)
    }
}
