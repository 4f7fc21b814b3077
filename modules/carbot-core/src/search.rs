use async_trait::async_trait;
use autodev_client::{AutoDevClient, AutoDevError, ListingRecord, ListingsRequest};

use crate::deps::ListingSearch;
use crate::error::SearchError;
use crate::types::{Listing, ListingQuery};

/// auto.dev-backed implementation of the listings-search seam.
pub struct AutoDevSearch {
    client: AutoDevClient,
}

impl AutoDevSearch {
    pub fn new(client: AutoDevClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ListingSearch for AutoDevSearch {
    async fn search(&self, query: &ListingQuery) -> Result<Vec<Listing>, SearchError> {
        let request = ListingsRequest {
            price_min: query.price.lower(),
            price_max: query.price.upper(),
            page: query.page,
            exclude_no_price: query.exclude_no_price,
            filters: query.filters.wire_params(),
        };

        let records = self.client.search_listings(&request).await?;
        Ok(records.into_iter().map(to_listing).collect())
    }
}

fn to_listing(record: ListingRecord) -> Listing {
    Listing {
        year: record.year,
        make: record.make,
        model: record.model,
        price: record.price,
        photo_url: record.primary_photo_url,
    }
}

impl From<AutoDevError> for SearchError {
    fn from(err: AutoDevError) -> Self {
        match err {
            AutoDevError::Timeout => SearchError::Timeout,
            AutoDevError::Api { status, message } => SearchError::Api { status, message },
            AutoDevError::Network(message) => SearchError::Network(message),
            AutoDevError::Parse(message) => SearchError::Parse(message),
        }
    }
}
