use serde::Deserialize;

/// Input for a `/listings` search. `filters` carries already-encoded wire
/// parameter pairs (e.g. `("exterior_color[]", "red")`); the client adds the
/// API key itself.
#[derive(Debug, Clone)]
pub struct ListingsRequest {
    pub price_min: u64,
    pub price_max: u64,
    pub page: u32,
    pub exclude_no_price: bool,
    pub filters: Vec<(String, String)>,
}

impl ListingsRequest {
    pub(crate) fn query_params(&self, api_key: &str) -> Vec<(String, String)> {
        let mut params = vec![
            ("apikey".to_string(), api_key.to_string()),
            ("price_min".to_string(), self.price_min.to_string()),
            ("price_max".to_string(), self.price_max.to_string()),
            ("page".to_string(), self.page.to_string()),
            (
                "exclude_no_price".to_string(),
                self.exclude_no_price.to_string(),
            ),
        ];
        params.extend(self.filters.iter().cloned());
        params
    }
}

/// Response envelope for `/listings`. A missing `records` field decodes as
/// an empty set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingsResponse {
    #[serde(default)]
    pub records: Vec<ListingRecord>,
}

/// A single vehicle listing from the auto.dev dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingRecord {
    pub year: Option<u16>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub price: Option<String>,
    #[serde(rename = "primaryPhotoUrl")]
    pub primary_photo_url: Option<String>,
}
