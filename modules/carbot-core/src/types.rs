use std::path::PathBuf;

use serde::Deserialize;
use tracing::warn;

use crate::schema;

/// Structured search filters extracted from a free-text car description.
/// Every field optional; absent means "don't filter on this".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchFilters {
    pub make: Option<String>,
    pub model: Option<String>,
    pub exterior_color: Option<String>,
    pub body_style: Option<String>,
    pub category: Option<String>,
    pub condition: Option<String>,
    pub features: Option<String>,
    pub transmission: Option<String>,
    pub driveline: Option<String>,
    pub sort_order: Option<String>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        self.enumerated_and_free().iter().all(|(_, v)| v.is_none())
    }

    /// Drop every enumerated value that is not in its key's vocabulary.
    /// `make` and `model` are free-form and always kept. Nothing
    /// out-of-vocabulary may reach the listings API.
    pub fn sanitize(&mut self) {
        retain_allowed("exterior_color", &mut self.exterior_color);
        retain_allowed("body_style", &mut self.body_style);
        retain_allowed("category", &mut self.category);
        retain_allowed("condition", &mut self.condition);
        retain_allowed("features", &mut self.features);
        retain_allowed("transmission", &mut self.transmission);
        retain_allowed("driveline", &mut self.driveline);
        retain_allowed("sort_order", &mut self.sort_order);
    }

    /// Present filters as wire parameter pairs, in schema order.
    pub fn wire_params(&self) -> Vec<(String, String)> {
        self.enumerated_and_free()
            .into_iter()
            .filter_map(|(key, value)| {
                value
                    .as_ref()
                    .map(|v| (schema::wire_name(key).to_string(), v.clone()))
            })
            .collect()
    }

    fn enumerated_and_free(&self) -> [(&'static str, &Option<String>); 10] {
        [
            ("make", &self.make),
            ("model", &self.model),
            ("exterior_color", &self.exterior_color),
            ("body_style", &self.body_style),
            ("category", &self.category),
            ("condition", &self.condition),
            ("features", &self.features),
            ("transmission", &self.transmission),
            ("driveline", &self.driveline),
            ("sort_order", &self.sort_order),
        ]
    }
}

fn retain_allowed(key: &'static str, slot: &mut Option<String>) {
    let Some(value) = slot else { return };
    let Some(allowed) = schema::allowed_values(key) else {
        return;
    };
    if !allowed.contains(&value.as_str()) {
        warn!(key, value = value.as_str(), "dropping out-of-vocabulary filter value");
        *slot = None;
    }
}

/// Price bounds around a target amount, in whole dollars: lower is
/// ⌊amount·0.9⌋, upper is ⌈amount·1.10⌉. Rounding is outward so the window
/// never narrows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceWindow {
    lower: u64,
    upper: u64,
}

impl PriceWindow {
    pub fn around(amount: u64) -> Self {
        // Widened through u128 so no parseable amount can overflow.
        let lower = (amount as u128 * 9 / 10) as u64;
        let upper = (amount as u128 * 11).div_ceil(10).min(u64::MAX as u128) as u64;
        Self { lower, upper }
    }

    pub fn lower(&self) -> u64 {
        self.lower
    }

    pub fn upper(&self) -> u64 {
        self.upper
    }
}

/// One listings search: price window plus filters. Pagination is fixed to
/// the first page and unpriced listings are always excluded.
#[derive(Debug, Clone)]
pub struct ListingQuery {
    pub price: PriceWindow,
    pub filters: SearchFilters,
    pub page: u32,
    pub exclude_no_price: bool,
}

impl ListingQuery {
    pub fn new(price: PriceWindow, mut filters: SearchFilters) -> Self {
        filters.sanitize();
        Self {
            price,
            filters,
            page: 1,
            exclude_no_price: true,
        }
    }
}

/// A vehicle listing as the selection policy sees it. Missing display
/// fields render as "unknown" in the reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub year: Option<u16>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub price: Option<String>,
    pub photo_url: Option<String>,
}

/// The handler's output payload, dispatched by the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Photo { url: String, caption: Option<String> },
    PhotoFile { path: PathBuf },
}
