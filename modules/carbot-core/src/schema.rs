//! The closed vocabulary of auto.dev filter parameters.
//!
//! Ten recognized filter keys; eight carry a fixed enumeration, `make` and
//! `model` are free-form. The same constants feed the translator's prompt,
//! the completion response schema, and the defensive pass that keeps
//! out-of-vocabulary values off the wire.

pub const EXTERIOR_COLORS: &[&str] = &[
    "black", "silver", "white", "gray", "red", "green", "yellow", "blue", "brown", "orange",
    "purple", "gold",
];

pub const BODY_STYLES: &[&str] = &[
    "convertible",
    "coupe",
    "minivan",
    "crossover",
    "sedan",
    "suv",
    "truck",
    "wagon",
];

pub const CATEGORIES: &[&str] = &[
    "american",
    "classic",
    "commuter",
    "electric",
    "family",
    "fuel_efficient",
    "hybrid",
    "muscle",
    "sport",
    "supercar",
];

pub const CONDITIONS: &[&str] = &["new", "used", "certified pre-owned"];

pub const FEATURES: &[&str] = &[
    "backup_camera",
    "bluetooth",
    "heated_seats",
    "leather",
    "navigation",
    "sunroof",
];

pub const TRANSMISSIONS: &[&str] = &["automatic", "manual"];

pub const DRIVELINES: &[&str] = &["RWD", "FWD", "4X4", "AWD"];

pub const SORT_ORDERS: &[&str] = &["price:asc", "price:desc", "year:desc", "mileage:asc"];

/// All recognized filter keys, in schema order.
pub const FILTER_KEYS: &[&str] = &[
    "make",
    "model",
    "exterior_color",
    "body_style",
    "category",
    "condition",
    "features",
    "transmission",
    "driveline",
    "sort_order",
];

/// Legal values for an enumerated filter key; `None` for the free-form
/// keys (`make`, `model`) and for unrecognized keys.
pub fn allowed_values(key: &str) -> Option<&'static [&'static str]> {
    match key {
        "exterior_color" => Some(EXTERIOR_COLORS),
        "body_style" => Some(BODY_STYLES),
        "category" => Some(CATEGORIES),
        "condition" => Some(CONDITIONS),
        "features" => Some(FEATURES),
        "transmission" => Some(TRANSMISSIONS),
        "driveline" => Some(DRIVELINES),
        "sort_order" => Some(SORT_ORDERS),
        _ => None,
    }
}

/// Wire parameter name for a filter key. Array-valued parameters carry the
/// `[]` suffix auto.dev expects; `sort_order` is spelled `sort_filter` on
/// the wire.
pub fn wire_name(key: &str) -> &str {
    match key {
        "exterior_color" => "exterior_color[]",
        "body_style" => "body_style[]",
        "condition" => "condition[]",
        "features" => "features[]",
        "transmission" => "transmission[]",
        "driveline" => "driveline[]",
        "sort_order" => "sort_filter",
        other => other,
    }
}

/// Render the vocabulary for the translator's system prompt.
pub fn vocabulary_block() -> String {
    let mut block = String::new();
    for key in FILTER_KEYS {
        match allowed_values(key) {
            Some(values) => {
                block.push_str(&format!("- {key}: one of {}\n", values.join(", ")));
            }
            None => {
                block.push_str(&format!("- {key}: free text\n"));
            }
        }
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumerated_keys_have_vocabularies() {
        assert!(allowed_values("exterior_color").unwrap().contains(&"red"));
        assert!(allowed_values("condition")
            .unwrap()
            .contains(&"certified pre-owned"));
        assert!(allowed_values("driveline").unwrap().contains(&"4X4"));
        assert_eq!(allowed_values("sort_order").unwrap().len(), 4);
    }

    #[test]
    fn free_form_keys_have_none() {
        assert!(allowed_values("make").is_none());
        assert!(allowed_values("model").is_none());
    }

    #[test]
    fn wire_names_match_the_listings_api() {
        assert_eq!(wire_name("exterior_color"), "exterior_color[]");
        assert_eq!(wire_name("sort_order"), "sort_filter");
        assert_eq!(wire_name("make"), "make");
        assert_eq!(wire_name("category"), "category");
    }

    #[test]
    fn vocabulary_block_lists_every_key() {
        let block = vocabulary_block();
        for key in FILTER_KEYS {
            assert!(block.contains(key), "missing {key}");
        }
    }
}
