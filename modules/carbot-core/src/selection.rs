use rand::seq::IndexedRandom;

use crate::config::Config;
use crate::types::{Listing, Reply};

pub const NO_MATCH_TEXT: &str =
    "Sorry, I couldn't find any cars matching your criteria. Try adjusting your search parameters.";

/// Empty result sets below this amount get the "bet more" image.
const BET_MORE_BELOW: u64 = 1_000;

/// Empty result sets above this amount get the "bet less" image.
const BET_LESS_ABOVE: u64 = 25_000_000;

/// Pick the reply for a finished search: one listing uniformly at random,
/// or a price-band fallback when nothing matched.
pub fn select(amount: u64, results: &[Listing], config: &Config) -> Reply {
    if let Some(listing) = results.choose(&mut rand::rng()) {
        let caption = caption_for(amount, listing);
        return match &listing.photo_url {
            Some(url) => Reply::Photo {
                url: url.clone(),
                caption: Some(caption),
            },
            None => Reply::Text(caption),
        };
    }

    if amount < BET_MORE_BELOW {
        Reply::PhotoFile {
            path: config.bet_more_image.clone(),
        }
    } else if amount > BET_LESS_ABOVE {
        Reply::PhotoFile {
            path: config.bet_less_image.clone(),
        }
    } else {
        Reply::Text(NO_MATCH_TEXT.to_string())
    }
}

fn caption_for(amount: u64, listing: &Listing) -> String {
    let year = listing
        .year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    format!(
        "With your ${}, you could have bought a {} {} {}!",
        amount,
        year,
        listing.make.as_deref().unwrap_or("unknown"),
        listing.model.as_deref().unwrap_or("unknown"),
    )
}
