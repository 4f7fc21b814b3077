use tracing::{error, warn};

use crate::deps::BotDeps;
use crate::error::CarbotError;
use crate::selection;
use crate::types::{ListingQuery, PriceWindow, Reply, SearchFilters};

pub const USAGE_TEXT: &str =
    "Usage: /car <amount> [description], e.g. /car 20000 red bmw convertible";

pub const INVALID_AMOUNT_TEXT: &str =
    "Please provide a valid dollar amount. Usage: /car [amount] [description]";

const UPSTREAM_ERROR_TEXT: &str =
    "Couldn't reach the car listings right now. Please try again in a moment.";

const GENERIC_ERROR_TEXT: &str = "An error occurred. Please try again.";

/// Handle one `/car` invocation. Always produces a reply: validation
/// failures short-circuit with their message, and everything past that is
/// mapped to a canned error reply here rather than propagated.
pub async fn handle(deps: &BotDeps, args: &[String]) -> Reply {
    let Some(first) = args.first() else {
        return Reply::Text(USAGE_TEXT.to_string());
    };

    let amount: u64 = match first.parse() {
        Ok(amount) => amount,
        Err(_) => return Reply::Text(INVALID_AMOUNT_TEXT.to_string()),
    };

    let description = args[1..].join(" ");

    match run_pipeline(deps, amount, &description).await {
        Ok(reply) => reply,
        Err(CarbotError::Search(e)) => {
            warn!(error = %e, amount, "listings search failed");
            Reply::Text(UPSTREAM_ERROR_TEXT.to_string())
        }
        Err(e) => {
            error!(error = %e, amount, "command pipeline failed");
            Reply::Text(GENERIC_ERROR_TEXT.to_string())
        }
    }
}

async fn run_pipeline(
    deps: &BotDeps,
    amount: u64,
    description: &str,
) -> Result<Reply, CarbotError> {
    // The translator is only consulted when there is a description to
    // translate; a bare amount searches on price alone.
    let filters = if description.trim().is_empty() {
        SearchFilters::default()
    } else {
        deps.translator.translate(description).await
    };

    let query = ListingQuery::new(PriceWindow::around(amount), filters);
    let results = deps.listings.search(&query).await?;

    Ok(selection::select(amount, &results, &deps.config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::deps::{FilterTranslator, ListingSearch};
    use crate::error::SearchError;
    use crate::types::Listing;

    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct StubTranslator {
        invoked: AtomicBool,
        last_input: Mutex<Option<String>>,
        filters: SearchFilters,
    }

    impl StubTranslator {
        fn returning(filters: SearchFilters) -> Arc<Self> {
            Arc::new(Self {
                filters,
                ..Default::default()
            })
        }
    }

    #[async_trait]
    impl FilterTranslator for StubTranslator {
        async fn translate(&self, free_text: &str) -> SearchFilters {
            self.invoked.store(true, Ordering::SeqCst);
            *self.last_input.lock().unwrap() = Some(free_text.to_string());
            self.filters.clone()
        }
    }

    enum StubOutcome {
        Results(Vec<Listing>),
        Timeout,
        ApiError,
    }

    struct StubSearch {
        invoked: AtomicBool,
        last_query: Mutex<Option<ListingQuery>>,
        outcome: StubOutcome,
    }

    impl StubSearch {
        fn with(outcome: StubOutcome) -> Arc<Self> {
            Arc::new(Self {
                invoked: AtomicBool::new(false),
                last_query: Mutex::new(None),
                outcome,
            })
        }
    }

    #[async_trait]
    impl ListingSearch for StubSearch {
        async fn search(&self, query: &ListingQuery) -> Result<Vec<Listing>, SearchError> {
            self.invoked.store(true, Ordering::SeqCst);
            *self.last_query.lock().unwrap() = Some(query.clone());
            match &self.outcome {
                StubOutcome::Results(listings) => Ok(listings.clone()),
                StubOutcome::Timeout => Err(SearchError::Timeout),
                StubOutcome::ApiError => Err(SearchError::Api {
                    status: 500,
                    message: "upstream broke".to_string(),
                }),
            }
        }
    }

    fn test_config() -> Config {
        Config {
            telegram_bot_token: "token".to_string(),
            auto_dev_api_key: "listings-key".to_string(),
            openai_api_key: "ai-key".to_string(),
            openai_model: "gpt-4o-mini".to_string(),
            bet_more_image: "./betmore.jpeg".into(),
            bet_less_image: "./betless.jpeg".into(),
        }
    }

    fn deps_with(translator: Arc<StubTranslator>, listings: Arc<StubSearch>) -> BotDeps {
        BotDeps {
            translator,
            listings,
            config: test_config(),
        }
    }

    fn args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn no_args_replies_usage_without_upstream_calls() {
        let translator = StubTranslator::returning(SearchFilters::default());
        let search = StubSearch::with(StubOutcome::Results(vec![]));
        let deps = deps_with(translator.clone(), search.clone());

        let reply = handle(&deps, &[]).await;

        assert_eq!(reply, Reply::Text(USAGE_TEXT.to_string()));
        assert!(!translator.invoked.load(Ordering::SeqCst));
        assert!(!search.invoked.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn non_numeric_amount_replies_validation_without_upstream_calls() {
        let translator = StubTranslator::returning(SearchFilters::default());
        let search = StubSearch::with(StubOutcome::Results(vec![]));
        let deps = deps_with(translator.clone(), search.clone());

        let reply = handle(&deps, &args(&["abc"])).await;

        assert_eq!(reply, Reply::Text(INVALID_AMOUNT_TEXT.to_string()));
        assert!(!translator.invoked.load(Ordering::SeqCst));
        assert!(!search.invoked.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn amount_and_description_flow_through_the_pipeline() {
        let filters = SearchFilters {
            make: Some("BMW".to_string()),
            exterior_color: Some("red".to_string()),
            ..Default::default()
        };
        let translator = StubTranslator::returning(filters);
        let search = StubSearch::with(StubOutcome::Results(vec![Listing {
            year: Some(2015),
            make: Some("BMW".to_string()),
            model: Some("328i".to_string()),
            price: None,
            photo_url: None,
        }]));
        let deps = deps_with(translator.clone(), search.clone());

        let reply = handle(&deps, &args(&["20000", "red", "bmw"])).await;

        assert_eq!(
            translator.last_input.lock().unwrap().as_deref(),
            Some("red bmw")
        );
        let query = search.last_query.lock().unwrap().clone().unwrap();
        assert_eq!(query.price.lower(), 18_000);
        assert_eq!(query.price.upper(), 22_000);
        assert_eq!(query.filters.make.as_deref(), Some("BMW"));
        assert_eq!(query.filters.exterior_color.as_deref(), Some("red"));
        assert_eq!(
            reply,
            Reply::Text("With your $20000, you could have bought a 2015 BMW 328i!".to_string())
        );
    }

    #[tokio::test]
    async fn bare_amount_skips_the_translator() {
        let translator = StubTranslator::returning(SearchFilters::default());
        let search = StubSearch::with(StubOutcome::Results(vec![]));
        let deps = deps_with(translator.clone(), search.clone());

        handle(&deps, &args(&["5000"])).await;

        assert!(!translator.invoked.load(Ordering::SeqCst));
        assert!(search.invoked.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn search_timeout_becomes_retry_reply() {
        let translator = StubTranslator::returning(SearchFilters::default());
        let search = StubSearch::with(StubOutcome::Timeout);
        let deps = deps_with(translator, search);

        let reply = handle(&deps, &args(&["5000"])).await;
        assert_eq!(reply, Reply::Text(UPSTREAM_ERROR_TEXT.to_string()));
    }

    #[tokio::test]
    async fn search_api_error_becomes_retry_reply() {
        let translator = StubTranslator::returning(SearchFilters::default());
        let search = StubSearch::with(StubOutcome::ApiError);
        let deps = deps_with(translator, search);

        let reply = handle(&deps, &args(&["5000"])).await;
        assert_eq!(reply, Reply::Text(UPSTREAM_ERROR_TEXT.to_string()));
    }

    #[tokio::test]
    async fn translated_out_of_vocabulary_values_never_reach_the_search() {
        let filters = SearchFilters {
            exterior_color: Some("neon".to_string()),
            body_style: Some("sedan".to_string()),
            ..Default::default()
        };
        let translator = StubTranslator::returning(filters);
        let search = StubSearch::with(StubOutcome::Results(vec![]));
        let deps = deps_with(translator, search.clone());

        handle(&deps, &args(&["5000", "neon", "sedan"])).await;

        let query = search.last_query.lock().unwrap().clone().unwrap();
        assert!(query.filters.exterior_color.is_none());
        assert_eq!(query.filters.body_style.as_deref(), Some("sedan"));
    }
}
