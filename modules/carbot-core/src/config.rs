use std::env;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Secrets
    pub telegram_bot_token: String,
    pub auto_dev_api_key: String,
    pub openai_api_key: String,

    // Completion service
    pub openai_model: String,

    // Fallback images for empty result sets
    pub bet_more_image: PathBuf,
    pub bet_less_image: PathBuf,
}

impl Config {
    /// Load configuration from environment variables (a local `.env` is
    /// honored). Panics with a clear message if a required secret is
    /// missing; the bot cannot start without its credentials.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            telegram_bot_token: required_env("TELEGRAM_BOT_TOKEN"),
            auto_dev_api_key: required_env("AUTO_DEV_API_KEY"),
            openai_api_key: required_env("OPENAI_API_KEY"),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            bet_more_image: env::var("BET_MORE_IMAGE")
                .unwrap_or_else(|_| "./betmore.jpeg".to_string())
                .into(),
            bet_less_image: env::var("BET_LESS_IMAGE")
                .unwrap_or_else(|_| "./betless.jpeg".to_string())
                .into(),
        }
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}
