pub mod error;
pub mod types;
pub mod util;

pub use error::{AiError, Result};
pub use util::strip_code_blocks;

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use tracing::debug;

use types::{ChatRequest, ChatResponse, JsonSchemaFormat, ResponseFormat, WireMessage};

const OPENAI_API_URL: &str = "https://api.openai.com/v1";

/// Completion calls must not hang a command invocation indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct OpenAi {
    api_key: String,
    model: String,
    http: reqwest::Client,
    base_url: String,
}

impl OpenAi {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            http: reqwest::Client::new(),
            base_url: OPENAI_API_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .map_err(|e| AiError::Parse(e.to_string()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// One chat completion constrained by a raw JSON schema. Returns the
    /// model's textual output, which callers parse themselves.
    pub async fn structured_output(
        &self,
        system: &str,
        user: &str,
        schema: serde_json::Value,
    ) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![WireMessage::system(system), WireMessage::user(user)],
            temperature: Some(0.0),
            response_format: Some(ResponseFormat {
                format_type: "json_schema".to_string(),
                json_schema: JsonSchemaFormat {
                    name: "structured_response".to_string(),
                    strict: true,
                    schema,
                },
            }),
        };

        debug!(model = %request.model, "OpenAI structured output request");

        let response = self
            .http
            .post(&url)
            .headers(self.headers()?)
            .timeout(REQUEST_TIMEOUT)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat_response: ChatResponse = response.json().await?;

        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(AiError::EmptyResponse)
    }
}
