pub mod error;
pub mod types;

pub use error::{Result, TelegramError};
pub use types::{ApiEnvelope, Chat, Message, Update};

use std::path::Path;
use std::time::Duration;

use reqwest::multipart;
use serde::de::DeserializeOwned;

const BASE_URL: &str = "https://api.telegram.org";

/// Ceiling for non-polling calls (sendMessage, sendPhoto).
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct TelegramClient {
    http: reqwest::Client,
    token: String,
}

impl TelegramClient {
    pub fn new(token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            token,
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", BASE_URL, self.token, method)
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        let status = resp.status();
        let body = resp.text().await?;
        let envelope: ApiEnvelope<T> = serde_json::from_str(&body)?;
        if !envelope.ok {
            return Err(TelegramError::Api(
                envelope
                    .description
                    .unwrap_or_else(|| format!("request failed with status {status}")),
            ));
        }
        envelope
            .result
            .ok_or_else(|| TelegramError::Parse("ok response without result".to_string()))
    }

    /// Long-poll for updates. Blocks up to `poll_timeout_secs` server-side;
    /// the HTTP timeout is padded past that so the poll itself never trips it.
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        poll_timeout_secs: u64,
    ) -> Result<Vec<Update>> {
        let mut params = vec![("timeout".to_string(), poll_timeout_secs.to_string())];
        if let Some(offset) = offset {
            params.push(("offset".to_string(), offset.to_string()));
        }

        let resp = self
            .http
            .get(self.method_url("getUpdates"))
            .query(&params)
            .timeout(Duration::from_secs(poll_timeout_secs + 10))
            .send()
            .await?;

        let updates: Vec<Update> = Self::decode(resp).await?;
        if !updates.is_empty() {
            tracing::debug!(count = updates.len(), "received updates");
        }
        Ok(updates)
    }

    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<Message> {
        let resp = self
            .http
            .post(self.method_url("sendMessage"))
            .timeout(REQUEST_TIMEOUT)
            .json(&serde_json::json!({ "chat_id": chat_id, "text": text }))
            .send()
            .await?;

        Self::decode(resp).await
    }

    /// Send a photo Telegram fetches itself from a public URL.
    pub async fn send_photo_url(
        &self,
        chat_id: i64,
        photo_url: &str,
        caption: Option<&str>,
    ) -> Result<Message> {
        let mut body = serde_json::json!({ "chat_id": chat_id, "photo": photo_url });
        if let Some(caption) = caption {
            body["caption"] = serde_json::Value::String(caption.to_string());
        }

        let resp = self
            .http
            .post(self.method_url("sendPhoto"))
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await?;

        Self::decode(resp).await
    }

    /// Upload a local photo file (multipart).
    pub async fn send_photo_file(&self, chat_id: i64, path: &Path) -> Result<Message> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "photo.jpeg".to_string());

        let form = multipart::Form::new()
            .text("chat_id", chat_id.to_string())
            .part("photo", multipart::Part::bytes(bytes).file_name(file_name));

        let resp = self
            .http
            .post(self.method_url("sendPhoto"))
            .timeout(REQUEST_TIMEOUT)
            .multipart(form)
            .send()
            .await?;

        Self::decode(resp).await
    }
}
