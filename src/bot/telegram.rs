use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::errors::{SvodkaError, SvodkaResult};

/// How long a `getUpdates` call waits server-side before returning empty.
const LONG_POLL_SECS: u32 = 25;

#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    pub text: Option<String>,
    pub chat: Chat,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

/// The bot's outbound seam. Mocked in unit tests so delivery logic can be
/// exercised without a live Bot API token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send_message(&self, chat_id: i64, text: &str) -> SvodkaResult<()>;
    async fn get_updates(&self, offset: Option<i64>) -> SvodkaResult<Vec<Update>>;
}

pub struct TelegramClient {
    client: reqwest::Client,
    base_url: String,
}

impl TelegramClient {
    pub fn new(token: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30 + LONG_POLL_SECS as u64))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: format!("https://api.telegram.org/bot{}", token),
        }
    }

    #[doc(hidden)]
    pub fn with_api_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{}", self.base_url, method)
    }

    async fn call<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        body: serde_json::Value,
    ) -> SvodkaResult<T> {
        let response = self
            .client
            .post(self.method_url(method))
            .json(&body)
            .send()
            .await?;

        let api: ApiResponse<T> = response.json().await?;
        if !api.ok {
            return Err(SvodkaError::Telegram(
                api.description
                    .unwrap_or_else(|| format!("{} failed", method)),
            ));
        }

        api.result
            .ok_or_else(|| SvodkaError::Telegram(format!("{} returned no result", method)))
    }
}

#[async_trait]
impl Messenger for TelegramClient {
    async fn send_message(&self, chat_id: i64, text: &str) -> SvodkaResult<()> {
        let _: serde_json::Value = self
            .call(
                "sendMessage",
                json!({
                    "chat_id": chat_id,
                    "text": text,
                    "parse_mode": "HTML",
                }),
            )
            .await?;
        Ok(())
    }

    async fn get_updates(&self, offset: Option<i64>) -> SvodkaResult<Vec<Update>> {
        let mut body = json!({ "timeout": LONG_POLL_SECS });
        if let Some(offset) = offset {
            body["offset"] = json!(offset);
        }
        self.call("getUpdates", body).await
    }
}
