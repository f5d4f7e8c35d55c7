use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error};

use crate::dates;
use crate::domain::NewsItem;
use crate::errors::SvodkaResult;
use crate::filter::RelevanceFilter;
use crate::sources::traits::NewsSource;

const NAME: &str = "vk";
const API_URL: &str = "https://api.vk.com/method/wall.get";
const API_VERSION: &str = "5.131";
const POSTS_PER_GROUP: u32 = 10;
/// Courtesy delay between per-group requests; VK rate-limits service keys.
const INTER_REQUEST_DELAY: Duration = Duration::from_millis(500);
const TITLE_MAX_CHARS: usize = 100;

#[derive(Debug, Deserialize)]
struct VkEnvelope {
    response: Option<VkResponse>,
    error: Option<VkError>,
}

#[derive(Debug, Deserialize)]
struct VkResponse {
    items: Vec<VkPost>,
}

#[derive(Debug, Deserialize)]
struct VkPost {
    #[serde(default)]
    text: String,
    id: i64,
    owner_id: i64,
    date: i64,
}

#[derive(Debug, Deserialize)]
struct VkError {
    error_code: i64,
    error_msg: String,
}

/// Wall-post adapter: one `wall.get` call per configured group. A group whose
/// call fails (network or API error envelope) contributes nothing for this
/// run; the remaining groups are still queried.
pub struct VkSource {
    client: reqwest::Client,
    api_url: String,
    token: String,
    groups: Vec<String>,
    filter: RelevanceFilter,
}

impl VkSource {
    pub fn new(token: impl Into<String>, groups: Vec<String>, filter: RelevanceFilter) -> Self {
        Self {
            client: crate::sources::http_client(false),
            api_url: API_URL.to_string(),
            token: token.into(),
            groups,
            filter,
        }
    }

    #[doc(hidden)]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Numeric group ids (with or without the `club` prefix) become negative
    /// owner ids; anything else is passed through as-is.
    fn owner_id(group: &str) -> String {
        let digits = group.strip_prefix("club").unwrap_or(group);
        if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            format!("-{}", digits)
        } else {
            group.to_string()
        }
    }

    fn post_link(owner_id: i64, post_id: i64) -> String {
        format!("https://vk.com/wall{}_{}", owner_id, post_id)
    }

    /// First line of the post, clipped to a headline-sized length.
    fn title_from_text(text: &str) -> String {
        let first_line = text.lines().next().unwrap_or("").trim();
        if first_line.chars().count() > TITLE_MAX_CHARS {
            let clipped: String = first_line.chars().take(TITLE_MAX_CHARS).collect();
            format!("{}...", clipped)
        } else {
            first_line.to_string()
        }
    }

    async fn fetch_group(&self, group: &str) -> SvodkaResult<Vec<NewsItem>> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("owner_id", Self::owner_id(group)),
                ("count", POSTS_PER_GROUP.to_string()),
                ("access_token", self.token.clone()),
                ("v", API_VERSION.to_string()),
            ])
            .send()
            .await?;

        let envelope: VkEnvelope = response.json().await?;

        if let Some(err) = envelope.error {
            return Err(crate::errors::SvodkaError::VkApi {
                code: err.error_code,
                message: err.error_msg,
            });
        }

        let posts = envelope.response.map(|r| r.items).unwrap_or_default();
        let now = dates::now_local();
        let mut items = Vec::new();

        for post in posts {
            let text = post.text.trim();
            if text.is_empty() {
                continue;
            }

            let published = match dates::from_unix(post.date) {
                Some(dt) => dt,
                None => {
                    debug!(source = NAME, post_id = post.id, "post with invalid timestamp");
                    continue;
                }
            };

            // The filter sees the full post text, not just the first line.
            if self.filter.accepts(text, published, now) {
                items.push(NewsItem::new(
                    Self::title_from_text(text),
                    Self::post_link(post.owner_id, post.id),
                    published,
                    NAME,
                ));
            }
        }

        Ok(items)
    }
}

#[async_trait]
impl NewsSource for VkSource {
    fn name(&self) -> &str {
        NAME
    }

    fn origin(&self) -> &str {
        "https://vk.com"
    }

    async fn fetch(&self) -> SvodkaResult<Vec<NewsItem>> {
        let mut items = Vec::new();

        for (i, group) in self.groups.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(INTER_REQUEST_DELAY).await;
            }
            match self.fetch_group(group).await {
                Ok(group_items) => items.extend(group_items),
                Err(e) => {
                    // One group's failure must not empty the whole adapter.
                    error!(source = NAME, %group, error = %e, "group fetch failed");
                }
            }
        }

        Ok(items)
    }
}
