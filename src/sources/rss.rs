use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use feed_rs::parser;
use reqwest::Client;
use tracing::debug;

use crate::dates;
use crate::domain::NewsItem;
use crate::errors::{SvodkaError, SvodkaResult};
use crate::filter::RelevanceFilter;
use crate::sources::traits::NewsSource;

/// RSS/Atom source adapter. One instance per feed; the filter text is the
/// entry title plus its description, so keyword hits in the body snippet
/// count too.
pub struct RssSource {
    name: String,
    feed_url: String,
    client: Client,
    filter: RelevanceFilter,
}

impl RssSource {
    pub fn new(
        name: impl Into<String>,
        feed_url: impl Into<String>,
        filter: RelevanceFilter,
        accept_invalid_certs: bool,
    ) -> Self {
        Self {
            name: name.into(),
            feed_url: feed_url.into(),
            client: crate::sources::http_client(accept_invalid_certs),
            filter,
        }
    }

    fn items_from_feed(&self, bytes: &[u8], now: NaiveDateTime) -> SvodkaResult<Vec<NewsItem>> {
        let parsed =
            parser::parse(bytes).map_err(|e| SvodkaError::FeedParse(e.to_string()))?;

        let mut items = Vec::new();
        for entry in parsed.entries {
            let title = match entry.title {
                Some(t) if !t.content.trim().is_empty() => t.content,
                _ => continue,
            };

            let link = match entry.links.first() {
                Some(l) => l.href.clone(),
                None => {
                    debug!(source = %self.name, %title, "entry without link skipped");
                    continue;
                }
            };

            let description = entry.summary.map(|s| s.content).unwrap_or_default();

            // Undated entries are dropped silently, not treated as errors.
            let published = match entry
                .published
                .or(entry.updated)
                .map(|dt| dt.with_timezone(&Local).naive_local())
            {
                Some(dt) => dt,
                None => {
                    debug!(source = %self.name, %title, "undated entry skipped");
                    continue;
                }
            };

            let text = format!("{} {}", title, description);
            if self.filter.accepts(&text, published, now) {
                items.push(NewsItem::new(title, link, published, &self.name));
            }
        }

        Ok(items)
    }
}

#[async_trait]
impl NewsSource for RssSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn origin(&self) -> &str {
        &self.feed_url
    }

    async fn fetch(&self) -> SvodkaResult<Vec<NewsItem>> {
        let response = self.client.get(&self.feed_url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        self.items_from_feed(&bytes, dates::now_local())
    }
}
