use async_trait::async_trait;
use chrono::NaiveDateTime;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use crate::dates;
use crate::domain::NewsItem;
use crate::errors::SvodkaResult;
use crate::filter::RelevanceFilter;
use crate::sources::traits::NewsSource;

const NAME: &str = "mtv-online";
// Punycode form of https://мтв.онлайн/feed; the Url crate re-encodes IDN
// hosts the same way, so extracted links come out clickable.
const FEED_URL: &str = "https://xn--b1ats.xn--80asehdb/feed";
const ORIGIN: &str = "https://мтв.онлайн";

/// HTML listing adapter for МТВ.онлайн. Title blocks are followed by sibling
/// elements holding the summary text and a Russian-worded date
/// ("6 Апреля, 14:55 | ...").
pub struct MtvSource {
    client: reqwest::Client,
    filter: RelevanceFilter,
}

impl MtvSource {
    pub fn new(filter: RelevanceFilter) -> Self {
        Self {
            client: crate::sources::http_client(true),
            filter,
        }
    }

    fn items_from_listing(&self, html: &str, now: NaiveDateTime) -> Vec<NewsItem> {
        let block_sel = Selector::parse("div.item-title").unwrap();
        let title_sel = Selector::parse("h2").unwrap();
        let link_sel = Selector::parse("a[href]").unwrap();
        let date_sel = Selector::parse("span.dt").unwrap();

        let document = Html::parse_document(html);
        let mut items = Vec::new();

        for block in document.select(&block_sel) {
            let title = match block.select(&title_sel).next() {
                Some(el) => el.text().collect::<String>().trim().to_string(),
                None => continue,
            };
            if title.is_empty() {
                continue;
            }

            let href = match block
                .select(&link_sel)
                .next()
                .and_then(|a| a.value().attr("href"))
            {
                Some(h) => h,
                None => continue,
            };
            let link = match Url::parse(FEED_URL).ok().and_then(|b| b.join(href).ok()) {
                Some(u) => u.to_string(),
                None => continue,
            };

            let (description, raw_date) = Self::sibling_details(block);

            let published = match raw_date.and_then(|s| {
                // Everything after the first '|' is view-count noise.
                let cleaned = s.split('|').next().unwrap_or("").trim().to_string();
                dates::parse_russian(&cleaned, now)
            }) {
                Some(dt) => dt,
                None => {
                    debug!(source = NAME, %title, "undated listing entry skipped");
                    continue;
                }
            };

            let text = format!("{} {}", title, description);
            if self.filter.accepts(&text, published, now) {
                items.push(NewsItem::new(title, link, published, NAME));
            }
        }

        items
    }

    /// Walks the elements following a title block: `p.short` carries the
    /// summary, `div.summary span.dt` the date. Stops at the next title block.
    fn sibling_details(block: ElementRef<'_>) -> (String, Option<String>) {
        let date_sel = Selector::parse("span.dt").unwrap();

        let mut description = String::new();
        let mut raw_date = None;

        for sibling in block.next_siblings().filter_map(ElementRef::wrap) {
            let class = sibling.value().attr("class").unwrap_or("");
            match sibling.value().name() {
                "p" if class.contains("short") => {
                    description = sibling.text().collect::<String>().trim().to_string();
                }
                "div" if class.contains("summary") => {
                    raw_date = sibling
                        .select(&date_sel)
                        .next()
                        .map(|el| el.text().collect::<String>());
                }
                "div" if class.contains("item-title") => break,
                _ => {}
            }
            if !description.is_empty() && raw_date.is_some() {
                break;
            }
        }

        (description, raw_date)
    }
}

#[async_trait]
impl NewsSource for MtvSource {
    fn name(&self) -> &str {
        NAME
    }

    fn origin(&self) -> &str {
        ORIGIN
    }

    async fn fetch(&self) -> SvodkaResult<Vec<NewsItem>> {
        let response = self.client.get(FEED_URL).send().await?.error_for_status()?;
        let html = response.text().await?;
        Ok(self.items_from_listing(&html, dates::now_local()))
    }
}
