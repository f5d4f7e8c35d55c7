use async_trait::async_trait;
use chrono::NaiveDateTime;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use crate::dates;
use crate::domain::NewsItem;
use crate::errors::{SvodkaError, SvodkaResult};
use crate::filter::RelevanceFilter;
use crate::sources::traits::NewsSource;

const NAME: &str = "gorvesti";
const BASE_URL: &str = "https://gorvesti.ru";
const FEED_URL: &str = "https://gorvesti.ru/feed/";

/// HTML listing adapter for gorvesti.ru. Each news block carries its own date
/// inline, so no per-article requests are needed.
pub struct GorvestiSource {
    client: reqwest::Client,
    filter: RelevanceFilter,
}

impl GorvestiSource {
    pub fn new(filter: RelevanceFilter) -> Self {
        Self {
            // The site serves a broken certificate chain.
            client: crate::sources::http_client(true),
            filter,
        }
    }

    fn items_from_listing(&self, html: &str, now: NaiveDateTime) -> Vec<NewsItem> {
        let block_sel = Selector::parse("div.itm").unwrap();
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
            let link = match Url::parse(BASE_URL).ok().and_then(|b| b.join(href).ok()) {
                Some(u) => u.to_string(),
                None => continue,
            };

            let raw_date = block
                .select(&date_sel)
                .next()
                .map(|el| el.text().collect::<String>());
            let published = match raw_date.and_then(|s| dates::parse_flexible(&s, now)) {
                Some(dt) => dt,
                None => {
                    debug!(source = NAME, %title, "undated listing entry skipped");
                    continue;
                }
            };

            if self.filter.accepts(&title, published, now) {
                items.push(NewsItem::new(title, link, published, NAME));
            }
        }

        items
    }
}

#[async_trait]
impl NewsSource for GorvestiSource {
    fn name(&self) -> &str {
        NAME
    }

    fn origin(&self) -> &str {
        BASE_URL
    }

    async fn fetch(&self) -> SvodkaResult<Vec<NewsItem>> {
        let response = self.client.get(FEED_URL).send().await?.error_for_status()?;
        let html = response.text().await?;
        if html.trim().is_empty() {
            return Err(SvodkaError::PageParse("empty listing page".to_string()));
        }
        Ok(self.items_from_listing(&html, dates::now_local()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local};

    fn source(keywords: &[&str]) -> GorvestiSource {
        GorvestiSource::new(RelevanceFilter::new(
            keywords.iter().map(|s| s.to_string()).collect(),
            Vec::new(),
        ))
    }

    fn listing(date: &str) -> String {
        format!(
            r#"<html><body>
<div class="itm">
  <a href="/news/123"><h2>Волгоград ждёт паводок</h2></a>
  <span class="dt">{date}</span>
</div>
<div class="itm">
  <a href="/news/456"><h2>Открытие сезона</h2></a>
  <span class="dt">{date}</span>
</div>
</body></html>"#
        )
    }

    #[test]
    fn test_extracts_matching_items_with_absolute_links() {
        let src = source(&["волгоград"]);
        let now = dates::now_local();
        let date = (Local::now() - Duration::hours(3))
            .naive_local()
            .format("%d.%m.%Y %H:%M")
            .to_string();

        let items = src.items_from_listing(&listing(&date), now);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Волгоград ждёт паводок");
        assert_eq!(items[0].link, "https://gorvesti.ru/news/123");
    }

    #[test]
    fn test_stale_entries_dropped() {
        let src = source(&["волгоград"]);
        let now = dates::now_local();
        let date = (Local::now() - Duration::hours(48))
            .naive_local()
            .format("%d.%m.%Y %H:%M")
            .to_string();

        assert!(src.items_from_listing(&listing(&date), now).is_empty());
    }

    #[test]
    fn test_blocks_without_date_skipped() {
        let src = source(&["волгоград"]);
        let html = r#"<div class="itm"><a href="/n"><h2>Волгоград</h2></a></div>"#;
        assert!(src.items_from_listing(html, dates::now_local()).is_empty());
    }
}
