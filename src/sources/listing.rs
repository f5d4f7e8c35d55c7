use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime};
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use crate::dates;
use crate::domain::NewsItem;
use crate::errors::SvodkaResult;
use crate::filter::RelevanceFilter;
use crate::sources::traits::NewsSource;

/// How a site's article page reveals its publication time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRule {
    /// `meta[property="article:published_time"]` / `meta[property="pubdate"]`,
    /// then `<time datetime>`.
    MetaOrTime,
    /// `span.mobile-date` with a "25.03.2025 20:29" text.
    MobileDateSpan,
    /// Next.js `__NEXT_DATA__` JSON blob, then meta tags, then `<time>`, then
    /// a Russian-worded date element.
    NextDataJson,
}

/// Per-site knobs for the listing-page adapters. These sites publish a plain
/// link list and keep the publication time on the article page itself, so the
/// adapter filters candidate titles first and only then fetches dates.
#[derive(Debug, Clone)]
pub struct ListingConfig {
    pub name: String,
    pub base_url: String,
    /// CSS selector picking candidate links off the listing page.
    pub link_selector: String,
    pub date_rule: DateRule,
    /// Append `?dateFrom=<yesterday>` to the listing request.
    pub date_from_query: bool,
    /// Drop links leading off the site's own host.
    pub same_host_only: bool,
    /// Link texts shorter than this are navigation noise, not headlines.
    pub min_title_len: usize,
    /// Shift for sites whose markup reports UTC while the local convention
    /// expects the region's wall clock.
    pub utc_offset_hours: Option<i64>,
}

impl ListingConfig {
    pub fn new(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            link_selector: "a[href]".to_string(),
            date_rule: DateRule::MetaOrTime,
            date_from_query: false,
            same_host_only: false,
            min_title_len: 1,
            utc_offset_hours: None,
        }
    }
}

struct Candidate {
    title: String,
    link: String,
}

pub struct ListingSource {
    config: ListingConfig,
    client: reqwest::Client,
    filter: RelevanceFilter,
}

const INVALID_SCHEMES: &[&str] = &["tel:", "whatsapp:", "viber:", "tg:", "mailto:"];
const INVALID_DOMAINS: &[&str] = &["youtube.com", "youtu.be"];

impl ListingSource {
    pub fn new(config: ListingConfig, filter: RelevanceFilter) -> Self {
        Self {
            config,
            // All of the listing sites in this set run with certificate
            // problems of one kind or another.
            client: crate::sources::http_client(true),
            filter,
        }
    }

    fn listing_url(&self, now: NaiveDateTime) -> String {
        if self.config.date_from_query {
            let yesterday = (now - Duration::days(1)).format("%d.%m.%Y");
            format!("{}?dateFrom={}", self.config.base_url, yesterday)
        } else {
            self.config.base_url.clone()
        }
    }

    fn link_is_valid(&self, link: &str) -> bool {
        if INVALID_SCHEMES.iter().any(|s| link.starts_with(s)) {
            return false;
        }
        if INVALID_DOMAINS.iter().any(|d| link.contains(d)) {
            return false;
        }
        if self.config.same_host_only {
            let base_host = Url::parse(&self.config.base_url)
                .ok()
                .and_then(|u| u.host_str().map(str::to_string));
            let link_host = Url::parse(link)
                .ok()
                .and_then(|u| u.host_str().map(str::to_string));
            if base_host != link_host {
                return false;
            }
        }
        true
    }

    /// Pulls candidate links off the listing page. Runs the keyword filter on
    /// the link text here so that only relevant candidates cost an extra
    /// article-page request, and dedupes within the adapter.
    fn extract_candidates(&self, html: &str) -> Vec<Candidate> {
        let link_sel = match Selector::parse(&self.config.link_selector) {
            Ok(s) => s,
            Err(_) => return Vec::new(),
        };
        let base = match Url::parse(&self.config.base_url) {
            Ok(u) => u,
            Err(_) => return Vec::new(),
        };

        let document = Html::parse_document(html);
        let mut candidates: Vec<Candidate> = Vec::new();

        for element in document.select(&link_sel) {
            let title = element.text().collect::<String>().trim().to_string();
            if title.chars().count() < self.config.min_title_len {
                continue;
            }

            let href = match element.value().attr("href") {
                Some(h) => h,
                None => continue,
            };
            let link = match base.join(href) {
                Ok(u) => u.to_string(),
                Err(_) => continue,
            };

            if !self.link_is_valid(&link) {
                continue;
            }
            if !self.filter.matches(&title) {
                continue;
            }
            if candidates
                .iter()
                .any(|c| c.link == link || c.title == title)
            {
                continue;
            }

            candidates.push(Candidate { title, link });
        }

        candidates
    }

    fn article_date(&self, html: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
        let published = extract_article_date(html, self.config.date_rule, now)?;
        match self.config.utc_offset_hours {
            Some(offset) => Some(published + Duration::hours(offset)),
            None => Some(published),
        }
    }
}

fn select_first_text(document: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    document
        .select(&sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

fn select_first_attr(document: &Html, selector: &str, attr: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    document
        .select(&sel)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::to_string)
}

fn next_data_date(document: &Html) -> Option<NaiveDateTime> {
    let sel = Selector::parse(r#"script[id="__NEXT_DATA__"]"#).ok()?;
    let raw = document
        .select(&sel)
        .next()
        .map(|el| el.text().collect::<String>())?;
    let value: serde_json::Value = serde_json::from_str(&raw).ok()?;

    let date_str = value
        .pointer("/props/pageProps/post/date")
        .or_else(|| value.pointer("/props/pageProps/initialMatters/0/datePublished"))
        .and_then(|v| v.as_str())?;

    dates::parse_iso(date_str)
}

pub(crate) fn extract_article_date(
    html: &str,
    rule: DateRule,
    now: NaiveDateTime,
) -> Option<NaiveDateTime> {
    let document = Html::parse_document(html);

    match rule {
        DateRule::MetaOrTime => meta_or_time_date(&document),
        DateRule::MobileDateSpan => select_first_text(&document, "span.mobile-date")
            .and_then(|s| dates::parse_flexible(&s, now)),
        DateRule::NextDataJson => next_data_date(&document)
            .or_else(|| meta_or_time_date(&document))
            .or_else(|| {
                select_first_text(&document, r#"[class*="date"]"#)
                    .and_then(|s| dates::parse_russian(&s, now))
            }),
    }
}

fn meta_or_time_date(document: &Html) -> Option<NaiveDateTime> {
    select_first_attr(document, r#"meta[property="article:published_time"]"#, "content")
        .or_else(|| select_first_attr(document, r#"meta[property="pubdate"]"#, "content"))
        .and_then(|s| dates::parse_iso(&s))
        .or_else(|| {
            select_first_attr(document, "time[datetime]", "datetime")
                .and_then(|s| dates::parse_iso(&s))
        })
}

#[async_trait]
impl NewsSource for ListingSource {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn origin(&self) -> &str {
        &self.config.base_url
    }

    async fn fetch(&self) -> SvodkaResult<Vec<NewsItem>> {
        let now = dates::now_local();
        let url = self.listing_url(now);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let html = response.text().await?;
        let candidates = self.extract_candidates(&html);

        let mut items = Vec::new();
        for candidate in candidates {
            // One request per candidate; a failed article page only costs
            // that one item.
            let page = match self.client.get(&candidate.link).send().await {
                Ok(resp) => match resp.error_for_status() {
                    Ok(resp) => resp.text().await.unwrap_or_default(),
                    Err(e) => {
                        debug!(source = %self.config.name, link = %candidate.link, error = %e,
                            "article page rejected");
                        continue;
                    }
                },
                Err(e) => {
                    debug!(source = %self.config.name, link = %candidate.link, error = %e,
                        "article page unreachable");
                    continue;
                }
            };

            let published = match self.article_date(&page, now) {
                Some(dt) => dt,
                None => {
                    debug!(source = %self.config.name, link = %candidate.link,
                        "no publication date found");
                    continue;
                }
            };

            if crate::filter::is_recent(published, now) {
                items.push(NewsItem::new(
                    candidate.title,
                    candidate.link,
                    published,
                    &self.config.name,
                ));
            }
        }

        Ok(items)
    }
}
