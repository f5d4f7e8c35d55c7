use std::collections::HashSet;

use chrono::NaiveDateTime;
use futures::future;
use tracing::{debug, error, warn};

use crate::domain::NewsItem;
use crate::sources::SourceRegistry;

/// Fans out to every registered source concurrently and folds the results
/// into one ordered, deduplicated list. Never fails as a whole: a source
/// error costs only that source's contribution, and an empty result simply
/// means "nothing new".
pub struct Aggregator {
    registry: SourceRegistry,
}

impl Aggregator {
    pub fn new(registry: SourceRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    pub async fn collect_all(&self) -> Vec<NewsItem> {
        let fetches = self.registry.sources().iter().map(|source| async move {
            (source.name().to_string(), source.fetch().await)
        });

        // Each fetch completes or fails on its own; nothing here cancels a
        // sibling task.
        let results = future::join_all(fetches).await;

        let mut merged = Vec::new();
        for (name, result) in results {
            match result {
                Ok(items) => {
                    debug!(source = %name, count = items.len(), "source contributed");
                    merged.extend(items);
                }
                Err(e) => {
                    error!(source = %name, error = %e, "source failed, skipping");
                }
            }
        }

        let ordered = sort_by_date(merged);
        dedupe(ordered)
    }
}

/// Re-validates each item's date string against the canonical format and
/// sorts ascending (oldest first). Items whose date drifted from the
/// convention are dropped here, whatever their adapter thought.
fn sort_by_date(items: Vec<NewsItem>) -> Vec<NewsItem> {
    let mut dated: Vec<(NaiveDateTime, NewsItem)> = Vec::with_capacity(items.len());
    for item in items {
        match item.published_at() {
            Some(dt) => dated.push((dt, item)),
            None => {
                warn!(title = %item.title, date = %item.date, "invalid date format, dropped");
            }
        }
    }

    dated.sort_by_key(|(dt, _)| *dt);
    dated.into_iter().map(|(_, item)| item).collect()
}

/// Keeps the first occurrence per link, then per title. The title pass
/// guards against the same story mirrored at different URLs.
fn dedupe(items: Vec<NewsItem>) -> Vec<NewsItem> {
    let mut seen_links = HashSet::new();
    let mut seen_titles = HashSet::new();

    items
        .into_iter()
        .filter(|item| {
            seen_links.insert(item.link.clone()) && seen_titles.insert(item.title.clone())
        })
        .collect()
}
