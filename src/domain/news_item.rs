use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::dates;

/// A single normalized news item as produced by a source adapter. Lives only
/// for the duration of one aggregation run; the SQLite store keeps its own
/// copy keyed on `link`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    /// Publication time in the canonical `%d.%m.%y %H:%M` convention.
    pub date: String,
    /// Name of the adapter that produced the item.
    pub source: String,
}

impl NewsItem {
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        published: NaiveDateTime,
        source: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            date: dates::format_canonical(published),
            source: source.into(),
        }
    }

    /// Parses the canonical date string back. `None` means the item drifted
    /// from the convention and must not survive aggregation.
    pub fn published_at(&self) -> Option<NaiveDateTime> {
        dates::parse_canonical(&self.date)
    }
}
