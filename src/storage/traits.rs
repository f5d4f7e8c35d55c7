use crate::domain::NewsItem;
use crate::errors::SvodkaResult;

/// A stored news row. `saved_at` is the insertion timestamp set by the
/// database, not the item's publication time.
#[derive(Debug, Clone)]
pub struct NewsRow {
    pub title: String,
    pub link: String,
    pub source: String,
    pub saved_at: String,
}

#[cfg_attr(test, mockall::automock)]
pub trait NewsRepository: Send + Sync {
    /// Insert-or-ignore keyed on `link`. Returns whether a new row was
    /// actually written.
    fn save(&self, item: &NewsItem) -> SvodkaResult<bool>;

    /// Most recently stored rows, newest first.
    fn recent(&self, limit: usize) -> SvodkaResult<Vec<NewsRow>>;
}

/// Persists a whole aggregation run; duplicates from earlier runs are
/// silently skipped. Returns the number of newly inserted rows.
pub fn save_all<R: NewsRepository + ?Sized>(
    repo: &R,
    items: &[NewsItem],
) -> SvodkaResult<usize> {
    let mut inserted = 0;
    for item in items {
        if repo.save(item)? {
            inserted += 1;
        }
    }
    Ok(inserted)
}
