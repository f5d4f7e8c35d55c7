use async_trait::async_trait;

use crate::domain::NewsItem;
use crate::errors::SvodkaResult;

/// The one capability every source adapter exposes: fetch candidate items,
/// already normalized, keyword-filtered and clamped to the recency window.
///
/// A network or parse failure that kills the whole adapter run surfaces as
/// `Err`; the aggregator absorbs it so that one source never takes down the
/// others. Failures of individual items (missing field, unparseable date) are
/// handled inside the adapter by skipping the item.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Short identifier used in logs and the `source` DB column.
    fn name(&self) -> &str;

    /// The site or API this adapter reads from.
    fn origin(&self) -> &str;

    async fn fetch(&self) -> SvodkaResult<Vec<NewsItem>>;
}
