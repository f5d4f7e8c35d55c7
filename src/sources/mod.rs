use std::time::Duration;

use reqwest::Client;

pub mod gorvesti;
pub mod listing;
pub mod mtv;
pub mod registry;
pub mod rss;
pub mod traits;
pub mod vk;

pub use gorvesti::GorvestiSource;
pub use listing::{DateRule, ListingConfig, ListingSource};
pub use mtv::MtvSource;
pub use registry::SourceRegistry;
pub use rss::RssSource;
pub use traits::NewsSource;
pub use vk::VkSource;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = "Mozilla/5.0";

/// Shared client construction. Certificate validation is disabled only for
/// the sources whose sites are known to serve broken chains; this is an
/// explicit per-source policy, not a blanket default.
pub(crate) fn http_client(accept_invalid_certs: bool) -> Client {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(USER_AGENT)
        .danger_accept_invalid_certs(accept_invalid_certs)
        .build()
        .unwrap_or_else(|_| Client::new())
}
