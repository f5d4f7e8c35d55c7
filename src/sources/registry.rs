use tracing::warn;

use crate::config::Config;
use crate::filter::RelevanceFilter;
use crate::sources::gorvesti::GorvestiSource;
use crate::sources::listing::{DateRule, ListingConfig, ListingSource};
use crate::sources::mtv::MtvSource;
use crate::sources::rss::RssSource;
use crate::sources::traits::NewsSource;
use crate::sources::vk::VkSource;

/// The polymorphic collection the aggregator fans out over. Adding or
/// removing a news site means touching only this constructor.
pub struct SourceRegistry {
    sources: Vec<Box<dyn NewsSource>>,
}

impl SourceRegistry {
    pub fn empty() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let filter = RelevanceFilter::from_config(config);
        let mut registry = Self::empty();

        registry.register(Box::new(RssSource::new(
            "bloknot-volgograd",
            "https://bloknot-volgograd.ru/rss_news.php",
            filter.clone(),
            false,
        )));
        registry.register(Box::new(RssSource::new(
            "riac34",
            "https://riac34.ru/rss/",
            filter.clone(),
            true,
        )));
        registry.register(Box::new(GorvestiSource::new(filter.clone())));
        registry.register(Box::new(MtvSource::new(filter.clone())));

        let mut v1 = ListingConfig::new("v1", "https://v1.ru/");
        v1.date_from_query = true;
        v1.same_host_only = true;
        registry.register(Box::new(ListingSource::new(v1, filter.clone())));

        let mut v102 = ListingConfig::new("v102", "https://v102.ru/");
        v102.date_rule = DateRule::MobileDateSpan;
        registry.register(Box::new(ListingSource::new(v102, filter.clone())));

        let mut kp = ListingConfig::new("volgograd-kp", "https://www.volgograd.kp.ru/online/");
        // The site reports UTC in its meta tags; Volgograd runs at UTC+3.
        kp.utc_offset_hours = Some(3);
        registry.register(Box::new(ListingSource::new(kp, filter.clone())));

        let mut vpravda = ListingConfig::new("vpravda", "https://vpravda.ru/");
        vpravda.date_from_query = true;
        registry.register(Box::new(ListingSource::new(vpravda, filter.clone())));

        let mut nv = ListingConfig::new("novostivolgograda", "https://novostivolgograda.ru/news");
        nv.link_selector = r#"a[href^="/news/"]"#.to_string();
        nv.date_rule = DateRule::NextDataJson;
        nv.min_title_len = 10;
        registry.register(Box::new(ListingSource::new(nv, filter.clone())));

        match &config.vk_token {
            Some(token) if !config.vk_groups.is_empty() => {
                registry.register(Box::new(VkSource::new(
                    token.clone(),
                    config.vk_groups.clone(),
                    filter,
                )));
            }
            Some(_) => warn!("VK_ACCESS_TOKEN set but VK_GROUPS is empty, skipping VK source"),
            None => warn!("VK_ACCESS_TOKEN not set, skipping VK source"),
        }

        registry
    }

    pub fn register(&mut self, source: Box<dyn NewsSource>) {
        self.sources.push(source);
    }

    pub fn sources(&self) -> &[Box<dyn NewsSource>] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
