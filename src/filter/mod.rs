use chrono::{Duration, NaiveDateTime};

use crate::config::Config;

/// One relevance policy shared by every source adapter: an item survives iff
/// its text contains at least one configured keyword and none of the excluded
/// keywords (case-insensitive substring match), and its publication time falls
/// inside the trailing 24-hour window.
#[derive(Debug, Clone)]
pub struct RelevanceFilter {
    keywords: Vec<String>,
    excluded: Vec<String>,
}

/// Trailing window within which an item's publication time must fall.
pub const RECENCY_HOURS: i64 = 24;

impl RelevanceFilter {
    pub fn new(keywords: Vec<String>, excluded: Vec<String>) -> Self {
        Self {
            keywords: keywords.into_iter().map(|k| k.to_lowercase()).collect(),
            excluded: excluded.into_iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.keywords.clone(), config.excluded_keywords.clone())
    }

    /// Keyword include/exclude check. An empty keyword list matches nothing.
    pub fn matches(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.keywords.iter().any(|k| lower.contains(k))
            && !self.excluded.iter().any(|k| lower.contains(k))
    }

    /// Full predicate over {text, timestamp}.
    pub fn accepts(&self, text: &str, published: NaiveDateTime, now: NaiveDateTime) -> bool {
        self.matches(text) && is_recent(published, now)
    }
}

/// The boundary is inclusive: an item published exactly 24 hours before `now`
/// is still retained.
pub fn is_recent(published: NaiveDateTime, now: NaiveDateTime) -> bool {
    published >= now - Duration::hours(RECENCY_HOURS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn filter(keywords: &[&str], excluded: &[&str]) -> RelevanceFilter {
        RelevanceFilter::new(
            keywords.iter().map(|s| s.to_string()).collect(),
            excluded.iter().map(|s| s.to_string()).collect(),
        )
    }

    fn dt(h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 4, 6)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let f = filter(&["волгоград"], &[]);
        assert!(f.matches("Волгоград отключили воду"));
        assert!(f.matches("в ВОЛГОГРАДЕ дождь"));
        assert!(!f.matches("в Москве дождь"));
    }

    #[test]
    fn test_excluded_keyword_drops_item() {
        let f = filter(&["волгоград"], &["отключили"]);
        assert!(!f.matches("Волгоград отключили воду"));
        assert!(f.matches("Волгоград включили воду"));
    }

    #[test]
    fn test_exclusion_case_insensitive() {
        let f = filter(&["news"], &["Spam"]);
        assert!(!f.matches("news about SPAM"));
    }

    #[test]
    fn test_empty_keyword_list_matches_nothing() {
        let f = filter(&[], &[]);
        assert!(!f.matches("любой текст"));
    }

    #[test]
    fn test_any_of_several_keywords_suffices() {
        let f = filter(&["вода", "свет"], &[]);
        assert!(f.matches("отключение света в районе"));
        assert!(f.matches("прорыв воды"));
        assert!(!f.matches("ремонт дороги"));
    }

    #[test]
    fn test_recency_boundary_inclusive() {
        let now = dt(12, 0);
        let exactly_24h = now - Duration::hours(24);
        assert!(is_recent(exactly_24h, now));
    }

    #[test]
    fn test_recency_just_past_boundary_dropped() {
        let now = dt(12, 0);
        let stale = now - Duration::hours(24) - Duration::minutes(1);
        assert!(!is_recent(stale, now));
    }

    #[test]
    fn test_accepts_combines_both_checks() {
        let f = filter(&["волгоград"], &[]);
        let now = dt(12, 0);
        let fresh = now - Duration::hours(2);
        let stale = now - Duration::hours(30);

        assert!(f.accepts("Волгоград сегодня", fresh, now));
        assert!(!f.accepts("Волгоград сегодня", stale, now));
        assert!(!f.accepts("Москва сегодня", fresh, now));
    }
}
