use chrono::{Duration, Local};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use svodka::aggregator::Aggregator;
use svodka::filter::RelevanceFilter;
use svodka::sources::{RssSource, SourceRegistry};

fn filter() -> RelevanceFilter {
    RelevanceFilter::new(vec!["волгоград".to_string()], Vec::new())
}

fn feed_with_item(title: &str, link: &str, pub_date: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Лента</title>
    <item>
      <title>{title}</title>
      <link>{link}</link>
      <pubDate>{pub_date}</pubDate>
    </item>
  </channel>
</rss>"#
    )
}

async fn mount_feed(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/xml"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_one_failing_source_does_not_sink_the_rest() {
    let server = MockServer::start().await;
    let pub_date = (Local::now() - Duration::hours(2)).to_rfc2822();

    mount_feed(
        &server,
        "/good",
        feed_with_item(
            "Волгоград остался без света",
            "https://example.com/news/1",
            &pub_date,
        ),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/bad"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut registry = SourceRegistry::empty();
    registry.register(Box::new(RssSource::new(
        "good",
        format!("{}/good", server.uri()),
        filter(),
        false,
    )));
    registry.register(Box::new(RssSource::new(
        "bad",
        format!("{}/bad", server.uri()),
        filter(),
        false,
    )));

    let items = Aggregator::new(registry).collect_all().await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].source, "good");
}

#[tokio::test]
async fn test_same_link_across_sources_collapses_to_one() {
    let server = MockServer::start().await;
    let pub_date = (Local::now() - Duration::hours(2)).to_rfc2822();

    mount_feed(
        &server,
        "/a",
        feed_with_item(
            "Волгоград: первая редакция",
            "https://example.com/shared",
            &pub_date,
        ),
    )
    .await;
    mount_feed(
        &server,
        "/b",
        feed_with_item(
            "Волгоград: вторая редакция",
            "https://example.com/shared",
            &pub_date,
        ),
    )
    .await;

    let mut registry = SourceRegistry::empty();
    registry.register(Box::new(RssSource::new(
        "a",
        format!("{}/a", server.uri()),
        filter(),
        false,
    )));
    registry.register(Box::new(RssSource::new(
        "b",
        format!("{}/b", server.uri()),
        filter(),
        false,
    )));

    let items = Aggregator::new(registry).collect_all().await;
    assert_eq!(items.len(), 1);
}

#[tokio::test]
async fn test_merged_items_sorted_oldest_first() {
    let server = MockServer::start().await;
    let older = (Local::now() - Duration::hours(10)).to_rfc2822();
    let newer = (Local::now() - Duration::hours(1)).to_rfc2822();

    mount_feed(
        &server,
        "/newer",
        feed_with_item("Волгоград свежая", "https://example.com/n", &newer),
    )
    .await;
    mount_feed(
        &server,
        "/older",
        feed_with_item("Волгоград старая", "https://example.com/o", &older),
    )
    .await;

    let mut registry = SourceRegistry::empty();
    registry.register(Box::new(RssSource::new(
        "newer",
        format!("{}/newer", server.uri()),
        filter(),
        false,
    )));
    registry.register(Box::new(RssSource::new(
        "older",
        format!("{}/older", server.uri()),
        filter(),
        false,
    )));

    let items = Aggregator::new(registry).collect_all().await;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].title, "Волгоград старая");
    assert_eq!(items[1].title, "Волгоград свежая");
}
