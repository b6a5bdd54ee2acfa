mod common;

use common::{mount_feed, rss_feed, COOKIE};
use halo_engine::{list_datasets, parse_feed, FailureKind, FeedEntry, PortalClient, PortalSettings, Session};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn feed_entries_become_stubs_in_feed_order() {
    let server = MockServer::start().await;
    let feed = rss_feed(&[
        ("#42 | gamma_profile.nc", "https://portal.example/dataset/42-view"),
        ("#7 | alpha.nc", "https://portal.example/dataset/7-view"),
    ]);
    mount_feed(&server, "141", feed).await;

    let client = PortalClient::new(PortalSettings::with_base_url(server.uri())).unwrap();
    let session = Session::from_cookie(COOKIE);
    let stubs: Vec<_> = list_datasets(&client, &session, "141")
        .await
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(stubs.len(), 2);
    assert_eq!(stubs[0].dataset_id, "42");
    assert_eq!(stubs[0].filename, "gamma_profile.nc");
    assert_eq!(stubs[0].title, "#42 | gamma_profile.nc");
    assert_eq!(stubs[0].detail_url, "https://portal.example/dataset/42-view");
    assert_eq!(stubs[1].dataset_id, "7");
}

#[tokio::test]
async fn listing_again_fetches_a_fresh_feed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mission/5"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            rss_feed(&[("#1 | one.nc", "https://portal.example/dataset/1")]),
            "application/rss+xml",
        ))
        .expect(2)
        .mount(&server)
        .await;

    let client = PortalClient::new(PortalSettings::with_base_url(server.uri())).unwrap();
    let session = Session::from_cookie(COOKIE);

    let mut first = list_datasets(&client, &session, "5").await.unwrap();
    assert!(first.next().is_some());
    assert!(first.next().is_none());

    let second = list_datasets(&client, &session, "5").await.unwrap();
    assert_eq!(second.len(), 1);
}

#[tokio::test]
async fn malformed_title_is_an_error_not_a_skip() {
    let server = MockServer::start().await;
    let feed = rss_feed(&[
        ("#1 | one.nc", "https://portal.example/dataset/1"),
        ("Release notes", "https://portal.example/news/1"),
    ]);
    mount_feed(&server, "141", feed).await;

    let client = PortalClient::new(PortalSettings::with_base_url(server.uri())).unwrap();
    let session = Session::from_cookie(COOKIE);
    let results: Vec<_> = list_datasets(&client, &session, "141").await.unwrap().collect();

    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    let err = results[1].clone().unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedFeedEntry);
}

#[tokio::test]
async fn feed_http_error_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mission/141"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = PortalClient::new(PortalSettings::with_base_url(server.uri())).unwrap();
    let session = Session::from_cookie(COOKIE);
    let err = list_datasets(&client, &session, "141").await.unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(503));
}

#[test]
fn atom_feed_is_accepted() {
    let atom = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Mission</title>
  <id>urn:mission:141</id>
  <updated>2024-01-01T00:00:00Z</updated>
  <entry>
    <title>#7 | alpha.nc</title>
    <id>urn:dataset:7</id>
    <updated>2024-01-01T00:00:00Z</updated>
    <link href="https://portal.example/dataset/7"/>
  </entry>
</feed>"#;

    let entries = parse_feed(atom).unwrap();
    assert_eq!(
        entries,
        vec![FeedEntry {
            title: "#7 | alpha.nc".to_string(),
            link: Some("https://portal.example/dataset/7".to_string()),
        }]
    );
}

#[test]
fn unreadable_feed_is_a_parse_error() {
    let err = parse_feed("<html><body>Maintenance</body></html>").unwrap_err();
    assert_eq!(err.kind, FailureKind::FeedParse);
}
