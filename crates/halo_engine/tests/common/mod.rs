#![allow(dead_code)]

use std::sync::Mutex;

use halo_engine::{Credentials, EngineEvent, ProgressSink};
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const COOKIE: &str = "halo_session=abc123";

pub fn credentials() -> Credentials {
    Credentials::new()
        .with_field("username", "alice")
        .with_field("password", "secret")
}

pub async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("password=secret&username=alice"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("Location", "/")
                .insert_header("Set-Cookie", format!("{COOKIE}; Path=/; HttpOnly").as_str()),
        )
        .mount(server)
        .await;
}

/// RSS document with one item per `(title, link)`.
pub fn rss_feed(items: &[(&str, &str)]) -> String {
    let items: String = items
        .iter()
        .map(|(title, link)| {
            format!("<item><title>{title}</title><link>{link}</link></item>")
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel>
<title>Mission</title><link>https://portal.example/</link><description>datasets</description>
{items}
</channel></rss>"#
    )
}

pub async fn mount_feed(server: &MockServer, mission_id: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(format!("/mission/{mission_id}")))
        .and(query_param("format", "rss"))
        .and(header("cookie", COOKIE))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/rss+xml"))
        .mount(server)
        .await;
}

/// Dataset page with a releases table; rows are `(release, href)`, newest first.
pub fn releases_page(rows: &[(&str, Option<&str>)]) -> String {
    let body: String = rows
        .iter()
        .map(|(release, href)| {
            let link = href
                .map(|href| format!(r#"<a href="{href}">download</a>"#))
                .unwrap_or_default();
            format!("<tr><td>{release}</td><td>2024-01-01</td><td>notes</td><td>{link}</td></tr>")
        })
        .collect();
    format!(
        r#"<html><head><title>Dataset</title></head><body>
<div id="summary"><table><tr><th>Key</th></tr><tr><td>x</td></tr></table></div>
<div id="releases"><table>
<tr><th>Release</th><th>Date</th><th>Notes</th><th>File</th></tr>
{body}
</table></div></body></html>"#
    )
}

pub async fn mount_dataset_page(server: &MockServer, dataset_id: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(format!("/dataset/{dataset_id}")))
        .and(header("cookie", COOKIE))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8"))
        .mount(server)
        .await;
}

pub async fn mount_file(server: &MockServer, file_path: &str, body: &[u8], expected_hits: u64) {
    Mock::given(method("GET"))
        .and(path(file_path))
        .and(header("cookie", COOKIE))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(body.to_vec(), "application/octet-stream"),
        )
        .expect(expected_hits)
        .mount(server)
        .await;
}

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<EngineEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl ProgressSink for RecordingSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}
