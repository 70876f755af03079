//! Integration tests for the crawl engine
//!
//! These tests use wiremock to stand up mock HTTP servers and exercise
//! the full crawl cycle end-to-end: frontier traversal, scope filtering,
//! extraction, cross-page deduplication, limits, and cancellation.

use sitecomb::config::Config;
use sitecomb::events::ChannelSink;
use sitecomb::{CancelToken, CrawlSession, Crawler, ProgressEvent, SitecombError};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(max_pages: Option<u32>, max_level: Option<u32>) -> Config {
    let mut config = Config::default();
    config.crawler.max_pages = max_pages;
    config.crawler.max_level = max_level;
    config.crawler.request_delay_ms = 0;
    config.crawler.request_timeout_secs = 5;
    config
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<html><head><title>{}</title></head><body>{}</body></html>",
        title, body
    )
}

/// Runs a crawl against the mock server and drains the emitted events
async fn run_crawl(config: Config, seed: &str) -> (CrawlSession, Vec<ProgressEvent>) {
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let crawler = Crawler::new(config, Arc::new(ChannelSink::new(tx)), CancelToken::new())
        .expect("failed to build crawler");
    let session = crawler.run(seed).await.expect("crawl failed");

    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    (session, events)
}

fn done_event(events: &[ProgressEvent]) -> Option<&ProgressEvent> {
    events
        .iter()
        .find(|e| matches!(e, ProgressEvent::Done { .. }))
}

#[tokio::test]
async fn test_cross_page_phone_dedup() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        page(
            "首页",
            &format!(
                r#"<a href="{base}/a">A</a><a href="{base}/b">B</a>"#
            ),
        ),
    )
    .await;
    mount_page(
        &server,
        "/a",
        page("甲", "<p>联系电话 13800138000 或 13900139000</p>"),
    )
    .await;
    mount_page(
        &server,
        "/b",
        page("乙", "<p>联系电话 13800138000 或 13600136000</p>"),
    )
    .await;

    let (session, events) = run_crawl(test_config(None, None), &base).await;

    assert_eq!(session.page_count, 3);
    assert_eq!(session.total_phones(), 3);

    // First-occurrence-wins: page A claims both of its numbers, page B
    // only the one A did not already claim
    assert_eq!(session.page_results.len(), 2);
    let a = &session.page_results[0];
    assert_eq!(a.url.path(), "/a");
    assert_eq!(a.new_phones, vec!["13800138000", "13900139000"]);
    let b = &session.page_results[1];
    assert_eq!(b.url.path(), "/b");
    assert_eq!(b.new_phones, vec!["13600136000"]);
    assert_eq!(b.original_phones.len(), 2);

    match done_event(&events) {
        Some(ProgressEvent::Done { pages, phones, .. }) => {
            assert_eq!(*pages, 3);
            assert_eq!(*phones, 3);
        }
        other => panic!("expected done event, got {:?}", other),
    }
}

#[tokio::test]
async fn test_contact_dedup_across_pages() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        page(
            "首页",
            &format!(r#"<p>联系人：张三</p><a href="{base}/about">about</a>"#),
        ),
    )
    .await;
    mount_page(&server, "/about", page("关于", "<p>联系人：张三</p><p>负责人：李四</p>")).await;

    let (session, _) = run_crawl(test_config(None, None), &base).await;

    assert_eq!(session.total_contacts(), 2);
    assert_eq!(session.page_results[0].new_contacts, vec!["张三"]);
    assert_eq!(session.page_results[1].new_contacts, vec!["李四"]);
}

#[tokio::test]
async fn test_out_of_scope_links_not_followed() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        page(
            "首页",
            &format!(
                r#"<a href="{base}/y">same</a><a href="https://unrelated.example/z">other</a>"#
            ),
        ),
    )
    .await;
    mount_page(&server, "/y", page("y", "<p>nothing here</p>")).await;

    let (session, events) = run_crawl(test_config(None, None), &base).await;

    // Only the seed and the same-host link are fetched
    assert_eq!(session.page_count, 2);
    for event in &events {
        if let ProgressEvent::PageStart { url, .. } = event {
            assert!(url.starts_with(&base), "out-of-scope fetch: {}", url);
        }
    }
}

#[tokio::test]
async fn test_max_pages_bounds_traversal() {
    let server = MockServer::start().await;
    let base = server.uri();

    // A chain longer than the page limit
    for i in 0..10 {
        let route = if i == 0 {
            "/".to_string()
        } else {
            format!("/p{}", i)
        };
        let body = format!(r#"<a href="{base}/p{}">next</a>"#, i + 1);
        mount_page(&server, &route, page("链", &body)).await;
    }

    let (session, events) = run_crawl(test_config(Some(5), None), &base).await;

    assert_eq!(session.page_count, 5);
    assert!(done_event(&events).is_some());
}

#[tokio::test]
async fn test_cycle_fetched_once_per_url() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", page("a", &format!(r#"<a href="{base}/x">x</a>"#))).await;
    mount_page(&server, "/x", page("b", &format!(r#"<a href="{base}/">home</a>"#))).await;

    let (session, events) = run_crawl(test_config(None, None), &base).await;

    // Two URLs in a cycle: each fetched exactly once
    assert_eq!(session.page_count, 2);
    let starts = events
        .iter()
        .filter(|e| matches!(e, ProgressEvent::PageStart { .. }))
        .count();
    assert_eq!(starts, 2);
}

#[tokio::test]
async fn test_failed_fetch_is_skipped_not_counted() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        page(
            "首页",
            &format!(r#"<a href="{base}/missing">gone</a><a href="{base}/ok">ok</a>"#),
        ),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    mount_page(&server, "/ok", page("ok", "<p>电话 13800138000</p>")).await;

    let (session, events) = run_crawl(test_config(None, None), &base).await;

    // The 404 page is skipped and does not count toward page_count
    assert_eq!(session.page_count, 2);
    assert_eq!(session.total_phones(), 1);
    match done_event(&events) {
        Some(ProgressEvent::Done { pages, .. }) => assert_eq!(*pages, 2),
        other => panic!("expected done event, got {:?}", other),
    }
}

#[tokio::test]
async fn test_level_bound_prunes_descendants() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", page("根", &format!(r#"<a href="{base}/child">c</a>"#))).await;
    mount_page(&server, "/child", page("子", "<p>x</p>")).await;

    let (session, _) = run_crawl(test_config(None, Some(0)), &base).await;

    // max-level 0: only the seed itself is explored
    assert_eq!(session.page_count, 1);
}

#[tokio::test]
async fn test_site_title_captured_and_sanitized() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", page("四川测试公司 - 首页", "<p>欢迎</p>")).await;

    let (session, events) = run_crawl(test_config(None, None), &base).await;

    assert_eq!(session.site_title.as_deref(), Some("四川测试公司 首页"));
    assert!(events.iter().any(|e| matches!(
        e,
        ProgressEvent::SiteTitle { title } if title == "四川测试公司 首页"
    )));
}

#[tokio::test]
async fn test_pages_without_findings_produce_no_result() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", page("空", "<p>没有任何号码</p>")).await;

    let (session, _) = run_crawl(test_config(None, None), &base).await;

    assert_eq!(session.page_count, 1);
    assert!(session.page_results.is_empty());
}

#[tokio::test]
async fn test_cancelled_session_keeps_results_and_skips_done() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", page("首页", "<p>电话 13800138000</p>")).await;

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let cancel = CancelToken::new();
    cancel.cancel();

    let crawler = Crawler::new(
        test_config(None, None),
        Arc::new(ChannelSink::new(tx)),
        cancel,
    )
    .unwrap();
    let session = crawler.run(&base).await.unwrap();

    // Pre-cancelled: the loop never runs, results stay intact, no done
    assert_eq!(session.page_count, 0);
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    assert!(events
        .iter()
        .any(|e| matches!(e, ProgressEvent::Start { .. })));
    assert!(done_event(&events).is_none());
}

#[tokio::test]
async fn test_malformed_seed_fails_with_error_event() {
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let crawler = Crawler::new(
        test_config(None, None),
        Arc::new(ChannelSink::new(tx)),
        CancelToken::new(),
    )
    .unwrap();

    let result = crawler.run("not a url").await;
    assert!(matches!(result, Err(SitecombError::MalformedSeed { .. })));

    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    assert!(events
        .iter()
        .any(|e| matches!(e, ProgressEvent::Error { .. })));
}

#[tokio::test]
async fn test_filename_numbers_suppressed_end_to_end() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        page(
            "相册",
            r#"<img src="1583983093178085133.jpg"><p>1583983093178085133.jpg</p>"#,
        ),
    )
    .await;

    let (session, _) = run_crawl(test_config(None, None), &base).await;

    assert_eq!(session.total_phones(), 0);
    assert!(session.page_results.is_empty());
}
