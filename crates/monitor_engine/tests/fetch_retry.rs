use std::time::{Duration, Instant};

use monitor_engine::{FailureKind, FetchSettings, Fetcher, PageFetcher, RetryPolicy};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        backoff_unit: Duration::from_millis(5),
    }
}

#[tokio::test]
async fn fetch_returns_body_on_first_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html>ok</html>", "text/html; charset=utf-8"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = PageFetcher::new(FetchSettings::default(), fast_retry());
    let url = format!("{}/search", server.uri());

    let body = fetcher.fetch(&url).await.expect("fetch ok");
    assert_eq!(body, "<html>ok</html>");
}

#[tokio::test]
async fn fetch_sends_the_static_header_set() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(wiremock::matchers::header(
            "user-agent",
            "Mozilla/5.0 (compatible; ListingMonitor/1.0)",
        ))
        .and(wiremock::matchers::header_exists("accept"))
        .and(wiremock::matchers::header_exists("accept-language"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = PageFetcher::new(FetchSettings::default(), fast_retry());
    let url = format!("{}/search", server.uri());

    fetcher.fetch(&url).await.expect("headers matched");
}

#[tokio::test]
async fn fetch_retries_twice_then_succeeds_with_backoff() {
    let server = MockServer::start().await;
    // First two attempts fail, then the mock expires and the success
    // response takes over.
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("finally"))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = PageFetcher::new(FetchSettings::default(), fast_retry());
    let url = format!("{}/search", server.uri());

    let started = Instant::now();
    let body = fetcher.fetch(&url).await.expect("third attempt succeeds");
    assert_eq!(body, "finally");

    // Two backoffs: 2 units after attempt 1, 4 units after attempt 2.
    assert!(started.elapsed() >= Duration::from_millis(30));
}

#[tokio::test]
async fn fetch_fails_after_exhausting_attempts_with_last_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let fetcher = PageFetcher::new(FetchSettings::default(), fast_retry());
    let url = format!("{}/search", server.uri());

    let err = fetcher.fetch(&url).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(503));
}

#[tokio::test]
async fn fetch_rejects_an_unparseable_url_without_any_request() {
    let fetcher = PageFetcher::new(FetchSettings::default(), fast_retry());

    let err = fetcher.fetch("not a url").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}
