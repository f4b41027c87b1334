//! Integration tests for page resolution and chart extraction.
//!
//! Each test stands up a `wiremock` server in place of the ratings site.
//! Unmatched requests get wiremock's default 404, which the client treats
//! as "page missing" and moves on to the next resolution attempt.

use chrono::NaiveDate;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use zap_core::{AppConfig, Category, ChartRequest, QueryFilter};
use zap_scraper::{RatingsClient, ScraperError};

const FINAL_PAGE: &str = include_str!("fixtures/final_2017_07_25.html");
const CABLE_PAGE: &str = include_str!("fixtures/cable_2017_07_25.html");
const SEARCH_LISTING: &str = include_str!("fixtures/search_results.html");

const FINAL_PATH: &str = "/daily-ratings/tuesday-final-ratings-july-25-2017/";
const CABLE_PATH: &str = "/daily-ratings/tuesday-cable-ratings-july-25-2017/";

/// Client pointed at `server`: no retries, no backoff.
fn test_client(server: &MockServer) -> RatingsClient {
    test_client_with_retries(server, 0)
}

fn test_client_with_retries(server: &MockServer, max_retries: u32) -> RatingsClient {
    let config = AppConfig {
        base_url: server.uri(),
        request_timeout_secs: 5,
        user_agent: "zap-test/0.1".to_owned(),
        max_retries,
        retry_backoff_base_secs: 0,
        ..AppConfig::default()
    };
    RatingsClient::new(&config).expect("failed to build test RatingsClient")
}

fn july_25() -> NaiveDate {
    NaiveDate::from_ymd_opt(2017, 7, 25).unwrap()
}

async fn serve(server: &MockServer, page_path: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

// ---------------------------------------------------------------------------
// Direct URL resolution
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_chart_resolves_direct_url() {
    let server = MockServer::start().await;
    serve(&server, FINAL_PATH, FINAL_PAGE).await;

    let client = test_client(&server);
    let result = client
        .fetch_chart(&ChartRequest::new(Category::Final, july_25()))
        .await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let chart = result.unwrap();
    assert_eq!(chart.len(), 10, "expected every show row");
    assert_eq!(chart.day, "Tuesday");
    assert_eq!(chart.date, "July 25 2017");
    assert!(chart.url.ends_with(FINAL_PATH));
    assert!(
        chart.iter().all(|e| e.viewers.value().is_some()
            && e.rating.value().is_some()
            && e.share.as_ref().and_then(|s| s.value()).is_some()),
        "expected all metrics numeric on the final chart"
    );
    assert!(
        chart
            .iter()
            .all(|e| !e.show.is_empty() && !e.network.is_empty() && !e.air_time.is_empty()),
        "expected every entry to carry show, network and air time"
    );
    assert_eq!(chart.get(1).map(|e| e.show.as_str()), Some("The Bachelorette"));
    assert!(chart.get(10).is_none());
}

#[tokio::test]
async fn fetch_chart_honours_limit() {
    let server = MockServer::start().await;
    serve(&server, FINAL_PATH, FINAL_PAGE).await;

    let client = test_client(&server);
    let request = ChartRequest::new(Category::Final, july_25()).with_limit(6);
    let chart = client.fetch_chart(&request).await.unwrap();

    assert_eq!(chart.len(), 6, "expected exactly the limit");
}

#[tokio::test]
async fn fetch_chart_applies_filters() {
    let server = MockServer::start().await;
    serve(&server, FINAL_PATH, FINAL_PAGE).await;

    let client = test_client(&server);
    let request = ChartRequest::new(Category::Final, july_25())
        .with_network(QueryFilter::new(["NBC"]))
        .with_show(QueryFilter::new(["talent", "night shift"]));
    let chart = client.fetch_chart(&request).await.unwrap();

    let shows = chart.iter().map(|e| e.show.as_str()).collect::<Vec<_>>();
    assert_eq!(shows, ["America's Got Talent", "The Night Shift"]);
}

#[tokio::test]
async fn resolve_falls_back_to_unshortened_month() {
    let server = MockServer::start().await;
    let august_page = FINAL_PAGE.replace("July 25, 2017", "August 1, 2017");
    let long_path = "/daily-ratings/tuesday-final-ratings-august-1-2017/";
    serve(&server, long_path, &august_page).await;

    let client = test_client(&server);
    let date = NaiveDate::from_ymd_opt(2017, 8, 1).unwrap();
    let result = client.resolve(Category::Final, date).await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    assert!(result.unwrap().url.ends_with(long_path));
}

#[tokio::test]
async fn fetch_cable_chart() {
    let server = MockServer::start().await;
    serve(&server, CABLE_PATH, CABLE_PAGE).await;

    let client = test_client(&server);
    let chart = client
        .fetch_chart(&ChartRequest::new(Category::Cable, july_25()))
        .await
        .unwrap();

    assert_eq!(chart.category, Category::Cable);
    assert_eq!(chart.len(), 7);
    assert!(chart.iter().all(|e| e.share.is_none()));
    assert!(
        (chart[0].viewers.value().unwrap() - 2.862).abs() < 1e-9,
        "expected cable viewers in millions"
    );
}

// ---------------------------------------------------------------------------
// Search fallback
// ---------------------------------------------------------------------------

#[tokio::test]
async fn resolve_falls_back_to_search() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("category", "daily-ratings"))
        .and(query_param("monthnum", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH_LISTING))
        .expect(1)
        .mount(&server)
        .await;
    serve(
        &server,
        "/daily-ratings/tuesday-final-ratings-july-25-2017-posted/",
        FINAL_PAGE,
    )
    .await;

    let client = test_client(&server);
    let result = client.resolve(Category::Final, july_25()).await;

    assert!(result.is_ok(), "expected Ok via search, got: {result:?}");
    let page = result.unwrap();
    assert!(page.url.ends_with("-posted/"), "unexpected url {}", page.url);
}

#[tokio::test]
async fn search_fallback_picks_cable_result_for_cable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH_LISTING))
        .mount(&server)
        .await;
    serve(
        &server,
        "/daily-ratings/tuesday-cable-ratings-july-25-2017-posted/",
        CABLE_PAGE,
    )
    .await;

    let client = test_client(&server);
    let chart = client
        .fetch_chart(&ChartRequest::new(Category::Cable, july_25()))
        .await
        .unwrap();

    assert!(chart.url.contains("cable"));
    assert_eq!(chart.len(), 7);
}

#[tokio::test]
async fn search_result_that_cannot_be_fetched_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH_LISTING))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.resolve(Category::Final, july_25()).await;

    assert!(
        matches!(result, Err(ScraperError::PageNotFound { .. })),
        "expected PageNotFound, got: {result:?}"
    );
}

#[tokio::test]
async fn search_result_with_malformed_link_is_not_found() {
    let server = MockServer::start().await;

    let listing = r#"<html><body>
        <div class="container container-small">
          <a rel="category tag" href="/category/daily-ratings/">Daily Ratings</a>
          <h2><a rel="bookmark" href="http://[broken/final/">Tuesday final ratings: July 25, 2017</a></h2>
          <time>July 26, 2017</time>
        </div>
        </body></html>"#;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.resolve(Category::Final, july_25()).await;

    assert!(
        matches!(result, Err(ScraperError::PageNotFound { .. })),
        "expected PageNotFound for an unusable search link, got: {result:?}"
    );
}

// ---------------------------------------------------------------------------
// Not found and errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn resolve_returns_page_not_found_when_nothing_matches() {
    let server = MockServer::start().await;

    let client = test_client(&server);
    let date = NaiveDate::from_ymd_opt(2027, 7, 27).unwrap();
    let result = client.resolve(Category::Final, date).await;

    match result {
        Err(ScraperError::PageNotFound { category, date }) => {
            assert_eq!(category, Category::Final);
            assert_eq!(date, "July 27 2027");
        }
        other => panic!("expected ScraperError::PageNotFound, got: {other:?}"),
    }
}

#[tokio::test]
async fn page_with_wrong_date_is_rejected() {
    let server = MockServer::start().await;
    let stale = FINAL_PAGE.replace("July 25, 2017", "July 18, 2017");
    serve(&server, FINAL_PATH, &stale).await;

    let client = test_client(&server);
    let result = client.resolve(Category::Final, july_25()).await;

    assert!(
        matches!(result, Err(ScraperError::PageNotFound { .. })),
        "expected title mismatch to fall through, got: {result:?}"
    );
}

#[tokio::test]
async fn server_error_is_reported_without_retries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FINAL_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.resolve(Category::Final, july_25()).await;

    match result {
        Err(ScraperError::UnexpectedStatus { status, url }) => {
            assert_eq!(status, 500);
            assert!(url.ends_with(FINAL_PATH));
        }
        other => panic!("expected ScraperError::UnexpectedStatus, got: {other:?}"),
    }
}

#[tokio::test]
async fn server_error_is_retried_and_recovers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FINAL_PATH))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    serve(&server, FINAL_PATH, FINAL_PAGE).await;

    let client = test_client_with_retries(&server, 1);
    let result = client
        .fetch_chart(&ChartRequest::new(Category::Final, july_25()))
        .await;

    assert!(result.is_ok(), "expected Ok after 503 retry, got: {result:?}");
    assert_eq!(result.unwrap().len(), 10);
}

// ---------------------------------------------------------------------------
// Network averages
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_network_averages_reads_five_networks() {
    let server = MockServer::start().await;
    serve(&server, FINAL_PATH, FINAL_PAGE).await;

    let client = test_client(&server);
    let averages = client
        .fetch_network_averages(Category::Final, july_25())
        .await
        .unwrap();

    assert_eq!(averages.len(), 5);
    for network in ["ABC", "CBS", "NBC", "FOX", "CW"] {
        assert!(averages.contains_key(network), "missing {network}");
    }
    assert_eq!(averages["ABC"].viewers.value(), Some(4.48));
}

#[tokio::test]
async fn fetch_network_averages_rejects_cable_without_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client
        .fetch_network_averages(Category::Cable, july_25())
        .await;

    assert!(
        matches!(result, Err(ScraperError::AveragesUnavailable(Category::Cable))),
        "expected AveragesUnavailable, got: {result:?}"
    );
}
