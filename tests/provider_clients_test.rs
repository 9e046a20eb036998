//! Integration tests for the provider clients against a mock server.
//!
//! Covers property discovery (domain resolution, fallbacks, skip-on-failure),
//! daily report parsing (bucket placement, row dropping, string metrics), and
//! the account detail lookups.

mod common;

use chrono::NaiveDate;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use beanc::core::http::default_client;
use beanc::core::window::TrailingWindow;
use beanc::providers::analytics::AnalyticsClient;
use beanc::providers::payments::PaymentsClient;

use common::fixtures;

fn analytics_client(server: &MockServer) -> AnalyticsClient {
    let base = server.uri();
    AnalyticsClient::with_bases(
        default_client().expect("client build"),
        base.clone(),
        base.clone(),
        base.clone(),
        base,
    )
}

fn payments_client(server: &MockServer) -> PaymentsClient {
    let base = server.uri();
    PaymentsClient::with_bases(default_client().expect("client build"), base.clone(), base)
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 28).unwrap()
}

// =============================================================================
// Property Discovery
// =============================================================================

#[tokio::test]
async fn discovery_strips_scheme_and_trailing_slash() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1beta/accountSummaries"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(fixtures::account_summaries(&[("123", "Shop")])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1beta/properties/123/dataStreams"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(fixtures::web_data_streams(Some("https://shop.example.com/"))),
        )
        .mount(&server)
        .await;

    let properties = analytics_client(&server)
        .list_properties("tok-1")
        .await
        .expect("discovery should succeed");

    assert_eq!(properties.len(), 1);
    assert_eq!(properties[0].id, "123");
    assert_eq!(properties[0].name, "Shop");
    assert_eq!(properties[0].domain, "shop.example.com");
}

#[tokio::test]
async fn discovery_falls_back_to_display_name_without_web_stream_uri() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1beta/accountSummaries"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(fixtures::account_summaries(&[("42", "My App")])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1beta/properties/42/dataStreams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::web_data_streams(None)))
        .mount(&server)
        .await;

    let properties = analytics_client(&server)
        .list_properties("tok-1")
        .await
        .expect("discovery should succeed");

    assert_eq!(properties[0].domain, "My App");
}

#[tokio::test]
async fn discovery_skips_property_whose_stream_lookup_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1beta/accountSummaries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::account_summaries(&[
            ("1", "Good"),
            ("2", "Broken"),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1beta/properties/1/dataStreams"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(fixtures::web_data_streams(Some("https://good.example.com"))),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1beta/properties/2/dataStreams"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let properties = analytics_client(&server)
        .list_properties("tok-1")
        .await
        .expect("discovery should succeed");

    assert_eq!(properties.len(), 1);
    assert_eq!(properties[0].name, "Good");
}

#[tokio::test]
async fn discovery_propagates_account_summaries_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1beta/accountSummaries"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&server)
        .await;

    let result = analytics_client(&server).list_properties("bad-token").await;
    assert!(result.is_err());
}

// =============================================================================
// Daily Reports
// =============================================================================

#[tokio::test]
async fn report_places_rows_in_matching_buckets() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/properties/123:runReport"))
        .and(body_partial_json(serde_json::json!({
            "dateRanges": [{ "startDate": "2026-08-21", "endDate": "2026-08-28" }],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::run_report(&[
            ("20260828", 10, "5.25"),
            ("20260826", 3, "0"),
        ])))
        .mount(&server)
        .await;

    let window = TrailingWindow::ending_at(today());
    let report = analytics_client(&server)
        .run_daily_report("tok-1", "123", &window)
        .await
        .expect("report should succeed");

    assert_eq!(report.daily.len(), 7);
    assert_eq!(report.daily[6].label, "Today");
    assert_eq!(report.daily[6].visitors, 10);
    assert_eq!(report.daily[6].revenue, 5.25);
    assert_eq!(report.daily[4].visitors, 3);
    assert_eq!(report.total_visitors, 13);
    assert_eq!(report.total_revenue, 5.25);
}

#[tokio::test]
async fn report_drops_rows_outside_the_window() {
    let server = MockServer::start().await;

    // 2026-08-21 is inside the request range but before the first bucket.
    Mock::given(method("POST"))
        .and(path("/v1beta/properties/123:runReport"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::run_report(&[
            ("20260821", 99, "99.99"),
            ("20260822", 7, "1.10"),
            ("not-a-date", 5, "2"),
        ])))
        .mount(&server)
        .await;

    let window = TrailingWindow::ending_at(today());
    let report = analytics_client(&server)
        .run_daily_report("tok-1", "123", &window)
        .await
        .expect("report should succeed");

    assert_eq!(report.total_visitors, 7);
    assert_eq!(report.total_revenue, 1.10);
    assert_eq!(report.daily[0].visitors, 7);
}

#[tokio::test]
async fn report_with_no_rows_keeps_zeroed_buckets() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/properties/123:runReport"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let window = TrailingWindow::ending_at(today());
    let report = analytics_client(&server)
        .run_daily_report("tok-1", "123", &window)
        .await
        .expect("report should succeed");

    assert_eq!(report.total_visitors, 0);
    assert_eq!(report.total_revenue, 0.0);
    assert_eq!(report.daily.len(), 7);
}

#[tokio::test]
async fn report_rounds_revenue_to_two_decimals() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/properties/123:runReport"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::run_report(&[
            ("20260827", 1, "0.104"),
            ("20260828", 1, "0.102"),
        ])))
        .mount(&server)
        .await;

    let window = TrailingWindow::ending_at(today());
    let report = analytics_client(&server)
        .run_daily_report("tok-1", "123", &window)
        .await
        .expect("report should succeed");

    assert_eq!(report.total_revenue, 0.21);
}

#[tokio::test]
async fn report_failure_propagates_as_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/properties/123:runReport"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&server)
        .await;

    let window = TrailingWindow::ending_at(today());
    let result = analytics_client(&server)
        .run_daily_report("tok-1", "123", &window)
        .await;

    assert!(result.is_err());
}

// =============================================================================
// Account Lookups
// =============================================================================

#[tokio::test]
async fn userinfo_resolves_account_email() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/oauth2/v2/userinfo"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::userinfo("a@example.com")))
        .mount(&server)
        .await;

    let email = analytics_client(&server)
        .fetch_user_email("tok-1")
        .await
        .expect("userinfo should succeed");
    assert_eq!(email, "a@example.com");
}

#[tokio::test]
async fn stripe_account_name_prefers_business_profile() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/accounts/acct_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::stripe_account(
            "acct_1",
            Some("owner@example.com"),
            Some("Acme Ltd"),
        )))
        .mount(&server)
        .await;

    let name = payments_client(&server)
        .fetch_account_name("sk_test", "acct_1")
        .await
        .expect("account lookup should succeed");
    assert_eq!(name, "Acme Ltd");
}

#[tokio::test]
async fn stripe_account_name_falls_back_to_email_then_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/accounts/acct_2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::stripe_account(
            "acct_2",
            Some("owner@example.com"),
            None,
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/accounts/acct_3"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(fixtures::stripe_account("acct_3", None, None)),
        )
        .mount(&server)
        .await;

    let client = payments_client(&server);
    assert_eq!(
        client.fetch_account_name("sk", "acct_2").await.unwrap(),
        "owner@example.com"
    );
    assert_eq!(
        client.fetch_account_name("sk", "acct_3").await.unwrap(),
        "acct_3"
    );
}
