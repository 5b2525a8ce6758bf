//! Behavior-driven tests for the provider boundary.
//!
//! The Gemini adapter is exercised against a scripted transport, so every
//! scenario runs offline and deterministically.

use growthlens_tests::{
    query, scripted_gemini, validate, FetchRequest, FixtureAdapter, HttpError, HttpResponse,
    Provider, ProviderError, ProviderErrorKind, ProviderId,
};
use serde_json::json;

fn gemini_body(text: &str) -> String {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }] },
            "groundingMetadata": {
                "groundingChunks": [
                    { "web": { "uri": "https://example.test/filing", "title": "Annual Report" } },
                    { "web": { "uri": "https://example.test/untitled" } },
                    { "web": { "title": "no uri, must be dropped" } },
                ]
            }
        }]
    })
    .to_string()
}

// =============================================================================
// Gemini: successful responses
// =============================================================================

#[tokio::test]
async fn when_gemini_returns_clean_json_payload_validates_downstream() {
    let body = gemini_body(
        r#"{"stockPrice": 150.75, "fcfPerShare": 5.20, "wacc": 8.5, "currency": "USD"}"#,
    );
    let adapter = scripted_gemini(Ok(HttpResponse::ok_json(body)));

    let outcome = adapter
        .fetch(&FetchRequest::new(query("AAPL")))
        .await
        .expect("fetch must succeed");

    let record = validate(&outcome.data).expect("payload must validate");
    assert_eq!(record.stock_price, 150.75);
}

#[tokio::test]
async fn when_gemini_wraps_json_in_markdown_it_is_still_extracted() {
    let body = gemini_body(
        "```json\n{\"stockPrice\": 99.0, \"fcfPerShare\": 2.0, \"wacc\": 7.0, \"currency\": \"EUR\"}\n```",
    );
    let adapter = scripted_gemini(Ok(HttpResponse::ok_json(body)));

    let outcome = adapter
        .fetch(&FetchRequest::new(query("SAP")))
        .await
        .expect("fetch must succeed");

    assert_eq!(outcome.data["currency"], "EUR");
}

#[tokio::test]
async fn grounding_chunks_map_to_sources_with_defaults() {
    let body = gemini_body(r#"{"stockPrice": 1, "fcfPerShare": 1, "wacc": 1, "currency": "USD"}"#);
    let adapter = scripted_gemini(Ok(HttpResponse::ok_json(body)));

    let outcome = adapter
        .fetch(&FetchRequest::new(query("AAPL")))
        .await
        .expect("fetch must succeed");

    // The uri-less chunk is dropped; the title-less one gets a fallback.
    assert_eq!(outcome.sources.len(), 2);
    assert_eq!(outcome.sources[0].title, "Annual Report");
    assert_eq!(outcome.sources[1].title, "Untitled Source");
}

#[tokio::test]
async fn when_payload_has_null_values_the_raw_data_is_passed_through() {
    // The adapter does not validate; nulls reach the caller intact.
    let body = gemini_body(
        r#"{"stockPrice": 150.75, "fcfPerShare": null, "wacc": 8.5, "currency": "USD"}"#,
    );
    let adapter = scripted_gemini(Ok(HttpResponse::ok_json(body)));

    let outcome = adapter
        .fetch(&FetchRequest::new(query("AAPL")))
        .await
        .expect("fetch must succeed");

    assert!(outcome.data["fcfPerShare"].is_null());
    assert!(validate(&outcome.data).is_err());
}

// =============================================================================
// Gemini: failure classification
// =============================================================================

#[tokio::test]
async fn when_reply_is_conversational_error_carries_the_reply_text() {
    let body = gemini_body("I'm sorry, I could not find financial data for that company.");
    let adapter = scripted_gemini(Ok(HttpResponse::ok_json(body)));

    let error = adapter
        .fetch(&FetchRequest::new(query("NOTREAL")))
        .await
        .expect_err("must fail");

    assert_eq!(error.kind(), ProviderErrorKind::MalformedResponse);
    assert!(error.message().contains("could not find"));
    assert!(!error.retryable());
}

#[tokio::test]
async fn when_reply_text_is_empty_error_is_empty_response() {
    let body = gemini_body("");
    let adapter = scripted_gemini(Ok(HttpResponse::ok_json(body)));

    let error = adapter
        .fetch(&FetchRequest::new(query("AAPL")))
        .await
        .expect_err("must fail");

    assert_eq!(error.kind(), ProviderErrorKind::EmptyResponse);
}

#[tokio::test]
async fn when_response_has_no_candidates_error_is_empty_response() {
    let adapter = scripted_gemini(Ok(HttpResponse::ok_json(r#"{"candidates": []}"#)));

    let error = adapter
        .fetch(&FetchRequest::new(query("AAPL")))
        .await
        .expect_err("must fail");

    assert_eq!(error.kind(), ProviderErrorKind::EmptyResponse);
}

#[tokio::test]
async fn when_provider_rate_limits_error_is_retryable() {
    let adapter = scripted_gemini(Ok(HttpResponse::with_status(429, "quota exceeded")));

    let error = adapter
        .fetch(&FetchRequest::new(query("AAPL")))
        .await
        .expect_err("must fail");

    assert_eq!(error.kind(), ProviderErrorKind::RateLimited);
    assert!(error.retryable());
}

#[tokio::test]
async fn when_provider_returns_500_error_is_unavailable() {
    let adapter = scripted_gemini(Ok(HttpResponse::with_status(500, "internal error")));

    let error = adapter
        .fetch(&FetchRequest::new(query("AAPL")))
        .await
        .expect_err("must fail");

    assert_eq!(error.kind(), ProviderErrorKind::Unavailable);
    assert!(error.retryable());
}

#[tokio::test]
async fn when_transport_fails_error_is_unavailable() {
    let adapter = scripted_gemini(Err(HttpError::new("connection refused")));

    let error = adapter
        .fetch(&FetchRequest::new(query("AAPL")))
        .await
        .expect_err("must fail");

    assert_eq!(error.kind(), ProviderErrorKind::Unavailable);
    assert!(error.message().contains("connection refused"));
}

// =============================================================================
// Fixture provider
// =============================================================================

#[tokio::test]
async fn fixture_provider_serves_valid_deterministic_payloads() {
    let adapter = FixtureAdapter::new();
    assert_eq!(adapter.id(), ProviderId::Fixture);
    assert!(adapter.ready());

    let req = FetchRequest::new(query("Apple Inc."));
    let first = adapter.fetch(&req).await.expect("fetch must succeed");
    let second = adapter.fetch(&req).await.expect("fetch must succeed");

    assert_eq!(first, second);
    assert!(validate(&first.data).is_ok());
    assert_eq!(first.sources.len(), 1);
}

#[tokio::test]
async fn fixture_provider_supports_scripted_malformed_payloads() {
    let adapter = FixtureAdapter::with_payload(json!({ "stockPrice": 100 }));

    let outcome = adapter
        .fetch(&FetchRequest::new(query("AAPL")))
        .await
        .expect("fetch must succeed");

    let err = validate(&outcome.data).expect_err("payload must not validate");
    assert!(err.to_string().contains("fcfPerShare"));
}

#[tokio::test]
async fn fixture_provider_supports_scripted_outages() {
    let adapter = FixtureAdapter::failing(ProviderError::rate_limited("scripted quota"));

    let error = adapter
        .fetch(&FetchRequest::new(query("AAPL")))
        .await
        .expect_err("must fail");

    assert_eq!(error.kind(), ProviderErrorKind::RateLimited);
}
