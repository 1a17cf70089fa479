//! Sayak Client Integration Tests
//!
//! Tests for the HTTP provider including:
//! - Request envelope and percent-encoding on the wire
//! - Array and failure-envelope responses
//! - Timeouts, non-2xx answers and malformed bodies
//! - Word dumps and the ping check
//! - Write-through caching end to end

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::config::ServiceConfig;
use crate::core::spelling::protocol::{BatchOutcome, FailureReason, ServiceFailure};
use crate::core::spelling::provider::SuggestionProvider;
use crate::core::spelling::remote::SayakClient;
use crate::core::spelling::service::SpellingService;
use crate::core::spelling::word::{FontWord, UNICODE};

fn client_for(server: &MockServer, timeout_ms: u64) -> SayakClient {
    let base = server.uri();
    let config = ServiceConfig {
        remote_url: format!("{}/spelling", base),
        user_suggestion_url: format!("{}/mutation", base),
        ping_url: format!("{}/ping", base),
        timeout_ms,
        ..ServiceConfig::default()
    };
    SayakClient::new(config).unwrap()
}

// =============================================================================
// Spellcheck
// =============================================================================

#[tokio::test]
async fn test_request_is_encoded_and_response_decoded() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/spelling"))
        .and(body_partial_json(json!({
            "requestMethod": "spellcheck",
            "token": "",
            "spellParams": {
                "lang": "np",
                "words": [
                    { "wordText": "%E0%A4%95", "fontName": "UNICODE" },
                    { "wordText": "%2Ffd%2Ff%5D", "fontName": "PREETI" }
                ]
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "wordInfo": { "wordText": "%E0%A4%95", "fontName": "UNICODE" },
                "wrongWord": false,
                "suggestionsList": []
            },
            {
                "wordInfo": { "wordText": "%2Ffd%2Ff%5D", "fontName": "PREETI" },
                "wrongWord": true,
                "suggestionsList": ["%2Ffd", "%2Ffd+sf%5D"]
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 3000);
    let outcome = client
        .verify_batch(vec![FontWord::unicode("क"), FontWord::new("/fd/f]", "PREETI")])
        .await;

    let first = outcome.genuine_at(0).unwrap();
    assert_eq!(first.word_info.text, "क");
    assert!(first.is_correct_word());

    let second = outcome.genuine_at(1).unwrap();
    assert_eq!(second.word_info.text, "/fd/f]");
    assert!(!second.is_correct_word());
    assert_eq!(second.suggestions_list, vec!["/fd", "/fd sf]"]);
}

#[tokio::test]
async fn test_failure_envelope_is_classified() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/spelling"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "fail",
            "messageId": "REDIRECT_TO_SERVICE_RENEW",
            "message": "Your license has expired.",
            "@type": "SayakResponse"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, 3000);
    let outcome = client.verify_batch(vec![FontWord::unicode("क")]).await;

    let failure = outcome.failure().unwrap();
    assert_eq!(failure.reason, FailureReason::RedirectToServiceRenew);
    assert_eq!(failure.message, "Your license has expired.");
}

#[tokio::test]
async fn test_timeout_is_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/spelling"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_millis(1000)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, 100);
    let outcome = client.verify_batch(vec![FontWord::unicode("क")]).await;
    assert_eq!(outcome, BatchOutcome::ServiceFailure(ServiceFailure::unavailable()));
}

#[tokio::test]
async fn test_server_error_is_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/spelling"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = client_for(&server, 3000);
    let outcome = client.verify_batch(vec![FontWord::unicode("क")]).await;
    assert!(outcome.failure().unwrap().is_unavailable());
}

#[tokio::test]
async fn test_malformed_body_fails_open() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/spelling"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, 3000);
    let outcome = client.verify_batch(vec![FontWord::unicode("क")]).await;
    assert_eq!(outcome, BatchOutcome::Suggestions(Vec::new()));
}

// =============================================================================
// Word Dump and Ping
// =============================================================================

#[tokio::test]
async fn test_word_dump_posts_template() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/mutation"))
        .and(body_partial_json(json!({
            "@type": "SayakMutation",
            "actionName": "dumpPluginSuggestedWord",
            "data": {
                "wordPluginId": "fontconversion-9998",
                "hasUsedWordPlugin": {
                    "sameAs": "हिज्जे",
                    "disambiguatingDescription": "UNICODE"
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "message": "Word recorded"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 3000);
    let response = client.dump_word(FontWord::unicode("हिज्जे")).await;
    assert!(response.is_success());
    assert_eq!(response.message, "Word recorded");
}

#[tokio::test]
async fn test_ping_reflects_status() {
    let server = MockServer::start().await;
    let client = client_for(&server, 3000);

    // Unmatched requests get a 404
    assert!(!client.is_available().await);

    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    assert!(client.is_available().await);
}

// =============================================================================
// End to End
// =============================================================================

#[tokio::test]
async fn test_service_caches_remote_answers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/spelling"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "wordInfo": { "wordText": "%E0%A4%B0%E0%A4%BE%E0%A4%AE%E0%A4%B0%E0%A5%8B", "fontName": "UNICODE" },
                "wrongWord": true,
                "suggestionsList": ["%E0%A4%B0%E0%A4%BE%E0%A4%AE", "%E0%A4%B0%E0%A4%BE%E0%A4%AE%E0%A4%95%E0%A5%8B"]
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let service = SpellingService::new(Arc::new(client_for(&server, 3000)));

    assert!(!service.is_correct_word("रामरो", UNICODE).await.is_correct);
    assert!(!service.is_correct_word("रामरो", UNICODE).await.is_correct);
    assert_eq!(
        service.get_suggestions("रामरो", UNICODE).await,
        vec!["राम".to_string(), "रामको".to_string()]
    );
}
