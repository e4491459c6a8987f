mod common;

use std::sync::Arc;

use serde_json::json;
use shortfact_common::Verdict;
use shortfact_llm::checker::FactChecker;
use shortfact_llm::gemini::GeminiClient;
use shortfact_llm::traits::GroundedLlm;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "gemini-2.5-flash";

fn client_for(server: &MockServer) -> GeminiClient {
    GeminiClient::new("test-key".to_string(), MODEL.to_string())
        .expect("client builds")
        .with_base_url(server.uri())
}

fn grounded_body(text: &str, chunks: serde_json::Value) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }] },
            "finishReason": "STOP",
            "groundingMetadata": { "groundingChunks": chunks }
        }],
        "usageMetadata": { "totalTokenCount": 321 }
    })
}

#[tokio::test]
async fn success_decodes_text_and_grounding_chunks() {
    common::init_test_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/models/{MODEL}:generateContent")))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(json!({
            "tools": [{ "googleSearch": {} }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(grounded_body(
            "FACT: Confirmed by multiple sources.",
            json!([
                { "web": { "uri": "https://a.com", "title": "A" } },
                { "web": { "uri": "https://b.com", "title": "B" } },
                {}
            ]),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let reply = client
        .generate_grounded("is this a fact?")
        .await
        .expect("grounded generate succeeds");

    assert_eq!(reply.text, "FACT: Confirmed by multiple sources.");
    assert_eq!(reply.tokens_used, Some(321));
    assert_eq!(reply.citations.len(), 3);
    assert_eq!(reply.citations[0].uri.as_deref(), Some("https://a.com"));
    assert_eq!(reply.citations[1].title.as_deref(), Some("B"));
    // Chunk without a `web` record survives as an empty candidate; the
    // deduplicator is responsible for dropping it.
    assert!(reply.citations[2].uri.is_none());
}

#[tokio::test]
async fn multipart_reply_is_concatenated() {
    common::init_test_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/models/{MODEL}:generateContent")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "MYTH: first half " },
                    { "text": "and second half." }
                ]},
                "finishReason": "STOP"
            }]
        })))
        .mount(&server)
        .await;

    let reply = client_for(&server)
        .generate_grounded("claim")
        .await
        .expect("generate succeeds");
    assert_eq!(reply.text, "MYTH: first half and second half.");
    assert!(reply.citations.is_empty());
}

#[tokio::test]
async fn server_error_surfaces_after_exactly_one_attempt() {
    common::init_test_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/models/{MODEL}:generateContent")))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate_grounded("claim")
        .await
        .expect_err("500 must fail");
    assert!(err.to_string().contains("Gemini API error"));
    // `expect(1)` on the mock verifies no retry happened.
}

#[tokio::test]
async fn rate_limit_maps_to_specific_message() {
    common::init_test_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate_grounded("claim")
        .await
        .expect_err("429 must fail");
    assert!(err.to_string().contains("Rate limit exceeded"));
}

#[tokio::test]
async fn empty_candidate_list_is_an_error() {
    common::init_test_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate_grounded("claim")
        .await
        .expect_err("empty candidates must fail");
    assert!(err.to_string().contains("No candidates"));
}

#[tokio::test]
async fn checker_end_to_end_over_http() {
    common::init_test_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/models/{MODEL}:generateContent")))
        .respond_with(ResponseTemplate::new(200).set_body_json(grounded_body(
            "MYTH: Debunked repeatedly.",
            json!([
                { "web": { "uri": "https://a.com", "title": "A" } },
                { "web": { "uri": "https://a.com", "title": "A again" } },
                { "web": { "uri": "https://b.com", "title": "" } }
            ]),
        )))
        .mount(&server)
        .await;

    let checker = FactChecker::new(Arc::new(client_for(&server)));
    let request = shortfact_common::ClaimRequest::from_input(
        "https://youtube.com/shorts/xyz",
        "The earth is flat.",
    )
    .unwrap();

    let result = checker.check(&request).await.expect("check succeeds");
    assert_eq!(result.verdict, Verdict::Myth);
    assert_eq!(result.explanation, "Debunked repeatedly.");
    // Duplicate uri and blank title both dropped.
    assert_eq!(result.sources.len(), 1);
    assert_eq!(result.sources[0].title, "A");
}

#[tokio::test]
async fn transport_failure_maps_to_overload_message() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    let uri = server.uri();
    // Shut the server down so the request fails at the transport layer.
    drop(server);

    let checker = FactChecker::new(Arc::new(
        GeminiClient::new("test-key".to_string(), MODEL.to_string())
            .unwrap()
            .with_base_url(uri),
    ));
    let request =
        shortfact_common::ClaimRequest::from_input("https://youtube.com/shorts/x", "claim")
            .unwrap();

    let err = checker.check(&request).await.expect_err("must fail");
    assert_eq!(
        err.to_string(),
        "Failed to get a response from the AI service; it may be overloaded."
    );
}
