//! Integration tests for `YouTubeClient` using wiremock HTTP mocks.

use streamwatch_youtube::{PollOutcome, YouTubeClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> YouTubeClient {
    YouTubeClient::with_base_url("test-key", 30, base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn search_live_returns_first_video_id() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "kind": "youtube#searchListResponse",
        "items": [
            {
                "id": { "kind": "youtube#video", "videoId": "abc123xyz00" },
                "snippet": { "title": "Morning stream" }
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("channelId", "UCtest"))
        .and(query_param("eventType", "live"))
        .and(query_param("type", "video"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let found = client.search_live("UCtest").await.expect("should parse");

    assert_eq!(found.as_deref(), Some("abc123xyz00"));
}

#[tokio::test]
async fn search_live_returns_none_on_empty_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "items": [] })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let found = client.search_live("UCtest").await.expect("should parse");

    assert!(found.is_none());
}

#[tokio::test]
async fn search_live_propagates_http_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.search_live("UCtest").await;

    assert!(result.is_err(), "a 5xx must surface as an error");
}

#[tokio::test]
async fn live_details_parses_string_viewer_count() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "items": [
            {
                "id": "abc123xyz00",
                "liveStreamingDetails": {
                    "actualStartTime": "2025-06-01T12:00:00Z",
                    "concurrentViewers": "4821"
                }
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("part", "liveStreamingDetails"))
        .and(query_param("id", "abc123xyz00"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let details = client
        .live_details("abc123xyz00")
        .await
        .expect("should parse");

    assert_eq!(
        PollOutcome::from_details(details.as_ref()),
        PollOutcome::Live { viewers: 4821 }
    );
}

#[tokio::test]
async fn live_details_reports_ended_stream() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "items": [
            {
                "id": "abc123xyz00",
                "liveStreamingDetails": {
                    "actualStartTime": "2025-06-01T12:00:00Z",
                    "actualEndTime": "2025-06-01T14:30:00Z"
                }
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let details = client
        .live_details("abc123xyz00")
        .await
        .expect("should parse");

    let ended = details.as_ref().expect("details should be present");
    assert!(ended.actual_end_time.is_some());
    assert_eq!(PollOutcome::from_details(details.as_ref()), PollOutcome::Ended);
}

#[tokio::test]
async fn live_details_returns_none_for_missing_video() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "items": [] })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let details = client.live_details("gone").await.expect("should parse");

    assert!(details.is_none());
    assert_eq!(PollOutcome::from_details(details.as_ref()), PollOutcome::NotLive);
}

#[tokio::test]
async fn live_details_rejects_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.live_details("abc").await;

    assert!(result.is_err(), "malformed body must surface as an error");
}
