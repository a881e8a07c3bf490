//! End-to-end crawl tests
//!
//! A mock server serves one playlist page at `/playlist` and answers
//! continuation requests at `/youtubei/v1/browse`, one mock per token.

use playlist_ripple::config::Config;
use playlist_ripple::crawler::{crawl_playlist, PlaylistCrawler};
use playlist_ripple::{ExtractionError, RippleError};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PLAYLIST_ID: &str = "PL123";
const API_KEY: &str = "test-api-key";

/// Creates a configuration pointing the pagination endpoint at the mock server
fn create_test_config(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.endpoints.browse_endpoint = format!("{}/youtubei/v1/browse", server.uri());
    config.http.timeout_secs = 5;
    config
}

fn playlist_url(server: &MockServer) -> String {
    format!("{}/playlist?list={}", server.uri(), PLAYLIST_ID)
}

fn video(id: &str, title: &str) -> Value {
    json!({
        "playlistVideoRenderer": {
            "videoId": id,
            "title": {"runs": [{"text": title}]}
        }
    })
}

fn continuation(token: &str) -> Value {
    json!({
        "continuationItemRenderer": {
            "continuationEndpoint": {
                "continuationCommand": {"token": token}
            }
        }
    })
}

fn context() -> Value {
    json!({"client": {"clientName": "WEB", "clientVersion": "2.20240101", "hl": "en"}})
}

/// Builds a playlist page whose renderer holds the given items
fn playlist_page(items: Vec<Value>) -> String {
    let initial_data = json!({
        "contents": {
            "twoColumnBrowseResultsRenderer": {
                "tabs": [{
                    "tabRenderer": {
                        "content": {
                            "sectionListRenderer": {
                                "contents": [{
                                    "itemSectionRenderer": {
                                        "contents": [{
                                            "playlistVideoListRenderer": {
                                                "playlistId": PLAYLIST_ID,
                                                "contents": items
                                            }
                                        }]
                                    }
                                }]
                            }
                        }
                    }
                }]
            }
        }
    });
    let site_config = json!({
        "INNERTUBE_API_KEY": API_KEY,
        "INNERTUBE_CONTEXT": context()
    });

    format!(
        "<!DOCTYPE html><html><head><title>Test playlist</title>\
         <script>ytcfg.set({{\"EXPERIMENT_FLAGS\": {{}}}});</script>\
         <script>ytcfg.set({});</script></head>\
         <body><script>var ytInitialData = {};</script></body></html>",
        site_config, initial_data
    )
}

fn continuation_response(items: Vec<Value>) -> Value {
    json!({
        "responseContext": {},
        "onResponseReceivedActions": [{
            "appendContinuationItemsAction": {
                "targetId": "playlist",
                "continuationItems": items
            }
        }]
    })
}

async fn mount_page(server: &MockServer, body: String) {
    Mock::given(method("GET"))
        .and(path("/playlist"))
        .and(query_param("list", PLAYLIST_ID))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

async fn mount_continuation(server: &MockServer, token: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/youtubei/v1/browse"))
        .and(body_partial_json(json!({"continuation": token})))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

fn titles(entries: &[playlist_ripple::VideoEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.title.as_str()).collect()
}

#[tokio::test]
async fn test_page_one_then_single_continuation() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        playlist_page(vec![
            video("v1", "First"),
            video("v2", "Second"),
            continuation("tok-1"),
        ]),
    )
    .await;
    mount_continuation(
        &server,
        "tok-1",
        ResponseTemplate::new(200).set_body_json(continuation_response(vec![video("v3", "Third")])),
    )
    .await;

    let crawler = PlaylistCrawler::new(create_test_config(&server), &playlist_url(&server))
        .expect("Failed to create crawler");
    let outcome = crawler.run().await.expect("Crawl failed");

    assert_eq!(titles(&outcome.entries), vec!["First", "Second", "Third"]);
    assert_eq!(
        outcome.entries[0].url,
        "https://www.youtube.com/watch?v=v1&list=PL123"
    );
    assert_eq!(
        outcome.entries[2].url,
        "https://www.youtube.com/watch?v=v3&list=PL123"
    );

    // Queue drained: every discovered token was consumed
    assert_eq!(outcome.stats.tokens_discovered, 1);
    assert_eq!(outcome.stats.tokens_consumed, 1);
    assert_eq!(outcome.stats.pages_fetched, 2);
    assert_eq!(outcome.stats.entries_collected, 3);
}

#[tokio::test]
async fn test_tokens_are_drained_in_discovery_order() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        playlist_page(vec![video("v1", "P1"), continuation("a")]),
    )
    .await;

    // "a" fans out into two tokens through a command executor
    mount_continuation(
        &server,
        "a",
        ResponseTemplate::new(200).set_body_json(continuation_response(vec![
            video("v2", "A1"),
            json!({
                "continuationItemRenderer": {
                    "continuationEndpoint": {
                        "commandExecutorCommand": {
                            "commands": [
                                {"continuationCommand": {"token": "b"}},
                                {"continuationCommand": {"token": "c"}}
                            ]
                        }
                    }
                }
            }),
        ])),
    )
    .await;
    mount_continuation(
        &server,
        "b",
        ResponseTemplate::new(200).set_body_json(json!({
            "onResponseReceivedEndpoints": [{
                "reloadContinuationItemsCommand": {
                    "continuationItems": [video("v3", "B1"), continuation("d")]
                }
            }]
        })),
    )
    .await;
    mount_continuation(
        &server,
        "c",
        ResponseTemplate::new(200).set_body_json(continuation_response(vec![video("v4", "C1")])),
    )
    .await;
    mount_continuation(
        &server,
        "d",
        ResponseTemplate::new(200).set_body_json(continuation_response(vec![video("v5", "D1")])),
    )
    .await;

    let outcome = PlaylistCrawler::new(create_test_config(&server), &playlist_url(&server))
        .expect("Failed to create crawler")
        .run()
        .await
        .expect("Crawl failed");

    assert_eq!(titles(&outcome.entries), vec!["P1", "A1", "B1", "C1", "D1"]);
    assert_eq!(outcome.stats.tokens_discovered, 4);
    assert_eq!(outcome.stats.tokens_consumed, 4);
}

#[tokio::test]
async fn test_continuation_request_carries_key_context_and_headers() {
    let server = MockServer::start().await;

    mount_page(&server, playlist_page(vec![continuation("tok-1")])).await;

    Mock::given(method("POST"))
        .and(path("/youtubei/v1/browse"))
        .and(query_param("key", API_KEY))
        .and(header("content-type", "application/json"))
        .and(header_exists("user-agent"))
        .and(header_exists("accept-language"))
        .and(body_partial_json(json!({
            "context": context(),
            "continuation": "tok-1"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(continuation_response(vec![video("v1", "Only")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let entries = crawl_playlist(create_test_config(&server), &playlist_url(&server))
        .await
        .expect("Crawl failed");

    assert_eq!(titles(&entries), vec!["Only"]);
}

#[tokio::test]
async fn test_continuation_server_error_aborts_crawl() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        playlist_page(vec![video("v1", "First"), continuation("tok-1")]),
    )
    .await;
    mount_continuation(
        &server,
        "tok-1",
        ResponseTemplate::new(200).set_body_json(continuation_response(vec![
            video("v2", "Second"),
            continuation("tok-2"),
        ])),
    )
    .await;
    mount_continuation(&server, "tok-2", ResponseTemplate::new(500)).await;

    let result = crawl_playlist(create_test_config(&server), &playlist_url(&server)).await;

    match result {
        Err(RippleError::Transport { message, .. }) => assert!(message.contains("500")),
        other => panic!("Expected transport error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_continuation_body_is_transport_error() {
    let server = MockServer::start().await;

    mount_page(&server, playlist_page(vec![continuation("tok-1")])).await;
    mount_continuation(
        &server,
        "tok-1",
        ResponseTemplate::new(200).set_body_string("<html>not json</html>"),
    )
    .await;

    let result = crawl_playlist(create_test_config(&server), &playlist_url(&server)).await;

    assert!(matches!(result, Err(RippleError::Transport { .. })));
}

#[tokio::test]
async fn test_continuation_without_append_action_yields_nothing() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        playlist_page(vec![video("v1", "First"), continuation("tok-1")]),
    )
    .await;
    mount_continuation(
        &server,
        "tok-1",
        ResponseTemplate::new(200).set_body_json(json!({
            "onResponseReceivedActions": [{"signalAction": {"signal": "DONE"}}]
        })),
    )
    .await;

    let entries = crawl_playlist(create_test_config(&server), &playlist_url(&server))
        .await
        .expect("Crawl failed");

    assert_eq!(titles(&entries), vec!["First"]);
}

#[tokio::test]
async fn test_playlist_page_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/playlist"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = crawl_playlist(create_test_config(&server), &playlist_url(&server)).await;

    assert!(matches!(result, Err(RippleError::Transport { .. })));
}

#[tokio::test]
async fn test_redirect_loop_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/playlist"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("location", format!("/playlist?list={}", PLAYLIST_ID).as_str()),
        )
        .mount(&server)
        .await;

    let result = crawl_playlist(create_test_config(&server), &playlist_url(&server)).await;

    assert!(matches!(result, Err(RippleError::Transport { .. })));
}

#[tokio::test]
async fn test_undecodable_page_body_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/playlist"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-encoding", "gzip")
                .set_body_bytes(b"definitely not gzip".to_vec()),
        )
        .mount(&server)
        .await;

    let result = crawl_playlist(create_test_config(&server), &playlist_url(&server)).await;

    assert!(matches!(result, Err(RippleError::Transport { .. })));
}

#[tokio::test]
async fn test_slow_playlist_page_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/playlist"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(playlist_page(vec![video("v1", "Late")]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let mut config = create_test_config(&server);
    config.http.timeout_secs = 1;

    let result = crawl_playlist(config, &playlist_url(&server)).await;

    match result {
        Err(RippleError::Transport { message, .. }) => assert_eq!(message, "Request timeout"),
        other => panic!("Expected timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_slow_continuation_times_out() {
    let server = MockServer::start().await;

    mount_page(&server, playlist_page(vec![continuation("tok-1")])).await;
    mount_continuation(
        &server,
        "tok-1",
        ResponseTemplate::new(200)
            .set_body_json(continuation_response(vec![video("v1", "Late")]))
            .set_delay(Duration::from_secs(3)),
    )
    .await;

    let mut config = create_test_config(&server);
    config.http.timeout_secs = 1;

    let result = crawl_playlist(config, &playlist_url(&server)).await;

    assert!(matches!(result, Err(RippleError::Transport { .. })));
}

#[tokio::test]
async fn test_page_without_initial_data() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "<html><body><script>var other = {};</script></body></html>".to_string(),
    )
    .await;

    let result = crawl_playlist(create_test_config(&server), &playlist_url(&server)).await;

    assert!(matches!(
        result,
        Err(RippleError::Extraction(ExtractionError::InitialDataNotFound))
    ));
}

#[tokio::test]
async fn test_page_without_site_config() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "<html><body><script>var ytInitialData = {\"contents\": {}};</script></body></html>"
            .to_string(),
    )
    .await;

    let result = crawl_playlist(create_test_config(&server), &playlist_url(&server)).await;

    assert!(matches!(
        result,
        Err(RippleError::Extraction(ExtractionError::SiteConfigNotFound))
    ));
}

#[tokio::test]
async fn test_page_without_renderer() {
    let server = MockServer::start().await;

    let page = playlist_page(vec![]).replace("playlistVideoListRenderer", "richGridRenderer");
    mount_page(&server, page).await;

    let result = crawl_playlist(create_test_config(&server), &playlist_url(&server)).await;

    assert!(matches!(
        result,
        Err(RippleError::Extraction(ExtractionError::RendererNotFound))
    ));
}

#[tokio::test]
async fn test_items_without_video_id_are_skipped() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        playlist_page(vec![
            json!({"playlistVideoRenderer": {"title": {"simpleText": "Deleted video"}}}),
            video("v1", "Kept"),
        ]),
    )
    .await;

    let outcome = PlaylistCrawler::new(create_test_config(&server), &playlist_url(&server))
        .expect("Failed to create crawler")
        .run()
        .await
        .expect("Crawl failed");

    assert_eq!(titles(&outcome.entries), vec!["Kept"]);
    assert_eq!(outcome.stats.items_skipped, 1);
}

#[tokio::test]
async fn test_empty_playlist_returns_no_entries() {
    let server = MockServer::start().await;

    mount_page(&server, playlist_page(vec![])).await;

    let entries = crawl_playlist(create_test_config(&server), &playlist_url(&server))
        .await
        .expect("Crawl failed");

    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_invalid_playlist_url() {
    let result = crawl_playlist(Config::default(), "https://x.test/channel/UC123").await;

    assert!(matches!(result, Err(RippleError::InvalidInput(_))));
}
