//! Integration tests for the HTTP character provider against a loopback server
//!
//! These tests verify:
//! - The feed is requested at `{base}data/data.json` and decoded in order
//! - Non-success statuses, malformed bodies and unreachable hosts are errors
//! - `load_characters` degrades every failure to an empty list
//! - Fetched entries map onto slides (link and image source)

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use character_carousel::services::{
    CharacterSource, FetchError, HttpCharacterProvider, load_characters,
};
use character_carousel::ui::{ElementIds, PageModel};
use character_carousel::{CarouselMetrics, CharacterEntry};
use serde_json::json;
use std::sync::atomic::Ordering;

/// Serve `app` on an ephemeral loopback port and return its base URL.
async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/", addr)
}

fn feed_app() -> Router {
    Router::new().route(
        "/data/data.json",
        get(|| async {
            axum::Json(json!([
                { "name": "Goku", "url": "https://x", "img": "img/goku.png" },
                { "name": "Vegeta", "url": "https://y", "img": "img/vegeta.png" },
                { "name": "Piccolo", "url": "https://z", "img": "img/piccolo.png" }
            ]))
        }),
    )
}

#[tokio::test]
async fn test_fetch_preserves_feed_order() {
    let base_url = serve(feed_app()).await;
    let provider = HttpCharacterProvider::new().unwrap();

    let characters = provider.fetch(&base_url).await.unwrap();

    let names: Vec<_> = characters.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Goku", "Vegeta", "Piccolo"]);
}

#[tokio::test]
async fn test_non_success_status() {
    let app = Router::new().route(
        "/data/data.json",
        get(|| async { (StatusCode::NOT_FOUND, "missing") }),
    );
    let base_url = serve(app).await;
    let provider = HttpCharacterProvider::new().unwrap();

    let result = provider.fetch(&base_url).await;

    match result {
        Err(FetchError::Status { status, url }) => {
            assert_eq!(status.as_u16(), 404);
            assert!(url.ends_with("/data/data.json"));
        }
        other => panic!("Expected status error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body() {
    let app = Router::new().route(
        "/data/data.json",
        get(|| async { axum::Json(json!({ "characters": [] })) }),
    );
    let base_url = serve(app).await;
    let provider = HttpCharacterProvider::new().unwrap();

    let result = provider.fetch(&base_url).await;
    assert!(
        matches!(result, Err(FetchError::Decode { .. })),
        "Expected decode error, got: {:?}",
        result
    );
}

#[tokio::test]
async fn test_unreachable_host() {
    // Reserve a port, then free it so nothing is listening
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let provider = HttpCharacterProvider::new().unwrap();
    let result = provider.fetch(&format!("http://{}/", addr)).await;

    assert!(matches!(result, Err(FetchError::Transport { .. })));
}

#[tokio::test]
async fn test_load_characters_degrades_to_empty() {
    let app = Router::new().route(
        "/data/data.json",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base_url = serve(app).await;
    let provider = HttpCharacterProvider::new().unwrap();
    let metrics = CarouselMetrics::new();

    let characters = load_characters(&provider, &base_url, &metrics).await;
    assert!(characters.is_empty());
    assert_eq!(metrics.fetch_failures.load(Ordering::Relaxed), 1);

    // The page still renders its chrome with no slides
    let ids = ElementIds::new();
    let page = PageModel::build(&characters, &base_url, "https://repo.test", &ids);
    let html = page.render();
    assert!(page.handles().slides.is_empty());
    assert!(html.contains("Latest DBZ Characters"));
    assert!(!html.contains("<li"));
}

#[tokio::test]
async fn test_load_characters_passes_through_success() {
    let base_url = serve(feed_app()).await;
    let provider = HttpCharacterProvider::new().unwrap();
    let metrics = CarouselMetrics::new();

    let characters = load_characters(&provider, &base_url, &metrics).await;

    assert_eq!(characters.len(), 3);
    assert_eq!(metrics.fetch_failures.load(Ordering::Relaxed), 0);
}

/// Source that never succeeds, for exercising the degrade path without I/O.
struct FailingSource;

impl CharacterSource for FailingSource {
    async fn fetch(&self, _base_url: &str) -> Result<Vec<CharacterEntry>, FetchError> {
        Err(FetchError::EmptyBaseUrl)
    }
}

#[tokio::test]
async fn test_custom_source_failure_is_contained() {
    let metrics = CarouselMetrics::new();
    let characters = load_characters(&FailingSource, "https://dbz.test/", &metrics).await;

    assert!(characters.is_empty());
    assert_eq!(metrics.fetch_failures.load(Ordering::Relaxed), 1);
}

#[test]
fn test_round_trip_mapping() {
    let entry = CharacterEntry {
        name: "Goku".to_string(),
        url: "https://x".to_string(),
        img: "/goku.png".to_string(),
    };
    let ids = ElementIds::new();

    let page = PageModel::build(&[entry], "https://dbz.test", "https://repo.test", &ids);
    let slide = &page.slides[0];

    assert_eq!(slide.href, "https://x");
    assert_eq!(slide.image_src, "https://dbz.test/goku.png");
    assert!(page.render().contains("src=\"https://dbz.test/goku.png\""));
}
