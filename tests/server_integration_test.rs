//! Server integration tests that test the actual server behavior.
//!
//! These tests start a real TCP server and talk to it over HTTP.

use std::sync::Arc;

use valkyrie::assets::AssetLoader;
use valkyrie::server::{build_router, create_app_state};

/// Start a test server on an available port and return the port number.
async fn start_test_server() -> u16 {
    let asset_loader = Arc::new(AssetLoader::new(None, None));
    let state = create_app_state(asset_loader, None).expect("Failed to create app state");
    let app = build_router(state);

    // Bind to port 0 to get an available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    // Give the server a moment to start
    tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

    port
}

#[tokio::test]
async fn test_health_over_tcp() {
    let port = start_test_server().await;
    let body = reqwest::get(format!("http://127.0.0.1:{port}/health"))
        .await
        .expect("Request failed")
        .text()
        .await
        .unwrap();
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn test_illustration_over_tcp() {
    let port = start_test_server().await;
    let response = reqwest::get(format!(
        "http://127.0.0.1:{port}/api/illustration?src=office.png&preview=true"
    ))
    .await
    .expect("Request failed");

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "image/png");
    let bytes = response.bytes().await.unwrap();
    let img = image::load_from_memory(&bytes).unwrap();
    assert_eq!((img.width(), img.height()), (200, 150));
}

#[tokio::test]
async fn test_server_renders_its_own_output() {
    // One server's PNG is a valid remote source for another render
    let port = start_test_server().await;
    let source = format!("http://127.0.0.1:{port}/api/illustration?src=arena.png");
    let url = reqwest::Url::parse_with_params(
        &format!("http://127.0.0.1:{port}/api/illustration"),
        &[("src", source.as_str()), ("color", "apple")],
    )
    .unwrap();

    let response = reqwest::get(url).await.expect("Request failed");
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let img = image::load_from_memory(&response.bytes().await.unwrap())
        .unwrap()
        .into_rgba8();
    assert!(img
        .pixels()
        .all(|p| matches!([p[0], p[1], p[2]], [0, 0, 0] | [0, 255, 65])));
}
