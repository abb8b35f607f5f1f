//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

use valkyrie::assets::AssetLoader;
use valkyrie::server::{build_router, create_app_state, AppState};
use valkyrie::services::{CanvasRegistry, GameStore};

/// Test application with router and direct access to services
pub struct TestApp {
    router: axum::Router,
    pub store: Arc<dyn GameStore>,
    pub canvases: Arc<CanvasRegistry>,
}

impl TestApp {
    /// Create a new test application using embedded assets and in-memory saves
    pub fn new() -> Self {
        Self::from_state(Self::create_state(None, None))
    }

    /// Create a test application with external illustrations and save directories
    pub fn with_dirs(illustrations_dir: Option<PathBuf>, save_dir: Option<PathBuf>) -> Self {
        Self::from_state(Self::create_state(illustrations_dir, save_dir))
    }

    /// Create application state for custom router configuration
    pub fn create_state(illustrations_dir: Option<PathBuf>, save_dir: Option<PathBuf>) -> AppState {
        let asset_loader = Arc::new(AssetLoader::new(illustrations_dir, None));
        create_app_state(asset_loader, save_dir).expect("Failed to create app state")
    }

    fn from_state(state: AppState) -> Self {
        // Keep references for test assertions
        let store = state.store.clone();
        let canvases = state.illustrations.canvases().clone();

        // Build router using shared server module (same as production)
        let router = build_router(state);

        Self {
            router,
            store,
            canvases,
        }
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a DELETE request to the given path
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request(Request::delete(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> TestResponse {
        let request = Request::post(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.request(request).await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Make a choice and return the resulting game JSON
    pub async fn choose(&self, player: &str, choice: usize) -> serde_json::Value {
        let response = self
            .post_json(
                &format!("/api/players/{player}/choice"),
                &serde_json::json!({ "choice": choice }),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.text());
        response.json()
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Get raw body bytes
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Check if response is a PNG image
    pub fn is_png(&self) -> bool {
        self.body.len() >= 8 && &self.body[0..8] == b"\x89PNG\r\n\x1a\n"
    }

    /// Decode the PNG body
    pub fn image(&self) -> image::RgbaImage {
        image::load_from_memory(&self.body)
            .expect("Failed to decode PNG response")
            .into_rgba8()
    }
}
