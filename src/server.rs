//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    response::{Json, Response},
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::assets::AssetLoader;
use crate::error::ApiError;
use crate::models::{AppConfig, Story, ThemeSettings};
use crate::services::{
    Analytics, CanvasRegistry, FileGameStore, GameStore, IllustrationService, ImageLoader,
    InMemoryGameStore, RenderOutcome,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub story: Arc<Story>,
    pub store: Arc<dyn GameStore>,
    pub illustrations: Arc<IllustrationService>,
    pub analytics: Analytics,
    pub default_theme: ThemeSettings,
}

/// Create application state from an asset loader.
///
/// Game states are kept in `save_dir` as JSON files when one is given,
/// otherwise in memory.
pub fn create_app_state(
    asset_loader: Arc<AssetLoader>,
    save_dir: Option<PathBuf>,
) -> anyhow::Result<AppState> {
    let config = AppConfig::load_from_assets(&asset_loader);
    let story = Arc::new(config.build_story());

    let store: Arc<dyn GameStore> = match save_dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "Persisting game states to disk");
            Arc::new(FileGameStore::new(dir))
        }
        None => Arc::new(InMemoryGameStore::new()),
    };

    let loader = Arc::new(
        ImageLoader::new(asset_loader)
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {e}"))?,
    );
    let illustrations = Arc::new(IllustrationService::new(
        loader,
        Arc::new(CanvasRegistry::new()),
    ));

    Ok(AppState {
        story,
        store,
        illustrations,
        analytics: Analytics::new(config.analytics.enabled),
        default_theme: config.theme,
    })
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Illustrations
        .route("/api/illustration", get(handle_illustration))
        .route(
            "/api/players/:player/illustration",
            post(handle_render_to_canvas),
        )
        .route("/api/players/:player/canvas", get(handle_canvas))
        // Theme
        .route("/api/theme", get(handle_theme))
        // Story and game flow
        .route("/api/story/:node", get(handle_story_node))
        .route(
            "/api/players/:player/game",
            get(handle_get_game).delete(handle_restart_game),
        )
        .route("/api/players/:player/choice", post(handle_choice))
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Add state and tracing
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

// Wrapper handlers to extract state components for the underlying API handlers.
// Query and body rejections go through ApiError so they get the JSON error shape.

async fn handle_illustration(
    State(state): State<AppState>,
    query: Result<Query<api::IllustrationQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    api::handle_illustration(State(state.illustrations), State(state.default_theme), query?).await
}

async fn handle_render_to_canvas(
    State(state): State<AppState>,
    path: Path<String>,
    body: Result<Json<api::RenderRequest>, JsonRejection>,
) -> Result<Json<RenderOutcome>, ApiError> {
    api::handle_render_to_canvas(
        State(state.illustrations),
        State(state.default_theme),
        path,
        body?,
    )
    .await
}

async fn handle_canvas(
    State(state): State<AppState>,
    path: Path<String>,
    query: Result<Query<api::CanvasQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    api::handle_canvas(State(state.illustrations), path, query?).await
}

async fn handle_theme(
    State(state): State<AppState>,
    query: Result<Query<api::theme::ThemeQuery>, QueryRejection>,
) -> Result<Json<api::ThemeResponse>, ApiError> {
    api::handle_theme(State(state.default_theme), query?).await
}

async fn handle_story_node(
    State(state): State<AppState>,
    path: Path<String>,
) -> Result<Json<crate::models::StoryNode>, ApiError> {
    api::handle_story_node(State(state.story), path).await
}

async fn handle_get_game(
    State(state): State<AppState>,
    path: Path<String>,
) -> Result<Json<api::GameResponse>, ApiError> {
    api::handle_get_game(
        State(state.story),
        State(state.store),
        State(state.analytics),
        path,
    )
    .await
}

async fn handle_restart_game(
    State(state): State<AppState>,
    path: Path<String>,
) -> Result<Json<api::GameResponse>, ApiError> {
    api::handle_restart_game(
        State(state.story),
        State(state.store),
        State(state.analytics),
        path,
    )
    .await
}

async fn handle_choice(
    State(state): State<AppState>,
    path: Path<String>,
    body: Result<Json<api::ChoiceRequest>, JsonRejection>,
) -> Result<Json<api::GameResponse>, ApiError> {
    api::handle_choice(
        State(state.story),
        State(state.store),
        State(state.analytics),
        path,
        body?,
    )
    .await
}
