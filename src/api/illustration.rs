use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use hires_filter::PixelBuffer;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::error::{ApiError, RenderError};
use crate::models::{BackgroundTheme, ColorScheme, ThemeSettings};
use crate::rendering::{encode_frame, FrameSize};
use crate::services::{is_valid_player_id, CanvasState, IllustrationService, RenderOutcome};

/// Error body shared by all JSON error responses
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// HTTP status code
    pub status: u16,
    /// Error message
    pub error: String,
}

/// Query parameters for the one-shot illustration endpoint
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IllustrationQuery {
    /// Image URL (http/https) or path relative to the illustrations directory
    pub src: String,
    /// Background theme (defaults to the configured theme)
    pub background: Option<BackgroundTheme>,
    /// Color scheme (defaults to the configured theme)
    pub color: Option<ColorScheme>,
    /// Return the 200x150 on-screen view instead of the full frame
    #[serde(default)]
    pub preview: bool,
}

/// Request body for rendering into a player's canvas
#[derive(Debug, Deserialize, ToSchema)]
pub struct RenderRequest {
    pub src: String,
    pub background: Option<BackgroundTheme>,
    pub color: Option<ColorScheme>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CanvasQuery {
    /// Return the 200x150 on-screen view instead of the full frame
    #[serde(default)]
    pub preview: bool,
}

pub(crate) fn resolve_theme(
    default: ThemeSettings,
    background: Option<BackgroundTheme>,
    color: Option<ColorScheme>,
) -> ThemeSettings {
    ThemeSettings {
        background: background.unwrap_or(default.background),
        color: color.unwrap_or(default.color),
    }
}

pub(crate) fn check_player(player: &str) -> Result<(), ApiError> {
    if is_valid_player_id(player) {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!("Invalid player id: {player:?}")))
    }
}

async fn encode_blocking(frame: Arc<PixelBuffer>, size: FrameSize) -> Result<Vec<u8>, ApiError> {
    let bytes = tokio::task::spawn_blocking(move || encode_frame(&frame, size))
        .await
        .map_err(|e| RenderError::Task(e.to_string()))??;
    Ok(bytes)
}

fn png_response(png_bytes: Vec<u8>, invocation: Option<u64>) -> Response {
    let mut response = (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (header::CONTENT_LENGTH, png_bytes.len().to_string()),
        ],
        Bytes::from(png_bytes),
    )
        .into_response();
    if let Some(invocation) = invocation {
        response
            .headers_mut()
            .insert("x-invocation", invocation.into());
    }
    response
}

/// Render an illustration
///
/// Loads the image, stylizes it with the requested theme and returns the
/// frame as PNG. Nothing is stored.
#[utoipa::path(
    get,
    path = "/api/illustration",
    params(IllustrationQuery),
    responses(
        (status = 200, description = "Stylized PNG", content_type = "image/png"),
        (status = 502, description = "Image could not be loaded", body = ErrorResponse),
    ),
    tag = "Illustration"
)]
pub async fn handle_illustration(
    State(service): State<Arc<IllustrationService>>,
    State(default_theme): State<ThemeSettings>,
    Query(query): Query<IllustrationQuery>,
) -> Result<Response, ApiError> {
    let theme = resolve_theme(default_theme, query.background, query.color);
    let frame = service.render(&query.src, theme).await?;
    let bytes = encode_blocking(Arc::new(frame), FrameSize::from_preview_flag(query.preview)).await?;
    Ok(png_response(bytes, None))
}

/// Render an illustration into a player's canvas
///
/// Starts a new invocation on the canvas, superseding any render still in
/// flight. A failed load leaves the canvas in an error state.
#[utoipa::path(
    post,
    path = "/api/players/{player}/illustration",
    params(("player" = String, Path, description = "Player id")),
    request_body = RenderRequest,
    responses(
        (status = 200, description = "Render finished", body = RenderOutcome),
        (status = 400, description = "Invalid player id", body = ErrorResponse),
    ),
    tag = "Illustration"
)]
pub async fn handle_render_to_canvas(
    State(service): State<Arc<IllustrationService>>,
    State(default_theme): State<ThemeSettings>,
    Path(player): Path<String>,
    Json(request): Json<RenderRequest>,
) -> Result<Json<RenderOutcome>, ApiError> {
    check_player(&player)?;
    let theme = resolve_theme(default_theme, request.background, request.color);
    let outcome = service.render_to_canvas(&player, &request.src, theme).await;
    Ok(Json(outcome))
}

/// Get a player's canvas
///
/// Returns the current frame as PNG, or the canvas state as a JSON error.
#[utoipa::path(
    get,
    path = "/api/players/{player}/canvas",
    params(("player" = String, Path, description = "Player id"), CanvasQuery),
    responses(
        (status = 200, description = "Current frame", content_type = "image/png"),
        (status = 404, description = "Nothing rendered yet", body = ErrorResponse),
        (status = 409, description = "Render in progress", body = ErrorResponse),
        (status = 502, description = "Last render failed", body = ErrorResponse),
    ),
    tag = "Illustration"
)]
pub async fn handle_canvas(
    State(service): State<Arc<IllustrationService>>,
    Path(player): Path<String>,
    Query(query): Query<CanvasQuery>,
) -> Result<Response, ApiError> {
    check_player(&player)?;
    let canvas = service
        .canvases()
        .get(&player)
        .await
        .ok_or(ApiError::NotFound)?;

    match canvas.state().await {
        CanvasState::Empty => Err(ApiError::NotFound),
        CanvasState::Loading { invocation } => Err(ApiError::Loading(invocation)),
        CanvasState::Failed { message, .. } => Err(ApiError::IllustrationFailed(message)),
        CanvasState::Ready { invocation, frame } => {
            let bytes = encode_blocking(frame, FrameSize::from_preview_flag(query.preview)).await?;
            Ok(png_response(bytes, Some(invocation)))
        }
    }
}
