//! Load -> stylize -> present, one invocation at a time per canvas.

use hires_filter::{PaletteError, PixelBuffer, Stylizer};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use utoipa::ToSchema;

use crate::error::RenderError;
use crate::models::ThemeSettings;
use crate::services::{Canvas, CanvasRegistry, ImageLoadError, ImageLoader};

#[derive(Debug, Error)]
pub enum IllustrationError {
    #[error(transparent)]
    Load(#[from] ImageLoadError),

    #[error("Invalid palette: {0}")]
    Palette(#[from] PaletteError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Result of rendering into a player's canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RenderOutcome {
    /// Invocation id this render ran under
    pub invocation: u64,
    /// Whether the result reached the canvas (false when superseded)
    pub presented: bool,
    /// Error shown on the canvas when the render failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub struct IllustrationService {
    loader: Arc<ImageLoader>,
    canvases: Arc<CanvasRegistry>,
}

impl IllustrationService {
    pub fn new(loader: Arc<ImageLoader>, canvases: Arc<CanvasRegistry>) -> Self {
        Self { loader, canvases }
    }

    pub fn canvases(&self) -> &Arc<CanvasRegistry> {
        &self.canvases
    }

    /// Load `src` and stylize it with the palette of `theme`.
    ///
    /// The palette is resolved fresh for each call. The pipeline runs on a
    /// blocking thread; loading is the only await point.
    pub async fn render(
        &self,
        src: &str,
        theme: ThemeSettings,
    ) -> Result<PixelBuffer, IllustrationError> {
        render_frame(&self.loader, src, theme).await
    }

    /// Render into `player`'s canvas under a fresh invocation.
    ///
    /// A newer call on the same canvas supersedes this one: its result is
    /// then dropped and `presented` is false. Failures replace the canvas
    /// content with an error state rather than leaving a partial frame.
    ///
    /// The work runs on its own task, so a begun invocation always settles
    /// the canvas even if the caller stops waiting.
    pub async fn render_to_canvas(
        &self,
        player: &str,
        src: &str,
        theme: ThemeSettings,
    ) -> RenderOutcome {
        let canvas = self.canvases.get_or_create(player).await;
        let invocation = canvas.begin().await;
        tracing::debug!(player, invocation, src, "Illustration invocation started");

        let task = tokio::spawn({
            let canvas = canvas.clone();
            let loader = self.loader.clone();
            let player = player.to_string();
            let src = src.to_string();
            async move {
                let result = render_frame(&loader, &src, theme).await;
                settle(&canvas, &player, invocation, result).await
            }
        });

        match task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                let err = RenderError::Task(e.to_string());
                settle(&canvas, player, invocation, Err(err.into())).await
            }
        }
    }
}

async fn render_frame(
    loader: &ImageLoader,
    src: &str,
    theme: ThemeSettings,
) -> Result<PixelBuffer, IllustrationError> {
    let palette = theme.palette()?;
    let image = loader.load(src).await?;

    let start = Instant::now();
    let frame = tokio::task::spawn_blocking(move || {
        let source = image.as_source()?;
        Ok::<_, RenderError>(Stylizer::new(palette).stylize(&source))
    })
    .await
    .map_err(|e| RenderError::Task(e.to_string()))??;

    tracing::info!(
        src,
        background = ?theme.background,
        color = ?theme.color,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Rendered illustration"
    );
    Ok(frame)
}

/// Present the frame or the error on `canvas` if `invocation` is still current.
async fn settle(
    canvas: &Canvas,
    player: &str,
    invocation: u64,
    result: Result<PixelBuffer, IllustrationError>,
) -> RenderOutcome {
    match result {
        Ok(frame) => {
            let presented = canvas.present(invocation, frame).await;
            RenderOutcome {
                invocation,
                presented,
                error: None,
            }
        }
        Err(e) => {
            let message = format!("Error: {e}");
            tracing::warn!(player, invocation, %e, "Illustration failed");
            let presented = canvas.fail(invocation, message.clone()).await;
            RenderOutcome {
                invocation,
                presented,
                error: Some(message),
            }
        }
    }
}
