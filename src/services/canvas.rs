//! Render targets with last-begun-wins invocation identity.
//!
//! Each render begins an invocation on a canvas and later presents a frame
//! or a failure under that id. Only the most recently begun invocation may
//! change the canvas; a completion from a superseded one is dropped.

use hires_filter::PixelBuffer;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// What a canvas currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CanvasState {
    #[default]
    Empty,
    Loading {
        invocation: u64,
    },
    Ready {
        invocation: u64,
        frame: Arc<PixelBuffer>,
    },
    Failed {
        invocation: u64,
        message: String,
    },
}

impl CanvasState {
    pub fn invocation(&self) -> Option<u64> {
        match self {
            CanvasState::Empty => None,
            CanvasState::Loading { invocation }
            | CanvasState::Ready { invocation, .. }
            | CanvasState::Failed { invocation, .. } => Some(*invocation),
        }
    }
}

#[derive(Debug, Default)]
struct CanvasInner {
    latest: u64,
    state: CanvasState,
}

/// A single display surface.
#[derive(Debug, Default)]
pub struct Canvas {
    inner: RwLock<CanvasInner>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new invocation and mark the canvas as loading.
    ///
    /// Ids are strictly increasing per canvas, starting at 1.
    pub async fn begin(&self) -> u64 {
        let mut inner = self.inner.write().await;
        inner.latest += 1;
        let invocation = inner.latest;
        inner.state = CanvasState::Loading { invocation };
        invocation
    }

    /// Show `frame` if `invocation` is still the latest one.
    pub async fn present(&self, invocation: u64, frame: PixelBuffer) -> bool {
        let mut inner = self.inner.write().await;
        if invocation != inner.latest {
            tracing::debug!(invocation, latest = inner.latest, "Dropping stale frame");
            return false;
        }
        inner.state = CanvasState::Ready {
            invocation,
            frame: Arc::new(frame),
        };
        true
    }

    /// Replace the canvas with an error state if `invocation` is still the latest.
    pub async fn fail(&self, invocation: u64, message: impl Into<String>) -> bool {
        let mut inner = self.inner.write().await;
        if invocation != inner.latest {
            tracing::debug!(invocation, latest = inner.latest, "Dropping stale failure");
            return false;
        }
        inner.state = CanvasState::Failed {
            invocation,
            message: message.into(),
        };
        true
    }

    pub async fn state(&self) -> CanvasState {
        self.inner.read().await.state.clone()
    }

    /// Id of the most recently begun invocation (0 if none).
    pub async fn latest_invocation(&self) -> u64 {
        self.inner.read().await.latest
    }
}

/// Canvases keyed by player id.
#[derive(Debug, Default)]
pub struct CanvasRegistry {
    canvases: RwLock<HashMap<String, Arc<Canvas>>>,
}

impl CanvasRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, player: &str) -> Option<Arc<Canvas>> {
        self.canvases.read().await.get(player).cloned()
    }

    pub async fn get_or_create(&self, player: &str) -> Arc<Canvas> {
        if let Some(canvas) = self.get(player).await {
            return canvas;
        }
        let mut canvases = self.canvases.write().await;
        canvases
            .entry(player.to_string())
            .or_insert_with(|| Arc::new(Canvas::new()))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(v: u8) -> PixelBuffer {
        PixelBuffer::filled(2, 2, [v, v, v, 255])
    }

    #[tokio::test]
    async fn test_new_canvas_is_empty() {
        let canvas = Canvas::new();
        assert_eq!(canvas.state().await, CanvasState::Empty);
        assert_eq!(canvas.latest_invocation().await, 0);
        assert_eq!(canvas.state().await.invocation(), None);
    }

    #[tokio::test]
    async fn test_begin_is_strictly_increasing() {
        let canvas = Canvas::new();
        let a = canvas.begin().await;
        let b = canvas.begin().await;
        let c = canvas.begin().await;
        assert!(a < b && b < c);
        assert_eq!(canvas.state().await, CanvasState::Loading { invocation: c });
    }

    #[tokio::test]
    async fn test_present_latest() {
        let canvas = Canvas::new();
        let id = canvas.begin().await;
        assert!(canvas.present(id, frame(9)).await);
        match canvas.state().await {
            CanvasState::Ready { invocation, frame } => {
                assert_eq!(invocation, id);
                assert_eq!(frame.pixel(0, 0), [9, 9, 9, 255]);
            }
            other => panic!("Expected Ready, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_stale_completion_dropped() {
        let canvas = Canvas::new();
        let first = canvas.begin().await;
        let second = canvas.begin().await;

        // First finishes after second began: dropped
        assert!(!canvas.present(first, frame(1)).await);
        assert_eq!(canvas.state().await, CanvasState::Loading { invocation: second });

        assert!(canvas.present(second, frame(2)).await);

        // A late failure from the first must not clobber the frame
        assert!(!canvas.fail(first, "timeout").await);
        assert!(matches!(
            canvas.state().await,
            CanvasState::Ready { invocation, .. } if invocation == second
        ));
    }

    #[tokio::test]
    async fn test_fail_latest() {
        let canvas = Canvas::new();
        let id = canvas.begin().await;
        assert!(canvas.fail(id, "Error: 404").await);
        assert_eq!(
            canvas.state().await,
            CanvasState::Failed {
                invocation: id,
                message: "Error: 404".into()
            }
        );
    }

    #[tokio::test]
    async fn test_registry_shares_canvas_per_player() {
        let registry = CanvasRegistry::new();
        assert!(registry.get("ada").await.is_none());

        let a1 = registry.get_or_create("ada").await;
        let a2 = registry.get_or_create("ada").await;
        let b = registry.get_or_create("bea").await;
        assert!(Arc::ptr_eq(&a1, &a2));
        assert!(!Arc::ptr_eq(&a1, &b));
        assert!(Arc::ptr_eq(&registry.get("bea").await.unwrap(), &b));

        a1.begin().await;
        assert_eq!(a2.latest_invocation().await, 1);
        assert_eq!(b.latest_invocation().await, 0);
    }
}
