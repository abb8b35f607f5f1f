pub mod analytics;
pub mod canvas;
pub mod game_store;
pub mod illustration;
pub mod image_loader;

pub use analytics::{Analytics, AnalyticsEvent, EventProperties};
pub use canvas::{Canvas, CanvasRegistry, CanvasState};
pub use game_store::{
    is_valid_player_id, FileGameStore, GameStore, GameStoreError, InMemoryGameStore,
};
pub use illustration::{IllustrationError, IllustrationService, RenderOutcome};
pub use image_loader::{decode_image, ImageLoadError, ImageLoader, LoadedImage};
