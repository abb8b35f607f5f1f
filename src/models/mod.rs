pub mod config;
pub mod story;
pub mod theme;

pub use config::{AnalyticsConfig, AppConfig};
pub use story::{Choice, GameState, Story, StoryError, StoryNode, START_NODE_ID};
pub use theme::{BackgroundTheme, ColorScheme, ThemeSettings};
