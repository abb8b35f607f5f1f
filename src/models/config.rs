use crate::assets::AssetLoader;
use crate::models::{Story, StoryNode, ThemeSettings};
use serde::Deserialize;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Theme used when a request does not specify one
    #[serde(default)]
    pub theme: ThemeSettings,

    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Story nodes; the graph starts at the node with id `start`
    #[serde(default)]
    pub story: Vec<StoryNode>,
}

/// Analytics event emission
#[derive(Debug, Deserialize, Clone)]
pub struct AnalyticsConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    let config: Self = config;
                    tracing::info!(
                        nodes = config.story.len(),
                        analytics = config.analytics.enabled,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Build the story graph, logging choices that lead nowhere.
    pub fn build_story(&self) -> Story {
        let story = Story::from_nodes(self.story.iter().cloned());
        if story.start().is_none() {
            tracing::warn!("Story has no start node");
        }
        for (node, target) in story.dangling_choices() {
            tracing::warn!(%node, %target, "Choice points to unknown story node");
        }
        story
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: ThemeSettings::default(),
            analytics: AnalyticsConfig::default(),
            story: Vec::new(),
        }
    }
}
