//! Player analytics emitted as structured tracing events.
//!
//! Events go to the `analytics` target so they can be routed separately,
//! e.g. `RUST_LOG=analytics=info`.

use serde::Serialize;
use utoipa::ToSchema;

pub const CHOICE_MADE: &str = "choice_made";
pub const NODE_VISITED: &str = "node_visited";
pub const GAME_COMPLETED: &str = "game_completed";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AnalyticsEvent {
    pub event: String,
    pub properties: EventProperties,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct EventProperties {
    pub node_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choice_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_node_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_choices: Option<usize>,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl EventProperties {
    fn at_node(node_id: &str) -> Self {
        Self {
            node_id: node_id.to_string(),
            choice_text: None,
            next_node_id: None,
            total_choices: None,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Event emitter; a disabled instance emits nothing.
#[derive(Debug, Clone, Copy)]
pub struct Analytics {
    enabled: bool,
}

impl Analytics {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn track_choice(
        &self,
        node_id: &str,
        choice_text: &str,
        next_node_id: &str,
    ) -> Option<AnalyticsEvent> {
        self.emit(
            CHOICE_MADE,
            EventProperties {
                choice_text: Some(choice_text.to_string()),
                next_node_id: Some(next_node_id.to_string()),
                ..EventProperties::at_node(node_id)
            },
        )
    }

    pub fn track_node_visit(&self, node_id: &str) -> Option<AnalyticsEvent> {
        self.emit(NODE_VISITED, EventProperties::at_node(node_id))
    }

    pub fn track_game_complete(
        &self,
        ending_node_id: &str,
        total_choices: usize,
    ) -> Option<AnalyticsEvent> {
        self.emit(
            GAME_COMPLETED,
            EventProperties {
                total_choices: Some(total_choices),
                ..EventProperties::at_node(ending_node_id)
            },
        )
    }

    fn emit(&self, event: &str, properties: EventProperties) -> Option<AnalyticsEvent> {
        if !self.enabled {
            return None;
        }
        let event = AnalyticsEvent {
            event: event.to_string(),
            properties,
        };
        tracing::info!(
            target: "analytics",
            event = %event.event,
            node_id = %event.properties.node_id,
            choice_text = event.properties.choice_text.as_deref(),
            next_node_id = event.properties.next_node_id.as_deref(),
            total_choices = event.properties.total_choices,
            timestamp = event.properties.timestamp,
            "Analytics event"
        );
        Some(event)
    }
}
