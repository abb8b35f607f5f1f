use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use super::illustration::check_player;
use crate::error::ApiError;
use crate::models::{Choice, GameState, Story, StoryError, StoryNode, START_NODE_ID};
use crate::services::{Analytics, AnalyticsEvent, GameStore};

/// A player's game together with the node they are on
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GameResponse {
    pub state: GameState,
    /// Current node, absent if the saved node no longer exists
    pub node: Option<StoryNode>,
    /// The game has moved past the start node
    pub in_progress: bool,
    /// The current node is an ending
    pub completed: bool,
}

impl GameResponse {
    fn new(story: &Story, state: GameState) -> Self {
        let node = story.node(&state.current_node_id).cloned();
        let completed = node.as_ref().is_some_and(|n| n.is_ending);
        Self {
            in_progress: state.is_in_progress(),
            completed,
            node,
            state,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChoiceRequest {
    /// Index into the current node's choices
    pub choice: usize,
}

/// Get a story node
#[utoipa::path(
    get,
    path = "/api/story/{node}",
    params(("node" = String, Path, description = "Story node id")),
    responses(
        (status = 200, description = "Story node", body = StoryNode),
        (status = 404, description = "Unknown node"),
    ),
    tag = "Story"
)]
pub async fn handle_story_node(
    State(story): State<Arc<Story>>,
    Path(node): Path<String>,
) -> Result<Json<StoryNode>, ApiError> {
    story
        .node(&node)
        .cloned()
        .map(Json)
        .ok_or_else(|| StoryError::UnknownNode(node).into())
}

/// Get a player's game
///
/// Returns the saved game, or a fresh one on the start node.
#[utoipa::path(
    get,
    path = "/api/players/{player}/game",
    params(("player" = String, Path, description = "Player id")),
    responses(
        (status = 200, description = "Current game", body = GameResponse),
        (status = 400, description = "Invalid player id"),
    ),
    tag = "Story"
)]
pub async fn handle_get_game(
    State(story): State<Arc<Story>>,
    State(store): State<Arc<dyn GameStore>>,
    State(analytics): State<Analytics>,
    Path(player): Path<String>,
) -> Result<Json<GameResponse>, ApiError> {
    check_player(&player)?;
    let state = store.load(&player).await?.unwrap_or_default();
    analytics.track_node_visit(&state.current_node_id);
    Ok(Json(GameResponse::new(&story, state)))
}

/// Restart a player's game
#[utoipa::path(
    delete,
    path = "/api/players/{player}/game",
    params(("player" = String, Path, description = "Player id")),
    responses(
        (status = 200, description = "Fresh game", body = GameResponse),
        (status = 400, description = "Invalid player id"),
    ),
    tag = "Story"
)]
pub async fn handle_restart_game(
    State(story): State<Arc<Story>>,
    State(store): State<Arc<dyn GameStore>>,
    State(analytics): State<Analytics>,
    Path(player): Path<String>,
) -> Result<Json<GameResponse>, ApiError> {
    check_player(&player)?;
    store.clear(&player).await?;
    tracing::info!(%player, "Game restarted");
    analytics.track_node_visit(START_NODE_ID);
    Ok(Json(GameResponse::new(&story, GameState::new())))
}

/// Make a choice
///
/// Applies the choice to the saved game, persists it and emits analytics
/// events (`choice_made`, `node_visited`, and `game_completed` when the
/// choice leads to an ending).
#[utoipa::path(
    post,
    path = "/api/players/{player}/choice",
    params(("player" = String, Path, description = "Player id")),
    request_body = ChoiceRequest,
    responses(
        (status = 200, description = "Updated game", body = GameResponse),
        (status = 400, description = "Invalid player id or choice index"),
        (status = 404, description = "Current node does not exist"),
        (status = 409, description = "Game already ended"),
    ),
    tag = "Story"
)]
pub async fn handle_choice(
    State(story): State<Arc<Story>>,
    State(store): State<Arc<dyn GameStore>>,
    State(analytics): State<Analytics>,
    Path(player): Path<String>,
    Json(request): Json<ChoiceRequest>,
) -> Result<Json<GameResponse>, ApiError> {
    check_player(&player)?;
    let mut state = store.load(&player).await?.unwrap_or_default();
    let from = state.current_node_id.clone();

    let choice = state.apply_choice(&story, request.choice)?;
    store.save(&player, &state).await?;

    let events = track_choice(&analytics, &story, &from, &choice, &state);
    tracing::debug!(%player, events = events.len(), "Choice tracked");

    let response = GameResponse::new(&story, state);
    if response.completed {
        tracing::info!(%player, ending = %choice.next_node_id, "Game completed");
    }
    Ok(Json(response))
}

/// Emit the analytics for `choice`, taken from node `from` and already
/// applied to `state`.
///
/// Returns the events in emission order: `choice_made`, `node_visited` for
/// the target, then `game_completed` when the target is an ending.
pub(crate) fn track_choice(
    analytics: &Analytics,
    story: &Story,
    from: &str,
    choice: &Choice,
    state: &GameState,
) -> Vec<AnalyticsEvent> {
    let mut events = vec![
        analytics.track_choice(from, &choice.text, &choice.next_node_id),
        analytics.track_node_visit(&choice.next_node_id),
    ];
    if story
        .node(&choice.next_node_id)
        .is_some_and(|node| node.is_ending)
    {
        events.push(analytics.track_game_complete(&choice.next_node_id, state.choices.len()));
    }
    events.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetLoader;
    use crate::models::AppConfig;
    use crate::services::analytics::{CHOICE_MADE, GAME_COMPLETED, NODE_VISITED};
    use pretty_assertions::assert_eq;

    fn story() -> Story {
        AppConfig::load_from_assets(&AssetLoader::new(None, None)).build_story()
    }

    /// Apply `index` the way the choice handler does and collect its events.
    fn choose(
        analytics: &Analytics,
        story: &Story,
        state: &mut GameState,
        index: usize,
    ) -> Vec<AnalyticsEvent> {
        let from = state.current_node_id.clone();
        let choice = state.apply_choice(story, index).unwrap();
        track_choice(analytics, story, &from, &choice, state)
    }

    fn summary(events: &[AnalyticsEvent]) -> Vec<(&str, &str)> {
        events
            .iter()
            .map(|e| (e.event.as_str(), e.properties.node_id.as_str()))
            .collect()
    }

    #[test]
    fn test_playthrough_event_sequence() {
        let analytics = Analytics::new(true);
        let story = story();
        let mut state = GameState::new();

        let events = choose(&analytics, &story, &mut state, 0);
        assert_eq!(
            summary(&events),
            vec![(CHOICE_MADE, "start"), (NODE_VISITED, "locker_room")]
        );
        assert_eq!(
            events[0].properties.next_node_id.as_deref(),
            Some("locker_room")
        );

        let events = choose(&analytics, &story, &mut state, 0);
        assert_eq!(
            summary(&events),
            vec![(CHOICE_MADE, "locker_room"), (NODE_VISITED, "ticket_stub")]
        );

        let events = choose(&analytics, &story, &mut state, 0);
        assert_eq!(
            summary(&events),
            vec![
                (CHOICE_MADE, "ticket_stub"),
                (NODE_VISITED, "ending_recovered"),
                (GAME_COMPLETED, "ending_recovered"),
            ]
        );
        assert_eq!(events[2].properties.total_choices, Some(3));
        assert_eq!(events[2].properties.total_choices, Some(state.choices.len()));
    }

    #[test]
    fn test_non_ending_choice_does_not_complete() {
        let analytics = Analytics::new(true);
        let story = story();
        let mut state = GameState::new();

        // start -> janitor -> security_tapes
        for index in [1, 1] {
            let events = choose(&analytics, &story, &mut state, index);
            assert!(events.iter().all(|e| e.event != GAME_COMPLETED));
            assert_eq!(events.len(), 2);
        }
        assert_eq!(state.current_node_id, "security_tapes");
    }

    #[test]
    fn test_disabled_analytics_tracks_nothing() {
        let analytics = Analytics::new(false);
        let story = story();
        let mut state = GameState::new();
        for _ in 0..3 {
            assert!(choose(&analytics, &story, &mut state, 0).is_empty());
        }
        assert!(story.node(&state.current_node_id).unwrap().is_ending);
    }
}
