//! Story graph and per-player game state.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;
use utoipa::ToSchema;

/// Id of the node every new game starts on.
pub const START_NODE_ID: &str = "start";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoryError {
    #[error("Story node not found: {0}")]
    UnknownNode(String),

    #[error("Node {node_id} has no choice {index}")]
    InvalidChoice { node_id: String, index: usize },

    #[error("The story has already ended at {0}")]
    GameOver(String),
}

/// One option offered at a story node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Choice {
    pub text: String,
    pub next_node_id: String,
    /// Free-form condition tags; carried through but not evaluated.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<String>,
}

/// A passage of the story with the choices leading out of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StoryNode {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub is_ending: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_alt: Option<String>,
}

/// Static story graph, indexed by node id.
#[derive(Debug, Clone, Default)]
pub struct Story {
    nodes: HashMap<String, StoryNode>,
}

impl Story {
    /// Build the graph from a node list. Later duplicates replace earlier ones.
    pub fn from_nodes(nodes: impl IntoIterator<Item = StoryNode>) -> Self {
        let nodes = nodes
            .into_iter()
            .map(|node| (node.id.clone(), node))
            .collect();
        Self { nodes }
    }

    pub fn node(&self, id: &str) -> Option<&StoryNode> {
        self.nodes.get(id)
    }

    pub fn start(&self) -> Option<&StoryNode> {
        self.node(START_NODE_ID)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Choices whose target node does not exist, as `(node_id, next_node_id)`.
    pub fn dangling_choices(&self) -> Vec<(String, String)> {
        let mut dangling: Vec<_> = self
            .nodes
            .values()
            .flat_map(|node| {
                node.choices
                    .iter()
                    .filter(|c| !self.nodes.contains_key(&c.next_node_id))
                    .map(|c| (node.id.clone(), c.next_node_id.clone()))
            })
            .collect();
        dangling.sort();
        dangling
    }
}

/// Progress of one player through the story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GameState {
    pub current_node_id: String,
    #[serde(default)]
    pub visited_nodes: Vec<String>,
    /// Node id to the text of the choice taken there.
    #[serde(default)]
    pub choices: BTreeMap<String, String>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            current_node_id: START_NODE_ID.to_string(),
            visited_nodes: Vec::new(),
            choices: BTreeMap::new(),
        }
    }

    /// Whether this state has moved off the start node.
    pub fn is_in_progress(&self) -> bool {
        self.current_node_id != START_NODE_ID
    }

    /// Take choice `index` at the current node and move to its target.
    ///
    /// On error the state is left untouched. Returns the choice taken.
    pub fn apply_choice(&mut self, story: &Story, index: usize) -> Result<Choice, StoryError> {
        let node = story
            .node(&self.current_node_id)
            .ok_or_else(|| StoryError::UnknownNode(self.current_node_id.clone()))?;
        if node.is_ending {
            return Err(StoryError::GameOver(node.id.clone()));
        }
        let choice = node
            .choices
            .get(index)
            .cloned()
            .ok_or_else(|| StoryError::InvalidChoice {
                node_id: node.id.clone(),
                index,
            })?;

        let previous = std::mem::replace(&mut self.current_node_id, choice.next_node_id.clone());
        self.choices.insert(previous.clone(), choice.text.clone());
        self.visited_nodes.push(previous);
        Ok(choice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn node(id: &str, choices: &[(&str, &str)], is_ending: bool) -> StoryNode {
        StoryNode {
            id: id.to_string(),
            text: format!("{id} text"),
            choices: choices
                .iter()
                .map(|(text, next)| Choice {
                    text: text.to_string(),
                    next_node_id: next.to_string(),
                    conditions: Vec::new(),
                })
                .collect(),
            is_ending,
            image_url: None,
            image_alt: None,
        }
    }

    fn story() -> Story {
        Story::from_nodes([
            node("start", &[("Go left", "left"), ("Go right", "right")], false),
            node("left", &[("Open door", "end")], false),
            node("right", &[("Nowhere", "missing")], false),
            node("end", &[], true),
        ])
    }

    #[test]
    fn test_new_state_starts_at_start() {
        let state = GameState::new();
        assert_eq!(state.current_node_id, "start");
        assert!(state.visited_nodes.is_empty());
        assert!(state.choices.is_empty());
        assert!(!state.is_in_progress());
    }

    #[test]
    fn test_apply_choice_moves_and_records() {
        let story = story();
        let mut state = GameState::new();

        let choice = state.apply_choice(&story, 0).unwrap();
        assert_eq!(choice.next_node_id, "left");
        assert_eq!(state.current_node_id, "left");
        assert_eq!(state.visited_nodes, vec!["start"]);
        assert_eq!(state.choices["start"], "Go left");
        assert!(state.is_in_progress());

        state.apply_choice(&story, 0).unwrap();
        assert_eq!(state.current_node_id, "end");
        assert_eq!(state.visited_nodes, vec!["start", "left"]);
        assert_eq!(state.choices.len(), 2);
    }

    #[test]
    fn test_apply_choice_out_of_range_leaves_state() {
        let story = story();
        let mut state = GameState::new();
        let err = state.apply_choice(&story, 5).unwrap_err();
        assert_eq!(
            err,
            StoryError::InvalidChoice {
                node_id: "start".into(),
                index: 5
            }
        );
        assert_eq!(state, GameState::new());
    }

    #[test]
    fn test_apply_choice_unknown_node() {
        let story = story();
        let mut state = GameState::new();
        state.apply_choice(&story, 1).unwrap();
        state.apply_choice(&story, 0).unwrap();
        assert_eq!(state.current_node_id, "missing");

        let err = state.apply_choice(&story, 0).unwrap_err();
        assert_eq!(err, StoryError::UnknownNode("missing".into()));
    }

    #[test]
    fn test_apply_choice_at_ending() {
        let story = story();
        let mut state = GameState {
            current_node_id: "end".into(),
            ..GameState::new()
        };
        assert_eq!(
            state.apply_choice(&story, 0).unwrap_err(),
            StoryError::GameOver("end".into())
        );
    }

    #[test]
    fn test_story_lookup_and_dangling() {
        let story = story();
        assert_eq!(story.len(), 4);
        assert_eq!(story.start().map(|n| n.id.as_str()), Some("start"));
        assert!(story.node("nope").is_none());
        assert_eq!(
            story.dangling_choices(),
            vec![("right".to_string(), "missing".to_string())]
        );
    }

    #[test]
    fn test_node_yaml_defaults() {
        let yaml = r#"
id: start
text: "It was a dark night."
choices:
  - text: "Investigate"
    next_node_id: alley
"#;
        let node: StoryNode = serde_yaml::from_str(yaml).unwrap();
        assert!(!node.is_ending);
        assert!(node.image_url.is_none());
        assert!(node.choices[0].conditions.is_empty());
    }
}
