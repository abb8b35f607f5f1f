//! Per-player game state persistence.

use async_trait::async_trait;
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::GameState;

#[derive(Debug, Error)]
pub enum GameStoreError {
    #[error("Invalid player id: {0:?}")]
    InvalidPlayer(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Player ids are 1-64 characters of `[A-Za-z0-9_-]`.
pub fn is_valid_player_id(player: &str) -> bool {
    (1..=64).contains(&player.len())
        && player
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

fn check_player(player: &str) -> Result<(), GameStoreError> {
    if is_valid_player_id(player) {
        Ok(())
    } else {
        Err(GameStoreError::InvalidPlayer(player.to_string()))
    }
}

/// Trait for game state storage
#[async_trait]
pub trait GameStore: Send + Sync {
    async fn save(&self, player: &str, state: &GameState) -> Result<(), GameStoreError>;

    /// Load the saved state, `None` if there is none (or it is unreadable).
    async fn load(&self, player: &str) -> Result<Option<GameState>, GameStoreError>;

    async fn clear(&self, player: &str) -> Result<(), GameStoreError>;

    /// A saved game exists and has moved past the start node.
    async fn has_existing_game(&self, player: &str) -> Result<bool, GameStoreError> {
        Ok(self
            .load(player)
            .await?
            .is_some_and(|state| state.is_in_progress()))
    }
}

/// In-memory game state storage
pub struct InMemoryGameStore {
    states: Arc<RwLock<HashMap<String, GameState>>>,
}

impl InMemoryGameStore {
    pub fn new() -> Self {
        Self {
            states: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryGameStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GameStore for InMemoryGameStore {
    async fn save(&self, player: &str, state: &GameState) -> Result<(), GameStoreError> {
        check_player(player)?;
        let mut states = self.states.write().await;
        states.insert(player.to_string(), state.clone());
        Ok(())
    }

    async fn load(&self, player: &str) -> Result<Option<GameState>, GameStoreError> {
        check_player(player)?;
        let states = self.states.read().await;
        Ok(states.get(player).cloned())
    }

    async fn clear(&self, player: &str) -> Result<(), GameStoreError> {
        check_player(player)?;
        let mut states = self.states.write().await;
        states.remove(player);
        Ok(())
    }
}

/// One JSON file per player in a save directory
pub struct FileGameStore {
    dir: PathBuf,
}

impl FileGameStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, player: &str) -> Result<PathBuf, GameStoreError> {
        check_player(player)?;
        Ok(self.dir.join(format!("{player}.json")))
    }
}

#[async_trait]
impl GameStore for FileGameStore {
    async fn save(&self, player: &str, state: &GameState) -> Result<(), GameStoreError> {
        let path = self.path_for(player)?;
        let json = serde_json::to_vec_pretty(state)?;
        tokio::fs::create_dir_all(&self.dir).await?;

        // Write then rename so a crash never leaves a half-written save
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &path).await?;
        tracing::debug!(player, node = %state.current_node_id, "Saved game state");
        Ok(())
    }

    async fn load(&self, player: &str) -> Result<Option<GameState>, GameStoreError> {
        let path = self.path_for(player)?;
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_slice(&bytes) {
            Ok(state) => Ok(Some(state)),
            Err(e) => {
                tracing::warn!(player, path = %path.display(), %e, "Ignoring unreadable game state");
                Ok(None)
            }
        }
    }

    async fn clear(&self, player: &str) -> Result<(), GameStoreError> {
        let path = self.path_for(player)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn moved_state() -> GameState {
        let mut state = GameState::new();
        state.current_node_id = "janitor".into();
        state.visited_nodes.push("start".into());
        state
            .choices
            .insert("start".into(), "QUESTION THE NIGHT JANITOR".into());
        state
    }

    async fn exercise(store: &dyn GameStore) {
        assert_eq!(store.load("ada").await.unwrap(), None);
        assert!(!store.has_existing_game("ada").await.unwrap());

        // A saved game still on the start node does not count
        store.save("ada", &GameState::new()).await.unwrap();
        assert_eq!(store.load("ada").await.unwrap(), Some(GameState::new()));
        assert!(!store.has_existing_game("ada").await.unwrap());

        store.save("ada", &moved_state()).await.unwrap();
        assert_eq!(store.load("ada").await.unwrap(), Some(moved_state()));
        assert!(store.has_existing_game("ada").await.unwrap());
        assert!(!store.has_existing_game("bea").await.unwrap());

        store.clear("ada").await.unwrap();
        assert_eq!(store.load("ada").await.unwrap(), None);
        // Clearing twice is fine
        store.clear("ada").await.unwrap();
    }

    #[tokio::test]
    async fn test_in_memory_store() {
        exercise(&InMemoryGameStore::new()).await;
    }

    #[tokio::test]
    async fn test_file_store() {
        let temp = TempDir::new().unwrap();
        exercise(&FileGameStore::new(temp.path().join("saves"))).await;
    }

    #[tokio::test]
    async fn test_file_store_persists_across_instances() {
        let temp = TempDir::new().unwrap();
        FileGameStore::new(temp.path())
            .save("ada", &moved_state())
            .await
            .unwrap();
        let reopened = FileGameStore::new(temp.path());
        assert_eq!(reopened.load("ada").await.unwrap(), Some(moved_state()));
    }

    #[tokio::test]
    async fn test_file_store_corrupt_file_is_absent() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("ada.json"), b"{not json").unwrap();
        let store = FileGameStore::new(temp.path());
        assert_eq!(store.load("ada").await.unwrap(), None);
        assert!(!store.has_existing_game("ada").await.unwrap());
    }

    #[tokio::test]
    async fn test_invalid_player_rejected() {
        let temp = TempDir::new().unwrap();
        let store = FileGameStore::new(temp.path());
        for bad in ["", "../etc", "a/b", "with space"] {
            assert!(matches!(
                store.save(bad, &GameState::new()).await,
                Err(GameStoreError::InvalidPlayer(_))
            ));
        }
        assert!(matches!(
            InMemoryGameStore::new().load("a.b").await,
            Err(GameStoreError::InvalidPlayer(_))
        ));
    }

    #[test]
    fn test_is_valid_player_id() {
        assert!(is_valid_player_id("player-1_A"));
        assert!(!is_valid_player_id(&"x".repeat(65)));
        assert!(!is_valid_player_id("é"));
    }
}
