//! Player preferences
//!
//! Persisted separately from the leaderboard. The player name is stored as a
//! raw string record so it can prefill the name prompt.

use crate::persistence::{RecordStore, StorageError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Last-used player name
    pub player_name: Option<String>,
}

impl Settings {
    /// Record storage key
    const PLAYER_NAME_KEY: &'static str = "quantum_player_name";

    /// Set the player name; blank names are rejected
    pub fn set_player_name(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.player_name = Some(name.to_string());
        true
    }

    pub fn load(store: &dyn RecordStore) -> Self {
        let player_name = store
            .get(Self::PLAYER_NAME_KEY)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        if player_name.is_some() {
            log::info!("Loaded player name from storage");
        }
        Self { player_name }
    }

    pub fn save(&self, store: &mut dyn RecordStore) -> Result<(), StorageError> {
        if let Some(name) = &self.player_name {
            store.set(Self::PLAYER_NAME_KEY, name)?;
            log::info!("Settings saved");
        }
        Ok(())
    }
}
