//! Local key-value persistence
//!
//! A directory-backed store holding one JSON blob per key, read on load
//! to resume a session. Three keys are in use: `SaveState` for the run
//! snapshot, `Level` for platform records, `Keybindings` for input.

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::input::KeyBindings;
use crate::session::SaveState;
use crate::sim::PlatformRecord;

/// Storage keys
pub const KEY_SAVE_STATE: &str = "SaveState";
pub const KEY_LEVEL: &str = "Level";
pub const KEY_KEYBINDINGS: &str = "Keybindings";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage io: {0}")]
    Io(#[from] io::Error),
    #[error("storage encoding: {0}")]
    Json(#[from] serde_json::Error),
}

/// Directory-backed key to JSON-blob store
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Raw blob read; `Ok(None)` when the key has never been written
    pub fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(blob) => Ok(Some(blob)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    pub fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn load_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.get_item(key)? {
            Some(blob) => Ok(Some(serde_json::from_str(&blob)?)),
            None => Ok(None),
        }
    }

    fn save_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        self.set_item(key, &serde_json::to_string(value)?)
    }

    pub fn load_save_state(&self) -> Result<Option<SaveState>, StoreError> {
        self.load_json(KEY_SAVE_STATE)
    }

    pub fn save_save_state(&self, save: &SaveState) -> Result<(), StoreError> {
        self.save_json(KEY_SAVE_STATE, save)
    }

    pub fn clear_save_state(&self) -> Result<(), StoreError> {
        self.remove_item(KEY_SAVE_STATE)
    }

    pub fn load_level(&self) -> Result<Option<Vec<PlatformRecord>>, StoreError> {
        self.load_json(KEY_LEVEL)
    }

    pub fn save_level(&self, level: &[PlatformRecord]) -> Result<(), StoreError> {
        self.save_json(KEY_LEVEL, &level)
    }

    pub fn load_keybindings(&self) -> Result<Option<KeyBindings>, StoreError> {
        self.load_json(KEY_KEYBINDINGS)
    }

    pub fn save_keybindings(&self, bindings: &KeyBindings) -> Result<(), StoreError> {
        self.save_json(KEY_KEYBINDINGS, bindings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn temp_store(name: &str) -> LocalStore {
        static COUNTER: AtomicU32 = AtomicU32::new(0);
        let dir = std::env::temp_dir().join(format!(
            "ledge-hop-store-{}-{name}-{}",
            std::process::id(),
            COUNTER.fetch_add(1, Ordering::Relaxed),
        ));
        LocalStore::open(dir).unwrap()
    }

    #[test]
    fn test_missing_key_reads_as_none() {
        let store = temp_store("missing");
        assert!(store.get_item("SaveState").unwrap().is_none());
        assert!(store.load_save_state().unwrap().is_none());
    }

    #[test]
    fn test_item_round_trip() {
        let store = temp_store("roundtrip");
        store.set_item("Level", "[1,2,3]").unwrap();
        assert_eq!(store.get_item("Level").unwrap().unwrap(), "[1,2,3]");
    }

    #[test]
    fn test_clearing_a_save_is_idempotent() {
        let store = temp_store("remove");
        store.set_item(KEY_SAVE_STATE, "{}").unwrap();
        store.clear_save_state().unwrap();
        store.clear_save_state().unwrap();
        assert!(store.get_item(KEY_SAVE_STATE).unwrap().is_none());
    }

    #[test]
    fn test_keybindings_round_trip() {
        let store = temp_store("bindings");
        let mut bindings = KeyBindings::default();
        bindings.jump = "w".to_string();

        store.save_keybindings(&bindings).unwrap();
        assert_eq!(store.load_keybindings().unwrap().unwrap(), bindings);
    }

    #[test]
    fn test_corrupt_blob_is_an_error() {
        let store = temp_store("corrupt");
        store.set_item(KEY_KEYBINDINGS, "not json").unwrap();
        assert!(matches!(
            store.load_keybindings(),
            Err(StoreError::Json(_))
        ));
    }
}
