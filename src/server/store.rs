//! Level document store
//!
//! Platform documents are stored verbatim; the only validation is field
//! presence on insert. Optionally backed by a JSON file so a level
//! survives service restarts.

use std::fs;
use std::io;
use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

/// Fields every platform document must carry, as numbers
const REQUIRED_FIELDS: [&str; 4] = ["scaleX", "scaleY", "translateX", "translateY"];

#[derive(Debug, Error)]
pub enum LevelStoreError {
    #[error("document is not a JSON object")]
    NotAnObject,
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("field `{0}` must be a number")]
    NotANumber(&'static str),
    #[error("level store io: {0}")]
    Io(#[from] io::Error),
    #[error("level store encoding: {0}")]
    Json(#[from] serde_json::Error),
}

/// Insert-ordered document store for platform records
#[derive(Debug, Default)]
pub struct LevelStore {
    docs: Vec<Value>,
    path: Option<PathBuf>,
}

impl LevelStore {
    /// In-memory store, dropped with the process
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// File-backed store; existing documents load eagerly
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LevelStoreError> {
        let path = path.into();
        let docs = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            docs,
            path: Some(path),
        })
    }

    fn validate(doc: &Value) -> Result<(), LevelStoreError> {
        let object = doc.as_object().ok_or(LevelStoreError::NotAnObject)?;
        for field in REQUIRED_FIELDS {
            match object.get(field) {
                None => return Err(LevelStoreError::MissingField(field)),
                Some(value) if !value.is_number() => {
                    return Err(LevelStoreError::NotANumber(field));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Validate and append one document
    pub fn insert(&mut self, doc: Value) -> Result<(), LevelStoreError> {
        Self::validate(&doc)?;
        self.docs.push(doc);
        self.flush()
    }

    /// All stored documents, in insertion order
    pub fn all(&self) -> Vec<Value> {
        self.docs.clone()
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    fn flush(&self) -> Result<(), LevelStoreError> {
        if let Some(path) = &self.path {
            fs::write(path, serde_json::to_string(&self.docs)?)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn platform_doc() -> Value {
        json!({"scaleY": 0.2, "scaleX": 2, "translateX": 0, "translateY": 0})
    }

    #[test]
    fn test_insert_keeps_insertion_order() {
        let mut store = LevelStore::in_memory();
        store.insert(platform_doc()).unwrap();
        store
            .insert(json!({"scaleY": 0.2, "scaleX": 2, "translateX": 1.5, "translateY": 0.5}))
            .unwrap();

        let docs = store.all();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0]["translateX"], json!(0));
        assert_eq!(docs[1]["translateX"], json!(1.5));
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let mut store = LevelStore::in_memory();
        let err = store
            .insert(json!({"scaleY": 0.2, "scaleX": 2, "translateX": 0}))
            .unwrap_err();
        assert!(matches!(err, LevelStoreError::MissingField("translateY")));
        assert!(store.is_empty());
    }

    #[test]
    fn test_non_numeric_field_is_rejected() {
        let mut store = LevelStore::in_memory();
        let err = store
            .insert(json!({"scaleY": 0.2, "scaleX": "wide", "translateX": 0, "translateY": 0}))
            .unwrap_err();
        assert!(matches!(err, LevelStoreError::NotANumber("scaleX")));
    }

    #[test]
    fn test_non_object_is_rejected() {
        let mut store = LevelStore::in_memory();
        assert!(matches!(
            store.insert(json!([1, 2, 3])),
            Err(LevelStoreError::NotAnObject)
        ));
    }

    #[test]
    fn test_extra_fields_are_stored_verbatim() {
        let mut store = LevelStore::in_memory();
        let doc = json!({
            "scaleY": 0.2, "scaleX": 2, "translateX": 0, "translateY": 0,
            "color": "red", "powerUP": {"name": "jump", "color": "green"},
            "unrelated": true,
        });
        store.insert(doc.clone()).unwrap();
        assert_eq!(store.all(), vec![doc]);
    }

    #[test]
    fn test_file_backed_store_survives_reopen() {
        static COUNTER: AtomicU32 = AtomicU32::new(0);
        let path = std::env::temp_dir().join(format!(
            "ledge-hop-level-{}-{}.json",
            std::process::id(),
            COUNTER.fetch_add(1, Ordering::Relaxed),
        ));

        let mut store = LevelStore::open(&path).unwrap();
        assert!(store.is_empty());
        store.insert(platform_doc()).unwrap();

        let reopened = LevelStore::open(&path).unwrap();
        assert_eq!(reopened.all(), vec![platform_doc()]);
    }
}
