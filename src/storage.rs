use reflex_session::Store;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum FileStoreError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage file is not a JSON string map: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key-value store persisted as one JSON object on disk
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, FileStoreError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), FileStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(map)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl Store for FileStore {
    type Error = FileStoreError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.read_map()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        let mut map = match self.read_map() {
            Ok(map) => map,
            Err(FileStoreError::Json(e)) => {
                log::warn!("replacing unreadable {}: {e}", self.path.display());
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reflex_core::Attempt;
    use reflex_session::{ATTEMPTS_KEY, BEST_TIME_KEY, History, load_history, save_history};

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("storage.json"));
        assert_eq!(store.get(ATTEMPTS_KEY).unwrap(), None);
    }

    #[test]
    fn values_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");
        let mut store = FileStore::new(&path);
        store.set("a", "1").unwrap();
        store.set("b", "two").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(reopened.get("b").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn history_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("storage.json"));
        let history = History::from_attempts(vec![Attempt::from_millis(260), Attempt::from_millis(231)]);
        save_history(&mut store, &history).unwrap();

        assert_eq!(store.get(BEST_TIME_KEY).unwrap().as_deref(), Some("231"));
        assert_eq!(load_history(&FileStore::new(store.path())), history);
    }

    #[test]
    fn corrupt_file_reads_as_error_and_is_replaced_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{ not json").unwrap();
        let mut store = FileStore::new(&path);

        assert!(matches!(store.get(ATTEMPTS_KEY), Err(FileStoreError::Json(_))));
        assert!(load_history(&store).is_empty());

        store.set(ATTEMPTS_KEY, "[200]").unwrap();
        assert_eq!(store.get(ATTEMPTS_KEY).unwrap().as_deref(), Some("[200]"));
    }
}
