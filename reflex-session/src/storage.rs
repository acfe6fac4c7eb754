use crate::History;
use reflex_core::Attempt;
use std::collections::HashMap;
use std::convert::Infallible;

pub const ATTEMPTS_KEY: &str = "reactionAttempts";
pub const BEST_TIME_KEY: &str = "reactionBestTime";

/// String key-value store the session persists its history to.
/// Platform hosts provide the implementation.
pub trait Store {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read a value, `Ok(None)` when the key was never written
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Write a value, replacing any previous one
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;
}

/// In-memory store for tests and throwaway sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl Store for MemoryStore {
    type Error = Infallible;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Loads the persisted history. Anything missing or malformed is an empty history.
pub fn load_history<S: Store>(store: &S) -> History {
    let raw = match store.get(ATTEMPTS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return History::new(),
        Err(e) => {
            log::warn!("failed to read stored attempts, starting fresh: {e}");
            return History::new();
        }
    };

    let attempts: Vec<Attempt> = match serde_json::from_str(&raw) {
        Ok(attempts) => attempts,
        Err(e) => {
            log::warn!("stored attempts are malformed, starting fresh: {e}");
            return History::new();
        }
    };

    let history = History::from_attempts(attempts);
    check_stored_best(store, &history);
    history
}

fn check_stored_best<S: Store>(store: &S, history: &History) {
    let stored = match store.get(BEST_TIME_KEY) {
        Ok(Some(raw)) => raw.trim().parse::<u64>().ok(),
        _ => None,
    };
    let derived = history.best().map(|b| b.as_millis());
    if stored.is_some() && stored != derived {
        log::warn!("stored best time {stored:?} disagrees with history, using {derived:?}");
    }
}

/// Writes the attempts and then the best time
///
/// # Errors
///
/// Returns the first store error; the best time is not written if the attempts fail.
pub fn save_history<S: Store>(store: &mut S, history: &History) -> Result<(), S::Error> {
    let attempts = match serde_json::to_string(history.attempts()) {
        Ok(json) => json,
        Err(e) => {
            log::error!(
                "could not serialize {} attempts, keeping stored history: {e}",
                history.len()
            );
            return Ok(());
        }
    };
    store.set(ATTEMPTS_KEY, &attempts)?;
    if let Some(best) = history.best() {
        store.set(BEST_TIME_KEY, &best.as_millis().to_string())?;
    }
    Ok(())
}
