pub mod config;
pub mod history;
pub mod input;
pub mod state;
pub mod storage;
pub mod view;

pub use config::{ConfigError, SessionConfig};
pub use history::History;
pub use input::InputNormalizer;
pub use state::{GameSession, SessionEvent};
pub use storage::{ATTEMPTS_KEY, BEST_TIME_KEY, MemoryStore, Store, load_history, save_history};
pub use view::SessionView;
