mod app;
mod settings;
mod storage;

use app::App;
use reflex_session::GameSession;
use reflex_timing::HighPrecisionTimer;
use storage::FileStore;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let dir = settings::data_dir()?;
    let config = settings::load_config(&dir)?;
    let store = FileStore::new(dir.join(settings::STORAGE_FILE));
    log::info!("using {}", store.path().display());

    let session = GameSession::new(config, HighPrecisionTimer::new(), rand::rng(), store)?;
    App::new(session).run()
}
