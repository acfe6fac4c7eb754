use anyhow::{Context, Result, anyhow};
use reflex_session::SessionConfig;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const HOME_ENV: &str = "REFLEX_HOME";
pub const CONFIG_FILE: &str = "config.json";
pub const STORAGE_FILE: &str = "storage.json";

/// `$REFLEX_HOME`, or `reflex` under the platform data directory
pub fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(home));
    }
    dirs::data_dir()
        .map(|d| d.join("reflex"))
        .ok_or_else(|| anyhow!("no data directory on this platform, set {HOME_ENV}"))
}

/// Reads `config.json` from `dir`; a missing file means defaults.
pub fn load_config(dir: &Path) -> Result<SessionConfig> {
    let path = dir.join(CONFIG_FILE);
    match fs::read_to_string(&path) {
        Ok(json) => SessionConfig::from_json(&json)
            .with_context(|| format!("invalid config in {}", path.display())),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(SessionConfig::default()),
        Err(e) => Err(e).with_context(|| format!("cannot read {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_config(dir.path()).unwrap(), SessionConfig::default());
    }

    #[test]
    fn config_file_overrides_fields() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{"delay_range_ms": [1500, 3000]}"#,
        )
        .unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.delay_range_ms, (1500, 3000));
        assert_eq!(config.debounce_ms, 500);
    }

    #[test]
    fn inverted_range_fails_startup() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{"delay_range_ms": [3000, 1500]}"#,
        )
        .unwrap();
        let err = load_config(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("inverted"));
    }
}
