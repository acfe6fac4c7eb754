use reflex_core::Key;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("delay range is inverted: {min} ms > {max} ms")]
    InvertedDelayRange { min: u64, max: u64 },
    #[error("config parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Closed interval the Go delay is drawn from
    pub delay_range_ms: (u64, u64),
    /// Window in which a touch and a pointer press count as one tap
    pub debounce_ms: u64,
    pub activate_key: Key,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            delay_range_ms: (1000, 5000),
            debounce_ms: 500,
            activate_key: Key::Space,
        }
    }
}

impl SessionConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = self.delay_range_ms;
        if min > max {
            return Err(ConfigError::InvertedDelayRange { min, max });
        }
        Ok(())
    }

    /// Fixed-delay config, handy for deterministic sessions
    pub fn with_fixed_delay(mut self, delay_ms: u64) -> Self {
        self.delay_range_ms = (delay_ms, delay_ms);
        self
    }
}
