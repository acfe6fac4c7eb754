use serde::{Deserialize, Serialize};

/// A recorded reaction time in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attempt(u64);

impl Attempt {
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    pub const fn as_millis(&self) -> u64 {
        self.0
    }

    pub fn rating(&self) -> Rating {
        Rating::from_millis(self.0)
    }
}

impl std::fmt::Display for Attempt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ms", self.0)
    }
}

/// Qualitative band for a reaction time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rating {
    Incredible,
    Excellent,
    Good,
    Fair,
    Slow,
}

impl Rating {
    pub fn from_millis(ms: u64) -> Self {
        match ms {
            0..200 => Rating::Incredible,
            200..250 => Rating::Excellent,
            250..300 => Rating::Good,
            300..400 => Rating::Fair,
            _ => Rating::Slow,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Rating::Incredible => "Incredible! Ninja reflexes",
            Rating::Excellent => "Excellent! Very fast",
            Rating::Good => "Well done! Good time",
            Rating::Fair => "Not bad, you can do better",
            Rating::Slow => "A bit slow, try again",
        }
    }
}
