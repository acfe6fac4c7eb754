use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Auxiliary,
}

/// Keys the host reports; anything else maps to `Other`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Space,
    Enter,
    Escape,
    Other,
}

/// Raw input channel an event arrived on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Pointer { button: PointerButton },
    Touch,
    Key { key: Key, repeat: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputChannel {
    Pointer,
    Touch,
    Keyboard,
}

impl InputSource {
    pub fn channel(&self) -> InputChannel {
        match self {
            InputSource::Pointer { .. } => InputChannel::Pointer,
            InputSource::Touch => InputChannel::Touch,
            InputSource::Key { .. } => InputChannel::Keyboard,
        }
    }
}

/// Where on the display surface an event landed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputTarget {
    #[default]
    Surface,
    /// Info panel or outbound link; never reaches the game
    Excluded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub source: InputSource,
    pub target: InputTarget,
    pub at_ms: u64,
}

impl InputEvent {
    pub fn new(source: InputSource, at_ms: u64) -> Self {
        Self {
            source,
            target: InputTarget::Surface,
            at_ms,
        }
    }

    pub fn primary_click(at_ms: u64) -> Self {
        Self::new(
            InputSource::Pointer {
                button: PointerButton::Primary,
            },
            at_ms,
        )
    }

    pub fn touch(at_ms: u64) -> Self {
        Self::new(InputSource::Touch, at_ms)
    }

    pub fn key(key: Key, repeat: bool, at_ms: u64) -> Self {
        Self::new(InputSource::Key { key, repeat }, at_ms)
    }

    pub fn on(mut self, target: InputTarget) -> Self {
        self.target = target;
        self
    }
}
