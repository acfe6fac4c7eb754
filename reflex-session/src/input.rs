use crate::SessionConfig;
use reflex_core::{InputChannel, InputEvent, InputSource, InputTarget, Key, PointerButton};

/// Collapses pointer, touch and key input into one interact per physical action.
///
/// A tap on a touch screen usually produces a touch start followed by a
/// synthesized pointer press; the second one is dropped if it arrives within
/// the debounce window of the first accepted event on the other channel.
#[derive(Debug, Clone)]
pub struct InputNormalizer {
    debounce_ms: u64,
    activate_key: Key,
    last_accepted: Option<(InputChannel, u64)>,
}

impl InputNormalizer {
    pub fn new(debounce_ms: u64, activate_key: Key) -> Self {
        Self {
            debounce_ms,
            activate_key,
            last_accepted: None,
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.debounce_ms, config.activate_key)
    }

    /// Returns true when the event should become an interact
    pub fn accept(&mut self, event: &InputEvent) -> bool {
        if event.target == InputTarget::Excluded {
            log::trace!("input on excluded region ignored: {:?}", event.source);
            return false;
        }

        match event.source {
            InputSource::Pointer { button } if button != PointerButton::Primary => {
                log::trace!("non-primary button {button:?} ignored");
                return false;
            }
            InputSource::Key { key, .. } if key != self.activate_key => return false,
            InputSource::Key { repeat: true, .. } => {
                log::trace!("key repeat ignored");
                return false;
            }
            _ => {}
        }

        let channel = event.source.channel();
        if self.is_echo(channel, event.at_ms) {
            log::trace!("{channel:?} at {} ms suppressed as duplicate tap", event.at_ms);
            return false;
        }

        self.last_accepted = Some((channel, event.at_ms));
        true
    }

    fn is_echo(&self, channel: InputChannel, at_ms: u64) -> bool {
        let Some((last_channel, last_at)) = self.last_accepted else {
            return false;
        };
        let pair = matches!(
            (last_channel, channel),
            (InputChannel::Touch, InputChannel::Pointer) | (InputChannel::Pointer, InputChannel::Touch)
        );
        pair && at_ms.saturating_sub(last_at) < self.debounce_ms
    }
}

impl Default for InputNormalizer {
    fn default() -> Self {
        Self::from_config(&SessionConfig::default())
    }
}
