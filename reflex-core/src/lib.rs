pub mod input;
pub mod phase;
pub mod stimulus;
pub mod trial;

pub use input::{InputChannel, InputEvent, InputSource, InputTarget, Key, PointerButton};
pub use phase::TrialPhase;
pub use stimulus::{StimulusColor, phase_message};
pub use trial::{Attempt, Rating};
