mod manual;
mod queue;
mod timer;

pub use manual::ManualTimer;
pub use queue::TimerQueue;
pub use timer::{HighPrecisionTimer, Timer, TimerId};
