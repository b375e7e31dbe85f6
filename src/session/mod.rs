//! Game session lifecycle: Ready -> Playing -> Finished, driven by player commands and a
//! once-a-second countdown.

mod controller;
mod difficulty;
mod observer;
mod stats;
mod timer;

pub use controller::{SessionCommand, SessionController};
pub use difficulty::{Difficulty, DifficultySettings, SessionConfig};
pub use observer::{RecordingObserver, SessionObserver};
pub use stats::{CompletionPayload, Ending, SessionPhase, SessionStats};
pub use timer::{Countdown, TickResult, TimerToken};
