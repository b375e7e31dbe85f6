use crate::session::{CompletionPayload, SessionStats};

/// Receives the controller's outputs. Both hooks default to doing nothing.
pub trait SessionObserver {
    fn on_stats(&mut self, _stats: &SessionStats) {}

    fn on_game_complete(&mut self, _payload: &CompletionPayload) {}
}

/// Keeps everything it is told, for front-ends that poll and for tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    pub stats: Vec<SessionStats>,
    pub completions: Vec<CompletionPayload>,
}

impl SessionObserver for RecordingObserver {
    fn on_stats(&mut self, stats: &SessionStats) {
        self.stats.push(*stats);
    }

    fn on_game_complete(&mut self, payload: &CompletionPayload) {
        self.completions.push(*payload);
    }
}

impl<T: SessionObserver> SessionObserver for std::rc::Rc<std::cell::RefCell<T>> {
    fn on_stats(&mut self, stats: &SessionStats) {
        self.borrow_mut().on_stats(stats);
    }

    fn on_game_complete(&mut self, payload: &CompletionPayload) {
        self.borrow_mut().on_game_complete(payload);
    }
}
