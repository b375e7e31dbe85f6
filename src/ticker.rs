use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use log::debug;

use crate::session::TimerToken;

/// Background thread delivering countdown ticks to the thread that owns the session.
///
/// Ticks are sent over a channel rather than applied here, so the session is only ever
/// touched by its owner. Dropping the ticker stops it; ticks already in flight still carry
/// the old token and are rejected by the controller.
pub struct Ticker {
    token: TimerToken,
    cancelled: Arc<AtomicBool>,
}

impl Ticker {
    pub fn spawn(token: TimerToken, interval: Duration, sender: Sender<TimerToken>) -> Self {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        thread::spawn(move || {
            loop {
                thread::sleep(interval);
                if flag.load(Ordering::Acquire) || sender.send(token).is_err() {
                    break;
                }
            }
            debug!("Ticker for {token:?} stopped");
        });
        Ticker { token, cancelled }
    }

    pub fn token(&self) -> TimerToken {
        self.token
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        // The thread wakes up at most one interval later and exits on its own.
        self.cancel();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::session::Countdown;
    use std::sync::mpsc;

    #[test]
    fn delivers_ticks_until_dropped() {
        let mut countdown = Countdown::default();
        let token = countdown.start(10);
        let (sender, receiver) = mpsc::channel();

        let ticker = Ticker::spawn(token, Duration::from_millis(5), sender);
        let first = receiver.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(first, token);

        drop(ticker);
        // drain anything already queued; the channel closes once the thread exits
        while receiver.recv_timeout(Duration::from_secs(2)).is_ok() {}
        assert!(receiver.try_recv().is_err());
    }
}
