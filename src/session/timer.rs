/// Identifies one run of the countdown. Ticks carrying an older token are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    Stale,
    Running(u32),
    Expired,
}

/// Second-granularity countdown owned by the session controller.
///
/// Every start or cancel bumps the generation, so a tick scheduled for a previous run can
/// never reach the current one.
#[derive(Debug, Clone, Default)]
pub struct Countdown {
    generation: u64,
    running: bool,
    remaining: u32,
}

impl Countdown {
    pub fn start(&mut self, seconds: u32) -> TimerToken {
        self.generation += 1;
        self.running = true;
        self.remaining = seconds;
        TimerToken {
            generation: self.generation,
        }
    }

    pub fn cancel(&mut self) {
        self.generation += 1;
        self.running = false;
    }

    pub fn token(&self) -> Option<TimerToken> {
        self.running.then_some(TimerToken {
            generation: self.generation,
        })
    }

    pub fn tick(&mut self, token: TimerToken) -> TickResult {
        if !self.running || token.generation != self.generation {
            return TickResult::Stale;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            TickResult::Expired
        } else {
            TickResult::Running(self.remaining)
        }
    }
}
