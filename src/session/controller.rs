use log::{debug, info, warn};

use crate::errors::{LevelError, MalformedReason};
use crate::game::{ActionOutcome, PuzzleGame};
use crate::levels::LevelProvider;
use crate::scoring::{ScoreInputs, ScoringModel};
use crate::session::timer::{Countdown, TickResult, TimerToken};
use crate::session::{
    CompletionPayload, Difficulty, DifficultySettings, Ending, SessionConfig, SessionObserver,
    SessionPhase, SessionStats,
};

/// Discrete events a front-end sends to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand<A> {
    Start,
    Reset,
    Submit(A),
    UseHint,
    Undo,
    RestartLevel,
    ChangeDifficulty(Difficulty),
}

/// Owns every piece of mutable session state: phase, loaded levels, counters and countdown.
pub struct SessionController<G: PuzzleGame> {
    provider: Box<dyn LevelProvider<G::Level>>,
    config: SessionConfig,
    difficulty: Difficulty,
    phase: SessionPhase,
    levels: Vec<G>,
    par_moves: u32,
    current: Option<G>,
    stats: SessionStats,
    countdown: Countdown,
    observer: Option<Box<dyn SessionObserver>>,
}

impl<G: PuzzleGame> SessionController<G> {
    pub fn new(
        provider: impl LevelProvider<G::Level> + 'static,
        config: SessionConfig,
        difficulty: Difficulty,
    ) -> Self {
        let stats = SessionStats::fresh(config.settings(difficulty), 0);
        SessionController {
            provider: Box::new(provider),
            config,
            difficulty,
            phase: SessionPhase::Ready,
            levels: Vec::new(),
            par_moves: 0,
            current: None,
            stats,
            countdown: Countdown::default(),
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: impl SessionObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn settings(&self) -> DifficultySettings {
        self.config.settings(self.difficulty)
    }

    /// The level currently being played, if any.
    pub fn game(&self) -> Option<&G> {
        self.current.as_ref()
    }

    /// Token of the live countdown; `None` whenever the session is not playing.
    pub fn timer_token(&self) -> Option<TimerToken> {
        self.countdown.token()
    }

    pub fn dispatch(&mut self, command: SessionCommand<G::Action>) -> Result<bool, LevelError> {
        Ok(match command {
            SessionCommand::Start => self.start()?.is_some(),
            SessionCommand::Reset => self.reset(),
            SessionCommand::Submit(action) => self.submit(action).is_some(),
            SessionCommand::UseHint => self.use_hint().is_some(),
            SessionCommand::Undo => self.undo(),
            SessionCommand::RestartLevel => self.restart_level(),
            SessionCommand::ChangeDifficulty(difficulty) => self.change_difficulty(difficulty),
        })
    }

    /// Ready -> Playing. Loads every level of the tier up front so a broken level is reported
    /// before the clock starts. Returns `None` when the session is not ready.
    pub fn start(&mut self) -> Result<Option<TimerToken>, LevelError> {
        if self.phase != SessionPhase::Ready {
            debug!("Ignoring start while {:?}", self.phase);
            return Ok(None);
        }

        let levels = self.provider.levels(self.difficulty)?;
        if levels.is_empty() {
            return Err(LevelError::EmptyTier(self.difficulty.to_string()));
        }
        let loaded = levels
            .iter()
            .map(|level| G::load(level, self.config.undo_capacity))
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(index) = loaded.iter().position(G::is_solved) {
            warn!("Level {index} of {} is solved on load", self.difficulty);
            return Err(MalformedReason::AlreadySolved.into());
        }

        let settings = self.settings();
        self.par_moves = levels.iter().map(G::par_moves).sum();
        self.current = Some(loaded[0].clone());
        self.levels = loaded;
        self.stats = SessionStats::fresh(settings, self.levels.len() as u32);
        let token = self.countdown.start(settings.time_limit_seconds);
        self.phase = SessionPhase::Playing;

        info!(
            "Session started: {} with {} levels, {}s",
            self.difficulty,
            self.levels.len(),
            settings.time_limit_seconds
        );
        self.emit_stats();
        Ok(Some(token))
    }

    /// One second elapsed on the countdown identified by `token`. Returns whether it counted.
    pub fn tick(&mut self, token: TimerToken) -> bool {
        if self.phase != SessionPhase::Playing {
            debug!("Dropping tick while {:?}", self.phase);
            return false;
        }
        match self.countdown.tick(token) {
            TickResult::Stale => {
                debug!("Dropping stale tick {token:?}");
                false
            }
            TickResult::Running(remaining) => {
                self.stats.time_remaining_seconds = remaining;
                self.emit_stats();
                true
            }
            TickResult::Expired => {
                self.stats.time_remaining_seconds = 0;
                self.finish(Ending::TimeExpired);
                true
            }
        }
    }

    /// Feeds one player action to the current level. `None` when not playing.
    pub fn submit(&mut self, action: G::Action) -> Option<ActionOutcome> {
        if self.phase != SessionPhase::Playing {
            debug!("Ignoring {action:?} while {:?}", self.phase);
            return None;
        }
        let game = self.current.as_mut()?;
        let outcome = game.apply(action, self.stats.moves_this_level);
        let solved = game.is_solved();

        match outcome {
            ActionOutcome::Accepted => {
                self.count_move();
                if solved {
                    self.level_won();
                    return Some(outcome);
                }
            }
            ActionOutcome::Rejected => {
                if self.config.charge_illegal_moves && self.lose_life() {
                    return Some(outcome);
                }
            }
            ActionOutcome::Mistake => {
                self.count_move();
                if self.lose_life() {
                    return Some(outcome);
                }
            }
        }
        self.emit_stats();
        Some(outcome)
    }

    /// Spends one hint and returns the suggested action. The budget is only charged when the
    /// game can actually suggest something.
    pub fn use_hint(&mut self) -> Option<G::Action> {
        if self.phase != SessionPhase::Playing || self.stats.hints_remaining == 0 {
            debug!(
                "Hint unavailable while {:?} with {} left",
                self.phase, self.stats.hints_remaining
            );
            return None;
        }
        let hint = self.current.as_ref()?.hint()?;
        self.stats.hints_remaining -= 1;
        self.stats.hints_used += 1;
        self.emit_stats();
        Some(hint)
    }

    pub fn undo(&mut self) -> bool {
        if self.phase != SessionPhase::Playing {
            return false;
        }
        let Some(moves_at_snapshot) = self.current.as_mut().and_then(G::undo) else {
            return false;
        };
        self.stats.moves_this_level = moves_at_snapshot;
        self.stats.total_moves = self.stats.total_moves.saturating_sub(1);
        self.emit_stats();
        true
    }

    /// Reloads the current level and takes its moves back out of the total.
    pub fn restart_level(&mut self) -> bool {
        if self.phase != SessionPhase::Playing {
            return false;
        }
        let Some(fresh) = self.levels.get(self.stats.level_index as usize) else {
            return false;
        };
        self.current = Some(fresh.clone());
        self.stats.total_moves = self
            .stats
            .total_moves
            .saturating_sub(self.stats.moves_this_level);
        self.stats.moves_this_level = 0;
        info!("Level {} restarted", self.stats.level_index);
        self.emit_stats();
        true
    }

    /// Consumes one life. Running out finishes the session whatever the clock says.
    pub fn record_mistake(&mut self) -> bool {
        if self.phase != SessionPhase::Playing {
            return false;
        }
        if !self.lose_life() {
            self.emit_stats();
        }
        true
    }

    /// Playing or Finished -> Ready, keeping the selected difficulty.
    pub fn reset(&mut self) -> bool {
        if self.phase == SessionPhase::Ready {
            return false;
        }
        self.countdown.cancel();
        self.levels.clear();
        self.current = None;
        self.par_moves = 0;
        self.stats = SessionStats::fresh(self.settings(), 0);
        self.phase = SessionPhase::Ready;
        info!("Session reset");
        self.emit_stats();
        true
    }

    pub fn change_difficulty(&mut self, difficulty: Difficulty) -> bool {
        if self.phase != SessionPhase::Ready {
            debug!("Ignoring difficulty change while {:?}", self.phase);
            return false;
        }
        self.difficulty = difficulty;
        self.stats = SessionStats::fresh(self.settings(), 0);
        self.emit_stats();
        true
    }

    fn count_move(&mut self) {
        self.stats.moves_this_level += 1;
        self.stats.total_moves += 1;
    }

    fn level_won(&mut self) {
        self.stats.levels_completed += 1;
        let next = self.stats.level_index as usize + 1;
        info!(
            "Level {} solved in {} moves",
            self.stats.level_index, self.stats.moves_this_level
        );
        match self.levels.get(next) {
            Some(level) => {
                self.current = Some(level.clone());
                self.stats.level_index = next as u32;
                self.stats.moves_this_level = 0;
                self.emit_stats();
            }
            None => self.finish(Ending::Solved),
        }
    }

    /// Returns true when the last life was lost and the session finished.
    fn lose_life(&mut self) -> bool {
        self.stats.lives_remaining = self.stats.lives_remaining.saturating_sub(1);
        if self.stats.lives_remaining == 0 {
            self.finish(Ending::LivesExhausted);
            true
        } else {
            false
        }
    }

    pub fn score_inputs(&self) -> ScoreInputs {
        ScoreInputs {
            completed_levels: self.stats.levels_completed,
            total_levels: self.stats.total_levels,
            total_moves: self.stats.total_moves,
            sum_par_moves: self.par_moves,
            time_remaining: self.stats.time_remaining_seconds,
            time_limit: self.settings().time_limit_seconds,
        }
    }

    fn finish(&mut self, ending: Ending) {
        self.countdown.cancel();
        let inputs = self.score_inputs();
        let score = G::WEIGHTS.compute_score(&inputs, self.difficulty);
        self.stats.score = score;
        self.phase = SessionPhase::Finished(ending);

        let payload = CompletionPayload {
            final_score: score,
            levels_completed: self.stats.levels_completed,
            total_moves: self.stats.total_moves,
            duration_seconds: inputs.time_limit.saturating_sub(inputs.time_remaining),
            ending,
            difficulty: self.difficulty,
        };
        info!("Session finished: {ending:?}, score {score}");
        self.emit_stats();
        if let Some(observer) = self.observer.as_mut() {
            observer.on_game_complete(&payload);
        }
    }

    fn emit_stats(&mut self) {
        if let Some(observer) = self.observer.as_mut() {
            observer.on_stats(&self.stats);
        }
    }
}
