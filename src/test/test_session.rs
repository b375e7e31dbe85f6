#[cfg(test)]
mod test {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::core::{Direction, MAX_SOLVER_NODES, Vec2};
    use crate::errors::{LevelError, MalformedReason};
    use crate::game::{ActionOutcome, PuzzleGame, SokobanGame};
    use crate::levels::{Level, LevelPack, LevelProvider};
    use crate::minesweeper::{MineAction, MinefieldLevel, MinesweeperGame};
    use crate::session::*;
    use crate::state_graph::solve;
    use Direction::*;

    type Recorder = Rc<RefCell<RecordingObserver>>;

    fn config() -> SessionConfig {
        let mut config = SessionConfig::default();
        config.moderate = DifficultySettings {
            time_limit_seconds: 3,
            hints: 1,
            lives: 3,
        };
        config
    }

    fn session<G>(levels: Vec<G::Level>, config: SessionConfig) -> (SessionController<G>, Recorder)
    where
        G: PuzzleGame,
        G::Level: Clone + 'static,
    {
        let recorder = Recorder::default();
        let session = SessionController::<G>::new(levels, config, Difficulty::Moderate)
            .with_observer(recorder.clone());
        (session, recorder)
    }

    fn sokoban(layouts: &[(&str, u32)]) -> (SessionController<SokobanGame>, Recorder) {
        let levels = layouts
            .iter()
            .enumerate()
            .map(|(index, &(layout, par))| Level::new(&format!("level {index}"), par, layout, None))
            .collect();
        session(levels, config())
    }

    fn started(layouts: &[(&str, u32)]) -> (SessionController<SokobanGame>, Recorder, TimerToken) {
        let (mut session, recorder) = sokoban(layouts);
        let token = session.start().unwrap().expect("session should start from ready");
        (session, recorder, token)
    }

    #[test]
    fn start_loads_tier_and_only_works_once() {
        let (mut session, recorder) = sokoban(&[("#@$.#", 1), ("#@ $.#", 2)]);
        assert_eq!(session.phase(), SessionPhase::Ready);
        assert_eq!(session.timer_token(), None);

        let token = session.start().unwrap();

        assert!(token.is_some());
        assert_eq!(session.timer_token(), token);
        assert_eq!(session.phase(), SessionPhase::Playing);
        assert_eq!(session.stats().total_levels, 2);
        assert_eq!(session.stats().time_remaining_seconds, 3);
        assert_eq!(session.stats().lives_remaining, 3);
        assert_eq!(session.start().unwrap(), None);
        assert_eq!(recorder.borrow().stats.last(), Some(session.stats()));
    }

    #[test]
    fn countdown_expiry_finishes_session_once() {
        let (mut session, recorder, token) = started(&[("#@ $.#", 2)]);

        assert!(session.tick(token));
        assert_eq!(session.stats().time_remaining_seconds, 2);
        assert!(session.tick(token));
        assert!(session.tick(token));

        assert_eq!(session.phase(), SessionPhase::Finished(Ending::TimeExpired));
        assert_eq!(session.timer_token(), None);
        assert!(!session.tick(token));

        let recorder = recorder.borrow();
        assert_eq!(
            recorder.completions,
            vec![CompletionPayload {
                final_score: 58,
                levels_completed: 0,
                total_moves: 0,
                duration_seconds: 3,
                ending: Ending::TimeExpired,
                difficulty: Difficulty::Moderate,
            }]
        );
    }

    #[test]
    fn tick_from_previous_run_is_ignored() {
        let (mut session, _recorder, old_token) = started(&[("#@ $.#", 2)]);
        assert!(session.reset());
        assert!(!session.tick(old_token));

        let new_token = session.start().unwrap().unwrap();
        assert_ne!(old_token, new_token);

        assert!(!session.tick(old_token));
        assert_eq!(session.stats().time_remaining_seconds, 3);
        assert!(session.tick(new_token));
        assert_eq!(session.stats().time_remaining_seconds, 2);
    }

    #[test]
    fn solving_every_level_scores_the_session() {
        let (mut session, recorder, token) = started(&[("#@$.#", 1), ("#@ $.#", 2)]);

        assert_eq!(session.submit(Right), Some(ActionOutcome::Accepted));
        assert_eq!(session.stats().level_index, 1);
        assert_eq!(session.stats().levels_completed, 1);
        assert_eq!(session.stats().moves_this_level, 0);
        assert_eq!(session.stats().total_moves, 1);

        session.tick(token);
        session.submit(Right);
        session.submit(Right);

        assert_eq!(session.phase(), SessionPhase::Finished(Ending::Solved));
        // 100 + 60 + 40 * 2 / 3, damped
        assert_eq!(session.stats().score, 181);
        let recorder = recorder.borrow();
        assert_eq!(recorder.completions.len(), 1);
        let payload = recorder.completions[0];
        assert_eq!(payload.final_score, 181);
        assert_eq!(payload.levels_completed, 2);
        assert_eq!(payload.total_moves, 3);
        assert_eq!(payload.duration_seconds, 1);
        assert_eq!(recorder.stats.last(), Some(session.stats()));
    }

    #[test]
    fn commands_are_ignored_outside_playing() {
        let (mut session, recorder) = sokoban(&[("#@$.#", 1)]);

        assert_eq!(session.submit(Right), None);
        assert_eq!(session.use_hint(), None);
        assert!(!session.undo());
        assert!(!session.restart_level());
        assert!(!session.record_mistake());
        assert!(!session.reset());
        assert!(recorder.borrow().stats.is_empty());

        assert!(session.dispatch(SessionCommand::Start).unwrap());
        assert!(session.dispatch(SessionCommand::Submit(Right)).unwrap());
        assert_eq!(session.phase(), SessionPhase::Finished(Ending::Solved));
        assert_eq!(session.submit(Left), None);
        assert!(!session.dispatch(SessionCommand::Undo).unwrap());
    }

    #[test]
    fn rejected_moves_are_free_by_default() {
        let (mut session, _recorder, _token) = started(&[("#@ $ .#", 3)]);

        assert_eq!(session.submit(Left), Some(ActionOutcome::Rejected));
        assert_eq!(session.submit(Up), Some(ActionOutcome::Rejected));

        assert_eq!(session.stats().moves_this_level, 0);
        assert_eq!(session.stats().lives_remaining, 3);
        assert_eq!(session.phase(), SessionPhase::Playing);
    }

    #[test]
    fn charged_illegal_moves_exhaust_lives_before_time() {
        let mut config = config();
        config.charge_illegal_moves = true;
        let (mut session, recorder) =
            session::<SokobanGame>(vec![Level::new("wall", 3, "#@ $ .#", None)], config);
        session.start().unwrap();

        session.submit(Left);
        session.submit(Left);
        assert_eq!(session.stats().lives_remaining, 1);
        assert_eq!(session.phase(), SessionPhase::Playing);
        session.submit(Left);

        assert_eq!(session.phase(), SessionPhase::Finished(Ending::LivesExhausted));
        assert_eq!(session.stats().time_remaining_seconds, 3);
        assert_eq!(session.timer_token(), None);
        assert_eq!(recorder.borrow().completions.len(), 1);
        assert_eq!(recorder.borrow().completions[0].ending, Ending::LivesExhausted);
    }

    #[test]
    fn revealed_mines_cost_lives() {
        let level = MinefieldLevel::new("crowded", 2, 2, 3, 7, 1);
        let (mut session, recorder) = session::<MinesweeperGame>(vec![level], config());
        session.start().unwrap();

        let Some(MineAction::Reveal(safe)) = session.game().and_then(|game| game.hint()) else {
            panic!("a field with one safe cell should offer it as a hint");
        };
        let mines: Vec<Vec2> = [(0, 0), (0, 1), (1, 0), (1, 1)]
            .into_iter()
            .map(|(i, j)| Vec2 { i, j })
            .filter(|&pos| pos != safe)
            .collect();

        assert_eq!(session.submit(MineAction::Reveal(mines[0])), Some(ActionOutcome::Mistake));
        assert_eq!(session.stats().lives_remaining, 2);
        assert_eq!(session.submit(MineAction::Reveal(mines[0])), Some(ActionOutcome::Rejected));
        assert_eq!(session.stats().lives_remaining, 2);
        session.submit(MineAction::Reveal(mines[1]));
        session.submit(MineAction::Reveal(mines[2]));

        assert_eq!(session.phase(), SessionPhase::Finished(Ending::LivesExhausted));
        assert_eq!(session.stats().total_moves, 3);
        assert_eq!(recorder.borrow().completions.len(), 1);
    }

    #[test]
    fn revealing_the_safe_cells_solves_the_field() {
        let level = MinefieldLevel::new("crowded", 2, 2, 3, 7, 1);
        let (mut session, _recorder) = session::<MinesweeperGame>(vec![level], config());
        session.start().unwrap();

        let hint = session.use_hint().unwrap();
        assert_eq!(session.submit(hint), Some(ActionOutcome::Accepted));

        assert_eq!(session.phase(), SessionPhase::Finished(Ending::Solved));
        assert_eq!(session.stats().levels_completed, 1);
    }

    #[test]
    fn record_mistake_spends_lives() {
        let (mut session, _recorder, _token) = started(&[("#@ $.#", 2)]);

        assert!(session.record_mistake());
        assert!(session.record_mistake());
        assert_eq!(session.phase(), SessionPhase::Playing);
        assert!(session.record_mistake());

        assert_eq!(session.phase(), SessionPhase::Finished(Ending::LivesExhausted));
        assert!(!session.record_mistake());
    }

    #[test]
    fn undo_restores_board_and_counters() {
        let (mut session, _recorder, _token) = started(&[("#@ $ .#", 3)]);
        session.submit(Right);
        session.submit(Right);
        assert_eq!(session.stats().moves_this_level, 2);

        assert!(session.undo());
        assert_eq!(session.stats().moves_this_level, 1);
        assert_eq!(session.stats().total_moves, 1);
        assert!(session.undo());
        assert_eq!(session.stats().moves_this_level, 0);
        assert_eq!(session.stats().total_moves, 0);
        assert!(!session.undo());

        let game = session.game().unwrap();
        assert_eq!(game.state().player, Vec2 { i: 0, j: 1 });
        assert_eq!(game.state().boxes, vec![Vec2 { i: 0, j: 3 }]);
    }

    #[test]
    fn undo_capacity_limits_history() {
        let mut config = config();
        config.undo_capacity = Some(1);
        let (mut session, _recorder) =
            session::<SokobanGame>(vec![Level::new("line", 3, "#@ $ .#", None)], config);
        session.start().unwrap();
        session.submit(Right);
        session.submit(Right);

        assert!(session.undo());
        assert!(!session.undo());
        assert_eq!(session.stats().moves_this_level, 1);
    }

    #[test]
    fn restart_level_reloads_board_and_keeps_clock() {
        let (mut session, _recorder, token) = started(&[("#@$.#", 1), ("#@ $ .#", 3)]);
        session.submit(Right);
        session.tick(token);
        session.submit(Right);
        session.submit(Right);
        assert_eq!(session.stats().total_moves, 3);

        assert!(session.restart_level());

        assert_eq!(session.stats().level_index, 1);
        assert_eq!(session.stats().moves_this_level, 0);
        assert_eq!(session.stats().total_moves, 1);
        assert_eq!(session.stats().time_remaining_seconds, 2);
        assert_eq!(session.timer_token(), Some(token));
        assert_eq!(session.game().unwrap().state().player, Vec2 { i: 0, j: 1 });
        assert!(!session.undo());
    }

    #[test]
    fn hint_budget_is_charged_only_for_hints() {
        let (mut session, _recorder, _token) = started(&[("#@$#.", 1)]);
        assert_eq!(session.use_hint(), None);
        assert_eq!(session.stats().hints_remaining, 1);

        let (mut session, _recorder, _token) = started(&[("#@ $.#", 2)]);
        assert_eq!(session.use_hint(), Some(Right));
        assert_eq!(session.stats().hints_remaining, 0);
        assert_eq!(session.stats().hints_used, 1);
        assert_eq!(session.use_hint(), None);
        assert_eq!(session.stats().hints_used, 1);
    }

    #[test]
    fn difficulty_changes_only_when_ready() {
        let (mut session, _recorder) = sokoban(&[("#@$.#", 1)]);

        assert!(session.change_difficulty(Difficulty::Hard));
        assert_eq!(session.stats().time_remaining_seconds, SessionConfig::default().hard.time_limit_seconds);
        session.start().unwrap();
        assert!(!session.change_difficulty(Difficulty::Easy));
        assert_eq!(session.difficulty(), Difficulty::Hard);
    }

    #[test]
    fn reset_after_finish_allows_a_new_run() {
        let (mut session, recorder, _token) = started(&[("#@$.#", 1)]);
        session.submit(Right);
        assert_eq!(session.phase(), SessionPhase::Finished(Ending::Solved));

        assert!(session.reset());

        assert_eq!(session.phase(), SessionPhase::Ready);
        assert_eq!(session.stats(), &SessionStats::fresh(session.settings(), 0));
        assert!(session.game().is_none());
        assert!(session.start().unwrap().is_some());
        assert_eq!(recorder.borrow().completions.len(), 1);
    }

    #[test]
    fn empty_tier_cannot_start() {
        let (mut session, _recorder) = sokoban(&[]);

        assert!(matches!(session.start(), Err(LevelError::EmptyTier(_))));
        assert_eq!(session.phase(), SessionPhase::Ready);
    }

    #[test]
    fn malformed_level_fails_before_the_clock_starts() {
        let (mut session, _recorder) = sokoban(&[("#@$.#", 1), ("#$.#", 1)]);

        assert!(matches!(
            session.start(),
            Err(LevelError::Malformed(MalformedReason::MissingPlayer))
        ));
        assert_eq!(session.phase(), SessionPhase::Ready);
        assert_eq!(session.timer_token(), None);
    }

    #[test]
    fn level_solved_on_load_is_refused() {
        let (mut session, recorder) = sokoban(&[("#@$.#", 1), ("#@*#", 1)]);

        assert!(matches!(
            session.start(),
            Err(LevelError::Malformed(MalformedReason::AlreadySolved))
        ));
        assert_eq!(session.phase(), SessionPhase::Ready);
        assert_eq!(session.timer_token(), None);
        assert!(recorder.borrow().completions.is_empty());
    }

    #[test]
    fn builtin_solutions_win_every_tier() {
        let pack = LevelPack::builtin();
        for difficulty in Difficulty::ALL {
            let levels = pack.levels(difficulty).unwrap();
            let mut session =
                SessionController::<SokobanGame>::new(pack.clone(), SessionConfig::default(), difficulty);
            session.start().unwrap();

            let mut moves = 0;
            for level in &levels {
                let solution = level.solution().unwrap().unwrap();
                for direction in solution {
                    assert_eq!(
                        session.submit(direction),
                        Some(ActionOutcome::Accepted),
                        "{} on {}",
                        level.name,
                        difficulty
                    );
                    moves += 1;
                }
            }

            assert_eq!(session.phase(), SessionPhase::Finished(Ending::Solved), "{}", difficulty);
            assert_eq!(session.stats().levels_completed, levels.len() as u32);
            assert_eq!(session.stats().total_moves, moves);
            assert!(session.stats().score > 0);
        }
    }

    #[test]
    fn solver_finds_every_builtin_level() {
        let pack = LevelPack::builtin();
        for difficulty in Difficulty::ALL {
            for level in pack.levels(difficulty).unwrap() {
                let game = SokobanGame::load(&level, None).unwrap();
                let solution = solve(game.shared(), game.state(), MAX_SOLVER_NODES)
                    .unwrap_or_else(|| panic!("no solution for {}", level.name));
                let stored = level.solution().unwrap().unwrap();

                assert!(solution.len() <= stored.len(), "{} solved in {}", level.name, solution.len());
                assert!(game.hint().is_some(), "no hint for {}", level.name);
            }
        }
    }
}
