use crate::core::{Cell, Direction, GameState, SharedGameState, Vec2};
use crate::models::GameRenderState;
use crate::session::{Difficulty, Ending, SessionCommand, SessionPhase, SessionStats};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};
use std::io;
use std::time::Duration;

pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, Box<dyn std::error::Error>>
{
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

pub fn cleanup_terminal() -> Result<(), Box<dyn std::error::Error>> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;
    Ok(())
}

pub fn render_game(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &GameRenderState,
) -> Result<(), Box<dyn std::error::Error>> {
    terminal.draw(|f| {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(4),
                Constraint::Length(3),
            ])
            .split(f.area());

        // Game area
        let title = match &state.level_name {
            Some(name) => format!("Sokoban - {name}"),
            None => "Sokoban".to_string(),
        };
        let game_paragraph = Paragraph::new(state.board.clone())
            .block(Block::default().borders(Borders::ALL).title(title))
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center);
        f.render_widget(game_paragraph, chunks[0]);

        let stats_paragraph = Paragraph::new(render_stats(state.difficulty, &state.stats))
            .block(Block::default().borders(Borders::ALL).title("Session"))
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);
        f.render_widget(stats_paragraph, chunks[1]);

        let instructions = phase_instructions(state.phase, state.stats.score);
        let instructions = if let Some(message) = &state.message {
            format!("{} | {}", instructions, message)
        } else {
            instructions
        };
        let instructions = if let Some(change_type) = &state.last_change {
            format!("{} | Last: {:?}", instructions, change_type)
        } else {
            instructions
        };

        let instruction_paragraph = Paragraph::new(instructions)
            .block(Block::default().borders(Borders::ALL).title("Instructions"))
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center);
        f.render_widget(instruction_paragraph, chunks[2]);
    })?;
    Ok(())
}

pub fn render_stats(difficulty: Difficulty, stats: &SessionStats) -> String {
    format!(
        "{} | Level {}/{} | Moves {} (total {}) | Solved {}\nTime {}:{:02} | Hints {} | Lives {} | Score {}",
        difficulty,
        (stats.level_index + 1).min(stats.total_levels.max(1)),
        stats.total_levels,
        stats.moves_this_level,
        stats.total_moves,
        stats.levels_completed,
        stats.time_remaining_seconds / 60,
        stats.time_remaining_seconds % 60,
        stats.hints_remaining,
        stats.lives_remaining,
        stats.score,
    )
}

fn phase_instructions(phase: SessionPhase, score: u32) -> String {
    match phase {
        SessionPhase::Ready => {
            "Enter to start | 1/2/3 pick Easy/Moderate/Hard | Q to quit".to_string()
        }
        SessionPhase::Playing => {
            "WASD/Arrows move | U undo | H hint | R restart level | X reset | Q quit".to_string()
        }
        SessionPhase::Finished(Ending::Solved) => {
            format!("🎉 You Win! Score {score}. X to reset, Q to quit")
        }
        SessionPhase::Finished(Ending::TimeExpired) => {
            format!("Time is up. Score {score}. X to reset, Q to quit")
        }
        SessionPhase::Finished(Ending::LivesExhausted) => {
            format!("Out of lives. Score {score}. X to reset, Q to quit")
        }
    }
}

pub fn render_game_to_string(shared: &SharedGameState, game: &GameState) -> String {
    let mut result = String::new();
    for i in 0..shared.height() {
        for j in 0..shared.width() {
            let pos = Vec2 { i, j };
            let has_player = pos == game.player;
            let has_box = game.boxes.contains(&pos);
            let is_target = shared.targets.contains(&pos);
            let ch = match (shared.grid[&pos], is_target) {
                (Cell::Wall, _) => '#',
                (Cell::Floor, false) => if has_player { '@' } else if has_box { '$' } else { ' ' },
                (Cell::Floor, true) => if has_player { '+' } else if has_box { '*' } else { '.' },
            };
            result.push(ch);
        }
        result.push('\n');
    }
    result
}

pub enum ConsoleInput {
    Command(SessionCommand<Direction>),
    Quit,
    Timeout,
    Unknown,
}

pub fn handle_input(poll_timeout: Duration) -> Result<ConsoleInput, Box<dyn std::error::Error>> {
    if event::poll(poll_timeout)? {
        if let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        {
            return Ok(map_key(code));
        }
    }
    Ok(ConsoleInput::Timeout)
}

pub fn map_key(code: KeyCode) -> ConsoleInput {
    use SessionCommand::*;
    let command = match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return ConsoleInput::Quit,
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Submit(Direction::Up),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Submit(Direction::Down),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Submit(Direction::Left),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Submit(Direction::Right),
        KeyCode::Char('u') | KeyCode::Char('U') | KeyCode::Backspace => Undo,
        KeyCode::Char('h') | KeyCode::Char('H') => UseHint,
        KeyCode::Char('r') | KeyCode::Char('R') => RestartLevel,
        KeyCode::Char('x') | KeyCode::Char('X') => Reset,
        KeyCode::Enter | KeyCode::Char(' ') => Start,
        KeyCode::Char('1') => ChangeDifficulty(Difficulty::Easy),
        KeyCode::Char('2') => ChangeDifficulty(Difficulty::Moderate),
        KeyCode::Char('3') => ChangeDifficulty(Difficulty::Hard),
        _ => return ConsoleInput::Unknown,
    };
    ConsoleInput::Command(command)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn keys_map_to_commands() {
        assert!(matches!(
            map_key(KeyCode::Left),
            ConsoleInput::Command(SessionCommand::Submit(Direction::Left))
        ));
        assert!(matches!(
            map_key(KeyCode::Char('3')),
            ConsoleInput::Command(SessionCommand::ChangeDifficulty(Difficulty::Hard))
        ));
        assert!(matches!(map_key(KeyCode::Esc), ConsoleInput::Quit));
        assert!(matches!(map_key(KeyCode::Tab), ConsoleInput::Unknown));
    }

    #[test]
    fn stats_line_shows_clock() {
        let stats = SessionStats {
            total_levels: 3,
            time_remaining_seconds: 125,
            ..SessionStats::default()
        };
        let text = render_stats(Difficulty::Hard, &stats);

        assert!(text.starts_with("Hard | Level 1/3"));
        assert!(text.contains("Time 2:05"));
    }
}
