use std::thread::sleep;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use log::{debug, error, info};
use rand::rngs::ThreadRng;

use crate::config::Config;
use crate::error::GameError;
use crate::render;
use crate::scores::{sanitize_name, HighScore, ScoreStore};
use crate::snake::Direction::{self, *};
use crate::state::GameState;
use crate::term::TermManager;

const NAME_MAX_LEN: usize = 20;

/// A key press that means something during play.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    TogglePause,
}

impl Command {
    pub fn from_key_event(ev: KeyEvent) -> Option<Command> {
        match ev.code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(Command::Turn(Up)),
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(Command::Turn(Left)),
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(Command::Turn(Down)),
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(Command::Turn(Right)),
            KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => Some(Command::TogglePause),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    Start,
    Instructions,
    Scores,
    Exit,
}

impl MenuChoice {
    pub fn from_key_event(ev: KeyEvent) -> Option<MenuChoice> {
        match ev.code {
            KeyCode::Char('1') => Some(MenuChoice::Start),
            KeyCode::Char('2') => Some(MenuChoice::Instructions),
            KeyCode::Char('3') => Some(MenuChoice::Scores),
            KeyCode::Char('4') => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Screens of the outer state machine. Pausing lives inside `Playing`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Screen {
    MainMenu,
    Instructions,
    Scores,
    Playing,
    GameOver { score: u32 },
}

pub struct SnakeGame {
    config: Config,
    term: TermManager,
    store: ScoreStore,
    high_score: HighScore,
    rng: ThreadRng,
}

impl SnakeGame {
    pub fn new(config: Config) -> Self {
        let term = TermManager::new(config.viewport());
        let store = ScoreStore::new(config.scores_path.clone(), config.high_score_path.clone());
        SnakeGame { config, term, store, high_score: HighScore::default(), rng: rand::thread_rng() }
    }

    /// Runs until Exit is picked from the main menu.
    pub fn run(&mut self) -> Result<(), GameError> {
        self.high_score = self.store.load_high_score();
        self.term.setup()?;

        let mut screen = Screen::MainMenu;
        loop {
            screen = match screen {
                Screen::MainMenu => match self.main_menu()? {
                    MenuChoice::Start => Screen::Playing,
                    MenuChoice::Instructions => Screen::Instructions,
                    MenuChoice::Scores => Screen::Scores,
                    MenuChoice::Exit => break,
                },
                Screen::Instructions => self.instructions()?,
                Screen::Scores => self.scores()?,
                Screen::Playing => self.play()?,
                Screen::GameOver { score } => self.game_over(score)?,
            };
        }

        info!("Exiting from the main menu");
        self.term.restore()?;
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn main_menu(&mut self) -> Result<MenuChoice, GameError> {
        self.term.show_lines(&[
            "Welcome to Snake Game!",
            "1. Start Game",
            "2. Instructions",
            "3. View Scores",
            "4. Exit",
            "",
            "",
            concat!("wrap-snake v", env!("CARGO_PKG_VERSION")),
        ])?;

        loop {
            if let Some(choice) = MenuChoice::from_key_event(self.term.read_key_blocking()?) {
                return Ok(choice);
            }
        }
    }

    fn instructions(&mut self) -> Result<Screen, GameError> {
        self.term.show_lines(&[
            "Instructions:",
            "Use W, A, S, D or arrow keys to move the snake.",
            "Eat the food to grow and gain points.",
            "Avoid running into yourself.",
            "Press P or ESC to pause/resume the game.",
            "Press any key to return to the main menu...",
        ])?;
        self.term.read_key_blocking()?;
        Ok(Screen::MainMenu)
    }

    fn scores(&mut self) -> Result<Screen, GameError> {
        let mut lines = vec!["High Scores:".to_string()];
        match self.store.all_scores() {
            Ok(scores) if scores.is_empty() => lines.push("No scores available.".to_string()),
            Ok(scores) => lines.extend(scores.iter().map(|s| format!("{}: {}", s.name, s.score))),
            Err(e) => {
                error!("Could not read scores: {}", e);
                lines.push(format!("Failed to read scores: {}", e));
            }
        }
        lines.push("Press any key to return to the main menu...".to_string());

        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        self.term.show_lines(&refs)?;
        self.term.read_key_blocking()?;
        Ok(Screen::MainMenu)
    }

    /// One session. Each iteration reads at most one key, then either idles
    /// while paused or ticks, draws and sleeps for the heading's cadence.
    fn play(&mut self) -> Result<Screen, GameError> {
        self.term.clear()?;

        let mut state = GameState::new(&self.config, &mut self.rng);
        let mut paused = false;
        info!("New session started");

        render::draw_full(&mut self.term, &state, &self.high_score)?;

        loop {
            match self.term.poll_key()?.and_then(Command::from_key_event) {
                Some(Command::Turn(dir)) if !paused => {
                    if !state.turn(dir) {
                        debug!("Ignored reversal to {:?}", dir);
                    }
                }
                Some(Command::TogglePause) => {
                    paused = !paused;
                    if paused {
                        render::show_pause(&mut self.term, &state)?;
                    } else {
                        render::hide_pause(&mut self.term, &state)?;
                    }
                }
                _ => {}
            }

            if paused {
                sleep(self.config.pause_poll);
                continue;
            }

            let (next, tick) = state.tick(&mut self.rng);
            state = next;
            render::draw_tick(&mut self.term, &state, &tick, &self.high_score)?;

            if tick.game_over {
                info!("Session over with score {} at length {}", state.score, state.snake.len());
                return Ok(Screen::GameOver { score: state.score });
            }

            sleep(tick_interval(&self.config, state.snake.get_direction()));
        }
    }

    fn game_over(&mut self, score: u32) -> Result<Screen, GameError> {
        let new_high = score > self.high_score.score;

        let mut lines = vec!["Game Over!".to_string(), format!("Your score: {}", score)];
        if new_high {
            lines.push("New High Score!".to_string());
        }
        lines.push("Enter your name: ".to_string());

        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        self.term.show_lines(&refs)?;

        let prompt_row = (lines.len() - 1) as u16;
        let raw = self.term.read_line((lines[lines.len() - 1].len() as u16, prompt_row), NAME_MAX_LEN)?;
        let name = sanitize_name(&raw);

        let saved = if new_high {
            self.high_score = HighScore { name, score };
            self.store.save_high_score(&self.high_score)
        } else {
            self.store.append_score(&name, score)
        };

        let mut row = prompt_row + 1;
        if let Err(e) = saved {
            error!("Failed to save score: {}", e);
            self.term.print_at((0, row), &format!("Failed to save score: {}", e))?;
            row += 1;
        }
        self.term.print_at((0, row), "Press Enter to return to the main menu...")?;
        self.term.flush()?;

        while self.term.read_key_blocking()?.code != KeyCode::Enter {}

        Ok(Screen::MainMenu)
    }
}

/// Vertical moves wait longer, since terminal cells are taller than wide.
pub fn tick_interval(config: &Config, dir: Direction) -> Duration {
    if dir.is_vertical() {
        config.vertical_tick
    } else {
        config.horizontal_tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent { code, modifiers: KeyModifiers::NONE }
    }

    #[test]
    fn wasd_and_arrows_turn() {
        let cases = [
            (KeyCode::Char('w'), Up),
            (KeyCode::Char('A'), Left),
            (KeyCode::Char('s'), Down),
            (KeyCode::Char('d'), Right),
            (KeyCode::Up, Up),
            (KeyCode::Left, Left),
            (KeyCode::Down, Down),
            (KeyCode::Right, Right),
        ];
        for (code, dir) in cases.iter() {
            assert_eq!(Command::from_key_event(key(*code)), Some(Command::Turn(*dir)));
        }
    }

    #[test]
    fn p_and_escape_toggle_pause() {
        assert_eq!(Command::from_key_event(key(KeyCode::Char('p'))), Some(Command::TogglePause));
        assert_eq!(Command::from_key_event(key(KeyCode::Esc)), Some(Command::TogglePause));
        assert_eq!(Command::from_key_event(key(KeyCode::Char('x'))), None);
        assert_eq!(Command::from_key_event(key(KeyCode::Enter)), None);
    }

    #[test]
    fn digits_pick_menu_entries() {
        assert_eq!(MenuChoice::from_key_event(key(KeyCode::Char('1'))), Some(MenuChoice::Start));
        assert_eq!(MenuChoice::from_key_event(key(KeyCode::Char('2'))), Some(MenuChoice::Instructions));
        assert_eq!(MenuChoice::from_key_event(key(KeyCode::Char('3'))), Some(MenuChoice::Scores));
        assert_eq!(MenuChoice::from_key_event(key(KeyCode::Char('4'))), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::from_key_event(key(KeyCode::Char('5'))), None);
    }

    #[test]
    fn cadence_follows_heading_axis() {
        let config = Config::default();
        assert_eq!(tick_interval(&config, Up), Duration::from_millis(125));
        assert_eq!(tick_interval(&config, Down), Duration::from_millis(125));
        assert_eq!(tick_interval(&config, Left), Duration::from_millis(75));
        assert_eq!(tick_interval(&config, Right), Duration::from_millis(75));
    }
}
