//! Incremental drawing of a session. Reads game state, never changes it.

use crate::grid::Position;
use crate::scores::HighScore;
use crate::state::{GameState, Tick};
use crate::{Coords, TermInt};

pub const SNAKE_CHAR: char = 'O';
pub const FOOD_CHAR: char = 'X';
const BORDER_HORIZONTAL: char = '-';
const BORDER_VERTICAL: char = '|';
const PAUSE_LABEL: &str = "PAUSED";

/// A character-cell surface the renderer draws on.
pub trait Surface {
    fn print_str(&mut self, pos: Coords, text: &str) -> crossterm::Result<()>;
    fn flush(&mut self) -> crossterm::Result<()>;

    fn print_char(&mut self, pos: Coords, ch: char) -> crossterm::Result<()> {
        let mut buf = [0u8; 4];
        self.print_str(pos, ch.encode_utf8(&mut buf))
    }
}

/// Draws everything: border, whole snake, food and score.
pub fn draw_full<S: Surface>(out: &mut S, state: &GameState, high: &HighScore) -> crossterm::Result<()> {
    draw_border(out, state)?;
    for seg in state.snake.body() {
        out.print_char(seg.to_coords(), SNAKE_CHAR)?;
    }
    draw_food(out, state)?;
    draw_score(out, state, high)?;
    out.flush()
}

/// Draws the changes of one tick. Exactly one segment is gained or lost per
/// tick, so erasing the old tail and drawing the new head is enough.
pub fn draw_tick<S: Surface>(out: &mut S, state: &GameState, tick: &Tick, high: &HighScore) -> crossterm::Result<()> {
    draw_border(out, state)?;
    draw_score(out, state, high)?;

    let prev = tick.step.previous_tail;
    if !state.snake.contains(&prev) {
        out.print_char(prev.to_coords(), ' ')?;
    }

    out.print_char(tick.step.new_head.to_coords(), SNAKE_CHAR)?;
    draw_food(out, state)?;
    out.flush()
}

pub fn show_pause<S: Surface>(out: &mut S, state: &GameState) -> crossterm::Result<()> {
    out.print_str(pause_origin(state).to_coords(), PAUSE_LABEL)?;
    out.flush()
}

/// Blanks the pause label and restores the cells it covered.
pub fn hide_pause<S: Surface>(out: &mut S, state: &GameState) -> crossterm::Result<()> {
    let origin = pause_origin(state);
    for i in 0..PAUSE_LABEL.len() as i32 {
        let pos = state.grid.offset(origin, (i, 0));
        let ch = if state.snake.contains(&pos) {
            SNAKE_CHAR
        } else if state.food.contains(&pos) {
            FOOD_CHAR
        } else {
            ' '
        };
        out.print_char(pos.to_coords(), ch)?;
    }
    out.flush()
}

fn pause_origin(state: &GameState) -> Position {
    let half = PAUSE_LABEL.len() as i32 / 2;
    Position::new((state.grid.width / 2 - half).max(0), state.grid.height / 2)
}

fn draw_border<S: Surface>(out: &mut S, state: &GameState) -> crossterm::Result<()> {
    let width = state.grid.width as TermInt;
    let height = state.grid.height as TermInt;
    let rule: String = std::iter::repeat(BORDER_HORIZONTAL).take(width as usize + 2).collect();

    out.print_str((0, 0), &rule)?;
    for y in 1..=height {
        out.print_char((0, y), BORDER_VERTICAL)?;
        out.print_char((width + 1, y), BORDER_VERTICAL)?;
    }
    out.print_str((0, height + 1), &rule)
}

fn draw_food<S: Surface>(out: &mut S, state: &GameState) -> crossterm::Result<()> {
    for food in state.food.iter() {
        out.print_char(food.to_coords(), FOOD_CHAR)?;
    }
    Ok(())
}

fn draw_score<S: Surface>(out: &mut S, state: &GameState, high: &HighScore) -> crossterm::Result<()> {
    let line = format!("Score: {}  High Score: {} by {}", state.score, high.score, high.name);
    let width = state.grid.width as usize + 2;
    out.print_str((0, state.grid.height as TermInt + 2), &format!("{:<width$}", line, width = width))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::snake::{Direction, Snake};
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    /// In-memory character grid standing in for the terminal.
    struct Canvas {
        pub width: usize,
        pub cells: Vec<Vec<char>>,
        pub flushes: usize,
    }

    impl Canvas {
        pub fn new(width: usize, height: usize) -> Self {
            Canvas { width, cells: vec![vec![' '; width]; height], flushes: 0 }
        }

        pub fn at(&self, pos: Position) -> char {
            let (x, y) = pos.to_coords();
            self.cells[y as usize][x as usize]
        }

        pub fn row(&self, y: usize) -> String {
            self.cells[y].iter().collect()
        }
    }

    impl Surface for Canvas {
        fn print_str(&mut self, pos: Coords, text: &str) -> crossterm::Result<()> {
            let row = &mut self.cells[pos.1 as usize];
            for (i, ch) in text.chars().enumerate() {
                let x = pos.0 as usize + i;
                if x < self.width {
                    row[x] = ch;
                }
            }
            Ok(())
        }

        fn flush(&mut self) -> crossterm::Result<()> {
            self.flushes += 1;
            Ok(())
        }
    }

    fn small_state(food: &[Position]) -> GameState {
        let grid = Grid::new(10, 6);
        let snake = Snake::new(&grid, Position::new(5, 3), 3, Direction::Right);
        GameState::with_parts(grid, snake, food.iter().copied().collect(), 5)
    }

    fn high() -> HighScore {
        HighScore { name: "ada".to_string(), score: 40 }
    }

    #[test]
    fn full_draw_layout() {
        let state = small_state(&[Position::new(0, 0)]);
        let mut canvas = Canvas::new(12, 9);

        draw_full(&mut canvas, &state, &high()).unwrap();

        assert_eq!(canvas.row(0), "-".repeat(12));
        assert_eq!(canvas.row(7), "-".repeat(12));
        assert_eq!(canvas.cells[1][0], '|');
        assert_eq!(canvas.cells[6][11], '|');
        for seg in state.snake.body() {
            assert_eq!(canvas.at(*seg), SNAKE_CHAR);
        }
        assert_eq!(canvas.at(Position::new(0, 0)), FOOD_CHAR);
        assert!(canvas.row(8).starts_with("Score: 0  High Score: 40 by ada"));
        assert_eq!(canvas.flushes, 1);
    }

    #[test]
    fn tick_erases_old_tail_and_draws_new_head() {
        let state = small_state(&[]);
        let mut canvas = Canvas::new(12, 9);
        let mut rng = StdRng::seed_from_u64(0);
        draw_full(&mut canvas, &state, &high()).unwrap();

        let old_tail = state.snake.tail();
        let (state, tick) = state.tick(&mut rng);
        draw_tick(&mut canvas, &state, &tick, &high()).unwrap();

        assert_eq!(canvas.at(old_tail), ' ');
        assert_eq!(canvas.at(state.snake.head()), SNAKE_CHAR);
        for seg in state.snake.body() {
            assert_eq!(canvas.at(*seg), SNAKE_CHAR);
        }
    }

    #[test]
    fn tail_kept_when_growing() {
        let state = small_state(&[Position::new(6, 3)]);
        let mut canvas = Canvas::new(12, 9);
        let mut rng = StdRng::seed_from_u64(0);
        draw_full(&mut canvas, &state, &high()).unwrap();

        let tail = state.snake.tail();
        let (state, tick) = state.tick(&mut rng);
        draw_tick(&mut canvas, &state, &tick, &high()).unwrap();

        assert!(tick.step.ate_food);
        assert_eq!(canvas.at(tail), SNAKE_CHAR);
        assert!(canvas.row(8).starts_with("Score: 5 "));
        for food in state.food.iter() {
            assert_eq!(canvas.at(*food), FOOD_CHAR);
        }
    }

    #[test]
    fn pause_label_is_restored_over_board() {
        let grid = Grid::new(10, 6);
        // Snake lies under the label, food too
        let snake = Snake::new(&grid, Position::new(3, 3), 2, Direction::Right);
        let food: HashSet<_> = [Position::new(5, 3)].iter().copied().collect();
        let state = GameState::with_parts(grid, snake, food, 5);
        let mut canvas = Canvas::new(12, 9);
        draw_full(&mut canvas, &state, &high()).unwrap();

        show_pause(&mut canvas, &state).unwrap();
        assert_eq!(&canvas.row(4)[3..9], "PAUSED");

        hide_pause(&mut canvas, &state).unwrap();
        assert_eq!(canvas.at(Position::new(2, 3)), SNAKE_CHAR);
        assert_eq!(canvas.at(Position::new(3, 3)), SNAKE_CHAR);
        assert_eq!(canvas.at(Position::new(4, 3)), ' ');
        assert_eq!(canvas.at(Position::new(5, 3)), FOOD_CHAR);
    }
}
