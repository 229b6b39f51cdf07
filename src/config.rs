//! Hard-coded game settings.

use std::path::PathBuf;
use std::time::Duration;

use crate::grid::Grid;
use crate::{Coords, TermInt};

const BOARD_WIDTH: i32 = 40;
const BOARD_HEIGHT: i32 = 20;
const INITIAL_SNAKE_LENGTH: usize = 5;
const INITIAL_FOODS: usize = 3;
const POINTS_PER_FOOD: u32 = 5;

const VERTICAL_TICK_MS: u64 = 125;
const HORIZONTAL_TICK_MS: u64 = 75;
const PAUSE_POLL_MS: u64 = 100;

const SCORES_FILE: &str = "snake_scores.txt";
const HIGH_SCORE_FILE: &str = "highscore.txt";
const LOG_FILE: &str = "snake.log";

#[derive(Clone, Debug)]
pub struct Config {
    pub grid: Grid,
    pub initial_length: usize,
    pub initial_foods: usize,
    pub points_per_food: u32,
    pub vertical_tick: Duration,
    pub horizontal_tick: Duration,
    pub pause_poll: Duration,
    pub scores_path: PathBuf,
    pub high_score_path: PathBuf,
    pub log_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            grid: Grid::new(BOARD_WIDTH, BOARD_HEIGHT),
            initial_length: INITIAL_SNAKE_LENGTH,
            initial_foods: INITIAL_FOODS,
            points_per_food: POINTS_PER_FOOD,
            vertical_tick: Duration::from_millis(VERTICAL_TICK_MS),
            horizontal_tick: Duration::from_millis(HORIZONTAL_TICK_MS),
            pause_poll: Duration::from_millis(PAUSE_POLL_MS),
            scores_path: PathBuf::from(SCORES_FILE),
            high_score_path: PathBuf::from(HIGH_SCORE_FILE),
            log_path: PathBuf::from(LOG_FILE),
        }
    }
}

impl Config {
    /// Border on every side of the board plus one line for the score.
    pub fn viewport(&self) -> Coords {
        (
            (self.grid.width + 2) as TermInt,
            (self.grid.height + 3) as TermInt,
        )
    }
}
