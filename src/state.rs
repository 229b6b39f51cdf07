//! One game session's simulation, free of any terminal I/O.

use std::collections::HashSet;

use rand::Rng;

use crate::config::Config;
use crate::food::place_foods;
use crate::grid::{Grid, Position};
use crate::snake::{Direction, Snake, StepResult};

#[derive(Clone, Debug)]
pub struct GameState {
    pub grid: Grid,
    pub snake: Snake,
    pub food: HashSet<Position>,
    pub score: u32,
    pub points_per_food: u32,
}

/// What a tick did, for the renderer and the loop driver.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Tick {
    pub step: StepResult,
    pub game_over: bool,
}

impl GameState {
    pub fn new<R: Rng>(config: &Config, rng: &mut R) -> Self {
        let grid = config.grid;
        let snake = Snake::new(&grid, grid.center(), config.initial_length, Direction::Right);
        let mut state = GameState::with_parts(grid, snake, HashSet::new(), config.points_per_food);
        state.add_food(rng, config.initial_foods);
        state
    }

    pub fn with_parts(grid: Grid, snake: Snake, food: HashSet<Position>, points_per_food: u32) -> Self {
        GameState { grid, snake, food, score: 0, points_per_food }
    }

    pub fn turn(&mut self, dir: Direction) -> bool {
        self.snake.set_direction(dir)
    }

    /// Advances the snake one cell, scores and replaces eaten food, then checks
    /// for self-collision.
    pub fn tick<R: Rng>(mut self, rng: &mut R) -> (Self, Tick) {
        let step = self.snake.step(&self.grid, &mut self.food);

        if step.ate_food {
            self.score += self.points_per_food;
            self.add_food(rng, 1);
        }

        let game_over = self.snake.hits_itself();
        (self, Tick { step, game_over })
    }

    fn add_food<R: Rng>(&mut self, rng: &mut R, count: usize) {
        let new_food = place_foods(rng, &self.grid, count, &self.snake, &self.food);
        self.food.extend(new_food);
    }
}
