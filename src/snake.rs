use std::collections::{HashSet, VecDeque};

use crate::grid::{Grid, Position};
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Up | Down)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StepResult {
    pub new_head: Position,
    /// Cell the tail held before the step; the renderer erases it if it's free now.
    pub previous_tail: Position,
    pub ate_food: bool,
}

/// Body segments run head first, tail last.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
}

impl Snake {
    /// Lays out `size` segments ending at `head`, trailing away from `direction`.
    pub fn new(grid: &Grid, head: Position, size: usize, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        let body = (0..size.max(1) as i32)
            .map(|i| grid.offset(head, (-dx * i, -dy * i)))
            .collect();

        Snake { body, direction }
    }

    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn contains(&self, pos: &Position) -> bool {
        self.body.contains(pos)
    }

    pub fn get_direction(&self) -> Direction {
        self.direction
    }

    /// Rejects a straight reversal into the neck. The last accepted call before
    /// a step wins.
    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        if new_direction == self.direction.opposite() {
            return false;
        }

        self.direction = new_direction;
        true
    }

    /// Moves one cell forward. Landing on food consumes it and keeps the tail,
    /// which is how the snake grows.
    pub fn step(&mut self, grid: &Grid, food: &mut HashSet<Position>) -> StepResult {
        let new_head = grid.offset(self.head(), self.direction.delta());
        let previous_tail = self.tail();

        self.body.push_front(new_head);

        let ate_food = food.remove(&new_head);
        if !ate_food {
            self.body.pop_back();
        }

        StepResult { new_head, previous_tail, ate_food }
    }

    /// True when the head shares a cell with any other segment.
    pub fn hits_itself(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|seg| *seg == head)
    }
}
