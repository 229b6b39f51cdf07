//! Wrap-around board geometry.

use crate::{Coords, TermInt};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Terminal cell of this board position, shifted past the border.
    pub fn to_coords(self) -> Coords {
        ((self.x + 1) as TermInt, (self.y + 1) as TermInt)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
}

impl Grid {
    pub const fn new(width: i32, height: i32) -> Self {
        Grid { width, height }
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    pub fn contains(&self, pos: Position) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    /// Moves `pos` by `(dx, dy)`, re-entering from the opposite edge.
    pub fn offset(&self, pos: Position, (dx, dy): (i32, i32)) -> Position {
        Position::new(wrap(pos.x + dx, self.width), wrap(pos.y + dy, self.height))
    }

    /// Every cell in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Position::new(x, y)))
    }
}

/// Normalizes `coord` into `[0, dimension)`. Never negative.
pub fn wrap(coord: i32, dimension: i32) -> i32 {
    coord.rem_euclid(dimension)
}
