use std::collections::HashSet;

use log::warn;
use rand::Rng;

use crate::grid::{Grid, Position};
use crate::snake::Snake;

/// Random draws per food before falling back to scanning for a free cell.
const MAX_SAMPLES_PER_FOOD: usize = 256;

/// Picks `count` new food cells clear of the snake, the existing food and
/// each other. Returns fewer only when the board has no free cell left.
pub fn place_foods<R: Rng>(
    rng: &mut R,
    grid: &Grid,
    count: usize,
    snake: &Snake,
    existing: &HashSet<Position>,
) -> Vec<Position> {
    let mut placed: Vec<Position> = Vec::with_capacity(count);

    for _ in 0..count {
        let is_free = |pos: &Position| {
            !snake.contains(pos) && !existing.contains(pos) && !placed.contains(pos)
        };

        let sampled = (0..MAX_SAMPLES_PER_FOOD)
            .map(|_| Position::new(rng.gen_range(0..grid.width), rng.gen_range(0..grid.height)))
            .find(|pos| is_free(pos));

        let pos = match sampled {
            Some(pos) => pos,
            None => {
                warn!("Food sampling kept hitting occupied cells, scanning for a free one");
                let free: Vec<Position> = grid.positions().filter(|pos| is_free(pos)).collect();
                if free.is_empty() {
                    warn!("Board is full, placed {} of {} foods", placed.len(), count);
                    break;
                }
                free[rng.gen_range(0..free.len())]
            }
        };

        debug_assert!(grid.contains(pos));
        placed.push(pos);
    }

    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn places_exactly_n_disjoint_foods() {
        let grid = Grid::new(40, 20);
        let snake = Snake::new(&grid, grid.center(), 5, Direction::Right);
        let existing: HashSet<_> = [Position::new(0, 0), Position::new(1, 1)].iter().copied().collect();
        let mut rng = StdRng::seed_from_u64(7);

        for n in 0..20 {
            let foods = place_foods(&mut rng, &grid, n, &snake, &existing);
            assert_eq!(foods.len(), n);

            let unique: HashSet<_> = foods.iter().copied().collect();
            assert_eq!(unique.len(), n);
            for pos in foods.iter() {
                assert!(grid.contains(*pos));
                assert!(!snake.contains(pos));
                assert!(!existing.contains(pos));
            }
        }
    }

    #[test]
    fn same_seed_same_placement() {
        let grid = Grid::new(40, 20);
        let snake = Snake::new(&grid, grid.center(), 5, Direction::Right);
        let none = HashSet::new();

        let a = place_foods(&mut StdRng::seed_from_u64(42), &grid, 3, &snake, &none);
        let b = place_foods(&mut StdRng::seed_from_u64(42), &grid, 3, &snake, &none);
        assert_eq!(a, b);
    }

    #[test]
    fn fills_last_free_cell_on_crowded_board() {
        // 3x1 board: snake takes two cells, one remains
        let grid = Grid::new(3, 1);
        let snake = Snake::new(&grid, Position::new(1, 0), 2, Direction::Right);
        let mut rng = StdRng::seed_from_u64(1);

        let foods = place_foods(&mut rng, &grid, 1, &snake, &HashSet::new());
        assert_eq!(foods, vec![Position::new(2, 0)]);
    }

    #[test]
    fn stops_when_board_is_full() {
        let grid = Grid::new(2, 1);
        let snake = Snake::new(&grid, Position::new(1, 0), 2, Direction::Right);
        let mut rng = StdRng::seed_from_u64(1);

        assert!(place_foods(&mut rng, &grid, 2, &snake, &HashSet::new()).is_empty());
    }
}
