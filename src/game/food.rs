use super::board::Bounds;
use super::snake::Snake;
use crate::consts;
use rand::{seq::IteratorRandom, Rng};
use ratatui::layout::Position;

/// Pick a random cell of `bounds` that the snake does not occupy.
///
/// Cells are sampled uniformly until a free one turns up.  After
/// [`MAX_FOOD_ATTEMPTS`][consts::MAX_FOOD_ATTEMPTS] misses in a row, a free
/// cell is instead chosen directly from the list of all free cells, which is
/// still uniform but costs a full scan of the board.  Returns `None` if the
/// snake covers the whole board.
///
/// Right after the snake grows, two of its segments share a cell, so its
/// length is not the number of cells it covers.
pub(crate) fn generate<R: Rng>(rng: &mut R, bounds: Bounds, snake: &Snake) -> Option<Position> {
    for _ in 0..consts::MAX_FOOD_ATTEMPTS {
        let pos = Position {
            x: rng.random_range(0..bounds.width),
            y: rng.random_range(0..bounds.height),
        };
        if !snake.occupies(pos) {
            return Some(pos);
        }
    }
    bounds
        .positions()
        .filter(|&p| !snake.occupies(p))
        .choose(rng)
}
