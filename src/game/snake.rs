use super::board::Bounds;
use super::direction::Direction;
use ratatui::layout::Position;
use std::collections::{TryReserveError, VecDeque};
use std::num::NonZeroUsize;
use thiserror::Error;

/// Snake state.  Snate.
///
/// The body is stored head first: `body[0]` is the head and the back of the
/// deque is the tail.  The snake never sheds segments; it only grows.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    pub(super) body: VecDeque<Position>,
}

impl Snake {
    /// Create a snake of `length` segments with its head at `head` and the
    /// rest of its body trailing off to the west, segment `i` at
    /// `(head.x - i, head.y)`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the body could not be allocated or if the body would
    /// extend past the left edge of the board.
    pub(crate) fn new(head: Position, length: NonZeroUsize) -> Result<Snake, SnakeError> {
        let length = length.get();
        if length > usize::from(head.x) + 1 {
            return Err(SnakeError::NoRoom {
                length,
                head_x: head.x,
            });
        }
        let mut body = VecDeque::new();
        body.try_reserve_exact(length)?;
        body.extend((0..=head.x).rev().take(length).map(|x| Position { x, ..head }));
        Ok(Snake { body })
    }

    pub(crate) fn head(&self) -> Position {
        // `new` never yields an empty body and nothing removes segments.
        self.body.front().copied().unwrap_or_default()
    }

    /// Iterate over the cells of the snake, head first
    pub(crate) fn segments(&self) -> impl ExactSizeIterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.body.len()
    }

    pub(crate) fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Move the head one cell in `direction`, wrapping at the edges of
    /// `bounds`.  Each following segment moves into the cell its predecessor
    /// occupied before the move.
    pub(crate) fn advance(&mut self, direction: Direction, bounds: Bounds) {
        let mut segments = self.body.iter_mut();
        let Some(head) = segments.next() else {
            return;
        };
        let next = direction.advance(*head, bounds);
        let mut prev = std::mem::replace(head, next);
        for seg in segments {
            prev = std::mem::replace(seg, prev);
        }
    }

    /// Add a new head segment at `pos` in response to eating the food there
    pub(crate) fn grow(&mut self, pos: Position) {
        self.body.push_front(pos);
    }

    /// Returns `true` if the head is outside `bounds` or overlaps any other
    /// segment.
    pub(crate) fn is_collision(&self, bounds: Bounds) -> bool {
        let head = self.head();
        !bounds.contains(head) || self.body.iter().skip(1).any(|&p| p == head)
    }
}

#[derive(Debug, Error)]
pub(crate) enum SnakeError {
    #[error("failed to allocate snake body")]
    Allocation(#[from] TryReserveError),
    #[error("a snake of length {length} does not fit west of column {head_x}")]
    NoRoom { length: usize, head_x: u16 },
}
