use super::board::Bounds;
use ratatui::layout::Position;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Unit step `(dx, dy)` for this direction, with y growing downwards
    pub(crate) fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// Move `pos` one cell in this direction, wrapping around the edges of
    /// `bounds`
    pub(crate) fn advance(self, pos: Position, bounds: Bounds) -> Position {
        let (dx, dy) = self.delta();
        Position {
            x: wrap(pos.x, dx, bounds.width),
            y: wrap(pos.y, dy, bounds.height),
        }
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}

/// `(x + delta + max) mod max`, computed without leaving `u16`
fn wrap(x: u16, delta: i32, max: u16) -> u16 {
    let max32 = i32::from(max);
    let x32 = i32::from(x);
    u16::try_from((x32 + delta + max32).rem_euclid(max32)).unwrap_or_default()
}
