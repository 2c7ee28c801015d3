//! Type definitions for player input and level progression.

/// Progression status of the game engine.
///
/// The engine starts every level in [`Status::Playing`] and leaves it once every target holds a
/// stone. Which of the two finished states it lands in depends on whether the catalog wrapped
/// around.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// A level is loaded and accepts moves.
    Playing,
    /// The last level was solved and another one follows in the catalog.
    LevelClear,
    /// The last level of the catalog was solved; the next advance restarts from the first one.
    GameClear,
}

/// One of the four unit steps on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Towards row zero.
    Up,
    /// Towards the last row.
    Down,
    /// Towards column zero.
    Left,
    /// Towards the last column.
    Right,
}

impl Direction {
    /// All four directions, in the order used by exhaustive searches and tests.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the `(row, column)` offset of a single step in this direction.
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }

    /// Builds a direction from a `(row, column)` offset.
    ///
    /// Only unit offsets with exactly one non-zero component are directions; diagonal moves and
    /// moves longer than a single cell yield `None`.
    #[must_use]
    pub const fn from_delta(delta_row: isize, delta_column: isize) -> Option<Self> {
        match (delta_row, delta_column) {
            (-1, 0) => Some(Self::Up),
            (1, 0) => Some(Self::Down),
            (0, -1) => Some(Self::Left),
            (0, 1) => Some(Self::Right),
            _ => None,
        }
    }
}

/// A discrete input event understood by the game engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    /// Move the player one cell, pushing a stone if one is in the way.
    Move(Direction),
    /// Continue to the next level after a clear, or restart the current level while playing.
    Advance,
}
