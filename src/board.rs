//! Board data module.
//!
//! This module contains the cell vocabulary of the game, the move transition table shared by the
//! player and the stones, and the mutable row-major grid the engine plays on.

use std::fmt;

use crate::types::Direction;

/// Semantic content of a single board position.
///
/// A player or a stone standing on a target is a composite state of its own, so a single grid is
/// enough to describe a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Impassable cell.
    Wall,
    /// Free floor.
    Empty,
    /// Free floor that must end up covered by a stone.
    Target,
    /// The player on free floor.
    Player,
    /// The player standing on a target.
    PlayerOnTarget,
    /// A stone on free floor.
    Stone,
    /// A stone covering a target.
    StoneOnTarget,
}

impl Cell {
    /// Maps a level-text symbol to its cell.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '*' => Some(Self::Wall),
            ' ' => Some(Self::Empty),
            'x' => Some(Self::Target),
            'p' => Some(Self::Player),
            '+' => Some(Self::PlayerOnTarget),
            'o' => Some(Self::Stone),
            'd' => Some(Self::StoneOnTarget),
            _ => None,
        }
    }

    /// Returns the level-text symbol of this cell.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Wall => '*',
            Self::Empty => ' ',
            Self::Target => 'x',
            Self::Player => 'p',
            Self::PlayerOnTarget => '+',
            Self::Stone => 'o',
            Self::StoneOnTarget => 'd',
        }
    }

    /// Whether the cell is a target, occupied or not.
    #[must_use]
    pub const fn is_target(self) -> bool {
        matches!(
            self,
            Self::Target | Self::PlayerOnTarget | Self::StoneOnTarget
        )
    }

    /// Whether the cell holds the player.
    #[must_use]
    pub const fn is_player(self) -> bool {
        matches!(self, Self::Player | Self::PlayerOnTarget)
    }

    /// Whether the cell holds a stone.
    #[must_use]
    pub const fn is_stone(self) -> bool {
        matches!(self, Self::Stone | Self::StoneOnTarget)
    }

    /// Whether something may be moved onto the cell.
    #[must_use]
    pub const fn is_free(self) -> bool {
        matches!(self, Self::Empty | Self::Target)
    }
}

/// Computes what two cells become when the occupant of `old` moves onto `new`.
///
/// Returns `(old becomes, new becomes)`. The occupant keeps its kind and picks up or drops the
/// on-target flag; the vacated cell keeps the target it may have been covering. Pairs outside the
/// table (a wall, an occupied destination, an empty source) yield `None`.
#[must_use]
pub const fn transition(old: Cell, new: Cell) -> Option<(Cell, Cell)> {
    match (old, new) {
        (Cell::Player, Cell::Empty) => Some((Cell::Empty, Cell::Player)),
        (Cell::Player, Cell::Target) => Some((Cell::Empty, Cell::PlayerOnTarget)),
        (Cell::PlayerOnTarget, Cell::Empty) => Some((Cell::Target, Cell::Player)),
        (Cell::PlayerOnTarget, Cell::Target) => Some((Cell::Target, Cell::PlayerOnTarget)),
        (Cell::Stone, Cell::Empty) => Some((Cell::Empty, Cell::Stone)),
        (Cell::Stone, Cell::Target) => Some((Cell::Empty, Cell::StoneOnTarget)),
        (Cell::StoneOnTarget, Cell::Empty) => Some((Cell::Target, Cell::Stone)),
        (Cell::StoneOnTarget, Cell::Target) => Some((Cell::Target, Cell::StoneOnTarget)),
        _ => None,
    }
}

/// A `(row, column)` coordinate on a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    /// Zero-based row, growing downwards.
    pub row: usize,
    /// Zero-based column, growing to the right.
    pub column: usize,
}

impl Position {
    /// Creates a position from its row and column.
    #[must_use]
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// Mutable grid of cells for the level in play.
///
/// Cells are stored row-major, so the cell at `(row, column)` lives at `row * width + column`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    /// Number of columns.
    width: usize,
    /// Number of rows.
    height: usize,
    /// Row-major cell storage of exactly `width * height` entries.
    cells: Vec<Cell>,
}

impl Board {
    /// Builds a board from row-major cells.
    ///
    /// # Panics
    ///
    /// Panics if `cells` does not hold exactly `width * height` entries.
    #[must_use]
    pub fn new(width: usize, height: usize, cells: Vec<Cell>) -> Self {
        assert_eq!(
            cells.len(),
            width * height,
            "board storage must match its dimensions"
        );

        Self {
            width,
            height,
            cells,
        }
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Row-major view of every cell.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Returns the linear index of `position`, or `None` when it lies off the board.
    const fn index(&self, position: Position) -> Option<usize> {
        if position.row < self.height && position.column < self.width {
            Some(position.row * self.width + position.column)
        } else {
            None
        }
    }

    /// Returns the cell at `position`, or `None` when it lies off the board.
    #[must_use]
    pub fn get(&self, position: Position) -> Option<Cell> {
        self.index(position)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Returns the position one step from `position`, or `None` when that step leaves the board.
    ///
    /// Steps off the top or left edge are caught by the checked arithmetic rather than wrapping.
    #[must_use]
    pub fn neighbor(&self, position: Position, direction: Direction) -> Option<Position> {
        let (delta_row, delta_column) = direction.delta();
        let row = position.row.checked_add_signed(delta_row)?;
        let column = position.column.checked_add_signed(delta_column)?;
        let next = Position::new(row, column);

        self.index(next).map(|_| next)
    }

    /// Iterates over every cell together with its position, row by row.
    pub fn positions(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        let width = self.width.max(1);

        self.cells.iter().enumerate().map(move |(index, cell)| {
            (Position::new(index / width, index % width), *cell)
        })
    }

    /// Counts the cells matching `predicate`.
    #[must_use]
    pub fn count_where(&self, predicate: fn(Cell) -> bool) -> usize {
        self.cells.iter().filter(|cell| predicate(**cell)).count()
    }

    /// Finds the first cell holding the player.
    #[must_use]
    pub fn find_player(&self) -> Option<Position> {
        self.positions()
            .find_map(|(position, cell)| cell.is_player().then_some(position))
    }

    /// Moves the occupant of `from` onto `to` following the [`transition`] table.
    ///
    /// Returns `false` and leaves the board untouched when either position is off the board or
    /// the pair of cells has no entry in the table.
    pub(crate) fn relocate(&mut self, from: Position, to: Position) -> bool {
        let (Some(from_index), Some(to_index)) = (self.index(from), self.index(to)) else {
            return false;
        };
        let (Some(old), Some(new)) = (self.get(from), self.get(to)) else {
            return false;
        };
        let Some((old_becomes, new_becomes)) = transition(old, new) else {
            return false;
        };

        if let Some(cell) = self.cells.get_mut(from_index) {
            *cell = old_becomes;
        }
        if let Some(cell) = self.cells.get_mut(to_index) {
            *cell = new_becomes;
        }

        true
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row_index, row) in self.cells.chunks(self.width.max(1)).enumerate() {
            if row_index > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
        }

        Ok(())
    }
}
