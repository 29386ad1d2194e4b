//! Fixed 5×5 boards and coordinates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::model::{TeamId, WordId};
use crate::errors::domain::{DomainError, ValidationKind};

pub const BOARD_SIZE: usize = 5;
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// A validated board position; both components are in `0..BOARD_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    row: u8,
    col: u8,
}

impl Coord {
    /// Accepts any integer pair and rejects anything off the board.
    pub fn new(row: i64, col: i64) -> Result<Self, DomainError> {
        let in_range = |v: i64| (0..BOARD_SIZE as i64).contains(&v);
        if !in_range(row) || !in_range(col) {
            return Err(DomainError::validation(
                ValidationKind::InvalidCoordinates,
                format!("Coordinates ({row}, {col}) are outside the 5x5 board"),
            ));
        }
        Ok(Self {
            row: row as u8,
            col: col as u8,
        })
    }

    pub fn row(self) -> usize {
        self.row as usize
    }

    pub fn col(self) -> usize {
        self.col as usize
    }

    fn from_index(index: usize) -> Self {
        Self {
            row: (index / BOARD_SIZE) as u8,
            col: (index % BOARD_SIZE) as u8,
        }
    }

    /// Split a `"row,col"` string into its raw integer components.
    ///
    /// Range checking is left to [`Coord::new`] so callers can order it
    /// after their own authorization checks.
    pub fn parse_pair(raw: &str) -> Result<(i64, i64), DomainError> {
        let invalid = || {
            DomainError::validation(
                ValidationKind::InvalidCoordinates,
                format!("Expected coordinates as \"row,col\", got {raw:?}"),
            )
        };
        let (row, col) = raw.split_once(',').ok_or_else(invalid)?;
        let row = row.trim().parse::<i64>().map_err(|_| invalid())?;
        let col = col.trim().parse::<i64>().map_err(|_| invalid())?;
        Ok((row, col))
    }
}

impl FromStr for Coord {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = Self::parse_pair(s)?;
        Self::new(row, col)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// Hidden ownership of a single map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapCell {
    Bomb,
    Owner(TeamId),
    Neutral,
}

/// Row-major 5×5 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board<T>([[T; BOARD_SIZE]; BOARD_SIZE]);

pub type MapBoard = Board<MapCell>;
pub type WordsBoard = Board<WordId>;
/// `None` until a team claims the cell.
pub type ProgressBoard = Board<Option<TeamId>>;
pub type PointedBoard = Board<bool>;

impl<T: Copy> Board<T> {
    pub fn filled(value: T) -> Self {
        Self([[value; BOARD_SIZE]; BOARD_SIZE])
    }

    /// Lay out exactly [`CELL_COUNT`] values in row-major order.
    pub fn from_row_major(values: Vec<T>) -> Result<Self, DomainError> {
        if values.len() != CELL_COUNT {
            return Err(DomainError::corrupted(format!(
                "Board requires {CELL_COUNT} cells, got {}",
                values.len()
            )));
        }
        let mut board = Self::filled(values[0]);
        for (index, value) in values.into_iter().enumerate() {
            board.set(Coord::from_index(index), value);
        }
        Ok(board)
    }
}

impl<T> Board<T> {
    pub fn get(&self, at: Coord) -> &T {
        &self.0[at.row()][at.col()]
    }

    pub fn set(&mut self, at: Coord, value: T) {
        self.0[at.row()][at.col()] = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.iter().flatten()
    }

    pub fn cells(&self) -> impl Iterator<Item = (Coord, &T)> {
        self.iter()
            .enumerate()
            .map(|(index, value)| (Coord::from_index(index), value))
    }

    pub fn rows(&self) -> &[[T; BOARD_SIZE]; BOARD_SIZE] {
        &self.0
    }
}

impl<T: Copy + Default> Default for Board<T> {
    fn default() -> Self {
        Self::filled(T::default())
    }
}
