//! Board grid and the geometry used for win detection.
//!
//! This module contains:
//! - The `Grid` cell matrix and disc dropping
//! - Axis extraction around a cell (row, column and both diagonals)
//! - Sliding-window run detection along an axis

use crate::engine::GameError;
use serde::{Deserialize, Serialize};

/// Cell value: `EMPTY` or the indicator of the player occupying it (1 or 2)
pub type Indicator = u8;

/// Indicator of an unoccupied cell
pub const EMPTY: Indicator = 0;

/// Rectangular `rows x columns` board, row 0 at the top.
///
/// A grid that has never been started has no rows at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    cells: Vec<Vec<Indicator>>,
}

impl Grid {
    /// Create an all-empty grid
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            cells: vec![vec![EMPTY; columns]; rows],
        }
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Number of columns (0 for an unstarted grid)
    pub fn columns(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    /// Get the cell at a position, if it exists
    pub fn get(&self, row: usize, column: usize) -> Option<Indicator> {
        self.cells.get(row)?.get(column).copied()
    }

    /// Get a full row
    pub fn row(&self, row: usize) -> Option<&[Indicator]> {
        self.cells.get(row).map(Vec::as_slice)
    }

    /// Get a full column, top to bottom (the transpose at `column`)
    pub fn column(&self, column: usize) -> Vec<Indicator> {
        self.cells
            .iter()
            .filter_map(|row| row.get(column).copied())
            .collect()
    }

    /// Iterate over rows, top to bottom
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Indicator]> {
        self.cells.iter().map(Vec::as_slice)
    }

    /// Count the occupied cells
    pub fn occupied(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell != EMPTY)
            .count()
    }

    /// Check whether every cell is empty
    pub fn is_clear(&self) -> bool {
        self.occupied() == 0
    }

    /// Drop a disc into `column`, returning the row it landed on.
    ///
    /// The column is addressed in every row from the bottom up: an index that
    /// does not exist in a row is `ColumnOutOfBounds`, and a column with no
    /// empty cell is `FullColumn`. Nothing is written on error.
    pub fn drop_disc(&mut self, column: usize, indicator: Indicator) -> Result<usize, GameError> {
        for (row_idx, row) in self.cells.iter_mut().enumerate().rev() {
            let cell = row.get_mut(column).ok_or(GameError::ColumnOutOfBounds)?;
            if *cell == EMPTY {
                *cell = indicator;
                return Ok(row_idx);
            }
        }
        Err(GameError::FullColumn)
    }
}

/// Check if `axis` holds `win_length` consecutive cells of `indicator`.
///
/// An axis shorter than `win_length` has no complete window and never wins.
pub fn axis_has_winner(indicator: Indicator, axis: &[Indicator], win_length: usize) -> bool {
    if win_length == 0 {
        return false;
    }
    axis.windows(win_length)
        .any(|window| window.iter().all(|&cell| cell == indicator))
}

/// Slice of `axis` reaching `n` cells either side of `idx`, clamped to its bounds.
///
/// The window is `[idx - n, idx + n)`, so it reaches one cell further back
/// than forward.
pub fn surrounding_slice(axis: &[Indicator], idx: usize, n: usize) -> &[Indicator] {
    let start = idx.saturating_sub(n).min(axis.len());
    let end = idx.saturating_add(n).min(axis.len());
    &axis[start..end.max(start)]
}

/// Diagonal of `grid` through `(row, column)`, reaching `n` cells either way.
///
/// Cells are visited at `(row - i, column - i)` for `i` in `[-n, n)`, or
/// `(row - i, column + i)` when `flip` is set. A position is skipped when its
/// raw coordinates have opposite signs (neither zero). Otherwise a negative
/// coordinate counts back from the end of its dimension, and anything
/// still off the board is skipped.
///
/// Offsets past twice the board's height plus width land off the board even
/// after the wrap, so `n` is capped there.
pub fn surrounding_diag(grid: &Grid, row: usize, column: usize, n: usize, flip: bool) -> Vec<Indicator> {
    let n = n.min(2 * (grid.rows() + grid.columns()));
    let (row, column, n) = (row as isize, column as isize, n as isize);
    let direction = if flip { 1 } else { -1 };

    (-n..n)
        .filter_map(|i| {
            let xi = row - i;
            let yi = column + i * direction;
            if (xi < 0 && yi > 0) || (xi > 0 && yi < 0) {
                return None;
            }
            let r = wrap_index(xi, grid.rows())?;
            let c = wrap_index(yi, grid.columns())?;
            grid.get(r, c)
        })
        .collect()
}

/// Resolve an index that may count back from the end (`-1` is the last slot)
fn wrap_index(idx: isize, len: usize) -> Option<usize> {
    if idx >= 0 {
        let idx = idx as usize;
        (idx < len).then_some(idx)
    } else {
        let back = idx.unsigned_abs();
        (back <= len).then(|| len - back)
    }
}
