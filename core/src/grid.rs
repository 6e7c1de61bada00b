//! Binary occupancy grid shared with downstream verifiers.
//!
//! Values are `1` for a passable position and `0` for a blocked one. A maze
//! of R x C cells maps to a (2R+1) x (2C+1) grid: cell centers sit at odd
//! coordinates, the even lattice holds walls, and a border of blocked
//! positions surrounds everything.

use crate::error::MazeError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A `(row, col)` position in grid coordinates.
pub type GridPos = (usize, usize);

pub const PASSABLE: u8 = 1;
pub const BLOCKED: u8 = 0;

/// Row-major binary grid.
///
/// Serializes as nested rows. Deserialization goes through
/// [`OccupancyGrid::from_rows`], so ragged or empty input is rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>"))]
pub struct OccupancyGrid {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl OccupancyGrid {
    /// All-blocked grid of the given size.
    pub fn new_blocked(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![BLOCKED; rows * cols],
        }
    }

    /// Build from nested rows, e.g. a grid loaded from JSON.
    ///
    /// Ragged input is rejected as non-square/invalid. Any non-zero value is
    /// treated as passable.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, MazeError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(MazeError::InvalidDimensions {
                rows: height,
                cols: width,
            });
        }
        if let Some(bad) = rows.iter().find(|row| row.len() != width) {
            return Err(MazeError::NonSquareGrid {
                rows: height,
                cols: bad.len(),
            });
        }

        let cells = rows
            .iter()
            .flatten()
            .map(|&v| if v == BLOCKED { BLOCKED } else { PASSABLE })
            .collect();
        Ok(Self {
            rows: height,
            cols: width,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row < self.rows && col < self.cols {
            self.cells.get(row * self.cols + col).copied()
        } else {
            None
        }
    }

    /// Out-of-bounds positions count as blocked.
    pub fn is_passable(&self, (row, col): GridPos) -> bool {
        self.get(row, col) == Some(PASSABLE)
    }

    /// Mark a position passable. Out-of-bounds writes are ignored.
    pub fn open(&mut self, (row, col): GridPos) {
        if row < self.rows && col < self.cols {
            if let Some(cell) = self.cells.get_mut(row * self.cols + col) {
                *cell = PASSABLE;
            }
        }
    }

    /// Flattened row-major bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.cells
    }

    /// Nested rows for JSON and text serialization.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells.chunks(self.cols.max(1)).map(<[u8]>::to_vec).collect()
    }

    pub fn passable_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v == PASSABLE).count()
    }

    /// Check the corner-to-corner export convention: a square grid with both
    /// endpoints on the main diagonal.
    pub fn validate_endpoints(&self, start: GridPos, end: GridPos) -> Result<(), MazeError> {
        if !self.is_square() {
            return Err(MazeError::NonSquareGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        for (label, (row, col)) in [("Start", start), ("End", end)] {
            if row != col {
                return Err(MazeError::OffDiagonal { label, row, col });
            }
        }
        Ok(())
    }
}

impl TryFrom<Vec<Vec<u8>>> for OccupancyGrid {
    type Error = MazeError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        Self::from_rows(&rows)
    }
}

impl From<OccupancyGrid> for Vec<Vec<u8>> {
    fn from(grid: OccupancyGrid) -> Self {
        grid.to_rows()
    }
}
