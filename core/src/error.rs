//! Error types for maze generation, encoding and solving.

/// Errors raised by the maze pipeline.
///
/// None of these are transient: the core performs no I/O, so every error is
/// either a bad configuration or a defect in generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MazeError {
    #[error("Maze dimensions must be positive (got {rows}x{cols})")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("Maze must be square! Got {rows}x{cols}")]
    NonSquareGrid { rows: usize, cols: usize },

    #[error("{label} position must be diagonal (row == col), got ({row}, {col})")]
    OffDiagonal {
        label: &'static str,
        row: usize,
        col: usize,
    },

    #[error("Generated maze is not solvable (seed {seed})")]
    Unsolvable { seed: u32 },

    #[error("Invalid move direction: {0} (must be 0-3)")]
    InvalidDirection(u8),
}

impl MazeError {
    /// Whether the error stems from caller input rather than a generation defect.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, MazeError::Unsolvable { .. })
    }
}
