//! Deterministic maze generation and solving
//!
//! A seed drives a Park-Miller generator, which drives a recursive
//! backtracker carving a perfect maze. The maze is encoded as a binary
//! occupancy grid and solved by breadth-first search into a sequence of
//! direction codes. Verifiers and renderers that share nothing but the seed
//! regenerate the same grid by running the same arithmetic.
//!
//! ```
//! use maze_core::Maze;
//!
//! let maze = Maze::generate(20, 20, Some(2918957128)).unwrap();
//! let (grid, start, end) = maze.to_occupancy_grid();
//! let path = maze_core::solve_bfs(&grid, start, end);
//! let moves = maze_core::path_to_moves(&path);
//! assert_eq!(moves.len(), path.len() - 1);
//! ```

pub mod direction;
pub mod error;
pub mod grid;
pub mod maze_gen;
pub mod rng;
pub mod solver;

// Re-export commonly used types for convenience
pub use direction::Direction;
pub use error::MazeError;
pub use grid::{GridPos, OccupancyGrid};
pub use maze_gen::Maze;
pub use rng::SimpleLCG;
pub use solver::{apply_moves, path_to_moves, solve_bfs, verify_moves, Solution};

/// Maze dimensions (cells, not including walls)
pub const MAZE_ROWS: usize = 20;
pub const MAZE_COLS: usize = 20;

/// Grid size is MAZE_ROWS * 2 + 1 (includes walls)
pub const GRID_SIZE: usize = MAZE_ROWS * 2 + 1; // 41 for 20x20 maze

/// Start position in grid coordinates (both row and col)
pub const START_POS: usize = 1;

/// End position in grid coordinates (both row and col)
pub const END_POS: usize = GRID_SIZE - 2;

/// Maximum number of moves a verifier accepts
pub const MAX_MOVES: usize = 500;

/// Generate a maze; shorthand for [`Maze::generate`].
pub fn generate(rows: usize, cols: usize, seed: Option<u32>) -> Result<Maze, MazeError> {
    Maze::generate(rows, cols, seed)
}

/// Solve an encoded grid; shorthand for [`solve_bfs`].
pub fn solve(grid: &OccupancyGrid, start: GridPos, end: GridPos) -> Vec<GridPos> {
    solve_bfs(grid, start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(GRID_SIZE, 41);
        assert_eq!(MAZE_ROWS * 2 + 1, GRID_SIZE);
        assert_eq!(END_POS, 39);
    }

    #[test]
    fn test_default_maze_endpoints() {
        let maze = generate(MAZE_ROWS, MAZE_COLS, Some(1)).unwrap();
        let (grid, start, end) = maze.to_occupancy_grid();
        assert_eq!(start, (START_POS, START_POS));
        assert_eq!(end, (END_POS, END_POS));
        assert_eq!(grid.validate_endpoints(start, end), Ok(()));
        assert!(!solve(&grid, start, end).is_empty());
    }
}
