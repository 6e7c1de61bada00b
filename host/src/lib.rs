use std::path::PathBuf;

use maze_core::{Direction, GridPos, Maze, MazeError, OccupancyGrid, MAX_MOVES, MAZE_COLS, MAZE_ROWS};
use serde::{Deserialize, Serialize};

pub mod export;

pub use export::{export_all, visualize};

/// Errors from building or exporting a maze
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Maze(#[from] MazeError),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Solution has {moves} moves but at most {max} are allowed")]
    TooManyMoves { moves: usize, max: usize },

    #[error("Grid size {0} does not fit the circuit's u8 coordinates")]
    GridTooLarge(usize),

    #[error("Invalid moves file {}: {reason}", .path.display())]
    MovesFile { path: PathBuf, reason: String },
}

/// Generation and export settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    /// Maze rows in cells
    pub rows: usize,
    /// Maze columns in cells; must equal `rows` for export
    pub cols: usize,
    /// Seed, or `None` to draw a random one
    pub seed: Option<u32>,
    /// Length moves are zero-padded to for the circuit inputs
    pub max_moves: usize,
    /// Directory the exported files are written under
    pub output_dir: PathBuf,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            rows: MAZE_ROWS,
            cols: MAZE_COLS,
            seed: None,
            max_moves: MAX_MOVES,
            output_dir: PathBuf::from("."),
        }
    }
}

/// A generated, validated and solved maze, ready for export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MazeBundle {
    /// The seed used to generate this maze
    pub seed: u32,

    /// Maze dimensions in cells
    pub rows: usize,
    pub cols: usize,

    /// Binary grid (0=wall, 1=path)
    pub grid: OccupancyGrid,

    /// Start and end in grid coordinates
    pub start: GridPos,
    pub end: GridPos,

    /// BFS path from start to end inclusive
    pub path: Vec<GridPos>,

    /// One direction per path step (serialized as 0=NORTH .. 3=WEST)
    pub moves: Vec<Direction>,
}

impl MazeBundle {
    /// Generate, encode, validate and solve a maze.
    ///
    /// # Returns
    /// * `Ok(MazeBundle)` - The maze with its grid and BFS solution
    /// * `Err` - On non-positive or non-square dimensions, or if the carved
    ///   maze cannot be solved
    ///
    /// # Example
    /// ```
    /// use host::{MazeBundle, MazeConfig};
    ///
    /// let config = MazeConfig { seed: Some(2918957128), ..MazeConfig::default() };
    /// let bundle = MazeBundle::build(&config).unwrap();
    /// assert_eq!(bundle.moves.len(), 312);
    /// ```
    pub fn build(config: &MazeConfig) -> Result<Self, ExportError> {
        tracing::info!("Generating {}x{} maze (seed: {:?})", config.rows, config.cols, config.seed);

        let maze = Maze::generate(config.rows, config.cols, config.seed)?;
        let (grid, start, end) = maze.to_occupancy_grid();
        grid.validate_endpoints(start, end)?;

        let solution = maze.solve()?;
        tracing::info!(
            "Maze {} solved: {} positions, {} moves",
            maze.seed(),
            solution.path.len(),
            solution.moves.len()
        );

        Ok(Self {
            seed: maze.seed(),
            rows: maze.rows(),
            cols: maze.cols(),
            grid,
            start,
            end,
            path: solution.path,
            moves: solution.moves,
        })
    }

    /// Moves as wire codes.
    pub fn move_codes(&self) -> Vec<u8> {
        self.moves.iter().map(|&dir| dir.into()).collect()
    }

    /// Moves zero-padded to `max_moves`.
    pub fn padded_moves(&self, max_moves: usize) -> Result<Vec<u8>, ExportError> {
        if self.moves.len() > max_moves {
            return Err(ExportError::TooManyMoves {
                moves: self.moves.len(),
                max: max_moves,
            });
        }
        let mut padded = self.move_codes();
        padded.resize(max_moves, 0);
        Ok(padded)
    }

    /// Check a player's move codes against this maze, rejecting more than
    /// `max_moves` of them the way the circuit does.
    pub fn verify(&self, moves: &[u8], max_moves: usize) -> bool {
        maze_core::verify_moves(&self.grid, moves, self.start, self.end, max_moves)
    }
}

/// Seed-only config consumed by the frontend renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontendConfig {
    pub seed: u32,
    pub rows: usize,
    pub cols: usize,
}

impl From<&MazeBundle> for FrontendConfig {
    fn from(bundle: &MazeBundle) -> Self {
        Self {
            seed: bundle.seed,
            rows: bundle.rows,
            cols: bundle.cols,
        }
    }
}

/// Initialize tracing the same way for every binary
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MazeConfig::default();
        assert_eq!((config.rows, config.cols), (20, 20));
        assert_eq!(config.max_moves, 500);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_config_defaults_fill_missing_fields() {
        let config: MazeConfig = serde_json::from_str(r#"{"seed": 7, "rows": 5}"#).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.rows, 5);
        assert_eq!(config.cols, 20);
    }

    #[test]
    fn test_build_rejects_non_square() {
        let config = MazeConfig {
            rows: 4,
            cols: 6,
            seed: Some(1),
            ..MazeConfig::default()
        };
        let err = MazeBundle::build(&config).unwrap_err();
        assert!(matches!(
            err,
            ExportError::Maze(MazeError::NonSquareGrid { rows: 9, cols: 13 })
        ));
    }

    #[test]
    fn test_build_rejects_zero_dimensions() {
        let config = MazeConfig {
            rows: 0,
            seed: Some(1),
            ..MazeConfig::default()
        };
        assert!(matches!(
            MazeBundle::build(&config),
            Err(ExportError::Maze(MazeError::InvalidDimensions { .. }))
        ));
    }

    #[test]
    fn test_padded_moves() {
        let config = MazeConfig {
            rows: 3,
            cols: 3,
            seed: Some(7),
            ..MazeConfig::default()
        };
        let bundle = MazeBundle::build(&config).unwrap();
        assert_eq!(bundle.padded_moves(10).unwrap(), vec![1, 1, 2, 2, 1, 1, 2, 2, 0, 0]);
        assert!(matches!(
            bundle.padded_moves(4),
            Err(ExportError::TooManyMoves { moves: 8, max: 4 })
        ));
    }

    #[test]
    fn test_bundle_json_uses_wire_codes() {
        let config = MazeConfig {
            rows: 3,
            cols: 3,
            seed: Some(7),
            ..MazeConfig::default()
        };
        let bundle = MazeBundle::build(&config).unwrap();
        let json = serde_json::to_value(&bundle).unwrap();
        assert_eq!(json["moves"], serde_json::json!([1, 1, 2, 2, 1, 1, 2, 2]));
        assert_eq!(json["start"], serde_json::json!([1, 1]));

        assert_eq!(json["grid"], serde_json::json!(bundle.grid.to_rows()));

        let back: MazeBundle = serde_json::from_value(json).unwrap();
        assert_eq!(back.moves, bundle.moves);
        assert_eq!(back.grid, bundle.grid);
    }

    #[test]
    fn test_malformed_grid_json_is_rejected() {
        assert!(serde_json::from_str::<OccupancyGrid>("[[1, 1, 1], [1]]").is_err());
        assert!(serde_json::from_str::<OccupancyGrid>("[]").is_err());
        // The flat field layout is not a grid
        assert!(serde_json::from_str::<OccupancyGrid>(r#"{"rows":3,"cols":3,"cells":[1]}"#).is_err());

        let grid: OccupancyGrid = serde_json::from_str("[[0, 1], [1, 0]]").unwrap();
        assert_eq!((grid.rows(), grid.cols()), (2, 2));

        let config = MazeConfig {
            rows: 3,
            cols: 3,
            seed: Some(7),
            ..MazeConfig::default()
        };
        let mut json = serde_json::to_value(MazeBundle::build(&config).unwrap()).unwrap();
        json["grid"] = serde_json::json!([[1, 1, 1], [1]]);
        assert!(serde_json::from_value::<MazeBundle>(json).is_err());
    }
}
